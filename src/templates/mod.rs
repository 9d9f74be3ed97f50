//! Built-in minimal theme templates using the Tera template engine
//!
//! All templates are embedded in the binary. Autoescaping is off so
//! pre-rendered bodies pass through untouched; text fields and link targets
//! go through the `esc` filter in the templates.

use std::collections::HashMap;
use tera::{Context, Tera};

use crate::error::RenderResult;
use crate::helpers::html_escape;

/// Stylesheet shipped with the theme, written to `public/styles.css`
pub const STYLESHEET: &str = include_str!("minimal/styles.css");

/// Template renderer with the embedded minimal theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> RenderResult<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("minimal/layout.html")),
            ("homepage.html", include_str!("minimal/homepage.html")),
            ("blog.html", include_str!("minimal/blog.html")),
            ("page.html", include_str!("minimal/page.html")),
            ("post.html", include_str!("minimal/post.html")),
            ("tags.html", include_str!("minimal/tags.html")),
            ("tag.html", include_str!("minimal/tag.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("minimal/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("minimal/partials/footer.html"),
            ),
            (
                "partials/listing.html",
                include_str!("minimal/partials/listing.html"),
            ),
            (
                "partials/listing_item.html",
                include_str!("minimal/partials/listing_item.html"),
            ),
        ])?;

        tera.register_filter("esc", esc_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> RenderResult<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape text for HTML, leaving `/` alone
fn esc_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("esc", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}
