//! SEO metadata for the document head

use serde::Serialize;

use crate::config::SiteConfig;
use crate::helpers::{absolute_url, meta_generator, open_graph};

#[derive(Debug, Clone, Serialize)]
pub struct SeoView {
    /// Full `<title>` text
    pub title: String,
    pub description: String,
    /// Canonical absolute URL
    pub url: String,
    /// Pre-rendered Open Graph / Twitter / generator tags
    pub meta_tags: String,
}

impl SeoView {
    /// `title` is the page title; an empty one falls back to the site title.
    /// `path` is a resolved site path such as the output of `post_path`.
    pub fn new(config: &SiteConfig, title: &str, description: &str, path: &str) -> Self {
        let full_title = if title.is_empty() {
            config.title.clone()
        } else {
            format!("{} | {}", title, config.title)
        };
        let description = if description.is_empty() {
            config.description.clone()
        } else {
            description.to_string()
        };
        let url = absolute_url(config, path);
        let meta_tags = format!(
            "{}\n{}",
            open_graph(
                &full_title,
                &description,
                &url,
                &config.title,
                &config.language
            ),
            meta_generator()
        );

        Self {
            title: full_title,
            description,
            url,
            meta_tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seo_title_and_description() {
        let mut config = SiteConfig::default();
        config.title = "junbread".to_string();
        config.description = "site description".to_string();
        config.url = "https://junbread.dev".to_string();

        let seo = SeoView::new(&config, "About", "", "/about");
        assert_eq!(seo.title, "About | junbread");
        assert_eq!(seo.description, "site description");
        assert_eq!(seo.url, "https://junbread.dev/about");

        let seo = SeoView::new(&config, "", "page excerpt", "/");
        assert_eq!(seo.title, "junbread");
        assert_eq!(seo.description, "page excerpt");
    }
}
