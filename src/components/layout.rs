//! Layout frame shared by every page

use serde::Serialize;
use tera::Context;

use super::seo::SeoView;
use crate::config::SiteConfig;
use crate::helpers::{join_path, url_for};

/// Header navigation link with a resolved path
#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub title: String,
    pub path: String,
}

/// Data the layout template needs on every page
#[derive(Debug, Clone, Serialize)]
pub struct LayoutView {
    pub site_title: String,
    pub author: String,
    pub language: String,
    pub home_path: String,
    pub navigation: Vec<NavItem>,
    pub external_links: Vec<NavItem>,
    pub stylesheet: String,
    pub feed_path: String,
    pub year: String,
}

impl LayoutView {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            site_title: config.title.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            home_path: join_path(&[config.base_path.as_str()]),
            navigation: config
                .navigation
                .iter()
                .map(|link| NavItem {
                    title: link.title.clone(),
                    path: url_for(config, &link.slug),
                })
                .collect(),
            external_links: config
                .external_links
                .iter()
                .map(|link| NavItem {
                    title: link.name.clone(),
                    path: link.url.clone(),
                })
                .collect(),
            stylesheet: url_for(config, "styles.css"),
            feed_path: url_for(config, "atom.xml"),
            year: chrono::Local::now().format("%Y").to_string(),
        }
    }

    /// Base template context: layout chrome plus SEO metadata
    pub fn context(&self, seo: &SeoView) -> Context {
        let mut context = Context::new();
        context.insert("layout", self);
        context.insert("seo", seo);
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExternalLink;

    #[test]
    fn test_layout_paths() {
        let mut config = SiteConfig::default();
        config.base_path = "/site/".to_string();
        config.external_links.push(ExternalLink {
            name: "GitHub".to_string(),
            url: "https://github.com/junbread".to_string(),
        });

        let layout = LayoutView::new(&config);
        assert_eq!(layout.home_path, "/site");
        assert_eq!(layout.navigation[0].path, "/site/blog");
        assert_eq!(layout.stylesheet, "/site/styles.css");
        assert_eq!(layout.external_links[0].path, "https://github.com/junbread");
    }
}
