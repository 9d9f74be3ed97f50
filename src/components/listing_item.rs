//! A single entry in a post listing

use serde::Serialize;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::{ContentDocument, TagRef};
use crate::error::RenderResult;
use crate::helpers::{post_path, tag_path};
use crate::templates::TemplateRenderer;

/// A tag with the path of its tag page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLink {
    pub name: String,
    pub slug: String,
    pub path: String,
}

/// Resolve tag pages for a tag list, keeping order and duplicates
pub fn tag_links(tags: &[TagRef], config: &SiteConfig) -> Vec<TagLink> {
    tags.iter()
        .map(|tag| TagLink {
            name: tag.name.clone(),
            slug: tag.slug.clone(),
            path: tag_path(config, &tag.slug),
        })
        .collect()
}

/// Everything a listing entry displays
#[derive(Debug, Clone, Serialize)]
pub struct ListingItemView {
    pub title: String,
    pub date: String,
    /// Canonical path of the post
    pub path: String,
    /// Description when non-empty, else the excerpt
    pub text: String,
    /// `None` when the tag region is omitted
    pub tags: Option<Vec<TagLink>>,
    pub time_to_read: Option<u32>,
}

impl ListingItemView {
    pub fn new(doc: &ContentDocument, show_tags: bool, config: &SiteConfig) -> Self {
        let tags = if show_tags {
            doc.visible_tags().map(|tags| tag_links(tags, config))
        } else {
            None
        };

        Self {
            title: doc.title.clone(),
            date: doc.date.clone(),
            path: post_path(config, &doc.slug),
            text: doc.summary().to_string(),
            tags,
            time_to_read: doc.time_to_read,
        }
    }

    /// Render just this entry
    pub fn render(&self, templates: &TemplateRenderer) -> RenderResult<String> {
        let mut context = Context::new();
        context.insert("item", self);
        templates.render("partials/listing_item.html", &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Body, DocumentKind};

    fn post(tags: Option<Vec<&str>>) -> ContentDocument {
        let mut doc = ContentDocument::new(
            DocumentKind::Post,
            "Hello <World>",
            "/hello",
            Body::MarkedText(String::new()),
        );
        doc.date = "2021-05-02".to_string();
        doc.excerpt = "the excerpt".to_string();
        doc.tags = tags.map(|tags| tags.into_iter().map(TagRef::from_name).collect());
        doc
    }

    #[test]
    fn test_text_prefers_description() {
        let config = SiteConfig::default();
        let mut doc = post(None);
        assert_eq!(ListingItemView::new(&doc, true, &config).text, "the excerpt");

        doc.description = Some(String::new());
        assert_eq!(ListingItemView::new(&doc, true, &config).text, "the excerpt");

        doc.description = Some("the description".to_string());
        assert_eq!(
            ListingItemView::new(&doc, true, &config).text,
            "the description"
        );
    }

    #[test]
    fn test_tags_in_order_with_duplicates() {
        let config = SiteConfig::default();
        let doc = post(Some(vec!["Rust", "Blog", "Rust"]));
        let view = ListingItemView::new(&doc, true, &config);
        let tags = view.tags.unwrap();
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Blog", "Rust"]);
        assert_eq!(tags[0].path, "/tags/rust");
    }

    #[test]
    fn test_tag_region_omitted() {
        let config = SiteConfig::default();
        assert!(ListingItemView::new(&post(Some(vec!["Rust"])), false, &config)
            .tags
            .is_none());
        assert!(ListingItemView::new(&post(Some(vec![])), true, &config)
            .tags
            .is_none());
        assert!(ListingItemView::new(&post(None), true, &config).tags.is_none());
    }

    #[test]
    fn test_path_uses_posts_prefix() {
        let mut config = SiteConfig::default();
        config.posts_prefix = "blog/".to_string();
        let view = ListingItemView::new(&post(None), true, &config);
        assert_eq!(view.path, "/blog/hello");
    }

    #[test]
    fn test_rendered_markup() {
        let templates = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();

        let doc = post(Some(vec!["Rust", "Rust"]));
        let html = ListingItemView::new(&doc, true, &config)
            .render(&templates)
            .unwrap();
        assert!(html.contains("<time>2021-05-02</time>"));
        assert!(html.contains("href=\"/hello\""));
        assert!(html.contains("Hello &lt;World&gt;"));
        assert!(html.contains("the excerpt"));
        assert_eq!(html.matches("class=\"item-tag\"").count(), 2);

        let html = ListingItemView::new(&doc, false, &config)
            .render(&templates)
            .unwrap();
        assert!(!html.contains("item-tags"));
    }

    #[test]
    fn test_link_targets_are_escaped() {
        let templates = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();

        let mut doc = post(None);
        doc.slug = "a\"onmouseover=\"x".to_string();
        doc.tags = Some(vec![TagRef {
            name: "Rust".to_string(),
            slug: "r\"s".to_string(),
        }]);
        let html = ListingItemView::new(&doc, true, &config)
            .render(&templates)
            .unwrap();
        assert!(html.contains("href=\"/a&quot;onmouseover=&quot;x\""));
        assert!(html.contains("href=\"/tags/r&quot;s\""));
        assert!(!html.contains("onmouseover=\"x"));
    }
}
