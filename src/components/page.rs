//! Full-page compositions for single documents

use serde::Serialize;

use super::comments::{CommentsMount, WidgetConfig};
use super::layout::LayoutView;
use super::listing_item::{tag_links, TagLink};
use super::seo::SeoView;
use crate::config::SiteConfig;
use crate::content::{ContentDocument, DocumentKind};
use crate::error::RenderResult;
use crate::helpers::{join_path, post_path};
use crate::render::DocumentRenderer;
use crate::templates::TemplateRenderer;

#[derive(Debug, Serialize)]
struct PageView<'a> {
    title: &'a str,
    body: String,
    external: bool,
}

/// Output path of a page: `/{base_path}/{slug}`
pub fn page_path(config: &SiteConfig, doc: &ContentDocument) -> String {
    join_path(&[config.base_path.as_str(), doc.slug.as_str()])
}

fn render_page(
    doc: &ContentDocument,
    body: String,
    config: &SiteConfig,
    templates: &TemplateRenderer,
) -> RenderResult<String> {
    let seo = SeoView::new(config, &doc.title, &doc.excerpt, &page_path(config, doc));
    let mut context = LayoutView::new(config).context(&seo);
    context.insert(
        "page",
        &PageView {
            title: &doc.title,
            body,
            external: doc.kind == DocumentKind::External,
        },
    );
    templates.render("page.html", &context)
}

/// A static page whose body is Markdown
pub struct PageComposition<'a> {
    doc: &'a ContentDocument,
    renderer: DocumentRenderer<'a>,
}

impl<'a> PageComposition<'a> {
    pub fn new(doc: &'a ContentDocument, renderer: DocumentRenderer<'a>) -> Self {
        Self { doc, renderer }
    }

    /// Fails with `BodyMismatch` when the document body is a block tree
    pub fn render(&self, config: &SiteConfig, templates: &TemplateRenderer) -> RenderResult<String> {
        let body = self.renderer.render_marked_text(&self.doc.body)?;
        render_page(self.doc, body, config, templates)
    }
}

/// A page exported from Notion, in the same frame as [`PageComposition`]
pub struct NotionPageComposition<'a> {
    doc: &'a ContentDocument,
    renderer: DocumentRenderer<'a>,
}

impl<'a> NotionPageComposition<'a> {
    pub fn new(doc: &'a ContentDocument, renderer: DocumentRenderer<'a>) -> Self {
        Self { doc, renderer }
    }

    pub fn render(&self, config: &SiteConfig, templates: &TemplateRenderer) -> RenderResult<String> {
        let body = self.renderer.render_block_tree(&self.doc.body)?;
        render_page(self.doc, body, config, templates)
    }
}

#[derive(Debug, Serialize)]
struct PostView<'a> {
    title: &'a str,
    date: &'a str,
    time_to_read: Option<u32>,
    tags: Option<Vec<TagLink>>,
    body: String,
    comments: Option<String>,
}

/// A blog post with its comment thread
pub struct PostComposition<'a> {
    doc: &'a ContentDocument,
    renderer: DocumentRenderer<'a>,
}

impl<'a> PostComposition<'a> {
    pub fn new(doc: &'a ContentDocument, renderer: DocumentRenderer<'a>) -> Self {
        Self { doc, renderer }
    }

    pub fn render(&self, config: &SiteConfig, templates: &TemplateRenderer) -> RenderResult<String> {
        let doc = self.doc;
        let body = self.renderer.render_marked_text(&doc.body)?;
        let comments = config
            .comments
            .enable
            .then(|| CommentsMount::section(WidgetConfig::from(&config.comments)).to_html());

        let seo = SeoView::new(config, &doc.title, doc.summary(), &post_path(config, &doc.slug));
        let mut context = LayoutView::new(config).context(&seo);
        context.insert(
            "post",
            &PostView {
                title: &doc.title,
                date: &doc.date,
                time_to_read: doc.time_to_read,
                tags: doc.visible_tags().map(|tags| tag_links(tags, config)),
                body,
                comments,
            },
        );
        templates.render("post.html", &context)
    }
}
