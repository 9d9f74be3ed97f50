//! Generator module - writes the composed site into the public directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::components::{
    group_by_tag, page_path, BlogPage, Homepage, NotionPageComposition, PageComposition,
    PostComposition, TagPage, TagsPage,
};
use crate::content::loader::NOTION_DATA_FILE;
use crate::content::{Body, ContentDocument, MarkdownRenderer};
use crate::helpers::{absolute_url, blog_path, date_xml, html_escape, post_path, tags_path, url_for};
use crate::notion::NotionRenderer;
use crate::render::DocumentRenderer;
use crate::templates::{TemplateRenderer, STYLESHEET};
use crate::Blog;

/// Number of posts carried by the Atom feed
const FEED_LIMIT: usize = 20;

/// Static site generator using the embedded templates
pub struct Generator {
    blog: Blog,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
    notion: NotionRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let templates = TemplateRenderer::new().context("Failed to load templates")?;
        let markdown = MarkdownRenderer::with_options(
            &blog.config.highlight.theme,
            blog.config.highlight.line_number,
        );

        Ok(Self {
            blog: blog.clone(),
            templates,
            markdown,
            notion: NotionRenderer::with_page_link_prefix(&blog.config.base_path),
        })
    }

    fn renderer(&self) -> DocumentRenderer<'_> {
        DocumentRenderer::new(&self.notion, &self.markdown)
    }

    /// Generate the entire site; `posts` must be sorted newest first
    pub fn generate(&self, posts: &[ContentDocument], pages: &[ContentDocument]) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        self.copy_content_assets(posts, pages)?;
        self.write_file("styles.css", STYLESHEET)?;

        self.generate_homepage(posts)?;
        self.generate_blog_page(posts)?;
        self.generate_post_pages(posts)?;
        self.generate_page_pages(pages)?;
        self.generate_tag_pages(posts)?;
        self.generate_atom_feed(posts)?;

        Ok(())
    }

    fn generate_homepage(&self, posts: &[ContentDocument]) -> Result<()> {
        let config = &self.blog.config;
        let html = Homepage::new(posts, config).render(&self.templates)?;
        self.write_page(&url_for(config, "/"), &html)?;
        tracing::debug!("Generated homepage");
        Ok(())
    }

    fn generate_blog_page(&self, posts: &[ContentDocument]) -> Result<()> {
        let config = &self.blog.config;
        let html = BlogPage::new(posts, config).render(&self.templates)?;
        self.write_page(&blog_path(config), &html)?;
        tracing::debug!("Generated blog page");
        Ok(())
    }

    fn generate_post_pages(&self, posts: &[ContentDocument]) -> Result<()> {
        let config = &self.blog.config;
        for post in posts {
            let html = PostComposition::new(post, self.renderer())
                .render(config, &self.templates)
                .with_context(|| format!("Failed to render post {}", post.source))?;
            let path = post_path(config, &post.slug);
            self.write_page(&path, &html)?;
            tracing::debug!("Generated post: {}", path);
        }
        tracing::info!("Generated {} posts", posts.len());
        Ok(())
    }

    fn generate_page_pages(&self, pages: &[ContentDocument]) -> Result<()> {
        let config = &self.blog.config;
        for page in pages {
            let html = match &page.body {
                Body::BlockTree(_) => {
                    NotionPageComposition::new(page, self.renderer()).render(config, &self.templates)
                }
                Body::MarkedText(_) => {
                    PageComposition::new(page, self.renderer()).render(config, &self.templates)
                }
            }
            .with_context(|| format!("Failed to render page {}", page.source))?;

            let path = page_path(config, page);
            self.write_page(&path, &html)?;
            tracing::debug!("Generated page: {}", path);
        }
        tracing::info!("Generated {} pages", pages.len());
        Ok(())
    }

    fn generate_tag_pages(&self, posts: &[ContentDocument]) -> Result<()> {
        let config = &self.blog.config;

        let html = TagsPage::new(posts, config).render(&self.templates)?;
        self.write_page(&tags_path(config), &html)?;

        let groups = group_by_tag(posts);
        for (slug, (name, tagged)) in &groups {
            let page = TagPage::new(name, slug, tagged, config);
            let html = page.render(&self.templates)?;
            self.write_page(&page.path(), &html)?;
        }

        tracing::info!("Generated {} tag pages", groups.len());
        Ok(())
    }

    fn generate_atom_feed(&self, posts: &[ContentDocument]) -> Result<()> {
        let config = &self.blog.config;
        let home = absolute_url(config, &url_for(config, "/"));

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", html_escape(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            absolute_url(config, &url_for(config, "atom.xml"))
        ));
        feed.push_str(&format!("  <link href=\"{}\"/>\n", home));
        let updated = posts
            .iter()
            .filter_map(|post| post.published.as_ref())
            .max()
            .map(date_xml)
            .unwrap_or_else(|| date_xml(&chrono::Local::now()));
        feed.push_str(&format!("  <updated>{}</updated>\n", updated));
        feed.push_str(&format!("  <id>{}</id>\n", home));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            html_escape(&config.author)
        ));

        for post in posts.iter().take(FEED_LIMIT) {
            let link = absolute_url(config, &post_path(config, &post.slug));
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", html_escape(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
            feed.push_str(&format!("    <id>{}</id>\n", link));
            if let Some(published) = &post.published {
                feed.push_str(&format!("    <published>{}</published>\n", date_xml(published)));
                feed.push_str(&format!("    <updated>{}</updated>\n", date_xml(published)));
            }
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                html_escape(post.summary())
            ));
            if let Some(tags) = post.visible_tags() {
                for tag in tags {
                    feed.push_str(&format!(
                        "    <category term=\"{}\"/>\n",
                        html_escape(&tag.name)
                    ));
                }
            }
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        self.write_file("atom.xml", &feed)?;
        tracing::info!("Generated atom.xml");
        Ok(())
    }

    /// Copy everything under the content directory that is not content
    ///
    /// Files inside a document's bundle directory land next to that
    /// document's `index.html`, so relative links keep working. Anything
    /// else keeps its path relative to the content directory.
    fn copy_content_assets(
        &self,
        posts: &[ContentDocument],
        pages: &[ContentDocument],
    ) -> Result<()> {
        let content_dir = &self.blog.content_dir;
        if !content_dir.exists() {
            return Ok(());
        }

        let config = &self.blog.config;
        let bundles: Vec<(&Path, PathBuf)> = posts
            .iter()
            .map(|post| (post, post_path(config, &post.slug)))
            .chain(pages.iter().map(|page| (page, page_path(config, page))))
            .filter_map(|(doc, site_path)| {
                let dir = doc.bundle_dir.as_deref()?;
                Some((dir, self.output_dir(&site_path)))
            })
            .collect();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("mdx") | Some("markdown")) {
                continue;
            }
            if path.file_name().is_some_and(|name| name == NOTION_DATA_FILE) {
                continue;
            }

            let relative = path.strip_prefix(content_dir)?;
            let dest = match bundles
                .iter()
                .find_map(|(dir, out)| path.strip_prefix(dir).ok().map(|rest| out.join(rest)))
            {
                Some(dest) => dest,
                None => self.blog.public_dir.join(relative),
            };
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
            tracing::debug!("Copied asset: {:?}", relative);
        }

        Ok(())
    }

    /// Write `html` as `index.html` under a site path
    fn write_page(&self, site_path: &str, html: &str) -> Result<()> {
        let output_path = self.output_dir(site_path).join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, html).with_context(|| format!("Failed to write {:?}", output_path))
    }

    fn write_file(&self, name: &str, contents: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(name);
        fs::write(&output_path, contents).with_context(|| format!("Failed to write {:?}", output_path))
    }

    /// Directory in `public/` for a site path; the base path is not a
    /// directory on disk
    fn output_dir(&self, site_path: &str) -> PathBuf {
        let base = self.blog.config.base_path.trim_matches('/');
        let mut relative = site_path.trim_matches('/');
        if !base.is_empty() {
            if let Some(rest) = relative.strip_prefix(base) {
                if rest.is_empty() || rest.starts_with('/') {
                    relative = rest.trim_start_matches('/');
                }
            }
        }
        self.blog.public_dir.join(relative)
    }
}
