//! Content loader - loads posts and pages from the content directory
//!
//! Layout:
//! * `posts/<name>.md` or `posts/<name>/index.md` (`.mdx` also accepted)
//! * `pages/<name>.md` or `pages/<name>/index.md`
//! * `pages/<name>/data.json` - a Notion block map; a sibling `index.md`
//!   only contributes front-matter

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{
    excerpt_from_html, Body, ContentDocument, DocumentKind, FrontMatter, MarkdownRenderer, TagRef,
};
use crate::helpers::{format_date, strip_html, time_to_read};
use crate::notion::{BlockMap, NotionRenderer};
use crate::Blog;

/// File name of a Notion export inside a page directory
pub const NOTION_DATA_FILE: &str = "data.json";

/// Loads content from the content directory
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    markdown: MarkdownRenderer,
    notion: NotionRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        let markdown = MarkdownRenderer::with_options(
            &blog.config.highlight.theme,
            blog.config.highlight.line_number,
        );
        Self {
            blog,
            markdown,
            notion: NotionRenderer::new(),
        }
    }

    /// Load all published posts, newest first
    pub fn load_posts(&self) -> Result<Vec<ContentDocument>> {
        let posts_dir = self.blog.posts_dir();
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&posts_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            match self.load_post(path) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => tracing::debug!("Skipping draft {:?}", path),
                Err(e) => tracing::warn!("Failed to load post {:?}: {:#}", path, e),
            }
        }

        // Newest first
        posts.sort_by(|a, b| b.published.cmp(&a.published));

        Ok(dedupe_slugs(posts))
    }

    /// Load a single post; drafts yield `None`
    fn load_post(&self, path: &Path) -> Result<Option<ContentDocument>> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&content)?;

        if fm.draft {
            return Ok(None);
        }

        let file_modified = fs::metadata(path)?
            .modified()
            .ok()
            .map(chrono::DateTime::<chrono::Local>::from);
        let published = fm.parse_date().or(file_modified);

        let html = self.markdown.render(body)?;
        let plain = strip_html(&html);

        let slug = fm.slug.clone().unwrap_or_else(|| file_slug(path));
        let title = fm.title.clone().unwrap_or_else(|| file_slug(path));

        let mut doc = ContentDocument::new(
            DocumentKind::Post,
            &title,
            &slug,
            Body::MarkedText(body.to_string()),
        );
        doc.excerpt = fm.excerpt.clone().unwrap_or_else(|| excerpt_from_html(&html));
        doc.description = fm.description.clone();
        doc.date = published
            .map(|d| format_date(&d, &self.blog.config.date_format))
            .unwrap_or_default();
        doc.time_to_read = time_to_read(&plain);
        doc.tags = (!fm.tags.is_empty())
            .then(|| fm.tags.iter().map(|t| TagRef::from_name(t)).collect());
        doc.published = published;
        doc.source = self.relative_source(path);
        doc.bundle_dir = bundle_dir(path);

        Ok(Some(doc))
    }

    /// Load all pages (Markdown and Notion)
    pub fn load_pages(&self) -> Result<Vec<ContentDocument>> {
        let pages_dir = self.blog.pages_dir();
        if !pages_dir.exists() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(&pages_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let loaded = if path.file_name().and_then(|n| n.to_str()) == Some(NOTION_DATA_FILE) {
                self.load_notion_page(path)
            } else if is_markdown_file(path) && !has_notion_sibling(path) {
                self.load_page(path)
            } else {
                continue;
            };

            match loaded {
                Ok(Some(page)) => pages.push(page),
                Ok(None) => tracing::debug!("Skipping draft {:?}", path),
                Err(e) => tracing::warn!("Failed to load page {:?}: {:#}", path, e),
            }
        }

        Ok(dedupe_slugs(pages))
    }

    /// Load a Markdown page
    fn load_page(&self, path: &Path) -> Result<Option<ContentDocument>> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&content)?;

        if fm.draft {
            return Ok(None);
        }

        let html = self.markdown.render(body)?;
        let slug = fm.slug.clone().unwrap_or_else(|| file_slug(path));
        let title = fm.title.clone().unwrap_or_default();

        let mut doc = ContentDocument::new(
            DocumentKind::Page,
            &title,
            &slug,
            Body::MarkedText(body.to_string()),
        );
        doc.excerpt = fm.excerpt.clone().unwrap_or_else(|| excerpt_from_html(&html));
        doc.description = fm.description.clone();
        doc.source = self.relative_source(path);
        doc.bundle_dir = bundle_dir(path);

        Ok(Some(doc))
    }

    /// Load a Notion export, taking metadata from a sibling index file
    fn load_notion_page(&self, path: &Path) -> Result<Option<ContentDocument>> {
        let json =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let map = BlockMap::from_json(&json)
            .with_context(|| format!("Invalid Notion block map {:?}", path))?;

        let fm = match sibling_index(path) {
            Some(index) => {
                let content = fs::read_to_string(&index)?;
                FrontMatter::parse(&content)?.0
            }
            None => FrontMatter::default(),
        };

        if fm.draft {
            return Ok(None);
        }

        let html = self.notion.render(&map)?;
        let slug = fm.slug.clone().unwrap_or_else(|| file_slug(path));
        let title = fm.title.clone().or_else(|| map.title()).unwrap_or_default();

        let mut doc =
            ContentDocument::new(DocumentKind::External, &title, &slug, Body::BlockTree(map));
        doc.excerpt = fm.excerpt.clone().unwrap_or_else(|| excerpt_from_html(&html));
        doc.description = fm.description.clone();
        doc.source = self.relative_source(path);
        doc.bundle_dir = path.parent().map(Path::to_path_buf);

        tracing::debug!("Loaded Notion page {:?} ({})", path, doc.slug);
        Ok(Some(doc))
    }

    fn relative_source(&self, path: &Path) -> String {
        path.strip_prefix(&self.blog.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "mdx" || e == "markdown")
        .unwrap_or(false)
}

/// `index.md` next to a `data.json` belongs to the Notion page
fn has_notion_sibling(path: &Path) -> bool {
    is_index_file(path)
        && path
            .parent()
            .map(|dir| dir.join(NOTION_DATA_FILE).is_file())
            .unwrap_or(false)
}

fn sibling_index(path: &Path) -> Option<PathBuf> {
    let dir = path.parent()?;
    ["index.md", "index.mdx", "index.markdown"]
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// `<name>/index.md` owns the rest of `<name>/`
fn bundle_dir(path: &Path) -> Option<PathBuf> {
    if is_index_file(path) {
        path.parent().map(Path::to_path_buf)
    } else {
        None
    }
}

fn is_index_file(path: &Path) -> bool {
    path.file_stem().and_then(|s| s.to_str()) == Some("index")
}

/// Slug from the file name, or the directory name for `index.*` and `data.json`
fn file_slug(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("untitled");
    let name = if stem == "index" || path.file_name().and_then(|n| n.to_str()) == Some(NOTION_DATA_FILE)
    {
        path.parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or(stem)
    } else {
        stem
    };
    slug::slugify(name)
}

/// Keep the first document for every slug
fn dedupe_slugs(documents: Vec<ContentDocument>) -> Vec<ContentDocument> {
    let mut seen = HashSet::new();
    documents
        .into_iter()
        .filter(|doc| {
            let key = doc.slug.trim_matches('/').to_string();
            let fresh = seen.insert(key);
            if !fresh {
                tracing::warn!("Duplicate slug {:?} in {}, skipping", doc.slug, doc.source);
            }
            fresh
        })
        .collect()
}
