//! Normalized content documents

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

use crate::notion::BlockMap;

/// Where a document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A blog post under `content/posts`
    Post,
    /// A static page authored in Markdown
    Page,
    /// A page exported from Notion
    External,
}

/// A tag attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRef {
    pub name: String,
    pub slug: String,
}

impl TagRef {
    /// Build a tag from its display name, deriving the slug
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: slug::slugify(name),
        }
    }
}

/// Document body payload
#[derive(Debug, Clone)]
pub enum Body {
    /// Locally authored Markdown (MDX tolerated)
    MarkedText(String),
    /// Notion block map
    BlockTree(BlockMap),
}

impl Body {
    /// Short name of the payload shape, used in error messages
    pub fn shape(&self) -> &'static str {
        match self {
            Body::MarkedText(_) => "marked-text",
            Body::BlockTree(_) => "block-tree",
        }
    }
}

/// A post, page, or external document ready to be composed
#[derive(Debug, Clone)]
pub struct ContentDocument {
    pub kind: DocumentKind,
    pub title: String,
    /// Path segment, unique within the document's collection
    pub slug: String,
    pub excerpt: String,
    /// Optional override of the excerpt for display
    pub description: Option<String>,
    /// Display-formatted date
    pub date: String,
    pub time_to_read: Option<u32>,
    /// Display order equals insertion order; duplicates are kept
    pub tags: Option<Vec<TagRef>>,
    pub body: Body,
    /// Publication timestamp, used for ordering and feeds
    pub published: Option<DateTime<Local>>,
    /// Source file path relative to the content directory
    pub source: String,
    /// Directory whose other files are published next to this document
    pub bundle_dir: Option<PathBuf>,
}

impl ContentDocument {
    /// Create a document with empty metadata
    pub fn new(kind: DocumentKind, title: &str, slug: &str, body: Body) -> Self {
        Self {
            kind,
            title: title.to_string(),
            slug: slug.to_string(),
            excerpt: String::new(),
            description: None,
            date: String::new(),
            time_to_read: None,
            tags: None,
            body,
            published: None,
            source: String::new(),
            bundle_dir: None,
        }
    }

    /// Text shown in listings: the description when non-empty, else the excerpt
    pub fn summary(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => description,
            _ => &self.excerpt,
        }
    }

    /// Tags to display, if any
    pub fn visible_tags(&self) -> Option<&[TagRef]> {
        match self.tags.as_deref() {
            Some(tags) if !tags.is_empty() => Some(tags),
            _ => None,
        }
    }
}
