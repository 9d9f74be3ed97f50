//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site metadata
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub base_path: String,
    pub blog_path: String,
    pub posts_prefix: String,
    pub tags_path: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Home page
    pub homepage_posts: usize,

    // Date format (Moment.js style)
    pub date_format: String,

    // Layout chrome
    #[serde(default)]
    pub navigation: Vec<NavLink>,
    #[serde(default)]
    pub external_links: Vec<ExternalLink>,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub comments: CommentsConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "junbread".to_string(),
            subtitle: String::new(),
            description: String::new(),
            author: "junbread".to_string(),
            language: "ko".to_string(),

            url: "http://localhost:4000".to_string(),
            base_path: "/".to_string(),
            blog_path: "/blog".to_string(),
            posts_prefix: "/".to_string(),
            tags_path: "/tags".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            homepage_posts: 3,

            date_format: "YYYY-MM-DD".to_string(),

            navigation: vec![
                NavLink {
                    title: "Blog".to_string(),
                    slug: "/blog".to_string(),
                },
                NavLink {
                    title: "About".to_string(),
                    slug: "/about".to_string(),
                },
            ],
            external_links: Vec::new(),

            highlight: HighlightConfig::default(),
            comments: CommentsConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        tracing::debug!("Loaded site config from {:?}", path);
        Ok(config)
    }
}

/// Header navigation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavLink {
    pub title: String,
    pub slug: String,
}

/// Footer link to an external profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalLink {
    pub name: String,
    pub url: String,
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Utterances comment widget configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub enable: bool,
    pub src: String,
    pub repo: String,
    pub issue_term: String,
    pub label: String,
    pub theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            src: "https://utteranc.es/client.js".to_string(),
            repo: "junbread/blog".to_string(),
            issue_term: "pathname".to_string(),
            label: "blog-comment".to_string(),
            theme: "github-light".to_string(),
        }
    }
}
