//! junbread-blog: a minimal static blog generator
//!
//! Posts and pages are written in Markdown; pages can also be exported from
//! Notion as block maps. Every post page carries an Utterances comment
//! widget. Pages are composed from embedded Tera templates.

pub mod commands;
pub mod components;
pub mod config;
pub mod content;
pub mod dom;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod notion;
pub mod render;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Config file looked up in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content (source) directory
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog instance with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Directory holding blog posts
    pub fn posts_dir(&self) -> PathBuf {
        self.content_dir.join("posts")
    }

    /// Directory holding static pages
    pub fn pages_dir(&self) -> PathBuf {
        self.content_dir.join("pages")
    }

    /// Generate the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post or page
    pub fn new_post(&self, title: &str, layout: &str) -> Result<PathBuf> {
        commands::new::create(self, title, layout)
    }
}
