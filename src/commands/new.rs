//! Create a new post or page

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Scaffold a new document and return the path of the created file
///
/// Posts land in `posts/<slug>.md`, pages in `pages/<slug>/index.md`.
pub fn create(blog: &Blog, title: &str, layout: &str) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title {:?} does not produce a usable slug", title);
    }

    let file_path = match layout {
        "post" => blog.posts_dir().join(format!("{}.md", slug)),
        "page" => blog.pages_dir().join(&slug).join("index.md"),
        other => anyhow::bail!("Unknown layout: {}. Available: post, page", other),
    };

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut content = format!(
        "---\ntitle: \"{}\"\ndate: {}\n",
        title.replace('"', "\\\""),
        now.format("%Y-%m-%d %H:%M:%S")
    );
    if layout == "post" {
        content.push_str("tags: []\ndescription: \"\"\n");
    }
    content.push_str("---\n");

    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use tempfile::TempDir;

    #[test]
    fn test_create_post_and_page() {
        let dir = TempDir::new().unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let post = create(&blog, "Hello \"World\"", "post").unwrap();
        assert_eq!(post, blog.posts_dir().join("hello-world.md"));
        let content = fs::read_to_string(&post).unwrap();
        let (front, body) = FrontMatter::parse(&content).unwrap();
        assert_eq!(front.title.as_deref(), Some("Hello \"World\""));
        assert!(body.is_empty());

        let page = create(&blog, "About", "page").unwrap();
        assert_eq!(page, blog.pages_dir().join("about").join("index.md"));

        assert!(create(&blog, "About", "page").is_err());
        assert!(create(&blog, "Other", "draft").is_err());
    }
}
