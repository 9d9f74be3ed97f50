//! List site content

use anyhow::Result;

use crate::components::TagsPage;
use crate::content::loader::ContentLoader;
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(blog);

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.date, post.title, post.source);
            }
        }
        "page" | "pages" => {
            let pages = loader.load_pages()?;
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {} ({}) [{}]", page.title, page.body.shape(), page.source);
            }
        }
        "tag" | "tags" => {
            let posts = loader.load_posts()?;
            let overview = TagsPage::new(&posts, &blog.config);
            println!("Tags ({}):", overview.tags().len());
            for tag in overview.tags() {
                println!("  {} ({})", tag.name, tag.count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, page, tag", content_type);
        }
    }

    Ok(())
}
