//! Post listings: homepage, blog page and tag pages

use indexmap::IndexMap;
use serde::Serialize;

use super::layout::LayoutView;
use super::listing_item::ListingItemView;
use super::seo::SeoView;
use crate::config::SiteConfig;
use crate::content::ContentDocument;
use crate::error::RenderResult;
use crate::helpers::{blog_path, join_path, tag_path, tags_path};
use crate::templates::TemplateRenderer;

/// Heading of the recent-posts section on the homepage
pub const HOMEPAGE_HEADING: &str = "최근";
/// Text of the homepage link to the full listing
pub const HOMEPAGE_BLOG_LINK: &str = "모든 글 보기";
pub const BLOG_HEADING: &str = "Blog";
pub const TAGS_HEADING: &str = "Tags";
const TAGS_LINK: &str = "태그 보기";

/// An ordered sequence of listing entries
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub items: Vec<ListingItemView>,
    pub show_tags: bool,
}

impl ListingView {
    /// One entry per document, in the order given
    pub fn new(docs: &[ContentDocument], show_tags: bool, config: &SiteConfig) -> Self {
        Self {
            items: docs
                .iter()
                .map(|doc| ListingItemView::new(doc, show_tags, config))
                .collect(),
            show_tags,
        }
    }
}

#[derive(Debug, Serialize)]
struct HomeView<'a> {
    heading: &'a str,
    blog_path: String,
    blog_link_text: &'a str,
}

/// The site root: a short list of the most recent posts
pub struct Homepage<'a> {
    config: &'a SiteConfig,
    listing: ListingView,
}

impl<'a> Homepage<'a> {
    /// `posts` must already be sorted newest first
    pub fn new(posts: &[ContentDocument], config: &'a SiteConfig) -> Self {
        let recent = &posts[..posts.len().min(config.homepage_posts)];
        Self {
            config,
            listing: ListingView::new(recent, false, config),
        }
    }

    pub fn listing(&self) -> &ListingView {
        &self.listing
    }

    pub fn render(&self, templates: &TemplateRenderer) -> RenderResult<String> {
        let home = join_path(&[self.config.base_path.as_str()]);
        let seo = SeoView::new(self.config, "", &self.config.description, &home);
        let mut context = LayoutView::new(self.config).context(&seo);
        context.insert(
            "home",
            &HomeView {
                heading: HOMEPAGE_HEADING,
                blog_path: blog_path(self.config),
                blog_link_text: HOMEPAGE_BLOG_LINK,
            },
        );
        context.insert("listing", &self.listing);
        templates.render("homepage.html", &context)
    }
}

#[derive(Debug, Serialize)]
struct BlogView<'a> {
    heading: &'a str,
    tags_path: String,
    tags_link_text: &'a str,
}

/// Every post, with tags
pub struct BlogPage<'a> {
    config: &'a SiteConfig,
    listing: ListingView,
}

impl<'a> BlogPage<'a> {
    pub fn new(posts: &[ContentDocument], config: &'a SiteConfig) -> Self {
        Self {
            config,
            listing: ListingView::new(posts, true, config),
        }
    }

    pub fn listing(&self) -> &ListingView {
        &self.listing
    }

    pub fn render(&self, templates: &TemplateRenderer) -> RenderResult<String> {
        let seo = SeoView::new(self.config, BLOG_HEADING, "", &blog_path(self.config));
        let mut context = LayoutView::new(self.config).context(&seo);
        context.insert(
            "blog",
            &BlogView {
                heading: BLOG_HEADING,
                tags_path: tags_path(self.config),
                tags_link_text: TAGS_LINK,
            },
        );
        context.insert("listing", &self.listing);
        templates.render("blog.html", &context)
    }
}

/// One tag with the posts carrying it
#[derive(Debug, Clone, Serialize)]
pub struct TagSummary {
    pub name: String,
    pub slug: String,
    pub path: String,
    pub count: usize,
}

/// Group posts by tag slug
///
/// The first spelling seen names the tag. A post that lists the same tag
/// twice is counted once.
pub fn group_by_tag(posts: &[ContentDocument]) -> IndexMap<String, (String, Vec<&ContentDocument>)> {
    let mut groups: IndexMap<String, (String, Vec<&ContentDocument>)> = IndexMap::new();
    for post in posts {
        let Some(tags) = post.visible_tags() else {
            continue;
        };
        for tag in tags {
            let entry = groups
                .entry(tag.slug.clone())
                .or_insert_with(|| (tag.name.clone(), Vec::new()));
            if !entry.1.iter().any(|p| std::ptr::eq(*p, post)) {
                entry.1.push(post);
            }
        }
    }
    groups
}

#[derive(Debug, Serialize)]
struct TagsView<'a> {
    heading: &'a str,
    tags: &'a [TagSummary],
}

/// Overview of every tag, sorted by name
pub struct TagsPage<'a> {
    config: &'a SiteConfig,
    tags: Vec<TagSummary>,
}

impl<'a> TagsPage<'a> {
    pub fn new(posts: &[ContentDocument], config: &'a SiteConfig) -> Self {
        let mut tags: Vec<TagSummary> = group_by_tag(posts)
            .into_iter()
            .map(|(slug, (name, posts))| TagSummary {
                path: tag_path(config, &slug),
                name,
                slug,
                count: posts.len(),
            })
            .collect();
        tags.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Self { config, tags }
    }

    pub fn tags(&self) -> &[TagSummary] {
        &self.tags
    }

    pub fn render(&self, templates: &TemplateRenderer) -> RenderResult<String> {
        let seo = SeoView::new(self.config, TAGS_HEADING, "", &tags_path(self.config));
        let mut context = LayoutView::new(self.config).context(&seo);
        context.insert(
            "tags",
            &TagsView {
                heading: TAGS_HEADING,
                tags: &self.tags,
            },
        );
        templates.render("tags.html", &context)
    }
}

#[derive(Debug, Serialize)]
struct TagView<'a> {
    heading: String,
    tags_path: String,
    tags_link_text: &'a str,
}

/// Posts carrying a single tag
pub struct TagPage<'a> {
    config: &'a SiteConfig,
    name: String,
    slug: String,
    listing: ListingView,
}

impl<'a> TagPage<'a> {
    pub fn new(name: &str, slug: &str, posts: &[&ContentDocument], config: &'a SiteConfig) -> Self {
        let items = posts
            .iter()
            .map(|doc| ListingItemView::new(doc, true, config))
            .collect();
        Self {
            config,
            name: name.to_string(),
            slug: slug.to_string(),
            listing: ListingView {
                items,
                show_tags: true,
            },
        }
    }

    /// Output path of this page relative to the site root
    pub fn path(&self) -> String {
        tag_path(self.config, &self.slug)
    }

    pub fn render(&self, templates: &TemplateRenderer) -> RenderResult<String> {
        let title = format!("#{}", self.name);
        let seo = SeoView::new(self.config, &title, "", &self.path());
        let mut context = LayoutView::new(self.config).context(&seo);
        context.insert(
            "tag",
            &TagView {
                heading: title,
                tags_path: tags_path(self.config),
                tags_link_text: TAGS_HEADING,
            },
        );
        context.insert("listing", &self.listing);
        templates.render("tag.html", &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Body, DocumentKind, TagRef};

    fn post(title: &str, tags: &[&str]) -> ContentDocument {
        let slug = slug::slugify(title);
        let mut doc = ContentDocument::new(
            DocumentKind::Post,
            title,
            &slug,
            Body::MarkedText(String::new()),
        );
        doc.excerpt = format!("{} excerpt", title);
        doc.tags = Some(tags.iter().map(|t| TagRef::from_name(t)).collect());
        doc
    }

    fn posts() -> Vec<ContentDocument> {
        vec![
            post("Third", &["Rust"]),
            post("Second", &["blog", "Rust"]),
            post("First", &["Rust", "Rust"]),
            post("Zeroth", &[]),
        ]
    }

    #[test]
    fn test_listing_preserves_order() {
        let config = SiteConfig::default();
        let docs = posts();
        let listing = ListingView::new(&docs, true, &config);
        let titles: Vec<_> = listing.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "Second", "First", "Zeroth"]);
    }

    #[test]
    fn test_homepage_takes_recent_without_tags() {
        let config = SiteConfig::default();
        let docs = posts();
        let home = Homepage::new(&docs, &config);
        assert_eq!(home.listing().items.len(), 3);
        assert!(!home.listing().show_tags);
        assert!(home.listing().items.iter().all(|i| i.tags.is_none()));

        let home = Homepage::new(&docs[..1], &config);
        assert_eq!(home.listing().items.len(), 1);
    }

    #[test]
    fn test_homepage_markup() {
        let templates = TemplateRenderer::new().unwrap();
        let mut config = SiteConfig::default();
        config.base_path = "/site/".to_string();
        let docs = posts();

        let html = Homepage::new(&docs, &config).render(&templates).unwrap();
        assert!(html.contains(HOMEPAGE_HEADING));
        assert!(html.contains(&format!("href=\"/site/blog\">{}</a>", HOMEPAGE_BLOG_LINK)));
        let third = html.find("Third").unwrap();
        let second = html.find("Second").unwrap();
        assert!(third < second);
        assert!(!html.contains("Zeroth"));
    }

    #[test]
    fn test_blog_page_lists_everything_with_tags() {
        let templates = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let docs = posts();

        let page = BlogPage::new(&docs, &config);
        assert_eq!(page.listing().items.len(), 4);
        assert!(page.listing().show_tags);

        let html = page.render(&templates).unwrap();
        assert!(html.contains("<h2 class=\"title\">Blog</h2>"));
        assert!(html.contains("href=\"/tags\""));
        assert!(html.contains("Zeroth"));
    }

    #[test]
    fn test_tags_overview_counts_and_sorts() {
        let config = SiteConfig::default();
        let docs = posts();
        let page = TagsPage::new(&docs, &config);
        let tags: Vec<_> = page
            .tags()
            .iter()
            .map(|t| (t.name.as_str(), t.count))
            .collect();
        assert_eq!(tags, vec![("blog", 1), ("Rust", 3)]);
        assert_eq!(page.tags()[1].path, "/tags/rust");
    }

    #[test]
    fn test_tag_page() {
        let templates = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let docs = posts();
        let groups = group_by_tag(&docs);
        let (name, tagged) = &groups["blog"];

        let page = TagPage::new(name, "blog", tagged, &config);
        assert_eq!(page.path(), "/tags/blog");
        let html = page.render(&templates).unwrap();
        assert!(html.contains("#blog"));
        assert!(html.contains("Second"));
        assert!(!html.contains("Third"));
    }
}
