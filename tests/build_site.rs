//! Builds a small site end to end and inspects the output

use std::fs;
use std::path::Path;

use junbread_blog::Blog;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(dir: &Path, relative: &str) -> String {
    fs::read_to_string(dir.join(relative))
        .unwrap_or_else(|e| panic!("missing {}: {}", relative, e))
}

const NOTION_RESUME: &str = r#"{
  "root": {"role": "reader", "value": {"id": "root", "type": "page",
    "properties": {"title": [["Resume"]]}, "content": ["intro", "item"]}},
  "intro": {"role": "reader", "value": {"id": "intro", "type": "text",
    "properties": {"title": [["Hello from "], ["Notion", [["b"]]]]}}},
  "item": {"role": "reader", "value": {"id": "item", "type": "bulleted_list",
    "properties": {"title": [["Rust"]]}}}
}"#;

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(
        root,
        "_config.yml",
        "title: junbread\nauthor: Jun\nurl: https://junbread.dev\nhomepage_posts: 2\n",
    );
    write(
        root,
        "content/posts/first.md",
        "---\ntitle: First\ndate: 2021-01-01\ntags: [Rust]\n---\nThe first post.\n",
    );
    write(
        root,
        "content/posts/second/index.mdx",
        "---\ntitle: Second\ndate: 2021-02-01\ntags: [Rust, Blog, Rust]\ndescription: Second description\n---\nimport Chart from './chart'\n\n<Chart />\n\nThe second post.\n",
    );
    write(root, "content/posts/second/cover.png", "png");
    write(
        root,
        "content/posts/third.md",
        "---\ntitle: Third\ndate: 2021-03-01\n---\nThe third post.\n",
    );
    write(
        root,
        "content/pages/about/index.md",
        "---\ntitle: About\nexcerpt: About this blog\n---\nHi, I am Jun.\n",
    );
    write(root, "content/pages/resume/data.json", NOTION_RESUME);

    dir
}

#[test]
fn test_build_writes_every_page() {
    let dir = site();
    let root = dir.path();
    let blog = Blog::new(root).unwrap();
    blog.build().unwrap();

    for page in [
        "public/index.html",
        "public/blog/index.html",
        "public/first/index.html",
        "public/second/index.html",
        "public/third/index.html",
        "public/about/index.html",
        "public/resume/index.html",
        "public/tags/index.html",
        "public/tags/rust/index.html",
        "public/tags/blog/index.html",
        "public/atom.xml",
        "public/styles.css",
        "public/second/cover.png",
    ] {
        assert!(root.join(page).is_file(), "{} was not generated", page);
    }
    assert!(!root.join("public/pages/resume/data.json").exists());
    assert!(!root.join("public/posts/first.md").exists());
    assert!(!root.join("public/posts/second/cover.png").exists());
}

#[test]
fn test_homepage_lists_recent_posts() {
    let dir = site();
    let root = dir.path();
    Blog::new(root).unwrap().build().unwrap();

    let home = read(root, "public/index.html");
    assert!(home.contains("최근"));
    assert!(home.contains("href=\"/blog\">모든 글 보기</a>"));
    let third = home.find("Third").unwrap();
    let second = home.find("Second").unwrap();
    assert!(third < second);
    assert!(!home.contains("The first post."));
    assert!(!home.contains("item-tags"));
}

#[test]
fn test_blog_page_shows_tags_in_order() {
    let dir = site();
    let root = dir.path();
    Blog::new(root).unwrap().build().unwrap();

    let blog = read(root, "public/blog/index.html");
    assert!(blog.contains("Second description"));
    assert!(blog.contains("The first post."));
    assert_eq!(blog.matches("class=\"item-tag\"").count(), 4);
    let first_tag = blog.find(">Rust</a>, <a class=\"item-tag\" href=\"/tags/blog\">Blog</a>");
    assert!(first_tag.is_some());
}

#[test]
fn test_post_page_has_one_comment_widget() {
    let dir = site();
    let root = dir.path();
    Blog::new(root).unwrap().build().unwrap();

    let post = read(root, "public/second/index.html");
    assert!(post.contains("<h1 class=\"post-title\">Second</h1>"));
    assert!(post.contains("The second post."));
    assert!(!post.contains("import Chart"));
    assert_eq!(post.matches("<script").count(), 1);
    assert!(post.contains("issue-term=\"pathname\""));
    assert!(post.contains("theme=\"github-light\""));
}

#[test]
fn test_pages_render_by_body_shape() {
    let dir = site();
    let root = dir.path();
    Blog::new(root).unwrap().build().unwrap();

    let about = read(root, "public/about/index.html");
    assert!(about.contains("<h1>About</h1>"));
    assert!(about.contains("<meta name=\"description\" content=\"About this blog\">"));
    assert!(about.contains("<title>About | junbread</title>"));
    assert!(!about.contains("<script"));

    let resume = read(root, "public/resume/index.html");
    assert!(resume.contains("<h1>Resume</h1>"));
    assert!(resume.contains("<b>Notion</b>"));
    assert!(resume.contains("notion-list-disc"));
}

#[test]
fn test_feed_and_clean() {
    let dir = site();
    let root = dir.path();
    let blog = Blog::new(root).unwrap();
    blog.build().unwrap();

    let feed = read(root, "public/atom.xml");
    assert_eq!(feed.matches("<entry>").count(), 3);
    assert!(feed.contains("<link href=\"https://junbread.dev/third\"/>"));

    blog.clean().unwrap();
    assert!(!root.join("public").exists());
}
