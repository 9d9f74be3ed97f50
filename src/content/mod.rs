//! Content module - documents, front-matter, and Markdown processing

mod document;
mod frontmatter;
pub mod loader;
mod markdown;

pub use document::{Body, ContentDocument, DocumentKind, TagRef};
pub use frontmatter::FrontMatter;
pub use markdown::{excerpt_from_html, strip_mdx, MarkdownRenderer, EXCERPT_LENGTH};
