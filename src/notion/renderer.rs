//! Block map to HTML

use std::collections::HashSet;
use std::fmt::Write;

use super::block::{Block, BlockKind, BlockMap, Mark, TextSpan};
use crate::error::{RenderError, RenderResult};
use crate::helpers::html_escape;
use crate::render::BlockTreeRender;

/// Nesting deeper than this is cut off
const MAX_DEPTH: usize = 32;

/// Renders Notion block maps with `notion-*` CSS classes
#[derive(Debug, Clone, Default)]
pub struct NotionRenderer {
    /// Prefix for links to nested Notion pages
    page_link_prefix: String,
}

impl NotionRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link nested pages under `prefix` instead of the site root
    pub fn with_page_link_prefix(prefix: &str) -> Self {
        Self {
            page_link_prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Render the whole map starting from the root page
    pub fn render(&self, map: &BlockMap) -> RenderResult<String> {
        let root = map.root().ok_or(RenderError::MissingRoot)?;
        let mut html = String::new();
        let mut seen = HashSet::from([root.id.as_str()]);
        html.push_str("<div class=\"notion\">\n");
        self.render_children(&mut html, map, root, 0, &mut seen);
        html.push_str("</div>\n");
        Ok(html)
    }

    /// Render children, wrapping consecutive list items in one list element
    ///
    /// Each block is rendered at most once per map; `seen` holds the ids
    /// already visited.
    fn render_children<'m>(
        &self,
        html: &mut String,
        map: &'m BlockMap,
        parent: &'m Block,
        depth: usize,
        seen: &mut HashSet<&'m str>,
    ) {
        if depth >= MAX_DEPTH {
            tracing::warn!("Notion block {} nested too deeply, truncating", parent.id);
            return;
        }

        let mut open_list: Option<BlockKind> = None;

        for child_id in &parent.content {
            let Some(child) = map.get(child_id) else {
                tracing::debug!("Skipping missing Notion block {}", child_id);
                continue;
            };
            if !seen.insert(child_id.as_str()) {
                tracing::debug!("Skipping repeated Notion block {}", child_id);
                continue;
            }

            let list_kind = matches!(child.kind, BlockKind::BulletedList | BlockKind::NumberedList)
                .then_some(child.kind);

            if open_list != list_kind {
                if let Some(kind) = open_list {
                    html.push_str(list_close(kind));
                }
                if let Some(kind) = list_kind {
                    html.push_str(list_open(kind));
                }
                open_list = list_kind;
            }

            self.render_block(html, map, child, depth + 1, seen);
        }

        if let Some(kind) = open_list {
            html.push_str(list_close(kind));
        }
    }

    fn render_block<'m>(
        &self,
        html: &mut String,
        map: &'m BlockMap,
        block: &'m Block,
        depth: usize,
        seen: &mut HashSet<&'m str>,
    ) {
        match block.kind {
            BlockKind::Page => self.render_page_link(html, block),
            BlockKind::Text => {
                let text = render_rich_text(&block.rich_text("title"));
                if text.is_empty() {
                    html.push_str("<div class=\"notion-blank\">&nbsp;</div>\n");
                } else {
                    let _ = writeln!(html, "<p class=\"notion-text\">{}</p>", text);
                }
                self.render_nested(html, map, block, depth, seen);
            }
            BlockKind::Header => render_heading(html, block, 1),
            BlockKind::SubHeader => render_heading(html, block, 2),
            BlockKind::SubSubHeader => render_heading(html, block, 3),
            BlockKind::BulletedList | BlockKind::NumberedList => {
                html.push_str("<li>");
                html.push_str(&render_rich_text(&block.rich_text("title")));
                if !block.content.is_empty() {
                    html.push('\n');
                    self.render_children(html, map, block, depth, seen);
                }
                html.push_str("</li>\n");
            }
            BlockKind::ToDo => {
                let checked = block.plain_text("checked") == "Yes";
                let _ = writeln!(
                    html,
                    "<div class=\"notion-to-do\"><input type=\"checkbox\" disabled{}> <span{}>{}</span></div>",
                    if checked { " checked" } else { "" },
                    if checked { " class=\"notion-to-do-checked\"" } else { "" },
                    render_rich_text(&block.rich_text("title"))
                );
                self.render_nested(html, map, block, depth, seen);
            }
            BlockKind::Toggle => {
                let _ = write!(
                    html,
                    "<details class=\"notion-toggle\"><summary>{}</summary>\n<div>",
                    render_rich_text(&block.rich_text("title"))
                );
                self.render_children(html, map, block, depth, seen);
                html.push_str("</div></details>\n");
            }
            BlockKind::Quote => {
                let _ = writeln!(
                    html,
                    "<blockquote class=\"notion-quote\">{}</blockquote>",
                    render_rich_text(&block.rich_text("title"))
                );
            }
            BlockKind::Callout => {
                html.push_str("<div class=\"notion-callout\">");
                if let Some(icon) = block.format_str("page_icon") {
                    let _ = write!(
                        html,
                        "<div class=\"notion-callout-icon\">{}</div>",
                        html_escape(icon)
                    );
                }
                let _ = writeln!(
                    html,
                    "<div class=\"notion-callout-text\">{}</div></div>",
                    render_rich_text(&block.rich_text("title"))
                );
            }
            BlockKind::Code => {
                let language = block.plain_text("language").to_lowercase();
                let language = if language.is_empty() {
                    "text".to_string()
                } else {
                    language.replace(' ', "-")
                };
                let _ = writeln!(
                    html,
                    "<pre class=\"notion-code\"><code class=\"language-{}\">{}</code></pre>",
                    html_escape(&language),
                    html_escape(&block.plain_text("title"))
                );
            }
            BlockKind::Divider => html.push_str("<hr class=\"notion-hr\" />\n"),
            BlockKind::Image => {
                let Some(src) = asset_source(block) else {
                    return;
                };
                let caption = block.plain_text("caption");
                html.push_str("<figure class=\"notion-asset-wrapper\">");
                let _ = write!(
                    html,
                    "<img src=\"{}\" alt=\"{}\" loading=\"lazy\" />",
                    html_escape(&src),
                    html_escape(&caption)
                );
                if !caption.is_empty() {
                    let _ = write!(
                        html,
                        "<figcaption class=\"notion-image-caption\">{}</figcaption>",
                        render_rich_text(&block.rich_text("caption"))
                    );
                }
                html.push_str("</figure>\n");
            }
            BlockKind::Video | BlockKind::Embed => {
                let Some(src) = asset_source(block) else {
                    return;
                };
                let _ = writeln!(
                    html,
                    "<div class=\"notion-asset-wrapper\"><iframe src=\"{}\" frameborder=\"0\" allowfullscreen loading=\"lazy\"></iframe></div>",
                    html_escape(&src)
                );
            }
            BlockKind::Bookmark => {
                let link = block.plain_text("link");
                if link.is_empty() {
                    return;
                }
                let title = block.plain_text("title");
                let description = block.plain_text("description");
                let _ = write!(
                    html,
                    "<a class=\"notion-bookmark\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"><div class=\"notion-bookmark-title\">{}</div>",
                    html_escape(&link),
                    html_escape(if title.is_empty() { &link } else { &title })
                );
                if !description.is_empty() {
                    let _ = write!(
                        html,
                        "<div class=\"notion-bookmark-description\">{}</div>",
                        html_escape(&description)
                    );
                }
                let _ = writeln!(
                    html,
                    "<div class=\"notion-bookmark-link\">{}</div></a>",
                    html_escape(&link)
                );
            }
            BlockKind::ColumnList => {
                html.push_str("<div class=\"notion-row\">\n");
                self.render_children(html, map, block, depth, seen);
                html.push_str("</div>\n");
            }
            BlockKind::Column => {
                let ratio = block
                    .format
                    .get("column_ratio")
                    .and_then(serde_json::Value::as_f64)
                    .unwrap_or(1.0);
                let _ = write!(
                    html,
                    "<div class=\"notion-column\" style=\"flex: {} 1 0\">",
                    ratio
                );
                self.render_children(html, map, block, depth, seen);
                html.push_str("</div>\n");
            }
            BlockKind::Unsupported => {
                tracing::debug!("Unsupported Notion block {}", block.id);
            }
        }
    }

    /// Indented children of text-like blocks
    fn render_nested<'m>(
        &self,
        html: &mut String,
        map: &'m BlockMap,
        block: &'m Block,
        depth: usize,
        seen: &mut HashSet<&'m str>,
    ) {
        if block.content.is_empty() {
            return;
        }
        html.push_str("<div class=\"notion-nested\">\n");
        self.render_children(html, map, block, depth, seen);
        html.push_str("</div>\n");
    }

    fn render_page_link(&self, html: &mut String, block: &Block) {
        html.push_str("<a class=\"notion-page-link\" href=\"");
        let _ = write!(
            html,
            "{}/{}",
            html_escape(&self.page_link_prefix),
            block.compact_id()
        );
        html.push_str("\">");
        if let Some(icon) = block.format_str("page_icon") {
            let _ = write!(
                html,
                "<span class=\"notion-page-icon\">{}</span>",
                html_escape(icon)
            );
        }
        let _ = writeln!(
            html,
            "<span class=\"notion-page-text\">{}</span></a>",
            render_rich_text(&block.rich_text("title"))
        );
    }
}

impl BlockTreeRender for NotionRenderer {
    fn render_block_tree(&self, map: &BlockMap) -> RenderResult<String> {
        self.render(map)
    }
}

fn list_open(kind: BlockKind) -> &'static str {
    if kind == BlockKind::NumberedList {
        "<ol class=\"notion-list notion-list-numbered\">\n"
    } else {
        "<ul class=\"notion-list notion-list-disc\">\n"
    }
}

fn list_close(kind: BlockKind) -> &'static str {
    if kind == BlockKind::NumberedList {
        "</ol>\n"
    } else {
        "</ul>\n"
    }
}

fn render_heading(html: &mut String, block: &Block, level: u8) {
    let _ = writeln!(
        html,
        "<h{level} class=\"notion-h{level}\">{}</h{level}>",
        render_rich_text(&block.rich_text("title"))
    );
}

/// Source URL of an image or embed
fn asset_source(block: &Block) -> Option<String> {
    block
        .format_str("display_source")
        .map(str::to_string)
        .or_else(|| Some(block.plain_text("source")))
        .filter(|src| !src.is_empty())
}

/// Render decorated spans to inline HTML
pub fn render_rich_text(spans: &[TextSpan]) -> String {
    let mut html = String::new();
    for span in spans {
        let mut inner = html_escape(&span.text).replace('\n', "<br />");
        for mark in &span.marks {
            inner = match mark {
                Mark::Bold => format!("<b>{}</b>", inner),
                Mark::Italic => format!("<em>{}</em>", inner),
                Mark::Strike => format!("<s>{}</s>", inner),
                Mark::Code => format!("<code class=\"notion-inline-code\">{}</code>", inner),
                Mark::Underline => {
                    format!("<span class=\"notion-inline-underscore\">{}</span>", inner)
                }
                Mark::Link(href) => format!(
                    "<a class=\"notion-link\" href=\"{}\">{}</a>",
                    html_escape(href),
                    inner
                ),
                Mark::Color(color) => format!(
                    "<span class=\"notion-{}\">{}</span>",
                    html_escape(color),
                    inner
                ),
                Mark::Other(_) => inner,
            };
        }
        html.push_str(&inner);
    }
    html
}
