//! Markdown rendering with syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::error::{RenderError, RenderResult};
use crate::helpers::{html_escape, squash_whitespace, strip_html, truncate};
use crate::render::MarkedTextRender;

/// Number of characters kept in a generated excerpt
pub const EXCERPT_LENGTH: usize = 140;

lazy_static! {
    /// MDX `import`/`export` statements on their own line
    static ref MDX_MODULE_LINE: Regex =
        Regex::new(r"(?m)^(import|export)\s.*$\n?").unwrap();
    /// Self-closing JSX component tags such as `<NotionPage />`
    static ref MDX_COMPONENT: Regex =
        Regex::new(r"<[A-Z][A-Za-z0-9]*(\s[^<>]*)?/>").unwrap();
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> RenderResult<String> {
        let markdown = strip_mdx(markdown);
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(&markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                            // "rust {1,3}" style info strings carry extra options
                            lang.split_whitespace().next().map(str::to_string)
                        }
                        _ => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref())?;
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> RenderResult<String> {
        let lang = lang.unwrap_or("text");
        let lang_class = html_escape(lang);

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
            .ok_or_else(|| RenderError::Highlight("no highlight themes loaded".to_string()))?;

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) if self.line_numbers => {
                Ok(add_line_numbers(&highlighted, &lang_class))
            }
            Ok(highlighted) => Ok(format!(
                r#"<div class="highlight language-{}">{}</div>"#,
                lang_class, highlighted
            )),
            Err(e) => {
                tracing::debug!("Highlighting {} failed, emitting plain block: {}", lang, e);
                Ok(format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    lang_class,
                    html_escape(code)
                ))
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkedTextRender for MarkdownRenderer {
    fn render_marked_text(&self, text: &str) -> RenderResult<String> {
        self.render(text)
    }
}

/// Remove MDX module statements and self-closing component tags
pub fn strip_mdx(markdown: &str) -> String {
    let without_modules = MDX_MODULE_LINE.replace_all(markdown, "");
    MDX_COMPONENT.replace_all(&without_modules, "").into_owned()
}

/// Build a plain-text excerpt from rendered HTML
pub fn excerpt_from_html(html: &str) -> String {
    let text = squash_whitespace(&strip_html(html));
    truncate(&text, EXCERPT_LENGTH, None)
}

/// Add line numbers to highlighted code; `lang_class` is already escaped
fn add_line_numbers(code: &str, lang_class: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang_class,
        gutter,
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("highlight"));
        assert!(html.contains("main"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_render_plain_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("    let x = 1;\n").unwrap();
        assert!(html.contains("language-text"));
    }

    #[test]
    fn test_strip_mdx() {
        let mdx = "import NotionPage from './NotionPage'\n\n# About\n\n<NotionPage />\n";
        let stripped = strip_mdx(mdx);
        assert!(!stripped.contains("import"));
        assert!(!stripped.contains("NotionPage"));
        assert!(stripped.contains("# About"));
    }

    #[test]
    fn test_excerpt_from_rendered_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Title\n\nSome *body* text.").unwrap();
        assert_eq!(excerpt_from_html(&html), "Title Some body text.");

        let long = "word ".repeat(100);
        let excerpt = excerpt_from_html(&renderer.render(&long).unwrap());
        assert_eq!(excerpt.chars().count(), EXCERPT_LENGTH);
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn test_code_language_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```x\"><script>\nlet a = 1;\n```")
            .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("language-x&quot;&gt;&lt;script&gt;"));
    }
}
