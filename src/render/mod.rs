//! Document body rendering
//!
//! Composition code never talks to a concrete renderer. It hands a
//! [`Body`] to [`DocumentRenderer`], which dispatches on the payload shape to
//! one of two injected capabilities:
//!
//! * [`BlockTreeRender`] for Notion block maps
//! * [`MarkedTextRender`] for Markdown
//!
//! Callers that know which shape a document must have use the
//! path-specific methods; a body of the other shape is a contract violation
//! and comes back as [`RenderError::BodyMismatch`] without any attempt to
//! convert it.

use crate::content::Body;
use crate::error::{RenderError, RenderResult};
use crate::notion::BlockMap;

/// Capability that renders a block-tree payload
pub trait BlockTreeRender {
    fn render_block_tree(&self, map: &BlockMap) -> RenderResult<String>;
}

/// Capability that renders a marked-up text payload
pub trait MarkedTextRender {
    fn render_marked_text(&self, text: &str) -> RenderResult<String>;
}

/// Dispatches document bodies to the matching render capability
#[derive(Clone, Copy)]
pub struct DocumentRenderer<'a> {
    block_tree: &'a dyn BlockTreeRender,
    marked_text: &'a dyn MarkedTextRender,
}

impl<'a> DocumentRenderer<'a> {
    pub fn new(
        block_tree: &'a dyn BlockTreeRender,
        marked_text: &'a dyn MarkedTextRender,
    ) -> Self {
        Self {
            block_tree,
            marked_text,
        }
    }

    /// Render any body through the capability matching its shape
    pub fn render(&self, body: &Body) -> RenderResult<String> {
        match body {
            Body::BlockTree(map) => self.block_tree.render_block_tree(map),
            Body::MarkedText(text) => self.marked_text.render_marked_text(text),
        }
    }

    /// Render a body the caller requires to be marked-up text
    pub fn render_marked_text(&self, body: &Body) -> RenderResult<String> {
        match body {
            Body::MarkedText(text) => self.marked_text.render_marked_text(text),
            other => Err(RenderError::BodyMismatch {
                expected: "marked-text",
                found: other.shape(),
            }),
        }
    }

    /// Render a body the caller requires to be a block tree
    pub fn render_block_tree(&self, body: &Body) -> RenderResult<String> {
        match body {
            Body::BlockTree(map) => self.block_tree.render_block_tree(map),
            other => Err(RenderError::BodyMismatch {
                expected: "block-tree",
                found: other.shape(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    /// Records which capability was called
    #[derive(Default)]
    pub(crate) struct CountingRenderer {
        pub block_tree_calls: Cell<usize>,
        pub marked_text_calls: Cell<usize>,
    }

    impl BlockTreeRender for CountingRenderer {
        fn render_block_tree(&self, map: &BlockMap) -> RenderResult<String> {
            self.block_tree_calls.set(self.block_tree_calls.get() + 1);
            Ok(format!("<tree blocks=\"{}\"/>", map.len()))
        }
    }

    impl MarkedTextRender for CountingRenderer {
        fn render_marked_text(&self, text: &str) -> RenderResult<String> {
            self.marked_text_calls.set(self.marked_text_calls.get() + 1);
            Ok(format!("<text>{}</text>", text))
        }
    }

    #[test]
    fn test_dispatch_by_shape() {
        let counter = CountingRenderer::default();
        let renderer = DocumentRenderer::new(&counter, &counter);

        let html = renderer
            .render(&Body::MarkedText("hello".to_string()))
            .unwrap();
        assert_eq!(html, "<text>hello</text>");
        assert_eq!(counter.marked_text_calls.get(), 1);
        assert_eq!(counter.block_tree_calls.get(), 0);

        let html = renderer.render(&Body::BlockTree(BlockMap::default())).unwrap();
        assert_eq!(html, "<tree blocks=\"0\"/>");
        assert_eq!(counter.block_tree_calls.get(), 1);
    }

    #[test]
    fn test_mismatch_is_not_corrected() {
        let counter = CountingRenderer::default();
        let renderer = DocumentRenderer::new(&counter, &counter);

        let err = renderer
            .render_marked_text(&Body::BlockTree(BlockMap::default()))
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::BodyMismatch {
                expected: "marked-text",
                found: "block-tree"
            }
        ));

        let err = renderer
            .render_block_tree(&Body::MarkedText(String::new()))
            .unwrap_err();
        assert_eq!(err.to_string(), "expected a block-tree body, found marked-text");
        assert_eq!(counter.block_tree_calls.get(), 0);
        assert_eq!(counter.marked_text_calls.get(), 0);
    }
}
