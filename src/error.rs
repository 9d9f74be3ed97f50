//! Errors raised by the render capabilities

use thiserror::Error;

/// Failure while turning a document body into markup
#[derive(Error, Debug)]
pub enum RenderError {
    /// The body handed to a render path has the other shape
    #[error("expected a {expected} body, found {found}")]
    BodyMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The block map has no entries, so there is no root page
    #[error("block map is empty")]
    MissingRoot,

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("highlight error: {0}")]
    Highlight(String),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;
