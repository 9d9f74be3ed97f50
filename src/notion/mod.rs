//! Notion page support - block map model and HTML renderer

mod block;
mod renderer;

pub use block::{Block, BlockKind, BlockMap, BlockRecord, Mark, TextSpan};
pub use renderer::{render_rich_text, NotionRenderer};
