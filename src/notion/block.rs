//! Notion block map model
//!
//! A block map is the JSON object Notion's unofficial API returns for a page:
//! block id mapped to a record whose `value` holds the block. The first entry
//! is the page itself; every block lists its children by id in `content`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Block id to record, in export order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockMap(IndexMap<String, BlockRecord>);

impl BlockMap {
    /// Parse a block map from its JSON export
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The root page block (the first entry)
    pub fn root(&self) -> Option<&Block> {
        self.0.values().next().map(|record| &record.value)
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.0.get(id).map(|record| &record.value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Title of the root page as plain text
    pub fn title(&self) -> Option<String> {
        self.root()
            .map(|block| block.plain_text("title"))
            .filter(|title| !title.is_empty())
    }
}

impl FromIterator<(String, BlockRecord)> for BlockMap {
    fn from_iter<I: IntoIterator<Item = (String, BlockRecord)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Wrapper Notion puts around each block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockRecord {
    #[serde(default)]
    pub role: String,
    pub value: Block,
}

/// Kind of block, from the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Page,
    Text,
    Header,
    SubHeader,
    SubSubHeader,
    BulletedList,
    NumberedList,
    ToDo,
    Toggle,
    Quote,
    Callout,
    Code,
    Divider,
    Image,
    Video,
    Embed,
    Bookmark,
    ColumnList,
    Column,
    #[serde(other)]
    Unsupported,
}

/// A single Notion block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub format: Map<String, Value>,
}

impl Block {
    /// Rich text stored under a property key
    pub fn rich_text(&self, key: &str) -> Vec<TextSpan> {
        self.properties
            .get(key)
            .map(TextSpan::parse_all)
            .unwrap_or_default()
    }

    /// Property text with decorations dropped
    pub fn plain_text(&self, key: &str) -> String {
        self.rich_text(key)
            .into_iter()
            .map(|span| span.text)
            .collect()
    }

    /// String value from the `format` object
    pub fn format_str(&self, key: &str) -> Option<&str> {
        self.format.get(key).and_then(Value::as_str)
    }

    /// Id without dashes, as used in Notion page URLs
    pub fn compact_id(&self) -> String {
        self.id.replace('-', "")
    }
}

/// Inline decoration applied to a span of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Bold,
    Italic,
    Strike,
    Code,
    Underline,
    Link(String),
    Color(String),
    Other(String),
}

/// A run of text sharing the same decorations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl TextSpan {
    /// Parse Notion's `[["text", [["b"], ["a", "url"]]], ...]` encoding
    pub fn parse_all(value: &Value) -> Vec<TextSpan> {
        value
            .as_array()
            .map(|items| items.iter().filter_map(TextSpan::parse).collect())
            .unwrap_or_default()
    }

    fn parse(item: &Value) -> Option<TextSpan> {
        let parts = item.as_array()?;
        let text = parts.first()?.as_str()?.to_string();
        let marks = parts
            .get(1)
            .and_then(Value::as_array)
            .map(|decorations| decorations.iter().filter_map(parse_mark).collect())
            .unwrap_or_default();
        Some(TextSpan { text, marks })
    }
}

fn parse_mark(decoration: &Value) -> Option<Mark> {
    let parts = decoration.as_array()?;
    let code = parts.first()?.as_str()?;
    let arg = || parts.get(1).and_then(Value::as_str).map(str::to_string);
    Some(match code {
        "b" => Mark::Bold,
        "i" => Mark::Italic,
        "s" => Mark::Strike,
        "c" => Mark::Code,
        "_" => Mark::Underline,
        "a" => Mark::Link(arg()?),
        "h" => Mark::Color(arg()?),
        other => Mark::Other(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_spans() {
        let value = json!([["plain "], ["bold", [["b"]]], ["link", [["a", "https://x.dev"], ["i"]]]]);
        let spans = TextSpan::parse_all(&value);
        assert_eq!(spans.len(), 3);
        assert!(spans[0].marks.is_empty());
        assert_eq!(spans[1].marks, vec![Mark::Bold]);
        assert_eq!(
            spans[2].marks,
            vec![Mark::Link("https://x.dev".to_string()), Mark::Italic]
        );
    }

    #[test]
    fn test_root_is_first_entry() {
        let map = BlockMap::from_json(
            r#"{
                "b": {"role": "reader", "value": {"id": "b", "type": "page", "properties": {"title": [["About me"]]}, "content": ["a"]}},
                "a": {"role": "reader", "value": {"id": "a", "type": "text"}}
            }"#,
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.root().map(|b| b.id.as_str()), Some("b"));
        assert_eq!(map.title(), Some("About me".to_string()));
    }

    #[test]
    fn test_unknown_kind() {
        let block: Block =
            serde_json::from_value(json!({"id": "x", "type": "collection_view"})).unwrap();
        assert_eq!(block.kind, BlockKind::Unsupported);
    }
}
