//! Rich-text block model.
//!
//! Blocks arrive as Portable Text JSON exported by the content studio:
//! an array of objects with `_type`, `_key`, `style`, optional list
//! metadata, annotation definitions and inline spans. Parsing is lenient:
//! a block that does not match the expected shape is salvaged rather than
//! dropped, so rendering stays total over arbitrary input.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// `_type` of a regular text block.
pub const TEXT_BLOCK_TYPE: &str = "block";

/// How a block is rendered, derived from its `_type` and `style`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Body paragraph (`style: "normal"` or no style).
    Normal,
    /// Section heading (`style: "h2"`).
    Heading2,
    /// Deep-linkable sub-heading (`style: "h3"`).
    Heading3,
    /// Any other style or object type, carried by name.
    Unknown(String),
}

/// List flavour of a list-item block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
}

impl ListKind {
    pub fn open_tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "<ul>",
            ListKind::Number => "<ol>",
        }
    }

    pub fn close_tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "</ul>",
            ListKind::Number => "</ol>",
        }
    }
}

/// An inline run of text with its marks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "_key", default, skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(default)]
    pub text: String,
    /// Decorator names (`strong`, `em`, …) or keys into the block's `markDefs`.
    #[serde(default)]
    pub marks: Vec<String>,
}

impl Span {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_marks(mut self, marks: &[&str]) -> Self {
        self.marks = marks.iter().map(|m| m.to_string()).collect();
        self
    }
}

/// An annotation referenced from span marks by key (e.g. a link).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key", default)]
    pub key: String,
    #[serde(rename = "_type", default)]
    pub def_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// One unit of rich text within a document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "_type", default = "default_block_type")]
    pub block_type: String,
    /// Stable identifier, used as the deep-link anchor for headings.
    #[serde(rename = "_key", default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(rename = "listItem", default, skip_serializing_if = "Option::is_none")]
    pub list_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(rename = "markDefs", default, skip_serializing_if = "Vec::is_empty")]
    pub mark_defs: Vec<MarkDef>,
    #[serde(default)]
    pub children: Vec<Span>,
}

fn default_block_type() -> String {
    TEXT_BLOCK_TYPE.to_string()
}

impl ContentBlock {
    /// A text block with the given style, key and a single unmarked span.
    pub fn text(style: &str, key: &str, text: &str) -> Self {
        Self {
            block_type: default_block_type(),
            key: key.to_string(),
            style: Some(style.to_string()),
            list_item: None,
            level: None,
            mark_defs: Vec::new(),
            children: vec![Span::new(text)],
        }
    }

    /// Classify the block for rendering.
    pub fn kind(&self) -> BlockKind {
        if self.block_type != TEXT_BLOCK_TYPE {
            return BlockKind::Unknown(self.block_type.clone());
        }
        match self.style.as_deref().unwrap_or("normal") {
            "normal" => BlockKind::Normal,
            "h2" => BlockKind::Heading2,
            "h3" => BlockKind::Heading3,
            other => BlockKind::Unknown(other.to_string()),
        }
    }

    /// List flavour, if this block is a recognised list item.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self.list_item.as_deref()? {
            "bullet" => Some(ListKind::Bullet),
            "number" => Some(ListKind::Number),
            _ => None,
        }
    }

    /// Nesting level of a list item (1 is the outermost list).
    pub fn list_level(&self) -> u32 {
        self.level.unwrap_or(1).max(1)
    }

    /// Concatenated span text without markup.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }

    /// Best-effort recovery of a block whose JSON does not deserialize.
    ///
    /// Keeps `_type`, `_key` and `style` when they are strings and any
    /// `children[].text` strings, so the content still reaches the page.
    fn salvage(value: &Value) -> Self {
        let str_field = |name: &str| value.get(name).and_then(|v| v.as_str());
        let children = value
            .get("children")
            .and_then(|c| c.as_array())
            .map(|spans| {
                spans
                    .iter()
                    .filter_map(|s| s.get("text").and_then(|t| t.as_str()))
                    .map(Span::new)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            block_type: str_field("_type").unwrap_or(TEXT_BLOCK_TYPE).to_string(),
            key: str_field("_key").unwrap_or_default().to_string(),
            style: str_field("style").map(str::to_string),
            list_item: None,
            level: None,
            mark_defs: Vec::new(),
            children,
        }
    }
}

/// Parse a Portable Text array into blocks.
///
/// A missing value or a non-array yields no blocks. Each element is parsed
/// on its own; malformed elements are salvaged instead of rejected.
pub fn parse_blocks(value: Option<&Value>) -> Vec<ContentBlock> {
    let Some(items) = value.and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    items
        .iter()
        .map(|item| {
            serde_json::from_value::<ContentBlock>(item.clone()).unwrap_or_else(|e| {
                warn!(error = %e, "malformed block, rendering salvaged content");
                ContentBlock::salvage(item)
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_from_style() {
        assert_eq!(ContentBlock::text("normal", "a", "x").kind(), BlockKind::Normal);
        assert_eq!(ContentBlock::text("h2", "a", "x").kind(), BlockKind::Heading2);
        assert_eq!(ContentBlock::text("h3", "a", "x").kind(), BlockKind::Heading3);
        assert_eq!(
            ContentBlock::text("blockquote", "a", "x").kind(),
            BlockKind::Unknown("blockquote".into())
        );
    }

    #[test]
    fn missing_style_is_normal() {
        let block: ContentBlock =
            serde_json::from_value(json!({ "_type": "block", "children": [] })).unwrap();
        assert_eq!(block.kind(), BlockKind::Normal);
    }

    #[test]
    fn non_text_object_is_unknown() {
        let block: ContentBlock =
            serde_json::from_value(json!({ "_type": "image", "_key": "img1" })).unwrap();
        assert_eq!(block.kind(), BlockKind::Unknown("image".into()));
        assert_eq!(block.key, "img1");
    }

    #[test]
    fn deserializes_portable_text_block() {
        let block: ContentBlock = serde_json::from_value(json!({
            "_type": "block",
            "_key": "k1",
            "style": "normal",
            "listItem": "number",
            "level": 2,
            "markDefs": [{ "_key": "l1", "_type": "link", "href": "https://example.com" }],
            "children": [
                { "_type": "span", "_key": "s1", "text": "Hi", "marks": ["strong", "l1"] }
            ]
        }))
        .unwrap();

        assert_eq!(block.list_kind(), Some(ListKind::Number));
        assert_eq!(block.list_level(), 2);
        assert_eq!(block.mark_defs[0].href.as_deref(), Some("https://example.com"));
        assert_eq!(block.children[0].marks, vec!["strong", "l1"]);
        assert_eq!(block.plain_text(), "Hi");
    }

    #[test]
    fn unknown_list_item_is_not_a_list() {
        let mut block = ContentBlock::text("normal", "k", "x");
        block.list_item = Some("checkbox".into());
        assert_eq!(block.list_kind(), None);
    }

    #[test]
    fn list_level_zero_clamps_to_one() {
        let mut block = ContentBlock::text("normal", "k", "x");
        block.level = Some(0);
        assert_eq!(block.list_level(), 1);
    }

    #[test]
    fn parse_missing_or_non_array_is_empty() {
        assert!(parse_blocks(None).is_empty());
        assert!(parse_blocks(Some(&json!({ "not": "an array" }))).is_empty());
        assert!(parse_blocks(Some(&json!(null))).is_empty());
    }

    #[test]
    fn parse_salvages_malformed_block() {
        let value = json!([
            { "_type": "block", "_key": "ok", "children": [{ "text": "fine" }] },
            { "_type": "block", "_key": "bad", "style": "h3",
              "children": [{ "text": "kept", "marks": "not-a-list" }] }
        ]);
        let blocks = parse_blocks(Some(&value));
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].key, "bad");
        assert_eq!(blocks[1].kind(), BlockKind::Heading3);
        assert_eq!(blocks[1].plain_text(), "kept");
    }
}
