//! ABO Study test utilities.
//!
//! Fixture builders for Portable Text blocks and studio documents, plus
//! assertion helpers for rendered HTML.

use serde_json::{Value as JsonValue, json};

/// Create a text block with a single unmarked span.
pub fn test_block(style: &str, key: &str, text: &str) -> TestBlock {
    TestBlock {
        block_type: "block".to_string(),
        key: Some(key.to_string()),
        style: Some(style.to_string()),
        list_item: None,
        level: None,
        mark_defs: Vec::new(),
        spans: vec![span(text, &[])],
    }
}

/// Create a list-item block.
pub fn test_list_item(kind: &str, level: u32, key: &str, text: &str) -> TestBlock {
    let mut block = test_block("normal", key, text);
    block.list_item = Some(kind.to_string());
    block.level = Some(level);
    block
}

/// Create a non-text object block (e.g. an image) with no children.
pub fn test_object(block_type: &str, key: &str) -> TestBlock {
    TestBlock {
        block_type: block_type.to_string(),
        key: Some(key.to_string()),
        style: None,
        list_item: None,
        level: None,
        mark_defs: Vec::new(),
        spans: Vec::new(),
    }
}

/// A span JSON object.
pub fn span(text: &str, marks: &[&str]) -> JsonValue {
    json!({ "_type": "span", "text": text, "marks": marks })
}

/// A Portable Text block builder.
#[derive(Debug, Clone)]
pub struct TestBlock {
    pub block_type: String,
    pub key: Option<String>,
    pub style: Option<String>,
    pub list_item: Option<String>,
    pub level: Option<u32>,
    pub mark_defs: Vec<JsonValue>,
    pub spans: Vec<JsonValue>,
}

impl TestBlock {
    /// Remove the `_key`.
    pub fn without_key(mut self) -> Self {
        self.key = None;
        self
    }

    /// Remove the `style`.
    pub fn without_style(mut self) -> Self {
        self.style = None;
        self
    }

    /// Append a span.
    pub fn with_span(mut self, text: &str, marks: &[&str]) -> Self {
        self.spans.push(span(text, marks));
        self
    }

    /// Add a link annotation; reference it from a span with `key`.
    pub fn with_link(mut self, key: &str, href: &str) -> Self {
        self.mark_defs
            .push(json!({ "_key": key, "_type": "link", "href": href }));
        self
    }

    /// Build the block JSON.
    pub fn build(self) -> JsonValue {
        let mut block = json!({
            "_type": self.block_type,
            "children": self.spans,
        });
        if let Some(obj) = block.as_object_mut() {
            if let Some(key) = self.key {
                obj.insert("_key".to_string(), json!(key));
            }
            if let Some(style) = self.style {
                obj.insert("style".to_string(), json!(style));
            }
            if let Some(list_item) = self.list_item {
                obj.insert("listItem".to_string(), json!(list_item));
            }
            if let Some(level) = self.level {
                obj.insert("level".to_string(), json!(level));
            }
            if !self.mark_defs.is_empty() {
                obj.insert("markDefs".to_string(), JsonValue::Array(self.mark_defs));
            }
        }
        block
    }
}

/// Create a lesson document fixture.
pub fn test_lesson(title: &str, slug: &str, domain: &str) -> TestDocument {
    TestDocument {
        doc_type: "lesson".to_string(),
        body_field: "body",
        fields: json!({
            "title": title,
            "slug": { "_type": "slug", "current": slug },
            "domain": domain,
        }),
        blocks: Vec::new(),
    }
}

/// Create a page document fixture.
pub fn test_page(title: &str, slug: &str) -> TestDocument {
    TestDocument {
        doc_type: "page".to_string(),
        body_field: "content",
        fields: json!({
            "title": title,
            "slug": { "_type": "slug", "current": slug },
        }),
        blocks: Vec::new(),
    }
}

/// A studio document builder.
#[derive(Debug, Clone)]
pub struct TestDocument {
    pub doc_type: String,
    body_field: &'static str,
    pub fields: JsonValue,
    pub blocks: Vec<JsonValue>,
}

impl TestDocument {
    /// Set or replace a top-level field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        if let Some(obj) = self.fields.as_object_mut() {
            obj.insert(name.to_string(), value);
        }
        self
    }

    /// Remove a top-level field.
    pub fn without_field(mut self, name: &str) -> Self {
        if let Some(obj) = self.fields.as_object_mut() {
            obj.remove(name);
        }
        self
    }

    /// Append a block to the body.
    pub fn with_block(mut self, block: TestBlock) -> Self {
        self.blocks.push(block.build());
        self
    }

    /// Build the document JSON.
    pub fn build(self) -> JsonValue {
        let mut doc = self.fields;
        if let Some(obj) = doc.as_object_mut() {
            obj.insert("_type".to_string(), json!(self.doc_type));
            if !self.blocks.is_empty() {
                obj.insert(self.body_field.to_string(), JsonValue::Array(self.blocks));
            }
        }
        doc
    }
}

/// Assertion helpers for rendered HTML.
pub mod assert {
    /// Assert that `needles` appear in `html` in the given order.
    pub fn appears_in_order(html: &str, needles: &[&str]) {
        let mut from = 0;
        for needle in needles {
            match html[from..].find(needle) {
                Some(pos) => from += pos + needle.len(),
                None => panic!("Expected '{needle}' after byte {from} in: {html}"),
            }
        }
    }

    /// Assert that `html` contains `needle` exactly `count` times.
    pub fn occurs(html: &str, needle: &str, count: usize) {
        let found = html.matches(needle).count();
        assert_eq!(
            found, count,
            "Expected '{needle}' {count} time(s), found {found} in: {html}"
        );
    }
}
