//! Core schema types.
//!
//! These types describe the shape of editable documents: which fields a
//! document type has, what kind of value each field holds, and the
//! authoring-time constraints the studio enforces on them.

use serde::{Deserialize, Serialize};

/// A titled option in an enumerated list (studio `options.list`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOption {
    pub title: String,
    pub value: String,
}

impl ListOption {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
        }
    }
}

/// A block style the rich-text editor offers (e.g. "normal", "h2").
pub type BlockStyleOption = ListOption;

/// Styles offered when a block field does not restrict them.
pub fn default_block_styles() -> Vec<BlockStyleOption> {
    vec![
        ListOption::new("Normal", "normal"),
        ListOption::new("Heading 1", "h1"),
        ListOption::new("Heading 2", "h2"),
        ListOption::new("Heading 3", "h3"),
        ListOption::new("Heading 4", "h4"),
        ListOption::new("Heading 5", "h5"),
        ListOption::new("Heading 6", "h6"),
        ListOption::new("Quote", "blockquote"),
    ]
}

/// Options for a slug field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugOptions {
    /// Field the slug is generated from.
    pub source: String,
    /// Maximum slug length, if limited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// Field type definitions for document type registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Single-line string, optionally constrained to a list of values.
    String {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        list: Vec<ListOption>,
    },
    /// Multi-line plain text.
    Text { rows: u32 },
    /// URL-safe identifier derived from another field.
    Slug(SlugOptions),
    /// Ordered array of rich-text blocks. An empty style list means the
    /// editor's default styles apply.
    Blocks {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        styles: Vec<BlockStyleOption>,
    },
}

impl FieldType {
    /// Plain string field.
    pub fn string() -> Self {
        Self::String { list: Vec::new() }
    }

    /// Block styles accepted by a `Blocks` field, falling back to defaults.
    pub fn allowed_styles(&self) -> Vec<BlockStyleOption> {
        match self {
            Self::Blocks { styles } if !styles.is_empty() => styles.clone(),
            Self::Blocks { .. } => default_block_styles(),
            _ => Vec::new(),
        }
    }
}

/// A single field definition within a document type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub field_name: String,
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

impl FieldDefinition {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            field_name: name.into(),
            field_type,
            label: title_case(name),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.into();
        self
    }
}

/// A document type definition (studio `defineType` with `type: 'document'`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTypeDefinition {
    pub machine_name: String,
    pub label: String,
    pub fields: Vec<FieldDefinition>,
}

impl DocumentTypeDefinition {
    pub fn new(machine_name: &str, label: &str) -> Self {
        Self {
            machine_name: machine_name.into(),
            label: label.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Look up a field by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    /// Names of all required fields, in declaration order.
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.field_name.as_str())
            .collect()
    }
}

/// Studio default label for a field without an explicit title.
fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn field_label_defaults_to_title_case() {
        let field = FieldDefinition::new("summary", FieldType::Text { rows: 3 });
        assert_eq!(field.label, "Summary");
        assert!(!field.required);
    }

    #[test]
    fn field_builder() {
        let field = FieldDefinition::new("body", FieldType::Blocks { styles: vec![] })
            .label("Content")
            .required();
        assert_eq!(field.label, "Content");
        assert!(field.required);
    }

    #[test]
    fn empty_block_styles_fall_back_to_defaults() {
        let field_type = FieldType::Blocks { styles: vec![] };
        let styles = field_type.allowed_styles();
        assert_eq!(styles.len(), 8);
        assert!(styles.iter().any(|s| s.value == "blockquote"));
    }

    #[test]
    fn restricted_block_styles_are_kept() {
        let field_type = FieldType::Blocks {
            styles: vec![ListOption::new("Normal", "normal")],
        };
        assert_eq!(field_type.allowed_styles().len(), 1);
        assert!(FieldType::string().allowed_styles().is_empty());
    }

    #[test]
    fn required_fields_in_order() {
        let def = DocumentTypeDefinition::new("note", "Note")
            .field(FieldDefinition::new("title", FieldType::string()).required())
            .field(FieldDefinition::new("summary", FieldType::Text { rows: 3 }))
            .field(
                FieldDefinition::new(
                    "slug",
                    FieldType::Slug(SlugOptions {
                        source: "title".into(),
                        max_length: None,
                    }),
                )
                .required(),
            );
        assert_eq!(def.required_fields(), vec!["title", "slug"]);
        assert!(def.get_field("summary").is_some());
        assert!(def.get_field("missing").is_none());
    }

    #[test]
    fn field_type_serializes_externally_tagged() {
        let json = serde_json::to_value(FieldType::Text { rows: 3 }).unwrap();
        assert_eq!(json, serde_json::json!({ "Text": { "rows": 3 } }));
    }
}
