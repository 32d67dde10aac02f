//! Document schema registry and authoring-time validation.
//!
//! Provides:
//! - `SchemaRegistry`: registry of document types keyed by machine name
//! - `validate_document`: checks a document's JSON against its type's rules
//!   (required fields, slug shape and length, enumerated values, block
//!   styles and unique block keys)
//!
//! The studio enforces these rules while editors author content. The
//! renderer never re-validates; this is for checking exports and fixtures.

use std::collections::{HashMap, HashSet};

use abo_study_schema::prelude::{DocumentTypeDefinition, FieldDefinition, FieldType, standard_types};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::block::TEXT_BLOCK_TYPE;
use crate::error::{AppError, AppResult};
use crate::services::{is_valid_slug, slugify};

/// Registry of document type definitions, keyed by machine name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaRegistry {
    types: HashMap<String, DocumentTypeDefinition>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Create a registry with the `page` and `lesson` document types.
    pub fn with_standard_types() -> Self {
        let mut registry = Self::new();
        for definition in standard_types() {
            registry.register(definition);
        }
        registry
    }

    /// Register a document type definition, replacing any with the same name.
    pub fn register(&mut self, definition: DocumentTypeDefinition) {
        self.types
            .insert(definition.machine_name.clone(), definition);
    }

    /// Look up a document type by name.
    pub fn get(&self, type_name: &str) -> Option<&DocumentTypeDefinition> {
        self.types.get(type_name)
    }

    /// Check whether a document type is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    /// All definitions, sorted by machine name.
    pub fn definitions(&self) -> Vec<&DocumentTypeDefinition> {
        let mut defs: Vec<&DocumentTypeDefinition> = self.types.values().collect();
        defs.sort_by(|a, b| a.machine_name.cmp(&b.machine_name));
        defs
    }

    /// Validate document JSON against the registered type.
    ///
    /// Returns a list of validation error messages. An empty list means the
    /// document is valid.
    pub fn validate_document(&self, type_name: &str, data: &Value) -> Vec<String> {
        let Some(definition) = self.get(type_name) else {
            return vec![format!("unknown document type '{type_name}'")];
        };

        let mut errors = Vec::new();
        for field in &definition.fields {
            validate_field(type_name, field, data, &mut errors);
        }

        debug!(type_name = %type_name, errors = errors.len(), "validated document");
        errors
    }

    /// Validate a document using its own `_type`, failing with every error found.
    pub fn ensure_valid(&self, data: &Value) -> AppResult<()> {
        let type_name = data
            .get("_type")
            .and_then(|t| t.as_str())
            .unwrap_or_default();
        if !self.contains(type_name) {
            return Err(AppError::UnknownDocumentType(type_name.to_string()));
        }

        let errors = self.validate_document(type_name, data);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

fn validate_field(
    type_name: &str,
    field: &FieldDefinition,
    data: &Value,
    errors: &mut Vec<String>,
) {
    let name = &field.field_name;
    let value = data.get(name).filter(|v| !v.is_null());

    match &field.field_type {
        FieldType::String { list } => {
            let Some(text) = string_value(type_name, field, value, errors) else {
                return;
            };
            if !list.is_empty() && !list.iter().any(|o| o.value == text) {
                let allowed: Vec<&str> = list.iter().map(|o| o.value.as_str()).collect();
                errors.push(format!(
                    "{type_name}: '{name}' must be one of: {}",
                    allowed.join(", ")
                ));
            }
        }
        FieldType::Text { .. } => {
            string_value(type_name, field, value, errors);
        }
        FieldType::Slug(options) => {
            let current = match value {
                Some(Value::String(s)) => Some(s.as_str()),
                Some(v) => v.get("current").and_then(|c| c.as_str()),
                None => None,
            };
            match current {
                None | Some("") => {
                    if field.required {
                        errors.push(format!("{type_name}: '{name}' is required"));
                    }
                }
                Some(slug) => {
                    if !is_valid_slug(slug) {
                        let mut message = format!(
                            "{type_name}: '{name}' must be lowercase words separated by single hyphens, got '{slug}'"
                        );
                        if let Some(expected) =
                            expected_slug(data, &options.source, options.max_length)
                        {
                            message.push_str(&format!(" (expected '{expected}')"));
                        }
                        errors.push(message);
                    }
                    if let Some(max) = options.max_length
                        && slug.len() > max
                    {
                        errors.push(format!(
                            "{type_name}: '{name}' must be at most {max} characters, got {}",
                            slug.len()
                        ));
                    }
                }
            }
        }
        FieldType::Blocks { .. } => match value {
            None => {
                if field.required {
                    errors.push(format!("{type_name}: '{name}' is required"));
                }
            }
            Some(Value::Array(blocks)) => {
                validate_blocks(type_name, field, blocks, errors);
            }
            Some(_) => errors.push(format!("{type_name}: '{name}' must be an array of blocks")),
        },
    }
}

/// Slug derived from the field the slug is sourced from, if that yields one.
fn expected_slug(data: &Value, source: &str, max_length: Option<usize>) -> Option<String> {
    let text = data.get(source).and_then(|v| v.as_str())?;
    let slug = slugify(text, max_length.unwrap_or(usize::MAX));
    (!slug.is_empty()).then_some(slug)
}

/// Check a required/optional string field; returns its text when present.
fn string_value<'a>(
    type_name: &str,
    field: &FieldDefinition,
    value: Option<&'a Value>,
    errors: &mut Vec<String>,
) -> Option<&'a str> {
    let name = &field.field_name;
    match value {
        None => {
            if field.required {
                errors.push(format!("{type_name}: '{name}' is required"));
            }
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            if field.required {
                errors.push(format!("{type_name}: '{name}' must not be empty"));
            }
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errors.push(format!("{type_name}: '{name}' must be a string"));
            None
        }
    }
}

fn validate_blocks(
    type_name: &str,
    field: &FieldDefinition,
    blocks: &[Value],
    errors: &mut Vec<String>,
) {
    let name = &field.field_name;
    let styles = field.field_type.allowed_styles();
    let mut seen_keys: HashSet<&str> = HashSet::new();

    for (i, block) in blocks.iter().enumerate() {
        match block.get("_key").and_then(|k| k.as_str()) {
            None | Some("") => {
                errors.push(format!("{type_name}: '{name}' block {i} is missing a _key"));
            }
            Some(key) => {
                if !seen_keys.insert(key) {
                    errors.push(format!(
                        "{type_name}: '{name}' block {i} repeats key '{key}'"
                    ));
                }
            }
        }

        let block_type = block
            .get("_type")
            .and_then(|t| t.as_str())
            .unwrap_or(TEXT_BLOCK_TYPE);
        if block_type != TEXT_BLOCK_TYPE {
            errors.push(format!(
                "{type_name}: '{name}' block {i} has unsupported type '{block_type}'"
            ));
            continue;
        }

        let style = block
            .get("style")
            .and_then(|s| s.as_str())
            .unwrap_or("normal");
        if !styles.iter().any(|s| s.value == style) {
            errors.push(format!(
                "{type_name}: '{name}' block {i} uses style '{style}' which is not allowed"
            ));
        }
    }
}
