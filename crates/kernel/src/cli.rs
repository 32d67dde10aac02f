//! CLI command implementations.
//!
//! Commands work on document exports (JSON files) and return the text to
//! print, leaving output and exit codes to the binary.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::content::{SchemaRegistry, render_json};
use crate::error::{AppError, AppResult};
use crate::models::Document;

/// Read and parse a JSON file.
pub fn load_json(path: &Path) -> AppResult<Value> {
    let raw = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "read document export");
    Ok(serde_json::from_str(&raw)?)
}

/// Render a document's body (or a bare block array) to HTML.
///
/// Only `_type` and the body field are read, so drafts with missing or
/// out-of-date fields still render.
pub fn cmd_render(path: &Path) -> AppResult<String> {
    let value = load_json(path)?;
    if value.is_array() {
        return Ok(render_json(Some(&value)));
    }

    let type_name = value
        .get("_type")
        .and_then(|t| t.as_str())
        .unwrap_or_default();
    let field = Document::body_field(type_name)
        .ok_or_else(|| AppError::UnknownDocumentType(type_name.to_string()))?;
    info!(type_name = %type_name, field = field, "rendering document");
    Ok(render_json(value.get(field)))
}

/// Validate a document against its schema.
pub fn cmd_validate(registry: &SchemaRegistry, path: &Path) -> AppResult<String> {
    let value = load_json(path)?;
    registry.ensure_valid(&value)?;

    let type_name = value
        .get("_type")
        .and_then(|t| t.as_str())
        .unwrap_or_default();
    let title = value
        .get("title")
        .and_then(|t| t.as_str())
        .unwrap_or_default();
    Ok(format!("{type_name} '{title}' is valid"))
}

/// List deep-link URLs for every level-3 heading, one per line.
pub fn cmd_anchors(config: &Config, path: &Path, document_path: &str) -> AppResult<String> {
    let document = Document::from_value(load_json(path)?)?;
    let lines: Vec<String> = document
        .anchors()
        .iter()
        .map(|a| {
            format!(
                "{}\t{}",
                config.deep_link(document_path, &a.fragment()),
                a.text
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Registered document types as pretty JSON.
pub fn cmd_schema(registry: &SchemaRegistry) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&registry.definitions())?)
}
