//! Application error types.

use std::path::PathBuf;

use thiserror::Error;

/// Application errors.
///
/// Rendering never fails; these cover reading documents and checking them
/// against the schema.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown document type '{0}'")]
    UnknownDocumentType(String),

    #[error("document failed validation: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
