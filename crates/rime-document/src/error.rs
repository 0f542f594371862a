//! Error types for loading documents.

use std::path::PathBuf;

/// Errors raised while opening a document.
///
/// Reads against an opened document never fail; only opening does.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse {origin}: {error}")]
    Parse { origin: String, error: String },

    #[error("Document {0} does not have a mapping at its root")]
    NotAMap(String),
}
