//! Document stores
//!
//! A store maps a [`DocumentId`] to a parsed [`Document`]. Opening is the
//! only blocking operation in the configuration layer.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::document::Document;
use crate::error::DocumentError;
use crate::{BUILD_DIR, CONFIG_SUFFIX, SCHEMA_SUFFIX};

/// Identifies a document within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum DocumentId {
    /// Shared or compiled config (`<name>.yaml`)
    Config(String),
    /// Schema document (`<id>.schema.yaml`)
    Schema(String),
    /// User customization layer (`<name>.yaml` in the user data dir only)
    User(String),
}

impl DocumentId {
    pub fn config(name: impl Into<String>) -> Self {
        DocumentId::Config(name.into())
    }

    pub fn schema(id: impl Into<String>) -> Self {
        DocumentId::Schema(id.into())
    }

    pub fn user(name: impl Into<String>) -> Self {
        DocumentId::User(name.into())
    }

    /// File name of this document.
    pub fn file_name(&self) -> String {
        match self {
            DocumentId::Config(name) | DocumentId::User(name) => format!("{}{}", name, CONFIG_SUFFIX),
            DocumentId::Schema(id) => format!("{}{}", id, SCHEMA_SUFFIX),
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Config(name) => write!(f, "config:{}", name),
            DocumentId::Schema(id) => write!(f, "schema:{}", id),
            DocumentId::User(name) => write!(f, "user:{}", name),
        }
    }
}

/// Supplier of documents.
pub trait DocumentStore {
    /// Load and parse the document named by `id`.
    fn open(&self, id: &DocumentId) -> Result<Document, DocumentError>;
}

/// Store backed by the user and shared data directories.
///
/// Config and schema documents are looked up in `<user>/build`, then
/// `<user>`, then `<shared>`; user documents only in `<user>`.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    user_data_dir: PathBuf,
    shared_data_dir: PathBuf,
}

impl FileDocumentStore {
    pub fn new(user_data_dir: impl Into<PathBuf>, shared_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_data_dir: user_data_dir.into(),
            shared_data_dir: shared_data_dir.into(),
        }
    }

    pub fn user_data_dir(&self) -> &Path {
        &self.user_data_dir
    }

    pub fn shared_data_dir(&self) -> &Path {
        &self.shared_data_dir
    }

    /// Candidate file paths for `id`, in lookup order.
    pub fn candidates(&self, id: &DocumentId) -> Vec<PathBuf> {
        let file_name = id.file_name();
        match id {
            DocumentId::User(_) => vec![self.user_data_dir.join(&file_name)],
            DocumentId::Config(_) | DocumentId::Schema(_) => vec![
                self.user_data_dir.join(BUILD_DIR).join(&file_name),
                self.user_data_dir.join(&file_name),
                self.shared_data_dir.join(&file_name),
            ],
        }
    }
}

impl DocumentStore for FileDocumentStore {
    fn open(&self, id: &DocumentId) -> Result<Document, DocumentError> {
        for candidate in self.candidates(id) {
            match fs::read(&candidate) {
                Ok(bytes) => {
                    debug!(document = %id, path = %candidate.display(), "loading document");
                    let path = candidate.to_string_lossy().to_string();
                    return Document::parse(id.clone(), &bytes, Some(path));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(DocumentError::Io {
                        path: candidate,
                        error: e.to_string(),
                    })
                }
            }
        }
        Err(DocumentError::NotFound(id.to_string()))
    }
}

/// In-memory store holding YAML text per document id.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: HashMap<DocumentId, String>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a document.
    pub fn insert(&mut self, id: DocumentId, yaml: impl Into<String>) {
        self.documents.insert(id, yaml.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, id: DocumentId, yaml: impl Into<String>) -> Self {
        self.insert(id, yaml);
        self
    }

    pub fn remove(&mut self, id: &DocumentId) {
        self.documents.remove(id);
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn open(&self, id: &DocumentId) -> Result<Document, DocumentError> {
        let yaml = self
            .documents
            .get(id)
            .ok_or_else(|| DocumentError::NotFound(id.to_string()))?;
        Document::parse(id.clone(), yaml.as_bytes(), None)
    }
}
