//! Rime configuration documents
//!
//! Path-addressed, hierarchical key/value documents as loaded from the
//! engine's YAML files. Consumers only ever query a document by path;
//! the on-disk format stays behind the [`DocumentStore`] boundary.

pub mod document;
pub mod error;
mod load;
pub mod path;
pub mod store;
pub mod value;

pub use document::{Document, DocumentSource};
pub use error::DocumentError;
pub use path::{ConfigPath, Segment};
pub use store::{DocumentId, DocumentStore, FileDocumentStore, MemoryDocumentStore};
pub use load::parse_yaml;
pub use value::{ConfigValue, Scalar, ScalarKind};

/// File suffix for plain configuration documents.
pub const CONFIG_SUFFIX: &str = ".yaml";

/// File suffix for schema documents.
pub const SCHEMA_SUFFIX: &str = ".schema.yaml";

/// Subdirectory of the user data dir holding compiled documents.
pub const BUILD_DIR: &str = "build";
