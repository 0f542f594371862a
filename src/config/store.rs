//! Config store
//!
//! Owns at most one open document at a time. Opening replaces the current
//! document only on success; a failed open keeps whatever was loaded before.
//! Reads against a closed store return the absent/zero value for their type.

use std::sync::Arc;

use rime_document::{Document, DocumentError, DocumentId, DocumentSource, DocumentStore};
use tracing::{debug, info, warn};

use super::accessor::{resolve, FromConfig, Query, ReadContext};
use super::color::{Color, ColorSpace};
use super::image::ImageRef;
use crate::settings::Settings;
use crate::BASE_CONFIG_ID;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to open {id}: {source}")]
    Open {
        id: String,
        #[source]
        source: DocumentError,
    },
}

/// One open configuration document plus typed access to it.
pub struct ConfigStore {
    store: Arc<dyn DocumentStore>,
    settings: Settings,
    color_space: ColorSpace,
    document: Option<Document>,
    schema_id: Option<String>,
}

impl ConfigStore {
    /// Create a closed store.
    pub fn new(store: Arc<dyn DocumentStore>, settings: Settings) -> Self {
        Self {
            store,
            color_space: settings.color_space,
            settings,
            document: None,
            schema_id: None,
        }
    }

    /// Open the front-end's base document.
    pub fn open_base_config(&mut self) -> Result<(), ConfigError> {
        self.open(DocumentId::config(BASE_CONFIG_ID), None)
    }

    /// Open a schema document.
    ///
    /// Nothing is merged with the base document; use [`Layered`](super::Layered)
    /// for explicit two-tier lookups.
    pub fn open_with_schema_id(&mut self, schema_id: &str) -> Result<(), ConfigError> {
        self.open(DocumentId::schema(schema_id), Some(schema_id))
    }

    /// Open a user customization document (e.g. `user`, `installation`).
    pub fn open_user_config(&mut self, config_id: &str) -> Result<(), ConfigError> {
        self.open(DocumentId::user(config_id), None)
    }

    /// Open an arbitrary named config document (e.g. `default`).
    pub fn open_with_config_id(&mut self, config_id: &str) -> Result<(), ConfigError> {
        self.open(DocumentId::config(config_id), None)
    }

    /// Open a document by conventional name: the base id, `default`,
    /// `user`/`installation`, or otherwise a schema id.
    pub fn open_by_name(&mut self, name: &str) -> Result<(), ConfigError> {
        match name {
            BASE_CONFIG_ID => self.open_base_config(),
            "default" => self.open_with_config_id(name),
            "user" | "installation" => self.open_user_config(name),
            schema_id => self.open_with_schema_id(schema_id),
        }
    }

    fn open(&mut self, id: DocumentId, schema_id: Option<&str>) -> Result<(), ConfigError> {
        match self.store.open(&id) {
            Ok(document) => {
                info!(document = %id, digest = %document.source().digest, "opened document");
                self.document = Some(document);
                self.schema_id = schema_id.map(str::to_string);
                Ok(())
            }
            Err(source) => {
                warn!(document = %id, error = %source, "failed to open document, keeping previous state");
                Err(ConfigError::Open {
                    id: id.to_string(),
                    source,
                })
            }
        }
    }

    /// Drop the open document. Later reads return defaults.
    pub fn close(&mut self) {
        if let Some(document) = self.document.take() {
            debug!(document = %document.id(), "closed document");
        }
        self.schema_id = None;
    }

    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    /// Schema id of the open document, if it is a schema.
    pub fn schema_id(&self) -> Option<&str> {
        self.schema_id.as_deref()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.document.as_ref().map(Document::id)
    }

    pub fn source(&self) -> Option<&DocumentSource> {
        self.document.as_ref().map(Document::source)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Switch the colour space by name; unknown names are ignored.
    pub fn set_color_space(&mut self, name: &str) {
        match ColorSpace::from_name(name) {
            Some(space) => self.color_space = space,
            None => debug!(name, "ignoring unknown colour space"),
        }
    }

    fn context(&self) -> Option<ReadContext<'_>> {
        self.document.as_ref().map(|document| ReadContext {
            document,
            color_space: self.color_space,
            user_data_dir: &self.settings.user_data_dir,
        })
    }

    /// True if a map exists at `path`.
    pub fn has_section(&self, path: &str) -> bool {
        self.document.as_ref().is_some_and(|doc| doc.is_map(path))
    }

    /// Optional read: `None` when absent or of another type.
    pub fn get<'q, T: FromConfig>(&self, query: impl Into<Query<'q>>) -> Option<T> {
        let query = query.into();
        self.context().and_then(|ctx| resolve(&ctx, &query))
    }

    /// Required read: the type's zero value when absent.
    pub fn get_or_default<'q, T: FromConfig + Default>(&self, query: impl Into<Query<'q>>) -> T {
        self.get(query).unwrap_or_default()
    }

    /// Optional double passed through `constraint` when present.
    pub fn get_constrained<'q>(
        &self,
        query: impl Into<Query<'q>>,
        constraint: impl FnOnce(f64) -> f64,
    ) -> Option<f64> {
        self.get::<f64>(query).map(constraint)
    }

    /// Required double; `constraint` also sees the `0.0` default.
    pub fn get_constrained_or_default<'q>(
        &self,
        query: impl Into<Query<'q>>,
        constraint: impl FnOnce(f64) -> f64,
    ) -> f64 {
        constraint(self.get_or_default::<f64>(query))
    }

    pub fn color<'q>(&self, query: impl Into<Query<'q>>) -> Option<Color> {
        self.get(query)
    }

    pub fn image<'q>(&self, query: impl Into<Query<'q>>) -> Option<ImageRef> {
        self.get(query)
    }

    /// Scalar items of the list at `path` as text; empty when absent.
    pub fn list(&self, path: &str) -> Vec<String> {
        self.get_or_default(path)
    }

    /// Number of items in the list at `path`; 0 when absent or not a list.
    pub fn list_size(&self, path: &str) -> usize {
        self.document.as_ref().map_or(0, |doc| doc.list_size(path))
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("document", &self.document_id())
            .field("schema_id", &self.schema_id)
            .field("color_space", &self.color_space)
            .finish()
    }
}
