//! Rime Switcher - configuration and option switching for a Rime front-end
//!
//! This crate resolves the front-end's layered configuration documents
//! (base, per-schema, per-user), exposes typed reads over them, and keeps a
//! validated map of option-group states and script variants that is pushed
//! to the running engine session.

pub mod config;
pub mod logging;
pub mod settings;
pub mod switcher;
pub mod sync;

pub use config::{AppOptionValue, AppOptions, Color, ColorSpace, ConfigError, ConfigStore, FromConfig, ImageRef, Layered, Query};
pub use settings::{Settings, SettingsError};
pub use switcher::{OptionGroup, OptionSwitcher, OptionValue, ScriptVariant, SwitcherError, SwitcherState};
pub use sync::SessionSync;

pub use rime_document::{Document, DocumentId, DocumentStore, FileDocumentStore, MemoryDocumentStore};
pub use rime_session::{OptionSink, OptionSource, SessionId};

/// Id of the front-end's own base document.
pub const BASE_CONFIG_ID: &str = "squirrel";
