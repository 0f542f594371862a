//! Configuration documents and typed reads
//!
//! A [`ConfigStore`] holds one open document (base, schema, or user layer).
//! Reads go through a single generic accessor:
//! - optional: `get::<T>(query)` returns `None` when absent
//! - required: `get_or_default::<T>(query)` returns the zero value
//! - constrained: `get_constrained(query, f)` threads doubles through `f`
//!
//! Documents are never merged implicitly; [`Layered`] chains two stores
//! when a caller wants schema-then-base resolution.

mod accessor;
mod app_options;
mod color;
mod image;
mod layered;
mod store;

pub use accessor::{resolve, FromConfig, Query, ReadContext};
pub use app_options::{AppOptionValue, AppOptions, APP_OPTIONS_ROOT};
pub use color::{Color, ColorSpace};
pub use image::ImageRef;
pub use layered::Layered;
pub use store::{ConfigError, ConfigStore};
