//! Explicit two-tier lookups
//!
//! Schema documents do not inherit from the base document. Callers that
//! want "schema first, then base" say so by reading through [`Layered`].

use super::accessor::{FromConfig, Query};
use super::color::Color;
use super::image::ImageRef;
use super::store::ConfigStore;

/// A primary store consulted before a base store.
#[derive(Debug, Clone, Copy)]
pub struct Layered<'a> {
    primary: &'a ConfigStore,
    base: &'a ConfigStore,
}

impl<'a> Layered<'a> {
    pub fn new(primary: &'a ConfigStore, base: &'a ConfigStore) -> Self {
        Self { primary, base }
    }

    pub fn primary(&self) -> &'a ConfigStore {
        self.primary
    }

    pub fn base(&self) -> &'a ConfigStore {
        self.base
    }

    /// Primary (path, then alias), then base (path, then alias).
    pub fn get<'q, T: FromConfig>(&self, query: impl Into<Query<'q>>) -> Option<T> {
        let query = query.into();
        self.primary.get(query).or_else(|| self.base.get(query))
    }

    pub fn get_or_default<'q, T: FromConfig + Default>(&self, query: impl Into<Query<'q>>) -> T {
        self.get(query).unwrap_or_default()
    }

    pub fn get_constrained<'q>(
        &self,
        query: impl Into<Query<'q>>,
        constraint: impl FnOnce(f64) -> f64,
    ) -> Option<f64> {
        self.get::<f64>(query).map(constraint)
    }

    pub fn color<'q>(&self, query: impl Into<Query<'q>>) -> Option<Color> {
        self.get(query)
    }

    pub fn image<'q>(&self, query: impl Into<Query<'q>>) -> Option<ImageRef> {
        self.get(query)
    }

    /// True if either tier has a map at `path`.
    pub fn has_section(&self, path: &str) -> bool {
        self.primary.has_section(path) || self.base.has_section(path)
    }
}
