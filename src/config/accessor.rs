//! Typed reads over an open document
//!
//! Every read goes through one generic path: a [`Query`] (primary path plus
//! optional alias), a target type implementing [`FromConfig`], and a choice
//! between the optional form (`Option<T>`) and the required form (`T`'s
//! zero value when absent). Lookups never leave the current document.

use std::borrow::Cow;
use std::path::Path;

use rime_document::path::replace_last_component;
use rime_document::Document;

use super::color::{Color, ColorSpace};
use super::image::ImageRef;

/// A primary path with an optional alias.
///
/// The alias replaces the last component of the primary path, so
/// `Query::new("style/font_point").alias("font_size")` falls back to
/// `style/font_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query<'a> {
    path: &'a str,
    alias: Option<&'a str>,
}

impl<'a> Query<'a> {
    pub fn new(path: &'a str) -> Self {
        Self { path, alias: None }
    }

    pub fn alias(mut self, alias: &'a str) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    /// The alias expanded to a full path.
    pub fn alias_path(&self) -> Option<String> {
        self.alias.map(|alias| replace_last_component(self.path, alias))
    }

    /// Paths to try, in order.
    pub fn candidates(&self) -> impl Iterator<Item = Cow<'a, str>> {
        std::iter::once(Cow::Borrowed(self.path)).chain(self.alias_path().map(Cow::Owned))
    }
}

impl<'a> From<&'a str> for Query<'a> {
    fn from(path: &'a str) -> Self {
        Query::new(path)
    }
}

impl<'a> From<&'a String> for Query<'a> {
    fn from(path: &'a String) -> Self {
        Query::new(path)
    }
}

/// What a typed read may consult besides the document.
#[derive(Debug, Clone, Copy)]
pub struct ReadContext<'a> {
    pub document: &'a Document,
    pub color_space: ColorSpace,
    pub user_data_dir: &'a Path,
}

/// Types that can be read from a single document path.
///
/// Implementations return `None` when the node is missing or has the wrong
/// shape; they never fail otherwise.
pub trait FromConfig: Sized {
    fn from_config(ctx: &ReadContext<'_>, path: &str) -> Option<Self>;
}

impl FromConfig for bool {
    fn from_config(ctx: &ReadContext<'_>, path: &str) -> Option<Self> {
        ctx.document.get_bool(path)
    }
}

impl FromConfig for i64 {
    fn from_config(ctx: &ReadContext<'_>, path: &str) -> Option<Self> {
        ctx.document.get_int(path)
    }
}

impl FromConfig for f64 {
    fn from_config(ctx: &ReadContext<'_>, path: &str) -> Option<Self> {
        ctx.document.get_double(path)
    }
}

impl FromConfig for String {
    fn from_config(ctx: &ReadContext<'_>, path: &str) -> Option<Self> {
        ctx.document.get_string(path).map(|s| s.trim().to_string())
    }
}

impl FromConfig for Color {
    fn from_config(ctx: &ReadContext<'_>, path: &str) -> Option<Self> {
        ctx.document
            .get_string(path)
            .and_then(|literal| Color::parse(literal, ctx.color_space))
    }
}

impl FromConfig for ImageRef {
    fn from_config(ctx: &ReadContext<'_>, path: &str) -> Option<Self> {
        ctx.document
            .get_string(path)
            .and_then(|file| ImageRef::resolve(file, ctx.user_data_dir))
    }
}

/// Scalar items of a list as text; nested lists and maps are skipped.
impl FromConfig for Vec<String> {
    fn from_config(ctx: &ReadContext<'_>, path: &str) -> Option<Self> {
        if !ctx.document.is_list(path) {
            return None;
        }
        Some(
            ctx.document
                .list_items(path)
                .iter()
                .filter_map(|item| item.as_str())
                .map(|s| s.trim().to_string())
                .collect(),
        )
    }
}

/// Resolve `query` for `T`: the primary path first, then the alias.
pub fn resolve<T: FromConfig>(ctx: &ReadContext<'_>, query: &Query<'_>) -> Option<T> {
    query
        .candidates()
        .find_map(|path| T::from_config(ctx, &path))
}
