//! Per-application options
//!
//! `app_options/<app id>` holds small overrides keyed by the host
//! application (e.g. `ascii_mode`, `inline`, `inline_offset`). A snapshot is
//! read once and never changes; absent keys read as zero values.

use std::collections::BTreeMap;

use rime_document::{ConfigValue, Scalar, ScalarKind};
use serde::Serialize;
use tracing::trace;

use super::store::ConfigStore;

/// Root map of per-application options.
pub const APP_OPTIONS_ROOT: &str = "app_options";

/// A stored application option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AppOptionValue {
    Bool(bool),
    Int(i64),
    Double(f64),
}

/// Immutable options for one application.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppOptions {
    app_id: String,
    options: BTreeMap<String, AppOptionValue>,
}

impl AppOptions {
    pub fn new(app_id: impl Into<String>, options: BTreeMap<String, AppOptionValue>) -> Self {
        Self {
            app_id: app_id.into(),
            options,
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn get(&self, option: &str) -> Option<AppOptionValue> {
        self.options.get(option).copied()
    }

    /// Nonzero numbers count as true.
    pub fn bool_value(&self, option: &str) -> bool {
        match self.get(option) {
            Some(AppOptionValue::Bool(b)) => b,
            Some(AppOptionValue::Int(i)) => i != 0,
            Some(AppOptionValue::Double(d)) => d != 0.0,
            None => false,
        }
    }

    /// Doubles truncate toward zero.
    pub fn int_value(&self, option: &str) -> i64 {
        match self.get(option) {
            Some(AppOptionValue::Bool(b)) => i64::from(b),
            Some(AppOptionValue::Int(i)) => i,
            Some(AppOptionValue::Double(d)) => d.trunc() as i64,
            None => 0,
        }
    }

    pub fn double_value(&self, option: &str) -> f64 {
        match self.get(option) {
            Some(AppOptionValue::Bool(b)) => f64::from(u8::from(b)),
            Some(AppOptionValue::Int(i)) => i as f64,
            Some(AppOptionValue::Double(d)) => d,
            None => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, AppOptionValue)> {
        self.options.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl ConfigStore {
    /// Snapshot the options declared for `app_id`.
    ///
    /// Bool, int and double leaves are kept; anything else is skipped.
    pub fn app_options(&self, app_id: &str) -> AppOptions {
        let root = format!("{}/{}", APP_OPTIONS_ROOT, app_id);
        let Some(map) = self
            .document()
            .and_then(|doc| doc.get(&root))
            .and_then(ConfigValue::as_map)
        else {
            return AppOptions::new(app_id, BTreeMap::new());
        };

        let options = map
            .iter()
            .filter_map(|(key, value)| {
                let value = match value.as_scalar().map(Scalar::kind) {
                    Some(ScalarKind::Bool(b)) => AppOptionValue::Bool(b),
                    Some(ScalarKind::Int(i)) => AppOptionValue::Int(i),
                    Some(ScalarKind::Double(d)) => AppOptionValue::Double(d),
                    _ => {
                        trace!(app_id, key = %key, kind = value.type_name(), "skipping app option");
                        return None;
                    }
                };
                Some((key.clone(), value))
            })
            .collect();

        AppOptions::new(app_id, options)
    }
}
