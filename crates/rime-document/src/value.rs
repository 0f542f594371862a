//! Tagged configuration values
//!
//! Scalars keep the exact text they were written with alongside the type
//! YAML resolved for them. Typed reads go through the tag; string reads
//! return the text, so `0x0000ff` stays a six-digit literal even though it
//! also reads as the integer 255.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::path::{ConfigPath, Segment};

/// Type YAML resolved for a scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarKind {
    Bool(bool),
    Int(i64),
    Double(f64),
    String,
}

/// A scalar leaf: its source text plus its resolved type.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar {
    text: String,
    kind: ScalarKind,
}

impl Scalar {
    pub fn new(text: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// A string scalar.
    pub fn string(text: impl Into<String>) -> Self {
        Self::new(text, ScalarKind::String)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.kind {
            ScalarKind::Bool(b) => serializer.serialize_bool(b),
            ScalarKind::Int(i) => serializer.serialize_i64(i),
            ScalarKind::Double(d) => serializer.serialize_f64(d),
            ScalarKind::String => serializer.serialize_str(&self.text),
        }
    }
}

/// A node in a configuration document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Scalar(Scalar),
    List(Vec<ConfigValue>),
    Map(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Resolve a path below this node.
    pub fn lookup(&self, path: &str) -> Option<&ConfigValue> {
        let path = ConfigPath::parse(path);
        let mut current = self;
        for segment in path.segments() {
            current = match (segment, current) {
                (Segment::Key(key), ConfigValue::Map(map)) => map.get(*key)?,
                (Segment::Index(index), ConfigValue::List(items)) => items.get(*index)?,
                (Segment::Last, ConfigValue::List(items)) => items.last()?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ConfigValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.as_scalar()?.kind {
            ScalarKind::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.as_scalar()?.kind {
            ScalarKind::Int(i) => Some(i),
            _ => None,
        }
    }

    /// Doubles, with stored integers widened.
    pub fn as_double(&self) -> Option<f64> {
        match self.as_scalar()?.kind {
            ScalarKind::Double(d) => Some(d),
            ScalarKind::Int(i) => Some(i as f64),
            _ => None,
        }
    }

    /// Source text of any scalar.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().map(Scalar::text)
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Scalar(scalar) => match scalar.kind {
                ScalarKind::Bool(_) => "bool",
                ScalarKind::Int(_) => "int",
                ScalarKind::Double(_) => "double",
                ScalarKind::String => "string",
            },
            ConfigValue::List(_) => "list",
            ConfigValue::Map(_) => "map",
        }
    }
}

impl From<Scalar> for ConfigValue {
    fn from(scalar: Scalar) -> Self {
        ConfigValue::Scalar(scalar)
    }
}
