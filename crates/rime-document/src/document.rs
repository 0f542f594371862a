//! Opened configuration documents with provenance

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::DocumentError;
use crate::load::parse_yaml;
use crate::store::DocumentId;
use crate::value::ConfigValue;

/// Where a document was loaded from.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSource {
    /// File path (None for in-memory documents)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of the raw bytes
    pub digest: String,

    /// When the document was loaded
    pub loaded_at: DateTime<Utc>,
}

/// A parsed, path-addressed configuration document.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    root: ConfigValue,
    source: DocumentSource,
}

impl Document {
    /// Parse a document from raw YAML bytes.
    pub fn parse(id: DocumentId, bytes: &[u8], path: Option<String>) -> Result<Self, DocumentError> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let digest = hex::encode(hasher.finalize());

        let origin = path.clone().unwrap_or_else(|| id.to_string());
        let parsed = parse_yaml(bytes).map_err(|e| DocumentError::Parse {
            origin: origin.clone(),
            error: e.to_string(),
        })?;

        let root = match parsed {
            Some(root @ ConfigValue::Map(_)) => root,
            // An empty file parses as null
            None => ConfigValue::Map(Default::default()),
            Some(_) => return Err(DocumentError::NotAMap(origin)),
        };

        Ok(Self {
            id,
            root,
            source: DocumentSource {
                path,
                digest,
                loaded_at: Utc::now(),
            },
        })
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn source(&self) -> &DocumentSource {
        &self.source
    }

    pub fn root(&self) -> &ConfigValue {
        &self.root
    }

    /// Node at `path`, if any.
    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        self.root.lookup(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(ConfigValue::as_bool)
    }

    pub fn get_int(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(ConfigValue::as_int)
    }

    pub fn get_double(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(ConfigValue::as_double)
    }

    pub fn get_string(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(ConfigValue::as_str)
    }

    /// True if the node at `path` is a map.
    pub fn is_map(&self, path: &str) -> bool {
        self.get(path).and_then(ConfigValue::as_map).is_some()
    }

    /// True if the node at `path` is a list.
    pub fn is_list(&self, path: &str) -> bool {
        self.get(path).and_then(ConfigValue::as_list).is_some()
    }

    /// Number of items in the list at `path`; 0 for a missing or non-list node.
    pub fn list_size(&self, path: &str) -> usize {
        self.list_items(path).len()
    }

    /// Items of the list at `path`; empty for a missing or non-list node.
    pub fn list_items(&self, path: &str) -> &[ConfigValue] {
        self.get(path).and_then(ConfigValue::as_list).unwrap_or(&[])
    }

    /// Keys of the map at `path`, in sorted order.
    pub fn map_keys(&self, path: &str) -> Vec<&str> {
        self.get(path)
            .and_then(ConfigValue::as_map)
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
style:
  font_point: 16
  inline_preedit: true
  alpha: 0.9
  color_scheme: " lost_temple "
  fonts: [Avenir, PingFang SC]
"#;

    fn sample() -> Document {
        Document::parse(DocumentId::config("squirrel"), SAMPLE.as_bytes(), None).unwrap()
    }

    #[test]
    fn test_typed_reads() {
        let doc = sample();
        assert_eq!(doc.get_int("style/font_point"), Some(16));
        assert_eq!(doc.get_bool("style/inline_preedit"), Some(true));
        assert_eq!(doc.get_double("style/alpha"), Some(0.9));
        assert_eq!(doc.get_double("style/font_point"), Some(16.0));
        assert_eq!(doc.get_bool("style/font_point"), None);
        assert_eq!(doc.get_string("style/color_scheme"), Some(" lost_temple "));
    }

    #[test]
    fn test_structure_queries() {
        let doc = sample();
        assert!(doc.is_map("style"));
        assert!(!doc.is_map("style/font_point"));
        assert!(doc.is_list("style/fonts"));
        assert_eq!(doc.list_size("style/fonts"), 2);
        assert_eq!(doc.list_size("style/missing"), 0);
        assert_eq!(doc.list_size("style/font_point"), 0);
        assert_eq!(doc.map_keys("style").len(), 5);
    }

    #[test]
    fn test_unquoted_literals_read_as_text() {
        let yaml = b"style:\n  back_color: 0xff0000ff\n  font_face: 12\n  fonts: [Avenir, 12]\n";
        let doc = Document::parse(DocumentId::config("squirrel"), yaml, None).unwrap();
        assert_eq!(doc.get_string("style/back_color"), Some("0xff0000ff"));
        assert_eq!(doc.get_string("style/font_face"), Some("12"));
        assert_eq!(doc.get_int("style/font_face"), Some(12));
        let fonts: Vec<_> = doc
            .list_items("style/fonts")
            .iter()
            .filter_map(ConfigValue::as_str)
            .collect();
        assert_eq!(fonts, vec!["Avenir", "12"]);
        assert_eq!(doc.list_size("style/fonts"), fonts.len());
    }

    #[test]
    fn test_digest_recorded() {
        let doc = sample();
        assert_eq!(doc.source().digest.len(), 64);
        assert!(doc.source().path.is_none());
    }

    #[test]
    fn test_empty_document_is_empty_map() {
        let doc = Document::parse(DocumentId::config("empty"), b"", None).unwrap();
        assert!(doc.map_keys("").is_empty());
    }

    #[test]
    fn test_non_map_root_rejected() {
        let result = Document::parse(DocumentId::config("list"), b"- a\n- b\n", None);
        assert!(matches!(result, Err(DocumentError::NotAMap(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = Document::parse(DocumentId::config("bad"), b"a: [unclosed\n", None);
        assert!(matches!(result, Err(DocumentError::Parse { .. })));
    }
}
