//! YAML loading that keeps scalar text
//!
//! `serde_yaml::Value` resolves plain scalars (`0x0000ff` becomes 255) and
//! drops the text they were written with. Loading therefore runs twice over
//! the same bytes: the first pass resolves structure and scalar types, the
//! second walks the events again in lockstep and reads every scalar as a
//! string, which serde_yaml hands back verbatim.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use crate::value::{ConfigValue, Scalar, ScalarKind};

/// Parse YAML bytes. `Ok(None)` means the document is null or empty.
pub fn parse_yaml(bytes: &[u8]) -> Result<Option<ConfigValue>, serde_yaml::Error> {
    let resolved: Value = serde_yaml::from_slice(bytes)?;
    if resolved.is_null() {
        return Ok(None);
    }
    Shaped(&resolved).deserialize(serde_yaml::Deserializer::from_slice(bytes))
}

/// Reads one node as the shape the first pass resolved for it.
struct Shaped<'v>(&'v Value);

impl<'de, 'v> DeserializeSeed<'de> for Shaped<'v> {
    type Value = Option<ConfigValue>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let kind = match self.0 {
            Value::Null => {
                IgnoredAny::deserialize(deserializer)?;
                return Ok(None);
            }
            Value::Bool(b) => ScalarKind::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ScalarKind::Int(i),
                // u64 beyond i64::MAX degrades to a double
                None => n.as_f64().map_or(ScalarKind::String, ScalarKind::Double),
            },
            Value::String(_) => ScalarKind::String,
            Value::Sequence(items) => return deserializer.deserialize_seq(ListVisitor(items)),
            Value::Mapping(mapping) => return deserializer.deserialize_map(MapVisitor(mapping)),
            Value::Tagged(tagged) => return Shaped(&tagged.value).deserialize(deserializer),
        };

        let text = String::deserialize(deserializer)?;
        Ok(Some(ConfigValue::Scalar(Scalar::new(text, kind))))
    }
}

struct ListVisitor<'v>(&'v [Value]);

impl<'de, 'v> Visitor<'de> for ListVisitor<'v> {
    type Value = Option<ConfigValue>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(self.0.len());
        for shape in self.0 {
            match seq.next_element_seed(Shaped(shape))? {
                Some(Some(item)) => items.push(item),
                // Null items are dropped
                Some(None) => {}
                None => break,
            }
        }
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Some(ConfigValue::List(items)))
    }
}

struct MapVisitor<'v>(&'v Mapping);

impl<'de, 'v> Visitor<'de> for MapVisitor<'v> {
    type Value = Option<ConfigValue>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = BTreeMap::new();
        for (key_shape, value_shape) in self.0 {
            let Some(key) = access.next_key_seed(Shaped(key_shape))? else {
                break;
            };
            let value = access.next_value_seed(Shaped(value_shape))?;
            // Only scalar keys address anything; null values are dropped
            if let (Some(ConfigValue::Scalar(key)), Some(value)) = (key, value) {
                map.insert(key.text().to_string(), value);
            }
        }
        while access.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Some(ConfigValue::Map(map)))
    }
}
