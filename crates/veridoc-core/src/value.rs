//! # Structured Value Model
//!
//! `Value` is the tagged union all document transforms operate on. It mirrors
//! the dynamic value tree of the wire format with one addition: an explicit
//! `Undefined` variant.
//!
//! `Undefined` is what obfuscation leaves behind in an array slot. It must be
//! distinct from `Null`: a present null is a committed field value and is
//! hashed, while an undefined slot is a hole — skipped by flattening but
//! still occupying its index so that sibling paths stay stable.
//!
//! ## Serialization
//!
//! Serialization follows `JSON.stringify` semantics so that pair hashing is
//! bit-compatible with the wire format:
//!
//! - object entries whose value is `Undefined` are omitted;
//! - array elements that are `Undefined` serialize as `null`;
//! - object key order is insertion order, never re-sorted;
//! - output is minified (callers use `serde_json::to_string`).

use indexmap::IndexMap;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub use serde_json::Number;

/// A structured document value: primitives, sequences, and string-keyed
/// mappings, plus the `Undefined` hole marker.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A present JSON null.
    Null,
    /// An absent slot. Skipped by flattening; omitted from serialized
    /// objects; rendered `null` inside serialized arrays.
    Undefined,
    /// A boolean.
    Bool(bool),
    /// An integer or finite float, with its JSON representation preserved.
    Number(Number),
    /// A UTF-8 string.
    String(String),
    /// An ordered sequence. Slots may be `Undefined` after obfuscation.
    Array(Vec<Value>),
    /// A mapping with insertion-order-preserving keys.
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Returns true for the five primitive kinds (everything that is not a
    /// sequence or mapping).
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Returns true for the `Undefined` hole marker.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// The kind name used in error messages and typed-string tags.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // A directly serialized hole degrades to null, like
            // JSON.stringify of a top-level or array-nested undefined.
            Value::Null | Value::Undefined => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(None)?;
                for (k, v) in map {
                    if v.is_undefined() {
                        continue;
                    }
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a structured document value")
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Number(n.into()))
    }

    fn visit_u64<E>(self, n: u64) -> Result<Value, E> {
        Ok(Value::Number(n.into()))
    }

    fn visit_f64<E: serde::de::Error>(self, n: f64) -> Result<Value, E> {
        match Number::from_f64(n) {
            Some(num) => Ok(Value::Number(num)),
            None => Err(E::custom("non-finite numbers are not representable")),
        }
    }

    fn visit_str<E>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_string()))
    }

    fn visit_string<E>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = IndexMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&Value> for serde_json::Value {
    /// Lossy projection onto plain JSON: holes in objects are dropped and
    /// holes in arrays become nulls, matching the serialized form.
    fn from(value: &Value) -> Self {
        match value {
            Value::Null | Value::Undefined => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .filter(|(_, v)| !v.is_undefined())
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_primitives_like_json_stringify() {
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Value::Bool(true)).unwrap(), "true");
        assert_eq!(
            serde_json::to_string(&Value::String("x".into())).unwrap(),
            "\"x\""
        );
        assert_eq!(
            serde_json::to_string(&Value::Number(5.into())).unwrap(),
            "5"
        );
    }

    #[test]
    fn undefined_object_entries_are_omitted() {
        let mut map = IndexMap::new();
        map.insert("a".to_string(), Value::Undefined);
        map.insert("b".to_string(), Value::String("kept".into()));
        let value = Value::Object(map);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"b":"kept"}"#);
    }

    #[test]
    fn undefined_array_slots_serialize_as_null() {
        let value = Value::Array(vec![
            Value::Undefined,
            Value::String("kept".into()),
            Value::Undefined,
        ]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[null,"kept",null]"#);
    }

    #[test]
    fn object_key_order_is_preserved() {
        let value = Value::from(json!({"z": 1, "a": 2, "m": 3}));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"z":1,"a":2,"m":3}"#
        );
    }

    #[test]
    fn round_trips_through_json_text() {
        let value = Value::from(json!({
            "s": "text",
            "n": 42,
            "f": 3.25,
            "b": false,
            "nil": null,
            "arr": [1, "two", null],
            "obj": {"inner": true}
        }));
        let text = serde_json::to_string(&value).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn null_and_undefined_are_distinct() {
        assert_ne!(Value::Null, Value::Undefined);
        assert!(Value::Undefined.is_undefined());
        assert!(!Value::Null.is_undefined());
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind(), "null");
        assert_eq!(Value::Undefined.kind(), "undefined");
        assert_eq!(Value::Bool(false).kind(), "boolean");
        assert_eq!(Value::Number(1.into()).kind(), "number");
        assert_eq!(Value::String(String::new()).kind(), "string");
        assert_eq!(Value::Array(vec![]).kind(), "array");
        assert_eq!(Value::Object(IndexMap::new()).kind(), "object");
    }
}
