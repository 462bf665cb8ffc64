//! # Salt Codec
//!
//! Every primitive leaf of a document is wrapped into a type-tagged,
//! randomized string before digesting:
//!
//! ```text
//! <uuid-v4>:<type>:<value>
//! ```
//!
//! The 36-character UUID plus the following `:` form a fixed 37-byte prefix.
//! The salt gives each field hash enough entropy that low-entropy plaintext
//! values cannot be brute-forced from their published hashes.
//!
//! Decoding is the inverse map: strings matching the grammar decode back to
//! the typed primitive; strings without any `:` pass through unchanged. A
//! plain string that does contain a `:` is indistinguishable from a salted
//! value, so feeding unsalted data with such strings through [`unsalt_data`]
//! is lossy — a known ambiguity of the grammar.

use uuid::Uuid;
use veridoc_core::error::DecodingError;
use veridoc_core::Value;

use crate::document::Document;

/// Byte length of the `<uuid-v4>:` prefix on a salted string.
pub const SALT_PREFIX_LEN: usize = 37;

/// Encode a primitive as its type-tagged string, without a salt.
///
/// # Errors
///
/// Returns [`DecodingError::NotAPrimitive`] for sequences and mappings.
pub fn primitive_to_typed_string(value: &Value) -> Result<String, DecodingError> {
    match value {
        Value::Null => Ok("null:null".to_string()),
        Value::Undefined => Ok("undefined:undefined".to_string()),
        Value::Bool(b) => Ok(format!("boolean:{b}")),
        Value::Number(n) => Ok(format!("number:{n}")),
        Value::String(s) => Ok(format!("string:{s}")),
        other => Err(DecodingError::NotAPrimitive(other.kind().to_string())),
    }
}

/// Decode a type-tagged string back to its primitive.
///
/// A string without any `:` is returned unchanged as a plain string.
///
/// # Errors
///
/// Returns [`DecodingError::UnknownTypeTag`] for an unrecognized tag and
/// [`DecodingError::MalformedNumber`] for an unparseable `number:` payload.
pub fn typed_string_to_primitive(input: &str) -> Result<Value, DecodingError> {
    let Some((tag, value)) = input.split_once(':') else {
        return Ok(Value::String(input.to_string()));
    };
    match tag {
        "number" => parse_number(value),
        "string" => Ok(Value::String(value.to_string())),
        "boolean" => Ok(Value::Bool(value == "true")),
        "null" => Ok(Value::Null),
        "undefined" => Ok(Value::Undefined),
        _ => Err(DecodingError::UnknownTypeTag {
            tag: tag.to_string(),
            input: input.to_string(),
        }),
    }
}

fn parse_number(value: &str) -> Result<Value, DecodingError> {
    if let Ok(n) = value.parse::<i64>() {
        return Ok(Value::Number(n.into()));
    }
    if let Ok(n) = value.parse::<u64>() {
        return Ok(Value::Number(n.into()));
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| DecodingError::MalformedNumber(value.to_string()))
}

/// Decode one salted string. Strings without any `:` pass through unchanged.
pub fn unsalt(value: &str) -> Result<Value, DecodingError> {
    if !value.contains(':') {
        return Ok(Value::String(value.to_string()));
    }
    let rest = value.get(SALT_PREFIX_LEN..).unwrap_or("");
    typed_string_to_primitive(rest)
}

/// Salt every primitive leaf of `data` with a fresh random UUID-v4.
///
/// The structure is rebuilt recursively with key order preserved; only the
/// salts are non-deterministic.
pub fn salt_data(data: &Value) -> Value {
    salt_data_with(data, &mut Uuid::new_v4)
}

/// Salt every primitive leaf using an explicit UUID source.
///
/// This is the deterministic seam for tests; production callers use
/// [`salt_data`].
pub fn salt_data_with<F>(data: &Value, uuid_source: &mut F) -> Value
where
    F: FnMut() -> Uuid,
{
    match data {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| salt_data_with(item, uuid_source))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), salt_data_with(v, uuid_source)))
                .collect(),
        ),
        leaf => salt_leaf(leaf, uuid_source()),
    }
}

fn salt_leaf(leaf: &Value, uuid: Uuid) -> Value {
    let typed = match leaf {
        Value::Null => "null:null".to_string(),
        Value::Undefined => "undefined:undefined".to_string(),
        Value::Bool(b) => format!("boolean:{b}"),
        Value::Number(n) => format!("number:{n}"),
        Value::String(s) => format!("string:{s}"),
        // Containers are handled by the callers; kept total.
        Value::Array(_) | Value::Object(_) => return leaf.clone(),
    };
    Value::String(format!("{uuid}:{typed}"))
}

/// Decode every salted string leaf of `data` back to its primitive.
///
/// Non-string leaves pass through unchanged.
///
/// # Errors
///
/// Propagates [`DecodingError`] for malformed salted strings.
pub fn unsalt_data(data: &Value) -> Result<Value, DecodingError> {
    match data {
        Value::Array(items) => Ok(Value::Array(
            items.iter().map(unsalt_data).collect::<Result<_, _>>()?,
        )),
        Value::Object(map) => Ok(Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), unsalt_data(v)?)))
                .collect::<Result<_, DecodingError>>()?,
        )),
        Value::String(s) => unsalt(s),
        leaf => Ok(leaf.clone()),
    }
}

/// Read back the true data of a wrapped document by unsalting `data`.
pub fn get_data(document: &Document) -> Result<Value, DecodingError> {
    unsalt_data(&document.data)
}
