//! # Field Flattening
//!
//! Reduces a nested value to `(path, leaf)` pairs with dot-joined paths.
//! Array elements flatten under their numeric index. `Undefined` leaves are
//! skipped entirely — this is what lets an obfuscated array keep its shape
//! while its cleared slots drop out of the digest.
//!
//! A nested empty object or array is itself a leaf: `{a: {}}` flattens to the
//! single pair `("a", {})`.
//!
//! Object keys must not contain the separator `.`; a key like `"foo.bar"`
//! would collide with the path of a nested `foo → bar` field, so flattening
//! aborts with a [`CanonicalizationError`].

use crate::error::CanonicalizationError;
use crate::value::Value;

/// The character joining path segments.
pub const PATH_SEPARATOR: char = '.';

/// Flatten `data` into `(path, leaf)` pairs in traversal (insertion) order.
///
/// # Errors
///
/// Returns [`CanonicalizationError::SeparatorInKey`] if any object key
/// contains `.`.
pub fn flatten(data: &Value) -> Result<Vec<(String, Value)>, CanonicalizationError> {
    let mut out = Vec::new();
    walk(data, None, &mut out)?;
    Ok(out)
}

fn walk(
    value: &Value,
    path: Option<&str>,
    out: &mut Vec<(String, Value)>,
) -> Result<(), CanonicalizationError> {
    match value {
        Value::Undefined => Ok(()),
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                if key.contains(PATH_SEPARATOR) {
                    return Err(CanonicalizationError::SeparatorInKey(key.clone()));
                }
                let child_path = join(path, key);
                walk(child, Some(child_path.as_str()), out)?;
            }
            Ok(())
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                let child_path = join(path, &index.to_string());
                walk(child, Some(child_path.as_str()), out)?;
            }
            Ok(())
        }
        leaf => {
            // Primitives and nested empty containers are leaves. A bare
            // empty container at the root flattens to nothing.
            if let Some(p) = path {
                out.push((p.to_string(), leaf.clone()));
            }
            Ok(())
        }
    }
}

fn join(path: Option<&str>, segment: &str) -> String {
    match path {
        Some(p) => format!("{p}{PATH_SEPARATOR}{segment}"),
        None => segment.to_string(),
    }
}
