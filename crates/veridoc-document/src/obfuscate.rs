//! # Obfuscation Transform
//!
//! Digest-preserving redaction. For each selected dot-path the addressed
//! value's pair hashes move into the obfuscation record, then the slot is
//! cleared: object keys are removed, array slots become `Undefined` holes so
//! that sibling indices keep their paths.
//!
//! Every transform here is pure — inputs are never mutated.

use veridoc_core::error::CanonicalizationError;
use veridoc_core::{flatten, hash_pair, Value};

use crate::document::{Document, Privacy};

/// Redact `fields` from `data`.
///
/// Returns the redacted copy and the hex pair hashes of everything removed,
/// in field order. A path addressing a subtree contributes one hash per leaf
/// under it, each keyed by its full dotted path. Paths that address nothing
/// contribute nothing.
///
/// # Errors
///
/// Returns a [`CanonicalizationError`] if a selected subtree contains a key
/// with the path separator.
pub fn obfuscate_data(
    data: &Value,
    fields: &[&str],
) -> Result<(Value, Vec<String>), CanonicalizationError> {
    let mut hashes = Vec::new();
    for field in fields {
        let Some(target) = select(data, field) else {
            continue;
        };
        match target {
            // An already-cleared slot has nothing left to commit.
            Value::Undefined => {}
            Value::Object(map) if !map.is_empty() => {
                hash_subtree(field, target, &mut hashes)?;
            }
            Value::Array(items) if !items.is_empty() => {
                hash_subtree(field, target, &mut hashes)?;
            }
            leaf => hashes.push(hash_pair(field, leaf)?),
        }
    }

    let mut redacted = data.clone();
    for field in fields {
        unset(&mut redacted, field);
    }
    Ok((redacted, hashes))
}

fn hash_subtree(
    prefix: &str,
    subtree: &Value,
    hashes: &mut Vec<String>,
) -> Result<(), CanonicalizationError> {
    for (relative, leaf) in flatten(subtree)? {
        hashes.push(hash_pair(&format!("{prefix}.{relative}"), &leaf)?);
    }
    Ok(())
}

/// Redact `fields` from a wrapped document.
///
/// Returns a new document with `data` replaced and the new hashes appended
/// to `privacy.obfuscatedData`. Repeated calls are associative: obfuscating
/// `{A}` then `{B}` equals obfuscating `{A, B}` at once.
///
/// # Errors
///
/// Propagates [`CanonicalizationError`] from [`obfuscate_data`].
pub fn obfuscate_document(
    document: &Document,
    fields: &[&str],
) -> Result<Document, CanonicalizationError> {
    let (data, new_hashes) = obfuscate_data(&document.data, fields)?;
    let mut obfuscated_data = document.obfuscated_data().to_vec();
    obfuscated_data.extend(new_hashes);

    Ok(Document {
        data,
        privacy: Some(Privacy { obfuscated_data }),
        ..document.clone()
    })
}

fn select<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn unset(data: &mut Value, path: &str) {
    let mut segments = path.split('.').peekable();
    let mut current = data;
    while let Some(segment) = segments.next() {
        let last = segments.peek().is_none();
        match current {
            Value::Object(map) => {
                if last {
                    map.shift_remove(segment);
                    return;
                }
                match map.get_mut(segment) {
                    Some(child) => current = child,
                    None => return,
                }
            }
            Value::Array(items) => {
                let Ok(index) = segment.parse::<usize>() else {
                    return;
                };
                if last {
                    if let Some(slot) = items.get_mut(index) {
                        *slot = Value::Undefined;
                    }
                    return;
                }
                match items.get_mut(index) {
                    Some(child) => current = child,
                    None => return,
                }
            }
            _ => return,
        }
    }
}
