//! # Digest Algorithm — Keccak-256 Field Commitments
//!
//! The commitment pipeline: flatten the data into `(path, leaf)` pairs, hash
//! each pair as `Keccak256(JSON({path: value}))`, merge with any hashes
//! already recorded for obfuscated fields, sort the hex strings, and take
//! Keccak-256 of the JSON array of the sorted list.
//!
//! Because the final step sorts the combined hash strings, the digest is
//! independent of field insertion order and of whether a field is currently
//! visible or obfuscated — the sorted list contains the same multiset of
//! strings either way. This is the property selective redaction relies on.
//!
//! The hash is Keccak-256 (the original Keccak padding, as used by Ethereum),
//! not NIST SHA3-256.

use indexmap::IndexMap;
use sha3::{Digest, Keccak256};

use crate::error::{CanonicalizationError, CryptoError};
use crate::flatten::flatten;
use crate::value::Value;

/// A 32-byte hash value with byte-wise ordering and a lowercase hex codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash32([u8; 32]);

impl Hash32 {
    /// Wrap raw 32 bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Decode a 64-character hex string.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidHash`] if the input is not exactly
    /// 32 bytes of hex.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s).map_err(|_| CryptoError::InvalidHash(s.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidHash(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// Render as 64 lowercase hex characters, no prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Hash32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute Keccak-256 over raw bytes.
pub fn keccak256(bytes: &[u8]) -> Hash32 {
    let mut hasher = Keccak256::new();
    hasher.update(bytes);
    Hash32(hasher.finalize().into())
}

/// Hash one flattened field: `Keccak256(JSON({path: value}))`, hex-encoded.
///
/// The single-entry object serializes minified with the path as its only key,
/// so the byte sequence is identical across implementations without any key
/// sorting.
pub fn hash_pair(path: &str, value: &Value) -> Result<String, CanonicalizationError> {
    let mut entry = IndexMap::with_capacity(1);
    entry.insert(path.to_string(), value.clone());
    let json = serde_json::to_string(&Value::Object(entry))?;
    Ok(keccak256(json.as_bytes()).to_hex())
}

/// Flatten `data` and hash each `(path, leaf)` pair, in traversal order.
///
/// # Errors
///
/// Propagates [`CanonicalizationError::SeparatorInKey`] from flattening.
pub fn flatten_hash_array(data: &Value) -> Result<Vec<String>, CanonicalizationError> {
    flatten(data)?
        .iter()
        .map(|(path, leaf)| hash_pair(path, leaf))
        .collect()
}

/// Compute the combined digest over visible fields and previously obfuscated
/// field hashes.
///
/// `obfuscated` entries come first, visible-field hashes are appended, the
/// combined list is sorted lexicographically, and the digest is Keccak-256 of
/// its JSON serialization.
pub fn digest_data(data: &Value, obfuscated: &[String]) -> Result<String, CanonicalizationError> {
    let mut combined = obfuscated.to_vec();
    combined.extend(flatten_hash_array(data)?);
    combined.sort();
    let json = serde_json::to_string(&combined)?;
    Ok(keccak256(json.as_bytes()).to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_data() -> Value {
        Value::from(json!({
            "key1": "value1",
            "key2": {
                "key2-1": "value2-1",
                "key2-2": "value2-2",
                "key2-3": ["value2-3-1", "value2-3-2", "value2-3-3"]
            },
            "key3": ["value3-1", "value3-2"]
        }))
    }

    const FULL_HASHES: [&str; 8] = [
        "1549a7b5fac4126fa0fbdea8c156930790691317e30400feb76c0f5cec06b396",
        "bfde44f29cc03f4111c0e0dd5c9551705e9cfb03054e26e01f53c6dabff7aead",
        "877b54b204a759620fd386e531d9a017655377f3645117665409da3c7ff5a61a",
        "1cbeb0dc59c8e303b23bcfd5275211531348da401d971e120c0dded6fbc48c75",
        "433691731088b4455fb31dee9b75fed687fb3acf9886c1359e01d3df3d059990",
        "b75b6e1b511cae653f4bf5a8981e300a53b5e797f8de9ce0f4521d64d28a3e4e",
        "f290dec8eba6913285b09f712ea38e39da8ffdf1de9bf305b90d3b77ae77be96",
        "83cae3b56a3b5b874ddf7d9e237f8527791bde5459bd2d72529395782e6088d0",
    ];

    const FULL_DIGEST: &str = "3826fcc2b0122a3555051a29b09b8cf5a6a8c776abf5da4e966ab92dbdbd518c";

    #[test]
    fn flattens_objects_and_hashes_them_individually() {
        let hashes = flatten_hash_array(&test_data()).unwrap();
        assert_eq!(hashes, FULL_HASHES);
    }

    #[test]
    fn maintains_integrity_after_values_replaced_with_holes() {
        let data = Value::from(json!({
            "key1": "value1",
            "key2": {
                "key2-1": "value2-1",
                "key2-2": "value2-2",
                "key2-3": ["value2-3-1", null, "value2-3-3"]
            },
            "key3": [null, "value3-2"]
        }));
        // Punch the holes in as Undefined, not Null.
        let data = punch_hole(data, &["key2", "key2-3", "1"]);
        let data = punch_hole(data, &["key3", "0"]);

        let hashes = flatten_hash_array(&data).unwrap();
        assert_eq!(
            hashes,
            vec![
                FULL_HASHES[0],
                FULL_HASHES[1],
                FULL_HASHES[2],
                FULL_HASHES[3],
                FULL_HASHES[5],
                FULL_HASHES[7],
            ]
        );
    }

    fn punch_hole(mut data: Value, path: &[&str]) -> Value {
        fn walk(value: &mut Value, path: &[&str]) {
            match (value, path) {
                (Value::Object(map), [key, rest @ ..]) => {
                    if rest.is_empty() {
                        map.insert(key.to_string(), Value::Undefined);
                    } else if let Some(child) = map.get_mut(*key) {
                        walk(child, rest);
                    }
                }
                (Value::Array(items), [index, rest @ ..]) => {
                    let i: usize = index.parse().unwrap();
                    if rest.is_empty() {
                        items[i] = Value::Undefined;
                    } else {
                        walk(&mut items[i], rest);
                    }
                }
                _ => {}
            }
        }
        walk(&mut data, path);
        data
    }

    #[test]
    fn digests_fully_visible_data() {
        let digest = digest_data(&test_data(), &[]).unwrap();
        assert_eq!(digest, FULL_DIGEST);
    }

    #[test]
    fn digests_partially_obfuscated_data_to_the_same_value() {
        let data = Value::from(json!({
            "key1": "value1",
            "key2": {
                "key2-1": "value2-1",
                "key2-3": ["value2-3-1", null, "value2-3-3"]
            },
            "key3": [null, "value3-2"]
        }));
        let data = punch_hole(data, &["key2", "key2-3", "1"]);
        let data = punch_hole(data, &["key3", "0"]);
        let obfuscated = vec![
            FULL_HASHES[2].to_string(),
            FULL_HASHES[4].to_string(),
            FULL_HASHES[6].to_string(),
        ];
        let digest = digest_data(&data, &obfuscated).unwrap();
        assert_eq!(digest, FULL_DIGEST);
    }

    #[test]
    fn digests_fully_obfuscated_data_to_the_same_value() {
        let obfuscated: Vec<String> = FULL_HASHES.iter().map(|h| h.to_string()).collect();
        let digest = digest_data(&Value::from(json!({})), &obfuscated).unwrap();
        assert_eq!(digest, FULL_DIGEST);
    }

    #[test]
    fn rejects_shadowed_keys() {
        let data = Value::from(json!({"foo": {"bar": "qux"}, "foo.bar": "asd"}));
        assert!(digest_data(&data, &[]).is_err());
    }

    #[test]
    fn hash32_hex_round_trip() {
        let h = keccak256(b"hello");
        let parsed = Hash32::from_hex(&h.to_hex()).unwrap();
        assert_eq!(parsed, h);
        assert_eq!(h.to_hex().len(), 64);
    }

    #[test]
    fn hash32_rejects_bad_hex() {
        assert!(Hash32::from_hex("zz").is_err());
        assert!(Hash32::from_hex("abcd").is_err());
        assert!(Hash32::from_hex(&"0".repeat(63)).is_err());
    }

    #[test]
    fn keccak_not_sha3() {
        // Keccak-256 of the empty string, distinct from NIST SHA3-256.
        assert_eq!(
            keccak256(b"").to_hex(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }
}
