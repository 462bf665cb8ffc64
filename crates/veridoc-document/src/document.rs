//! # Document Envelope
//!
//! The wire structure of a wrapped document:
//!
//! ```json
//! { "version": "2.0",
//!   "schema": "...",
//!   "data": { ... salted fields ... },
//!   "privacy": { "obfuscatedData": ["<hex64>", ...] },
//!   "signature": { "type": "SHA3MerkleProof", "targetHash": "<hex64>",
//!                  "proof": ["<hex64>", ...], "merkleRoot": "<hex64>" } }
//! ```
//!
//! `targetHash` and `merkleRoot` are fixed at wrap time; obfuscation only
//! replaces `data` and appends to `privacy.obfuscatedData`.

use serde::{Deserialize, Serialize};
use veridoc_core::{digest_data, CanonicalizationError, Value};

/// Schema version written into the `version` field of wrapped documents.
pub const SCHEMA_V2: &str = "2.0";

/// The signature scheme identifier: a Keccak-256 hash commitment with a
/// Merkle inclusion proof, not an asymmetric signature.
pub const PROOF_TYPE: &str = "SHA3MerkleProof";

/// A verifiable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Schema version of the envelope.
    pub version: String,

    /// Optional external schema identifier supplied at wrap time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// The salted document data.
    pub data: Value,

    /// Redaction record; present once any field has been obfuscated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<Privacy>,

    /// The hash commitment attached by wrapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Signature>,
}

/// The accumulated hashes of obfuscated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Privacy {
    /// Hex-encoded pair hashes of every field redacted so far. Appended to
    /// monotonically, never deduplicated or reordered.
    #[serde(rename = "obfuscatedData", default)]
    pub obfuscated_data: Vec<String>,
}

/// The hash commitment block of a wrapped document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// Always [`PROOF_TYPE`].
    #[serde(rename = "type")]
    pub signature_type: String,

    /// The document's own digest.
    #[serde(rename = "targetHash")]
    pub target_hash: String,

    /// Merkle inclusion proof of `targetHash` under `merkleRoot`. Empty for
    /// a single-document wrap.
    #[serde(default)]
    pub proof: Vec<String>,

    /// The shared batch root; equals `targetHash` for a single document.
    #[serde(rename = "merkleRoot")]
    pub merkle_root: String,
}

impl Document {
    /// Recompute the document digest over the currently visible fields and
    /// the recorded obfuscated hashes.
    ///
    /// # Errors
    ///
    /// Returns a [`CanonicalizationError`] if a data key contains the path
    /// separator.
    pub fn digest(&self) -> Result<String, CanonicalizationError> {
        digest_data(&self.data, self.obfuscated_data())
    }

    /// The recorded obfuscated-field hashes, or an empty slice when the
    /// document has no privacy section. Total, no failure path.
    pub fn obfuscated_data(&self) -> &[String] {
        self.privacy
            .as_ref()
            .map(|p| p.obfuscated_data.as_slice())
            .unwrap_or(&[])
    }
}
