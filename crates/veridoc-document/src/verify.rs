//! # Verification
//!
//! `verify` fails closed and never errors: a missing signature, a digest
//! mismatch, malformed hex, or a bad inclusion proof all yield `false`.
//! Failed verification is an expected outcome, not a fault.

use veridoc_core::Hash32;
use veridoc_crypto::check_proof;

use crate::document::Document;

/// Check a wrapped document's commitment and inclusion proof.
///
/// Verified iff the recomputed digest equals `signature.targetHash` and the
/// proof folds from `targetHash` to `signature.merkleRoot`.
pub fn verify(document: &Document) -> bool {
    let Some(signature) = &document.signature else {
        return false;
    };
    let Ok(digest) = document.digest() else {
        return false;
    };
    if digest != signature.target_hash {
        return false;
    }

    let Ok(root) = Hash32::from_hex(&signature.merkle_root) else {
        return false;
    };
    let Ok(target) = Hash32::from_hex(&signature.target_hash) else {
        return false;
    };
    let mut proof = Vec::with_capacity(signature.proof.len());
    for entry in &signature.proof {
        let Ok(hash) = Hash32::from_hex(entry) else {
            return false;
        };
        proof.push(hash);
    }
    check_proof(&proof, &root, &target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Signature, PROOF_TYPE, SCHEMA_V2};
    use serde_json::json;
    use veridoc_core::Value;

    const TARGET_HASH: &str = "3826fcc2b0122a3555051a29b09b8cf5a6a8c776abf5da4e966ab92dbdbd518c";
    const MERKLE_ROOT: &str = "c16a56c5f0bf0e985f731816635fa772ca921a68848090a49cbe10c7a55d521b";
    const PROOF_0: &str = "46c732825d2111a7019929d7f21988081f88084bb05fd54ab4c1843b53cbe799";
    const PROOF_1: &str = "b1fee809d2803cbf7f63070eee763709eadca9abcaeab349b4c85a10bc48bc49";

    fn raw_data() -> Value {
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

    fn batch_signature() -> Signature {
        Signature {
            signature_type: PROOF_TYPE.to_string(),
            target_hash: TARGET_HASH.to_string(),
            proof: vec![PROOF_0.to_string(), PROOF_1.to_string()],
            merkle_root: MERKLE_ROOT.to_string(),
        }
    }

    fn document(data: Value, signature: Option<Signature>) -> Document {
        Document {
            version: SCHEMA_V2.to_string(),
            schema: Some("foo".to_string()),
            data,
            privacy: None,
            signature,
        }
    }

    #[test]
    fn verifies_a_correctly_wrapped_document() {
        assert!(verify(&document(raw_data(), Some(batch_signature()))));
    }

    #[test]
    fn rejects_documents_without_signature() {
        assert!(!verify(&document(raw_data(), None)));
    }

    #[test]
    fn rejects_altered_data() {
        let data = Value::from(json!({
            "key1": "value2",
            "key2": {
                "key2-1": "value2-1",
                "key2-2": "value2-2",
                "key2-3": ["value2-3-1", "value2-3-2", "value2-3-3"]
            },
            "key3": ["value3-1", "value3-2"]
        }));
        assert!(!verify(&document(data, Some(batch_signature()))));
    }

    #[test]
    fn rejects_additional_data() {
        let data = Value::from(json!({
            "key1": "value1",
            "key2": {
                "key2-1": "value2-1",
                "key2-2": "value2-2",
                "key2-3": ["value2-3-1", "value2-3-2", "value2-3-3"],
                "key2-4": "value2-4"
            },
            "key3": ["value3-1", "value3-2"]
        }));
        assert!(!verify(&document(data, Some(batch_signature()))));
    }

    #[test]
    fn rejects_missing_data() {
        let data = Value::from(json!({
            "key1": "value1",
            "key2": {
                "key2-2": "value2-2",
                "key2-3": ["value2-3-1", "value2-3-2", "value2-3-3"]
            },
            "key3": ["value3-1", "value3-2"]
        }));
        assert!(!verify(&document(data, Some(batch_signature()))));
    }

    #[test]
    fn rejects_an_altered_target_hash() {
        let mut signature = batch_signature();
        signature.target_hash =
            "3826fcc2b0122a3555051a29b09b8cf5a6a8c776abf5da4e966ab92dbdbd518d".to_string();
        assert!(!verify(&document(raw_data(), Some(signature))));
    }

    #[test]
    fn rejects_an_altered_proof() {
        let mut signature = batch_signature();
        signature.proof[0] =
            "46c732825d2111a7019929d7f21988081f88084bb05fd54ab4c1843b53cbe798".to_string();
        assert!(!verify(&document(raw_data(), Some(signature))));
    }

    #[test]
    fn rejects_an_altered_merkle_root() {
        let mut signature = batch_signature();
        signature.merkle_root =
            "c16a56c5f0bf0e985f731816635fa772ca921a68848090a49cbe10c7a55d521a".to_string();
        assert!(!verify(&document(raw_data(), Some(signature))));
    }

    #[test]
    fn rejects_malformed_hex() {
        let mut signature = batch_signature();
        signature.merkle_root = "not-hex".to_string();
        assert!(!verify(&document(raw_data(), Some(signature))));
    }

    #[test]
    fn rejects_undigestable_data_instead_of_erroring() {
        let data = Value::from(json!({"foo": {"bar": "qux"}, "foo.bar": "asd"}));
        assert!(!verify(&document(data, Some(batch_signature()))));
    }
}
