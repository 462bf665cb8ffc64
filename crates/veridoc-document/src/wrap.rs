//! # Wrap Orchestration
//!
//! Wrapping salts the caller's data, commits to it with the combined digest,
//! and attaches the signature block. A single document is its own one-leaf
//! Merkle tree: `merkleRoot == targetHash` with an empty proof. Batch
//! wrapping builds one tree over every document's `targetHash` and gives
//! each document its inclusion proof under the shared root.

use veridoc_core::error::{CanonicalizationError, VeridocError};
use veridoc_core::{Hash32, Value};
use veridoc_crypto::MerkleTree;

use crate::document::{Document, Signature, PROOF_TYPE, SCHEMA_V2};
use crate::salt::salt_data;

/// Options for wrapping.
#[derive(Debug, Clone, Default)]
pub struct WrapOptions {
    /// External schema identifier recorded in the document's `schema` field.
    pub external_schema_id: Option<String>,
}

fn create_document(data: &Value, options: &WrapOptions) -> Document {
    Document {
        version: SCHEMA_V2.to_string(),
        schema: options.external_schema_id.clone(),
        data: salt_data(data),
        privacy: None,
        signature: None,
    }
}

/// Wrap a single document: salt, digest, self-rooted signature.
///
/// # Errors
///
/// Returns a [`CanonicalizationError`] if a data key contains the path
/// separator.
pub fn wrap_document(data: &Value, options: &WrapOptions) -> Result<Document, CanonicalizationError> {
    let mut document = create_document(data, options);
    let digest = document.digest()?;
    document.signature = Some(Signature {
        signature_type: PROOF_TYPE.to_string(),
        target_hash: digest.clone(),
        proof: Vec::new(),
        merkle_root: digest,
    });
    Ok(document)
}

/// Wrap a batch of documents under one shared Merkle root.
///
/// Each document is wrapped independently with fresh salts; output order
/// matches input order. Wrapping zero documents yields an empty vec — there
/// is no meaningful root over zero leaves.
///
/// # Errors
///
/// Propagates canonicalization failures from the per-document wrap.
pub fn wrap_documents(
    data: &[Value],
    options: &WrapOptions,
) -> Result<Vec<Document>, VeridocError> {
    let mut documents = Vec::with_capacity(data.len());
    let mut leaves = Vec::with_capacity(data.len());
    for item in data {
        let document = wrap_document(item, options)?;
        if let Some(signature) = &document.signature {
            leaves.push(Hash32::from_hex(&signature.target_hash)?);
        }
        documents.push(document);
    }

    let tree = MerkleTree::from_hashes(leaves.clone());
    let Some(root) = tree.root() else {
        return Ok(documents);
    };
    let merkle_root = root.to_hex();

    for (document, leaf) in documents.iter_mut().zip(&leaves) {
        let proof = tree.proof(leaf)?;
        if let Some(signature) = &mut document.signature {
            signature.proof = proof.iter().map(Hash32::to_hex).collect();
            signature.merkle_root = merkle_root.clone();
        }
    }
    Ok(documents)
}
