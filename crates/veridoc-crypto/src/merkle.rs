//! # Binary Merkle Tree
//!
//! Layer 0 holds the byte-sorted leaves. Each next layer combines adjacent
//! pairs; an unpaired trailing element is promoted unchanged. Sorting at the
//! leaf level and inside every pairwise combination makes the root invariant
//! to input and sibling ordering, so callers never need a canonical element
//! order.

use veridoc_core::error::{CanonicalizationError, CryptoError};
use veridoc_core::{keccak256, Hash32, Value};

/// Hash an arbitrary value into a 32-byte leaf: Keccak-256 of its minified
/// JSON serialization.
pub fn hash_value(value: &Value) -> Result<Hash32, CanonicalizationError> {
    let json = serde_json::to_string(value)?;
    Ok(keccak256(json.as_bytes()))
}

/// Combine two nodes: sort the pair byte-wise, concatenate, Keccak-256.
///
/// The sort-before-concatenate step is mandatory — it is what lets proof
/// verification fold siblings without tracking left/right position.
pub fn combine(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo.as_bytes());
    buf[32..].copy_from_slice(hi.as_bytes());
    keccak256(&buf)
}

/// A binary Merkle tree over 32-byte leaves.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    elements: Vec<Hash32>,
    layers: Vec<Vec<Hash32>>,
}

impl MerkleTree {
    /// Build a tree from pre-hashed leaves. The leaves are byte-sorted
    /// before layering.
    pub fn from_hashes(mut elements: Vec<Hash32>) -> Self {
        elements.sort();
        let layers = build_layers(&elements);
        Self { elements, layers }
    }

    /// Build a tree by hashing each value into a leaf first.
    ///
    /// # Errors
    ///
    /// Propagates serialization failures from [`hash_value`].
    pub fn from_values(values: &[Value]) -> Result<Self, CanonicalizationError> {
        let hashes = values.iter().map(hash_value).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_hashes(hashes))
    }

    /// The sorted leaves of layer 0.
    pub fn elements(&self) -> &[Hash32] {
        &self.elements
    }

    /// All layers, leaves first. The final layer holds the root alone.
    pub fn layers(&self) -> &[Vec<Hash32>] {
        &self.layers
    }

    /// The tree root, or `None` for a tree built over zero elements.
    pub fn root(&self) -> Option<&Hash32> {
        self.layers.last().and_then(|layer| layer.first())
    }

    /// Produce the inclusion proof for `element`: the ordered sibling list
    /// from layer 0 upwards.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::ElementNotFound`] if `element` is not a leaf
    /// of this tree.
    pub fn proof(&self, element: &Hash32) -> Result<Vec<Hash32>, CryptoError> {
        let mut index = self
            .elements
            .iter()
            .position(|e| e == element)
            .ok_or(CryptoError::ElementNotFound)?;

        let mut proof = Vec::new();
        for layer in &self.layers {
            let sibling = if index % 2 == 1 { index - 1 } else { index + 1 };
            if let Some(hash) = layer.get(sibling) {
                proof.push(*hash);
            }
            index /= 2;
        }
        Ok(proof)
    }
}

/// Check an inclusion proof by folding `element` through [`combine`] and
/// comparing the result to `root` byte-for-byte.
pub fn check_proof(proof: &[Hash32], root: &Hash32, element: &Hash32) -> bool {
    let computed = proof
        .iter()
        .fold(*element, |acc, sibling| combine(&acc, sibling));
    computed == *root
}

fn build_layers(elements: &[Hash32]) -> Vec<Vec<Hash32>> {
    if elements.is_empty() {
        return vec![Vec::new()];
    }
    let mut layers = vec![elements.to_vec()];
    while layers.last().is_some_and(|layer| layer.len() > 1) {
        let next = next_layer(&layers[layers.len() - 1]);
        layers.push(next);
    }
    layers
}

fn next_layer(layer: &[Hash32]) -> Vec<Hash32> {
    let mut next = Vec::with_capacity(layer.len().div_ceil(2));
    let mut i = 0;
    while i < layer.len() {
        match layer.get(i + 1) {
            Some(right) => next.push(combine(&layer[i], right)),
            // Odd trailing element is promoted unchanged.
            None => next.push(layer[i]),
        }
        i += 2;
    }
    next
}
