//! # veridoc-crypto — Merkle Engine
//!
//! The binary Merkle tree used for multi-document notarization:
//!
//! - **Leaves** are 32-byte Keccak-256 hashes, byte-sorted at layer 0.
//! - **Combination** sorts each pair before concatenating and hashing, so a
//!   pair hashes identically regardless of which operand is "left".
//! - **Proofs** are ordered sibling lists from leaf to root; verification
//!   folds the element through the same combine rule as construction.
//!
//! ## Crate Policy
//!
//! - Depends only on `veridoc-core` internally.
//! - No mocking in tests — all tests use real Keccak-256.
//! - No `unsafe`; no `panic!()` or `.unwrap()` outside tests.

pub mod merkle;

pub use merkle::{check_proof, combine, hash_value, MerkleTree};
