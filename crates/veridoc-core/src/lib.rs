//! # veridoc-core — Foundational Types for Verifiable Documents
//!
//! This crate is the leaf of the veridoc workspace DAG. It defines the
//! structured value model and the digest algorithm that every other crate
//! builds on.
//!
//! ## Key Design Principles
//!
//! 1. **Explicit value model.** `Value` is a tagged union with a first-class
//!    `Undefined` variant. An obfuscated array slot is `Undefined`, never
//!    `Null` — the hole must stay distinct from a present null so that
//!    flattening can skip it while sibling indices stay stable.
//!
//! 2. **One hashing path.** Every field commitment is
//!    `Keccak256(JSON({path: value}))` over the minified, insertion-order
//!    JSON of a single-entry object, produced by [`digest::hash_pair`].
//!
//! 3. **Order independence by sorting hashes, not keys.** The combined
//!    digest sorts hex hash strings lexicographically before the final
//!    Keccak-256, so field insertion order and visibility never change the
//!    commitment.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `veridoc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod flatten;
pub mod value;

pub use digest::{digest_data, flatten_hash_array, hash_pair, keccak256, Hash32};
pub use error::{CanonicalizationError, CryptoError, DecodingError, VeridocError};
pub use flatten::flatten;
pub use value::Value;
