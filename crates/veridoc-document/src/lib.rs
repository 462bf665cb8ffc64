//! # veridoc-document — Verifiable Document Envelope
//!
//! Ties the salt codec, digest algorithm, and Merkle engine together into
//! tamper-evident documents with field-level selective disclosure:
//!
//! - **Wrap** salts every primitive, commits to the salted data with a
//!   Keccak-256 digest, and records the digest as `targetHash`. Batched
//!   documents additionally share one Merkle root with per-document
//!   inclusion proofs.
//! - **Obfuscate** redacts fields after the fact while keeping the original
//!   digest stable: the removed fields' pair hashes move into
//!   `privacy.obfuscatedData`.
//! - **Verify** recomputes the digest and checks the inclusion proof,
//!   failing closed on any malformed input.
//!
//! ## Crate Policy
//!
//! - All transforms are pure: inputs are never mutated, outputs are new
//!   values.
//! - No `unsafe`; no `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod obfuscate;
pub mod salt;
pub mod verify;
pub mod wrap;

pub use document::{Document, Privacy, Signature, PROOF_TYPE, SCHEMA_V2};
pub use obfuscate::{obfuscate_data, obfuscate_document};
pub use salt::{get_data, salt_data, salt_data_with, unsalt_data};
pub use verify::verify;
pub use wrap::{wrap_document, wrap_documents, WrapOptions};
