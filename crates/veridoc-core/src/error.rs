//! # Error Types
//!
//! The error hierarchy for the veridoc workspace. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! Failed verification is not an error: `verify` returns `bool` and fails
//! closed, because a bad proof is an expected outcome, not a system fault.

use thiserror::Error;

/// Top-level error type for the veridoc workspace.
#[derive(Error, Debug)]
pub enum VeridocError {
    /// Canonicalization or flattening failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A salted typed string could not be decoded.
    #[error("decoding error: {0}")]
    Decoding(#[from] DecodingError),

    /// A Merkle or hash-encoding operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// Error while flattening or serializing a value for hashing.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// An object key contains the path separator, which would make the
    /// flattened path ambiguous.
    #[error("key {0:?} must not contain the path separator '.'")]
    SeparatorInKey(String),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error while decoding a salted typed string back to a primitive.
#[derive(Error, Debug)]
pub enum DecodingError {
    /// The type tag before the first `:` is not one of the five primitive
    /// kinds.
    #[error("type annotation {tag:?} not recognized in typed string {input:?}")]
    UnknownTypeTag {
        /// The unrecognized tag.
        tag: String,
        /// The full typed string being decoded.
        input: String,
    },

    /// A `number:` payload did not parse as an integer or finite float.
    #[error("malformed number payload {0:?}")]
    MalformedNumber(String),

    /// A sequence or mapping was passed to the scalar encoder.
    #[error("value is not of primitive type: {0}")]
    NotAPrimitive(String),
}

/// Error in Merkle tree and hash-encoding operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// A proof was requested for an element absent from the tree.
    #[error("element not found in tree")]
    ElementNotFound,

    /// A hash was not 64 lowercase hex characters.
    #[error("invalid hash encoding: {0}")]
    InvalidHash(String),
}
