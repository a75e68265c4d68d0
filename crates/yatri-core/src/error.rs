//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the Yatri Stack. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! The failure surface of this system is deliberately small: a value may be
//! impossible to canonicalize (and therefore impossible to encrypt or digest),
//! and a ciphertext may fail to decrypt. Ledger and alert operations define
//! their own local error types in their own crates; the variants here are the
//! ones shared across crate boundaries.

use thiserror::Error;

/// Top-level error type for the Yatri Stack.
#[derive(Error, Debug)]
pub enum YatriError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Cryptographic operation failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// An identifier failed format validation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Error during canonical serialization.
///
/// This is the "invalid input" failure of the cipher facade: a value that
/// cannot be canonically serialized cannot be encrypted or digested.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Use string or integer fields instead.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The plaintext could not be canonically serialized before encryption.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] CanonicalizationError),

    /// The ciphertext was not produced by the active session's key/iv, or is
    /// structurally malformed (invalid text encoding, bad padding, truncated
    /// input, non-JSON plaintext).
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}
