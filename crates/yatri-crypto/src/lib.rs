//! # yatri-crypto — Session-Scoped Symmetric Cipher
//!
//! Provides the cipher facade of the Yatri Stack: a `CipherSession` holding a
//! fixed AES-256 key and CBC initialization vector for the life of the
//! process, used to encrypt the sensitive fields of digital tourist IDs
//! before they are submitted to the ledger.
//!
//! The session is deliberately a demonstration design: one key/IV pair per
//! run, never rotated, gone when the process ends. Its weaknesses are
//! documented on [`CipherSession`] rather than silently hardened away — the
//! deterministic-ciphertext behavior is part of the observable contract.
//!
//! ## Crate Policy
//!
//! - Depends only on `yatri-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   `CanonicalBytes` and real AES-CBC.
//! - Key material is never serialized, logged, or exposed.

pub mod cipher;

pub use cipher::{CipherSession, Ciphertext, IV_LEN, KEY_LEN};
