//! # yatri-core — Foundational Types for the Yatri Stack
//!
//! This crate is the bedrock of the Yatri Stack, the in-memory core of a
//! tourist-safety platform: digital ID issuance, an append-only demonstration
//! ledger, and a session-scoped cipher. It defines the type-system
//! primitives the other crates build on; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `TouristId` and `AlertId`
//!    are newtypes with validated constructors. No bare strings for
//!    identifiers crossing crate boundaries.
//!
//! 2. **`CanonicalBytes` newtype.** ALL digest computation and cipher input
//!    flows through `CanonicalBytes::new()`. No raw `serde_json::to_vec()`
//!    for hashes. Ever.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision, matching the JCS canonicalization rules.
//!
//! 4. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that every digest path flows through canonicalization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `yatri-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` unless they carry secret material.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, CryptoError, YatriError};
pub use identity::{AlertId, TouristId};
pub use temporal::Timestamp;
