//! # Canonical Serialization — JCS Byte Production
//!
//! Defines `CanonicalBytes`, the sole construction path for bytes fed to
//! digest computation and to the cipher facade across the Yatri Stack.
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which walks the value
//! (rejecting floats, recursing containers) before RFC 8785 (JCS)
//! serialization. Any function that digests or encrypts must accept
//! `&CanonicalBytes`, so a non-canonical byte sequence can never reach a
//! hash or cipher input.
//!
//! ## Why floats are rejected
//!
//! Block hashes must be reproducible from the block's own fields. Floating
//! point numbers have serialization edge cases that make the canonical byte
//! sequence fragile, so record fields carry amounts and coordinates as
//! strings or integers. Rejection here is what surfaces as the cipher
//! facade's "invalid input" failure.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - All numeric values are integers, never floats.
/// - All object keys are strings.
/// - Serialization uses sorted keys with compact separators (RFC 8785).
///
/// These invariants are enforced by the constructor and cannot be violated
/// by downstream code because the inner `Vec<u8>` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// This is the ONLY way to construct `CanonicalBytes`. All digest and
    /// cipher input in the stack must flow through this constructor.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::FloatRejected` if the value contains
    /// float numbers. Returns `CanonicalizationError::SerializationFailed`
    /// if JCS serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        let checked = check_json_value(value)?;
        let bytes = serialize_canonical(&checked)?;
        Ok(Self(bytes))
    }

    /// Access the canonical bytes for digest or cipher input.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively validate a JSON value against the canonicalization rules.
///
/// 1. `null`, `bool`, `string`, `integer` — pass through unchanged.
/// 2. `float` (not representable as i64/u64) — **rejected**.
/// 3. `object` — keys are already strings in JSON; values recursed.
/// 4. `array` — elements recursed.
///
/// Datetime normalization happens at the serialization boundary, not here:
/// the `Timestamp` type in this crate serializes to an ISO8601 `Z`-suffix
/// string before the value tree is built.
fn check_json_value(value: Value) -> Result<Value, CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(value),
        Value::Number(ref n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                if let Some(f) = n.as_f64() {
                    return Err(CanonicalizationError::FloatRejected(f));
                }
            }
            Ok(value)
        }
        Value::Object(map) => {
            let mut checked = serde_json::Map::new();
            for (k, v) in map {
                checked.insert(k, check_json_value(v)?);
            }
            Ok(Value::Object(checked))
        }
        Value::Array(arr) => {
            let checked: Result<Vec<_>, _> = arr.into_iter().map(check_json_value).collect();
            Ok(Value::Array(checked?))
        }
    }
}

/// Serialize a JSON value in JCS-canonical form (RFC 8785).
///
/// Uses `serde_jcs` for deterministic output: sorted keys, compact
/// separators, UTF-8 bytes with no trailing whitespace.
fn serialize_canonical(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    let s = serde_jcs::to_string(value)?;
    Ok(s.into_bytes())
}
