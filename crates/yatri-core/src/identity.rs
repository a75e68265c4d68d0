//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers in the Yatri Stack. These prevent
//! accidental identifier confusion — you cannot pass an `AlertId` where a
//! `TouristId` is expected, and no bare strings travel between crates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::YatriError;

/// Unique identifier for an issued digital tourist ID.
///
/// Format: `TID-<base36 epoch millis><base36 random>`, lowercase. The time
/// prefix gives IDs a rough issuance ordering; the random suffix keeps two
/// registrations in the same millisecond distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TouristId(String);

/// Unique identifier for an emergency alert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertId(pub Uuid);

impl TouristId {
    /// Generate a new tourist identifier from the current time and a random
    /// suffix.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u128;
        let suffix: u64 = rand::random();
        Self(format!("TID-{}{}", to_base36(millis), to_base36(suffix as u128)))
    }

    /// Parse and validate a tourist identifier.
    ///
    /// # Errors
    ///
    /// Returns `YatriError::InvalidIdentifier` if the value does not carry
    /// the `TID-` prefix followed by a non-empty lowercase base36 body.
    pub fn parse(s: &str) -> Result<Self, YatriError> {
        let body = s
            .strip_prefix("TID-")
            .ok_or_else(|| YatriError::InvalidIdentifier(format!("missing TID- prefix: {s:?}")))?;
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            return Err(YatriError::InvalidIdentifier(format!(
                "tourist id body must be lowercase base36: {s:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AlertId {
    /// Generate a new random alert identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TouristId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "alert:{}", self.0)
    }
}

/// Encode an unsigned value as lowercase base36.
fn to_base36(mut n: u128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        let d = (n % 36) as u32;
        digits.push(char::from_digit(d, 36).unwrap_or('0'));
        n /= 36;
    }
    digits.iter().rev().collect()
}
