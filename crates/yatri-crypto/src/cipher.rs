//! # Cipher Session — AES-256-CBC Over Canonical Plaintext
//!
//! Implements the encrypt/decrypt round trip used for sensitive digital ID
//! fields. Plaintext is canonicalized through `CanonicalBytes` (so the same
//! value always produces the same byte sequence), encrypted with
//! AES-256-CBC/PKCS#7, and rendered as base64 text.
//!
//! ## Security Invariant
//!
//! - Encryption input MUST be `&CanonicalBytes`-producible — `encrypt()`
//!   takes any `Serialize` value and refuses anything the canonical pipeline
//!   rejects. This keeps cipher input on the same byte-production path as
//!   digest input.
//! - Key and IV are generated once from the OS RNG and are read-only for the
//!   session's lifetime. `CipherSession` implements neither `Serialize` nor
//!   `Debug`, so key material cannot leak through logs or artifacts.
//!
//! ## Known weakness, preserved deliberately
//!
//! The IV is fixed for the whole session, so equal plaintexts produce equal
//! ciphertexts within a run. That determinism is part of the observable
//! contract and is covered by tests. Do not reuse this module where real
//! confidentiality is needed.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use yatri_core::error::CryptoError;
use yatri_core::CanonicalBytes;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES-256 key length in bytes.
pub const KEY_LEN: usize = 32;

/// CBC initialization vector length in bytes (one AES block).
pub const IV_LEN: usize = 16;

/// Base64-encoded ciphertext produced by a [`CipherSession`].
///
/// A newtype rather than a bare `String` so encrypted and clear-text fields
/// cannot be confused at a call site. The inner encoding is opaque to
/// callers; only the session that produced it can open it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ciphertext(String);

impl Ciphertext {
    /// Access the base64 text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an externally supplied base64 ciphertext.
    ///
    /// No validation happens here — a malformed value surfaces as a
    /// decryption failure when opened.
    pub fn from_base64(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl std::fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A session-lifetime cipher context: one key, one IV, never rotated.
///
/// Create one per process run with [`CipherSession::generate()`] and pass it
/// to whatever needs encrypt/decrypt — there is no hidden global. Both
/// operations are pure reads of the session state.
pub struct CipherSession {
    key: [u8; KEY_LEN],
    iv: [u8; IV_LEN],
}

impl CipherSession {
    /// Generate a fresh session from the OS RNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        let mut key = [0u8; KEY_LEN];
        let mut iv = [0u8; IV_LEN];
        csprng.fill_bytes(&mut key);
        csprng.fill_bytes(&mut iv);
        Self { key, iv }
    }

    /// Create a session from fixed key material.
    ///
    /// Intended for deterministic fixtures; production callers use
    /// [`CipherSession::generate()`].
    pub fn from_material(key: [u8; KEY_LEN], iv: [u8; IV_LEN]) -> Self {
        Self { key, iv }
    }

    /// Encrypt a serializable value.
    ///
    /// The value is canonicalized (JCS), AES-256-CBC encrypted with PKCS#7
    /// padding under the session key/IV, and returned as base64 text.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidInput` when the value cannot be
    /// canonically serialized (e.g., it contains float numbers).
    pub fn encrypt(&self, value: &impl Serialize) -> Result<Ciphertext, CryptoError> {
        let canonical = CanonicalBytes::new(value)?;
        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &self.iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(canonical.as_bytes());
        Ok(Ciphertext(BASE64.encode(ciphertext)))
    }

    /// Decrypt a ciphertext back into its original value.
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::DecryptionFailed` when the ciphertext is not
    /// valid base64, is truncated or mis-padded, or its plaintext does not
    /// parse as the canonical JSON of a `T`. A ciphertext produced under a
    /// different session's key/IV lands here as well.
    pub fn decrypt<T: DeserializeOwned>(&self, ciphertext: &Ciphertext) -> Result<T, CryptoError> {
        let raw = BASE64
            .decode(ciphertext.as_str())
            .map_err(|e| CryptoError::DecryptionFailed(format!("invalid base64: {e}")))?;
        let plaintext = Aes256CbcDec::new(&self.key.into(), &self.iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&raw)
            .map_err(|_| {
                CryptoError::DecryptionFailed(
                    "invalid padding or truncated ciphertext".to_string(),
                )
            })?;
        serde_json::from_slice(&plaintext).map_err(|e| {
            CryptoError::DecryptionFailed(format!("plaintext is not canonical JSON: {e}"))
        })
    }
}
