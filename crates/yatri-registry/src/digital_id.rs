//! # Digital ID Issuance
//!
//! Assembles a digital tourist ID from a registration form: sensitive fields
//! are encrypted through the caller's [`CipherSession`], the itinerary is
//! carried in the clear, and the ID gets a seven-day validity window. The
//! issued record is what callers submit to the ledger.

use serde::{Deserialize, Serialize};

use yatri_core::error::{CryptoError, YatriError};
use yatri_core::{Timestamp, TouristId};
use yatri_crypto::{CipherSession, Ciphertext};

/// How long an issued ID stays valid, in days.
pub const ID_VALIDITY_DAYS: i64 = 7;

/// Clear-text registration input, as collected from the tourist.
///
/// Email, phone, and the emergency contact's name are optional at the data
/// layer; everything else is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    /// Full legal name.
    pub full_name: String,
    /// Aadhaar or passport number.
    pub aadhaar: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Free-text trip itinerary.
    pub itinerary: String,
    /// Emergency contact number.
    pub emergency_contact: String,
    /// Emergency contact's name.
    pub emergency_contact_name: Option<String>,
}

/// An issued digital tourist ID.
///
/// Identity fields are ciphertext under the issuing session; only the
/// itinerary travels in the clear. The struct serializes to a plain field
/// map, which is exactly the shape the ledger accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitalId {
    /// The generated tourist identifier (clear text — it is the lookup key).
    pub id: TouristId,
    /// Encrypted full name.
    pub name: Ciphertext,
    /// Encrypted Aadhaar/passport number.
    pub aadhaar: Ciphertext,
    /// Encrypted email, when supplied.
    pub email: Option<Ciphertext>,
    /// Encrypted phone number, when supplied.
    pub phone: Option<Ciphertext>,
    /// Trip itinerary, stored in the clear.
    pub itinerary: String,
    /// Encrypted emergency contact number.
    pub emergency_contact: Ciphertext,
    /// Encrypted emergency contact name, when supplied.
    pub emergency_contact_name: Option<Ciphertext>,
    /// End of the validity window.
    pub valid_till: Timestamp,
    /// When the ID was issued.
    pub created_at: Timestamp,
}

impl DigitalId {
    /// Issue a digital ID from a registration form.
    ///
    /// # Errors
    ///
    /// Fails only if a field cannot be encrypted, which for string fields
    /// means the canonical pipeline rejected it — not reachable with
    /// well-formed form input.
    pub fn issue(session: &CipherSession, form: &RegistrationForm) -> Result<Self, CryptoError> {
        let created_at = Timestamp::now();
        let id = TouristId::generate();
        let issued = Self {
            name: session.encrypt(&form.full_name)?,
            aadhaar: session.encrypt(&form.aadhaar)?,
            email: form
                .email
                .as_ref()
                .map(|v| session.encrypt(v))
                .transpose()?,
            phone: form
                .phone
                .as_ref()
                .map(|v| session.encrypt(v))
                .transpose()?,
            itinerary: form.itinerary.clone(),
            emergency_contact: session.encrypt(&form.emergency_contact)?,
            emergency_contact_name: form
                .emergency_contact_name
                .as_ref()
                .map(|v| session.encrypt(v))
                .transpose()?,
            valid_till: created_at.plus_days(ID_VALIDITY_DAYS),
            created_at,
            id,
        };
        tracing::info!(id = %issued.id, valid_till = %issued.valid_till, "digital ID issued");
        Ok(issued)
    }

    /// Decrypt the identity fields back into a registration form.
    ///
    /// Only the session that issued this ID can open it; any other session
    /// fails with a decryption error.
    pub fn reveal(&self, session: &CipherSession) -> Result<RegistrationForm, CryptoError> {
        Ok(RegistrationForm {
            full_name: session.decrypt(&self.name)?,
            aadhaar: session.decrypt(&self.aadhaar)?,
            email: self
                .email
                .as_ref()
                .map(|ct| session.decrypt(ct))
                .transpose()?,
            phone: self
                .phone
                .as_ref()
                .map(|ct| session.decrypt(ct))
                .transpose()?,
            itinerary: self.itinerary.clone(),
            emergency_contact: session.decrypt(&self.emergency_contact)?,
            emergency_contact_name: self
                .emergency_contact_name
                .as_ref()
                .map(|ct| session.decrypt(ct))
                .transpose()?,
        })
    }

    /// Render the ID as a ledger record field map.
    pub fn to_record(&self) -> Result<serde_json::Map<String, serde_json::Value>, YatriError> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => Ok(map),
            Ok(other) => Err(YatriError::Serialization(format!(
                "digital ID serialized to a non-object value: {other}"
            ))),
            Err(e) => Err(YatriError::Serialization(e.to_string())),
        }
    }

    /// Whether the ID's validity window covers the given instant.
    pub fn is_valid_at(&self, at: Timestamp) -> bool {
        self.created_at <= at && at <= self.valid_till
    }
}
