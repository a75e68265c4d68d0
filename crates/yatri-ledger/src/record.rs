//! # Ledger Records — Stamped Caller Field Maps
//!
//! A ledger record is whatever field map the caller submits, stamped with a
//! submission timestamp. The ledger performs no other validation or
//! normalization; field semantics belong to the caller.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use yatri_core::Timestamp;

/// A caller-supplied field map stamped at submission time.
///
/// The stamp is authoritative: a caller-supplied `submitted_at` field is
/// discarded at stamping so the recorded value always reflects when the
/// ledger received the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Caller-supplied fields, preserved as submitted.
    #[serde(flatten)]
    fields: Map<String, Value>,
    /// When the ledger received this record.
    submitted_at: Timestamp,
}

impl LedgerRecord {
    /// Stamp a field map with the current submission time.
    pub fn stamped(mut fields: Map<String, Value>) -> Self {
        fields.remove("submitted_at");
        Self {
            fields,
            submitted_at: Timestamp::now(),
        }
    }

    /// Access the caller-supplied fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Look up a single caller-supplied field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// When the ledger received this record.
    pub fn submitted_at(&self) -> Timestamp {
        self.submitted_at
    }
}
