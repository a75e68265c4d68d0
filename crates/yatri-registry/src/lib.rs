//! # yatri-registry — ID Issuance and Alert Lifecycle
//!
//! The two in-process consumers of the Yatri core:
//!
//! - **Digital ID issuance** (`digital_id.rs`): turns a registration form
//!   into an issued ID — sensitive fields encrypted through the caller's
//!   `CipherSession`, a generated `TouristId`, a seven-day validity window —
//!   ready to submit to the ledger as a record.
//!
//! - **Emergency alerts** (`alert.rs`): the panic-button lifecycle
//!   (`active → acknowledged → closed`) as a typestate machine. Each state
//!   is a distinct Rust type; transitions consume the current state and
//!   produce the next, so invalid moves are compile errors. A runtime
//!   `DynAlert` mirror covers deserialized state.

pub mod alert;
pub mod digital_id;

pub use alert::{
    Acknowledged, Active, Alert, AlertError, AlertState, AlertTransition, Closed, DynAlert,
    DynAlertStatus, GeoPoint,
};
pub use digital_id::{DigitalId, RegistrationForm, ID_VALIDITY_DAYS};
