//! # Alert Typestate Machine
//!
//! Implements the emergency-alert lifecycle using the typestate pattern.
//! Each state is a distinct type — invalid transitions are compile errors.
//!
//! ## States
//!
//! - `Active` → raised by the tourist's panic action, awaiting response.
//! - `Acknowledged` → a responder has taken ownership.
//! - `Closed` → terminal state, incident resolved or dismissed.
//!
//! ## Allowed Transitions
//!
//! ```text
//! Active ──acknowledge()──▶ Acknowledged ──close()──▶ Closed
//!    │                                                  ▲
//!    └───────────────────close()────────────────────────┘
//! ```
//!
//! The direct `Active → Closed` edge covers false alarms dismissed without a
//! responder taking ownership.
//!
//! For alerts loaded from outside the type system (deserialized state),
//! [`DynAlert`] provides the same transition rules checked at runtime.

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use yatri_core::{AlertId, Timestamp, TouristId};

// ─── Location ────────────────────────────────────────────────────────

/// A WGS84 coordinate pair in degrees.
///
/// Coordinates are display/dispatch data only — they never enter a digest
/// or cipher path, so float fields are fine here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, −90 to 90.
    pub latitude: f64,
    /// Longitude in degrees, −180 to 180.
    pub longitude: f64,
}

impl GeoPoint {
    /// Construct a validated coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::InvalidCoordinates` when either component is out
    /// of range or not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, AlertError> {
        let in_range = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            return Err(AlertError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

// ─── State Types ─────────────────────────────────────────────────────

/// Alert state: raised, awaiting response.
#[derive(Debug, Clone, Copy)]
pub struct Active;

/// Alert state: a responder has taken ownership.
#[derive(Debug, Clone, Copy)]
pub struct Acknowledged;

/// Alert state: resolved or dismissed (terminal).
#[derive(Debug, Clone, Copy)]
pub struct Closed;

mod private {
    pub trait Sealed {}
    impl Sealed for super::Active {}
    impl Sealed for super::Acknowledged {}
    impl Sealed for super::Closed {}
}

/// Marker trait for all valid alert states.
///
/// Sealed — only the three states defined in this module implement it.
pub trait AlertState: private::Sealed + std::fmt::Debug {
    /// The canonical status name of this state.
    fn name() -> &'static str;

    /// The runtime status corresponding to this state.
    fn status() -> DynAlertStatus;

    /// Whether this state is terminal (no further transitions allowed).
    fn is_terminal() -> bool {
        false
    }
}

impl AlertState for Active {
    fn name() -> &'static str {
        "active"
    }
    fn status() -> DynAlertStatus {
        DynAlertStatus::Active
    }
}
impl AlertState for Acknowledged {
    fn name() -> &'static str {
        "acknowledged"
    }
    fn status() -> DynAlertStatus {
        DynAlertStatus::Acknowledged
    }
}
impl AlertState for Closed {
    fn name() -> &'static str {
        "closed"
    }
    fn status() -> DynAlertStatus {
        DynAlertStatus::Closed
    }
    fn is_terminal() -> bool {
        true
    }
}

// ─── Transition Record ───────────────────────────────────────────────

/// Record of a single transition in an alert's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertTransition {
    /// Status before the transition.
    pub from_status: String,
    /// Status after the transition.
    pub to_status: String,
    /// When the transition occurred (UTC).
    pub timestamp: Timestamp,
    /// Free-text note (responder name, closing remark).
    pub note: Option<String>,
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that can occur during alert operations.
#[derive(Error, Debug)]
pub enum AlertError {
    /// Coordinates out of range or not finite.
    #[error("coordinates out of range: ({latitude}, {longitude})")]
    InvalidCoordinates {
        /// The rejected latitude.
        latitude: f64,
        /// The rejected longitude.
        longitude: f64,
    },

    /// Attempted transition is not allowed by the lifecycle.
    #[error("invalid alert transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: String,
        /// Attempted target status.
        to: String,
    },
}

// ─── The Alert ───────────────────────────────────────────────────────

/// An emergency alert, parameterized by its lifecycle state.
///
/// Only state-appropriate methods exist at compile time: `Alert<Active>` has
/// `.acknowledge()` and `.close()`; `Alert<Closed>` has neither.
#[derive(Debug)]
pub struct Alert<S: AlertState> {
    /// Unique alert identifier.
    pub id: AlertId,
    /// The tourist who raised the alert.
    pub tourist: TouristId,
    /// Where the alert was raised.
    pub location: GeoPoint,
    /// Optional free-text message from the tourist.
    pub message: Option<String>,
    /// When the alert was raised.
    pub raised_at: Timestamp,
    transition_log: Vec<AlertTransition>,
    _state: PhantomData<S>,
}

impl<S: AlertState> Alert<S> {
    /// Returns the canonical status name (e.g., "active").
    pub fn status_name(&self) -> &'static str {
        S::name()
    }

    /// Whether the alert is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        S::is_terminal()
    }

    /// Access the immutable transition log.
    pub fn transition_log(&self) -> &[AlertTransition] {
        &self.transition_log
    }

    /// Convert to the runtime representation.
    pub fn into_dyn(self) -> DynAlert {
        DynAlert {
            id: self.id,
            tourist: self.tourist,
            location: self.location,
            message: self.message,
            raised_at: self.raised_at,
            status: S::status(),
            transition_log: self.transition_log,
        }
    }

    /// Helper to record a transition and produce the next typed alert.
    fn transition_to<T: AlertState>(mut self, note: Option<String>) -> Alert<T> {
        self.transition_log.push(AlertTransition {
            from_status: S::name().to_string(),
            to_status: T::name().to_string(),
            timestamp: Timestamp::now(),
            note,
        });
        Alert {
            id: self.id,
            tourist: self.tourist,
            location: self.location,
            message: self.message,
            raised_at: self.raised_at,
            transition_log: self.transition_log,
            _state: PhantomData,
        }
    }
}

impl Alert<Active> {
    /// Raise a new alert at the given location.
    ///
    /// The alert starts with an empty transition log; raising is not itself
    /// a transition.
    pub fn raise(tourist: TouristId, location: GeoPoint, message: Option<String>) -> Self {
        let alert = Self {
            id: AlertId::new(),
            tourist,
            location,
            message,
            raised_at: Timestamp::now(),
            transition_log: Vec::new(),
            _state: PhantomData,
        };
        tracing::info!(id = %alert.id, tourist = %alert.tourist, "emergency alert raised");
        alert
    }

    /// A responder takes ownership (active → acknowledged).
    pub fn acknowledge(self, responder: &str) -> Alert<Acknowledged> {
        self.transition_to(Some(format!("acknowledged by {responder}")))
    }

    /// Dismiss without a responder taking ownership (active → closed).
    pub fn close(self, note: Option<String>) -> Alert<Closed> {
        self.transition_to(note)
    }
}

impl Alert<Acknowledged> {
    /// Resolve the incident (acknowledged → closed).
    pub fn close(self, note: Option<String>) -> Alert<Closed> {
        self.transition_to(note)
    }
}

// ─── DynAlert — Runtime State ────────────────────────────────────────

/// Runtime alert status for pattern matching on deserialized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DynAlertStatus {
    /// Raised, awaiting response.
    Active,
    /// A responder has taken ownership.
    Acknowledged,
    /// Resolved or dismissed.
    Closed,
}

impl DynAlertStatus {
    /// Returns the canonical status name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Acknowledged => "acknowledged",
            Self::Closed => "closed",
        }
    }

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for DynAlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Dynamic alert for serialization and for state loaded at runtime.
///
/// Provides runtime-checked transitions via [`DynAlert::try_transition()`],
/// mirroring the compile-time rules of the typestate API. Prefer the
/// typestate API for in-memory lifecycle handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynAlert {
    /// Unique alert identifier.
    pub id: AlertId,
    /// The tourist who raised the alert.
    pub tourist: TouristId,
    /// Where the alert was raised.
    pub location: GeoPoint,
    /// Optional free-text message from the tourist.
    pub message: Option<String>,
    /// When the alert was raised.
    pub raised_at: Timestamp,
    /// Current status.
    pub status: DynAlertStatus,
    /// Log of all transitions so far.
    pub transition_log: Vec<AlertTransition>,
}

impl DynAlert {
    /// Attempt a status transition with runtime validation.
    ///
    /// Records the transition in the log on success; rejects anything the
    /// typestate API would not compile.
    pub fn try_transition(
        &mut self,
        to: DynAlertStatus,
        note: Option<String>,
    ) -> Result<(), AlertError> {
        let valid = matches!(
            (self.status, to),
            (DynAlertStatus::Active, DynAlertStatus::Acknowledged)
                | (DynAlertStatus::Active, DynAlertStatus::Closed)
                | (DynAlertStatus::Acknowledged, DynAlertStatus::Closed)
        );
        if !valid {
            return Err(AlertError::InvalidTransition {
                from: self.status.name().to_string(),
                to: to.name().to_string(),
            });
        }
        self.transition_log.push(AlertTransition {
            from_status: self.status.name().to_string(),
            to_status: to.name().to_string(),
            timestamp: Timestamp::now(),
            note,
        });
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location() -> GeoPoint {
        GeoPoint::new(26.9124, 75.7873).unwrap()
    }

    fn raised() -> Alert<Active> {
        Alert::raise(
            TouristId::generate(),
            location(),
            Some("lost near the fort".to_string()),
        )
    }

    #[test]
    fn test_geopoint_validation() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(90.1, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_full_lifecycle() {
        let alert = raised();
        assert_eq!(alert.status_name(), "active");
        assert!(!alert.is_terminal());

        let acked = alert.acknowledge("control-room-3");
        assert_eq!(acked.status_name(), "acknowledged");
        assert_eq!(acked.transition_log().len(), 1);

        let closed = acked.close(Some("tourist located".to_string()));
        assert_eq!(closed.status_name(), "closed");
        assert!(closed.is_terminal());
        assert_eq!(closed.transition_log().len(), 2);
        assert_eq!(closed.transition_log()[0].to_status, "acknowledged");
        assert_eq!(closed.transition_log()[1].to_status, "closed");
    }

    #[test]
    fn test_false_alarm_closes_directly() {
        let closed = raised().close(Some("false alarm".to_string()));
        assert_eq!(closed.status_name(), "closed");
        assert_eq!(closed.transition_log().len(), 1);
        assert_eq!(closed.transition_log()[0].from_status, "active");
    }

    #[test]
    fn test_into_dyn_carries_status_and_log() {
        let dyn_alert = raised().acknowledge("control-room-3").into_dyn();
        assert_eq!(dyn_alert.status, DynAlertStatus::Acknowledged);
        assert_eq!(dyn_alert.transition_log.len(), 1);
    }

    #[test]
    fn test_dyn_valid_transitions() {
        let mut alert = raised().into_dyn();
        alert
            .try_transition(DynAlertStatus::Acknowledged, None)
            .unwrap();
        alert.try_transition(DynAlertStatus::Closed, None).unwrap();
        assert_eq!(alert.status, DynAlertStatus::Closed);
        assert_eq!(alert.transition_log.len(), 2);
    }

    #[test]
    fn test_dyn_invalid_transitions_rejected() {
        let mut alert = raised().into_dyn();
        // Cannot skip back or self-loop.
        assert!(alert.try_transition(DynAlertStatus::Active, None).is_err());

        alert.try_transition(DynAlertStatus::Closed, None).unwrap();
        // Terminal: nothing leaves closed.
        assert!(alert
            .try_transition(DynAlertStatus::Acknowledged, None)
            .is_err());
        assert!(alert.try_transition(DynAlertStatus::Active, None).is_err());
        assert_eq!(alert.transition_log.len(), 1);
    }

    #[test]
    fn test_dyn_serde_roundtrip() {
        let dyn_alert = raised().into_dyn();
        let json = serde_json::to_string(&dyn_alert).unwrap();
        assert!(json.contains("\"active\""));
        let parsed: DynAlert = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.status, DynAlertStatus::Active);
        assert_eq!(parsed.id, dyn_alert.id);
    }
}
