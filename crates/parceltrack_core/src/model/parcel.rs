//! Parcel domain model.
//!
//! # Responsibility
//! - Define the canonical parcel record and its lifecycle states.
//! - Keep the forward-only status order in one place.
//!
//! # Invariants
//! - `number` is stable once assigned by the store and never reused.
//! - Status moves only forward: `registered -> sent -> delivered`.
//! - `created_at` is caller-provided and immutable after construction.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned parcel identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// `0` means "not yet assigned".
pub type ParcelNumber = i64;

/// Lifecycle state of a parcel.
///
/// Closed set: internal callers cannot construct a state outside these
/// three, so "unknown status" can only enter through boundary parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Accepted into the system, still editable and deletable.
    Registered,
    /// Handed to the carrier; address and record are frozen.
    Sent,
    /// Terminal state.
    Delivered,
}

impl ParcelStatus {
    /// Stable wire/storage spelling, identical to the serde names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }

    /// The only state allowed to directly precede `self` in the lifecycle.
    ///
    /// `Registered` has no predecessor, so nothing may transition into it.
    pub fn predecessor(self) -> Option<ParcelStatus> {
        match self {
            Self::Registered => None,
            Self::Sent => Some(Self::Registered),
            Self::Delivered => Some(Self::Sent),
        }
    }

    /// Returns whether moving from `self` to `target` respects the
    /// forward-only order. No-op transitions are not allowed.
    pub fn can_become(self, target: ParcelStatus) -> bool {
        target.predecessor() == Some(self)
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boundary error for status words outside the known lifecycle set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedStatus(pub String);

impl Display for UnrecognizedStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognized parcel status `{}`; expected registered|sent|delivered",
            self.0
        )
    }
}

impl Error for UnrecognizedStatus {}

impl FromStr for ParcelStatus {
    type Err = UnrecognizedStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "registered" => Ok(Self::Registered),
            "sent" => Ok(Self::Sent),
            "delivered" => Ok(Self::Delivered),
            other => Err(UnrecognizedStatus(other.to_string())),
        }
    }
}

/// Canonical parcel record as persisted in the `parcel` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Store-assigned identifier; `0` until the record is inserted.
    pub number: ParcelNumber,
    /// Owning client id. Not validated against any client registry.
    pub client: i64,
    /// Lifecycle state.
    pub status: ParcelStatus,
    /// Free-form delivery address.
    pub address: String,
    /// RFC3339 timestamp provided by the caller at construction time.
    pub created_at: String,
}

impl Parcel {
    /// Creates an unsaved parcel in the `Registered` state.
    pub fn new(client: i64, address: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: created_at.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Parcel, ParcelStatus, UnrecognizedStatus};
    use std::str::FromStr;

    #[test]
    fn transition_matrix_is_forward_only() {
        use ParcelStatus::{Delivered, Registered, Sent};

        assert!(Registered.can_become(Sent));
        assert!(Sent.can_become(Delivered));

        for from in [Registered, Sent, Delivered] {
            assert!(!from.can_become(Registered));
            assert!(!from.can_become(from));
        }
        assert!(!Registered.can_become(Delivered));
        assert!(!Delivered.can_become(Sent));
    }

    #[test]
    fn status_round_trips_through_storage_spelling() {
        for status in [
            ParcelStatus::Registered,
            ParcelStatus::Sent,
            ParcelStatus::Delivered,
        ] {
            assert_eq!(ParcelStatus::from_str(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn unknown_status_word_is_rejected() {
        let err = ParcelStatus::from_str("returned").unwrap_err();
        assert_eq!(err, UnrecognizedStatus("returned".to_string()));
        assert!(err.to_string().contains("returned"));
    }

    #[test]
    fn serde_names_match_storage_spelling() {
        let json = serde_json::to_string(&ParcelStatus::Sent).unwrap();
        assert_eq!(json, "\"sent\"");

        let parcel = Parcel::new(7, "somewhere", "2026-08-23T10:00:00Z");
        let value = serde_json::to_value(&parcel).unwrap();
        assert_eq!(value["status"], "registered");
        assert_eq!(value["number"], 0);
    }

    #[test]
    fn new_parcel_starts_registered_and_unassigned() {
        let parcel = Parcel::new(1000, "test", "2026-08-23T10:00:00Z");
        assert_eq!(parcel.number, 0);
        assert_eq!(parcel.status, ParcelStatus::Registered);
    }
}
