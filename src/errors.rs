/// # Yard Check-In Errors
/// This module defines the `CheckInError` enum, which encapsulates all recoverable conditions
/// surfaced by the yard check-in core. Every variant maps to a distinguishable, caller-facing
/// condition; none are fatal and none corrupt state.

use thiserror::Error;
use std::io;
use crate::models::OccupantSummary;

#[derive(Error, Debug)]
pub enum CheckInError {
    /// An assignment was attempted against a manually blocked dock. Carries the reason the
    /// operator recorded when blocking it.
    #[error("Dock {dock} is blocked: {reason}")]
    DockBlocked { dock: String, reason: String },

    /// The assignment would create or extend a double-booking. Carries summaries of the
    /// conflicting occupants so the caller can present them for confirmation.
    #[error("Dock {dock} already has {} active load(s); confirmation required", .conflicts.len())]
    RequiresConfirmation {
        dock: String,
        conflicts: Vec<OccupantSummary>,
    },

    /// A block operation was requested with an empty or whitespace-only reason.
    #[error("A block reason is required")]
    InvalidReason,

    /// The referenced dock is not part of the configured yard.
    #[error("Unknown dock: {0}")]
    UnknownDock(String),

    /// The conditional write at the persistence boundary observed a newer record version.
    /// The caller must re-fetch occupancy and re-validate before retrying.
    #[error("Stale write for load {record_id}: expected version {expected}, found {found}")]
    StaleWrite {
        record_id: String,
        expected: i64,
        found: i64,
    },

    /// An appointment time string matched neither the 4-digit `HHMM` pattern nor a
    /// recognized symbolic code.
    #[error("Invalid appointment code: {0}")]
    InvalidAppointmentCode(String),

    /// A load record referenced by id does not exist.
    #[error("Load record not found: {0}")]
    RecordNotFound(String),

    /// Represents errors arising from misconfigurations or invalid settings.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Represents errors occurring within the persistence collaborator.
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// Represents errors reported by the notification collaborator. Best-effort only;
    /// never rolls back a committed assignment.
    #[error("Notification error: {0}")]
    NotificationError(String),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Represents errors that occur during serialization or deserialization of data.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<config::ConfigError> for CheckInError {
    fn from(err: config::ConfigError) -> Self {
        CheckInError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for CheckInError {
    fn from(err: reqwest::Error) -> Self {
        CheckInError::NotificationError(err.to_string())
    }
}

pub type CheckInResult<T> = Result<T, CheckInError>;
