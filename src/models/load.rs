//! # Load Check-In Record

//! This module defines the `LoadRecord` struct, the central entity of the yard check-in system.
//! A record is created once when a driver checks in and is updated by CSR staff as the load
//! progresses through its lifecycle (assignment, loading, completion, check-out, departure).
//! Dock occupancy is never stored on the record; it is always derived from the set of active
//! records by the occupancy resolver.

use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::dock::OccupantSummary;

/// Represents the lifecycle status of a load check-in record.
///
/// The status is monotonic in normal operation, but CSR staff may revert a record to an
/// earlier status; nothing in the core assumes forward-only movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// The driver has submitted a check-in but no CSR has picked it up yet.
    Pending,
    /// A CSR has acknowledged the check-in.
    CheckedIn,
    /// A dock has been assigned to the load.
    Assigned,
    /// Loading/unloading is in progress.
    Loading,
    /// Loading/unloading is finished; the load no longer occupies its dock.
    Completed,
    /// Paperwork is done and the driver has checked out.
    CheckedOut,
    /// The trailer has left the yard.
    Departed,
}

impl LoadStatus {
    /// Whether a record in this status occupies its assigned dock.
    ///
    /// A record with `dock_number` set and an occupying status is "active"; a completed,
    /// checked-out, or departed record never occupies a dock regardless of `dock_number`.
    pub fn occupies_dock(&self) -> bool {
        matches!(
            self,
            LoadStatus::Pending | LoadStatus::CheckedIn | LoadStatus::Assigned | LoadStatus::Loading
        )
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadStatus::Pending => "pending",
            LoadStatus::CheckedIn => "checked_in",
            LoadStatus::Assigned => "assigned",
            LoadStatus::Loading => "loading",
            LoadStatus::Completed => "completed",
            LoadStatus::CheckedOut => "checked_out",
            LoadStatus::Departed => "departed",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LoadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LoadStatus::Pending),
            "checked_in" => Ok(LoadStatus::CheckedIn),
            "assigned" => Ok(LoadStatus::Assigned),
            "loading" => Ok(LoadStatus::Loading),
            "completed" => Ok(LoadStatus::Completed),
            "checked_out" => Ok(LoadStatus::CheckedOut),
            "departed" => Ok(LoadStatus::Departed),
            other => Err(format!("unrecognized load status: {}", other)),
        }
    }
}

/// Represents a single load check-in record from the daily log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadRecord {
    /// Unique identifier of the record. Immutable.
    pub id: String,
    /// The current lifecycle status of the load.
    pub status: LoadStatus,
    /// The dock the load is assigned to, the `Ramp` sentinel, or `None` when unassigned.
    pub dock_number: Option<String>,
    /// The appointment time code: a 4-digit `HHMM` time-of-day or a symbolic code
    /// such as `work_in`. Kept as the raw string; parsed at the boundary on use.
    pub appointment_time: Option<String>,
    /// When the driver checked in. Set once at creation, immutable.
    pub check_in_time: DateTime<Utc>,
    /// When loading started.
    pub start_time: Option<DateTime<Utc>>,
    /// When loading completed.
    pub end_time: Option<DateTime<Utc>>,
    /// When the driver checked out.
    pub check_out_time: Option<DateTime<Utc>>,
    /// Reference (pickup/PO) number. Opaque to the core.
    pub reference_number: String,
    /// Driver name as entered at check-in.
    pub driver_name: String,
    /// Carrier name as entered at check-in.
    pub carrier_name: String,
    /// Trailer number, if provided.
    pub trailer_number: Option<String>,
    /// Trailer length, if provided.
    pub trailer_length: Option<String>,
    /// Destination city, if provided.
    pub destination_city: Option<String>,
    /// Destination state, if provided.
    pub destination_state: Option<String>,
    /// Monotonic version counter used by the conditional-write path at the
    /// persistence boundary. Incremented on every committed update.
    pub version: i64,
}

impl LoadRecord {
    /// Creates a new record in `Pending` status, stamped with the given check-in time.
    pub fn new(
        id: impl Into<String>,
        reference_number: impl Into<String>,
        driver_name: impl Into<String>,
        carrier_name: impl Into<String>,
        check_in_time: DateTime<Utc>,
    ) -> Self {
        LoadRecord {
            id: id.into(),
            status: LoadStatus::Pending,
            dock_number: None,
            appointment_time: None,
            check_in_time,
            start_time: None,
            end_time: None,
            check_out_time: None,
            reference_number: reference_number.into(),
            driver_name: driver_name.into(),
            carrier_name: carrier_name.into(),
            trailer_number: None,
            trailer_length: None,
            destination_city: None,
            destination_state: None,
            version: 0,
        }
    }

    /// Whether this record currently occupies a dock.
    pub fn is_active(&self) -> bool {
        self.dock_number.is_some() && self.status.occupies_dock()
    }

    /// Applies a lifecycle status change, stamping the matching timestamp.
    ///
    /// Moving to `Loading` sets `start_time`, `Completed` sets `end_time`, `CheckedOut`
    /// sets `check_out_time`. Reverting to an earlier status leaves earlier timestamps in
    /// place; CSR corrections should not erase history.
    pub fn apply_status(&mut self, status: LoadStatus, at: DateTime<Utc>) {
        match status {
            LoadStatus::Loading => {
                self.start_time.get_or_insert(at);
            }
            LoadStatus::Completed => {
                self.end_time.get_or_insert(at);
            }
            LoadStatus::CheckedOut => {
                self.check_out_time.get_or_insert(at);
            }
            _ => {}
        }
        self.status = status;
    }

    /// Minutes the load has been in the yard, measured from check-in to `now`.
    ///
    /// CSR dashboards escalate presentation at 60 and 120 minutes; the core only
    /// reports the raw value.
    pub fn dwell_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.check_in_time).num_minutes()
    }

    /// A flat summary of this record suitable for conflict lists and notifications.
    pub fn occupant_summary(&self) -> OccupantSummary {
        OccupantSummary {
            record_id: self.id.clone(),
            reference_number: self.reference_number.clone(),
            driver_name: self.driver_name.clone(),
            trailer_number: self.trailer_number.clone(),
        }
    }
}
