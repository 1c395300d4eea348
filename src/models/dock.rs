//! # Derived Dock Occupancy

//! This module defines the derived dock entities reported by the occupancy resolver.
//! Dock status has no independent persistence; it is recomputed from the current
//! active-record set plus the block-list every time it is queried, so it can never
//! drift out of sync with the daily log.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The sentinel dock identifier for non-numbered trailer drop zones.
pub const RAMP_SENTINEL: &str = "Ramp";

/// Represents the derived status of a dock.
///
/// Precedence when statuses overlap: `Blocked` > `DoubleBooked` > `InUse` > `Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
pub enum DockStatus {
    /// No active record points at this dock.
    #[display("available")]
    Available,
    /// Exactly one active record points at this dock.
    #[display("in-use")]
    InUse,
    /// Two or more active records point at this dock.
    #[display("double-booked")]
    DoubleBooked,
    /// An operator has manually blocked the dock, regardless of occupancy.
    #[display("blocked")]
    Blocked,
}

/// A flat summary of an occupying load, surfaced in conflict lists and receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupantSummary {
    pub record_id: String,
    pub reference_number: String,
    pub driver_name: String,
    pub trailer_number: Option<String>,
}

/// The derived state of a single dock at the moment the resolver ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockOccupancy {
    /// The dock identifier, from the configured yard set.
    pub dock_number: String,
    /// The derived status.
    pub status: DockStatus,
    /// Summaries of the active records occupying the dock. Suppressed (empty) while
    /// the dock is blocked; the underlying records are untouched.
    pub occupants: Vec<OccupantSummary>,
    /// The operator-supplied reason, present only when manually blocked.
    pub blocked_reason: Option<String>,
}

impl DockOccupancy {
    /// An unoccupied, unblocked dock.
    pub fn available(dock_number: impl Into<String>) -> Self {
        DockOccupancy {
            dock_number: dock_number.into(),
            status: DockStatus::Available,
            occupants: Vec::new(),
            blocked_reason: None,
        }
    }
}

/// The resolver's output: one entry per configured dock, in configured order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YardOccupancy {
    pub docks: Vec<DockOccupancy>,
}

impl YardOccupancy {
    /// Looks up a single dock by identifier.
    pub fn dock(&self, dock_number: &str) -> Option<&DockOccupancy> {
        self.docks.iter().find(|d| d.dock_number == dock_number)
    }

    /// The number of docks currently in the given status.
    pub fn count(&self, status: DockStatus) -> usize {
        self.docks.iter().filter(|d| d.status == status).count()
    }
}
