//! # Assignment Validator

//! Decides, for a dock-assignment request, whether to permit the write and how to
//! classify the risk. The validator never writes anything itself: on permit it hands
//! back an approved assignment description and the actual record mutation belongs to
//! the persistence collaborator. It must be queried synchronously against a fresh
//! occupancy snapshot immediately before the write.

use serde::{Deserialize, Serialize};
use crate::errors::{CheckInError, CheckInResult};
use crate::models::{AppointmentTime, DockStatus, YardOccupancy};

/// A proposed dock assignment for a load record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    /// The load record receiving the assignment.
    pub record_id: String,
    /// The target dock number or the `Ramp` sentinel.
    pub dock_number: String,
    /// Optional appointment time code to record with the assignment.
    pub appointment_time: Option<String>,
    /// Whether the caller has explicitly acknowledged a double-booking.
    pub confirm_double_booking: bool,
}

/// The validator's output on permit: everything the write path needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovedAssignment {
    pub record_id: String,
    pub dock_number: String,
    /// The parsed appointment time, if one was supplied with the request.
    pub appointment: Option<AppointmentTime>,
    /// True when the dock already had active occupants and the caller confirmed;
    /// the dock will resolve as `double-booked` after the write commits.
    pub creates_double_booking: bool,
}

/// Validates assignment requests against a fresh occupancy snapshot.
pub struct AssignmentValidator {
    symbolic_codes: Vec<String>,
}

impl AssignmentValidator {
    pub fn new(symbolic_codes: Vec<String>) -> Self {
        AssignmentValidator { symbolic_codes }
    }

    /// Applies the assignment decision table.
    ///
    /// | Dock status | Confirmed? | Outcome |
    /// |---|---|---|
    /// | blocked | n/a | `DockBlocked` with the stored reason |
    /// | available | n/a | permit |
    /// | in-use / double-booked | no | `RequiresConfirmation` with the conflicting occupants |
    /// | in-use / double-booked | yes | permit |
    ///
    /// A dock absent from the snapshot (outside the configured set) is rejected with
    /// `UnknownDock`. An appointment code on the request is parsed here so a malformed
    /// code is rejected at the boundary.
    pub fn validate(
        &self,
        request: &AssignmentRequest,
        occupancy: &YardOccupancy,
    ) -> CheckInResult<ApprovedAssignment> {
        let dock = occupancy
            .dock(&request.dock_number)
            .ok_or_else(|| CheckInError::UnknownDock(request.dock_number.clone()))?;

        let appointment = request
            .appointment_time
            .as_deref()
            .map(|code| AppointmentTime::parse(code, &self.symbolic_codes))
            .transpose()?;

        match dock.status {
            DockStatus::Blocked => Err(CheckInError::DockBlocked {
                dock: dock.dock_number.clone(),
                reason: dock
                    .blocked_reason
                    .clone()
                    .unwrap_or_else(|| "blocked by operator".to_string()),
            }),
            DockStatus::Available => Ok(ApprovedAssignment {
                record_id: request.record_id.clone(),
                dock_number: dock.dock_number.clone(),
                appointment,
                creates_double_booking: false,
            }),
            DockStatus::InUse | DockStatus::DoubleBooked => {
                if request.confirm_double_booking {
                    Ok(ApprovedAssignment {
                        record_id: request.record_id.clone(),
                        dock_number: dock.dock_number.clone(),
                        appointment,
                        creates_double_booking: true,
                    })
                } else {
                    Err(CheckInError::RequiresConfirmation {
                        dock: dock.dock_number.clone(),
                        conflicts: dock.occupants.clone(),
                    })
                }
            }
        }
    }
}

/// Validates an operator-supplied block reason. Empty or whitespace-only reasons are
/// rejected with `InvalidReason`.
pub fn validate_block_reason(reason: &str) -> CheckInResult<&str> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(CheckInError::InvalidReason);
    }
    Ok(trimmed)
}
