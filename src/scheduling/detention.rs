//! # Detention Calculation

//! Detention is the billable time a carrier waits beyond the standard grace period
//! between its appointment slot and load completion. Policy: detention only accrues
//! when the carrier met their slot, so late and non-timed loads never produce a
//! numeric value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::AppointmentTime;
use crate::scheduling::adherence::AdherenceCalculator;

/// The outcome of a detention calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Detention {
    /// The appointment was symbolic, the check-in was late, or the load has not
    /// completed yet. No numeric value applies.
    NotApplicable,
    /// The load completed within the grace period; nothing accrued.
    WithinGrace,
    /// Billable minutes beyond the grace period.
    Accrued { minutes: i64 },
}

impl AdherenceCalculator {
    /// Computes detention for a completed load.
    ///
    /// Only meaningful for a fixed appointment, an on-time check-in, and a known
    /// `end_time`; every other combination is `NotApplicable`. Elapsed time is measured
    /// from the appointment's civil instant on the check-in date to `end_time`;
    /// detention is `elapsed - grace`, floored at zero and reported as `WithinGrace`
    /// when nothing accrued.
    pub fn detention(
        &self,
        appointment: Option<&AppointmentTime>,
        check_in_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
    ) -> Detention {
        let appointment = match appointment {
            Some(appt) if appt.is_timed() => appt,
            _ => return Detention::NotApplicable,
        };
        let end_time = match end_time {
            Some(end) => end,
            None => return Detention::NotApplicable,
        };
        if !self.classify(Some(appointment), check_in_time).is_on_time() {
            return Detention::NotApplicable;
        }
        let slot = match self.appointment_instant(appointment, check_in_time) {
            Some(slot) => slot,
            None => return Detention::NotApplicable,
        };

        let elapsed = (end_time - slot).num_minutes();
        let minutes = elapsed - self.grace_minutes;
        if minutes > 0 {
            Detention::Accrued { minutes }
        } else {
            Detention::WithinGrace
        }
    }
}
