//! # Appointment Adherence

//! Classifies a load's check-in against its appointment slot. All comparisons happen in
//! the yard's configured civil timezone, resolved with calendar-aware conversion so the
//! classification stays correct across daylight-saving transitions. A fixed UTC offset
//! would silently misclassify every check-in for half the year.

use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use crate::config::YardSettings;
use crate::errors::CheckInResult;
use crate::models::AppointmentTime;

/// The on-time classification of a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentAdherence {
    /// Checked in at or before the slot (within the configured tolerance).
    /// `delta_minutes` is check-in minus appointment; negative means early.
    OnTime { delta_minutes: i64 },
    /// Checked in after the slot, beyond the tolerance.
    Late { delta_minutes: i64 },
    /// The appointment is a symbolic code or absent; on-time determination does not
    /// apply and callers must not present a violation.
    NotTimed,
}

impl AppointmentAdherence {
    pub fn is_on_time(&self) -> bool {
        matches!(self, AppointmentAdherence::OnTime { .. })
    }
}

/// Computes adherence and detention under the yard's configured policy.
#[derive(Debug, Clone)]
pub struct AdherenceCalculator {
    tz: Tz,
    tolerance_minutes: i64,
    pub(crate) grace_minutes: i64,
}

impl AdherenceCalculator {
    /// Builds a calculator from the yard settings; fails if the timezone name does not
    /// resolve.
    pub fn new(yard: &YardSettings) -> CheckInResult<Self> {
        Ok(AdherenceCalculator {
            tz: yard.tz()?,
            tolerance_minutes: yard.on_time_tolerance_minutes,
            grace_minutes: yard.detention_grace_minutes,
        })
    }

    /// Classifies a check-in against the appointment slot.
    ///
    /// Let `delta = check_in_minutes - appointment_minutes`, both minutes-since-midnight
    /// in the yard's civil timezone on the check-in date. The load is on-time when
    /// `delta <= tolerance` (tolerance defaults to zero: at or before the slot).
    /// Symbolic appointments are `NotTimed`.
    pub fn classify(
        &self,
        appointment: Option<&AppointmentTime>,
        check_in_time: DateTime<Utc>,
    ) -> AppointmentAdherence {
        let appointment_minutes = match appointment.and_then(AppointmentTime::minutes_of_day) {
            Some(minutes) => minutes,
            None => return AppointmentAdherence::NotTimed,
        };

        let local = check_in_time.with_timezone(&self.tz);
        let check_in_minutes = local.hour() as i64 * 60 + local.minute() as i64;
        let delta_minutes = check_in_minutes - appointment_minutes;

        if delta_minutes <= self.tolerance_minutes {
            AppointmentAdherence::OnTime { delta_minutes }
        } else {
            AppointmentAdherence::Late { delta_minutes }
        }
    }

    /// The absolute instant of the appointment slot on the check-in's local calendar
    /// date.
    ///
    /// DST makes some local datetimes ambiguous (fall-back) or nonexistent
    /// (spring-forward). An ambiguous slot resolves to its earlier occurrence; a slot
    /// inside the spring-forward gap is shifted one hour later, matching when the
    /// wall clock actually reaches it.
    pub(crate) fn appointment_instant(
        &self,
        appointment: &AppointmentTime,
        check_in_time: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let time = match appointment {
            AppointmentTime::Fixed(t) => *t,
            AppointmentTime::Symbolic(_) => return None,
        };
        let date = check_in_time.with_timezone(&self.tz).date_naive();
        let naive = NaiveDateTime::new(date, time);
        let local = match self.tz.from_local_datetime(&naive) {
            chrono::LocalResult::Single(dt) => dt,
            chrono::LocalResult::Ambiguous(earlier, _) => earlier,
            chrono::LocalResult::None => self
                .tz
                .from_local_datetime(&(naive + chrono::Duration::hours(1)))
                .earliest()?,
        };
        Some(local.with_timezone(&Utc))
    }
}
