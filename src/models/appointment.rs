//! # Appointment Time Value Type

//! An appointment time is either a fixed time-of-day (a 4-digit `HHMM` code in the yard's
//! civil timezone) or a symbolic non-timed code (`work_in`, `paid_to_load`,
//! `paid_charge_customer`, `LTL`). Symbolic codes are exempt from on-time and detention
//! calculation; callers must never present a violation for them.

use std::fmt;
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use crate::errors::{CheckInError, CheckInResult};

/// The symbolic codes recognized when no set is supplied by configuration.
pub static DEFAULT_SYMBOLIC_CODES: Lazy<Vec<String>> = Lazy::new(|| {
    vec![
        "work_in".to_string(),
        "paid_to_load".to_string(),
        "paid_charge_customer".to_string(),
        "LTL".to_string(),
    ]
});

/// Represents a parsed appointment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentTime {
    /// A fixed time-of-day slot in the yard's civil timezone.
    Fixed(NaiveTime),
    /// A non-timed classification, stored as its normalized code.
    Symbolic(String),
}

impl AppointmentTime {
    /// Parses an appointment code against the configured set of symbolic codes.
    ///
    /// A code is accepted if it is a valid 4-digit 24-hour `HHMM` time, or if it matches
    /// one of `symbolic_codes` case-insensitively. Anything else is rejected with
    /// `InvalidAppointmentCode` before it reaches the adherence calculator.
    pub fn parse(code: &str, symbolic_codes: &[String]) -> CheckInResult<Self> {
        let trimmed = code.trim();

        if let Some(time) = parse_hhmm(trimmed) {
            return Ok(AppointmentTime::Fixed(time));
        }

        if let Some(canonical) = symbolic_codes
            .iter()
            .find(|c| c.eq_ignore_ascii_case(trimmed))
        {
            return Ok(AppointmentTime::Symbolic(canonical.clone()));
        }

        Err(CheckInError::InvalidAppointmentCode(trimmed.to_string()))
    }

    /// Whether this appointment has a fixed time-of-day.
    pub fn is_timed(&self) -> bool {
        matches!(self, AppointmentTime::Fixed(_))
    }

    /// Minutes since midnight for a fixed slot; `None` for symbolic codes.
    pub fn minutes_of_day(&self) -> Option<i64> {
        match self {
            AppointmentTime::Fixed(t) => {
                use chrono::Timelike;
                Some(t.hour() as i64 * 60 + t.minute() as i64)
            }
            AppointmentTime::Symbolic(_) => None,
        }
    }
}

impl fmt::Display for AppointmentTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentTime::Fixed(t) => write!(f, "{}", t.format("%H:%M")),
            AppointmentTime::Symbolic(code) => write!(f, "{}", code),
        }
    }
}

/// Parses a strict 4-digit `HHMM` 24-hour code. `"0800"` parses; `"800"` and `"2500"` do not.
fn parse_hhmm(code: &str) -> Option<NaiveTime> {
    if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: u32 = code[..2].parse().ok()?;
    let minutes: u32 = code[2..].parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}
