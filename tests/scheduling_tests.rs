use chrono::{TimeZone, Utc};
use chrono_tz::Tz;

use yard_checkin::config::YardSettings;
use yard_checkin::errors::CheckInError;
use yard_checkin::models::appointment::DEFAULT_SYMBOLIC_CODES;
use yard_checkin::scheduling::{AdherenceCalculator, AppointmentAdherence, Detention};
use yard_checkin::AppointmentTime;

const YARD_TZ: &str = "America/Indiana/Indianapolis";

fn create_yard_settings() -> YardSettings {
    YardSettings {
        first_dock: 1,
        last_dock: 70,
        include_ramp: true,
        timezone: YARD_TZ.to_string(),
        detention_grace_minutes: 120,
        on_time_tolerance_minutes: 0,
        symbolic_codes: DEFAULT_SYMBOLIC_CODES.clone(),
    }
}

fn create_calculator() -> AdherenceCalculator {
    AdherenceCalculator::new(&create_yard_settings()).expect("timezone should resolve")
}

fn appointment(code: &str) -> AppointmentTime {
    AppointmentTime::parse(code, &DEFAULT_SYMBOLIC_CODES).unwrap()
}

/// An absolute instant from yard-local wall-clock time.
fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> chrono::DateTime<Utc> {
    let tz: Tz = YARD_TZ.parse().unwrap();
    tz.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn parses_fixed_and_symbolic_codes() {
    let fixed = appointment("0800");
    assert!(fixed.is_timed());
    assert_eq!(fixed.minutes_of_day(), Some(480));
    assert_eq!(fixed.to_string(), "08:00");

    let symbolic = AppointmentTime::parse("Work_In", &DEFAULT_SYMBOLIC_CODES).unwrap();
    assert_eq!(symbolic, AppointmentTime::Symbolic("work_in".to_string()));
    assert!(!symbolic.is_timed());
    assert_eq!(symbolic.minutes_of_day(), None);
}

#[test]
fn rejects_malformed_codes() {
    for bad in ["800", "2500", "0860", "8 AM", "tomorrow", ""] {
        assert!(
            matches!(
                AppointmentTime::parse(bad, &DEFAULT_SYMBOLIC_CODES),
                Err(CheckInError::InvalidAppointmentCode(_))
            ),
            "{:?} should be rejected",
            bad
        );
    }
}

#[test]
fn check_in_before_slot_is_on_time() {
    let calc = create_calculator();
    let appt = appointment("1400");

    let adherence = calc.classify(Some(&appt), local(2025, 1, 15, 13, 55));
    assert_eq!(adherence, AppointmentAdherence::OnTime { delta_minutes: -5 });
    assert!(adherence.is_on_time());

    // Exactly on the slot still counts
    let adherence = calc.classify(Some(&appt), local(2025, 1, 15, 14, 0));
    assert_eq!(adherence, AppointmentAdherence::OnTime { delta_minutes: 0 });
}

#[test]
fn check_in_after_slot_is_late() {
    let calc = create_calculator();
    let appt = appointment("1400");

    let adherence = calc.classify(Some(&appt), local(2025, 1, 15, 14, 5));
    assert_eq!(adherence, AppointmentAdherence::Late { delta_minutes: 5 });
    assert!(!adherence.is_on_time());
}

#[test]
fn tolerance_window_is_configurable() {
    let mut yard = create_yard_settings();
    yard.on_time_tolerance_minutes = 15;
    let calc = AdherenceCalculator::new(&yard).unwrap();
    let appt = appointment("1400");

    assert!(calc.classify(Some(&appt), local(2025, 1, 15, 14, 10)).is_on_time());
    assert!(!calc.classify(Some(&appt), local(2025, 1, 15, 14, 20)).is_on_time());
}

#[test]
fn symbolic_codes_are_never_classified() {
    let calc = create_calculator();
    for code in ["work_in", "paid_to_load", "paid_charge_customer", "LTL"] {
        let appt = appointment(code);
        assert_eq!(
            calc.classify(Some(&appt), local(2025, 1, 15, 23, 59)),
            AppointmentAdherence::NotTimed
        );
    }
    assert_eq!(calc.classify(None, local(2025, 1, 15, 8, 0)), AppointmentAdherence::NotTimed);
}

#[test]
fn classification_is_dst_correct_across_seasons() {
    let calc = create_calculator();
    let appt = appointment("1400");

    // Winter: 13:55 local is 18:55 UTC (EST, UTC-5)
    let winter = Utc.with_ymd_and_hms(2025, 1, 15, 18, 55, 0).unwrap();
    assert!(calc.classify(Some(&appt), winter).is_on_time());

    // Summer: 17:55 UTC is 13:55 local (EDT, UTC-4); a hardcoded -5h offset
    // would call this 12:55 and hide a late arrival at 18:05 UTC
    let summer = Utc.with_ymd_and_hms(2025, 7, 15, 17, 55, 0).unwrap();
    assert!(calc.classify(Some(&appt), summer).is_on_time());
    let summer_late = Utc.with_ymd_and_hms(2025, 7, 15, 18, 5, 0).unwrap();
    assert_eq!(
        calc.classify(Some(&appt), summer_late),
        AppointmentAdherence::Late { delta_minutes: 5 }
    );
}

#[test]
fn detention_accrues_beyond_grace() {
    let calc = create_calculator();
    let appt = appointment("0800");
    let check_in = local(2025, 1, 15, 7, 50);

    // Completed 10:30 local: 150 minutes elapsed, 120 grace -> 30 minutes billable
    let detention = calc.detention(Some(&appt), check_in, Some(local(2025, 1, 15, 10, 30)));
    assert_eq!(detention, Detention::Accrued { minutes: 30 });

    // Completed 09:45 local: 105 minutes elapsed, within grace
    let detention = calc.detention(Some(&appt), check_in, Some(local(2025, 1, 15, 9, 45)));
    assert_eq!(detention, Detention::WithinGrace);
}

#[test]
fn detention_requires_an_on_time_timed_completed_load() {
    let calc = create_calculator();
    let appt = appointment("0800");

    // Late check-in never accrues detention
    let late_check_in = local(2025, 1, 15, 8, 20);
    assert_eq!(
        calc.detention(Some(&appt), late_check_in, Some(local(2025, 1, 15, 12, 0))),
        Detention::NotApplicable
    );

    // Symbolic appointments never produce a numeric value
    let symbolic = appointment("work_in");
    assert_eq!(
        calc.detention(Some(&symbolic), local(2025, 1, 15, 7, 0), Some(local(2025, 1, 15, 15, 0))),
        Detention::NotApplicable
    );

    // Still loading: no end_time yet
    assert_eq!(
        calc.detention(Some(&appt), local(2025, 1, 15, 7, 50), None),
        Detention::NotApplicable
    );

    assert_eq!(
        calc.detention(None, local(2025, 1, 15, 7, 50), Some(local(2025, 1, 15, 12, 0))),
        Detention::NotApplicable
    );
}

#[test]
fn spring_forward_gap_shifts_the_slot_instead_of_dropping_it() {
    let calc = create_calculator();
    // 02:30 local does not exist on 2025-03-09; the slot lands when the wall
    // clock actually reaches it, 03:30 EDT (07:30 UTC)
    let appt = appointment("0230");
    let check_in = Utc.with_ymd_and_hms(2025, 3, 9, 6, 30, 0).unwrap(); // 01:30 EST

    let end = Utc.with_ymd_and_hms(2025, 3, 9, 9, 30, 0).unwrap(); // 05:30 EDT
    assert_eq!(calc.detention(Some(&appt), check_in, Some(end)), Detention::WithinGrace);

    let end = Utc.with_ymd_and_hms(2025, 3, 9, 9, 31, 0).unwrap();
    assert_eq!(
        calc.detention(Some(&appt), check_in, Some(end)),
        Detention::Accrued { minutes: 1 }
    );
}
