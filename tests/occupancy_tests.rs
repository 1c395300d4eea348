use std::collections::HashMap;
use chrono::{TimeZone, Utc};

use yard_checkin::config::YardSettings;
use yard_checkin::models::{LoadRecord, LoadStatus, RAMP_SENTINEL};
use yard_checkin::occupancy::OccupancyResolver;
use yard_checkin::DockStatus;

fn create_yard_settings() -> YardSettings {
    YardSettings {
        first_dock: 1,
        last_dock: 70,
        include_ramp: true,
        timezone: "America/Indiana/Indianapolis".to_string(),
        detention_grace_minutes: 120,
        on_time_tolerance_minutes: 0,
        symbolic_codes: vec![
            "work_in".to_string(),
            "paid_to_load".to_string(),
            "paid_charge_customer".to_string(),
            "LTL".to_string(),
        ],
    }
}

fn create_record(id: &str, dock: Option<&str>, status: LoadStatus) -> LoadRecord {
    let check_in = Utc.with_ymd_and_hms(2025, 1, 15, 13, 0, 0).unwrap();
    let mut record = LoadRecord::new(id, format!("PO-{}", id), "Jess Carter", "Maple Freight", check_in);
    record.dock_number = dock.map(str::to_string);
    record.status = status;
    record
}

#[test]
fn every_configured_dock_appears_exactly_once() {
    let resolver = OccupancyResolver::new(&create_yard_settings());
    let occupancy = resolver.resolve(&[], &HashMap::new());

    // 70 numbered docks plus the ramp
    assert_eq!(occupancy.docks.len(), 71);
    let mut seen: Vec<&str> = occupancy.docks.iter().map(|d| d.dock_number.as_str()).collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 71, "no dock may appear twice");
    assert!(occupancy.docks.iter().all(|d| d.status == DockStatus::Available));
}

#[test]
fn occupancy_counts_drive_status() {
    let resolver = OccupancyResolver::new(&create_yard_settings());
    let records = vec![
        create_record("a", Some("5"), LoadStatus::CheckedIn),
        create_record("b", Some("7"), LoadStatus::Loading),
        create_record("c", Some("7"), LoadStatus::Assigned),
        create_record("d", Some("9"), LoadStatus::Completed),
    ];
    let occupancy = resolver.resolve(&records, &HashMap::new());

    assert_eq!(occupancy.dock("5").unwrap().status, DockStatus::InUse);
    assert_eq!(occupancy.dock("5").unwrap().occupants.len(), 1);

    assert_eq!(occupancy.dock("7").unwrap().status, DockStatus::DoubleBooked);
    assert_eq!(occupancy.dock("7").unwrap().occupants.len(), 2);

    // Completed records never occupy a dock regardless of dock_number
    assert_eq!(occupancy.dock("9").unwrap().status, DockStatus::Available);
}

#[test]
fn all_active_statuses_occupy() {
    let resolver = OccupancyResolver::new(&create_yard_settings());
    for status in [
        LoadStatus::Pending,
        LoadStatus::CheckedIn,
        LoadStatus::Assigned,
        LoadStatus::Loading,
    ] {
        let occupancy = resolver.resolve(&[create_record("x", Some("3"), status)], &HashMap::new());
        assert_eq!(occupancy.dock("3").unwrap().status, DockStatus::InUse);
    }
    for status in [LoadStatus::Completed, LoadStatus::CheckedOut, LoadStatus::Departed] {
        let occupancy = resolver.resolve(&[create_record("x", Some("3"), status)], &HashMap::new());
        assert_eq!(occupancy.dock("3").unwrap().status, DockStatus::Available);
    }
}

#[test]
fn blocked_takes_precedence_and_suppresses_occupants() {
    let resolver = OccupancyResolver::new(&create_yard_settings());
    let records = vec![
        create_record("a", Some("12"), LoadStatus::Loading),
        create_record("b", Some("12"), LoadStatus::CheckedIn),
    ];
    let mut blocks = HashMap::new();
    blocks.insert("12".to_string(), "Dropped trailer".to_string());

    let occupancy = resolver.resolve(&records, &blocks);
    let dock = occupancy.dock("12").unwrap();

    assert_eq!(dock.status, DockStatus::Blocked);
    assert_eq!(dock.blocked_reason.as_deref(), Some("Dropped trailer"));
    assert!(dock.occupants.is_empty(), "occupants are not surfaced as in-use");
}

#[test]
fn unknown_dock_records_are_dropped_not_fatal() {
    let resolver = OccupancyResolver::new(&create_yard_settings());
    let records = vec![
        create_record("a", Some("99"), LoadStatus::CheckedIn),
        create_record("b", Some("4"), LoadStatus::CheckedIn),
    ];
    let occupancy = resolver.resolve(&records, &HashMap::new());

    assert_eq!(occupancy.docks.len(), 71);
    assert_eq!(occupancy.dock("4").unwrap().status, DockStatus::InUse);
    assert!(occupancy.dock("99").is_none());
}

#[test]
fn ramp_participates_only_when_configured() {
    let mut yard = create_yard_settings();
    let records = vec![
        create_record("a", Some(RAMP_SENTINEL), LoadStatus::CheckedIn),
        create_record("b", Some(RAMP_SENTINEL), LoadStatus::Assigned),
    ];

    let occupancy = OccupancyResolver::new(&yard).resolve(&records, &HashMap::new());
    assert_eq!(
        occupancy.dock(RAMP_SENTINEL).unwrap().status,
        DockStatus::DoubleBooked
    );

    yard.include_ramp = false;
    let occupancy = OccupancyResolver::new(&yard).resolve(&records, &HashMap::new());
    assert!(occupancy.dock(RAMP_SENTINEL).is_none());
    assert_eq!(occupancy.docks.len(), 70);
}

#[test]
fn resolver_is_idempotent() {
    let resolver = OccupancyResolver::new(&create_yard_settings());
    let records = vec![
        create_record("a", Some("5"), LoadStatus::CheckedIn),
        create_record("b", Some("7"), LoadStatus::Loading),
        create_record("c", Some("7"), LoadStatus::Assigned),
    ];
    let mut blocks = HashMap::new();
    blocks.insert("2".to_string(), "Leveler repair".to_string());

    let first = resolver.resolve(&records, &blocks);
    let second = resolver.resolve(&records, &blocks);
    assert_eq!(first, second);
}

#[test]
fn explicit_dock_set_constructor_matches_configured_set() {
    let resolver = OccupancyResolver::with_dock_set(vec!["12".to_string(), "13".to_string()]);
    let records = vec![create_record("a", Some("12"), LoadStatus::CheckedIn)];
    let occupancy = resolver.resolve(&records, &HashMap::new());

    assert_eq!(occupancy.docks.len(), 2);
    assert_eq!(occupancy.dock("12").unwrap().status, DockStatus::InUse);
    assert_eq!(occupancy.dock("13").unwrap().status, DockStatus::Available);
    assert_eq!(occupancy.count(DockStatus::InUse), 1);
}

#[test]
fn yard_settings_dock_set_and_membership() {
    let yard = create_yard_settings();
    let docks = yard.dock_set();
    assert_eq!(docks.len(), 71);
    assert_eq!(docks.first().map(String::as_str), Some("1"));
    assert_eq!(docks.last().map(String::as_str), Some(RAMP_SENTINEL));

    assert!(yard.is_known_dock("1"));
    assert!(yard.is_known_dock("70"));
    assert!(yard.is_known_dock(RAMP_SENTINEL));
    assert!(!yard.is_known_dock("0"));
    assert!(!yard.is_known_dock("71"));
    assert!(!yard.is_known_dock("dock 5"));
}
