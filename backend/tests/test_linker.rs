//! Record linker integration tests
//!
//! Reconciliation scenarios, key admissibility, greedy tie-breaking and
//! property checks over random daily sheets.

use flight_schedule_core_rs::linking::{link_records, LinkOutcome, LinkerConfig};
use flight_schedule_core_rs::{DailyRecord, LinkWarning};
use proptest::prelude::*;
use std::collections::HashMap;

fn arrival(flight: u32, sdt: &str, sta: &str, reg: &str) -> DailyRecord {
    DailyRecord::new("TK", flight, "IST-ADB", sdt)
        .with_sta(sta)
        .with_registration(reg)
}

fn departure(flight: u32, sdt: &str, std: &str, reg: &str) -> DailyRecord {
    DailyRecord::new("TK", flight, "ADB-IST", sdt)
        .with_std(std)
        .with_registration(reg)
}

fn link(records: &[DailyRecord]) -> LinkOutcome {
    link_records(records, &LinkerConfig::new("ADB", 30))
}

fn assert_counts_consistent(outcome: &LinkOutcome) {
    let stats = &outcome.stats;
    assert_eq!(stats.matched, outcome.linked.len());
    assert_eq!(stats.matched + stats.unmatched_arrivals, stats.total_arrivals);
    assert_eq!(stats.matched + stats.unmatched_departures, stats.total_departures);
}

// ============================================================================
// Reconciliation Scenarios
// ============================================================================

#[test]
fn test_simple_match() {
    let outcome = link(&[
        arrival(100, "20240101", "08:00", "TC1"),
        departure(100, "20240101", "09:00", "TC1"),
    ]);

    assert_eq!(outcome.stats.matched, 1);
    assert_eq!(outcome.stats.unmatched_arrivals, 0);
    assert_eq!(outcome.stats.unmatched_departures, 0);

    let pair = &outcome.linked[0];
    assert_eq!(pair.arr_sta, "08:00");
    assert_eq!(pair.dep_std, "09:00");
    assert_eq!(pair.arr_suffix, "O");
    assert_eq!(pair.arr_sdt, "20240101");
    assert_eq!(pair.registration, "TC1");
    assert_eq!(pair.ground_minutes, 60);
    assert_counts_consistent(&outcome);
}

#[test]
fn test_ground_time_violation() {
    let outcome = link(&[
        arrival(100, "20240101", "08:00", "TC1"),
        departure(100, "20240101", "08:10", "TC1"),
    ]);

    assert_eq!(outcome.stats.matched, 0);
    assert_eq!(outcome.stats.unmatched_arrivals, 1);
    assert_eq!(outcome.stats.unmatched_departures, 1);
    assert!(outcome.linked.is_empty());
}

#[test]
fn test_unclassifiable_station_excluded_with_warning() {
    let outcome = link(&[
        arrival(100, "20240101", "08:00", "TC1"),
        DailyRecord::new("TK", 200, "IST-CDG", "20240101")
            .with_sta("08:00")
            .with_registration("TC2"),
        departure(100, "20240101", "09:00", "TC1"),
    ]);

    assert_eq!(outcome.stats.total_arrivals, 1);
    assert_eq!(outcome.stats.total_departures, 1);
    assert_eq!(outcome.stats.matched, 1);
    assert_eq!(outcome.stats.warnings.len(), 1);
    assert!(matches!(
        &outcome.stats.warnings[0],
        LinkWarning::UnclassifiableStation { station, home, .. }
            if station == "IST-CDG" && home == "ADB"
    ));
}

#[test]
fn test_home_on_both_sides_is_unclassifiable() {
    let outcome = link(&[DailyRecord::new("TK", 1, "ADB-ADB", "20240101")
        .with_sta("08:00")
        .with_registration("TC1")]);

    assert_eq!(outcome.stats.total_arrivals + outcome.stats.total_departures, 0);
    assert_eq!(outcome.stats.warnings.len(), 1);
}

// ============================================================================
// Ingestion Rejections
// ============================================================================

#[test]
fn test_rejections_accumulate_as_warnings() {
    let mut no_airline = arrival(100, "20240101", "08:00", "TC1");
    no_airline.airline = None;
    let mut no_number = arrival(100, "20240101", "08:00", "TC1");
    no_number.flight_number = None;

    let outcome = link(&[
        DailyRecord::new("TK", 100, "IST-ADB", "20240101").with_sta("08:00"),
        arrival(100, "20240101", "8h00", "TC1"),
        departure(100, "2024-01-01", "09:00", "TC1"),
        DailyRecord::new("TK", 100, "ADB-IST", "20240101").with_registration("TC1"),
        no_airline,
        no_number,
        arrival(100, "20240101", "08:00", "  "),
    ]);

    assert_eq!(outcome.stats.total_arrivals, 0);
    assert_eq!(outcome.stats.total_departures, 0);
    assert_eq!(outcome.stats.warnings.len(), 7);

    let missing_reg = outcome
        .stats
        .warnings
        .iter()
        .filter(|w| matches!(w, LinkWarning::MissingRegistration { .. }))
        .count();
    let missing_identity = outcome
        .stats
        .warnings
        .iter()
        .filter(|w| matches!(w, LinkWarning::MissingFlightIdentity { .. }))
        .count();
    let invalid_time = outcome
        .stats
        .warnings
        .iter()
        .filter(|w| matches!(w, LinkWarning::InvalidTime { .. }))
        .count();
    assert_eq!((missing_reg, missing_identity, invalid_time), (2, 2, 3));
}

#[test]
fn test_malformed_flight_number_cell_becomes_warning() {
    let sheet = "\
Airline,Operator Flight Number,Flight Suffix,Station,SDT,STA,STD,REG
TK,N/A,,IST-ADB,20240101,07:00,,TC9
TK,100,,IST-ADB,20240101,08:00,,TC1
TK,100,,ADB-IST,20240101,,09:00,TC1
";
    let records: Vec<DailyRecord> = csv::Reader::from_reader(sheet.as_bytes())
        .deserialize()
        .collect::<Result<_, _>>()
        .unwrap();

    let outcome = link(&records);
    assert_eq!(outcome.stats.matched, 1);
    assert_eq!(outcome.stats.warnings.len(), 1);
    assert!(matches!(
        &outcome.stats.warnings[0],
        LinkWarning::MissingFlightIdentity { flight } if flight == "TK"
    ));
}

#[test]
fn test_seconds_precision_times_are_accepted() {
    let outcome = link(&[
        arrival(100, "20240101", "08:00:59", "TC1"),
        departure(100, "20240101", "09:15:00", "TC1"),
    ]);

    assert_eq!(outcome.stats.matched, 1);
    assert_eq!(outcome.linked[0].arr_sta, "08:00");
    assert_eq!(outcome.linked[0].dep_std, "09:15");
}

#[test]
fn test_registration_is_normalized() {
    let outcome = link(&[
        arrival(100, "20240101", "08:00", " tc-jfk"),
        departure(100, "20240101", "09:00", "TC-JFK "),
    ]);

    assert_eq!(outcome.stats.matched, 1);
    assert_eq!(outcome.linked[0].registration, "TC-JFK");
}

// ============================================================================
// Matching Key
// ============================================================================

#[test]
fn test_key_mismatches_block_pairing() {
    let cases = vec![
        // Different registration
        departure(100, "20240101", "09:00", "TC2"),
        // Different flight number
        departure(101, "20240101", "09:00", "TC1"),
        // Different suffix
        departure(100, "20240101", "09:00", "TC1").with_suffix("A"),
        // Different remote
        DailyRecord::new("TK", 100, "ADB-FRA", "20240101")
            .with_std("09:00")
            .with_registration("TC1"),
        // Different airline
        DailyRecord::new("PC", 100, "ADB-IST", "20240101")
            .with_std("09:00")
            .with_registration("TC1"),
    ];

    for dep in cases {
        let outcome = link(&[arrival(100, "20240101", "08:00", "TC1"), dep.clone()]);
        assert_eq!(outcome.stats.matched, 0, "unexpected match with {dep:?}");
        assert_eq!(outcome.stats.total_departures, 1);
    }
}

#[test]
fn test_blank_suffix_matches_explicit_o() {
    let outcome = link(&[
        arrival(100, "20240101", "08:00", "TC1").with_suffix(" "),
        departure(100, "20240101", "09:00", "TC1").with_suffix("o"),
    ]);
    assert_eq!(outcome.stats.matched, 1);
}

#[test]
fn test_service_type_not_part_of_key() {
    let outcome = link(&[
        arrival(100, "20240101", "08:00", "TC1").with_service_type("J"),
        departure(100, "20240101", "09:00", "TC1").with_service_type("C"),
    ]);
    assert_eq!(outcome.stats.matched, 1);
}

// ============================================================================
// Greedy Assignment
// ============================================================================

#[test]
fn test_earlier_arrival_claims_shared_departure() {
    // Input order is deliberately reversed; sorting decides priority
    let outcome = link(&[
        departure(100, "20240101", "09:00", "TC1"),
        arrival(100, "20240101", "08:10", "TC1"),
        arrival(100, "20240101", "08:00", "TC1"),
    ]);

    assert_eq!(outcome.stats.matched, 1);
    assert_eq!(outcome.stats.unmatched_arrivals, 1);
    assert_eq!(outcome.linked[0].arr_sta, "08:00");
}

#[test]
fn test_first_eligible_departure_is_chosen() {
    let outcome = link(&[
        arrival(100, "20240101", "08:00", "TC1"),
        departure(100, "20240101", "12:00", "TC1"),
        departure(100, "20240101", "08:15", "TC1"),
        departure(100, "20240101", "09:00", "TC1"),
    ]);

    assert_eq!(outcome.stats.matched, 1);
    assert_eq!(outcome.linked[0].dep_std, "09:00");
    assert_eq!(outcome.stats.unmatched_departures, 2);
}

#[test]
fn test_rotation_through_the_day() {
    let outcome = link(&[
        arrival(100, "20240101", "06:00", "TC1"),
        departure(100, "20240101", "07:00", "TC1"),
        arrival(100, "20240101", "10:00", "TC1"),
        departure(100, "20240101", "11:00", "TC1"),
        arrival(100, "20240101", "22:45", "TC1"),
        departure(100, "20240102", "05:30", "TC1"),
    ]);

    assert_eq!(outcome.stats.matched, 3);
    let ground: Vec<i64> = outcome.linked.iter().map(|p| p.ground_minutes).collect();
    assert_eq!(ground, vec![60, 60, 405]);
    assert_eq!(outcome.linked[2].dep_sdt, "20240102");
    assert_counts_consistent(&outcome);
}

#[test]
fn test_minimum_ground_time_is_configurable() {
    let records = [
        arrival(100, "20240101", "08:00", "TC1"),
        departure(100, "20240101", "09:00", "TC1"),
    ];

    assert_eq!(link_records(&records, &LinkerConfig::new("ADB", 60)).stats.matched, 1);
    assert_eq!(link_records(&records, &LinkerConfig::new("ADB", 61)).stats.matched, 0);
}

#[test]
fn test_empty_input() {
    let outcome = link(&[]);
    assert!(outcome.linked.is_empty());
    assert_eq!(outcome.stats.total_arrivals, 0);
    assert!(outcome.stats.warnings.is_empty());
}

// ============================================================================
// Properties
// ============================================================================

/// (is_arrival, registration index, minute of a two-day span)
fn arb_leg() -> impl Strategy<Value = (bool, usize, u32)> {
    (any::<bool>(), 0usize..3, 0u32..2880)
}

fn to_record((is_arrival, reg, minute): (bool, usize, u32)) -> DailyRecord {
    let sdt = if minute < 1440 { "20240101" } else { "20240102" };
    let time = format!("{:02}:{:02}", (minute % 1440) / 60, minute % 60);
    let reg = ["TC1", "TC2", "TC3"][reg];
    if is_arrival {
        arrival(100, sdt, &time, reg)
    } else {
        departure(100, sdt, &time, reg)
    }
}

fn minute_of(sdt: &str, hhmm: &str) -> i64 {
    let day = if sdt == "20240101" { 0 } else { 1440 };
    let hours: i64 = hhmm[0..2].parse().unwrap();
    let minutes: i64 = hhmm[3..5].parse().unwrap();
    day + hours * 60 + minutes
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn linking_is_sound(legs in prop::collection::vec(arb_leg(), 0..40), min_ground in 0i64..240) {
        let records: Vec<DailyRecord> = legs.iter().copied().map(to_record).collect();
        let outcome = link_records(&records, &LinkerConfig::new("ADB", min_ground));
        let stats = &outcome.stats;

        prop_assert!(stats.warnings.is_empty());
        prop_assert_eq!(stats.total_arrivals + stats.total_departures, records.len());
        prop_assert_eq!(stats.matched, outcome.linked.len());
        prop_assert_eq!(stats.matched + stats.unmatched_arrivals, stats.total_arrivals);
        prop_assert_eq!(stats.matched + stats.unmatched_departures, stats.total_departures);

        // Every departure record backs at most one pair
        let mut available: HashMap<(String, i64), usize> = HashMap::new();
        for record in records.iter().filter(|r| r.std.is_some()) {
            let key = (
                record.registration.clone().unwrap(),
                minute_of(&record.sdt, record.std.as_deref().unwrap()),
            );
            *available.entry(key).or_default() += 1;
        }

        for pair in &outcome.linked {
            let arr = minute_of(&pair.arr_sdt, &pair.arr_sta);
            let dep = minute_of(&pair.dep_sdt, &pair.dep_std);
            prop_assert!(dep > arr);
            prop_assert!(dep - arr >= min_ground);
            prop_assert_eq!(dep - arr, pair.ground_minutes);

            let slot = available.get_mut(&(pair.registration.clone(), dep));
            prop_assert!(slot.is_some(), "pair uses a departure that was never supplied");
            let slot = slot.unwrap();
            prop_assert!(*slot > 0, "departure consumed twice");
            *slot -= 1;
        }
    }

    #[test]
    fn linking_ignores_input_order(legs in prop::collection::vec(arb_leg(), 0..30)) {
        let records: Vec<DailyRecord> = legs.iter().copied().map(to_record).collect();
        let mut reversed = records.clone();
        reversed.reverse();

        let config = LinkerConfig::new("ADB", 30);
        let forward = link_records(&records, &config);
        let backward = link_records(&reversed, &config);

        // Ties at equal timestamps can swap which record is used, never how many
        prop_assert_eq!(forward.stats.matched, backward.stats.matched);
    }
}
