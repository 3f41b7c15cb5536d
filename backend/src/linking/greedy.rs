//! Greedy earliest-first matcher
//!
//! # Algorithm
//!
//! 1. Sort arrivals and departures ascending by timestamp (stable, so equal
//!    timestamps keep input order)
//! 2. Index departures by matching key, each list ascending by timestamp
//! 3. For each arrival in order, take the first unconsumed candidate that is
//!    strictly later and at least `min_ground_minutes` after it, and consume it
//!
//! Single pass, no backtracking. An earlier arrival may claim a departure a
//! later arrival could also have used; no global reassignment is attempted,
//! so the result is not guaranteed to be a maximum matching.

use crate::core::time::{format_hhmm, format_sdt};
use crate::linking::ingest::{ingest_records, ClassifiedLeg, MatchKey};
use crate::linking::LinkerConfig;
use crate::models::{DailyRecord, LinkWarning, LinkedPair};
use std::collections::HashMap;

/// Reconciliation counters and accumulated warnings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Arrivals that passed ingestion
    pub total_arrivals: usize,
    /// Departures that passed ingestion
    pub total_departures: usize,
    pub matched: usize,
    pub unmatched_arrivals: usize,
    /// Departures never consumed
    pub unmatched_departures: usize,
    pub warnings: Vec<LinkWarning>,
}

/// Linked pairs in arrival order, plus statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOutcome {
    pub linked: Vec<LinkedPair>,
    pub stats: LinkStats,
}

/// Reconcile single-leg records into turnaround pairs.
///
/// # Example
/// ```
/// use flight_schedule_core_rs::linking::{link_records, LinkerConfig};
/// use flight_schedule_core_rs::DailyRecord;
///
/// let records = vec![
///     DailyRecord::new("TK", 100, "IST-ADB", "20240101")
///         .with_sta("08:00")
///         .with_registration("TC1"),
///     DailyRecord::new("TK", 100, "ADB-IST", "20240101")
///         .with_std("09:00")
///         .with_registration("TC1"),
/// ];
///
/// let outcome = link_records(&records, &LinkerConfig::new("ADB", 30));
/// assert_eq!(outcome.stats.matched, 1);
/// assert_eq!(outcome.linked[0].arr_sta, "08:00");
/// assert_eq!(outcome.linked[0].dep_std, "09:00");
/// ```
pub fn link_records(records: &[DailyRecord], config: &LinkerConfig) -> LinkOutcome {
    let pools = ingest_records(records, &config.home);
    let total_arrivals = pools.arrivals.len();
    let total_departures = pools.departures.len();

    let (linked, consumed) =
        match_greedy(pools.arrivals, pools.departures, config.min_ground_minutes);

    let stats = LinkStats {
        total_arrivals,
        total_departures,
        matched: linked.len(),
        unmatched_arrivals: total_arrivals - linked.len(),
        unmatched_departures: total_departures - consumed,
        warnings: pools.warnings,
    };

    tracing::debug!(
        home = %config.home,
        arrivals = stats.total_arrivals,
        departures = stats.total_departures,
        matched = stats.matched,
        warnings = stats.warnings.len(),
        "linked daily records"
    );

    LinkOutcome { linked, stats }
}

/// Run the greedy pass; returns the pairs and the number of consumed departures.
fn match_greedy(
    mut arrivals: Vec<ClassifiedLeg>,
    mut departures: Vec<ClassifiedLeg>,
    min_ground_minutes: i64,
) -> (Vec<LinkedPair>, usize) {
    arrivals.sort_by_key(|leg| leg.timestamp);
    departures.sort_by_key(|leg| leg.timestamp);

    let mut by_key: HashMap<&MatchKey, Vec<usize>> = HashMap::new();
    for (position, departure) in departures.iter().enumerate() {
        by_key.entry(&departure.key).or_default().push(position);
    }

    // Set once at match time, never cleared
    let mut consumed = vec![false; departures.len()];
    let mut linked = Vec::new();

    for arrival in &arrivals {
        let Some(candidates) = by_key.get(&arrival.key) else {
            continue;
        };

        let chosen = candidates.iter().copied().find(|&position| {
            let departure = &departures[position];
            !consumed[position]
                && departure.timestamp > arrival.timestamp
                && (departure.timestamp - arrival.timestamp).num_minutes() >= min_ground_minutes
        });

        if let Some(position) = chosen {
            consumed[position] = true;
            linked.push(to_linked_pair(arrival, &departures[position]));
        }
    }

    let consumed_count = consumed.iter().filter(|&&c| c).count();
    (linked, consumed_count)
}

fn to_linked_pair(arrival: &ClassifiedLeg, departure: &ClassifiedLeg) -> LinkedPair {
    LinkedPair {
        arr_airline: arrival.key.airline.clone(),
        arr_flight_number: arrival.key.flight_number,
        arr_suffix: arrival.key.suffix.clone(),
        arr_sdt: format_sdt(arrival.date),
        arr_sta: format_hhmm(arrival.time),
        registration: arrival.key.registration.clone(),
        dep_airline: departure.key.airline.clone(),
        dep_flight_number: departure.key.flight_number,
        dep_suffix: departure.key.suffix.clone(),
        dep_sdt: format_sdt(departure.date),
        dep_std: format_hhmm(departure.time),
        ground_minutes: (departure.timestamp - arrival.timestamp).num_minutes(),
    }
}
