//! Auto-link: partition without matching
//!
//! Emits one half-filled linked row per classifiable record. No timing or key
//! matching is attempted.

use crate::core::time::normalize_hhmm_prefix;
use crate::models::{normalize_airline, normalize_suffix, AutoLinkedRow, DailyRecord};
use crate::station::{classify_station, LegDirection};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoLinkStats {
    pub total: usize,
    pub arrivals: usize,
    pub departures: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutoLinkOutcome {
    pub rows: Vec<AutoLinkedRow>,
    pub stats: AutoLinkStats,
}

/// Partition `records` into arrival rows and departure rows, in input order.
pub fn auto_link_records(records: &[DailyRecord], home: &str) -> AutoLinkOutcome {
    let mut outcome = AutoLinkOutcome {
        rows: Vec::with_capacity(records.len()),
        stats: AutoLinkStats {
            total: records.len(),
            ..AutoLinkStats::default()
        },
    };

    for record in records {
        let Some(classification) = classify_station(&record.station, home) else {
            tracing::debug!(station = %record.station, flight = %record.label(), "auto-link skip");
            outcome.stats.skipped += 1;
            continue;
        };

        // Same code normalization as linker ingestion
        let airline = normalize_airline(record.airline.as_deref()).unwrap_or_default();
        let suffix = normalize_suffix(record.suffix.as_deref());
        let sdt = record.sdt.trim().to_string();
        let mut row = AutoLinkedRow {
            registration: record.registration.as_deref().unwrap_or("").trim().to_string(),
            ..AutoLinkedRow::default()
        };

        match classification.direction {
            LegDirection::Arrival => {
                outcome.stats.arrivals += 1;
                row.arr_airline = airline;
                row.arr_flight_number = record.flight_number;
                row.arr_suffix = suffix;
                row.arr_sdt = sdt;
                row.arr_sta = normalized_time(record.sta.as_deref());
            }
            LegDirection::Departure => {
                outcome.stats.departures += 1;
                row.dep_airline = airline;
                row.dep_flight_number = record.flight_number;
                row.dep_suffix = suffix;
                row.dep_sdt = sdt;
                row.dep_std = normalized_time(record.std.as_deref());
            }
        }
        outcome.rows.push(row);
    }

    outcome
}

fn normalized_time(raw: Option<&str>) -> String {
    raw.and_then(normalize_hhmm_prefix).unwrap_or_default()
}
