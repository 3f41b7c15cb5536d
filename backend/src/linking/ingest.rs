//! Record ingestion
//!
//! Normalizes raw daily records, classifies them against the home station
//! and splits them into an arrival pool and a departure pool, each leg tagged
//! with its matching key. Rejected records become warnings.

use crate::core::time::{parse_sdt, parse_time_of_day};
use crate::models::{normalize_airline, normalize_registration, normalize_suffix};
use crate::models::{DailyRecord, LinkWarning};
use crate::station::{classify_station, LegDirection};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Admissibility key: an arrival may only pair with a departure with an equal key.
///
/// Service type is deliberately not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchKey {
    pub registration: String,
    pub airline: String,
    pub flight_number: u32,
    pub suffix: String,
    pub remote: String,
}

/// A normalized, classified, timestamped record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLeg {
    /// Position in the input slice
    pub source_index: usize,
    pub direction: LegDirection,
    pub key: MatchKey,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub timestamp: NaiveDateTime,
}

/// Arrival and departure pools in input order
#[derive(Debug, Clone, Default)]
pub struct IngestedPools {
    pub arrivals: Vec<ClassifiedLeg>,
    pub departures: Vec<ClassifiedLeg>,
    pub warnings: Vec<LinkWarning>,
}

/// Classify every record relative to `home`.
pub fn ingest_records(records: &[DailyRecord], home: &str) -> IngestedPools {
    let mut pools = IngestedPools::default();

    for (source_index, record) in records.iter().enumerate() {
        match ingest_record(source_index, record, home) {
            Ok(leg) => match leg.direction {
                LegDirection::Arrival => pools.arrivals.push(leg),
                LegDirection::Departure => pools.departures.push(leg),
            },
            Err(warning) => {
                tracing::warn!(record = source_index, %warning, "skipping record");
                pools.warnings.push(warning);
            }
        }
    }

    pools
}

fn ingest_record(
    source_index: usize,
    record: &DailyRecord,
    home: &str,
) -> Result<ClassifiedLeg, LinkWarning> {
    let registration = normalize_registration(record.registration.as_deref())
        .ok_or_else(|| LinkWarning::MissingRegistration {
            flight: record.label(),
        })?;

    let airline = normalize_airline(record.airline.as_deref());
    let (airline, flight_number) = match (airline, record.flight_number) {
        (Some(airline), Some(number)) if number > 0 => (airline, number),
        _ => {
            return Err(LinkWarning::MissingFlightIdentity {
                flight: record.label(),
            })
        }
    };

    let classification =
        classify_station(&record.station, home).ok_or_else(|| {
            LinkWarning::UnclassifiableStation {
                flight: record.label(),
                station: record.station.clone(),
                home: home.trim().to_ascii_uppercase(),
            }
        })?;

    let raw_time = match classification.direction {
        LegDirection::Arrival => record.sta.as_deref(),
        LegDirection::Departure => record.std.as_deref(),
    };
    let parsed = parse_sdt(&record.sdt).zip(raw_time.and_then(parse_time_of_day));
    let (date, time) = parsed.ok_or_else(|| LinkWarning::InvalidTime {
        flight: record.label(),
        direction: classification.direction,
        sdt: record.sdt.clone(),
        time: raw_time.map(str::to_string),
    })?;

    Ok(ClassifiedLeg {
        source_index,
        direction: classification.direction,
        key: MatchKey {
            registration,
            airline,
            flight_number,
            suffix: normalize_suffix(record.suffix.as_deref()),
            remote: classification.remote,
        },
        date,
        time,
        timestamp: date.and_time(time),
    })
}
