//! Station classification relative to a home station
//!
//! A station string encodes one movement as `"ORG-DST"`. Relative to the home
//! station a leg is an arrival (`XXX-HOME`) or a departure (`HOME-XXX`); the
//! other token is the remote station. Anything else is unclassifiable.
//!
//! Both the pair generator and the record linker go through this module so
//! the two directions agree on what a valid station string is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a leg at the home station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegDirection {
    #[serde(rename = "ARR")]
    Arrival,
    #[serde(rename = "DEP")]
    Departure,
}

impl LegDirection {
    /// Sheet tag, `ARR` or `DEP`
    pub fn code(self) -> &'static str {
        match self {
            LegDirection::Arrival => "ARR",
            LegDirection::Departure => "DEP",
        }
    }
}

impl fmt::Display for LegDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A successfully classified station string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub direction: LegDirection,
    /// Origin token, uppercased
    pub origin: String,
    /// Destination token, uppercased
    pub destination: String,
    /// The non-home token, uppercased
    pub remote: String,
}

/// True for exactly three ASCII letters, either case.
pub fn is_station_code(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Classify `station` relative to `home`.
///
/// Returns `None` unless the string splits on `-` into exactly two 3-letter
/// tokens of which exactly one equals `home` (case-insensitive).
///
/// # Example
/// ```
/// use flight_schedule_core_rs::station::{classify_station, LegDirection};
///
/// let arr = classify_station("ist-adb", "ADB").unwrap();
/// assert_eq!(arr.direction, LegDirection::Arrival);
/// assert_eq!(arr.remote, "IST");
///
/// assert!(classify_station("IST-CDG", "ADB").is_none());
/// ```
pub fn classify_station(station: &str, home: &str) -> Option<Classification> {
    let mut tokens = station.split('-').map(str::trim);
    let (origin, destination) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(origin), Some(destination), None) => (origin, destination),
        _ => return None,
    };
    if !is_station_code(origin) || !is_station_code(destination) {
        return None;
    }

    let home = home.trim().to_ascii_uppercase();
    let origin = origin.to_ascii_uppercase();
    let destination = destination.to_ascii_uppercase();

    let (direction, remote) = match (origin == home, destination == home) {
        (false, true) => (LegDirection::Arrival, origin.clone()),
        (true, false) => (LegDirection::Departure, destination.clone()),
        // Neither or both tokens are home
        _ => return None,
    };

    Some(Classification {
        direction,
        origin,
        destination,
        remote,
    })
}

/// Station string for an arrival from `remote` into `home`
pub fn arrival_station(remote: &str, home: &str) -> String {
    format!("{remote}-{home}")
}

/// Station string for a departure from `home` to `remote`
pub fn departure_station(home: &str, remote: &str) -> String {
    format!("{home}-{remote}")
}
