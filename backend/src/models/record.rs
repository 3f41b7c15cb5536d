//! Raw daily record
//!
//! One row of a daily flight sheet as handed to the linker. Every field is
//! optional or free text; normalization happens once, at ingestion, through
//! the helpers in this module.

use serde::{Deserialize, Serialize};

/// Suffix used when a record carries none
pub const DEFAULT_SUFFIX: &str = "O";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(rename = "Airline", default)]
    pub airline: Option<String>,

    /// Unparseable cells (`N/A`, `12A`) read as missing
    #[serde(
        rename = "Operator Flight Number",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub flight_number: Option<u32>,

    #[serde(rename = "Flight Suffix", default)]
    pub suffix: Option<String>,

    /// `ORG-DST`
    #[serde(rename = "Station", default)]
    pub station: String,

    /// `YYYYMMDD`
    #[serde(rename = "SDT", default)]
    pub sdt: String,

    /// Scheduled arrival, `HH:mm` or `HH:mm:ss`
    #[serde(rename = "STA", default)]
    pub sta: Option<String>,

    /// Scheduled departure, `HH:mm` or `HH:mm:ss`
    #[serde(rename = "STD", default)]
    pub std: Option<String>,

    #[serde(rename = "REG", default)]
    pub registration: Option<String>,

    #[serde(rename = "Flight Service Type", default)]
    pub service_type: Option<String>,
}

impl DailyRecord {
    /// Create a record with the identifying fields set
    ///
    /// # Example
    /// ```
    /// use flight_schedule_core_rs::DailyRecord;
    ///
    /// let rec = DailyRecord::new("TK", 100, "IST-ADB", "20240101")
    ///     .with_sta("08:00")
    ///     .with_registration("TC1");
    /// assert_eq!(rec.sta.as_deref(), Some("08:00"));
    /// ```
    pub fn new(airline: &str, flight_number: u32, station: &str, sdt: &str) -> Self {
        Self {
            airline: Some(airline.to_string()),
            flight_number: Some(flight_number),
            station: station.to_string(),
            sdt: sdt.to_string(),
            ..Self::default()
        }
    }

    pub fn with_sta(mut self, sta: &str) -> Self {
        self.sta = Some(sta.to_string());
        self
    }

    pub fn with_std(mut self, std: &str) -> Self {
        self.std = Some(std.to_string());
        self
    }

    pub fn with_registration(mut self, registration: &str) -> Self {
        self.registration = Some(registration.to_string());
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_string());
        self
    }

    pub fn with_service_type(mut self, service_type: &str) -> Self {
        self.service_type = Some(service_type.to_string());
        self
    }

    /// Human label for warnings, e.g. `TK100`
    pub fn label(&self) -> String {
        let airline = self.airline.as_deref().unwrap_or("").trim();
        match self.flight_number {
            Some(number) => format!("{airline}{number}"),
            None => airline.to_string(),
        }
    }
}

/// Blank or missing suffix → `"O"`, otherwise trimmed and uppercased
pub fn normalize_suffix(suffix: Option<&str>) -> String {
    normalize_code(suffix).unwrap_or_else(|| DEFAULT_SUFFIX.to_string())
}

/// Trimmed, uppercased registration, `None` when blank
pub fn normalize_registration(registration: Option<&str>) -> Option<String> {
    normalize_code(registration)
}

/// Trimmed, uppercased airline code, `None` when blank
pub fn normalize_airline(airline: Option<&str>) -> Option<String> {
    normalize_code(airline)
}

fn normalize_code(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_ascii_uppercase)
}
