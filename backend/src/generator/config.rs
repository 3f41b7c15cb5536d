//! Generator configuration and up-front validation
//!
//! Validation reports every violation at once so a caller can fix the whole
//! configuration in one pass.

use crate::arrivals::TimeDistribution;
use crate::core::time::TimeWindow;
use crate::station::is_station_code;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest batch a single call may request
pub const MAX_PAIR_COUNT: usize = 10_000;

/// Longest generation window, in whole days
pub const MAX_WINDOW_DAYS: i64 = 31;

/// Shortest turnaround the generator may be asked for
pub const MIN_GROUND_FLOOR_MINUTES: i64 = 30;

/// Longest turnaround: no ground time may outlast the longest window
pub const MAX_GROUND_CEILING_MINUTES: i64 = MAX_WINDOW_DAYS * 24 * 60;

/// Configuration violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Start datetime must be before end datetime")]
    WindowNotOrdered,

    #[error("Date range must not exceed {max_days} days, got {days}")]
    WindowTooLong { days: i64, max_days: i64 },

    #[error("Home airport must be exactly 3 letters (IATA code), got {0:?}")]
    InvalidHomeStation(String),

    #[error("Number of pairs must be between {min} and {max}, got {count}")]
    PairCountOutOfRange { count: usize, min: usize, max: usize },

    #[error("At least one airline must be selected")]
    NoAirlines,

    #[error("Invalid airline codes (must be 2-3 letters or digits): {}", .0.join(", "))]
    InvalidAirlines(Vec<String>),

    #[error("At least one remote station is required")]
    NoRemoteStations,

    #[error("Invalid remote stations (must be 3 letters): {}", .0.join(", "))]
    InvalidRemoteStations(Vec<String>),

    #[error("At least one service type must be selected")]
    NoServiceTypes,

    #[error("Minimum flight number must be at least 1")]
    FlightNumberNotPositive,

    #[error("Minimum flight number {min} must be less than or equal to maximum {max}")]
    FlightNumberRangeInverted { min: u32, max: u32 },

    #[error("Minimum ground time must be at least {floor} minutes, got {min}")]
    GroundTimeTooShort { min: i64, floor: i64 },

    #[error("Maximum ground time {max} must not be less than minimum ground time {min}")]
    GroundTimeRangeInverted { min: i64, max: i64 },

    #[error("Maximum ground time must not exceed {ceiling} minutes, got {max}")]
    GroundTimeTooLong { max: i64, ceiling: i64 },
}

/// Validation result
pub type ValidationResult = Result<(), Vec<ConfigError>>;

/// Everything the pair generator needs for one call.
///
/// Only the window is mandatory in JSON; every other field falls back to
/// the defaults of the original generator form.
///
/// `start` and `end` are naive local wall-clock times. There is no time-zone
/// mode: legs are stamped in the same clock the window is given in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,

    #[serde(default = "default_home_station")]
    pub home_station: String,

    #[serde(default = "default_pair_count")]
    pub pair_count: usize,

    #[serde(default = "default_airlines")]
    pub airlines: Vec<String>,

    #[serde(default = "default_flight_number_min")]
    pub flight_number_min: u32,

    #[serde(default = "default_flight_number_max")]
    pub flight_number_max: u32,

    #[serde(default = "default_remote_stations")]
    pub remote_stations: Vec<String>,

    #[serde(default = "default_service_types")]
    pub service_types: Vec<String>,

    /// Registration pool; when empty generated legs carry no registration
    #[serde(default)]
    pub registrations: Vec<String>,

    #[serde(default)]
    pub distribution: TimeDistribution,

    #[serde(default = "default_min_ground")]
    pub min_ground_minutes: i64,

    #[serde(default = "default_max_ground")]
    pub max_ground_minutes: i64,

    /// Seed string; absent or blank means entropy
    #[serde(default)]
    pub seed: Option<String>,
}

fn default_home_station() -> String {
    "ADB".to_string()
}

fn default_pair_count() -> usize {
    200
}

fn default_airlines() -> Vec<String> {
    to_strings(&["AJ", "TK", "PC", "LH", "SU", "QR", "FZ", "W6"])
}

fn default_flight_number_min() -> u32 {
    100
}

fn default_flight_number_max() -> u32 {
    3999
}

fn default_remote_stations() -> Vec<String> {
    to_strings(&[
        "BCN", "IST", "DOH", "SAW", "FRA", "DXB", "AMS", "LHR", "KWI", "MUC", "CDG",
    ])
}

fn default_service_types() -> Vec<String> {
    to_strings(&["J", "D", "C", "P"])
}

fn default_min_ground() -> i64 {
    30
}

fn default_max_ground() -> i64 {
    180
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl GeneratorConfig {
    /// Configuration over `[start, end]` with default pools and ranges.
    pub fn for_window(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            home_station: default_home_station(),
            pair_count: default_pair_count(),
            airlines: default_airlines(),
            flight_number_min: default_flight_number_min(),
            flight_number_max: default_flight_number_max(),
            remote_stations: default_remote_stations(),
            service_types: default_service_types(),
            registrations: Vec::new(),
            distribution: TimeDistribution::default(),
            min_ground_minutes: default_min_ground(),
            max_ground_minutes: default_max_ground(),
            seed: None,
        }
    }

    /// The validated window
    ///
    /// # Panics
    /// Panics if `start >= end`; call [`validate_config`] first.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }
}

/// Validate a generator configuration before any generation.
///
/// Runs all checks and returns every violation found.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use flight_schedule_core_rs::generator::{validate_config, ConfigError, GeneratorConfig};
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let mut config = GeneratorConfig::for_window(
///     day.and_hms_opt(0, 0, 0).unwrap(),
///     day.and_hms_opt(23, 0, 0).unwrap(),
/// );
/// config.home_station = "AD".to_string();
/// config.pair_count = 0;
///
/// let errors = validate_config(&config).unwrap_err();
/// assert_eq!(errors.len(), 2);
/// assert!(errors.contains(&ConfigError::InvalidHomeStation("AD".to_string())));
/// ```
pub fn validate_config(config: &GeneratorConfig) -> ValidationResult {
    let mut errors = Vec::new();

    validate_window(config, &mut errors);

    let home = config.home_station.trim();
    if !is_station_code(home) {
        errors.push(ConfigError::InvalidHomeStation(home.to_string()));
    }

    if !(1..=MAX_PAIR_COUNT).contains(&config.pair_count) {
        errors.push(ConfigError::PairCountOutOfRange {
            count: config.pair_count,
            min: 1,
            max: MAX_PAIR_COUNT,
        });
    }

    validate_pools(config, &mut errors);

    if config.flight_number_min == 0 {
        errors.push(ConfigError::FlightNumberNotPositive);
    }
    if config.flight_number_min > config.flight_number_max {
        errors.push(ConfigError::FlightNumberRangeInverted {
            min: config.flight_number_min,
            max: config.flight_number_max,
        });
    }

    if config.min_ground_minutes < MIN_GROUND_FLOOR_MINUTES {
        errors.push(ConfigError::GroundTimeTooShort {
            min: config.min_ground_minutes,
            floor: MIN_GROUND_FLOOR_MINUTES,
        });
    }
    if config.max_ground_minutes < config.min_ground_minutes {
        errors.push(ConfigError::GroundTimeRangeInverted {
            min: config.min_ground_minutes,
            max: config.max_ground_minutes,
        });
    }
    if config.max_ground_minutes > MAX_GROUND_CEILING_MINUTES {
        errors.push(ConfigError::GroundTimeTooLong {
            max: config.max_ground_minutes,
            ceiling: MAX_GROUND_CEILING_MINUTES,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_window(config: &GeneratorConfig, errors: &mut Vec<ConfigError>) {
    if config.start >= config.end {
        errors.push(ConfigError::WindowNotOrdered);
        return;
    }

    let days = (config.end - config.start).num_days();
    if days > MAX_WINDOW_DAYS {
        errors.push(ConfigError::WindowTooLong {
            days,
            max_days: MAX_WINDOW_DAYS,
        });
    }
}

fn validate_pools(config: &GeneratorConfig, errors: &mut Vec<ConfigError>) {
    if config.airlines.is_empty() {
        errors.push(ConfigError::NoAirlines);
    } else {
        let invalid = invalid_entries(&config.airlines, is_airline_code);
        if !invalid.is_empty() {
            errors.push(ConfigError::InvalidAirlines(invalid));
        }
    }

    if config.remote_stations.is_empty() {
        errors.push(ConfigError::NoRemoteStations);
    } else {
        let invalid = invalid_entries(&config.remote_stations, is_station_code);
        if !invalid.is_empty() {
            errors.push(ConfigError::InvalidRemoteStations(invalid));
        }
    }

    if config
        .service_types
        .iter()
        .all(|service_type| service_type.trim().is_empty())
    {
        errors.push(ConfigError::NoServiceTypes);
    }
}

fn invalid_entries(values: &[String], is_valid: fn(&str) -> bool) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !is_valid(v))
        .map(str::to_string)
        .collect()
}

/// Two or three ASCII letters or digits, e.g. `TK`, `W6`, `PGT`
pub fn is_airline_code(code: &str) -> bool {
    (2..=3).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base_config() -> GeneratorConfig {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        GeneratorConfig::for_window(
            day.and_hms_opt(0, 0, 0).unwrap(),
            day.and_hms_opt(23, 59, 0).unwrap(),
        )
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&base_config()), Ok(()));
    }

    #[test]
    fn test_window_longer_than_31_days() {
        let mut config = base_config();
        config.end = config.start + chrono::Duration::days(32);
        assert_eq!(
            validate_config(&config),
            Err(vec![ConfigError::WindowTooLong {
                days: 32,
                max_days: 31
            }])
        );

        // 31 whole days plus a few hours still passes
        config.end = config.start + chrono::Duration::days(31) + chrono::Duration::hours(5);
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_inverted_window_reports_once() {
        let mut config = base_config();
        std::mem::swap(&mut config.start, &mut config.end);
        assert_eq!(validate_config(&config), Err(vec![ConfigError::WindowNotOrdered]));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let mut config = base_config();
        config.home_station = "ADBX".to_string();
        config.pair_count = 10_001;
        config.airlines = vec![];
        config.remote_stations = vec!["IST".to_string(), "X1".to_string()];
        config.service_types = vec![];
        config.flight_number_min = 500;
        config.flight_number_max = 100;
        config.min_ground_minutes = 20;
        config.max_ground_minutes = 10;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 8, "{errors:?}");
        assert!(errors.contains(&ConfigError::InvalidRemoteStations(vec!["X1".to_string()])));
        assert!(errors.contains(&ConfigError::GroundTimeTooShort { min: 20, floor: 30 }));
        assert!(errors.contains(&ConfigError::GroundTimeRangeInverted { min: 20, max: 10 }));
    }

    #[test]
    fn test_airline_codes() {
        assert!(is_airline_code("TK"));
        assert!(is_airline_code("W6"));
        assert!(is_airline_code("PGT"));
        assert!(!is_airline_code("T"));
        assert!(!is_airline_code("TKXX"));
        assert!(!is_airline_code("T-"));
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{ "start": "2024-01-01T00:00:00", "end": "2024-01-02T00:00:00" }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.home_station, "ADB");
        assert_eq!(config.pair_count, 200);
        assert_eq!(config.distribution, TimeDistribution::Uniform);
        assert_eq!(config.min_ground_minutes, 30);
        assert_eq!(config.max_ground_minutes, 180);
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_window_is_naive_wall_clock() {
        // Offsets are not part of the format; the clock is taken as given
        let json = r#"{ "start": "2024-03-31T01:00:00", "end": "2024-03-31T05:00:00" }"#;
        let config: GeneratorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.window().span_millis(), 4 * 3_600_000);

        let zoned = r#"{ "start": "2024-03-31T01:00:00+03:00", "end": "2024-03-31T05:00:00" }"#;
        assert!(serde_json::from_str::<GeneratorConfig>(zoned).is_err());
    }

    #[test]
    fn test_ground_time_ceiling() {
        let mut config = base_config();
        config.max_ground_minutes = MAX_GROUND_CEILING_MINUTES;
        assert_eq!(validate_config(&config), Ok(()));

        config.max_ground_minutes = i64::MAX / 2;
        assert_eq!(
            validate_config(&config),
            Err(vec![ConfigError::GroundTimeTooLong {
                max: i64::MAX / 2,
                ceiling: 44_640,
            }])
        );
    }
}
