//! Load-data augmentation
//!
//! Turns daily records into passenger-load rows with random totals and
//! child/adult splits. Counts are drawn from a caller-owned
//! [`PseudoRandomStream`], so a seeded stream reproduces the same loads.

use crate::core::time::sdt_to_load_date;
use crate::models::DailyRecord;
use crate::rng::PseudoRandomStream;
use crate::station::classify_station;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Load-option violations, reported together
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadConfigError {
    #[error("Home airport must be exactly 3 letters (IATA code), got {0:?}")]
    InvalidHomeStation(String),

    #[error("Minimum total passengers {min} must not exceed maximum {max}")]
    TotalRangeInverted { min: u32, max: u32 },

    #[error("Child ratio range {min}%..{max}% must lie within 0..100 with min <= max")]
    InvalidChildRatio { min: u32, max: u32 },

    #[error("Default service type must not be blank")]
    BlankDefaultServiceType,
}

/// Why a record produced no load row
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadWarning {
    #[error("Skipping record {index}: missing SDT, flight number or station")]
    MissingFields { index: usize },

    #[error("Skipping record {index}: station {station:?} is not classifiable")]
    UnclassifiableStation { index: usize, station: String },

    #[error("Skipping record {index}: invalid SDT {sdt:?}")]
    InvalidDate { index: usize, sdt: String },

    #[error("Skipping record {index}: missing REG")]
    MissingRegistration { index: usize },
}

/// Load generation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub home: String,
    pub min_total: u32,
    pub max_total: u32,
    /// Percent
    pub child_ratio_min: u32,
    /// Percent
    pub child_ratio_max: u32,
    /// Used when a record has no service type
    pub default_service_type: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            home: "ADB".to_string(),
            min_total: 50,
            max_total: 180,
            child_ratio_min: 0,
            child_ratio_max: 40,
            default_service_type: "J".to_string(),
        }
    }
}

impl LoadOptions {
    /// Check every option, returning all violations.
    pub fn validate(&self) -> Result<(), Vec<LoadConfigError>> {
        let mut errors = Vec::new();

        if !crate::station::is_station_code(self.home.trim()) {
            errors.push(LoadConfigError::InvalidHomeStation(self.home.clone()));
        }
        if self.min_total > self.max_total {
            errors.push(LoadConfigError::TotalRangeInverted {
                min: self.min_total,
                max: self.max_total,
            });
        }
        if self.child_ratio_min > self.child_ratio_max || self.child_ratio_max > 100 {
            errors.push(LoadConfigError::InvalidChildRatio {
                min: self.child_ratio_min,
                max: self.child_ratio_max,
            });
        }
        if self.default_service_type.trim().is_empty() {
            errors.push(LoadConfigError::BlankDefaultServiceType);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// One passenger-load row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRow {
    /// `DD/MM/YYYY`
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Operator Flight Number")]
    pub flight_number: u32,
    #[serde(rename = "Origin Station")]
    pub origin: String,
    #[serde(rename = "Destination Station")]
    pub destination: String,
    #[serde(rename = "Reg")]
    pub registration: String,
    #[serde(rename = "Flight Service Type")]
    pub service_type: String,
    #[serde(rename = "totalpax")]
    pub total_pax: u32,
    pub child: u32,
    pub adult: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    pub rows: Vec<LoadRow>,
    /// Number of input records
    pub total: usize,
    pub warnings: Vec<LoadWarning>,
}

impl LoadOutcome {
    pub fn skipped(&self) -> usize {
        self.warnings.len()
    }
}

/// Build load rows for every usable record.
///
/// # Errors
/// Returns every option violation when `options` is invalid; no rows are
/// built in that case.
pub fn build_load_rows(
    records: &[DailyRecord],
    options: &LoadOptions,
    rng: &mut PseudoRandomStream,
) -> Result<LoadOutcome, Vec<LoadConfigError>> {
    options.validate()?;

    let mut outcome = LoadOutcome {
        total: records.len(),
        ..LoadOutcome::default()
    };

    for (index, record) in records.iter().enumerate() {
        match load_row(index, record, options, rng) {
            Ok(row) => outcome.rows.push(row),
            Err(warning) => {
                tracing::debug!(%warning, "load row skipped");
                outcome.warnings.push(warning);
            }
        }
    }

    Ok(outcome)
}

fn load_row(
    index: usize,
    record: &DailyRecord,
    options: &LoadOptions,
    rng: &mut PseudoRandomStream,
) -> Result<LoadRow, LoadWarning> {
    let flight_number = record
        .flight_number
        .filter(|&n| n > 0)
        .filter(|_| !record.sdt.trim().is_empty() && !record.station.trim().is_empty())
        .ok_or(LoadWarning::MissingFields { index })?;

    let classification = classify_station(&record.station, &options.home).ok_or_else(|| {
        LoadWarning::UnclassifiableStation {
            index,
            station: record.station.clone(),
        }
    })?;

    let date = sdt_to_load_date(&record.sdt).ok_or_else(|| LoadWarning::InvalidDate {
        index,
        sdt: record.sdt.clone(),
    })?;

    let registration = record
        .registration
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or(LoadWarning::MissingRegistration { index })?
        .to_string();

    let service_type = record
        .service_type
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(options.default_service_type.trim())
        .to_string();

    let total_pax = rng.next_int(i64::from(options.min_total), i64::from(options.max_total)) as u32;
    let child_pct = rng.next_int(
        i64::from(options.child_ratio_min),
        i64::from(options.child_ratio_max),
    );
    let child = (f64::from(total_pax) * child_pct as f64 / 100.0).round() as u32;

    Ok(LoadRow {
        date,
        flight_number,
        origin: classification.origin,
        destination: classification.destination,
        registration,
        service_type,
        total_pax,
        child,
        adult: total_pax - child,
    })
}
