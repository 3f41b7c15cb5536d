//! Linked (wide) rows
//!
//! A linked row puts one arrival and one departure of the same aircraft side
//! by side. Field names and their order are an interop contract with
//! downstream spreadsheet and ingestion consumers:
//!
//! `ARR_FLC, ARR_FLN, ARR_FLX, ARR_SDT, ARR_STA, REG, DEP_FLC, DEP_FLN, DEP_FLX, DEP_SDT, DEP_STD`
//!
//! serde serializes fields in declaration order, so the structs below must
//! keep that order.

use serde::{Deserialize, Serialize};

/// Canonical column order of linked rows
pub const LINKED_ROW_HEADER: [&str; 11] = [
    "ARR_FLC", "ARR_FLN", "ARR_FLX", "ARR_SDT", "ARR_STA", "REG", "DEP_FLC", "DEP_FLN", "DEP_FLX",
    "DEP_SDT", "DEP_STD",
];

/// One reconciled turnaround
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedPair {
    #[serde(rename = "ARR_FLC")]
    pub arr_airline: String,
    #[serde(rename = "ARR_FLN")]
    pub arr_flight_number: u32,
    #[serde(rename = "ARR_FLX")]
    pub arr_suffix: String,
    #[serde(rename = "ARR_SDT")]
    pub arr_sdt: String,
    #[serde(rename = "ARR_STA")]
    pub arr_sta: String,
    /// Taken from the arrival leg
    #[serde(rename = "REG")]
    pub registration: String,
    #[serde(rename = "DEP_FLC")]
    pub dep_airline: String,
    #[serde(rename = "DEP_FLN")]
    pub dep_flight_number: u32,
    #[serde(rename = "DEP_FLX")]
    pub dep_suffix: String,
    #[serde(rename = "DEP_SDT")]
    pub dep_sdt: String,
    #[serde(rename = "DEP_STD")]
    pub dep_std: String,
    /// Minutes on the ground, not part of the sheet
    #[serde(skip)]
    pub ground_minutes: i64,
}

/// One half-filled row of the auto-link partition
///
/// Arrivals fill the `ARR_*` columns, departures the `DEP_*` columns; the
/// other side stays blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoLinkedRow {
    #[serde(rename = "ARR_FLC")]
    pub arr_airline: String,
    #[serde(rename = "ARR_FLN")]
    pub arr_flight_number: Option<u32>,
    #[serde(rename = "ARR_FLX")]
    pub arr_suffix: String,
    #[serde(rename = "ARR_SDT")]
    pub arr_sdt: String,
    #[serde(rename = "ARR_STA")]
    pub arr_sta: String,
    #[serde(rename = "REG")]
    pub registration: String,
    #[serde(rename = "DEP_FLC")]
    pub dep_airline: String,
    #[serde(rename = "DEP_FLN")]
    pub dep_flight_number: Option<u32>,
    #[serde(rename = "DEP_FLX")]
    pub dep_suffix: String,
    #[serde(rename = "DEP_SDT")]
    pub dep_sdt: String,
    #[serde(rename = "DEP_STD")]
    pub dep_std: String,
}
