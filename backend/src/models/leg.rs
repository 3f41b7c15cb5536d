//! Generated flight leg
//!
//! One scheduled movement of one aircraft at the home station, as produced by
//! the pair generator. Each turnaround yields two legs sharing a pair ID:
//! - ARR on `"{remote}-{home}"` at the arrival time
//! - DEP on `"{home}-{remote}"` at the departure time
//!
//! Column names follow the daily-sheet contract consumed downstream.

use crate::core::time::{format_hhmm, format_sdt, format_stad, STAD_FORMAT};
use crate::models::record::{DailyRecord, DEFAULT_SUFFIX};
use crate::station::{arrival_station, departure_station, LegDirection};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Fields shared by both legs of one generated turnaround
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairIdentity {
    pub pair_id: Uuid,
    pub airline: String,
    pub flight_number: u32,
    pub service_type: String,
    pub registration: Option<String>,
    pub home: String,
    pub remote: String,
}

/// A generated single-leg flight record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightLeg {
    #[serde(rename = "Airline")]
    pub airline: String,

    #[serde(rename = "Operator Flight Number")]
    pub flight_number: u32,

    /// Always `"O"` for generated legs
    #[serde(rename = "Flight Suffix")]
    pub suffix: String,

    #[serde(rename = "Station")]
    pub station: String,

    /// Scheduled time of arrival or departure, `DD/MM/YYYY HH:mm:ss` on the wire
    #[serde(rename = "STAD", with = "stad_format")]
    pub scheduled: NaiveDateTime,

    #[serde(rename = "Flight Service Type")]
    pub service_type: String,

    /// Date of `scheduled` as `YYYYMMDD`
    #[serde(rename = "SDT")]
    pub sdt: String,

    /// Arrival time of day, ARR legs only
    #[serde(rename = "STA")]
    pub sta: Option<String>,

    /// Departure time of day, DEP legs only
    #[serde(rename = "STD")]
    pub std: Option<String>,

    #[serde(rename = "REG")]
    pub registration: Option<String>,

    #[serde(rename = "_pairId")]
    pub pair_id: Uuid,

    #[serde(rename = "_legType")]
    pub leg_type: LegDirection,

    #[serde(rename = "_home")]
    pub home: String,
}

impl FlightLeg {
    /// Build the ARR leg of a turnaround
    pub fn arrival(identity: &PairIdentity, at: NaiveDateTime) -> Self {
        let mut leg = Self::base(identity, LegDirection::Arrival, at);
        leg.station = arrival_station(&identity.remote, &identity.home);
        leg.sta = Some(format_hhmm(at.time()));
        leg
    }

    /// Build the DEP leg of a turnaround
    pub fn departure(identity: &PairIdentity, at: NaiveDateTime) -> Self {
        let mut leg = Self::base(identity, LegDirection::Departure, at);
        leg.station = departure_station(&identity.home, &identity.remote);
        leg.std = Some(format_hhmm(at.time()));
        leg
    }

    fn base(identity: &PairIdentity, leg_type: LegDirection, at: NaiveDateTime) -> Self {
        Self {
            airline: identity.airline.clone(),
            flight_number: identity.flight_number,
            suffix: DEFAULT_SUFFIX.to_string(),
            station: String::new(),
            scheduled: at,
            service_type: identity.service_type.clone(),
            sdt: format_sdt(at.date()),
            sta: None,
            std: None,
            registration: identity.registration.clone(),
            pair_id: identity.pair_id,
            leg_type,
            home: identity.home.clone(),
        }
    }

    /// Combined `DD/MM/YYYY HH:mm:ss` stamp
    pub fn stad(&self) -> String {
        format_stad(self.scheduled)
    }

    /// Convert to linker input
    pub fn to_daily_record(&self) -> DailyRecord {
        DailyRecord {
            airline: Some(self.airline.clone()),
            flight_number: Some(self.flight_number),
            suffix: Some(self.suffix.clone()),
            station: self.station.clone(),
            sdt: self.sdt.clone(),
            sta: self.sta.clone(),
            std: self.std.clone(),
            registration: self.registration.clone(),
            service_type: Some(self.service_type.clone()),
        }
    }
}

mod stad_format {
    use super::*;

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_stad(*ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, STAD_FORMAT).map_err(serde::de::Error::custom)
    }
}
