//! Recoverable per-record issues
//!
//! Warnings never abort a batch. The affected unit (one record, one pair) is
//! skipped and the warning is accumulated in the result.

use crate::station::LegDirection;
use thiserror::Error;

/// Issues found while ingesting records for linking
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkWarning {
    #[error("Skipping flight {flight}: missing REG")]
    MissingRegistration { flight: String },

    #[error("Skipping flight {flight}: missing Airline or Flight Number")]
    MissingFlightIdentity { flight: String },

    #[error("Skipping flight {flight}: station {station:?} is neither an arrival nor a departure at {home}")]
    UnclassifiableStation {
        flight: String,
        station: String,
        home: String,
    },

    #[error("Invalid time for {direction} {flight}: SDT={sdt}, time={time:?}")]
    InvalidTime {
        flight: String,
        direction: LegDirection,
        sdt: String,
        time: Option<String>,
    },
}

/// Issues found while generating turnaround pairs
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationWarning {
    #[error("Could not generate valid pair {pair_number} after {attempts} attempts: {reason}")]
    PairAbandoned {
        /// 1-based position in the requested sequence
        pair_number: usize,
        attempts: u32,
        reason: String,
    },
}
