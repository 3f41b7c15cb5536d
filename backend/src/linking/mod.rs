//! Record linking
//!
//! Reconciles raw single-leg records into arrival/departure pairs at a home
//! station.
//!
//! - **ingest**: normalization, classification, matching keys
//! - **greedy**: earliest-first matcher and statistics
//! - **auto**: partition-only variant without matching

pub mod auto;
pub mod greedy;
pub mod ingest;

use serde::{Deserialize, Serialize};

pub use auto::{auto_link_records, AutoLinkOutcome, AutoLinkStats};
pub use greedy::{link_records, LinkOutcome, LinkStats};
pub use ingest::{ingest_records, ClassifiedLeg, IngestedPools, MatchKey};

/// Linker parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkerConfig {
    /// Station legs are classified against
    pub home: String,

    /// Smallest accepted gap between arrival and departure, in whole minutes
    pub min_ground_minutes: i64,
}

impl LinkerConfig {
    pub fn new(home: &str, min_ground_minutes: i64) -> Self {
        Self {
            home: home.to_string(),
            min_ground_minutes,
        }
    }
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self::new("ADB", 30)
    }
}
