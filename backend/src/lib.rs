//! Flight Schedule Core - Rust Engine
//!
//! Synthetic turnaround generation and single-leg record reconciliation for
//! testing flight-management pipelines.
//!
//! # Architecture
//!
//! - **rng**: Deterministic seeded random stream
//! - **core**: Time windows and sheet date/time encodings
//! - **station**: Arrival/departure classification against a home station
//! - **models**: Domain types (FlightLeg, DailyRecord, LinkedPair, warnings)
//! - **arrivals**: Time-of-day sampling (Uniform, Peak)
//! - **generator**: Turnaround pair generation with bounded retry
//! - **linking**: Greedy arrival/departure matching and auto-link partition
//! - **load**: Passenger-load augmentation
//! - **batch**: Sequential batch submission to an external sink
//!
//! # Critical Invariants
//!
//! 1. All randomness is drawn from a caller-owned `PseudoRandomStream`
//! 2. Same seed + same config → byte-identical generated schedule
//! 3. Per-record problems are warnings; only configuration errors are fatal

// Module declarations
pub mod arrivals;
pub mod batch;
pub mod core;
pub mod generator;
pub mod linking;
pub mod load;
pub mod models;
pub mod rng;
pub mod station;

// Re-exports for convenience
pub use arrivals::{TimeDistribution, TimeSampler};
pub use batch::{submit_in_batches, BatchError, BatchReport, BatchSink, RetryPolicy, SinkError};
pub use crate::core::time::TimeWindow;
pub use generator::{
    generate_pairs, ConfigError, GenerationError, GenerationOutcome, GeneratorConfig,
    PairGenerator,
};
pub use linking::{
    auto_link_records, link_records, AutoLinkOutcome, LinkOutcome, LinkStats, LinkerConfig,
};
pub use load::{build_load_rows, LoadOptions, LoadOutcome, LoadRow};
pub use models::{
    AutoLinkedRow, DailyRecord, FlightLeg, GenerationWarning, LinkWarning, LinkedPair,
    LINKED_ROW_HEADER,
};
pub use rng::PseudoRandomStream;
pub use station::{classify_station, Classification, LegDirection};
