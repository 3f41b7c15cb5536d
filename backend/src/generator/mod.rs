//! Turnaround pair generation
//!
//! - **config**: `GeneratorConfig` and collect-all validation
//! - **engine**: `PairGenerator`, the per-pair sampling loop
//! - **retry**: bounded retry combinator
//! - **digest**: SHA-256 schedule digest

pub mod config;
pub mod digest;
pub mod engine;
pub mod retry;

pub use config::{
    is_airline_code, validate_config, ConfigError, GeneratorConfig, ValidationResult,
    MAX_GROUND_CEILING_MINUTES, MAX_PAIR_COUNT, MAX_WINDOW_DAYS, MIN_GROUND_FLOOR_MINUTES,
};
pub use digest::schedule_digest;
pub use engine::{generate_pairs, GenerationError, GenerationOutcome, PairGenerator};
pub use retry::{retry_bounded, RetryOutcome, MAX_PAIR_ATTEMPTS};
