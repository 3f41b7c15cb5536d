//! Pair generator
//!
//! Produces turnaround pairs (ARR + DEP at the home station) from a validated
//! [`GeneratorConfig`] and a caller-owned [`PseudoRandomStream`].
//!
//! # Per-pair algorithm
//!
//! 1. Mint a pair ID from four 32-bit draws
//! 2. Draw airline, remote station, service type, flight number and (when a
//!    pool is configured) registration
//! 3. Sample an arrival, draw a ground time, and retry the pair of draws up
//!    to [`MAX_PAIR_ATTEMPTS`] times until the departure fits in the window
//! 4. On exhaustion, record a warning and move on to the next pair
//!
//! The stream is the only state that changes; the same seed and
//! configuration always produce the same legs.

use crate::arrivals::TimeSampler;
use crate::core::time::{format_stad, TimeWindow};
use crate::generator::config::{validate_config, ConfigError, GeneratorConfig};
use crate::generator::digest::schedule_digest;
use crate::generator::retry::{retry_bounded, RetryOutcome, MAX_PAIR_ATTEMPTS};
use crate::models::{FlightLeg, GenerationWarning, PairIdentity};
use crate::rng::PseudoRandomStream;
use chrono::{Duration, NaiveDateTime};
use thiserror::Error;
use uuid::Uuid;

/// Fatal generation failures, all detected before the first pair
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Invalid generator configuration: {}", join_messages(.0))]
    InvalidConfig(Vec<ConfigError>),

    #[error("No valid remote stations available after excluding home station {home}")]
    NoRemoteStations { home: String },
}

fn join_messages(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Output of one generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    /// ARR, DEP, ARR, DEP, ... in pair order
    pub legs: Vec<FlightLeg>,

    /// One entry per abandoned pair
    pub warnings: Vec<GenerationWarning>,

    pub requested_pairs: usize,
}

impl GenerationOutcome {
    pub fn pairs_generated(&self) -> usize {
        self.legs.len() / 2
    }

    pub fn pairs_abandoned(&self) -> usize {
        self.requested_pairs - self.pairs_generated()
    }

    /// Hex SHA-256 of the generated legs
    pub fn digest(&self) -> Result<String, serde_json::Error> {
        schedule_digest(&self.legs)
    }
}

/// Validated, normalized generator ready to run
#[derive(Debug, Clone)]
pub struct PairGenerator {
    window: TimeWindow,
    home: String,
    airlines: Vec<String>,
    remote_stations: Vec<String>,
    service_types: Vec<String>,
    registrations: Vec<String>,
    flight_numbers: (i64, i64),
    ground_minutes: (i64, i64),
    pair_count: usize,
    sampler: TimeSampler,
}

impl PairGenerator {
    /// Validate `config` and prepare the candidate pools.
    ///
    /// # Errors
    /// - [`GenerationError::InvalidConfig`] with every violation found
    /// - [`GenerationError::NoRemoteStations`] when removing the home station
    ///   empties the remote pool
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        validate_config(config).map_err(GenerationError::InvalidConfig)?;

        let home = config.home_station.trim().to_ascii_uppercase();
        let remote_stations: Vec<String> = normalize_pool(&config.remote_stations)
            .into_iter()
            .filter(|station| *station != home)
            .collect();
        if remote_stations.is_empty() {
            return Err(GenerationError::NoRemoteStations { home });
        }

        Ok(Self {
            window: config.window(),
            home,
            airlines: normalize_pool(&config.airlines),
            remote_stations,
            service_types: normalize_pool(&config.service_types),
            registrations: normalize_pool(&config.registrations),
            flight_numbers: (
                i64::from(config.flight_number_min),
                i64::from(config.flight_number_max),
            ),
            ground_minutes: (config.min_ground_minutes, config.max_ground_minutes),
            pair_count: config.pair_count,
            sampler: TimeSampler::new(config.distribution),
        })
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    /// Remote pool after excluding the home station
    pub fn remote_stations(&self) -> &[String] {
        &self.remote_stations
    }

    /// Generate the configured number of pairs.
    pub fn generate(&self, rng: &mut PseudoRandomStream) -> GenerationOutcome {
        let mut legs = Vec::with_capacity(self.pair_count * 2);
        let mut warnings = Vec::new();

        for index in 0..self.pair_count {
            let identity = self.draw_identity(rng);

            match retry_bounded(MAX_PAIR_ATTEMPTS, |_| self.draw_times(rng)) {
                RetryOutcome::Accepted {
                    value: (arrival, departure),
                    ..
                } => {
                    legs.push(FlightLeg::arrival(&identity, arrival));
                    legs.push(FlightLeg::departure(&identity, departure));
                }
                RetryOutcome::Abandoned { attempts, reason } => {
                    tracing::warn!(
                        pair = index + 1,
                        attempts,
                        reason = %reason,
                        "abandoning turnaround pair"
                    );
                    warnings.push(GenerationWarning::PairAbandoned {
                        pair_number: index + 1,
                        attempts,
                        reason,
                    });
                }
            }
        }

        tracing::debug!(
            requested = self.pair_count,
            generated = legs.len() / 2,
            abandoned = warnings.len(),
            home = %self.home,
            "generated turnaround pairs"
        );

        GenerationOutcome {
            legs,
            warnings,
            requested_pairs: self.pair_count,
        }
    }

    fn draw_identity(&self, rng: &mut PseudoRandomStream) -> PairIdentity {
        let pair_id = mint_pair_id(rng);
        let airline = rng.choice(&self.airlines).clone();
        let remote = rng.choice(&self.remote_stations).clone();
        let service_type = rng.choice(&self.service_types).clone();
        let (min, max) = self.flight_numbers;
        let flight_number = rng.next_int(min, max) as u32;
        let registration = if self.registrations.is_empty() {
            None
        } else {
            Some(rng.choice(&self.registrations).clone())
        };

        PairIdentity {
            pair_id,
            airline,
            flight_number,
            service_type,
            registration,
            home: self.home.clone(),
            remote,
        }
    }

    /// One arrival/ground-time draw, rejected when the departure leaves the window.
    fn draw_times(
        &self,
        rng: &mut PseudoRandomStream,
    ) -> Result<(NaiveDateTime, NaiveDateTime), String> {
        let arrival = self.sampler.sample(&self.window, rng);
        let (min, max) = self.ground_minutes;
        let departure = arrival + Duration::minutes(rng.next_int(min, max));

        if departure > self.window.end() {
            return Err(format!(
                "departure {} falls after window end {}",
                format_stad(departure),
                format_stad(self.window.end())
            ));
        }
        Ok((arrival, departure))
    }
}

/// Validate, then generate with the caller's stream.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use flight_schedule_core_rs::generator::{generate_pairs, GeneratorConfig};
/// use flight_schedule_core_rs::PseudoRandomStream;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let mut config = GeneratorConfig::for_window(
///     day.and_hms_opt(0, 0, 0).unwrap(),
///     day.and_hms_opt(23, 59, 0).unwrap(),
/// );
/// config.pair_count = 10;
///
/// let mut rng = PseudoRandomStream::from_seed("doc");
/// let outcome = generate_pairs(&config, &mut rng).unwrap();
/// assert_eq!(outcome.legs.len(), 2 * outcome.pairs_generated());
/// ```
pub fn generate_pairs(
    config: &GeneratorConfig,
    rng: &mut PseudoRandomStream,
) -> Result<GenerationOutcome, GenerationError> {
    Ok(PairGenerator::new(config)?.generate(rng))
}

/// v4-shaped UUID built from stream draws, so pair IDs replay with the seed
fn mint_pair_id(rng: &mut PseudoRandomStream) -> Uuid {
    let mut bytes = [0u8; 16];
    for chunk in bytes.chunks_exact_mut(4) {
        chunk.copy_from_slice(&rng.next_u32().to_be_bytes());
    }
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Trim, uppercase and drop blank entries
fn normalize_pool(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}
