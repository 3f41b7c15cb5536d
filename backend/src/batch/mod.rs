//! Sequential batch submission
//!
//! Generated schedules are often pushed to a remote sink in fixed-size
//! batches. Batch K+1 is only handed to the sink after batch K has succeeded
//! or exhausted its retries; each batch retries independently with
//! exponential backoff. The transport lives behind [`BatchSink`].

use crate::models::FlightLeg;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default legs per batch
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Failure reported by a sink for one attempt
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct SinkError(pub String);

/// Destination for batches of generated legs
pub trait BatchSink {
    /// Deliver one batch. `batch_index` is 0-based.
    fn submit(&mut self, batch_index: usize, batch: &[FlightLeg]) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("Batch size must be positive")]
    ZeroBatchSize,

    #[error("Batch {} of {total} failed after {attempts} attempts: {last_error}", .index + 1)]
    Exhausted {
        /// 0-based
        index: usize,
        total: usize,
        attempts: u32,
        last_error: SinkError,
    },
}

/// Per-batch retry policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Wait after the `failures`-th failed attempt: `base_delay * 2^failures`
    pub fn delay_after(&self, failures: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(failures))
    }
}

/// Summary of a completed submission run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub batches_sent: usize,
    pub legs_sent: usize,
    /// Attempts beyond the first, summed over all batches
    pub retries: u32,
}

/// Submit `legs` in consecutive batches of `batch_size`, strictly in order.
///
/// `sleep` is called with each backoff delay; pass `std::thread::sleep` in
/// production and a recorder in tests.
///
/// # Errors
/// - [`BatchError::ZeroBatchSize`] when `batch_size` is zero
/// - [`BatchError::Exhausted`] when one batch fails every attempt; later
///   batches are not sent
pub fn submit_in_batches<S: BatchSink>(
    legs: &[FlightLeg],
    batch_size: usize,
    sink: &mut S,
    policy: &RetryPolicy,
    mut sleep: impl FnMut(Duration),
) -> Result<BatchReport, BatchError> {
    if batch_size == 0 {
        return Err(BatchError::ZeroBatchSize);
    }

    let total = legs.len().div_ceil(batch_size);
    let mut report = BatchReport::default();
    let max_attempts = policy.max_attempts.max(1);

    for (index, batch) in legs.chunks(batch_size).enumerate() {
        let mut failures = 0;
        loop {
            match sink.submit(index, batch) {
                Ok(()) => break,
                Err(err) => {
                    failures += 1;
                    if failures >= max_attempts {
                        tracing::warn!(batch = index + 1, total, %err, "batch exhausted retries");
                        return Err(BatchError::Exhausted {
                            index,
                            total,
                            attempts: failures,
                            last_error: err,
                        });
                    }
                    let delay = policy.delay_after(failures);
                    tracing::info!(
                        batch = index + 1,
                        total,
                        attempt = failures,
                        delay_ms = delay.as_millis() as u64,
                        %err,
                        "batch failed, retrying"
                    );
                    sleep(delay);
                }
            }
        }

        report.batches_sent += 1;
        report.legs_sent += batch.len();
        report.retries += failures;
        tracing::debug!(batch = index + 1, total, legs = batch.len(), "batch delivered");
    }

    Ok(report)
}
