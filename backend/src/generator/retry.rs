//! Bounded retry for constraint-satisfying sampling

/// Attempts allowed per turnaround before it is abandoned
pub const MAX_PAIR_ATTEMPTS: u32 = 100;

/// Result of a bounded retry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryOutcome<T> {
    /// An attempt produced a valid value
    Accepted { value: T, attempts: u32 },

    /// Every attempt was rejected; `reason` is the last rejection
    Abandoned { attempts: u32, reason: String },
}

/// Run `attempt` until it succeeds or `max_attempts` is reached.
///
/// `attempt` receives the 1-based attempt number.
///
/// # Panics
/// Panics if `max_attempts` is zero
///
/// # Example
/// ```
/// use flight_schedule_core_rs::generator::{retry_bounded, RetryOutcome};
///
/// let outcome = retry_bounded(5, |n| if n == 3 { Ok(n * 10) } else { Err("odd".to_string()) });
/// assert_eq!(outcome, RetryOutcome::Accepted { value: 30, attempts: 3 });
/// ```
pub fn retry_bounded<T>(
    max_attempts: u32,
    mut attempt: impl FnMut(u32) -> Result<T, String>,
) -> RetryOutcome<T> {
    assert!(max_attempts > 0, "max_attempts must be positive");

    let mut reason = String::new();
    for n in 1..=max_attempts {
        match attempt(n) {
            Ok(value) => return RetryOutcome::Accepted { value, attempts: n },
            Err(rejected) => reason = rejected,
        }
    }

    RetryOutcome::Abandoned {
        attempts: max_attempts,
        reason,
    }
}
