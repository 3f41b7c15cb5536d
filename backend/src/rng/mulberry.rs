//! mulberry32 pseudo-random stream
//!
//! A small counter-style generator with 32-bit state. Every operation is pure
//! integer arithmetic modulo 2^32, so a given seed produces the same sequence
//! on every platform.
//!
//! # Seeding
//!
//! String seeds are reduced to a 32-bit integer with the rolling hash
//! `h = h * 31 + c` over UTF-16 code units (wrapping as a signed 32-bit
//! integer), then taking the absolute value. The empty string hashes to 0,
//! which is a valid mulberry32 state.
//!
//! # Determinism
//!
//! Same seed → same sequence of draws. This is CRITICAL for:
//! - Reproducing a generated schedule from its seed
//! - Testing (golden values are pinned in `tests/test_rng_determinism.rs`)

use serde::{Deserialize, Serialize};

/// Additive constant of the mulberry32 counter.
const GOLDEN_GAMMA: u32 = 0x6D2B_79F5;

/// 2^32 as a float, the divisor mapping a `u32` draw onto `[0, 1)`.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Deterministic random stream owned by one caller.
///
/// # Example
/// ```
/// use flight_schedule_core_rs::PseudoRandomStream;
///
/// let mut rng = PseudoRandomStream::from_seed("ADB-2024");
/// let value = rng.next();
/// assert!((0.0..1.0).contains(&value));
/// let die = rng.next_int(1, 6); // [1, 6]
/// assert!((1..=6).contains(&die));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudoRandomStream {
    /// Counter state (32-bit)
    state: u32,
}

impl PseudoRandomStream {
    /// Create a stream from an explicit seed string.
    ///
    /// # Example
    /// ```
    /// use flight_schedule_core_rs::PseudoRandomStream;
    ///
    /// let a = PseudoRandomStream::from_seed("abc");
    /// let b = PseudoRandomStream::from_seed("abc");
    /// assert_eq!(a, b);
    /// ```
    pub fn from_seed(seed: &str) -> Self {
        Self {
            state: hash_seed(seed),
        }
    }

    /// Create a stream seeded from ambient entropy (a fresh v4 UUID).
    pub fn from_entropy() -> Self {
        Self::from_seed(&uuid::Uuid::new_v4().to_string())
    }

    /// Use the seed when one is given, otherwise fall back to entropy.
    ///
    /// Blank seeds count as absent.
    pub fn from_optional_seed(seed: Option<&str>) -> Self {
        match seed.map(str::trim).filter(|s| !s.is_empty()) {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Recreate a stream from a previously captured state.
    pub fn from_state(state: u32) -> Self {
        Self { state }
    }

    /// Get current state (for capture/replay)
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the counter and return the next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Generate a float in `[0.0, 1.0)`.
    ///
    /// # Example
    /// ```
    /// use flight_schedule_core_rs::PseudoRandomStream;
    ///
    /// let mut rng = PseudoRandomStream::from_seed("seed-42");
    /// let p = rng.next();
    /// assert!(p >= 0.0 && p < 1.0);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// Generate an integer uniformly in `[min, max]` (both inclusive).
    ///
    /// # Panics
    /// Panics if `min > max`
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "min must not exceed max");

        // Widened so the full i64 range has a representable span
        let span = (i128::from(max) - i128::from(min) + 1) as f64;
        let offset = (self.next() * span).floor() as i128;
        (i128::from(min) + offset).min(i128::from(max)) as i64
    }

    /// Generate a float in `[min, max)`.
    pub fn next_float(&mut self, min: f64, max: f64) -> f64 {
        self.next() * (max - min) + min
    }

    /// Pick one element of `pool` uniformly.
    ///
    /// # Panics
    /// Panics if `pool` is empty
    pub fn choice<'a, T>(&mut self, pool: &'a [T]) -> &'a T {
        assert!(!pool.is_empty(), "cannot choose from an empty pool");

        let index = (self.next() * pool.len() as f64).floor() as usize;
        // next() < 1.0 keeps the index in bounds
        &pool[index.min(pool.len() - 1)]
    }
}

/// Reduce a seed string to the initial 32-bit state.
fn hash_seed(seed: &str) -> u32 {
    let hash = seed
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        });
    hash.unsigned_abs()
}
