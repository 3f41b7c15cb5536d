//! Arrival time sampling
//!
//! Maps draws from a [`PseudoRandomStream`] onto a timestamp inside a
//! [`TimeWindow`] under a time-of-day distribution policy.
//!
//! # Policies
//!
//! 1. **Uniform**: linear interpolation of one uniform draw across the
//!    window's millisecond span.
//! 2. **Peak**: a uniform baseline, relocated with probability 0.6 into one
//!    of the two peak bands (06:00-09:59, 17:00-21:59) on the same calendar
//!    date when it falls outside both. The result is clamped to the window.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use flight_schedule_core_rs::arrivals::{TimeDistribution, TimeSampler};
//! use flight_schedule_core_rs::core::time::TimeWindow;
//! use flight_schedule_core_rs::PseudoRandomStream;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let window = TimeWindow::new(
//!     day.and_hms_opt(0, 0, 0).unwrap(),
//!     day.and_hms_opt(23, 59, 59).unwrap(),
//! );
//! let mut rng = PseudoRandomStream::from_seed("peak");
//! let sampler = TimeSampler::new(TimeDistribution::Peak);
//! let ts = sampler.sample(&window, &mut rng);
//! assert!(window.contains(ts));
//! ```

use crate::core::time::TimeWindow;
use crate::rng::PseudoRandomStream;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Chance that an off-peak baseline is moved into a peak band
pub const PEAK_RELOCATION_PROBABILITY: f64 = 0.6;

/// Chance of picking the morning band when relocating
pub const MORNING_BAND_PROBABILITY: f64 = 0.5;

/// Busy hours of the day, inclusive hour bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakBand {
    pub first_hour: u32,
    pub last_hour: u32,
}

impl PeakBand {
    pub fn contains_hour(&self, hour: u32) -> bool {
        (self.first_hour..=self.last_hour).contains(&hour)
    }
}

/// 06:00-09:59
pub const MORNING_PEAK: PeakBand = PeakBand {
    first_hour: 6,
    last_hour: 9,
};

/// 17:00-21:59
pub const EVENING_PEAK: PeakBand = PeakBand {
    first_hour: 17,
    last_hour: 21,
};

/// True when `hour` falls in either peak band
pub fn is_peak_hour(hour: u32) -> bool {
    MORNING_PEAK.contains_hour(hour) || EVENING_PEAK.contains_hour(hour)
}

/// Time-of-day distribution policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeDistribution {
    #[default]
    Uniform,
    Peak,
}

/// Samples timestamps within a window.
#[derive(Debug, Clone, Copy)]
pub struct TimeSampler {
    distribution: TimeDistribution,
}

impl TimeSampler {
    pub fn new(distribution: TimeDistribution) -> Self {
        Self { distribution }
    }

    pub fn distribution(&self) -> TimeDistribution {
        self.distribution
    }

    /// Draw one timestamp in `[window.start, window.end]`.
    pub fn sample(&self, window: &TimeWindow, rng: &mut PseudoRandomStream) -> NaiveDateTime {
        let baseline = sample_uniform(window, rng);

        match self.distribution {
            TimeDistribution::Uniform => baseline,
            TimeDistribution::Peak => window.clamp(relocate_to_peak(baseline, rng)),
        }
    }
}

/// Uniform draw across the window's millisecond span.
fn sample_uniform(window: &TimeWindow, rng: &mut PseudoRandomStream) -> NaiveDateTime {
    let offset = (rng.next() * window.span_millis() as f64) as i64;
    window.offset(offset)
}

/// Apply the peak trial to a baseline timestamp.
///
/// The trial draw is always consumed; band and clock draws only when the
/// baseline actually moves.
fn relocate_to_peak(baseline: NaiveDateTime, rng: &mut PseudoRandomStream) -> NaiveDateTime {
    if rng.next() >= PEAK_RELOCATION_PROBABILITY || is_peak_hour(baseline.hour()) {
        return baseline;
    }

    let band = if rng.next() < MORNING_BAND_PROBABILITY {
        MORNING_PEAK
    } else {
        EVENING_PEAK
    };
    let hour = rng.next_int(i64::from(band.first_hour), i64::from(band.last_hour)) as u32;
    let minute = rng.next_int(0, 59) as u32;
    let second = rng.next_int(0, 59) as u32;

    baseline
        .with_hour(hour)
        .and_then(|ts| ts.with_minute(minute))
        .and_then(|ts| ts.with_second(second))
        .unwrap_or(baseline)
}
