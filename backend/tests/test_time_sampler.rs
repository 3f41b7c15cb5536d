//! Time sampler behaviour
//!
//! Containment for both policies, plus the statistical check that the peak
//! policy really shifts arrivals into the morning and evening bands.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use flight_schedule_core_rs::arrivals::is_peak_hour;
use flight_schedule_core_rs::generator::{generate_pairs, GeneratorConfig};
use flight_schedule_core_rs::{
    LegDirection, PseudoRandomStream, TimeDistribution, TimeSampler, TimeWindow,
};

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn peak_fraction(distribution: TimeDistribution, seed: &str) -> f64 {
    let mut config = GeneratorConfig::for_window(at(1, 0, 0), at(2, 0, 0));
    config.pair_count = 10_000;
    config.distribution = distribution;

    let mut rng = PseudoRandomStream::from_seed(seed);
    let outcome = generate_pairs(&config, &mut rng).unwrap();

    let arrivals: Vec<_> = outcome
        .legs
        .iter()
        .filter(|leg| leg.leg_type == LegDirection::Arrival)
        .collect();
    assert!(!arrivals.is_empty());

    let in_peak = arrivals
        .iter()
        .filter(|leg| is_peak_hour(leg.scheduled.hour()))
        .count();
    in_peak as f64 / arrivals.len() as f64
}

// ============================================================================
// Containment
// ============================================================================

#[test]
fn test_uniform_samples_stay_in_multi_day_window() {
    let window = TimeWindow::new(at(1, 6, 30), at(8, 22, 15));
    let sampler = TimeSampler::new(TimeDistribution::Uniform);
    let mut rng = PseudoRandomStream::from_seed("multi-day");

    for _ in 0..5_000 {
        let ts = sampler.sample(&window, &mut rng);
        assert!(window.contains(ts), "{ts} outside window");
    }
}

#[test]
fn test_peak_samples_stay_in_window() {
    // Starts and ends off-peak so relocation regularly overshoots
    let window = TimeWindow::new(at(1, 10, 0), at(3, 15, 0));
    let sampler = TimeSampler::new(TimeDistribution::Peak);
    let mut rng = PseudoRandomStream::from_seed("peak-bounds");

    for _ in 0..5_000 {
        let ts = sampler.sample(&window, &mut rng);
        assert!(window.contains(ts), "{ts} outside window");
    }
}

#[test]
fn test_sampler_is_deterministic() {
    let window = TimeWindow::new(at(1, 0, 0), at(2, 0, 0));
    let sampler = TimeSampler::new(TimeDistribution::Peak);
    let mut rng1 = PseudoRandomStream::from_seed("replay");
    let mut rng2 = PseudoRandomStream::from_seed("replay");

    for _ in 0..200 {
        assert_eq!(sampler.sample(&window, &mut rng1), sampler.sample(&window, &mut rng2));
    }
}

#[test]
fn test_peak_consumes_more_draws_than_uniform() {
    // The relocation trial is always drawn, so the streams diverge after one sample
    let window = TimeWindow::new(at(1, 0, 0), at(2, 0, 0));
    let mut uniform_rng = PseudoRandomStream::from_seed("draw-count");
    let mut peak_rng = PseudoRandomStream::from_seed("draw-count");

    TimeSampler::new(TimeDistribution::Uniform).sample(&window, &mut uniform_rng);
    TimeSampler::new(TimeDistribution::Peak).sample(&window, &mut peak_rng);

    assert_ne!(uniform_rng.state(), peak_rng.state());
}

// ============================================================================
// Distribution
// ============================================================================

#[test]
fn test_peak_policy_raises_peak_fraction() {
    let uniform = peak_fraction(TimeDistribution::Uniform, "distribution-check");
    let peak = peak_fraction(TimeDistribution::Peak, "distribution-check");

    // Uniform sits near 9/24; peak relocates most off-peak arrivals
    assert!(
        peak > uniform + 0.2,
        "peak fraction {peak:.3} not clearly above uniform {uniform:.3}"
    );
}
