//! Deterministic random number generation
//!
//! Uses the mulberry32 counter generator seeded from a string hash.
//! CRITICAL: All randomness in the generators MUST go through this module.

mod mulberry;

pub use mulberry::PseudoRandomStream;
