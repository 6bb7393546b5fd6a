//! Beatwave - continuous beating sine tones
//!
//! Two superposed sine oscillators separated by a beat frequency, with
//! pitch and volume gliding smoothly toward caller-set goals. Useful for
//! tuning drones, binaural-style beating tones, and audible alerts that
//! retune without clicks.

pub mod config;
pub mod engine;
pub mod synth;
pub mod units;

pub use config::BeatwaveConfig;
pub use engine::Engine;
pub use synth::{BeatWaveError, BeatWaveGenerator};
