//! Synthesis engine for generating audio
//!
//! Contains the beat-wave generator and its error type.

mod beatwave;

pub use beatwave::{BeatWaveError, BeatWaveGenerator};
