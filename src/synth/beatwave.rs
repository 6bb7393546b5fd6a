//! Beating sine wave generator
//!
//! Two superposed sine oscillators separated by a beat frequency. Pitch and
//! volume changes glide toward their goals at fixed semitone-per-second and
//! decibel-per-second rates instead of jumping, so retuning never clicks.

use std::f64::consts::PI;

use thiserror::Error;

use crate::units;

/// Errors from constructing or retargeting a generator
#[derive(Debug, Error, PartialEq)]
pub enum BeatWaveError {
    #[error("sample rate must be positive")]
    InvalidSampleRate,

    #[error("beat frequency must be finite and non-negative, got {0}")]
    InvalidBeatFrequency(f64),

    #[error("glide rate must be positive and finite, got {0}")]
    InvalidGlideRate(f64),
}

/// Numeric state of the oscillator pair
///
/// Owned by the generator and mutated only through its setters and
/// `produce`. `frequency` is the mean of `f1` and `f2` as of the last
/// produced chunk; `f2 - f1` equals `beat_frequency` once any in-flight
/// glide has landed.
#[derive(Debug)]
struct PairState {
    frequency: f64,
    beat_frequency: f64,
    f1: f64,
    f2: f64,
    goal_f1: f64,
    goal_f2: f64,
    phase1: f64,
    phase2: f64,
    amplitude: f64,
    goal_amplitude: f64,
}

/// Generates a continuous stream of beating sine samples
///
/// Each `produce` call returns the next contiguous block of mono samples
/// and advances the carried state, so consecutive calls stitch into one
/// unbroken waveform.
#[derive(Debug)]
pub struct BeatWaveGenerator {
    state: PairState,
    pitch_per_second: f64,
    decibels_per_second: f64,
    sample_rate: u32,
}

impl BeatWaveGenerator {
    /// Create a generator with no glide in progress
    ///
    /// `pitch` is in semitones relative to A4, `beat_frequency` in Hz,
    /// `pitch_per_second` in semitones/s, `decibels` sets the starting
    /// volume, `decibels_per_second` the volume glide rate.
    pub fn new(
        pitch: f64,
        beat_frequency: f64,
        pitch_per_second: f64,
        decibels: f64,
        decibels_per_second: f64,
        sample_rate: u32,
    ) -> Result<Self, BeatWaveError> {
        if sample_rate == 0 {
            return Err(BeatWaveError::InvalidSampleRate);
        }
        if !beat_frequency.is_finite() || beat_frequency < 0.0 {
            return Err(BeatWaveError::InvalidBeatFrequency(beat_frequency));
        }
        if !pitch_per_second.is_finite() || pitch_per_second <= 0.0 {
            return Err(BeatWaveError::InvalidGlideRate(pitch_per_second));
        }
        if !decibels_per_second.is_finite() || decibels_per_second <= 0.0 {
            return Err(BeatWaveError::InvalidGlideRate(decibels_per_second));
        }

        let frequency = units::pitch_to_frequency(pitch);
        let f1 = frequency - beat_frequency / 2.0;
        let f2 = frequency + beat_frequency / 2.0;
        let amplitude = units::decibels_to_amplitude_ratio(decibels);

        Ok(Self {
            state: PairState {
                frequency,
                beat_frequency,
                f1,
                f2,
                goal_f1: f1,
                goal_f2: f2,
                phase1: 0.0,
                phase2: 0.0,
                amplitude,
                goal_amplitude: amplitude,
            },
            pitch_per_second,
            decibels_per_second,
            sample_rate,
        })
    }

    /// Mean frequency of the pair as of the last produced chunk, in Hz
    pub fn frequency(&self) -> f64 {
        self.state.frequency
    }

    /// Hz separation between the two oscillators
    pub fn beat_frequency(&self) -> f64 {
        self.state.beat_frequency
    }

    /// Current frequency of oscillator 1, in Hz
    pub fn f1(&self) -> f64 {
        self.state.f1
    }

    /// Current frequency of oscillator 2, in Hz
    pub fn f2(&self) -> f64 {
        self.state.f2
    }

    /// Current phase of oscillator 1, in cycles within [0, 1)
    pub fn phase1(&self) -> f64 {
        self.state.phase1
    }

    /// Current phase of oscillator 2, in cycles within [0, 1)
    pub fn phase2(&self) -> f64 {
        self.state.phase2
    }

    /// Current linear amplitude
    pub fn amplitude(&self) -> f64 {
        self.state.amplitude
    }

    /// Sample rate fixed at construction, in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Set the goal frequency the pair glides toward
    ///
    /// Goals for both oscillators are placed symmetrically around
    /// `frequency` using the current beat frequency. The current
    /// frequencies are untouched, so a glide begins.
    pub fn set_frequency(&mut self, frequency: f64) {
        self.state.goal_f1 = frequency - self.state.beat_frequency / 2.0;
        self.state.goal_f2 = frequency + self.state.beat_frequency / 2.0;
    }

    /// Snap the pair to `frequency` immediately, with no glide
    pub fn reset_frequency(&mut self, frequency: f64) {
        self.state.f1 = frequency - self.state.beat_frequency / 2.0;
        self.state.f2 = frequency + self.state.beat_frequency / 2.0;
        self.set_frequency(frequency);
    }

    /// Change the beat width, gliding both oscillators to the new spacing
    ///
    /// Goals recenter around the mean frequency carried from the last
    /// produced chunk. If a pitch glide is still in flight, that mean is
    /// the mid-glide tone rather than the pending pitch goal, and the
    /// pending goal is superseded.
    pub fn set_beat_frequency(&mut self, beat_frequency: f64) -> Result<(), BeatWaveError> {
        if !beat_frequency.is_finite() || beat_frequency < 0.0 {
            return Err(BeatWaveError::InvalidBeatFrequency(beat_frequency));
        }
        self.state.beat_frequency = beat_frequency;
        self.state.goal_f1 = self.state.frequency - beat_frequency / 2.0;
        self.state.goal_f2 = self.state.frequency + beat_frequency / 2.0;
        Ok(())
    }

    /// Set the goal pitch (semitones relative to A4) the pair glides toward
    pub fn set_pitch(&mut self, pitch: f64) {
        self.set_frequency(units::pitch_to_frequency(pitch));
    }

    /// Snap the pair to `pitch` immediately, with no glide
    pub fn reset_pitch(&mut self, pitch: f64) {
        self.reset_frequency(units::pitch_to_frequency(pitch));
    }

    /// Set the goal linear amplitude the volume glides toward
    pub fn set_amplitude(&mut self, amplitude: f64) {
        self.state.goal_amplitude = amplitude;
    }

    /// Set the goal volume in decibels
    pub fn set_decibels(&mut self, decibels: f64) {
        self.state.goal_amplitude = units::decibels_to_amplitude_ratio(decibels);
    }

    /// Snap the volume to `decibels` immediately, with no glide
    pub fn reset_decibels(&mut self, decibels: f64) {
        self.state.amplitude = units::decibels_to_amplitude_ratio(decibels);
        self.state.goal_amplitude = self.state.amplitude;
    }

    /// Produce the next `frames` mono samples
    ///
    /// Frequencies and amplitude follow their exponential glides within the
    /// chunk, phase integrates the instantaneous frequency sample by
    /// sample, and the carried state advances by exactly
    /// `frames / sample_rate` seconds. `frames == 0` returns an empty
    /// block and leaves the state untouched.
    pub fn produce(&mut self, frames: usize) -> Vec<f64> {
        if frames == 0 {
            return Vec::new();
        }

        let time = units::frames_to_time_array(0, frames, self.sample_rate);
        // Grid spacing; stays defined for single-frame chunks.
        let delta_time = 1.0 / self.sample_rate as f64;

        let (start_f1, start_f2) = (self.state.f1, self.state.f2);
        let (goal_f1, goal_f2) = (self.state.goal_f1, self.state.goal_f2);
        let start_amplitude = self.state.amplitude;
        let goal_amplitude = self.state.goal_amplitude;

        let dir1 = units::direction(start_f1, goal_f1);
        let dir2 = units::direction(start_f2, goal_f2);
        let dir_amp = units::direction(start_amplitude, goal_amplitude);

        let mut f1 = start_f1;
        let mut f2 = start_f2;
        let mut amplitude = start_amplitude;
        let mut phase1 = self.state.phase1;
        let mut phase2 = self.state.phase2;

        let mut samples = Vec::with_capacity(frames);
        for &t in &time {
            f1 = glide_frequency(start_f1, goal_f1, dir1, self.pitch_per_second, t);
            f2 = glide_frequency(start_f2, goal_f2, dir2, self.pitch_per_second, t);
            amplitude = glide_amplitude(
                start_amplitude,
                goal_amplitude,
                dir_amp,
                self.decibels_per_second,
                t,
            );

            phase1 += f1 * delta_time;
            phase2 += f2 * delta_time;

            samples
                .push(0.5 * amplitude * ((phase1 * 2.0 * PI).sin() + (phase2 * 2.0 * PI).sin()));
        }

        // Carry the chunk's final values so the next call continues
        // seamlessly. Phases wrap to [0, 1) to keep precision over
        // unbounded playback.
        let state = &mut self.state;
        state.f1 = f1;
        state.f2 = f2;
        state.frequency = (f1 + f2) / 2.0;
        state.amplitude = amplitude;
        state.phase1 = phase1.rem_euclid(1.0);
        state.phase2 = phase2.rem_euclid(1.0);

        samples
    }
}

/// Frequency at `t` seconds into a glide from `start` toward `goal`
///
/// Constant-semitone-rate exponential, clamped so the trajectory never
/// passes the goal. A zero direction means the glide has landed and the
/// trajectory is constant.
fn glide_frequency(start: f64, goal: f64, dir: f64, semitones_per_second: f64, t: f64) -> f64 {
    if dir == 0.0 {
        return start;
    }
    let trial = start * units::interval_to_frequency_ratio(dir * semitones_per_second * t);
    units::bounded_by_end(trial, start, goal)
}

/// Amplitude at `t` seconds into a glide from `start` toward `goal`
fn glide_amplitude(start: f64, goal: f64, dir: f64, decibels_per_second: f64, t: f64) -> f64 {
    if dir == 0.0 {
        return start;
    }
    let trial = start * units::decibels_to_amplitude_ratio(dir * decibels_per_second * t);
    units::bounded_by_end(trial, start, goal)
}
