//! Audio engine for Beatwave
//!
//! Couples a validated configuration to one beat-wave generator and exposes
//! buffer filling plus goal setters for the playback and recording paths.

mod player;
mod recorder;

pub use player::{default_device_name, list_output_devices, Player};
pub use recorder::Recorder;

use anyhow::Result;

use crate::config::BeatwaveConfig;
use crate::synth::{BeatWaveError, BeatWaveGenerator};

/// The main audio engine
pub struct Engine {
    config: BeatwaveConfig,
    generator: BeatWaveGenerator,
}

impl Engine {
    /// Create an engine from a validated configuration
    pub fn new(config: BeatwaveConfig) -> Result<Self> {
        let generator = BeatWaveGenerator::new(
            config.tone.pitch,
            config.tone.beat_frequency,
            config.tone.pitch_per_second,
            config.tone.decibels,
            config.tone.decibels_per_second,
            config.audio.sample_rate,
        )?;

        Ok(Self { config, generator })
    }

    /// Get the sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.config.audio.sample_rate
    }

    /// Get the configured chunk size in frames
    pub fn buffer_size(&self) -> usize {
        self.config.audio.buffer_size
    }

    /// Get the configured output device name, if any
    pub fn device(&self) -> Option<&str> {
        self.config.audio.device.as_deref()
    }

    /// Read-only view of the generator's carried state
    pub fn generator(&self) -> &BeatWaveGenerator {
        &self.generator
    }

    /// Produce the next `frames` mono samples
    pub fn produce(&mut self, frames: usize) -> Vec<f64> {
        self.generator.produce(frames)
    }

    /// Fill a mono buffer with the next samples
    pub fn fill_buffer(&mut self, buffer: &mut [f32]) {
        let samples = self.generator.produce(buffer.len());
        for (out, sample) in buffer.iter_mut().zip(samples) {
            *out = sample as f32;
        }
    }

    /// Glide toward a pitch in semitones relative to A4
    pub fn set_pitch(&mut self, pitch: f64) {
        self.generator.set_pitch(pitch);
    }

    /// Jump to a pitch immediately
    pub fn reset_pitch(&mut self, pitch: f64) {
        self.generator.reset_pitch(pitch);
    }

    /// Glide toward a frequency in Hz
    pub fn set_frequency(&mut self, frequency: f64) {
        self.generator.set_frequency(frequency);
    }

    /// Glide both oscillators toward a new beat width
    pub fn set_beat_frequency(&mut self, beat_frequency: f64) -> Result<(), BeatWaveError> {
        self.generator.set_beat_frequency(beat_frequency)
    }

    /// Glide toward a volume in decibels
    pub fn set_decibels(&mut self, decibels: f64) {
        self.generator.set_decibels(decibels);
    }

    /// Jump to a volume immediately
    pub fn reset_decibels(&mut self, decibels: f64) {
        self.generator.reset_decibels(decibels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AudioConfig, ToneConfig};

    fn test_config() -> BeatwaveConfig {
        BeatwaveConfig {
            audio: AudioConfig::default(),
            tone: ToneConfig {
                pitch: 0.0,
                beat_frequency: 10.0,
                pitch_per_second: 12.0,
                decibels: 0.0,
                decibels_per_second: 1.0,
            },
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = Engine::new(test_config()).unwrap();

        assert_eq!(engine.sample_rate(), 44100);
        assert_eq!(engine.buffer_size(), 512);
        assert_eq!(engine.generator().frequency(), 440.0);
        assert_eq!(engine.generator().beat_frequency(), 10.0);
    }

    #[test]
    fn test_engine_rejects_bad_tone() {
        let mut config = test_config();
        config.tone.beat_frequency = -1.0;
        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn test_engine_fill_buffer() {
        let mut engine = Engine::new(test_config()).unwrap();

        let mut buffer = vec![0.0f32; 512];
        engine.fill_buffer(&mut buffer);

        let has_audio = buffer.iter().any(|&s| s.abs() > 0.0);
        assert!(has_audio, "Buffer should contain audio");
    }

    #[test]
    fn test_engine_produce_length() {
        let mut engine = Engine::new(test_config()).unwrap();
        assert_eq!(engine.produce(256).len(), 256);
        assert!(engine.produce(0).is_empty());
    }

    #[test]
    fn test_engine_setter_passthrough() {
        let mut engine = Engine::new(test_config()).unwrap();

        engine.set_pitch(12.0);
        // 12 semitones at 12 semitones/s: converged after 1.5 s
        for _ in 0..6 {
            engine.produce(11025);
        }

        assert!((engine.generator().frequency() - 880.0).abs() < 1e-9);
    }

    #[test]
    fn test_engine_rejects_bad_beat_retarget() {
        let mut engine = Engine::new(test_config()).unwrap();
        assert!(engine.set_beat_frequency(-2.0).is_err());
        assert!(engine.set_beat_frequency(4.0).is_ok());
    }
}
