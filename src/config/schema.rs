//! Configuration schema definitions

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::units;

/// Main configuration for Beatwave
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeatwaveConfig {
    /// Audio output settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Initial tone and glide rates
    #[serde(default)]
    pub tone: ToneConfig,
}

impl BeatwaveConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate < 8000 || self.audio.sample_rate > 192000 {
            bail!("Sample rate must be between 8000 and 192000");
        }
        if self.audio.buffer_size < 64 || self.audio.buffer_size > 8192 {
            bail!("Buffer size must be between 64 and 8192");
        }

        if !self.tone.pitch.is_finite() {
            bail!("Pitch must be finite");
        }
        if !self.tone.beat_frequency.is_finite() || self.tone.beat_frequency < 0.0 {
            bail!("Beat frequency must be finite and non-negative");
        }
        if !self.tone.pitch_per_second.is_finite() || self.tone.pitch_per_second <= 0.0 {
            bail!("Pitch glide rate must be positive");
        }
        if !self.tone.decibels.is_finite() {
            bail!("Volume must be finite");
        }
        if !self.tone.decibels_per_second.is_finite() || self.tone.decibels_per_second <= 0.0 {
            bail!("Volume glide rate must be positive");
        }

        Ok(())
    }
}

/// Audio output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate in Hz (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Frames per rendered chunk (default: 512)
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Output device name (None = default device)
    pub device: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            buffer_size: default_buffer_size(),
            device: None,
        }
    }
}

fn default_sample_rate() -> u32 { units::DEFAULT_SAMPLE_RATE }
fn default_buffer_size() -> usize { 512 }

/// Initial tone settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToneConfig {
    /// Pitch in semitones relative to A4 = 440 Hz (default: 0)
    #[serde(default)]
    pub pitch: f64,

    /// Hz separation between the two oscillators (default: 0)
    #[serde(default)]
    pub beat_frequency: f64,

    /// Pitch glide rate in semitones per second (default: 12)
    #[serde(default = "default_pitch_per_second")]
    pub pitch_per_second: f64,

    /// Initial volume in decibels (default: 1)
    #[serde(default = "default_decibels")]
    pub decibels: f64,

    /// Volume glide rate in decibels per second (default: 1)
    #[serde(default = "default_decibels_per_second")]
    pub decibels_per_second: f64,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            beat_frequency: 0.0,
            pitch_per_second: default_pitch_per_second(),
            decibels: default_decibels(),
            decibels_per_second: default_decibels_per_second(),
        }
    }
}

fn default_pitch_per_second() -> f64 { 12.0 }
fn default_decibels() -> f64 { 1.0 }
fn default_decibels_per_second() -> f64 { 1.0 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_audio_config() {
        let yaml = "sample_rate: 48000";
        let config: AudioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.buffer_size, 512); // default
        assert!(config.device.is_none());
    }

    #[test]
    fn test_tone_config_defaults() {
        let yaml = "pitch: -7.0";
        let config: ToneConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.pitch, -7.0);
        assert_eq!(config.beat_frequency, 0.0);
        assert_eq!(config.pitch_per_second, 12.0);
        assert_eq!(config.decibels, 1.0);
        assert_eq!(config.decibels_per_second, 1.0);
    }

    #[test]
    fn test_config_validation() {
        let config = BeatwaveConfig {
            audio: AudioConfig::default(),
            tone: ToneConfig {
                pitch: 0.0,
                beat_frequency: 10.0,
                pitch_per_second: 12.0,
                decibels: 0.0,
                decibels_per_second: 1.0,
            },
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_sample_rate() {
        let mut config = BeatwaveConfig {
            audio: AudioConfig::default(),
            tone: ToneConfig::default(),
        };
        config.audio.sample_rate = 4000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_beat_frequency() {
        let mut config = BeatwaveConfig {
            audio: AudioConfig::default(),
            tone: ToneConfig::default(),
        };
        config.tone.beat_frequency = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_glide_rate() {
        let mut config = BeatwaveConfig {
            audio: AudioConfig::default(),
            tone: ToneConfig::default(),
        };
        config.tone.pitch_per_second = 0.0;
        assert!(config.validate().is_err());
    }
}
