//! WAV file recorder
//!
//! Writes produced sample blocks to a 32-bit float mono WAV file.

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// WAV file recorder
pub struct Recorder {
    writer: WavWriter<BufWriter<File>>,
    sample_rate: u32,
    samples_written: u64,
}

impl Recorder {
    /// Create a new recorder writing to `path` at `sample_rate` Hz
    pub fn new(path: &Path, sample_rate: u32) -> Result<Self> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };

        let writer = WavWriter::create(path, spec)
            .with_context(|| format!("failed to create WAV file: {:?}", path))?;

        Ok(Self {
            writer,
            sample_rate,
            samples_written: 0,
        })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the number of samples written
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    /// Get the duration recorded in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples_written as f64 / self.sample_rate as f64
    }

    /// Write one produced block of samples
    pub fn write_chunk(&mut self, samples: &[f64]) -> Result<()> {
        for &sample in samples {
            self.writer
                .write_sample(sample as f32)
                .context("failed to write sample")?;
        }
        self.samples_written += samples.len() as u64;
        Ok(())
    }

    /// Finalize the WAV file
    ///
    /// Must be called to close the file and write the header.
    pub fn finalize(self) -> Result<()> {
        self.writer.finalize().context("failed to finalize WAV file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_recorder_creation() {
        let file = NamedTempFile::new().unwrap();
        let recorder = Recorder::new(file.path(), 44100).unwrap();

        assert_eq!(recorder.sample_rate(), 44100);
        assert_eq!(recorder.samples_written(), 0);
        assert_eq!(recorder.duration_secs(), 0.0);
    }

    #[test]
    fn test_recorder_write_chunk() {
        let file = NamedTempFile::new().unwrap();
        let mut recorder = Recorder::new(file.path(), 44100).unwrap();

        recorder.write_chunk(&[0.1, 0.2, 0.3, -0.2, -0.1]).unwrap();

        assert_eq!(recorder.samples_written(), 5);
    }

    #[test]
    fn test_recorder_duration() {
        let file = NamedTempFile::new().unwrap();
        let mut recorder = Recorder::new(file.path(), 44100).unwrap();

        // One second of silence
        recorder.write_chunk(&vec![0.0; 44100]).unwrap();

        assert!((recorder.duration_secs() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_recorder_produces_valid_wav() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();

        // Write one produced chunk and read it back
        {
            let mut generator =
                crate::synth::BeatWaveGenerator::new(0.0, 10.0, 12.0, 0.0, 1.0, 44100).unwrap();
            let mut recorder = Recorder::new(&path, 44100).unwrap();
            recorder.write_chunk(&generator.produce(1000)).unwrap();
            recorder.finalize().unwrap();
        }

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();

        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 32);
        assert_eq!(spec.sample_format, SampleFormat::Float);

        let samples: Vec<f32> = reader.into_samples().map(|s| s.unwrap()).collect();
        assert_eq!(samples.len(), 1000);
        assert!(samples.iter().any(|&s| s.abs() > 0.0));
    }
}
