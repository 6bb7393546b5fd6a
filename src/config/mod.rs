//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::Result;
use std::path::Path;

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<BeatwaveConfig> {
    let contents = std::fs::read_to_string(path)?;
    let config: BeatwaveConfig = serde_yaml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_minimal_config() {
        let yaml = r#"
audio:
  sample_rate: 44100
  buffer_size: 512

tone:
  pitch: 0.0
  beat_frequency: 10.0
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.audio.sample_rate, 44100);
        assert_eq!(config.tone.beat_frequency, 10.0);
        assert_eq!(config.tone.pitch_per_second, 12.0); // default
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let yaml = r#"
tone:
  beat_frequency: -4.0
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        assert!(load_config(file.path()).is_err());
    }
}
