//! CLI interface for Beatwave

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Continuous beating sine tones with smooth pitch and volume glides
#[derive(Parser)]
#[command(name = "beatwave")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play the configured tone
    Play {
        /// Configuration file path
        #[arg(short, long, default_value = "beatwave.yaml")]
        config: PathBuf,

        /// Stop after this many seconds instead of waiting for Ctrl-C
        #[arg(short, long)]
        duration: Option<u64>,
    },

    /// Play a scripted tour of pitch and beat-width glides
    Demo {
        /// Configuration file path
        #[arg(short, long, default_value = "beatwave.yaml")]
        config: PathBuf,
    },

    /// Record to a WAV file
    Record {
        /// Configuration file path
        #[arg(short, long, default_value = "beatwave.yaml")]
        config: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Duration in seconds
        #[arg(short, long, default_value = "60")]
        duration: u64,
    },

    /// List available audio output devices
    Devices,

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "beatwave.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}
