//! Beatwave - continuous beating sine tones

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use beatwave::config::{self, ToneConfig};
use beatwave::engine::{self, Engine, Player, Recorder};
use beatwave::units;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config: config_path,
            duration,
        } => {
            println!("Loading configuration from {:?}...", config_path);
            let cfg = config::load_config(&config_path)?;

            let engine = Engine::new(cfg)?;
            print_tone(&engine);
            let engine = Arc::new(Mutex::new(engine));

            let mut player = Player::new();
            player.start(engine)?;

            let running = interrupt_flag()?;

            match duration {
                Some(secs) => {
                    println!("\nPlaying for {} seconds (Ctrl-C to stop early)...", secs);
                    wait_seconds(secs, &running);
                }
                None => {
                    println!("\nPlaying. Ctrl-C to stop...");
                    while running.load(Ordering::SeqCst) {
                        std::thread::sleep(Duration::from_millis(100));
                    }
                }
            }

            player.stop();
            println!("Stopped.");
        }

        Commands::Demo {
            config: config_path,
        } => {
            println!("Loading configuration from {:?}...", config_path);
            let mut cfg = config::load_config(&config_path)?;

            // The tour starts an octave up with a slow 1 Hz beat and fast
            // pitch glides, whatever the config says about the tone.
            cfg.tone = ToneConfig {
                pitch: 12.0,
                beat_frequency: 1.0,
                pitch_per_second: 20.0,
                ..ToneConfig::default()
            };

            let engine = Arc::new(Mutex::new(Engine::new(cfg)?));
            let mut player = Player::new();
            player.start(engine.clone())?;

            let running = interrupt_flag()?;

            println!("\nBeat-width and pitch glide tour (Ctrl-C to stop):");

            println!("  1 Hz beat an octave above A4");
            wait_seconds(3, &running);

            step(&running, || {
                lock_engine(&engine)?.set_beat_frequency(0.0)?;
                println!("  collapsing the beat to a single tone");
                Ok(())
            })?;
            wait_seconds(1, &running);

            for (pitch, hold) in [(5.0, 1), (10.0, 2), (-7.0, 1)] {
                step(&running, || {
                    lock_engine(&engine)?.set_pitch(pitch);
                    println!(
                        "  gliding to pitch {} ({:.1} Hz)",
                        pitch,
                        units::pitch_to_frequency(pitch)
                    );
                    Ok(())
                })?;
                wait_seconds(hold, &running);
            }

            step(&running, || {
                lock_engine(&engine)?.set_beat_frequency(10.0)?;
                println!("  widening the beat to 10 Hz");
                Ok(())
            })?;
            wait_seconds(2, &running);

            step(&running, || {
                lock_engine(&engine)?.set_pitch(5.0);
                println!("  gliding back to pitch 5, beat intact");
                Ok(())
            })?;
            wait_seconds(2, &running);

            player.stop();
            println!("Done.");
        }

        Commands::Record {
            config: config_path,
            output,
            duration,
        } => {
            println!("Loading configuration from {:?}...", config_path);
            let cfg = config::load_config(&config_path)?;

            println!("Recording {} seconds to {:?}...", duration, output);

            let mut engine = Engine::new(cfg)?;
            let sample_rate = engine.sample_rate();
            let chunk_frames = engine.buffer_size();
            let total_frames = sample_rate as u64 * duration;

            let mut recorder = Recorder::new(&output, sample_rate)?;

            let mut next_report = sample_rate as u64;
            while recorder.samples_written() < total_frames {
                let remaining = total_frames - recorder.samples_written();
                let frames = chunk_frames.min(remaining as usize);
                recorder.write_chunk(&engine.produce(frames))?;

                // Progress update every second
                if recorder.samples_written() >= next_report {
                    print!(
                        "\r  Progress: {}s / {}s",
                        recorder.samples_written() / sample_rate as u64,
                        duration
                    );
                    use std::io::Write;
                    std::io::stdout().flush()?;
                    next_report += sample_rate as u64;
                }
            }

            recorder.finalize()?;
            println!("\nRecorded to {:?}", output);
        }

        Commands::Devices => {
            println!("Available output devices:\n");

            if let Some(name) = engine::default_device_name() {
                println!("Default output: {}", name);
                println!();
            }

            for (name, config) in engine::list_output_devices() {
                println!(
                    "  - {} ({} Hz, {} ch)",
                    name, config.sample_rate.0, config.channels
                );
            }
        }

        Commands::Check {
            config: config_path,
        } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
                    println!("  Buffer size: {}", cfg.audio.buffer_size);
                    println!(
                        "  Device: {}",
                        cfg.audio.device.as_deref().unwrap_or("(default)")
                    );
                    println!(
                        "  Pitch: {} ({:.2} Hz)",
                        cfg.tone.pitch,
                        units::pitch_to_frequency(cfg.tone.pitch)
                    );
                    println!("  Beat frequency: {} Hz", cfg.tone.beat_frequency);
                    println!(
                        "  Glide rates: {} semitones/s, {} dB/s",
                        cfg.tone.pitch_per_second, cfg.tone.decibels_per_second
                    );
                    println!("  Volume: {} dB", cfg.tone.decibels);
                }
                Err(e) => {
                    println!("Configuration is invalid: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../beatwave.example.yaml");

            let path = "beatwave.yaml";
            if Path::new(path).exists() {
                println!("beatwave.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created beatwave.yaml with example configuration.");
            }
        }
    }

    Ok(())
}

/// Print the tone an engine was configured with
fn print_tone(engine: &Engine) {
    let gen = engine.generator();
    println!("Starting Beatwave...");
    println!("  Sample rate: {} Hz", engine.sample_rate());
    println!("  Tone: {:.2} Hz, beat {} Hz", gen.frequency(), gen.beat_frequency());
    println!("  Amplitude: {:.3}", gen.amplitude());
}

/// Lock the shared engine for a control-thread setter call
fn lock_engine(engine: &Arc<Mutex<Engine>>) -> Result<std::sync::MutexGuard<'_, Engine>> {
    engine
        .lock()
        .map_err(|_| anyhow::anyhow!("Engine lock poisoned"))
}

/// Flag that flips to false on Ctrl-C
fn interrupt_flag() -> Result<Arc<AtomicBool>> {
    let running = Arc::new(AtomicBool::new(true));
    let handle = running.clone();
    ctrlc::set_handler(move || handle.store(false, Ordering::SeqCst))?;
    Ok(running)
}

/// Run a demo step unless the tour was interrupted
fn step(running: &AtomicBool, action: impl FnOnce() -> Result<()>) -> Result<()> {
    if running.load(Ordering::SeqCst) {
        action()?;
    }
    Ok(())
}

/// Sleep in short slices so Ctrl-C stays responsive
fn wait_seconds(seconds: u64, running: &AtomicBool) {
    let mut remaining = seconds * 10;
    while running.load(Ordering::SeqCst) && remaining > 0 {
        std::thread::sleep(Duration::from_millis(100));
        remaining -= 1;
    }
}
