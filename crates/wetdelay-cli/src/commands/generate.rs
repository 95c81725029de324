//! Test signal generation command.

use crate::wav::{StereoAudio, write_stereo};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a single-sample unit impulse (left channel only)
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f64,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,
    },

    /// Generate a stereo sine tone
    Sine {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "1000.0")]
        freq: f32,

        /// Amplitude (0.0-1.0)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f64,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,
    },

    /// Generate silence (for auditioning the engine's noise floor)
    Silence {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f64,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,
    },
}

fn frames(duration: f64, sample_rate: u32) -> usize {
    (duration * f64::from(sample_rate)) as usize
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let (path, audio) = match args.command {
        GenerateCommand::Impulse {
            output,
            duration,
            sample_rate,
        } => {
            let n = frames(duration, sample_rate);
            anyhow::ensure!(n > 0, "duration too short");
            let mut left = vec![0.0f32; n];
            left[0] = 1.0;
            (
                output,
                StereoAudio {
                    left,
                    right: vec![0.0f32; n],
                    sample_rate,
                },
            )
        }
        GenerateCommand::Sine {
            output,
            freq,
            amplitude,
            duration,
            sample_rate,
        } => {
            let n = frames(duration, sample_rate);
            let samples: Vec<f32> = (0..n)
                .map(|i| {
                    let t = i as f32 / sample_rate as f32;
                    amplitude * (std::f32::consts::TAU * freq * t).sin()
                })
                .collect();
            (
                output,
                StereoAudio {
                    left: samples.clone(),
                    right: samples,
                    sample_rate,
                },
            )
        }
        GenerateCommand::Silence {
            output,
            duration,
            sample_rate,
        } => {
            let n = frames(duration, sample_rate);
            (
                output,
                StereoAudio {
                    left: vec![0.0f32; n],
                    right: vec![0.0f32; n],
                    sample_rate,
                },
            )
        }
    };

    write_stereo(&path, &audio)?;
    println!("Wrote {} ({} frames)", path.display(), audio.len());
    Ok(())
}
