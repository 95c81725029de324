//! File-based delay processing command.

use crate::wav::{StereoAudio, read_stereo, write_stereo};
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};
use wetdelay_engine::{DELAY_TIMES_MS, WetDelay};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Delay tap index (0-5: 20, 40, 80, 120, 220, 400 ms)
    #[arg(short = 'i', long, conflicts_with = "delay_ms")]
    delay_index: Option<usize>,

    /// Delay time in milliseconds, snapped to the nearest tap
    #[arg(short = 'm', long)]
    delay_ms: Option<usize>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Extra seconds of tail to render past the end of the input
    #[arg(long, default_value = "0.5")]
    tail: f64,
}

/// Resolve the tap index from `--delay-index` or `--delay-ms`.
fn resolve_tap(args: &ProcessArgs) -> anyhow::Result<usize> {
    if let Some(index) = args.delay_index {
        anyhow::ensure!(
            index < DELAY_TIMES_MS.len(),
            "delay index {index} out of range (0-{})",
            DELAY_TIMES_MS.len() - 1
        );
        return Ok(index);
    }

    let ms = args.delay_ms.unwrap_or(DELAY_TIMES_MS[0]);
    let mut index = 0;
    for (i, tap) in DELAY_TIMES_MS.iter().enumerate() {
        if tap.abs_diff(ms) < DELAY_TIMES_MS[index].abs_diff(ms) {
            index = i;
        }
    }
    Ok(index)
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.block_size > 0, "block size must be positive");

    let audio = read_stereo(&args.input)?;
    anyhow::ensure!(!audio.is_empty(), "input file contains no audio");
    info!(
        frames = audio.len(),
        sample_rate = audio.sample_rate,
        "loaded {}",
        args.input.display()
    );

    let tap = resolve_tap(&args)?;
    println!(
        "Applying {} ms delay (tap {}) at {} Hz...",
        DELAY_TIMES_MS[tap], tap, audio.sample_rate
    );

    let mut unit = WetDelay::new();
    unit.prepare(f64::from(audio.sample_rate));
    let controls = unit.controls();
    controls.set_delay_index(tap);

    // Pad with silence so the delayed tail is rendered, not cut off.
    let tail_frames = (args.tail * f64::from(audio.sample_rate)) as usize;
    let total = audio.len() + tail_frames;
    let mut in_l = audio.left;
    let mut in_r = audio.right;
    in_l.resize(total, 0.0);
    in_r.resize(total, 0.0);

    let mut out_l = vec![0.0f32; total];
    let mut out_r = vec![0.0f32; total];

    for start in (0..total).step_by(args.block_size) {
        let end = (start + args.block_size).min(total);
        let (block_out_l, block_out_r) = (&mut out_l[start..end], &mut out_r[start..end]);
        unit.process_block(&in_l[start..end], &in_r[start..end], block_out_l, block_out_r);
        debug!(
            frames = end,
            input_peaks = ?controls.input_peaks(),
            output_peaks = ?controls.output_peaks(),
            "processed block"
        );
    }

    let (peak_l, peak_r) = controls.output_peaks();
    info!(peak_l, peak_r, "output peak meters at end of render");

    write_stereo(
        &args.output,
        &StereoAudio {
            left: out_l,
            right: out_r,
            sample_rate: audio.sample_rate,
        },
    )?;
    println!("Wrote {} ({} frames)", args.output.display(), total);

    Ok(())
}
