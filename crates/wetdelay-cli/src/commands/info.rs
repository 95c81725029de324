//! WAV metadata and tap listing command.

use clap::Args;
use std::path::PathBuf;
use wetdelay_engine::{DELAY_TIMES_MS, INTERNAL_RATE};

#[derive(Args)]
pub struct InfoArgs {
    /// WAV file to inspect (omit to only list the delay taps)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
}

pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    if let Some(path) = &args.input {
        let reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let frames = u64::from(reader.len()) / u64::from(spec.channels);

        println!("{}:", path.display());
        println!("  channels:        {}", spec.channels);
        println!("  sample rate:     {} Hz", spec.sample_rate);
        println!("  bits per sample: {}", spec.bits_per_sample);
        println!("  format:          {:?}", spec.sample_format);
        println!("  frames:          {}", frames);
        println!(
            "  duration:        {:.3} s",
            frames as f64 / f64::from(spec.sample_rate)
        );
        println!();
    }

    println!("Internal rate: {} Hz", INTERNAL_RATE);
    println!("Delay taps:");
    for (index, tap) in DELAY_TIMES_MS.iter().enumerate() {
        println!(
            "  {index}: {tap:>3} ms ({} samples internal)",
            tap * INTERNAL_RATE as usize / 1000
        );
    }
    Ok(())
}
