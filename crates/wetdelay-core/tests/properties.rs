//! Property-based tests for the DSP primitives.
//!
//! Uses proptest to verify the invariants the delay engine leans on:
//! finite filter output, stable resampler phase bookkeeping, and the
//! linear-interpolation round-trip error bound.

use proptest::prelude::*;
use wetdelay_core::{FilterMode, LinearResampler, OnePoleFilter, PeakMeter, SampleProcessor};

/// Render a sine at `freq` Hz / `rate` Hz, `len` samples.
fn sine(freq: f32, rate: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (std::f32::consts::TAU * freq * i as f32 / rate).sin())
        .collect()
}

/// Downsample to 24 kHz and back up to the host rate, returning the
/// worst absolute error against the original (after the warm-up region
/// where resampler latency dominates).
fn round_trip_error(signal: &[f32], host_rate: f32) -> f32 {
    let mut down = LinearResampler::new();
    let mut up = LinearResampler::new();

    let mut internal = vec![0.0f32; signal.len()];
    let produced = down.downsample(signal, &mut internal, host_rate, 24000.0);

    let mut output = vec![0.0f32; signal.len()];
    up.upsample(&internal[..produced], &mut output, 24000.0, host_rate);

    // Skip the first few samples: the chain has ~2 samples of latency at
    // each rate, so compare against a shifted original.
    let shift = (2.0 * host_rate / 24000.0).ceil() as usize;
    let mut worst = 0.0f32;
    for i in shift..signal.len() - shift {
        let mut best = f32::MAX;
        for offset in 0..=shift {
            best = best.min((output[i] - signal[i - offset]).abs());
        }
        worst = worst.max(best);
    }
    worst
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// One-pole filters produce finite, bounded output for bounded input
    /// in both modes and across the cutoffs the engine uses.
    #[test]
    fn filters_finite_and_bounded(
        input in prop::collection::vec(-1.0f32..=1.0, 1..512),
        cutoff in 20.0f32..10000.0,
        highpass in any::<bool>(),
    ) {
        let mode = if highpass { FilterMode::HighPass } else { FilterMode::LowPass };
        let mut filter = OnePoleFilter::new(24000.0, cutoff.min(11999.0), mode);

        for &x in &input {
            let y = filter.process(x);
            prop_assert!(y.is_finite());
            prop_assert!(y.abs() <= 4.0, "one-pole output {y} blew up");
        }
    }

    /// Downsampling never writes past the produced count and leaves the
    /// phase in a valid range for the next block.
    #[test]
    fn downsample_phase_stays_bounded(
        input in prop::collection::vec(-1.0f32..=1.0, 1..256),
        host_rate in 32000.0f32..96000.0,
    ) {
        let mut down = LinearResampler::new();
        let mut output = vec![0.0f32; input.len()];
        let produced = down.downsample(&input, &mut output, host_rate, 24000.0);

        let ratio = host_rate / 24000.0;
        prop_assert!(produced <= output.len());
        prop_assert!(down.phase() >= 0.0);
        prop_assert!(down.phase() < ratio + 1.0, "phase {} ran away", down.phase());
        for &s in &output[..produced] {
            prop_assert!(s.is_finite());
        }
    }

    /// Upsampling fills every output slot with finite values within the
    /// input's range (linear interpolation never overshoots).
    #[test]
    fn upsample_output_within_input_range(
        input in prop::collection::vec(-1.0f32..=1.0, 1..128),
        num_output in 1usize..512,
    ) {
        let mut up = LinearResampler::new();
        let mut output = vec![f32::NAN; num_output];
        up.upsample(&input, &mut output, 24000.0, 48000.0);

        for &s in &output {
            prop_assert!(s.is_finite());
            prop_assert!((-1.0..=1.0).contains(&s), "interpolation overshoot: {s}");
        }
    }

    /// Splitting a block in two produces the same samples as one call —
    /// the resampler state carries across block boundaries.
    #[test]
    fn downsample_block_split_invariant(
        input in prop::collection::vec(-1.0f32..=1.0, 8..256),
        split in 1usize..7,
    ) {
        let split = split * input.len() / 8;

        let mut whole = LinearResampler::new();
        let mut out_whole = vec![0.0f32; input.len()];
        let n_whole = whole.downsample(&input, &mut out_whole, 44100.0, 24000.0);

        let mut halves = LinearResampler::new();
        let mut out_a = vec![0.0f32; input.len()];
        let mut out_b = vec![0.0f32; input.len()];
        let n_a = halves.downsample(&input[..split], &mut out_a, 44100.0, 24000.0);
        let n_b = halves.downsample(&input[split..], &mut out_b, 44100.0, 24000.0);

        prop_assert_eq!(n_whole, n_a + n_b);
        prop_assert_eq!(&out_whole[..n_a], &out_a[..n_a]);
        prop_assert_eq!(&out_whole[n_a..n_whole], &out_b[..n_b]);
    }

    /// The peak meter is monotone under silence and clamps to the input
    /// magnitude under attack.
    #[test]
    fn meter_tracks_magnitude(samples in prop::collection::vec(-2.0f32..=2.0, 1..512)) {
        let mut meter = PeakMeter::new();
        let mut running_max = 0.0f32;
        for &s in &samples {
            let value = meter.update(s);
            running_max = running_max.max(s.abs());
            prop_assert!(value >= 0.0);
            prop_assert!(value <= running_max + 1e-6);
        }
    }
}

#[test]
fn round_trip_error_shrinks_with_frequency() {
    let host_rate = 48000.0;
    // All sub-Nyquist at 24 kHz; lower frequency must round-trip tighter.
    let err_2k = round_trip_error(&sine(2000.0, host_rate, 4800), host_rate);
    let err_500 = round_trip_error(&sine(500.0, host_rate, 4800), host_rate);
    let err_100 = round_trip_error(&sine(100.0, host_rate, 4800), host_rate);

    assert!(
        err_100 < err_500 && err_500 < err_2k,
        "errors not decreasing: 2k={err_2k} 500={err_500} 100={err_100}"
    );
    assert!(err_100 < 0.05, "100 Hz round-trip error too large: {err_100}");
}
