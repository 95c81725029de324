//! The stereo delay engine: circular buffer plus the lo-fi signal chain.
//!
//! `DelayBuffer` owns everything with per-sample state: the delay line
//! itself, four host-rate band-limiting filters, four internal-rate tone
//! filters, four resamplers, and the noise source feeding dither and the
//! noise floor. One instance is one delay unit; nothing here is shared or
//! global.
//!
//! # Lifecycle
//!
//! - [`prepare`](DelayBuffer::prepare) (re)allocates and resets everything;
//!   call it before processing and again on any sample-rate change.
//! - [`process_stereo`](DelayBuffer::process_stereo) is the steady-state
//!   block path: allocation-free, lock-free, driven once per audio block.
//! - [`reset`](DelayBuffer::reset) clears history without reallocating.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use libm::round;
use wetdelay_core::{
    FilterMode, LinearResampler, NoiseSource, OnePoleFilter, SampleProcessor, ms_to_samples,
};

use crate::INTERNAL_RATE;

/// Cutoff of the host-rate anti-alias and reconstruction low-passes, Hz.
const BAND_LIMIT_HZ: f32 = 10_000.0;
/// Cutoff of the internal-rate high-pass, Hz.
const HIGH_PASS_HZ: f32 = 80.0;
/// Cutoff of the internal-rate low-pass, Hz.
const LOW_PASS_HZ: f32 = 9_000.0;

/// Channel bleed coefficient: -40 dB of the opposite delayed channel.
const CROSSTALK: f32 = 0.01;
/// 12-bit converters: 4096 levels across the nominal +/-1.0 range.
const QUANT_LEVELS: f32 = 4096.0;
/// TPDF dither amplitude: half an LSB per uniform draw.
const DITHER_SCALE: f32 = 0.5 / QUANT_LEVELS;
/// Constant hiss added after quantization, ~-80 dBFS.
const NOISE_FLOOR: f32 = 0.0001;

/// Worst-case internal-rate block length the scratch buffers are sized for.
///
/// Covers host blocks up to ~8192 frames at 48 kHz. Larger host blocks are
/// clamped to this many internal samples; the upsampler then holds its last
/// sample flat for the remainder rather than overrunning.
const MAX_INTERNAL_BLOCK: usize = 4096;

/// Host rate assumed before the first `prepare` call.
const DEFAULT_HOST_RATE: f64 = 44_100.0;

/// Stereo circular delay buffer with the full vintage signal chain.
///
/// # Invariants
///
/// - `write_pos` is always a valid index into the delay buffers
/// - Buffer length is fixed between `prepare` calls
/// - The per-block delay is clamped to `[1, len - 1]` samples, so the read
///   position never lands on the write position or on stale wrapped data
pub struct DelayBuffer {
    host_rate: f64,

    buffer_l: Vec<f32>,
    buffer_r: Vec<f32>,
    write_pos: usize,

    anti_alias_l: OnePoleFilter,
    anti_alias_r: OnePoleFilter,
    reconstruct_l: OnePoleFilter,
    reconstruct_r: OnePoleFilter,
    high_pass_l: OnePoleFilter,
    high_pass_r: OnePoleFilter,
    low_pass_l: OnePoleFilter,
    low_pass_r: OnePoleFilter,

    down_l: LinearResampler,
    down_r: LinearResampler,
    up_l: LinearResampler,
    up_r: LinearResampler,

    noise: NoiseSource,
    /// Dither and noise floor on/off. Disabled only by tests that need
    /// bit-exact determinism; quantization still applies when off.
    character: bool,

    scratch_l: Vec<f32>,
    scratch_r: Vec<f32>,
}

impl DelayBuffer {
    /// Create an unprepared engine. [`prepare`](Self::prepare) must be
    /// called before processing; until then `process_stereo` is a no-op.
    pub fn new() -> Self {
        let host = DEFAULT_HOST_RATE as f32;
        Self {
            host_rate: DEFAULT_HOST_RATE,
            buffer_l: Vec::new(),
            buffer_r: Vec::new(),
            write_pos: 0,
            anti_alias_l: OnePoleFilter::new(host, BAND_LIMIT_HZ, FilterMode::LowPass),
            anti_alias_r: OnePoleFilter::new(host, BAND_LIMIT_HZ, FilterMode::LowPass),
            reconstruct_l: OnePoleFilter::new(host, BAND_LIMIT_HZ, FilterMode::LowPass),
            reconstruct_r: OnePoleFilter::new(host, BAND_LIMIT_HZ, FilterMode::LowPass),
            high_pass_l: OnePoleFilter::new(INTERNAL_RATE, HIGH_PASS_HZ, FilterMode::HighPass),
            high_pass_r: OnePoleFilter::new(INTERNAL_RATE, HIGH_PASS_HZ, FilterMode::HighPass),
            low_pass_l: OnePoleFilter::new(INTERNAL_RATE, LOW_PASS_HZ, FilterMode::LowPass),
            low_pass_r: OnePoleFilter::new(INTERNAL_RATE, LOW_PASS_HZ, FilterMode::LowPass),
            down_l: LinearResampler::new(),
            down_r: LinearResampler::new(),
            up_l: LinearResampler::new(),
            up_r: LinearResampler::new(),
            noise: NoiseSource::new(),
            character: true,
            scratch_l: Vec::new(),
            scratch_r: Vec::new(),
        }
    }

    /// Allocate for the given session and reset all state.
    ///
    /// The delay line is sized for `max_delay_ms` at the *internal* rate
    /// (truncated), not the host rate. Re-preparing discards all prior
    /// history and handles sample-rate changes. Not real-time safe.
    pub fn prepare(&mut self, sample_rate: f64, max_delay_ms: usize) {
        self.host_rate = sample_rate;
        let len = ms_to_samples(max_delay_ms, f64::from(INTERNAL_RATE));

        self.buffer_l.clear();
        self.buffer_l.resize(len, 0.0);
        self.buffer_r.clear();
        self.buffer_r.resize(len, 0.0);
        self.scratch_l.clear();
        self.scratch_l.resize(MAX_INTERNAL_BLOCK, 0.0);
        self.scratch_r.clear();
        self.scratch_r.resize(MAX_INTERNAL_BLOCK, 0.0);

        let host = sample_rate as f32;
        self.anti_alias_l
            .set_coefficients(host, BAND_LIMIT_HZ, FilterMode::LowPass);
        self.anti_alias_r
            .set_coefficients(host, BAND_LIMIT_HZ, FilterMode::LowPass);
        self.reconstruct_l
            .set_coefficients(host, BAND_LIMIT_HZ, FilterMode::LowPass);
        self.reconstruct_r
            .set_coefficients(host, BAND_LIMIT_HZ, FilterMode::LowPass);

        self.reset();
    }

    /// Clear delay history and all filter/resampler/noise state without
    /// changing allocation sizes. Not real-time safe only in the sense of
    /// cost; it performs no allocation.
    pub fn reset(&mut self) {
        self.buffer_l.fill(0.0);
        self.buffer_r.fill(0.0);
        self.scratch_l.fill(0.0);
        self.scratch_r.fill(0.0);
        self.write_pos = 0;

        self.anti_alias_l.reset();
        self.anti_alias_r.reset();
        self.reconstruct_l.reset();
        self.reconstruct_r.reset();
        self.high_pass_l.reset();
        self.high_pass_r.reset();
        self.low_pass_l.reset();
        self.low_pass_r.reset();

        self.down_l.reset();
        self.down_r.reset();
        self.up_l.reset();
        self.up_r.reset();

        self.noise.reset();
    }

    /// True once `prepare` has allocated the delay line.
    pub fn is_prepared(&self) -> bool {
        !self.buffer_l.is_empty()
    }

    /// Delay line length in internal-rate samples.
    pub fn max_delay_samples(&self) -> usize {
        self.buffer_l.len()
    }

    /// Enable/disable dither and the noise floor.
    ///
    /// With character off, processing is a pure function of input and state:
    /// identical calls yield bit-identical output. Intended for tests;
    /// quantization is still applied.
    pub fn set_character_enabled(&mut self, enabled: bool) {
        self.character = enabled;
    }

    /// Process one stereo block through the full chain, 100% wet.
    ///
    /// All four slices must be `num_samples` long. Calling before
    /// [`prepare`](Self::prepare) is a documented precondition violation
    /// handled as a defensive early return: the output buffers are left
    /// untouched.
    pub fn process_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
        delay_ms: usize,
    ) {
        if !self.is_prepared() {
            return;
        }

        let num_samples = left_in.len();
        debug_assert_eq!(num_samples, right_in.len());
        debug_assert_eq!(num_samples, left_out.len());
        debug_assert_eq!(num_samples, right_out.len());

        let delay_samples = self.delay_ms_to_samples(delay_ms);

        // Band-limit the input at the host rate. The caller's output
        // buffers double as host-rate scratch so no extra storage is needed.
        self.anti_alias_l.process_block(left_in, left_out);
        self.anti_alias_r.process_block(right_in, right_out);

        // Down to the internal rate. The expected count over-estimates by
        // one; the resampler returns what the phase actually yields, and the
        // two channels proceed with the smaller count to stay aligned.
        let host = self.host_rate as f32;
        let expected = (num_samples as f64 * f64::from(INTERNAL_RATE) / self.host_rate) as usize + 1;
        let expected = expected.min(self.scratch_l.len());

        let produced_l = self.down_l.downsample(
            left_out,
            &mut self.scratch_l[..expected],
            host,
            INTERNAL_RATE,
        );
        let produced_r = self.down_r.downsample(
            right_out,
            &mut self.scratch_r[..expected],
            host,
            INTERNAL_RATE,
        );
        let internal_count = produced_l.min(produced_r);

        // The delay line is strictly sequential; one tick per internal sample.
        for i in 0..internal_count {
            let (out_l, out_r) = self.tick(self.scratch_l[i], self.scratch_r[i], delay_samples);
            self.scratch_l[i] = out_l;
            self.scratch_r[i] = out_r;
        }

        // Back up to the host rate, then smooth the staircase.
        self.up_l
            .upsample(&self.scratch_l[..internal_count], left_out, INTERNAL_RATE, host);
        self.up_r
            .upsample(&self.scratch_r[..internal_count], right_out, INTERNAL_RATE, host);

        self.reconstruct_l.process_block_inplace(left_out);
        self.reconstruct_r.process_block_inplace(right_out);
    }

    /// One internal-rate step of the delay line.
    ///
    /// Writes the incoming pair, reads the pair `delay_samples` behind the
    /// write cursor, applies crosstalk, tone filtering, 12-bit quantization
    /// with TPDF dither, and the noise floor, then advances the cursor.
    ///
    /// Exposed so the character chain can be tested without the block-level
    /// resampling around it. On an unprepared engine this returns silence;
    /// `delay_samples` is clamped to `[1, len - 1]`.
    pub fn tick(&mut self, in_l: f32, in_r: f32, delay_samples: usize) -> (f32, f32) {
        let len = self.buffer_l.len();
        if len < 2 {
            return (0.0, 0.0);
        }
        let delay_samples = delay_samples.clamp(1, len - 1);
        let read_pos = (self.write_pos + len - delay_samples) % len;

        self.buffer_l[self.write_pos] = in_l;
        self.buffer_r[self.write_pos] = in_r;

        let delayed_l = self.buffer_l[read_pos];
        let delayed_r = self.buffer_r[read_pos];

        // Simultaneous bleed: both sides computed from the pre-bleed pair.
        let bled_l = delayed_l + CROSSTALK * delayed_r;
        let bled_r = delayed_r + CROSSTALK * delayed_l;

        let shaped_l = self.low_pass_l.process(self.high_pass_l.process(bled_l));
        let shaped_r = self.low_pass_r.process(self.high_pass_r.process(bled_r));

        let out_l = self.crush(shaped_l);
        let out_r = self.crush(shaped_r);

        self.write_pos += 1;
        if self.write_pos >= len {
            self.write_pos = 0;
        }

        (out_l, out_r)
    }

    /// Quantize to 12 bits with TPDF dither, then add the noise floor.
    ///
    /// Dither is the sum of two independent uniform draws (triangular PDF)
    /// scaled to half an LSB; the noise floor is one more draw at -80 dBFS.
    /// Both come from the engine's single noise source, so the L and R
    /// draws interleave deterministically.
    #[inline]
    fn crush(&mut self, sample: f32) -> f32 {
        let dither = if self.character {
            (self.noise.next_bipolar() + self.noise.next_bipolar()) * DITHER_SCALE
        } else {
            0.0
        };

        let quantized = libm::floorf((sample + dither) * QUANT_LEVELS + 0.5) / QUANT_LEVELS;

        if self.character {
            quantized + self.noise.next_bipolar() * NOISE_FLOOR
        } else {
            quantized
        }
    }

    /// Convert a delay time to internal-rate samples, clamped so the read
    /// position stays strictly between 0 and the write position's wrap.
    fn delay_ms_to_samples(&self, delay_ms: usize) -> usize {
        let samples = round(delay_ms as f64 * f64::from(INTERNAL_RATE) / 1000.0) as usize;
        samples.clamp(1, self.buffer_l.len() - 1)
    }
}

impl Default for DelayBuffer {
    fn default() -> Self {
        Self::new()
    }
}
