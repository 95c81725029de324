//! One-pole IIR filter, low-pass or high-pass.
//!
//! A single-pole filter with the decay coefficient
//!
//! ```text
//! a = exp(-2π * cutoff / sample_rate)
//! ```
//!
//! and difference equations
//!
//! ```text
//! low-pass:  y[n] = (1 - a) * x[n] + a * y[n-1]
//! high-pass: y[n] = a * (y[n-1] + x[n] - x[n-1])
//! ```
//!
//! This is the simplest possible filter — 6 dB/octave, zero latency, one or
//! two multiplies per sample. The delay engine uses four flavours of it:
//! anti-alias and reconstruction low-passes at the host rate, and the
//! 80 Hz high-pass / 9 kHz low-pass pair that shapes the delayed signal at
//! the internal rate.
//!
//! # Reference
//!
//! Julius O. Smith III, "Introduction to Digital Filters with Audio
//! Applications", Section: One-Pole Filter.

use crate::{SampleProcessor, flush_denormal};
use libm::expf;

/// Difference-equation variant of a [`OnePoleFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// `y[n] = (1 - a) * x[n] + a * y[n-1]`
    LowPass,
    /// `y[n] = a * (y[n-1] + x[n] - x[n-1])`
    HighPass,
}

/// One-pole (6 dB/oct) filter, low-pass or high-pass.
///
/// # Preconditions
///
/// `cutoff_hz` must be below `sample_rate / 2`. This is not enforced; the
/// caller configures all cutoffs from fixed engine constants.
///
/// # Invariants
///
/// - `coeff` is in (0, 1) for any valid cutoff, so the filter is stable
/// - `y_prev` is flushed to zero when subnormal-small
/// - `x_prev` is tracked in both modes (only the high-pass equation reads it)
#[derive(Debug, Clone)]
pub struct OnePoleFilter {
    coeff: f32,
    mode: FilterMode,
    y_prev: f32,
    x_prev: f32,
}

impl OnePoleFilter {
    /// Create a filter for the given rate, cutoff, and mode.
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Sample rate in Hz
    /// * `cutoff_hz` - Cutoff frequency in Hz (must be below Nyquist)
    /// * `mode` - Low-pass or high-pass difference equation
    pub fn new(sample_rate: f32, cutoff_hz: f32, mode: FilterMode) -> Self {
        let mut filter = Self {
            coeff: 0.0,
            mode,
            y_prev: 0.0,
            x_prev: 0.0,
        };
        filter.set_coefficients(sample_rate, cutoff_hz, mode);
        filter
    }

    /// Recompute the decay coefficient and fix the filter mode.
    ///
    /// `a = exp(-2π * cutoff / sample_rate)`. At cutoff 0, `a` ≈ 1
    /// (full filtering); approaching Nyquist, `a` falls toward 0.
    /// Does not clear state; call [`reset`](Self::reset) for that.
    pub fn set_coefficients(&mut self, sample_rate: f32, cutoff_hz: f32, mode: FilterMode) {
        self.coeff = expf(-core::f32::consts::TAU * cutoff_hz / sample_rate);
        self.mode = mode;
    }

    /// Current decay coefficient `a`.
    pub fn coeff(&self) -> f32 {
        self.coeff
    }
}

impl SampleProcessor for OnePoleFilter {
    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let output = match self.mode {
            FilterMode::LowPass => (1.0 - self.coeff) * input + self.coeff * self.y_prev,
            FilterMode::HighPass => self.coeff * (self.y_prev + input - self.x_prev),
        };
        self.y_prev = flush_denormal(output);
        self.x_prev = input;
        self.y_prev
    }

    fn reset(&mut self) {
        self.y_prev = 0.0;
        self.x_prev = 0.0;
    }
}
