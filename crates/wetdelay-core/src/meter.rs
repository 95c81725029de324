//! Peak metering: instant attack, exponential decay.
//!
//! The meter follows `|sample|` upward instantly and decays by a fixed
//! factor per sample otherwise. With [`METER_DECAY`] = 0.9995 the decay time
//! constant depends on the host rate: at 44.1 kHz the level falls to 1/e in
//! about 45 ms and drops 60 dB in roughly 310 ms, which reads like a classic
//! hardware LED ladder. Higher host rates decay proportionally faster.
//!
//! One `PeakMeter` tracks one display channel; the engine's front end runs
//! four (input L/R, output L/R) and publishes their values through atomics.

/// Per-sample exponential decay factor applied when the input is below the
/// held peak.
pub const METER_DECAY: f32 = 0.9995;

/// Instant-attack, exponential-decay envelope follower for display.
///
/// # Example
///
/// ```rust
/// use wetdelay_core::PeakMeter;
///
/// let mut meter = PeakMeter::new();
/// assert_eq!(meter.update(-0.5), 0.5); // attack is instant, sign ignored
/// assert!(meter.update(0.0) < 0.5);    // then it decays
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakMeter {
    peak: f32,
}

impl PeakMeter {
    /// Create a meter holding zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one sample; returns the updated peak value.
    ///
    /// The peak never goes negative and never rises without a larger input.
    #[inline]
    pub fn update(&mut self, sample: f32) -> f32 {
        let magnitude = sample.abs();
        if magnitude > self.peak {
            self.peak = magnitude;
        } else {
            self.peak *= METER_DECAY;
        }
        self.peak
    }

    /// Current held peak.
    pub fn value(&self) -> f32 {
        self.peak
    }

    /// Drop the held peak to zero.
    pub fn reset(&mut self) {
        self.peak = 0.0;
    }
}
