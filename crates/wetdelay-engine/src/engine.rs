//! Block-processing front end: taps, metering, and shared control state.
//!
//! `WetDelay` is what a host boundary drives: it reads the selected tap at
//! the start of every block, meters the input, runs the [`DelayBuffer`],
//! and meters the output. Everything the host needs back out — the four
//! peak levels and the persisted tap index — lives in [`SharedControls`].

#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::sync::Arc;

use wetdelay_core::PeakMeter;

use crate::{DelayBuffer, SharedControls};

/// The six selectable delay taps of the emulated unit, in milliseconds.
pub const DELAY_TIMES_MS: [usize; 6] = [20, 40, 80, 120, 220, 400];

/// Maximum delay the engine pre-allocates for, in milliseconds.
pub const MAX_DELAY_MS: usize = 400;

/// A complete delay unit: engine, meters, and shared controls.
///
/// # Concurrency
///
/// [`process_block`](Self::process_block) is the single real-time writer.
/// A control thread interacts only through the [`SharedControls`] handle
/// from [`controls`](Self::controls). [`prepare`](Self::prepare) and
/// [`reset`](Self::reset) must be serialized against processing by the
/// caller; they are not real-time safe.
///
/// # Example
///
/// ```rust
/// use wetdelay_engine::WetDelay;
///
/// let mut unit = WetDelay::new();
/// unit.prepare(48000.0);
///
/// let controls = unit.controls();
/// controls.set_delay_index(2); // 80 ms
///
/// let input = vec![0.0f32; 256];
/// let mut out_l = vec![0.0f32; 256];
/// let mut out_r = vec![0.0f32; 256];
/// unit.process_block(&input, &input, &mut out_l, &mut out_r);
/// ```
pub struct WetDelay {
    delay: DelayBuffer,
    controls: Arc<SharedControls>,
    meter_in_l: PeakMeter,
    meter_in_r: PeakMeter,
    meter_out_l: PeakMeter,
    meter_out_r: PeakMeter,
}

impl WetDelay {
    /// Create an unprepared unit. Call [`prepare`](Self::prepare) before
    /// processing.
    pub fn new() -> Self {
        Self {
            delay: DelayBuffer::new(),
            controls: Arc::new(SharedControls::new()),
            meter_in_l: PeakMeter::new(),
            meter_in_r: PeakMeter::new(),
            meter_out_l: PeakMeter::new(),
            meter_out_r: PeakMeter::new(),
        }
    }

    /// Handle to the shared control/meter state for the non-real-time side.
    pub fn controls(&self) -> Arc<SharedControls> {
        Arc::clone(&self.controls)
    }

    /// Direct access to the underlying engine (tests, offline tools).
    pub fn delay_buffer_mut(&mut self) -> &mut DelayBuffer {
        &mut self.delay
    }

    /// Allocate for a session at the given host rate and clear everything,
    /// meters included. Re-preparing handles sample-rate changes.
    pub fn prepare(&mut self, sample_rate: f64) {
        self.delay.prepare(sample_rate, MAX_DELAY_MS);
        self.clear_meters();
    }

    /// Clear delay history and meters without reallocating. For transport
    /// stop/restart.
    pub fn reset(&mut self) {
        self.delay.reset();
        self.clear_meters();
    }

    /// Process one stereo block, 100% wet, updating the peak meters.
    ///
    /// The selected tap is loaded once at block start, so a concurrent
    /// change applies from the next block onward — never mid-block.
    pub fn process_block(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        let delay_ms = self.controls.delay_ms();

        for (&l, &r) in left_in.iter().zip(right_in.iter()) {
            let peak_l = self.meter_in_l.update(l);
            let peak_r = self.meter_in_r.update(r);
            self.controls.store_input_peaks(peak_l, peak_r);
        }

        self.delay
            .process_stereo(left_in, right_in, left_out, right_out, delay_ms);

        for (&l, &r) in left_out.iter().zip(right_out.iter()) {
            let peak_l = self.meter_out_l.update(l);
            let peak_r = self.meter_out_r.update(r);
            self.controls.store_output_peaks(peak_l, peak_r);
        }
    }

    fn clear_meters(&mut self) {
        self.meter_in_l.reset();
        self.meter_in_r.reset();
        self.meter_out_l.reset();
        self.meter_out_r.reset();
        self.controls.clear_meters();
    }
}

impl Default for WetDelay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wetdelay_core::METER_DECAY;

    #[test]
    fn taps_match_the_hardware() {
        assert_eq!(DELAY_TIMES_MS, [20, 40, 80, 120, 220, 400]);
        assert_eq!(MAX_DELAY_MS, *DELAY_TIMES_MS.last().unwrap());
    }

    #[test]
    fn meters_follow_input_level() {
        let mut unit = WetDelay::new();
        unit.prepare(44100.0);

        let input = vec![0.5f32; 128];
        let mut out_l = vec![0.0f32; 128];
        let mut out_r = vec![0.0f32; 128];
        unit.process_block(&input, &input, &mut out_l, &mut out_r);

        // On a constant input the meter alternates attack and decay (decay
        // applies whenever the sample does not exceed the held peak), so the
        // published value sits within one decay step of the level.
        let (in_l, in_r) = unit.controls().input_peaks();
        for peak in [in_l, in_r] {
            assert!(
                peak >= 0.5 * METER_DECAY && peak <= 0.5,
                "meter should track a 0.5 input within one decay step, got {peak}"
            );
        }
    }

    #[test]
    fn tap_change_applies_next_block() {
        let mut unit = WetDelay::new();
        unit.prepare(44100.0);
        unit.delay_buffer_mut().set_character_enabled(false);
        let controls = unit.controls();

        controls.set_delay_index(0);
        let impulse: Vec<f32> = (0..64).map(|i| if i == 0 { 1.0 } else { 0.0 }).collect();
        let mut out_l = vec![0.0f32; 64];
        let mut out_r = vec![0.0f32; 64];
        unit.process_block(&impulse, &impulse, &mut out_l, &mut out_r);

        // Switching taps mid-stream must not disturb processing
        controls.set_delay_index(5);
        let silence = vec![0.0f32; 64];
        unit.process_block(&silence, &silence, &mut out_l, &mut out_r);
        assert!(out_l.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn prepare_clears_meters() {
        let mut unit = WetDelay::new();
        unit.prepare(44100.0);

        let input = vec![0.9f32; 64];
        let mut out_l = vec![0.0f32; 64];
        let mut out_r = vec![0.0f32; 64];
        unit.process_block(&input, &input, &mut out_l, &mut out_r);
        assert!(unit.controls().input_peaks().0 > 0.0);

        unit.prepare(48000.0);
        assert_eq!(unit.controls().input_peaks(), (0.0, 0.0));
    }
}
