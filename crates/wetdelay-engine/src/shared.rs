//! Lock-free state shared between the audio thread and a control thread.
//!
//! Two things cross the thread boundary: the selected delay index (control
//! thread writes, audio thread reads at block start) and the four peak
//! meter values (audio thread writes, display reads whenever it likes).
//! Each value is individually atomic; no consistency between them is
//! guaranteed or needed, so `Relaxed` ordering is sufficient throughout.

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::DELAY_TIMES_MS;

/// An `f32` stored as its bit pattern in an `AtomicU32`.
///
/// A concurrent reader always sees a whole value written by some store,
/// never a torn one.
#[derive(Debug)]
pub struct AtomicF32(core::sync::atomic::AtomicU32);

impl AtomicF32 {
    /// Create with an initial value.
    pub const fn new(value: f32) -> Self {
        Self(core::sync::atomic::AtomicU32::new(value.to_bits()))
    }

    /// Relaxed load.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Relaxed store.
    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Control and display state shared with the non-real-time side.
///
/// Typically held in an `Arc`: the audio thread's [`WetDelay`] keeps one
/// clone, the host/UI keeps another.
///
/// [`WetDelay`]: crate::WetDelay
#[derive(Debug)]
pub struct SharedControls {
    delay_index: AtomicUsize,
    input_peak_l: AtomicF32,
    input_peak_r: AtomicF32,
    output_peak_l: AtomicF32,
    output_peak_r: AtomicF32,
}

impl SharedControls {
    /// Create with delay index 0 and zeroed meters.
    pub const fn new() -> Self {
        Self {
            delay_index: AtomicUsize::new(0),
            input_peak_l: AtomicF32::new(0.0),
            input_peak_r: AtomicF32::new(0.0),
            output_peak_l: AtomicF32::new(0.0),
            output_peak_r: AtomicF32::new(0.0),
        }
    }

    /// Select a delay tap by index. Out-of-range values clamp to the last
    /// tap. This is the single value the host persists across sessions.
    pub fn set_delay_index(&self, index: usize) {
        let clamped = index.min(DELAY_TIMES_MS.len() - 1);
        self.delay_index.store(clamped, Ordering::Relaxed);
    }

    /// Currently selected delay tap index, `0..6`.
    pub fn delay_index(&self) -> usize {
        // Clamp on the read side too; the stored value is already in range
        // but the audio thread must never index out of bounds.
        self.delay_index
            .load(Ordering::Relaxed)
            .min(DELAY_TIMES_MS.len() - 1)
    }

    /// Delay time in milliseconds for the selected tap.
    pub fn delay_ms(&self) -> usize {
        DELAY_TIMES_MS[self.delay_index()]
    }

    /// Input peak meter values, (left, right).
    pub fn input_peaks(&self) -> (f32, f32) {
        (self.input_peak_l.load(), self.input_peak_r.load())
    }

    /// Output peak meter values, (left, right).
    pub fn output_peaks(&self) -> (f32, f32) {
        (self.output_peak_l.load(), self.output_peak_r.load())
    }

    pub(crate) fn store_input_peaks(&self, left: f32, right: f32) {
        self.input_peak_l.store(left);
        self.input_peak_r.store(right);
    }

    pub(crate) fn store_output_peaks(&self, left: f32, right: f32) {
        self.output_peak_l.store(left);
        self.output_peak_r.store(right);
    }

    pub(crate) fn clear_meters(&self) {
        self.store_input_peaks(0.0, 0.0);
        self.store_output_peaks(0.0, 0.0);
    }
}

impl Default for SharedControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_f32_round_trips() {
        let value = AtomicF32::new(0.25);
        assert_eq!(value.load(), 0.25);
        value.store(-1.5);
        assert_eq!(value.load(), -1.5);
    }

    #[test]
    fn delay_index_clamps() {
        let controls = SharedControls::new();
        controls.set_delay_index(99);
        assert_eq!(controls.delay_index(), 5);
        assert_eq!(controls.delay_ms(), 400);

        controls.set_delay_index(2);
        assert_eq!(controls.delay_ms(), 80);
    }

    #[test]
    fn meters_start_at_zero() {
        let controls = SharedControls::new();
        assert_eq!(controls.input_peaks(), (0.0, 0.0));
        assert_eq!(controls.output_peaks(), (0.0, 0.0));
    }
}
