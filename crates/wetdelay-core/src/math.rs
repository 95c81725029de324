//! Small math utilities shared across the engine.

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats (~1e-38 to 1e-45) cause severe CPU performance
/// degradation on most architectures. This replaces values below 1e-20
/// with zero, giving some margin before the IEEE 754 subnormal range.
///
/// Use this on filter state and feedback paths where signal can decay
/// indefinitely toward zero.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Convert milliseconds to a sample count at the given rate, truncated.
///
/// # Arguments
/// * `ms` - Duration in milliseconds
/// * `sample_rate` - Sample rate in Hz
#[inline]
pub fn ms_to_samples(ms: usize, sample_rate: f64) -> usize {
    (ms as f64 * sample_rate / 1000.0) as usize
}
