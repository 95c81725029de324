//! Uniform noise source for dither and noise-floor injection.
//!
//! A linear congruential generator (Numerical Recipes constants) kept
//! deliberately cheap: one wrapping multiply-add per draw, no heap, no
//! global state. Statistical quality far beyond "sounds like tape hiss"
//! is wasted here.
//!
//! Each [`NoiseSource`] is owned by exactly one engine instance, so two
//! engines never share a random stream and processing is repeatable from
//! a known seed.

/// Per-instance uniform PRNG producing draws in [-1, 1].
#[derive(Debug, Clone)]
pub struct NoiseSource {
    state: u32,
    seed: u32,
}

impl NoiseSource {
    /// Default seed for engines that don't care about the exact stream.
    const DEFAULT_SEED: u32 = 0x1234_5678;

    /// Create a noise source with the default seed.
    pub fn new() -> Self {
        Self::with_seed(Self::DEFAULT_SEED)
    }

    /// Create a noise source with a specific seed.
    pub fn with_seed(seed: u32) -> Self {
        Self { state: seed, seed }
    }

    /// Next uniform draw in [-1, 1].
    #[inline]
    pub fn next_bipolar(&mut self) -> f32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        // Upper 16 bits have the best statistical quality for an LCG.
        // u16 -> f32 is exact (fits the 23-bit mantissa).
        let upper = (self.state >> 16) as u16;
        f32::from(upper) / 32_768.0 - 1.0
    }

    /// Restore the initial seed so the stream replays from the start.
    pub fn reset(&mut self) {
        self.state = self.seed;
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_range() {
        let mut noise = NoiseSource::new();
        for _ in 0..100_000 {
            let x = noise.next_bipolar();
            assert!((-1.0..=1.0).contains(&x), "draw {x} out of range");
        }
    }

    #[test]
    fn mean_is_near_zero() {
        let mut noise = NoiseSource::new();
        let n = 100_000;
        let sum: f64 = (0..n).map(|_| f64::from(noise.next_bipolar())).sum();
        let mean = sum / f64::from(n);
        assert!(mean.abs() < 0.01, "mean {mean} too far from zero");
    }

    #[test]
    fn reset_replays_the_stream() {
        let mut noise = NoiseSource::with_seed(42);
        let first: Vec<f32> = (0..16).map(|_| noise.next_bipolar()).collect();
        noise.reset();
        let replay: Vec<f32> = (0..16).map(|_| noise.next_bipolar()).collect();
        assert_eq!(first, replay);
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = NoiseSource::with_seed(1);
        let mut b = NoiseSource::with_seed(2);
        let same = (0..16).all(|_| a.next_bipolar() == b.next_bipolar());
        assert!(!same);
    }
}
