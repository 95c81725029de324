//! The `SampleProcessor` trait: one sample in, one sample out.
//!
//! Every stage of the delay's signal chain — anti-alias filter, high-pass,
//! low-pass, reconstruction filter — is a small state machine with the same
//! shape: process one sample, advance internal history, and reset on demand.
//! `SampleProcessor` captures that shape once so block helpers and tests can
//! treat all of them uniformly.
//!
//! The trait is object-safe, though the engine uses static dispatch
//! throughout; there is no per-sample virtual call in the audio path.

/// One-sample-in/one-sample-out processing stage.
///
/// # Example
///
/// ```rust
/// use wetdelay_core::SampleProcessor;
///
/// struct Gain(f32);
///
/// impl SampleProcessor for Gain {
///     fn process(&mut self, input: f32) -> f32 {
///         input * self.0
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain(0.5);
/// assert_eq!(gain.process(1.0), 0.5);
/// ```
pub trait SampleProcessor {
    /// Process a single sample, advancing internal state by one step.
    ///
    /// # Arguments
    /// * `input` - Input sample, typically in range [-1.0, 1.0]
    fn process(&mut self, input: f32) -> f32;

    /// Process a block of samples.
    ///
    /// Default implementation calls [`process`](Self::process) per sample.
    ///
    /// # Panics
    /// Debug-asserts that `input.len() == output.len()`.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "input and output blocks must have the same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a block of samples in place.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Clear internal state (filter history etc.) without changing
    /// coefficients or parameters.
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Accumulator {
        sum: f32,
    }

    impl SampleProcessor for Accumulator {
        fn process(&mut self, input: f32) -> f32 {
            self.sum += input;
            self.sum
        }

        fn reset(&mut self) {
            self.sum = 0.0;
        }
    }

    #[test]
    fn block_default_matches_per_sample() {
        let mut a = Accumulator { sum: 0.0 };
        let mut b = Accumulator { sum: 0.0 };

        let input = [0.1, 0.2, 0.3, 0.4];
        let mut block_out = [0.0; 4];
        a.process_block(&input, &mut block_out);

        for (i, &x) in input.iter().enumerate() {
            assert_eq!(block_out[i], b.process(x));
        }
    }

    #[test]
    fn inplace_processing() {
        let mut a = Accumulator { sum: 0.0 };
        let mut buffer = [1.0, 1.0, 1.0];
        a.process_block_inplace(&mut buffer);
        assert_eq!(buffer, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn reset_clears_state() {
        let mut a = Accumulator { sum: 0.0 };
        a.process(5.0);
        a.reset();
        assert_eq!(a.process(1.0), 1.0);
    }
}
