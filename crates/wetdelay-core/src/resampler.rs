//! Phase-accumulator resampler with linear interpolation.
//!
//! Converts between the host rate and the engine's fixed 24 kHz internal
//! rate. A fractional phase accumulator walks through the input; each output
//! sample is a linear blend of the last consumed sample and the incoming one.
//!
//! Linear interpolation (not polyphase FIR or windowed sinc) is a deliberate
//! choice. The emulated hardware converted rates crudely, and the mild
//! aliasing and interpolation distortion this produces are part of its
//! character. Do not swap in a higher-quality kernel.
//!
//! Cross-block continuity comes from carrying `phase` and `last` between
//! calls: for identical `(input, phase, last)` the output is identical, so
//! block size never changes the rendered signal.

/// Linear-interpolation up/down sampler.
///
/// One instance handles one direction for one channel; the engine owns four
/// (down L/R, up L/R).
///
/// # Example
///
/// ```rust
/// use wetdelay_core::LinearResampler;
///
/// let mut down = LinearResampler::new();
/// let input = [0.0, 0.5, 1.0, 0.5];
/// let mut output = [0.0f32; 4];
/// let produced = down.downsample(&input, &mut output, 48000.0, 24000.0);
/// assert!(produced <= output.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearResampler {
    /// Fractional position between `last` and the next input sample, in [0, 1).
    phase: f32,
    /// Most recently consumed input sample.
    last: f32,
}

impl LinearResampler {
    /// Create a resampler with zeroed phase and history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Downsample `input` into `output`, returning the number of samples
    /// produced.
    ///
    /// `ratio = input_rate / output_rate` (> 1 when downsampling). For each
    /// input sample, output samples are emitted while the phase is below 1.0,
    /// interpolated between the previous and current input at the phase
    /// fraction; the phase then advances by `ratio` per emitted sample and
    /// wraps by 1.0 as the input sample is consumed.
    ///
    /// Stops early when `output` is full; the returned count is at most
    /// `output.len()`.
    pub fn downsample(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        input_rate: f32,
        output_rate: f32,
    ) -> usize {
        let ratio = input_rate / output_rate;
        let mut produced = 0;

        'input: for &current in input {
            while self.phase < 1.0 {
                if produced >= output.len() {
                    // Capacity reached: stop without consuming this input
                    // sample, leaving phase and history valid for the next call.
                    break 'input;
                }
                output[produced] = self.last + (current - self.last) * self.phase;
                produced += 1;
                self.phase += ratio;
            }
            self.phase -= 1.0;
            self.last = current;
        }

        produced
    }

    /// Upsample `input` into `output`, always filling `output` completely.
    ///
    /// `ratio = input_rate / output_rate` (< 1 when upsampling). Each output
    /// slot interpolates between `last` and the next pending input sample at
    /// the current phase; the phase advances by `ratio`, and whenever it
    /// reaches 1.0 the next input sample is consumed into `last`.
    ///
    /// If the input runs out mid-call the remaining output holds `last`
    /// flat. That is a graceful-degradation policy for undersized internal
    /// blocks, not an error.
    pub fn upsample(
        &mut self,
        input: &[f32],
        output: &mut [f32],
        input_rate: f32,
        output_rate: f32,
    ) {
        let ratio = input_rate / output_rate;
        let mut next_index = 0;

        for out in output.iter_mut() {
            *out = if next_index < input.len() {
                self.last + (input[next_index] - self.last) * self.phase
            } else {
                self.last
            };

            self.phase += ratio;
            while self.phase >= 1.0 && next_index < input.len() {
                self.last = input[next_index];
                next_index += 1;
                self.phase -= 1.0;
            }
        }
    }

    /// Current fractional phase between blocks.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Zero the phase accumulator and interpolation history.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.last = 0.0;
    }
}
