//! WetDelay Core - DSP primitives for the vintage delay engine
//!
//! This crate provides the sample-level building blocks the delay engine is
//! assembled from, designed for real-time audio processing with zero
//! allocation in the audio path.
//!
//! # Components
//!
//! - [`SampleProcessor`] - Uniform one-sample-in/one-sample-out capability
//! - [`OnePoleFilter`] - Single-pole IIR filter, low-pass or high-pass
//! - [`LinearResampler`] - Phase-accumulator linear-interpolation resampler
//! - [`NoiseSource`] - Per-instance uniform PRNG for dither and noise floor
//! - [`PeakMeter`] - Instant-attack, exponential-decay envelope follower
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! wetdelay-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations in processing paths
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Deliberately lo-fi**: The resampler interpolates linearly and the
//!   filters are first order; the resulting artifacts are the product's
//!   sound, not a quality ceiling to engineer away

#![cfg_attr(not(feature = "std"), no_std)]

pub mod math;
pub mod meter;
pub mod noise;
pub mod one_pole;
pub mod processor;
pub mod resampler;

pub use math::{flush_denormal, ms_to_samples};
pub use meter::{METER_DECAY, PeakMeter};
pub use noise::NoiseSource;
pub use one_pole::{FilterMode, OnePoleFilter};
pub use processor::SampleProcessor;
pub use resampler::LinearResampler;
