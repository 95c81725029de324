//! WetDelay Engine - emulation of a 1980s rack-mount digital delay
//!
//! The emulated unit ran its delay line at a low internal sample rate with
//! 12-bit converters, and most of what made it sound the way it did was
//! everything *around* the delay line: band-limiting, crude rate conversion,
//! quantization, channel bleed, and a constant hiss. This crate reproduces
//! that chain sample-by-sample:
//!
//! ```text
//! host-rate in -> anti-alias LP (10 kHz)
//!              -> downsample to 24 kHz (linear interpolation)
//!              -> delay line read/write
//!              -> crosstalk (-40 dB bleed between channels)
//!              -> high-pass 80 Hz -> low-pass 9 kHz
//!              -> 12-bit quantize with TPDF dither
//!              -> noise floor (~-80 dBFS)
//!              -> upsample to host rate
//!              -> reconstruction LP (10 kHz) -> host-rate out
//! ```
//!
//! # Components
//!
//! - [`DelayBuffer`] - The stateful engine: circular buffer plus the full
//!   signal chain, driven one block at a time
//! - [`WetDelay`] - Block-processing front end that owns the lock-free
//!   control and meter state shared with a non-real-time thread
//! - [`SharedControls`] - Atomic delay-index selector and peak meter values
//!
//! # Real-time contract
//!
//! [`DelayBuffer::process_stereo`] and [`WetDelay::process_block`] never
//! allocate, lock, or panic. All buffers are sized in `prepare`, which is
//! *not* real-time safe and must be serialized against processing by the
//! caller.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay_buffer;
pub mod engine;
pub mod shared;

pub use delay_buffer::DelayBuffer;
pub use engine::{DELAY_TIMES_MS, MAX_DELAY_MS, WetDelay};
pub use shared::{AtomicF32, SharedControls};

/// The fixed internal processing rate of the emulated hardware, in Hz.
///
/// The delay line, crosstalk, filtering, and quantization all run at this
/// rate regardless of the host rate.
pub const INTERNAL_RATE: f32 = 24_000.0;
