//! Stereo WAV reading and writing over `hound`.
//!
//! The engine is stereo-only, so everything here works in split L/R
//! channel buffers. Mono input files are duplicated to both channels;
//! output is always written as 32-bit IEEE float.

use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Error type for WAV I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying WAV read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The file's sample encoding is not supported.
    #[error("unsupported sample format: {0} bits per sample ({1:?})")]
    UnsupportedFormat(u16, SampleFormat),

    /// More channels than the engine handles.
    #[error("unsupported channel count: {0} (expected 1 or 2)")]
    UnsupportedChannels(u16),
}

/// Result alias for WAV I/O.
pub type Result<T> = std::result::Result<T, Error>;

/// Split stereo audio plus its sample rate.
#[derive(Debug, Clone)]
pub struct StereoAudio {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl StereoAudio {
    /// Number of sample frames.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// True when no frames are present.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Read a WAV file into split stereo f32 buffers.
///
/// PCM 8/16/24/32-bit and 32-bit float files are accepted. Mono files are
/// duplicated into both channels; files with more than two channels are
/// rejected.
pub fn read_stereo<P: AsRef<Path>>(path: P) -> Result<StereoAudio> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.channels == 0 || spec.channels > 2 {
        return Err(Error::UnsupportedChannels(spec.channels));
    }

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        (SampleFormat::Int, bits @ 1..=32) => {
            let scale = (1_i64 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
        (format, bits) => return Err(Error::UnsupportedFormat(bits, format)),
    };

    let (left, right) = if spec.channels == 1 {
        (interleaved.clone(), interleaved)
    } else {
        let mut left = Vec::with_capacity(interleaved.len() / 2);
        let mut right = Vec::with_capacity(interleaved.len() / 2);
        for frame in interleaved.chunks_exact(2) {
            left.push(frame[0]);
            right.push(frame[1]);
        }
        (left, right)
    };

    Ok(StereoAudio {
        left,
        right,
        sample_rate: spec.sample_rate,
    })
}

/// Write split stereo buffers as a 32-bit float WAV file.
///
/// # Panics
/// Debug-asserts that both channels have the same length; the shorter
/// length is written.
pub fn write_stereo<P: AsRef<Path>>(path: P, audio: &StereoAudio) -> Result<()> {
    debug_assert_eq!(audio.left.len(), audio.right.len());

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: audio.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for (&l, &r) in audio.left.iter().zip(audio.right.iter()) {
        writer.write_sample(l)?;
        writer.write_sample(r)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round_trip.wav");

        let audio = StereoAudio {
            left: vec![0.0, 0.5, -0.5, 1.0],
            right: vec![1.0, -1.0, 0.25, 0.0],
            sample_rate: 44100,
        };
        write_stereo(&path, &audio).unwrap();

        let read = read_stereo(&path).unwrap();
        assert_eq!(read.sample_rate, 44100);
        assert_eq!(read.left, audio.left);
        assert_eq!(read.right, audio.right);
    }

    #[test]
    fn mono_duplicates_to_both_channels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for v in [0i16, 16384, -16384] {
            writer.write_sample(v).unwrap();
        }
        writer.finalize().unwrap();

        let read = read_stereo(&path).unwrap();
        assert_eq!(read.left, read.right);
        assert_eq!(read.len(), 3);
        assert!((read.left[1] - 0.5).abs() < 1e-4);
    }

    #[test]
    fn rejects_surround_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.wav");

        let spec = hound::WavSpec {
            channels: 4,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for _ in 0..8 {
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();

        assert!(matches!(
            read_stereo(&path),
            Err(Error::UnsupportedChannels(4))
        ));
    }
}
