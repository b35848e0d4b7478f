//! csv2arb converts waveform files of arbitrary waveform generators to text and back.
//!
//! The binary format is the one the built-in AWG of the Rigol DS1000Z-S series loads:
//! exactly 16384 little endian 16-bit words. Bit 15 of each word is the "point" marker,
//! bits 0 to 13 hold the DAC value.
//! The text format has one normalized value (-1.0 to 1.0) per line. Lines starting with `#` are
//! comments.
//!
//! The library works on in-memory buffers only, so it can be used in no_std environments with
//! an allocator.
//!
//! # Examples
//!
//! Encode three samples and read them back.
//! ```
//! # fn main() -> anyhow::Result<()> {
//! let encoded = csv2arb::encode("# one sample each: 0 V, max, min\n0.0\n1.0\n-1.0\n")?;
//! assert_eq!(encoded.data_samples, 3);
//!
//! let bytes = encoded.to_bytes();
//! assert_eq!(bytes.len(), csv2arb::FILE_SIZE);
//!
//! let decoded = csv2arb::decode(&bytes)?;
//! for sample in &decoded.samples[..3] {
//!     println!("{} point: {}", sample.value, sample.point);
//! }
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::string::String;

pub mod decoder;
pub mod encoder;
mod error;
pub mod marker;
pub mod range;
mod waveform;

pub use decoder::{decode, Decoded, DecodedSample, Decoder};
pub use encoder::{encode, Encoded, Encoder, Padding};
pub use error::{DecodeError, EncodeError, RangeError, WaveformError};
pub use waveform::Waveform;

use range::RangeViolation;

/// Number of samples in one waveform file.
pub const NUM_SAMPLES: usize = 16384;
/// Size of one sample word in bytes.
pub const BYTES_PER_SAMPLE: usize = 2;
/// Exact size of a waveform file in bytes.
pub const FILE_SIZE: usize = NUM_SAMPLES * BYTES_PER_SAMPLE;
/// Resolution of the AWG DAC.
pub const DAC_BITS: u32 = 14;

/// Lower end of the normalized sample range.
pub const NORMALIZED_MIN: f32 = -1.0;
/// Upper end of the normalized sample range.
pub const NORMALIZED_MAX: f32 = 1.0;

/// Non-fatal problem found during a conversion. The conversion went on after it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Warning {
    #[error("Line {line}: {violation}. The input should be normalized.")]
    ValueOutOfRange {
        line: usize,
        violation: RangeViolation<f32>,
    },
    #[error("Line {line}: {content:?} is not a number, using 0.0.")]
    MalformedLine { line: usize, content: String },
    #[error("Sample {index}: reserved bit 14 is set in {word:#06x}, ignoring it.")]
    ReservedBitSet { index: usize, word: u16 },
}

#[cfg(test)]
mod tests {
    use crate::marker::MAGNITUDE_MAX;
    use crate::{DAC_BITS, FILE_SIZE};

    #[test]
    fn format_constants() {
        assert_eq!(FILE_SIZE, 32768);
        assert_eq!(u32::from(MAGNITUDE_MAX.value()), (1 << DAC_BITS) - 1);
    }
}
