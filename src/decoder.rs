//! Binary waveform to normalized text.

use crate::error::DecodeError;
use crate::marker::{has_reserved_bit, Word, MAGNITUDE_MAX};
use crate::range::{Mapping, Range, RangeMapper};
use crate::waveform::Waveform;
use crate::{Warning, NORMALIZED_MAX, NORMALIZED_MIN};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// One decoded sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedSample {
    /// Normalized value, -1.0 to 1.0.
    pub value: f32,
    /// The point marker was set on the word.
    pub point: bool,
}

/// Output of [`Decoder::decode`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    /// Samples in file order.
    pub samples: Vec<DecodedSample>,
    pub warnings: Vec<Warning>,
}

impl Decoded {
    /// Number of samples carrying the point marker.
    pub fn points(&self) -> usize {
        self.samples.iter().filter(|s| s.point).count()
    }

    /// Writes one value per line with six decimals.
    pub fn write_text<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for sample in &self.samples {
            writeln!(out, "{:.6}", sample.value)?;
        }
        Ok(())
    }

    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.samples.len() * 10);
        // fmt::Write for String never fails
        let _ = self.write_text(&mut text);
        text
    }
}

/// Maps 14-bit magnitudes onto the normalized range.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    mapper: RangeMapper<f32>,
}

impl Decoder {
    pub fn new() -> Result<Self, DecodeError> {
        let mapper = RangeMapper::new(
            Range::new(0.0, f32::from(MAGNITUDE_MAX.value())),
            Range::new(NORMALIZED_MIN, NORMALIZED_MAX),
        )?;
        Ok(Decoder { mapper })
    }

    /// Normalized value of a single word. The marker does not affect the value.
    pub fn decode_word(&self, word: Word) -> Mapping<f32> {
        self.mapper.map(f32::from(word.magnitude().value()))
    }

    /// Decodes a complete waveform file.
    ///
    /// # Errors
    ///
    /// * `DecodeError::Waveform` - `bytes` is not a complete waveform file.
    pub fn decode(&self, bytes: &[u8]) -> Result<Decoded, DecodeError> {
        let waveform = Waveform::from_bytes(bytes)?;
        Ok(self.decode_waveform(&waveform))
    }

    /// Decodes every word of `waveform` in order.
    pub fn decode_waveform(&self, waveform: &Waveform) -> Decoded {
        let mut decoded = Decoded {
            samples: Vec::with_capacity(waveform.len()),
            warnings: Vec::new(),
        };

        for (index, &bits) in waveform.as_raw().iter().enumerate() {
            if has_reserved_bit(bits) {
                decoded
                    .warnings
                    .push(Warning::ReservedBitSet { index, word: bits });
            }

            let word = Word::from_bits(bits);
            if word.is_point() {
                log::debug!("Sample {index} is a point");
            }

            // a 14-bit magnitude never leaves the source range
            let value = self.decode_word(word).value;

            decoded.samples.push(DecodedSample {
                value,
                point: word.is_point(),
            });
        }

        decoded
    }
}

/// Decodes a complete waveform file with the default ranges.
pub fn decode(bytes: &[u8]) -> Result<Decoded, DecodeError> {
    Decoder::new()?.decode(bytes)
}
