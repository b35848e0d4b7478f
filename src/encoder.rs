//! Normalized text to binary waveform.

use crate::error::{EncodeError, WaveformError};
use crate::marker::{Word, MAGNITUDE_MAX, ZERO_LEVEL};
use crate::range::{Range, RangeMapper, RangeViolation};
use crate::waveform::Waveform;
use crate::{Warning, BYTES_PER_SAMPLE, FILE_SIZE, NORMALIZED_MAX, NORMALIZED_MIN, NUM_SAMPLES};
use alloc::string::ToString;
use alloc::vec::Vec;
use arbitrary_int::u14;
use num_traits::Float;
use winnow::ascii::{digit0, digit1, multispace0};
use winnow::combinator::{alt, opt, preceded};
use winnow::error::ModalResult;
use winnow::token::one_of;
use winnow::Parser;

/// Lines starting with this character are skipped.
pub const COMMENT: char = '#';

/// Zero level words appended after the data samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    /// Bytes written before padding.
    pub from_bytes: usize,
    /// File size after padding.
    pub to_bytes: usize,
    /// Number of padding words, including both point markers.
    pub words: usize,
}

/// Output of [`Encoder::encode`].
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    /// Data samples followed by padding. Always full.
    pub waveform: Waveform,
    /// Number of samples read from the text.
    pub data_samples: usize,
    pub padding: Option<Padding>,
    pub warnings: Vec<Warning>,
}

impl Encoded {
    /// Every data sample is a point.
    pub fn points(&self) -> usize {
        self.data_samples
    }

    /// Bytes written for data samples, padding excluded.
    pub fn bytes_written(&self) -> usize {
        self.data_samples * BYTES_PER_SAMPLE
    }

    /// The complete waveform file.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.waveform.to_bytes()
    }
}

/// Maps normalized values onto 14-bit magnitudes.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    mapper: RangeMapper<f32>,
}

impl Encoder {
    pub fn new() -> Result<Self, EncodeError> {
        let mapper = RangeMapper::new(
            Range::new(NORMALIZED_MIN, NORMALIZED_MAX),
            Range::new(0.0, f32::from(MAGNITUDE_MAX.value())),
        )?;
        Ok(Encoder { mapper })
    }

    /// Converts one normalized value into a marked word.
    ///
    /// The mapped value is truncated toward zero. Values outside -1.0..=1.0 are mapped without
    /// clamping and only saturate at the 14-bit limits of the word.
    pub fn encode_value(&self, value: f32) -> (Word, Option<RangeViolation<f32>>) {
        let mapping = self.mapper.map(value);
        (Word::point(quantize(mapping.value)), mapping.violation)
    }

    /// Encodes one value per line and pads the result to a complete waveform file.
    ///
    /// # Errors
    ///
    /// * `EncodeError::TooManySamples` - The text has more than [`NUM_SAMPLES`] value lines.
    /// * `EncodeError::PaddingUnderflow` - Exactly one sample slot is left, too few for the two
    ///   point markers of the padding.
    pub fn encode(&self, text: &str) -> Result<Encoded, EncodeError> {
        let mut waveform = Waveform::new();
        let mut warnings = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;
            if line.starts_with(COMMENT) {
                continue;
            }

            let value = match parse_value.parse_next(&mut &*line) {
                Ok(value) if value.is_finite() => value,
                _ => {
                    warnings.push(Warning::MalformedLine {
                        line: line_number,
                        content: line.to_string(),
                    });
                    0.0
                }
            };

            let (word, violation) = self.encode_value(value);
            if let Some(violation) = violation {
                warnings.push(Warning::ValueOutOfRange {
                    line: line_number,
                    violation,
                });
            }

            waveform.push(word).map_err(|e| match e {
                WaveformError::Full { capacity } => EncodeError::TooManySamples {
                    line: line_number,
                    capacity,
                },
                e => EncodeError::Waveform(e),
            })?;
        }

        let data_samples = waveform.len();
        let padding = pad(&mut waveform)?;

        Ok(Encoded {
            waveform,
            data_samples,
            padding,
            warnings,
        })
    }
}

/// Encodes text with the default ranges.
pub fn encode(text: &str) -> Result<Encoded, EncodeError> {
    Encoder::new()?.encode(text)
}

/// Optional leading whitespace and a decimal number. Whatever follows the number is left unparsed.
fn parse_value(input: &mut &str) -> ModalResult<f32> {
    preceded(multispace0, decimal.parse_to()).parse_next(input)
}

/// Longest decimal prefix: `[+-] digits [. digits] [e [+-] digits]`.
/// An exponent marker without digits is not part of the number ("0.5e" is 0.5).
fn decimal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        opt(one_of(['+', '-'])),
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)
}

/// Truncates toward zero and saturates to 0..=16383.
fn quantize(value: f32) -> u14 {
    let truncated = Float::trunc(value);
    if truncated <= 0.0 {
        u14::new(0)
    } else if truncated >= f32::from(MAGNITUDE_MAX.value()) {
        MAGNITUDE_MAX
    } else {
        u14::new(truncated as u16)
    }
}

/// Fills the rest of `waveform` with zero level words.
/// The AWG only loads complete files and wants the padding run to start and end with a point.
fn pad(waveform: &mut Waveform) -> Result<Option<Padding>, EncodeError> {
    let from_bytes = waveform.byte_len();
    let words = waveform.remaining();

    match words {
        0 => return Ok(None),
        1 => {
            return Err(EncodeError::PaddingUnderflow {
                remaining_bytes: FILE_SIZE - from_bytes,
            })
        }
        _ => {}
    }

    log::debug!(
        "Padding file from {from_bytes} bytes to {FILE_SIZE} bytes with {words} zero values"
    );

    waveform.push(Word::point(ZERO_LEVEL))?;
    for _ in 0..words - 2 {
        waveform.push(Word::plain(ZERO_LEVEL))?;
    }
    waveform.push(Word::point(ZERO_LEVEL))?;

    debug_assert_eq!(waveform.len(), NUM_SAMPLES);
    Ok(Some(Padding {
        from_bytes,
        to_bytes: FILE_SIZE,
        words,
    }))
}
