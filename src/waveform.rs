use crate::error::WaveformError;
use crate::marker::Word;
use crate::{BYTES_PER_SAMPLE, FILE_SIZE, NUM_SAMPLES};
use alloc::vec::Vec;
use winnow::binary::le_u16;
use winnow::error::ModalResult;
use winnow::Parser;

/// Fixed-capacity buffer of raw sample words.
///
/// Holds at most [`NUM_SAMPLES`] words, the number of samples one AWG file contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Waveform {
    words: heapless::Vec<u16, NUM_SAMPLES>,
}

impl Waveform {
    pub fn new() -> Self {
        Waveform {
            words: heapless::Vec::new(),
        }
    }

    /// Reads a complete waveform file.
    ///
    /// # Errors
    ///
    /// * `WaveformError::SizeMismatch` - The input is not exactly [`FILE_SIZE`] bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WaveformError> {
        if bytes.len() != FILE_SIZE {
            return Err(WaveformError::SizeMismatch {
                expected: FILE_SIZE,
                actual: bytes.len(),
            });
        }

        let mut waveform = Waveform::new();
        let mut input = bytes;
        while !input.is_empty() {
            let Ok(bits) = parse_word.parse_next(&mut input) else {
                return Err(WaveformError::SizeMismatch {
                    expected: FILE_SIZE,
                    actual: bytes.len(),
                });
            };
            waveform.push_raw(bits)?;
        }
        Ok(waveform)
    }

    /// Appends a word.
    ///
    /// # Errors
    ///
    /// * `WaveformError::Full` - The buffer already holds [`NUM_SAMPLES`] words.
    pub fn push(&mut self, word: Word) -> Result<(), WaveformError> {
        self.push_raw(word.to_bits())
    }

    /// Appends a word as read, reserved bit included.
    fn push_raw(&mut self, bits: u16) -> Result<(), WaveformError> {
        self.words.push(bits).map_err(|_| WaveformError::Full {
            capacity: NUM_SAMPLES,
        })
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of words that still fit.
    pub fn remaining(&self) -> usize {
        NUM_SAMPLES - self.words.len()
    }

    /// Size of the stored words in bytes.
    pub fn byte_len(&self) -> usize {
        self.words.len() * BYTES_PER_SAMPLE
    }

    /// Raw words as read or written, including the reserved bit.
    pub fn as_raw(&self) -> &[u16] {
        &self.words
    }

    pub fn words(&self) -> impl Iterator<Item = Word> + '_ {
        self.words.iter().map(|&bits| Word::from_bits(bits))
    }

    /// Serializes the words, lower byte first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        for word in &self.words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }
}

/// One word, lower byte first.
fn parse_word(input: &mut &[u8]) -> ModalResult<u16> {
    le_u16.parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::Waveform;
    use crate::error::WaveformError;
    use crate::marker::{Word, ZERO_LEVEL};
    use crate::{FILE_SIZE, NUM_SAMPLES};
    use arbitrary_int::u14;

    #[test]
    fn little_endian() {
        let mut bytes = vec![0u8; FILE_SIZE];
        bytes[0] = 0xFF; // low byte first
        bytes[1] = 0x9F;
        bytes[FILE_SIZE - 2] = 0x01;
        bytes[FILE_SIZE - 1] = 0x80;

        let waveform = Waveform::from_bytes(&bytes).unwrap();
        assert_eq!(waveform.len(), NUM_SAMPLES);
        assert_eq!(waveform.as_raw()[0], 0x9FFF);
        assert_eq!(waveform.as_raw()[NUM_SAMPLES - 1], 0x8001);
        assert_eq!(waveform.to_bytes(), bytes);
    }

    #[test]
    fn reserved_bit_survives_reading() {
        let bytes = 0xFFFFu16.to_le_bytes().repeat(NUM_SAMPLES);
        let waveform = Waveform::from_bytes(&bytes).unwrap();
        assert_eq!(waveform.remaining(), 0);
        assert!(waveform.as_raw().iter().all(|&w| w == 0xFFFF));
        assert_eq!(waveform.to_bytes(), bytes);
    }

    #[test]
    fn size_mismatch() {
        for len in [0, 2, FILE_SIZE - 1, FILE_SIZE - 2, FILE_SIZE + 2] {
            let bytes = vec![0u8; len];
            assert_eq!(
                Waveform::from_bytes(&bytes),
                Err(WaveformError::SizeMismatch {
                    expected: FILE_SIZE,
                    actual: len
                })
            );
        }
    }

    #[test]
    fn push_until_full() {
        let mut waveform = Waveform::new();
        assert!(waveform.is_empty());
        for _ in 0..NUM_SAMPLES {
            waveform.push(Word::point(ZERO_LEVEL)).unwrap();
        }
        assert_eq!(waveform.remaining(), 0);
        assert_eq!(waveform.byte_len(), FILE_SIZE);
        assert_eq!(
            waveform.push(Word::plain(u14::new(1))),
            Err(WaveformError::Full {
                capacity: NUM_SAMPLES
            })
        );
    }

    #[test]
    fn words_split_marker() {
        let mut waveform = Waveform::new();
        waveform.push(Word::point(u14::new(5))).unwrap();
        waveform.push(Word::plain(u14::new(6))).unwrap();
        let words: Vec<Word> = waveform.words().collect();
        assert_eq!(words, [Word::point(u14::new(5)), Word::plain(u14::new(6))]);
        assert_eq!(waveform.to_bytes(), [0x05, 0x80, 0x06, 0x00]);
    }
}
