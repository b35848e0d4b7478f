//! Point marker bit and 14-bit magnitude of a waveform word.
//!
//! ```text
//! bit  15    14        13 .. 0
//!     POINT  reserved  magnitude
//! ```

use arbitrary_int::u14;

/// Point marker bit. The AWG expects it on every data sample.
pub const POINT_MASK: u16 = 0x8000; // 1000 0000 0000 0000
/// Unused bit. Always written as 0, ignored when read.
pub const RESERVED_MASK: u16 = 0x4000; // 0100 0000 0000 0000
/// DAC bits.
pub const MAGNITUDE_MASK: u16 = 0x3FFF; // 0011 1111 1111 1111

/// Largest magnitude (16383).
pub const MAGNITUDE_MAX: u14 = u14::new(MAGNITUDE_MASK);
/// Magnitude of 0 V, the midpoint of the DAC range (16383 / 2 = 8191).
pub const ZERO_LEVEL: u14 = u14::new(MAGNITUDE_MASK / 2);

/// One sample word split into its marker and magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    magnitude: u14,
    point: bool,
}

impl Word {
    pub const fn new(magnitude: u14, point: bool) -> Self {
        Word { magnitude, point }
    }

    /// Word with the point marker set.
    pub const fn point(magnitude: u14) -> Self {
        Word::new(magnitude, true)
    }

    /// Word without the point marker.
    pub const fn plain(magnitude: u14) -> Self {
        Word::new(magnitude, false)
    }

    /// Splits a raw word. Bit 14 is dropped.
    pub const fn from_bits(bits: u16) -> Self {
        Word {
            magnitude: u14::new(bits & MAGNITUDE_MASK),
            point: bits & POINT_MASK != 0,
        }
    }

    /// Raw word with bit 14 cleared.
    pub const fn to_bits(self) -> u16 {
        let bits = self.magnitude.value();
        if self.point {
            bits | POINT_MASK
        } else {
            bits
        }
    }

    pub const fn magnitude(self) -> u14 {
        self.magnitude
    }

    pub const fn is_point(self) -> bool {
        self.point
    }
}

/// Returns true if the unused bit 14 is set in a raw word.
pub const fn has_reserved_bit(bits: u16) -> bool {
    bits & RESERVED_MASK != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants() {
        assert_eq!(MAGNITUDE_MAX.value(), 16383);
        assert_eq!(ZERO_LEVEL.value(), 8191);
    }

    #[test]
    fn marked_words_keep_low_14_bits() {
        for bits in POINT_MASK..=u16::MAX {
            let word = Word::from_bits(bits);
            assert!(word.is_point());
            assert_eq!(word.magnitude().value(), bits & MAGNITUDE_MASK);
        }
    }

    #[test]
    fn unmarked_words() {
        let word = Word::from_bits(0x1234);
        assert!(!word.is_point());
        assert_eq!(word.magnitude().value(), 0x1234);
        assert_eq!(word.to_bits(), 0x1234);
    }

    #[test]
    fn reserved_bit_is_dropped() {
        let bits = 0xC001; // point, reserved, magnitude 1
        assert!(has_reserved_bit(bits));
        let word = Word::from_bits(bits);
        assert_eq!(word, Word::point(u14::new(1)));
        assert_eq!(word.to_bits(), 0x8001);
        assert!(!has_reserved_bit(word.to_bits()));
    }

    #[test]
    fn encode_sets_marker() {
        assert_eq!(Word::point(ZERO_LEVEL).to_bits(), 0x9FFF);
        assert_eq!(Word::plain(ZERO_LEVEL).to_bits(), 0x1FFF);
        assert_eq!(Word::point(MAGNITUDE_MAX).to_bits(), 0xBFFF);
    }
}
