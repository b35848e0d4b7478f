//! Linear mapping between two numeric ranges.
//!
//! The mapping is not clamped. A value outside the source range is still mapped with the same
//! linear formula, the returned [`Mapping`] just carries the bound it violated.

use crate::error::RangeError;
use num_traits::Float;

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: Float> Range<T> {
    pub const fn new(min: T, max: T) -> Self {
        Range { min, max }
    }

    /// `max - min`
    pub fn span(&self) -> T {
        self.max - self.min
    }

    /// Returns the bound `x` lies beyond, if any.
    pub fn check(&self, x: T) -> Option<RangeViolation<T>> {
        if x > self.max {
            Some(RangeViolation::AboveMax {
                value: x,
                max: self.max,
            })
        } else if x < self.min {
            Some(RangeViolation::BelowMin {
                value: x,
                min: self.min,
            })
        } else {
            None
        }
    }
}

/// A source range bound that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RangeViolation<T> {
    #[error("value out of range ({value} > {max})")]
    AboveMax { value: T, max: T },
    #[error("value out of range ({value} < {min})")]
    BelowMin { value: T, min: T },
}

/// Result of [`RangeMapper::map`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapping<T> {
    /// Mapped value, possibly outside the destination range.
    pub value: T,
    /// Set when the input was outside the source range.
    pub violation: Option<RangeViolation<T>>,
}

/// Maps values from one range onto another.
///
/// # Examples
///
/// ```
/// use csv2arb::range::{Range, RangeMapper};
///
/// # fn main() -> anyhow::Result<()> {
/// let mapper = RangeMapper::new(Range::new(-1.0f32, 1.0), Range::new(0.0, 16383.0))?;
/// assert_eq!(mapper.map(1.0).value, 16383.0);
/// assert!(mapper.map(1.5).violation.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeMapper<T> {
    input: Range<T>,
    output: Range<T>,
}

impl<T: Float> RangeMapper<T> {
    /// * 'input' - Source range. Must not have zero width.
    /// * 'output' - Destination range. May be reversed or have zero width.
    pub fn new(input: Range<T>, output: Range<T>) -> Result<Self, RangeError> {
        if input.span() == T::zero() {
            return Err(RangeError::ZeroWidth(input.min.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(RangeMapper { input, output })
    }

    pub fn input(&self) -> Range<T> {
        self.input
    }

    pub fn output(&self) -> Range<T> {
        self.output
    }

    /// `out_min + (x - in_min) * (out_max - out_min) / (in_max - in_min)`
    pub fn map(&self, x: T) -> Mapping<T> {
        let violation = self.input.check(x);
        let value =
            self.output.min + (x - self.input.min) * self.output.span() / self.input.span();
        Mapping { value, violation }
    }
}

#[cfg(test)]
mod tests {
    use super::{Range, RangeMapper, RangeViolation};
    use crate::error::RangeError;

    fn dac() -> RangeMapper<f32> {
        RangeMapper::new(Range::new(-1.0, 1.0), Range::new(0.0, 16383.0)).unwrap()
    }

    #[test]
    fn endpoints_are_exact() {
        let m = dac();
        assert_eq!(m.map(-1.0).value, 0.0);
        assert_eq!(m.map(1.0).value, 16383.0);

        let m = RangeMapper::new(Range::new(0.0f32, 16383.0), Range::new(-1.0, 1.0)).unwrap();
        assert_eq!(m.map(0.0).value, -1.0);
        assert_eq!(m.map(16383.0).value, 1.0);
    }

    #[test]
    fn monotonic() {
        let m = dac();
        let mut last = f32::NEG_INFINITY;
        for i in -1000..=1000 {
            let v = m.map(i as f32 / 1000.0).value;
            assert!(v >= last, "{v} < {last}");
            last = v;
        }
    }

    #[test]
    fn out_of_range_is_mapped_and_reported() {
        let m = dac();
        let above = m.map(1.5);
        assert_eq!(above.value, 20478.75);
        assert_eq!(
            above.violation,
            Some(RangeViolation::AboveMax {
                value: 1.5,
                max: 1.0
            })
        );

        let below = m.map(-2.0);
        assert_eq!(below.value, -8191.5);
        assert_eq!(
            below.violation,
            Some(RangeViolation::BelowMin {
                value: -2.0,
                min: -1.0
            })
        );

        assert_eq!(m.map(0.25).violation, None);
    }

    #[test]
    fn zero_width_source_is_rejected() {
        let r = RangeMapper::new(Range::new(3.0f64, 3.0), Range::new(0.0, 1.0));
        assert_eq!(r, Err(RangeError::ZeroWidth(3.0)));
    }
}
