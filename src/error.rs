/// Error type for the range mapper.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RangeError {
    #[error("The source range has zero width (min == max == {0}).")]
    ZeroWidth(f64),
}

/// Error type for the fixed-size waveform buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WaveformError {
    #[error("Waveform file must be exactly {expected} bytes, got {actual} bytes.")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Waveform buffer is full ({capacity} samples).")]
    Full { capacity: usize },
}

/// Error type for binary to text conversion.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Waveform(#[from] WaveformError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Error type for text to binary conversion.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum EncodeError {
    #[error("Line {line}: more than {capacity} samples do not fit into one waveform file.")]
    TooManySamples { line: usize, capacity: usize },
    #[error(
        "Only {remaining_bytes} bytes left to pad, at least 4 are needed for the first and last point markers."
    )]
    PaddingUnderflow { remaining_bytes: usize },
    #[error(transparent)]
    Waveform(#[from] WaveformError),
    #[error(transparent)]
    Range(#[from] RangeError),
}
