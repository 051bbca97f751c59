//! Unified error type for palette extraction.

use std::fmt;

/// Reasons a palette could not be extracted from a pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum SwatchError {
    /// Image has zero width or height
    EmptyImage,
    /// Buffer length does not match `width * height * 4`
    DimensionMismatch {
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        actual: usize,
    },
    /// Every sampled pixel was transparent or near-white
    NoOpaquePixels,
    /// A builder option is out of range
    InvalidOption(&'static str),
}

impl fmt::Display for SwatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwatchError::EmptyImage => write!(f, "image has no pixels"),
            SwatchError::DimensionMismatch { expected, actual } => write!(
                f,
                "pixel buffer has {} bytes, expected {}",
                actual, expected
            ),
            SwatchError::NoOpaquePixels => {
                write!(f, "no usable pixels after filtering")
            }
            SwatchError::InvalidOption(name) => write!(f, "invalid option: {}", name),
        }
    }
}

impl std::error::Error for SwatchError {}
