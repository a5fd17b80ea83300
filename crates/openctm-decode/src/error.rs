//! Error types for restoration passes.

use std::fmt;

/// Errors that can occur while restoring decoded mesh data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Two related input slices disagree about the element count.
    LengthMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A triangle or grid cell index points outside the array it refers to.
    IndexOutOfBounds { index: usize, len: usize },
    /// Invalid data shape or grid parameters.
    InvalidFormat {
        context: &'static str,
        detail: String,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "length mismatch in {context}: expected {expected} elements, got {actual}"
                )
            }
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            Self::InvalidFormat { context, detail } => {
                write!(f, "invalid format in {context}: {detail}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Result type for restoration passes.
pub type DecodeResult<T> = Result<T, DecodeError>;
