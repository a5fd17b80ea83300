//! Error types for file decoding.

use std::fmt;

use openctm_decode::DecodeError;

/// Result type for file decoding.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a file.
///
/// All errors are fatal: decoding aborts at the first problem and never
/// returns a partially populated mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The stream cursor ran past the end of the input buffer.
    OutOfData { context: &'static str },
    /// Unknown compression method tag or file format version.
    UnsupportedFormat { context: &'static str, value: u32 },
    /// Header fields describe geometry that cannot exist.
    MalformedGeometry {
        context: &'static str,
        detail: String,
    },
    /// An embedded compressed payload could not be decompressed.
    Compression {
        context: &'static str,
        message: String,
    },
    /// A numeric restoration pass rejected its input.
    Decode(DecodeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfData { context } => {
                write!(f, "unexpected end of data while reading {context}")
            }
            Self::UnsupportedFormat { context, value } => {
                write!(f, "unsupported {context} {value:#010x}")
            }
            Self::MalformedGeometry { context, detail } => {
                write!(f, "malformed {context}: {detail}")
            }
            Self::Compression { context, message } => {
                write!(f, "failed to decompress {context}: {message}")
            }
            Self::Decode(e) => write!(f, "restore error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Self::Decode(e)
    }
}
