//! Error types for I/O operations.
//!
//! Every failure aborts the current read or write; nothing is retried.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// The underlying file or stream could not be opened, read or written.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Bits per pixel or data type code is not supported.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Width or height is out of range for the format.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width as found in (or destined for) the header.
        width: i64,
        /// Height as found in (or destined for) the header.
        height: i64,
    },

    /// Pixel data is malformed or ends early.
    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    /// Error from the pixel buffer layer.
    #[error(transparent)]
    Core(#[from] tga_core::Error),
}

impl IoError {
    /// Converts a read error, reporting a premature end of input as
    /// [`IoError::CorruptStream`].
    pub(crate) fn from_read(err: io::Error, what: &str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            IoError::CorruptStream(format!("unexpected end of stream while reading {}", what))
        } else {
            IoError::Io(err)
        }
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
