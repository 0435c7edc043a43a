//! Error types for tga-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of in-memory pixel handling:
//! - Pixel reads outside the buffer
//! - Out-of-range color channel indices
//! - Invalid buffer dimensions or data lengths
//! - Bytes-per-pixel values with no matching [`PixelFormat`](crate::PixelFormat)
//!
//! Stream and file errors live in `tga-io`, which wraps this type.
//!
//! # Usage
//!
//! ```rust
//! use tga_core::{Error, Result};
//!
//! fn check(x: i32, y: i32, width: u32, height: u32) -> Result<()> {
//!     if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
//!         return Err(Error::out_of_range(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(-1, 0, 4, 4).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during pixel buffer operations.
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfRange`](Error::OutOfRange), [`ChannelOutOfRange`](Error::ChannelOutOfRange)
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions)
/// - **Format errors**: [`UnsupportedFormat`](Error::UnsupportedFormat)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Pixel coordinates are outside the buffer.
    ///
    /// Returned by [`PixelBuffer::get_pixel`](crate::PixelBuffer::get_pixel) when
    /// `x` is not in `[0, width)` or `y` is not in `[0, height)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tga_core::Error;
    ///
    /// let err = Error::out_of_range(-1, 5, 8, 8);
    /// assert!(err.to_string().contains("-1"));
    /// ```
    #[error("pixel ({x}, {y}) out of range for buffer {width}x{height}")]
    OutOfRange {
        /// X coordinate that was requested
        x: i32,
        /// Y coordinate that was requested
        y: i32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Color channel index is not in `0..4`.
    #[error("channel index {index} out of range (expected 0..4)")]
    ChannelOutOfRange {
        /// Requested channel index
        index: usize,
    },

    /// Invalid buffer dimensions.
    ///
    /// Returned when width or height is zero, or when supplied pixel data
    /// does not match `width * height * bytes_per_pixel`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// No pixel format exists for the given layout.
    #[error("unsupported pixel format: {format}")]
    UnsupportedFormat {
        /// Format description
        format: String,
    },
}

impl Error {
    /// Creates an [`Error::OutOfRange`] error.
    #[inline]
    pub fn out_of_range(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self::OutOfRange {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::ChannelOutOfRange`] error.
    #[inline]
    pub fn channel_out_of_range(index: usize) -> Self {
        Self::ChannelOutOfRange { index }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::ChannelOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range() {
        let err = Error::out_of_range(100, -3, 80, 60);
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("-3"));
        assert!(msg.contains("80x60"));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_channel_out_of_range() {
        let err = Error::channel_out_of_range(4);
        assert!(err.to_string().contains('4'));
        assert!(err.is_bounds_error());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = Error::invalid_dimensions(0, 10, "width must be positive");
        assert!(err.to_string().contains("0x10"));
        assert!(!err.is_bounds_error());
    }
}
