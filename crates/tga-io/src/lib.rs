//! # tga-io
//!
//! Reading and writing of TGA images.
//!
//! Supports grayscale (8-bit), true color (24-bit) and true color with alpha
//! (32-bit) images, uncompressed or run-length encoded. Decoded images are
//! materialized as a [`tga_core::PixelBuffer`] in top-left origin order.
//!
//! # Architecture
//!
//! - [`FormatReader`] / [`FormatWriter`] - Traits implemented by the format
//! - [`tga::TgaReader`] / [`tga::TgaWriter`] - TGA implementation with options
//! - [`tga::header`] - The 18-byte header and data type codes
//! - [`tga::rle`] - Run-length packet codec
//! - [`read`] / [`write`] - High-level functions with default options
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tga_io::{read, write};
//!
//! let image = read("input.tga")?;
//! write("output.tga", &image)?;
//! ```
//!
//! # In Memory
//!
//! ```rust
//! use tga_core::{Color, PixelBuffer, PixelFormat};
//!
//! let mut image = PixelBuffer::new(2, 1, PixelFormat::Rgb)?;
//! image.set_pixel(0, 0, Color::rgb(255, 0, 0));
//! image.set_pixel(1, 0, Color::rgb(255, 0, 0));
//!
//! let bytes = tga_io::write_to_memory(&image)?;
//! assert_eq!(&bytes[18..], &[129, 0x00, 0x00, 0xFF]);
//!
//! let loaded = tga_io::read_from_memory(&bytes)?;
//! assert_eq!(loaded, image);
//! # Ok::<(), tga_io::IoError>(())
//! ```
//!
//! # Logging
//!
//! Decode and encode parameters are emitted as `tracing` debug events. The
//! crate never installs a subscriber.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod traits;
pub mod tga;

pub use error::{IoError, IoResult};
pub use traits::{FormatReader, FormatWriter};

use std::path::Path;
use tga::{TgaReader, TgaWriter};
use tga_core::PixelBuffer;

/// Reads a TGA file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened ([`IoError::Io`])
/// - The header declares non-positive dimensions ([`IoError::InvalidDimensions`])
/// - The pixel depth or data type is not supported ([`IoError::UnsupportedFormat`])
/// - The pixel data is truncated or overruns the image ([`IoError::CorruptStream`])
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    TgaReader::new().read(path)
}

/// Writes a TGA file, run-length encoded.
///
/// Use [`tga::TgaWriter`] for uncompressed output or a footer.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written, or if a
/// dimension exceeds 32767.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    TgaWriter::new().write(path, image)
}

/// Decodes a TGA image held in memory.
pub fn read_from_memory(data: &[u8]) -> IoResult<PixelBuffer> {
    TgaReader::new().read_from_memory(data)
}

/// Encodes an image to TGA bytes, run-length encoded.
pub fn write_to_memory(image: &PixelBuffer) -> IoResult<Vec<u8>> {
    TgaWriter::new().write_to_memory(image)
}
