//! I/O traits for image readers and writers.
//!
//! These traits define the interface a format implementation exposes. The
//! type parameter `O` is the format's options struct.

use crate::IoResult;
use std::io::{Read, Write};
use std::path::Path;
use tga_core::PixelBuffer;

/// Trait for image format readers.
pub trait FormatReader<O>: Sized {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// File extensions associated with the format (lowercase, no dot).
    fn extensions(&self) -> &'static [&'static str];

    /// Returns `true` if `header` looks like the start of a readable file.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads an image from a byte stream.
    fn read_from<R: Read>(&self, reader: &mut R) -> IoResult<PixelBuffer>;

    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PixelBuffer>;

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer>;

    /// Creates a reader with the given options.
    fn with_options(options: O) -> Self;
}

/// Trait for image format writers.
pub trait FormatWriter<O>: Sized {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// File extensions associated with the format (lowercase, no dot).
    fn extensions(&self) -> &'static [&'static str];

    /// Writes an image to a byte stream.
    fn write_to<W: Write>(&self, writer: &mut W, image: &PixelBuffer) -> IoResult<()>;

    /// Writes an image to a file path.
    ///
    /// A partially written file is left in place if encoding fails.
    fn write<P: AsRef<Path>>(&self, path: P, image: &PixelBuffer) -> IoResult<()>;

    /// Writes an image to memory.
    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>>;

    /// Creates a writer with the given options.
    fn with_options(options: O) -> Self;
}
