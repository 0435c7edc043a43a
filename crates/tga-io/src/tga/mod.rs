//! TGA (Truevision Graphics Adapter) format support.
//!
//! Reads and writes uncompressed and run-length encoded grayscale, 24-bit and
//! 32-bit images. Color-mapped images are rejected.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tga_io::tga;
//!
//! let image = tga::read("input.tga")?;
//! tga::write("output.tga", &image)?;
//! ```
//!
//! # With Options
//!
//! ```rust,ignore
//! use tga_io::tga::{TgaWriter, TgaWriterOptions};
//! use tga_io::FormatWriter;
//!
//! let writer = TgaWriter::with_options(TgaWriterOptions {
//!     rle: false,
//!     footer: true,
//! });
//! writer.write("output.tga", &image)?;
//! ```
//!
//! # Orientation
//!
//! Decoded buffers are normalized to top-left origin: files stored
//! bottom-up are flipped vertically and files stored right-to-left are
//! mirrored. Files written here always declare top-left origin, so they
//! read back without a flip.

pub mod header;
pub mod rle;

pub use header::{DataTypeCode, TgaHeader};

use crate::{FormatReader, FormatWriter, IoError, IoResult};
use header::{write_footer, DESCRIPTOR_ALPHA_MASK, HEADER_SIZE};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tga_core::PixelBuffer;
use tracing::{debug, warn};

// === Reader Options ===

/// Options for reading TGA files.
#[derive(Debug, Clone)]
pub struct TgaReaderOptions {
    /// Flip bottom-up and right-to-left images into top-left order.
    /// Default: `true`.
    pub normalize_origin: bool,
}

impl Default for TgaReaderOptions {
    fn default() -> Self {
        Self {
            normalize_origin: true,
        }
    }
}

// === Writer Options ===

/// Options for writing TGA files.
///
/// # Example
///
/// ```rust
/// use tga_io::tga::TgaWriterOptions;
///
/// let options = TgaWriterOptions {
///     rle: false,
///     ..Default::default()
/// };
/// assert!(!options.footer);
/// ```
#[derive(Debug, Clone)]
pub struct TgaWriterOptions {
    /// Run-length encode the pixel data. Default: `true`.
    pub rle: bool,
    /// Append the TGA 2.0 footer after the pixel data. Default: `false`.
    pub footer: bool,
}

impl Default for TgaWriterOptions {
    fn default() -> Self {
        Self {
            rle: true,
            footer: false,
        }
    }
}

// === TgaReader ===

/// TGA format reader.
///
/// # Example
///
/// ```rust,ignore
/// use tga_io::tga::TgaReader;
/// use tga_io::FormatReader;
///
/// let reader = TgaReader::new();
/// let image = reader.read("input.tga")?;
/// println!("{}x{} {}", image.width(), image.height(), image.format());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TgaReader {
    options: TgaReaderOptions,
}

impl TgaReader {
    /// Creates a new TGA reader with default options.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatReader<TgaReaderOptions> for TgaReader {
    fn format_name(&self) -> &'static str {
        "TGA"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["tga", "targa", "icb", "vda", "vst"]
    }

    fn can_read(&self, header: &[u8]) -> bool {
        if header.len() < HEADER_SIZE {
            return false;
        }
        match TgaHeader::parse(header) {
            Ok(h) => h.color_map_type <= 1 && h.validate().is_ok(),
            Err(_) => false,
        }
    }

    fn read_from<R: Read>(&self, reader: &mut R) -> IoResult<PixelBuffer> {
        let header = TgaHeader::read(reader)?;
        let (format, data_type) = header.validate()?;

        debug!(
            width = header.width,
            height = header.height,
            %format,
            ?data_type,
            top_origin = header.is_top_origin(),
            right_to_left = header.is_right_to_left(),
            alpha_bits = header.image_descriptor & DESCRIPTOR_ALPHA_MASK,
            "decoding TGA"
        );

        skip(reader, header.id_length as u64, "image ID")?;
        let color_map = header.color_map_size();
        if color_map > 0 {
            warn!(
                bytes = color_map,
                "skipping color map attached to {:?} image", data_type
            );
            skip(reader, color_map as u64, "color map")?;
        }

        let (width, height) = (header.width as u32, header.height as u32);
        let bpp = format.bytes_per_pixel();
        // At most 32767 * 32767 * 4 bytes, which fits even a 32-bit usize.
        let pixel_count = width as usize * height as usize;

        let data = if data_type.is_rle() {
            rle::decode(reader, pixel_count, bpp)?
        } else {
            read_raw(reader, pixel_count * bpp)?
        };
        let mut image = PixelBuffer::from_data(width, height, format, data)?;

        if self.options.normalize_origin {
            if !header.is_top_origin() {
                image.flip_vertical();
            }
            if header.is_right_to_left() {
                image.flip_horizontal();
            }
        }

        Ok(image)
    }

    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<PixelBuffer> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        self.read_from(&mut reader)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<PixelBuffer> {
        let mut slice = data;
        self.read_from(&mut slice)
    }

    fn with_options(options: TgaReaderOptions) -> Self {
        Self { options }
    }
}

/// Reads exactly `len` bytes of uncompressed pixel data.
///
/// The buffer grows with the input rather than being sized from the header.
fn read_raw<R: Read>(reader: &mut R, len: usize) -> IoResult<Vec<u8>> {
    let mut data = Vec::with_capacity(len.min(rle::INITIAL_CAPACITY));
    let copied = reader.by_ref().take(len as u64).read_to_end(&mut data)?;
    if copied < len {
        return Err(IoError::CorruptStream(format!(
            "unexpected end of stream while reading pixel data ({} of {} bytes)",
            copied, len
        )));
    }
    Ok(data)
}

/// Discards exactly `len` bytes from `reader`.
fn skip<R: Read>(reader: &mut R, len: u64, what: &str) -> IoResult<()> {
    if len == 0 {
        return Ok(());
    }
    let copied = io::copy(&mut reader.by_ref().take(len), &mut io::sink())?;
    if copied < len {
        return Err(IoError::CorruptStream(format!(
            "unexpected end of stream while skipping {}",
            what
        )));
    }
    Ok(())
}

// === TgaWriter ===

/// TGA format writer.
///
/// # Example
///
/// ```rust,ignore
/// use tga_io::tga::TgaWriter;
/// use tga_io::FormatWriter;
///
/// // RLE output (default)
/// TgaWriter::new().write("packed.tga", &image)?;
///
/// // Uncompressed output
/// TgaWriter::new().with_rle(false).write("raw.tga", &image)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TgaWriter {
    options: TgaWriterOptions,
}

impl TgaWriter {
    /// Creates a new TGA writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables run-length encoding.
    pub fn with_rle(mut self, rle: bool) -> Self {
        self.options.rle = rle;
        self
    }

    /// Enables or disables the TGA 2.0 footer.
    pub fn with_footer(mut self, footer: bool) -> Self {
        self.options.footer = footer;
        self
    }

    /// Returns the current options.
    pub fn options(&self) -> &TgaWriterOptions {
        &self.options
    }
}

impl FormatWriter<TgaWriterOptions> for TgaWriter {
    fn format_name(&self) -> &'static str {
        "TGA"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["tga"]
    }

    fn write_to<W: Write>(&self, writer: &mut W, image: &PixelBuffer) -> IoResult<()> {
        let header = TgaHeader::for_buffer(image, self.options.rle)?;

        debug!(
            width = image.width(),
            height = image.height(),
            format = %image.format(),
            rle = self.options.rle,
            footer = self.options.footer,
            "encoding TGA"
        );

        header.write(writer)?;
        if self.options.rle {
            rle::encode(
                writer,
                image.data(),
                image.width() as usize,
                image.bytes_per_pixel(),
            )?;
        } else {
            writer.write_all(image.data())?;
        }

        if self.options.footer {
            write_footer(writer)?;
        }
        Ok(())
    }

    fn write<P: AsRef<Path>>(&self, path: P, image: &PixelBuffer) -> IoResult<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, image)?;
        writer.flush()?;
        Ok(())
    }

    fn write_to_memory(&self, image: &PixelBuffer) -> IoResult<Vec<u8>> {
        let mut out = Vec::with_capacity(HEADER_SIZE + image.data().len());
        self.write_to(&mut out, image)?;
        Ok(out)
    }

    fn with_options(options: TgaWriterOptions) -> Self {
        Self { options }
    }
}

// === Convenience Functions ===

/// Reads a TGA file with default options.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    TgaReader::new().read(path)
}

/// Writes a TGA file with default options (RLE, no footer).
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    TgaWriter::new().write(path, image)
}

/// Writes a TGA file, choosing whether to run-length encode.
pub fn write_with_rle<P: AsRef<Path>>(path: P, image: &PixelBuffer, rle: bool) -> IoResult<()> {
    TgaWriter::new().with_rle(rle).write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tga_core::{Color, PixelFormat};

    fn sample(width: u32, height: u32, format: PixelFormat) -> PixelBuffer {
        let len = (width * height) as usize * format.bytes_per_pixel();
        let data = (0..len).map(|i| ((i / 7) % 5 * 40) as u8).collect();
        PixelBuffer::from_data(width, height, format, data).unwrap()
    }

    fn header_bytes(width: i16, height: i16, bpp: u8, code: u8, descriptor: u8) -> Vec<u8> {
        let header = TgaHeader {
            data_type_code: code,
            width,
            height,
            bits_per_pixel: bpp,
            image_descriptor: descriptor,
            ..TgaHeader::default()
        };
        let mut out = Vec::new();
        header.write(&mut out).unwrap();
        out
    }

    #[test]
    fn grayscale_1x1_uncompressed_bytes() {
        let mut image = PixelBuffer::new(1, 1, PixelFormat::Grayscale).unwrap();
        image.set_pixel(0, 0, Color::gray(128));

        let bytes = TgaWriter::new()
            .with_rle(false)
            .write_to_memory(&image)
            .unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE + 1);
        assert_eq!(bytes[2], 3);
        assert_eq!(bytes[16], 8);
        assert_eq!(bytes[17], 0x20);
        assert_eq!(bytes[18], 0x80);
    }

    #[test]
    fn rgb_2x1_rle_bytes() {
        let mut image = PixelBuffer::new(2, 1, PixelFormat::Rgb).unwrap();
        image.set_pixel(0, 0, Color::rgb(255, 0, 0));
        image.set_pixel(1, 0, Color::rgb(255, 0, 0));

        let bytes = TgaWriter::new().write_to_memory(&image).unwrap();
        assert_eq!(bytes[2], 10);
        assert_eq!(&bytes[HEADER_SIZE..], &[129, 0x00, 0x00, 0xFF]);
    }

    #[test]
    fn roundtrip_all_formats() {
        for format in [PixelFormat::Grayscale, PixelFormat::Rgb, PixelFormat::Rgba] {
            for rle in [false, true] {
                let image = sample(13, 7, format);
                let bytes = TgaWriter::new()
                    .with_rle(rle)
                    .write_to_memory(&image)
                    .unwrap();
                let loaded = TgaReader::new().read_from_memory(&bytes).unwrap();
                assert_eq!(loaded, image, "{} rle={}", format, rle);
            }
        }
    }

    #[test]
    fn footer_is_ignored_on_read() {
        let image = sample(4, 4, PixelFormat::Rgba);
        let writer = TgaWriter::with_options(TgaWriterOptions {
            rle: true,
            footer: true,
        });
        let bytes = writer.write_to_memory(&image).unwrap();
        assert!(bytes.ends_with(header::FOOTER_SIGNATURE));
        assert_eq!(TgaReader::new().read_from_memory(&bytes).unwrap(), image);
    }

    #[test]
    fn bottom_up_file_is_flipped() {
        let mut bytes = header_bytes(1, 3, 8, 3, 0x00);
        bytes.extend_from_slice(&[1, 2, 3]);
        let image = TgaReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(image.data(), &[3, 2, 1]);

        let raw = TgaReader::with_options(TgaReaderOptions {
            normalize_origin: false,
        })
        .read_from_memory(&bytes)
        .unwrap();
        assert_eq!(raw.data(), &[1, 2, 3]);
    }

    #[test]
    fn right_to_left_file_is_mirrored() {
        let mut bytes = header_bytes(3, 1, 8, 3, 0x30);
        bytes.extend_from_slice(&[1, 2, 3]);
        let image = TgaReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(image.data(), &[3, 2, 1]);
    }

    #[test]
    fn id_field_and_color_map_are_skipped() {
        let mut bytes = header_bytes(2, 1, 24, 2, 0x20);
        bytes[0] = 3; // id_length
        bytes[1] = 1; // color_map_type
        bytes[5] = 2; // color_map_length
        bytes[7] = 24; // color_map_depth
        bytes.extend_from_slice(b"abc");
        bytes.extend_from_slice(&[0xEE; 6]);
        bytes.extend_from_slice(&[1, 2, 3, 4, 5, 6]);

        let image = TgaReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(image.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn rejects_unsupported_types() {
        for code in [0u8, 1, 9] {
            let mut bytes = header_bytes(1, 1, 8, code, 0x20);
            bytes.push(0);
            assert!(matches!(
                TgaReader::new().read_from_memory(&bytes),
                Err(IoError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn rejects_bad_dimensions() {
        for (w, h) in [(0, 1), (1, -1), (-5, -5)] {
            let bytes = header_bytes(w, h, 24, 2, 0x20);
            assert!(matches!(
                TgaReader::new().read_from_memory(&bytes),
                Err(IoError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn truncated_pixels_are_corrupt() {
        let mut bytes = header_bytes(2, 2, 24, 2, 0x20);
        bytes.extend_from_slice(&[0; 5]);
        assert!(matches!(
            TgaReader::new().read_from_memory(&bytes),
            Err(IoError::CorruptStream(_))
        ));
    }

    #[test]
    fn oversized_header_with_short_body_is_corrupt() {
        for code in [2u8, 10] {
            let mut bytes = header_bytes(i16::MAX, i16::MAX, 32, code, 0x28);
            bytes.extend_from_slice(&[0x81, 1, 2, 3, 4]);
            assert!(matches!(
                TgaReader::new().read_from_memory(&bytes),
                Err(IoError::CorruptStream(_))
            ));
        }
    }

    #[test]
    fn can_read_heuristic() {
        let reader = TgaReader::new();
        assert!(reader.can_read(&header_bytes(4, 4, 32, 10, 0x28)));
        assert!(!reader.can_read(&header_bytes(4, 4, 32, 1, 0x28)));
        assert!(!reader.can_read(&header_bytes(4, 0, 32, 2, 0x28)));
        assert!(!reader.can_read(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.tga");
        let image = sample(9, 4, PixelFormat::Rgb);

        write(&path, &image).expect("TGA write failed");
        let loaded = read(&path).expect("TGA read failed");
        assert_eq!(loaded, image);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read(dir.path().join("missing.tga")),
            Err(IoError::Io(_))
        ));
    }
}
