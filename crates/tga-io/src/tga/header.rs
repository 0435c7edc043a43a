//! The 18-byte TGA file header.
//!
//! # Layout
//!
//! All multi-byte fields are little-endian.
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | id_length |
//! | 1 | 1 | color_map_type |
//! | 2 | 1 | data_type_code |
//! | 3 | 2 | color_map_origin |
//! | 5 | 2 | color_map_length |
//! | 7 | 1 | color_map_depth |
//! | 8 | 2 | origin_x |
//! | 10 | 2 | origin_y |
//! | 12 | 2 | width |
//! | 14 | 2 | height |
//! | 16 | 1 | bits_per_pixel |
//! | 17 | 1 | image_descriptor |

use crate::{IoError, IoResult};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};
use tga_core::{PixelBuffer, PixelFormat};

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 18;

/// Image descriptor bit: row 0 is the top of the image.
pub const DESCRIPTOR_TOP_ORIGIN: u8 = 0x20;
/// Image descriptor bit: pixels run right-to-left within a row.
pub const DESCRIPTOR_RIGHT_TO_LEFT: u8 = 0x10;
/// Image descriptor bits holding the alpha channel depth.
pub const DESCRIPTOR_ALPHA_MASK: u8 = 0x0F;

/// TGA 2.0 footer signature, including the trailing NUL.
pub const FOOTER_SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";

/// Image type tag stored at offset 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataTypeCode {
    /// No image data present.
    NoImageData = 0,
    /// Uncompressed, color-mapped.
    UncompressedColorMapped = 1,
    /// Uncompressed, true color.
    UncompressedTrueColor = 2,
    /// Uncompressed, grayscale.
    UncompressedGrayscale = 3,
    /// Run-length encoded, color-mapped.
    RleColorMapped = 9,
    /// Run-length encoded, true color.
    RleTrueColor = 10,
    /// Run-length encoded, grayscale.
    RleGrayscale = 11,
}

impl DataTypeCode {
    /// Looks up a tag by its on-disk value.
    pub fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NoImageData),
            1 => Some(Self::UncompressedColorMapped),
            2 => Some(Self::UncompressedTrueColor),
            3 => Some(Self::UncompressedGrayscale),
            9 => Some(Self::RleColorMapped),
            10 => Some(Self::RleTrueColor),
            11 => Some(Self::RleGrayscale),
            _ => None,
        }
    }

    /// Picks the tag for writing a buffer of `format`.
    pub fn for_format(format: PixelFormat, rle: bool) -> Self {
        match (format, rle) {
            (PixelFormat::Grayscale, true) => Self::RleGrayscale,
            (PixelFormat::Grayscale, false) => Self::UncompressedGrayscale,
            (_, true) => Self::RleTrueColor,
            (_, false) => Self::UncompressedTrueColor,
        }
    }

    /// Returns `true` for the run-length encoded variants.
    #[inline]
    pub fn is_rle(self) -> bool {
        matches!(
            self,
            Self::RleColorMapped | Self::RleTrueColor | Self::RleGrayscale
        )
    }

    /// Returns `true` for the variants this crate decodes.
    ///
    /// Color-mapped images and headers without image data are not supported.
    #[inline]
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            Self::UncompressedTrueColor
                | Self::UncompressedGrayscale
                | Self::RleTrueColor
                | Self::RleGrayscale
        )
    }
}

/// Parsed TGA header.
///
/// Only lives long enough to be written out or to drive a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TgaHeader {
    /// Length of the image ID field that follows the header.
    pub id_length: u8,
    /// 1 if a color map is present.
    pub color_map_type: u8,
    /// Raw [`DataTypeCode`] value.
    pub data_type_code: u8,
    /// First color map entry index.
    pub color_map_origin: i16,
    /// Number of color map entries.
    pub color_map_length: i16,
    /// Bits per color map entry.
    pub color_map_depth: u8,
    /// Horizontal screen origin.
    pub origin_x: i16,
    /// Vertical screen origin.
    pub origin_y: i16,
    /// Width in pixels.
    pub width: i16,
    /// Height in pixels.
    pub height: i16,
    /// Bits per pixel (8, 24 or 32 for supported images).
    pub bits_per_pixel: u8,
    /// Origin and alpha-depth bits.
    pub image_descriptor: u8,
}

impl TgaHeader {
    /// Builds the header for writing `image`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidDimensions`] if either dimension exceeds
    /// `i16::MAX`.
    pub fn for_buffer(image: &PixelBuffer, rle: bool) -> IoResult<Self> {
        let (width, height) = image.dimensions();
        let (Ok(w), Ok(h)) = (i16::try_from(width), i16::try_from(height)) else {
            return Err(IoError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        };

        let format = image.format();
        let alpha_bits = if format.has_alpha() { 8 } else { 0 };

        Ok(Self {
            data_type_code: DataTypeCode::for_format(format, rle) as u8,
            width: w,
            height: h,
            bits_per_pixel: format.bits_per_pixel(),
            image_descriptor: DESCRIPTOR_TOP_ORIGIN | alpha_bits,
            ..Self::default()
        })
    }

    /// Reads and parses the header from a stream.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::CorruptStream`] if fewer than 18 bytes are available.
    pub fn read<R: Read>(reader: &mut R) -> IoResult<Self> {
        Self::read_fields(reader).map_err(|e| IoError::from_read(e, "header"))
    }

    /// Parses a header from the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> IoResult<Self> {
        Self::read(&mut &bytes[..])
    }

    fn read_fields<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(Self {
            id_length: r.read_u8()?,
            color_map_type: r.read_u8()?,
            data_type_code: r.read_u8()?,
            color_map_origin: r.read_i16::<LittleEndian>()?,
            color_map_length: r.read_i16::<LittleEndian>()?,
            color_map_depth: r.read_u8()?,
            origin_x: r.read_i16::<LittleEndian>()?,
            origin_y: r.read_i16::<LittleEndian>()?,
            width: r.read_i16::<LittleEndian>()?,
            height: r.read_i16::<LittleEndian>()?,
            bits_per_pixel: r.read_u8()?,
            image_descriptor: r.read_u8()?,
        })
    }

    /// Writes the header in on-disk field order.
    pub fn write<W: Write>(&self, writer: &mut W) -> IoResult<()> {
        writer.write_u8(self.id_length)?;
        writer.write_u8(self.color_map_type)?;
        writer.write_u8(self.data_type_code)?;
        writer.write_i16::<LittleEndian>(self.color_map_origin)?;
        writer.write_i16::<LittleEndian>(self.color_map_length)?;
        writer.write_u8(self.color_map_depth)?;
        writer.write_i16::<LittleEndian>(self.origin_x)?;
        writer.write_i16::<LittleEndian>(self.origin_y)?;
        writer.write_i16::<LittleEndian>(self.width)?;
        writer.write_i16::<LittleEndian>(self.height)?;
        writer.write_u8(self.bits_per_pixel)?;
        writer.write_u8(self.image_descriptor)?;
        Ok(())
    }

    /// Returns the data type tag, if the code is a known one.
    #[inline]
    pub fn data_type(&self) -> Option<DataTypeCode> {
        DataTypeCode::from_u8(self.data_type_code)
    }

    /// Bytes per pixel derived from `bits_per_pixel`.
    #[inline]
    pub fn bytes_per_pixel(&self) -> u8 {
        self.bits_per_pixel >> 3
    }

    /// Returns `true` if row 0 on disk is the top row.
    #[inline]
    pub fn is_top_origin(&self) -> bool {
        self.image_descriptor & DESCRIPTOR_TOP_ORIGIN != 0
    }

    /// Returns `true` if pixels are stored right-to-left.
    #[inline]
    pub fn is_right_to_left(&self) -> bool {
        self.image_descriptor & DESCRIPTOR_RIGHT_TO_LEFT != 0
    }

    /// Number of bytes of color map data following the image ID field.
    pub fn color_map_size(&self) -> usize {
        if self.color_map_type == 0 {
            return 0;
        }
        let entries = self.color_map_length.max(0) as usize;
        entries * (self.color_map_depth as usize).div_ceil(8)
    }

    /// Checks dimensions, pixel format and data type, in that order.
    ///
    /// # Errors
    ///
    /// - [`IoError::InvalidDimensions`] if width or height is not positive
    /// - [`IoError::UnsupportedFormat`] if bits per pixel is not 8, 24 or 32
    /// - [`IoError::UnsupportedFormat`] if the data type is color-mapped,
    ///   empty or unknown
    pub fn validate(&self) -> IoResult<(PixelFormat, DataTypeCode)> {
        if self.width <= 0 || self.height <= 0 {
            return Err(IoError::InvalidDimensions {
                width: self.width as i64,
                height: self.height as i64,
            });
        }

        let format = PixelFormat::from_bytes_per_pixel(self.bytes_per_pixel()).ok_or_else(|| {
            IoError::UnsupportedFormat(format!("{} bits per pixel", self.bits_per_pixel))
        })?;

        let data_type = self
            .data_type()
            .filter(|t| t.is_supported())
            .ok_or_else(|| {
                IoError::UnsupportedFormat(format!("data type code {}", self.data_type_code))
            })?;

        Ok((format, data_type))
    }
}

/// Writes the TGA 2.0 footer: zero extension and developer area offsets
/// followed by [`FOOTER_SIGNATURE`].
pub fn write_footer<W: Write>(writer: &mut W) -> IoResult<()> {
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_u32::<LittleEndian>(0)?;
    writer.write_all(FOOTER_SIGNATURE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: i16, height: i16, bpp: u8, code: u8) -> TgaHeader {
        TgaHeader {
            data_type_code: code,
            width,
            height,
            bits_per_pixel: bpp,
            ..TgaHeader::default()
        }
    }

    #[test]
    fn write_field_order() {
        let h = TgaHeader {
            id_length: 1,
            color_map_type: 2,
            data_type_code: 3,
            color_map_origin: 0x0504,
            color_map_length: 0x0706,
            color_map_depth: 8,
            origin_x: 0x0A09,
            origin_y: 0x0C0B,
            width: 0x0E0D,
            height: 0x100F,
            bits_per_pixel: 17,
            image_descriptor: 18,
        };
        let mut out = Vec::new();
        h.write(&mut out).unwrap();
        let expected: Vec<u8> = (1..=18).collect();
        assert_eq!(out, expected);

        assert_eq!(TgaHeader::parse(&out).unwrap(), h);
    }

    #[test]
    fn for_buffer_rgba_rle() {
        let buf = PixelBuffer::new(300, 2, PixelFormat::Rgba).unwrap();
        let h = TgaHeader::for_buffer(&buf, true).unwrap();
        assert_eq!(h.data_type(), Some(DataTypeCode::RleTrueColor));
        assert_eq!(h.bits_per_pixel, 32);
        assert_eq!(h.image_descriptor, 0x28);
        assert_eq!((h.width, h.height), (300, 2));
        assert_eq!(h.id_length, 0);
        assert_eq!(h.color_map_type, 0);
    }

    #[test]
    fn for_buffer_grayscale_raw() {
        let buf = PixelBuffer::new(1, 1, PixelFormat::Grayscale).unwrap();
        let h = TgaHeader::for_buffer(&buf, false).unwrap();
        assert_eq!(h.data_type_code, 3);
        assert_eq!(h.bits_per_pixel, 8);
        assert_eq!(h.image_descriptor, 0x20);
    }

    #[test]
    fn for_buffer_rejects_wide_images() {
        let buf = PixelBuffer::new(32768, 1, PixelFormat::Grayscale).unwrap();
        assert!(matches!(
            TgaHeader::for_buffer(&buf, false),
            Err(IoError::InvalidDimensions { width: 32768, height: 1 })
        ));
    }

    #[test]
    fn validate_order() {
        assert!(matches!(
            header(0, 5, 7, 1).validate(),
            Err(IoError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            header(5, -1, 24, 2).validate(),
            Err(IoError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            header(5, 5, 16, 2).validate(),
            Err(IoError::UnsupportedFormat(ref m)) if m.contains("16 bits")
        ));
        for code in [0u8, 1, 9, 4, 255] {
            assert!(matches!(
                header(5, 5, 24, code).validate(),
                Err(IoError::UnsupportedFormat(ref m)) if m.contains("data type")
            ));
        }
        assert_eq!(
            header(5, 5, 8, 11).validate().unwrap(),
            (PixelFormat::Grayscale, DataTypeCode::RleGrayscale)
        );
    }

    #[test]
    fn short_header_is_corrupt() {
        let mut data: &[u8] = &[0u8; 10];
        assert!(matches!(
            TgaHeader::read(&mut data),
            Err(IoError::CorruptStream(_))
        ));
    }

    #[test]
    fn color_map_size() {
        let mut h = header(1, 1, 24, 2);
        assert_eq!(h.color_map_size(), 0);
        h.color_map_type = 1;
        h.color_map_length = 4;
        h.color_map_depth = 15;
        assert_eq!(h.color_map_size(), 8);
    }

    #[test]
    fn footer_layout() {
        let mut out = Vec::new();
        write_footer(&mut out).unwrap();
        assert_eq!(out.len(), 26);
        assert!(out[..8].iter().all(|&b| b == 0));
        assert_eq!(&out[8..], FOOTER_SIGNATURE);
    }
}
