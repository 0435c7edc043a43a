//! Pixel layouts and packed color values.
//!
//! # Types
//!
//! - [`PixelFormat`] - Channel layout of a stored pixel (1, 3 or 4 bytes)
//! - [`Color`] - Immutable 4-channel value in blue, green, red, alpha order
//!
//! # Channel Order
//!
//! TGA stores true-color pixels as `B G R` or `B G R A`. [`Color`] keeps the
//! same order so that copying a pixel between a buffer and a color is a plain
//! byte copy:
//!
//! ```text
//! channel:   0     1      2    3
//! meaning:   blue  green  red  alpha
//! packed:    bits 31..24  23..16  15..8  7..0
//! ```
//!
//! Grayscale pixels use channel 0 only.
//!
//! ```
//! use tga_core::{Color, PixelFormat};
//!
//! let red = Color::rgb(255, 0, 0);
//! assert_eq!(red.bgra(), [0x00, 0x00, 0xFF, 0xFF]);
//! assert_eq!(red.packed(), 0x0000_FFFF);
//! assert_eq!(red.format(), PixelFormat::Rgb);
//! ```

use crate::{Error, Result};
use std::fmt;

/// Channel layout of a stored pixel.
///
/// The discriminant equals the number of bytes per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PixelFormat {
    /// Single 8-bit intensity channel.
    Grayscale = 1,
    /// 24-bit color, stored as `B G R`.
    Rgb = 3,
    /// 32-bit color with alpha, stored as `B G R A`.
    Rgba = 4,
}

impl PixelFormat {
    /// Returns the number of bytes one pixel occupies.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        self as usize
    }

    /// Returns the number of bits one pixel occupies (8, 24 or 32).
    #[inline]
    pub const fn bits_per_pixel(self) -> u8 {
        (self as u8) * 8
    }

    /// Returns `true` if the format carries an alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }

    /// Looks up the format for a bytes-per-pixel count.
    ///
    /// # Example
    ///
    /// ```
    /// use tga_core::PixelFormat;
    ///
    /// assert_eq!(PixelFormat::from_bytes_per_pixel(3), Some(PixelFormat::Rgb));
    /// assert_eq!(PixelFormat::from_bytes_per_pixel(2), None);
    /// ```
    pub const fn from_bytes_per_pixel(bpp: u8) -> Option<Self> {
        match bpp {
            1 => Some(Self::Grayscale),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }
}

impl TryFrom<u8> for PixelFormat {
    type Error = Error;

    fn try_from(bpp: u8) -> Result<Self> {
        Self::from_bytes_per_pixel(bpp)
            .ok_or_else(|| Error::unsupported_format(format!("{} bytes per pixel", bpp)))
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Grayscale => "grayscale",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
        };
        f.write_str(name)
    }
}

/// An immutable 4-channel color.
///
/// Channels are held as `[blue, green, red, alpha]`. The value is tagged with
/// the [`PixelFormat`] it was built for or read from; only the first
/// `format.bytes_per_pixel()` channels are meaningful when writing into a
/// buffer.
///
/// Transforms such as [`scaled`](Self::scaled) return a new color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    bgra: [u8; 4],
    format: PixelFormat,
}

impl Color {
    /// Creates an opaque 24-bit color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            bgra: [b, g, r, 0xFF],
            format: PixelFormat::Rgb,
        }
    }

    /// Creates a 32-bit color with alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            bgra: [b, g, r, a],
            format: PixelFormat::Rgba,
        }
    }

    /// Creates a grayscale value.
    ///
    /// The unused channels hold `0xFF`, matching what a grayscale buffer
    /// returns from [`PixelBuffer::get_pixel`](crate::PixelBuffer::get_pixel).
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self {
            bgra: [value, 0xFF, 0xFF, 0xFF],
            format: PixelFormat::Grayscale,
        }
    }

    /// Creates a color from raw channels in `[b, g, r, a]` order.
    #[inline]
    pub const fn from_bgra(bgra: [u8; 4], format: PixelFormat) -> Self {
        Self { bgra, format }
    }

    /// Creates a color from its packed form `(b << 24) | (g << 16) | (r << 8) | a`.
    #[inline]
    pub const fn from_packed(value: u32, format: PixelFormat) -> Self {
        Self {
            bgra: value.to_be_bytes(),
            format,
        }
    }

    /// Returns the packed form `(b << 24) | (g << 16) | (r << 8) | a`.
    #[inline]
    pub const fn packed(&self) -> u32 {
        u32::from_be_bytes(self.bgra)
    }

    /// Returns the raw channels in `[b, g, r, a]` order.
    #[inline]
    pub const fn bgra(&self) -> [u8; 4] {
        self.bgra
    }

    /// Returns the format this color is tagged with.
    #[inline]
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Blue channel.
    #[inline]
    pub const fn blue(&self) -> u8 {
        self.bgra[0]
    }

    /// Green channel.
    #[inline]
    pub const fn green(&self) -> u8 {
        self.bgra[1]
    }

    /// Red channel.
    #[inline]
    pub const fn red(&self) -> u8 {
        self.bgra[2]
    }

    /// Alpha channel.
    #[inline]
    pub const fn alpha(&self) -> u8 {
        self.bgra[3]
    }

    /// Returns channel `index` (0 = blue, 3 = alpha).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfRange`] if `index >= 4`.
    pub fn channel(&self, index: usize) -> Result<u8> {
        self.bgra
            .get(index)
            .copied()
            .ok_or_else(|| Error::channel_out_of_range(index))
    }

    /// Returns the color with its first three channels multiplied by
    /// `intensity`, clamped to `[0, 1]`. Alpha is left as is.
    ///
    /// # Example
    ///
    /// ```
    /// use tga_core::Color;
    ///
    /// let c = Color::rgba(200, 100, 50, 128).scaled(0.5);
    /// assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (100, 50, 25, 128));
    ///
    /// // Factors above 1 are clamped.
    /// assert_eq!(Color::rgb(10, 20, 30).scaled(4.0), Color::rgb(10, 20, 30));
    /// ```
    pub fn scaled(&self, intensity: f32) -> Self {
        let intensity = intensity.clamp(0.0, 1.0);
        let mut bgra = self.bgra;
        for channel in &mut bgra[..3] {
            *channel = (*channel as f32 * intensity) as u8;
        }
        Self {
            bgra,
            format: self.format,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgba(0, 0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sizes() {
        assert_eq!(PixelFormat::Grayscale.bytes_per_pixel(), 1);
        assert_eq!(PixelFormat::Rgb.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::Rgba.bytes_per_pixel(), 4);
        assert_eq!(PixelFormat::Rgb.bits_per_pixel(), 24);
        assert!(PixelFormat::Rgba.has_alpha());
        assert!(!PixelFormat::Rgb.has_alpha());
    }

    #[test]
    fn test_format_from_bpp() {
        assert_eq!(PixelFormat::try_from(1), Ok(PixelFormat::Grayscale));
        assert_eq!(PixelFormat::try_from(4), Ok(PixelFormat::Rgba));
        for bpp in [0u8, 2, 5, 8] {
            assert!(matches!(
                PixelFormat::try_from(bpp),
                Err(Error::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn test_packed_layout() {
        let c = Color::rgba(0x33, 0x22, 0x11, 0x44);
        assert_eq!(c.packed(), 0x1122_3344);
        assert_eq!(c.channel(0), Ok(0x11));
        assert_eq!(c.channel(3), Ok(0x44));
        assert_eq!(Color::from_packed(0x1122_3344, PixelFormat::Rgba), c);
    }

    #[test]
    fn test_channel_out_of_range() {
        let c = Color::rgb(1, 2, 3);
        assert_eq!(c.channel(4), Err(Error::ChannelOutOfRange { index: 4 }));
    }

    #[test]
    fn test_scaled_keeps_alpha() {
        let c = Color::rgba(255, 255, 255, 7).scaled(0.0);
        assert_eq!(c.bgra(), [0, 0, 0, 7]);

        let c = Color::rgb(100, 100, 100).scaled(-2.0);
        assert_eq!(c.bgra(), [0, 0, 0, 0xFF]);
        assert_eq!(c.format(), PixelFormat::Rgb);
    }
}
