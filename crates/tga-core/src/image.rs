//! Owned pixel buffer.
//!
//! [`PixelBuffer`] stores `width * height` pixels as a packed byte array in
//! one of the [`PixelFormat`] layouts.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, with no row
//! padding:
//!
//! ```text
//! Memory: [B G R B G R B G R ...]  <- Row 0 (top)
//!         [B G R B G R B G R ...]  <- Row 1
//!         ...
//! Pixel (x, y) starts at byte (y * width + x) * bytes_per_pixel
//! ```
//!
//! # Access Policy
//!
//! Reads are strict and writes are permissive:
//! [`get_pixel`](PixelBuffer::get_pixel) fails with [`Error::OutOfRange`]
//! outside the buffer, while [`set_pixel`](PixelBuffer::set_pixel) silently
//! ignores such coordinates so that drawing code can clip for free.
//!
//! ```rust
//! use tga_core::{Color, PixelBuffer, PixelFormat};
//!
//! let mut buf = PixelBuffer::new(4, 4, PixelFormat::Rgb).unwrap();
//! assert!(buf.set_pixel(1, 2, Color::rgb(255, 0, 0)));
//! assert!(!buf.set_pixel(-1, 2, Color::rgb(255, 0, 0)));
//!
//! assert_eq!(buf.get_pixel(1, 2).unwrap(), Color::rgb(255, 0, 0));
//! assert!(buf.get_pixel(4, 0).is_err());
//! ```

use crate::{Color, Error, PixelFormat, Result};

/// Owned raster of pixels in a fixed [`PixelFormat`].
///
/// The byte length is always `height * width * format.bytes_per_pixel()`;
/// the buffer is never resized after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Channel layout
    format: PixelFormat,
    /// Raw pixel bytes (row-major, no padding)
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `width` or `height` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tga_core::{PixelBuffer, PixelFormat};
    ///
    /// let buf = PixelBuffer::new(640, 480, PixelFormat::Rgba).unwrap();
    /// assert_eq!(buf.data().len(), 640 * 480 * 4);
    /// assert!(buf.data().iter().all(|&b| b == 0));
    /// ```
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        let len = Self::byte_len(width, height, format)?;
        Ok(Self {
            width,
            height,
            format,
            data: vec![0u8; len],
        })
    }

    /// Wraps existing pixel bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a dimension is zero or
    /// `data.len()` is not `width * height * bytes_per_pixel`.
    pub fn from_data(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = Self::byte_len(width, height, format)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    fn byte_len(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(
                width,
                height,
                "width and height must be positive",
            ));
        }
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the number of bytes per pixel.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Returns the number of bytes per row (`width * bytes_per_pixel`).
    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the raw pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw pixel bytes for in-place modification.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its bytes.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns row `y` as a byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {} out of bounds", y);
        let stride = self.bytes_per_row();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Returns row `y` as a mutable byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.height, "row {} out of bounds", y);
        let stride = self.bytes_per_row();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Byte offset of pixel `(x, y)`, or `None` when outside the buffer.
    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.bytes_per_pixel())
    }

    /// Reads the pixel at `(x, y)`.
    ///
    /// Channels the format does not store are returned as `0xFF`, so a
    /// grayscale or RGB pixel always comes back with a full fourth channel.
    /// The color is tagged with this buffer's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `x` is not in `[0, width)` or `y` is
    /// not in `[0, height)`.
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<Color> {
        let offset = self
            .offset(x, y)
            .ok_or_else(|| Error::out_of_range(x, y, self.width, self.height))?;
        let bpp = self.bytes_per_pixel();
        let mut bgra = [0xFFu8; 4];
        bgra[..bpp].copy_from_slice(&self.data[offset..offset + bpp]);
        Ok(Color::from_bgra(bgra, self.format))
    }

    /// Writes the pixel at `(x, y)`.
    ///
    /// Only the first `bytes_per_pixel` channels of `color` are stored; the
    /// rest are discarded. Coordinates outside the buffer are ignored without
    /// error. Returns `true` if a pixel was written.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> bool {
        let Some(offset) = self.offset(x, y) else {
            return false;
        };
        let bpp = self.bytes_per_pixel();
        self.data[offset..offset + bpp].copy_from_slice(&color.bgra()[..bpp]);
        true
    }

    /// Zero-fills the whole buffer.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Swaps row `l` with row `height - 1 - l` for every `l < height / 2`.
    ///
    /// The middle row of an odd-height buffer stays in place. Applying the
    /// flip twice restores the original buffer.
    pub fn flip_vertical(&mut self) {
        let stride = self.bytes_per_row();
        let height = self.height as usize;
        for l in 0..height / 2 {
            let (upper, lower) = self.data.split_at_mut((height - 1 - l) * stride);
            upper[l * stride..(l + 1) * stride].swap_with_slice(&mut lower[..stride]);
        }
    }

    /// Mirrors every row, swapping pixel `x` with pixel `width - 1 - x`.
    pub fn flip_horizontal(&mut self) {
        let bpp = self.bytes_per_pixel();
        let width = self.width as usize;
        for row in self.data.chunks_exact_mut(width * bpp) {
            for x in 0..width / 2 {
                let (left, right) = row.split_at_mut((width - 1 - x) * bpp);
                left[x * bpp..(x + 1) * bpp].swap_with_slice(&mut right[..bpp]);
            }
        }
    }

    /// Returns a nearest-neighbor rescaled copy with the same format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `width` or `height` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tga_core::{Color, PixelBuffer, PixelFormat};
    ///
    /// let mut buf = PixelBuffer::new(1, 1, PixelFormat::Grayscale).unwrap();
    /// buf.set_pixel(0, 0, Color::gray(9));
    /// let big = buf.resampled(3, 2).unwrap();
    /// assert_eq!(big.data(), &[9, 9, 9, 9, 9, 9]);
    /// ```
    pub fn resampled(&self, width: u32, height: u32) -> Result<Self> {
        let mut out = Self::new(width, height, self.format)?;
        let bpp = self.bytes_per_pixel();
        let src_stride = self.bytes_per_row();
        let dst_stride = out.bytes_per_row();
        for y in 0..height as usize {
            let sy = y * self.height as usize / height as usize;
            let src_row = &self.data[sy * src_stride..(sy + 1) * src_stride];
            let dst_row = &mut out.data[y * dst_stride..(y + 1) * dst_stride];
            for (x, dst) in dst_row.chunks_exact_mut(bpp).enumerate() {
                let sx = x * self.width as usize / width as usize;
                dst.copy_from_slice(&src_row[sx * bpp..(sx + 1) * bpp]);
            }
        }
        Ok(out)
    }
}
