//! # tga-core
//!
//! Core types for TGA image handling.
//!
//! - [`PixelFormat`] - Grayscale, RGB or RGBA layout (1, 3 or 4 bytes per pixel)
//! - [`Color`] - Immutable packed color in blue, green, red, alpha order
//! - [`PixelBuffer`] - Owned raster with bounds-checked reads and clipped writes
//! - [`Error`] - Failure modes of pixel access
//!
//! ## Crate Structure
//!
//! ```text
//! tga-core (this crate)
//!    ^
//!    |
//!    +-- tga-io (TGA header, RLE codec, file I/O)
//! ```
//!
//! ## Example
//!
//! ```
//! use tga_core::prelude::*;
//!
//! let mut buf = PixelBuffer::new(2, 2, PixelFormat::Rgba)?;
//! buf.set_pixel(0, 0, Color::rgba(255, 128, 0, 255));
//! buf.flip_vertical();
//! assert_eq!(buf.get_pixel(0, 1)?.red(), 255);
//! # Ok::<(), tga_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::PixelBuffer;
pub use pixel::{Color, PixelFormat};

/// Prelude module for convenient imports.
///
/// ```
/// use tga_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::PixelBuffer;
    pub use crate::pixel::{Color, PixelFormat};
}
