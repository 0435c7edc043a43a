//! TGA run-length packet codec.
//!
//! Pixel data is a sequence of packets. Each packet starts with one header
//! byte:
//!
//! ```text
//! bit 7     : 1 = repeat packet, 0 = literal packet
//! bits 6..0 : pixel count - 1 (so 1..=128 pixels)
//! ```
//!
//! A literal packet is followed by `count` pixels verbatim; a repeat packet
//! by a single pixel that is replicated `count` times. Units of comparison and
//! copying are whole pixels (`bpp` bytes).
//!
//! The encoder never lets a packet cross a row boundary. The decoder only
//! checks the total pixel count, so streams from writers that do cross rows
//! still decode.

use crate::{IoError, IoResult};
use std::io::{Read, Write};

/// Longest run a single packet can describe.
pub const MAX_RUN_LENGTH: usize = 128;

/// Flag bit marking a repeat packet.
const REPEAT_FLAG: u8 = 0x80;

/// Largest output reservation made before any packet has been read.
pub(crate) const INITIAL_CAPACITY: usize = 1 << 20;

/// Classification of the run being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    /// Only one pixel seen so far.
    Undetermined,
    /// Consecutive pixels differ.
    Literal,
    /// Consecutive pixels are equal.
    Repeat,
}

/// Finds the packet starting at pixel `start`.
///
/// `limit` is the number of pixels available before the end of the row,
/// capped at [`MAX_RUN_LENGTH`].
fn scan_run(data: &[u8], bpp: usize, start: usize, limit: usize) -> (RunKind, usize) {
    let pixel = |i: usize| &data[i * bpp..(i + 1) * bpp];

    let mut kind = RunKind::Undetermined;
    let mut len = 1;
    while len < limit {
        let equal = pixel(start + len - 1) == pixel(start + len);
        if kind == RunKind::Undetermined {
            kind = if equal { RunKind::Repeat } else { RunKind::Literal };
        }
        match (kind, equal) {
            // The repeated pair opens the next packet.
            (RunKind::Literal, true) => {
                len -= 1;
                break;
            }
            (RunKind::Repeat, false) => break,
            _ => len += 1,
        }
    }
    (kind, len)
}

/// Checks that `data` holds whole rows of `width` pixels of `bpp` bytes.
fn check_layout(len: usize, width: usize, bpp: usize) -> IoResult<()> {
    if bpp == 0 {
        return Err(IoError::UnsupportedFormat("0 bytes per pixel".into()));
    }
    let row_bytes = width.checked_mul(bpp).unwrap_or(0);
    if row_bytes == 0 || len % row_bytes != 0 {
        return Err(IoError::InvalidDimensions {
            width: width as i64,
            height: len.checked_div(row_bytes).unwrap_or(0) as i64,
        });
    }
    Ok(())
}

/// Encodes `data` (row-major pixels, `width` pixels per row) into packets.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] if `bpp` is zero
/// - [`IoError::InvalidDimensions`] if `width` is zero or `data` is not a
///   whole number of rows
/// - [`IoError::Io`] if the writer fails
pub fn encode<W: Write>(writer: &mut W, data: &[u8], width: usize, bpp: usize) -> IoResult<()> {
    check_layout(data.len(), width, bpp)?;
    let npixels = data.len() / bpp;
    let mut curpix = 0usize;

    while curpix < npixels {
        let row_end = (curpix / width + 1) * width;
        let limit = (row_end - curpix).min(MAX_RUN_LENGTH);
        let (kind, len) = scan_run(data, bpp, curpix, limit);
        let start = curpix * bpp;

        if kind == RunKind::Repeat {
            writer.write_all(&[REPEAT_FLAG | (len - 1) as u8])?;
            writer.write_all(&data[start..start + bpp])?;
        } else {
            writer.write_all(&[(len - 1) as u8])?;
            writer.write_all(&data[start..start + len * bpp])?;
        }
        curpix += len;
    }
    Ok(())
}

/// Decodes packets from `reader` until `pixel_count` pixels of `bpp` bytes
/// have been produced.
///
/// The output grows as packets arrive, so a header that overstates the image
/// size fails on the short stream instead of allocating the full image up
/// front.
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] if `bpp` is zero
/// - [`IoError::InvalidDimensions`] if the image size overflows `usize`
/// - [`IoError::CorruptStream`] if a packet would run past `pixel_count`
/// - [`IoError::CorruptStream`] if the stream ends early
pub fn decode<R: Read>(reader: &mut R, pixel_count: usize, bpp: usize) -> IoResult<Vec<u8>> {
    if bpp == 0 {
        return Err(IoError::UnsupportedFormat("0 bytes per pixel".into()));
    }
    let total = pixel_count
        .checked_mul(bpp)
        .ok_or(IoError::InvalidDimensions {
            width: pixel_count as i64,
            height: 1,
        })?;

    let mut out = Vec::with_capacity(total.min(INITIAL_CAPACITY));
    let mut current = 0usize;

    while current < pixel_count {
        let mut header = [0u8; 1];
        reader
            .read_exact(&mut header)
            .map_err(|e| IoError::from_read(e, "RLE packet header"))?;
        let header = header[0];

        let repeat = header & REPEAT_FLAG != 0;
        let run = (header & !REPEAT_FLAG) as usize + 1;
        if current + run > pixel_count {
            return Err(IoError::CorruptStream(format!(
                "RLE packet of {} pixels at pixel {} overruns image of {} pixels",
                run, current, pixel_count
            )));
        }

        if repeat {
            let start = out.len();
            out.resize(start + bpp, 0);
            reader
                .read_exact(&mut out[start..])
                .map_err(|e| IoError::from_read(e, "RLE repeat pixel"))?;
            for _ in 1..run {
                out.extend_from_within(start..start + bpp);
            }
        } else {
            let copied = reader
                .by_ref()
                .take((run * bpp) as u64)
                .read_to_end(&mut out)?;
            if copied < run * bpp {
                return Err(IoError::CorruptStream(
                    "unexpected end of stream while reading RLE literal pixels".into(),
                ));
            }
        }
        current += run;
    }
    Ok(out)
}
