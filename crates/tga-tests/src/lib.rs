//! Integration tests for the TGA crates.
//!
//! End-to-end checks that buffers built with `tga-core` survive a trip
//! through `tga-io`, on disk and in memory.
