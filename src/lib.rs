//! A DEFLATE/gzip stream decoder sized for memory-constrained targets.
//!
//! This crate implements the decompression half of [RFC 1951] (DEFLATE) and
//! the container recognition half of [RFC 1952] (gzip). It is built around
//! small, independently swappable capabilities (an input byte source, an
//! output byte sink, and a sliding window) rather than a single
//! `Read`/`Write` pair, so that a firmware caller can drive the whole
//! decoder with raw callbacks over a memory-mapped flash region, while a
//! hosted caller can just pass slices.
//!
//! Use it if:
//! - you want a decompressor with no mandatory heap allocation in its core
//!   decode path (the `alloc` feature only buys convenience, never
//!   correctness);
//! - you want a `no_std` target with or without `alloc`;
//! - you want the caller, not the library, to own the 32 KiB history
//!   window, e.g. because it already lives in a pre-zeroed static.
//!
//! # Usage
//!
//! Decoding a raw DEFLATE stream into a `Vec<u8>` (requires `alloc`):
//!
//! ```no_run
//! use pico_inflate::DeflateDecoder;
//!
//! let compressed = [0xf3, 0x48, 0xcd, 0xc9, 0xc9, 0x07, 0x00];
//! let mut decoder = DeflateDecoder::new(&compressed);
//! let decompressed = decoder.decode_deflate().unwrap();
//! assert_eq!(&decompressed, b"Hello");
//! ```
//!
//! Decoding a gzip stream without confirming the CRC-32 trailer:
//!
//! ```no_run
//! use pico_inflate::{DeflateDecoder, DeflateOptions};
//!
//! let gzip_bytes = [0u8; 32];
//! let options = DeflateOptions::default().set_confirm_checksum(false);
//! let mut decoder = DeflateDecoder::new_with_options(&gzip_bytes, options);
//! let _ = decoder.decode_gzip();
//! ```
//!
//! Driving the callback core directly, with a caller-supplied bounded
//! target buffer doubling as the sliding window (no internal 32 KiB
//! scratch, no allocation at all):
//!
//! ```no_run
//! use pico_inflate::{BitReader, BlockEngine, SliceSource, TargetWindow};
//!
//! let compressed = [0xf3, 0x48, 0xcd, 0xc9, 0xc9, 0x07, 0x00];
//! let mut out = [0u8; 5];
//! let source = SliceSource::new(&compressed);
//! let mut reader = BitReader::new(source);
//! let mut window = TargetWindow::new(&mut out);
//! let result = BlockEngine::new().run_deflate(&mut reader, &mut window);
//! assert!(result.is_ok());
//! assert_eq!(&out, b"Hello");
//! ```
//!
//! [RFC 1951]: https://www.ietf.org/rfc/rfc1951.txt
//! [RFC 1952]: https://www.ietf.org/rfc/rfc1952.txt
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

mod bitstream;
mod block;
mod callbacks;
mod constants;
pub mod errors;
mod huffman;
mod options;
mod window;

#[cfg(feature = "crc")]
mod crc;
#[cfg(feature = "gzip")]
mod gzip;

#[cfg(feature = "alloc")]
mod decoder;

pub use bitstream::{BitReader, SliceSource};
pub use block::BlockEngine;
pub use callbacks::{ByteSource, OutputSink, WindowCopy};
pub use huffman::HuffmanTable;
pub use options::{DeflateOptions, Profile};
pub use window::{ExternalWindow, OwnedWindow, TargetWindow, WindowSink};

#[cfg(feature = "alloc")]
pub use decoder::DeflateDecoder;

#[cfg(feature = "gzip")]
pub use gzip::GzipHeader;
