//! The `alloc`-based convenience API: decode a whole buffer straight into a
//! `Vec<u8>`, without hand-assembling a [`BitReader`]/[`WindowSink`] pair.

use alloc::vec::Vec;

use crate::bitstream::{BitReader, SliceSource};
use crate::block::BlockEngine;
use crate::callbacks::OutputSink;
use crate::errors::InflateDecodeErrors;
use crate::options::DeflateOptions;
use crate::window::OwnedWindow;

#[cfg(all(feature = "gzip", feature = "crc"))]
use crate::errors::InflateError;
#[cfg(feature = "gzip")]
use crate::gzip::GzipHeader;

struct VecSink
{
    out:   Vec<u8>,
    limit: Option<usize>
}

impl VecSink
{
    fn new(limit: Option<usize>) -> VecSink
    {
        VecSink { out: Vec::new(), limit }
    }
}

impl OutputSink for VecSink
{
    fn accept(&mut self, byte: u8) -> bool
    {
        if let Some(limit) = self.limit
        {
            if self.out.len() >= limit
            {
                return false;
            }
        }
        self.out.push(byte);
        true
    }
}

/// Decodes a DEFLATE or gzip buffer held entirely in memory into an owned
/// `Vec<u8>`.
///
/// This is the API most hosted callers reach for; anyone who can't afford
/// (or doesn't want) the internal 32 KiB scratch window and `Vec` growth
/// this implies should drive [`BlockEngine`](crate::BlockEngine) directly
/// instead, with a [`TargetWindow`](crate::TargetWindow) over their own
/// buffer.
pub struct DeflateDecoder<'src>
{
    data:    &'src [u8],
    options: DeflateOptions
}

impl<'src> DeflateDecoder<'src>
{
    pub fn new(data: &'src [u8]) -> DeflateDecoder<'src>
    {
        DeflateDecoder::new_with_options(data, DeflateOptions::default())
    }

    pub fn new_with_options(data: &'src [u8], options: DeflateOptions) -> DeflateDecoder<'src>
    {
        DeflateDecoder { data, options }
    }

    /// Decode `data` as a raw DEFLATE stream, with no gzip framing.
    pub fn decode_deflate(&mut self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        let mut reader = BitReader::new(SliceSource::new(self.data));
        let sink = VecSink::new(self.options.limit());
        let mut window = OwnedWindow::new(sink);
        let engine = BlockEngine::with_profile(self.options.profile());

        match engine.run_deflate(&mut reader, &mut window)
        {
            Ok(()) => Ok(window.into_output().out),
            Err(error) => Err(InflateDecodeErrors::new(error, window.into_output().out))
        }
    }

    /// Decode `data` as a gzip member: header, DEFLATE payload, trailer.
    ///
    /// When the `crc` feature is enabled and
    /// [`DeflateOptions::confirm_checksum`](crate::options::DeflateOptions::confirm_checksum)
    /// is set, a trailer CRC-32 mismatch fails the decode with
    /// [`InflateError::ChecksumMismatch`](crate::errors::InflateError::ChecksumMismatch)
    /// even though every byte decoded correctly; the decoded bytes are
    /// still available in [`InflateDecodeErrors::data`].
    #[cfg(feature = "gzip")]
    pub fn decode_gzip(&mut self) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        let mut reader = BitReader::new(SliceSource::new(self.data));

        if let Err(error) = GzipHeader::parse(&mut reader)
        {
            return Err(InflateDecodeErrors::new_with_error(error));
        }

        #[cfg(feature = "crc")]
        {
            self.decode_gzip_body_with_crc(&mut reader)
        }
        #[cfg(not(feature = "crc"))]
        {
            self.decode_gzip_body(&mut reader)
        }
    }

    #[cfg(all(feature = "gzip", feature = "crc"))]
    fn decode_gzip_body_with_crc(
        &mut self, reader: &mut BitReader<SliceSource<'src>>
    ) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        let sink = crate::crc::ChecksumSink::new(VecSink::new(self.options.limit()));
        let mut window = OwnedWindow::new(sink);
        let engine = BlockEngine::with_profile(self.options.profile());

        if let Err(error) = engine.run_deflate(reader, &mut window)
        {
            let sink = window.into_output();
            return Err(InflateDecodeErrors::new(error, sink.into_inner().out));
        }

        let sink = window.into_output();
        let computed_crc = sink.crc();
        let data = sink.into_inner().out;

        let (expected_crc, _expected_size) = match GzipHeader::read_trailer(reader)
        {
            Ok(trailer) => trailer,
            Err(error) => return Err(InflateDecodeErrors::new(error, data))
        };

        if self.options.confirm_checksum() && expected_crc != computed_crc
        {
            let error = InflateError::ChecksumMismatch { expected: expected_crc, found: computed_crc };
            return Err(InflateDecodeErrors::new(error, data));
        }

        Ok(data)
    }

    #[cfg(all(feature = "gzip", not(feature = "crc")))]
    fn decode_gzip_body(&mut self, reader: &mut BitReader<SliceSource<'src>>) -> Result<Vec<u8>, InflateDecodeErrors>
    {
        let sink = VecSink::new(self.options.limit());
        let mut window = OwnedWindow::new(sink);
        let engine = BlockEngine::with_profile(self.options.profile());

        if let Err(error) = engine.run_deflate(reader, &mut window)
        {
            return Err(InflateDecodeErrors::new(error, window.into_output().out));
        }

        let data = window.into_output().out;
        if let Err(error) = GzipHeader::read_trailer(reader)
        {
            return Err(InflateDecodeErrors::new(error, data));
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn decodes_fixed_huffman_stream()
    {
        // "Hello" compressed with a fixed-Huffman block (BFINAL=1, BTYPE=01).
        let compressed = [0xf3, 0x48, 0xcd, 0xc9, 0xc9, 0x07, 0x00];
        let mut decoder = DeflateDecoder::new(&compressed);
        let decompressed = decoder.decode_deflate().unwrap();
        assert_eq!(decompressed, b"Hello");
    }

    #[test]
    fn limit_aborts_before_completion()
    {
        let compressed = [0xf3, 0x48, 0xcd, 0xc9, 0xc9, 0x07, 0x00];
        let options = DeflateOptions::default().set_limit(Some(2));
        let mut decoder = DeflateDecoder::new_with_options(&compressed, options);
        let err = decoder.decode_deflate().unwrap_err();
        assert_eq!(err.data.len(), 2);
    }
}
