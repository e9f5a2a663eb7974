//! gzip container recognition, RFC 1952: the 10-byte fixed header, its
//! optional fields, and the 8-byte trailer. The DEFLATE payload between
//! them is handled entirely by [`BlockEngine`](crate::BlockEngine).

use crate::bitstream::BitReader;
use crate::callbacks::ByteSource;
use crate::errors::InflateError;

const MAGIC_0: u32 = 0x1F;
const MAGIC_1: u32 = 0x8B;
const CM_DEFLATE: u32 = 8;

const FLAG_FTEXT: u8 = 1 << 0;
const FLAG_FHCRC: u8 = 1 << 1;
const FLAG_FEXTRA: u8 = 1 << 2;
const FLAG_FNAME: u8 = 1 << 3;
const FLAG_FCOMMENT: u8 = 1 << 4;

/// The fields of a gzip member's fixed header that survive past framing:
/// `FNAME`/`FCOMMENT` text and the `FEXTRA` subfields are skipped rather
/// than copied out, since nothing downstream of decompression needs them.
#[derive(Copy, Clone, Debug)]
pub struct GzipHeader
{
    pub modification_time: u32,
    pub extra_flags:       u8,
    pub operating_system:  u8,
    /// `FTEXT`, §2.3.1: a hint that the payload is probably ASCII/Latin-1
    /// text. Advisory only; this crate always decodes the same way.
    pub probably_text:     bool
}

impl GzipHeader
{
    /// Parse and validate the fixed header plus any optional fields,
    /// leaving `reader` positioned at the first byte of the DEFLATE
    /// payload.
    ///
    /// Reserved bits 5-7 of `FLG` are read but ignored, per RFC 1952 §2.3.1.
    pub fn parse<S: ByteSource>(reader: &mut BitReader<S>) -> Result<GzipHeader, InflateError>
    {
        let magic0 = reader.read_bits(8)?;
        let magic1 = reader.read_bits(8)?;
        if magic0 != MAGIC_0 || magic1 != MAGIC_1
        {
            #[cfg(feature = "log")]
            log::warn!("bad gzip magic {magic0:#04x} {magic1:#04x}");
            return Err(InflateError::MalformedBitstream);
        }

        let cm = reader.read_bits(8)?;
        if cm != CM_DEFLATE
        {
            #[cfg(feature = "log")]
            log::warn!("unsupported gzip compression method {cm}");
            return Err(InflateError::MalformedBitstream);
        }

        let flg = reader.read_bits(8)? as u8;

        let mut modification_time: u32 = 0;
        for shift in [0, 8, 16, 24]
        {
            modification_time |= reader.read_bits(8)? << shift;
        }

        let extra_flags = reader.read_bits(8)? as u8;
        let operating_system = reader.read_bits(8)? as u8;

        if flg & FLAG_FEXTRA != 0
        {
            let xlen = reader.read_bits(8)? | (reader.read_bits(8)? << 8);
            for _ in 0..xlen
            {
                reader.read_bits(8)?;
            }
        }
        if flg & FLAG_FNAME != 0
        {
            Self::skip_cstring(reader)?;
        }
        if flg & FLAG_FCOMMENT != 0
        {
            Self::skip_cstring(reader)?;
        }
        if flg & FLAG_FHCRC != 0
        {
            reader.read_bits(8)?;
            reader.read_bits(8)?;
        }

        Ok(GzipHeader {
            modification_time,
            extra_flags,
            operating_system,
            probably_text: flg & FLAG_FTEXT != 0
        })
    }

    fn skip_cstring<S: ByteSource>(reader: &mut BitReader<S>) -> Result<(), InflateError>
    {
        loop
        {
            if reader.read_bits(8)? == 0
            {
                return Ok(());
            }
        }
    }

    /// Read the 8-byte trailer: stored CRC-32 followed by `ISIZE`, the
    /// uncompressed size modulo `2^32`.
    pub fn read_trailer<S: ByteSource>(reader: &mut BitReader<S>) -> Result<(u32, u32), InflateError>
    {
        let mut crc: u32 = 0;
        for shift in [0, 8, 16, 24]
        {
            crc |= reader.read_bits(8)? << shift;
        }
        let mut isize_field: u32 = 0;
        for shift in [0, 8, 16, 24]
        {
            isize_field |= reader.read_bits(8)? << shift;
        }
        Ok((crc, isize_field))
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::bitstream::SliceSource;

    #[test]
    fn parses_minimal_header()
    {
        let data = [0x1F, 0x8B, 0x08, 0x00, 0, 0, 0, 0, 0x00, 0xFF];
        let mut reader = BitReader::new(SliceSource::new(&data));
        let header = GzipHeader::parse(&mut reader).unwrap();
        assert_eq!(header.operating_system, 0xFF);
        assert!(!header.probably_text);
    }

    #[test]
    fn rejects_bad_magic()
    {
        let data = [0x1F, 0x8C, 0x08, 0x00, 0, 0, 0, 0, 0x00, 0xFF];
        let mut reader = BitReader::new(SliceSource::new(&data));
        assert!(GzipHeader::parse(&mut reader).is_err());
    }

    #[test]
    fn skips_fname_field()
    {
        let data = alloc_free_header_with_fname();
        let mut reader = BitReader::new(SliceSource::new(&data));
        let header = GzipHeader::parse(&mut reader).unwrap();
        assert_eq!(header.modification_time, 0);
    }

    fn alloc_free_header_with_fname() -> [u8; 15]
    {
        [0x1F, 0x8B, 0x08, FLAG_FNAME, 0, 0, 0, 0, 0x00, 0xFF, b'a', b'.', b't', b'x', 0]
    }
}
