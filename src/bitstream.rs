//! `BitReader`: pulls bits, LSB-first, out of a [`ByteSource`].
//!
//! The accumulator is wider than the single pending byte the data model of
//! this crate describes, purely so a hosted build doesn't call the source
//! callback once per bit; the externally observable contract (at most
//! `ceil(bits_consumed / 8)` source bytes consumed, bits assembled
//! low-bit-first) is identical to a literal one-byte accumulator, just
//! batched.

use crate::callbacks::ByteSource;
use crate::errors::InflateError;

/// Bits an accumulator can hold before a refill is forced. Four spare bytes
/// over a `u32` worth of pending bits is enough slack for the widest single
/// read this format needs (a 16-bit stored-block length) plus a few bits of
/// carry-over.
const MAX_BITS: u8 = 32;

/// Reads a DEFLATE bitstream one [`ByteSource`] byte at a time.
///
/// Bits are consumed LSB-first within each byte, and multi-bit fields are
/// assembled low-bit-first from successive reads, per RFC 1951 §3.1.1.
/// Huffman codewords are the one exception baked into the format itself:
/// they're read and matched one bit at a time by
/// [`HuffmanTable::decode`](crate::HuffmanTable::decode), so the
/// LSB/MSB distinction never actually arises for them.
pub struct BitReader<S>
{
    source: S,
    // pending bits, next bit to consume is the low bit.
    buffer: u32,
    bits_left: u8,
    // sticky: once the source runs out, every further read fails too.
    failed: bool
}

impl<S> BitReader<S>
where
    S: ByteSource
{
    /// Wrap a byte source in a fresh bit reader.
    pub fn new(source: S) -> BitReader<S>
    {
        BitReader {
            source,
            buffer: 0,
            bits_left: 0,
            failed: false
        }
    }

    /// Pull bytes from the source until at least `need` bits are buffered,
    /// or the source is exhausted.
    fn fill(&mut self, need: u8)
    {
        while self.bits_left < need && self.bits_left <= MAX_BITS - 8
        {
            match self.source.next_byte()
            {
                Some(byte) =>
                {
                    self.buffer |= (byte as u32) << self.bits_left;
                    self.bits_left += 8;
                }
                None =>
                {
                    self.failed = true;
                    break;
                }
            }
        }
    }

    /// Read `num_bits` (0..=24) off the stream, LSB-first.
    ///
    /// Returns [`InflateError::InputRejected`] (sticky, every later read
    /// fails too) if the source can't supply enough bits.
    #[inline]
    pub fn read_bits(&mut self, num_bits: u8) -> Result<u32, InflateError>
    {
        debug_assert!(num_bits <= 24);

        if num_bits == 0
        {
            return Ok(0);
        }
        if !self.has(num_bits)
        {
            self.fill(num_bits);
        }
        if self.failed && self.bits_left < num_bits
        {
            return Err(InflateError::InputRejected);
        }

        let mask = (1_u32 << num_bits) - 1;
        let value = self.buffer & mask;

        self.buffer >>= num_bits;
        self.bits_left -= num_bits;

        Ok(value)
    }

    /// Discard `0..7` pending bits to reach the next byte boundary of the
    /// underlying source, then read one full byte. Used before a stored
    /// block's `LEN`/`NLEN` fields.
    pub fn read_byte_aligned(&mut self) -> Result<u8, InflateError>
    {
        let partial = self.bits_left % 8;
        if partial != 0
        {
            self.drop_bits(partial);
        }
        self.read_bits(8).map(|v| v as u8)
    }

    /// Number of bits currently buffered without touching the source.
    pub const fn bits_available(&self) -> u8
    {
        self.bits_left
    }

    /// `true` if `bits` more bits can be produced without a read failing
    /// having already failed, independent of whether a refill would be
    /// needed to get them.
    pub const fn has(&self, bits: u8) -> bool
    {
        self.bits_left >= bits
    }

    #[inline]
    pub(crate) fn drop_bits(&mut self, bits: u8)
    {
        debug_assert!(self.bits_left >= bits);
        self.bits_left -= bits;
        self.buffer >>= bits;
    }

    /// `true` once the source has signalled exhaustion or failure at least
    /// once, even if some buffered bits remain.
    pub const fn has_failed(&self) -> bool
    {
        self.failed
    }
}

/// A [`ByteSource`] over an in-memory slice.
///
/// This is the everyday case, a whole compressed buffer already sitting in
/// RAM, as opposed to the byte-at-a-time callback a firmware caller might
/// supply instead.
pub struct SliceSource<'src>
{
    data: &'src [u8],
    position: usize
}

impl<'src> SliceSource<'src>
{
    pub fn new(data: &'src [u8]) -> SliceSource<'src>
    {
        SliceSource { data, position: 0 }
    }

    /// Number of bytes already handed out.
    pub const fn position(&self) -> usize
    {
        self.position
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> &'src [u8]
    {
        &self.data[self.position.min(self.data.len())..]
    }
}

impl<'src> ByteSource for SliceSource<'src>
{
    fn next_byte(&mut self) -> Option<u8>
    {
        let byte = *self.data.get(self.position)?;
        self.position += 1;
        Some(byte)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn reads_lsb_first()
    {
        // 0b1011_0010 -> reading 3 then 5 bits should give 0b010 then 0b10110
        let mut reader = BitReader::new(SliceSource::new(&[0b1011_0010]));
        assert_eq!(reader.read_bits(3).unwrap(), 0b010);
        assert_eq!(reader.read_bits(5).unwrap(), 0b10110);
    }

    #[test]
    fn crosses_byte_boundary()
    {
        let mut reader = BitReader::new(SliceSource::new(&[0xFF, 0x01]));
        assert_eq!(reader.read_bits(9).unwrap(), 0x1FF);
    }

    #[test]
    fn exhausted_source_is_sticky()
    {
        let mut reader = BitReader::new(SliceSource::new(&[0x00]));
        assert_eq!(reader.read_bits(8).unwrap(), 0);
        assert!(reader.read_bits(8).is_err());
        assert!(reader.has_failed());
        assert!(reader.read_bits(1).is_err());
    }

    #[test]
    fn byte_align_discards_partial_bits()
    {
        let mut reader = BitReader::new(SliceSource::new(&[0b1010_1010, 0x42]));
        let _ = reader.read_bits(3).unwrap();
        assert_eq!(reader.read_byte_aligned().unwrap(), 0x42);
    }
}
