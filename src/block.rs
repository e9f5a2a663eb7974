//! The DEFLATE block loop: reads block headers, builds the Huffman tables
//! each block needs, and expands the literal/length/distance symbol stream
//! into a [`WindowSink`].

use crate::bitstream::BitReader;
use crate::callbacks::ByteSource;
use crate::constants::{
    self, DEFLATE_END_OF_BLOCK, DEFLATE_NUM_PRECODE_SYMS, DEFLATE_PRECODE_LENS_PERMUTATION,
    DIST_BASE, DIST_EXTRA_BITS, LENGTH_BASE, LENGTH_EXTRA_BITS
};
use crate::errors::InflateError;
use crate::huffman::HuffmanTable;
use crate::options::Profile;
use crate::window::WindowSink;

const BTYPE_STORED: u32 = 0b00;
const BTYPE_FIXED: u32 = 0b01;
const BTYPE_DYNAMIC: u32 = 0b10;
// BTYPE == 0b11 is reserved and always a fatal error; handled by the
// match's wildcard arm.

/// Repeat-length code 16: copy the previous code length 3-6 times.
const REPEAT_PREVIOUS: u16 = 16;
/// Repeat-length code 17: repeat a zero length 3-10 times.
const REPEAT_ZERO_SHORT: u16 = 17;
/// Repeat-length code 18: repeat a zero length 11-138 times.
const REPEAT_ZERO_LONG: u16 = 18;

/// Drives the block-by-block decode loop described by this crate's data
/// model: read `BFINAL`/`BTYPE`, dispatch to the matching block decoder,
/// repeat until the final block is consumed.
pub struct BlockEngine
{
    profile: Profile
}

impl Default for BlockEngine
{
    fn default() -> BlockEngine
    {
        BlockEngine::new()
    }
}

impl BlockEngine
{
    pub const fn new() -> BlockEngine
    {
        BlockEngine { profile: Profile::Safe }
    }

    pub const fn with_profile(profile: Profile) -> BlockEngine
    {
        BlockEngine { profile }
    }

    /// Decode a raw DEFLATE stream (no gzip or zlib framing) to completion.
    pub fn run_deflate<S, W>(&self, reader: &mut BitReader<S>, window: &mut W) -> Result<(), InflateError>
    where
        S: ByteSource,
        W: WindowSink
    {
        loop
        {
            let bfinal = reader.read_bits(1)?;
            let btype = reader.read_bits(2)?;

            #[cfg(feature = "log")]
            log::trace!("block header: bfinal={bfinal} btype={btype:#04b}");

            match btype
            {
                BTYPE_STORED => self.stored_block(reader, window)?,
                BTYPE_FIXED => self.fixed_block(reader, window)?,
                BTYPE_DYNAMIC => self.dynamic_block(reader, window)?,
                _ =>
                {
                    #[cfg(feature = "log")]
                    log::warn!("reserved BTYPE 0b11 encountered, rejecting stream");
                    return Err(InflateError::MalformedBitstream);
                }
            }

            if bfinal == 1
            {
                break;
            }
        }
        Ok(())
    }

    fn stored_block<S, W>(&self, reader: &mut BitReader<S>, window: &mut W) -> Result<(), InflateError>
    where
        S: ByteSource,
        W: WindowSink
    {
        let len_lo = reader.read_byte_aligned()? as u16;
        let len_hi = reader.read_bits(8)? as u16;
        let len = len_lo | (len_hi << 8);

        let nlen_lo = reader.read_bits(8)? as u16;
        let nlen_hi = reader.read_bits(8)? as u16;
        let nlen = nlen_lo | (nlen_hi << 8);

        if matches!(self.profile, Profile::Safe) && len != !nlen
        {
            #[cfg(feature = "log")]
            log::warn!("stored block LEN={len:#06x} does not complement NLEN={nlen:#06x}");
            return Err(InflateError::MalformedBitstream);
        }

        for _ in 0..len
        {
            let byte = reader.read_bits(8)? as u8;
            window.emit_literal(byte)?;
        }
        Ok(())
    }

    fn fixed_block<S, W>(&self, reader: &mut BitReader<S>, window: &mut W) -> Result<(), InflateError>
    where
        S: ByteSource,
        W: WindowSink
    {
        let litlen = HuffmanTable::build(&constants::fixed_litlen_lengths(), self.profile)?;
        let dist = HuffmanTable::build(&constants::fixed_dist_lengths(), self.profile)?;
        self.decode_symbols(reader, window, &litlen, &dist)
    }

    fn dynamic_block<S, W>(&self, reader: &mut BitReader<S>, window: &mut W) -> Result<(), InflateError>
    where
        S: ByteSource,
        W: WindowSink
    {
        let hlit = reader.read_bits(5)? as usize + 257;
        let hdist = reader.read_bits(5)? as usize + 1;
        let hclen = reader.read_bits(4)? as usize + 4;

        let mut precode_lens = [0u8; DEFLATE_NUM_PRECODE_SYMS];
        for i in 0..hclen
        {
            precode_lens[DEFLATE_PRECODE_LENS_PERMUTATION[i] as usize] = reader.read_bits(3)? as u8;
        }
        let precode = HuffmanTable::build(&precode_lens, self.profile)?;

        let mut all_lens = [0u8; 288 + 32];
        let total = hlit + hdist;
        let mut i = 0;
        while i < total
        {
            let sym = precode.decode(reader)?;
            match sym
            {
                0..=15 =>
                {
                    all_lens[i] = sym as u8;
                    i += 1;
                }
                REPEAT_PREVIOUS =>
                {
                    if i == 0
                    {
                        return Err(InflateError::MalformedBitstream);
                    }
                    let repeat = reader.read_bits(2)? as usize + 3;
                    let prev = all_lens[i - 1];
                    if matches!(self.profile, Profile::Safe) && i + repeat > total
                    {
                        return Err(InflateError::MalformedBitstream);
                    }
                    for _ in 0..repeat
                    {
                        all_lens[i] = prev;
                        i += 1;
                    }
                }
                REPEAT_ZERO_SHORT =>
                {
                    let repeat = reader.read_bits(3)? as usize + 3;
                    if matches!(self.profile, Profile::Safe) && i + repeat > total
                    {
                        return Err(InflateError::MalformedBitstream);
                    }
                    for _ in 0..repeat
                    {
                        all_lens[i] = 0;
                        i += 1;
                    }
                }
                REPEAT_ZERO_LONG =>
                {
                    let repeat = reader.read_bits(7)? as usize + 11;
                    if matches!(self.profile, Profile::Safe) && i + repeat > total
                    {
                        return Err(InflateError::MalformedBitstream);
                    }
                    for _ in 0..repeat
                    {
                        all_lens[i] = 0;
                        i += 1;
                    }
                }
                _ => return Err(InflateError::MalformedBitstream)
            }
        }

        let litlen = HuffmanTable::build(&all_lens[..hlit], self.profile)?;
        let dist = HuffmanTable::build(&all_lens[hlit..hlit + hdist], self.profile)?;
        self.decode_symbols(reader, window, &litlen, &dist)
    }

    fn decode_symbols<S, W>(
        &self, reader: &mut BitReader<S>, window: &mut W, litlen: &HuffmanTable, dist: &HuffmanTable
    ) -> Result<(), InflateError>
    where
        S: ByteSource,
        W: WindowSink
    {
        loop
        {
            let sym = litlen.decode(reader)?;

            if sym < DEFLATE_END_OF_BLOCK
            {
                window.emit_literal(sym as u8)?;
                continue;
            }
            if sym == DEFLATE_END_OF_BLOCK
            {
                return Ok(());
            }

            let idx = (sym - DEFLATE_END_OF_BLOCK - 1) as usize;
            if idx >= LENGTH_BASE.len()
            {
                return Err(InflateError::MalformedBitstream);
            }
            let length = LENGTH_BASE[idx] as u32 + reader.read_bits(LENGTH_EXTRA_BITS[idx])?;

            let dist_sym = dist.decode(reader)? as usize;
            if dist_sym >= DIST_BASE.len()
            {
                return Err(InflateError::MalformedBitstream);
            }
            let distance = DIST_BASE[dist_sym] as u32 + reader.read_bits(DIST_EXTRA_BITS[dist_sym])?;

            window.copy_match(length, distance)?;
        }
    }
}
