//! Canonical Huffman decoding via a packed binary tree.
//!
//! Rather than the flat lookup-table-with-subtables approach common in
//! hosted decoders (fast, but the table itself can run to tens of
//! kilobytes), every code here is represented as a binary tree packed into
//! a fixed-size array of small integer node records. Decoding a symbol
//! walks the tree one stream bit at a time; building a code's tree costs at
//! most `2 * num_symbols - 1` node slots.

use crate::bitstream::BitReader;
use crate::callbacks::ByteSource;
use crate::errors::InflateError;
use crate::options::Profile;

/// Marks a child slot as not yet allocated. Distinct from every real index
/// since node capacity stays far below `2^13`.
const NIL: u16 = 0x1FFF;

/// Upper bound on tree nodes for any code this format defines: the
/// literal/length alphabet has 288 symbols, so at most `2*288 - 1 = 575`
/// nodes; rounding up leaves headroom without being wasteful.
pub const MAX_TREE_NODES: usize = 638;

const LEAF_BIT: u32 = 1 << 26;
const FIELD_MASK: u32 = 0x1FFF;
const FIELD_B_SHIFT: u32 = 13;

#[inline]
const fn pack(a: u16, b: u16, is_leaf: bool) -> u32
{
    (a as u32) | ((b as u32) << FIELD_B_SHIFT) | if is_leaf { LEAF_BIT } else { 0 }
}

#[inline]
const fn is_leaf(node: u32) -> bool
{
    node & LEAF_BIT != 0
}

#[inline]
const fn field_a(node: u32) -> u16
{
    (node & FIELD_MASK) as u16
}

#[inline]
const fn field_b(node: u32) -> u16
{
    ((node >> FIELD_B_SHIFT) & FIELD_MASK) as u16
}

/// A canonical Huffman code, decodable one bit at a time.
///
/// Built from a table of per-symbol codeword lengths, per RFC 1951 §3.2.2:
/// symbols are assigned codes in ascending order, shorter codes first, all
/// codes of the same length consecutive.
pub struct HuffmanTable
{
    nodes: [u32; MAX_TREE_NODES],
    used:  u16
}

impl HuffmanTable
{
    /// An empty table. Calling [`decode`](Self::decode) on it without a
    /// prior [`build`](Self::build) will only ever see the unallocated
    /// root and fail; this exists so [`HuffmanTable`] can sit in a `struct`
    /// field before a block supplies real lengths.
    pub const fn empty() -> HuffmanTable
    {
        HuffmanTable { nodes: [0; MAX_TREE_NODES], used: 1 }
    }

    /// Build a canonical code from per-symbol lengths (0 meaning "symbol
    /// unused").
    ///
    /// In [`Profile::Safe`], an over-subscribed set of lengths (more codes
    /// of some length than the length allows) is rejected with
    /// [`InflateError::MalformedBitstream`]. [`Profile::Trusting`] skips the
    /// check and trusts the caller's input to already be a valid canonical
    /// code.
    pub fn build(lens: &[u8], profile: Profile) -> Result<HuffmanTable, InflateError>
    {
        let mut bl_count = [0u16; 16];
        for &len in lens
        {
            if len > 0
            {
                bl_count[len as usize] += 1;
            }
        }

        if matches!(profile, Profile::Safe)
        {
            let mut left: i32 = 1;
            for bits in 1..16
            {
                left <<= 1;
                left -= bl_count[bits] as i32;
                if left < 0
                {
                    return Err(InflateError::MalformedBitstream);
                }
            }
        }

        let mut next_code = [0u16; 16];
        let mut code: u16 = 0;
        for bits in 1..16
        {
            code = (code + bl_count[bits - 1]) << 1;
            next_code[bits] = code;
        }

        let mut table = HuffmanTable::empty();
        table.nodes[0] = pack(NIL, NIL, false);

        for (sym, &len) in lens.iter().enumerate()
        {
            if len == 0
            {
                continue;
            }
            let len = len as usize;
            let assigned = next_code[len];
            next_code[len] += 1;
            table.insert(assigned, len, sym as u16, profile)?;
        }

        Ok(table)
    }

    fn insert(&mut self, code: u16, len: usize, symbol: u16, profile: Profile) -> Result<(), InflateError>
    {
        let mut cur: u16 = 0;

        for bit_pos in (0..len).rev()
        {
            let bit = (code >> bit_pos) & 1;
            let node = self.nodes[cur as usize];
            let child = if bit == 0 { field_a(node) } else { field_b(node) };

            let next = if child == NIL
            {
                let new_index = self.alloc()?;
                let updated = if bit == 0
                {
                    pack(new_index, field_b(node), false)
                }
                else
                {
                    pack(field_a(node), new_index, false)
                };
                self.nodes[cur as usize] = updated;
                new_index
            }
            else
            {
                if bit_pos == 0 && matches!(profile, Profile::Safe)
                {
                    // a code already occupies this leaf slot.
                    return Err(InflateError::MalformedBitstream);
                }
                child
            };

            if bit_pos == 0
            {
                self.nodes[next as usize] = pack(symbol, NIL, true);
            }
            else
            {
                cur = next;
            }
        }

        Ok(())
    }

    fn alloc(&mut self) -> Result<u16, InflateError>
    {
        if self.used as usize >= MAX_TREE_NODES
        {
            return Err(InflateError::MalformedBitstream);
        }
        let index = self.used;
        self.nodes[index as usize] = pack(NIL, NIL, false);
        self.used += 1;
        Ok(index)
    }

    /// Decode exactly one symbol, reading codeword bits one at a time from
    /// `reader` until a leaf is reached.
    pub fn decode<S: ByteSource>(&self, reader: &mut BitReader<S>) -> Result<u16, InflateError>
    {
        let mut cur: u16 = 0;
        loop
        {
            let node = self.nodes[cur as usize];
            if is_leaf(node)
            {
                return Ok(field_a(node));
            }
            let bit = reader.read_bits(1)?;
            cur = if bit == 0 { field_a(node) } else { field_b(node) };
            if cur == NIL
            {
                return Err(InflateError::MalformedBitstream);
            }
        }
    }
}
