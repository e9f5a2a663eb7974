/// Number of symbols in each Huffman code.  Note: for the literal/length
/// and offset codes, these are actually the maximum values; a given block
/// might use fewer symbols.
pub const DEFLATE_NUM_PRECODE_SYMS: usize = 19;

/// Order which precode lengths are stored
pub static DEFLATE_PRECODE_LENS_PERMUTATION: [u8; DEFLATE_NUM_PRECODE_SYMS] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

/// Literal/length alphabet size: 256 literals, the end-of-block symbol, and
/// 29 length codes.
pub const DEFLATE_NUM_LITLEN_SYMS: usize = 288;

/// Distance alphabet size. RFC 1951 reserves symbols 30 and 31; they never
/// appear in a valid stream but still need a slot in the canonical build.
pub const DEFLATE_NUM_DIST_SYMS: usize = 32;

/// Symbol that ends a block's literal/length stream.
pub const DEFLATE_END_OF_BLOCK: u16 = 256;

/// Base length (before adding the per-code extra bits) for length codes
/// 257..=285, indexed from 0. RFC 1951 §3.2.5.
pub static LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258,
];

/// Extra bits read after each length code, same indexing as [`LENGTH_BASE`].
/// Code 285 (index 28) is the one fixed-length exception: base 258, 0 extra
/// bits, so the maximum match length is exactly 258.
pub static LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Base distance (before adding the per-code extra bits) for distance codes
/// 0..=29. RFC 1951 §3.2.5.
pub static DIST_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// Extra bits read after each distance code, same indexing as [`DIST_BASE`].
pub static DIST_EXTRA_BITS: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

/// Fixed (static) literal/length code lengths, RFC 1951 §3.2.6: symbols
/// 0..144 get length 8, 144..256 get length 9, 256..280 get length 7, and
/// 280..288 get length 8.
pub fn fixed_litlen_lengths() -> [u8; DEFLATE_NUM_LITLEN_SYMS]
{
    let mut lens = [0u8; DEFLATE_NUM_LITLEN_SYMS];
    let mut i = 0;
    while i < 144
    {
        lens[i] = 8;
        i += 1;
    }
    while i < 256
    {
        lens[i] = 9;
        i += 1;
    }
    while i < 280
    {
        lens[i] = 7;
        i += 1;
    }
    while i < 288
    {
        lens[i] = 8;
        i += 1;
    }
    lens
}

/// Fixed (static) distance code lengths: all 32 symbols get length 5, even
/// though only symbols 0..30 are ever assigned a meaning.
pub fn fixed_dist_lengths() -> [u8; DEFLATE_NUM_DIST_SYMS]
{
    [5u8; DEFLATE_NUM_DIST_SYMS]
}

/// Size of the sliding window shared by every DEFLATE stream.
pub const WINDOW_SIZE: usize = 32 * 1024;
