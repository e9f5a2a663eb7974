//! CRC-32 (IEEE 802.3, reflected) for verifying a gzip trailer.
//!
//! Compiled only behind the `crc` feature, and even then only exercised
//! when a caller asks for it via
//! [`DeflateOptions::set_confirm_checksum`](crate::options::DeflateOptions::set_confirm_checksum):
//! most memory-constrained callers re-inflating their own known-good
//! assets have no use for it.

use crate::callbacks::OutputSink;

const POLY: u32 = 0xEDB8_8320;

const fn build_table() -> [u32; 256]
{
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256
    {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8
        {
            crc = if crc & 1 != 0 { (crc >> 1) ^ POLY } else { crc >> 1 };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static TABLE: [u32; 256] = build_table();

/// Running CRC-32 accumulator.
#[derive(Copy, Clone)]
pub struct Crc32
{
    state: u32,
    count: u32
}

impl Default for Crc32
{
    fn default() -> Crc32
    {
        Crc32::new()
    }
}

impl Crc32
{
    pub const fn new() -> Crc32
    {
        Crc32 { state: 0xFFFF_FFFF, count: 0 }
    }

    pub fn update(&mut self, byte: u8)
    {
        let index = ((self.state ^ byte as u32) & 0xFF) as usize;
        self.state = (self.state >> 8) ^ TABLE[index];
        self.count = self.count.wrapping_add(1);
    }

    /// The CRC-32 of every byte seen so far.
    pub const fn finalize(&self) -> u32
    {
        self.state ^ 0xFFFF_FFFF
    }

    /// Number of bytes seen so far, wrapping at `u32::MAX` exactly like the
    /// gzip trailer's `ISIZE` field.
    pub const fn count(&self) -> u32
    {
        self.count
    }
}

/// Wraps an [`OutputSink`], feeding every accepted byte through a running
/// [`Crc32`] before forwarding it on.
pub struct ChecksumSink<O>
{
    inner: O,
    crc:   Crc32
}

impl<O: OutputSink> ChecksumSink<O>
{
    pub const fn new(inner: O) -> ChecksumSink<O>
    {
        ChecksumSink { inner, crc: Crc32::new() }
    }

    pub const fn crc(&self) -> u32
    {
        self.crc.finalize()
    }

    pub const fn count(&self) -> u32
    {
        self.crc.count()
    }

    pub fn into_inner(self) -> O
    {
        self.inner
    }
}

impl<O: OutputSink> OutputSink for ChecksumSink<O>
{
    fn accept(&mut self, byte: u8) -> bool
    {
        self.crc.update(byte);
        self.inner.accept(byte)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn known_vector()
    {
        let mut crc = Crc32::new();
        for byte in b"123456789"
        {
            crc.update(*byte);
        }
        assert_eq!(crc.finalize(), 0xCBF4_3926);
    }
}
