//! Error types returned by the decoder core and the convenience API.
use core::fmt::{Debug, Formatter};

/// Structured failure reason for a decode attempt.
///
/// This is the richer counterpart to the four legacy result codes of the
/// wire contract (`0..3`, see [`InflateError::result_code`]); use that
/// method when talking to a caller that only understands the numeric
/// channel.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum InflateError
{
    /// The input callback (or slice) ran out of bytes before the stream
    /// said it should, or signalled a sentinel failure value.
    InputRejected,
    /// The output callback rejected a byte, i.e. returned its abort
    /// sentinel.
    OutputRejected,
    /// The window callback rejected a back-reference copy.
    WindowRejected,
    /// The bitstream itself is malformed: `BTYPE == 0b11`, a stored block's
    /// `LEN`/`NLEN` do not complement each other, or a Huffman code table is
    /// over-subscribed. Only ever returned in the safe profile.
    MalformedBitstream,
    /// A bounded target (either `DeflateOptions::set_limit` or a
    /// caller-supplied fixed buffer) would have overflowed.
    TargetOverflow,
    /// The gzip trailer's stored CRC-32 did not match the one computed over
    /// the decompressed bytes. Only produced when
    /// `DeflateOptions::set_confirm_checksum(true)` was used.
    #[cfg(feature = "crc")]
    ChecksumMismatch
    {
        expected: u32,
        found:    u32
    }
}

impl InflateError
{
    /// Recover the legacy numeric result code for this error.
    ///
    /// | Code | Meaning                                      |
    /// |------|-----------------------------------------------|
    /// | 1    | input-side failure, including a bad bitstream  |
    /// | 2    | output-side failure, including target overflow|
    /// | 3    | window-side failure                            |
    pub const fn result_code(&self) -> u8
    {
        match self
        {
            InflateError::InputRejected => 1,
            InflateError::OutputRejected | InflateError::TargetOverflow => 2,
            InflateError::WindowRejected => 3,
            InflateError::MalformedBitstream => 1,
            #[cfg(feature = "crc")]
            InflateError::ChecksumMismatch { .. } => 2
        }
    }
}

impl Debug for InflateError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        match self
        {
            InflateError::InputRejected => write!(f, "input exhausted or rejected"),
            InflateError::OutputRejected => write!(f, "output sink rejected a byte"),
            InflateError::WindowRejected => write!(f, "window callback rejected a copy"),
            InflateError::MalformedBitstream => write!(f, "malformed DEFLATE bitstream"),
            InflateError::TargetOverflow => write!(f, "bounded target exhausted"),
            #[cfg(feature = "crc")]
            InflateError::ChecksumMismatch { expected, found } =>
            {
                write!(f, "CRC mismatch, expected {expected:#010x} found {found:#010x}")
            }
        }
    }
}

/// Error returned by the `alloc`-based convenience API.
///
/// Carries whatever bytes were already pushed to the output before the
/// failure, since partial output is permitted on failure: the core never
/// rewinds what it has already emitted.
#[cfg(feature = "alloc")]
pub struct InflateDecodeErrors
{
    /// Reason decompression stopped.
    pub error: InflateError,
    /// Bytes successfully decoded before `error` occurred.
    pub data:  alloc::vec::Vec<u8>
}

#[cfg(feature = "alloc")]
impl InflateDecodeErrors
{
    pub(crate) fn new(error: InflateError, data: alloc::vec::Vec<u8>) -> InflateDecodeErrors
    {
        InflateDecodeErrors { error, data }
    }

    pub(crate) fn new_with_error(error: InflateError) -> InflateDecodeErrors
    {
        InflateDecodeErrors::new(error, alloc::vec::Vec::new())
    }
}

#[cfg(feature = "alloc")]
impl Debug for InflateDecodeErrors
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result
    {
        write!(f, "{:?} ({} bytes recovered)", self.error, self.data.len())
    }
}
