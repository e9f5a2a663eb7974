//! The capability traits a caller plugs into [`BitReader`](crate::BitReader)
//! and [`BlockEngine`](crate::BlockEngine).
//!
//! Per the design notes this crate is built from, these are kept as
//! independent capabilities rather than folded into one "stream" type:
//! a caller driving the bounded-target mode never needs a separate
//! `OutputSink`, since the target buffer fuses output and window, while a
//! caller with an owned window needs both an `OutputSink` and a window but
//! no `WindowCopy` at all. Collapsing them would force every caller to
//! implement capabilities it doesn't have.

/// Supplies the next byte of compressed input.
///
/// Returning `None` is the abort sentinel: it signals end-of-input or
/// an upstream failure, and the decoder surfaces it as
/// [`InflateError::InputRejected`](crate::errors::InflateError::InputRejected).
pub trait ByteSource
{
    /// Return the next byte of input, or `None` if the source is exhausted
    /// or has failed.
    fn next_byte(&mut self) -> Option<u8>;
}

impl<F> ByteSource for F
where
    F: FnMut() -> Option<u8>
{
    fn next_byte(&mut self) -> Option<u8>
    {
        (self)()
    }
}

/// Consumes one decoded byte at a time.
///
/// Returning `false` is the abort sentinel: the caller has rejected the
/// byte (e.g. a bounded sink is full) and decoding stops immediately with
/// [`InflateError::OutputRejected`](crate::errors::InflateError::OutputRejected).
pub trait OutputSink
{
    /// Consume `byte`. Return `true` to keep going, `false` to abort.
    fn accept(&mut self, byte: u8) -> bool;
}

impl<F> OutputSink for F
where
    F: FnMut(u8) -> bool
{
    fn accept(&mut self, byte: u8) -> bool
    {
        (self)(byte)
    }
}

/// Performs a back-reference copy against a window the *caller* owns.
///
/// Present only in configurations where the caller manages its own 32 KiB
/// (or larger) history buffer outside this crate, e.g. because it is
/// memory-mapped flash the firmware already keeps around. The first call
/// before any real copy is an allocation hint, `(distance=0, length=32768)`;
/// implementations that don't need the hint can ignore it.
pub trait WindowCopy
{
    /// Copy `length` bytes from `distance` bytes back in the caller's
    /// window to the output. Return `true` to keep going, `false` to abort.
    fn copy(&mut self, length: u32, distance: u32) -> bool;

    /// Called exactly once, before any other calls, with `(0, 32768)` as an
    /// allocation hint. Default implementation does nothing.
    fn hint(&mut self, _distance: u32, _length: u32) {}
}
