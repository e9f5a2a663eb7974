//! Sliding-window back ends: where decoded bytes (literals and LZ77 copies)
//! actually land.
//!
//! [`BlockEngine`](crate::BlockEngine) is generic over [`WindowSink`] so the
//! same decode loop drives three different memory stories: an owned 32 KiB
//! scratch buffer, a caller-supplied bounded target buffer that doubles as
//! its own window, or a caller-owned window reached purely through
//! callbacks.

use crate::callbacks::{OutputSink, WindowCopy};
use crate::constants::WINDOW_SIZE;
use crate::errors::InflateError;

/// Receives the literal bytes and back-reference copies a block produces.
///
/// `distance` and `length` arrive already validated against the format's
/// bounds (`1..=32768` and `3..=258`) by [`BlockEngine`]; a [`WindowSink`]
/// only needs to reject a distance that reaches further back than it
/// actually has history for.
pub trait WindowSink
{
    /// Emit one literal byte.
    fn emit_literal(&mut self, byte: u8) -> Result<(), InflateError>;

    /// Copy `length` bytes from `distance` bytes back in the decompressed
    /// stream so far, emitting each one (copies may overlap their own
    /// source, which is exactly how run-length repeats are encoded).
    fn copy_match(&mut self, length: u32, distance: u32) -> Result<(), InflateError>;
}

/// An owned 32 KiB circular history buffer over an arbitrary [`OutputSink`].
///
/// This is the ordinary hosted story: the crate allocates its own scratch
/// window once, and the caller just wants the decoded bytes handed to them
/// one at a time (or collected into a `Vec`, see
/// [`DeflateDecoder`](crate::DeflateDecoder)).
#[cfg(feature = "alloc")]
pub struct OwnedWindow<O>
{
    output: O,
    buffer: alloc::boxed::Box<[u8; WINDOW_SIZE]>,
    cursor: usize,
    filled: usize
}

#[cfg(feature = "alloc")]
impl<O: OutputSink> OwnedWindow<O>
{
    pub fn new(output: O) -> OwnedWindow<O>
    {
        OwnedWindow {
            output,
            buffer: alloc::boxed::Box::new([0u8; WINDOW_SIZE]),
            cursor: 0,
            filled: 0
        }
    }

    /// Unwrap the output sink, discarding the history buffer.
    pub fn into_output(self) -> O
    {
        self.output
    }

    fn push(&mut self, byte: u8) -> Result<(), InflateError>
    {
        self.buffer[self.cursor] = byte;
        self.cursor = (self.cursor + 1) % WINDOW_SIZE;
        if self.filled < WINDOW_SIZE
        {
            self.filled += 1;
        }
        if self.output.accept(byte)
        {
            Ok(())
        }
        else
        {
            Err(InflateError::OutputRejected)
        }
    }
}

#[cfg(feature = "alloc")]
impl<O: OutputSink> WindowSink for OwnedWindow<O>
{
    fn emit_literal(&mut self, byte: u8) -> Result<(), InflateError>
    {
        self.push(byte)
    }

    fn copy_match(&mut self, length: u32, distance: u32) -> Result<(), InflateError>
    {
        if distance as usize > self.filled
        {
            return Err(InflateError::MalformedBitstream);
        }
        let mut back = (self.cursor + WINDOW_SIZE - distance as usize) % WINDOW_SIZE;
        for _ in 0..length
        {
            let byte = self.buffer[back];
            self.push(byte)?;
            back = (back + 1) % WINDOW_SIZE;
        }
        Ok(())
    }
}

/// A caller-supplied fixed buffer used as both the decompression target and
/// its own sliding window: the bounded, fused-buffer mode from the design
/// notes, with no internal allocation at all.
///
/// Overflow (more decoded bytes than the buffer can hold) is reported as
/// [`InflateError::TargetOverflow`] rather than silently truncating.
pub struct TargetWindow<'out>
{
    target: &'out mut [u8],
    filled: usize
}

impl<'out> TargetWindow<'out>
{
    pub fn new(target: &'out mut [u8]) -> TargetWindow<'out>
    {
        TargetWindow { target, filled: 0 }
    }

    /// Bytes written so far.
    pub const fn len(&self) -> usize
    {
        self.filled
    }

    pub const fn is_empty(&self) -> bool
    {
        self.filled == 0
    }
}

impl<'out> WindowSink for TargetWindow<'out>
{
    fn emit_literal(&mut self, byte: u8) -> Result<(), InflateError>
    {
        if self.filled >= self.target.len()
        {
            return Err(InflateError::TargetOverflow);
        }
        self.target[self.filled] = byte;
        self.filled += 1;
        Ok(())
    }

    fn copy_match(&mut self, length: u32, distance: u32) -> Result<(), InflateError>
    {
        if distance as usize > self.filled
        {
            return Err(InflateError::MalformedBitstream);
        }
        let mut back = self.filled - distance as usize;
        for _ in 0..length
        {
            let byte = self.target[back];
            self.emit_literal(byte)?;
            back += 1;
        }
        Ok(())
    }
}

/// Adapts a caller-owned window, reached only through [`WindowCopy`], to
/// [`WindowSink`]. Literal bytes still flow through an ordinary
/// [`OutputSink`]; the caller's window implementation is expected to track
/// them on its own if it needs them for later copies, exactly as it would
/// watching any other byte sink.
pub struct ExternalWindow<O, W>
{
    output: O,
    window: W,
    hinted: bool
}

impl<O: OutputSink, W: WindowCopy> ExternalWindow<O, W>
{
    pub fn new(output: O, window: W) -> ExternalWindow<O, W>
    {
        ExternalWindow { output, window, hinted: false }
    }
}

impl<O: OutputSink, W: WindowCopy> WindowSink for ExternalWindow<O, W>
{
    fn emit_literal(&mut self, byte: u8) -> Result<(), InflateError>
    {
        if !self.hinted
        {
            self.window.hint(0, WINDOW_SIZE as u32);
            self.hinted = true;
        }
        if self.output.accept(byte)
        {
            Ok(())
        }
        else
        {
            Err(InflateError::OutputRejected)
        }
    }

    fn copy_match(&mut self, length: u32, distance: u32) -> Result<(), InflateError>
    {
        if !self.hinted
        {
            self.window.hint(0, WINDOW_SIZE as u32);
            self.hinted = true;
        }
        if self.window.copy(length, distance)
        {
            Ok(())
        }
        else
        {
            Err(InflateError::WindowRejected)
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn target_window_rejects_overflow()
    {
        let mut buf = [0u8; 2];
        let mut window = TargetWindow::new(&mut buf);
        window.emit_literal(b'a').unwrap();
        window.emit_literal(b'b').unwrap();
        assert!(matches!(window.emit_literal(b'c'), Err(InflateError::TargetOverflow)));
    }

    #[test]
    fn target_window_copy_overlaps_source()
    {
        let mut buf = [0u8; 8];
        let mut window = TargetWindow::new(&mut buf);
        window.emit_literal(b'a').unwrap();
        // distance 1, length 4: classic RLE via an overlapping copy.
        window.copy_match(4, 1).unwrap();
        assert_eq!(&buf[..5], b"aaaaa");
    }

    #[cfg(feature = "alloc")]
    struct RecordingWindow
    {
        history: alloc::vec::Vec<u8>,
        hints:   alloc::vec::Vec<(u32, u32)>
    }

    #[cfg(feature = "alloc")]
    impl WindowCopy for RecordingWindow
    {
        fn copy(&mut self, length: u32, distance: u32) -> bool
        {
            // overlapping copies (distance < length) read bytes this same
            // loop just pushed, reproducing RLE semantics.
            let mut pos = self.history.len() - distance as usize;
            for _ in 0..length
            {
                let byte = self.history[pos];
                self.history.push(byte);
                pos += 1;
            }
            true
        }

        fn hint(&mut self, distance: u32, length: u32)
        {
            self.hints.push((distance, length));
        }
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn external_window_hints_once_and_routes_literals_and_copies()
    {
        let mut output = alloc::vec::Vec::new();
        let sink = |byte: u8| -> bool {
            output.push(byte);
            true
        };
        let mut window = ExternalWindow::new(sink, RecordingWindow {
            history: alloc::vec::Vec::new(),
            hints:   alloc::vec::Vec::new()
        });

        window.emit_literal(b'a').unwrap();
        window.window.history.push(b'a');
        window.copy_match(3, 1).unwrap();

        assert_eq!(window.window.hints, [(0, WINDOW_SIZE as u32)]);
    }

    #[test]
    fn external_window_surfaces_rejected_copy()
    {
        struct RefusingWindow;
        impl WindowCopy for RefusingWindow
        {
            fn copy(&mut self, _length: u32, _distance: u32) -> bool
            {
                false
            }
        }

        let mut window = ExternalWindow::new(|_byte: u8| true, RefusingWindow);
        assert!(matches!(window.copy_match(3, 1), Err(InflateError::WindowRejected)));
    }
}
