//! Decode-time configuration, in the consuming-builder style used
//! throughout this crate's ambient option types.

/// Which of the two error-handling profiles a decode runs under.
///
/// `Trusting` assumes well-formed input and skips the checks that only
/// exist to reject malformed streams, trading robustness for a smaller and
/// faster decode path: the profile a ROM-hacking tool re-inflating its own
/// previously-deflated assets would reach for. `Safe` is the default and
/// pays for the checks described in the error-handling design: a reserved
/// block type, a stored block whose `LEN`/`NLEN` disagree, an
/// over-subscribed Huffman table, or a distance reaching further back than
/// the window has history for all become
/// [`InflateError::MalformedBitstream`](crate::errors::InflateError::MalformedBitstream)
/// instead of undefined behavior.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Profile
{
    #[default]
    Safe,
    Trusting
}

/// Configuration for a [`DeflateDecoder`](crate::DeflateDecoder) (or any
/// caller driving [`BlockEngine`](crate::BlockEngine) directly).
///
/// Every setter consumes and returns `self`, so options are built up with a
/// chain of calls ending in the value itself, e.g.
/// `DeflateOptions::default().set_limit(Some(1 << 20)).set_confirm_checksum(false)`.
#[derive(Copy, Clone, Debug)]
pub struct DeflateOptions
{
    profile:           Profile,
    limit:             Option<usize>,
    confirm_checksum:  bool
}

impl Default for DeflateOptions
{
    fn default() -> DeflateOptions
    {
        DeflateOptions {
            profile: Profile::Safe,
            limit: None,
            confirm_checksum: false
        }
    }
}

impl DeflateOptions
{
    /// Switch between the `Safe` and `Trusting` error-handling profiles.
    pub const fn set_profile(mut self, profile: Profile) -> DeflateOptions
    {
        self.profile = profile;
        self
    }

    pub const fn profile(&self) -> Profile
    {
        self.profile
    }

    /// Cap decompressed output at `limit` bytes, rather than letting an
    /// output buffer grow without bound. Exceeding it aborts the decode the
    /// same way any other output-side rejection does, with
    /// [`InflateError::OutputRejected`](crate::errors::InflateError::OutputRejected).
    ///
    /// A fixed-size target buffer reached through
    /// [`TargetWindow`](crate::TargetWindow) instead enforces its own bound
    /// and reports
    /// [`InflateError::TargetOverflow`](crate::errors::InflateError::TargetOverflow);
    /// this setting only applies to the `alloc`-based convenience API.
    ///
    /// `None` (the default) means no cap beyond whatever the output sink
    /// itself enforces.
    pub const fn set_limit(mut self, limit: Option<usize>) -> DeflateOptions
    {
        self.limit = limit;
        self
    }

    pub const fn limit(&self) -> Option<usize>
    {
        self.limit
    }

    /// Whether to verify the gzip trailer's CRC-32 against the decompressed
    /// bytes. Requires the `crc` feature; ignored entirely without it.
    ///
    /// Defaults to `false`: the core reads past the trailer without
    /// validating it, and this opts into validation rather than the other
    /// way around.
    pub const fn set_confirm_checksum(mut self, confirm: bool) -> DeflateOptions
    {
        self.confirm_checksum = confirm;
        self
    }

    pub const fn confirm_checksum(&self) -> bool
    {
        self.confirm_checksum && cfg!(feature = "crc")
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn builder_chains_and_defaults()
    {
        let opts = DeflateOptions::default().set_limit(Some(1024)).set_profile(Profile::Trusting);
        assert_eq!(opts.limit(), Some(1024));
        assert_eq!(opts.profile(), Profile::Trusting);
    }
}
