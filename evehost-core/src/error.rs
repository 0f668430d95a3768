//! Driver error type

/// Error from the protocol engine
///
/// `E` is the transport error of the underlying [`EveBus`]
/// implementation. Transport failures convert with `From` so they
/// propagate through `?` without wrapping at every call site.
///
/// [`EveBus`]: evehost_hal::EveBus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The SPI transport failed
    Transport(E),
    /// A bounded poll ran out of retries
    Timeout,
    /// The chip identifier did not match the profile's expectation
    IdMismatch {
        /// Identifier the display profile requires
        expected: u32,
        /// Identifier the chip reported
        found: u32,
    },
    /// The coprocessor reported a fault through its read cursor
    ///
    /// Recovery requires resetting the coprocessor; see the programming
    /// guide's fault recovery sequence.
    CoprocessorFault,
    /// A command did not fit in the free span of the command ring
    BufferFull {
        /// Bytes the encoded command needs
        needed: u16,
        /// Bytes currently free in the ring
        free: u16,
    },
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Transport(err)
    }
}
