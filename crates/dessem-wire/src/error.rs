/// Errors raised by the low-level byte layer.
///
/// Record decoding cannot fail once a chunk has the right size, so every
/// variant here belongs to the encoding side: a string that does not fit
/// its fixed-width slot.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WireError {
    /// A string is longer than the fixed-width slot it must be written into.
    #[error("string of {len} bytes does not fit a {width}-byte field")]
    StringTooLong { width: usize, len: usize },

    /// A string contains a character with no single-byte (Latin-1) encoding.
    #[error("character {ch:?} cannot be encoded as a single byte")]
    UnencodableChar { ch: char },
}
