/// Errors that can occur while decoding a HIDR.DAT byte stream.
///
/// Decoding is all-or-nothing: every error is raised before any record is
/// returned, so a caller never sees a partial registry.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── InvalidLength      ← total length is not a multiple of the record size
///   ├── CursorMisaligned   ← a record decode did not end on its boundary
///   └── Io(std::io::Error) ← reading the source failed
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The input is not a whole number of records.
    ///
    /// No attempt is made to decode the complete records in front of the
    /// trailing fragment; a truncated or padded file is rejected outright.
    #[error("input length {actual_length} is not a multiple of the {record_size}-byte record size")]
    InvalidLength {
        actual_length: usize,
        record_size: usize,
    },

    /// The field sequence for a record ended somewhere other than the
    /// record boundary.
    ///
    /// This can only be produced by a layout bug in the decoder itself, and
    /// it aborts the decode rather than letting every later record shift.
    #[error("record {record_index} decode ended at offset {position}, expected {expected}")]
    CursorMisaligned {
        record_index: usize,
        position: usize,
        expected: usize,
    },

    /// An I/O error from the underlying file or reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
