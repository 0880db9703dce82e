use dessem_wire::WireError;

/// Errors that can occur while encoding plants into HIDR.DAT records.
///
/// Numeric fields always fit their slot, so failures come from string
/// fields that are too long or not representable in a single byte per
/// character, and from writing the finished file.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   ├── Field { record_index, field, source: WireError }
///   └── Io(std::io::Error)
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// A string field of one record could not be written.
    #[error("record {record_index}, field {field}: {source}")]
    Field {
        record_index: usize,
        field: &'static str,
        source: WireError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
