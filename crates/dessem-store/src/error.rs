use dessem_decoder::DecodeError;
use dessem_encoder::EncodeError;

/// Errors that can occur while writing or reading a snapshot container.
///
/// ```text
///   StoreError
///   ├── Truncated             ← shorter than the 40-byte preamble
///   ├── InvalidMagic          ← not a snapshot at all
///   ├── UnsupportedVersion    ← written by a newer major version
///   ├── ReservedNonZero       ← unknown flag bit or reserved byte set
///   ├── Encode(EncodeError)   ← a record does not fit the 792-byte layout
///   ├── Decode(DecodeError)   ← source or payload is not whole records
///   ├── DecompressFailed      ← zstd could not decode the payload
///   ├── DecompressionBomb     ← payload inflates past the limit
///   ├── DigestMismatch        ← source file changed since the snapshot
///   └── Io(std::io::Error)
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("snapshot is {actual} bytes, shorter than the {minimum}-byte preamble")]
    Truncated { actual: usize, minimum: usize },

    #[error("not a snapshot: magic bytes {found:02X?}, expected \"HSN\\0\"")]
    InvalidMagic { found: [u8; 4] },

    #[error("unsupported snapshot version {major}.{minor}")]
    UnsupportedVersion { major: u8, minor: u8 },

    /// Offset 6 for undefined flag bits, offset 7 for the reserved byte.
    #[error("reserved bits at offset {offset} set ({value:#04X})")]
    ReservedNonZero { offset: usize, value: u8 },

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("zstd decompression failed: {0}")]
    DecompressFailed(String),

    #[error("decompressed payload exceeds {limit} bytes (got at least {actual})")]
    DecompressionBomb { actual: usize, limit: usize },

    /// The source bytes hash to something other than the digest recorded
    /// when the snapshot was taken.
    #[error("source digest mismatch: snapshot has {expected}, source is {actual}")]
    DigestMismatch { expected: String, actual: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
