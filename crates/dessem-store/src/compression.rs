use std::io::{Cursor, Read};

use crate::error::StoreError;

/// Default zstd compression level (1–22 scale).
///
/// Record streams are mostly zero (the reserved span, inactive machine-set
/// slots, unused tailrace families), so low levels already shrink them
/// several times over.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// Compress a payload with zstd at `level`.
///
/// Returns `Some(compressed)` if compression reduced the size, or `None`
/// if the compressed output is not smaller than the input. The caller
/// stores the payload uncompressed when `None` is returned.
///
/// # Example
///
/// ```rust
/// use dessem_store::compression::compress;
///
/// let data = [0u8; 792].repeat(4);
/// let compressed = compress(&data, 3).unwrap();
/// assert!(compressed.len() < data.len());
/// ```
pub fn compress(data: &[u8], level: i32) -> Option<Vec<u8>> {
    let compressed = zstd::encode_all(Cursor::new(data), level).ok()?;
    (compressed.len() < data.len()).then_some(compressed)
}

/// Decompress a zstd frame, refusing to inflate beyond `max_size` bytes.
///
/// Output is read through a bounded reader, so a hostile frame is cut off
/// after `max_size + 1` bytes instead of being inflated in full.
///
/// # Errors
///
/// - [`StoreError::DecompressFailed`] if zstd cannot decode the input.
/// - [`StoreError::DecompressionBomb`] if the output exceeds `max_size`.
pub fn decompress(data: &[u8], max_size: usize) -> Result<Vec<u8>, StoreError> {
    let decoder = zstd::stream::read::Decoder::new(Cursor::new(data))
        .map_err(|e| StoreError::DecompressFailed(e.to_string()))?;
    let mut out = Vec::new();
    decoder
        .take(max_size as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|e| StoreError::DecompressFailed(e.to_string()))?;
    if out.len() > max_size {
        return Err(StoreError::DecompressionBomb {
            actual: out.len(),
            limit: max_size,
        });
    }
    Ok(out)
}
