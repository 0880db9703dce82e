use std::path::Path;

use dessem_decoder::HidrDecoder;
use dessem_encoder::HidrEncoder;
use dessem_types::HydroPlantRecord;

use crate::compression::{self, DEFAULT_COMPRESSION_LEVEL};
use crate::error::StoreError;
use crate::preamble::{DIGEST_LEN, PREAMBLE_SIZE, Preamble};

/// Upper bound on a decompressed payload (256 MiB).
pub const MAX_PAYLOAD_SIZE: usize = 256 * 1024 * 1024;

/// How a snapshot is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// zstd-compress the payload. The flag is only set in the preamble when
    /// compression actually made the payload smaller.
    pub compress: bool,
    /// zstd level, 1–22.
    pub level: i32,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            compress: false,
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl SnapshotOptions {
    pub fn compressed() -> Self {
        Self {
            compress: true,
            ..Self::default()
        }
    }
}

/// Decoded registry persisted together with the digest of the HIDR.DAT
/// bytes it came from.
///
/// ```text
/// ┌──────────┬──────────┬────────────────────────────────────────┐
/// │ Offset   │ Size     │ Description                            │
/// ├──────────┼──────────┼────────────────────────────────────────┤
/// │ 0x00     │ 40 bytes │ Preamble (magic, version, flags, digest)│
/// │ 0x28     │ ...      │ 792-byte records (zstd if flagged)     │
/// └──────────┴──────────┴────────────────────────────────────────┘
/// ```
///
/// The payload is the records re-encoded in HIDR.DAT layout, so every
/// float comes back bit for bit, NaN and infinities included. Values held
/// in memory with more precision than `f32` are narrowed on write, exactly
/// as the encoder does.
///
/// The digest lets a reader decide whether a cached snapshot is still
/// current without decoding the source again; see
/// [`verify_source`](Self::verify_source).
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub source_digest: [u8; DIGEST_LEN],
    pub records: Vec<HydroPlantRecord>,
}

impl Snapshot {
    /// Decode HIDR.DAT bytes and record their digest.
    ///
    /// # Errors
    ///
    /// [`StoreError::Decode`] if `source` is not a whole number of records.
    pub fn from_source(source: &[u8]) -> Result<Self, StoreError> {
        let records = HidrDecoder::decode_all(source)?;
        Ok(Self {
            source_digest: *blake3::hash(source).as_bytes(),
            records,
        })
    }

    /// Read and snapshot a HIDR.DAT file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Io`] if the file cannot be read.
    /// - [`StoreError::Decode`] if it is not a whole number of records.
    pub fn from_source_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let source = std::fs::read(path)?;
        Self::from_source(&source)
    }

    /// Hex form of the source digest.
    pub fn source_digest_hex(&self) -> String {
        blake3::Hash::from_bytes(self.source_digest).to_hex().to_string()
    }

    /// Serialize into the container format.
    ///
    /// # Errors
    ///
    /// [`StoreError::Encode`] if a record does not fit the HIDR.DAT layout,
    /// for example a name longer than 12 bytes.
    pub fn to_bytes(&self, options: &SnapshotOptions) -> Result<Vec<u8>, StoreError> {
        let raw = HidrEncoder::new()
            .add_records(self.records.iter().cloned())
            .encode()?;

        let (compressed, payload) = match options
            .compress
            .then(|| compression::compress(&raw, options.level))
            .flatten()
        {
            Some(packed) => (true, packed),
            None => (false, raw),
        };

        let mut out = Vec::with_capacity(PREAMBLE_SIZE + payload.len());
        out.extend_from_slice(&Preamble::new(self.source_digest, compressed).to_bytes());
        out.extend_from_slice(&payload);

        log::debug!(
            "snapshot of {} records: {} bytes (compressed: {compressed})",
            self.records.len(),
            out.len()
        );
        Ok(out)
    }

    /// Parse a container produced by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// - Any [`Preamble::parse`] error for a short or foreign preamble.
    /// - [`StoreError::DecompressFailed`] / [`StoreError::DecompressionBomb`]
    ///   for a compressed payload that cannot be inflated within
    ///   [`MAX_PAYLOAD_SIZE`].
    /// - [`StoreError::Decode`] if the payload is not whole records.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, StoreError> {
        let preamble = Preamble::parse(buf)?;
        let body = &buf[PREAMBLE_SIZE..];

        let records = if preamble.compressed {
            HidrDecoder::decode_all(&compression::decompress(body, MAX_PAYLOAD_SIZE)?)?
        } else {
            HidrDecoder::decode_all(body)?
        };

        log::debug!("read snapshot of {} records", records.len());
        Ok(Self {
            source_digest: preamble.source_digest,
            records,
        })
    }

    /// Check that `source` is the file this snapshot was taken from.
    ///
    /// # Errors
    ///
    /// [`StoreError::DigestMismatch`] if the digests differ.
    pub fn verify_source(&self, source: &[u8]) -> Result<(), StoreError> {
        let actual = blake3::hash(source);
        if actual.as_bytes() == &self.source_digest {
            return Ok(());
        }
        Err(StoreError::DigestMismatch {
            expected: self.source_digest_hex(),
            actual: actual.to_hex().to_string(),
        })
    }

    /// Write the container to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Encode`] as for [`to_bytes`](Self::to_bytes).
    /// - [`StoreError::Io`] if the file cannot be written.
    pub fn write_file(
        &self,
        path: impl AsRef<Path>,
        options: &SnapshotOptions,
    ) -> Result<(), StoreError> {
        std::fs::write(path, self.to_bytes(options)?)?;
        Ok(())
    }

    /// # Errors
    ///
    /// - [`StoreError::Io`] if the file cannot be read.
    /// - Anything [`from_bytes`](Self::from_bytes) rejects.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let buf = std::fs::read(path)?;
        Self::from_bytes(&buf)
    }

    /// Number of non-placeholder records.
    pub fn plant_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_placeholder()).count()
    }
}
