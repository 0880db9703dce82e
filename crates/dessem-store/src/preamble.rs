use crate::error::StoreError;

/// "HSN\0": HIDR snapshot.
pub const MAGIC: [u8; 4] = *b"HSN\0";

pub const VERSION_MAJOR: u8 = 1;
pub const VERSION_MINOR: u8 = 0;

/// BLAKE3 digest length.
pub const DIGEST_LEN: usize = 32;

/// Fixed bytes in front of every payload.
pub const PREAMBLE_SIZE: usize = 8 + DIGEST_LEN;

/// Flag bit 0: the payload is one zstd frame.
const FLAG_ZSTD: u8 = 0b0000_0001;

/// Flag bits this version understands. Any other bit is rejected on read,
/// since it would mean the payload is laid out in a way we cannot decode.
const KNOWN_FLAGS: u8 = FLAG_ZSTD;

/// Everything a snapshot says about itself before the payload starts.
///
/// ```text
/// ┌────────┬──────────┬──────────────────────────────────────────┐
/// │ Offset │ Size     │ Description                              │
/// ├────────┼──────────┼──────────────────────────────────────────┤
/// │ 0x00   │ 4 bytes  │ Magic "HSN\0"                            │
/// │ 0x04   │ 1 byte   │ Version major (readers reject others)    │
/// │ 0x05   │ 1 byte   │ Version minor (informational)            │
/// │ 0x06   │ 1 byte   │ Flags: bit 0 = zstd payload, 1-7 zero    │
/// │ 0x07   │ 1 byte   │ Reserved, zero                           │
/// │ 0x08   │ 32 bytes │ BLAKE3 digest of the source HIDR.DAT     │
/// └────────┴──────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preamble {
    pub version_minor: u8,
    pub compressed: bool,
    pub source_digest: [u8; DIGEST_LEN],
}

impl Preamble {
    /// Preamble for a snapshot written by this version.
    pub fn new(source_digest: [u8; DIGEST_LEN], compressed: bool) -> Self {
        Self {
            version_minor: VERSION_MINOR,
            compressed,
            source_digest,
        }
    }

    pub fn to_bytes(&self) -> [u8; PREAMBLE_SIZE] {
        let mut out = [0u8; PREAMBLE_SIZE];
        out[..4].copy_from_slice(&MAGIC);
        out[4] = VERSION_MAJOR;
        out[5] = self.version_minor;
        out[6] = if self.compressed { FLAG_ZSTD } else { 0 };
        out[8..].copy_from_slice(&self.source_digest);
        out
    }

    /// Parse the preamble at the start of `buf`; the payload follows at
    /// [`PREAMBLE_SIZE`].
    ///
    /// # Errors
    ///
    /// - [`StoreError::Truncated`] if `buf` is shorter than the preamble.
    /// - [`StoreError::InvalidMagic`] if it does not start with "HSN\0".
    /// - [`StoreError::UnsupportedVersion`] for a different major version.
    /// - [`StoreError::ReservedNonZero`] for an unknown flag bit or a
    ///   non-zero reserved byte.
    pub fn parse(buf: &[u8]) -> Result<Self, StoreError> {
        let Some(head) = buf.first_chunk::<PREAMBLE_SIZE>() else {
            return Err(StoreError::Truncated {
                actual: buf.len(),
                minimum: PREAMBLE_SIZE,
            });
        };

        let magic = [head[0], head[1], head[2], head[3]];
        if magic != MAGIC {
            return Err(StoreError::InvalidMagic { found: magic });
        }
        if head[4] != VERSION_MAJOR {
            return Err(StoreError::UnsupportedVersion {
                major: head[4],
                minor: head[5],
            });
        }
        let flags = head[6];
        if flags & !KNOWN_FLAGS != 0 {
            return Err(StoreError::ReservedNonZero {
                offset: 6,
                value: flags,
            });
        }
        if head[7] != 0 {
            return Err(StoreError::ReservedNonZero {
                offset: 7,
                value: head[7],
            });
        }

        let mut source_digest = [0u8; DIGEST_LEN];
        source_digest.copy_from_slice(&head[8..]);
        Ok(Self {
            version_minor: head[5],
            compressed: flags & FLAG_ZSTD != 0,
            source_digest,
        })
    }
}
