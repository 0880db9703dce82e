use crate::error::WireError;
use crate::layout::RECORD_SIZE;

/// Forward-only writer that fills one fixed-size record.
///
/// The mirror of [`RecordCursor`](crate::RecordCursor): values are written
/// little-endian at the current offset and the offset advances by the field
/// width. Unwritten bytes stay zero, which is what the reserved span gets.
///
/// # Panics
///
/// Every `write_*` panics if it would advance past [`RECORD_SIZE`].
pub struct RecordWriter {
    buf: [u8; RECORD_SIZE],
    pos: usize,
}

impl Default for RecordWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordWriter {
    /// Start a zero-filled record at offset 0.
    pub fn new() -> Self {
        Self {
            buf: [0u8; RECORD_SIZE],
            pos: 0,
        }
    }

    /// Current byte offset within the record.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    pub fn write_i32(&mut self, value: i32) {
        self.put(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.put(&value.to_le_bytes());
    }

    /// Narrow `value` to `f32` and write it.
    #[allow(clippy::cast_possible_truncation)]
    pub fn write_f32(&mut self, value: f64) {
        self.put(&(value as f32).to_le_bytes());
    }

    pub fn write_i32_array(&mut self, values: &[i32]) {
        for &v in values {
            self.write_i32(v);
        }
    }

    pub fn write_f32_array(&mut self, values: &[f64]) {
        for &v in values {
            self.write_f32(v);
        }
    }

    /// Write `text` into a `width`-byte slot, right-padded with spaces.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnencodableChar`] if a character is above U+00FF.
    /// - [`WireError::StringTooLong`] if the encoded text exceeds `width`.
    ///
    /// On error nothing is written and the offset does not move.
    pub fn write_string(&mut self, text: &str, width: usize) -> Result<(), WireError> {
        let mut encoded = Vec::with_capacity(width);
        for ch in text.chars() {
            let byte = u8::try_from(u32::from(ch)).map_err(|_| WireError::UnencodableChar { ch })?;
            encoded.push(byte);
        }
        if encoded.len() > width {
            return Err(WireError::StringTooLong {
                width,
                len: encoded.len(),
            });
        }
        encoded.resize(width, b' ');
        self.put(&encoded);
        Ok(())
    }

    /// Write `len` copies of `byte`.
    pub fn fill(&mut self, len: usize, byte: u8) {
        let end = self.pos + len;
        self.buf[self.pos..end].fill(byte);
        self.pos = end;
    }

    /// Return the finished record.
    ///
    /// Any bytes after the last write remain zero.
    pub fn into_bytes(self) -> [u8; RECORD_SIZE] {
        self.buf
    }
}
