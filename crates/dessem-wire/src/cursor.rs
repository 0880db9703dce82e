use crate::layout::RECORD_SIZE;

/// Forward-only read cursor over one fixed-size record.
///
/// Reads are infallible: the buffer is a `[u8; RECORD_SIZE]`, and the
/// decoder's read sequence is fixed by the layout table, so the only way a
/// read can run past the end is a field-width bug in the caller. That case
/// panics on the slice index instead of returning garbage.
///
/// ```text
///   buf: [u8; 792]
///   ┌──────────────┬──────────────────────────────┐
///   │ consumed     │ remaining                    │
///   └──────────────┴──────────────────────────────┘
///                  ▲ pos
/// ```
///
/// # Panics
///
/// Every `read_*` and [`skip`](Self::skip) panics if it would advance past
/// [`RECORD_SIZE`].
pub struct RecordCursor<'a> {
    buf: &'a [u8; RECORD_SIZE],
    pos: usize,
}

impl<'a> RecordCursor<'a> {
    /// Start a cursor at offset 0 of `buf`.
    pub fn new(buf: &'a [u8; RECORD_SIZE]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset within the record.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before the record boundary.
    pub fn remaining(&self) -> usize {
        RECORD_SIZE - self.pos
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    /// Read a little-endian `i32`.
    pub fn read_i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }

    /// Read a little-endian `i64`.
    pub fn read_i64(&mut self) -> i64 {
        i64::from_le_bytes(self.take())
    }

    /// Read a little-endian `f32` and widen it to `f64`.
    pub fn read_f32(&mut self) -> f64 {
        f64::from(f32::from_le_bytes(self.take()))
    }

    /// Read `N` consecutive `i32` values.
    pub fn read_i32_array<const N: usize>(&mut self) -> [i32; N] {
        std::array::from_fn(|_| self.read_i32())
    }

    /// Read `N` consecutive `f32` values, each widened to `f64`.
    pub fn read_f32_array<const N: usize>(&mut self) -> [f64; N] {
        std::array::from_fn(|_| self.read_f32())
    }

    /// Read a fixed-width string field.
    ///
    /// Each byte maps to the Unicode scalar of the same value (Latin-1), so
    /// any byte sequence decodes. Trailing ASCII whitespace and NUL padding
    /// are trimmed; leading content is kept as-is. Latin-1 characters that
    /// Unicode also counts as whitespace (0x85, 0xA0) are content.
    pub fn read_string(&mut self, width: usize) -> String {
        let raw = &self.buf[self.pos..self.pos + width];
        self.pos += width;
        let text: String = raw.iter().map(|&b| char::from(b)).collect();
        text.trim_end_matches(|c: char| c.is_ascii_whitespace() || c == '\0')
            .to_string()
    }

    /// Advance over `len` bytes without interpreting them.
    pub fn skip(&mut self, len: usize) {
        assert!(
            len <= self.remaining(),
            "skip of {len} bytes past record end at offset {}",
            self.pos
        );
        self.pos += len;
    }
}
