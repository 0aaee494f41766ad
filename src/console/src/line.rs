//! Fixed-capacity input line with an insertion cursor.

/// Maximum input line length.
pub const LINE_CAPACITY: usize = 256;

/// The line being edited.
///
/// `cursor` is always a valid insertion point: `0 <= cursor <= len`.
/// Only ASCII bytes are stored, so the content is always valid UTF-8.
#[derive(Clone)]
pub struct LineBuffer {
    bytes: [u8; LINE_CAPACITY],
    len: usize,
    cursor: usize,
}

impl LineBuffer {
    /// Create an empty line.
    pub const fn new() -> Self {
        Self {
            bytes: [0; LINE_CAPACITY],
            len: 0,
            cursor: 0,
        }
    }

    /// Number of bytes in the line.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the line is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether another byte can be inserted.
    pub fn is_full(&self) -> bool {
        self.len == LINE_CAPACITY
    }

    /// Insertion point.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Line content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Line content as text.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Bytes from the cursor to the end of the line.
    pub fn tail(&self) -> &[u8] {
        &self.bytes[self.cursor..self.len]
    }

    /// Inserts `byte` at the cursor and advances past it.
    ///
    /// Returns `false` (and changes nothing) if the line is full or the byte
    /// is not ASCII.
    pub fn insert(&mut self, byte: u8) -> bool {
        if self.is_full() || !byte.is_ascii() {
            return false;
        }
        self.bytes.copy_within(self.cursor..self.len, self.cursor + 1);
        self.bytes[self.cursor] = byte;
        self.len += 1;
        self.cursor += 1;
        true
    }

    /// Removes the byte before the cursor and steps back over it.
    pub fn remove_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.remove(self.cursor);
        true
    }

    /// Removes the byte under the cursor. The cursor stays put.
    pub fn remove_at_cursor(&mut self) -> bool {
        if self.cursor == self.len {
            return false;
        }
        self.remove(self.cursor);
        true
    }

    /// Moves the cursor one byte left.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Moves the cursor one byte right.
    pub fn move_right(&mut self) -> bool {
        if self.cursor == self.len {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Empties the line.
    pub fn clear(&mut self) {
        self.len = 0;
        self.cursor = 0;
    }

    fn remove(&mut self, index: usize) {
        self.bytes.copy_within(index + 1..self.len, index);
        self.len -= 1;
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LineBuffer")
            .field("line", &self.as_str())
            .field("cursor", &self.cursor)
            .finish()
    }
}
