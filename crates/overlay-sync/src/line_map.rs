//! Byte-offset to line/column mapping over a text snapshot.
//!
//! The parser engine reports byte offsets into the snapshot it was handed; hosts usually map
//! those through their own document. [`LineMap`] is a rope-backed implementation of that
//! conversion for hosts (and tests) that hold plain strings, with O(log N) lookups.

use crate::overlay::Position;
use ropey::Rope;

/// Rope-backed position mapping for one document snapshot.
pub struct LineMap {
    rope: Rope,
}

impl LineMap {
    /// Build the map from a text snapshot.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Convert a byte offset into a line/column position.
    ///
    /// Returns `None` for offsets past the end of the snapshot; columns count bytes from the
    /// start of the line.
    pub fn offset_to_position(&self, byte_offset: usize) -> Option<Position> {
        if byte_offset > self.rope.len_bytes() {
            return None;
        }

        let line = self.rope.byte_to_line(byte_offset);
        let column = byte_offset - self.rope.line_to_byte(line);
        Some(Position::new(line, column))
    }

    /// Total line count of the snapshot.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total byte count of the snapshot.
    pub fn byte_count(&self) -> usize {
        self.rope.len_bytes()
    }
}
