//! Byte offset to display coordinate conversion.
//!
//! The analysis engine reports UTF-8 byte offsets. The display surface addresses text by line
//! and column, where the column counts **UTF-16 code units** (a Greek letter is two bytes in
//! UTF-8 but a single code unit on screen). This module is the only place that crosses that
//! boundary.
//!
//! Two entry points are provided:
//!
//! - [`OffsetCursor`] / [`convert_batch`]: a single left-to-right scan shared by many offsets.
//!   This is what the renderers use, since a document usually carries many diagnostics.
//! - [`OffsetConverter`]: a rope-backed index for random access in both directions
//!   (byte -> display and display -> byte).
//!
//! Lines are separated by `\n`. A `\r` before the `\n` counts as an ordinary code unit.

use crate::diagnostics::{ByteOffset, ByteRange, check_boundary};
use crate::error::{OffsetFault, PlaygroundError, Result};
use ropey::Rope;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A position on the display surface.
///
/// Both fields are 0-based. `column` is measured in UTF-16 code units from the start of the
/// line. Ordering is by line, then column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct DisplayPosition {
    /// Line number (0-based).
    pub line: usize,
    /// Column in UTF-16 code units (0-based).
    pub column: usize,
}

impl DisplayPosition {
    /// Create a new display position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open range of display positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DisplayRange {
    /// Range start (inclusive).
    pub start: DisplayPosition,
    /// Range end (exclusive).
    pub end: DisplayPosition,
}

impl DisplayRange {
    /// Create a new display range.
    pub fn new(start: DisplayPosition, end: DisplayPosition) -> Self {
        Self { start, end }
    }

    /// Returns `true` if `point` lies inside the half-open range.
    pub fn contains(&self, point: DisplayPosition) -> bool {
        self.start <= point && point < self.end
    }
}

/// Convert a single byte offset into a display position.
///
/// Fails with [`PlaygroundError::InvalidOffset`] when the offset is past the end of the text or
/// splits a character. `byte_offset == text.len()` is valid and maps to the end of the text.
pub fn to_display_position(text: &str, byte_offset: ByteOffset) -> Result<DisplayPosition> {
    OffsetCursor::new(text).seek(byte_offset)
}

/// Convert many byte offsets with one left-to-right scan.
///
/// Offsets may be given in any order; they are visited in ascending order internally and the
/// results come back in input order. Each offset fails or succeeds on its own.
pub fn convert_batch(text: &str, offsets: &[ByteOffset]) -> Vec<Result<DisplayPosition>> {
    let mut order: Vec<usize> = (0..offsets.len()).collect();
    order.sort_by_key(|&i| offsets[i]);

    let mut slots: Vec<Option<Result<DisplayPosition>>> =
        (0..offsets.len()).map(|_| None).collect();
    let mut cursor = OffsetCursor::new(text);
    for i in order {
        slots[i] = Some(cursor.seek(offsets[i]));
    }

    slots.into_iter().flatten().collect()
}

/// A forward-only scanner that converts non-decreasing byte offsets.
///
/// Seeking backwards is allowed but restarts the scan from the beginning of the text.
#[derive(Debug, Clone)]
pub struct OffsetCursor<'a> {
    text: &'a str,
    byte: ByteOffset,
    position: DisplayPosition,
}

impl<'a> OffsetCursor<'a> {
    /// Create a cursor at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            position: DisplayPosition::default(),
        }
    }

    /// The byte offset the cursor currently sits on.
    pub fn byte_offset(&self) -> ByteOffset {
        self.byte
    }

    /// Advance to `byte_offset` and return its display position.
    pub fn seek(&mut self, byte_offset: ByteOffset) -> Result<DisplayPosition> {
        check_boundary(self.text, byte_offset)?;

        if byte_offset < self.byte {
            self.byte = 0;
            self.position = DisplayPosition::default();
        }

        for ch in self.text[self.byte..byte_offset].chars() {
            if ch == '\n' {
                self.position.line += 1;
                self.position.column = 0;
            } else {
                self.position.column += ch.len_utf16();
            }
        }
        self.byte = byte_offset;

        Ok(self.position)
    }
}

/// Random-access conversion between byte offsets and display positions.
///
/// Backed by a [`Rope`], so both directions cost O(log n) per lookup.
#[derive(Debug, Clone)]
pub struct OffsetConverter {
    rope: Rope,
}

impl OffsetConverter {
    /// Build a converter for `text`.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Byte length of the indexed text.
    pub fn len_bytes(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Number of display lines (an empty text has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn char_index(&self, byte_offset: ByteOffset) -> Result<usize> {
        let len = self.rope.len_bytes();
        if byte_offset > len {
            return Err(PlaygroundError::invalid_offset(
                byte_offset,
                len,
                OffsetFault::OutOfBounds,
            ));
        }
        let char_idx = self.rope.byte_to_char(byte_offset);
        if self.rope.char_to_byte(char_idx) != byte_offset {
            return Err(PlaygroundError::invalid_offset(
                byte_offset,
                len,
                OffsetFault::MidCharacter,
            ));
        }
        Ok(char_idx)
    }

    /// Convert a byte offset into a display position.
    pub fn to_display_position(&self, byte_offset: ByteOffset) -> Result<DisplayPosition> {
        let char_idx = self.char_index(byte_offset)?;
        let line = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line);
        let column = self.rope.char_to_utf16_cu(char_idx) - self.rope.char_to_utf16_cu(line_start);
        Ok(DisplayPosition::new(line, column))
    }

    /// Convert a display position back into a byte offset.
    ///
    /// Lines past the end map to the end of the text; columns past the end of a line clamp to
    /// the end of that line (before its `\n`). A column inside a surrogate pair resolves to the
    /// start of that character.
    pub fn to_byte_offset(&self, position: DisplayPosition) -> ByteOffset {
        if position.line >= self.rope.len_lines() {
            return self.rope.len_bytes();
        }

        let line_start = self.rope.line_to_char(position.line);
        let line = self.rope.line(position.line);
        let mut line_chars = line.len_chars();
        if line_chars > 0 && line.char(line_chars - 1) == '\n' {
            line_chars -= 1;
        }
        let line_end = line_start + line_chars;

        let start_cu = self.rope.char_to_utf16_cu(line_start);
        let end_cu = self.rope.char_to_utf16_cu(line_end);
        let target_cu = (start_cu + position.column).min(end_cu);
        let char_idx = self.rope.utf16_cu_to_char(target_cu);

        self.rope.char_to_byte(char_idx)
    }

    /// Convert a byte range into a range of Unicode scalar values (`char` indices).
    pub fn byte_range_to_char_range(&self, range: ByteRange) -> Result<Range<usize>> {
        if range.start > range.end {
            return Err(PlaygroundError::invalid_offset(
                range.start,
                self.rope.len_bytes(),
                OffsetFault::Reversed,
            ));
        }
        Ok(self.char_index(range.start)?..self.char_index(range.end)?)
    }

    /// Convert a byte range into a display range.
    pub fn to_display_range(&self, range: ByteRange) -> Result<DisplayRange> {
        Ok(DisplayRange::new(
            self.to_display_position(range.start)?,
            self.to_display_position(range.end)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_letters_are_one_code_unit() {
        // Each Greek letter is 2 bytes in UTF-8.
        let text = "Καλημέρα";
        assert_eq!(to_display_position(text, 0).unwrap(), DisplayPosition::new(0, 0));
        assert_eq!(to_display_position(text, 2).unwrap(), DisplayPosition::new(0, 1));
        assert_eq!(to_display_position(text, 16).unwrap(), DisplayPosition::new(0, 8));
    }

    #[test]
    fn test_line_breaks() {
        let text = "αβ\nγ\n";
        assert_eq!(to_display_position(text, 4).unwrap(), DisplayPosition::new(0, 2));
        assert_eq!(to_display_position(text, 5).unwrap(), DisplayPosition::new(1, 0));
        assert_eq!(to_display_position(text, 7).unwrap(), DisplayPosition::new(1, 1));
        assert_eq!(to_display_position(text, 8).unwrap(), DisplayPosition::new(2, 0));
    }

    #[test]
    fn test_astral_chars_take_two_code_units() {
        let text = "a👋b";
        assert_eq!(to_display_position(text, 5).unwrap(), DisplayPosition::new(0, 3));
    }

    #[test]
    fn test_mid_character_is_rejected() {
        let err = to_display_position("αβ", 1).unwrap_err();
        assert!(matches!(
            err,
            PlaygroundError::InvalidOffset {
                fault: OffsetFault::MidCharacter,
                ..
            }
        ));
        assert!(OffsetConverter::new("αβ").to_display_position(3).is_err());
    }

    #[test]
    fn test_cursor_restarts_when_seeking_backwards() {
        let text = "α\nβ\nγ";
        let mut cursor = OffsetCursor::new(text);
        assert_eq!(cursor.seek(6).unwrap(), DisplayPosition::new(2, 0));
        assert_eq!(cursor.seek(3).unwrap(), DisplayPosition::new(1, 0));
        assert_eq!(cursor.byte_offset(), 3);
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let text = "αβ\nγδ";
        let results = convert_batch(text, &[7, 0, 99, 2]);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap(), &DisplayPosition::new(1, 1));
        assert_eq!(results[1].as_ref().unwrap(), &DisplayPosition::new(0, 0));
        assert!(results[2].is_err());
        assert_eq!(results[3].as_ref().unwrap(), &DisplayPosition::new(0, 1));
    }

    #[test]
    fn test_converter_reverse_mapping() {
        let converter = OffsetConverter::new("αβγ\nδε");
        assert_eq!(converter.to_byte_offset(DisplayPosition::new(0, 2)), 4);
        assert_eq!(converter.to_byte_offset(DisplayPosition::new(0, 50)), 6);
        assert_eq!(converter.to_byte_offset(DisplayPosition::new(1, 1)), 9);
        assert_eq!(converter.to_byte_offset(DisplayPosition::new(9, 0)), 11);
    }

    #[test]
    fn test_byte_range_to_char_range() {
        let converter = OffsetConverter::new("Καλημέρα");
        assert_eq!(
            converter
                .byte_range_to_char_range(ByteRange::new(0, 8))
                .unwrap(),
            0..4
        );
        assert_eq!(
            converter
                .byte_range_to_char_range(ByteRange::new(8, 16))
                .unwrap(),
            4..8
        );
        assert!(
            converter
                .byte_range_to_char_range(ByteRange::new(4, 2))
                .is_err()
        );
    }

    #[test]
    fn test_display_range_contains_is_half_open() {
        let range = DisplayRange::new(DisplayPosition::new(1, 4), DisplayPosition::new(1, 8));
        assert!(range.contains(DisplayPosition::new(1, 4)));
        assert!(range.contains(DisplayPosition::new(1, 7)));
        assert!(!range.contains(DisplayPosition::new(1, 8)));
        assert!(!range.contains(DisplayPosition::new(0, 5)));
    }
}
