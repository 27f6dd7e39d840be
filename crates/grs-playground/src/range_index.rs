//! Reverse range index for the token table view.
//!
//! The token table shows one token per line:
//!
//! ```text
//! "Καλημέρα", " ", 0..16
//! "κόσμε", "", 17..27
//! ```
//!
//! Every `start..end` annotation is decorated as clickable. The [`RangeIndex`] maps the on-screen
//! span of each annotation back to the byte range it denotes, so a pointer position can be
//! resolved to a range of the primary document.
//!
//! [`TokenTable::render`] builds the index from the token data while rendering, so the index can
//! never disagree with what was drawn. [`RangeIndex::scan_rendered`] recovers an index from an
//! already rendered table (for tables produced elsewhere); it trusts the `\d+..\d+` pattern and
//! will also pick up digits that happen to appear inside token text.

use crate::diagnostics::{ByteRange, Token};
use crate::offsets::{DisplayPosition, DisplayRange};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// CSS classes applied to every clickable range annotation.
pub const RANGE_DECORATION_CLASS: &str =
    "underline decoration-slate-600 decoration-1 cursor-pointer";

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.\.(\d+)").expect("range pattern is a valid regex")
});

/// One clickable annotation: where it is drawn and which bytes it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRange {
    /// On-screen span of the `start..end` text.
    pub display_range: DisplayRange,
    /// The byte range the annotation denotes.
    pub byte_range: ByteRange,
}

/// Styling options of a decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationOptions {
    /// Class names applied inline to the decorated text.
    pub inline_class_name: String,
}

/// A decoration descriptor: `{ range, options: { inlineClassName } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeDecoration {
    /// Decorated display range.
    pub range: DisplayRange,
    /// Styling options.
    pub options: DecorationOptions,
}

/// Lookup table from annotation spans to byte ranges.
///
/// Entries are kept sorted by display position and never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeIndex {
    ranges: Vec<RenderedRange>,
}

impl RangeIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recover an index by scanning rendered text for `start..end` annotations.
    ///
    /// Numbers that do not fit a `usize` are ignored.
    pub fn scan_rendered(rendered: &str) -> Self {
        let mut ranges = Vec::new();
        for (line, line_text) in rendered.split('\n').enumerate() {
            for caps in RANGE_PATTERN.captures_iter(line_text) {
                let (Some(whole), Some(start), Some(end)) = (caps.get(0), caps.get(1), caps.get(2))
                else {
                    continue;
                };
                let (Ok(start), Ok(end)) = (start.as_str().parse(), end.as_str().parse()) else {
                    continue;
                };

                let start_col = utf16_len(&line_text[..whole.start()]);
                let end_col = start_col + utf16_len(whole.as_str());
                ranges.push(RenderedRange {
                    display_range: DisplayRange::new(
                        DisplayPosition::new(line, start_col),
                        DisplayPosition::new(line, end_col),
                    ),
                    byte_range: ByteRange::new(start, end),
                });
            }
        }
        Self { ranges }
    }

    /// All entries, in display order.
    pub fn ranges(&self) -> &[RenderedRange] {
        &self.ranges
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Returns `true` if the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Resolve a pointer position to the annotation under it.
    pub fn lookup(&self, point: DisplayPosition) -> Option<&RenderedRange> {
        let idx = self
            .ranges
            .partition_point(|range| range.display_range.start <= point);
        let candidate = self.ranges.get(idx.checked_sub(1)?)?;
        candidate.display_range.contains(point).then_some(candidate)
    }

    /// Resolve a decoration range (as reported by a hit test) to its entry.
    pub fn lookup_decoration(&self, range: &DisplayRange) -> Option<&RenderedRange> {
        self.ranges
            .iter()
            .find(|entry| entry.display_range == *range)
    }

    /// Decorations marking every entry as clickable.
    pub fn decorations(&self) -> Vec<RangeDecoration> {
        self.ranges
            .iter()
            .map(|entry| RangeDecoration {
                range: entry.display_range,
                options: DecorationOptions {
                    inline_class_name: RANGE_DECORATION_CLASS.to_string(),
                },
            })
            .collect()
    }
}

/// The rendered token table together with its range index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTable {
    text: String,
    index: RangeIndex,
}

impl TokenTable {
    /// Render `tokens`, one per line, recording each `start..end` span as it is written.
    pub fn render(tokens: &[Token]) -> Self {
        let mut text = String::new();
        let mut ranges = Vec::with_capacity(tokens.len());

        for (line, token) in tokens.iter().enumerate() {
            if line > 0 {
                text.push('\n');
            }

            let prefix = format!(
                "{}, {}, ",
                Value::from(token.text.as_str()),
                Value::from(token.whitespace.as_str())
            );
            let annotation = token.byte_range().to_string();
            let start_col = utf16_len(&prefix);

            ranges.push(RenderedRange {
                display_range: DisplayRange::new(
                    DisplayPosition::new(line, start_col),
                    DisplayPosition::new(line, start_col + annotation.len()),
                ),
                byte_range: token.byte_range(),
            });

            text.push_str(&prefix);
            text.push_str(&annotation);
        }

        Self {
            text,
            index: RangeIndex { ranges },
        }
    }

    /// The rendered table text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The index of the rendered annotations.
    pub fn index(&self) -> &RangeIndex {
        &self.index
    }
}

fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, whitespace: &str, index: usize, start: usize) -> Token {
        Token {
            text: text.to_string(),
            whitespace: whitespace.to_string(),
            index,
            start,
            end: start + text.len(),
            punct: false,
            greek: true,
        }
    }

    #[test]
    fn test_render_layout() {
        let tokens = vec![token("Καλημέρα", " ", 0, 0), token("κόσμε", "", 1, 17)];
        let table = TokenTable::render(&tokens);
        assert_eq!(table.text(), "\"Καλημέρα\", \" \", 0..16\n\"κόσμε\", \"\", 17..27");

        let ranges = table.index().ranges();
        assert_eq!(ranges.len(), 2);
        // `"Καλημέρα", " ", ` is 17 code units.
        assert_eq!(
            ranges[0].display_range,
            DisplayRange::new(DisplayPosition::new(0, 17), DisplayPosition::new(0, 22))
        );
        assert_eq!(ranges[1].byte_range, ByteRange::new(17, 27));
    }

    #[test]
    fn test_scan_matches_render_for_plain_tokens() {
        let tokens = vec![token("α", " ", 0, 0), token(",", "\n", 1, 3)];
        let table = TokenTable::render(&tokens);
        assert_eq!(RangeIndex::scan_rendered(table.text()), *table.index());
    }

    #[test]
    fn test_lookup_before_first_entry() {
        let index = RangeIndex::scan_rendered("x 1..2");
        assert!(index.lookup(DisplayPosition::new(0, 0)).is_none());
        assert_eq!(
            index.lookup(DisplayPosition::new(0, 2)).map(|r| r.byte_range),
            Some(ByteRange::new(1, 2))
        );
    }

    #[test]
    fn test_scan_skips_overflowing_numbers() {
        let index = RangeIndex::scan_rendered("99999999999999999999999999..1\n3..4");
        assert_eq!(index.len(), 1);
        assert_eq!(index.ranges()[0].byte_range, ByteRange::new(3, 4));
    }
}
