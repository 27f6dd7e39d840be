//! Canonical diagnostic and token model.
//!
//! Everything here is expressed in **UTF-8 byte offsets**, exactly as the analysis engine reports
//! them. Only [`crate::offsets`] is allowed to turn a byte offset into a display coordinate.
//!
//! Engines that emit a different shape (for example `{range: {start, end}}`) are normalized at
//! the boundary (see the `grs-playground-wire` crate); the renderers only ever see [`Diagnostic`].

use crate::error::{OffsetFault, PlaygroundError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A count of UTF-8 bytes from the start of the text.
pub type ByteOffset = usize;

/// A half-open byte range (`start..end`) into the UTF-8 encoding of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    /// Range start (inclusive), in bytes.
    pub start: ByteOffset,
    /// Range end (exclusive), in bytes.
    pub end: ByteOffset,
}

impl ByteRange {
    /// Create a new byte range.
    pub fn new(start: ByteOffset, end: ByteOffset) -> Self {
        Self { start, end }
    }

    /// Length of the range in bytes (zero for reversed ranges).
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the range covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check that the range is ordered, in bounds and on character boundaries of `text`.
    pub fn validate(&self, text: &str) -> Result<()> {
        if self.start > self.end {
            return Err(PlaygroundError::invalid_offset(
                self.start,
                text.len(),
                OffsetFault::Reversed,
            ));
        }
        check_boundary(text, self.start)?;
        check_boundary(text, self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Verify that `offset` is a valid boundary inside `text` (end of text included).
pub fn check_boundary(text: &str, offset: ByteOffset) -> Result<()> {
    if offset > text.len() {
        return Err(PlaygroundError::invalid_offset(
            offset,
            text.len(),
            OffsetFault::OutOfBounds,
        ));
    }
    if !text.is_char_boundary(offset) {
        return Err(PlaygroundError::invalid_offset(
            offset,
            text.len(),
            OffsetFault::MidCharacter,
        ));
    }
    Ok(())
}

/// The closed set of rule identifiers an analysis engine may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// A word needs two accents (e.g. before an enclitic).
    MissingDoubleAccents,
    /// A capitalized word is missing its accent.
    MissingAccentCapital,
    /// The same word appears twice in a row.
    DuplicatedWord,
    /// A final `ν` should be added.
    AddFinalN,
    /// A final `ν` should be removed.
    RemoveFinalN,
    /// An outdated spelling of a word.
    OutdatedSpelling,
    /// A monosyllable carries an accent it should not.
    MonosyllableAccented,
    /// A word of two or more syllables carries no accent.
    MultisyllableNotAccented,
    /// A word mixes Greek and Latin letters.
    MixedScripts,
    /// A character that looks like a Greek one but is not.
    AmbiguousChar,
}

impl RuleKind {
    /// The rules an engine runs when no explicit rule list is configured.
    pub const DEFAULT_SET: &'static [RuleKind] = &[
        RuleKind::MissingDoubleAccents,
        RuleKind::MissingAccentCapital,
        RuleKind::DuplicatedWord,
        RuleKind::AddFinalN,
        RuleKind::RemoveFinalN,
        RuleKind::OutdatedSpelling,
        RuleKind::MonosyllableAccented,
        RuleKind::MultisyllableNotAccented,
        RuleKind::MixedScripts,
        RuleKind::AmbiguousChar,
    ];

    /// The snake_case identifier of the rule (also used as the tooltip text).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingDoubleAccents => "missing_double_accents",
            Self::MissingAccentCapital => "missing_accent_capital",
            Self::DuplicatedWord => "duplicated_word",
            Self::AddFinalN => "add_final_n",
            Self::RemoveFinalN => "remove_final_n",
            Self::OutdatedSpelling => "outdated_spelling",
            Self::MonosyllableAccented => "monosyllable_accented",
            Self::MultisyllableNotAccented => "multisyllable_not_accented",
            Self::MixedScripts => "mixed_scripts",
            Self::AmbiguousChar => "ambiguous_char",
        }
    }

    /// Look up a rule by its snake_case identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::DEFAULT_SET
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single issue reported by the analysis engine.
///
/// Produced fresh on every analysis call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Which rule fired.
    pub kind: RuleKind,
    /// Start of the offending text (inclusive), in bytes.
    pub start: ByteOffset,
    /// End of the offending text (exclusive), in bytes.
    pub end: ByteOffset,
    /// Suggested replacement text, if the rule has one.
    pub fix: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic without a fix.
    pub fn new(kind: RuleKind, start: ByteOffset, end: ByteOffset) -> Self {
        Self {
            kind,
            start,
            end,
            fix: None,
        }
    }

    /// Attach a suggested replacement.
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    /// The byte range this diagnostic was reported for.
    pub fn byte_range(&self) -> ByteRange {
        ByteRange::new(self.start, self.end)
    }

    /// Check the diagnostic against the text it was computed for.
    pub fn validate(&self, text: &str) -> Result<()> {
        self.byte_range().validate(text)
    }

    /// The end of the *visual* extent of this diagnostic.
    ///
    /// When `trim` is set and the byte just before `end` is a single space, the highlight stops
    /// one byte earlier so it does not cover the trailing space. The recorded byte range is left
    /// untouched. Assumes the diagnostic already passed [`Diagnostic::validate`].
    pub fn visual_end(&self, text: &str, trim: bool) -> ByteOffset {
        if trim && self.end > self.start && text.as_bytes().get(self.end - 1) == Some(&b' ') {
            self.end - 1
        } else {
            self.end
        }
    }

    /// The diagnostic pretty-printed for human inspection (marker hover text).
    pub fn describe(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

/// Sort diagnostics ascending by `start`.
///
/// The sort is stable: diagnostics sharing a start keep the order the engine reported them in.
/// Overlapping diagnostics are neither merged nor deduplicated.
pub fn sort_by_start(diagnostics: &[Diagnostic]) -> Vec<&Diagnostic> {
    let mut sorted: Vec<&Diagnostic> = diagnostics.iter().collect();
    sorted.sort_by_key(|diagnostic| diagnostic.start);
    sorted
}

/// One lexical unit plus its trailing whitespace, in original-text order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The unit itself.
    pub text: String,
    /// Whitespace following the unit.
    pub whitespace: String,
    /// Position of the token in the token stream.
    pub index: usize,
    /// Start of the unit (inclusive), in bytes.
    pub start: ByteOffset,
    /// End of the unit (exclusive), in bytes.
    pub end: ByteOffset,
    /// Whether the unit is punctuation.
    pub punct: bool,
    /// Whether the unit is written in Greek script.
    pub greek: bool,
}

impl Token {
    /// The byte range of the unit.
    pub fn byte_range(&self) -> ByteRange {
        ByteRange::new(self.start, self.end)
    }
}
