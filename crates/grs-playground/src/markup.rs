//! Inline-span rendering of diagnostics.
//!
//! The text is cut into literal and highlighted segments (byte slices of the original text),
//! then serialized as HTML:
//!
//! ```text
//! literal <span class='underline' title='<kind>'>highlighted</span> literal<br>next line
//! ```
//!
//! Concatenating the segments always reproduces the input exactly. Diagnostics are visited in
//! ascending `start` order; a diagnostic that overlaps an earlier one only highlights the part
//! that was not already consumed, so no byte is ever emitted twice.

use crate::diagnostics::{Diagnostic, RuleKind, sort_by_start};
use tracing::warn;

/// Line-break marker understood by the display surface.
pub const LINE_BREAK: &str = "<br>";

/// A piece of the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineSegment<'a> {
    /// Text copied verbatim.
    Literal(&'a str),
    /// Text wrapped in a highlight span.
    Highlight {
        /// The rule the highlight stands for (rendered as the tooltip).
        kind: RuleKind,
        /// The highlighted text.
        text: &'a str,
    },
}

impl<'a> InlineSegment<'a> {
    /// The original text covered by this segment.
    pub fn text(&self) -> &'a str {
        match self {
            Self::Literal(text) => text,
            Self::Highlight { text, .. } => text,
        }
    }
}

/// Split `text` into literal and highlighted segments.
///
/// Diagnostics that do not fit `text` (out of bounds, reversed, or splitting a character) are
/// skipped individually; the rest are still rendered.
pub fn inline_segments<'a>(
    text: &'a str,
    diagnostics: &[Diagnostic],
    trim_trailing_space: bool,
) -> Vec<InlineSegment<'a>> {
    let mut segments = Vec::with_capacity(diagnostics.len() * 2 + 1);
    let mut cursor = 0;

    for diagnostic in sort_by_start(diagnostics) {
        if let Err(err) = diagnostic.validate(text) {
            warn!(kind = %diagnostic.kind, %err, "skipping diagnostic");
            continue;
        }

        let start = diagnostic.start.max(cursor);
        let end = diagnostic.visual_end(text, trim_trailing_space).max(start);

        if start > cursor {
            segments.push(InlineSegment::Literal(&text[cursor..start]));
        }
        segments.push(InlineSegment::Highlight {
            kind: diagnostic.kind,
            text: &text[start..end],
        });
        cursor = end;
    }

    if cursor < text.len() {
        segments.push(InlineSegment::Literal(&text[cursor..]));
    }

    segments
}

/// Serialize segments as markup safe to inject into the display surface.
pub fn segments_to_html(segments: &[InlineSegment<'_>]) -> String {
    let mut html = String::new();
    for segment in segments {
        match segment {
            InlineSegment::Literal(text) => push_escaped(&mut html, text),
            InlineSegment::Highlight { kind, text } => {
                html.push_str("<span class='underline' title='");
                push_escaped(&mut html, kind.as_str());
                html.push_str("'>");
                push_escaped(&mut html, text);
                html.push_str("</span>");
            }
        }
    }
    html
}

/// Render `text` with every valid diagnostic wrapped in a highlight span.
pub fn render_inline_spans(
    text: &str,
    diagnostics: &[Diagnostic],
    trim_trailing_space: bool,
) -> String {
    segments_to_html(&inline_segments(text, diagnostics, trim_trailing_space))
}

/// Escape `text` for HTML and substitute line breaks.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str(LINE_BREAK),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(segments: &[InlineSegment<'_>]) -> String {
        segments.iter().map(InlineSegment::text).collect()
    }

    #[test]
    fn test_adjacent_and_zero_width_segments() {
        let text = "αβγδ";
        let diagnostics = vec![
            Diagnostic::new(RuleKind::MixedScripts, 2, 4),
            Diagnostic::new(RuleKind::AmbiguousChar, 0, 2),
            Diagnostic::new(RuleKind::DuplicatedWord, 4, 4),
        ];
        let segments = inline_segments(text, &diagnostics, true);
        assert_eq!(
            segments,
            vec![
                InlineSegment::Highlight {
                    kind: RuleKind::AmbiguousChar,
                    text: "α"
                },
                InlineSegment::Highlight {
                    kind: RuleKind::MixedScripts,
                    text: "β"
                },
                InlineSegment::Highlight {
                    kind: RuleKind::DuplicatedWord,
                    text: ""
                },
                InlineSegment::Literal("γδ"),
            ]
        );
        assert_eq!(concat(&segments), text);
    }

    #[test]
    fn test_overlap_is_not_duplicated() {
        let text = "abcdefgh";
        let diagnostics = vec![
            Diagnostic::new(RuleKind::MixedScripts, 1, 5),
            Diagnostic::new(RuleKind::DuplicatedWord, 3, 7),
            Diagnostic::new(RuleKind::AmbiguousChar, 2, 4),
        ];
        let segments = inline_segments(text, &diagnostics, false);
        assert_eq!(concat(&segments), text);
        assert_eq!(
            segments,
            vec![
                InlineSegment::Literal("a"),
                InlineSegment::Highlight {
                    kind: RuleKind::MixedScripts,
                    text: "bcde"
                },
                InlineSegment::Highlight {
                    kind: RuleKind::AmbiguousChar,
                    text: ""
                },
                InlineSegment::Highlight {
                    kind: RuleKind::DuplicatedWord,
                    text: "fg"
                },
                InlineSegment::Literal("h"),
            ]
        );
    }

    #[test]
    fn test_invalid_diagnostic_is_skipped() {
        let text = "αβ";
        let diagnostics = vec![
            Diagnostic::new(RuleKind::MixedScripts, 1, 2),
            Diagnostic::new(RuleKind::DuplicatedWord, 2, 4),
            Diagnostic::new(RuleKind::AmbiguousChar, 0, 40),
        ];
        let segments = inline_segments(text, &diagnostics, true);
        assert_eq!(
            segments,
            vec![
                InlineSegment::Literal("α"),
                InlineSegment::Highlight {
                    kind: RuleKind::DuplicatedWord,
                    text: "β"
                },
            ]
        );
    }

    #[test]
    fn test_html_escaping_and_line_breaks() {
        let text = "a<b>\n'c'";
        let diagnostics = vec![Diagnostic::new(RuleKind::MixedScripts, 1, 4)];
        assert_eq!(
            render_inline_spans(text, &diagnostics, true),
            "a<span class='underline' title='mixed_scripts'>&lt;b&gt;</span><br>&#39;c&#39;"
        );
    }
}
