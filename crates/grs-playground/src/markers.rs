//! Marker-mode rendering of diagnostics.
//!
//! Each diagnostic becomes one [`Marker`] with display-surface coordinates. Markers are always
//! produced and installed as a complete batch for a document; see
//! [`DisplaySurface::replace_markers`](crate::surface::DisplaySurface::replace_markers).

use crate::diagnostics::{Diagnostic, sort_by_start};
use crate::offsets::{DisplayPosition, convert_batch};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Marker severity levels understood by the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerSeverity {
    /// Hint markers.
    Hint,
    /// Informational markers.
    Info,
    /// Warning markers.
    Warning,
    /// Error markers.
    Error,
}

/// A structured annotation attached to a display range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "MarkerRecord", from = "MarkerRecord")]
pub struct Marker {
    /// Start of the underlined range (inclusive).
    pub start: DisplayPosition,
    /// End of the underlined range (exclusive).
    pub end: DisplayPosition,
    /// Hover text: the diagnostic rendered for human inspection.
    pub message: String,
    /// Marker severity.
    pub severity: MarkerSeverity,
}

/// Flat wire shape: `{startLine, startCol, endLine, endCol, message, severity}`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkerRecord {
    start_line: usize,
    start_col: usize,
    end_line: usize,
    end_col: usize,
    message: String,
    severity: MarkerSeverity,
}

impl From<Marker> for MarkerRecord {
    fn from(marker: Marker) -> Self {
        Self {
            start_line: marker.start.line,
            start_col: marker.start.column,
            end_line: marker.end.line,
            end_col: marker.end.column,
            message: marker.message,
            severity: marker.severity,
        }
    }
}

impl From<MarkerRecord> for Marker {
    fn from(record: MarkerRecord) -> Self {
        Self {
            start: DisplayPosition::new(record.start_line, record.start_col),
            end: DisplayPosition::new(record.end_line, record.end_col),
            message: record.message,
            severity: record.severity,
        }
    }
}

/// Convert diagnostics into markers, in ascending `start` order.
///
/// All offsets share a single scan of `text`. Diagnostics whose range does not fit `text` are
/// skipped individually. The marker end honours the trailing-space trim; the message keeps the
/// diagnostic's original byte range.
pub fn build_markers(
    text: &str,
    diagnostics: &[Diagnostic],
    trim_trailing_space: bool,
) -> Vec<Marker> {
    let mut accepted = Vec::with_capacity(diagnostics.len());
    for diagnostic in sort_by_start(diagnostics) {
        match diagnostic.validate(text) {
            Ok(()) => accepted.push(diagnostic),
            Err(err) => warn!(kind = %diagnostic.kind, %err, "skipping diagnostic"),
        }
    }

    let offsets: Vec<usize> = accepted
        .iter()
        .flat_map(|d| [d.start, d.visual_end(text, trim_trailing_space)])
        .collect();
    let positions = convert_batch(text, &offsets);

    let mut markers = Vec::with_capacity(accepted.len());
    for (diagnostic, pair) in accepted.into_iter().zip(positions.chunks_exact(2)) {
        let (Ok(start), Ok(end)) = (&pair[0], &pair[1]) else {
            continue;
        };
        markers.push(Marker {
            start: *start,
            end: *end,
            message: diagnostic.describe(),
            severity: MarkerSeverity::Error,
        });
    }
    markers
}
