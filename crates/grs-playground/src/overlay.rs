//! Per-document overlay state and change notifications.

use crate::diagnostics::Diagnostic;
use crate::markers::Marker;
use crate::range_index::TokenTable;
use crate::refresh::TextVersion;

/// What the overlay of one open document currently shows.
///
/// Only the refresh controller writes to it; everything in here was computed from the text of
/// [`EditorOverlayState::applied_version`].
#[derive(Debug, Clone, Default)]
pub struct EditorOverlayState {
    pub(crate) applied_version: Option<TextVersion>,
    pub(crate) text: String,
    pub(crate) diagnostics: Vec<Diagnostic>,
    pub(crate) markers: Vec<Marker>,
    pub(crate) inline_html: Option<String>,
    pub(crate) token_table: TokenTable,
}

impl EditorOverlayState {
    /// The text version the overlay was rendered from (`None` before the first render).
    pub fn applied_version(&self) -> Option<TextVersion> {
        self.applied_version
    }

    /// The text the overlay was rendered from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The diagnostics that made it onto the overlay, sorted by start.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The last marker batch.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The last inline markup, when inline rendering is enabled.
    pub fn inline_html(&self) -> Option<&str> {
        self.inline_html.as_deref()
    }

    /// The rendered token table and its range index.
    pub fn token_table(&self) -> &TokenTable {
        &self.token_table
    }
}

/// Overlay change types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayChangeKind {
    /// A new marker batch was installed.
    MarkersReplaced,
    /// New inline markup was installed.
    InlineReplaced,
    /// The token table and its range index were rebuilt.
    TokenTableReplaced,
    /// A result for an outdated text version was discarded.
    StaleDropped,
    /// Every overlay was removed (document closed).
    Cleared,
}

/// Overlay change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayChange {
    /// Change type.
    pub kind: OverlayChangeKind,
    /// The text version the change concerns.
    pub version: TextVersion,
}

/// Overlay change callback function type.
pub type OverlayChangeCallback = Box<dyn FnMut(&OverlayChange) + Send>;
