//! The display surface seam.
//!
//! The surface (an editor widget, a web view, a terminal UI...) is external. This module only
//! defines what the refresh controller feeds into it. Every method replaces a complete set: the
//! surface never receives incremental additions, so stale overlay items cannot survive next to
//! fresh ones.

use crate::markers::Marker;
use crate::range_index::RangeDecoration;
use std::collections::BTreeMap;

/// Sink for rendered overlays.
pub trait DisplaySurface {
    /// Replace every marker owned by `owner` with `markers`, atomically.
    fn replace_markers(&mut self, owner: &str, markers: Vec<Marker>);

    /// Replace the inline-highlighted document markup.
    fn replace_inline_html(&mut self, html: String);

    /// Replace the token table text and all of its clickable decorations.
    fn replace_token_table(&mut self, text: &str, decorations: Vec<RangeDecoration>);

    /// Remove everything this core installed for `owner`.
    fn clear(&mut self, owner: &str);
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for &mut S {
    fn replace_markers(&mut self, owner: &str, markers: Vec<Marker>) {
        (**self).replace_markers(owner, markers);
    }

    fn replace_inline_html(&mut self, html: String) {
        (**self).replace_inline_html(html);
    }

    fn replace_token_table(&mut self, text: &str, decorations: Vec<RangeDecoration>) {
        (**self).replace_token_table(text, decorations);
    }

    fn clear(&mut self, owner: &str) {
        (**self).clear(owner);
    }
}

/// A headless in-memory surface.
///
/// Useful for tests and for hosts that pull overlays instead of receiving pushes.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    markers: BTreeMap<String, Vec<Marker>>,
    inline_html: Option<String>,
    token_table: String,
    decorations: Vec<RangeDecoration>,
    marker_batches: usize,
}

impl MemorySurface {
    /// An empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Markers currently installed for `owner`.
    pub fn markers(&self, owner: &str) -> &[Marker] {
        self.markers.get(owner).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of markers across all owners.
    pub fn marker_count(&self) -> usize {
        self.markers.values().map(Vec::len).sum()
    }

    /// How many marker batches have been installed.
    pub fn marker_batches(&self) -> usize {
        self.marker_batches
    }

    /// The installed inline markup, if any.
    pub fn inline_html(&self) -> Option<&str> {
        self.inline_html.as_deref()
    }

    /// The installed token table text.
    pub fn token_table(&self) -> &str {
        &self.token_table
    }

    /// The installed token table decorations.
    pub fn decorations(&self) -> &[RangeDecoration] {
        &self.decorations
    }
}

impl DisplaySurface for MemorySurface {
    fn replace_markers(&mut self, owner: &str, markers: Vec<Marker>) {
        self.marker_batches += 1;
        self.markers.insert(owner.to_string(), markers);
    }

    fn replace_inline_html(&mut self, html: String) {
        self.inline_html = Some(html);
    }

    fn replace_token_table(&mut self, text: &str, decorations: Vec<RangeDecoration>) {
        self.token_table = text.to_string();
        self.decorations = decorations;
    }

    fn clear(&mut self, owner: &str) {
        self.markers.remove(owner);
        self.inline_html = None;
        self.token_table.clear();
        self.decorations.clear();
    }
}
