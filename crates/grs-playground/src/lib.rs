#![warn(missing_docs)]
//! grs-playground - Position Mapping & Diagnostic Rendering Engine
//!
//! # Overview
//!
//! `grs-playground` is the presentation core of an interactive Greek text diagnostics
//! playground. An external analysis engine reports issues as **UTF-8 byte ranges**; this crate
//! turns them into something a display surface can show, and keeps that overlay correct while the
//! text changes.
//!
//! It does not draw anything itself. The host provides a [`DisplaySurface`] (an editor widget,
//! a web view, a terminal UI) and an [`AnalysisEngine`].
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Refresh Controller (versioned, per doc)    │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Markers / Inline spans / Range index       │  ← Rendering
//! ├─────────────────────────────────────────────┤
//! │  Offset conversion (bytes -> UTF-16 cols)   │  ← Coordinates
//! ├─────────────────────────────────────────────┤
//! │  Diagnostic + token model (byte offsets)    │  ← Data
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use grs_playground::{
//!     AnalysisConfig, AnalysisEngine, Diagnostic, DisplayPosition, MemorySurface,
//!     RefreshController, RuleKind, Token,
//! };
//!
//! struct Fixed;
//!
//! impl AnalysisEngine for Fixed {
//!     fn scan(&self, _text: &str, _config: &AnalysisConfig) -> Vec<Diagnostic> {
//!         // "λαθος " (bytes 0..11, trailing space included)
//!         vec![Diagnostic::new(RuleKind::MultisyllableNotAccented, 0, 11)]
//!     }
//!     fn tokenize(&self, _text: &str) -> Vec<Token> {
//!         Vec::new()
//!     }
//!     fn normalize(&self, text: &str) -> String {
//!         text.to_string()
//!     }
//! }
//!
//! let mut controller = RefreshController::new(Fixed, MemorySurface::new());
//! controller.on_text_changed("λαθος λεξη").unwrap();
//!
//! let markers = controller.surface().markers("owner");
//! assert_eq!(markers.len(), 1);
//! // The highlight stops before the trailing space.
//! assert_eq!(markers[0].end, DisplayPosition::new(0, 5));
//! ```
//!
//! # Module Description
//!
//! - [`diagnostics`] - Canonical diagnostic/token model in byte offsets
//! - [`offsets`] - Byte offset to display position conversion
//! - [`markup`] - Inline-span (HTML) rendering
//! - [`markers`] - Marker batch rendering
//! - [`range_index`] - Token table rendering and reverse range lookup
//! - [`refresh`] - Versioned refresh controller
//! - [`config`] - User settings with fallback to defaults
//! - [`engine`] - Analysis engine trait and one-shot initialization gate
//! - [`surface`] - Display surface trait and an in-memory surface
//!
//! # Unicode Support
//!
//! - Offsets from the engine are UTF-8 bytes; display columns are UTF-16 code units
//! - Offsets that split a character are rejected per diagnostic, never rendered

pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod markers;
pub mod markup;
pub mod offsets;
pub mod overlay;
pub mod range_index;
pub mod refresh;
pub mod surface;

pub use config::{AnalysisConfig, scan_with_settings};
pub use diagnostics::{ByteOffset, ByteRange, Diagnostic, RuleKind, Token, sort_by_start};
pub use engine::{AnalysisEngine, EngineGate, GateState};
pub use error::{OffsetFault, PlaygroundError, Result};
pub use markers::{Marker, MarkerSeverity, build_markers};
pub use markup::{InlineSegment, escape_html, inline_segments, render_inline_spans};
pub use offsets::{
    DisplayPosition, DisplayRange, OffsetConverter, OffsetCursor, convert_batch,
    to_display_position,
};
pub use overlay::{EditorOverlayState, OverlayChange, OverlayChangeCallback, OverlayChangeKind};
pub use range_index::{
    DecorationOptions, RANGE_DECORATION_CLASS, RangeDecoration, RangeIndex, RenderedRange,
    TokenTable,
};
pub use refresh::{
    AnalysisOutcome, AnalysisRequest, RefreshController, RefreshOptions, RefreshPhase,
    RenderMode, TextVersion,
};
pub use surface::{DisplaySurface, MemorySurface};
