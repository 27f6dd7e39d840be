//! Diagnostic refresh controller.
//!
//! One controller exists per open document. It moves through
//! `Idle -> Analyzing -> Rendering -> Idle` on every text or settings change:
//!
//! 1. [`RefreshController::request_text`] / [`RefreshController::request_settings`] record the
//!    change and hand out an [`AnalysisRequest`] tagged with a fresh [`TextVersion`].
//! 2. [`RefreshController::analyze`] runs the engine for a request.
//! 3. [`RefreshController::apply`] renders the outcome onto the surface, but only if no newer
//!    version has been requested in the meantime. Older outcomes are dropped
//!    ([`PlaygroundError::StaleResult`]), whatever order they complete in.
//!
//! In-flight work is never cancelled; staleness is decided purely by version.
//! [`RefreshController::on_text_changed`] runs all three steps synchronously.

use crate::config::AnalysisConfig;
use crate::diagnostics::{ByteRange, Diagnostic, Token, sort_by_start};
use crate::engine::AnalysisEngine;
use crate::error::{PlaygroundError, Result};
use crate::markers::build_markers;
use crate::markup::render_inline_spans;
use crate::offsets::DisplayPosition;
use crate::overlay::{EditorOverlayState, OverlayChange, OverlayChangeCallback, OverlayChangeKind};
use crate::range_index::{RenderedRange, TokenTable};
use crate::surface::DisplaySurface;
use std::fmt;
use tracing::{debug, trace, warn};

/// Monotonic version of a document's text (and settings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextVersion(pub u64);

impl fmt::Display for TextVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Controller phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    /// Nothing pending; the overlay matches the latest text.
    Idle,
    /// A newer version has been requested and its analysis has not been applied yet.
    Analyzing,
    /// An outcome is being rendered onto the surface.
    Rendering,
}

/// Which overlays the controller renders for the primary document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Editor markers only.
    #[default]
    Markers,
    /// Inline highlight markup only.
    InlineSpans,
    /// Both markers and inline markup.
    Both,
}

impl RenderMode {
    fn markers(self) -> bool {
        matches!(self, Self::Markers | Self::Both)
    }

    fn inline(self) -> bool {
        matches!(self, Self::InlineSpans | Self::Both)
    }
}

/// Controller options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOptions {
    /// Which overlays to render.
    pub render_mode: RenderMode,
    /// Owner tag of the marker batches this controller installs.
    pub marker_owner: String,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::default(),
            marker_owner: "owner".to_string(),
        }
    }
}

/// A version-tagged request to analyze one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    version: TextVersion,
    text: String,
    config: AnalysisConfig,
}

impl AnalysisRequest {
    /// The version this request was issued for.
    pub fn version(&self) -> TextVersion {
        self.version
    }

    /// The text to analyze.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The configuration in effect for this version.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

/// The analysis result for one request, still tagged with its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    version: TextVersion,
    text: String,
    config: AnalysisConfig,
    diagnostics: Vec<Diagnostic>,
    tokens: Vec<Token>,
}

impl AnalysisOutcome {
    /// Pair a request with results computed elsewhere (e.g. by an engine running off-thread).
    pub fn new(request: AnalysisRequest, diagnostics: Vec<Diagnostic>, tokens: Vec<Token>) -> Self {
        Self {
            version: request.version,
            text: request.text,
            config: request.config,
            diagnostics,
            tokens,
        }
    }

    /// The version this outcome was computed for.
    pub fn version(&self) -> TextVersion {
        self.version
    }

    /// Diagnostics as reported by the engine.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Tokens as reported by the engine.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

/// Orchestrates analysis and overlay rendering for one open document.
pub struct RefreshController<E, S> {
    engine: E,
    surface: S,
    options: RefreshOptions,
    phase: RefreshPhase,
    latest: TextVersion,
    text: String,
    settings: Option<String>,
    overlay: EditorOverlayState,
    callbacks: Vec<OverlayChangeCallback>,
}

impl<E, S> RefreshController<E, S>
where
    E: AnalysisEngine,
    S: DisplaySurface,
{
    /// Create a controller with default options.
    pub fn new(engine: E, surface: S) -> Self {
        Self::with_options(engine, surface, RefreshOptions::default())
    }

    /// Create a controller.
    pub fn with_options(engine: E, surface: S, options: RefreshOptions) -> Self {
        Self {
            engine,
            surface,
            options,
            phase: RefreshPhase::Idle,
            latest: TextVersion::default(),
            text: String::new(),
            settings: None,
            overlay: EditorOverlayState::default(),
            callbacks: Vec::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RefreshPhase {
        self.phase
    }

    /// The most recently requested version.
    pub fn latest_requested(&self) -> TextVersion {
        self.latest
    }

    /// The overlay currently on screen.
    pub fn overlay(&self) -> &EditorOverlayState {
        &self.overlay
    }

    /// The latest text handed to the controller.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The display surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Controller options.
    pub fn options(&self) -> &RefreshOptions {
        &self.options
    }

    /// Subscribe to overlay change notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&OverlayChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Record a text change and issue a request for it.
    pub fn request_text(&mut self, text: impl Into<String>) -> AnalysisRequest {
        self.text = text.into();
        self.issue_request()
    }

    /// Record a settings change and issue a request for the current text.
    pub fn request_settings(&mut self, settings: Option<&str>) -> AnalysisRequest {
        self.settings = settings.map(str::to_string);
        self.issue_request()
    }

    fn issue_request(&mut self) -> AnalysisRequest {
        self.latest = TextVersion(self.latest.0 + 1);
        self.set_phase(RefreshPhase::Analyzing);
        AnalysisRequest {
            version: self.latest,
            text: self.text.clone(),
            config: AnalysisConfig::from_optional(self.settings.as_deref()),
        }
    }

    /// Run the engine for `request`.
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        AnalysisOutcome {
            version: request.version,
            text: request.text.clone(),
            config: request.config.clone(),
            diagnostics: self.engine.scan(&request.text, &request.config),
            tokens: self.engine.tokenize(&request.text),
        }
    }

    /// Render `outcome` if it is still the newest requested version.
    ///
    /// Returns the applied version, or [`PlaygroundError::StaleResult`] if the outcome was
    /// dropped. A dropped outcome leaves the overlay untouched.
    pub fn apply(&mut self, outcome: AnalysisOutcome) -> Result<TextVersion> {
        let version = outcome.version;
        let already_shown = self
            .overlay
            .applied_version
            .is_some_and(|applied| applied >= version);
        if version != self.latest || already_shown {
            debug!(%version, latest = %self.latest, "dropping stale analysis result");
            self.notify(OverlayChangeKind::StaleDropped, version);
            return Err(PlaygroundError::StaleResult {
                version,
                latest: self.latest,
            });
        }

        self.set_phase(RefreshPhase::Rendering);
        self.render(outcome);
        self.set_phase(RefreshPhase::Idle);
        Ok(version)
    }

    fn render(&mut self, outcome: AnalysisOutcome) {
        let AnalysisOutcome {
            version,
            text,
            config,
            diagnostics,
            tokens,
        } = outcome;
        let trim = config.trim_trailing_space;

        let mut accepted = Vec::with_capacity(diagnostics.len());
        for diagnostic in sort_by_start(&diagnostics) {
            match diagnostic.validate(&text) {
                Ok(()) => accepted.push(diagnostic.clone()),
                Err(err) => warn!(kind = %diagnostic.kind, %err, "diagnostic left off the overlay"),
            }
        }

        if self.options.render_mode.markers() {
            let markers = build_markers(&text, &accepted, trim);
            self.surface
                .replace_markers(&self.options.marker_owner, markers.clone());
            self.overlay.markers = markers;
            self.notify(OverlayChangeKind::MarkersReplaced, version);
        }

        if self.options.render_mode.inline() {
            let html = render_inline_spans(&text, &accepted, trim);
            self.surface.replace_inline_html(html.clone());
            self.overlay.inline_html = Some(html);
            self.notify(OverlayChangeKind::InlineReplaced, version);
        }

        let table = TokenTable::render(&tokens);
        self.surface
            .replace_token_table(table.text(), table.index().decorations());
        self.overlay.token_table = table;
        self.notify(OverlayChangeKind::TokenTableReplaced, version);

        self.overlay.diagnostics = accepted;
        self.overlay.text = text;
        self.overlay.applied_version = Some(version);
    }

    /// Handle a text change end to end.
    pub fn on_text_changed(&mut self, text: impl Into<String>) -> Result<TextVersion> {
        let request = self.request_text(text);
        let outcome = self.analyze(&request);
        self.apply(outcome)
    }

    /// Handle a settings change end to end.
    pub fn on_settings_changed(&mut self, settings: Option<&str>) -> Result<TextVersion> {
        let request = self.request_settings(settings);
        let outcome = self.analyze(&request);
        self.apply(outcome)
    }

    /// Resolve a pointer position in the token table to the annotation under it.
    ///
    /// What to do with the resolved range (e.g. selecting it in the primary document) is up to
    /// the caller.
    pub fn lookup(&self, point: DisplayPosition) -> Option<&RenderedRange> {
        self.overlay.token_table.index().lookup(point)
    }

    /// Like [`RefreshController::lookup`], returning only the byte range.
    pub fn lookup_byte_range(&self, point: DisplayPosition) -> Option<ByteRange> {
        self.lookup(point).map(|entry| entry.byte_range)
    }

    /// Convert `text` towards monotonic orthography (on-demand action).
    pub fn normalize_text(&self, text: &str) -> String {
        self.engine.normalize(text)
    }

    /// Tear the controller down: clear all overlays and detach subscribers.
    pub fn close(mut self) -> S {
        self.surface.clear(&self.options.marker_owner);
        self.notify(OverlayChangeKind::Cleared, self.latest);
        self.callbacks.clear();
        self.surface
    }

    fn set_phase(&mut self, phase: RefreshPhase) {
        trace!(from = ?self.phase, to = ?phase, version = %self.latest, "refresh phase");
        self.phase = phase;
    }

    fn notify(&mut self, kind: OverlayChangeKind, version: TextVersion) {
        let change = OverlayChange { kind, version };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}
