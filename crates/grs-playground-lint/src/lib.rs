#![warn(missing_docs)]
//! `grs-playground-lint` - A small regex-based analysis engine for `grs-playground`.
//!
//! This crate is intended for offline use, demos and tests, where a full grammar engine is
//! unavailable. It implements a subset of the rules (duplicated words, mixed scripts, accent
//! placement on mono/multisyllables, ambiguous characters) with simple heuristics, plus
//! polytonic to monotonic normalization. It is *not* a replacement for a real grammar checker.

pub mod letters;
pub mod monotonic;
pub mod rules;
pub mod tokenize;

use grs_playground::{AnalysisConfig, AnalysisEngine, Diagnostic, Token};
use tracing::trace;

pub use monotonic::to_monotonic;
pub use tokenize::tokenize;

/// A heuristic Greek analysis engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleEngine;

impl SimpleEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }
}

impl AnalysisEngine for SimpleEngine {
    fn scan(&self, text: &str, config: &AnalysisConfig) -> Vec<Diagnostic> {
        let tokens = tokenize(text);
        let diagnostics = rules::run(text, &tokens, config);
        trace!(
            tokens = tokens.len(),
            diagnostics = diagnostics.len(),
            "scanned text"
        );
        diagnostics
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize(text)
    }

    fn normalize(&self, text: &str) -> String {
        to_monotonic(text)
    }
}
