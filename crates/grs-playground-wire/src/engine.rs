//! Adapting a JSON-speaking engine to [`AnalysisEngine`].

use crate::error::WireError;
use crate::shapes::{diagnostics_from_value, tokens_from_value};
use grs_playground::{AnalysisConfig, AnalysisEngine, Diagnostic, Token};
use serde_json::Value;
use tracing::warn;

/// An engine that exchanges JSON values (for instance, one behind a foreign-function boundary).
///
/// Payloads may use any shape accepted by [`crate::diagnostics_from_value`] and
/// [`crate::tokens_from_value`].
pub trait JsonAnalysisBackend {
    /// Scan `text`; `config` is the camelCase serialization of [`AnalysisConfig`].
    fn scan_json(&self, text: &str, config: &Value) -> Result<Value, WireError>;

    /// Tokenize `text`.
    fn tokenize_json(&self, text: &str) -> Result<Value, WireError>;

    /// Convert `text` towards monotonic orthography.
    fn normalize(&self, text: &str) -> String;
}

/// Wraps a [`JsonAnalysisBackend`] so it can drive a refresh controller.
///
/// Backend failures and unparseable payloads are logged and reported as "no results"; the
/// overlay is then simply cleared on the next render.
#[derive(Debug, Clone, Default)]
pub struct WireEngine<B> {
    backend: B,
}

impl<B: JsonAnalysisBackend> WireEngine<B> {
    /// Wrap `backend`.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Scan, surfacing backend and payload errors.
    pub fn try_scan(
        &self,
        text: &str,
        config: &AnalysisConfig,
    ) -> Result<Vec<Diagnostic>, WireError> {
        let config = serde_json::to_value(config)?;
        let payload = self.backend.scan_json(text, &config)?;
        diagnostics_from_value(&payload)
    }

    /// Tokenize, surfacing backend and payload errors.
    pub fn try_tokenize(&self, text: &str) -> Result<Vec<Token>, WireError> {
        let payload = self.backend.tokenize_json(text)?;
        tokens_from_value(&payload)
    }
}

impl<B: JsonAnalysisBackend> AnalysisEngine for WireEngine<B> {
    fn scan(&self, text: &str, config: &AnalysisConfig) -> Vec<Diagnostic> {
        self.try_scan(text, config).unwrap_or_else(|err| {
            warn!(%err, "engine scan failed");
            Vec::new()
        })
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.try_tokenize(text).unwrap_or_else(|err| {
            warn!(%err, "engine tokenize failed");
            Vec::new()
        })
    }

    fn normalize(&self, text: &str) -> String {
        self.backend.normalize(text)
    }
}
