//! The analysis engine seam and its one-shot initialization gate.

use crate::config::AnalysisConfig;
use crate::diagnostics::{Diagnostic, Token};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// An analysis engine: a pure, synchronous function of its input.
///
/// Implementations report ranges in UTF-8 byte offsets into the text they were given.
pub trait AnalysisEngine {
    /// Report diagnostics for `text`.
    fn scan(&self, text: &str, config: &AnalysisConfig) -> Vec<Diagnostic>;

    /// Split `text` into tokens, in original-text order.
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Convert `text` towards monotonic orthography.
    fn normalize(&self, text: &str) -> String;
}

impl<E: AnalysisEngine + ?Sized> AnalysisEngine for &E {
    fn scan(&self, text: &str, config: &AnalysisConfig) -> Vec<Diagnostic> {
        (**self).scan(text, config)
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }

    fn normalize(&self, text: &str) -> String {
        (**self).normalize(text)
    }
}

impl<E: AnalysisEngine + ?Sized> AnalysisEngine for Box<E> {
    fn scan(&self, text: &str, config: &AnalysisConfig) -> Vec<Diagnostic> {
        (**self).scan(text, config)
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }

    fn normalize(&self, text: &str) -> String {
        (**self).normalize(text)
    }
}

impl<E: AnalysisEngine + ?Sized> AnalysisEngine for Arc<E> {
    fn scan(&self, text: &str, config: &AnalysisConfig) -> Vec<Diagnostic> {
        (**self).scan(text, config)
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }

    fn normalize(&self, text: &str) -> String {
        (**self).normalize(text)
    }
}

/// Lifecycle of an [`EngineGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Nobody asked for the engine yet.
    Uninitialized,
    /// The first caller is running the initializer.
    Initializing,
    /// The engine is available.
    Ready,
}

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const READY: u8 = 2;

/// A process-wide, initialize-once holder for an engine.
///
/// [`EngineGate::ensure_ready`] is idempotent: the first caller runs the initializer, concurrent
/// callers block on that same initialization, and later callers get the stored engine.
///
/// ```rust
/// use grs_playground::EngineGate;
///
/// static GATE: EngineGate<String> = EngineGate::new();
///
/// let first = GATE.ensure_ready(|| "engine".to_string());
/// let second = GATE.ensure_ready(|| unreachable!());
/// assert!(std::ptr::eq(first, second));
/// ```
#[derive(Debug)]
pub struct EngineGate<E> {
    engine: OnceLock<E>,
    state: AtomicU8,
}

impl<E> EngineGate<E> {
    /// Create an uninitialized gate.
    pub const fn new() -> Self {
        Self {
            engine: OnceLock::new(),
            state: AtomicU8::new(UNINITIALIZED),
        }
    }

    /// Return the engine, running `init` first if nobody has yet.
    pub fn ensure_ready<F>(&self, init: F) -> &E
    where
        F: FnOnce() -> E,
    {
        let engine = self.engine.get_or_init(|| {
            self.state.store(INITIALIZING, Ordering::Release);
            let _reset = ResetOnUnwind(&self.state);
            init()
        });
        self.state.store(READY, Ordering::Release);
        engine
    }

    /// The engine, if it is ready.
    pub fn get(&self) -> Option<&E> {
        self.engine.get()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GateState {
        if self.engine.get().is_some() {
            return GateState::Ready;
        }
        match self.state.load(Ordering::Acquire) {
            INITIALIZING => GateState::Initializing,
            READY => GateState::Ready,
            _ => GateState::Uninitialized,
        }
    }
}

/// Puts a gate back to `UNINITIALIZED` when its initializer panics.
struct ResetOnUnwind<'a>(&'a AtomicU8);

impl Drop for ResetOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.store(UNINITIALIZED, Ordering::Release);
        }
    }
}

impl<E> Default for EngineGate<E> {
    fn default() -> Self {
        Self::new()
    }
}
