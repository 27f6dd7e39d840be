#![warn(missing_docs)]
//! `grs-playground-wire` - JSON boundary for `grs-playground`.
//!
//! Analysis engines that live behind a serialization boundary report diagnostics and tokens as
//! JSON, and not always in the same shape. This crate normalizes those payloads into
//! [`grs_playground::Diagnostic`] / [`grs_playground::Token`] and adapts such an engine to
//! [`grs_playground::AnalysisEngine`] via [`WireEngine`].
//!
//! It parses `serde_json::Value` directly instead of deriving the engine's types, so one parser
//! covers every payload variant.

pub mod engine;
pub mod error;
pub mod shapes;

pub use engine::{JsonAnalysisBackend, WireEngine};
pub use error::WireError;
pub use shapes::{
    diagnostics_from_str, diagnostics_from_value, parse_diagnostic, parse_rule_kind, parse_token,
    pascal_to_snake, tokens_from_value,
};
