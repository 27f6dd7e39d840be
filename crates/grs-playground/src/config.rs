//! User-editable analysis settings.
//!
//! Settings arrive as free-form JSON typed by the user. A settings document that fails to parse
//! must never block highlighting, so [`AnalysisConfig::from_settings`] falls back to the default
//! configuration instead of failing.

use crate::diagnostics::{Diagnostic, RuleKind};
use crate::engine::AnalysisEngine;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Analysis and rendering settings.
///
/// Unknown fields are ignored; missing fields take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Restrict analysis to these rules. `None` runs [`RuleKind::DEFAULT_SET`].
    pub rules: Option<Vec<RuleKind>>,
    /// Keep highlights off a single trailing space.
    pub trim_trailing_space: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rules: None,
            trim_trailing_space: true,
        }
    }
}

impl AnalysisConfig {
    /// Parse settings strictly.
    ///
    /// Blank settings and a JSON `null` mean "no custom configuration".
    pub fn parse(settings: &str) -> Result<Self> {
        if settings.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_json::from_str::<Value>(settings)? {
            Value::Null => Ok(Self::default()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    /// Parse settings, substituting the default configuration when they are malformed.
    pub fn from_settings(settings: &str) -> Self {
        Self::parse(settings).unwrap_or_else(|err| {
            warn!(%err, "ignoring malformed settings");
            Self::default()
        })
    }

    /// Like [`AnalysisConfig::from_settings`], treating missing settings as defaults.
    pub fn from_optional(settings: Option<&str>) -> Self {
        settings.map(Self::from_settings).unwrap_or_default()
    }

    /// The rules an engine should run.
    pub fn enabled_rules(&self) -> &[RuleKind] {
        self.rules.as_deref().unwrap_or(RuleKind::DEFAULT_SET)
    }

    /// Returns `true` if `kind` should be reported.
    pub fn is_enabled(&self, kind: RuleKind) -> bool {
        self.enabled_rules().contains(&kind)
    }
}

/// Scan `text` with settings that may be missing or malformed.
///
/// `scan_with_settings(engine, text, Some("{not json"))` behaves exactly like
/// `scan_with_settings(engine, text, None)`.
pub fn scan_with_settings<E>(engine: &E, text: &str, settings: Option<&str>) -> Vec<Diagnostic>
where
    E: AnalysisEngine + ?Sized,
{
    engine.scan(text, &AnalysisConfig::from_optional(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert!(config.trim_trailing_space);
        assert_eq!(config.enabled_rules(), RuleKind::DEFAULT_SET);
    }

    #[test]
    fn test_parse_rules_and_flags() {
        let config = AnalysisConfig::parse(
            r#"{"rules": ["duplicated_word", "mixed_scripts"], "trimTrailingSpace": false, "x": 1}"#,
        )
        .unwrap();
        assert_eq!(
            config.enabled_rules(),
            &[RuleKind::DuplicatedWord, RuleKind::MixedScripts]
        );
        assert!(!config.trim_trailing_space);
        assert!(!config.is_enabled(RuleKind::AmbiguousChar));
    }

    #[test]
    fn test_blank_and_null_settings_are_default() {
        assert_eq!(AnalysisConfig::parse("").unwrap(), AnalysisConfig::default());
        assert_eq!(AnalysisConfig::parse("  \n").unwrap(), AnalysisConfig::default());
        assert_eq!(AnalysisConfig::parse("null").unwrap(), AnalysisConfig::default());
        assert_eq!(AnalysisConfig::parse("{}").unwrap(), AnalysisConfig::default());
    }

    #[test]
    fn test_malformed_settings_fall_back() {
        assert!(AnalysisConfig::parse("{not json").is_err());
        assert!(AnalysisConfig::parse(r#"{"rules": ["no_such_rule"]}"#).is_err());
        assert_eq!(
            AnalysisConfig::from_settings("{not json"),
            AnalysisConfig::default()
        );
        assert_eq!(
            AnalysisConfig::from_settings("[1, 2]"),
            AnalysisConfig::default()
        );
        assert_eq!(AnalysisConfig::from_optional(None), AnalysisConfig::default());
    }
}
