//! Normalization of engine payloads into the canonical model.
//!
//! Engines have reported diagnostics in more than one shape over time:
//!
//! ```text
//! { "kind": "duplicated_word", "start": 4, "end": 9, "fix": "λέξη" }
//! { "kind": "DuplicatedWord", "range": {"start": 4, "end": 9}, "fix": {"replacement": " λέξη"} }
//! ```
//!
//! Both are accepted here and turned into [`Diagnostic`]. Kinds may be PascalCase or snake_case;
//! fixes are trimmed. Nothing past this module needs to know about the variants.

use crate::error::{WireError, json_type_name};
use grs_playground::{Diagnostic, RuleKind, Token};
use serde_json::Value;
use tracing::warn;

/// Convert a PascalCase identifier to snake_case (`DuplicatedWord` -> `duplicated_word`).
pub fn pascal_to_snake(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i != 0 {
                snake.push('_');
            }
            snake.extend(c.to_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

/// Resolve a rule name in either casing.
pub fn parse_rule_kind(name: &str) -> Option<RuleKind> {
    RuleKind::from_name(name).or_else(|| RuleKind::from_name(&pascal_to_snake(name)))
}

fn parse_offset(value: &Value, field: &'static str) -> Result<usize, WireError> {
    let value = value.get(field).ok_or(WireError::MissingField(field))?;
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| WireError::InvalidField {
            field,
            message: format!("expected a non-negative integer, found {}", json_type_name(value)),
        })
}

fn parse_range(value: &Value) -> Result<(usize, usize), WireError> {
    let holder = value.get("range").unwrap_or(value);
    Ok((parse_offset(holder, "start")?, parse_offset(holder, "end")?))
}

fn parse_fix(value: Option<&Value>) -> Result<Option<String>, WireError> {
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.as_str(),
        Some(other) => other
            .get("replacement")
            .and_then(Value::as_str)
            .ok_or_else(|| WireError::InvalidField {
                field: "fix",
                message: format!(
                    "expected a string or {{replacement}}, found {}",
                    json_type_name(other)
                ),
            })?,
    };
    Ok(Some(text.trim().to_string()))
}

/// Parse one diagnostic in any supported shape.
pub fn parse_diagnostic(value: &Value) -> Result<Diagnostic, WireError> {
    let kind_name = value
        .get("kind")
        .ok_or(WireError::MissingField("kind"))?
        .as_str()
        .ok_or_else(|| WireError::InvalidField {
            field: "kind",
            message: "expected a string".to_string(),
        })?;
    let kind = parse_rule_kind(kind_name).ok_or_else(|| WireError::InvalidField {
        field: "kind",
        message: format!("unknown rule '{kind_name}'"),
    })?;
    let (start, end) = parse_range(value)?;

    Ok(Diagnostic {
        kind,
        start,
        end,
        fix: parse_fix(value.get("fix"))?,
    })
}

fn expect_array(value: &Value) -> Result<&[Value], WireError> {
    match value {
        Value::Null => Ok(&[]),
        Value::Array(items) => Ok(items),
        other => Err(WireError::NotAnArray(json_type_name(other))),
    }
}

/// Parse a diagnostic list (`Diagnostic[] | null`).
///
/// Malformed entries are skipped individually; only a payload that is not a list at all is an
/// error.
pub fn diagnostics_from_value(value: &Value) -> Result<Vec<Diagnostic>, WireError> {
    let items = expect_array(value)?;
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match parse_diagnostic(item) {
            Ok(diagnostic) => out.push(diagnostic),
            Err(err) => warn!(index = i, %err, "skipping malformed diagnostic"),
        }
    }
    Ok(out)
}

/// Parse a diagnostic list from JSON text.
pub fn diagnostics_from_str(json: &str) -> Result<Vec<Diagnostic>, WireError> {
    diagnostics_from_value(&serde_json::from_str(json)?)
}

fn parse_string(value: &Value, field: &'static str) -> Result<String, WireError> {
    match value.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(WireError::InvalidField {
            field,
            message: format!("expected a string, found {}", json_type_name(other)),
        }),
    }
}

fn parse_flag(value: &Value, field: &'static str) -> bool {
    value.get(field).and_then(Value::as_bool).unwrap_or(false)
}

/// Parse one token (`{text, whitespace, index, start, end | range, punct, greek}`).
///
/// A missing `index` defaults to `fallback_index`.
pub fn parse_token(value: &Value, fallback_index: usize) -> Result<Token, WireError> {
    let (start, end) = parse_range(value)?;
    let index = match value.get("index") {
        None => fallback_index,
        Some(_) => parse_offset(value, "index")?,
    };

    Ok(Token {
        text: parse_string(value, "text")?,
        whitespace: parse_string(value, "whitespace")?,
        index,
        start,
        end,
        punct: parse_flag(value, "punct"),
        greek: parse_flag(value, "greek"),
    })
}

/// Parse a token list (`Token[] | null`), skipping malformed entries.
pub fn tokens_from_value(value: &Value) -> Result<Vec<Token>, WireError> {
    let items = expect_array(value)?;
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match parse_token(item, i) {
            Ok(token) => out.push(token),
            Err(err) => warn!(index = i, %err, "skipping malformed token"),
        }
    }
    Ok(out)
}
