//! Regex tokenizer: words and single punctuation marks, each with its trailing whitespace.

use crate::letters::is_greek_letter;
use grs_playground::Token;
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<unit>[\p{L}\p{M}\p{N}]+|[^\p{L}\p{M}\p{N}\s])(?P<ws>\s*)")
        .expect("token pattern is a valid regex")
});

/// Split `text` into tokens. Offsets are UTF-8 bytes into `text`.
pub fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_PATTERN
        .captures_iter(text)
        .enumerate()
        .filter_map(|(index, caps)| {
            let unit = caps.name("unit")?;
            let whitespace = caps.name("ws").map_or("", |m| m.as_str());
            let word = unit.as_str();
            Some(Token {
                text: word.to_string(),
                whitespace: whitespace.to_string(),
                index,
                start: unit.start(),
                end: unit.end(),
                punct: !word.chars().any(char::is_alphanumeric),
                greek: word.chars().any(is_greek_letter),
            })
        })
        .collect()
}
