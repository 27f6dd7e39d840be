//! The rules [`crate::SimpleEngine`] implements.
//!
//! Each rule looks at the token stream (and, for character-level rules, the raw text) and
//! reports byte ranges. Rules that the configuration disables are never run.

use crate::letters::{
    has_accent, is_all_caps, is_greek_letter, is_latin_letter, is_needlessly_accented,
    strip_accent, syllable_count,
};
use grs_playground::{AnalysisConfig, Diagnostic, RuleKind, Token};

/// Unaccented words that read as one syllable despite two written vowels.
const SYNIZESIS: &[&str] = &[
    "για", "μια", "μιας", "πια", "γεια", "ποιος", "ποια", "ποιο", "ποιοι", "ποιες", "ποιου",
    "ποιον", "ποιων", "ποιας",
];

/// Characters that are easily confused with Greek ones, and their intended replacement.
const AMBIGUOUS_CHARS: &[(char, &str)] = &[
    ('\u{00B5}', "μ"),  // micro sign
    ('\u{037E}', ";"),  // Greek question mark
    ('\u{0387}', "·"), // Greek ano teleia
];

/// Latin letters with a Greek lookalike.
fn greek_lookalike(c: char) -> Option<char> {
    Some(match c {
        'A' => 'Α',
        'B' => 'Β',
        'E' => 'Ε',
        'Z' => 'Ζ',
        'H' => 'Η',
        'I' => 'Ι',
        'K' => 'Κ',
        'M' => 'Μ',
        'N' => 'Ν',
        'O' => 'Ο',
        'P' => 'Ρ',
        'T' => 'Τ',
        'X' => 'Χ',
        'Y' => 'Υ',
        'a' => 'α',
        'i' => 'ι',
        'k' => 'κ',
        'o' => 'ο',
        'p' => 'ρ',
        'u' => 'υ',
        'v' => 'ν',
        'x' => 'χ',
        _ => return None,
    })
}

fn greek_equivalent(c: char) -> Option<char> {
    if is_latin_letter(c) {
        greek_lookalike(c)
    } else {
        Some(c)
    }
}

/// Run every enabled rule over `tokens` (produced from `text`).
pub fn run(text: &str, tokens: &[Token], config: &AnalysisConfig) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if config.is_enabled(RuleKind::DuplicatedWord) {
        duplicated_words(tokens, &mut out);
    }
    for token in tokens.iter().filter(|t| !t.punct) {
        if config.is_enabled(RuleKind::MixedScripts) {
            mixed_scripts(token, &mut out);
        }
        if config.is_enabled(RuleKind::MonosyllableAccented) {
            monosyllable_accented(token, &mut out);
        }
        if config.is_enabled(RuleKind::MultisyllableNotAccented) {
            multisyllable_not_accented(token, &mut out);
        }
    }
    if config.is_enabled(RuleKind::AmbiguousChar) {
        ambiguous_chars(text, &mut out);
    }
    out.sort_by_key(|d| d.start);
    out
}

/// The same word twice in a row on one line. Covers the first occurrence and its whitespace.
fn duplicated_words(tokens: &[Token], out: &mut Vec<Diagnostic>) {
    for pair in tokens.windows(2) {
        let [prev, cur] = pair else { continue };
        if prev.punct || cur.punct || prev.whitespace.is_empty() || prev.whitespace.contains('\n') {
            continue;
        }
        if prev.text.to_lowercase() == cur.text.to_lowercase() {
            let diagnostic = Diagnostic::new(RuleKind::DuplicatedWord, prev.start, cur.start);
            out.push(diagnostic.with_fix(""));
        }
    }
}

fn mixed_scripts(token: &Token, out: &mut Vec<Diagnostic>) {
    if !token.greek || !token.text.chars().any(is_latin_letter) {
        return;
    }
    let mut diagnostic = Diagnostic::new(RuleKind::MixedScripts, token.start, token.end);
    let fixed: Option<String> = token.text.chars().map(greek_equivalent).collect();
    if let Some(fixed) = fixed {
        diagnostic = diagnostic.with_fix(fixed);
    }
    out.push(diagnostic);
}

fn is_pure_greek(word: &str) -> bool {
    word.chars().all(|c| is_greek_letter(c) || !c.is_alphabetic())
}

fn monosyllable_accented(token: &Token, out: &mut Vec<Diagnostic>) {
    let word = token.text.as_str();
    if !token.greek || !is_pure_greek(word) || !is_needlessly_accented(word) {
        return;
    }
    let fix: String = word.chars().map(strip_accent).collect();
    let diagnostic = Diagnostic::new(RuleKind::MonosyllableAccented, token.start, token.end);
    out.push(diagnostic.with_fix(fix));
}

fn multisyllable_not_accented(token: &Token, out: &mut Vec<Diagnostic>) {
    let word = token.text.as_str();
    if !token.greek || !is_pure_greek(word) || has_accent(word) || is_all_caps(word) {
        return;
    }
    if syllable_count(word) < 2 || SYNIZESIS.contains(&word.to_lowercase().as_str()) {
        return;
    }
    let diagnostic = Diagnostic::new(RuleKind::MultisyllableNotAccented, token.start, token.end);
    out.push(diagnostic);
}

fn ambiguous_chars(text: &str, out: &mut Vec<Diagnostic>) {
    for (offset, c) in text.char_indices() {
        let found = AMBIGUOUS_CHARS.iter().find(|(ambiguous, _)| *ambiguous == c);
        if let Some((_, replacement)) = found {
            out.push(
                Diagnostic::new(RuleKind::AmbiguousChar, offset, offset + c.len_utf8())
                    .with_fix(*replacement),
            );
        }
    }
}
