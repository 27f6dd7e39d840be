//! Polytonic to monotonic conversion.
//!
//! Breathings, the iota subscript and length marks are dropped; grave, acute and circumflex
//! all become the single monotonic accent, composed onto its vowel. Both precomposed (Greek
//! Extended) and decomposed (combining marks) input is handled. Monosyllables then lose their
//! accent, except the few that keep it to stay distinct (`ή`, `πού`, `πώς`). Text outside Greek
//! is left as is.

use crate::letters::{
    add_accent, is_accented, is_greek_letter, is_needlessly_accented, strip_accent,
};

const ACUTE: char = '\u{0301}';

/// Vowel of each 8-wide row in U+1F00..U+1F6F.
const EXTENDED_ROWS: [char; 14] = [
    'α', 'Α', 'ε', 'Ε', 'η', 'Η', 'ι', 'Ι', 'ο', 'Ο', 'υ', 'Υ', 'ω', 'Ω',
];

/// Vowel of each 8-wide row in U+1F80..U+1FAF (iota subscript forms).
const SUBSCRIPT_ROWS: [char; 6] = ['α', 'Α', 'η', 'Η', 'ω', 'Ω'];

/// Vowel pairs (grave, acute) in U+1F70..U+1F7D.
const OXIA_PAIRS: [char; 7] = ['α', 'ε', 'η', 'ι', 'ο', 'υ', 'ω'];

fn from_row(rows: &[char], offset: u32) -> Option<char> {
    let base = *rows.get((offset / 8) as usize)?;
    // The first two columns carry a breathing only.
    Some(if offset % 8 < 2 { base } else { add_accent(base) })
}

/// The monotonic form of a single precomposed character, if it differs.
fn monotonic_char(c: char) -> Option<char> {
    let cp = c as u32;
    match cp {
        0x1F00..=0x1F6F => from_row(&EXTENDED_ROWS, cp - 0x1F00),
        0x1F70..=0x1F7D => OXIA_PAIRS
            .get(((cp - 0x1F70) / 2) as usize)
            .map(|&base| add_accent(base)),
        0x1F80..=0x1FAF => from_row(&SUBSCRIPT_ROWS, cp - 0x1F80),
        0x1FB0..=0x1FFF => late_extended(c),
        _ => None,
    }
}

fn late_extended(c: char) -> Option<char> {
    Some(match c {
        'ᾰ' | 'ᾱ' | 'ᾳ' => 'α',
        'ᾲ' | 'ᾴ' | 'ᾶ' | 'ᾷ' => 'ά',
        'Ᾰ' | 'Ᾱ' | 'ᾼ' => 'Α',
        'Ὰ' | '\u{1FBB}' => 'Ά',
        'ῃ' => 'η',
        'ῂ' | 'ῄ' | 'ῆ' | 'ῇ' => 'ή',
        'ῌ' => 'Η',
        'Ὲ' | '\u{1FC9}' => 'Έ',
        'Ὴ' | '\u{1FCB}' => 'Ή',
        'ῐ' | 'ῑ' => 'ι',
        'ῒ' | '\u{1FD3}' | 'ῗ' => 'ΐ',
        'ῖ' => 'ί',
        'Ῐ' | 'Ῑ' => 'Ι',
        'Ὶ' | '\u{1FDB}' => 'Ί',
        'ῠ' | 'ῡ' => 'υ',
        'ῢ' | '\u{1FE3}' | 'ῧ' => 'ΰ',
        'ῦ' => 'ύ',
        'ῤ' | 'ῥ' => 'ρ',
        'Ῠ' | 'Ῡ' => 'Υ',
        'Ὺ' | '\u{1FEB}' => 'Ύ',
        'Ῥ' => 'Ρ',
        'ῳ' => 'ω',
        'ῲ' | 'ῴ' | 'ῶ' | 'ῷ' => 'ώ',
        'ῼ' => 'Ω',
        'Ὸ' | '\u{1FF9}' => 'Ό',
        'Ὼ' | '\u{1FFB}' => 'Ώ',
        _ => return None,
    })
}

/// Put the monotonic accent on the last character of `out`.
fn push_accent(out: &mut String) {
    match out.pop() {
        Some(prev) if is_accented(prev) => out.push(prev),
        Some(prev) if add_accent(prev) != prev => out.push(add_accent(prev)),
        Some(ACUTE) => out.push(ACUTE),
        Some(prev) => {
            out.push(prev);
            out.push(ACUTE);
        }
        None => out.push(ACUTE),
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c as u32, 0x0300..=0x036F)
}

fn push_word(out: &mut String, word: &str) {
    if word.chars().any(is_greek_letter) && is_needlessly_accented(word) {
        out.extend(word.chars().map(strip_accent));
    } else {
        out.push_str(word);
    }
}

/// Drop the accent of every monosyllable that monotonic spelling leaves unaccented.
fn strip_monosyllable_accents(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();
    for c in text.chars() {
        if is_word_char(c) {
            word.push(c);
            continue;
        }
        push_word(&mut out, &word);
        word.clear();
        out.push(c);
    }
    push_word(&mut out, &word);
    out
}

/// Convert `text` to monotonic orthography.
pub fn to_monotonic(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            // psili, dasia, ypogegrammeni, macron, breve
            '\u{0313}' | '\u{0314}' | '\u{0345}' | '\u{0304}' | '\u{0306}' => {}
            // varia, perispomeni (both spellings), oxia
            '\u{0300}' | '\u{0342}' | '\u{0303}' | ACUTE => push_accent(&mut out),
            _ => out.push(monotonic_char(c).unwrap_or(c)),
        }
    }
    strip_monosyllable_accents(&out)
}
