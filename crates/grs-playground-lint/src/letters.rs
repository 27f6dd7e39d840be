//! Greek letter classification: vowels, accents, syllables.

/// Accented monosyllables whose accent is required (it distinguishes them from a homograph).
pub const ACCENTED_MONOSYLLABLES: &[&str] = &["ή", "πού", "πώς"];

/// Returns `true` for Greek vowels in the monotonic repertoire (any case, accented or not).
pub fn is_vowel(c: char) -> bool {
    matches!(
        lower(c),
        'α' | 'ε' | 'η' | 'ι' | 'ο' | 'υ' | 'ω'
            | 'ά' | 'έ' | 'ή' | 'ί' | 'ό' | 'ύ' | 'ώ'
            | 'ϊ' | 'ϋ' | 'ΐ' | 'ΰ'
    )
}

/// Returns `true` for a vowel carrying the monotonic accent (tonos).
pub fn is_accented(c: char) -> bool {
    matches!(
        lower(c),
        'ά' | 'έ' | 'ή' | 'ί' | 'ό' | 'ύ' | 'ώ' | 'ΐ' | 'ΰ'
    )
}

fn has_diaeresis(c: char) -> bool {
    matches!(lower(c), 'ϊ' | 'ϋ' | 'ΐ' | 'ΰ')
}

/// The accent-free form of a vowel; other characters are returned unchanged.
pub fn strip_accent(c: char) -> char {
    match c {
        'ά' => 'α',
        'έ' => 'ε',
        'ή' => 'η',
        'ί' => 'ι',
        'ό' => 'ο',
        'ύ' => 'υ',
        'ώ' => 'ω',
        'ΐ' => 'ϊ',
        'ΰ' => 'ϋ',
        'Ά' => 'Α',
        'Έ' => 'Ε',
        'Ή' => 'Η',
        'Ί' => 'Ι',
        'Ό' => 'Ο',
        'Ύ' => 'Υ',
        'Ώ' => 'Ω',
        other => other,
    }
}

/// The accented form of a plain vowel; other characters are returned unchanged.
pub fn add_accent(c: char) -> char {
    match c {
        'α' => 'ά',
        'ε' => 'έ',
        'η' => 'ή',
        'ι' => 'ί',
        'ο' => 'ό',
        'υ' => 'ύ',
        'ω' => 'ώ',
        'ϊ' => 'ΐ',
        'ϋ' => 'ΰ',
        'Α' => 'Ά',
        'Ε' => 'Έ',
        'Η' => 'Ή',
        'Ι' => 'Ί',
        'Ο' => 'Ό',
        'Υ' => 'Ύ',
        'Ω' => 'Ώ',
        other => other,
    }
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Two vowels read as one sound (`αι`, `ει`, `οι`, `ου`, `υι`, `αυ`, `ευ`, `ηυ`).
///
/// The second vowel may carry the accent; a diaeresis on it splits the pair.
fn is_digraph(first: char, second: char) -> bool {
    if is_accented(first) || has_diaeresis(second) {
        return false;
    }
    let second = strip_accent(lower(second));
    matches!(
        (lower(first), second),
        ('α' | 'ε' | 'ο' | 'υ', 'ι') | ('ο' | 'α' | 'ε' | 'η', 'υ')
    )
}

/// Approximate syllable count of a word: vowel letters minus vowel digraphs.
///
/// Synizesis (`για`, `μια`) is not detected and counts as two syllables.
pub fn syllable_count(word: &str) -> usize {
    let mut count = 0;
    let mut prev: Option<char> = None;
    for c in word.chars() {
        if !is_vowel(c) {
            prev = None;
            continue;
        }
        match prev {
            Some(p) if is_digraph(p, c) => prev = None,
            _ => {
                count += 1;
                prev = Some(c);
            }
        }
    }
    count
}

/// Returns `true` if the word contains an accented vowel.
pub fn has_accent(word: &str) -> bool {
    word.chars().any(is_accented)
}

/// Returns `true` for a one-syllable word whose accent monotonic spelling drops.
pub fn is_needlessly_accented(word: &str) -> bool {
    has_accent(word)
        && syllable_count(word) == 1
        && !ACCENTED_MONOSYLLABLES.contains(&word.to_lowercase().as_str())
}

/// Returns `true` if every letter of the word is uppercase.
pub fn is_all_caps(word: &str) -> bool {
    let mut letters = word.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

/// Returns `true` for letters of the Greek and Coptic or Greek Extended blocks.
pub fn is_greek_letter(c: char) -> bool {
    c.is_alphabetic() && matches!(c as u32, 0x0370..=0x03FF | 0x1F00..=0x1FFF)
}

/// Returns `true` for ASCII and Latin-1/Extended Latin letters.
pub fn is_latin_letter(c: char) -> bool {
    c.is_alphabetic() && matches!(c as u32, 0x0041..=0x024F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllable_count() {
        assert_eq!(syllable_count("και"), 1);
        assert_eq!(syllable_count("μου"), 1);
        assert_eq!(syllable_count("πού"), 1);
        assert_eq!(syllable_count("λάθος"), 2);
        assert_eq!(syllable_count("είναι"), 2);
        assert_eq!(syllable_count("ευχαριστώ"), 4);
        assert_eq!(syllable_count("κοροϊδεύω"), 5);
        assert_eq!(syllable_count("ρ"), 0);
    }

    #[test]
    fn test_accent_round_trip() {
        for c in "αεηιουωϊϋΑΕΗΙΟΥΩ".chars() {
            assert_eq!(strip_accent(add_accent(c)), c);
        }
        assert!(has_accent("καλή"));
        assert!(!has_accent("καλη"));
    }

    #[test]
    fn test_needlessly_accented() {
        assert!(is_needlessly_accented("μού"));
        assert!(is_needlessly_accented("Τής"));
        assert!(!is_needlessly_accented("πού"));
        assert!(!is_needlessly_accented("Ή"));
        assert!(!is_needlessly_accented("μου"));
        assert!(!is_needlessly_accented("λόγος"));
    }

    #[test]
    fn test_scripts() {
        assert!(is_greek_letter('λ'));
        assert!(is_greek_letter('ἀ'));
        assert!(!is_greek_letter('a'));
        assert!(is_latin_letter('o'));
        assert!(!is_latin_letter('ο'));
        assert!(is_all_caps("ΑΘΗΝΑ"));
        assert!(!is_all_caps("Αθήνα"));
        assert!(!is_all_caps("123"));
    }
}
