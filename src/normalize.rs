//! Sentence normalization.
//!
//! Applied to every candidate sentence before morphological analysis:
//!
//! 1. Unicode NFC composition (conjoining jamo compose into syllable blocks)
//! 2. Hanja substitution with Korean readings
//! 3. Lowercasing
//! 4. Whitespace collapse and trim

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::hanja::HanjaTable;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalizes text using the built-in Hanja table.
///
/// # Example
///
/// ```
/// use kocorpus::normalize::normalize;
///
/// assert_eq!(normalize("  Hello\n\t漢字  "), "hello 한자");
/// ```
pub fn normalize(text: &str) -> String {
    normalize_with(text, HanjaTable::builtin())
}

/// Normalizes text using a caller-supplied Hanja table.
pub fn normalize_with(text: &str, table: &HanjaTable) -> String {
    let composed: String = text.nfc().collect();
    let substituted = table.substitute(&composed);
    let lowered = substituted.to_lowercase();
    collapse_whitespace(&lowered)
}

/// Collapses whitespace runs to a single space and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc_composes_jamo() {
        // ᄒ + ᅡ + ᆫ (conjoining jamo) -> 한
        let decomposed = "\u{1112}\u{1161}\u{11AB}";
        assert_eq!(normalize(decomposed), "한");
    }

    #[test]
    fn test_lowercase_ascii() {
        assert_eq!(normalize("Korean DRAMA 좋아"), "korean drama 좋아");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize("  오늘은\n\n날씨가\t 좋다  "), "오늘은 날씨가 좋다");
    }

    #[test]
    fn test_hanja_substitution() {
        assert_eq!(normalize("漢字 공부"), "한자 공부");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }
}
