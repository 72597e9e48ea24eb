//! Word validation.

use crate::options::PipelineOptions;

/// Decides whether a token may enter the ranked word pool.
///
/// A word is valid when its tag starts with an allowed prefix, its surface
/// form has at least `min_chars` characters, and it is not purely numeric.
#[derive(Debug, Clone)]
pub struct WordValidator {
    allowed_pos: Vec<String>,
    min_chars: usize,
}

impl Default for WordValidator {
    fn default() -> Self {
        Self::from_options(&PipelineOptions::default())
    }
}

impl WordValidator {
    /// Creates a validator from explicit rules.
    pub fn new<I, S>(allowed_pos: I, min_chars: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_pos: allowed_pos.into_iter().map(Into::into).collect(),
            min_chars,
        }
    }

    /// Creates a validator from pipeline options.
    pub fn from_options(options: &PipelineOptions) -> Self {
        Self::new(options.allowed_pos.iter().cloned(), options.min_word_chars)
    }

    /// Returns true if the token passes all three rules.
    pub fn is_valid(&self, form: &str, tag: &str) -> bool {
        self.has_allowed_pos(tag) && form.chars().count() >= self.min_chars && !is_numeric(form)
    }

    fn has_allowed_pos(&self, tag: &str) -> bool {
        self.allowed_pos.iter().any(|prefix| tag.starts_with(prefix.as_str()))
    }
}

/// Validates with the default rules (NNG/NNP/VV/VA, two or more characters).
pub fn is_valid_word(form: &str, tag: &str) -> bool {
    WordValidator::default().is_valid(form, tag)
}

fn is_numeric(form: &str) -> bool {
    !form.is_empty() && form.chars().all(char::is_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_classes() {
        assert!(is_valid_word("친구", "NNG"));
        assert!(is_valid_word("서울", "NNP"));
        assert!(is_valid_word("만나", "VV"));
        assert!(is_valid_word("좋은", "VA"));
    }

    #[test]
    fn test_prefix_match_on_compound_tags() {
        assert!(is_valid_word("만났", "VV+EP"));
        assert!(is_valid_word("예쁘", "VA-I"));
    }

    #[test]
    fn test_disallowed_classes() {
        assert!(!is_valid_word("에서", "JKB"));
        assert!(!is_valid_word("것이", "NNB"));
        assert!(!is_valid_word("매우", "MAG"));
        assert!(!is_valid_word("이다", "VCP"));
    }

    #[test]
    fn test_length_rule() {
        assert!(!is_valid_word("책", "NNG"));
        assert!(is_valid_word("책상", "NNG"));
    }

    #[test]
    fn test_numeric_rule() {
        assert!(!is_valid_word("2024", "NNG"));
        assert!(is_valid_word("2월달", "NNG"));
    }

    #[test]
    fn test_custom_rules() {
        let validator = WordValidator::new(["NNG"], 1);
        assert!(validator.is_valid("책", "NNG"));
        assert!(!validator.is_valid("가다", "VV"));
    }
}
