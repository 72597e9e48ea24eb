//! Sentence segmentation for conversational Korean transcripts.
//!
//! Transcripts rarely carry reliable punctuation, so segmentation combines:
//!
//! 1. **Terminal boundaries** - `.`, `!`, `?` or the sentence-final endings
//!    `요`/`야`, followed by whitespace and then a Hangul syllable or Latin letter
//! 2. **Discourse connectives** - 그래서, 그런데, 그리고, 하지만, 근데 preceded by
//!    whitespace; the connective itself is dropped
//! 3. **Length filter** - trimmed segments of `min_chars` characters or fewer are dropped,
//!    as are segments with no letters or digits at all

use regex::Regex;
use std::sync::LazyLock;

/// Segments at or below this many characters are dropped by [`segment`].
pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 5;

/// Terminal character, the whitespace run to consume, and the letter that must follow.
static RE_TERMINAL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?요야](\s+)[가-힣A-Za-z]").unwrap());

static RE_CONNECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:그래서|그런데|그리고|하지만|근데)\s+").unwrap());

/// Splits a transcript into candidate sentences using the default length filter.
///
/// # Example
///
/// ```
/// use kocorpus::segment::segment;
///
/// let sentences = segment("오늘 날씨가 정말 좋네요. 나는 친구를 만났어.");
/// assert_eq!(sentences, vec!["오늘 날씨가 정말 좋네요.", "나는 친구를 만났어."]);
/// ```
pub fn segment(text: &str) -> Vec<String> {
    segment_with(text, DEFAULT_MIN_SENTENCE_CHARS)
}

/// Splits a transcript into candidate sentences, keeping segments longer than `min_chars`.
pub fn segment_with(text: &str, min_chars: usize) -> Vec<String> {
    split_on_terminals(text)
        .into_iter()
        .flat_map(split_on_connectives)
        .map(str::trim)
        .filter(|s| s.chars().count() > min_chars)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .map(String::from)
        .collect()
}

/// Splits at terminal boundaries, consuming the whitespace run.
fn split_on_terminals(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut search_from = 0;

    // The letter after the whitespace may itself end the next sentence
    // ("좋아요 야 ..."), so each search resumes right after the consumed whitespace.
    while let Some(caps) = RE_TERMINAL_BOUNDARY.captures_at(text, search_from) {
        let Some(whitespace) = caps.get(1) else {
            break;
        };
        pieces.push(&text[start..whitespace.start()]);
        start = whitespace.end();
        search_from = whitespace.end();
    }

    pieces.push(&text[start..]);
    pieces
}

/// Splits at discourse connectives that follow whitespace, dropping the connective.
fn split_on_connectives(sentence: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for m in RE_CONNECTIVE.find_iter(sentence) {
        let follows_whitespace = sentence[..m.start()]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if !follows_whitespace {
            continue;
        }
        pieces.push(&sentence[start..m.start()]);
        start = m.end();
    }

    pieces.push(&sentence[start..]);
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_period() {
        let result = segment("오늘 날씨가 정말 좋네요. 나는 친구를 만났어.");
        assert_eq!(result, vec!["오늘 날씨가 정말 좋네요.", "나는 친구를 만났어."]);
    }

    #[test]
    fn test_split_on_question_and_exclamation() {
        let result = segment("밥은 먹었어요? 정말 맛있었어! 다음에 또 가자");
        assert_eq!(result, vec!["밥은 먹었어요?", "정말 맛있었어!", "다음에 또 가자"]);
    }

    #[test]
    fn test_split_on_final_endings() {
        let result = segment("정말 좋아요 우리 같이 가자");
        assert_eq!(result, vec!["정말 좋아요", "우리 같이 가자"]);
    }

    #[test]
    fn test_consecutive_ending_boundaries() {
        // "야" is both the letter after one boundary and the start of the next
        let result = segment("정말 좋아요 야 너도 같이 와봐");
        assert_eq!(result, vec!["정말 좋아요", "너도 같이 와봐"]);
    }

    #[test]
    fn test_no_split_before_digit() {
        let result = segment("버전 2. 3번 문제는 어렵다");
        assert_eq!(result, vec!["버전 2. 3번 문제는 어렵다"]);
    }

    #[test]
    fn test_connective_split_drops_connective() {
        let result = segment("밥을 많이 먹었어 그래서 배가 너무 불러");
        assert_eq!(result, vec!["밥을 많이 먹었어", "배가 너무 불러"]);
    }

    #[test]
    fn test_all_connectives() {
        for connective in ["그래서", "그런데", "그리고", "하지만", "근데"] {
            let text = format!("첫번째 문장이다 {} 두번째 문장이다", connective);
            let result = segment(&text);
            assert_eq!(result, vec!["첫번째 문장이다", "두번째 문장이다"], "{}", connective);
        }
    }

    #[test]
    fn test_leading_connective_not_split() {
        let result = segment("그래서 우리는 집에 갔다");
        assert_eq!(result, vec!["그래서 우리는 집에 갔다"]);
    }

    #[test]
    fn test_connective_inside_word_not_split() {
        // No whitespace after the connective
        let result = segment("우리는 그리고는 집에 갔다");
        assert_eq!(result, vec!["우리는 그리고는 집에 갔다"]);
    }

    #[test]
    fn test_short_segments_dropped() {
        let result = segment("네. 오늘 정말 즐거웠어요.");
        assert_eq!(result, vec!["오늘 정말 즐거웠어요."]);
    }

    #[test]
    fn test_length_threshold_is_exclusive() {
        // Exactly five characters is dropped, six is kept
        assert!(segment("가나다라마").is_empty());
        assert_eq!(segment("가나다라마바"), vec!["가나다라마바"]);
    }

    #[test]
    fn test_degenerate_input() {
        assert!(segment("").is_empty());
        assert!(segment(".").is_empty());
        assert!(segment("   \n\t ").is_empty());
        assert!(segment("?! ...").is_empty());
    }

    #[test]
    fn test_custom_min_chars() {
        let result = segment_with("네. 좋아요.", 1);
        assert_eq!(result, vec!["네.", "좋아요."]);
    }
}
