//! Sentence acceptance.
//!
//! A candidate sentence is accepted when it is profanity-free and its best
//! parse yields at least `min_lemmas` lemmas that pass word validation and
//! are neither stopwords nor common names. Every other outcome is a
//! [`Rejection`] with its cause, so the caller can log and count it without
//! aborting the batch.

use serde::Serialize;
use thiserror::Error;

use crate::analyzer::MorphAnalyzer;
use crate::error::Error;
use crate::hanja::HanjaTable;
use crate::lexicon::Exclusions;
use crate::normalize::normalize_with;
use crate::options::PipelineOptions;
use crate::validate::WordValidator;

/// A sentence that survived acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcceptedSentence {
    /// Normalized sentence text.
    pub text: String,
    /// Kept lemmas in sentence order, duplicates preserved.
    pub lemmas: Vec<String>,
}

/// Why a candidate sentence was rejected.
#[derive(Debug, Error)]
pub enum Rejection {
    /// The raw candidate contains a profanity entry as a substring.
    #[error("contains profanity entry {term:?}")]
    Profanity { term: String },

    /// The analyzer returned an error.
    #[error("analysis failed: {0}")]
    AnalysisFailed(#[source] Error),

    /// The analyzer returned no parse, or a parse without tokens.
    #[error("analyzer returned an empty parse")]
    MalformedParse,

    /// Not enough lemmas survived filtering.
    #[error("only {found} of {required} required lemmas")]
    TooFewLemmas { found: usize, required: usize },
}

/// Applies profanity filtering, normalization, analysis and lemma filtering
/// to one candidate sentence at a time.
pub struct SentenceAcceptor<'a> {
    exclusions: &'a Exclusions,
    analyzer: &'a dyn MorphAnalyzer,
    hanja: &'a HanjaTable,
    validator: WordValidator,
    min_lemmas: usize,
}

impl<'a> SentenceAcceptor<'a> {
    /// Creates an acceptor using the built-in Hanja table.
    pub fn new(
        exclusions: &'a Exclusions,
        analyzer: &'a dyn MorphAnalyzer,
        options: &PipelineOptions,
    ) -> Self {
        Self {
            exclusions,
            analyzer,
            hanja: HanjaTable::builtin(),
            validator: WordValidator::from_options(options),
            min_lemmas: options.min_lemmas,
        }
    }

    /// Uses a custom Hanja table for normalization.
    pub fn with_hanja_table(mut self, table: &'a HanjaTable) -> Self {
        self.hanja = table;
        self
    }

    /// Accepts or rejects one candidate sentence.
    pub fn process(&self, candidate: &str) -> Result<AcceptedSentence, Rejection> {
        // Raw text, before normalization
        if let Some(term) = self.exclusions.profanities.find_in(candidate) {
            return Err(Rejection::Profanity {
                term: term.to_string(),
            });
        }

        let text = normalize_with(candidate, self.hanja);

        let analysis = self
            .analyzer
            .best(&text)
            .map_err(Rejection::AnalysisFailed)?
            .filter(|analysis| !analysis.is_empty())
            .ok_or(Rejection::MalformedParse)?;

        let lemmas: Vec<String> = analysis
            .tokens
            .into_iter()
            .filter(|token| self.keeps(&token.form, &token.tag, &token.lemma))
            .map(|token| token.lemma)
            .collect();

        if lemmas.len() < self.min_lemmas {
            return Err(Rejection::TooFewLemmas {
                found: lemmas.len(),
                required: self.min_lemmas,
            });
        }

        Ok(AcceptedSentence { text, lemmas })
    }

    fn keeps(&self, form: &str, tag: &str, lemma: &str) -> bool {
        self.validator.is_valid(form, tag)
            && !self.exclusions.stopwords.contains(lemma)
            && !self.exclusions.common_names.contains(lemma)
            && lemma.chars().count() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Analysis, Token};
    use crate::error::Result;
    use crate::lexicon::{ExclusionRole, ExclusionSet};

    /// Tags every whitespace word as NNG with itself as lemma.
    fn noun_analyzer(text: &str) -> Result<Vec<Analysis>> {
        let tokens = text
            .split_whitespace()
            .map(|w| Token::uninflected(w.trim_end_matches('.'), "NNG"))
            .collect();
        Ok(vec![Analysis::new(tokens)])
    }

    fn accept(exclusions: &Exclusions, candidate: &str) -> std::result::Result<AcceptedSentence, Rejection> {
        let options = PipelineOptions::default();
        SentenceAcceptor::new(exclusions, &noun_analyzer, &options).process(candidate)
    }

    #[test]
    fn test_accepts_with_three_lemmas() {
        let accepted = accept(&Exclusions::empty(), "오늘 날씨 정말 최고.").unwrap();
        assert_eq!(accepted.text, "오늘 날씨 정말 최고.");
        assert_eq!(accepted.lemmas, vec!["오늘", "날씨", "정말", "최고"]);
    }

    #[test]
    fn test_rejects_with_two_lemmas() {
        let result = accept(&Exclusions::empty(), "오늘 날씨 좋");
        assert!(matches!(result, Err(Rejection::TooFewLemmas { found: 2, required: 3 })));
    }

    #[test]
    fn test_profanity_substring_rejects_whole_sentence() {
        let exclusions = Exclusions::empty()
            .with(ExclusionRole::Profanity, ExclusionSet::from_entries(["시발"]));
        let result = accept(&exclusions, "여기가 우리 여행의 시발점 이다");
        match result {
            Err(Rejection::Profanity { term }) => assert_eq!(term, "시발"),
            other => panic!("Expected profanity rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_stopwords_and_names_removed() {
        let exclusions = Exclusions::empty()
            .with(ExclusionRole::Stopword, ExclusionSet::from_entries(["정말"]))
            .with(ExclusionRole::CommonName, ExclusionSet::from_entries(["민수"]));
        let accepted = accept(&exclusions, "민수 오늘 날씨 정말 최고 공원").unwrap();
        assert_eq!(accepted.lemmas, vec!["오늘", "날씨", "최고", "공원"]);
    }

    #[test]
    fn test_exclusions_match_after_hanja_substitution() {
        let exclusions =
            Exclusions::empty().with(ExclusionRole::Stopword, ExclusionSet::from_entries(["한자"]));
        let result = accept(&exclusions, "漢字 공부 정말 어려움");
        let accepted = result.unwrap();
        assert_eq!(accepted.text, "한자 공부 정말 어려움");
        assert_eq!(accepted.lemmas, vec!["공부", "정말", "어려움"]);
    }

    #[test]
    fn test_duplicate_lemmas_preserved() {
        let accepted = accept(&Exclusions::empty(), "사과 사과 사과 바나나").unwrap();
        assert_eq!(accepted.lemmas, vec!["사과", "사과", "사과", "바나나"]);
    }

    #[test]
    fn test_single_char_lemma_dropped() {
        // Surface passes the length rule but the lemma does not
        let analyzer = |_: &str| -> Result<Vec<Analysis>> {
            Ok(vec![Analysis::new(vec![
                Token::new("갔다", "가", "VV"),
                Token::new("먹었다", "먹다", "VV"),
                Token::new("학교", "학교", "NNG"),
                Token::new("친구", "친구", "NNG"),
            ])])
        };
        let options = PipelineOptions::default();
        let exclusions = Exclusions::empty();
        let accepted = SentenceAcceptor::new(&exclusions, &analyzer, &options)
            .process("학교 친구 밥 먹었다 갔다")
            .unwrap();
        assert_eq!(accepted.lemmas, vec!["먹다", "학교", "친구"]);
    }

    #[test]
    fn test_only_best_parse_used() {
        let analyzer = |_: &str| -> Result<Vec<Analysis>> {
            Ok(vec![
                Analysis::new(vec![Token::uninflected("하나", "NNG")]),
                Analysis::new(vec![
                    Token::uninflected("하나", "NNG"),
                    Token::uninflected("둘둘", "NNG"),
                    Token::uninflected("셋셋", "NNG"),
                ]),
            ])
        };
        let options = PipelineOptions::default();
        let exclusions = Exclusions::empty();
        let result = SentenceAcceptor::new(&exclusions, &analyzer, &options).process("하나 둘둘 셋셋");
        assert!(matches!(result, Err(Rejection::TooFewLemmas { found: 1, .. })));
    }

    #[test]
    fn test_analyzer_failure_is_rejection() {
        let analyzer = |_: &str| -> Result<Vec<Analysis>> { Err(Error::Analysis("tagger crashed".into())) };
        let options = PipelineOptions::default();
        let exclusions = Exclusions::empty();
        let result = SentenceAcceptor::new(&exclusions, &analyzer, &options).process("아무 문장 입니다");
        assert!(matches!(result, Err(Rejection::AnalysisFailed(_))));
    }

    #[test]
    fn test_empty_parse_is_malformed() {
        let no_parses = |_: &str| -> Result<Vec<Analysis>> { Ok(Vec::new()) };
        let empty_parse = |_: &str| -> Result<Vec<Analysis>> { Ok(vec![Analysis::default()]) };
        let options = PipelineOptions::default();
        let exclusions = Exclusions::empty();

        let result = SentenceAcceptor::new(&exclusions, &no_parses, &options).process("아무 문장 입니다");
        assert!(matches!(result, Err(Rejection::MalformedParse)));

        let result = SentenceAcceptor::new(&exclusions, &empty_parse, &options).process("아무 문장 입니다");
        assert!(matches!(result, Err(Rejection::MalformedParse)));
    }
}
