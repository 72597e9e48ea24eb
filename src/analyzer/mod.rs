//! Morphological analysis capability.
//!
//! The pipeline only needs one thing from a Korean tagger: turn a normalized
//! sentence into ranked candidate parses of `(form, lemma, tag)` tokens.
//! [`MorphAnalyzer`] is that contract; concrete taggers are adapters.
//!
//! - [`LexiconAnalyzer`]: dictionary-driven tagger over a TSV lexicon
//! - `LinderaAnalyzer` (feature `lindera`): ko-dic based tagger
//!
//! Any `Fn(&str) -> Result<Vec<Analysis>> + Send + Sync` is also an analyzer,
//! which keeps stubs in tests short.

mod lexicon;

#[cfg(feature = "lindera")]
mod ko_dic;

pub use lexicon::LexiconAnalyzer;

#[cfg(feature = "lindera")]
pub use ko_dic::LinderaAnalyzer;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single morpheme produced by analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form as it appears in the sentence.
    pub form: String,
    /// Dictionary form.
    pub lemma: String,
    /// Part-of-speech tag (Sejong-style, e.g. `NNG`, `VV`).
    pub tag: String,
}

impl Token {
    /// Creates a token.
    pub fn new(form: impl Into<String>, lemma: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            lemma: lemma.into(),
            tag: tag.into(),
        }
    }

    /// Creates a token whose lemma equals its surface form.
    pub fn uninflected(form: impl Into<String>, tag: impl Into<String>) -> Self {
        let form = form.into();
        Self {
            lemma: form.clone(),
            form,
            tag: tag.into(),
        }
    }
}

/// One candidate parse of a sentence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    /// Analyzer-specific score; higher-ranked parses come first regardless.
    pub score: f32,
}

impl Analysis {
    /// Creates a parse with a zero score.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, score: 0.0 }
    }

    /// Returns true if the parse has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Tokenize capability used by the sentence acceptor.
pub trait MorphAnalyzer: Send + Sync {
    /// Returns candidate parses, best first.
    fn analyze(&self, text: &str) -> Result<Vec<Analysis>>;

    /// Returns the best parse, if any.
    fn best(&self, text: &str) -> Result<Option<Analysis>> {
        Ok(self.analyze(text)?.into_iter().next())
    }
}

impl<F> MorphAnalyzer for F
where
    F: Fn(&str) -> Result<Vec<Analysis>> + Send + Sync,
{
    fn analyze(&self, text: &str) -> Result<Vec<Analysis>> {
        self(text)
    }
}
