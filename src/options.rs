//! Pipeline options for corpus extraction.

use serde::{Deserialize, Serialize};

/// Part-of-speech prefixes that may enter the ranked word pool:
/// common noun, proper noun, verb, adjective.
pub const DEFAULT_ALLOWED_POS: &[&str] = &["NNG", "NNP", "VV", "VA"];

/// Options for controlling segmentation, acceptance and ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Number of ranked sentences to return.
    pub sentence_limit: usize,

    /// Number of ranked words to return.
    pub word_limit: usize,

    /// Segments whose trimmed length is at or below this many characters are dropped.
    pub min_sentence_chars: usize,

    /// Minimum number of kept lemmas for a sentence to be accepted.
    pub min_lemmas: usize,

    /// Minimum surface length (in characters) of a valid word.
    pub min_word_chars: usize,

    /// Allowed part-of-speech tag prefixes.
    pub allowed_pos: Vec<String>,

    /// Whether batch runs may process transcripts in parallel.
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            sentence_limit: 5,
            word_limit: 20,
            min_sentence_chars: 5,
            min_lemmas: 3,
            min_word_chars: 2,
            allowed_pos: DEFAULT_ALLOWED_POS.iter().map(|s| s.to_string()).collect(),
            parallel: true,
        }
    }
}

impl PipelineOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many ranked sentences are returned.
    pub fn with_sentence_limit(mut self, limit: usize) -> Self {
        self.sentence_limit = limit;
        self
    }

    /// Sets how many ranked words are returned.
    pub fn with_word_limit(mut self, limit: usize) -> Self {
        self.word_limit = limit;
        self
    }

    /// Sets the minimum lemma count for sentence acceptance.
    pub fn with_min_lemmas(mut self, count: usize) -> Self {
        self.min_lemmas = count;
        self
    }

    /// Replaces the allowed part-of-speech prefixes.
    pub fn with_allowed_pos<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_pos = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Disables parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}
