//! # kocorpus
//!
//! Extracts a ranked learning corpus from transcribed Korean speech: clean
//! sentences and their most frequent lemmas, filtered for profanity,
//! stopwords and personal names.
//!
//! ## Pipeline
//!
//! 1. [`segment`](segment::segment) the transcript into candidate sentences
//! 2. [`normalize`](normalize::normalize) each candidate (NFC, Hanja to Hangul, lowercase, whitespace)
//! 3. analyze it with a [`MorphAnalyzer`] and keep lemmas that pass the [`WordValidator`]
//! 4. accept sentences with at least three kept lemmas
//! 5. [`rank`](rank::top_k) accepted sentences and lemmas by frequency
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use kocorpus::{Exclusions, LexiconAnalyzer, Pipeline};
//!
//! let analyzer = LexiconAnalyzer::new()
//!     .with_entry("오늘", "NNG", None)
//!     .with_entry("날씨", "NNG", None)
//!     .with_entry("좋네", "VA", Some("좋다"));
//!
//! let pipeline = Pipeline::new(Arc::new(Exclusions::empty()), Arc::new(analyzer));
//! let corpus = pipeline.run("오늘 날씨가 정말 좋네요.");
//!
//! assert_eq!(corpus.sentences[0].item, "오늘 날씨가 정말 좋네요.");
//! assert_eq!(corpus.words[0].item, "오늘");
//! ```
//!
//! ## Features
//!
//! - `lindera`: ko-dic morphological analyzer (embedded dictionary)
//! - `legacy-encoding`: EUC-KR exclusion lists
//! - `async`: Async I/O support with Tokio

pub mod acceptor;
pub mod analyzer;
pub mod config;
pub mod error;
pub mod hanja;
pub mod lexicon;
pub mod material;
pub mod normalize;
pub mod options;
pub mod pipeline;
pub mod rank;
pub mod segment;
pub mod validate;

#[cfg(feature = "async")]
pub mod async_api;

// Re-exports
pub use acceptor::{AcceptedSentence, Rejection, SentenceAcceptor};
pub use analyzer::{Analysis, LexiconAnalyzer, MorphAnalyzer, Token};
pub use config::{CorpusConfig, ResourcePaths};
pub use error::{Error, Result};
pub use hanja::HanjaTable;
pub use lexicon::{ExclusionRole, ExclusionSet, ExclusionStore, Exclusions};
pub use material::{MaterialPrompt, PromptTemplate};
pub use normalize::normalize;
pub use options::PipelineOptions;
pub use pipeline::{Pipeline, RankedCorpus, RunStats, Transcriber};
pub use rank::{top_k, RankedItem};
pub use segment::segment;
pub use validate::{is_valid_word, WordValidator};

#[cfg(feature = "lindera")]
pub use analyzer::LinderaAnalyzer;

use std::path::Path;
use std::sync::Arc;

/// Runs the pipeline configured by `config` over one transcript.
///
/// # Example
///
/// ```no_run
/// use kocorpus::{extract, CorpusConfig};
///
/// let config = CorpusConfig::load("kocorpus.toml")?;
/// let corpus = extract("오늘 날씨가 정말 좋네요.", &config)?;
/// println!("{:?}", corpus.words);
/// # Ok::<(), kocorpus::Error>(())
/// ```
pub fn extract(transcript: &str, config: &CorpusConfig) -> Result<RankedCorpus> {
    let pipeline = Pipeline::from_config(config)?;
    Ok(pipeline.run(transcript))
}

/// Reads a transcript file and runs the configured pipeline over it.
///
/// A blank transcript is [`Error::EmptyTranscript`].
pub fn extract_file(path: impl AsRef<Path>, config: &CorpusConfig) -> Result<RankedCorpus> {
    let transcript = read_transcript(path)?;
    extract(&transcript, config)
}

/// Reads a UTF-8 transcript, rejecting blank content.
pub fn read_transcript(path: impl AsRef<Path>) -> Result<String> {
    let data = std::fs::read(path)?;
    let transcript = String::from_utf8(data)?;
    if transcript.trim().is_empty() {
        return Err(Error::EmptyTranscript);
    }
    Ok(transcript)
}

/// Builder for configuring a [`Pipeline`].
///
/// # Example
///
/// ```no_run
/// use kocorpus::KoCorpus;
///
/// let pipeline = KoCorpus::new()
///     .with_resource_dir("./data")
///     .with_lexicon("./data/lexicon.tsv")
///     .with_word_limit(30)
///     .build()?;
/// let corpus = pipeline.run("오늘 날씨가 정말 좋네요.");
/// # Ok::<(), kocorpus::Error>(())
/// ```
pub struct KoCorpus {
    config: CorpusConfig,
    analyzer: Option<Arc<dyn MorphAnalyzer>>,
    hanja: Option<HanjaTable>,
}

impl Default for KoCorpus {
    fn default() -> Self {
        Self::new()
    }
}

impl KoCorpus {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: CorpusConfig::default(),
            analyzer: None,
            hanja: None,
        }
    }

    /// Starts from a loaded configuration.
    pub fn with_config(mut self, config: CorpusConfig) -> Self {
        self.config = config;
        self
    }

    /// Looks for the default list file names in `dir`.
    pub fn with_resource_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let lexicon = self.config.resources.lexicon.take();
        self.config.resources = ResourcePaths {
            lexicon,
            ..ResourcePaths::in_dir(dir)
        };
        self
    }

    /// Uses a tagged lexicon file for analysis.
    pub fn with_lexicon(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.config.resources.lexicon = Some(path.into());
        self
    }

    /// Uses the given analyzer instead of one built from configuration.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn MorphAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Uses a custom Hanja reading table.
    pub fn with_hanja_table(mut self, table: HanjaTable) -> Self {
        self.hanja = Some(table);
        self
    }

    /// Sets how many ranked sentences are returned.
    pub fn with_sentence_limit(mut self, limit: usize) -> Self {
        self.config.pipeline = self.config.pipeline.with_sentence_limit(limit);
        self
    }

    /// Sets how many ranked words are returned.
    pub fn with_word_limit(mut self, limit: usize) -> Self {
        self.config.pipeline = self.config.pipeline.with_word_limit(limit);
        self
    }

    /// Disables parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.config.pipeline = self.config.pipeline.sequential();
        self
    }

    /// Loads the exclusion lists and builds the pipeline.
    pub fn build(self) -> Result<Pipeline> {
        let mut pipeline = match self.analyzer {
            Some(analyzer) => {
                let exclusions = Exclusions::load(&self.config.resources)?;
                Pipeline::new(Arc::new(exclusions), analyzer).with_options(self.config.pipeline)
            }
            None => Pipeline::from_config(&self.config)?,
        };
        if let Some(table) = self.hanja {
            pipeline = pipeline.with_hanja_table(table);
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_resources(dir: &Path) {
        std::fs::write(dir.join("fword_list.txt"), "시발\n").unwrap();
        std::fs::write(dir.join("korean_stopwords.txt"), "정말\n").unwrap();
        std::fs::write(dir.join("common_names.txt"), "민수\n").unwrap();
        std::fs::write(dir.join("lexicon.tsv"), "오늘\tNNG\n날씨\tNNG\n좋네\tVA\t좋다\n").unwrap();
    }

    #[test]
    fn test_builder_with_lexicon() {
        let dir = tempdir().unwrap();
        write_resources(dir.path());

        let pipeline = KoCorpus::new()
            .with_resource_dir(dir.path())
            .with_lexicon(dir.path().join("lexicon.tsv"))
            .with_word_limit(2)
            .build()
            .unwrap();

        let corpus = pipeline.run("오늘 날씨가 정말 좋네요.");
        assert_eq!(corpus.words.len(), 2);
        assert_eq!(corpus.sentences.len(), 1);
    }

    #[test]
    fn test_builder_keeps_lexicon_when_dir_set_later() {
        let dir = tempdir().unwrap();
        write_resources(dir.path());

        let pipeline = KoCorpus::new()
            .with_lexicon(dir.path().join("lexicon.tsv"))
            .with_resource_dir(dir.path())
            .build();
        assert!(pipeline.is_ok());
    }

    #[test]
    fn test_builder_with_custom_analyzer() {
        let dir = tempdir().unwrap();
        write_resources(dir.path());

        let analyzer = LexiconAnalyzer::new()
            .with_entry("공원", "NNG", None)
            .with_entry("산책", "NNG", None)
            .with_entry("친구", "NNG", None);
        let pipeline = KoCorpus::new()
            .with_resource_dir(dir.path())
            .with_analyzer(Arc::new(analyzer))
            .sequential()
            .build()
            .unwrap();

        assert!(!pipeline.options().parallel);
        let corpus = pipeline.run("친구랑 공원 산책했어.");
        assert_eq!(corpus.stats.accepted, 1);
    }

    #[test]
    fn test_builder_missing_resources_fails() {
        let dir = tempdir().unwrap();
        let result = KoCorpus::new()
            .with_resource_dir(dir.path())
            .with_analyzer(Arc::new(LexiconAnalyzer::new()))
            .build();
        assert!(matches!(result, Err(Error::ResourceLoad { .. })));
    }

    #[test]
    fn test_extract_file() {
        let dir = tempdir().unwrap();
        write_resources(dir.path());
        let transcript = dir.path().join("transcript.txt");
        std::fs::write(&transcript, "오늘 날씨가 정말 좋네요. 시발 오늘 날씨 좋네요.").unwrap();

        let config = CorpusConfig {
            resources: ResourcePaths {
                lexicon: Some(dir.path().join("lexicon.tsv")),
                ..ResourcePaths::in_dir(dir.path())
            },
            ..CorpusConfig::default()
        };

        let corpus = extract_file(&transcript, &config).unwrap();
        assert_eq!(corpus.stats.candidates, 2);
        assert_eq!(corpus.stats.rejected_profanity, 1);
        assert_eq!(corpus.sentences[0].item, "오늘 날씨가 정말 좋네요.");
    }

    #[test]
    fn test_read_transcript_blank() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, "\n\n").unwrap();
        assert!(matches!(read_transcript(&path), Err(Error::EmptyTranscript)));
    }

    #[test]
    fn test_read_transcript_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [0xFF, 0xFE, 0xFD]).unwrap();
        assert!(matches!(read_transcript(&path), Err(Error::Encoding(_))));
    }
}
