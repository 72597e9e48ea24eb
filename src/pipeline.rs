//! Pipeline orchestration.
//!
//! [`Pipeline::run`] segments a transcript, passes every candidate through
//! the [`SentenceAcceptor`], and ranks the accepted sentences and lemmas.
//! A run never fails: per-sentence problems become rejections counted in
//! [`RunStats`], and a transcript with no usable sentences yields empty
//! rankings.

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;

use crate::acceptor::{Rejection, SentenceAcceptor};
use crate::analyzer::{LexiconAnalyzer, MorphAnalyzer};
use crate::config::CorpusConfig;
use crate::error::{Error, Result};
use crate::hanja::HanjaTable;
use crate::lexicon::{ExclusionStore, Exclusions};
use crate::options::PipelineOptions;
use crate::rank::{top_k, RankedItem};
use crate::segment::segment_with;

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Sentence candidates produced by segmentation.
    pub candidates: usize,
    pub accepted: usize,
    pub rejected_profanity: usize,
    pub rejected_analysis: usize,
    pub rejected_malformed: usize,
    pub rejected_too_few_lemmas: usize,
}

impl RunStats {
    /// Tallies one rejection under its cause.
    pub fn record(&mut self, rejection: &Rejection) {
        match rejection {
            Rejection::Profanity { .. } => self.rejected_profanity += 1,
            Rejection::AnalysisFailed(_) => self.rejected_analysis += 1,
            Rejection::MalformedParse => self.rejected_malformed += 1,
            Rejection::TooFewLemmas { .. } => self.rejected_too_few_lemmas += 1,
        }
    }

    /// Total number of rejected candidates.
    pub fn rejected(&self) -> usize {
        self.rejected_profanity
            + self.rejected_analysis
            + self.rejected_malformed
            + self.rejected_too_few_lemmas
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankedCorpus {
    /// Most frequent accepted sentences (normalized text).
    pub sentences: Vec<RankedItem<String>>,
    /// Most frequent accepted lemmas.
    pub words: Vec<RankedItem<String>>,
    pub stats: RunStats,
}

impl RankedCorpus {
    /// Returns true if no learning material was produced.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty() && self.words.is_empty()
    }

    /// Serializes the corpus to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Speech-to-text collaborator.
///
/// Returns `Ok(None)` when the audio produced no text.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &Path) -> Result<Option<String>>;
}

impl<F> Transcriber for F
where
    F: Fn(&Path) -> Result<Option<String>> + Send + Sync,
{
    fn transcribe(&self, audio: &Path) -> Result<Option<String>> {
        self(audio)
    }
}

/// Transcript-to-corpus pipeline.
///
/// Holds an immutable exclusion snapshot and an analyzer; cloning is cheap
/// and independent runs share nothing mutable.
#[derive(Clone)]
pub struct Pipeline {
    exclusions: Arc<Exclusions>,
    analyzer: Arc<dyn MorphAnalyzer>,
    hanja: Option<Arc<HanjaTable>>,
    options: PipelineOptions,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("profanities", &self.exclusions.profanities.len())
            .field("stopwords", &self.exclusions.stopwords.len())
            .field("common_names", &self.exclusions.common_names.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Creates a pipeline with default options.
    pub fn new(exclusions: Arc<Exclusions>, analyzer: Arc<dyn MorphAnalyzer>) -> Self {
        Self {
            exclusions,
            analyzer,
            hanja: None,
            options: PipelineOptions::default(),
        }
    }

    /// Creates a pipeline over the store's current snapshot.
    pub fn from_store(store: &ExclusionStore, analyzer: Arc<dyn MorphAnalyzer>) -> Self {
        Self::new(store.snapshot(), analyzer)
    }

    /// Builds a pipeline from a configuration file's contents.
    ///
    /// All three exclusion lists must load. The analyzer is the lexicon
    /// analyzer when `resources.lexicon` is set, otherwise the ko-dic
    /// analyzer if the `lindera` feature is enabled.
    pub fn from_config(config: &CorpusConfig) -> Result<Self> {
        let exclusions = Exclusions::load(&config.resources)?;
        let analyzer = analyzer_from_config(config)?;
        Ok(Self::new(Arc::new(exclusions), analyzer).with_options(config.pipeline.clone()))
    }

    /// Replaces the pipeline options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Uses a custom Hanja reading table instead of the built-in one.
    pub fn with_hanja_table(mut self, table: HanjaTable) -> Self {
        self.hanja = Some(Arc::new(table));
        self
    }

    /// Returns the pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Returns the exclusion snapshot used by every run.
    pub fn exclusions(&self) -> &Exclusions {
        &self.exclusions
    }

    /// Runs the pipeline over one transcript.
    pub fn run(&self, transcript: &str) -> RankedCorpus {
        let candidates = segment_with(transcript, self.options.min_sentence_chars);

        let mut acceptor = SentenceAcceptor::new(&self.exclusions, self.analyzer.as_ref(), &self.options);
        if let Some(table) = &self.hanja {
            acceptor = acceptor.with_hanja_table(table);
        }

        let mut stats = RunStats {
            candidates: candidates.len(),
            ..RunStats::default()
        };
        let mut sentences = Vec::new();
        let mut words = Vec::new();

        for candidate in &candidates {
            match acceptor.process(candidate) {
                Ok(accepted) => {
                    stats.accepted += 1;
                    sentences.push(accepted.text);
                    words.extend(accepted.lemmas);
                }
                Err(rejection) => {
                    log::debug!("Rejected {:?}: {}", candidate, rejection);
                    stats.record(&rejection);
                }
            }
        }

        let corpus = RankedCorpus {
            sentences: top_k(sentences, self.options.sentence_limit),
            words: top_k(words, self.options.word_limit),
            stats,
        };

        log::info!(
            "Accepted {} of {} sentences ({} rejected); {} ranked words",
            stats.accepted,
            stats.candidates,
            stats.rejected(),
            corpus.words.len()
        );

        corpus
    }

    /// Runs the pipeline over many transcripts, in input order.
    ///
    /// Runs are independent; they are spread over the rayon pool unless
    /// `options.parallel` is false.
    pub fn run_batch<T>(&self, transcripts: &[T]) -> Vec<RankedCorpus>
    where
        T: AsRef<str> + Sync,
    {
        if self.options.parallel {
            transcripts.par_iter().map(|t| self.run(t.as_ref())).collect()
        } else {
            transcripts.iter().map(|t| self.run(t.as_ref())).collect()
        }
    }

    /// Transcribes an audio resource and runs the pipeline on the result.
    ///
    /// A missing or blank transcript is [`Error::EmptyTranscript`]; the
    /// pipeline is never run without input text.
    pub fn process_audio(&self, transcriber: &dyn Transcriber, audio: &Path) -> Result<RankedCorpus> {
        let transcript = transcriber
            .transcribe(audio)?
            .filter(|text| !text.trim().is_empty())
            .ok_or(Error::EmptyTranscript)?;

        log::debug!("Transcribed {} ({} chars)", audio.display(), transcript.chars().count());
        Ok(self.run(&transcript))
    }
}

fn analyzer_from_config(config: &CorpusConfig) -> Result<Arc<dyn MorphAnalyzer>> {
    if let Some(path) = &config.resources.lexicon {
        return Ok(Arc::new(LexiconAnalyzer::load(path)?));
    }

    #[cfg(feature = "lindera")]
    {
        Ok(Arc::new(crate::analyzer::LinderaAnalyzer::new()?))
    }

    #[cfg(not(feature = "lindera"))]
    {
        Err(Error::Config(
            "no analyzer available: set resources.lexicon or enable the 'lindera' feature".into(),
        ))
    }
}
