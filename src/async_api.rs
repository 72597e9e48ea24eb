//! Async API for non-blocking corpus extraction.
//!
//! Enable the `async` feature to use these APIs:
//!
//! ```toml
//! [dependencies]
//! kocorpus = { version = "0.1", features = ["async"] }
//! ```

use std::path::Path;

use tokio::fs;

use crate::config::ResourcePaths;
use crate::error::{Error, Result};
use crate::lexicon::{ExclusionRole, ExclusionSet, ExclusionStore, Exclusions};
use crate::pipeline::{Pipeline, RankedCorpus};

fn join_error(e: tokio::task::JoinError) -> Error {
    Error::Io(std::io::Error::other(e.to_string()))
}

/// Asynchronously loads one exclusion list.
pub async fn load_exclusion_set(role: ExclusionRole, path: impl AsRef<Path>) -> Result<ExclusionSet> {
    let path = path.as_ref();
    let data = fs::read(path).await.map_err(|source| Error::ResourceLoad {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    ExclusionSet::from_bytes(&data)
}

/// Asynchronously loads all three exclusion lists concurrently.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> kocorpus::Result<()> {
/// use kocorpus::config::ResourcePaths;
///
/// let exclusions = kocorpus::async_api::load_exclusions(&ResourcePaths::in_dir("data")).await?;
/// println!("Stopwords: {}", exclusions.stopwords.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_exclusions(paths: &ResourcePaths) -> Result<Exclusions> {
    let (profanities, stopwords, common_names) = tokio::try_join!(
        load_exclusion_set(ExclusionRole::Profanity, &paths.profanities),
        load_exclusion_set(ExclusionRole::Stopword, &paths.stopwords),
        load_exclusion_set(ExclusionRole::CommonName, &paths.common_names),
    )?;
    Ok(Exclusions::new(profanities, stopwords, common_names))
}

/// Asynchronously reloads a store. On failure the current snapshot is kept.
pub async fn reload(store: &ExclusionStore, paths: &ResourcePaths) -> Result<()> {
    let exclusions = load_exclusions(paths).await?;
    store.replace_all(exclusions);
    log::info!("Reloaded exclusion lists");
    Ok(())
}

/// Runs the pipeline on a blocking thread.
pub async fn run(pipeline: &Pipeline, transcript: impl Into<String>) -> Result<RankedCorpus> {
    // Analysis is CPU-bound
    let pipeline = pipeline.clone();
    let transcript = transcript.into();
    tokio::task::spawn_blocking(move || pipeline.run(&transcript))
        .await
        .map_err(join_error)
}

/// Reads a transcript file and runs the pipeline on it.
///
/// A blank file is [`Error::EmptyTranscript`].
///
/// # Example
///
/// ```no_run
/// # async fn example(pipeline: kocorpus::Pipeline) -> kocorpus::Result<()> {
/// let corpus = kocorpus::async_api::run_file(&pipeline, "transcript.txt").await?;
/// for word in &corpus.words {
///     println!("{} ({})", word.item, word.count);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn run_file(pipeline: &Pipeline, path: impl AsRef<Path>) -> Result<RankedCorpus> {
    let data = fs::read(path).await?;
    let transcript = String::from_utf8(data)?;
    if transcript.trim().is_empty() {
        return Err(Error::EmptyTranscript);
    }
    run(pipeline, transcript).await
}
