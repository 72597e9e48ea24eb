//! Error types for kocorpus library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::lexicon::ExclusionRole;

/// Result type alias for kocorpus operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for kocorpus library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An exclusion list could not be loaded at initialization.
    #[error("Failed to load {role} list from {}: {source}", path.display())]
    ResourceLoad {
        role: ExclusionRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Text encoding error.
    #[error("Text encoding error: {0}")]
    Encoding(String),

    /// The morphological analyzer failed on a sentence.
    #[error("Morphological analysis failed: {0}")]
    Analysis(String),

    /// Upstream produced no transcript to work on.
    #[error("Transcript is empty")]
    EmptyTranscript,

    /// The transcription collaborator failed.
    #[error("Transcription failed: {0}")]
    Transcription(String),

    /// Malformed configuration file.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed prompt template.
    #[error("Template error: {0}")]
    Template(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
