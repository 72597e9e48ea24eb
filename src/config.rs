//! TOML configuration: resource locations and pipeline options.
//!
//! ```toml
//! [resources]
//! profanities = "fword_list.txt"
//! stopwords = "korean_stopwords.txt"
//! common_names = "common_names.txt"
//! lexicon = "lexicon.tsv"
//!
//! [pipeline]
//! sentence_limit = 5
//! word_limit = 20
//! ```
//!
//! Every key is optional. Relative paths are resolved against the directory
//! containing the configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::PipelineOptions;

/// Locations of the external line-delimited resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePaths {
    /// Profanity list, one entry per line.
    pub profanities: PathBuf,
    /// Korean stopword list, one entry per line.
    pub stopwords: PathBuf,
    /// Common person names, one entry per line.
    pub common_names: PathBuf,
    /// Optional tagged lexicon for the dictionary analyzer.
    pub lexicon: Option<PathBuf>,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            profanities: PathBuf::from("fword_list.txt"),
            stopwords: PathBuf::from("korean_stopwords.txt"),
            common_names: PathBuf::from("common_names.txt"),
            lexicon: None,
        }
    }
}

impl ResourcePaths {
    /// Default file names located in `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::default().resolved_against(dir)
    }

    /// Makes relative paths relative to `base`.
    pub fn resolved_against(self, base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        let resolve = |path: PathBuf| {
            if path.is_relative() {
                base.join(path)
            } else {
                path
            }
        };
        Self {
            profanities: resolve(self.profanities),
            stopwords: resolve(self.stopwords),
            common_names: resolve(self.common_names),
            lexicon: self.lexicon.map(resolve),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub resources: ResourcePaths,
    pub pipeline: PipelineOptions,
}

impl CorpusConfig {
    /// Parses configuration from a TOML string. Paths are left as written.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a file, resolving relative resource paths
    /// against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;

        if let Some(dir) = path.parent() {
            config.resources = config.resources.resolved_against(dir);
        }

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = CorpusConfig::default();
        assert_eq!(config.resources.profanities, PathBuf::from("fword_list.txt"));
        assert_eq!(config.resources.stopwords, PathBuf::from("korean_stopwords.txt"));
        assert_eq!(config.resources.common_names, PathBuf::from("common_names.txt"));
        assert_eq!(config.pipeline.sentence_limit, 5);
        assert_eq!(config.pipeline.word_limit, 20);
    }

    #[test]
    fn test_partial_toml() {
        let config = CorpusConfig::from_toml_str(
            "[pipeline]\nword_limit = 10\n\n[resources]\nstopwords = \"stop.txt\"\n",
        )
        .unwrap();
        assert_eq!(config.pipeline.word_limit, 10);
        assert_eq!(config.pipeline.sentence_limit, 5);
        assert_eq!(config.resources.stopwords, PathBuf::from("stop.txt"));
        assert_eq!(config.resources.profanities, PathBuf::from("fword_list.txt"));
    }

    #[test]
    fn test_malformed_toml() {
        let result = CorpusConfig::from_toml_str("[pipeline\nword_limit = ");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kocorpus.toml");
        std::fs::write(&path, "[resources]\nlexicon = \"lexicon.tsv\"\n").unwrap();

        let config = CorpusConfig::load(&path).unwrap();
        assert_eq!(config.resources.stopwords, dir.path().join("korean_stopwords.txt"));
        assert_eq!(config.resources.lexicon, Some(dir.path().join("lexicon.tsv")));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CorpusConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(CorpusConfig::from_toml_str(&text).unwrap(), config);
    }
}
