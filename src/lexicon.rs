//! Exclusion lists: profanity, stopwords and common names.
//!
//! Each list is loaded once from a line-delimited resource into an
//! [`ExclusionSet`] and never mutated afterwards. [`ExclusionStore`] hands out
//! immutable snapshots and swaps whole sets atomically on reload.

use std::collections::HashSet;
use std::fmt;
use std::io::BufRead;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::config::ResourcePaths;
use crate::error::{Error, Result};

/// Which exclusion list a set plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionRole {
    /// Sentences containing any entry are rejected.
    Profanity,
    /// Lemmas in this list never enter the word pool.
    Stopword,
    /// Person names; lemmas in this list never enter the word pool.
    CommonName,
}

impl fmt::Display for ExclusionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionRole::Profanity => write!(f, "profanity"),
            ExclusionRole::Stopword => write!(f, "stopword"),
            ExclusionRole::CommonName => write!(f, "common-name"),
        }
    }
}

/// A set of normalized (NFC, trimmed, lowercased) entries with O(1) membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    entries: HashSet<String>,
}

impl ExclusionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set from in-memory entries.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|entry| normalize_entry(entry.as_ref()))
            .collect();
        Self { entries }
    }

    /// Reads one entry per line. Blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }
        Ok(Self::from_entries(lines))
    }

    /// Decodes a raw resource (UTF-8, or EUC-KR with `legacy-encoding`).
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let text = decode_resource(data)?;
        Ok(Self::from_entries(text.lines()))
    }

    /// Loads a list from disk.
    ///
    /// A missing or unreadable file is a [`Error::ResourceLoad`]; there is no
    /// fallback to an empty set.
    pub fn load(role: ExclusionRole, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| Error::ResourceLoad {
            role,
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_bytes(&data)?;
        log::debug!("Loaded {} {} entries from {}", set.len(), role, path.display());
        Ok(set)
    }

    /// Returns true if the word is in the set.
    pub fn contains(&self, word: &str) -> bool {
        if self.entries.contains(word) {
            return true;
        }
        normalize_entry(word).is_some_and(|normalized| self.entries.contains(&normalized))
    }

    /// Returns the smallest entry that occurs anywhere inside `text`.
    ///
    /// This is a raw substring test: an entry embedded in a longer,
    /// legitimate word also matches.
    pub fn find_in(&self, text: &str) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let haystack: String = text.nfc().collect::<String>().to_lowercase();
        self.entries
            .iter()
            .filter(|entry| haystack.contains(entry.as_str()))
            .min()
            .map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

fn normalize_entry(entry: &str) -> Option<String> {
    let trimmed = entry.trim().trim_start_matches('\u{FEFF}');
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(trimmed.nfc().collect::<String>().to_lowercase())
}

fn decode_resource(data: &[u8]) -> Result<String> {
    match String::from_utf8(data.to_vec()) {
        Ok(text) => Ok(text),
        Err(err) => decode_legacy(err.as_bytes()),
    }
}

#[cfg(feature = "legacy-encoding")]
fn decode_legacy(data: &[u8]) -> Result<String> {
    let (text, _, had_errors) = encoding_rs::EUC_KR.decode(data);
    if had_errors {
        return Err(Error::Encoding(
            "resource is neither UTF-8 nor EUC-KR".into(),
        ));
    }
    Ok(text.into_owned())
}

#[cfg(not(feature = "legacy-encoding"))]
fn decode_legacy(_data: &[u8]) -> Result<String> {
    Err(Error::Encoding(
        "resource is not valid UTF-8 (enable 'legacy-encoding' for EUC-KR)".into(),
    ))
}

/// The three exclusion lists used by one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    pub profanities: ExclusionSet,
    pub stopwords: ExclusionSet,
    pub common_names: ExclusionSet,
}

impl Exclusions {
    /// Creates exclusions from three sets.
    pub fn new(profanities: ExclusionSet, stopwords: ExclusionSet, common_names: ExclusionSet) -> Self {
        Self {
            profanities,
            stopwords,
            common_names,
        }
    }

    /// Exclusions that filter nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads all three lists, failing on the first missing resource.
    pub fn load(paths: &ResourcePaths) -> Result<Self> {
        Ok(Self {
            profanities: ExclusionSet::load(ExclusionRole::Profanity, &paths.profanities)?,
            stopwords: ExclusionSet::load(ExclusionRole::Stopword, &paths.stopwords)?,
            common_names: ExclusionSet::load(ExclusionRole::CommonName, &paths.common_names)?,
        })
    }

    /// Returns the set playing the given role.
    pub fn get(&self, role: ExclusionRole) -> &ExclusionSet {
        match role {
            ExclusionRole::Profanity => &self.profanities,
            ExclusionRole::Stopword => &self.stopwords,
            ExclusionRole::CommonName => &self.common_names,
        }
    }

    /// Replaces the set playing the given role.
    pub fn with(mut self, role: ExclusionRole, set: ExclusionSet) -> Self {
        match role {
            ExclusionRole::Profanity => self.profanities = set,
            ExclusionRole::Stopword => self.stopwords = set,
            ExclusionRole::CommonName => self.common_names = set,
        }
        self
    }
}

/// Process-wide holder of the current exclusion snapshot.
///
/// Runs take an `Arc` snapshot and keep using it even if a reload happens
/// concurrently; a reload never exposes a partially updated set.
#[derive(Debug, Default)]
pub struct ExclusionStore {
    current: RwLock<Arc<Exclusions>>,
}

impl ExclusionStore {
    /// Creates a store holding the given exclusions.
    pub fn new(exclusions: Exclusions) -> Self {
        Self {
            current: RwLock::new(Arc::new(exclusions)),
        }
    }

    /// Loads all three lists from disk into a new store.
    pub fn load(paths: &ResourcePaths) -> Result<Self> {
        Ok(Self::new(Exclusions::load(paths)?))
    }

    /// Returns the current immutable snapshot.
    pub fn snapshot(&self) -> Arc<Exclusions> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swaps in a complete new set of exclusions.
    pub fn replace_all(&self, exclusions: Exclusions) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(exclusions);
    }

    /// Swaps one list, keeping the other two.
    pub fn replace(&self, role: ExclusionRole, set: ExclusionSet) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let updated = Exclusions::clone(&guard).with(role, set);
        *guard = Arc::new(updated);
    }

    /// Reloads all lists from disk. On failure the current snapshot is kept.
    pub fn reload(&self, paths: &ResourcePaths) -> Result<()> {
        let exclusions = Exclusions::load(paths)?;
        self.replace_all(exclusions);
        log::info!("Reloaded exclusion lists");
        Ok(())
    }
}
