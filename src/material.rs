//! Prompt shaping for the downstream material generator.
//!
//! The generator receives ranked sentences as a bulleted list of plain text
//! and ranked words as one comma-separated line. A prompt template file holds
//! a system part and a user part separated by [`USER_MARKER`]; the user part
//! refers to `{sentences}` and `{words}`.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::pipeline::RankedCorpus;
use crate::rank::RankedItem;

/// Separates the system message from the user message.
pub const USER_MARKER: &str = "[사용자 메시지]";

/// Optional header line in front of the system message.
pub const SYSTEM_HEADER: &str = "[시스템 메시지]";

/// Matches `{{`, `}}` and `{name}` placeholders.
static RE_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").unwrap());

/// Formats sentences one per line with a `- ` bullet. Counts are dropped.
pub fn format_sentences(sentences: &[RankedItem<String>]) -> String {
    sentences
        .iter()
        .map(|ranked| format!("- {}", ranked.item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats words as a flat comma-separated list. Counts are dropped.
pub fn format_words(words: &[RankedItem<String>]) -> String {
    words
        .iter()
        .map(|ranked| ranked.item.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The two chat messages sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialPrompt {
    pub system: String,
    pub user: String,
}

/// A parsed prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    system: String,
    user: String,
}

impl PromptTemplate {
    /// Splits template content on [`USER_MARKER`].
    ///
    /// CRLF line endings are read as LF. The leading [`SYSTEM_HEADER`] line
    /// is removed from the system part and both parts are trimmed.
    pub fn parse(content: &str) -> Result<Self> {
        let content = content.replace("\r\n", "\n");
        let (system, user) = content
            .split_once(USER_MARKER)
            .ok_or_else(|| Error::Template(format!("missing {} marker", USER_MARKER)))?;

        if user.contains(USER_MARKER) {
            return Err(Error::Template(format!("more than one {} marker", USER_MARKER)));
        }

        let system = system.replacen(&format!("{}\n", SYSTEM_HEADER), "", 1);
        Ok(Self {
            system: system.trim().to_string(),
            user: user.trim().to_string(),
        })
    }

    /// Reads and parses a template file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The system message.
    pub fn system(&self) -> &str {
        &self.system
    }

    /// The unrendered user message.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Fills the user message from a ranked corpus.
    pub fn render(&self, corpus: &RankedCorpus) -> Result<MaterialPrompt> {
        let sentences = format_sentences(&corpus.sentences);
        let words = format_words(&corpus.words);

        let mut user = String::with_capacity(self.user.len() + sentences.len() + words.len());
        let mut last = 0;
        for caps in RE_PLACEHOLDER.captures_iter(&self.user) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            user.push_str(&self.user[last..whole.start()]);
            match (whole.as_str(), caps.get(1).map(|m| m.as_str().trim())) {
                ("{{", _) => user.push('{'),
                ("}}", _) => user.push('}'),
                (_, Some("sentences")) => user.push_str(&sentences),
                (_, Some("words")) => user.push_str(&words),
                (_, Some(name)) => {
                    return Err(Error::Template(format!("unknown placeholder {{{}}}", name)));
                }
                (brace, None) => {
                    return Err(Error::Template(format!("unmatched '{}' in user message", brace)));
                }
            }
            last = whole.end();
        }
        user.push_str(&self.user[last..]);

        Ok(MaterialPrompt {
            system: self.system.clone(),
            user,
        })
    }
}
