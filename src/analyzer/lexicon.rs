//! Dictionary-driven analyzer.
//!
//! Loads a tagged lexicon (`surface<TAB>TAG[<TAB>lemma]`, one entry per line)
//! and tags each whitespace-delimited word by longest-prefix match:
//!
//! | Input run | Tag |
//! |-----------|-----|
//! | longest lexicon prefix | lexicon tag, lexicon lemma |
//! | remainder after the prefix (particles, endings) | `E` |
//! | word with no lexicon prefix | `UN` |
//! | digits | `SN` |
//! | unlisted Latin letters | `SL` |
//! | `.` `!` `?` | `SF` |
//! | other punctuation | `SP` |

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use super::{Analysis, MorphAnalyzer, Token};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
struct LexiconEntry {
    tag: String,
    lemma: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Punct,
    Digit,
    Latin,
    Word,
}

fn classify(c: char) -> CharClass {
    if c.is_numeric() {
        CharClass::Digit
    } else if c.is_ascii_alphabetic() {
        CharClass::Latin
    } else if c.is_alphanumeric() {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

/// Lexicon-backed analyzer producing a single deterministic parse.
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer {
    entries: HashMap<String, LexiconEntry>,
    /// Longest surface form in characters; bounds prefix search.
    max_chars: usize,
}

impl LexiconAnalyzer {
    /// Creates an analyzer with an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a lexicon entry. `lemma` defaults to the surface form.
    pub fn insert(&mut self, surface: &str, tag: &str, lemma: Option<&str>) {
        let surface = surface.trim().to_lowercase();
        if surface.is_empty() {
            return;
        }
        self.max_chars = self.max_chars.max(surface.chars().count());
        let lemma = lemma.map(str::to_string).unwrap_or_else(|| surface.clone());
        self.entries.insert(
            surface,
            LexiconEntry {
                tag: tag.trim().to_string(),
                lemma,
            },
        );
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_entry(mut self, surface: &str, tag: &str, lemma: Option<&str>) -> Self {
        self.insert(surface, tag, lemma);
        self
    }

    /// Reads a lexicon from TSV lines. Blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut analyzer = Self::new();
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut fields = trimmed.split('\t');
            match (fields.next(), fields.next()) {
                (Some(surface), Some(tag)) if !tag.trim().is_empty() => {
                    let lemma = fields.next().map(str::trim).filter(|l| !l.is_empty());
                    analyzer.insert(surface, tag, lemma);
                }
                _ => log::warn!("Skipping malformed lexicon line {}: {:?}", number + 1, line),
            }
        }
        Ok(analyzer)
    }

    /// Loads a lexicon file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let analyzer = Self::from_reader(std::io::BufReader::new(file))?;
        log::debug!(
            "Loaded {} lexicon entries from {}",
            analyzer.len(),
            path.as_ref().display()
        );
        Ok(analyzer)
    }

    /// Number of lexicon entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn tag_word(&self, word: &str, tokens: &mut Vec<Token>) {
        let mut rest = word;
        while let Some(first) = rest.chars().next() {
            let class = classify(first);
            let run_len = rest
                .char_indices()
                .find(|(_, c)| classify(*c) != class)
                .map_or(rest.len(), |(i, _)| i);
            let (run, tail) = rest.split_at(run_len);

            match class {
                CharClass::Punct => tokens.push(Token::uninflected(run, punct_tag(run))),
                CharClass::Digit => tokens.push(Token::uninflected(run, "SN")),
                CharClass::Latin => tokens.push(self.lookup(run).unwrap_or_else(|| Token::uninflected(run, "SL"))),
                CharClass::Word => self.tag_run(run, tokens),
            }

            rest = tail;
        }
    }

    fn tag_run(&self, run: &str, tokens: &mut Vec<Token>) {
        match self.longest_prefix(run) {
            Some((token, consumed)) => {
                tokens.push(token);
                let remainder = &run[consumed..];
                if !remainder.is_empty() {
                    tokens.push(Token::uninflected(remainder, "E"));
                }
            }
            None => tokens.push(Token::uninflected(run, "UN")),
        }
    }

    /// Longest lexicon entry that is a prefix of `run`, with its byte length.
    fn longest_prefix(&self, run: &str) -> Option<(Token, usize)> {
        let mut boundaries: Vec<usize> = run
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(run.len()))
            .take(self.max_chars)
            .collect();
        boundaries.reverse();

        boundaries
            .into_iter()
            .find_map(|end| self.lookup(&run[..end]).map(|token| (token, end)))
    }

    fn lookup(&self, surface: &str) -> Option<Token> {
        self.entries
            .get(surface)
            .map(|entry| Token::new(surface, entry.lemma.as_str(), entry.tag.as_str()))
    }
}

fn punct_tag(run: &str) -> &'static str {
    if run.chars().all(|c| matches!(c, '.' | '!' | '?')) {
        "SF"
    } else {
        "SP"
    }
}

impl MorphAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Analysis>> {
        let mut tokens = Vec::new();
        for word in text.split_whitespace() {
            self.tag_word(word, &mut tokens);
        }
        Ok(vec![Analysis::new(tokens)])
    }
}
