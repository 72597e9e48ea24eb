//! Hanja to Hangul substitution.
//!
//! Every Han character with a known reading is replaced by its Korean
//! phonetic reading. Readings are stored in dictionary form; the initial-sound
//! rule (두음법칙) is applied when a Hanja starts a word, so `李` alone reads
//! `이` while `金李` reads `금리`.

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::LazyLock;

use crate::error::Result;

const BUILTIN_TABLE: &str = include_str!("../data/hanja.tsv");

static BUILTIN: LazyLock<HanjaTable> = LazyLock::new(|| {
    let mut table = HanjaTable::empty();
    for line in BUILTIN_TABLE.lines() {
        if let Some((hanja, reading)) = parse_line(line) {
            table.insert(hanja, reading);
        }
    }
    table
});

// Hangul syllable arithmetic (U+AC00 + (initial * 21 + medial) * 28 + final)
const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const MEDIAL_COUNT: u32 = 21;
const FINAL_COUNT: u32 = 28;

const INITIAL_NIEUN: u32 = 2;
const INITIAL_RIEUL: u32 = 5;
const INITIAL_IEUNG: u32 = 11;

/// ㅑ ㅕ ㅖ ㅛ ㅠ ㅣ
const IOTIZED_MEDIALS: [u32; 6] = [2, 6, 7, 12, 17, 20];

/// Mapping from Han characters to their Hangul reading.
#[derive(Debug, Clone, Default)]
pub struct HanjaTable {
    readings: HashMap<char, char>,
}

impl HanjaTable {
    /// Returns the compiled-in reading table.
    pub fn builtin() -> &'static HanjaTable {
        &BUILTIN
    }

    /// Creates a table with no readings.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads a table from `<hanja><TAB><reading>` lines.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::empty();
        table.extend_from_reader(reader)?;
        Ok(table)
    }

    /// Adds readings from `<hanja><TAB><reading>` lines, overriding existing entries.
    ///
    /// Returns the number of entries read. Malformed lines are skipped.
    pub fn extend_from_reader<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut count = 0;
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            match parse_line(&line) {
                Some((hanja, reading)) => {
                    self.insert(hanja, reading);
                    count += 1;
                }
                None if is_skippable(&line) => {}
                None => log::warn!("Skipping malformed hanja table line {}: {:?}", number + 1, line),
            }
        }
        Ok(count)
    }

    /// Inserts or replaces a reading.
    pub fn insert(&mut self, hanja: char, reading: char) {
        self.readings.insert(hanja, reading);
    }

    /// Returns the dictionary-form reading of a Han character.
    pub fn reading(&self, hanja: char) -> Option<char> {
        self.readings.get(&hanja).copied()
    }

    /// Number of known readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Returns true if the table has no readings.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Replaces every Han character with a known reading.
    ///
    /// Unknown Han characters are kept as-is.
    pub fn substitute(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut previous: Option<char> = None;

        for c in text.chars() {
            match self.reading(c).filter(|_| is_hanja(c)) {
                Some(reading) if starts_word(previous) => {
                    result.push(apply_initial_sound_rule(reading))
                }
                Some(reading) => result.push(reading),
                None => result.push(c),
            }
            previous = Some(c);
        }

        result
    }
}

/// Substitutes Hanja using the built-in table.
pub fn substitute(text: &str) -> String {
    HanjaTable::builtin().substitute(text)
}

/// Check if character is a Han ideograph
pub fn is_hanja(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' // CJK Unified Ideographs
        | '\u{3400}'..='\u{4DBF}' // CJK Extension A
        | '\u{F900}'..='\u{FAFF}' // CJK Compatibility Ideographs
    )
}

fn is_hangul_syllable(c: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(c as u32))
}

/// A Hanja starts a word unless it follows another Hanja or a Hangul syllable.
fn starts_word(previous: Option<char>) -> bool {
    match previous {
        None => true,
        Some(p) => !is_hanja(p) && !is_hangul_syllable(p),
    }
}

/// Applies the initial-sound rule to a word-initial reading.
///
/// - ㄴ, ㄹ before ㅑ ㅕ ㅖ ㅛ ㅠ ㅣ become ㅇ (녀 → 여, 리 → 이)
/// - ㄹ before any other vowel becomes ㄴ (로 → 노, 래 → 내)
fn apply_initial_sound_rule(reading: char) -> char {
    if !is_hangul_syllable(reading) {
        return reading;
    }

    let index = reading as u32 - SYLLABLE_BASE;
    let initial = index / (MEDIAL_COUNT * FINAL_COUNT);
    let medial = (index / FINAL_COUNT) % MEDIAL_COUNT;
    let final_consonant = index % FINAL_COUNT;

    let replaced = match initial {
        INITIAL_NIEUN | INITIAL_RIEUL if IOTIZED_MEDIALS.contains(&medial) => INITIAL_IEUNG,
        INITIAL_RIEUL => INITIAL_NIEUN,
        _ => return reading,
    };

    let code = SYLLABLE_BASE + (replaced * MEDIAL_COUNT + medial) * FINAL_COUNT + final_consonant;
    char::from_u32(code).unwrap_or(reading)
}

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn parse_line(line: &str) -> Option<(char, char)> {
    if is_skippable(line) {
        return None;
    }

    let mut fields = line.trim().split('\t');
    let hanja = single_char(fields.next()?)?;
    let reading = single_char(fields.next()?)?;

    if is_hanja(hanja) && is_hangul_syllable(reading) {
        Some((hanja, reading))
    } else {
        None
    }
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.trim().chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}
