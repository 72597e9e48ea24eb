//! ko-dic morphological analyzer backed by lindera.

use lindera::dictionary::load_dictionary;
use lindera::mode::Mode;
use lindera::segmenter::Segmenter;
use lindera::tokenizer::Tokenizer;

use super::{Analysis, MorphAnalyzer, Token};
use crate::error::{Error, Result};

/// ko-dic detail field holding the morpheme decomposition of inflected forms,
/// e.g. `만나/VV/*+았/EP/*`.
const EXPRESSION_FIELD: usize = 7;

/// Analyzer using the embedded ko-dic (mecab-ko) dictionary.
///
/// ko-dic produces a single best segmentation, so [`MorphAnalyzer::analyze`]
/// always returns exactly one candidate.
pub struct LinderaAnalyzer {
    tokenizer: Tokenizer,
}

impl LinderaAnalyzer {
    /// Loads the embedded ko-dic dictionary.
    pub fn new() -> Result<Self> {
        let dictionary = load_dictionary("embedded://ko-dic")
            .map_err(|e| Error::Analysis(format!("failed to load ko-dic: {}", e)))?;
        let segmenter = Segmenter::new(Mode::Normal, dictionary, None);
        Ok(Self {
            tokenizer: Tokenizer::new(segmenter),
        })
    }
}

impl MorphAnalyzer for LinderaAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Analysis>> {
        let tokens = self
            .tokenizer
            .tokenize(text)
            .map_err(|e| Error::Analysis(e.to_string()))?;

        let mut result = Vec::with_capacity(tokens.len());
        for mut token in tokens {
            // Copy surface before mutable borrow for details()
            let form = token.surface.as_ref().to_string();
            let details = token.details();

            let tag = match details.first() {
                Some(tag) if *tag != "UNK" => tag.to_string(),
                _ => "UN".to_string(),
            };
            let expression = details.get(EXPRESSION_FIELD).copied().unwrap_or("*");
            let lemma = lemma_of(&form, &tag, expression);

            result.push(Token::new(form, lemma, tag));
        }

        Ok(vec![Analysis::new(result)])
    }
}

/// Verbs and adjectives are lemmatized as stem + "다"; everything else keeps
/// its surface form.
fn lemma_of(form: &str, tag: &str, expression: &str) -> String {
    if !(tag.starts_with("VV") || tag.starts_with("VA")) {
        return form.to_string();
    }

    let stem = match expression {
        "*" | "" => form,
        _ => expression.split('/').next().unwrap_or(form),
    };
    format!("{}다", stem)
}
