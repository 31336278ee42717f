// Corpus vocabulary extraction.
//
// Joins every document, strips punctuation and quote characters, lowercases,
// splits on whitespace, lemmatizes each token and deduplicates. The result is
// the set of distinct base forms used anywhere in the corpus.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use regex_lite::Regex;
use stop_words::{get, LANGUAGE};
use tracing::info;

use super::lexicon;
use super::traits::Lemmatizer;
use super::wordnet::{PartOfSpeech, WordNetLemmatizer};

/// Characters removed before tokenizing: brackets, sentence punctuation,
/// straight and curly quotes, backtick and acute accent.
pub const STRIPPED_CHARS: &str = "().,;:!?'’`´“”\"";

/// Remove every character of [`STRIPPED_CHARS`] from `text`.
pub fn strip_punctuation(text: &str) -> Result<String> {
    let pattern = format!("[{}]", regex_lite::escape(STRIPPED_CHARS));
    let re = Regex::new(&pattern).context("Failed to compile punctuation pattern")?;
    Ok(re.replace_all(text, "").into_owned())
}

/// Join documents, strip punctuation, lowercase and split into tokens.
pub fn tokenize(texts: &[String]) -> Result<Vec<String>> {
    let joined = texts.join(" ");
    let stripped = strip_punctuation(&joined)?;
    Ok(stripped
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect())
}

/// Vocabulary extractor over a pluggable lemmatizer.
pub struct VocabularyExtractor<L: Lemmatizer> {
    pub lemmatizer: L,
    /// Drop English stop words after lemmatization
    pub filter_stop_words: bool,
}

impl<L: Lemmatizer> VocabularyExtractor<L> {
    pub fn new(lemmatizer: L) -> Self {
        Self {
            lemmatizer,
            filter_stop_words: false,
        }
    }

    /// Extract the distinct lemmas used across `texts`, sorted.
    ///
    /// An empty corpus yields an empty vocabulary.
    pub fn extract(&self, texts: &[String]) -> Result<Vec<String>> {
        let tokens = tokenize(texts)?;
        let token_count = tokens.len();

        let mut words: BTreeSet<String> = tokens
            .iter()
            .map(|t| self.lemmatizer.lemmatize(t))
            .collect();

        if self.filter_stop_words {
            let stop_words: Vec<String> = get(LANGUAGE::English);
            for word in &stop_words {
                words.remove(word);
            }
        }

        info!(
            documents = texts.len(),
            tokens = token_count,
            unique = words.len(),
            "Extracted vocabulary"
        );

        Ok(words.into_iter().collect())
    }
}

/// Extract a vocabulary using the process-wide WordNet lexicon, lemmatizing
/// every token as a noun.
///
/// Fails if `lexicon::init` has not been called.
pub fn unique_words(texts: &[String]) -> Result<Vec<String>> {
    let lemmatizer = WordNetLemmatizer::new(lexicon::get()?, PartOfSpeech::Noun);
    VocabularyExtractor::new(lemmatizer).extract(texts)
}
