// Plain text -> Document.
//
// Tokenization, stopword removal and lemmatization belong to an upstream
// normalization service. This adapter is a lightweight stand-in so the CLI
// can run straight from a directory of .txt files; anything better can be
// plugged in through the TextNormalizer trait.

use std::collections::HashSet;
use std::sync::Arc;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

use super::document::Document;
use crate::error::Result;

/// Turns raw text into a pre-tokenized document.
pub trait TextNormalizer {
    fn normalize(&self, id: &str, text: &str) -> Document;
}

/// Immutable normalizer settings, built once and shared.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    pub stopwords: HashSet<String>,
}

impl NormalizerConfig {
    /// English stopwords from the `stop-words` crate.
    pub fn english() -> Self {
        let stopwords: Vec<String> = get(LANGUAGE::English);
        Self {
            stopwords: stopwords.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

/// Regex sentence splitting, alphabetic tokens, stopword filtering and a
/// plural-stripping lemmatizer.
pub struct BasicNormalizer {
    config: Arc<NormalizerConfig>,
    sentence_boundary: Regex,
}

impl BasicNormalizer {
    pub fn new(config: Arc<NormalizerConfig>) -> Result<Self> {
        Ok(Self {
            config,
            sentence_boundary: Regex::new(r"[.!?]+(\s+|$)")?,
        })
    }

    /// Sentences as word counts; empty pieces are dropped.
    pub fn sentence_word_counts(&self, text: &str) -> Vec<usize> {
        self.sentence_boundary
            .split(text)
            .map(|s| s.split_whitespace().count())
            .filter(|&n| n > 0)
            .collect()
    }
}

impl TextNormalizer for BasicNormalizer {
    fn normalize(&self, id: &str, text: &str) -> Document {
        let cleaned = text.split_whitespace().collect::<Vec<_>>().join(" ");

        let lowercase_tokens: Vec<String> = cleaned
            .split(|c: char| !c.is_alphabetic())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();

        let lemmatized_tokens: Vec<String> = lowercase_tokens
            .iter()
            .filter(|t| !self.config.stopwords.contains(t.as_str()))
            .map(|t| lemmatize(t))
            .collect();

        let sentence_word_counts = self.sentence_word_counts(&cleaned);

        Document::new(id, lowercase_tokens, lemmatized_tokens, sentence_word_counts)
    }
}

/// Reduce regular English noun plurals to their singular.
pub fn lemmatize(word: &str) -> String {
    let len = word.chars().count();
    if len <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.ends_with(['s', 'u', 'i']) => stem.to_string(),
        _ => word.to_string(),
    }
}
