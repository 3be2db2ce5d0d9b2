// Sentence-length and word-length distribution statistics.

use serde::{Deserialize, Serialize};

use super::round_to;

/// Words longer than this many characters count as "long".
pub const LONG_WORD_CHARS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceStats {
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub median_sentence_length: f64,
    pub min_sentence_length: usize,
    pub max_sentence_length: usize,
    /// Population standard deviation
    pub std_sentence_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordStats {
    pub avg_word_length: f64,
    pub median_word_length: f64,
    pub long_words: usize,
    pub long_word_ratio: f64,
}

/// Statistics over sentence word counts. `None` for no sentences.
pub fn sentence_stats(sentence_word_counts: &[usize]) -> Option<SentenceStats> {
    let min = *sentence_word_counts.iter().min()?;
    let max = *sentence_word_counts.iter().max()?;

    let lengths: Vec<f64> = sentence_word_counts.iter().map(|&n| n as f64).collect();
    let mean = mean(&lengths);

    Some(SentenceStats {
        sentence_count: sentence_word_counts.len(),
        avg_sentence_length: round_to(mean, 2),
        median_sentence_length: round_to(median(&lengths), 2),
        min_sentence_length: min,
        max_sentence_length: max,
        std_sentence_length: round_to(population_std(&lengths, mean), 2),
    })
}

/// Statistics over token character lengths. `None` for no tokens.
pub fn word_stats<S: AsRef<str>>(tokens: &[S]) -> Option<WordStats> {
    if tokens.is_empty() {
        return None;
    }

    let lengths: Vec<usize> = tokens.iter().map(|t| t.as_ref().chars().count()).collect();
    let long_words = lengths.iter().filter(|&&len| len > LONG_WORD_CHARS).count();
    let as_f64: Vec<f64> = lengths.iter().map(|&n| n as f64).collect();

    Some(WordStats {
        avg_word_length: round_to(mean(&as_f64), 2),
        median_word_length: round_to(median(&as_f64), 2),
        long_words,
        long_word_ratio: round_to(long_words as f64 / tokens.len() as f64, 4),
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Middle value, or the mean of the two middle values for even lengths.
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn population_std(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
