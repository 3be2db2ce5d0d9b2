// Group-level vocabulary comparison between two corpora.
//
// Each corpus is the concatenation of its documents' lemmatized tokens in
// input order. The comparison is pairwise similarity lifted to group level,
// plus frequency information: which shared terms both groups lean on, and
// which terms each group uses that the other never does.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::frequency::{count_tokens, most_common, FrequencyRanking};
use super::percentage;

/// Shared terms retained on the comparison for downstream use.
pub const SHARED_RETAINED: usize = 100;
/// Shared terms included in the report.
pub const SHARED_REPORTED: usize = 50;
/// Unique terms reported per corpus.
pub const UNIQUE_REPORTED: usize = 30;

/// One shared term with its frequency in each corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedTerm {
    pub word: String,
    pub first_count: usize,
    pub second_count: usize,
    pub total: usize,
}

/// Comparison of two named corpora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusComparison {
    pub first_group: String,
    pub second_group: String,
    pub first_vocabulary_size: usize,
    pub second_vocabulary_size: usize,
    pub shared_vocabulary: usize,
    pub first_unique: usize,
    pub second_unique: usize,
    /// |shared| / |union| × 100
    pub overlap_percentage: f64,
    /// |shared| / |first vocabulary| × 100: how much of the first group's
    /// vocabulary the second group also uses
    pub second_uses_first: f64,
    pub top_shared_words: Vec<SharedTerm>,
    pub top_first_unique: FrequencyRanking,
    pub top_second_unique: FrequencyRanking,
    /// Wider shared ranking kept for chaining into further analysis
    #[serde(skip)]
    pub shared_terms: Vec<SharedTerm>,
}

/// A named corpus: the group name and its concatenated token stream.
pub struct Corpus<'a> {
    pub name: &'a str,
    pub tokens: Vec<&'a str>,
}

impl<'a> Corpus<'a> {
    /// Concatenate token sequences in the order given.
    pub fn concat<I, S>(name: &'a str, sequences: I) -> Self
    where
        I: IntoIterator<Item = &'a [S]>,
        S: AsRef<str> + 'a,
    {
        let tokens: Vec<&'a str> = sequences
            .into_iter()
            .flat_map(|seq| seq.iter().map(|t| t.as_ref()))
            .collect();
        Self { name, tokens }
    }
}

/// Compare two corpora.
pub fn compare_corpora(first: &Corpus<'_>, second: &Corpus<'_>) -> CorpusComparison {
    let first_counts = count_tokens(&first.tokens);
    let second_counts = count_tokens(&second.tokens);

    let first_vocab: HashSet<&str> = first_counts.keys().copied().collect();
    let second_vocab: HashSet<&str> = second_counts.keys().copied().collect();

    let shared_count = first_vocab.intersection(&second_vocab).count();
    let union = first_vocab.len() + second_vocab.len() - shared_count;

    // Walk the first corpus's counts (first-seen order) so the pre-sort
    // order is fixed; the final order is (-total, word) either way.
    let mut shared_terms: Vec<SharedTerm> = first_counts
        .iter()
        .filter_map(|(word, &first_count)| {
            let second_count = *second_counts.get(word)?;
            Some(SharedTerm {
                word: word.to_string(),
                first_count,
                second_count,
                total: first_count + second_count,
            })
        })
        .collect();
    shared_terms.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.word.cmp(&b.word)));
    shared_terms.truncate(SHARED_RETAINED);

    let first_only: Vec<&str> = first
        .tokens
        .iter()
        .copied()
        .filter(|t| !second_vocab.contains(t))
        .collect();
    let second_only: Vec<&str> = second
        .tokens
        .iter()
        .copied()
        .filter(|t| !first_vocab.contains(t))
        .collect();

    CorpusComparison {
        first_group: first.name.to_string(),
        second_group: second.name.to_string(),
        first_vocabulary_size: first_vocab.len(),
        second_vocabulary_size: second_vocab.len(),
        shared_vocabulary: shared_count,
        first_unique: first_vocab.len() - shared_count,
        second_unique: second_vocab.len() - shared_count,
        overlap_percentage: percentage(shared_count, union),
        second_uses_first: percentage(shared_count, first_vocab.len()),
        top_shared_words: shared_terms.iter().take(SHARED_REPORTED).cloned().collect(),
        top_first_unique: most_common(&first_only, UNIQUE_REPORTED),
        top_second_unique: most_common(&second_only, UNIQUE_REPORTED),
        shared_terms,
    }
}
