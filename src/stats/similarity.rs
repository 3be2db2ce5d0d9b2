// Pairwise vocabulary similarity.
//
// Both sides are reduced to vocabularies (duplicates collapse) before any
// measure is computed. Jaccard and the shared count are symmetric; the two
// overlap percentages are directional and swap when the arguments swap.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{percentage, round_to};

/// Cap on the shared-term sample carried for display.
pub const SHARED_SAMPLE_LIMIT: usize = 100;

/// Set-overlap measures between two vocabularies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRecord {
    pub shared_words: usize,
    pub unique_to_first: usize,
    pub unique_to_second: usize,
    /// |A ∩ B| / |A ∪ B|, 4 decimals
    pub jaccard_similarity: f64,
    /// |A ∩ B| / |A| × 100, 2 decimals
    pub overlap_percentage_first: f64,
    /// |A ∩ B| / |B| × 100, 2 decimals
    pub overlap_percentage_second: f64,
    /// First 100 shared terms in lexicographic order. Display only.
    pub shared_words_list: Vec<String>,
}

/// The set of distinct tokens in a sequence.
pub fn vocabulary<S: AsRef<str>>(tokens: &[S]) -> BTreeSet<&str> {
    tokens.iter().map(AsRef::as_ref).collect()
}

/// Compare two token sequences by vocabulary.
pub fn vocabulary_overlap<A: AsRef<str>, B: AsRef<str>>(first: &[A], second: &[B]) -> SimilarityRecord {
    compare_vocabularies(&vocabulary(first), &vocabulary(second))
}

/// Compare two precomputed vocabularies.
///
/// The pairwise matrix calls this directly so each document's vocabulary is
/// built once instead of once per pair.
pub fn compare_vocabularies(first: &BTreeSet<&str>, second: &BTreeSet<&str>) -> SimilarityRecord {
    // BTreeSet intersection yields tokens in sorted order, so the sample
    // needs no extra sort.
    let shared: Vec<&str> = first.intersection(second).copied().collect();
    let shared_count = shared.len();
    let union = first.len() + second.len() - shared_count;

    let jaccard = if union == 0 {
        0.0
    } else {
        round_to(shared_count as f64 / union as f64, 4)
    };

    SimilarityRecord {
        shared_words: shared_count,
        unique_to_first: first.len() - shared_count,
        unique_to_second: second.len() - shared_count,
        jaccard_similarity: jaccard,
        overlap_percentage_first: percentage(shared_count, first.len()),
        overlap_percentage_second: percentage(shared_count, second.len()),
        shared_words_list: shared
            .into_iter()
            .take(SHARED_SAMPLE_LIMIT)
            .map(str::to_string)
            .collect(),
    }
}
