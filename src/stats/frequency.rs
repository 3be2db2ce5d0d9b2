// Frequency rankings.
//
// Counts are accumulated in an IndexMap so iteration follows first-seen
// order, then sorted with a stable sort on count alone. Tokens with equal
// counts therefore keep the order they first appeared in, so the ranking is
// reproducible regardless of hashing.

use std::collections::HashSet;

use indexmap::IndexMap;

/// Ordered `(token, count)` pairs, descending by count.
pub type FrequencyRanking = Vec<(String, usize)>;

/// Generic discourse fillers that dominate raw counts without saying much
/// about the text.
pub const NEAR_STOPWORDS: &[&str] = &[
    "said", "one", "upon", "like", "would", "also", "may", "must", "every", "much",
];

/// Exclusion set built from [`NEAR_STOPWORDS`].
pub fn default_exclusions() -> HashSet<String> {
    NEAR_STOPWORDS.iter().map(|w| w.to_string()).collect()
}

/// Count tokens, keyed in first-occurrence order.
pub fn count_tokens<S: AsRef<str>>(tokens: &[S]) -> IndexMap<&str, usize> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }
    counts
}

/// Rank an existing count table, keeping the top `n`.
pub fn rank_counts(counts: IndexMap<&str, usize>, n: usize) -> FrequencyRanking {
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().filter(|(_, c)| *c > 0).collect();
    // sort_by is stable: equal counts stay in first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(n)
        .map(|(token, count)| (token.to_string(), count))
        .collect()
}

/// The `n` most frequent tokens not in `exclude`.
pub fn top_words<S: AsRef<str>>(tokens: &[S], exclude: &HashSet<String>, n: usize) -> FrequencyRanking {
    let filtered: Vec<&str> = tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !exclude.contains(*t))
        .collect();
    rank_counts(count_tokens(&filtered), n)
}

/// The `n` most frequent tokens with no exclusions at all.
pub fn most_common<S: AsRef<str>>(tokens: &[S], n: usize) -> FrequencyRanking {
    rank_counts(count_tokens(tokens), n)
}
