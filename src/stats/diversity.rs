// Lexical diversity: type-token ratio and MTLD.
//
// MTLD (Measure of Textual Lexical Diversity) walks the token stream and
// counts how often the running TTR of the current segment collapses below a
// threshold. Each collapse is one "factor"; the score is the mean number of
// tokens per factor. Higher means the author keeps introducing new words
// for longer before repeating themselves.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::round_to;

/// Segment TTR below which a factor is closed.
pub const MTLD_THRESHOLD: f64 = 0.72;

/// Sequences shorter than this get an MTLD of 0.
pub const MTLD_MIN_TOKENS: usize = 50;

/// Diversity metrics for a single token sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexicalDiversity {
    /// Unique / total, rounded to 4 decimals
    pub ttr: f64,
    pub unique_words: usize,
    pub total_words: usize,
    /// Rounded to 2 decimals
    pub mtld: f64,
}

/// Compute TTR and MTLD for a token sequence.
///
/// An empty sequence yields all zeros rather than dividing by zero.
pub fn lexical_diversity<S: AsRef<str>>(tokens: &[S]) -> LexicalDiversity {
    let total_words = tokens.len();
    if total_words == 0 {
        return LexicalDiversity {
            ttr: 0.0,
            unique_words: 0,
            total_words: 0,
            mtld: 0.0,
        };
    }

    let unique_words = tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<HashSet<&str>>()
        .len();

    LexicalDiversity {
        ttr: round_to(unique_words as f64 / total_words as f64, 4),
        unique_words,
        total_words,
        mtld: round_to(mtld(tokens), 2),
    }
}

/// Unrounded MTLD with the default threshold.
pub fn mtld<S: AsRef<str>>(tokens: &[S]) -> f64 {
    mtld_with_threshold(tokens, MTLD_THRESHOLD)
}

/// Unrounded MTLD for an explicit threshold.
///
/// The trailing segment that never fell below the threshold is not counted
/// as a factor, but its tokens stay in the numerator.
pub fn mtld_with_threshold<S: AsRef<str>>(tokens: &[S], threshold: f64) -> f64 {
    if tokens.len() < MTLD_MIN_TOKENS {
        return 0.0;
    }

    let mut factors = 0usize;
    let mut segment: HashSet<&str> = HashSet::new();
    let mut segment_len = 0usize;

    for token in tokens {
        segment.insert(token.as_ref());
        segment_len += 1;

        let segment_ttr = segment.len() as f64 / segment_len as f64;
        if segment_ttr < threshold {
            factors += 1;
            segment.clear();
            segment_len = 0;
        }
    }

    if factors == 0 {
        return tokens.len() as f64;
    }

    tokens.len() as f64 / factors as f64
}
