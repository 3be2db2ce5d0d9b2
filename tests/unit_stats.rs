// Unit tests for the statistics engine.
//
// Tests isolated pure functions: lexical diversity (TTR and MTLD boundary
// behaviour), descriptive stats, frequency ranking order, pairwise
// similarity direction, and the group-level corpus comparison.

use std::collections::HashSet;

use lyceum::stats::corpus::{compare_corpora, Corpus, UNIQUE_REPORTED};
use lyceum::stats::descriptive::{sentence_stats, word_stats};
use lyceum::stats::diversity::{lexical_diversity, mtld, MTLD_MIN_TOKENS};
use lyceum::stats::frequency::{default_exclusions, most_common, top_words};
use lyceum::stats::similarity::vocabulary_overlap;

fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

// ============================================================
// Lexical diversity
// ============================================================

#[test]
fn ttr_the_cat_sat_on_the_mat() {
    let d = lexical_diversity(&words("the cat sat on the mat"));
    assert_eq!(d.unique_words, 5);
    assert_eq!(d.total_words, 6);
    assert_eq!(d.ttr, 0.8333);
}

#[test]
fn ttr_exact_half_rounds_to_even() {
    // 1/32 = 0.03125
    let d = lexical_diversity(&["x"; 32]);
    assert_eq!(d.ttr, 0.0312);
}

#[test]
fn word_stats_mean_exact_half_rounds_to_even() {
    // 25 chars over 8 words = 3.125
    let stats = word_stats(&["one", "two", "six", "ten", "cat", "dog", "sun", "moon"]).unwrap();
    assert_eq!(stats.avg_word_length, 3.12);
}

#[test]
fn ttr_is_one_when_all_distinct() {
    let d = lexical_diversity(&words("justice courage temperance wisdom"));
    assert_eq!(d.ttr, 1.0);
}

#[test]
fn mtld_is_zero_just_below_minimum_length() {
    let tokens: Vec<String> = (0..MTLD_MIN_TOKENS - 1).map(|i| format!("t{i}")).collect();
    assert_eq!(mtld(&tokens), 0.0);
    assert_eq!(lexical_diversity(&tokens).mtld, 0.0);
}

#[test]
fn mtld_at_minimum_length_with_no_factors_is_length() {
    let tokens: Vec<String> = (0..MTLD_MIN_TOKENS).map(|i| format!("t{i}")).collect();
    assert_eq!(mtld(&tokens), MTLD_MIN_TOKENS as f64);
}

#[test]
fn mtld_uses_total_length_not_consumed_length() {
    // "a b a b ..." : segment TTRs are 1.0, 1.0, 0.667 -> factor after 3
    // tokens. 52 tokens -> 17 factors over 51 tokens, 1 trailing token.
    let tokens: Vec<&str> = (0..52).map(|i| if i % 2 == 0 { "a" } else { "b" }).collect();
    assert_eq!(mtld(&tokens), 52.0 / 17.0);
    assert_eq!(lexical_diversity(&tokens).mtld, 3.06);
}

#[test]
fn diversity_is_idempotent() {
    let tokens = words("what is virtue and can virtue be taught or is virtue a gift");
    assert_eq!(lexical_diversity(&tokens), lexical_diversity(&tokens));
}

// ============================================================
// Descriptive stats
// ============================================================

#[test]
fn sentence_stats_empty_is_none() {
    assert!(sentence_stats(&[]).is_none());
}

#[test]
fn sentence_stats_single_sentence() {
    let s = sentence_stats(&[12]).unwrap();
    assert_eq!(s.sentence_count, 1);
    assert_eq!(s.median_sentence_length, 12.0);
    assert_eq!(s.std_sentence_length, 0.0);
}

#[test]
fn sentence_stats_odd_median_and_population_std() {
    // mean 4, deviations 9,1,0,1,9 -> variance 4 -> std 2 (population)
    let s = sentence_stats(&[1, 3, 4, 5, 7]).unwrap();
    assert_eq!(s.avg_sentence_length, 4.0);
    assert_eq!(s.median_sentence_length, 4.0);
    assert_eq!(s.std_sentence_length, 2.0);
    assert_eq!(s.min_sentence_length, 1);
    assert_eq!(s.max_sentence_length, 7);
}

#[test]
fn word_stats_scenario() {
    let w = word_stats(&["a", "elephant", "ox"]).unwrap();
    assert_eq!(w.avg_word_length, 3.67);
    assert_eq!(w.long_words, 1);
    assert_eq!(w.long_word_ratio, 0.3333);
}

#[test]
fn word_stats_six_chars_is_not_long() {
    let w = word_stats(&["virtue", "justice"]).unwrap();
    assert_eq!(w.long_words, 1);
    assert_eq!(w.long_word_ratio, 0.5);
}

#[test]
fn word_stats_empty_is_none() {
    let empty: [&str; 0] = [];
    assert!(word_stats(&empty).is_none());
}

// ============================================================
// Frequency rankings
// ============================================================

#[test]
fn frequency_tie_breaks_on_first_occurrence() {
    let ranked = most_common(&["b", "a", "b", "a", "c"], 2);
    assert_eq!(ranked[0], ("b".to_string(), 2));
    assert_eq!(ranked[1], ("a".to_string(), 2));
}

#[test]
fn frequency_tie_order_follows_filtered_sequence() {
    // "said" is excluded, so "form" is first among the tied tokens
    let tokens = words("said soul form soul form idea");
    let ranked = top_words(&tokens, &default_exclusions(), 3);
    assert_eq!(
        ranked,
        vec![
            ("soul".to_string(), 2),
            ("form".to_string(), 2),
            ("idea".to_string(), 1)
        ]
    );
}

#[test]
fn frequency_without_exclusions_keeps_fillers() {
    let tokens = words("would would virtue");
    let ranked = top_words(&tokens, &HashSet::new(), 10);
    assert_eq!(ranked[0], ("would".to_string(), 2));
}

#[test]
fn frequency_never_reports_zero_counts() {
    let ranked = most_common(&words("x y z x"), 100);
    assert!(ranked.iter().all(|(_, c)| *c > 0));
}

// ============================================================
// Pairwise similarity
// ============================================================

#[test]
fn similarity_scenario() {
    let r = vocabulary_overlap(&["good", "truth", "form"], &["truth", "form", "virtue"]);
    assert_eq!(r.shared_words, 2);
    assert_eq!(r.jaccard_similarity, 0.5);
    assert_eq!(r.overlap_percentage_first, 66.67);
    assert_eq!(r.overlap_percentage_second, 66.67);
}

#[test]
fn similarity_overlap_percentages_swap() {
    let a = words("soul body mind form");
    let b = words("soul form");
    let ab = vocabulary_overlap(&a, &b);
    let ba = vocabulary_overlap(&b, &a);

    assert_eq!(ab.jaccard_similarity, ba.jaccard_similarity);
    assert_eq!(ab.shared_words, ba.shared_words);
    assert_eq!(ab.overlap_percentage_first, 50.0);
    assert_eq!(ab.overlap_percentage_second, 100.0);
    assert_eq!(ab.overlap_percentage_first, ba.overlap_percentage_second);
    assert_eq!(ab.unique_to_first, ba.unique_to_second);
}

#[test]
fn similarity_one_side_empty() {
    let empty: [&str; 0] = [];
    let r = vocabulary_overlap(&["soul"], &empty);
    assert_eq!(r.jaccard_similarity, 0.0);
    assert_eq!(r.overlap_percentage_first, 0.0);
    assert_eq!(r.overlap_percentage_second, 0.0);
    assert_eq!(r.unique_to_first, 1);
}

// ============================================================
// Corpus comparison
// ============================================================

#[test]
fn corpus_concatenation_follows_input_order() {
    let docs_a = [vec!["alpha", "beta"], vec!["gamma"]];
    let docs_b = [vec!["gamma"], vec!["alpha", "beta"]];
    let a = Corpus::concat("A", docs_a.iter().map(|d| d.as_slice()));
    let b = Corpus::concat("B", docs_b.iter().map(|d| d.as_slice()));
    assert_eq!(a.tokens, vec!["alpha", "beta", "gamma"]);
    assert_eq!(b.tokens, vec!["gamma", "alpha", "beta"]);
}

#[test]
fn corpus_unique_terms_ranked_by_frequency() {
    let plato = [words("idea idea form soul recollection idea recollection")];
    let aristotle = [words("soul substance substance category")];
    let cmp = compare_corpora(
        &Corpus::concat("Plato", plato.iter().map(|d| d.as_slice())),
        &Corpus::concat("Aristotle", aristotle.iter().map(|d| d.as_slice())),
    );

    assert_eq!(cmp.shared_vocabulary, 1);
    assert_eq!(cmp.top_first_unique[0], ("idea".to_string(), 3));
    assert_eq!(cmp.top_first_unique[1], ("recollection".to_string(), 2));
    assert_eq!(cmp.top_first_unique[2], ("form".to_string(), 1));
    assert_eq!(cmp.top_second_unique[0], ("substance".to_string(), 2));
    assert!(cmp.top_first_unique.len() <= UNIQUE_REPORTED);
    // 1 shared of 4 Plato words
    assert_eq!(cmp.second_uses_first, 25.0);
    // 1 shared of 6 total
    assert_eq!(cmp.overlap_percentage, 16.67);
}

#[test]
fn corpus_unique_terms_capped_with_first_occurrence_ties() {
    let mut first: Vec<String> = vec!["polis".to_string()];
    first.extend((0..40).map(|i| format!("p{i:02}")));
    first.extend(["p35", "p35", "p38"].iter().map(|s| s.to_string()));
    let mut second: Vec<String> = vec!["polis".to_string()];
    second.extend((0..35).map(|i| format!("a{i:02}")));

    let cmp = compare_corpora(
        &Corpus::concat("Plato", std::iter::once(first.as_slice())),
        &Corpus::concat("Aristotle", std::iter::once(second.as_slice())),
    );

    assert_eq!(cmp.top_first_unique.len(), UNIQUE_REPORTED);
    assert_eq!(cmp.top_second_unique.len(), UNIQUE_REPORTED);
    assert_eq!(cmp.top_first_unique[0], ("p35".to_string(), 3));
    assert_eq!(cmp.top_first_unique[1], ("p38".to_string(), 2));
    let tied: Vec<String> = (0..28).map(|i| format!("p{i:02}")).collect();
    let reported: Vec<&String> = cmp.top_first_unique[2..].iter().map(|(w, _)| w).collect();
    assert_eq!(reported, tied.iter().collect::<Vec<_>>());
    let expected_second: Vec<(String, usize)> = (0..30).map(|i| (format!("a{i:02}"), 1)).collect();
    assert_eq!(cmp.top_second_unique, expected_second);
}

#[test]
fn top_words_truncates_at_limit() {
    let tokens: Vec<String> = (0..20).map(|i| format!("w{i:02}")).collect();
    let ranked = top_words(&tokens, &HashSet::new(), 5);
    let expected: Vec<(String, usize)> = (0..5).map(|i| (format!("w{i:02}"), 1)).collect();
    assert_eq!(ranked, expected);
}

#[test]
fn corpus_shared_ranking_sorts_by_total_then_word() {
    let a = [words("zeta zeta alpha beta beta")];
    let b = [words("alpha alpha beta zeta")];
    let cmp = compare_corpora(
        &Corpus::concat("A", a.iter().map(|d| d.as_slice())),
        &Corpus::concat("B", b.iter().map(|d| d.as_slice())),
    );
    // totals: zeta 3, alpha 3, beta 3 -> alphabetical
    let order: Vec<&str> = cmp.top_shared_words.iter().map(|t| t.word.as_str()).collect();
    assert_eq!(order, vec!["alpha", "beta", "zeta"]);
    assert_eq!(cmp.top_shared_words[0].first_count, 1);
    assert_eq!(cmp.top_shared_words[0].second_count, 2);
}
