// Colored terminal output for analysis summaries.
//
// This module handles all terminal-specific formatting: colors, tables,
// progress indicators. The main.rs commands delegate here.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::analysis::{AnalysisReport, DocumentMetrics};
use crate::stats::corpus::CorpusComparison;
use crate::stats::similarity::SimilarityRecord;

/// A progress bar in the house style, or a hidden one when `visible` is false.
pub fn progress_bar(len: u64, label: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template(&format!("  {label} [{{bar:30}}] {{pos}}/{{len}} ({{eta}})"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

/// Per-document table plus the group comparison headline.
pub fn display_report(report: &AnalysisReport) {
    println!(
        "\n{}",
        format!("=== Corpus Analysis ({} texts) ===", report.metadata.text_count).bold()
    );
    println!();

    println!(
        "  {:<36} {:>8} {:>7} {:>7} {:>8} {:>9}",
        "Text".dimmed(),
        "Words".dimmed(),
        "Vocab".dimmed(),
        "TTR".dimmed(),
        "MTLD".dimmed(),
        "Avg sent".dimmed(),
    );
    println!("  {}", "-".repeat(80).dimmed());

    for (id, metrics) in &report.text_stats {
        let avg_sentence = metrics
            .sentence_stats
            .as_ref()
            .map(|s| format!("{:.2}", s.avg_sentence_length))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<36} {:>8} {:>7} {:>7.4} {:>8.2} {:>9}",
            super::truncate_chars(id, 33),
            metrics.basic_stats.word_count,
            metrics.basic_stats.vocabulary_size,
            metrics.lexical_diversity.ttr,
            metrics.lexical_diversity.mtld,
            avg_sentence,
        );
    }

    if let Some(comparison) = &report.vocabulary_analysis {
        display_group_comparison(comparison);
    }

    println!(
        "\n  {} pairwise comparisons, {} network links",
        report.pairwise_comparisons.len(),
        report.network.links.len()
    );

    if !report.metadata.ungrouped.is_empty() {
        println!(
            "  {} {} texts matched no group: {}",
            "~".yellow(),
            report.metadata.ungrouped.len(),
            report.metadata.ungrouped.join(", ")
        );
    }

    if !report.errors.is_empty() {
        println!("\n  {} {} errors:", "!".red().bold(), report.errors.len());
        for err in &report.errors {
            println!("    {}: {}", err.document, err.error.red());
        }
    }
}

/// Headline numbers and the top shared terms between two groups.
pub fn display_group_comparison(cmp: &CorpusComparison) {
    println!(
        "\n{}",
        format!("=== {} vs {} ===", cmp.first_group, cmp.second_group).bold()
    );
    println!(
        "  {}'s vocabulary: {} unique words",
        cmp.first_group, cmp.first_vocabulary_size
    );
    println!(
        "  {}'s vocabulary: {} unique words",
        cmp.second_group, cmp.second_vocabulary_size
    );
    println!("  Shared vocabulary: {} words", cmp.shared_vocabulary);
    println!("  Overlap: {}%", format!("{:.2}", cmp.overlap_percentage).bright_green());
    println!(
        "  {} uses {}% of {}'s vocabulary",
        cmp.second_group,
        format!("{:.2}", cmp.second_uses_first).bright_yellow(),
        cmp.first_group
    );

    if !cmp.top_shared_words.is_empty() {
        println!("\n  Top shared terms:");
        for term in cmp.top_shared_words.iter().take(10) {
            println!(
                "    {:<20} {} {}x, {} {}x",
                term.word.bold(),
                cmp.first_group.dimmed(),
                term.first_count,
                cmp.second_group.dimmed(),
                term.second_count
            );
        }
    }
}

/// A single pairwise comparison.
pub fn display_similarity(first: &str, second: &str, record: &SimilarityRecord) {
    println!("\n{}", format!("=== {first} vs {second} ===").bold());
    println!("  Jaccard similarity: {:.4}", record.jaccard_similarity);
    println!("  Shared words: {}", record.shared_words);
    println!(
        "  Unique to {}: {}  |  Unique to {}: {}",
        first, record.unique_to_first, second, record.unique_to_second
    );
    println!(
        "  {:.2}% of {}'s vocabulary is shared, {:.2}% of {}'s",
        record.overlap_percentage_first, first, record.overlap_percentage_second, second
    );
    if !record.shared_words_list.is_empty() {
        let sample = record.shared_words_list.join(", ");
        println!("  Sample: {}", super::truncate_chars(&sample, 160).dimmed());
    }
}

/// One document's metrics.
pub fn display_document(id: &str, metrics: &DocumentMetrics) {
    println!("\n{}", format!("=== {id} ===").bold());
    let basic = &metrics.basic_stats;
    println!(
        "  Sentences: {}  Words: {}  Vocabulary: {}",
        basic.sentence_count, basic.word_count, basic.vocabulary_size
    );
    println!(
        "  TTR: {:.4}  MTLD: {:.2}",
        metrics.lexical_diversity.ttr, metrics.lexical_diversity.mtld
    );

    match &metrics.sentence_stats {
        Some(s) => println!(
            "  Sentence length: avg {:.2}, median {:.2}, min {}, max {}, std {:.2}",
            s.avg_sentence_length,
            s.median_sentence_length,
            s.min_sentence_length,
            s.max_sentence_length,
            s.std_sentence_length
        ),
        None => println!("  Sentence length: {}", "no sentences".dimmed()),
    }

    if let Some(w) = &metrics.word_stats {
        println!(
            "  Word length: avg {:.2}, median {:.2}, long words {} ({:.2}%)",
            w.avg_word_length,
            w.median_word_length,
            w.long_words,
            w.long_word_ratio * 100.0
        );
    }

    if !metrics.top_words.is_empty() {
        let top: Vec<String> = metrics
            .top_words
            .iter()
            .take(15)
            .map(|(word, count)| format!("{word} ({count})"))
            .collect();
        println!("  Top words: {}", top.join(", ").dimmed());
    }
}
