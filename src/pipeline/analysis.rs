// Full-corpus analysis run.
//
// Per-document metrics, the two-group vocabulary comparison, the all-pairs
// similarity matrix, and a network view of the matrix, assembled into one
// report. Validation failures are collected on the report rather than
// aborting the run.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::corpus::document::{Document, DocumentError, DocumentSet};
use crate::corpus::groups::GroupMembership;
use crate::error::{AnalysisError, Result};
use crate::output::terminal::progress_bar;
use crate::stats::corpus::{compare_corpora, Corpus, CorpusComparison};
use crate::stats::descriptive::{sentence_stats, word_stats, SentenceStats, WordStats};
use crate::stats::diversity::{lexical_diversity, LexicalDiversity};
use crate::stats::empty_map_if_none;
use crate::stats::frequency::{default_exclusions, top_words, FrequencyRanking};
use crate::stats::similarity::{compare_vocabularies, vocabulary, SimilarityRecord};

pub use crate::corpus::document::PAIR_SEPARATOR;

/// Pairwise comparisons keyed by `"<first>|||<second>"`, in pair order.
pub type ComparisonMatrix = IndexMap<String, SimilarityRecord>;

/// Tunables for an analysis run.
pub struct AnalysisSettings {
    /// Entries in each document's top-words table (default 50)
    pub top_words: usize,
    /// Jaccard above which two documents are linked in the network (default 0.05)
    pub link_threshold: f64,
    /// Tokens left out of the top-words tables
    pub exclusions: HashSet<String>,
    /// Which two groups to compare. `None` uses the first two groups of the
    /// membership mapping.
    pub comparison_groups: Option<(String, String)>,
    /// Draw progress bars on stderr
    pub show_progress: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            top_words: 50,
            link_threshold: 0.05,
            exclusions: default_exclusions(),
            comparison_groups: None,
            show_progress: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats {
    pub sentence_count: usize,
    pub word_count: usize,
    pub vocabulary_size: usize,
}

/// Everything computed for a single document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentMetrics {
    pub basic_stats: BasicStats,
    pub lexical_diversity: LexicalDiversity,
    #[serde(serialize_with = "empty_map_if_none")]
    pub sentence_stats: Option<SentenceStats>,
    #[serde(serialize_with = "empty_map_if_none")]
    pub word_stats: Option<WordStats>,
    pub top_words: FrequencyRanking,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkNode {
    pub id: String,
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkLink {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub shared_words: usize,
}

/// Documents as nodes, sufficiently similar pairs as weighted links.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkGraph {
    pub nodes: Vec<NetworkNode>,
    pub links: Vec<NetworkLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub text_count: usize,
    pub groups: IndexMap<String, Vec<String>>,
    pub ungrouped: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// The complete output of one run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub text_stats: IndexMap<String, DocumentMetrics>,
    pub vocabulary_analysis: Option<CorpusComparison>,
    pub pairwise_comparisons: ComparisonMatrix,
    pub network: NetworkGraph,
    pub errors: Vec<DocumentError>,
}

/// Build the comparison key for an ordered pair of ids.
pub fn pair_key(first: &str, second: &str) -> String {
    format!("{first}{PAIR_SEPARATOR}{second}")
}

/// Split a comparison key back into its two ids.
pub fn split_pair_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(PAIR_SEPARATOR)
}

/// Metrics for one document.
pub fn document_metrics(doc: &Document, settings: &AnalysisSettings) -> DocumentMetrics {
    let lower = doc.lowercase_tokens();
    let lexical_diversity = lexical_diversity(lower);

    DocumentMetrics {
        basic_stats: BasicStats {
            sentence_count: doc.sentence_word_counts().len(),
            word_count: lower.len(),
            vocabulary_size: lexical_diversity.unique_words,
        },
        lexical_diversity,
        sentence_stats: sentence_stats(doc.sentence_word_counts()),
        word_stats: word_stats(lower),
        top_words: top_words(doc.lemmatized_tokens(), &settings.exclusions, settings.top_words),
    }
}

/// Compare two named groups of documents by their lemmatized tokens.
pub fn compare_groups(
    documents: &DocumentSet,
    membership: &GroupMembership,
    first: &str,
    second: &str,
) -> Result<CorpusComparison> {
    let first_corpus = Corpus::concat(first, group_tokens(documents, membership, first)?);
    let second_corpus = Corpus::concat(second, group_tokens(documents, membership, second)?);
    Ok(compare_corpora(&first_corpus, &second_corpus))
}

fn group_tokens<'a>(
    documents: &'a DocumentSet,
    membership: &GroupMembership,
    group: &str,
) -> Result<Vec<&'a [String]>> {
    membership
        .members(group)?
        .iter()
        .map(|id| {
            documents
                .get(id)
                .map(Document::lemmatized_tokens)
                .ok_or_else(|| AnalysisError::UnknownDocument {
                    id: id.clone(),
                    group: group.to_string(),
                })
        })
        .collect()
}

/// One SimilarityRecord per unordered document pair, over lemmatized tokens.
///
/// Pairs are enumerated as (i, j) with i < j in document order and computed
/// in parallel; collecting an indexed parallel iterator keeps that order, so
/// the result doesn't depend on the thread count.
pub fn pairwise_matrix(documents: &DocumentSet, show_progress: bool) -> ComparisonMatrix {
    let docs: Vec<&Document> = documents.iter().collect();
    let vocabularies: Vec<BTreeSet<&str>> = docs
        .iter()
        .map(|d| vocabulary(d.lemmatized_tokens()))
        .collect();

    let n = docs.len();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();

    let pb = progress_bar(pairs.len() as u64, "Pairs", show_progress);
    let records: Vec<SimilarityRecord> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let record = compare_vocabularies(&vocabularies[i], &vocabularies[j]);
            pb.inc(1);
            record
        })
        .collect();
    pb.finish_and_clear();

    pairs
        .iter()
        .zip(records)
        .map(|(&(i, j), record)| (pair_key(docs[i].id(), docs[j].id()), record))
        .collect()
}

/// Nodes for every document, links for pairs above `threshold` Jaccard.
pub fn network_graph(
    documents: &DocumentSet,
    membership: &GroupMembership,
    matrix: &ComparisonMatrix,
    threshold: f64,
) -> NetworkGraph {
    let nodes = documents
        .ids()
        .map(|id| NetworkNode {
            id: id.to_string(),
            group: membership.group_of(id).map(str::to_string),
        })
        .collect();

    let links = matrix
        .iter()
        .filter(|(_, record)| record.jaccard_similarity > threshold)
        .filter_map(|(key, record)| {
            let (source, target) = split_pair_key(key)?;
            Some(NetworkLink {
                source: source.to_string(),
                target: target.to_string(),
                weight: record.jaccard_similarity,
                shared_words: record.shared_words,
            })
        })
        .collect();

    NetworkGraph { nodes, links }
}

/// Run the whole analysis.
pub fn analyze(
    documents: &DocumentSet,
    membership: &GroupMembership,
    settings: &AnalysisSettings,
) -> AnalysisReport {
    let mut errors: Vec<DocumentError> = documents.rejected().to_vec();

    if !membership.ungrouped().is_empty() {
        warn!(
            documents = ?membership.ungrouped(),
            "Documents match no group and are left out of the group comparison"
        );
    }

    info!(documents = documents.len(), "Computing per-document metrics");
    let pb = progress_bar(documents.len() as u64, "Texts", settings.show_progress);
    let text_stats: IndexMap<String, DocumentMetrics> = documents
        .iter()
        .map(|doc| {
            let metrics = document_metrics(doc, settings);
            pb.inc(1);
            (doc.id().to_string(), metrics)
        })
        .collect();
    pb.finish_and_clear();

    let vocabulary_analysis = match comparison_pair(membership, settings) {
        Some((first, second)) => {
            info!(first = %first, second = %second, "Comparing group vocabularies");
            match compare_groups(documents, membership, &first, &second) {
                Ok(comparison) => Some(comparison),
                Err(e) => {
                    warn!(error = %e, "Group comparison failed");
                    errors.push(DocumentError::new(format!("{first} vs {second}"), &e));
                    None
                }
            }
        }
        None => {
            warn!("Fewer than two groups configured, skipping group comparison");
            None
        }
    };

    info!(
        pairs = documents.len() * documents.len().saturating_sub(1) / 2,
        "Computing pairwise comparisons"
    );
    let pairwise_comparisons = pairwise_matrix(documents, settings.show_progress);
    let network = network_graph(
        documents,
        membership,
        &pairwise_comparisons,
        settings.link_threshold,
    );

    AnalysisReport {
        metadata: ReportMetadata {
            text_count: documents.len(),
            groups: membership.groups().clone(),
            ungrouped: membership.ungrouped().to_vec(),
            generated_at: Utc::now(),
        },
        text_stats,
        vocabulary_analysis,
        pairwise_comparisons,
        network,
        errors,
    }
}

fn comparison_pair(membership: &GroupMembership, settings: &AnalysisSettings) -> Option<(String, String)> {
    if let Some(pair) = &settings.comparison_groups {
        return Some(pair.clone());
    }
    let mut names = membership.group_names();
    Some((names.next()?.to_string(), names.next()?.to_string()))
}
