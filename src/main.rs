use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use lyceum::config::Config;
use lyceum::corpus::document::DocumentSet;
use lyceum::corpus::groups::GroupMembership;
use lyceum::corpus::loader;
use lyceum::corpus::normalize::{BasicNormalizer, NormalizerConfig};
use lyceum::output::{terminal, write_json};
use lyceum::pipeline::analysis::{self, AnalysisSettings};
use lyceum::stats::similarity::vocabulary_overlap;

/// Lyceum: lexical statistics for a corpus of philosophical texts.
///
/// Measures vocabulary richness, sentence and word shape, and how much
/// vocabulary every pair of texts (and every pair of authors) shares.
#[derive(Parser)]
#[command(name = "lyceum", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where documents come from. Falls back to LYCEUM_INPUT / LYCEUM_TEXTS_DIR.
#[derive(Args)]
struct Source {
    /// JSON file of pre-tokenized documents
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory of .txt files to normalize on the fly
    #[arg(long)]
    texts: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis and write the JSON report
    Analyze {
        #[command(flatten)]
        source: Source,

        /// Report path (default: ./output/analysis.json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Entries per top-words table (default: 50)
        #[arg(long)]
        top_words: Option<usize>,

        /// Jaccard above which texts are linked in the network (default: 0.05)
        #[arg(long)]
        link_threshold: Option<f64>,
    },

    /// Compare the vocabularies of two texts
    Compare {
        /// First text id
        first: String,
        /// Second text id
        second: String,

        #[command(flatten)]
        source: Source,
    },

    /// Show the metrics for a single text
    Stats {
        /// Text id
        id: String,

        #[command(flatten)]
        source: Source,
    },

    /// Normalize a directory of .txt files into a pre-tokenized JSON corpus
    Normalize {
        /// Directory of .txt files
        #[arg(long)]
        texts: PathBuf,

        /// Where to write the corpus JSON
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lyceum=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("Failed to configure the worker thread pool")?;
    }

    match cli.command {
        Commands::Analyze {
            source,
            output,
            top_words,
            link_threshold,
        } => {
            apply_source(&mut config, source);
            if let Some(path) = output {
                config.output = path;
            }
            if let Some(n) = top_words {
                config.top_words = n;
            }
            if let Some(t) = link_threshold {
                config.link_threshold = t;
            }
            config.require_input()?;
            config.require_groups()?;

            let documents = load_documents(&config)?;
            if documents.is_empty() {
                anyhow::bail!("No valid documents found. Check the input for errors above.");
            }
            let membership = GroupMembership::assign(documents.ids(), &config.group_rules);

            println!("Analyzing {} texts...", documents.len());
            let settings = AnalysisSettings {
                top_words: config.top_words,
                link_threshold: config.link_threshold,
                show_progress: true,
                ..AnalysisSettings::default()
            };
            let report = analysis::analyze(&documents, &membership, &settings);

            write_json(&config.output, &report)
                .with_context(|| format!("Failed to write {}", config.output.display()))?;
            info!(path = %config.output.display(), "Report written");

            terminal::display_report(&report);
            println!(
                "\n{} {}",
                "Analysis complete! Results saved to".bold(),
                config.output.display()
            );
        }

        Commands::Compare {
            first,
            second,
            source,
        } => {
            apply_source(&mut config, source);
            config.require_input()?;
            let documents = load_documents(&config)?;

            let a = documents
                .get(&first)
                .with_context(|| format!("No text with id '{first}'"))?;
            let b = documents
                .get(&second)
                .with_context(|| format!("No text with id '{second}'"))?;

            let record = vocabulary_overlap(a.lemmatized_tokens(), b.lemmatized_tokens());
            terminal::display_similarity(&first, &second, &record);
        }

        Commands::Stats { id, source } => {
            apply_source(&mut config, source);
            config.require_input()?;
            let documents = load_documents(&config)?;

            let doc = documents
                .get(&id)
                .with_context(|| format!("No text with id '{id}'"))?;
            let settings = AnalysisSettings {
                top_words: config.top_words,
                ..AnalysisSettings::default()
            };
            let metrics = analysis::document_metrics(doc, &settings);
            terminal::display_document(&id, &metrics);
        }

        Commands::Normalize { texts, output } => {
            let normalizer = BasicNormalizer::new(Arc::new(NormalizerConfig::english()))?;
            let raws = loader::load_text_dir(&texts, &normalizer)
                .with_context(|| format!("Failed to read {}", texts.display()))?;
            let documents = DocumentSet::build(raws);
            let docs: Vec<_> = documents.iter().cloned().collect();
            loader::write_json(&output, &docs)?;
            println!(
                "Normalized {} texts into {}",
                docs.len(),
                output.display()
            );
        }
    }

    Ok(())
}

/// CLI flags win over environment configuration.
fn apply_source(config: &mut Config, source: Source) {
    if source.input.is_some() || source.texts.is_some() {
        config.input = source.input;
        config.texts_dir = source.texts;
    }
}

/// Load and validate documents from whichever source is configured.
fn load_documents(config: &Config) -> Result<DocumentSet> {
    let raws = match (&config.input, &config.texts_dir) {
        (Some(path), _) => loader::load_json(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        (None, Some(dir)) => {
            let normalizer = BasicNormalizer::new(Arc::new(NormalizerConfig::english()))?;
            loader::load_text_dir(dir, &normalizer)
                .with_context(|| format!("Failed to read {}", dir.display()))?
        }
        (None, None) => anyhow::bail!("No document source configured"),
    };

    let documents = DocumentSet::build(raws);
    for rejected in documents.rejected() {
        println!(
            "  {} skipped {}: {}",
            "!".red(),
            rejected.document,
            rejected.error
        );
    }
    Ok(documents)
}
