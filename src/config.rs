use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::corpus::groups::{default_rules, GroupRule};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override anything set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file of pre-tokenized documents (LYCEUM_INPUT)
    pub input: Option<PathBuf>,
    /// Directory of .txt files to normalize (LYCEUM_TEXTS_DIR)
    pub texts_dir: Option<PathBuf>,
    /// Where the analysis report is written (defaults to ./output/analysis.json)
    pub output: PathBuf,
    /// Entries per top-words table (default: 50)
    pub top_words: usize,
    /// Jaccard above which two texts are linked in the network (default: 0.05)
    pub link_threshold: f64,
    /// Worker threads for pairwise comparisons; 0 lets rayon decide
    pub threads: usize,
    /// Group membership rules, in priority order
    pub group_rules: Vec<GroupRule>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; an input source is only required by
    /// commands that read documents (see `require_input`).
    pub fn load() -> Result<Self> {
        let group_rules = match env::var("LYCEUM_GROUPS") {
            Ok(rules) if !rules.trim().is_empty() => parse_group_rules(&rules)?,
            _ => default_rules(),
        };

        Ok(Self {
            input: env::var("LYCEUM_INPUT").ok().map(PathBuf::from),
            texts_dir: env::var("LYCEUM_TEXTS_DIR").ok().map(PathBuf::from),
            output: env::var("LYCEUM_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./output/analysis.json")),
            top_words: parse_var("LYCEUM_TOP_WORDS", 50)?,
            link_threshold: parse_var("LYCEUM_LINK_THRESHOLD", 0.05)?,
            threads: parse_var("LYCEUM_THREADS", 0)?,
            group_rules,
        })
    }

    /// Check that exactly one document source is configured.
    /// Call this before any command that loads documents.
    pub fn require_input(&self) -> Result<()> {
        match (&self.input, &self.texts_dir) {
            (None, None) => anyhow::bail!(
                "No documents to analyze. Pass --input <corpus.json> or --texts <dir>,\n\
                 or set LYCEUM_INPUT / LYCEUM_TEXTS_DIR in your .env file."
            ),
            (Some(_), Some(_)) => anyhow::bail!(
                "Both an input file and a texts directory are set. Pick one."
            ),
            _ => Ok(()),
        }
    }

    /// Check that at least two groups exist to compare.
    pub fn require_groups(&self) -> Result<()> {
        if self.group_rules.len() < 2 {
            anyhow::bail!(
                "LYCEUM_GROUPS defines {} group(s); the group comparison needs two.\n\
                 Example: LYCEUM_GROUPS=\"Plato=plato;Aristotle=aristotle,artistotle\"",
                self.group_rules.len()
            );
        }
        Ok(())
    }
}

/// Parse `Name=pat1,pat2;Name2=pat3` into group rules.
pub fn parse_group_rules(raw: &str) -> Result<Vec<GroupRule>> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| -> Result<GroupRule> {
            let (name, patterns) = entry
                .split_once('=')
                .with_context(|| format!("Group rule '{entry}' is missing '='"))?;
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("Group rule '{entry}' has an empty name");
            }
            let patterns: Vec<&str> = patterns
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            if patterns.is_empty() {
                anyhow::bail!("Group '{name}' has no patterns");
            }
            Ok(GroupRule::new(name, &patterns))
        })
        .collect()
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: '{value}'")),
        Err(_) => Ok(default),
    }
}
