// Author-group membership.
//
// The engine only consumes a `{group -> document ids}` mapping. How that
// mapping is produced lives here, behind explicit rules, so it can be tested
// on its own and so a document that matches no rule is visible instead of
// silently dropping out of the group comparison.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::document::DocumentSet;
use crate::error::{AnalysisError, Result};

/// Assigns a document to `name` when its id contains any of `patterns`
/// (case-insensitive).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRule {
    pub name: String,
    /// Lowercase substrings
    #[serde(deserialize_with = "lowercase_patterns")]
    pub patterns: Vec<String>,
}

fn lowercase_patterns<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let patterns = Vec::<String>::deserialize(deserializer)?;
    Ok(patterns.iter().map(|p| p.to_lowercase()).collect())
}

impl GroupRule {
    pub fn new(name: impl Into<String>, patterns: &[&str]) -> Self {
        Self {
            name: name.into(),
            patterns: patterns.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// Patterns are stored lowercased, so only the id is folded here.
    pub fn matches(&self, document_id: &str) -> bool {
        let id = document_id.to_lowercase();
        self.patterns
            .iter()
            .any(|p| !p.is_empty() && id.contains(p.as_str()))
    }
}

/// Plato and Aristotle, including the "Artistotle" spelling that shows up in
/// some source file names.
pub fn default_rules() -> Vec<GroupRule> {
    vec![
        GroupRule::new("Plato", &["plato"]),
        GroupRule::new("Aristotle", &["aristotle", "artistotle"]),
    ]
}

/// Resolved group membership for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupMembership {
    groups: IndexMap<String, Vec<String>>,
    ungrouped: Vec<String>,
}

impl GroupMembership {
    /// Apply `rules` to `ids`. The first matching rule wins; every rule's
    /// group is present even if nothing matched it.
    pub fn assign<'a>(ids: impl IntoIterator<Item = &'a str>, rules: &[GroupRule]) -> Self {
        let mut groups: IndexMap<String, Vec<String>> = rules
            .iter()
            .map(|r| (r.name.clone(), Vec::new()))
            .collect();
        let mut ungrouped = Vec::new();

        for id in ids {
            match rules.iter().find(|r| r.matches(id)) {
                Some(rule) => {
                    if let Some(members) = groups.get_mut(&rule.name) {
                        members.push(id.to_string());
                    }
                }
                None => ungrouped.push(id.to_string()),
            }
        }

        Self { groups, ungrouped }
    }

    /// Accept a caller-supplied mapping, checking every id against the
    /// loaded documents.
    pub fn from_map(groups: IndexMap<String, Vec<String>>, documents: &DocumentSet) -> Result<Self> {
        for (group, ids) in &groups {
            if let Some(missing) = ids.iter().find(|id| !documents.contains(id)) {
                return Err(AnalysisError::UnknownDocument {
                    id: missing.clone(),
                    group: group.clone(),
                });
            }
        }

        let ungrouped = documents
            .ids()
            .filter(|id| !groups.values().any(|members| members.iter().any(|m| m.as_str() == *id)))
            .map(str::to_string)
            .collect();

        Ok(Self { groups, ungrouped })
    }

    /// Member ids of `name`, in input order.
    pub fn members(&self, name: &str) -> Result<&[String]> {
        self.groups
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AnalysisError::unknown_group(name))
    }

    /// The group a document belongs to, if any.
    pub fn group_of(&self, document_id: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, members)| members.iter().any(|m| m == document_id))
            .map(|(name, _)| name.as_str())
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn groups(&self) -> &IndexMap<String, Vec<String>> {
        &self.groups
    }

    pub fn ungrouped(&self) -> &[String] {
        &self.ungrouped
    }
}
