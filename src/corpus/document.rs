// Documents as delivered by the upstream normalizer, plus validation.
//
// Input arrives as `RawDocument` with every field optional so that a null or
// missing token sequence can be reported as a malformed document instead of
// failing the whole JSON parse. `DocumentSet::build` validates each one,
// keeps the good ones in input order, and records the rest.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{AnalysisError, Result};

/// Separator between the two ids of a pairwise comparison key. Reserved: no
/// document id may contain it.
pub const PAIR_SEPARATOR: &str = "|||";

/// Ids must be non-blank and must not contain `PAIR_SEPARATOR`.
fn check_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(AnalysisError::malformed("<unnamed>", "missing document id"));
    }
    if id.contains(PAIR_SEPARATOR) {
        return Err(AnalysisError::malformed(
            id,
            format!("id contains reserved separator '{PAIR_SEPARATOR}'"),
        ));
    }
    Ok(())
}

/// One pre-tokenized document. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    id: String,
    lowercase_tokens: Vec<String>,
    lemmatized_tokens: Vec<String>,
    sentence_word_counts: Vec<usize>,
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        lowercase_tokens: Vec<String>,
        lemmatized_tokens: Vec<String>,
        sentence_word_counts: Vec<usize>,
    ) -> Self {
        Self {
            id: id.into(),
            lowercase_tokens,
            lemmatized_tokens,
            sentence_word_counts,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Every alphabetic token, lowercased
    pub fn lowercase_tokens(&self) -> &[String] {
        &self.lowercase_tokens
    }

    /// Content tokens: stopwords removed, lemmatized
    pub fn lemmatized_tokens(&self) -> &[String] {
        &self.lemmatized_tokens
    }

    pub fn sentence_word_counts(&self) -> &[usize] {
        &self.sentence_word_counts
    }
}

/// Wire form of a document, before validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDocument {
    #[serde(default, alias = "documentId")]
    pub id: Option<String>,
    #[serde(default, alias = "lowercaseTokens")]
    pub lowercase_tokens: Option<Vec<String>>,
    #[serde(default, alias = "lemmatizedTokens")]
    pub lemmatized_tokens: Option<Vec<String>>,
    #[serde(default, alias = "sentenceWordCounts")]
    pub sentence_word_counts: Option<Vec<usize>>,
}

impl From<Document> for RawDocument {
    fn from(doc: Document) -> Self {
        Self {
            id: Some(doc.id),
            lowercase_tokens: Some(doc.lowercase_tokens),
            lemmatized_tokens: Some(doc.lemmatized_tokens),
            sentence_word_counts: Some(doc.sentence_word_counts),
        }
    }
}

impl TryFrom<RawDocument> for Document {
    type Error = AnalysisError;

    fn try_from(raw: RawDocument) -> Result<Self> {
        let id = raw.id.unwrap_or_default();
        check_id(&id)?;

        let lowercase_tokens = raw
            .lowercase_tokens
            .ok_or_else(|| AnalysisError::malformed(&id, "lowercase_tokens is null"))?;
        let lemmatized_tokens = raw
            .lemmatized_tokens
            .ok_or_else(|| AnalysisError::malformed(&id, "lemmatized_tokens is null"))?;
        let sentence_word_counts = raw
            .sentence_word_counts
            .ok_or_else(|| AnalysisError::malformed(&id, "sentence_word_counts is null"))?;

        Ok(Document::new(
            id,
            lowercase_tokens,
            lemmatized_tokens,
            sentence_word_counts,
        ))
    }
}

/// A validation failure tied to one document (or document pair).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentError {
    pub document: String,
    pub error: String,
}

impl DocumentError {
    pub fn new(document: impl Into<String>, error: &AnalysisError) -> Self {
        Self {
            document: document.into(),
            error: error.to_string(),
        }
    }
}

/// The validated documents of one run, in input order.
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    documents: IndexMap<String, Document>,
    rejected: Vec<DocumentError>,
}

impl DocumentSet {
    /// Validate raw documents. Malformed or duplicate documents are skipped
    /// and recorded; the rest of the batch is kept.
    pub fn build(raws: impl IntoIterator<Item = RawDocument>) -> Self {
        let mut set = Self::default();
        for raw in raws {
            let label = raw.id.clone().unwrap_or_else(|| "<unnamed>".to_string());
            match Document::try_from(raw) {
                Ok(doc) => {
                    if let Err(e) = set.insert(doc) {
                        warn!(document = %label, error = %e, "Skipping document");
                        set.rejected.push(DocumentError::new(label, &e));
                    }
                }
                Err(e) => {
                    warn!(document = %label, error = %e, "Skipping document");
                    set.rejected.push(DocumentError::new(label, &e));
                }
            }
        }
        set
    }

    /// Add a document, refusing duplicate or reserved ids.
    pub fn insert(&mut self, doc: Document) -> Result<()> {
        check_id(doc.id())?;
        if self.documents.contains_key(doc.id()) {
            return Err(AnalysisError::DuplicateDocument {
                id: doc.id().to_string(),
            });
        }
        self.documents.insert(doc.id().to_string(), doc);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents that failed validation, in input order.
    pub fn rejected(&self) -> &[DocumentError] {
        &self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str) -> RawDocument {
        RawDocument {
            id: Some(id.to_string()),
            lowercase_tokens: Some(vec!["the".into(), "good".into()]),
            lemmatized_tokens: Some(vec!["good".into()]),
            sentence_word_counts: Some(vec![2]),
        }
    }

    #[test]
    fn test_null_tokens_rejected() {
        let mut bad = raw("Plato Meno");
        bad.lemmatized_tokens = None;
        let err = Document::try_from(bad).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedDocument { .. }));
        assert!(err.to_string().contains("lemmatized_tokens"));
    }

    #[test]
    fn test_build_keeps_good_documents() {
        let mut bad = raw("Broken");
        bad.lowercase_tokens = None;
        let set = DocumentSet::build(vec![raw("A"), bad, raw("B"), raw("A")]);

        assert_eq!(set.ids().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(set.rejected().len(), 2);
        assert_eq!(set.rejected()[0].document, "Broken");
        assert!(set.rejected()[1].error.contains("Duplicate"));
    }

    #[test]
    fn test_separator_in_id_rejected() {
        let err = Document::try_from(raw("Plato|||Meno")).unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedDocument { .. }));

        let mut set = DocumentSet::default();
        let doc = Document::new("a|||b", vec![], vec![], vec![]);
        assert!(set.insert(doc).is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_parse_camel_case_and_null() {
        let json = r#"[
            {"documentId": "X", "lowercaseTokens": ["a"], "lemmatizedTokens": ["a"], "sentenceWordCounts": [1]},
            {"id": "Y", "lowercase_tokens": null, "lemmatized_tokens": [], "sentence_word_counts": []}
        ]"#;
        let raws: Vec<RawDocument> = serde_json::from_str(json).unwrap();
        let set = DocumentSet::build(raws);
        assert_eq!(set.len(), 1);
        assert!(set.contains("X"));
        assert_eq!(set.rejected()[0].document, "Y");
    }
}
