// Loading documents from disk.
//
// Two sources: a JSON array of pre-tokenized documents (the normal path), or
// a directory of .txt files run through a TextNormalizer. Directory entries
// are sorted by file name so the document order, and therefore every tie
// break downstream, is the same on every run.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::document::{Document, RawDocument};
use super::normalize::TextNormalizer;
use crate::error::Result;

/// Read a JSON array of documents.
pub fn load_json(path: &Path) -> Result<Vec<RawDocument>> {
    let data = fs::read_to_string(path)?;
    let raws: Vec<RawDocument> = serde_json::from_str(&data)?;
    info!(path = %path.display(), documents = raws.len(), "Loaded pre-tokenized documents");
    Ok(raws)
}

/// Normalize every `.txt` file in `dir`. The file stem becomes the id.
pub fn load_text_dir(dir: &Path, normalizer: &dyn TextNormalizer) -> Result<Vec<RawDocument>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut raws = Vec::with_capacity(paths.len());
    for path in paths {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let text = fs::read_to_string(&path)?;
        let doc = normalizer.normalize(&id, &text);
        debug!(
            document = %id,
            tokens = doc.lowercase_tokens().len(),
            sentences = doc.sentence_word_counts().len(),
            "Normalized text"
        );
        raws.push(RawDocument::from(doc));
    }

    info!(dir = %dir.display(), documents = raws.len(), "Loaded text directory");
    Ok(raws)
}

/// Write documents in the same JSON shape `load_json` reads.
pub fn write_json(path: &Path, documents: &[Document]) -> Result<()> {
    crate::output::write_json(path, &documents)?;
    info!(path = %path.display(), documents = documents.len(), "Wrote normalized documents");
    Ok(())
}
