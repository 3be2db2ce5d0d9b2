// Corpus input: documents, validation, group membership, loading, and the
// plain-text normalization adapter.

pub mod document;
pub mod groups;
pub mod loader;
pub mod normalize;
