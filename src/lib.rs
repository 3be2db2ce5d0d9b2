// Lyceum: lexical statistics and cross-document comparison
//
// This is the library root. `stats` is the pure analysis engine; the other
// modules feed it documents and present what it produces.

pub mod config;
pub mod corpus;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod stats;
