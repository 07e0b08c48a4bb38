//! Full-text search: indexing, boolean query parsing, evaluation and ranking.
//!
//! Documents are tokenized into lowercase words and recorded in an
//! [`InvertedIndex`]. Queries are parsed into a syntax tree, evaluated with set
//! algebra over posting sets, and the matches ranked by a tf-idf style score.

// Module declarations
pub(crate) mod eval;
pub(crate) mod index;
pub(crate) mod query;
pub(crate) mod scoring;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use index::{DocId, DocStats, InvertedIndex, QueryResult};
pub use query::{Operator, Query, QueryNode, QueryToken, insert_default_or, lex};
pub use scoring::{inverse_document_frequency, term_frequency};
pub use tokenize::{tokenize_bytes, tokenize_file};
