//! Inverted index over tokenized documents.

use super::eval::Evaluator;
use super::query::Query;
use super::scoring::rank;
use crate::error::QueryError;
use crate::set::OrderedSet;
use ahash::AHashMap;
use serde::Serialize;
use std::sync::Arc;

/// Document identifier, typically a file path.
///
/// Reference counted so posting sets and derived query sets can share one
/// allocation per document.
pub type DocId = Arc<str>;

/// Per-document statistics used for scoring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocStats {
    term_freq: AHashMap<String, usize>,
    length: usize,
}

impl DocStats {
    /// Occurrences of `term` in the document.
    pub fn frequency(&self, term: &str) -> usize {
        self.term_freq.get(term).copied().unwrap_or(0)
    }

    /// Number of words in the document, repeats included.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct terms in the document.
    pub fn distinct_terms(&self) -> usize {
        self.term_freq.len()
    }
}

/// A ranked query match.
///
/// Owns a copy of the path, so results outlive the index that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub path: String,
    pub score: f64,
}

/// In-memory inverted index mapping terms to the documents containing them.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    /// term -> set of documents containing it
    postings: AHashMap<String, OrderedSet<DocId>>,
    /// document -> term frequencies and length
    stats: AHashMap<DocId, DocStats>,
    /// Word occurrences observed while indexing, repeats included.
    /// Not a document count.
    corpus_size: usize,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `tokens` under `id`.
    ///
    /// Takes ownership of both the identifier and the token list. Returns
    /// `false` without touching the index if `id` has already been indexed.
    pub fn add_document(&mut self, id: impl Into<DocId>, tokens: Vec<String>) -> bool {
        let id = id.into();
        if self.stats.contains_key(&id) {
            tracing::debug!("'{}' is already indexed", id);
            return false;
        }

        let mut stats = DocStats {
            term_freq: AHashMap::with_capacity(tokens.len()),
            length: tokens.len(),
        };

        for token in tokens {
            match self.postings.get_mut(&token) {
                Some(docs) => {
                    docs.add(Arc::clone(&id));
                }
                None => {
                    self.postings
                        .insert(token.clone(), [Arc::clone(&id)].into_iter().collect());
                }
            }
            self.corpus_size += 1;
            *stats.term_freq.entry(token).or_insert(0) += 1;
        }

        self.stats.insert(id, stats);
        true
    }

    /// Posting set for `term`, or `None` if the term was never indexed.
    pub fn lookup(&self, term: &str) -> Option<&OrderedSet<DocId>> {
        self.postings.get(term)
    }

    /// Statistics for an indexed document.
    pub fn doc_stats(&self, id: &str) -> Option<&DocStats> {
        self.stats.get(id)
    }

    /// Returns `true` if `id` has been indexed.
    pub fn contains_document(&self, id: &str) -> bool {
        self.stats.contains_key(id)
    }

    /// Total word occurrences seen while indexing.
    pub fn corpus_size(&self) -> usize {
        self.corpus_size
    }

    /// Get the number of documents in the index
    pub fn document_count(&self) -> usize {
        self.stats.len()
    }

    /// Get the number of unique terms in the index
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Answer a parsed query with ranked results, best first.
    pub fn query(&self, query: &Query) -> Result<Vec<QueryResult>, QueryError> {
        let candidates = Evaluator::new(self).evaluate(query.root())?;
        tracing::debug!("'{}' matched {} documents", query, candidates.len());
        Ok(rank(self, &candidates, query.words()))
    }

    /// Parse and answer query text.
    pub fn search(&self, text: &str) -> Result<Vec<QueryResult>, QueryError> {
        let query = Query::parse_str(text)?;
        self.query(&query)
    }

    /// Describe which documents each word is indexed to, one line per pair.
    pub fn postings_report<'w>(&self, words: impl IntoIterator<Item = &'w str>) -> Vec<String> {
        let mut lines = vec![];
        for word in words {
            let Some(docs) = self.lookup(word) else {
                lines.push(format!("'{}' gave no result.", word));
                continue;
            };
            let mut docs = docs.clone();
            docs.sort_for_iteration();
            lines.extend(
                docs.iter()
                    .map(|doc| format!("'{}' is indexed to '{}'.", word, doc)),
            );
        }
        lines
    }
}
