//! Relevance scoring for query results.
//!
//! Scores are tf-idf shaped:
//!
//! - `tf(d)` is the summed frequency of every query word in `d`, divided by
//!   the length of `d` in words;
//! - `idf` is `log10(corpus_size / |candidates|)`, where `corpus_size` counts
//!   every word occurrence seen while indexing. It is therefore a single
//!   constant per query rather than a per-term weight;
//! - `score(d) = tf(d) * idf`.

use super::index::{DocId, DocStats, InvertedIndex, QueryResult};
use crate::set::OrderedSet;

/// Term frequency of the query words in one document.
pub fn term_frequency<'q>(stats: &DocStats, words: impl IntoIterator<Item = &'q str>) -> f64 {
    let occurrences: usize = words.into_iter().map(|word| stats.frequency(word)).sum();
    occurrences as f64 / stats.length() as f64
}

/// Inverse document frequency shared by every candidate of a query.
pub fn inverse_document_frequency(corpus_size: usize, candidates: usize) -> f64 {
    (corpus_size as f64 / candidates as f64).log10()
}

/// Score every candidate and sort by score, highest first.
///
/// The sort is stable, so equal scores keep the candidate set's iteration order.
pub(crate) fn rank<'q>(
    index: &InvertedIndex,
    candidates: &OrderedSet<DocId>,
    words: impl Iterator<Item = &'q str> + Clone,
) -> Vec<QueryResult> {
    let idf = inverse_document_frequency(index.corpus_size(), candidates.len());

    let mut results: Vec<QueryResult> = candidates
        .iter()
        .filter_map(|doc| {
            let Some(stats) = index.doc_stats(doc) else {
                tracing::warn!("Candidate '{}' has no statistics, skipping", doc);
                return None;
            };
            Some(QueryResult {
                path: doc.to_string(),
                score: term_frequency(stats, words.clone()) * idf,
            })
        })
        .collect();

    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
}
