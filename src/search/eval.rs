//! Query evaluation against an [`InvertedIndex`].

use super::index::{DocId, InvertedIndex};
use super::query::{Operator, QueryNode};
use crate::error::QueryError;
use crate::set::OrderedSet;
use std::borrow::Cow;

/// A working set: either a posting set borrowed from the index or an
/// intermediate result owned by the evaluation.
pub(crate) type WorkingSet<'a> = Cow<'a, OrderedSet<DocId>>;

impl Operator {
    /// Combine two operand sets. `AndNot` keeps items of `left` absent from `right`.
    pub fn apply(self, left: &OrderedSet<DocId>, right: &OrderedSet<DocId>) -> OrderedSet<DocId> {
        match self {
            Self::And => left.intersection(right),
            Self::Or => left.union(right),
            Self::AndNot => left.difference(right),
        }
    }
}

/// Evaluation context for a single query.
pub(crate) struct Evaluator<'a> {
    index: &'a InvertedIndex,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(index: &'a InvertedIndex) -> Self {
        Self { index }
    }

    /// Walk the tree bottom-up and return the matching document set.
    ///
    /// The first term without postings fails the whole evaluation; the
    /// remaining subtrees are not visited.
    pub(crate) fn evaluate(&self, node: &QueryNode) -> Result<WorkingSet<'a>, QueryError> {
        match node {
            QueryNode::Term(word) => {
                let postings = self.index.lookup(word).ok_or_else(|| {
                    tracing::debug!("No postings for '{}'", word);
                    QueryError::NoMatch { term: word.clone() }
                })?;
                Ok(Cow::Borrowed(postings))
            }
            QueryNode::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                let combined = op.apply(&left, &right);
                tracing::trace!(
                    "{}: {} and {} documents -> {}",
                    op,
                    left.len(),
                    right.len(),
                    combined.len()
                );
                Ok(Cow::Owned(combined))
            }
        }
    }
}
