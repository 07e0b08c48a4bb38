//! Error handling types and utilities.

use crate::search::Operator;
use thiserror::Error;

/// A specialized Result type for findfiles plumbing (I/O, discovery, CLI).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Grammar errors, reported at the token where parsing failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Query empty.")]
    Empty,

    #[error("'{0}'-operator without follow-up.")]
    DanglingOperator(Operator),

    #[error("Missing end-parenthesis.")]
    MissingEndParenthesis,

    #[error("Unexpected token '{0}'.")]
    UnexpectedToken(String),
}

/// Error returned when a query cannot be answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query text does not follow the grammar.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A queried term is absent from the index. Fails the whole query.
    #[error("No match for query.")]
    NoMatch { term: String },
}

impl QueryError {
    /// Returns `true` for grammar errors, `false` for evaluation misses.
    pub fn is_grammar_error(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
