pub mod cli;
pub mod corpus;
pub mod error;
pub mod search;
pub mod set;
pub mod tracing;

pub use error::{ParseError, QueryError};
pub use search::{DocId, DocStats, InvertedIndex, Operator, Query, QueryNode, QueryResult};
pub use set::OrderedSet;
