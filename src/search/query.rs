//! Boolean query language: lexing, default-OR preprocessing and parsing.
//!
//! # Grammar
//!
//! ```text
//! query   := andterm | andterm "ANDNOT" query
//! andterm := orterm  | orterm  "AND"    andterm
//! orterm  := term    | term    "OR"     orterm
//! term    := "(" query ")" | <word>
//! ```
//!
//! All binary operators are right-associative. `ANDNOT` binds loosest and `OR`
//! tightest. Two bare words with no operator between them are joined with an
//! implicit `OR` before parsing.

use crate::error::ParseError;
use std::fmt;
use std::iter::Peekable;
use std::vec::IntoIter;

/// Binary operators of the query language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    AndNot,
}

impl Operator {
    /// Keyword spelling, as written in queries.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::AndNot => "ANDNOT",
        }
    }

    /// Parse a keyword case-insensitively.
    pub fn from_keyword(word: &str) -> Option<Self> {
        [Self::AndNot, Self::And, Self::Or]
            .into_iter()
            .find(|op| word.eq_ignore_ascii_case(op.keyword()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A lexical token of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    Word(String),
    Operator(Operator),
    LParen,
    RParen,
}

impl QueryToken {
    fn is_word(&self) -> bool {
        matches!(self, Self::Word(_))
    }
}

impl fmt::Display for QueryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(word) => f.write_str(word),
            Self::Operator(op) => f.write_str(op.keyword()),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

/// Splits query text into tokens.
///
/// Whitespace separates tokens and parentheses are always tokens of their own.
/// Operator keywords match case-insensitively; all other words are lowercased.
pub fn lex(text: &str) -> Vec<QueryToken> {
    let mut tokens = vec![];
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
        } else if c == '(' || c == ')' {
            tokens.push(if c == '(' {
                QueryToken::LParen
            } else {
                QueryToken::RParen
            });
            rest = &rest[1..];
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
                .unwrap_or(rest.len());
            let word = &rest[..end];
            tokens.push(match Operator::from_keyword(word) {
                Some(op) => QueryToken::Operator(op),
                None => QueryToken::Word(word.to_lowercase()),
            });
            rest = &rest[end..];
        }
    }

    tokens
}

/// Inserts an explicit `OR` between every pair of adjacent words.
pub fn insert_default_or(tokens: Vec<QueryToken>) -> Vec<QueryToken> {
    let mut processed = Vec::with_capacity(tokens.len() * 2);
    for token in tokens {
        if token.is_word() && processed.last().is_some_and(QueryToken::is_word) {
            processed.push(QueryToken::Operator(Operator::Or));
        }
        processed.push(token);
    }
    processed
}

/// A node of the query syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    Term(String),
    Binary {
        op: Operator,
        left: Box<QueryNode>,
        right: Box<QueryNode>,
    },
}

impl QueryNode {
    fn binary(op: Operator, left: Self, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term(word) => f.write_str(word),
            Self::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

/// A parsed query: its syntax tree plus the words it mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    root: QueryNode,
    tokens: Vec<QueryToken>,
}

impl Query {
    /// Parse query text. Shorthand for [`lex`] followed by [`Query::parse`].
    pub fn parse_str(text: &str) -> Result<Self, ParseError> {
        Self::parse(lex(text))
    }

    /// Parse a token sequence, inserting implicit `OR`s between adjacent words first.
    pub fn parse(tokens: Vec<QueryToken>) -> Result<Self, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let tokens = insert_default_or(tokens);
        let mut parser = Parser {
            tokens: tokens.clone().into_iter().peekable(),
        };
        let root = parser.parse_query()?;

        if let Some(token) = parser.tokens.next() {
            return Err(ParseError::UnexpectedToken(token.to_string()));
        }

        tracing::trace!("Parsed query: {}", root);
        Ok(Self { root, tokens })
    }

    pub fn root(&self) -> &QueryNode {
        &self.root
    }

    /// Every word in the query, in order and with repeats, operators and
    /// parentheses excluded.
    pub fn words(&self) -> impl Iterator<Item = &str> + Clone {
        self.tokens.iter().filter_map(|token| match token {
            QueryToken::Word(word) => Some(word.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

/// Recursive-descent parser holding one token of lookahead.
struct Parser {
    tokens: Peekable<IntoIter<QueryToken>>,
}

impl Parser {
    /// Consume `op` if it is next, failing when nothing follows it.
    fn eat_operator(&mut self, op: Operator) -> Result<bool, ParseError> {
        if self.tokens.peek() != Some(&QueryToken::Operator(op)) {
            return Ok(false);
        }
        self.tokens.next();
        if self.tokens.peek().is_none() {
            return Err(ParseError::DanglingOperator(op));
        }
        Ok(true)
    }

    /// query := andterm | andterm "ANDNOT" query
    fn parse_query(&mut self) -> Result<QueryNode, ParseError> {
        let andterm = self.parse_andterm()?;
        if self.eat_operator(Operator::AndNot)? {
            let query = self.parse_query()?;
            return Ok(QueryNode::binary(Operator::AndNot, andterm, query));
        }
        Ok(andterm)
    }

    /// andterm := orterm | orterm "AND" andterm
    fn parse_andterm(&mut self) -> Result<QueryNode, ParseError> {
        let orterm = self.parse_orterm()?;
        if self.eat_operator(Operator::And)? {
            let andterm = self.parse_andterm()?;
            return Ok(QueryNode::binary(Operator::And, orterm, andterm));
        }
        Ok(orterm)
    }

    /// orterm := term | term "OR" orterm
    fn parse_orterm(&mut self) -> Result<QueryNode, ParseError> {
        let term = self.parse_term()?;
        if self.eat_operator(Operator::Or)? {
            let orterm = self.parse_orterm()?;
            return Ok(QueryNode::binary(Operator::Or, term, orterm));
        }
        Ok(term)
    }

    /// term := "(" query ")" | <word>
    fn parse_term(&mut self) -> Result<QueryNode, ParseError> {
        match self.tokens.next() {
            Some(QueryToken::Word(word)) => Ok(QueryNode::Term(word)),
            Some(QueryToken::LParen) => {
                if self.tokens.peek().is_none() {
                    return Err(ParseError::MissingEndParenthesis);
                }
                let query = self.parse_query()?;
                match self.tokens.next() {
                    Some(QueryToken::RParen) => Ok(query),
                    _ => Err(ParseError::MissingEndParenthesis),
                }
            }
            Some(token) => Err(ParseError::UnexpectedToken(token.to_string())),
            None => Err(ParseError::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;

    #[test]
    fn test_lex_splits_parentheses_and_lowercases_words() {
        let tokens = lex("(Graph and Tree)OR heap");
        check!(
            tokens
                == vec![
                    QueryToken::LParen,
                    QueryToken::Word("graph".into()),
                    QueryToken::Operator(Operator::And),
                    QueryToken::Word("tree".into()),
                    QueryToken::RParen,
                    QueryToken::Operator(Operator::Or),
                    QueryToken::Word("heap".into()),
                ]
        );
    }

    #[rstest]
    #[case("ANDNOT", Some(Operator::AndNot))]
    #[case("andnot", Some(Operator::AndNot))]
    #[case("And", Some(Operator::And))]
    #[case("or", Some(Operator::Or))]
    #[case("orange", None)]
    #[case("NOT", None)]
    fn test_keywords(#[case] word: &str, #[case] expected: Option<Operator>) {
        check!(Operator::from_keyword(word) == expected);
    }

    #[test]
    fn test_default_or_only_between_words() {
        let tokens = insert_default_or(lex("a b (c d) e"));
        let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        check!(rendered == vec!["a", "OR", "b", "(", "c", "OR", "d", ")", "e"]);
    }

    #[rstest]
    #[case("graph", "graph")]
    #[case("a b c", "(a OR (b OR c))")]
    #[case("a OR b OR c", "(a OR (b OR c))")]
    #[case("a AND b OR c", "(a AND (b OR c))")]
    #[case("a OR b AND c", "((a OR b) AND c)")]
    #[case("a AND b ANDNOT c AND d", "((a AND b) ANDNOT (c AND d))")]
    #[case("a ANDNOT b ANDNOT c", "(a ANDNOT (b ANDNOT c))")]
    #[case("(a OR b) AND c", "((a OR b) AND c)")]
    #[case("a AND (b ANDNOT c)", "(a AND (b ANDNOT c))")]
    #[case("((a))", "a")]
    fn test_precedence_and_associativity(#[case] text: &str, #[case] expected: &str) {
        let_assert!(Ok(query) = Query::parse_str(text));
        check!(query.to_string() == expected);
    }

    #[rstest]
    #[case("", ParseError::Empty)]
    #[case("   ", ParseError::Empty)]
    #[case("a AND", ParseError::DanglingOperator(Operator::And))]
    #[case("a OR", ParseError::DanglingOperator(Operator::Or))]
    #[case("a ANDNOT", ParseError::DanglingOperator(Operator::AndNot))]
    #[case("(a AND b", ParseError::MissingEndParenthesis)]
    #[case("(", ParseError::MissingEndParenthesis)]
    #[case("((a)", ParseError::MissingEndParenthesis)]
    #[case("a)", ParseError::UnexpectedToken(")".into()))]
    #[case("(a) b", ParseError::UnexpectedToken("b".into()))]
    #[case("AND a", ParseError::UnexpectedToken("AND".into()))]
    #[case("a OR AND b", ParseError::UnexpectedToken("AND".into()))]
    #[case("()", ParseError::UnexpectedToken(")".into()))]
    fn test_grammar_errors(#[case] text: &str, #[case] expected: ParseError) {
        let_assert!(Err(error) = Query::parse_str(text));
        check!(error == expected);
    }

    #[test]
    fn test_dangling_operator_inside_parentheses() {
        // The operator is followed by ")", so it is not dangling; the ")" is
        // simply not a term.
        let_assert!(Err(error) = Query::parse_str("(a AND)"));
        check!(error == ParseError::UnexpectedToken(")".into()));
    }

    #[test]
    fn test_words_skip_operators_and_keep_repeats() {
        let_assert!(Ok(query) = Query::parse_str("(a OR b) AND a ANDNOT c"));
        check!(query.words().collect::<Vec<_>>() == vec!["a", "b", "a", "c"]);
    }

    #[test]
    fn test_tree_shape() {
        let_assert!(Ok(query) = Query::parse_str("a ANDNOT b"));
        check!(
            *query.root()
                == QueryNode::Binary {
                    op: Operator::AndNot,
                    left: Box::new(QueryNode::Term("a".into())),
                    right: Box::new(QueryNode::Term("b".into())),
                }
        );
    }
}
