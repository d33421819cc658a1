//! Parse error types.

use kiln_ir::{Span, TreeError};
use kiln_lexer::LexError;

/// Failure to parse a translation unit.
///
/// Parsing stops at the first error; there is no recovery.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The next token does not fit the grammar at this point.
    #[error("Expected {expected}, but encountered {found}.")]
    Expected {
        expected: String,
        found: String,
        span: Span,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    /// Grafting a parsed fragment failed; only reachable on absurdly large input.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ParseError {
    /// Source location, when one is known.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseError::Expected { span, .. } => Some(*span),
            ParseError::Lex(error) => Some(error.span()),
            ParseError::Tree(_) => None,
        }
    }
}
