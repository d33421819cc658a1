//! Recursive descent parser for Kiln.
//!
//! Produces one [`ParseTree`] per translation unit. Every grammar rule
//! returns a standalone fragment whose root is the construct it parsed;
//! callers graft fragments under their own root with
//! [`FlatTree::append_tree`](kiln_ir::FlatTree::append_tree), and binary
//! operators re-root the left operand with
//! [`FlatTree::wrap`](kiln_ir::FlatTree::wrap).

mod error;
mod grammar;

pub use error::ParseError;

use kiln_ir::{Name, ParseTree, Statement};
use kiln_lexer::{Keyword, Lexem, Lexer, Punctuator, Token};

/// Parse `source` as one translation unit.
pub fn parse(source: &str) -> Result<ParseTree, ParseError> {
    Parser::new(source)?.parse()
}

/// Parser state: the lexer and a single token of lookahead.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Parser { lexer, current })
    }

    /// Parse statements until the end of input.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse(mut self) -> Result<ParseTree, ParseError> {
        let mut tree = ParseTree::new(Statement::TranslationUnit.into());
        while !self.at_eof() {
            let statement = self.parse_statement()?;
            graft(&mut tree, statement)?;
        }
        tracing::debug!(nodes = tree.node_count(), "parsed translation unit");
        Ok(tree)
    }

    // Cursor

    #[inline]
    fn at_eof(&self) -> bool {
        matches!(self.current.lexem, Lexem::Eof)
    }

    #[inline]
    fn check(&self, punctuator: Punctuator) -> bool {
        self.current.lexem.is_punctuator(punctuator)
    }

    #[inline]
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.lexem.is_keyword(keyword)
    }

    /// Consume the current token and return it.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn eat(&mut self, punctuator: Punctuator) -> Result<bool, ParseError> {
        if self.check(punctuator) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> Result<bool, ParseError> {
        if self.check_keyword(keyword) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect(&mut self, punctuator: Punctuator) -> Result<(), ParseError> {
        if self.eat(punctuator)? {
            return Ok(());
        }
        Err(self.expected(format!("`{}`", punctuator.as_str())))
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword)? {
            return Ok(());
        }
        Err(self.expected(format!("keyword `{}`", keyword.as_str())))
    }

    fn expect_identifier(&mut self) -> Result<Name, ParseError> {
        if let Lexem::Identifier(name) = &self.current.lexem {
            let name = name.clone();
            self.advance()?;
            return Ok(name);
        }
        Err(self.expected("an identifier"))
    }

    /// Error describing the current token as unexpected.
    fn expected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::Expected {
            expected: expected.into(),
            found: self.current.lexem.to_string(),
            span: self.current.span,
        }
    }
}

/// Append `child` as the last child of the root of `tree`.
fn graft(tree: &mut ParseTree, child: ParseTree) -> Result<(), ParseError> {
    tree.append_tree(tree.root(), child)?;
    Ok(())
}

#[cfg(test)]
mod tests;
