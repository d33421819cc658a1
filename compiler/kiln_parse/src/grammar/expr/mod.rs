//! Expression parsing.
//!
//! Binary operators are handled by precedence climbing over
//! [`Operation::precedence`]; unary, postfix and primary expressions by
//! plain recursive descent.
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point, binary operators, prefix and postfix chains
//! - `operators.rs`: token to operator matching
//! - `primary.rs`: literals, names, grouping, object/array/function literals, `new`

mod operators;
mod primary;

use kiln_ir::{NodeId, Operation, ParseResult, ParseTree, Value};
use kiln_lexer::{Lexem, Punctuator};
use kiln_stack::ensure_sufficient_stack;

use crate::{graft, ParseError, Parser};

impl Parser<'_> {
    /// Parse a full expression, assignments included.
    pub(crate) fn parse_expression(&mut self) -> Result<ParseTree, ParseError> {
        self.parse_binary(0)
    }

    /// Parse an expression whose top-level operators bind at least as
    /// tightly as `min_precedence`.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<ParseTree, ParseError> {
        ensure_sufficient_stack(|| self.parse_binary_inner(min_precedence))
    }

    fn parse_binary_inner(&mut self, min_precedence: u8) -> Result<ParseTree, ParseError> {
        let mut lhs = self.parse_unary()?;

        while let Some(operation) = self.match_binary_op() {
            let precedence = operation.precedence();
            if precedence < min_precedence {
                break;
            }
            if operation.is_assignment() {
                self.check_assignable(&lhs)?;
            }
            self.advance()?;

            let root = lhs.root();
            lhs.wrap(root, operation.into())?;

            if operation == Operation::Conditional {
                let consequent = self.parse_expression()?;
                graft(&mut lhs, consequent)?;
                self.expect(Punctuator::Colon)?;
            }

            let next_precedence = if operation.is_right_associative() {
                precedence
            } else {
                precedence + 1
            };
            let rhs = self.parse_binary(next_precedence)?;
            graft(&mut lhs, rhs)?;
        }

        Ok(lhs)
    }

    /// Prefix operators, right to left: `!-x` is `!(-x)`.
    fn parse_unary(&mut self) -> Result<ParseTree, ParseError> {
        let Some(operation) = self.match_prefix_op() else {
            return self.parse_postfix();
        };
        self.advance()?;
        let mut operand = ensure_sufficient_stack(|| self.parse_unary())?;
        if operation.is_assignment() {
            self.check_assignable(&operand)?;
        }
        let root = operand.root();
        operand.wrap(root, operation.into())?;
        Ok(operand)
    }

    /// Member access, calls, and postfix `++`/`--` on a primary expression.
    fn parse_postfix(&mut self) -> Result<ParseTree, ParseError> {
        let mut expression = self.parse_primary()?;
        loop {
            match self.current.lexem {
                Lexem::Punctuator(Punctuator::Dot | Punctuator::LBracket) => {
                    self.parse_member_access(&mut expression)?;
                }
                Lexem::Punctuator(Punctuator::LParen) => {
                    self.advance()?;
                    let root = expression.root();
                    expression.wrap(root, Operation::Call.into())?;
                    self.parse_arguments(&mut expression)?;
                }
                Lexem::Punctuator(punctuator @ (Punctuator::PlusPlus | Punctuator::MinusMinus)) => {
                    self.check_assignable(&expression)?;
                    self.advance()?;
                    let operation = if punctuator == Punctuator::PlusPlus {
                        Operation::PostfixIncrement
                    } else {
                        Operation::PostfixDecrement
                    };
                    let root = expression.root();
                    expression.wrap(root, operation.into())?;
                    return Ok(expression);
                }
                _ => return Ok(expression),
            }
        }
    }

    /// `.name` or `[expr]`, re-rooting `base` under a `MemberAccess`.
    fn parse_member_access(&mut self, base: &mut ParseTree) -> Result<(), ParseError> {
        let key = if self.eat(Punctuator::Dot)? {
            let name = self.expect_property_name()?;
            ParseTree::new(Value::String(name).into())
        } else {
            self.expect(Punctuator::LBracket)?;
            let key = self.parse_expression()?;
            self.expect(Punctuator::RBracket)?;
            key
        };
        let root = base.root();
        base.wrap(root, Operation::MemberAccess.into())?;
        graft(base, key)
    }

    /// Comma-separated arguments up to and including `)`; the `(` has
    /// already been consumed.
    fn parse_arguments(&mut self, call: &mut ParseTree) -> Result<(), ParseError> {
        if self.eat(Punctuator::RParen)? {
            return Ok(());
        }
        loop {
            let argument = self.parse_expression()?;
            graft(call, argument)?;
            if !self.eat(Punctuator::Comma)? {
                break;
            }
        }
        self.expect(Punctuator::RParen)
    }

    /// Only bindings and properties can be written to.
    fn check_assignable(&self, target: &ParseTree) -> Result<(), ParseError> {
        match &target[NodeId::ROOT] {
            ParseResult::VarUse(_) | ParseResult::Operation(Operation::MemberAccess) => Ok(()),
            other => Err(ParseError::Expected {
                expected: "an assignable expression".to_owned(),
                found: other.kind_name().to_owned(),
                span: self.current.span,
            }),
        }
    }
}
