//! Statement parsing.

use kiln_ir::{NodeId, Operation, ParseResult, ParseTree, Statement, Value};
use kiln_lexer::{Keyword, Lexem, Punctuator};
use kiln_stack::ensure_sufficient_stack;

use crate::{graft, ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<ParseTree, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<ParseTree, ParseError> {
        match self.current.lexem {
            Lexem::Punctuator(Punctuator::LBrace) => self.parse_block(),
            Lexem::Keyword(Keyword::If) => self.parse_if(),
            Lexem::Keyword(Keyword::While) => self.parse_while(),
            Lexem::Keyword(Keyword::Do) => self.parse_do_while(),
            Lexem::Keyword(Keyword::For) => self.parse_for(),
            Lexem::Keyword(Keyword::Return) => self.parse_return(),
            Lexem::Keyword(Keyword::Throw) => self.parse_throw(),
            Lexem::Keyword(Keyword::Break) => self.parse_jump(Statement::Break),
            Lexem::Keyword(Keyword::Continue) => self.parse_jump(Statement::Continue),
            _ => self.parse_expression_statement(),
        }
    }

    /// `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<ParseTree, ParseError> {
        self.expect(Punctuator::LBrace)?;
        let mut block = ParseTree::new(Statement::Block.into());
        while !self.check(Punctuator::RBrace) {
            if self.at_eof() {
                return Err(self.expected("`}`"));
            }
            let statement = self.parse_statement()?;
            graft(&mut block, statement)?;
        }
        self.advance()?;
        Ok(block)
    }

    /// `if ( expr ) statement [else statement]`
    fn parse_if(&mut self) -> Result<ParseTree, ParseError> {
        self.advance()?;
        let mut node = ParseTree::new(Statement::If.into());
        let condition = self.parse_condition()?;
        graft(&mut node, condition)?;
        let consequent = self.parse_statement()?;
        graft(&mut node, consequent)?;
        if self.eat_keyword(Keyword::Else)? {
            let alternative = self.parse_statement()?;
            graft(&mut node, alternative)?;
        }
        Ok(node)
    }

    /// `while ( expr ) statement`
    fn parse_while(&mut self) -> Result<ParseTree, ParseError> {
        self.advance()?;
        let mut node = ParseTree::new(Statement::While.into());
        let condition = self.parse_condition()?;
        graft(&mut node, condition)?;
        let body = self.parse_statement()?;
        graft(&mut node, body)?;
        Ok(node)
    }

    /// `do statement while ( expr ) ;`
    fn parse_do_while(&mut self) -> Result<ParseTree, ParseError> {
        self.advance()?;
        let mut node = ParseTree::new(Statement::DoWhile.into());
        let body = self.parse_statement()?;
        graft(&mut node, body)?;
        self.expect_keyword(Keyword::While)?;
        let condition = self.parse_condition()?;
        graft(&mut node, condition)?;
        self.expect(Punctuator::Semicolon)?;
        Ok(node)
    }

    /// `for ( [init] ; [condition] ; [update] ) statement`
    ///
    /// Missing clauses are filled with `Literal(undefined)` so the body is
    /// always the fourth child.
    fn parse_for(&mut self) -> Result<ParseTree, ParseError> {
        self.advance()?;
        self.expect(Punctuator::LParen)?;
        let mut node = ParseTree::new(Statement::For.into());

        let init = if self.check(Punctuator::Semicolon) {
            empty_clause()
        } else if self.check_keyword(Keyword::Var) {
            self.parse_var_decl()?
        } else {
            self.parse_expression()?
        };
        graft(&mut node, init)?;
        self.expect(Punctuator::Semicolon)?;

        let condition = self.parse_optional_clause(Punctuator::Semicolon)?;
        graft(&mut node, condition)?;
        self.expect(Punctuator::Semicolon)?;

        let update = self.parse_optional_clause(Punctuator::RParen)?;
        graft(&mut node, update)?;
        self.expect(Punctuator::RParen)?;

        let body = self.parse_statement()?;
        graft(&mut node, body)?;
        Ok(node)
    }

    /// `return [expr] ;`
    fn parse_return(&mut self) -> Result<ParseTree, ParseError> {
        self.advance()?;
        let mut node = ParseTree::new(Statement::Return.into());
        if !self.check(Punctuator::Semicolon) {
            let value = self.parse_expression()?;
            graft(&mut node, value)?;
        }
        self.expect(Punctuator::Semicolon)?;
        Ok(node)
    }

    /// `throw expr ;`
    fn parse_throw(&mut self) -> Result<ParseTree, ParseError> {
        self.advance()?;
        let mut node = ParseTree::new(Statement::Throw.into());
        let value = self.parse_expression()?;
        graft(&mut node, value)?;
        self.expect(Punctuator::Semicolon)?;
        Ok(node)
    }

    /// `break ;` and `continue ;`
    fn parse_jump(&mut self, statement: Statement) -> Result<ParseTree, ParseError> {
        self.advance()?;
        self.expect(Punctuator::Semicolon)?;
        Ok(ParseTree::new(statement.into()))
    }

    /// `var name [= expr] ;` or `expr ;`
    ///
    /// A function literal standing alone without a trailing `;` is a
    /// function declaration.
    fn parse_expression_statement(&mut self) -> Result<ParseTree, ParseError> {
        let mut statement = ParseTree::new(Statement::Expression.into());
        let expression = if self.check_keyword(Keyword::Var) {
            self.parse_var_decl()?
        } else {
            self.parse_expression()?
        };
        let is_function = expression[NodeId::ROOT].is_operation(Operation::Function);
        graft(&mut statement, expression)?;

        if is_function && !self.check(Punctuator::Semicolon) {
            statement[NodeId::ROOT] = Statement::Function.into();
        } else {
            self.expect(Punctuator::Semicolon)?;
        }
        Ok(statement)
    }

    /// `var name [= expr]`, without the terminator.
    fn parse_var_decl(&mut self) -> Result<ParseTree, ParseError> {
        self.expect_keyword(Keyword::Var)?;
        let name = self.expect_identifier()?;
        let mut declaration = ParseTree::new(ParseResult::VarDecl(name));
        if self.eat(Punctuator::Eq)? {
            let initializer = self.parse_expression()?;
            graft(&mut declaration, initializer)?;
        }
        Ok(declaration)
    }

    /// `( expr )`
    fn parse_condition(&mut self) -> Result<ParseTree, ParseError> {
        self.expect(Punctuator::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(Punctuator::RParen)?;
        Ok(condition)
    }

    fn parse_optional_clause(&mut self, terminator: Punctuator) -> Result<ParseTree, ParseError> {
        if self.check(terminator) {
            return Ok(empty_clause());
        }
        self.parse_expression()
    }
}

fn empty_clause() -> ParseTree {
    ParseTree::new(Value::Undefined.into())
}
