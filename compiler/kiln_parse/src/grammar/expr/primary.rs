//! Primary expressions.

use kiln_ir::{Name, Operation, ParseResult, ParseTree, Value};
use kiln_lexer::{Keyword, Lexem, Punctuator};

use crate::{graft, ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> Result<ParseTree, ParseError> {
        let literal = match &self.current.lexem {
            Lexem::Literal(value) => Some(value.clone()),
            Lexem::Keyword(Keyword::True) => Some(Value::Bool(true)),
            Lexem::Keyword(Keyword::False) => Some(Value::Bool(false)),
            Lexem::Keyword(Keyword::Null) => Some(Value::Null),
            Lexem::Keyword(Keyword::Undefined) => Some(Value::Undefined),
            _ => None,
        };
        if let Some(value) = literal {
            self.advance()?;
            return Ok(ParseTree::new(value.into()));
        }

        match self.current.lexem {
            Lexem::Identifier(_) => {
                let name = self.expect_identifier()?;
                Ok(ParseTree::new(ParseResult::VarUse(name)))
            }
            Lexem::Punctuator(Punctuator::LParen) => self.parse_grouping(),
            Lexem::Punctuator(Punctuator::LBrace) => self.parse_object_literal(),
            Lexem::Punctuator(Punctuator::LBracket) => self.parse_array_literal(),
            Lexem::Keyword(Keyword::Function) => self.parse_function(),
            Lexem::Keyword(Keyword::New) => self.parse_new(),
            _ => Err(self.expected("an expression")),
        }
    }

    /// `( expr )`
    fn parse_grouping(&mut self) -> Result<ParseTree, ParseError> {
        self.expect(Punctuator::LParen)?;
        let mut grouping = self.parse_expression()?;
        self.expect(Punctuator::RParen)?;
        let root = grouping.root();
        grouping.wrap(root, Operation::Grouping.into())?;
        Ok(grouping)
    }

    /// `{ key: value, [expr]: value, shorthand }`
    ///
    /// Each property contributes two children: a `Literal` key followed by
    /// the value wrapped in a `Grouping` (or a `VarUse` of the same name for
    /// shorthand), or a computed key wrapped in a `Grouping` followed by the
    /// bare value expression.
    fn parse_object_literal(&mut self) -> Result<ParseTree, ParseError> {
        self.expect(Punctuator::LBrace)?;
        let mut object = ParseTree::new(Operation::JsonObject.into());
        if self.eat(Punctuator::RBrace)? {
            return Ok(object);
        }
        loop {
            if self.eat(Punctuator::LBracket)? {
                let mut key = self.parse_expression()?;
                let root = key.root();
                key.wrap(root, Operation::Grouping.into())?;
                self.expect(Punctuator::RBracket)?;
                self.expect(Punctuator::Colon)?;
                let value = self.parse_expression()?;
                graft(&mut object, key)?;
                graft(&mut object, value)?;
            } else {
                let shorthand = matches!(self.current.lexem, Lexem::Identifier(_));
                let name = self.expect_property_name()?;
                let root = object.root();
                object.append(root, Value::String(name.clone()).into())?;
                if self.eat(Punctuator::Colon)? {
                    let mut value = self.parse_expression()?;
                    let value_root = value.root();
                    value.wrap(value_root, Operation::Grouping.into())?;
                    graft(&mut object, value)?;
                } else if shorthand {
                    object.append(root, ParseResult::VarUse(name))?;
                } else {
                    return Err(self.expected("`:`"));
                }
            }
            if !self.eat(Punctuator::Comma)? {
                break;
            }
        }
        self.expect(Punctuator::RBrace)?;
        Ok(object)
    }

    /// `[ expr, , expr ]`; holes become `Literal(undefined)`.
    fn parse_array_literal(&mut self) -> Result<ParseTree, ParseError> {
        self.expect(Punctuator::LBracket)?;
        let mut array = ParseTree::new(Operation::ArrayObject.into());
        if self.eat(Punctuator::RBracket)? {
            return Ok(array);
        }
        loop {
            let element = if self.check(Punctuator::Comma) || self.check(Punctuator::RBracket) {
                ParseTree::new(Value::Undefined.into())
            } else {
                self.parse_expression()?
            };
            graft(&mut array, element)?;
            if !self.eat(Punctuator::Comma)? {
                break;
            }
        }
        self.expect(Punctuator::RBracket)?;
        Ok(array)
    }

    /// `function [name] ( params ) { body }`
    ///
    /// Children: the name (`Literal(undefined)` when anonymous), one
    /// `Literal` per parameter, then the body block.
    fn parse_function(&mut self) -> Result<ParseTree, ParseError> {
        self.expect_keyword(Keyword::Function)?;
        let mut function = ParseTree::new(Operation::Function.into());
        let root = function.root();

        let name = match self.current.lexem {
            Lexem::Identifier(_) => Value::String(self.expect_identifier()?),
            _ => Value::Undefined,
        };
        function.append(root, name.into())?;

        self.expect(Punctuator::LParen)?;
        if !self.eat(Punctuator::RParen)? {
            loop {
                let parameter = self.expect_identifier()?;
                function.append(root, Value::String(parameter).into())?;
                if !self.eat(Punctuator::Comma)? {
                    break;
                }
            }
            self.expect(Punctuator::RParen)?;
        }

        let body = self.parse_block()?;
        graft(&mut function, body)?;
        Ok(function)
    }

    /// `new callee [( args )]`, where the callee may include member accesses.
    fn parse_new(&mut self) -> Result<ParseTree, ParseError> {
        self.expect_keyword(Keyword::New)?;
        let mut new = ParseTree::new(Operation::New.into());
        let mut callee = self.parse_primary()?;
        while self.check(Punctuator::Dot) || self.check(Punctuator::LBracket) {
            self.parse_member_access(&mut callee)?;
        }
        graft(&mut new, callee)?;
        if self.eat(Punctuator::LParen)? {
            self.parse_arguments(&mut new)?;
        }
        Ok(new)
    }

    /// Identifier, keyword or literal used as a property name.
    pub(super) fn expect_property_name(&mut self) -> Result<Name, ParseError> {
        let name: Name = match &self.current.lexem {
            Lexem::Identifier(name) => name.clone(),
            Lexem::Keyword(keyword) => Name::from(keyword.as_str()),
            Lexem::Literal(value) => Name::from(value.to_string()),
            _ => return Err(self.expected("a property name")),
        };
        self.advance()?;
        Ok(name)
    }
}
