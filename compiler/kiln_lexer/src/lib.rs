//! Kiln Lexer - turns source text into a pull-based token stream.
//!
//! Tokenization is driven by a [`logos`] automaton; this crate layers on top
//! of it the parts logos does not do: skipping comments, converting number
//! and string literals to runtime [`Value`]s, and reporting malformed input
//! as [`LexError`]s with their [`Span`].
//!
//! ```text
//! var x = 3;  =>  Keyword(var) Identifier(x) Punctuator(=) Literal(3) Punctuator(;) Eof
//! ```

mod lex_error;
mod lexem;
mod raw_token;

use logos::Logos;

use kiln_ir::{parse_number, Name, Span, Value};

pub use lex_error::LexError;
pub use lexem::{Keyword, Lexem, Punctuator, Token};
use raw_token::RawToken;

/// Pull-based lexer over one translation unit.
///
/// After the input is exhausted every call to [`next_token`](Self::next_token)
/// yields [`Lexem::Eof`].
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, RawToken>,
    peeked: Option<Result<Token, LexError>>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            inner: RawToken::lexer(source),
            peeked: None,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        match self.peeked.take() {
            Some(token) => token,
            None => self.lex(),
        }
    }

    /// Whether only whitespace and comments remain.
    pub fn at_end(&mut self) -> bool {
        if self.peeked.is_none() {
            self.peeked = Some(self.lex());
        }
        matches!(
            self.peeked,
            Some(Ok(Token {
                lexem: Lexem::Eof,
                ..
            }))
        )
    }

    /// Lex the whole input, stopping after the first error.
    pub fn tokenize(source: &'src str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let done = matches!(token.lexem, Lexem::Eof);
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn lex(&mut self) -> Result<Token, LexError> {
        loop {
            let Some(result) = self.inner.next() else {
                let end = self.inner.source().len();
                return Ok(Token::new(Lexem::Eof, Span::from_range(end..end)));
            };
            let span = Span::from_range(self.inner.span());
            let slice = self.inner.slice();

            let Ok(raw) = result else {
                return Err(classify_error(slice, span));
            };

            let lexem = match raw {
                RawToken::LineComment | RawToken::BlockComment => continue,
                RawToken::Keyword(keyword) => Lexem::Keyword(keyword),
                RawToken::Punctuator(punctuator) => Lexem::Punctuator(punctuator),
                RawToken::Number => {
                    self.check_number_boundary(slice, span)?;
                    Lexem::Literal(Value::Number(parse_number(slice)))
                }
                RawToken::String => {
                    let body = &slice[1..slice.len() - 1];
                    Lexem::Literal(Value::from(unescape(body, span)?))
                }
                RawToken::Identifier => Lexem::Identifier(Name::from(slice)),
            };
            return Ok(Token::new(lexem, span));
        }
    }

    /// A number immediately followed by an identifier character (`3abc`) is
    /// rejected instead of being split into two tokens.
    fn check_number_boundary(&self, slice: &str, span: Span) -> Result<(), LexError> {
        let remainder = self.inner.remainder();
        let tail = remainder
            .find(|c: char| !is_identifier_char(c))
            .unwrap_or(remainder.len());
        if tail == 0 {
            return Ok(());
        }
        let end = span.to_range().end + tail;
        Err(LexError::InvalidNumber {
            text: format!("{slice}{}", &remainder[..tail]),
            span: Span::from_range(span.to_range().start..end),
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    /// Yields tokens up to, but not including, [`Lexem::Eof`].
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Token {
                lexem: Lexem::Eof, ..
            }) => None,
            other => Some(other),
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn classify_error(slice: &str, span: Span) -> LexError {
    if slice.starts_with("/*") {
        return LexError::UnterminatedComment { span };
    }
    match slice.chars().next() {
        Some('"' | '\'') => LexError::UnterminatedString { span },
        found => LexError::UnexpectedCharacter {
            found: found.unwrap_or('\0'),
            span,
        },
    }
}

/// Process the escape sequences of a string literal body.
fn unescape(body: &str, span: Span) -> Result<String, LexError> {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('v') => result.push('\u{b}'),
            Some('b') => result.push('\u{8}'),
            Some('f') => result.push('\u{c}'),
            Some('0') => result.push('\0'),
            Some(quoted @ ('\\' | '\'' | '"')) => result.push(quoted),
            Some(found) => return Err(LexError::UnknownEscape { found, span }),
            // The literal regex never ends a body on a lone backslash.
            None => result.push('\\'),
        }
    }
    Ok(result)
}
