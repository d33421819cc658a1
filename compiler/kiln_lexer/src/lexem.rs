//! Token payloads handed to the parser.

use std::fmt;

use kiln_ir::{Name, Span, Value};

/// Reserved words.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Var,
    New,
    Function,
    Return,
    If,
    Else,
    For,
    While,
    Do,
    Break,
    Continue,
    Throw,
    Typeof,
    Void,
    Delete,
    In,
    InstanceOf,
    Yield,
    True,
    False,
    Null,
    Undefined,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Var => "var",
            Keyword::New => "new",
            Keyword::Function => "function",
            Keyword::Return => "return",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::For => "for",
            Keyword::While => "while",
            Keyword::Do => "do",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Throw => "throw",
            Keyword::Typeof => "typeof",
            Keyword::Void => "void",
            Keyword::Delete => "delete",
            Keyword::In => "in",
            Keyword::InstanceOf => "instanceof",
            Keyword::Yield => "yield",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::Undefined => "undefined",
        }
    }
}

/// Operators and delimiters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Punctuator {
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    Spread,
    Semicolon,
    Comma,
    Lt,
    Gt,
    LtEq,
    GtEq,
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Shl,
    Shr,
    UShr,
    Amp,
    Pipe,
    Caret,
    Bang,
    Tilde,
    AmpAmp,
    PipePipe,
    Question,
    Colon,
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    ShlEq,
    ShrEq,
    UShrEq,
    AmpEq,
    PipeEq,
    CaretEq,
    FatArrow,
}

impl Punctuator {
    pub fn as_str(self) -> &'static str {
        match self {
            Punctuator::LBrace => "{",
            Punctuator::RBrace => "}",
            Punctuator::LParen => "(",
            Punctuator::RParen => ")",
            Punctuator::LBracket => "[",
            Punctuator::RBracket => "]",
            Punctuator::Dot => ".",
            Punctuator::Spread => "...",
            Punctuator::Semicolon => ";",
            Punctuator::Comma => ",",
            Punctuator::Lt => "<",
            Punctuator::Gt => ">",
            Punctuator::LtEq => "<=",
            Punctuator::GtEq => ">=",
            Punctuator::EqEq => "==",
            Punctuator::NotEq => "!=",
            Punctuator::EqEqEq => "===",
            Punctuator::NotEqEq => "!==",
            Punctuator::Plus => "+",
            Punctuator::Minus => "-",
            Punctuator::Star => "*",
            Punctuator::StarStar => "**",
            Punctuator::Slash => "/",
            Punctuator::Percent => "%",
            Punctuator::PlusPlus => "++",
            Punctuator::MinusMinus => "--",
            Punctuator::Shl => "<<",
            Punctuator::Shr => ">>",
            Punctuator::UShr => ">>>",
            Punctuator::Amp => "&",
            Punctuator::Pipe => "|",
            Punctuator::Caret => "^",
            Punctuator::Bang => "!",
            Punctuator::Tilde => "~",
            Punctuator::AmpAmp => "&&",
            Punctuator::PipePipe => "||",
            Punctuator::Question => "?",
            Punctuator::Colon => ":",
            Punctuator::Eq => "=",
            Punctuator::PlusEq => "+=",
            Punctuator::MinusEq => "-=",
            Punctuator::StarEq => "*=",
            Punctuator::SlashEq => "/=",
            Punctuator::PercentEq => "%=",
            Punctuator::ShlEq => "<<=",
            Punctuator::ShrEq => ">>=",
            Punctuator::UShrEq => ">>>=",
            Punctuator::AmpEq => "&=",
            Punctuator::PipeEq => "|=",
            Punctuator::CaretEq => "^=",
            Punctuator::FatArrow => "=>",
        }
    }
}

/// One classified token.
#[derive(Clone, Debug)]
pub enum Lexem {
    Keyword(Keyword),
    Punctuator(Punctuator),
    Identifier(Name),
    /// Number or string literal, already converted to its runtime value.
    Literal(Value),
    Eof,
}

impl Lexem {
    #[inline]
    pub fn is_punctuator(&self, punctuator: Punctuator) -> bool {
        matches!(self, Lexem::Punctuator(p) if *p == punctuator)
    }

    #[inline]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Lexem::Keyword(k) if *k == keyword)
    }
}

impl fmt::Display for Lexem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lexem::Keyword(keyword) => write!(f, "keyword `{}`", keyword.as_str()),
            Lexem::Punctuator(punctuator) => write!(f, "`{}`", punctuator.as_str()),
            Lexem::Identifier(name) => write!(f, "identifier `{name}`"),
            Lexem::Literal(Value::String(text)) => write!(f, "string {text:?}"),
            Lexem::Literal(value) => write!(f, "number `{value}`"),
            Lexem::Eof => f.write_str("end of input"),
        }
    }
}

/// A lexem and where it came from.
#[derive(Clone, Debug)]
pub struct Token {
    pub lexem: Lexem,
    pub span: Span,
}

impl Token {
    pub fn new(lexem: Lexem, span: Span) -> Self {
        Token { lexem, span }
    }
}
