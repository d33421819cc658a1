use logos::Logos;

use crate::lexem::{Keyword, Punctuator};

/// Raw token from logos, before literals are converted to values.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub(crate) enum RawToken {
    // Comments
    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,

    // Keywords
    #[token("var", |_| Keyword::Var)]
    #[token("new", |_| Keyword::New)]
    #[token("function", |_| Keyword::Function)]
    #[token("return", |_| Keyword::Return)]
    #[token("if", |_| Keyword::If)]
    #[token("else", |_| Keyword::Else)]
    #[token("for", |_| Keyword::For)]
    #[token("while", |_| Keyword::While)]
    #[token("do", |_| Keyword::Do)]
    #[token("break", |_| Keyword::Break)]
    #[token("continue", |_| Keyword::Continue)]
    #[token("throw", |_| Keyword::Throw)]
    #[token("typeof", |_| Keyword::Typeof)]
    #[token("void", |_| Keyword::Void)]
    #[token("delete", |_| Keyword::Delete)]
    #[token("in", |_| Keyword::In)]
    #[token("instanceof", |_| Keyword::InstanceOf)]
    #[token("yield", |_| Keyword::Yield)]
    #[token("true", |_| Keyword::True)]
    #[token("false", |_| Keyword::False)]
    #[token("null", |_| Keyword::Null)]
    #[token("undefined", |_| Keyword::Undefined)]
    Keyword(Keyword),

    // Punctuators
    #[token("{", |_| Punctuator::LBrace)]
    #[token("}", |_| Punctuator::RBrace)]
    #[token("(", |_| Punctuator::LParen)]
    #[token(")", |_| Punctuator::RParen)]
    #[token("[", |_| Punctuator::LBracket)]
    #[token("]", |_| Punctuator::RBracket)]
    #[token(".", |_| Punctuator::Dot)]
    #[token("...", |_| Punctuator::Spread)]
    #[token(";", |_| Punctuator::Semicolon)]
    #[token(",", |_| Punctuator::Comma)]
    #[token("<", |_| Punctuator::Lt)]
    #[token(">", |_| Punctuator::Gt)]
    #[token("<=", |_| Punctuator::LtEq)]
    #[token(">=", |_| Punctuator::GtEq)]
    #[token("==", |_| Punctuator::EqEq)]
    #[token("!=", |_| Punctuator::NotEq)]
    #[token("===", |_| Punctuator::EqEqEq)]
    #[token("!==", |_| Punctuator::NotEqEq)]
    #[token("+", |_| Punctuator::Plus)]
    #[token("-", |_| Punctuator::Minus)]
    #[token("*", |_| Punctuator::Star)]
    #[token("**", |_| Punctuator::StarStar)]
    #[token("/", |_| Punctuator::Slash)]
    #[token("%", |_| Punctuator::Percent)]
    #[token("++", |_| Punctuator::PlusPlus)]
    #[token("--", |_| Punctuator::MinusMinus)]
    #[token("<<", |_| Punctuator::Shl)]
    #[token(">>", |_| Punctuator::Shr)]
    #[token(">>>", |_| Punctuator::UShr)]
    #[token("&", |_| Punctuator::Amp)]
    #[token("|", |_| Punctuator::Pipe)]
    #[token("^", |_| Punctuator::Caret)]
    #[token("!", |_| Punctuator::Bang)]
    #[token("~", |_| Punctuator::Tilde)]
    #[token("&&", |_| Punctuator::AmpAmp)]
    #[token("||", |_| Punctuator::PipePipe)]
    #[token("?", |_| Punctuator::Question)]
    #[token(":", |_| Punctuator::Colon)]
    #[token("=", |_| Punctuator::Eq)]
    #[token("+=", |_| Punctuator::PlusEq)]
    #[token("-=", |_| Punctuator::MinusEq)]
    #[token("*=", |_| Punctuator::StarEq)]
    #[token("/=", |_| Punctuator::SlashEq)]
    #[token("%=", |_| Punctuator::PercentEq)]
    #[token("<<=", |_| Punctuator::ShlEq)]
    #[token(">>=", |_| Punctuator::ShrEq)]
    #[token(">>>=", |_| Punctuator::UShrEq)]
    #[token("&=", |_| Punctuator::AmpEq)]
    #[token("|=", |_| Punctuator::PipeEq)]
    #[token("^=", |_| Punctuator::CaretEq)]
    #[token("=>", |_| Punctuator::FatArrow)]
    Punctuator(Punctuator),

    // Literals
    #[regex(r"0[xX][0-9a-fA-F]+")]
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*'"#)]
    String,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,
}

/// Consume a block comment body up to and including `*/`.
///
/// An unterminated comment swallows the rest of the input and produces an
/// error token.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    if let Some(end) = lex.remainder().find("*/") {
        lex.bump(end + 2);
        true
    } else {
        lex.bump(lex.remainder().len());
        false
    }
}
