use kiln_ir::Span;

/// Failure to turn source text into tokens.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character `{found}`")]
    UnexpectedCharacter { found: char, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },

    #[error("unknown escape sequence `\\{found}`")]
    UnknownEscape { found: char, span: Span },

    #[error("invalid number literal `{text}`")]
    InvalidNumber { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedCharacter { span, .. }
            | LexError::UnterminatedString { span }
            | LexError::UnterminatedComment { span }
            | LexError::UnknownEscape { span, .. }
            | LexError::InvalidNumber { span, .. } => *span,
        }
    }
}
