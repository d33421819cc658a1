//! Evaluation errors.
//!
//! Three classes never mix:
//! - [`EvalError::Uncaught`]: a language-level fault (`TypeError`,
//!   `ReferenceError`, `RangeError`) that reached the top without a handler.
//! - [`EvalError::Unimplemented`]: the program uses a construct the
//!   interpreter has no handler for.
//! - [`EvalError::Unreachable`]: the interpreter's own bookkeeping is
//!   inconsistent.

use std::fmt;

use kiln_ir::ValueError;

/// Language-level error classes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeError,
    ReferenceError,
    RangeError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::RangeError => "RangeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal outcome of [`Interpreter::execute`](crate::Interpreter::execute).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("`{what}` is not implemented yet")]
    Unimplemented { what: String },

    #[error("Uncaught {kind}: {message}")]
    Uncaught { kind: ErrorKind, message: String },

    #[error("unreachable interpreter state: {detail}")]
    Unreachable { detail: String },
}

/// Value operations fail only on type mismatches.
impl From<ValueError> for EvalError {
    fn from(error: ValueError) -> Self {
        EvalError::Uncaught {
            kind: ErrorKind::TypeError,
            message: error.to_string(),
        }
    }
}

pub(crate) fn unimplemented(what: impl Into<String>) -> EvalError {
    EvalError::Unimplemented { what: what.into() }
}

pub(crate) fn unreachable(detail: impl Into<String>) -> EvalError {
    EvalError::Unreachable {
        detail: detail.into(),
    }
}
