//! Kiln evaluator.
//!
//! A single-step interpreter over [`kiln_ir::ParseTree`]s. Hosts feed parsed
//! translation units, install built-ins on the global environment, and either
//! call [`Interpreter::execute`] or drive [`Interpreter::execute_step`]
//! themselves.
//!
//! ```ignore
//! let mut interpreter = Interpreter::new();
//! interpreter.feed(kiln_parse::parse("var x = 3;")?);
//! assert_eq!(interpreter.execute()?.to_string(), "3");
//! ```

mod assign_target;
mod completion;
mod context;
mod conversion;
mod errors;
mod interpreter;
mod operators;
mod unary_operators;

pub use completion::CompletionRecord;
pub use errors::{ErrorKind, EvalError};
pub use interpreter::{Interpreter, InterpreterBuilder, InterpreterConfig, DEFAULT_MAX_CALL_DEPTH};
pub use operators::{evaluate_binary, CompoundOp};
pub use unary_operators::{evaluate_unary, UnaryOp};

#[cfg(test)]
mod tests;
