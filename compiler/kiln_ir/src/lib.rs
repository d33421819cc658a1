//! Kiln IR - the data shared by the parser and the interpreter.
//!
//! - [`ParseResult`], [`Statement`], [`Operation`]: what each parse-tree node is
//! - [`ParseTree`]: a [`kiln_tree::FlatTree`] of parse results
//! - [`Value`]: the dynamically typed runtime value, with its coercions,
//!   prototype-chained objects and callable functions
//! - [`Span`]: byte ranges for diagnostics

mod parse_result;
mod span;
pub mod value;

pub use kiln_tree::{FlatTree, NodeId, TreeError};
pub use parse_result::{BinaryOp, Name, Operation, ParseResult, ParseTree, Statement};
pub use span::Span;
pub use value::{
    format_number, parse_number, Function, NativeFunction, Object, ObjectRef, ScriptFunction,
    Value, ValueError,
};
