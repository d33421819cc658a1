//! Grammar rules, split by construct.
//!
//! - `stmt`: statements, blocks and `var` declarations
//! - `expr`: expressions, by precedence climbing

mod expr;
mod stmt;
