//! Unary operators that read their operand without writing it.

use kiln_ir::{Operation, Value, ValueError};

use crate::conversion::Conversion;

/// Unary operators with a value-level implementation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Plus,
    Neg,
    Typeof,
    Void,
}

impl UnaryOp {
    pub fn from_operation(operation: Operation) -> Option<UnaryOp> {
        Some(match operation {
            Operation::LogicalNot => UnaryOp::Not,
            Operation::UnaryPlus => UnaryOp::Plus,
            Operation::UnaryNegation => UnaryOp::Neg,
            Operation::Typeof => UnaryOp::Typeof,
            Operation::Void => UnaryOp::Void,
            _ => return None,
        })
    }

    /// The conversion applied to the operand, if any.
    pub(crate) fn conversion(self) -> Option<Conversion> {
        match self {
            UnaryOp::Not => Some(Conversion::ToBool),
            UnaryOp::Plus | UnaryOp::Neg => Some(Conversion::ToNumber),
            UnaryOp::Typeof | UnaryOp::Void => None,
        }
    }
}

pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> Result<Value, ValueError> {
    Ok(match op {
        UnaryOp::Not => Value::Bool(!operand.to_bool()?),
        UnaryOp::Plus => Value::Number(operand.to_number()?),
        UnaryOp::Neg => Value::Number(-operand.to_number()?),
        UnaryOp::Typeof => Value::from(operand.typeof_name()),
        UnaryOp::Void => Value::Undefined,
    })
}
