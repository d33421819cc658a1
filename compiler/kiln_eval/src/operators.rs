//! Binary and compound-assignment operators.
//!
//! Operands are coerced the way the value model prescribes: `+` concatenates
//! as soon as either side is a string, relational operators compare two
//! strings lexicographically and everything else numerically, and `==`
//! compares string renderings.

use std::cmp::Ordering;

use kiln_ir::{BinaryOp, Operation, Value, ValueError};

/// Evaluate `left op right`.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, ValueError> {
    Ok(match op {
        BinaryOp::Add => add(left, right)?,
        BinaryOp::Sub => Value::Number(left.to_number()? - right.to_number()?),
        BinaryOp::Mul => Value::Number(left.to_number()? * right.to_number()?),
        BinaryOp::Div => Value::Number(left.to_number()? / right.to_number()?),
        BinaryOp::Rem => Value::Number(left.to_number()? % right.to_number()?),
        BinaryOp::Lt => Value::Bool(compare(left, right)? == Some(Ordering::Less)),
        BinaryOp::LtEq => Value::Bool(matches!(
            compare(left, right)?,
            Some(Ordering::Less | Ordering::Equal)
        )),
        BinaryOp::Gt => Value::Bool(compare(left, right)? == Some(Ordering::Greater)),
        BinaryOp::GtEq => Value::Bool(matches!(
            compare(left, right)?,
            Some(Ordering::Greater | Ordering::Equal)
        )),
        BinaryOp::Eq => Value::Bool(left == right),
        BinaryOp::NotEq => Value::Bool(left != right),
        BinaryOp::StrictEq => Value::Bool(left.strict_equals(right)),
        BinaryOp::StrictNotEq => Value::Bool(!left.strict_equals(right)),
    })
}

/// Whether `left op right` converts its operands to numbers.
pub(crate) fn converts_to_number(op: BinaryOp, left: &Value, right: &Value) -> bool {
    match op {
        BinaryOp::Add => !(left.is_string() || right.is_string()),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => true,
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            !(left.is_string() && right.is_string())
        }
        BinaryOp::Eq | BinaryOp::NotEq | BinaryOp::StrictEq | BinaryOp::StrictNotEq => false,
    }
}

fn add(left: &Value, right: &Value) -> Result<Value, ValueError> {
    if left.is_string() || right.is_string() {
        return Ok(Value::from(format!("{left}{right}")));
    }
    Ok(Value::Number(left.to_number()? + right.to_number()?))
}

/// `None` when the operands are unordered (a NaN is involved).
fn compare(left: &Value, right: &Value) -> Result<Option<Ordering>, ValueError> {
    if let (Value::String(a), Value::String(b)) = (left, right) {
        return Ok(Some(a.cmp(b)));
    }
    Ok(left.to_number()?.partial_cmp(&right.to_number()?))
}

/// In-place update applied by the assignment family.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CompoundOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Increment,
    Decrement,
}

impl CompoundOp {
    /// The update performed by an assignment-family operation, if supported.
    pub fn from_operation(operation: Operation) -> Option<CompoundOp> {
        Some(match operation {
            Operation::Assignment => CompoundOp::Assign,
            Operation::AdditionAssignment => CompoundOp::Add,
            Operation::SubtractionAssignment => CompoundOp::Sub,
            Operation::MultiplicationAssignment => CompoundOp::Mul,
            Operation::DivisionAssignment => CompoundOp::Div,
            Operation::RemainderAssignment => CompoundOp::Rem,
            Operation::PrefixIncrement | Operation::PostfixIncrement => CompoundOp::Increment,
            Operation::PrefixDecrement | Operation::PostfixDecrement => CompoundOp::Decrement,
            _ => return None,
        })
    }

    /// Whether this update converts `current` and `operand` to numbers.
    pub(crate) fn numeric_inputs(self, current: &Value, operand: &Value) -> [bool; 2] {
        match self {
            CompoundOp::Assign => [false, false],
            CompoundOp::Increment | CompoundOp::Decrement => [true, false],
            CompoundOp::Add => {
                let numeric = converts_to_number(BinaryOp::Add, current, operand);
                [numeric, numeric]
            }
            CompoundOp::Sub | CompoundOp::Mul | CompoundOp::Div | CompoundOp::Rem => [true, true],
        }
    }

    /// New value of a slot holding `current` after this update with `operand`.
    ///
    /// `operand` is ignored by `Increment` and `Decrement`.
    pub fn apply(self, current: &Value, operand: Value) -> Result<Value, ValueError> {
        let binary = match self {
            CompoundOp::Assign => return Ok(operand),
            CompoundOp::Increment => return Ok(Value::Number(current.to_number()? + 1.0)),
            CompoundOp::Decrement => return Ok(Value::Number(current.to_number()? - 1.0)),
            CompoundOp::Add => BinaryOp::Add,
            CompoundOp::Sub => BinaryOp::Sub,
            CompoundOp::Mul => BinaryOp::Mul,
            CompoundOp::Div => BinaryOp::Div,
            CompoundOp::Rem => BinaryOp::Rem,
        };
        evaluate_binary(current, &operand, binary)
    }
}
