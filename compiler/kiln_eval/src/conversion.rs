//! Conversions that may run script code.

use std::fmt;

use kiln_ir::value::{TO_BOOL_HOOK, TO_NUMBER_HOOK};
use kiln_ir::{Value, ValueError};

/// A primitive conversion an object can customize with a hook property.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Conversion {
    ToNumber,
    ToBool,
}

impl Conversion {
    /// Property holding the object's hook for this conversion.
    pub fn hook(self) -> &'static str {
        match self {
            Conversion::ToNumber => TO_NUMBER_HOOK,
            Conversion::ToBool => TO_BOOL_HOOK,
        }
    }

    /// Primitive standing in for the operand, given what its hook returned.
    pub fn coerce(self, result: &Value) -> Result<Value, ValueError> {
        Ok(match self {
            Conversion::ToNumber => Value::Number(result.to_number()?),
            Conversion::ToBool => Value::Bool(result.to_bool()?),
        })
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hook())
    }
}
