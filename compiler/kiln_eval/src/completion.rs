use kiln_ir::Value;

use crate::errors::ErrorKind;

/// Outcome of evaluating one node.
#[derive(Clone, Debug)]
pub enum CompletionRecord {
    /// The node finished (or moved the cursor into a child) with this value.
    Normal(Value),
    /// Unwind the current context, handing the value to its caller.
    Return(Value),
    Break,
    Continue,
    /// A language-level error.
    Throw { kind: ErrorKind, message: String },
}

impl CompletionRecord {
    pub(crate) fn throw(kind: ErrorKind, message: impl Into<String>) -> Self {
        CompletionRecord::Throw {
            kind,
            message: message.into(),
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, CompletionRecord::Normal(_))
    }
}

impl Default for CompletionRecord {
    fn default() -> Self {
        CompletionRecord::Normal(Value::Undefined)
    }
}
