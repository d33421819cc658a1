//! Operand conversions that have to call back into script code.
//!
//! Native hooks run inside [`kiln_ir::Value::to_number`] and
//! [`kiln_ir::Value::to_bool`]. A hook written in script gets a context of
//! its own: the folding node pushes it and stays current, the hook's coerced
//! result lands in the caller's `converted` map, and the node is dispatched
//! again through `visit_converting`. Each operand is converted at most once
//! per fold.

use kiln_ir::{NodeId, Value};
use smallvec::SmallVec;

use super::Interpreter;
use crate::completion::CompletionRecord;
use crate::context::ContextKind;
use crate::conversion::Conversion;
use crate::errors::EvalError;

impl Interpreter {
    /// Start the script hook of the first operand that still needs one.
    ///
    /// `operands` pairs a key in the `converted` map with the value to
    /// convert. `None` means every operand can be converted in place.
    pub(super) fn run_conversion_hooks(
        &mut self,
        operands: &[(NodeId, Value)],
        conversion: Conversion,
    ) -> Result<Option<CompletionRecord>, EvalError> {
        let frame = self.frame()?;
        let pending = operands.iter().find_map(|(operand, value)| {
            if frame.converted.contains_key(operand) {
                return None;
            }
            value
                .script_hook(conversion.hook())
                .map(|script| (*operand, script))
        });
        let Some((operand, script)) = pending else {
            return Ok(None);
        };
        let kind = ContextKind::Conversion {
            operand,
            conversion,
        };
        self.invoke(&script, SmallVec::new(), kind).map(Some)
    }

    /// Truth value of the finished `condition`, consuming its result.
    ///
    /// The inner `Err` suspends the node while a script `to_bool` hook runs.
    pub(super) fn take_condition(
        &mut self,
        condition: NodeId,
    ) -> Result<Result<bool, CompletionRecord>, EvalError> {
        let value = self.frame()?.peek(condition);
        if let Some(suspended) = self.run_conversion_hooks(&[(condition, value)], Conversion::ToBool)? {
            return Ok(Err(suspended));
        }
        let value = self.frame()?.take_converted(condition);
        Ok(Ok(value.to_bool()?))
    }
}
