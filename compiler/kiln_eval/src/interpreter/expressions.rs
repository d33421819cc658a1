//! Operation handlers.

use std::rc::Rc;

use kiln_ir::{
    BinaryOp, Function, Name, NodeId, Operation, ParseResult, ParseTree, ScriptFunction, Statement,
    Value,
};
use smallvec::SmallVec;
use tracing::debug;

use super::{required_child, unresolvable, visit, visit_converting, Interpreter, Visit};
use crate::assign_target::AssignTarget;
use crate::completion::CompletionRecord;
use crate::context::{ContextKind, ExecutionContext};
use crate::conversion::Conversion;
use crate::errors::{unimplemented, unreachable, ErrorKind, EvalError};
use crate::operators::{converts_to_number, evaluate_binary, CompoundOp};
use crate::unary_operators::{evaluate_unary, UnaryOp};

impl Interpreter {
    pub(super) fn execute_operation(
        &mut self,
        code: &ParseTree,
        node: NodeId,
        operation: Operation,
    ) -> Result<CompletionRecord, EvalError> {
        if let Some(op) = operation.binary_op() {
            return self.execute_binary(code, node, op);
        }
        if let Some(op) = UnaryOp::from_operation(operation) {
            return self.execute_unary(code, node, op);
        }
        if let Some(op) = CompoundOp::from_operation(operation) {
            return self.execute_assignment(code, node, operation, op);
        }
        match operation {
            Operation::Grouping => self.execute_pass_through(code, node),
            Operation::JsonObject => self.execute_object_literal(code, node),
            Operation::Function => self.execute_function_literal(code, node),
            Operation::MemberAccess => self.execute_member_access(code, node),
            Operation::Call => self.execute_call(code, node),
            Operation::LogicalAnd => self.execute_logical(code, node, true),
            Operation::LogicalOr => self.execute_logical(code, node, false),
            Operation::Conditional => self.execute_conditional(code, node),
            _ => Err(unimplemented(operation.name())),
        }
    }

    fn execute_binary(
        &mut self,
        code: &ParseTree,
        node: NodeId,
        op: BinaryOp,
    ) -> Result<CompletionRecord, EvalError> {
        let lhs = required_child(code, node, 0)?;
        let rhs = required_child(code, node, 1)?;
        let frame = self.frame()?;
        match visit_converting(code, frame, node)? {
            Some(Visit::Enter) => return Ok(frame.descend(lhs)),
            Some(Visit::Resume(child)) if child == lhs => return Ok(frame.descend(rhs)),
            Some(Visit::Resume(_)) | None => {}
        }

        let (left, right) = (frame.peek(lhs), frame.peek(rhs));
        if converts_to_number(op, &left, &right) {
            let operands = [(lhs, left), (rhs, right)];
            if let Some(suspended) = self.run_conversion_hooks(&operands, Conversion::ToNumber)? {
                return Ok(suspended);
            }
        }
        let frame = self.frame()?;
        let left = frame.take_converted(lhs);
        let right = frame.take_converted(rhs);
        Ok(CompletionRecord::Normal(evaluate_binary(&left, &right, op)?))
    }

    fn execute_unary(
        &mut self,
        code: &ParseTree,
        node: NodeId,
        op: UnaryOp,
    ) -> Result<CompletionRecord, EvalError> {
        let operand = required_child(code, node, 0)?;
        let frame = self.frame()?;
        if let Some(Visit::Enter) = visit_converting(code, frame, node)? {
            return Ok(frame.descend(operand));
        }

        if let Some(conversion) = op.conversion() {
            let value = frame.peek(operand);
            if let Some(suspended) = self.run_conversion_hooks(&[(operand, value)], conversion)? {
                return Ok(suspended);
            }
        }
        let value = self.frame()?.take_converted(operand);
        Ok(CompletionRecord::Normal(evaluate_unary(&value, op)?))
    }

    /// `&&` and `||`; the right operand is only entered when it decides the result.
    fn execute_logical(
        &mut self,
        code: &ParseTree,
        node: NodeId,
        is_and: bool,
    ) -> Result<CompletionRecord, EvalError> {
        let lhs = required_child(code, node, 0)?;
        let rhs = required_child(code, node, 1)?;
        let frame = self.frame()?;
        match visit_converting(code, frame, node)? {
            Some(Visit::Enter) => return Ok(frame.descend(lhs)),
            Some(Visit::Resume(child)) if child != lhs => {
                return Ok(CompletionRecord::Normal(frame.take(rhs)));
            }
            Some(Visit::Resume(_)) | None => {}
        }

        let left = frame.peek(lhs);
        if let Some(suspended) = self.run_conversion_hooks(&[(lhs, left)], Conversion::ToBool)? {
            return Ok(suspended);
        }
        // The operand itself is the result; its converted form only decides.
        let frame = self.frame()?;
        let left = frame.take(lhs);
        let truthy = match frame.converted.remove(&lhs) {
            Some(converted) => converted.to_bool()?,
            None => left.to_bool()?,
        };
        Ok(if truthy == is_and {
            frame.descend(rhs)
        } else {
            CompletionRecord::Normal(left)
        })
    }

    fn execute_conditional(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let condition = required_child(code, node, 0)?;
        let frame = self.frame()?;
        match visit_converting(code, frame, node)? {
            Some(Visit::Enter) => return Ok(frame.descend(condition)),
            Some(Visit::Resume(branch)) if branch != condition => {
                return Ok(CompletionRecord::Normal(frame.take(branch)));
            }
            Some(Visit::Resume(_)) | None => {}
        }

        let branch = match self.take_condition(condition)? {
            Ok(true) => required_child(code, node, 1)?,
            Ok(false) => required_child(code, node, 2)?,
            Err(suspended) => return Ok(suspended),
        };
        Ok(self.frame()?.descend(branch))
    }

    /// `{ key: value, ... }`. Children come in key/value pairs; a repeated
    /// key keeps its first position and takes the last value.
    fn execute_object_literal(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let frame = self.frame()?;
        let next = match visit(code, frame, node)? {
            Visit::Enter => code.first_child(node),
            Visit::Resume(child) => code.next_sibling(child),
        };
        if let Some(next) = next {
            return Ok(frame.descend(next));
        }

        let object = Value::object();
        let children: SmallVec<[NodeId; 8]> = code.children(node).collect();
        for pair in children.chunks_exact(2) {
            if let [key, value] = *pair {
                let key = frame.take(key).to_string();
                object.set(&key, frame.take(value))?;
            }
        }
        Ok(CompletionRecord::Normal(object))
    }

    /// Create a closure over the whole current environment.
    fn execute_function_literal(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let children: SmallVec<[NodeId; 8]> = code.children(node).collect();
        let Some((&body, header)) = children.split_last() else {
            return Err(unreachable(format!("function literal {node} has no body")));
        };
        if !code[body].is_statement(Statement::Block) {
            return Err(unreachable(format!(
                "function body is a `{}`",
                code[body].kind_name()
            )));
        }
        let (name, params) = match header.split_first() {
            Some((&name, params)) => (literal_name(code, name), params),
            None => (None, header),
        };
        let params = params
            .iter()
            .map(|&param| {
                literal_name(code, param).ok_or_else(|| {
                    unreachable(format!("function parameter is a `{}`", code[param].kind_name()))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let script = ScriptFunction {
            name,
            params,
            body: Rc::new(ParseTree::from_subtree(code, body)),
            environment: self.frame()?.environment.clone(),
        };
        Ok(CompletionRecord::Normal(Value::Function(Function::Script(
            Rc::new(script),
        ))))
    }

    /// `base.key` / `base[key]`.
    ///
    /// As the target of an assignment the node only evaluates its operands;
    /// the assignment resolves the slot once its right-hand side is ready.
    fn execute_member_access(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let base = required_child(code, node, 0)?;
        let key = required_child(code, node, 1)?;
        let frame = self.frame()?;
        Ok(match visit(code, frame, node)? {
            Visit::Enter => frame.descend(base),
            Visit::Resume(child) if child == base => frame.descend(key),
            Visit::Resume(_) if is_assignment_target(code, node) => {
                CompletionRecord::Normal(Value::Undefined)
            }
            Visit::Resume(_) => {
                let object = frame.take(base);
                let key = frame.take(key).to_string();
                match object {
                    Value::Object(_) => CompletionRecord::Normal(object.index(&key)?),
                    other => CompletionRecord::throw(
                        ErrorKind::TypeError,
                        format!("Cannot read properties of {other} (reading '{key}')"),
                    ),
                }
            }
        })
    }

    /// `=`, compound assignments and `++`/`--` in both positions.
    fn execute_assignment(
        &mut self,
        code: &ParseTree,
        node: NodeId,
        operation: Operation,
        op: CompoundOp,
    ) -> Result<CompletionRecord, EvalError> {
        let target = required_child(code, node, 0)?;
        let operand = code.child(node, 1);
        let frame = self.frame()?;
        let next = match visit_converting(code, frame, node)? {
            Some(Visit::Enter) if code[target].is_operation(Operation::MemberAccess) => {
                Some(target)
            }
            Some(Visit::Enter) => operand,
            Some(Visit::Resume(child)) if child == target => operand,
            Some(Visit::Resume(_)) | None => None,
        };
        if let Some(next) = next {
            return Ok(frame.descend(next));
        }

        if op != CompoundOp::Assign {
            // The old value converts under the assignment's own key.
            let current = peek_target(code, frame, target)?;
            let value = operand.map(|operand| frame.peek(operand)).unwrap_or_default();
            let [on_current, on_operand] = op.numeric_inputs(&current, &value);
            let mut operands: SmallVec<[(NodeId, Value); 2]> = SmallVec::new();
            if on_current {
                operands.push((node, current));
            }
            if let (true, Some(operand)) = (on_operand, operand) {
                operands.push((operand, value));
            }
            if let Some(suspended) = self.run_conversion_hooks(&operands, Conversion::ToNumber)? {
                return Ok(suspended);
            }
        }

        let frame = self.frame()?;
        let value = operand
            .map(|operand| frame.take_converted(operand))
            .unwrap_or_default();
        let converted_current = frame.converted.remove(&node);
        let slot = match resolve_target(code, frame, target)? {
            Ok(slot) => slot,
            Err(fault) => return Ok(fault),
        };
        let old = converted_current.unwrap_or_else(|| slot.read());
        let new = op.apply(&old, value)?;
        slot.write(new.clone());
        let postfix = matches!(
            operation,
            Operation::PostfixIncrement | Operation::PostfixDecrement
        );
        Ok(CompletionRecord::Normal(if postfix { old } else { new }))
    }

    /// `callee(args...)`. Host functions run in place; script functions get
    /// a new context and deliver their result when it returns.
    fn execute_call(
        &mut self,
        code: &ParseTree,
        node: NodeId,
    ) -> Result<CompletionRecord, EvalError> {
        let callee = required_child(code, node, 0)?;
        let frame = self.frame()?;
        let next = match visit(code, frame, node)? {
            Visit::Enter => Some(callee),
            Visit::Resume(child) => code.next_sibling(child),
        };
        if let Some(next) = next {
            return Ok(frame.descend(next));
        }

        let args: SmallVec<[Value; 4]> = code
            .children(node)
            .skip(1)
            .map(|arg| frame.take(arg))
            .collect();
        let function = match frame.take(callee).callee() {
            Ok(function) => function,
            Err(error) => {
                return Ok(CompletionRecord::throw(
                    ErrorKind::TypeError,
                    error.to_string(),
                ))
            }
        };
        match function {
            Function::Native(native) => Ok(CompletionRecord::Normal(native.call(&args)?)),
            Function::Script(script) => self.invoke(&script, args, ContextKind::Function),
        }
    }

    /// Push a context of `kind` running `script` with `args` bound to its
    /// parameters.
    pub(super) fn invoke(
        &mut self,
        script: &ScriptFunction,
        args: SmallVec<[Value; 4]>,
        kind: ContextKind,
    ) -> Result<CompletionRecord, EvalError> {
        if self.stack.len() >= self.config.max_call_depth {
            return Ok(CompletionRecord::throw(
                ErrorKind::RangeError,
                "Maximum call stack size exceeded",
            ));
        }
        let scope = Value::object_with_prototype(script.environment.clone());
        let mut args = args.into_iter();
        for param in &script.params {
            scope.set(param, args.next().unwrap_or_default())?;
        }
        debug!(
            function = script.name.as_deref().unwrap_or("anonymous"),
            kind = %kind,
            depth = self.stack.len() + 1,
            "push context"
        );
        self.stack
            .push(ExecutionContext::new(kind, scope, Rc::clone(&script.body)));
        Ok(CompletionRecord::default())
    }
}

/// Name stored in a `Literal` child of a function literal.
fn literal_name(code: &ParseTree, node: NodeId) -> Option<Name> {
    match &code[node] {
        ParseResult::Literal(Value::String(name)) => Some(name.clone()),
        _ => None,
    }
}

/// Whether `node` is the slot an assignment-family operation writes to.
fn is_assignment_target(code: &ParseTree, node: NodeId) -> bool {
    code.parent(node).is_some_and(|parent| {
        matches!(code[parent], ParseResult::Operation(op) if op.is_assignment())
            && code.first_child(parent) == Some(node)
    })
}

/// Current value behind an assignment's left-hand side, read without
/// consuming the operands a member target left in the memo.
fn peek_target(code: &ParseTree, frame: &ExecutionContext, target: NodeId) -> Result<Value, EvalError> {
    Ok(match &code[target] {
        ParseResult::VarUse(name) => frame.environment.get(name).unwrap_or_default(),
        ParseResult::Operation(Operation::MemberAccess) => {
            let base = frame.peek(required_child(code, target, 0)?);
            let key = frame.peek(required_child(code, target, 1)?).to_string();
            base.get(&key).unwrap_or_default()
        }
        _ => Value::Undefined,
    })
}

/// Resolve the slot behind an assignment's left-hand side.
///
/// A member target consumes the base and key its operands left in the memo.
/// The inner `Err` is a language-level fault to complete with.
fn resolve_target(
    code: &ParseTree,
    frame: &mut ExecutionContext,
    target: NodeId,
) -> Result<Result<AssignTarget, CompletionRecord>, EvalError> {
    match &code[target] {
        ParseResult::VarUse(name) => Ok(match frame.environment.as_object() {
            Some(environment) => Ok(AssignTarget::binding(environment, name.clone())),
            None => Err(unresolvable(name)),
        }),
        ParseResult::Operation(Operation::MemberAccess) => {
            frame.discard(target);
            let base = frame.take(required_child(code, target, 0)?);
            let key = frame.take(required_child(code, target, 1)?).to_string();
            Ok(match base {
                Value::Object(object) => Ok(AssignTarget::Property(object, key)),
                other => Err(CompletionRecord::throw(
                    ErrorKind::TypeError,
                    format!("Cannot set properties of {other} (setting '{key}')"),
                )),
            })
        }
        ParseResult::Operation(Operation::JsonObject) => Err(unimplemented("Object-decomposition")),
        ParseResult::Operation(Operation::ArrayObject) => Err(unimplemented("Array-decomposition")),
        other => Err(unreachable(format!(
            "`{}` is not an assignment target",
            other.kind_name()
        ))),
    }
}
