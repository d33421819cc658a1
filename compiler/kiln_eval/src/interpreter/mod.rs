//! The resumable tree-walking interpreter.
//!
//! Evaluation never recurses over the parse tree. Each call to
//! [`Interpreter::execute_step`] dispatches on the `current` node of the
//! topmost [`ExecutionContext`] and runs that node's handler once. A handler
//! either moves the cursor into one of its children, or finishes and leaves
//! its value in the context's memo map keyed by its node. When a node
//! finishes, the cursor returns to its parent, whose handler then sees its
//! child as `previous` and resumes from there.
//!
//! Script calls push a new context; `return` (or falling off the end of the
//! body) pops it and stores the result under the caller's call node.
//! Script conversion hooks (`to_double`, `to_bool`) run the same way, except
//! that the node needing the conversion stays current and is dispatched again
//! once the hook's result is in.

mod builder;
mod conversions;
mod expressions;
mod statements;

use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use kiln_ir::{NodeId, ParseResult, ParseTree, Value};
use tracing::{debug, trace, warn};

pub use builder::{InterpreterBuilder, InterpreterConfig, DEFAULT_MAX_CALL_DEPTH};

use crate::completion::CompletionRecord;
use crate::context::{ContextKind, ExecutionContext};
use crate::errors::{unimplemented, unreachable, ErrorKind, EvalError};

pub struct Interpreter {
    global_environment: Value,
    config: InterpreterConfig,
    /// Fed units not started yet, oldest first.
    pending: VecDeque<Rc<ParseTree>>,
    stack: Vec<ExecutionContext>,
    /// Value of the most recently finished unit.
    last_value: Value,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Scope shared by every fed unit.
    ///
    /// Objects are shared handles, so hosts can install bindings through
    /// `global_environment().set(..)` at any time.
    pub fn global_environment(&self) -> &Value {
        &self.global_environment
    }

    /// Replace the global scope. Units already running keep the old one.
    pub fn global_environment_mut(&mut self) -> &mut Value {
        &mut self.global_environment
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// No context is running and no unit is waiting.
    pub fn is_idle(&self) -> bool {
        self.stack.is_empty() && self.pending.is_empty()
    }

    /// Number of live execution contexts.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Queue a translation unit. Units run in the order they were fed.
    pub fn feed(&mut self, tree: ParseTree) {
        debug!(
            nodes = tree.node_count(),
            queued = self.pending.len() + 1,
            "feed translation unit"
        );
        self.pending.push_back(Rc::new(tree));
    }

    /// Run every queued unit to completion and return the value of the last.
    ///
    /// With nothing queued the result is `undefined`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn execute(&mut self) -> Result<Value, EvalError> {
        let mut steps: u64 = 0;
        while !self.is_idle() {
            self.execute_step()?;
            steps += 1;
        }
        debug!(steps, "execution finished");
        Ok(std::mem::take(&mut self.last_value))
    }

    /// Evaluate a single node, starting the next queued unit if nothing is
    /// running. Does nothing when idle.
    ///
    /// A fatal error discards every running context and queued unit, leaving
    /// the interpreter ready for new input.
    pub fn execute_step(&mut self) -> Result<CompletionRecord, EvalError> {
        let result = self.step();
        if let Err(error) = &result {
            warn!(%error, depth = self.stack.len(), "execution aborted");
            self.stack.clear();
            self.pending.clear();
        }
        result
    }

    fn step(&mut self) -> Result<CompletionRecord, EvalError> {
        if self.stack.is_empty() {
            let Some(code) = self.pending.pop_front() else {
                return Ok(CompletionRecord::default());
            };
            debug!("push top-level context");
            let environment = self.global_environment.clone();
            self.stack
                .push(ExecutionContext::new(ContextKind::TopLevel, environment, code));
        }

        // A call may push a context; the node belongs to the one below it.
        let depth = self.stack.len();
        let node = self.frame()?.current;
        let record = self.execute_node(node)?;

        match &record {
            CompletionRecord::Normal(value) => {
                let suspended = self.stack.get(depth).is_some_and(|pushed| {
                    matches!(pushed.kind, ContextKind::Conversion { .. })
                });
                let frame = self
                    .stack
                    .get_mut(depth - 1)
                    .ok_or_else(|| unreachable("context vanished during its own step"))?;
                frame.previous = node;
                if frame.current == node && !suspended {
                    frame.store(node, value.clone());
                    frame.current = frame.code.parent(node).ok_or_else(|| {
                        unreachable(format!("root node {node} finished without returning"))
                    })?;
                }
            }
            CompletionRecord::Return(value) => self.pop_context(value.clone())?,
            CompletionRecord::Break => return Err(unimplemented("Break")),
            CompletionRecord::Continue => return Err(unimplemented("Continue")),
            CompletionRecord::Throw { kind, message } => {
                return Err(EvalError::Uncaught {
                    kind: *kind,
                    message: message.clone(),
                })
            }
        }
        Ok(record)
    }

    fn execute_node(&mut self, node: NodeId) -> Result<CompletionRecord, EvalError> {
        let code = Rc::clone(&self.frame()?.code);
        let Some(parsed) = code.get(node) else {
            return Err(unreachable(format!(
                "node {node} is outside a tree of {} nodes",
                code.node_count()
            )));
        };
        trace!(node = %node, kind = parsed.kind_name(), "step");
        match parsed {
            ParseResult::Statement(statement) => self.execute_statement(&code, node, *statement),
            ParseResult::Operation(operation) => self.execute_operation(&code, node, *operation),
            ParseResult::VarDecl(name) => self.execute_var_decl(&code, node, name),
            ParseResult::VarUse(name) => Ok(match self.frame()?.environment.index(name) {
                Ok(value) => CompletionRecord::Normal(value),
                Err(_) => unresolvable(name),
            }),
            ParseResult::Literal(value) => Ok(CompletionRecord::Normal(value.clone())),
        }
    }

    /// Pop the running context and hand `value` to whoever started it.
    fn pop_context(&mut self, value: Value) -> Result<(), EvalError> {
        let finished = self
            .stack
            .pop()
            .ok_or_else(|| unreachable("return with no running context"))?;
        debug!(kind = %finished.kind, depth = self.stack.len(), "pop context");
        match (finished.kind, self.stack.last_mut()) {
            (
                ContextKind::Conversion {
                    operand,
                    conversion,
                },
                Some(caller),
            ) => {
                let coerced = conversion.coerce(&value)?;
                caller.converted.insert(operand, coerced);
            }
            (_, Some(caller)) => {
                let call = caller.previous;
                caller.store(call, value);
            }
            (_, None) => self.last_value = value,
        }
        Ok(())
    }

    fn frame(&mut self) -> Result<&mut ExecutionContext, EvalError> {
        self.stack
            .last_mut()
            .ok_or_else(|| unreachable("no running execution context"))
    }
}

/// Progress of a node, read off the previous step.
enum Visit {
    /// The node is dispatched for the first time.
    Enter,
    /// This child of the node just finished.
    Resume(NodeId),
}

fn visit(code: &ParseTree, frame: &ExecutionContext, node: NodeId) -> Result<Visit, EvalError> {
    let previous = frame.previous;
    match code.parent(node) {
        Some(parent) if parent == previous => Ok(Visit::Enter),
        None if previous == node => Ok(Visit::Enter),
        _ if code.parent(previous) == Some(node) => Ok(Visit::Resume(previous)),
        _ => Err(unreachable(format!(
            "node {node} resumed after unrelated node {previous}"
        ))),
    }
}

/// [`visit`] for nodes whose fold may start a script conversion hook.
///
/// `None` when such a hook has returned and the node should fold again.
fn visit_converting(
    code: &ParseTree,
    frame: &ExecutionContext,
    node: NodeId,
) -> Result<Option<Visit>, EvalError> {
    if frame.previous == node && code.parent(node).is_some() {
        return Ok(None);
    }
    visit(code, frame, node).map(Some)
}

/// Fault for a binding the current scope cannot hold.
fn unresolvable(name: &str) -> CompletionRecord {
    CompletionRecord::throw(ErrorKind::ReferenceError, format!("{name} is not defined"))
}

/// The `position`-th child, which the parser always produces for this node.
fn required_child(code: &ParseTree, node: NodeId, position: usize) -> Result<NodeId, EvalError> {
    code.child(node, position).ok_or_else(|| {
        unreachable(format!(
            "`{}` node {node} has no child {position}",
            code[node].kind_name()
        ))
    })
}

impl fmt::Display for Interpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "queued units: {}", self.pending.len())?;
        for (depth, frame) in self.stack.iter().enumerate() {
            write!(f, "#{depth} {frame}")?;
        }
        writeln!(f, "global environment: {}", self.global_environment)
    }
}
