//! Activation records.

use std::fmt;
use std::rc::Rc;

use kiln_ir::{NodeId, ParseTree, Value};
use rustc_hash::FxHashMap;

use crate::completion::CompletionRecord;
use crate::conversion::Conversion;

/// What pushed a context, which decides how it ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContextKind {
    /// A fed translation unit; returns the value of its last statement.
    TopLevel,
    /// A script function call; returns `undefined` unless it hits `return`.
    Function,
    /// A script conversion hook run on behalf of `operand`. The node that
    /// needed the conversion stays current until the hook returns.
    Conversion {
        operand: NodeId,
        conversion: Conversion,
    },
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKind::TopLevel => f.write_str("top-level"),
            ContextKind::Function => f.write_str("function"),
            ContextKind::Conversion { conversion, .. } => write!(f, "`{conversion}` hook"),
        }
    }
}

/// One frame of the interpreter's explicit stack.
///
/// `current` is the node the next step dispatches on; `previous` is the node
/// whose step ran last. Handlers compare `previous` against their own node's
/// parent and children to tell a first visit from a resume.
pub struct ExecutionContext {
    pub kind: ContextKind,
    /// Scope object; lookups fall through its prototype chain.
    pub environment: Value,
    pub code: Rc<ParseTree>,
    pub current: NodeId,
    pub previous: NodeId,
    /// Results of finished nodes not yet consumed by their parent.
    pub memo: FxHashMap<NodeId, Value>,
    /// Coerced results of script conversion hooks, keyed by the operand
    /// (or, for an assignment's old value, the assignment) they convert.
    pub converted: FxHashMap<NodeId, Value>,
}

impl ExecutionContext {
    pub fn new(kind: ContextKind, environment: Value, code: Rc<ParseTree>) -> Self {
        let root = code.root();
        ExecutionContext {
            kind,
            environment,
            code,
            current: root,
            previous: root,
            memo: FxHashMap::default(),
            converted: FxHashMap::default(),
        }
    }

    /// Remove and return the result of `node`; missing results read as `undefined`.
    pub(crate) fn take(&mut self, node: NodeId) -> Value {
        self.memo.remove(&node).unwrap_or_default()
    }

    /// Copy of the result of `node`, left in place.
    pub(crate) fn peek(&self, node: NodeId) -> Value {
        self.memo.get(&node).cloned().unwrap_or_default()
    }

    /// Remove the result of `node` for a conversion: what its script hook
    /// produced if one ran, the raw result otherwise.
    pub(crate) fn take_converted(&mut self, node: NodeId) -> Value {
        let value = self.take(node);
        self.converted.remove(&node).unwrap_or(value)
    }

    pub(crate) fn store(&mut self, node: NodeId, value: Value) {
        self.memo.insert(node, value);
    }

    pub(crate) fn discard(&mut self, node: NodeId) {
        self.memo.remove(&node);
    }

    /// Move the cursor into `child`; the node stepping now resumes once it finishes.
    pub(crate) fn descend(&mut self, child: NodeId) -> CompletionRecord {
        self.current = child;
        CompletionRecord::default()
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} context at node {} (previous {})",
            self.kind, self.current, self.previous
        )?;
        write!(f, "{}", self.code)?;
        writeln!(f, "environment: {}", self.environment)?;
        let mut entries: Vec<_> = self.memo.iter().collect();
        entries.sort_by_key(|(node, _)| **node);
        for (node, value) in entries {
            writeln!(f, "  [{node}] {value:?}")?;
        }
        let mut converted: Vec<_> = self.converted.iter().collect();
        converted.sort_by_key(|(node, _)| **node);
        for (node, value) in converted {
            writeln!(f, "  [{node}] converted {value:?}")?;
        }
        Ok(())
    }
}
