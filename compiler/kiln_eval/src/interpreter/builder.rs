//! `InterpreterBuilder` for creating configured interpreters.

use std::collections::VecDeque;

use kiln_ir::Value;

use super::Interpreter;

/// Default limit on nested script calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Tunables fixed at construction.
#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Contexts allowed on the stack before a call fails with `RangeError`.
    pub max_call_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

/// Builder for [`Interpreter`].
#[derive(Default)]
pub struct InterpreterBuilder {
    global_environment: Option<Value>,
    config: InterpreterConfig,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `environment` as the global scope instead of a fresh empty object.
    ///
    /// Host built-ins are typically installed on it before building.
    #[must_use]
    pub fn global_environment(mut self, environment: Value) -> Self {
        self.global_environment = Some(environment);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            global_environment: self.global_environment.unwrap_or_else(Value::object),
            config: self.config,
            pending: VecDeque::new(),
            stack: Vec::new(),
            last_value: Value::Undefined,
        }
    }
}
