//! A host session: one interpreter, its built-ins and its console.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use kiln_eval::{CompletionRecord, EvalError, Interpreter};
use kiln_ir::{Value, ValueError};
use kiln_parse::ParseError;
use tracing::debug;

use crate::builtins::{self, HostFlags};
use crate::output::ConsoleOutput;

/// Anything that stops a unit from producing a value.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("cannot read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Installing a built-in failed.
    #[error(transparent)]
    Host(#[from] ValueError),
}

pub struct Session {
    interpreter: Interpreter,
    output: ConsoleOutput,
    flags: Rc<HostFlags>,
}

impl Session {
    /// A fresh interpreter with `console`, `exit` and `debug` installed.
    pub fn new(output: ConsoleOutput) -> Result<Self, RunError> {
        let interpreter = Interpreter::new();
        let flags = Rc::new(HostFlags::default());
        builtins::install(interpreter.global_environment(), &output, &flags)?;
        Ok(Session {
            interpreter,
            output,
            flags,
        })
    }

    /// Print the parse tree of every unit before running it.
    pub fn set_debug_tree(&mut self, on: bool) {
        self.flags.set_echo_tree(on);
    }

    pub fn output(&self) -> &ConsoleOutput {
        &self.output
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Parse and run one translation unit, returning its value.
    ///
    /// Globals persist across calls. After a failure the interpreter is
    /// reset and the session can keep going.
    pub fn run(&mut self, source: &str) -> Result<Value, RunError> {
        let tree = kiln_parse::parse(source)?;
        if self.flags.echo_tree() {
            self.output.print(&tree.to_string());
        }
        self.interpreter.feed(tree);

        let mut value = Value::Undefined;
        let mut steps: u64 = 0;
        while !self.interpreter.is_idle() {
            let record = self.interpreter.execute_step()?;
            steps += 1;
            if self.flags.take_dump_request() {
                self.output.print(&self.interpreter.to_string());
            }
            if let CompletionRecord::Return(result) = record {
                if self.interpreter.depth() == 0 {
                    value = result;
                }
            }
        }
        debug!(steps, "unit finished");
        Ok(value)
    }

    pub fn run_file(&mut self, path: &Path) -> Result<Value, RunError> {
        let source = std::fs::read_to_string(path).map_err(|source| RunError::Io {
            path: path.to_owned(),
            source,
        })?;
        self.run(&source)
    }
}
