//! Evaluator tests, grouped by area.

mod control_tests;
mod conversion_tests;
mod interpreter_tests;

use std::cell::RefCell;
use std::rc::Rc;

use kiln_ir::Value;

use crate::{EvalError, Interpreter};

fn run_in(interpreter: &mut Interpreter, source: &str) -> Result<Value, EvalError> {
    interpreter.feed(kiln_parse::parse(source).unwrap());
    interpreter.execute()
}

/// Rendered result of running `source` in a fresh interpreter.
fn run(source: &str) -> String {
    run_in(&mut Interpreter::new(), source).unwrap().to_string()
}

fn run_err(source: &str) -> EvalError {
    run_in(&mut Interpreter::new(), source).unwrap_err()
}

/// Interpreter with a `console.log` that records its rendered arguments.
fn with_console() -> (Interpreter, Rc<RefCell<Vec<String>>>) {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    let console = Value::object();
    console
        .set(
            "log",
            Value::native("log", move |args| {
                let line: Vec<String> = args.iter().map(ToString::to_string).collect();
                sink.borrow_mut().push(line.join(" "));
                Ok(Value::Undefined)
            }),
        )
        .unwrap();
    let interpreter = Interpreter::new();
    interpreter
        .global_environment()
        .set("console", console)
        .unwrap();
    (interpreter, lines)
}
