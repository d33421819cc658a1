//! Host built-ins installed into the global environment.
//!
//! | Name | Behavior |
//! |------|----------|
//! | `console.log(...args)` | prints the arguments joined by single spaces |
//! | `exit(code?)` | terminates the process with `code` (default 0) |
//! | `debug(flag)` | turns parse-tree echo of each unit on or off |
//! | `debug()` | dumps the interpreter state after the current step |

use std::cell::Cell;
use std::rc::Rc;

use kiln_ir::{Value, ValueError};

use crate::output::ConsoleOutput;

/// State shared between the built-ins and the session that runs them.
#[derive(Debug, Default)]
pub struct HostFlags {
    echo_tree: Cell<bool>,
    dump_requested: Cell<bool>,
}

impl HostFlags {
    pub fn echo_tree(&self) -> bool {
        self.echo_tree.get()
    }

    pub fn set_echo_tree(&self, on: bool) {
        self.echo_tree.set(on);
    }

    /// Whether `debug()` was called since the last check; resets the request.
    pub fn take_dump_request(&self) -> bool {
        self.dump_requested.replace(false)
    }
}

/// Install `console`, `exit` and `debug` on `environment`.
pub fn install(
    environment: &Value,
    output: &ConsoleOutput,
    flags: &Rc<HostFlags>,
) -> Result<(), ValueError> {
    let console = Value::object();
    let sink = output.clone();
    console.set(
        "log",
        Value::native("log", move |args| {
            sink.println(&join(args));
            Ok(Value::Undefined)
        }),
    )?;
    environment.set("console", console)?;

    environment.set(
        "exit",
        Value::native("exit", |args| {
            let code = match args.first() {
                Some(code) => exit_code(code.to_number()?),
                None => 0,
            };
            tracing::debug!(code, "exit requested");
            std::process::exit(code)
        }),
    )?;

    let host = Rc::clone(flags);
    environment.set(
        "debug",
        Value::native("debug", move |args| {
            match args.first() {
                Some(flag) => host.set_echo_tree(flag.to_bool()?),
                None => host.dump_requested.set(true),
            }
            Ok(Value::Undefined)
        }),
    )?;
    Ok(())
}

/// Render `args` the way `console.log` prints them.
pub fn join(args: &[Value]) -> String {
    let rendered: Vec<String> = args.iter().map(ToString::to_string).collect();
    rendered.join(" ")
}

#[allow(clippy::cast_possible_truncation)]
fn exit_code(code: f64) -> i32 {
    if code.is_finite() {
        code as i32
    } else {
        1
    }
}
