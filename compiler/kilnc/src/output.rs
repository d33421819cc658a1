//! Console output destinations.
//!
//! - `Stdout`: the terminal (default)
//! - `Buffer`: captured in memory, for tests and embedding

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Where `console.log` and debug dumps are written.
///
/// Cloning a `Buffer` shares the underlying string.
#[derive(Clone, Default)]
pub enum ConsoleOutput {
    #[default]
    Stdout,
    Buffer(Rc<RefCell<String>>),
}

impl ConsoleOutput {
    /// A fresh capturing buffer.
    pub fn buffer() -> Self {
        ConsoleOutput::Buffer(Rc::default())
    }

    /// Print a line (with newline).
    pub fn println(&self, line: &str) {
        match self {
            ConsoleOutput::Stdout => println!("{line}"),
            ConsoleOutput::Buffer(buffer) => {
                let mut buffer = buffer.borrow_mut();
                buffer.push_str(line);
                buffer.push('\n');
            }
        }
    }

    /// Print without newline.
    pub fn print(&self, text: &str) {
        match self {
            ConsoleOutput::Stdout => {
                print!("{text}");
                let _ = std::io::stdout().flush();
            }
            ConsoleOutput::Buffer(buffer) => buffer.borrow_mut().push_str(text),
        }
    }

    /// Everything captured so far; empty for stdout.
    pub fn contents(&self) -> String {
        match self {
            ConsoleOutput::Stdout => String::new(),
            ConsoleOutput::Buffer(buffer) => buffer.borrow().clone(),
        }
    }

    pub fn clear(&self) {
        if let ConsoleOutput::Buffer(buffer) = self {
            buffer.borrow_mut().clear();
        }
    }
}
