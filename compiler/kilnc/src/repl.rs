use std::io::{self, BufRead, Write};

use crate::diagnostics;
use crate::session::Session;

pub const PROMPT: &str = "kiln> ";

const SOURCE_NAME: &str = "<repl>";

/// Read-eval-print loop: every line is one translation unit.
///
/// Results and diagnostics go to `out`; `console.log` output goes wherever
/// the session's console points. Ends at end of input.
pub fn run_repl(session: &mut Session, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()?;
    for line in input.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match session.run(&line) {
                Ok(value) => writeln!(out, "{value}")?,
                Err(error) => write!(out, "{}", diagnostics::render(&error, SOURCE_NAME, &line))?,
            }
        }
        write!(out, "{PROMPT}")?;
        out.flush()?;
    }
    writeln!(out)
}
