//! Human-readable rendering of [`RunError`]s.

use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};
use kiln_eval::EvalError;
use kiln_ir::Span;

use crate::session::RunError;

/// Render `error` for a unit named `name` whose text is `source`.
///
/// Errors with a source location get an `ariadne` report pointing at it;
/// the rest are a single line. The result always ends in a newline.
pub fn render(error: &RunError, name: &str, source: &str) -> String {
    match error {
        RunError::Parse(parse) => match parse.span() {
            Some(span) => report(name, source, span, &parse.to_string()),
            None => format!("Error: {parse}\n"),
        },
        RunError::Eval(EvalError::Unimplemented { what }) => {
            format!("Error: {what} is not implemented yet.\n")
        }
        RunError::Eval(EvalError::Unreachable { detail }) => {
            format!("internal error: {detail}\n")
        }
        RunError::Eval(uncaught @ EvalError::Uncaught { .. }) => format!("{uncaught}\n"),
        RunError::Io { .. } | RunError::Host(_) => format!("Error: {error}\n"),
    }
}

fn report(name: &str, source: &str, span: Span, message: &str) -> String {
    let range = char_range(source, span);
    let mut buffer = Vec::new();
    let written = Report::<(&str, Range<usize>)>::build(ReportKind::Error, name, range.start)
        .with_config(Config::default().with_color(false))
        .with_message(message)
        .with_label(Label::new((name, range)).with_message(message))
        .finish()
        .write((name, Source::from(source.to_owned())), &mut buffer);
    match written {
        Ok(()) => String::from_utf8_lossy(&buffer).into_owned(),
        Err(_) => format!("Error: {message}\n"),
    }
}

/// `ariadne` counts characters; spans count bytes.
fn char_range(source: &str, span: Span) -> Range<usize> {
    let to_char = |byte: usize| {
        let byte = byte.min(source.len());
        source
            .char_indices()
            .take_while(|(index, _)| *index < byte)
            .count()
    };
    let range = span.to_range();
    to_char(range.start)..to_char(range.end)
}
