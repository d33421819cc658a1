//! End-to-end runs through a [`Session`] with captured console output.

use std::io::Cursor;

use kilnc::{render, run_repl, ConsoleOutput, RunError, Session};
use pretty_assertions::assert_eq;

fn session() -> Session {
    Session::new(ConsoleOutput::buffer()).unwrap()
}

fn run(source: &str) -> String {
    session().run(source).unwrap().to_string()
}

#[test]
fn test_var_declaration_value() {
    assert_eq!(run("var x = 3;"), "3");
}

#[test]
fn test_object_literal_keys() {
    assert_eq!(
        run("var x = {}; var y = {'abc':'nooo', 34:42, x};"),
        r#"{"abc":"nooo","34":42,"x":{}}"#
    );
}

#[test]
fn test_member_assignment_reads_before_write() {
    assert_eq!(
        run("var x = 'foo'; x = {a:4}; x.b = x.a; x.a = 5; x;"),
        r#"{"a":5,"b":4}"#
    );
}

#[test]
fn test_closure_compound_assignment() {
    assert_eq!(
        run("var g = function(x){ x += 2; return x; }; g(3);"),
        "5"
    );
}

#[test]
fn test_short_circuit_skips_call() {
    let mut session = session();
    let result = session
        .run("var calls = 0; var sideEffect = function() { calls += 1; return true; }; false && sideEffect(); calls;")
        .unwrap();
    assert_eq!(result.to_string(), "0");
    let result = session.run("true && sideEffect(); calls;").unwrap();
    assert_eq!(result.to_string(), "1");
}

#[test]
fn test_while_loop_logs_countdown() {
    let mut session = session();
    let result = session
        .run("var a = 35; while(a > 0){ a -= 5; console.log(a); }")
        .unwrap();
    assert_eq!(result.to_string(), "undefined");
    assert_eq!(session.output().contents(), "30\n25\n20\n15\n10\n5\n0\n");
}

#[test]
fn test_globals_persist_between_runs() {
    let mut session = session();
    session.run("var counter = 1;").unwrap();
    session.run("counter += 41;").unwrap();
    assert_eq!(session.run("counter;").unwrap().to_string(), "42");
}

#[test]
fn test_recursive_function() {
    assert_eq!(
        run("function fib(n) { if (n < 2) { return n; } return fib(n - 1) + fib(n - 2); } fib(10);"),
        "55"
    );
}

#[test]
fn test_errors_leave_session_usable() {
    let mut session = session();
    let error = session.run("var x = ;").unwrap_err();
    assert!(matches!(error, RunError::Parse(_)), "{error:?}");

    let error = session.run("var n = 1; n();").unwrap_err();
    assert_eq!(error.to_string(), "Uncaught TypeError: number is not a function");

    let error = session.run("for (;;) {}").unwrap_err();
    assert_eq!(render(&error, "t", ""), "Error: For is not implemented yet.\n");

    assert_eq!(session.run("n + 1;").unwrap().to_string(), "2");
}

#[test]
fn test_debug_dump_prints_interpreter_state() {
    let mut session = session();
    session.run("var v = 7; debug();").unwrap();
    let dump = session.output().contents();
    assert!(dump.starts_with("queued units: 0\n#0 top-level context"), "{dump}");
    assert!(dump.contains("Operation(Call)"), "{dump}");
    assert!(dump.contains(r#""v":7"#), "{dump}");
}

#[test]
fn test_debug_flag_echoes_parse_trees() {
    let mut session = session();
    session.run("debug(true);").unwrap();
    assert_eq!(session.output().contents(), "");

    session.run("1;").unwrap();
    let echoed = session.output().contents();
    assert!(echoed.contains("Statement(TranslationUnit)"), "{echoed}");
    assert!(echoed.contains("Literal(1)"), "{echoed}");

    session.output().clear();
    session.run("debug(false);").unwrap();
    session.output().clear();
    session.run("2;").unwrap();
    assert_eq!(session.output().contents(), "");
}

#[test]
fn test_debug_tree_option() {
    let mut session = session();
    session.set_debug_tree(true);
    session.run("var y;").unwrap();
    assert!(session.output().contents().contains("VarDecl(y)"));
}

#[test]
fn test_repl_prints_results_and_diagnostics() {
    let mut session = session();
    let input = Cursor::new("var x = 2;\n\nx * 21;\nx(;\nfor(;;){}\nconsole.log('hi', x);\n");
    let mut out = Vec::new();
    run_repl(&mut session, input, &mut out).unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.starts_with("kiln> 2\nkiln> kiln> 42\nkiln> Error: "), "{out}");
    assert!(out.contains("x(;"), "{out}");
    assert!(
        out.ends_with("kiln> Error: For is not implemented yet.\nkiln> undefined\nkiln> \n"),
        "{out}"
    );
    assert_eq!(session.output().contents(), "hi 2\n");
}

#[test]
fn test_run_file_reports_missing_file() {
    let error = session()
        .run_file(std::path::Path::new("/nonexistent/kiln/script.kl"))
        .unwrap_err();
    assert!(matches!(error, RunError::Io { .. }), "{error:?}");
    assert!(error.to_string().starts_with("cannot read `/nonexistent/kiln/script.kl`"));
}
