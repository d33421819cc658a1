use std::cell::Cell;
use std::rc::Rc;

use kiln_ir::Value;
use pretty_assertions::assert_eq;

use super::{run, run_in, with_console};
use crate::Interpreter;

#[test]
fn test_var_declaration_value() {
    assert_eq!(run("var x = 3;"), "3");
    assert_eq!(run("var x;"), "undefined");
}

#[test]
fn test_empty_unit_is_undefined() {
    assert_eq!(run(""), "undefined");
    assert_eq!(Interpreter::new().execute().unwrap().to_string(), "undefined");
}

#[test]
fn test_last_statement_value() {
    assert_eq!(run("1; 2; 'three';"), "three");
    assert_eq!(run("var a = 2; a * 21;"), "42");
}

#[test]
fn test_object_literal_keeps_insertion_order() {
    assert_eq!(
        run("var x = {}; var y = {'abc':'nooo', 34:42, x};"),
        r#"{"abc":"nooo","34":42,"x":{}}"#
    );
}

#[test]
fn test_object_literal_duplicate_and_computed_keys() {
    assert_eq!(run("({a: 1, b: 2, a: 3});"), r#"{"a":3,"b":2}"#);
    assert_eq!(run("var k = 'dyn'; ({[k + 1]: true});"), r#"{"dyn1":true}"#);
}

#[test]
fn test_member_assignment_reads_before_write() {
    assert_eq!(
        run("var x = 'foo'; x = {a:4}; x.b = x.a; x.a = 5; x;"),
        r#"{"a":5,"b":4}"#
    );
}

#[test]
fn test_computed_member_compound_assignment() {
    assert_eq!(run("var o = {n: 1}; o.n += 4; o['n'] *= 2; o.n;"), "10");
}

#[test]
fn test_member_read_creates_slot() {
    assert_eq!(run("var o = {}; o.missing; o;"), r#"{"missing":undefined}"#);
}

#[test]
fn test_nested_member_assignment_aliases() {
    assert_eq!(
        run("var a = {inner: {}}; var b = a.inner; b.x = 1; a;"),
        r#"{"inner":{"x":1}}"#
    );
}

#[test]
fn test_prefix_and_postfix_updates() {
    assert_eq!(
        run("var i = 1; var a = i++; var b = ++i; a + ',' + b + ',' + i;"),
        "1,3,3"
    );
    assert_eq!(run("var o = {n: 5}; o.n--; --o.n;"), "3");
}

#[test]
fn test_if_else() {
    assert_eq!(run("var r; if (1 < 2) { r = 'yes'; } else { r = 'no'; } r;"), "yes");
    assert_eq!(run("var r = 'unset'; if ('') r = 'yes'; r;"), "unset");
    assert_eq!(run("if (0) 1; else 2;"), "2");
}

#[test]
fn test_while_loop_logs_and_completes_undefined() {
    let (mut interpreter, lines) = with_console();
    let result = run_in(
        &mut interpreter,
        "var a = 35; while(a > 0){ a -= 5; console.log(a); }",
    )
    .unwrap();
    assert_eq!(result.to_string(), "undefined");
    assert_eq!(
        *lines.borrow(),
        vec!["30", "25", "20", "15", "10", "5", "0"]
    );
}

#[test]
fn test_do_while_runs_body_first() {
    assert_eq!(run("var n = 0; do { n += 1; } while (false); n;"), "1");
    assert_eq!(run("var n = 0; do { n += 2; } while (n < 7); n;"), "8");
}

#[test]
fn test_console_log_joins_arguments() {
    let (mut interpreter, lines) = with_console();
    run_in(&mut interpreter, "console.log('a', 1, {k: null});").unwrap();
    assert_eq!(*lines.borrow(), vec![r#"a 1 {"k":null}"#]);
}

#[test]
fn test_logical_operators_short_circuit() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let interpreter = &mut Interpreter::new();
    interpreter
        .global_environment()
        .set(
            "sideEffect",
            Value::native("sideEffect", move |_| {
                counter.set(counter.get() + 1);
                Ok(Value::from("called"))
            }),
        )
        .unwrap();

    assert_eq!(run_in(interpreter, "false && sideEffect();").unwrap().to_string(), "false");
    assert_eq!(run_in(interpreter, "'yes' || sideEffect();").unwrap().to_string(), "yes");
    assert_eq!(calls.get(), 0);

    assert_eq!(run_in(interpreter, "true && sideEffect();").unwrap().to_string(), "called");
    assert_eq!(run_in(interpreter, "null || sideEffect();").unwrap().to_string(), "called");
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_conditional_evaluates_one_branch() {
    let (mut interpreter, lines) = with_console();
    let result = run_in(
        &mut interpreter,
        "1 > 2 ? console.log('then') : console.log('else'); 0 ? 'a' : 'b';",
    )
    .unwrap();
    assert_eq!(result.to_string(), "b");
    assert_eq!(*lines.borrow(), vec!["else"]);
}

#[test]
fn test_unary_and_equality_operators() {
    assert_eq!(run("!0;"), "true");
    assert_eq!(run("-'4' + +'1';"), "-3");
    assert_eq!(run("typeof {};"), "object");
    assert_eq!(run("typeof undefined;"), "undefined");
    assert_eq!(run("void 5;"), "undefined");
    assert_eq!(run("1 == '1';"), "true");
    assert_eq!(run("1 === '1';"), "false");
    assert_eq!(run("1 !== '1';"), "true");
    assert_eq!(run("var o = {}; var p = o; o === p;"), "true");
}

#[test]
fn test_units_run_in_feed_order() {
    let mut interpreter = Interpreter::new();
    interpreter.feed(kiln_parse::parse("var a = 1;").unwrap());
    interpreter.feed(kiln_parse::parse("a + 1;").unwrap());
    assert_eq!(interpreter.execute().unwrap().to_string(), "2");
    assert!(interpreter.is_idle());
}

#[test]
fn test_globals_persist_between_executions() {
    let mut interpreter = Interpreter::new();
    run_in(&mut interpreter, "var counter = 10;").unwrap();
    run_in(&mut interpreter, "counter += 5;").unwrap();
    assert_eq!(run_in(&mut interpreter, "counter;").unwrap().to_string(), "15");
    assert_eq!(
        interpreter.global_environment().to_string(),
        r#"{"counter":15}"#
    );
}

#[test]
fn test_custom_global_environment() {
    let base = Value::from_properties([("greeting", Value::from("hi"))]);
    let mut interpreter = Interpreter::builder()
        .global_environment(Value::object_with_prototype(base.clone()))
        .build();
    assert_eq!(run_in(&mut interpreter, "greeting + '!';").unwrap().to_string(), "hi!");

    *interpreter.global_environment_mut() = Value::object();
    assert_eq!(run_in(&mut interpreter, "greeting;").unwrap().to_string(), "undefined");
    assert_eq!(base.to_string(), r#"{"greeting":"hi"}"#);
}

#[test]
fn test_top_level_return_ends_unit() {
    assert_eq!(run("return 7; 8;"), "7");
}

#[test]
fn test_execute_step_drives_single_nodes() {
    let mut interpreter = Interpreter::new();
    interpreter.feed(kiln_parse::parse("1 + 2;").unwrap());
    let mut records = Vec::new();
    while !interpreter.is_idle() {
        records.push(interpreter.execute_step().unwrap());
    }
    assert_eq!(records.len(), 9);
    assert!(records[..8].iter().all(crate::CompletionRecord::is_normal));
    assert!(matches!(
        records.last(),
        Some(crate::CompletionRecord::Return(Value::Number(n))) if *n == 3.0
    ));
    assert!(interpreter.execute_step().unwrap().is_normal());
}

#[test]
fn test_dump_lists_running_contexts() {
    let mut interpreter = Interpreter::new();
    interpreter.feed(kiln_parse::parse("var v = 1 + 2;").unwrap());
    for _ in 0..5 {
        interpreter.execute_step().unwrap();
    }
    assert_eq!(interpreter.depth(), 1);
    let dump = interpreter.to_string();
    assert!(dump.starts_with("queued units: 0\n#0 top-level context at node 3 (previous 4)\n"));
    assert!(dump.contains("Operation(Addition)"));
    assert!(dump.contains("  [4] Number(1)"));
    assert!(dump.ends_with("global environment: {}\n"));
}
