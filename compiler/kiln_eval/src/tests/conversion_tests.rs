use pretty_assertions::assert_eq;

use super::{run, run_err};
use crate::{ErrorKind, EvalError};

const FALSY: &str = "var o = {to_bool: function(){ return false; }};";
const FIVE: &str = "var n = {to_double: function(){ return 5; }};";

fn with(prelude: &str, source: &str) -> String {
    run(&format!("{prelude} {source}"))
}

#[test]
fn test_script_to_bool_hook_decides_branches() {
    assert_eq!(with(FALSY, "if (o) { 'truthy'; } else { 'falsy'; }"), "falsy");
    assert_eq!(with(FALSY, "o ? 'yes' : 'no';"), "no");
    assert_eq!(with(FALSY, "!o;"), "true");
}

#[test]
fn test_script_to_double_hook_in_arithmetic() {
    assert_eq!(with(FIVE, "n * 2;"), "10");
    assert_eq!(with(FIVE, "-n;"), "-5");
    assert_eq!(with(FIVE, "n > 4;"), "true");
    assert_eq!(
        run("var a = {to_double: function(){ return 3; }}; var b = {to_double: function(){ return 4; }}; a * b;"),
        "12"
    );
}

#[test]
fn test_hook_result_is_coerced() {
    assert_eq!(
        run("var n = {to_double: function(){ return '7'; }}; n + 1;"),
        "8"
    );
    assert_eq!(
        run("var o = {to_bool: function(){ return 0; }}; o ? 'yes' : 'no';"),
        "no"
    );
}

#[test]
fn test_concatenation_does_not_run_the_hook() {
    assert_eq!(with(FIVE, "n + '';"), r#"{"to_double":function}"#);
}

#[test]
fn test_logical_operators_return_the_operand() {
    let truthy = "var o = {to_bool: function(){ return true; }};";
    assert_eq!(with(truthy, "o || 1;"), r#"{"to_bool":function}"#);
    assert_eq!(with(FALSY, "o && 1;"), r#"{"to_bool":function}"#);
    assert_eq!(with(FALSY, "o || 1;"), "1");
}

#[test]
fn test_loop_condition_hook_runs_every_iteration() {
    assert_eq!(
        run("var i = 0; var c = {to_bool: function(){ i += 1; return i < 4; }}; while (c) {} i;"),
        "4"
    );
    assert_eq!(
        run("var i = 0; var c = {to_bool: function(){ i += 1; return i < 3; }}; do {} while (c); i;"),
        "3"
    );
}

#[test]
fn test_compound_assignment_converts_old_value_and_operand() {
    assert_eq!(with(FIVE, "n += 1; n;"), "6");
    assert_eq!(with(FIVE, "var x = 10; x -= n; x;"), "5");
    assert_eq!(
        run("var box = {v: {to_double: function(){ return 7; }}}; box.v++;"),
        "7"
    );
    assert_eq!(
        run("var box = {v: {to_double: function(){ return 7; }}}; ++box.v; box.v;"),
        "8"
    );
}

#[test]
fn test_hook_returning_a_hooked_object_is_a_type_error() {
    assert_eq!(
        run_err(
            "var inner = {to_bool: function(){ return false; }}; \
             var o = {to_bool: function(){ return inner; }}; if (o) { 1; }"
        ),
        EvalError::Uncaught {
            kind: ErrorKind::TypeError,
            message: "conversion hook `to_bool` is a script function".to_owned(),
        }
    );
}
