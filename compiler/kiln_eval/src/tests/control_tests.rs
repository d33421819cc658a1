use kiln_ir::{Operation, ParseTree, Statement, Value, ValueError};
use pretty_assertions::assert_eq;

use super::{run, run_err, run_in};
use crate::{ErrorKind, EvalError, Interpreter};

fn uncaught(kind: ErrorKind, message: &str) -> EvalError {
    EvalError::Uncaught {
        kind,
        message: message.to_owned(),
    }
}

fn unimplemented(what: &str) -> EvalError {
    EvalError::Unimplemented {
        what: what.to_owned(),
    }
}

#[test]
fn test_calling_a_non_function_is_a_type_error() {
    assert_eq!(
        run_err("var x = 3; x();"),
        uncaught(ErrorKind::TypeError, "number is not a function")
    );
    assert_eq!(
        run_err("var o = {}; o.method();"),
        uncaught(ErrorKind::TypeError, "undefined is not a function")
    );
}

#[test]
fn test_parenthesis_after_function_declaration_leaves_it_unbound() {
    assert_eq!(
        run_err("function f(){ return 1; } ({a: f()});"),
        uncaught(ErrorKind::TypeError, "undefined is not a function")
    );
    assert_eq!(
        run("function f(){ return 1; } var o = {a: f()}; o;"),
        r#"{"a":1}"#
    );
}

#[test]
fn test_member_access_on_primitives_is_a_type_error() {
    assert_eq!(
        run_err("var u; u.x;"),
        uncaught(
            ErrorKind::TypeError,
            "Cannot read properties of undefined (reading 'x')"
        )
    );
    assert_eq!(
        run_err("var n = null; n.x = 1;"),
        uncaught(
            ErrorKind::TypeError,
            "Cannot set properties of null (setting 'x')"
        )
    );
}

#[test]
fn test_host_errors_surface_as_type_errors() {
    let mut interpreter = Interpreter::new();
    interpreter
        .global_environment()
        .set(
            "fail",
            Value::native("fail", |_| Err(ValueError::host("boom"))),
        )
        .unwrap();
    assert_eq!(
        run_in(&mut interpreter, "fail();").unwrap_err(),
        uncaught(ErrorKind::TypeError, "boom")
    );
}

#[test]
fn test_unresolvable_bindings_are_reference_errors() {
    let mut interpreter = Interpreter::builder()
        .global_environment(Value::Null)
        .build();
    for (source, name) in [("x;", "x"), ("y = 1;", "y"), ("var z = 2;", "z"), ("function f() {}", "f")] {
        assert_eq!(
            run_in(&mut interpreter, source).unwrap_err(),
            uncaught(ErrorKind::ReferenceError, &format!("{name} is not defined")),
            "{source}"
        );
    }
}

#[test]
fn test_call_depth_limit() {
    let mut interpreter = Interpreter::builder().max_call_depth(16).build();
    assert_eq!(interpreter.config().max_call_depth, 16);
    assert_eq!(
        run_in(&mut interpreter, "var f = function(){ return f(); }; f();").unwrap_err(),
        uncaught(ErrorKind::RangeError, "Maximum call stack size exceeded")
    );
}

#[test]
fn test_unimplemented_constructs() {
    assert_eq!(run_err("for (;;) {}"), unimplemented("For"));
    assert_eq!(run_err("throw 1;"), unimplemented("Throw"));
    assert_eq!(run_err("new Foo();"), unimplemented("New"));
    assert_eq!(run_err("[1, 2];"), unimplemented("ArrayObject"));
    assert_eq!(run_err("1 & 2;"), unimplemented("BitwiseAND"));
    assert_eq!(run_err("2 ** 3;"), unimplemented("Exponentiation"));
    assert_eq!(run_err("var x = 1; x <<= 2;"), unimplemented("LeftShiftAssignment"));
}

#[test]
fn test_loop_control_is_unimplemented() {
    assert_eq!(run_err("while (true) { break; }"), unimplemented("Break"));
    assert_eq!(run_err("while (true) { continue; }"), unimplemented("Continue"));
}

#[test]
fn test_destructuring_targets_are_unimplemented() {
    // `{} = 2`, which the parser itself refuses to build.
    let mut tree = ParseTree::new(Statement::TranslationUnit.into());
    let statement = tree.append(tree.root(), Statement::Expression.into()).unwrap();
    let assignment = tree.append(statement, Operation::Assignment.into()).unwrap();
    tree.append(assignment, Operation::JsonObject.into()).unwrap();
    tree.append(assignment, Value::from(2).into()).unwrap();

    let mut interpreter = Interpreter::new();
    interpreter.feed(tree);
    assert_eq!(
        interpreter.execute().unwrap_err(),
        unimplemented("Object-decomposition")
    );
}

#[test]
fn test_error_message_text() {
    assert_eq!(
        unimplemented("For").to_string(),
        "`For` is not implemented yet"
    );
    assert_eq!(
        uncaught(ErrorKind::ReferenceError, "x is not defined").to_string(),
        "Uncaught ReferenceError: x is not defined"
    );
}

#[test]
fn test_fatal_error_resets_the_interpreter() {
    let mut interpreter = Interpreter::new();
    interpreter.feed(kiln_parse::parse("var f = function(){ return undefined(); }; f();").unwrap());
    interpreter.feed(kiln_parse::parse("'never runs';").unwrap());
    assert!(interpreter.execute().is_err());
    assert!(interpreter.is_idle());
    assert_eq!(interpreter.depth(), 0);

    assert_eq!(run_in(&mut interpreter, "typeof f;").unwrap().to_string(), "function");
    assert_eq!(run("'fresh';"), "fresh");
}
