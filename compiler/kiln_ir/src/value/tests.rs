use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_to_string_primitives() {
    assert_eq!(Value::Undefined.to_string(), "undefined");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::from(true).to_string(), "true");
    assert_eq!(Value::from(3).to_string(), "3");
    assert_eq!(Value::from("plain").to_string(), "plain");
    assert_eq!(Value::native("f", |_| Ok(Value::Undefined)).to_string(), "function");
}

#[test]
fn test_format_number() {
    assert_eq!(format_number(0.1), "0.1");
    assert_eq!(format_number(-12.5), "-12.5");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(1.5e-7), "1.5e-7");
    assert_eq!(format_number(0.000_001), "0.000001");
    assert_eq!(format_number(123_456_789.0), "123456789");
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(f64::INFINITY), "Infinity");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
}

#[test]
fn test_parse_number() {
    assert_eq!(parse_number("42"), 42.0);
    assert_eq!(parse_number("  42abc"), 42.0);
    assert_eq!(parse_number("-1e3"), -1000.0);
    assert_eq!(parse_number("1e"), 1.0);
    assert_eq!(parse_number(".5"), 0.5);
    assert_eq!(parse_number("0x1F"), 31.0);
    assert_eq!(parse_number("-Infinity"), f64::NEG_INFINITY);
    assert!(parse_number("nan").is_nan());
    assert!(parse_number("").is_nan());
    assert!(parse_number(".").is_nan());
    assert!(parse_number("Not a number").is_nan());
}

#[test]
fn test_to_number() {
    assert_eq!(Value::Undefined.to_number(), Ok(0.0));
    assert_eq!(Value::Null.to_number(), Ok(0.0));
    assert_eq!(Value::from(true).to_number(), Ok(1.0));
    assert_eq!(Value::from("7.25").to_number(), Ok(7.25));
    assert!(Value::from("seven").to_number().unwrap().is_nan());
    assert_eq!(Value::object().to_number(), Ok(0.0));
    assert_eq!(
        Value::native("f", |_| Ok(Value::Undefined)).to_number(),
        Err(ValueError::Unavailable {
            operation: "convert to number",
            type_name: "function"
        })
    );
}

#[test]
fn test_to_bool() {
    assert!(!Value::Undefined.to_bool().unwrap());
    assert!(!Value::Null.to_bool().unwrap());
    assert!(!Value::from(0).to_bool().unwrap());
    assert!(!Value::from(f64::NAN).to_bool().unwrap());
    assert!(Value::from(-2).to_bool().unwrap());
    assert!(!Value::from("").to_bool().unwrap());
    assert!(Value::from("0").to_bool().unwrap());
    assert!(Value::object().to_bool().unwrap());
    assert!(Value::native("f", |_| Ok(Value::Undefined)).to_bool().unwrap());
}

#[test]
fn test_conversion_hooks() {
    let object = Value::from_properties([
        (TO_NUMBER_HOOK, Value::native("to_double", |_| Ok(Value::from(42)))),
        (TO_BOOL_HOOK, Value::native("to_bool", |_| Ok(Value::from(false)))),
    ]);
    assert_eq!(object.to_number(), Ok(42.0));
    assert_eq!(object.to_bool(), Ok(false));

    let not_callable = Value::from_properties([(TO_NUMBER_HOOK, Value::from(5))]);
    assert_eq!(not_callable.to_number(), Ok(0.0));
}

#[test]
fn test_script_hooks_are_left_to_the_interpreter() {
    let script = Rc::new(ScriptFunction {
        name: None,
        params: Vec::new(),
        body: Rc::new(crate::ParseTree::new(crate::Statement::Block.into())),
        environment: Value::object(),
    });
    let object = Value::from_properties([(TO_BOOL_HOOK, Value::Function(Function::Script(script)))]);

    assert!(object.script_hook(TO_BOOL_HOOK).is_some());
    assert!(object.script_hook(TO_NUMBER_HOOK).is_none());
    assert_eq!(
        object.to_bool(),
        Err(ValueError::ScriptHook { hook: TO_BOOL_HOOK })
    );

    let native = Value::from_properties([(TO_BOOL_HOOK, Value::native("to_bool", |_| Ok(Value::Null)))]);
    assert!(native.script_hook(TO_BOOL_HOOK).is_none());
    assert!(Value::from(1).script_hook(TO_BOOL_HOOK).is_none());
}

#[test]
fn test_object_rendering() {
    let inner = Value::object();
    let object = Value::from_properties([
        ("x", inner),
        ("abc", Value::from("no\"pe")),
        ("34", Value::from(42)),
        ("flag", Value::from(true)),
    ]);
    assert_eq!(
        object.to_string(),
        r#"{"x":{},"abc":"no\"pe","34":42,"flag":true}"#
    );
}

#[test]
fn test_cyclic_object_rendering() {
    let object = Value::object();
    object.set("self", object.clone()).unwrap();
    object.set("n", Value::from(1)).unwrap();
    assert_eq!(object.to_string(), r#"{"self":{...},"n":1}"#);
}

#[test]
fn test_prototype_chain_lookup() {
    let a = Value::from_properties([("foo", Value::from("FOO"))]);
    let b = Value::object_with_prototype(a.clone());
    b.set("bar", Value::from("BAR")).unwrap();

    assert_eq!(b.get("foo").unwrap(), Value::from("FOO"));
    assert_eq!(b.get("bar").unwrap(), Value::from("BAR"));

    b.set("foo", Value::from("X")).unwrap();
    assert_eq!(b.get("foo").unwrap(), Value::from("X"));
    assert_eq!(a.get("foo").unwrap(), Value::from("FOO"));
}

#[test]
fn test_index_vivifies_on_receiver() {
    let proto = Value::object();
    let object = Value::object_with_prototype(proto.clone());

    assert!(object.get("missing").unwrap().is_undefined());
    assert_eq!(object.to_string(), "{}");

    assert!(object.index("missing").unwrap().is_undefined());
    assert_eq!(object.to_string(), r#"{"missing":undefined}"#);
    assert_eq!(proto.to_string(), "{}");
}

#[test]
fn test_property_access_requires_object() {
    let err = Value::from(4).index("x").unwrap_err();
    assert_eq!(
        err,
        ValueError::Unavailable {
            operation: "access properties of",
            type_name: "number"
        }
    );
    assert!(Value::Undefined.set("x", Value::Null).is_err());
}

#[test]
fn test_aliasing() {
    let original = Value::object();
    let alias = original.clone();
    alias.set("shared", Value::from(1)).unwrap();
    assert_eq!(original.get("shared").unwrap(), Value::from(1));
    assert!(original.strict_equals(&alias));
    assert!(!original.strict_equals(&Value::object()));
}

#[test]
fn test_call() {
    let add = Value::native("add", |args| {
        let mut total = 0.0;
        for arg in args {
            total += arg.to_number()?;
        }
        Ok(Value::from(total))
    });
    assert_eq!(
        add.call(&[Value::from(2), Value::from("3")]).unwrap(),
        Value::from(5)
    );

    let callable_object = Value::from_properties([(CALL_OPERATOR, add)]);
    assert!(callable_object.is_callable());
    assert_eq!(callable_object.call(&[Value::from(1)]).unwrap(), Value::from(1));

    assert_eq!(
        Value::from("nope").call(&[]).unwrap_err(),
        ValueError::NotCallable { type_name: "string" }
    );
    assert_eq!(
        Value::object().call(&[]).unwrap_err(),
        ValueError::NotCallable { type_name: "object" }
    );
}

#[test]
fn test_typeof_names() {
    assert_eq!(Value::Null.typeof_name(), "object");
    assert_eq!(Value::Undefined.typeof_name(), "undefined");
    assert_eq!(Value::from(1).typeof_name(), "number");
    assert_eq!(Value::from("s").typeof_name(), "string");
    assert_eq!(Value::from(false).typeof_name(), "boolean");
    assert_eq!(Value::object().typeof_name(), "object");
}

#[test]
fn test_strict_vs_loose_equality() {
    assert!(Value::from(1) == Value::from("1"));
    assert!(!Value::from(1).strict_equals(&Value::from("1")));
    assert!(Value::from("a").strict_equals(&Value::from("a")));
    assert!(!Value::from(f64::NAN).strict_equals(&Value::from(f64::NAN)));
}

proptest! {
    #[test]
    fn prop_number_string_round_trip(number in any::<f64>().prop_filter("finite", |n| n.is_finite())) {
        let rendered = Value::from(number).to_string();
        prop_assert_eq!(Value::from(rendered.as_str()).to_number().unwrap(), number);
    }
}
