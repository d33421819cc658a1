use pretty_assertions::assert_eq;

use super::{expression, outline};

#[test]
fn test_literals() {
    assert_eq!(outline("3;"), expression(&["Literal(3)"]));
    assert_eq!(outline("'abc';"), expression(&["Literal(\"abc\")"]));
    assert_eq!(outline("true;"), expression(&["Literal(true)"]));
    assert_eq!(outline("null;"), expression(&["Literal(null)"]));
    assert_eq!(outline("undefined;"), expression(&["Literal(undefined)"]));
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(
        outline("1 + 2 * 3;"),
        expression(&[
            "Operation(Addition)",
            "  Literal(1)",
            "  Operation(Multiplication)",
            "    Literal(2)",
            "    Literal(3)",
        ])
    );
    assert_eq!(
        outline("1 * 2 + 3;"),
        expression(&[
            "Operation(Addition)",
            "  Operation(Multiplication)",
            "    Literal(1)",
            "    Literal(2)",
            "  Literal(3)",
        ])
    );
}

#[test]
fn test_left_associative() {
    assert_eq!(
        outline("a - b - c;"),
        expression(&[
            "Operation(Subtraction)",
            "  Operation(Subtraction)",
            "    VarUse(a)",
            "    VarUse(b)",
            "  VarUse(c)",
        ])
    );
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(
        outline("a = b = 1;"),
        expression(&[
            "Operation(Assignment)",
            "  VarUse(a)",
            "  Operation(Assignment)",
            "    VarUse(b)",
            "    Literal(1)",
        ])
    );
}

#[test]
fn test_logical_precedence() {
    assert_eq!(
        outline("a || b && c;"),
        expression(&[
            "Operation(LogicalOR)",
            "  VarUse(a)",
            "  Operation(LogicalAND)",
            "    VarUse(b)",
            "    VarUse(c)",
        ])
    );
}

#[test]
fn test_comparison_below_arithmetic() {
    assert_eq!(
        outline("x >= y + 1 == z;"),
        expression(&[
            "Operation(Equality)",
            "  Operation(GreaterThanOrEqual)",
            "    VarUse(x)",
            "    Operation(Addition)",
            "      VarUse(y)",
            "      Literal(1)",
            "  VarUse(z)",
        ])
    );
}

#[test]
fn test_grouping() {
    assert_eq!(
        outline("(1 + 2) * 3;"),
        expression(&[
            "Operation(Multiplication)",
            "  Operation(Grouping)",
            "    Operation(Addition)",
            "      Literal(1)",
            "      Literal(2)",
            "  Literal(3)",
        ])
    );
}

#[test]
fn test_conditional_nests_right() {
    assert_eq!(
        outline("a ? b : c ? d : e;"),
        expression(&[
            "Operation(Conditional)",
            "  VarUse(a)",
            "  VarUse(b)",
            "  Operation(Conditional)",
            "    VarUse(c)",
            "    VarUse(d)",
            "    VarUse(e)",
        ])
    );
}

#[test]
fn test_conditional_inside_assignment() {
    assert_eq!(
        outline("x = c ? 1 : 2;"),
        expression(&[
            "Operation(Assignment)",
            "  VarUse(x)",
            "  Operation(Conditional)",
            "    VarUse(c)",
            "    Literal(1)",
            "    Literal(2)",
        ])
    );
}

#[test]
fn test_prefix_operators() {
    assert_eq!(
        outline("!-x;"),
        expression(&[
            "Operation(LogicalNot)",
            "  Operation(UnaryNegation)",
            "    VarUse(x)",
        ])
    );
    assert_eq!(
        outline("-a * b;"),
        expression(&[
            "Operation(Multiplication)",
            "  Operation(UnaryNegation)",
            "    VarUse(a)",
            "  VarUse(b)",
        ])
    );
    assert_eq!(
        outline("typeof f();"),
        expression(&["Operation(Typeof)", "  Operation(Call)", "    VarUse(f)"])
    );
    assert_eq!(
        outline("--i;"),
        expression(&["Operation(PrefixDecrement)", "  VarUse(i)"])
    );
}

#[test]
fn test_postfix_operators() {
    assert_eq!(
        outline("i++;"),
        expression(&["Operation(PostfixIncrement)", "  VarUse(i)"])
    );
    assert_eq!(
        outline("o.n-- + 1;"),
        expression(&[
            "Operation(Addition)",
            "  Operation(PostfixDecrement)",
            "    Operation(MemberAccess)",
            "      VarUse(o)",
            "      Literal(\"n\")",
            "  Literal(1)",
        ])
    );
}

#[test]
fn test_member_access_and_call_chain() {
    assert_eq!(
        outline("console.log(x.y, f(1));"),
        expression(&[
            "Operation(Call)",
            "  Operation(MemberAccess)",
            "    VarUse(console)",
            "    Literal(\"log\")",
            "  Operation(MemberAccess)",
            "    VarUse(x)",
            "    Literal(\"y\")",
            "  Operation(Call)",
            "    VarUse(f)",
            "    Literal(1)",
        ])
    );
    assert_eq!(
        outline("a[b + 1].c();"),
        expression(&[
            "Operation(Call)",
            "  Operation(MemberAccess)",
            "    Operation(MemberAccess)",
            "      VarUse(a)",
            "      Operation(Addition)",
            "        VarUse(b)",
            "        Literal(1)",
            "    Literal(\"c\")",
        ])
    );
}

#[test]
fn test_keyword_property_name() {
    assert_eq!(
        outline("o.if;"),
        expression(&[
            "Operation(MemberAccess)",
            "  VarUse(o)",
            "  Literal(\"if\")",
        ])
    );
}

#[test]
fn test_compound_assignment_on_member() {
    assert_eq!(
        outline("x.y += 2;"),
        expression(&[
            "Operation(AdditionAssignment)",
            "  Operation(MemberAccess)",
            "    VarUse(x)",
            "    Literal(\"y\")",
            "  Literal(2)",
        ])
    );
}

#[test]
fn test_object_literal() {
    assert_eq!(
        outline("o = {abc: 'nooo', 34: 42, [k]: 1, x};"),
        expression(&[
            "Operation(Assignment)",
            "  VarUse(o)",
            "  Operation(JsonObject)",
            "    Literal(\"abc\")",
            "    Operation(Grouping)",
            "      Literal(\"nooo\")",
            "    Literal(\"34\")",
            "    Operation(Grouping)",
            "      Literal(42)",
            "    Operation(Grouping)",
            "      VarUse(k)",
            "    Literal(1)",
            "    Literal(\"x\")",
            "    VarUse(x)",
        ])
    );
}

#[test]
fn test_empty_object_literal() {
    assert_eq!(
        outline("o = {};"),
        expression(&[
            "Operation(Assignment)",
            "  VarUse(o)",
            "  Operation(JsonObject)",
        ])
    );
}

#[test]
fn test_array_literal_with_hole() {
    assert_eq!(
        outline("[1, , 2];"),
        expression(&[
            "Operation(ArrayObject)",
            "  Literal(1)",
            "  Literal(undefined)",
            "  Literal(2)",
        ])
    );
}

#[test]
fn test_new_expression() {
    assert_eq!(
        outline("new Foo.Bar(1);"),
        expression(&[
            "Operation(New)",
            "  Operation(MemberAccess)",
            "    VarUse(Foo)",
            "    Literal(\"Bar\")",
            "  Literal(1)",
        ])
    );
}

#[test]
fn test_anonymous_function_expression() {
    assert_eq!(
        outline("var g = function(n) { return n; };"),
        expression(&[
            "VarDecl(g)",
            "  Operation(Function)",
            "    Literal(undefined)",
            "    Literal(\"n\")",
            "    Statement(Block)",
            "      Statement(Return)",
            "        VarUse(n)",
        ])
    );
}

#[test]
fn test_deeply_nested_grouping() {
    let depth = 5_000;
    let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
    let tree = crate::parse(&source).unwrap();
    assert_eq!(tree.node_count(), depth + 3);
    assert!(tree.is_well_formed());
}
