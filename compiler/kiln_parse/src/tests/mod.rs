//! Parser tests.
//!
//! - `statement_tests`: statement shapes, function declarations and syntax errors
//! - `expression_tests`: precedence, associativity, postfix chains and literals

mod expression_tests;

use kiln_ir::ParseTree;

use crate::parse;

/// Render a tree one node per line, indented two spaces per depth level.
fn render(tree: &ParseTree) -> String {
    let mut out = String::new();
    for (node, value) in tree.iter() {
        out.push_str(&"  ".repeat(tree.depth(node)));
        out.push_str(&value.to_string());
        out.push('\n');
    }
    out
}

/// Parse `source`, check the tree invariants and render it.
fn outline(source: &str) -> String {
    let tree = parse(source).unwrap();
    assert!(tree.is_well_formed(), "malformed tree for {source:?}");
    render(&tree)
}

/// Outline of a translation unit holding a single expression statement.
fn expression(lines: &[&str]) -> String {
    let mut out = String::from("Statement(TranslationUnit)\n  Statement(Expression)\n");
    for line in lines {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Join lines, each newline-terminated.
fn lines(lines: &[&str]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn error(source: &str) -> String {
    parse(source).unwrap_err().to_string()
}
