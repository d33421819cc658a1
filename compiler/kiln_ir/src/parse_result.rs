//! Node taxonomy of Kiln parse trees.
//!
//! A parse tree is a [`FlatTree`] of [`ParseResult`]s. Child order carries
//! meaning; the shapes produced by the parser are:
//!
//! | Node | Children |
//! |------|----------|
//! | `Statement(TranslationUnit)` / `Statement(Block)` | statements |
//! | `Statement(Expression)` | one expression or one `VarDecl` |
//! | `Statement(If)` | condition, then-branch, optional else-branch |
//! | `Statement(While)` | condition, body |
//! | `Statement(DoWhile)` | body, condition |
//! | `Statement(For)` | init, condition, update, body (`Literal(undefined)` fills empty slots) |
//! | `Statement(Return)` / `Statement(Throw)` | optional expression |
//! | `Statement(Function)` | one `Operation(Function)` (a function literal in statement position without `;`) |
//! | `VarDecl(name)` | optional initializer |
//! | `Operation(Function)` | `Literal(name or undefined)`, `Literal(param)`*, body block |
//! | `Operation(JsonObject)` | key/value pairs: `Literal(key)` + (`Grouping(value)` or `VarUse(key)`), or `Grouping(key expr)` + value expr |
//! | `Operation(MemberAccess)` | base, key (`a.b` stores the key as `Literal("b")`) |
//! | `Operation(Call)` | callee, arguments |
//! | `Operation(Conditional)` | condition, consequent, alternative |
//! | other operations | operands, left to right |

use std::fmt;
use std::rc::Rc;

use kiln_tree::FlatTree;

use crate::Value;

/// Binding and identifier names.
pub type Name = Rc<str>;

/// A complete parse tree, as produced by the parser and consumed by the interpreter.
pub type ParseTree = FlatTree<ParseResult>;

/// Classification of one parse-tree node.
#[derive(Clone, Debug)]
pub enum ParseResult {
    /// `var name` (the initializer, if any, is the only child).
    VarDecl(Name),
    /// A read or write of a binding.
    VarUse(Name),
    Statement(Statement),
    Operation(Operation),
    Literal(Value),
}

impl ParseResult {
    /// Name used in diagnostics and "not implemented" errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParseResult::VarDecl(_) => "VarDecl",
            ParseResult::VarUse(_) => "VarUse",
            ParseResult::Statement(statement) => statement.name(),
            ParseResult::Operation(operation) => operation.name(),
            ParseResult::Literal(_) => "Literal",
        }
    }

    #[inline]
    pub fn is_operation(&self, operation: Operation) -> bool {
        matches!(self, ParseResult::Operation(op) if *op == operation)
    }

    #[inline]
    pub fn is_statement(&self, statement: Statement) -> bool {
        matches!(self, ParseResult::Statement(stm) if *stm == statement)
    }
}

impl From<Statement> for ParseResult {
    fn from(statement: Statement) -> Self {
        ParseResult::Statement(statement)
    }
}

impl From<Operation> for ParseResult {
    fn from(operation: Operation) -> Self {
        ParseResult::Operation(operation)
    }
}

impl From<Value> for ParseResult {
    fn from(value: Value) -> Self {
        ParseResult::Literal(value)
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseResult::VarDecl(name) => write!(f, "VarDecl({name})"),
            ParseResult::VarUse(name) => write!(f, "VarUse({name})"),
            ParseResult::Statement(statement) => write!(f, "Statement({})", statement.name()),
            ParseResult::Operation(operation) => write!(f, "Operation({})", operation.name()),
            ParseResult::Literal(Value::String(text)) => write!(f, "Literal({text:?})"),
            ParseResult::Literal(value) => write!(f, "Literal({value})"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Statement {
    TranslationUnit,
    Expression,
    Block,
    If,
    While,
    DoWhile,
    For,
    Return,
    Break,
    Continue,
    Throw,
    /// `function name(...) { ... }` in statement position.
    Function,
}

impl Statement {
    pub fn name(self) -> &'static str {
        match self {
            Statement::TranslationUnit => "TranslationUnit",
            Statement::Expression => "Expression",
            Statement::Block => "Block",
            Statement::If => "If",
            Statement::While => "While",
            Statement::DoWhile => "DoWhile",
            Statement::For => "For",
            Statement::Return => "Return",
            Statement::Break => "Break",
            Statement::Continue => "Continue",
            Statement::Throw => "Throw",
            Statement::Function => "FunctionDeclaration",
        }
    }
}

/// Expression operators, ordered by binding strength.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Grouping,
    JsonObject,
    ArrayObject,
    Function,

    MemberAccess,
    New,

    Call,

    PostfixIncrement,
    PostfixDecrement,

    PrefixIncrement,
    PrefixDecrement,
    LogicalNot,
    BitwiseNot,
    UnaryPlus,
    UnaryNegation,
    Typeof,
    Void,
    Delete,

    Exponentiation,
    Multiplication,
    Division,
    Remainder,

    Addition,
    Subtraction,

    BitwiseLeftShift,
    BitwiseRightShift,
    BitwiseUnsignedRightShift,

    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    In,
    InstanceOf,

    Equality,
    Inequality,
    StrictEquality,
    StrictInequality,

    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    LogicalAnd,
    LogicalOr,

    Conditional,

    Assignment,
    AdditionAssignment,
    SubtractionAssignment,
    MultiplicationAssignment,
    DivisionAssignment,
    RemainderAssignment,
    LeftShiftAssignment,
    RightShiftAssignment,
    UnsignedRightShiftAssignment,
    BitwiseAndAssignment,
    BitwiseXorAssignment,
    BitwiseOrAssignment,

    Yield,
    Spread,
    Comma,
}

impl Operation {
    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        use Operation::*;
        match self {
            Grouping | JsonObject | ArrayObject | Function => 19,
            MemberAccess | New => 18,
            Call => 17,
            PostfixIncrement | PostfixDecrement => 16,
            PrefixIncrement | PrefixDecrement | LogicalNot | BitwiseNot | UnaryPlus
            | UnaryNegation | Typeof | Void | Delete => 15,
            Exponentiation | Multiplication | Division | Remainder => 14,
            Addition | Subtraction => 13,
            BitwiseLeftShift | BitwiseRightShift | BitwiseUnsignedRightShift => 12,
            LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual | In | InstanceOf => 11,
            Equality | Inequality | StrictEquality | StrictInequality => 10,
            BitwiseAnd => 9,
            BitwiseXor => 8,
            BitwiseOr => 7,
            LogicalAnd => 6,
            LogicalOr => 5,
            Conditional => 4,
            Assignment
            | AdditionAssignment
            | SubtractionAssignment
            | MultiplicationAssignment
            | DivisionAssignment
            | RemainderAssignment
            | LeftShiftAssignment
            | RightShiftAssignment
            | UnsignedRightShiftAssignment
            | BitwiseAndAssignment
            | BitwiseXorAssignment
            | BitwiseOrAssignment => 3,
            Yield => 2,
            Spread => 1,
            Comma => 0,
        }
    }

    /// Operators whose equal-precedence chains group to the right.
    pub fn is_right_associative(self) -> bool {
        self.precedence() == 3 || matches!(self, Operation::Exponentiation | Operation::Conditional)
    }

    /// Operators whose first child is written to rather than read.
    pub fn is_assignment(self) -> bool {
        self.precedence() == 3
            || matches!(
                self,
                Operation::PostfixIncrement
                    | Operation::PostfixDecrement
                    | Operation::PrefixIncrement
                    | Operation::PrefixDecrement
            )
    }

    /// Plain binary operators that fold two evaluated operands.
    pub fn binary_op(self) -> Option<BinaryOp> {
        Some(match self {
            Operation::Addition => BinaryOp::Add,
            Operation::Subtraction => BinaryOp::Sub,
            Operation::Multiplication => BinaryOp::Mul,
            Operation::Division => BinaryOp::Div,
            Operation::Remainder => BinaryOp::Rem,
            Operation::LessThan => BinaryOp::Lt,
            Operation::LessThanOrEqual => BinaryOp::LtEq,
            Operation::GreaterThan => BinaryOp::Gt,
            Operation::GreaterThanOrEqual => BinaryOp::GtEq,
            Operation::Equality => BinaryOp::Eq,
            Operation::Inequality => BinaryOp::NotEq,
            Operation::StrictEquality => BinaryOp::StrictEq,
            Operation::StrictInequality => BinaryOp::StrictNotEq,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        use Operation::*;
        match self {
            Grouping => "Grouping",
            JsonObject => "JsonObject",
            ArrayObject => "ArrayObject",
            Function => "Function",
            MemberAccess => "MemberAccess",
            New => "New",
            Call => "Call",
            PostfixIncrement => "PostfixIncrement",
            PostfixDecrement => "PostfixDecrement",
            PrefixIncrement => "PrefixIncrement",
            PrefixDecrement => "PrefixDecrement",
            LogicalNot => "LogicalNot",
            BitwiseNot => "BitwiseNot",
            UnaryPlus => "UnaryPlus",
            UnaryNegation => "UnaryNegation",
            Typeof => "Typeof",
            Void => "Void",
            Delete => "Delete",
            Exponentiation => "Exponentiation",
            Multiplication => "Multiplication",
            Division => "Division",
            Remainder => "Remainder",
            Addition => "Addition",
            Subtraction => "Subtraction",
            BitwiseLeftShift => "BitwiseLeftShift",
            BitwiseRightShift => "BitwiseRightShift",
            BitwiseUnsignedRightShift => "BitwiseUnsignedRightShift",
            LessThan => "LessThan",
            LessThanOrEqual => "LessThanOrEqual",
            GreaterThan => "GreaterThan",
            GreaterThanOrEqual => "GreaterThanOrEqual",
            In => "In",
            InstanceOf => "InstanceOf",
            Equality => "Equality",
            Inequality => "Inequality",
            StrictEquality => "StrictEquality",
            StrictInequality => "StrictInequality",
            BitwiseAnd => "BitwiseAND",
            BitwiseXor => "BitwiseXOR",
            BitwiseOr => "BitwiseOR",
            LogicalAnd => "LogicalAND",
            LogicalOr => "LogicalOR",
            Conditional => "Conditional",
            Assignment => "Assignment",
            AdditionAssignment => "AdditionAssignment",
            SubtractionAssignment => "SubtractionAssignment",
            MultiplicationAssignment => "MultiplicationAssignment",
            DivisionAssignment => "DivisionAssignment",
            RemainderAssignment => "RemainderAssignment",
            LeftShiftAssignment => "LeftShiftAssignment",
            RightShiftAssignment => "RightShiftAssignment",
            UnsignedRightShiftAssignment => "UnsignedRightShiftAssignment",
            BitwiseAndAssignment => "BitwiseANDAssignment",
            BitwiseXorAssignment => "BitwiseXORAssignment",
            BitwiseOrAssignment => "BitwiseORAssignment",
            Yield => "Yield",
            Spread => "Spread",
            Comma => "Comma",
        }
    }
}

/// Binary operators with a direct value-level implementation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
        }
    }
}
