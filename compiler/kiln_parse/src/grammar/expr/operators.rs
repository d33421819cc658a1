//! Operator Matching Helpers
//!
//! Map the current token to the operation it introduces, if any.

use kiln_ir::Operation;
use kiln_lexer::{Keyword, Lexem, Punctuator};

use crate::Parser;

impl Parser<'_> {
    /// Operators that appear between two operands, `?` of the conditional included.
    pub(crate) fn match_binary_op(&self) -> Option<Operation> {
        let punctuator = match self.current.lexem {
            Lexem::Punctuator(punctuator) => punctuator,
            Lexem::Keyword(Keyword::In) => return Some(Operation::In),
            Lexem::Keyword(Keyword::InstanceOf) => return Some(Operation::InstanceOf),
            _ => return None,
        };
        Some(match punctuator {
            Punctuator::StarStar => Operation::Exponentiation,
            Punctuator::Star => Operation::Multiplication,
            Punctuator::Slash => Operation::Division,
            Punctuator::Percent => Operation::Remainder,
            Punctuator::Plus => Operation::Addition,
            Punctuator::Minus => Operation::Subtraction,
            Punctuator::Shl => Operation::BitwiseLeftShift,
            Punctuator::Shr => Operation::BitwiseRightShift,
            Punctuator::UShr => Operation::BitwiseUnsignedRightShift,
            Punctuator::Lt => Operation::LessThan,
            Punctuator::LtEq => Operation::LessThanOrEqual,
            Punctuator::Gt => Operation::GreaterThan,
            Punctuator::GtEq => Operation::GreaterThanOrEqual,
            Punctuator::EqEq => Operation::Equality,
            Punctuator::NotEq => Operation::Inequality,
            Punctuator::EqEqEq => Operation::StrictEquality,
            Punctuator::NotEqEq => Operation::StrictInequality,
            Punctuator::Amp => Operation::BitwiseAnd,
            Punctuator::Caret => Operation::BitwiseXor,
            Punctuator::Pipe => Operation::BitwiseOr,
            Punctuator::AmpAmp => Operation::LogicalAnd,
            Punctuator::PipePipe => Operation::LogicalOr,
            Punctuator::Question => Operation::Conditional,
            Punctuator::Eq => Operation::Assignment,
            Punctuator::PlusEq => Operation::AdditionAssignment,
            Punctuator::MinusEq => Operation::SubtractionAssignment,
            Punctuator::StarEq => Operation::MultiplicationAssignment,
            Punctuator::SlashEq => Operation::DivisionAssignment,
            Punctuator::PercentEq => Operation::RemainderAssignment,
            Punctuator::ShlEq => Operation::LeftShiftAssignment,
            Punctuator::ShrEq => Operation::RightShiftAssignment,
            Punctuator::UShrEq => Operation::UnsignedRightShiftAssignment,
            Punctuator::AmpEq => Operation::BitwiseAndAssignment,
            Punctuator::CaretEq => Operation::BitwiseXorAssignment,
            Punctuator::PipeEq => Operation::BitwiseOrAssignment,
            _ => return None,
        })
    }

    pub(crate) fn match_prefix_op(&self) -> Option<Operation> {
        match self.current.lexem {
            Lexem::Punctuator(Punctuator::PlusPlus) => Some(Operation::PrefixIncrement),
            Lexem::Punctuator(Punctuator::MinusMinus) => Some(Operation::PrefixDecrement),
            Lexem::Punctuator(Punctuator::Bang) => Some(Operation::LogicalNot),
            Lexem::Punctuator(Punctuator::Tilde) => Some(Operation::BitwiseNot),
            Lexem::Punctuator(Punctuator::Plus) => Some(Operation::UnaryPlus),
            Lexem::Punctuator(Punctuator::Minus) => Some(Operation::UnaryNegation),
            Lexem::Punctuator(Punctuator::Spread) => Some(Operation::Spread),
            Lexem::Keyword(Keyword::Typeof) => Some(Operation::Typeof),
            Lexem::Keyword(Keyword::Void) => Some(Operation::Void),
            Lexem::Keyword(Keyword::Delete) => Some(Operation::Delete),
            Lexem::Keyword(Keyword::Yield) => Some(Operation::Yield),
            _ => None,
        }
    }
}
