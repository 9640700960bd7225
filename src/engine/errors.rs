//! Evaluation error types
//!
//! Every variant except [`EvalError::InternalInvariantViolation`] describes bad
//! input. Those are recorded as the final, error-severity step of a session
//! and never escape to the host. The internal variant means the engine or the
//! catalog is broken and aborts session construction.

use crate::messages::Message;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Unrecognized character, misplaced `,`, or operands left over after
    /// full reduction (`position` is `None` for the latter)
    #[error("invalid syntax{}", offset_suffix(.position))]
    InvalidSyntax { position: Option<usize> },

    /// `)` without a matching `(`, or `(` still open at end of input
    #[error("mismatched parentheses")]
    MismatchedParentheses,

    /// Unary operator reduced with an empty output stack
    #[error("no operand for unary operator '{symbol}'")]
    MissingUnaryOperand { symbol: &'static str },

    /// Binary operator reduced with an empty output stack
    #[error("no operands for binary operator '{symbol}'")]
    MissingBinaryOperands { symbol: &'static str },

    /// Binary operator with a single operand outside the `+`/`-` prefix case
    #[error("operator '{symbol}' is not valid as unary")]
    NotValidAsUnary { symbol: &'static str },

    /// A grouping symbol's callback was invoked, or an operator was applied to
    /// the wrong number of operands
    #[error("BUG: evaluated '{symbol}' outside its contract")]
    InternalInvariantViolation { symbol: &'static str },
}

impl EvalError {
    /// Whether this error signals an engine bug rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, EvalError::InternalInvariantViolation { .. })
    }

    /// The localizable status line describing this error
    pub fn message(&self) -> Message {
        match self {
            EvalError::InvalidSyntax { .. } => Message::InvalidSyntax,
            EvalError::MismatchedParentheses => Message::MismatchedParentheses,
            EvalError::MissingUnaryOperand { symbol } => {
                Message::ExpectedOperandForUnary { symbol: *symbol }
            }
            EvalError::MissingBinaryOperands { symbol } => {
                Message::ExpectedOperandForBinary { symbol: *symbol }
            }
            EvalError::NotValidAsUnary { symbol } => Message::NotValidAsUnary { symbol: *symbol },
            EvalError::InternalInvariantViolation { symbol } => Message::InternalError { symbol: *symbol },
        }
    }
}

fn offset_suffix(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" at offset {p}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            EvalError::InvalidSyntax { position: Some(3) }.to_string(),
            "invalid syntax at offset 3"
        );
        assert_eq!(
            EvalError::InvalidSyntax { position: None }.to_string(),
            "invalid syntax"
        );
        assert_eq!(
            EvalError::NotValidAsUnary { symbol: "*" }.to_string(),
            "operator '*' is not valid as unary"
        );
    }

    #[test]
    fn test_only_invariant_violation_is_internal() {
        assert!(EvalError::InternalInvariantViolation { symbol: "(" }.is_internal());
        assert!(!EvalError::MismatchedParentheses.is_internal());
        assert!(!EvalError::MissingUnaryOperand { symbol: "!" }.is_internal());
    }

    #[test]
    fn test_message_mapping() {
        assert_eq!(
            EvalError::MissingBinaryOperands { symbol: "log" }.message(),
            Message::ExpectedOperandForBinary { symbol: "log" }
        );
        assert_eq!(
            EvalError::MismatchedParentheses.message(),
            Message::MismatchedParentheses
        );
    }
}
