//! Operator registry
//!
//! A static catalog of every symbol the evaluator understands: grouping
//! sentinels, binary and unary operators, functions and constants.
//!
//! # Precedence
//!
//! Lower numbers bind tighter. Grouping symbols and constants share the
//! sentinel precedence `0`.
//!
//! | Precedence | Symbols                                   |
//! |------------|-------------------------------------------|
//! | 0          | `(` `)` `,` `PI` `e`                      |
//! | 1          | `^` `%` `!` `sqrt` `ln` `log`             |
//! | 2          | `*` `/`                                   |
//! | 3          | `+` `-`                                   |
//!
//! # Lookup
//!
//! [`lookup`] matches case-insensitively and prefers the longest symbol, so
//! `log` wins over a hypothetical `l` and `PI` matches `pi`.

pub mod functions;

use crate::engine::errors::EvalError;
use std::fmt;

/// How an operator consumes operands when it is reduced off the stack
#[derive(Clone, Copy)]
pub enum OperatorKind {
    /// `(`: never evaluated, only matched by `)`
    LeftParen,
    /// `)`: never pushed, triggers reduction down to `(`
    RightParen,
    /// `,`: reduces down to `(` without discarding it
    Separator,
    /// Nullary constant such as `PI`
    Constant(fn() -> f64),
    /// Prefix function or postfix operator taking one operand
    Unary(fn(f64) -> f64),
    /// Infix operator or two-argument function
    Binary(fn(f64, f64) -> f64),
}

impl fmt::Debug for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatorKind::LeftParen => "LeftParen",
            OperatorKind::RightParen => "RightParen",
            OperatorKind::Separator => "Separator",
            OperatorKind::Constant(_) => "Constant",
            OperatorKind::Unary(_) => "Unary",
            OperatorKind::Binary(_) => "Binary",
        };
        f.write_str(name)
    }
}

/// A catalog entry, or one occurrence of it in an expression.
///
/// Catalog entries have `position == 0`; the scanner stamps each occurrence
/// with its byte offset via [`Operator::at`]. Copies are cheap, so every stack
/// slot owns its own position.
#[derive(Debug, Clone, Copy)]
pub struct Operator {
    pub symbol: &'static str,
    pub kind: OperatorKind,
    pub precedence: u8,
    pub position: usize,
}

impl Operator {
    pub const fn new(symbol: &'static str, kind: OperatorKind, precedence: u8) -> Self {
        Operator {
            symbol,
            kind,
            precedence,
            position: 0,
        }
    }

    /// This operator placed at a byte offset in the source text
    pub fn at(self, position: usize) -> Self {
        Operator { position, ..self }
    }

    /// Number of operands consumed on reduction (grouping symbols take none)
    pub fn arity(&self) -> usize {
        match self.kind {
            OperatorKind::Unary(_) => 1,
            OperatorKind::Binary(_) => 2,
            _ => 0,
        }
    }

    /// `(`, `)` or `,`
    pub fn is_grouping(&self) -> bool {
        matches!(
            self.kind,
            OperatorKind::LeftParen | OperatorKind::RightParen | OperatorKind::Separator
        )
    }

    pub fn is_left_paren(&self) -> bool {
        matches!(self.kind, OperatorKind::LeftParen)
    }

    /// Whether a lone following operand may stand in for both operands
    /// (`-5` is read as `0 - 5`)
    pub fn accepts_unary(&self) -> bool {
        matches!(self.symbol, "+" | "-")
    }

    /// Apply the operator's callback.
    ///
    /// Grouping symbols have no callback, and an operand count that does not
    /// match the arity is an engine bug: both report
    /// [`EvalError::InternalInvariantViolation`].
    pub fn evaluate(&self, operands: &[f64]) -> Result<f64, EvalError> {
        match (self.kind, operands) {
            (OperatorKind::Constant(f), []) => Ok(f()),
            (OperatorKind::Unary(f), [x]) => Ok(f(*x)),
            (OperatorKind::Binary(f), [lhs, rhs]) => Ok(f(*lhs, *rhs)),
            _ => Err(EvalError::InternalInvariantViolation {
                symbol: self.symbol,
            }),
        }
    }
}

/// Every known operator, in registration order (ties in [`lookup`] go to the
/// earlier entry)
pub static OPERATORS: [Operator; 15] = [
    Operator::new("(", OperatorKind::LeftParen, 0),
    Operator::new(")", OperatorKind::RightParen, 0),
    Operator::new(",", OperatorKind::Separator, 0),
    Operator::new("*", OperatorKind::Binary(functions::multiply), 2),
    Operator::new("/", OperatorKind::Binary(functions::divide), 2),
    Operator::new("+", OperatorKind::Binary(functions::add), 3),
    Operator::new("-", OperatorKind::Binary(functions::subtract), 3),
    Operator::new("^", OperatorKind::Binary(functions::power), 1),
    Operator::new("%", OperatorKind::Binary(functions::modulo), 1),
    Operator::new("!", OperatorKind::Unary(functions::factorial), 1),
    Operator::new("sqrt", OperatorKind::Unary(functions::sqrt), 1),
    Operator::new("ln", OperatorKind::Unary(functions::ln), 1),
    Operator::new("log", OperatorKind::Binary(functions::log_base), 1),
    Operator::new("PI", OperatorKind::Constant(functions::pi), 0),
    Operator::new("e", OperatorKind::Constant(functions::e), 0),
];

/// Find the longest catalog symbol that prefixes `text`, ignoring case
pub fn lookup(text: &str) -> Option<Operator> {
    let mut best: Option<Operator> = None;

    for candidate in OPERATORS.iter() {
        let matched = candidate
            .symbol
            .chars()
            .zip(text.chars())
            .take_while(|(s, t)| s.eq_ignore_ascii_case(t))
            .count();

        if matched < candidate.symbol.chars().count() {
            continue;
        }

        let longer = best.map_or(true, |b| matched > b.symbol.chars().count());
        if longer {
            best = Some(*candidate);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_single_char_operators() {
        for symbol in ["(", ")", ",", "*", "/", "+", "-", "^", "%", "!"] {
            let op = lookup(symbol).expect("operator should be registered");
            assert_eq!(op.symbol, symbol);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("PI").map(|op| op.symbol), Some("PI"));
        assert_eq!(lookup("pi").map(|op| op.symbol), Some("PI"));
        assert_eq!(lookup("Pi + 1").map(|op| op.symbol), Some("PI"));
        assert_eq!(lookup("SQRT(4)").map(|op| op.symbol), Some("sqrt"));
        assert_eq!(lookup("E").map(|op| op.symbol), Some("e"));
    }

    #[test]
    fn test_lookup_matches_prefix_only() {
        assert_eq!(lookup("log(2,8)").map(|op| op.symbol), Some("log"));
        assert_eq!(lookup("ln 5").map(|op| op.symbol), Some("ln"));
        assert!(lookup("lo").is_none());
        assert!(lookup("sqr").is_none());
        assert!(lookup("x").is_none());
        assert!(lookup("").is_none());
        assert!(lookup(" +").is_none());
    }

    #[test]
    fn test_arity_and_grouping() {
        let arities: Vec<(&str, usize)> = OPERATORS.iter().map(|op| (op.symbol, op.arity())).collect();
        assert!(arities.contains(&("(", 0)));
        assert!(arities.contains(&("!", 1)));
        assert!(arities.contains(&("sqrt", 1)));
        assert!(arities.contains(&("log", 2)));
        assert!(arities.contains(&("PI", 0)));

        let grouping: Vec<&str> = OPERATORS
            .iter()
            .filter(|op| op.is_grouping())
            .map(|op| op.symbol)
            .collect();
        assert_eq!(grouping, vec!["(", ")", ","]);
    }

    #[test]
    fn test_at_stamps_position_on_a_copy() {
        let plus = lookup("+").unwrap().at(7);
        assert_eq!(plus.position, 7);
        assert_eq!(lookup("+").unwrap().position, 0);
    }

    #[test]
    fn test_evaluate_grouping_is_an_invariant_violation() {
        let paren = lookup("(").unwrap();
        assert!(matches!(
            paren.evaluate(&[]),
            Err(EvalError::InternalInvariantViolation { symbol: "(" })
        ));
    }

    #[test]
    fn test_evaluate_checks_operand_count() {
        let plus = lookup("+").unwrap();
        assert_eq!(plus.evaluate(&[2.0, 3.0]).unwrap(), 5.0);
        assert!(plus.evaluate(&[2.0]).is_err());
    }
}
