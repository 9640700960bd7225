//! Operand and two-stack evaluation state

use crate::registry::Operator;

/// Position recorded for operands that were computed rather than scanned.
///
/// It compares greater than every real offset, so a computed operand always
/// counts as following an operator.
pub const SYNTHETIC_POSITION: usize = usize::MAX;

/// Where an operand came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandOrigin {
    /// A numeric literal at this byte offset
    Literal(usize),
    /// The result of reducing an operator
    Computed,
}

/// A value waiting on the output stack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operand {
    pub value: f64,
    pub origin: OperandOrigin,
}

impl Operand {
    pub fn literal(value: f64, position: usize) -> Self {
        Operand {
            value,
            origin: OperandOrigin::Literal(position),
        }
    }

    pub fn computed(value: f64) -> Self {
        Operand {
            value,
            origin: OperandOrigin::Computed,
        }
    }

    /// Source offset, or [`SYNTHETIC_POSITION`] for computed operands
    pub fn position(&self) -> usize {
        match self.origin {
            OperandOrigin::Literal(position) => position,
            OperandOrigin::Computed => SYNTHETIC_POSITION,
        }
    }

    /// Whether this operand appears after the given source offset
    pub fn follows(&self, position: usize) -> bool {
        self.position() > position
    }
}

/// Both stacks at one instant.
///
/// Steps own their own copy; mutating the evaluator's live state never
/// reaches a recorded step.
#[derive(Debug, Clone, Default)]
pub struct EvaluationState {
    /// Pending operators and open parentheses, bottom first
    pub operators: Vec<Operator>,
    /// Operands awaiting combination, bottom first
    pub output: Vec<Operand>,
}

impl EvaluationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty() && self.output.is_empty()
    }

    /// Index of the top operator slot, if any
    pub fn top_operator_index(&self) -> Option<usize> {
        self.operators.len().checked_sub(1)
    }

    /// Index of the top output slot, if any
    pub fn top_output_index(&self) -> Option<usize> {
        self.output.len().checked_sub(1)
    }

    /// Symbols on the operator stack, bottom first
    pub fn operator_symbols(&self) -> Vec<&'static str> {
        self.operators.iter().map(|op| op.symbol).collect()
    }

    /// Values on the output stack, bottom first
    pub fn output_values(&self) -> Vec<f64> {
        self.output.iter().map(|operand| operand.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn test_computed_operand_follows_everything() {
        let computed = Operand::computed(4.0);
        assert_eq!(computed.position(), SYNTHETIC_POSITION);
        assert!(computed.follows(0));
        assert!(computed.follows(1_000_000));
    }

    #[test]
    fn test_literal_follows_only_earlier_offsets() {
        let literal = Operand::literal(5.0, 3);
        assert!(literal.follows(2));
        assert!(!literal.follows(3));
        assert!(!literal.follows(4));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut live = EvaluationState::new();
        live.output.push(Operand::literal(1.0, 0));
        let snapshot = live.clone();

        live.output.pop();
        live.operators.push(registry::lookup("+").unwrap());

        assert_eq!(snapshot.output_values(), vec![1.0]);
        assert!(snapshot.operators.is_empty());
        assert_eq!(live.operator_symbols(), vec!["+"]);
    }

    #[test]
    fn test_top_indices() {
        let mut state = EvaluationState::new();
        assert!(state.is_empty());
        assert_eq!(state.top_operator_index(), None);
        state.output.push(Operand::computed(1.0));
        state.output.push(Operand::computed(2.0));
        assert_eq!(state.top_output_index(), Some(1));
    }
}
