// Operator-precedence evaluation with step recording

use super::errors::EvalError;
use super::state::{EvaluationState, Operand};
use super::step::{Highlights, Step, StepEffect};
use crate::registry::{Operator, OperatorKind};
use crate::scanner::{Scanner, Token};
use tracing::{debug, warn};

/// Where the evaluator is in its pass over the expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading tokens
    Scanning,
    /// Reducing after `)` or `,` until the nearest `(`
    ReducingToParenthesis,
    /// End of input, reducing everything left
    Reducing,
    /// Finished without error (with or without a result)
    Done,
    /// Stopped at the first error
    Failed,
}

/// Outcome of a full evaluation pass
#[derive(Debug, Clone)]
pub struct Trace {
    pub steps: Vec<Step>,
    /// `Done` or `Failed`
    pub phase: Phase,
    /// Final value, `None` for empty input or on failure
    pub result: Option<f64>,
}

impl Trace {
    /// The error recorded as the final step, if evaluation failed
    pub fn error(&self) -> Option<&EvalError> {
        self.steps.last().and_then(Step::error)
    }
}

/// Evaluate `expression`, recording every stack transition.
///
/// Input errors end the trace with a [`StepEffect::Failed`] step. Only an
/// [`EvalError::InternalInvariantViolation`] is returned as `Err`.
pub fn evaluate(expression: &str) -> Result<Trace, EvalError> {
    Evaluator::new(expression).run()
}

/// Two-stack shunting-yard evaluator.
///
/// Operators with a numerically lower or equal precedence on the stack are
/// reduced before a new operator is pushed, so equal precedence associates
/// to the left (`2^3^2` is `(2^3)^2`).
pub struct Evaluator<'a> {
    expression: &'a str,
    live: EvaluationState,
    steps: Vec<Step>,
    phase: Phase,
}

impl<'a> Evaluator<'a> {
    pub fn new(expression: &'a str) -> Self {
        Evaluator {
            expression,
            live: EvaluationState::new(),
            steps: Vec::new(),
            phase: Phase::Scanning,
        }
    }

    /// Run to completion and hand back the recorded steps
    pub fn run(mut self) -> Result<Trace, EvalError> {
        let result = match self.drive() {
            Ok(result) => {
                self.phase = Phase::Done;
                result
            }
            Err(err) if err.is_internal() => return Err(err),
            Err(err) => {
                warn!(expression = self.expression, %err, "evaluation failed");
                self.phase = Phase::Failed;
                let state = self.live.clone();
                self.record(state, StepEffect::Failed(err), Highlights::none());
                None
            }
        };

        debug!(
            expression = self.expression,
            steps = self.steps.len(),
            ?result,
            "evaluation finished"
        );

        Ok(Trace {
            steps: self.steps,
            phase: self.phase,
            result,
        })
    }

    fn drive(&mut self) -> Result<Option<f64>, EvalError> {
        for token in Scanner::new(self.expression) {
            match token? {
                Token::Number { value, position } => self.push_operand(value, position),
                Token::Operator(op) => match op.kind {
                    OperatorKind::LeftParen => self.push_left_paren(op),
                    OperatorKind::RightParen => self.close_parenthesis()?,
                    OperatorKind::Separator => self.separate_arguments(op)?,
                    _ => self.push_operator(op)?,
                },
            }
        }

        self.phase = Phase::Reducing;
        while let Some(top) = self.live.operators.last() {
            if top.is_grouping() {
                return Err(EvalError::MismatchedParentheses);
            }
            self.reduce_top()?;
        }

        match self.live.output.as_slice() {
            [] => Ok(None),
            [only] => {
                let value = only.value;
                let state = self.live.clone();
                self.record(state, StepEffect::Finished { value }, Highlights::output(0));
                Ok(Some(value))
            }
            // Excess operands
            _ => Err(EvalError::InvalidSyntax { position: None }),
        }
    }

    fn push_operand(&mut self, value: f64, position: usize) {
        self.live.output.push(Operand::literal(value, position));
        let highlights = self.top_output_highlight();
        let state = self.live.clone();
        self.record(state, StepEffect::PushOperand { value }, highlights);
    }

    fn push_left_paren(&mut self, op: Operator) {
        self.live.operators.push(op);
        self.record_push(op);
    }

    fn push_operator(&mut self, op: Operator) -> Result<(), EvalError> {
        while let Some(top) = self.live.operators.last() {
            if top.is_left_paren() || top.precedence > op.precedence {
                break;
            }
            self.reduce_top()?;
        }

        self.live.operators.push(op);
        self.record_push(op);
        Ok(())
    }

    fn record_push(&mut self, op: Operator) {
        let highlights = self.top_operator_highlight();
        let state = self.live.clone();
        self.record(
            state,
            StepEffect::PushOperator {
                symbol: op.symbol,
                arity: op.arity(),
            },
            highlights,
        );
    }

    fn top_operator_highlight(&self) -> Highlights {
        self.live
            .top_operator_index()
            .map_or_else(Highlights::none, Highlights::operator)
    }

    fn top_output_highlight(&self) -> Highlights {
        self.live
            .top_output_index()
            .map_or_else(Highlights::none, Highlights::output)
    }

    /// Reduce until `(` is on top. Returns `false` if the stack ran out first.
    fn reduce_to_left_paren(&mut self) -> Result<bool, EvalError> {
        self.phase = Phase::ReducingToParenthesis;
        loop {
            match self.live.operators.last() {
                None => return Ok(false),
                Some(top) if top.is_left_paren() => break,
                Some(_) => self.reduce_top()?,
            }
        }
        self.phase = Phase::Scanning;
        Ok(true)
    }

    fn close_parenthesis(&mut self) -> Result<(), EvalError> {
        if !self.reduce_to_left_paren()? {
            return Err(EvalError::MismatchedParentheses);
        }

        let highlights = self.top_operator_highlight();
        let state = self.live.clone();
        self.record(state, StepEffect::DiscardLeftParenthesis, highlights);
        self.live.operators.pop();
        Ok(())
    }

    fn separate_arguments(&mut self, separator: Operator) -> Result<(), EvalError> {
        if !self.reduce_to_left_paren()? {
            return Err(EvalError::InvalidSyntax {
                position: Some(separator.position),
            });
        }

        let highlights = self.top_operator_highlight();
        let state = self.live.clone();
        self.record(state, StepEffect::ArgumentSeparator, highlights);
        Ok(())
    }

    /// Pop the top operator, combine it with its operands and push the result.
    fn reduce_top(&mut self) -> Result<(), EvalError> {
        let before = self.live.clone();
        let Some(operator) = self.live.operators.pop() else {
            return Ok(());
        };
        let op_index = before.operators.len() - 1;

        let value = match operator.kind {
            OperatorKind::Constant(_) => {
                self.record(
                    before,
                    StepEffect::EvaluateConstant {
                        symbol: operator.symbol,
                    },
                    Highlights::operator(op_index),
                );
                operator.evaluate(&[])?
            }
            OperatorKind::Unary(_) => {
                let Some(operand) = self.live.output.pop() else {
                    return Err(EvalError::MissingUnaryOperand {
                        symbol: operator.symbol,
                    });
                };
                let out_index = before.output.len() - 1;
                self.record(
                    before,
                    StepEffect::EvaluateUnary {
                        symbol: operator.symbol,
                        operand: operand.value,
                    },
                    Highlights::operator(op_index).with_output(out_index),
                );
                operator.evaluate(&[operand.value])?
            }
            OperatorKind::Binary(_) => {
                let available = self.live.output.len();
                if available == 0 {
                    return Err(EvalError::MissingBinaryOperands {
                        symbol: operator.symbol,
                    });
                }
                // A lone operand after `+`/`-` stands for `0 op operand`
                let prefix_sign = operator.accepts_unary()
                    && self.live.output[available - 1].follows(operator.position);
                if available < 2 && !prefix_sign {
                    return Err(EvalError::NotValidAsUnary {
                        symbol: operator.symbol,
                    });
                }

                let rhs = self.live.output.pop().map_or(0.0, |o| o.value);
                let lhs = self.live.output.pop().map_or(0.0, |o| o.value);

                let mut highlights = Highlights::operator(op_index).with_output(available - 1);
                if available >= 2 {
                    highlights = highlights.with_output(available - 2);
                }
                self.record(
                    before,
                    StepEffect::EvaluateBinary {
                        symbol: operator.symbol,
                        lhs,
                        rhs,
                    },
                    highlights,
                );
                operator.evaluate(&[lhs, rhs])?
            }
            OperatorKind::LeftParen | OperatorKind::RightParen | OperatorKind::Separator => {
                operator.evaluate(&[])?
            }
        };

        self.live.output.push(Operand::computed(value));
        let highlights = self.top_output_highlight();
        let state = self.live.clone();
        self.record(state, StepEffect::PushResult { value }, highlights);
        Ok(())
    }

    fn record(&mut self, state: EvaluationState, effect: StepEffect, highlights: Highlights) {
        debug!(step = self.steps.len(), phase = ?self.phase, ?effect, "recorded step");
        self.steps.push(Step::new(state, effect, highlights));
    }
}
