//! Recorded evaluation steps

use super::errors::EvalError;
use super::state::EvaluationState;
use crate::messages::{Message, MessageCatalog};
use rustc_hash::FxHashSet;

/// How a step's status lines should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Normal,
    Error,
}

/// Stack slots a step draws attention to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Highlights {
    pub operators: FxHashSet<usize>,
    pub output: FxHashSet<usize>,
}

impl Highlights {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn operator(index: usize) -> Self {
        Self::none().with_operator(index)
    }

    pub fn output(index: usize) -> Self {
        Self::none().with_output(index)
    }

    pub fn with_operator(mut self, index: usize) -> Self {
        self.operators.insert(index);
        self
    }

    pub fn with_output(mut self, index: usize) -> Self {
        self.output.insert(index);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty() && self.output.is_empty()
    }
}

/// What a step did, in terms the narration can describe
#[derive(Debug, Clone, PartialEq)]
pub enum StepEffect {
    PushOperand {
        value: f64,
    },
    PushOperator {
        symbol: &'static str,
        arity: usize,
    },
    EvaluateConstant {
        symbol: &'static str,
    },
    EvaluateUnary {
        symbol: &'static str,
        operand: f64,
    },
    EvaluateBinary {
        symbol: &'static str,
        lhs: f64,
        rhs: f64,
    },
    PushResult {
        value: f64,
    },
    DiscardLeftParenthesis,
    ArgumentSeparator,
    /// The expression reduced to a single value
    Finished {
        value: f64,
    },
    /// Evaluation stopped; always the last step
    Failed(EvalError),
}

impl StepEffect {
    pub fn messages(&self) -> Vec<Message> {
        let message = match self {
            StepEffect::PushOperand { value } => Message::PushingOperand { value: *value },
            StepEffect::PushOperator { symbol, arity } => Message::PushingOperator {
                symbol: *symbol,
                arity: *arity,
            },
            StepEffect::EvaluateConstant { symbol } => Message::EvaluatingConstant { symbol: *symbol },
            StepEffect::EvaluateUnary { symbol, operand } => Message::EvaluatingUnaryOperation {
                symbol: *symbol,
                operand: *operand,
            },
            StepEffect::EvaluateBinary { symbol, lhs, rhs } => Message::EvaluatingOperation {
                symbol: *symbol,
                lhs: *lhs,
                rhs: *rhs,
            },
            StepEffect::PushResult { value } => Message::PushingOperationResult { value: *value },
            StepEffect::DiscardLeftParenthesis => Message::DiscardLeftParenthesis,
            StepEffect::ArgumentSeparator => Message::ArgumentSeparator,
            StepEffect::Finished { value } => Message::ExpressionResult { value: *value },
            StepEffect::Failed(err) => err.message(),
        };
        vec![message]
    }

    pub fn severity(&self) -> Severity {
        match self {
            StepEffect::Failed(_) => Severity::Error,
            _ => Severity::Normal,
        }
    }
}

/// One replayable unit of evaluation progress
#[derive(Debug, Clone)]
pub struct Step {
    /// Stacks as they are displayed for this step
    pub state: EvaluationState,
    pub effect: StepEffect,
    pub highlights: Highlights,
}

impl Step {
    pub fn new(state: EvaluationState, effect: StepEffect, highlights: Highlights) -> Self {
        Step {
            state,
            effect,
            highlights,
        }
    }

    pub fn severity(&self) -> Severity {
        self.effect.severity()
    }

    /// Narration for this step in the catalog's language
    pub fn status_lines<C: MessageCatalog + ?Sized>(&self, catalog: &C) -> Vec<String> {
        self.effect
            .messages()
            .iter()
            .map(|message| catalog.format(message))
            .collect()
    }

    pub fn error(&self) -> Option<&EvalError> {
        match &self.effect {
            StepEffect::Failed(err) => Some(err),
            _ => None,
        }
    }
}
