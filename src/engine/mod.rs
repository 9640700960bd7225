//! Stepped evaluation engine
//!
//! This module runs the operator-precedence algorithm and records it:
//! - [`evaluator`]: the two-stack state machine and [`evaluate`]
//! - [`state`]: operands and the [`EvaluationState`] snapshot
//! - [`step`]: recorded [`Step`]s, their effects and highlights
//! - [`errors`]: the [`EvalError`] taxonomy
//!
//! # Execution Model
//!
//! Evaluation is eager. The whole expression is scanned and reduced up
//! front and every stack transition is stored as a [`Step`] holding its own
//! copy of both stacks. Replaying is then a walk over that fixed list (see
//! [`crate::session`]).

pub mod errors;
pub mod evaluator;
pub mod state;
pub mod step;

pub use errors::EvalError;
pub use evaluator::{evaluate, Evaluator, Phase, Trace};
pub use state::{EvaluationState, Operand, OperandOrigin, SYNTHETIC_POSITION};
pub use step::{Highlights, Severity, Step, StepEffect};
