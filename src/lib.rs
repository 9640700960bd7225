//! # Introduction
//!
//! yardstep evaluates arithmetic expressions with the shunting-yard
//! algorithm, recording the operator stack and output stack after every
//! action.  The recorded steps are then replayed forward and backward,
//! with narration, through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui) or as plain text.
//!
//! ## Evaluation pipeline
//!
//! ```text
//! Expression → Scanner → Evaluator → Steps → Session → Renderer
//! ```
//!
//! 1. [`registry`] — the fixed operator table and longest-prefix lookup.
//! 2. [`scanner`] — splits the expression into numbers and operators.
//! 3. [`engine`] — runs the two-stack evaluation eagerly and records a
//!    [`engine::Step`] per action, ending in a result or an error.
//! 4. [`session`] — a cursor over the recorded steps with pause, step
//!    forward and step back, drawing through a [`session::Renderer`].
//! 5. [`messages`] — turns step descriptions into English or Arabic text.
//! 6. [`ui`] and [`plain`] — the two shipped renderers; [`ui`] is not part of
//!    the stable library API.
//!
//! ## Supported syntax
//!
//! Numbers: decimal literals such as `3`, `.5`, `2.75`.
//! Binary: `+ - * / ^ %`.  Unary: `! sqrt ln`.  Two-argument: `log(base, x)`.
//! Constants: `PI`, `e`.  Grouping: `( )`.  Names match case-insensitively.

pub mod config;
pub mod engine;
pub mod messages;
pub mod plain;
pub mod registry;
pub mod scanner;
pub mod session;
pub mod ui;
