//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]** — application state, keyboard event loop, auto-play timer, expression input mode
//! - **[`view`]** — the [`Renderer`](crate::session::Renderer) a session draws into between frames
//! - **[`panes`]** — stateless render functions for each visible pane (input, stacks,
//!   narration, operators, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an optional expression and
//! call [`App::run`] to start the event loop.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;
pub mod view;

pub use app::App;
