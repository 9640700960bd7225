//! TUI pane rendering modules
//!
//! Each pane is a stateless render function over data owned by the
//! [`App`](crate::ui::App).
//!
//! # Pane Modules
//!
//! - [`input`]: Expression input bar
//! - [`stacks`]: Operator and output stacks as boxed cells
//! - [`narration`]: Heading and status lines of the applied step
//! - [`operators`]: Catalog of supported operators
//! - [`status`]: Status bar with keybindings and playback state

pub mod input;
pub mod narration;
pub mod operators;
pub mod stacks;
pub mod status;

// Re-export render functions for convenience
pub use input::{render_input_bar, InputLabels};
pub use narration::{render_narration_pane, status_capacity};
pub use operators::render_operators_pane;
pub use stacks::{cell_capacity, operator_cells, output_cells, render_stack_pane};
pub use status::{render_status_bar, StatusRenderData};
