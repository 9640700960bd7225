//! Renderer that stores the applied step for the next terminal draw

use crate::session::{RenderOutcome, RenderedStep, Renderer, StepView};

/// Holds the latest applied step until the event loop draws it.
///
/// Overflow is judged against the pane sizes seen on the previous draw,
/// updated through [`TerminalRenderer::set_capacity`].
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    pub current: Option<RenderedStep>,
    status_rows: usize,
    stack_cells: usize,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        TerminalRenderer {
            current: None,
            status_rows: usize::MAX,
            stack_cells: usize::MAX,
        }
    }

    /// Record how much the panes could show on the last draw
    pub fn set_capacity(&mut self, status_rows: usize, stack_cells: usize) {
        self.status_rows = status_rows;
        self.stack_cells = stack_cells;
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &StepView<'_>) -> RenderOutcome {
        let fits = view.status_lines.len() <= self.status_rows
            && view.state.operators.len() <= self.stack_cells
            && view.state.output.len() <= self.stack_cells;

        self.current = Some(RenderedStep::from(view));

        if fits {
            RenderOutcome::Fits
        } else {
            RenderOutcome::Overflow
        }
    }
}
