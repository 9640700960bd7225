//! Renderer contract between a session and its host

use crate::engine::{EvaluationState, Highlights, Severity};

/// Everything a host needs to draw one applied step
#[derive(Debug, Clone, Copy)]
pub struct StepView<'a> {
    /// "Evaluating ..." line naming the expression
    pub heading: &'a str,
    pub state: &'a EvaluationState,
    pub highlights: &'a Highlights,
    pub status_lines: &'a [String],
    pub severity: Severity,
}

/// Whether the drawing surface could hold the whole step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Fits,
    /// Some content was cut off; the session raises a warning
    Overflow,
}

/// Draws applied steps. Called once per applied step.
pub trait Renderer {
    fn render(&mut self, view: &StepView<'_>) -> RenderOutcome;
}

/// Owned copy of a [`StepView`], for hosts that draw later than they are told
#[derive(Debug, Clone, Default)]
pub struct RenderedStep {
    pub heading: String,
    pub state: EvaluationState,
    pub highlights: Highlights,
    pub status_lines: Vec<String>,
    pub severity: Severity,
}

impl From<&StepView<'_>> for RenderedStep {
    fn from(view: &StepView<'_>) -> Self {
        RenderedStep {
            heading: view.heading.to_string(),
            state: view.state.clone(),
            highlights: view.highlights.clone(),
            status_lines: view.status_lines.to_vec(),
            severity: view.severity,
        }
    }
}

/// Keeps every rendered step; never overflows
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<RenderedStep>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&RenderedStep> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &StepView<'_>) -> RenderOutcome {
        self.frames.push(RenderedStep::from(view));
        RenderOutcome::Fits
    }
}
