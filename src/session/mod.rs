//! Replay of a recorded evaluation
//!
//! A [`Session`] owns one expression's fixed step list and a cursor over it.
//! The host moves the cursor with [`Session::advance`] and
//! [`Session::retreat`], either on user input or from its own timer, and
//! supplies the [`MessageCatalog`] and [`Renderer`] on every call.
//!
//! A session is plain single-owner state. Hosts that share one across
//! threads must wrap it in a lock.
//!
//! # Stepping backward
//!
//! `retreat` does not invert the last step. It rewinds the cursor by two and
//! replays one step forward, which redraws the display as it was two steps
//! ago. From cursor `1` it resets to `0` without redrawing anything.

pub mod render;

pub use render::{RecordingRenderer, RenderOutcome, RenderedStep, Renderer, StepView};

use crate::engine::{self, EvalError, EvaluationState, Phase, Step};
use crate::messages::{Message, MessageCatalog};
use tracing::debug;

pub struct Session {
    expression: String,
    steps: Vec<Step>,
    /// Index of the next step to apply, in `0..=steps.len()`
    cursor: usize,
    paused: bool,
    /// Stacks of the most recently applied step
    display: EvaluationState,
    warning: Option<String>,
    phase: Phase,
    result: Option<f64>,
}

impl Session {
    /// Evaluate `expression` and prepare to replay it from the first step.
    ///
    /// Malformed input still yields a session whose last step carries the
    /// error. `Err` is reserved for [`EvalError::InternalInvariantViolation`].
    pub fn new(expression: impl Into<String>) -> Result<Self, EvalError> {
        let expression = expression.into();
        let trace = engine::evaluate(&expression)?;

        debug!(
            expression = expression.as_str(),
            steps = trace.steps.len(),
            "session created"
        );

        Ok(Session {
            expression,
            steps: trace.steps,
            cursor: 0,
            paused: false,
            display: EvaluationState::new(),
            warning: None,
            phase: trace.phase,
            result: trace.result,
        })
    }

    /// Apply the step under the cursor and move past it.
    ///
    /// Returns `false` without doing anything when paused or finished.
    pub fn advance<C, R>(&mut self, catalog: &C, renderer: &mut R) -> bool
    where
        C: MessageCatalog + ?Sized,
        R: Renderer + ?Sized,
    {
        if self.paused || self.is_finished() {
            return false;
        }

        self.apply(self.cursor, catalog, renderer);
        self.cursor += 1;
        debug!(cursor = self.cursor, total = self.steps.len(), "advanced");
        true
    }

    /// Rewind by two steps and replay one (see the module docs). Works
    /// whether or not the session is paused.
    pub fn retreat<C, R>(&mut self, catalog: &C, renderer: &mut R)
    where
        C: MessageCatalog + ?Sized,
        R: Renderer + ?Sized,
    {
        if self.cursor == 0 {
            return;
        }

        if self.cursor >= 2 {
            // Replays even while paused
            self.cursor -= 2;
            self.apply(self.cursor, catalog, renderer);
            self.cursor += 1;
        } else {
            self.cursor = 0;
        }
        debug!(cursor = self.cursor, "retreated");
    }

    /// Draw the most recently applied step again, e.g. after the language
    /// changed. Does not move the cursor.
    pub fn redraw<C, R>(&mut self, catalog: &C, renderer: &mut R) -> bool
    where
        C: MessageCatalog + ?Sized,
        R: Renderer + ?Sized,
    {
        match self.cursor.checked_sub(1) {
            Some(index) => {
                self.apply(index, catalog, renderer);
                true
            }
            None => false,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Stacks as of the last applied step
    pub fn display(&self) -> &EvaluationState {
        &self.display
    }

    /// Set when the renderer could not fit the last applied step
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// `Phase::Done` or `Phase::Failed`
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Final value of the expression, if it had one
    pub fn result(&self) -> Option<f64> {
        self.result
    }

    /// The error ending the step list, if evaluation failed
    pub fn error(&self) -> Option<&EvalError> {
        self.steps.last().and_then(Step::error)
    }

    fn apply<C, R>(&mut self, index: usize, catalog: &C, renderer: &mut R)
    where
        C: MessageCatalog + ?Sized,
        R: Renderer + ?Sized,
    {
        let step = &self.steps[index];
        self.display = step.state.clone();

        let heading = catalog.format(&Message::EvaluatingExpression {
            expression: self.expression.clone(),
        });
        let status_lines = step.status_lines(catalog);
        let view = StepView {
            heading: &heading,
            state: &self.display,
            highlights: &step.highlights,
            status_lines: &status_lines,
            severity: step.severity(),
        };

        self.warning = match renderer.render(&view) {
            RenderOutcome::Fits => None,
            RenderOutcome::Overflow => Some(catalog.format(&Message::CanvasHeightWarning)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Language;

    struct CrampedRenderer {
        max_lines: usize,
    }

    impl Renderer for CrampedRenderer {
        fn render(&mut self, view: &StepView<'_>) -> RenderOutcome {
            if view.status_lines.len() + view.state.output.len() > self.max_lines {
                RenderOutcome::Overflow
            } else {
                RenderOutcome::Fits
            }
        }
    }

    #[test]
    fn test_cursor_starts_at_zero() {
        let session = Session::new("1+2").unwrap();
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.len(), 6);
        assert!(!session.is_finished());
        assert!(!session.is_paused());
    }

    #[test]
    fn test_advance_respects_pause() {
        let mut session = Session::new("1+2").unwrap();
        let mut renderer = RecordingRenderer::new();

        session.pause();
        assert!(!session.advance(&Language::English, &mut renderer));
        assert_eq!(session.cursor(), 0);
        assert!(renderer.frames.is_empty());

        session.resume();
        assert!(session.advance(&Language::English, &mut renderer));
        assert_eq!(session.cursor(), 1);
        assert_eq!(renderer.frames.len(), 1);
    }

    #[test]
    fn test_advance_stops_at_end() {
        let mut session = Session::new("7").unwrap();
        let mut renderer = RecordingRenderer::new();
        assert!(session.advance(&Language::English, &mut renderer));
        assert!(session.advance(&Language::English, &mut renderer));
        assert!(session.is_finished());
        assert!(!session.advance(&Language::English, &mut renderer));
        assert_eq!(session.cursor(), 2);
    }

    #[test]
    fn test_retreat_from_one_resets_without_drawing() {
        let mut session = Session::new("1+2").unwrap();
        let mut renderer = RecordingRenderer::new();
        session.advance(&Language::English, &mut renderer);
        session.retreat(&Language::English, &mut renderer);
        assert_eq!(session.cursor(), 0);
        assert_eq!(renderer.frames.len(), 1);
    }

    #[test]
    fn test_retreat_at_zero_is_noop() {
        let mut session = Session::new("1+2").unwrap();
        let mut renderer = RecordingRenderer::new();
        session.retreat(&Language::English, &mut renderer);
        assert_eq!(session.cursor(), 0);
        assert!(renderer.frames.is_empty());
    }

    #[test]
    fn test_retreat_replays_two_back() {
        let mut session = Session::new("1+2").unwrap();
        let mut renderer = RecordingRenderer::new();
        for _ in 0..3 {
            session.advance(&Language::English, &mut renderer);
        }
        session.retreat(&Language::English, &mut renderer);
        assert_eq!(session.cursor(), 2);
        let last = renderer.last().unwrap();
        assert_eq!(last.status_lines, vec!["Pushing operator '+' to operations stack"]);
    }

    #[test]
    fn test_retreat_while_paused_redraws() {
        let mut session = Session::new("1+2").unwrap();
        let mut renderer = RecordingRenderer::new();
        for _ in 0..5 {
            session.advance(&Language::English, &mut renderer);
        }
        assert_eq!(session.display().output_values(), vec![3.0]);

        session.pause();
        session.retreat(&Language::English, &mut renderer);

        assert_eq!(session.cursor(), 4);
        assert!(session.is_paused());
        assert_eq!(renderer.frames.len(), 6);
        assert_eq!(session.display().output_values(), vec![1.0, 2.0]);
        assert_eq!(
            renderer.last().unwrap().status_lines,
            vec!["Evaluating operation '1 + 2'"]
        );
    }

    #[test]
    fn test_overflow_sets_and_clears_warning() {
        let mut session = Session::new("1+2").unwrap();
        let mut renderer = CrampedRenderer { max_lines: 2 };

        session.advance(&Language::English, &mut renderer);
        assert!(session.warning().is_none());

        // third step shows two operands plus one status line
        session.advance(&Language::English, &mut renderer);
        session.advance(&Language::English, &mut renderer);
        assert_eq!(
            session.warning(),
            Some("Terminal is not high enough to draw all data - enlarge the window")
        );

        // the pushed result leaves a single operand
        session.advance(&Language::English, &mut renderer);
        session.advance(&Language::English, &mut renderer);
        assert!(session.warning().is_none());
    }

    #[test]
    fn test_redraw_uses_new_catalog() {
        let mut session = Session::new("5").unwrap();
        let mut renderer = RecordingRenderer::new();
        assert!(!session.redraw(&Language::Arabic, &mut renderer));

        session.advance(&Language::English, &mut renderer);
        assert!(session.redraw(&Language::Arabic, &mut renderer));
        assert_eq!(session.cursor(), 1);
        assert!(renderer.last().unwrap().status_lines[0].starts_with("دفع المعامل"));
    }

    #[test]
    fn test_display_tracks_applied_step() {
        let mut session = Session::new("1+2").unwrap();
        let mut renderer = RecordingRenderer::new();
        assert!(session.display().is_empty());
        session.advance(&Language::English, &mut renderer);
        assert_eq!(session.display().output_values(), vec![1.0]);
    }
}
