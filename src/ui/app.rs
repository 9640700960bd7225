//! Main TUI application state and logic

use crate::config::{clamp_speed, SPEED_STEP_MS};
use crate::messages::{Language, Message, MessageCatalog};
use crate::session::Session;
use crate::ui::panes::{
    self, cell_capacity, operator_cells, output_cells, status_capacity, InputLabels,
    StatusRenderData,
};
use crate::ui::view::TerminalRenderer;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Width of the supported-operations column
const OPERATORS_PANE_WIDTH: u16 = 24;

/// Whether keys edit the expression or drive playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Forward,
    Backward,
}

/// Pane areas of one frame
struct PaneLayout {
    input: Rect,
    operations: Rect,
    output: Rect,
    narration: Rect,
    operators: Rect,
    status: Rect,
}

impl PaneLayout {
    fn split(size: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(OPERATORS_PANE_WIDTH)])
            .split(rows[1]);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(35),
                Constraint::Min(0),
            ])
            .split(columns[0]);

        PaneLayout {
            input: rows[0],
            operations: left_rows[0],
            output: left_rows[1],
            narration: left_rows[2],
            operators: columns[1],
            status: rows[2],
        }
    }
}

/// The main application state
pub struct App {
    /// Replay of the current expression, if one was entered
    pub session: Option<Session>,

    /// Catalog used for narration
    pub language: Language,

    /// Latest applied step, waiting to be drawn
    pub view: TerminalRenderer,

    /// Expression being typed
    pub input: String,

    pub input_mode: InputMode,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display, formatted in the current language
    pub status: Message,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Auto-play interval
    pub speed: Duration,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create the app; a given expression starts playing immediately
    pub fn new(expression: Option<String>, language: Language, speed: Duration) -> Self {
        let mut app = App {
            session: None,
            language,
            view: TerminalRenderer::new(),
            input: String::new(),
            input_mode: InputMode::Normal,
            should_quit: false,
            status: Message::Ready,
            is_playing: false,
            speed,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        };

        match expression {
            Some(expression) => {
                app.input = expression.clone();
                app.start_session(expression);
            }
            None => {
                app.input_mode = InputMode::Editing;
                app.status = Message::EnterExpression;
            }
        }

        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= self.speed {
                self.tick();
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// One auto-play step
    pub fn tick(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.is_playing = false;
            return;
        };

        if session.advance(&self.language, &mut self.view) {
            self.status = Message::Playing;
        }

        if session.is_finished() {
            self.is_playing = false;
            self.status = Message::PlaybackComplete;
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let layout = PaneLayout::split(frame.area());

        // Steps applied from now on are judged against this frame's panes
        let cells = cell_capacity(layout.operations).min(cell_capacity(layout.output));
        self.view.set_capacity(status_capacity(layout.narration), cells);

        let language = self.language;
        let label = |message: Message| language.format(&message);

        let is_editing = self.input_mode == InputMode::Editing;
        panes::render_input_bar(
            frame,
            layout.input,
            &self.input,
            is_editing,
            InputLabels {
                title: &label(Message::ExpressionInputLabel),
                hint: &label(Message::EnterExpressionHint),
            },
        );

        let empty = FxHashSet::default();
        let (operations, output, operator_marks, output_marks) = match &self.view.current {
            Some(step) => (
                operator_cells(&step.state.operator_symbols()),
                output_cells(&step.state.output_values()),
                &step.highlights.operators,
                &step.highlights.output,
            ),
            None => (Vec::new(), Vec::new(), &empty, &empty),
        };

        panes::render_stack_pane(
            frame,
            layout.operations,
            &label(Message::OperationsLabel),
            &operations,
            operator_marks,
        );
        panes::render_stack_pane(
            frame,
            layout.output,
            &label(Message::OutputLabel),
            &output,
            output_marks,
        );

        let placeholder = match &self.session {
            Some(session) => self.language.format(&Message::EvaluatingExpression {
                expression: session.expression().to_string(),
            }),
            None => label(Message::EnterExpressionHint),
        };
        panes::render_narration_pane(
            frame,
            layout.narration,
            &label(Message::NarrationLabel),
            self.view.current.as_ref(),
            &placeholder,
            self.language.direction(),
        );

        panes::render_operators_pane(
            frame,
            layout.operators,
            &label(Message::SupportedOperations),
        );

        let (current_step, total_steps, is_error, warning) = match &self.session {
            Some(session) => (
                session.cursor(),
                session.len(),
                session.is_finished() && session.error().is_some(),
                session.warning(),
            ),
            None => (0, 0, false, None),
        };

        let status = label(self.status.clone());
        panes::render_status_bar(
            frame,
            layout.status,
            StatusRenderData {
                message: &status,
                warning,
                current_step,
                total_steps,
                is_error,
                is_playing: self.is_playing,
                is_editing,
                speed: self.speed,
                language: self.language.name(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let expression = self.input.trim().to_string();
                if expression.is_empty() {
                    self.status = Message::NothingToEvaluate;
                } else {
                    self.start_session(expression);
                }
            }
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                // Restore the expression being replayed
                self.input = self
                    .session
                    .as_ref()
                    .map(|s| s.expression().to_string())
                    .unwrap_or_default();
                self.status = Message::EditCancelled;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
            }
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.step(StepDirection::Forward);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.step(StepDirection::Backward);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Char('p') => {
                if let Some(expression) = self.session.as_ref().map(|s| s.expression().to_string())
                {
                    self.start_session(expression);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.change_speed(-(SPEED_STEP_MS as i64));
            }
            KeyCode::Char('-') => {
                self.change_speed(SPEED_STEP_MS as i64);
            }
            KeyCode::Char('e') => {
                self.is_playing = false;
                if let Some(session) = self.session.as_mut() {
                    session.pause();
                }
                self.input_mode = InputMode::Editing;
                self.status = Message::EditingExpression;
            }
            KeyCode::Char('g') => {
                self.toggle_language();
            }
            _ => {}
        }
    }

    /// Step once in `direction`, even while auto-play is paused.
    ///
    /// The session's paused flag is lifted for this step only.
    pub fn step(&mut self, direction: StepDirection) {
        let Some(session) = self.session.as_mut() else {
            self.status = Message::NoExpression;
            return;
        };

        let was_paused = session.is_paused();
        session.resume();
        match direction {
            StepDirection::Forward => {
                if session.advance(&self.language, &mut self.view) {
                    self.status = Message::SteppedForward;
                } else {
                    self.status = Message::AtLastStep;
                }
            }
            StepDirection::Backward => {
                if session.cursor() == 0 {
                    self.status = Message::AtFirstStep;
                } else {
                    session.retreat(&self.language, &mut self.view);
                    if session.cursor() == 0 {
                        self.view.clear();
                    }
                    self.status = Message::SteppedBackward;
                }
            }
        }
        session.set_paused(was_paused);
        debug!(?direction, cursor = session.cursor(), "manual step");
    }

    fn toggle_play(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.status = Message::NoExpression;
            return;
        };

        if self.is_playing {
            self.is_playing = false;
            session.pause();
            self.status = Message::Paused;
        } else if session.is_finished() {
            self.status = Message::ReplayHint;
        } else {
            self.is_playing = true;
            session.resume();
            self.last_play_time = Instant::now()
                .checked_sub(self.speed)
                .unwrap_or(Instant::now());
            self.status = Message::Playing;
        }
    }

    /// Evaluate `expression` and start playing it from the first step
    pub fn start_session(&mut self, expression: String) {
        self.view.clear();
        match Session::new(expression) {
            Ok(session) => {
                self.input = session.expression().to_string();
                self.session = Some(session);
                self.is_playing = true;
                self.last_play_time = Instant::now()
                    .checked_sub(self.speed)
                    .unwrap_or(Instant::now());
                self.status = Message::Playing;
            }
            Err(e) => {
                error!(error = %e, "evaluation aborted");
                self.session = None;
                self.is_playing = false;
                self.status = e.message();
            }
        }
    }

    /// Adjust the auto-play interval by `delta_ms`
    fn change_speed(&mut self, delta_ms: i64) {
        let current = self.speed.as_millis() as i64;
        let next = clamp_speed((current + delta_ms).max(0) as u64);
        self.speed = Duration::from_millis(next);
        self.status = Message::SpeedChanged { millis: next };
    }

    /// Switch catalogs and redraw the applied step in the new language
    fn toggle_language(&mut self) {
        self.language = self.language.toggled();
        if let Some(session) = self.session.as_mut() {
            session.redraw(&self.language, &mut self.view);
        }
        self.status = Message::LanguageChanged {
            name: self.language.name(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app_for(expression: &str) -> App {
        App::new(
            Some(expression.to_string()),
            Language::English,
            Duration::from_millis(1000),
        )
    }

    #[test]
    fn test_new_with_expression_starts_playing() {
        let app = app_for("2+3");
        assert!(app.is_playing);
        assert_eq!(app.input, "2+3");
        assert_eq!(app.session.as_ref().map(Session::cursor), Some(0));
    }

    #[test]
    fn test_new_without_expression_prompts() {
        let app = App::new(None, Language::English, Duration::from_millis(1000));
        assert!(app.session.is_none());
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[test]
    fn test_tick_plays_to_completion() {
        let mut app = app_for("2+3");
        let total = app.session.as_ref().map(Session::len).unwrap_or(0);
        for _ in 0..total {
            app.tick();
        }
        let session = app.session.as_ref().unwrap();
        assert!(session.is_finished());
        assert!(!app.is_playing);
        assert_eq!(app.status, Message::PlaybackComplete);
    }

    #[test]
    fn test_step_while_paused_keeps_paused() {
        let mut app = app_for("2+3");
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.is_playing);
        assert!(app.session.as_ref().unwrap().is_paused());

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('l'));
        let session = app.session.as_ref().unwrap();
        assert_eq!(session.cursor(), 2);
        assert!(session.is_paused());
    }

    #[test]
    fn test_step_back_to_start_clears_view() {
        let mut app = app_for("2+3");
        press(&mut app, KeyCode::Right);
        assert!(app.view.current.is_some());

        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.as_ref().unwrap().cursor(), 0);
        assert!(app.view.current.is_none());
    }

    #[test]
    fn test_edit_and_submit() {
        let mut app = app_for("1");
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.input_mode, InputMode::Editing);

        press(&mut app, KeyCode::Backspace);
        for c in "4*5".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.session.as_ref().unwrap().expression(), "4*5");
        assert_eq!(app.session.as_ref().unwrap().result(), Some(20.0));
    }

    #[test]
    fn test_escape_restores_expression() {
        let mut app = app_for("1+1");
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input, "1+1");
    }

    #[test]
    fn test_speed_keys_clamp() {
        let mut app = App::new(None, Language::English, Duration::from_millis(60));
        app.input_mode = InputMode::Normal;
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.speed, Duration::from_millis(50));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.speed, Duration::from_millis(100));
    }

    #[test]
    fn test_language_toggle_redraws_step() {
        let mut app = app_for("2+3");
        press(&mut app, KeyCode::Right);
        let english = app.view.current.clone().unwrap().status_lines;

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.language, Language::Arabic);
        let arabic = app.view.current.clone().unwrap().status_lines;
        assert_ne!(english, arabic);
        assert_eq!(app.session.as_ref().unwrap().cursor(), 1);
    }

    #[test]
    fn test_language_toggle_localizes_interface() {
        let mut app = app_for("2+3");
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.status, Message::Paused);

        press(&mut app, KeyCode::Char('g'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.status, Message::SteppedForward);
        assert_eq!(app.language.format(&app.status), "خطوة إلى الأمام");

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("مكدس المخرجات"));
        assert!(!screen.contains(" Output "));
    }

    #[test]
    fn test_restart_replays_from_beginning() {
        let mut app = app_for("2+3");
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.session.as_ref().unwrap().cursor(), 0);
        assert!(app.is_playing);
    }

    #[test]
    fn test_render_fits_test_backend() {
        let mut app = app_for("(1+2)*3");
        press(&mut app, KeyCode::Char(' '));
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        while app.session.as_ref().is_some_and(|s| !s.is_finished()) {
            press(&mut app, KeyCode::Right);
            terminal.draw(|f| app.render(f)).unwrap();
        }
        assert!(app.session.as_ref().unwrap().warning().is_none());
    }

    #[test]
    fn test_tiny_terminal_raises_warning() {
        let mut app = app_for("1+2+3+4+5+6");
        press(&mut app, KeyCode::Char(' '));
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        while app.session.as_ref().is_some_and(|s| !s.is_finished()) {
            press(&mut app, KeyCode::Right);
        }
        assert!(app.session.as_ref().unwrap().warning().is_some());
    }

    #[test]
    fn test_quit() {
        let mut app = app_for("1");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
