//! Expression input bar

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Labels of the expression bar
pub struct InputLabels<'a> {
    pub title: &'a str,
    /// Shown when there is no expression
    pub hint: &'a str,
}

/// Render the expression bar; shows a cursor block while editing
pub fn render_input_bar(
    frame: &mut Frame,
    area: Rect,
    text: &str,
    is_editing: bool,
    labels: InputLabels,
) {
    let border_style = if is_editing {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", labels.title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut spans = vec![Span::styled(text, Style::default().fg(DEFAULT_THEME.fg))];
    if is_editing {
        spans.push(Span::styled("█", Style::default().fg(DEFAULT_THEME.border_focused)));
    } else if text.is_empty() {
        spans.push(Span::styled(
            labels.hint,
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
