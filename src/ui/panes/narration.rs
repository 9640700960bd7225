//! Heading and status lines for the applied step

use crate::engine::Severity;
use crate::messages::TextDirection;
use crate::session::RenderedStep;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by the heading and the blank line under it
const HEADING_ROWS: usize = 2;

/// Status lines that fit under the heading
pub fn status_capacity(area: Rect) -> usize {
    (area.height.saturating_sub(2) as usize).saturating_sub(HEADING_ROWS)
}

/// Render the narration pane. `step` is `None` before the first step.
pub fn render_narration_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    step: Option<&RenderedStep>,
    placeholder: &str,
    direction: TextDirection,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let alignment = match direction {
        TextDirection::LeftToRight => Alignment::Left,
        TextDirection::RightToLeft => Alignment::Right,
    };

    let Some(step) = step else {
        let paragraph = Paragraph::new(placeholder)
            .block(block)
            .alignment(alignment)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let status_color = match step.severity {
        Severity::Normal => DEFAULT_THEME.success,
        Severity::Error => DEFAULT_THEME.error,
    };

    let mut lines = vec![
        Line::styled(
            step.heading.as_str(),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
    ];
    lines.extend(
        step.status_lines
            .iter()
            .map(|text| Line::styled(text.as_str(), Style::default().fg(status_color))),
    );

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(alignment)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
