//! Operator and output stack panes
//!
//! Each stack is drawn as a row of boxed cells, bottom of the stack on the
//! left, with the slot index under every box. Rows wrap when the pane is
//! too narrow. Highlighted slots get an error-coloured border.

use crate::messages::format_cell;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rustc_hash::FxHashSet;

/// Characters inside a cell's borders
const CELL_TEXT_WIDTH: usize = 7;
/// Full cell width plus the gap after it
const CELL_STRIDE: usize = CELL_TEXT_WIDTH + 3;
/// Border, text, border, index
const CELL_HEIGHT: usize = 4;

/// How many cells fit in a pane of this size
pub fn cell_capacity(area: Rect) -> usize {
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    let per_row = (inner_width + 1) / CELL_STRIDE;
    per_row * (inner_height / CELL_HEIGHT)
}

/// Render one stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    cells: &[String],
    highlighted: &FxHashSet<usize>,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    if cells.is_empty() {
        let paragraph = Paragraph::new("(empty)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let per_row = ((inner_width + 1) / CELL_STRIDE).max(1);

    let mut lines = Vec::new();
    for (row, chunk) in cells.chunks(per_row).enumerate() {
        let mut top = Vec::new();
        let mut middle = Vec::new();
        let mut bottom = Vec::new();
        let mut index = Vec::new();

        for (col, text) in chunk.iter().enumerate() {
            let slot = row * per_row + col;
            let border = if highlighted.contains(&slot) {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            let rule = "─".repeat(CELL_TEXT_WIDTH);

            top.push(Span::styled(format!("┌{rule}┐ "), border));
            middle.push(Span::styled("│", border));
            middle.push(Span::styled(
                format!("{:^width$}", fit(text), width = CELL_TEXT_WIDTH),
                Style::default().fg(DEFAULT_THEME.number),
            ));
            middle.push(Span::styled("│ ", border));
            bottom.push(Span::styled(format!("└{rule}┘ "), border));
            index.push(Span::styled(
                format!("{:^width$} ", slot, width = CELL_TEXT_WIDTH + 2),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }

        lines.push(Line::from(top));
        lines.push(Line::from(middle));
        lines.push(Line::from(bottom));
        lines.push(Line::from(index));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Operator symbols as cell text
pub fn operator_cells(symbols: &[&str]) -> Vec<String> {
    symbols.iter().map(|s| s.to_string()).collect()
}

/// Operand values as cell text
pub fn output_cells(values: &[f64]) -> Vec<String> {
    values.iter().map(|v| format_cell(*v)).collect()
}

/// Truncate to the cell width, marking the cut
fn fit(text: &str) -> String {
    if text.chars().count() <= CELL_TEXT_WIDTH {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(CELL_TEXT_WIDTH - 1).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_capacity() {
        // 2 border columns, 3 cells of stride 10 need 29 columns
        assert_eq!(cell_capacity(Rect::new(0, 0, 31, 6)), 3);
        assert_eq!(cell_capacity(Rect::new(0, 0, 31, 10)), 6);
        assert_eq!(cell_capacity(Rect::new(0, 0, 31, 5)), 0);
    }

    #[test]
    fn test_fit_truncates() {
        assert_eq!(fit("3.14"), "3.14");
        assert_eq!(fit("1,234,567.89"), "1,234,…");
    }
}
