//! List of supported operators

use crate::registry::{Operator, OperatorKind, OPERATORS};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

fn kind_label(op: &Operator) -> &'static str {
    match op.kind {
        OperatorKind::LeftParen | OperatorKind::RightParen => "group",
        OperatorKind::Separator => "separator",
        OperatorKind::Constant(_) => "constant",
        OperatorKind::Unary(_) => "unary",
        OperatorKind::Binary(_) => "binary",
    }
}

pub fn render_operators_pane(frame: &mut Frame, area: Rect, title: &str) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let items: Vec<ListItem> = OPERATORS
        .iter()
        .map(|op| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<5}", op.symbol),
                    Style::default().fg(DEFAULT_THEME.operator),
                ),
                Span::styled(kind_label(op), Style::default().fg(DEFAULT_THEME.comment)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
