use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::error::Severity;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Footer hint line from `(key, description)` pairs.
pub(crate) fn key_hints(hints: &[(&str, &str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (index, (key, description)) in hints.iter().enumerate() {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        let separator = if index + 1 == hints.len() { "" } else { "   " };
        spans.push(Span::raw(format!(" {description}{separator}")));
    }
    Line::from(spans)
}

pub(crate) fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::default().fg(Color::Green),
        Severity::Warning => Style::default().fg(Color::Yellow),
        Severity::Error => Style::default().fg(Color::Red),
    }
}
