//! Stream detail popup

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::catalog::StreamEntry;

pub fn render_detail_popup(frame: &mut Frame, area: Rect, entry: &StreamEntry) {
    let popup = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(vec![
            Span::styled("Streamer: ", Style::default().fg(Color::DarkGray)),
            Span::styled(entry.streamer.clone(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("Visibility: ", Style::default().fg(Color::DarkGray)),
            Span::raw(entry.visibility.name()),
        ]),
        Line::from(vec![
            Span::styled("Viewers: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                entry.viewers.to_string(),
                Style::default().fg(Color::Red),
            ),
        ]),
        Line::from(vec![
            Span::styled("Tags: ", Style::default().fg(Color::DarkGray)),
            Span::raw(entry.tags.join(", ")),
        ]),
        Line::default(),
        Line::from(Span::raw(entry.description.clone())),
        Line::default(),
        Line::from(Span::styled(
            "Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let detail = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(Span::styled(
                format!(" {} ", entry.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(detail, popup);
}
