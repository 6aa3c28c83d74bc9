//! Filter bar
//!
//! Visibility selector plus one checkbox per vocabulary tag. The checkbox
//! cursor is moved with Left/Right and toggled with Space.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::filter::FilterController;

pub fn render_filter_bar(
    frame: &mut Frame,
    area: Rect,
    controller: &FilterController,
    cursor: usize,
    focused: bool,
) {
    let mut spans = vec![
        Span::styled("Visibility: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("[{}]", controller.state().visibility.name()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  Tags: "),
    ];

    if controller.checkboxes().is_empty() {
        spans.push(Span::styled(
            "(none)",
            Style::default().fg(Color::DarkGray),
        ));
    }

    for (i, row) in controller.checkboxes().iter().enumerate() {
        let mark = if row.checked { "[x] " } else { "[ ] " };
        let mut style = if row.checked {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        if focused && i == cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!("{}{}", mark, row.tag), style));
        spans.push(Span::raw("  "));
    }

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Filters (v: visibility, ←/→: move, space: toggle) "),
    );
    frame.render_widget(bar, area);
}
