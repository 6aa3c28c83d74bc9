//! Add-stream form screen

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::form::{AddStreamForm, FormField};

fn field_line(form: &AddStreamForm, field: FormField, value: &str) -> Vec<Line<'static>> {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let caret = if focused { "_" } else { "" };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{:<12}", field.label()), label_style),
        Span::raw(format!("{}{}", value, caret)),
    ])];
    if let Some(message) = form.error_for(field) {
        lines.push(Line::from(Span::styled(
            format!("            {}", message),
            Style::default().fg(Color::Red),
        )));
    }
    lines
}

pub fn render_form(frame: &mut Frame, area: Rect, form: &AddStreamForm) {
    let popup = centered_rect(70, 60, area);
    frame.render_widget(Clear, popup);

    let mut lines = Vec::new();
    lines.extend(field_line(form, FormField::Title, &form.title));
    lines.extend(field_line(form, FormField::Streamer, &form.streamer));
    lines.extend(field_line(form, FormField::Description, &form.description));
    lines.extend(field_line(form, FormField::Tags, &form.tags));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Visibility  ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("[{}]", form.visibility.name()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled("  (ctrl-v to flip)", Style::default().fg(Color::DarkGray)),
    ]));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Tab: next field   Enter: submit   Esc: cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let screen = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Add Stream "),
    );
    frame.render_widget(screen, popup);
}
