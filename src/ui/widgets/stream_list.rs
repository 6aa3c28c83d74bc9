//! Stream list rendering
//!
//! Three layouts over the same visible set: a card grid, a detailed list,
//! and the admin-oriented tags view grouping entries under each tag.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::catalog::{Catalog, StreamEntry, Visibility};
use crate::filter::tag_vocabulary;

const GRID_COLUMNS: usize = 3;
const CARD_HEIGHT: u16 = 5;

fn visibility_span(entry: &StreamEntry) -> Span<'static> {
    match entry.visibility {
        Visibility::Public => Span::styled("public", Style::default().fg(Color::Green)),
        Visibility::Private => Span::styled("private", Style::default().fg(Color::Magenta)),
    }
}

fn card(entry: &StreamEntry, selected: bool) -> Paragraph<'static> {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(
                entry.streamer.clone(),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  "),
            visibility_span(entry),
        ]),
        Line::from(Span::styled(
            format!("{} watching", entry.viewers),
            Style::default().fg(Color::Red),
        )),
        Line::from(Span::styled(
            entry.tags.join(", "),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", entry.title)),
    )
}

/// Grid mode: cards in rows of three
pub fn render_stream_grid(frame: &mut Frame, area: Rect, catalog: &Catalog, selected: usize) {
    let visible: Vec<&StreamEntry> = catalog.visible_entries().collect();
    if visible.is_empty() {
        render_empty(frame, area);
        return;
    }

    let rows_needed = visible.len().div_ceil(GRID_COLUMNS);
    let max_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let rows = rows_needed.min(max_rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows])
        .split(area);

    for (row_idx, row_area) in row_areas.iter().enumerate() {
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, GRID_COLUMNS as u32);
                GRID_COLUMNS
            ])
            .split(*row_area);
        for col_idx in 0..GRID_COLUMNS {
            let i = row_idx * GRID_COLUMNS + col_idx;
            if let Some(entry) = visible.get(i) {
                frame.render_widget(card(entry, i == selected), col_areas[col_idx]);
            }
        }
    }
}

/// List mode: one row per stream, description included
pub fn render_stream_list(frame: &mut Frame, area: Rect, catalog: &Catalog, selected: usize) {
    let visible: Vec<&StreamEntry> = catalog.visible_entries().collect();
    if visible.is_empty() {
        render_empty(frame, area);
        return;
    }

    let mut lines = Vec::new();
    for (i, entry) in visible.iter().enumerate() {
        let title_style = if i == selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(entry.title.clone(), title_style),
            Span::raw("  by "),
            Span::styled(entry.streamer.clone(), Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            visibility_span(entry),
            Span::styled(
                format!("  {} watching", entry.viewers),
                Style::default().fg(Color::Red),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {}", entry.description),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            format!("    tags: {}", entry.tags.join(", ")),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::default());
    }

    let list = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Streams "));
    frame.render_widget(list, area);
}

/// Tags view: every vocabulary tag with the visible streams carrying it
pub fn render_tags_view(frame: &mut Frame, area: Rect, catalog: &Catalog) {
    let mut lines = Vec::new();
    for tag in tag_vocabulary(catalog) {
        lines.push(Line::from(Span::styled(
            format!("#{}", tag),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for entry in catalog.visible_entries().filter(|e| e.has_tag(&tag)) {
            lines.push(Line::from(vec![
                Span::raw(format!("    {} ", entry.title)),
                visibility_span(entry),
                Span::styled(
                    format!("  {} watching", entry.viewers),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }
    if lines.is_empty() {
        render_empty(frame, area);
        return;
    }

    let view = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Tags "));
    frame.render_widget(view, area);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let msg = Paragraph::new("No streams match the current filters.")
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL).title(" Streams "));
    frame.render_widget(msg, area);
}
