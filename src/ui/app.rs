//! Main UI Application
//!
//! Coordinates rendering and input handling across all screens.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::catalog::Catalog;
use crate::filter::FilterController;
use crate::form::AddStreamForm;
use crate::prefs::{PrefStore, ViewManager, ViewMode};
use crate::ui::notify::{NotificationCenter, NotifyLevel};
use crate::ui::widgets::{
    render_detail_popup, render_filter_bar, render_form, render_stream_grid, render_stream_list,
    render_tags_view,
};

/// Ticks between viewer-count jitter passes (at 4 ticks/second)
const JITTER_INTERVAL: u32 = 20;

/// All screens the app can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    /// The stream listing with the filter bar
    Browse,
    /// Detail popup over the listing
    Detail { entry_id: u64 },
    /// Add-stream form
    AddForm,
    /// Key binding help
    Help,
}

/// Main UI application
pub struct App {
    catalog: Catalog,
    filter: FilterController,
    views: ViewManager,
    form: AddStreamForm,
    notifications: NotificationCenter,
    screen: Screen,
    /// Cursor into the currently visible entries
    list_cursor: usize,
    /// Cursor into the filter bar's checkbox row
    tag_cursor: usize,
    rng: StdRng,
    ticks: u32,
}

impl App {
    /// Build the app over a seeded catalog, restoring view preferences
    /// from the given store
    pub fn new(store: Box<dyn PrefStore>) -> Self {
        let mut catalog = Catalog::with_sample_streams();
        let filter = FilterController::new(&mut catalog);
        let views = ViewManager::load(store);
        let mut app = Self {
            catalog,
            filter,
            views,
            form: AddStreamForm::new(),
            notifications: NotificationCenter::new(),
            screen: Screen::Browse,
            list_cursor: 0,
            tag_cursor: 0,
            rng: StdRng::from_entropy(),
            ticks: 0,
        };
        // A restored list mode gets its normalization pass up front
        if app.views.prefs().mode == ViewMode::List {
            app.catalog.normalize_descriptions();
        }
        app
    }

    /// Re-derive the tag vocabulary and re-run the filters. Public entry
    /// point for collaborators that mutate the entry set.
    pub fn refresh_and_apply(&mut self) {
        self.filter.refresh_and_apply(&mut self.catalog);
        self.clamp_cursors();
    }

    /// Run the description normalization pass. Public entry point; each
    /// entry is processed at most once regardless of call count.
    pub fn process_descriptions(&mut self) {
        self.catalog.normalize_descriptions();
    }

    /// Advance tick-driven timers: toast expiry and viewer jitter
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
        self.notifications.tick();
        if self.ticks % JITTER_INTERVAL == 0 {
            self.catalog.jitter_viewers(&mut self.rng);
        }
    }

    fn clamp_cursors(&mut self) {
        let visible = self.catalog.visible_count();
        if visible == 0 {
            self.list_cursor = 0;
        } else if self.list_cursor >= visible {
            self.list_cursor = visible - 1;
        }
        let boxes = self.filter.checkboxes().len();
        if boxes == 0 {
            self.tag_cursor = 0;
        } else if self.tag_cursor >= boxes {
            self.tag_cursor = boxes - 1;
        }
    }

    fn selected_entry_id(&self) -> Option<u64> {
        self.catalog
            .visible_entries()
            .nth(self.list_cursor)
            .map(|e| e.id)
    }

    /// Handle keyboard input, returns true if should quit
    pub fn handle_input(&mut self, key: KeyEvent) -> Result<bool> {
        // Global quit shortcut
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }

        match self.screen {
            Screen::Browse => self.handle_browse_input(key),
            Screen::Detail { .. } => self.handle_detail_input(key),
            Screen::AddForm => self.handle_form_input(key),
            Screen::Help => {
                self.screen = Screen::Browse;
                Ok(false)
            }
        }
    }

    fn handle_browse_input(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('v') => {
                let next = self.filter.state().visibility.next();
                self.filter.set_visibility(next, &mut self.catalog);
                self.clamp_cursors();
            }
            KeyCode::Left => {
                self.tag_cursor = self.tag_cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                let boxes = self.filter.checkboxes().len();
                if boxes > 0 && self.tag_cursor < boxes - 1 {
                    self.tag_cursor += 1;
                }
            }
            KeyCode::Char(' ') => {
                // No-op when the vocabulary is empty
                self.filter.toggle_checkbox(self.tag_cursor, &mut self.catalog);
                self.clamp_cursors();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_cursor = self.list_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let visible = self.catalog.visible_count();
                if visible > 0 && self.list_cursor < visible - 1 {
                    self.list_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(entry_id) = self.selected_entry_id() {
                    self.screen = Screen::Detail { entry_id };
                }
            }
            KeyCode::Char('g') => {
                self.views.set_active_view(ViewMode::Grid);
            }
            KeyCode::Char('l') => {
                self.views.set_active_view(ViewMode::List);
                // Entering list mode fills in missing descriptions, once
                self.catalog.normalize_descriptions();
            }
            KeyCode::Char('t') => {
                let flag = !self.views.prefs().tags_view;
                self.views.set_tags_view(flag);
            }
            KeyCode::Char('a') => {
                self.form.reset();
                self.screen = Screen::AddForm;
            }
            KeyCode::Char('r') => {
                self.refresh_and_apply();
                self.notifications.push("Stream list refreshed", NotifyLevel::Info);
            }
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.screen = Screen::Help;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_detail_input(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                self.screen = Screen::Browse;
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_form_input(&mut self, key: KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Esc => {
                self.form.reset();
                self.screen = Screen::Browse;
            }
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::Char('v') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.toggle_visibility();
            }
            KeyCode::Enter => {
                if let Some(id) = self.form.submit(&mut self.catalog) {
                    self.refresh_and_apply();
                    self.notifications
                        .push("Stream added to the listing", NotifyLevel::Success);
                    log::info!("Form submitted, new entry {}", id);
                    self.screen = Screen::Browse;
                } else {
                    self.notifications
                        .push("Fix the highlighted fields", NotifyLevel::Error);
                }
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) => self.form.input_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Render the current screen
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_title(frame, chunks[0]);
        render_filter_bar(
            frame,
            chunks[1],
            &self.filter,
            self.tag_cursor,
            self.screen == Screen::Browse,
        );

        let prefs = self.views.prefs();
        if prefs.tags_view {
            render_tags_view(frame, chunks[2], &self.catalog);
        } else {
            match prefs.mode {
                ViewMode::Grid => {
                    render_stream_grid(frame, chunks[2], &self.catalog, self.list_cursor)
                }
                ViewMode::List => {
                    render_stream_list(frame, chunks[2], &self.catalog, self.list_cursor)
                }
            }
        }

        self.render_status(frame, chunks[3]);

        match self.screen {
            Screen::Detail { entry_id } => {
                // The entry can vanish if filters changed under the popup
                if let Some(entry) = self.catalog.get(entry_id) {
                    render_detail_popup(frame, frame.area(), entry);
                }
            }
            Screen::AddForm => render_form(frame, frame.area(), &self.form),
            Screen::Help => self.render_help(frame),
            Screen::Browse => {}
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let prefs = self.views.prefs();
        let view_name = if prefs.tags_view {
            "tags"
        } else {
            prefs.mode.as_str()
        };
        let title = Line::from(vec![
            Span::styled(
                " tidecast ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  {} visible / {} streams   view: {}",
                self.catalog.visible_count(),
                self.catalog.entries().len(),
                view_name,
            )),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            " g/l: view  t: tags  a: add  enter: detail  h: help  q: quit ",
            Style::default().fg(Color::DarkGray),
        )];
        for toast in self.notifications.items() {
            let color = match toast.level {
                NotifyLevel::Info => Color::Cyan,
                NotifyLevel::Success => Color::Green,
                NotifyLevel::Error => Color::Red,
            };
            spans.push(Span::styled(
                format!(" ▸ {} ", toast.text),
                Style::default().fg(color),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help(&self, frame: &mut Frame) {
        use crate::ui::widgets::centered_rect;
        use ratatui::widgets::Clear;

        let popup = centered_rect(50, 60, frame.area());
        frame.render_widget(Clear, popup);
        let lines = vec![
            Line::from("v          cycle visibility filter"),
            Line::from("←/→ space  move and toggle tag checkboxes"),
            Line::from("↑/↓ j/k    select a stream"),
            Line::from("enter      open stream detail"),
            Line::from("g / l      grid or list view"),
            Line::from("t          toggle tags view"),
            Line::from("a          add a custom stream"),
            Line::from("r          refresh filters"),
            Line::from("q          quit"),
        ];
        let help = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (any key to close) "),
        );
        frame.render_widget(help, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Visibility;
    use crate::prefs::MemoryStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn test_app() -> App {
        App::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_visibility_cycle_filters_listing() {
        let mut app = test_app();
        let total = app.catalog.entries().len();
        assert_eq!(app.catalog.visible_count(), total);
        app.handle_input(key(KeyCode::Char('v'))).unwrap(); // all -> public
        assert!(app
            .catalog
            .visible_entries()
            .all(|e| e.visibility == Visibility::Public));
    }

    #[test]
    fn test_space_toggles_checkbox_under_cursor() {
        let mut app = test_app();
        app.handle_input(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(app.filter.state().selected_tags.len(), 1);
        app.handle_input(key(KeyCode::Char(' '))).unwrap();
        assert!(app.filter.state().selected_tags.is_empty());
    }

    #[test]
    fn test_form_flow_adds_entry_and_refreshes_vocabulary() {
        let mut app = test_app();
        let before = app.filter.checkboxes().len();
        let total = app.catalog.entries().len();
        app.handle_input(key(KeyCode::Char('a'))).unwrap();
        for c in "Test Cast".chars() {
            app.handle_input(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_input(key(KeyCode::Tab)).unwrap();
        for c in "tester".chars() {
            app.handle_input(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_input(key(KeyCode::Tab)).unwrap(); // description
        app.handle_input(key(KeyCode::Tab)).unwrap(); // tags
        for c in "brandnew".chars() {
            app.handle_input(key(KeyCode::Char(c))).unwrap();
        }
        app.handle_input(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.catalog.entries().len(), total + 1);
        assert_eq!(app.filter.checkboxes().len(), before + 1);
        assert_eq!(app.screen, Screen::Browse);
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let mut app = test_app();
        let total = app.catalog.entries().len();
        app.handle_input(key(KeyCode::Char('a'))).unwrap();
        app.handle_input(key(KeyCode::Enter)).unwrap(); // empty form
        assert_eq!(app.screen, Screen::AddForm);
        assert_eq!(app.catalog.entries().len(), total);
    }

    #[test]
    fn test_list_mode_normalizes_descriptions() {
        let mut app = test_app();
        app.handle_input(key(KeyCode::Char('l'))).unwrap();
        assert!(app
            .catalog
            .entries()
            .iter()
            .all(|e| !e.description.trim().is_empty()));
        assert_eq!(app.views.prefs().mode, ViewMode::List);
    }

    #[test]
    fn test_process_descriptions_idempotent() {
        let mut app = test_app();
        app.process_descriptions();
        let after_first: Vec<String> = app
            .catalog
            .entries()
            .iter()
            .map(|e| e.description.clone())
            .collect();
        app.process_descriptions();
        let after_second: Vec<String> = app
            .catalog
            .entries()
            .iter()
            .map(|e| e.description.clone())
            .collect();
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_detail_requires_selection() {
        let mut app = test_app();
        // Filter everything out, then Enter must no-op
        app.filter
            .toggle_tag("no-such-tag", true, &mut app.catalog);
        app.clamp_cursors();
        app.handle_input(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.screen, Screen::Browse);
    }
}
