//! UI widgets

pub mod detail;
pub mod filter_bar;
pub mod form_screen;
pub mod stream_list;

pub use detail::render_detail_popup;
pub use filter_bar::render_filter_bar;
pub use form_screen::render_form;
pub use stream_list::{render_stream_grid, render_stream_list, render_tags_view};

use ratatui::layout::Rect;

/// A centered rect taking the given percentage of the parent area
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
