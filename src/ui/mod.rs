//! User Interface module
//!
//! Terminal UI using ratatui with adaptive layouts.

pub mod app;
pub mod notify;
pub mod widgets;

pub use app::App;
pub use notify::{NotificationCenter, NotifyLevel};
