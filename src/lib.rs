//! Tidecast - a terminal livestream browser
//!
//! Browse a stream listing, filter it by visibility and tags, and switch
//! between grid, list, and tags layouts. View preferences persist across
//! sessions; the filtering engine itself is plain data and runs without
//! a terminal.

pub mod catalog;
pub mod filter;
pub mod form;
pub mod prefs;
pub mod ui;

// Re-export commonly used types
pub use catalog::{Catalog, StreamEntry, Visibility};
pub use filter::{FilterController, FilterEvent, FilterState, VisibilityChoice};
pub use prefs::{ViewManager, ViewMode, ViewPrefs};
