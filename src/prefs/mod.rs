//! View preferences and persistence
//!
//! Grid/list mode and the tags-view toggle survive restarts through a
//! small key-value store. Stored values outside the expected enumeration
//! are coerced to the defaults, never propagated as invalid state.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Store key for the grid/list mode
pub const VIEW_MODE_KEY: &str = "streamView";
/// Store key for the tags-view toggle
pub const TAGS_VIEW_KEY: &str = "tagsView";

/// Errors from the file-backed preference store
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preference store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("preference store is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// Grid vs. list rendering of the stream list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Parse a stored value, coercing anything unrecognized to the default
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("list") => ViewMode::List,
            Some("grid") => ViewMode::Grid,
            _ => ViewMode::default(),
        }
    }

    /// The value written to the store
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

/// Parse the stored tags-view flag ("true"/"false" as strings)
fn parse_tags_view(raw: Option<&str>) -> bool {
    matches!(raw, Some("true"))
}

/// Persisted view preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewPrefs {
    pub mode: ViewMode,
    pub tags_view: bool,
}

/// Synchronous string key-value store. Two implementations: a JSON file
/// under the user's data directory, and an in-memory map for tests.
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// In-memory store, used in tests and as the fallback when the data
/// directory cannot be created
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON-file-backed store. The whole map is rewritten on every set;
/// last write wins, which is acceptable for UI preferences.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at an explicit path, loading existing values.
    /// An unreadable or unparsable file starts the store empty.
    pub fn open(path: PathBuf) -> Self {
        let values = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!("Failed to parse preferences: {}, starting fresh", e);
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, values }
    }

    /// Open the store at its default location under the user data dir
    pub fn open_default() -> Self {
        Self::open(prefs_path())
    }

    fn flush(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PrefStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Get the preference file path
fn prefs_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "tidecast", "Tidecast") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("prefs.json");
        path
    } else {
        PathBuf::from("./prefs.json")
    }
}

/// Owns the current view preferences and keeps the store in sync
pub struct ViewManager {
    prefs: ViewPrefs,
    store: Box<dyn PrefStore>,
}

impl ViewManager {
    /// Restore preferences from the store, applying defaults for absent
    /// or unparsable values
    pub fn load(store: Box<dyn PrefStore>) -> Self {
        let prefs = ViewPrefs {
            mode: ViewMode::parse(store.get(VIEW_MODE_KEY).as_deref()),
            tags_view: parse_tags_view(store.get(TAGS_VIEW_KEY).as_deref()),
        };
        log::info!(
            "Restored view preferences: mode={}, tags_view={}",
            prefs.mode.as_str(),
            prefs.tags_view
        );
        Self { prefs, store }
    }

    /// Current preferences
    pub fn prefs(&self) -> ViewPrefs {
        self.prefs
    }

    /// Switch the stream list between grid and list mode and persist the
    /// choice. A failed write is logged and otherwise ignored.
    pub fn set_active_view(&mut self, mode: ViewMode) {
        self.prefs.mode = mode;
        if let Err(e) = self.store.set(VIEW_MODE_KEY, mode.as_str()) {
            log::warn!("Failed to persist view mode: {}", e);
        }
    }

    /// Toggle the tags-view layout and persist the flag
    pub fn set_tags_view(&mut self, flag: bool) {
        self.prefs.tags_view = flag;
        let value = if flag { "true" } else { "false" };
        if let Err(e) = self.store.set(TAGS_VIEW_KEY, value) {
            log::warn!("Failed to persist tags view: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_coercion() {
        assert_eq!(ViewMode::parse(Some("list")), ViewMode::List);
        assert_eq!(ViewMode::parse(Some("grid")), ViewMode::Grid);
        assert_eq!(ViewMode::parse(Some("carousel")), ViewMode::Grid); // coerced
        assert_eq!(ViewMode::parse(None), ViewMode::Grid); // absent
    }

    #[test]
    fn test_tags_view_coercion() {
        assert!(parse_tags_view(Some("true")));
        assert!(!parse_tags_view(Some("false")));
        assert!(!parse_tags_view(Some("TRUE"))); // stored as exact strings
        assert!(!parse_tags_view(None));
    }

    #[test]
    fn test_persistence_round_trip() {
        let mut manager = ViewManager::load(Box::new(MemoryStore::new()));
        manager.set_active_view(ViewMode::List);
        manager.set_tags_view(true);
        assert_eq!(manager.store.get(VIEW_MODE_KEY).as_deref(), Some("list"));
        // Reload from the same backing values
        let reloaded = ViewManager::load(manager.store);
        assert_eq!(reloaded.prefs().mode, ViewMode::List);
        assert!(reloaded.prefs().tags_view);
    }

    #[test]
    fn test_defaults_when_store_empty() {
        let manager = ViewManager::load(Box::new(MemoryStore::new()));
        assert_eq!(manager.prefs(), ViewPrefs::default());
    }

    #[test]
    fn test_last_write_wins() {
        let mut manager = ViewManager::load(Box::new(MemoryStore::new()));
        manager.set_active_view(ViewMode::List);
        manager.set_active_view(ViewMode::Grid);
        assert_eq!(manager.prefs().mode, ViewMode::Grid);
        assert_eq!(manager.store.get(VIEW_MODE_KEY).as_deref(), Some("grid"));
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = std::env::temp_dir().join("tidecast-prefs-test");
        let path = dir.join("prefs.json");
        let _ = std::fs::remove_file(&path);
        {
            let mut store = JsonFileStore::open(path.clone());
            store.set(VIEW_MODE_KEY, "list").unwrap();
        }
        let store = JsonFileStore::open(path.clone());
        assert_eq!(store.get(VIEW_MODE_KEY).as_deref(), Some("list"));
        let _ = std::fs::remove_file(&path);
    }
}
