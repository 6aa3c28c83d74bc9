//! Stream entry descriptors
//!
//! Typed representation of one listed livestream, synchronized from the
//! raw attribute strings an entry source provides.

use serde::{Deserialize, Serialize};

/// Placeholder shown for streams that never set a description
pub const DESCRIPTION_PLACEHOLDER: &str = "No description provided yet.";

/// Public/private classification of a stream entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    /// Parse a raw visibility attribute. Anything unrecognized (including
    /// an absent attribute) falls back to `Public`.
    pub fn parse_attr(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("private") => Visibility::Private,
            _ => Visibility::Public,
        }
    }

    /// Get a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// Parse a comma-separated tag attribute into an ordered list of trimmed,
/// non-empty tags. Absent or malformed input yields no tags.
pub fn parse_tags_attr(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(s) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

/// One listed livestream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamEntry {
    /// Stable identifier within the catalog
    pub id: u64,
    /// Stream title
    pub title: String,
    /// Streamer display name
    pub streamer: String,
    /// Free-form description (may be empty until normalized)
    pub description: String,
    /// Public/private classification
    pub visibility: Visibility,
    /// Ordered tag list (UI insertion order)
    pub tags: Vec<String>,
    /// Current viewer count (jittered for ambience)
    pub viewers: u32,
    /// Display-suppression flag; the entry always stays in the catalog
    hidden: bool,
    /// Set once the description normalization pass has touched this entry
    description_processed: bool,
}

impl StreamEntry {
    /// Build an entry from raw attribute strings, applying the documented
    /// fallbacks for missing or malformed values.
    pub fn from_attrs(
        id: u64,
        title: &str,
        streamer: &str,
        description: &str,
        visibility_attr: Option<&str>,
        tags_attr: Option<&str>,
        viewers: u32,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            streamer: streamer.to_string(),
            description: description.to_string(),
            visibility: Visibility::parse_attr(visibility_attr),
            tags: parse_tags_attr(tags_attr),
            viewers,
            hidden: false,
            description_processed: false,
        }
    }

    /// Whether the entry currently passes the active filters
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }

    /// Set the display-suppression flag
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Whether the entry carries a given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Replace an empty description with the placeholder, at most once per
    /// entry. Returns true if this call did the replacement.
    pub fn normalize_description(&mut self) -> bool {
        if self.description_processed {
            return false;
        }
        self.description_processed = true;
        if self.description.trim().is_empty() {
            self.description = DESCRIPTION_PLACEHOLDER.to_string();
            true
        } else {
            false
        }
    }

    /// Whether the normalization pass already ran for this entry
    pub fn description_is_processed(&self) -> bool {
        self.description_processed
    }
}
