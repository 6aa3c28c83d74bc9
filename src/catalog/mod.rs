//! Stream catalog
//!
//! Owns the live set of stream entries. The filter engine only reads
//! attributes and toggles display flags; entries are created and mutated
//! here (seed data, the add-stream form, viewer-count jitter).

pub mod entry;

pub use entry::{parse_tags_attr, StreamEntry, Visibility, DESCRIPTION_PLACEHOLDER};

use rand::Rng;

/// The live collection of stream entries
#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<StreamEntry>,
    next_id: u64,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog seeded with the demo listing
    pub fn with_sample_streams() -> Self {
        let mut catalog = Self::new();
        let seed: &[(&str, &str, &str, Option<&str>, Option<&str>, u32)] = &[
            (
                "Midnight Speedruns",
                "nyxrunner",
                "Racing the any% clock until sunrise.",
                Some("public"),
                Some("speedrun, retro"),
                842,
            ),
            (
                "Lo-fi Coding Session",
                "terminal_tess",
                "Building a text editor live, questions welcome.",
                Some("public"),
                Some("coding, chill"),
                312,
            ),
            (
                "Guild Strategy Night",
                "warroom",
                "",
                Some("private"),
                Some("strategy, coding"),
                57,
            ),
            (
                "Open Paint Jam",
                "mural",
                "Community canvas, everyone draws.",
                Some("public"),
                Some("art"),
                128,
            ),
            ("Untitled Stream", "lurker9", "", Some("private"), None, 4),
        ];
        for (title, streamer, desc, vis, tags, viewers) in seed {
            catalog.add(title, streamer, desc, *vis, *tags, *viewers);
        }
        catalog
    }

    /// Add a new entry from raw attributes, returning its id
    pub fn add(
        &mut self,
        title: &str,
        streamer: &str,
        description: &str,
        visibility_attr: Option<&str>,
        tags_attr: Option<&str>,
        viewers: u32,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(StreamEntry::from_attrs(
            id,
            title,
            streamer,
            description,
            visibility_attr,
            tags_attr,
            viewers,
        ));
        log::info!("Added stream entry {} ({})", id, title);
        id
    }

    /// All entries, in listing order
    pub fn entries(&self) -> &[StreamEntry] {
        &self.entries
    }

    /// Mutable access for the filter pass and normalization
    pub fn entries_mut(&mut self) -> &mut [StreamEntry] {
        &mut self.entries
    }

    /// Look up an entry by id
    pub fn get(&self, id: u64) -> Option<&StreamEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of entries currently passing the filters
    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_visible()).count()
    }

    /// Entries currently passing the filters, in listing order
    pub fn visible_entries(&self) -> impl Iterator<Item = &StreamEntry> {
        self.entries.iter().filter(|e| e.is_visible())
    }

    /// Run the description normalization pass over every entry. Each entry
    /// is processed at most once across all calls. Returns how many
    /// descriptions were replaced by the placeholder this call.
    pub fn normalize_descriptions(&mut self) -> usize {
        let replaced = self
            .entries
            .iter_mut()
            .map(|e| e.normalize_description())
            .filter(|&replaced| replaced)
            .count();
        if replaced > 0 {
            log::info!("Normalized {} empty descriptions", replaced);
        }
        replaced
    }

    /// Nudge every viewer count by a small random delta for ambience
    pub fn jitter_viewers<R: Rng>(&mut self, rng: &mut R) {
        for entry in &mut self.entries {
            let delta = rng.gen_range(-3i32..=3);
            entry.viewers = entry.viewers.saturating_add_signed(delta);
        }
    }
}
