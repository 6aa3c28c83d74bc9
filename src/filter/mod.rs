//! Stream-list filtering engine
//!
//! Maintains which catalog entries are visible given a visibility choice
//! and a set of selected tags, derives the tag vocabulary from the entries
//! themselves, and notifies subscribers when the filter state changes.
//! The engine never creates or destroys entries; it only reads their
//! attributes and toggles their display flags.

use crate::catalog::{Catalog, Visibility};

/// The visibility selector's enumerated choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityChoice {
    #[default]
    All,
    Public,
    Private,
}

impl VisibilityChoice {
    /// Whether an entry with the given visibility passes this choice
    pub fn matches(&self, visibility: Visibility) -> bool {
        match self {
            VisibilityChoice::All => true,
            VisibilityChoice::Public => visibility == Visibility::Public,
            VisibilityChoice::Private => visibility == Visibility::Private,
        }
    }

    /// Get a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            VisibilityChoice::All => "all",
            VisibilityChoice::Public => "public",
            VisibilityChoice::Private => "private",
        }
    }

    /// The next choice in selector order (wraps around)
    pub fn next(&self) -> Self {
        match self {
            VisibilityChoice::All => VisibilityChoice::Public,
            VisibilityChoice::Public => VisibilityChoice::Private,
            VisibilityChoice::Private => VisibilityChoice::All,
        }
    }
}

/// In-memory filter state. Selected tags keep UI click order and never
/// contain duplicates.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub visibility: VisibilityChoice,
    pub selected_tags: Vec<String>,
}

impl FilterState {
    /// Whether an entry's tag list passes the selected-tag filter.
    /// OR semantics: any one selected tag present on the entry suffices;
    /// an empty selection matches everything.
    pub fn tags_match(&self, entry_tags: &[String]) -> bool {
        self.selected_tags.is_empty()
            || self
                .selected_tags
                .iter()
                .any(|sel| entry_tags.iter().any(|t| t == sel))
    }
}

/// One checkbox row in the filter bar, generated from the vocabulary
#[derive(Debug, Clone)]
pub struct TagCheckbox {
    pub tag: String,
    pub checked: bool,
}

/// Notifications delivered to filter subscribers
#[derive(Debug, Clone)]
pub enum FilterEvent {
    VisibilityChanged(VisibilityChoice),
    TagToggled { tag: String, included: bool },
    FiltersApplied { visible: usize },
}

type Subscriber = Box<dyn FnMut(&FilterEvent)>;

/// Derive the tag vocabulary from the current entries: unique tags,
/// alphabetically sorted. Recomputed on demand, never cached across
/// catalog mutation.
pub fn tag_vocabulary(catalog: &Catalog) -> Vec<String> {
    let mut vocab: Vec<String> = Vec::new();
    for entry in catalog.entries() {
        for tag in &entry.tags {
            if !vocab.iter().any(|t| t == tag) {
                vocab.push(tag.clone());
            }
        }
    }
    vocab.sort();
    vocab
}

/// The filter controller. Owns the filter state and the checkbox rows;
/// operates on a catalog passed in by the caller so the logic stays
/// independent of any presentation layer.
pub struct FilterController {
    state: FilterState,
    checkboxes: Vec<TagCheckbox>,
    subscribers: Vec<Subscriber>,
}

impl FilterController {
    /// Initialize against the current catalog: derive the vocabulary,
    /// build one checkbox per tag, and run an initial filter pass.
    pub fn new(catalog: &mut Catalog) -> Self {
        let mut controller = Self {
            state: FilterState::default(),
            checkboxes: Vec::new(),
            subscribers: Vec::new(),
        };
        controller.refresh_vocabulary(catalog);
        controller.apply_filters(catalog);
        controller
    }

    /// Register a subscriber for filter events
    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    fn emit(&mut self, event: FilterEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
    }

    /// Current filter state
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Current checkbox rows, in vocabulary order
    pub fn checkboxes(&self) -> &[TagCheckbox] {
        &self.checkboxes
    }

    /// Set the visibility choice and re-filter. Infallible: the choice is
    /// constrained to the selector's enumerated values.
    pub fn set_visibility(&mut self, choice: VisibilityChoice, catalog: &mut Catalog) {
        self.state.visibility = choice;
        self.emit(FilterEvent::VisibilityChanged(choice));
        self.apply_filters(catalog);
    }

    /// Add or remove a tag from the selection and re-filter. Idempotent:
    /// repeating the same toggle is a no-op on the second call.
    pub fn toggle_tag(&mut self, tag: &str, included: bool, catalog: &mut Catalog) {
        if included {
            if !self.state.selected_tags.iter().any(|t| t == tag) {
                self.state.selected_tags.push(tag.to_string());
            }
        } else {
            self.state.selected_tags.retain(|t| t != tag);
        }
        if let Some(row) = self.checkboxes.iter_mut().find(|c| c.tag == tag) {
            row.checked = included;
        }
        self.emit(FilterEvent::TagToggled {
            tag: tag.to_string(),
            included,
        });
        self.apply_filters(catalog);
    }

    /// Flip the checkbox under the given index, if any. Degrades to a
    /// no-op when the vocabulary is empty or the index is stale.
    pub fn toggle_checkbox(&mut self, index: usize, catalog: &mut Catalog) {
        let Some(row) = self.checkboxes.get(index) else {
            return;
        };
        let (tag, included) = (row.tag.clone(), !row.checked);
        self.toggle_tag(&tag, included, catalog);
    }

    /// Re-scan the live entry set and show each entry iff it passes both
    /// the visibility and the tag filter. Side effect only; always reads
    /// current attributes, so it is safe to call repeatedly and after the
    /// catalog has been mutated by other collaborators.
    pub fn apply_filters(&mut self, catalog: &mut Catalog) {
        for entry in catalog.entries_mut() {
            let visibility_match = self.state.visibility.matches(entry.visibility);
            let tags_match = self.state.tags_match(&entry.tags);
            entry.set_hidden(!(visibility_match && tags_match));
        }
        let visible = catalog.visible_count();
        log::debug!(
            "Filter pass: {} of {} entries visible",
            visible,
            catalog.entries().len()
        );
        self.emit(FilterEvent::FiltersApplied { visible });
    }

    /// Re-derive the vocabulary and regenerate the checkbox rows, all
    /// unchecked. Deliberately does not reconcile with the selected-tag
    /// set: a previously selected tag whose checkbox is regenerated shows
    /// unchecked while still affecting filtering. Callers use this after
    /// bulk entry insertion.
    pub fn refresh_vocabulary(&mut self, catalog: &Catalog) {
        self.checkboxes = tag_vocabulary(catalog)
            .into_iter()
            .map(|tag| TagCheckbox { tag, checked: false })
            .collect();
    }

    /// Entry point for external collaborators that mutate the entry set
    /// (e.g. the add-stream form): refresh the vocabulary, then re-filter.
    pub fn refresh_and_apply(&mut self, catalog: &mut Catalog) {
        self.refresh_vocabulary(catalog);
        self.apply_filters(catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add("one", "s1", "", Some("public"), Some("a,b"), 10);
        catalog.add("two", "s2", "", Some("private"), Some("b"), 20);
        catalog.add("three", "s3", "", Some("public"), Some(""), 30);
        catalog
    }

    fn visible_titles(catalog: &Catalog) -> Vec<&str> {
        catalog.visible_entries().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_visibility_match_truth_table() {
        assert!(VisibilityChoice::All.matches(Visibility::Public));
        assert!(VisibilityChoice::All.matches(Visibility::Private));
        assert!(VisibilityChoice::Public.matches(Visibility::Public));
        assert!(!VisibilityChoice::Public.matches(Visibility::Private));
        assert!(VisibilityChoice::Private.matches(Visibility::Private));
        assert!(!VisibilityChoice::Private.matches(Visibility::Public));
    }

    #[test]
    fn test_tags_match_or_semantics() {
        let mut state = FilterState::default();
        let entry_tags = vec!["a".to_string(), "b".to_string()];
        assert!(state.tags_match(&entry_tags)); // empty selection matches all
        state.selected_tags = vec!["b".to_string(), "z".to_string()];
        assert!(state.tags_match(&entry_tags)); // one intersection suffices
        state.selected_tags = vec!["z".to_string()];
        assert!(!state.tags_match(&entry_tags));
        assert!(!state.tags_match(&[])); // tagless entry fails any selection
    }

    #[test]
    fn test_vocabulary_sorted_unique() {
        let catalog = sample_catalog();
        assert_eq!(tag_vocabulary(&catalog), vec!["a", "b"]);
    }

    #[test]
    fn test_initial_pass_shows_everything() {
        let mut catalog = sample_catalog();
        let _controller = FilterController::new(&mut catalog);
        assert_eq!(visible_titles(&catalog), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_scenario_public_with_tag_b() {
        // entries [{public,"a,b"}, {private,"b"}, {public,""}],
        // visibility=public, selected=["b"] -> only the first survives
        let mut catalog = sample_catalog();
        let mut controller = FilterController::new(&mut catalog);
        controller.set_visibility(VisibilityChoice::Public, &mut catalog);
        controller.toggle_tag("b", true, &mut catalog);
        assert_eq!(visible_titles(&catalog), vec!["one"]);
    }

    #[test]
    fn test_apply_filters_idempotent() {
        let mut catalog = sample_catalog();
        let mut controller = FilterController::new(&mut catalog);
        controller.set_visibility(VisibilityChoice::Private, &mut catalog);
        let first = visible_titles(&catalog)
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        controller.apply_filters(&mut catalog);
        assert_eq!(visible_titles(&catalog), first);
    }

    #[test]
    fn test_toggle_on_off_restores_selection() {
        let mut catalog = sample_catalog();
        let mut controller = FilterController::new(&mut catalog);
        controller.toggle_tag("a", true, &mut catalog);
        let before = controller.state().selected_tags.clone();
        controller.toggle_tag("b", true, &mut catalog);
        controller.toggle_tag("b", false, &mut catalog);
        assert_eq!(controller.state().selected_tags, before);
    }

    #[test]
    fn test_toggle_idempotent_no_duplicates() {
        let mut catalog = sample_catalog();
        let mut controller = FilterController::new(&mut catalog);
        controller.toggle_tag("a", true, &mut catalog);
        controller.toggle_tag("a", true, &mut catalog);
        assert_eq!(controller.state().selected_tags, vec!["a"]);
        controller.toggle_tag("a", false, &mut catalog);
        controller.toggle_tag("a", false, &mut catalog);
        assert!(controller.state().selected_tags.is_empty());
    }

    #[test]
    fn test_apply_picks_up_new_entries() {
        let mut catalog = sample_catalog();
        let mut controller = FilterController::new(&mut catalog);
        controller.set_visibility(VisibilityChoice::Private, &mut catalog);
        catalog.add("four", "s4", "", Some("private"), Some("c"), 1);
        // No refresh needed for visibility: apply_filters re-reads the set
        controller.apply_filters(&mut catalog);
        assert_eq!(visible_titles(&catalog), vec!["two", "four"]);
    }

    #[test]
    fn test_refresh_and_apply_extends_vocabulary() {
        let mut catalog = sample_catalog();
        let mut controller = FilterController::new(&mut catalog);
        catalog.add("four", "s4", "", Some("public"), Some("zzz"), 1);
        controller.refresh_and_apply(&mut catalog);
        let tags: Vec<&str> = controller.checkboxes().iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "b", "zzz"]);
    }

    #[test]
    fn test_refresh_vocabulary_leaves_selection_unreconciled() {
        // Documented latent inconsistency: the regenerated checkbox shows
        // unchecked, but the tag keeps filtering.
        let mut catalog = sample_catalog();
        let mut controller = FilterController::new(&mut catalog);
        controller.toggle_tag("a", true, &mut catalog);
        controller.refresh_vocabulary(&catalog);
        assert!(controller.checkboxes().iter().all(|c| !c.checked));
        assert_eq!(controller.state().selected_tags, vec!["a"]);
        controller.apply_filters(&mut catalog);
        assert_eq!(visible_titles(&catalog), vec!["one"]);
    }

    #[test]
    fn test_toggle_checkbox_out_of_range_noops() {
        let mut catalog = sample_catalog();
        let mut controller = FilterController::new(&mut catalog);
        controller.toggle_checkbox(99, &mut catalog);
        assert!(controller.state().selected_tags.is_empty());
    }

    #[test]
    fn test_subscribers_see_events() {
        let mut catalog = sample_catalog();
        let mut controller = FilterController::new(&mut catalog);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        controller.subscribe(Box::new(move |event| {
            if let FilterEvent::FiltersApplied { visible } = event {
                sink.borrow_mut().push(*visible);
            }
        }));
        controller.set_visibility(VisibilityChoice::Private, &mut catalog);
        controller.toggle_tag("b", true, &mut catalog);
        assert_eq!(*seen.borrow(), vec![1, 1]);
    }
}
