//! Application State Store
//!
//! Loaded lists, the detail cache and the view state. No I/O happens here;
//! the controller is the only writer.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{ListDetail, ListSummary};

/// Last-loaded list collection plus the per-list detail cache
#[derive(Clone, Debug, Default)]
pub struct ListStore {
    /// Lists in server order
    lists: Vec<ListSummary>,
    /// Full lists by id; only ever refreshed by a fetch of that same list
    detail_cache: HashMap<String, ListDetail>,
}

impl ListStore {
    pub fn lists(&self) -> &[ListSummary] {
        &self.lists
    }

    pub fn replace_lists(&mut self, lists: Vec<ListSummary>) {
        self.lists = lists;
    }

    pub fn find_list(&self, list_id: &str) -> Option<&ListSummary> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    pub fn contains(&self, list_id: &str) -> bool {
        self.find_list(list_id).is_some()
    }

    /// Distinct non-blank categories, case-sensitive lexical order
    pub fn categories(&self) -> Vec<String> {
        self.lists
            .iter()
            .filter_map(|list| list.category())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn cached_detail(&self, list_id: &str) -> Option<&ListDetail> {
        self.detail_cache.get(list_id)
    }

    pub fn upsert_detail(&mut self, detail: ListDetail) {
        self.detail_cache.insert(detail.id().to_string(), detail);
    }

    pub fn evict_detail(&mut self, list_id: &str) {
        self.detail_cache.remove(list_id);
    }
}

/// Ephemeral selection / filter state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub selected_list_id: Option<String>,
    pub search: String,
    pub category: String,
    /// Detail panel contents for the selected list
    pub detail: Option<ListDetail>,
}

/// Everything the projections read
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub model: ListStore,
    pub view: ViewState,
    refresh_generation: u64,
    detail_generation: u64,
    /// Lists whose card aggregate is being fetched
    pending_cards: HashSet<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a list query; older in-flight queries become stale.
    pub fn begin_refresh(&mut self) -> u64 {
        self.refresh_generation += 1;
        self.refresh_generation
    }

    pub fn is_current_refresh(&self, generation: u64) -> bool {
        self.refresh_generation == generation
    }

    /// Start a detail fetch; older in-flight fetches become stale.
    pub fn begin_detail(&mut self) -> u64 {
        self.detail_generation += 1;
        self.detail_generation
    }

    pub fn is_current_detail(&self, generation: u64) -> bool {
        self.detail_generation == generation
    }

    /// Install a freshly loaded list collection.
    ///
    /// Returns `true` when the selection pointed at a list that is gone and
    /// was cleared together with the detail panel.
    pub fn apply_lists(&mut self, lists: Vec<ListSummary>) -> bool {
        self.model.replace_lists(lists);
        let dangling = self
            .view
            .selected_list_id
            .as_deref()
            .is_some_and(|id| !self.model.contains(id));
        if dangling {
            self.clear_selection();
        }
        dangling
    }

    pub fn clear_selection(&mut self) {
        self.view.selected_list_id = None;
        self.view.detail = None;
        // Any in-flight detail response now belongs to nothing.
        self.detail_generation += 1;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.view.selected_list_id.as_deref()
    }

    /// Claim a card for aggregate resolution; `false` if already cached or in flight.
    pub fn claim_card(&mut self, list_id: &str) -> bool {
        if self.model.cached_detail(list_id).is_some() {
            return false;
        }
        self.pending_cards.insert(list_id.to_string())
    }

    pub fn release_card(&mut self, list_id: &str) {
        self.pending_cards.remove(list_id);
    }
}
