use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::color::TypePalette;
use crate::data::filter::{FilterState, filtered_indices};
use crate::data::loader::{PendingLoad, spawn_load};
use crate::data::model::{Record, SdgDataset};
use crate::pagination::{Pager, RowsPerPage};

// ---------------------------------------------------------------------------
// Row expansion
// ---------------------------------------------------------------------------

/// Serial numbers of rows showing their detail panel.
///
/// Independent of filtering and paging: a hidden row keeps its state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSet(BTreeSet<String>);

impl ExpansionSet {
    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: &str) {
        if !self.0.remove(id) {
            self.0.insert(id.to_string());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.0.contains(id)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a load finishes).
    pub dataset: Option<Arc<SdgDataset>>,

    /// Search term and facet selections.
    filters: FilterState,

    /// Indices of records passing the current filters (cached).
    visible_indices: Vec<usize>,

    /// Current page and page size.
    pager: Pager,

    /// Rows showing their detail panel.
    pub expanded: ExpansionSet,

    /// Badge colours for the `Type` column.
    pub type_palette: TypePalette,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,

    /// Load in flight, if any.
    pending: Option<PendingLoad>,

    /// Whether a failed load should be reported in the status bar.
    report_load_errors: bool,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new(RowsPerPage::default())
    }
}

impl AppState {
    pub fn new(rows_per_page: RowsPerPage) -> Self {
        Self {
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            pager: Pager::new(rows_per_page),
            expanded: ExpansionSet::default(),
            type_palette: TypePalette::default(),
            status_message: None,
            loading: false,
            pending: None,
            report_load_errors: false,
        }
    }

    // -- Loading --

    /// Start loading `path` in the background. A later call replaces any load
    /// still in flight; its result is discarded.
    ///
    /// With `report_errors` unset a failure only reaches the log.
    pub fn begin_load(&mut self, path: PathBuf, report_errors: bool) {
        log::info!("Loading initiatives from {}", path.display());
        self.pending = Some(spawn_load(path));
        self.report_load_errors = report_errors;
        self.loading = true;
    }

    /// Install the result of a finished background load, if any.
    /// Returns true when the state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(result) = self.pending.as_ref().and_then(PendingLoad::poll) else {
            return false;
        };
        let path = self.pending.take().map(|p| p.path).unwrap_or_default();
        self.loading = false;

        match result {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} initiatives from {} ({} years, {} regions, {} targets)",
                    dataset.len(),
                    path.display(),
                    dataset.facets.years.len(),
                    dataset.facets.regions.len(),
                    dataset.facets.targets.len()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                if self.report_load_errors {
                    self.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }
        true
    }

    /// Ingest a newly loaded dataset and recompute the derived views.
    pub fn set_dataset(&mut self, dataset: SdgDataset) {
        self.type_palette = TypePalette::new(dataset.type_counts.keys().map(String::as_str));
        self.dataset = Some(Arc::new(dataset));
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    // -- Filters --

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_search(&mut self, search: &str) {
        if self.filters.search != search {
            self.filters.search = search.to_string();
            self.refilter();
        }
    }

    pub fn set_year(&mut self, year: Option<String>) {
        if self.filters.year != year {
            self.filters.year = year;
            self.refilter();
        }
    }

    pub fn set_region(&mut self, region: Option<String>) {
        if self.filters.region != region {
            self.filters.region = region;
            self.refilter();
        }
    }

    pub fn set_target(&mut self, target: Option<String>) {
        if self.filters.target != target {
            self.filters.target = target;
            self.refilter();
        }
    }

    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters = FilterState::default();
            self.refilter();
        }
    }

    /// Recompute `visible_indices` after a filter or dataset change.
    /// Always returns to page 1.
    fn refilter(&mut self) {
        self.visible_indices = match &self.dataset {
            Some(ds) => filtered_indices(ds, &self.filters),
            None => Vec::new(),
        };
        self.pager.reset();
    }

    // -- Views --

    /// Number of records passing the filters.
    pub fn visible_count(&self) -> usize {
        self.visible_indices.len()
    }

    /// All records passing the filters, in file order.
    pub fn filtered_records(&self) -> Vec<&Record> {
        match &self.dataset {
            Some(ds) => self.visible_indices.iter().map(|&i| &ds.records[i]).collect(),
            None => Vec::new(),
        }
    }

    /// Records on the current page.
    pub fn visible_page(&self) -> Vec<&Record> {
        match &self.dataset {
            Some(ds) => self
                .pager
                .page_slice(&self.visible_indices)
                .iter()
                .map(|&i| &ds.records[i])
                .collect(),
            None => Vec::new(),
        }
    }

    // -- Paging --

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn set_rows_per_page(&mut self, rows: RowsPerPage) {
        self.pager.set_rows_per_page(rows);
    }

    pub fn prev_page(&mut self) {
        self.pager.prev();
    }

    pub fn next_page(&mut self) {
        self.pager.next(self.visible_indices.len());
    }

    // -- Row expansion --

    pub fn toggle_expanded(&mut self, id: &str) {
        self.expanded.toggle(id);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::data::model::record;

    fn state_with(n: usize) -> AppState {
        let records = (1..=n)
            .map(|i| {
                let year = if i % 2 == 0 { "2022" } else { "2023" };
                record(&i.to_string(), year, "Global", "1.1")
            })
            .collect();
        let mut state = AppState::default();
        state.set_dataset(SdgDataset::from_records(records));
        state
    }

    fn ids(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.serial_no.clone()).collect()
    }

    #[test]
    fn empty_state_shows_nothing() {
        let state = AppState::default();
        assert_eq!(state.visible_count(), 0);
        assert!(state.visible_page().is_empty());
        assert!(!state.pager().can_next(state.visible_count()));
    }

    #[test]
    fn dataset_starts_unfiltered_on_page_one() {
        let state = state_with(25);
        assert_eq!(state.visible_count(), 25);
        assert_eq!(state.visible_page().len(), 10);
        assert_eq!(state.pager().current_page(), 1);
    }

    #[test]
    fn every_filter_change_resets_the_page() {
        let mut state = state_with(60);

        let to_page_three = |s: &mut AppState| {
            while s.pager().current_page() > 1 {
                s.prev_page();
            }
            s.next_page();
            s.next_page();
            assert_eq!(s.pager().current_page(), 3);
        };

        to_page_three(&mut state);
        state.set_search("initiative");
        assert_eq!(state.pager().current_page(), 1);

        to_page_three(&mut state);
        state.set_year(Some("2023".to_string()));
        assert_eq!(state.pager().current_page(), 1);
        assert_eq!(state.visible_count(), 30);

        to_page_three(&mut state);
        state.set_region(Some("Glob".to_string()));
        assert_eq!(state.pager().current_page(), 1);

        to_page_three(&mut state);
        state.set_target(Some("1.1".to_string()));
        assert_eq!(state.pager().current_page(), 1);

        to_page_three(&mut state);
        state.set_rows_per_page(RowsPerPage::new(20).unwrap());
        assert_eq!(state.pager().current_page(), 1);

        state.set_rows_per_page(RowsPerPage::new(10).unwrap());
        to_page_three(&mut state);
        state.clear_filters();
        assert_eq!(state.pager().current_page(), 1);
        assert_eq!(state.visible_count(), 60);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let mut state = state_with(25);
        state.next_page();
        state.next_page();
        state.next_page();
        assert_eq!(state.pager().current_page(), 3);
        assert_eq!(
            ids(&state.visible_page()),
            vec!["21", "22", "23", "24", "25"]
        );
    }

    #[test]
    fn page_rows_borrow_the_loaded_records() {
        let mut state = state_with(25);
        state.next_page();
        let dataset = state.dataset.clone().unwrap();
        let page = state.visible_page();
        assert_eq!(page.len(), 10);
        for (offset, rec) in page.into_iter().enumerate() {
            assert!(std::ptr::eq(rec, &dataset.records[10 + offset]));
        }
    }

    #[test]
    fn export_view_is_filtered_but_not_paginated() {
        let mut state = state_with(25);
        state.set_year(Some("2022".to_string()));
        assert_eq!(state.filtered_records().len(), 12);
        assert_eq!(state.visible_page().len(), 10);
    }

    #[test]
    fn expansion_survives_filtering_and_double_toggle_restores() {
        let mut state = state_with(25);
        let before = state.expanded.clone();

        state.toggle_expanded("12");
        assert!(state.expanded.is_expanded("12"));

        state.set_year(Some("2023".to_string()));
        assert!(state.filtered_records().iter().all(|r| r.serial_no != "12"));
        assert!(state.expanded.is_expanded("12"));

        state.set_year(None);
        state.toggle_expanded("12");
        assert_eq!(state.expanded, before);

        state.toggle_expanded("1");
        state.toggle_expanded("2");
        assert!(state.expanded.is_expanded("1"));
        assert!(state.expanded.is_expanded("2"));
        assert!(!state.expanded.is_expanded("12"));
    }

    #[test]
    fn failed_load_leaves_an_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.begin_load(dir.path().join("missing.csv"), false);
        assert!(state.loading);

        for _ in 0..500 {
            if state.poll_load() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(!state.loading);
        assert!(state.dataset.is_none());
        assert_eq!(state.visible_count(), 0);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn failed_open_is_reported_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::default();
        state.begin_load(dir.path().join("missing.csv"), true);
        for _ in 0..500 {
            if state.poll_load() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(state.status_message.is_some());
    }
}
