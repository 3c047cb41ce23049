//! Paging, search and filter state shared by every list page.
//!
//! All transitions are explicit events: a keystroke ([`ListState::type_search`]),
//! a timer firing ([`ListState::tick`]), a filter or page change. Callers pass the
//! current [`Instant`] in, so the state machine never reads a clock itself.

use std::time::Duration;

#[cfg(not(target_family = "wasm"))]
pub use std::time::Instant;
#[cfg(target_family = "wasm")]
pub use web_time::Instant;

use crate::{schema::PaginationMeta, services::ListParams};

/// Delay between the last keystroke and the search being applied
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(400);

/// Debounced text input.
///
/// Keystrokes only record the text and push a deadline back; the text becomes
/// the committed value once a tick arrives at or after the deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer {
    delay: Duration,
    input: String,
    committed: String,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            input: String::new(),
            committed: String::new(),
            deadline: None,
        }
    }

    /// Record a keystroke at `now`
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.input = text.into();
        self.deadline = Some(now + self.delay);
    }

    /// Commit the pending text if its deadline has passed.
    ///
    /// Returns the new committed value when it changed.
    pub fn fire(&mut self, now: Instant) -> Option<&str> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.flush()
    }

    /// Commit the pending text immediately
    pub fn flush(&mut self) -> Option<&str> {
        self.deadline = None;
        if self.input == self.committed {
            return None;
        }
        self.committed = self.input.clone();
        Some(&self.committed)
    }

    /// Set both the input and committed value, e.g. when restoring from a URL
    pub fn reset_to(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.committed = self.input.clone();
        self.deadline = None;
    }

    /// What the input box shows
    pub fn input_text(&self) -> &str {
        &self.input
    }

    /// What queries use
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// When the pending text will be committed, if anything is pending
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// List page state: 1-based page, page size, debounced search and filters `F`
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<F> {
    search: Debouncer,
    page: u32,
    per_page: u32,
    default_per_page: u32,
    filters: F,
}

impl<F: Clone + PartialEq + Default> ListState<F> {
    pub fn new(per_page: u32) -> Self {
        let per_page = per_page.max(1);
        Self {
            search: Debouncer::new(SEARCH_DEBOUNCE),
            page: 1,
            per_page,
            default_per_page: per_page,
            filters: F::default(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn default_per_page(&self) -> u32 {
        self.default_per_page
    }

    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn search(&self) -> &Debouncer {
        &self.search
    }

    /// Keystroke in the search box. Nothing is refetched until [`ListState::tick`].
    pub fn type_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Timer event. Returns `true` when the committed search changed, in which
    /// case the page is back at 1.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.search.fire(now).is_some();
        if changed {
            self.page = 1;
        }
        changed
    }

    /// Apply the search box immediately (enter key)
    pub fn submit_search(&mut self) -> bool {
        let changed = self.search.flush().is_some();
        if changed {
            self.page = 1;
        }
        changed
    }

    /// Replace the filters; any change resets the page to 1
    pub fn set_filters(&mut self, filters: F) -> bool {
        if self.filters == filters {
            return false;
        }
        self.filters = filters;
        self.page = 1;
        true
    }

    /// Edit the filters in place; any change resets the page to 1
    pub fn update_filters(&mut self, edit: impl FnOnce(&mut F)) -> bool {
        let mut filters = self.filters.clone();
        edit(&mut filters);
        self.set_filters(filters)
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// A different page size invalidates the current page number
    pub fn set_per_page(&mut self, per_page: u32) -> bool {
        let per_page = per_page.max(1);
        if self.per_page == per_page {
            return false;
        }
        self.per_page = per_page;
        self.page = 1;
        true
    }

    pub fn next_page(&mut self, meta: &PaginationMeta) -> bool {
        meta.has_next() && self.set_page(meta.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.page > 1 && self.set_page(self.page - 1)
    }

    /// Back to page 1 with no search and default filters
    pub fn clear(&mut self) {
        self.search.reset_to("");
        self.filters = F::default();
        self.page = 1;
        self.per_page = self.default_per_page;
    }

    /// Paging and committed search for the list request
    pub fn list_params(&self) -> ListParams {
        let search = self.search.committed().trim();
        ListParams {
            page: Some(self.page),
            per_page: Some(self.per_page),
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    pub(crate) fn restore(&mut self, page: u32, per_page: u32, search: &str, filters: F) {
        self.page = page.max(1);
        self.per_page = per_page.max(1);
        self.search.reset_to(search);
        self.filters = filters;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Filters {
        active: Option<bool>,
    }

    #[test]
    fn search_commits_only_after_debounce() {
        let start = Instant::now();
        let mut state = ListState::<Filters>::new(15);
        state.set_page(3);

        state.type_search("rye", start);
        assert!(!state.tick(start + Duration::from_millis(399)));
        assert_eq!(state.page(), 3);
        assert_eq!(state.list_params().search, None);

        // another keystroke pushes the deadline back
        state.type_search("rye bread", start + Duration::from_millis(300));
        assert!(!state.tick(start + Duration::from_millis(500)));

        assert!(state.tick(start + Duration::from_millis(700)));
        assert_eq!(state.page(), 1);
        assert_eq!(state.list_params().search.as_deref(), Some("rye bread"));
    }

    #[test]
    fn retyping_committed_text_does_not_reset_page() {
        let start = Instant::now();
        let mut state = ListState::<Filters>::new(15);
        state.type_search("cake", start);
        state.tick(start + SEARCH_DEBOUNCE);
        state.set_page(2);

        state.type_search("cake", start + Duration::from_secs(1));
        assert!(!state.tick(start + Duration::from_secs(2)));
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut state = ListState::<Filters>::new(15);
        state.set_page(4);
        assert!(!state.update_filters(|_| {}));
        assert_eq!(state.page(), 4);

        assert!(state.update_filters(|f| f.active = Some(true)));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn per_page_change_resets_page() {
        let mut state = ListState::<Filters>::new(15);
        state.set_page(2);
        assert!(state.set_per_page(50));
        assert_eq!((state.page(), state.per_page()), (1, 50));
    }

    #[test]
    fn paging_respects_meta() {
        let mut state = ListState::<Filters>::new(10);
        let meta = PaginationMeta {
            current_page: 1,
            per_page: 10,
            total: 15,
            last_page: 2,
            links: Vec::new(),
        };
        assert!(state.next_page(&meta));
        let meta = PaginationMeta {
            current_page: 2,
            ..meta
        };
        assert!(!state.next_page(&meta));
        assert!(state.previous_page());
        assert!(!state.previous_page());
    }
}
