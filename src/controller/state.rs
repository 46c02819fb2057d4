use std::sync::Arc;

use crate::cursor::Cursor;
use crate::filter::{self, SearchFields};
use crate::loader::{LoadError, LoadStatus};
use crate::profile::ProfileRecord;
use crate::toggles::{DisplayToggleSet, InvalidToggleName, ToggleName, ToggleSetManager};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorMove {
    Next,
    Prev,
    GoTo(isize),
}

/// Everything one roster view session knows.
///
/// `visible` and `cursor` are derived from `(all_records, query)` and are
/// recomputed only by [`RosterState::apply_load`] and
/// [`RosterState::apply_query`]. Toggle changes never touch them.
#[derive(Clone, Debug)]
pub struct RosterState {
    all_records: Arc<[ProfileRecord]>,
    query: String,
    toggles: ToggleSetManager,
    search_fields: SearchFields,
    visible: Vec<usize>,
    cursor: Cursor,
    load_status: LoadStatus,
}

impl RosterState {
    pub fn new(default_toggles: DisplayToggleSet, search_fields: SearchFields) -> Self {
        Self {
            all_records: Arc::from(Vec::<ProfileRecord>::new()),
            query: String::new(),
            toggles: ToggleSetManager::new(default_toggles),
            search_fields,
            visible: Vec::new(),
            cursor: Cursor::default(),
            load_status: LoadStatus::Idle,
        }
    }

    pub fn all_records(&self) -> &[ProfileRecord] {
        &self.all_records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn toggles(&self) -> &DisplayToggleSet {
        self.toggles.current()
    }

    pub fn default_toggles(&self) -> &DisplayToggleSet {
        self.toggles.defaults()
    }

    pub fn search_fields(&self) -> &SearchFields {
        &self.search_fields
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor.index()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn visible_records(&self) -> impl Iterator<Item = &ProfileRecord> + '_ {
        self.visible.iter().map(move |&i| &self.all_records[i])
    }

    pub fn visible_record(&self, position: usize) -> Option<&ProfileRecord> {
        self.visible.get(position).map(|&i| &self.all_records[i])
    }

    pub fn current(&self) -> Option<&ProfileRecord> {
        self.cursor.index().and_then(|i| self.visible_record(i))
    }

    /// `Idle -> Loading`. Returns false from any other status.
    pub fn mark_loading(&mut self) -> bool {
        if self.load_status != LoadStatus::Idle {
            return false;
        }
        self.load_status = LoadStatus::Loading;
        true
    }

    /// `Loading -> Ready | Failed`. A failure keeps the record set empty.
    pub fn apply_load(&mut self, result: Result<Vec<ProfileRecord>, LoadError>) {
        match result {
            Ok(records) => {
                self.all_records = Arc::from(records);
                self.load_status = LoadStatus::Ready;
            }
            Err(e) => {
                self.all_records = Arc::from(Vec::<ProfileRecord>::new());
                self.load_status = LoadStatus::Failed(e.to_string());
            }
        }
        self.rederive();
    }

    /// Commits a new query. An identical query is not a change and leaves the
    /// cursor where it is; any other query re-filters and sends the cursor
    /// back to the first match.
    pub fn apply_query(&mut self, query: &str) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query.to_string();
        self.rederive();
        self.cursor.reset(self.visible.len());
        log::trace!(
            "query {:?} leaves {} of {} records visible",
            self.query,
            self.visible.len(),
            self.all_records.len()
        );
        true
    }

    /// Flips one display toggle, returning its new value.
    pub fn apply_toggle(&mut self, name: ToggleName) -> bool {
        self.toggles.toggle(name)
    }

    pub fn apply_toggle_named(&mut self, name: &str) -> Result<bool, InvalidToggleName> {
        self.toggles.toggle_named(name)
    }

    /// Returns true when the toggles actually changed.
    pub fn reset_toggles(&mut self) -> bool {
        let before = *self.toggles.current();
        self.toggles.reset();
        before != *self.toggles.current()
    }

    /// Returns true when the cursor moved.
    pub fn advance_cursor(&mut self, movement: CursorMove) -> bool {
        let len = self.visible.len();
        let before = self.cursor;
        match movement {
            CursorMove::Next => self.cursor.next(len),
            CursorMove::Prev => self.cursor.prev(len),
            CursorMove::GoTo(target) => {
                self.cursor.go_to(target, len);
            }
        }
        before != self.cursor
    }

    fn rederive(&mut self) {
        self.visible = filter::compute_visible(&self.all_records, &self.query, &self.search_fields);
        self.cursor.reclamp(self.visible.len());
    }
}

impl Default for RosterState {
    fn default() -> Self {
        Self::new(DisplayToggleSet::CURATED, SearchFields::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(state: &RosterState) -> Vec<String> {
        state.visible_records().map(|r| r.display_name()).collect()
    }

    fn loaded(first_names: &[&str]) -> RosterState {
        let mut state = RosterState::default();
        assert!(state.mark_loading());
        state.apply_load(Ok(first_names
            .iter()
            .map(|n| ProfileRecord::named(n, ""))
            .collect()));
        state
    }

    #[test]
    fn loading_is_inert() {
        let mut state = RosterState::default();
        assert!(state.mark_loading());
        assert!(!state.mark_loading());
        assert!(!state.advance_cursor(CursorMove::Next));
        assert_eq!(state.cursor(), None);
        assert_eq!(state.visible_len(), 0);
    }

    #[test]
    fn empty_query_shows_everything_in_order() {
        let state = loaded(&["Carol", "Ann", "Bob"]);
        assert_eq!(names(&state), vec!["Carol", "Ann", "Bob"]);
        assert_eq!(state.cursor(), Some(0));
    }

    #[test]
    fn narrowing_reclamps_then_resets() {
        let mut state = loaded(&["Ann", "Bob", "Anna"]);
        assert!(state.advance_cursor(CursorMove::GoTo(2)));
        assert!(state.apply_query("bob"));
        assert_eq!(state.cursor(), Some(0));
        assert!(state.apply_query("zzz"));
        assert_eq!(state.cursor(), None);
        assert!(state.current().is_none());
    }

    #[test]
    fn repeated_query_keeps_cursor() {
        let mut state = loaded(&["Ann", "Bob", "Anna"]);
        state.apply_query("an");
        state.advance_cursor(CursorMove::Next);
        assert!(!state.apply_query("an"));
        assert_eq!(state.cursor(), Some(1));
    }

    #[test]
    fn toggles_do_not_touch_visible_set() {
        let mut state = loaded(&["Ann", "Bob"]);
        state.advance_cursor(CursorMove::Next);
        state.apply_toggle(ToggleName::Mascot);
        assert_eq!(state.cursor(), Some(1));
        assert_eq!(state.visible_len(), 2);
        assert!(state.apply_toggle_named("bogus").is_err());
    }

    #[test]
    fn failed_load_records_reason() {
        let mut state = RosterState::default();
        state.mark_loading();
        state.apply_load(Err(LoadError::Status { code: 404 }));
        assert_eq!(
            state.load_status(),
            &LoadStatus::Failed("HTTP 404: Failed to fetch student data".to_string())
        );
        assert_eq!(state.cursor(), None);
    }
}
