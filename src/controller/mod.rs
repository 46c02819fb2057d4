//! The roster view controller.
//!
//! [`RosterController`] owns one [`RosterState`] and turns user actions
//! (`set_query`, `toggle`, `next`, `prev`, `go_to`, `reset_filters`) into
//! state transitions. After every transition that changes something it hands
//! a [`RosterSnapshot`] to each registered [`RosterObserver`]; rendering is
//! entirely the observer's business.
//!
//! Loading is split in two so the network call can run without holding the
//! controller: [`RosterController::begin_load`] issues a [`LoadTicket`], and
//! [`RosterController::finish_load`] applies the result only if the ticket is
//! still current and the session has not been torn down.

mod session;
mod state;

pub use session::RosterSession;
pub use state::{CursorMove, RosterState};

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::filter::SearchFields;
use crate::loader::{LoadError, LoadStatus};
use crate::profile::ProfileRecord;
use crate::toggles::{DisplayToggleSet, InvalidToggleName, ToggleName};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// What a renderer receives on every state change.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot<'a> {
    pub load_status: &'a LoadStatus,
    pub visible_records: Vec<&'a ProfileRecord>,
    pub cursor: Option<usize>,
    pub toggles: &'a DisplayToggleSet,
    pub query: &'a str,
    pub total_records: usize,
}

impl<'a> RosterSnapshot<'a> {
    pub fn from_state(state: &'a RosterState) -> Self {
        Self {
            load_status: state.load_status(),
            visible_records: state.visible_records().collect(),
            cursor: state.cursor(),
            toggles: state.toggles(),
            query: state.query(),
            total_records: state.all_records().len(),
        }
    }

    pub fn current(&self) -> Option<&'a ProfileRecord> {
        self.cursor
            .and_then(|i| self.visible_records.get(i))
            .copied()
    }

    /// Quick navigation entries for every visible record, in order.
    pub fn quick_nav(&self) -> Vec<NavEntry> {
        self.visible_records
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let mut label = record.display_name();
                if let Some(preferred) = record.preferred_name() {
                    label.push_str(&format!(" ({preferred})"));
                }
                NavEntry {
                    position,
                    key: record.nav_key(position),
                    label,
                    active: self.cursor == Some(position),
                }
            })
            .collect()
    }
}

/// Renderer collaborator.
pub trait RosterObserver: Send {
    fn on_change(&mut self, snapshot: &RosterSnapshot<'_>);
}

/// Proof that this controller started the load it is about to finish.
#[derive(Debug, PartialEq, Eq)]
pub struct LoadTicket {
    session: u64,
}

/// One entry of the quick navigation list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub position: usize,
    pub key: String,
    pub label: String,
    pub active: bool,
}

#[derive(Clone, Debug)]
pub struct ControllerOptions {
    pub default_toggles: DisplayToggleSet,
    pub search_fields: SearchFields,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            default_toggles: DisplayToggleSet::CURATED,
            search_fields: SearchFields::default(),
        }
    }
}

pub struct RosterController {
    session: u64,
    state: RosterState,
    observers: Vec<Box<dyn RosterObserver>>,
    torn_down: bool,
}

impl RosterController {
    pub fn new(options: ControllerOptions) -> Self {
        Self {
            session: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            state: RosterState::new(options.default_toggles, options.search_fields),
            observers: Vec::new(),
            torn_down: false,
        }
    }

    pub fn subscribe(&mut self, observer: impl RosterObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub fn snapshot(&self) -> RosterSnapshot<'_> {
        RosterSnapshot::from_state(&self.state)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn current(&self) -> Option<&ProfileRecord> {
        self.state.current()
    }

    /// `(visible, total)`.
    pub fn counts(&self) -> (usize, usize) {
        (self.state.visible_len(), self.state.all_records().len())
    }

    pub fn quick_nav(&self) -> Vec<NavEntry> {
        self.snapshot().quick_nav()
    }

    /// Starts the one and only load of this session.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.torn_down || !self.state.mark_loading() {
            log::debug!(
                "session {}: load not started (status {})",
                self.session,
                self.state.load_status()
            );
            return None;
        }
        log::debug!("session {}: loading roster", self.session);
        self.notify();
        Some(LoadTicket {
            session: self.session,
        })
    }

    /// Applies a load result. Returns false, leaving the state untouched, if
    /// the session was torn down meanwhile or the ticket is not this load's.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ProfileRecord>, LoadError>,
    ) -> bool {
        if self.torn_down {
            log::debug!(
                "session {}: discarding roster response after teardown",
                self.session
            );
            return false;
        }
        if ticket.session != self.session || *self.state.load_status() != LoadStatus::Loading {
            log::warn!(
                "session {}: ignoring stale load ticket from session {}",
                self.session,
                ticket.session
            );
            return false;
        }
        match &result {
            Ok(records) => log::debug!(
                "session {}: loaded {} records",
                self.session,
                records.len()
            ),
            Err(e) => log::warn!("session {}: roster load failed: {e}", self.session),
        }
        self.state.apply_load(result);
        self.notify();
        true
    }

    pub fn set_query(&mut self, query: &str) {
        if self.state.apply_query(query) {
            self.notify();
        }
    }

    pub fn toggle(&mut self, name: ToggleName) -> bool {
        let value = self.state.apply_toggle(name);
        self.notify();
        value
    }

    /// Flips the toggle called `name`. Unknown names fail without touching
    /// the state.
    pub fn toggle_named(&mut self, name: &str) -> Result<bool, InvalidToggleName> {
        let value = self.state.apply_toggle_named(name)?;
        self.notify();
        Ok(value)
    }

    pub fn next(&mut self) {
        self.navigate(CursorMove::Next);
    }

    pub fn prev(&mut self) {
        self.navigate(CursorMove::Prev);
    }

    /// Out-of-range targets are ignored. Returns whether the cursor moved.
    pub fn go_to(&mut self, index: isize) -> bool {
        self.navigate(CursorMove::GoTo(index))
    }

    /// Clears the query and restores the default toggles.
    pub fn reset_filters(&mut self) {
        let query_changed = self.state.apply_query("");
        let toggles_changed = self.state.reset_toggles();
        if query_changed || toggles_changed {
            self.notify();
        }
    }

    /// Ends the session. Observers are dropped and any load still in flight
    /// will be discarded when it lands.
    pub fn teardown(&mut self) {
        log::debug!("session {}: teardown", self.session);
        self.torn_down = true;
        self.observers.clear();
    }

    fn navigate(&mut self, movement: CursorMove) -> bool {
        let moved = self.state.advance_cursor(movement);
        if moved {
            self.notify();
        }
        moved
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = RosterSnapshot::from_state(&self.state);
        for observer in self.observers.iter_mut() {
            observer.on_change(&snapshot);
        }
    }
}

impl Default for RosterController {
    fn default() -> Self {
        Self::new(ControllerOptions::default())
    }
}

impl std::fmt::Debug for RosterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RosterController")
            .field("session", &self.session)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}
