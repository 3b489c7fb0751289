//! Debounced query controller
//!
//! Owns the search box: the text typed so far, the suggestion panel and
//! the loading indicator. Keystrokes are debounced on a [`TimerQueue`];
//! when the timer fires the controller hands out a [`ResolveRequest`] and
//! waits for its result to come back through [`QueryController::on_resolved`].
//!
//! Every request carries a monotonically increasing id. With
//! `discard_stale` on, a result for anything but the newest request is
//! dropped, so a slow response can't overwrite a fresher list.

pub mod region;

use crate::config::Config;
use crate::geo::LocationCandidate;
use crate::timer::{TimerEvent, TimerId, TimerQueue};
use std::time::Duration;
use tracing::debug;

pub use region::{CaptureRegion, PagePoint};

/// Sequence number of a resolve request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// A settled query waiting to be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pub id: RequestId,
    pub query: String,
}

/// Tunables for the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_query_len: usize,
    pub discard_stale: bool,
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: config.search.debounce(),
            min_query_len: config.search.min_query_len,
            discard_stale: config.search.discard_stale,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// State machine behind the search box
#[derive(Debug)]
pub struct QueryController {
    settings: SearchSettings,
    region: CaptureRegion,
    query: String,
    suggestions: Vec<LocationCandidate>,
    open: bool,
    loading: bool,
    last_selected: Option<LocationCandidate>,
    pending_timer: Option<TimerId>,
    next_request: u64,
    awaiting: Option<RequestId>,
}

impl QueryController {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            region: CaptureRegion::default(),
            query: String::new(),
            suggestions: Vec::new(),
            open: false,
            loading: false,
            last_selected: None,
            pending_timer: None,
            next_request: 0,
            awaiting: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[LocationCandidate] {
        &self.suggestions
    }

    /// Whether the suggestion panel is showing
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_selected(&self) -> Option<&LocationCandidate> {
        self.last_selected.as_ref()
    }

    /// Where the control sits on the page
    pub fn set_region(&mut self, region: CaptureRegion) {
        self.region = region;
    }

    fn cancel_pending(&mut self, timers: &mut TimerQueue<TimerEvent>) {
        if let Some(id) = self.pending_timer.take() {
            timers.cancel(id);
        }
    }

    /// Stop waiting for whatever is in flight
    fn forget_in_flight(&mut self) {
        if self.settings.discard_stale && self.awaiting.take().is_some() {
            self.loading = false;
        }
    }

    /// A keystroke changed the input text
    pub fn on_text_changed(&mut self, text: &str, timers: &mut TimerQueue<TimerEvent>) {
        self.query = text.to_string();
        self.cancel_pending(timers);

        if text.trim().chars().count() < self.settings.min_query_len {
            self.suggestions.clear();
            self.open = false;
            self.forget_in_flight();
            return;
        }

        let id = timers.schedule(self.settings.debounce, TimerEvent::Debounce(text.to_string()));
        self.pending_timer = Some(id);
    }

    /// The debounce timer for `query` fired
    pub fn on_debounce_elapsed(&mut self, query: String) -> ResolveRequest {
        self.pending_timer = None;
        self.next_request += 1;
        let id = RequestId(self.next_request);
        self.awaiting = Some(id);
        self.loading = true;
        debug!(request = id.0, query = %query, "resolving");
        ResolveRequest { id, query }
    }

    /// A resolve request settled. Returns whether the result was applied.
    pub fn on_resolved(&mut self, id: RequestId, candidates: Vec<LocationCandidate>) -> bool {
        if self.settings.discard_stale && self.awaiting != Some(id) {
            debug!(request = id.0, "discarding stale suggestions");
            return false;
        }

        if self.awaiting == Some(id) {
            self.awaiting = None;
        }
        self.open = !candidates.is_empty();
        self.suggestions = candidates;
        self.loading = false;
        true
    }

    /// The user picked a suggestion
    ///
    /// Closes the panel and returns the candidate for the synchronizer.
    pub fn on_select(
        &mut self,
        candidate: &LocationCandidate,
        timers: &mut TimerQueue<TimerEvent>,
    ) -> LocationCandidate {
        self.cancel_pending(timers);
        self.forget_in_flight();
        self.open = false;
        self.query = candidate.display_name().to_string();
        self.last_selected = Some(candidate.clone());
        candidate.clone()
    }

    /// Explicit "go there" action; falls back to the last selection
    pub fn on_navigate_requested(
        &self,
        candidate: Option<&LocationCandidate>,
    ) -> Option<LocationCandidate> {
        candidate.or(self.last_selected.as_ref()).cloned()
    }

    /// Pointer pressed somewhere on the page. Returns true if the panel closed.
    pub fn on_pointer_down(&mut self, point: PagePoint) -> bool {
        if self.open && !self.region.contains(point) {
            self.open = false;
            return true;
        }
        false
    }

    /// Focus moved to another control
    pub fn on_focus_lost(&mut self) {
        self.open = false;
    }

    /// Focus returned to the input; reopen if there is something to show
    pub fn on_focus_gained(&mut self) {
        self.open = !self.suggestions.is_empty();
    }
}
