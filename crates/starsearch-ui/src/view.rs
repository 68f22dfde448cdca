//! Search view state
//!
//! The view tracks the loading flag, the error string and the rendered results of
//! the latest action. Each action takes a `Ticket` carrying a sequence number;
//! when two actions overlap, a completion older than one already applied is
//! dropped so a slow response never overwrites a newer one.

use crate::client::{ApiClient, ViewError};
use starsearch_core::{
    PeoplePage,
    format::{PersonCard, format_cards, format_text},
};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// A user action on the search page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search { name: String },
    Popular,
}

impl Action {
    pub fn search(name: impl Into<String>) -> Self {
        Action::Search { name: name.into() }
    }

    /// Prefix of the error string shown when the action fails
    pub fn error_prefix(&self) -> &'static str {
        match self {
            Action::Search { .. } => "An error occurred while searching",
            Action::Popular => "An error occurred while fetching the popular list",
        }
    }
}

/// Phase derived from the view flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Both renderings of one listing
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    pub text: String,
    pub cards: Vec<PersonCard>,
}

impl Rendering {
    pub fn from_page(page: &PeoplePage) -> Self {
        Self {
            text: format_text(&page.results),
            cards: format_cards(&page.results),
        }
    }
}

/// Copy of the view state for rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub results: Option<Rendering>,
}

impl ViewSnapshot {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Failed
        } else if self.results.is_some() {
            Phase::Loaded
        } else {
            Phase::Idle
        }
    }
}

/// Handle for one in-flight action
#[derive(Debug)]
pub struct Ticket {
    seq: u64,
    action: Action,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn action(&self) -> &Action {
        &self.action
    }
}

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    applied_seq: Option<u64>,
    snapshot: ViewSnapshot,
}

#[derive(Debug, Default)]
pub struct SearchView {
    inner: Mutex<Inner>,
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // The state is plain data, a panic elsewhere cannot leave it torn
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start an action: set loading, clear the previous error
    pub fn begin(&self, action: Action) -> Ticket {
        let mut inner = self.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.snapshot.loading = true;
        inner.snapshot.error = None;
        debug!(seq, ?action, "view action started");
        Ticket { seq, action }
    }

    /// Apply the outcome of an action. Returns false when the outcome was stale and dropped.
    pub fn complete(&self, ticket: Ticket, outcome: Result<PeoplePage, ViewError>) -> bool {
        let mut inner = self.lock();

        if inner.applied_seq.is_some_and(|applied| ticket.seq < applied) {
            debug!(seq = ticket.seq, "dropping stale view response");
            return false;
        }
        inner.applied_seq = Some(ticket.seq);

        // Stay loading while a newer action is still outstanding
        let newest = ticket.seq + 1 == inner.next_seq;
        if newest {
            inner.snapshot.loading = false;
        }

        match outcome {
            Ok(page) => {
                inner.snapshot.error = None;
                inner.snapshot.results = Some(Rendering::from_page(&page));
            }
            Err(e) => {
                let message = format!("{}: {}", ticket.action.error_prefix(), e);
                warn!("{}", message);
                inner.snapshot.error = Some(message);
                inner.snapshot.results = None;
            }
        }
        true
    }

    /// Run one action against the API and apply its outcome
    pub async fn run(&self, client: &ApiClient, action: Action) -> bool {
        let ticket = self.begin(action);
        let outcome = client.execute(ticket.action()).await;
        self.complete(ticket, outcome)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.lock().snapshot.clone()
    }
}
