//! View context for history derivation.
//!
//! Rather than reading the mode flag and open event from ambient selection
//! state, derivation takes them in a [`Scope`] value passed into every
//! call, so identical inputs always produce identical output and each call
//! is reproducible in isolation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{EventId, HistoryMode, ReviewStatus};

/// The analyst's current view context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    /// Event the analyst currently has open, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_event: Option<EventId>,
    /// Requested navigation mode.
    pub mode: HistoryMode,
    /// Review status snapshot for known events. Absent entries mean the
    /// status has not been fetched and read as not complete.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub review_statuses: BTreeMap<EventId, ReviewStatus>,
}

impl Scope {
    /// Global navigation with no open event.
    #[must_use]
    pub fn global() -> Self {
        Self::default()
    }

    /// Event-scoped navigation over `event`.
    #[must_use]
    pub fn event_scoped(event: impl Into<EventId>) -> Self {
        Self {
            open_event: Some(event.into()),
            mode: HistoryMode::Event,
            review_statuses: BTreeMap::new(),
        }
    }

    /// Record a fetched review status.
    #[must_use]
    pub fn with_status(mut self, event: impl Into<EventId>, status: ReviewStatus) -> Self {
        self.review_statuses.insert(event.into(), status);
        self
    }

    /// True when derivation must restrict inclusion to the open event.
    ///
    /// This is the raw mode flag: event mode with no open event relates to
    /// nothing, so every change derives as excluded.
    #[must_use]
    pub fn is_event_mode(&self) -> bool {
        self.mode == HistoryMode::Event
    }

    /// The event to dispatch scoped navigation against, when both the mode
    /// flag and an open event are present.
    #[must_use]
    pub fn event_scope(&self) -> Option<&EventId> {
        match self.mode {
            HistoryMode::Event => self.open_event.as_ref(),
            HistoryMode::Global => None,
        }
    }

    /// Review status of the open event, if fetched.
    #[must_use]
    pub fn open_event_status(&self) -> Option<ReviewStatus> {
        self.open_event
            .as_ref()
            .and_then(|event| self.review_statuses.get(event))
            .copied()
    }

    /// True when the open event's review status is [`ReviewStatus::Complete`].
    #[must_use]
    pub fn is_open_event_complete(&self) -> bool {
        self.open_event_status()
            .is_some_and(ReviewStatus::is_complete)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
