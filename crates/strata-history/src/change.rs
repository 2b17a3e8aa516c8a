//! Per-record derivation: one raw record into its context-aware view.
//!
//! [`derive_change`] is pure; callers re-run it freely on every render and
//! memoize on the (record, scope) pair upstream.

// Derived views mirror the upstream wire shape, which is flag-heavy.
#![allow(clippy::struct_excessive_bools)]

use serde::{Deserialize, Serialize};

use crate::model::{ActionRecord, ConflictStatus, HistoryAction, RecordId};
use crate::scope::Scope;

/// Relationship between a change and the currently open event.
///
/// The three states are mutually exclusive by construction. Aggregation over
/// several changes keeps the strongest state: any live association to the
/// open event wins, then any live association to another event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Association {
    /// Live association to the open event.
    ToOpenEvent,
    /// Live association to some other event only.
    ToOtherEvent,
    /// No live event association.
    #[default]
    Unassociated,
}

impl Association {
    fn derive(record: &ActionRecord, scope: &Scope) -> Self {
        let open = scope.open_event.as_ref();
        if open.is_some_and(|event| record.is_actively_associated_to(event)) {
            Self::ToOpenEvent
        } else if record.has_any_active_association() {
            Self::ToOtherEvent
        } else {
            Self::Unassociated
        }
    }

    /// Strongest state over `states`; [`Association::Unassociated`] when empty.
    #[must_use]
    pub fn combine(states: impl IntoIterator<Item = Self>) -> Self {
        let mut seen_other = false;
        for state in states {
            match state {
                Self::ToOpenEvent => return Self::ToOpenEvent,
                Self::ToOtherEvent => seen_other = true,
                Self::Unassociated => {}
            }
        }
        if seen_other {
            Self::ToOtherEvent
        } else {
            Self::Unassociated
        }
    }

    #[must_use]
    pub const fn is_associated(self) -> bool {
        matches!(self, Self::ToOpenEvent)
    }

    #[must_use]
    pub const fn is_associated_to_other(self) -> bool {
        matches!(self, Self::ToOtherEvent)
    }

    #[must_use]
    pub const fn is_unassociated(self) -> bool {
        matches!(self, Self::Unassociated)
    }
}

/// One raw record annotated for the current view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryChange {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Direction this change navigates if activated.
    #[serde(rename = "type")]
    pub action: HistoryAction,
    pub is_applied: bool,
    pub association: Association,
    /// The open event appears in the record's association map, live or past.
    pub is_related_to_event: bool,
    /// Outside event mode everything is included; inside it, only changes
    /// related to the open event.
    pub is_included: bool,
    /// The open event's review status is COMPLETE.
    pub is_completed: bool,
    pub is_conflict_created: bool,
    pub is_conflict_resolved: bool,
    pub is_deletion: bool,
    pub is_rejection: bool,
}

impl HistoryChange {
    #[must_use]
    pub const fn is_associated(&self) -> bool {
        self.association.is_associated()
    }

    #[must_use]
    pub const fn is_associated_to_other(&self) -> bool {
        self.association.is_associated_to_other()
    }

    #[must_use]
    pub const fn is_unassociated(&self) -> bool {
        self.association.is_unassociated()
    }
}

/// Annotate one raw record for the view described by `scope`.
#[must_use]
pub fn derive_change(record: &ActionRecord, scope: &Scope) -> HistoryChange {
    let is_related_to_event = scope
        .open_event
        .as_ref()
        .is_some_and(|event| record.is_related_to(event));

    HistoryChange {
        id: record.id.clone(),
        label: record.label.clone(),
        description: record.description.clone(),
        action: HistoryAction::from(record.status),
        is_applied: record.status.is_applied(),
        association: Association::derive(record, scope),
        is_related_to_event,
        is_included: !scope.is_event_mode() || is_related_to_event,
        is_completed: scope.is_open_event_complete(),
        is_conflict_created: record.conflict_status == ConflictStatus::CreatedConflict,
        is_conflict_resolved: record.conflict_status == ConflictStatus::ResolvedConflict,
        is_deletion: record.is_deletion,
        is_rejection: record.is_rejection,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApplyStatus, ReviewStatus};

    fn record_with_events(events: &[(&str, bool)]) -> ActionRecord {
        let mut record = ActionRecord::new("r1", "a1", 0).with_text("Association", "details");
        for (event, active) in events {
            record = record.with_event(*event, *active);
        }
        record
    }

    #[test]
    fn associated_to_open_event() {
        let change = derive_change(
            &record_with_events(&[("e1", true)]),
            &Scope::event_scoped("e1"),
        );
        assert!(change.is_associated());
        assert!(!change.is_associated_to_other());
        assert!(!change.is_unassociated());
        assert!(change.is_related_to_event);
        assert!(change.is_included);
    }

    #[test]
    fn past_association_relates_without_associating() {
        // A `false` value marks a past association: the record is related to
        // the event, but another event holds the live association.
        let change = derive_change(
            &record_with_events(&[("e1", false), ("e2", true)]),
            &Scope::event_scoped("e1"),
        );
        assert!(!change.is_associated());
        assert!(change.is_associated_to_other());
        assert!(change.is_related_to_event);
        assert!(change.is_included);
    }

    #[test]
    fn unrelated_records_are_excluded_in_event_mode() {
        let change = derive_change(
            &record_with_events(&[("e2", true)]),
            &Scope::event_scoped("e1"),
        );
        assert!(change.is_associated_to_other());
        assert!(!change.is_related_to_event);
        assert!(!change.is_included);
    }

    #[test]
    fn no_open_event_means_unrelated() {
        let scope = Scope::global();
        let change = derive_change(&record_with_events(&[("e1", true)]), &scope);
        assert!(!change.is_related_to_event);
        assert!(change.is_included);
        assert!(change.is_associated_to_other());

        let change = derive_change(&record_with_events(&[]), &scope);
        assert!(change.is_unassociated());
    }

    #[test]
    fn direction_follows_status() {
        let mut record = record_with_events(&[]);
        let change = derive_change(&record, &Scope::global());
        assert_eq!(change.action, HistoryAction::Undo);
        assert!(change.is_applied);

        record.status = ApplyStatus::NotApplied;
        let change = derive_change(&record, &Scope::global());
        assert_eq!(change.action, HistoryAction::Redo);
        assert!(!change.is_applied);
    }

    #[test]
    fn completed_requires_fetched_complete_status() {
        let record = record_with_events(&[("e1", true)]);

        let scope = Scope::event_scoped("e1").with_status("e1", ReviewStatus::Complete);
        assert!(derive_change(&record, &scope).is_completed);

        let scope = Scope::event_scoped("e1").with_status("e1", ReviewStatus::InProgress);
        assert!(!derive_change(&record, &scope).is_completed);

        // Absent status reads as unknown, never completed.
        let scope = Scope::event_scoped("e1");
        assert!(!derive_change(&record, &scope).is_completed);
    }

    #[test]
    fn conflict_flags_mirror_conflict_status() {
        let record = record_with_events(&[]).with_conflict(ConflictStatus::CreatedConflict);
        let change = derive_change(&record, &Scope::global());
        assert!(change.is_conflict_created);
        assert!(!change.is_conflict_resolved);

        let record = record_with_events(&[]).with_conflict(ConflictStatus::ResolvedConflict);
        let change = derive_change(&record, &Scope::global());
        assert!(!change.is_conflict_created);
        assert!(change.is_conflict_resolved);
    }

    #[test]
    fn derivation_is_deterministic() {
        let record = record_with_events(&[("e1", true), ("e2", false)]);
        let scope = Scope::event_scoped("e1").with_status("e1", ReviewStatus::Complete);
        assert_eq!(derive_change(&record, &scope), derive_change(&record, &scope));
    }

    #[test]
    fn combine_keeps_the_strongest_state() {
        use Association::{ToOpenEvent, ToOtherEvent, Unassociated};
        assert_eq!(Association::combine([]), Unassociated);
        assert_eq!(Association::combine([Unassociated, Unassociated]), Unassociated);
        assert_eq!(Association::combine([Unassociated, ToOtherEvent]), ToOtherEvent);
        assert_eq!(
            Association::combine([ToOtherEvent, ToOpenEvent, Unassociated]),
            ToOpenEvent
        );
    }
}
