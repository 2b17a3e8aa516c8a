//! Raw entries of the append-only action stack.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::{ActionId, EventId, RecordId};
use super::status::{ApplyStatus, ConflictStatus};

/// One change record in the raw action stack.
///
/// A single user action (one [`ActionId`]) usually produces several records:
/// a representative carrying the action-level label, plus one per touched
/// event or detection. The representative carries no event associations;
/// per-entity records map every event they touch. Records without a
/// label/description pair are bookkeeping entries: display layers filter
/// them out of grouped changes, navigation still counts their action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    /// Unique id of this single change.
    pub id: RecordId,
    /// Shared id of the user action that produced this record.
    pub action_id: ActionId,
    /// Epoch seconds at which the action was recorded.
    pub time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ApplyStatus,
    pub conflict_status: ConflictStatus,
    /// The action deleted a domain object.
    pub is_deletion: bool,
    /// The action rejected a domain object.
    pub is_rejection: bool,
    /// Events this record touches. `true` marks a live association, `false`
    /// a past one that a later change deactivated; either way the key
    /// relates the record to the event for scoping.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub associated_events: BTreeMap<EventId, bool>,
}

impl ActionRecord {
    /// A freshly recorded change: applied, conflict-free, unlabeled.
    #[must_use]
    pub fn new(id: impl Into<RecordId>, action_id: impl Into<ActionId>, time: i64) -> Self {
        Self {
            id: id.into(),
            action_id: action_id.into(),
            time,
            label: None,
            description: None,
            status: ApplyStatus::Applied,
            conflict_status: ConflictStatus::None,
            is_deletion: false,
            is_rejection: false,
            associated_events: BTreeMap::new(),
        }
    }

    /// Stamp the user-visible label and description.
    #[must_use]
    pub fn with_text(mut self, label: impl Into<String>, description: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self.description = Some(description.into());
        self
    }

    /// Relate this record to an event. `active` distinguishes a live
    /// association from a past one.
    #[must_use]
    pub fn with_event(mut self, event: impl Into<EventId>, active: bool) -> Self {
        self.associated_events.insert(event.into(), active);
        self
    }

    #[must_use]
    pub const fn with_conflict(mut self, conflict_status: ConflictStatus) -> Self {
        self.conflict_status = conflict_status;
        self
    }

    /// True when both label and description are present; only such records
    /// surface as user-visible changes.
    #[must_use]
    pub const fn has_display_text(&self) -> bool {
        self.label.is_some() && self.description.is_some()
    }

    /// True when `event` appears in the association map, live or past.
    #[must_use]
    pub fn is_related_to(&self, event: &EventId) -> bool {
        self.associated_events.contains_key(event)
    }

    /// True when `event` is mapped as a live association.
    #[must_use]
    pub fn is_actively_associated_to(&self, event: &EventId) -> bool {
        self.associated_events.get(event).copied().unwrap_or(false)
    }

    /// True when any event is mapped as a live association.
    #[must_use]
    pub fn has_any_active_association(&self) -> bool {
        self.associated_events.values().any(|active| *active)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ActionRecord {
        ActionRecord::new("r1", "a1", 1_636_503_404)
            .with_text("Association", "ASAR-Pg associated to EV-2021-11-10 00:16:44.000")
            .with_event("e1", true)
            .with_event("e2", false)
    }

    #[test]
    fn new_records_are_applied_and_clean() {
        let record = ActionRecord::new("r1", "a1", 0);
        assert_eq!(record.status, ApplyStatus::Applied);
        assert_eq!(record.conflict_status, ConflictStatus::None);
        assert!(!record.has_display_text());
        assert!(record.associated_events.is_empty());
    }

    #[test]
    fn association_predicates() {
        let record = sample_record();
        let e1 = EventId::from("e1");
        let e2 = EventId::from("e2");
        let e3 = EventId::from("e3");

        assert!(record.is_related_to(&e1));
        assert!(record.is_related_to(&e2));
        assert!(!record.is_related_to(&e3));

        assert!(record.is_actively_associated_to(&e1));
        assert!(!record.is_actively_associated_to(&e2));
        assert!(!record.is_actively_associated_to(&e3));

        assert!(record.has_any_active_association());
        assert!(!ActionRecord::new("r2", "a1", 0).has_any_active_association());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["actionId"], "a1");
        assert_eq!(json["status"], "applied");
        assert_eq!(json["conflictStatus"], "none");
        assert_eq!(json["isDeletion"], false);
        assert_eq!(json["associatedEvents"]["e1"], true);
        assert_eq!(json["associatedEvents"]["e2"], false);
    }

    #[test]
    fn bookkeeping_records_omit_text_on_the_wire() {
        let json = serde_json::to_value(ActionRecord::new("r1", "a1", 0)).unwrap();
        assert!(json.get("label").is_none());
        assert!(json.get("description").is_none());
        assert!(json.get("associatedEvents").is_none());

        let back: ActionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, ActionRecord::new("r1", "a1", 0));
    }
}
