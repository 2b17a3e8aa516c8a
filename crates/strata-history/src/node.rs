//! Grouping the records of one user action into a single display node.

// Derived views mirror the upstream wire shape, which is flag-heavy.
#![allow(clippy::struct_excessive_bools)]

use serde::{Deserialize, Serialize};

use crate::change::{Association, HistoryChange, derive_change};
use crate::model::{ActionId, ActionRecord, ConflictStatus, HistoryAction, RecordId};
use crate::scope::Scope;

/// One user action in the timeline: the representative record's identity
/// plus the aggregated view of its user-visible changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryNode {
    /// Id of the representative (first) record.
    pub id: RecordId,
    pub action_id: ActionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Direction this node navigates if activated. In event mode this is
    /// re-derived from the included children, which may disagree with the
    /// representative after scoped flips.
    #[serde(rename = "type")]
    pub action: HistoryAction,
    pub is_applied: bool,
    pub association: Association,
    pub is_related_to_event: bool,
    pub is_included: bool,
    pub is_completed: bool,
    pub is_conflict_created: bool,
    pub is_conflict_resolved: bool,
    pub is_deletion: bool,
    pub is_rejection: bool,
    /// User-visible changes, in stack order. Bookkeeping records are
    /// filtered out; a node may legitimately have none.
    pub changes: Vec<HistoryChange>,
}

impl HistoryNode {
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

/// Group the records of one user action, first record as representative.
///
/// Returns `None` only for an empty slice. Records missing a label or
/// description are bookkeeping entries: they never surface in `changes`,
/// but the node itself is still produced (from the representative's own
/// text and status) so pointer arithmetic stays aligned with the stack.
#[must_use]
pub fn group_action(records: &[ActionRecord], scope: &Scope) -> Option<HistoryNode> {
    let refs: Vec<&ActionRecord> = records.iter().collect();
    group_refs(&refs, scope)
}

pub(crate) fn group_refs(records: &[&ActionRecord], scope: &Scope) -> Option<HistoryNode> {
    let representative = *records.first()?;

    let changes: Vec<HistoryChange> = records
        .iter()
        .filter(|record| record.has_display_text())
        .map(|record| derive_change(record, scope))
        .collect();

    let included = || changes.iter().filter(|change| change.is_included);
    let any_included = included().next().is_some();

    // In event mode the included children decide the direction; a node whose
    // representative still says applied can surface as redo after an
    // event-scoped undo flipped its children.
    let (action, is_applied) = if scope.is_event_mode() && any_included {
        (
            if included().any(|change| change.action == HistoryAction::Undo) {
                HistoryAction::Undo
            } else {
                HistoryAction::Redo
            },
            included().any(|change| change.is_applied),
        )
    } else {
        (
            HistoryAction::from(representative.status),
            representative.status.is_applied(),
        )
    };

    Some(HistoryNode {
        id: representative.id.clone(),
        action_id: representative.action_id.clone(),
        label: representative.label.clone(),
        description: representative.description.clone(),
        action,
        is_applied,
        association: Association::combine(changes.iter().map(|change| change.association)),
        is_related_to_event: changes.iter().any(|change| change.is_related_to_event),
        is_included: !scope.is_event_mode() || any_included,
        is_completed: changes.iter().any(|change| change.is_completed),
        is_conflict_created: representative.conflict_status == ConflictStatus::CreatedConflict
            || changes.iter().any(|change| change.is_conflict_created),
        is_conflict_resolved: representative.conflict_status == ConflictStatus::ResolvedConflict
            || changes.iter().any(|change| change.is_conflict_resolved),
        is_deletion: representative.is_deletion
            || changes.iter().any(|change| change.is_deletion),
        is_rejection: representative.is_rejection
            || changes.iter().any(|change| change.is_rejection),
        changes,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
