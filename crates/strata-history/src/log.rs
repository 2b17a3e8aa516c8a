//! Reference action log: an owned record stack with linear-history
//! undo/redo over whole actions and event-scoped flips over related
//! records.
//!
//! Every operation is infallible. Requests that cannot be honored
//! (unknown ids, wrong-side targets, exhausted boundaries) degrade to
//! logged no-ops, mirroring how the review workstation absorbs stale
//! UI references.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{ActionId, ActionRecord, ApplyStatus, EventId, RecordId};
use crate::navigate::HistoryApplier;
use crate::timeline::action_groups;

/// Ordered record stack, append-only apart from redo-tail truncation
/// and `clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog {
    records: Vec<ActionRecord>,
}

impl ActionLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        debug!(records = self.records.len(), "clearing action log");
        self.records.clear();
    }

    /// Append the records of one logical action, truncating the
    /// unapplied tail first. Recording over a half-undone stack
    /// forgets the undone actions, the usual linear-history rule.
    pub fn record(&mut self, records: Vec<ActionRecord>) {
        if records.is_empty() {
            warn!("ignoring an empty action batch");
            return;
        }
        self.truncate_unapplied_tail();
        debug!(records = records.len(), "recording action");
        self.records.extend(records);
    }

    fn truncate_unapplied_tail(&mut self) {
        let dropped: HashSet<ActionId> = action_groups(&self.records)
            .iter()
            .filter(|group| !self.records[group[0]].status.is_applied())
            .map(|group| self.records[group[0]].action_id.clone())
            .collect();
        if dropped.is_empty() {
            return;
        }
        debug!(actions = dropped.len(), "truncating unapplied tail");
        self.records
            .retain(|record| !dropped.contains(&record.action_id));
    }

    // -----------------------------------------------------------------
    // Global navigation: whole actions flip at the boundary.
    // -----------------------------------------------------------------

    /// Unapply up to `count` actions, newest first.
    pub fn undo(&mut self, count: usize) {
        for _ in 0..count {
            if !self.undo_newest_applied() {
                break;
            }
        }
    }

    /// Reapply up to `count` actions, oldest first.
    pub fn redo(&mut self, count: usize) {
        for _ in 0..count {
            if !self.redo_oldest_unapplied() {
                break;
            }
        }
    }

    fn undo_newest_applied(&mut self) -> bool {
        let groups = action_groups(&self.records);
        let Some(group) = groups
            .into_iter()
            .rev()
            .find(|group| self.records[group[0]].status.is_applied())
        else {
            debug!("nothing left to undo");
            return false;
        };
        for index in group.into_iter().rev() {
            self.records[index].status = ApplyStatus::NotApplied;
        }
        true
    }

    fn redo_oldest_unapplied(&mut self) -> bool {
        let groups = action_groups(&self.records);
        let Some(group) = groups
            .into_iter()
            .find(|group| !self.records[group[0]].status.is_applied())
        else {
            debug!("nothing left to redo");
            return false;
        };
        for index in group {
            self.records[index].status = ApplyStatus::Applied;
        }
        true
    }

    /// Unapply every applied action from the boundary back to (and
    /// including) the action whose representative record is `id`.
    pub fn undo_until(&mut self, id: &RecordId) {
        let groups = action_groups(&self.records);
        let Some(target) = groups
            .iter()
            .position(|group| self.records[group[0]].id == *id)
        else {
            warn!(%id, "undo target is not in the stack");
            return;
        };
        if !self.records[groups[target][0]].status.is_applied() {
            debug!(%id, "undo target is already unapplied");
            return;
        }
        for group in groups[target..].iter().rev() {
            for &index in group.iter().rev() {
                self.records[index].status = ApplyStatus::NotApplied;
            }
        }
    }

    /// Reapply every unapplied action from the boundary forward to
    /// (and including) the action whose representative record is `id`.
    pub fn redo_until(&mut self, id: &RecordId) {
        let groups = action_groups(&self.records);
        let Some(target) = groups
            .iter()
            .position(|group| self.records[group[0]].id == *id)
        else {
            warn!(%id, "redo target is not in the stack");
            return;
        };
        if self.records[groups[target][0]].status.is_applied() {
            debug!(%id, "redo target is already applied");
            return;
        }
        for group in &groups[..=target] {
            for &index in group {
                self.records[index].status = ApplyStatus::Applied;
            }
        }
    }

    // -----------------------------------------------------------------
    // Event-scoped navigation: only records carrying the event key
    // flip. Representatives carry no event keys, so the global
    // boundary never moves under these.
    // -----------------------------------------------------------------

    /// Unapply up to `count` actions' records related to `event`,
    /// newest first. Unrelated records of the same actions keep their
    /// status.
    pub fn undo_for_event(&mut self, event: &EventId, count: usize) {
        for _ in 0..count {
            if !self.undo_newest_related(event) {
                break;
            }
        }
    }

    /// Reapply up to `count` actions' records related to `event`,
    /// oldest first.
    pub fn redo_for_event(&mut self, event: &EventId, count: usize) {
        for _ in 0..count {
            if !self.redo_oldest_related(event) {
                break;
            }
        }
    }

    fn undo_newest_related(&mut self, event: &EventId) -> bool {
        let Some(position) = self
            .records
            .iter()
            .rposition(|record| record.is_related_to(event) && record.status.is_applied())
        else {
            debug!(%event, "nothing left to undo for event");
            return false;
        };
        let action_id = self.records[position].action_id.clone();
        self.flip_related(&action_id, event, ApplyStatus::NotApplied);
        true
    }

    fn redo_oldest_related(&mut self, event: &EventId) -> bool {
        let Some(position) = self
            .records
            .iter()
            .position(|record| record.is_related_to(event) && !record.status.is_applied())
        else {
            debug!(%event, "nothing left to redo for event");
            return false;
        };
        let action_id = self.records[position].action_id.clone();
        self.flip_related(&action_id, event, ApplyStatus::Applied);
        true
    }

    fn flip_related(&mut self, action_id: &ActionId, event: &EventId, status: ApplyStatus) {
        for record in &mut self.records {
            if record.action_id == *action_id && record.is_related_to(event) {
                record.status = status;
            }
        }
    }

    /// Event-scoped [`Self::undo_until`]: ripple over the related
    /// records of the target action and every action after it.
    pub fn undo_for_event_until(&mut self, event: &EventId, id: &RecordId) {
        let groups = action_groups(&self.records);
        let Some(target) = groups
            .iter()
            .position(|group| self.records[group[0]].id == *id)
        else {
            warn!(%event, %id, "undo target is not in the stack");
            return;
        };
        let applied_related = groups[target].iter().any(|&index| {
            self.records[index].is_related_to(event) && self.records[index].status.is_applied()
        });
        if !applied_related {
            debug!(%event, %id, "undo target has nothing applied for event");
            return;
        }
        for group in groups[target..].iter().rev() {
            for &index in group.iter().rev() {
                if self.records[index].is_related_to(event) {
                    self.records[index].status = ApplyStatus::NotApplied;
                }
            }
        }
    }

    /// Event-scoped [`Self::redo_until`].
    pub fn redo_for_event_until(&mut self, event: &EventId, id: &RecordId) {
        let groups = action_groups(&self.records);
        let Some(target) = groups
            .iter()
            .position(|group| self.records[group[0]].id == *id)
        else {
            warn!(%event, %id, "redo target is not in the stack");
            return;
        };
        let unapplied_related = groups[target].iter().any(|&index| {
            self.records[index].is_related_to(event) && !self.records[index].status.is_applied()
        });
        if !unapplied_related {
            debug!(%event, %id, "redo target has nothing unapplied for event");
            return;
        }
        for group in &groups[..=target] {
            for &index in group {
                if self.records[index].is_related_to(event) {
                    self.records[index].status = ApplyStatus::Applied;
                }
            }
        }
    }

    // -----------------------------------------------------------------
    // Position queries, record-level, mirroring the hook layer.
    // -----------------------------------------------------------------

    /// Stack index of the newest applied record.
    #[must_use]
    pub fn undo_position(&self) -> Option<usize> {
        self.records
            .iter()
            .rposition(|record| record.status.is_applied())
    }

    /// Stack index of the oldest unapplied record.
    #[must_use]
    pub fn redo_position(&self) -> Option<usize> {
        self.records
            .iter()
            .position(|record| !record.status.is_applied())
    }

    #[must_use]
    pub fn undo_position_for_event(&self, event: &EventId) -> Option<usize> {
        self.records
            .iter()
            .rposition(|record| record.is_related_to(event) && record.status.is_applied())
    }

    #[must_use]
    pub fn redo_position_for_event(&self, event: &EventId) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.is_related_to(event) && !record.status.is_applied())
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo_position().is_some()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.redo_position().is_some()
    }

    #[must_use]
    pub fn can_undo_for_event(&self, event: &EventId) -> bool {
        self.undo_position_for_event(event).is_some()
    }

    #[must_use]
    pub fn can_redo_for_event(&self, event: &EventId) -> bool {
        self.redo_position_for_event(event).is_some()
    }
}

impl HistoryApplier for ActionLog {
    fn undo(&mut self, count: usize) {
        Self::undo(self, count);
    }

    fn redo(&mut self, count: usize) {
        Self::redo(self, count);
    }

    fn undo_until(&mut self, id: &RecordId) {
        Self::undo_until(self, id);
    }

    fn redo_until(&mut self, id: &RecordId) {
        Self::redo_until(self, id);
    }

    fn undo_for_event(&mut self, event: &EventId, count: usize) {
        Self::undo_for_event(self, event, count);
    }

    fn redo_for_event(&mut self, event: &EventId, count: usize) {
        Self::redo_for_event(self, event, count);
    }

    fn undo_for_event_until(&mut self, event: &EventId, id: &RecordId) {
        Self::undo_for_event_until(self, event, id);
    }

    fn redo_for_event_until(&mut self, event: &EventId, id: &RecordId) {
        Self::redo_for_event_until(self, event, id);
    }
}

// ---------------------------------------------------------------------------
// Status diffing
// ---------------------------------------------------------------------------

/// One record's status transition between two stack snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFlip {
    pub id: RecordId,
    pub action_id: ActionId,
    /// The status the record transitioned to.
    pub status: ApplyStatus,
}

/// Compare two stack snapshots id-by-id and report every status
/// transition in replay order: flips to unapplied newest-first, then
/// flips to applied oldest-first. Records present in only one snapshot
/// are not transitions and are skipped.
#[must_use]
pub fn diff_status(before: &[ActionRecord], after: &[ActionRecord]) -> Vec<StatusFlip> {
    let statuses: HashMap<&RecordId, ApplyStatus> = after
        .iter()
        .map(|record| (&record.id, record.status))
        .collect();

    let mut undos = Vec::new();
    let mut redos = Vec::new();
    for record in before {
        let Some(&status) = statuses.get(&record.id) else {
            continue;
        };
        if status == record.status {
            continue;
        }
        let flip = StatusFlip {
            id: record.id.clone(),
            action_id: record.action_id.clone(),
            status,
        };
        match status {
            ApplyStatus::NotApplied => undos.push(flip),
            ApplyStatus::Applied => redos.push(flip),
        }
    }
    undos.reverse();
    undos.extend(redos);
    undos
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
