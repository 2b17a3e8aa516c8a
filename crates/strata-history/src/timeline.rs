//! Building the ordered timeline view from the raw record stack.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};

use crate::model::{ActionId, ActionRecord, RecordId};
use crate::node::{HistoryNode, group_refs};
use crate::scope::Scope;

/// How the undo and redo pointer rows sit relative to each other, for
/// renderers that draw the boundary between the applied and unapplied
/// halves of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundaryHint {
    /// Pointers are absent or have other nodes between them.
    Separate,
    /// Redo sits directly after undo, the usual mid-stack shape.
    Adjacent,
    /// Both pointers name the same node. [`build_timeline`] never
    /// produces this, but hand-assembled timelines can.
    Joined,
}

/// Snapshot view of the record stack: one node per user action, in
/// stack order, plus the global navigation pointers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub nodes: Vec<HistoryNode>,
    /// Index of the newest applied node, the next global undo target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undo_position: Option<usize>,
    /// Index of the oldest unapplied node, the next global redo target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redo_position: Option<usize>,
}

impl Timeline {
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.undo_position.is_some()
    }

    #[must_use]
    pub const fn can_redo(&self) -> bool {
        self.redo_position.is_some()
    }

    #[must_use]
    pub fn find_node(&self, id: &RecordId) -> Option<&HistoryNode> {
        self.nodes.iter().find(|node| node.id == *id)
    }

    #[must_use]
    pub const fn boundary_hint(&self) -> BoundaryHint {
        match (self.undo_position, self.redo_position) {
            (Some(undo), Some(redo)) if redo == undo => BoundaryHint::Joined,
            (Some(undo), Some(redo)) if redo == undo + 1 => BoundaryHint::Adjacent,
            _ => BoundaryHint::Separate,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Partition record indexes by action id, preserving first-occurrence
/// order. Records of one action are normally contiguous in the stack,
/// but interleaving is tolerated rather than assumed away.
pub(crate) fn action_groups(records: &[ActionRecord]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    let mut slots: HashMap<&ActionId, usize> = HashMap::new();
    for (position, record) in records.iter().enumerate() {
        match slots.entry(&record.action_id) {
            Entry::Occupied(slot) => groups[*slot.get()].push(position),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(vec![position]);
            }
        }
    }
    groups
}

/// Derive the full timeline for one scope.
///
/// Pointers are computed from the representative records alone, so
/// event-scoped flips (which never touch representatives) leave the
/// global navigation targets exactly where they were.
#[must_use]
pub fn build_timeline(records: &[ActionRecord], scope: &Scope) -> Timeline {
    let groups = action_groups(records);

    let nodes: Vec<HistoryNode> = groups
        .iter()
        .filter_map(|group| {
            let refs: Vec<&ActionRecord> = group.iter().map(|&index| &records[index]).collect();
            group_refs(&refs, scope)
        })
        .collect();

    let applied: Vec<bool> = groups
        .iter()
        .map(|group| records[group[0]].status.is_applied())
        .collect();

    Timeline {
        nodes,
        undo_position: applied.iter().rposition(|&is_applied| is_applied),
        redo_position: applied.iter().position(|&is_applied| !is_applied),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
