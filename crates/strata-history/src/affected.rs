//! Hover preview: which nodes an activation would flip.

use crate::node::HistoryNode;

/// Mark every node that activating `hovered` would flip along with it.
///
/// Activating an applied node undoes it together with every included
/// undo node after it; activating an unapplied node redoes it together
/// with every included redo node before it. A missing or out-of-range
/// hover marks nothing.
#[must_use]
pub fn compute_affected(nodes: &[HistoryNode], hovered: Option<usize>) -> Vec<bool> {
    let Some(hovered_index) = hovered else {
        return vec![false; nodes.len()];
    };
    let Some(target) = nodes.get(hovered_index) else {
        return vec![false; nodes.len()];
    };

    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let in_range = if target.is_applied {
                index >= hovered_index
            } else {
                index <= hovered_index
            };
            in_range && node.is_included && node.action == target.action
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
