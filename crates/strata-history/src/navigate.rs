//! Dispatching navigation requests to the effectful undo/redo engine.

use tracing::debug;

use crate::model::{EventId, HistoryAction, RecordId};
use crate::scope::Scope;
use crate::timeline::Timeline;

/// The engine that owns the raw stack and performs the flips. The
/// navigator never observes success or failure; requests are
/// fire-and-forget.
///
/// [`ActionLog`](crate::log::ActionLog) is the canonical
/// implementation; hosts with their own persistence implement this
/// directly.
pub trait HistoryApplier {
    /// Unapply up to `count` actions, newest first.
    fn undo(&mut self, count: usize);
    /// Reapply up to `count` actions, oldest first.
    fn redo(&mut self, count: usize);
    /// Unapply every applied action back to (and including) the one
    /// whose representative record is `id`.
    fn undo_until(&mut self, id: &RecordId);
    /// Reapply every unapplied action forward to (and including) the
    /// one whose representative record is `id`.
    fn redo_until(&mut self, id: &RecordId);
    /// Scoped [`Self::undo`]: flip only records related to `event`.
    fn undo_for_event(&mut self, event: &EventId, count: usize);
    /// Scoped [`Self::redo`].
    fn redo_for_event(&mut self, event: &EventId, count: usize);
    /// Scoped [`Self::undo_until`].
    fn undo_for_event_until(&mut self, event: &EventId, id: &RecordId);
    /// Scoped [`Self::redo_until`].
    fn redo_for_event_until(&mut self, event: &EventId, id: &RecordId);
}

/// Gates navigation requests against a timeline snapshot and routes
/// them to the global or event-scoped applier entry points.
///
/// Requests that the snapshot does not permit are dropped without
/// touching the applier; a stale row id from the render layer must
/// never crash or misfire.
#[derive(Debug)]
pub struct Navigator<'a, A: ?Sized> {
    timeline: &'a Timeline,
    scope: &'a Scope,
    applier: &'a mut A,
}

impl<'a, A: HistoryApplier + ?Sized> Navigator<'a, A> {
    pub fn new(timeline: &'a Timeline, scope: &'a Scope, applier: &'a mut A) -> Self {
        Self {
            timeline,
            scope,
            applier,
        }
    }

    /// Whether anything is undoable in the current scope.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        match self.scope.event_scope() {
            Some(_) => self
                .timeline
                .nodes
                .iter()
                .any(|node| node.is_included && node.is_applied),
            None => self.timeline.can_undo(),
        }
    }

    /// Whether anything is redoable in the current scope.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        match self.scope.event_scope() {
            Some(_) => self
                .timeline
                .nodes
                .iter()
                .any(|node| node.is_included && !node.is_applied),
            None => self.timeline.can_redo(),
        }
    }

    /// Undo one action in the current scope.
    pub fn undo(&mut self) {
        if !self.can_undo() {
            debug!("undo requested with nothing to undo");
            return;
        }
        match self.scope.event_scope() {
            Some(event) => {
                debug!(%event, "dispatching event undo");
                self.applier.undo_for_event(event, 1);
            }
            None => {
                debug!("dispatching undo");
                self.applier.undo(1);
            }
        }
    }

    /// Redo one action in the current scope.
    pub fn redo(&mut self) {
        if !self.can_redo() {
            debug!("redo requested with nothing to redo");
            return;
        }
        match self.scope.event_scope() {
            Some(event) => {
                debug!(%event, "dispatching event redo");
                self.applier.redo_for_event(event, 1);
            }
            None => {
                debug!("dispatching redo");
                self.applier.redo(1);
            }
        }
    }

    /// Undo back to the node with representative record `id`.
    pub fn undo_by_id(&mut self, id: &RecordId) {
        let Some(node) = self.timeline.find_node(id) else {
            debug!(%id, "undo target is not in the timeline");
            return;
        };
        if !node.is_included
            || !node.is_applied
            || node.action != HistoryAction::Undo
            || !self.can_undo()
        {
            debug!(%id, "undo target is not undoable in this scope");
            return;
        }
        match self.scope.event_scope() {
            Some(event) => {
                debug!(%event, %id, "dispatching event undo to record");
                self.applier.undo_for_event_until(event, id);
            }
            None => {
                debug!(%id, "dispatching undo to record");
                self.applier.undo_until(id);
            }
        }
    }

    /// Redo forward to the node with representative record `id`.
    pub fn redo_by_id(&mut self, id: &RecordId) {
        let Some(node) = self.timeline.find_node(id) else {
            debug!(%id, "redo target is not in the timeline");
            return;
        };
        if !node.is_included
            || node.is_applied
            || node.action != HistoryAction::Redo
            || !self.can_redo()
        {
            debug!(%id, "redo target is not redoable in this scope");
            return;
        }
        match self.scope.event_scope() {
            Some(event) => {
                debug!(%event, %id, "dispatching event redo to record");
                self.applier.redo_for_event_until(event, id);
            }
            None => {
                debug!(%id, "dispatching redo to record");
                self.applier.redo_until(id);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
