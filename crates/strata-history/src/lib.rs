#![forbid(unsafe_code)]
//! strata-history library.
//!
//! Derives the undo/redo history timeline for the strata review
//! workstation: raw change records in, grouped timeline nodes with
//! navigation pointers out, plus the scoped navigator that drives an
//! effectful applier.
//!
//! The stages compose as a pipeline: [`derive_change`] annotates one
//! record for a scope, [`group_action`] folds one action's records into
//! a [`HistoryNode`], [`build_timeline`] produces the ordered
//! [`Timeline`], and [`compute_affected`] previews hover ripples.
//! [`Navigator`] gates navigation requests against the snapshot and
//! dispatches them to a [`HistoryApplier`] such as [`ActionLog`].
//!
//! ```
//! use strata_history::{ActionLog, ActionRecord, Scope, build_timeline};
//!
//! let mut log = ActionLog::new();
//! log.record(vec![
//!     ActionRecord::new("r1", "a1", 0).with_text("Phase", "ASAR-P phase changed to Pg"),
//! ]);
//! log.undo(1);
//!
//! let timeline = build_timeline(log.records(), &Scope::global());
//! assert!(timeline.can_redo());
//! assert!(!timeline.can_undo());
//! ```
//!
//! # Conventions
//!
//! - **Errors**: derivation is infallible; typed errors appear only when
//!   parsing wire-format enum strings.
//! - **Logging**: `tracing` macros (`debug!`, `warn!`); no subscriber is
//!   installed here.

pub mod affected;
pub mod change;
pub mod label;
pub mod log;
pub mod model;
pub mod navigate;
pub mod node;
pub mod scope;
pub mod timeline;

pub use affected::compute_affected;
pub use change::{Association, HistoryChange, derive_change};
pub use label::{
    ActionLabels, AnalystAction, ArrivalTimeUpdate, DetectionArrival, DetectionSummary,
    EventSummary, LabelPair, describe,
};
pub use log::{ActionLog, StatusFlip, diff_status};
pub use model::{
    ActionId, ActionRecord, ApplyStatus, ConflictStatus, DetectionId, EventId, HistoryAction,
    HistoryMode, RecordId, ReviewStatus,
};
pub use navigate::{HistoryApplier, Navigator};
pub use node::{HistoryNode, group_action};
pub use scope::Scope;
pub use timeline::{BoundaryHint, Timeline, build_timeline};
