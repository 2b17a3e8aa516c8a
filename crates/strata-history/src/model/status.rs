//! Wire-string enums shared across the history model.
//!
//! String representations match the producing application's wire format
//! exactly, spaces included (`"not applied"`, `"created conflict"`), so
//! serialized stacks interoperate with snapshots captured upstream.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ApplyStatus
// ---------------------------------------------------------------------------

/// Whether a change record is currently in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplyStatus {
    /// The change is in effect.
    Applied,
    /// The change has been undone (or never re-applied).
    NotApplied,
}

impl ApplyStatus {
    /// Every status, in wire order.
    pub const ALL: [Self; 2] = [Self::Applied, Self::NotApplied];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::NotApplied => "not applied",
        }
    }

    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    /// The opposite status. Undo and redo flip records through this.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Applied => Self::NotApplied,
            Self::NotApplied => Self::Applied,
        }
    }
}

impl fmt::Display for ApplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown apply status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown apply status {0:?}: expected \"applied\" or \"not applied\"")]
pub struct UnknownApplyStatus(pub String);

impl FromStr for ApplyStatus {
    type Err = UnknownApplyStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(Self::Applied),
            "not applied" => Ok(Self::NotApplied),
            other => Err(UnknownApplyStatus(other.to_owned())),
        }
    }
}

impl Serialize for ApplyStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApplyStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ConflictStatus
// ---------------------------------------------------------------------------

/// Whether a change created or resolved an association conflict.
///
/// Stamped by the producer from a before/after diff of the conflict set; this
/// crate only carries it through to the derived view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConflictStatus {
    /// The change introduced at least one new conflict.
    CreatedConflict,
    /// The change removed at least one existing conflict.
    ResolvedConflict,
    /// No change to the conflict set.
    #[default]
    None,
}

impl ConflictStatus {
    /// Every status, in wire order.
    pub const ALL: [Self; 3] = [Self::CreatedConflict, Self::ResolvedConflict, Self::None];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedConflict => "created conflict",
            Self::ResolvedConflict => "resolved conflict",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ConflictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown conflict status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown conflict status {0:?}: expected \"created conflict\", \"resolved conflict\" or \"none\"")]
pub struct UnknownConflictStatus(pub String);

impl FromStr for ConflictStatus {
    type Err = UnknownConflictStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created conflict" => Ok(Self::CreatedConflict),
            "resolved conflict" => Ok(Self::ResolvedConflict),
            "none" => Ok(Self::None),
            other => Err(UnknownConflictStatus(other.to_owned())),
        }
    }
}

impl Serialize for ConflictStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConflictStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// HistoryAction
// ---------------------------------------------------------------------------

/// The navigation direction a history entry offers.
///
/// An applied entry can be undone, an unapplied one redone; the direction is
/// therefore a projection of [`ApplyStatus`] at the record level, though
/// grouped nodes may re-derive it from their included children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryAction {
    Undo,
    Redo,
}

impl HistoryAction {
    /// Both directions, in wire order.
    pub const ALL: [Self; 2] = [Self::Undo, Self::Redo];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Undo => "undo",
            Self::Redo => "redo",
        }
    }
}

impl From<ApplyStatus> for HistoryAction {
    fn from(status: ApplyStatus) -> Self {
        match status {
            ApplyStatus::Applied => Self::Undo,
            ApplyStatus::NotApplied => Self::Redo,
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown history action string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown history action {0:?}: expected \"undo\" or \"redo\"")]
pub struct UnknownHistoryAction(pub String);

impl FromStr for HistoryAction {
    type Err = UnknownHistoryAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "undo" => Ok(Self::Undo),
            "redo" => Ok(Self::Redo),
            other => Err(UnknownHistoryAction(other.to_owned())),
        }
    }
}

impl Serialize for HistoryAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HistoryAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// HistoryMode
// ---------------------------------------------------------------------------

/// Navigation scoping mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HistoryMode {
    /// Navigate the full stack.
    #[default]
    Global,
    /// Restrict navigation to changes related to the open event.
    Event,
}

impl HistoryMode {
    /// Both modes, in wire order.
    pub const ALL: [Self; 2] = [Self::Global, Self::Event];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Event => "event",
        }
    }

    /// The other mode. Hosts bind this to the mode-toggle hotkey.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Global => Self::Event,
            Self::Event => Self::Global,
        }
    }
}

impl fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown history mode string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown history mode {0:?}: expected \"global\" or \"event\"")]
pub struct UnknownHistoryMode(pub String);

impl FromStr for HistoryMode {
    type Err = UnknownHistoryMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Self::Global),
            "event" => Ok(Self::Event),
            other => Err(UnknownHistoryMode(other.to_owned())),
        }
    }
}

impl Serialize for HistoryMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HistoryMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ReviewStatus
// ---------------------------------------------------------------------------

/// Workflow review status of an event, fetched upstream.
///
/// Only [`ReviewStatus::Complete`] affects derivation (it marks changes on a
/// completed event); the remaining states are carried for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    InProgress,
    Complete,
    NotStarted,
    NotComplete,
}

impl ReviewStatus {
    /// Every status, in wire order.
    pub const ALL: [Self; 4] = [
        Self::InProgress,
        Self::Complete,
        Self::NotStarted,
        Self::NotComplete,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "IN_PROGRESS",
            Self::Complete => "COMPLETE",
            Self::NotStarted => "NOT_STARTED",
            Self::NotComplete => "NOT_COMPLETE",
        }
    }

    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown review status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown review status {0:?}: expected one of IN_PROGRESS, COMPLETE, NOT_STARTED, NOT_COMPLETE"
)]
pub struct UnknownReviewStatus(pub String);

impl FromStr for ReviewStatus {
    type Err = UnknownReviewStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETE" => Ok(Self::Complete),
            "NOT_STARTED" => Ok(Self::NotStarted),
            "NOT_COMPLETE" => Ok(Self::NotComplete),
            other => Err(UnknownReviewStatus(other.to_owned())),
        }
    }
}

impl Serialize for ReviewStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ReviewStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
