//! Data model for the raw action stack.
//!
//! | Module | Contents |
//! |---|---|
//! | [`ids`] | opaque id newtypes |
//! | [`status`] | wire-string enums |
//! | [`record`] | [`ActionRecord`], the raw stack entry |

pub mod ids;
pub mod record;
pub mod status;

pub use ids::{ActionId, DetectionId, EventId, RecordId};
pub use record::ActionRecord;
pub use status::{ApplyStatus, ConflictStatus, HistoryAction, HistoryMode, ReviewStatus};
