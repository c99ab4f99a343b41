//! Shared primitive types used across the screening core.

/// Identifier assigned to one screening run (one candidate against one list).
pub type ScreeningId = uuid::Uuid;

/// Position of a record in the watch-list as supplied by the caller.
pub type RowIndex = usize;

/// The column every watch-list record must expose.
pub const FULL_NAME_FIELD: &str = "Full Name";
