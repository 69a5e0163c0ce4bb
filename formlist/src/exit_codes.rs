//! Stable exit codes for formlist CLI commands.

/// Command succeeded; the last submit (if any) was accepted.
pub const OK: i32 = 0;
/// Command failed: bad config, unreadable input, stale record index, or a
/// failing submission sink.
pub const INVALID: i32 = 1;
/// The last submit in `formlist run`, or the records given to
/// `formlist check`, failed validation.
pub const REJECTED: i32 = 2;
