//! Error types produced by the form core.

use thiserror::Error;

/// Failures reported by form operations.
///
/// Per-field validation messages are not errors in this sense; they live in
/// [`ErrorEntry`](crate::core::types::ErrorEntry) values and never abort an
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// The host addressed a slot that does not exist. Indicates a stale index
    /// on the host side; the form state is left untouched.
    #[error("index {index} out of range for {len} record(s)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The submission sink rejected an accepted submission. The form has
    /// already been reset when this is returned.
    #[error("submission sink failed: {0}")]
    Sink(String),
}

pub type FormResult<T> = Result<T, FormError>;
