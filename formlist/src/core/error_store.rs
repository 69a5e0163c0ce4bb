//! Per-record error collection, kept index-aligned with the record list.

use crate::core::error::{FormError, FormResult};
use crate::core::types::{ErrorEntry, Field};

/// A fresh form: exactly one empty error entry.
pub fn initialize() -> Vec<ErrorEntry> {
    vec![ErrorEntry::default()]
}

/// `len` empty entries; the shape of the store after a successful submit.
pub fn cleared(len: usize) -> Vec<ErrorEntry> {
    vec![ErrorEntry::default(); len]
}

/// Drop the message for one field at `index`. The field is not re-validated.
pub fn clear_field(
    errors: &[ErrorEntry],
    index: usize,
    field: Field,
) -> FormResult<Vec<ErrorEntry>> {
    let target = errors.get(index).ok_or(FormError::IndexOutOfRange {
        index,
        len: errors.len(),
    })?;
    let mut next = errors.to_vec();
    next[index] = target.without(field);
    Ok(next)
}

pub fn append_empty(errors: &[ErrorEntry]) -> Vec<ErrorEntry> {
    let mut next = Vec::with_capacity(errors.len() + 1);
    next.extend_from_slice(errors);
    next.push(ErrorEntry::default());
    next
}

/// Mirror of [`field_list::remove_at`](crate::core::field_list::remove_at).
pub fn remove_at(errors: &[ErrorEntry], index: usize) -> FormResult<Vec<ErrorEntry>> {
    if index >= errors.len() {
        return Err(FormError::IndexOutOfRange {
            index,
            len: errors.len(),
        });
    }
    let mut next = errors.to_vec();
    next.remove(index);
    Ok(next)
}

/// Wholesale replacement with a freshly validated collection.
pub fn replace_all(_errors: &[ErrorEntry], new_errors: Vec<ErrorEntry>) -> Vec<ErrorEntry> {
    new_errors
}
