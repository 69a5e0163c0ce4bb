//! Ordered record collection with copy-on-write operations.
//!
//! Every operation borrows the current collection and returns a new one, so
//! a caller holding the previous value never observes a change.

use crate::core::error::{FormError, FormResult};
use crate::core::types::{Field, Record};

/// A fresh form: exactly one empty record.
pub fn initialize() -> Vec<Record> {
    vec![Record::default()]
}

/// Replace one field of the record at `index`.
pub fn update_field(
    records: &[Record],
    index: usize,
    field: Field,
    value: &str,
) -> FormResult<Vec<Record>> {
    let target = records.get(index).ok_or(FormError::IndexOutOfRange {
        index,
        len: records.len(),
    })?;
    let mut next = records.to_vec();
    next[index] = target.with_field(field, value);
    Ok(next)
}

pub fn append(records: &[Record], record: Record) -> Vec<Record> {
    let mut next = Vec::with_capacity(records.len() + 1);
    next.extend_from_slice(records);
    next.push(record);
    next
}

/// Remove the record at `index`; later records shift down by one.
pub fn remove_at(records: &[Record], index: usize) -> FormResult<Vec<Record>> {
    if index >= records.len() {
        return Err(FormError::IndexOutOfRange {
            index,
            len: records.len(),
        });
    }
    let mut next = records.to_vec();
    next.remove(index);
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{named, records};

    #[test]
    fn initialize_yields_single_empty_record() {
        assert_eq!(initialize(), vec![Record::default()]);
    }

    #[test]
    fn update_field_replaces_only_target_slot() {
        let prev = records(&[("a", "1"), ("b", "2")]);
        let next = update_field(&prev, 1, Field::Name, "bee").expect("update");
        assert_eq!(next, records(&[("a", "1"), ("bee", "2")]));
        assert_eq!(prev, records(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn update_field_rejects_out_of_range_index() {
        let prev = records(&[("a", "1")]);
        let err = update_field(&prev, 1, Field::Age, "3").expect_err("out of range");
        assert_eq!(err, FormError::IndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn append_adds_to_the_end() {
        let prev = records(&[("a", "1")]);
        let next = append(&prev, named("b"));
        assert_eq!(next.len(), 2);
        assert_eq!(next[1], named("b"));
        assert_eq!(prev.len(), 1);
    }

    #[test]
    fn remove_at_shifts_following_records_down() {
        let prev = records(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let next = remove_at(&prev, 1).expect("remove");
        assert_eq!(next, records(&[("a", "1"), ("c", "3")]));
    }

    #[test]
    fn remove_at_allows_emptying_the_collection() {
        let next = remove_at(&initialize(), 0).expect("remove");
        assert!(next.is_empty());
        let err = remove_at(&next, 0).expect_err("empty");
        assert_eq!(err, FormError::IndexOutOfRange { index: 0, len: 0 });
    }
}
