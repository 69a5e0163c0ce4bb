//! Structural invariants between the record list and the error list.

use crate::core::types::{ErrorEntry, Record};

/// Check that the error list can describe the record list slot by slot.
///
/// Returns a list of stable error messages; empty when aligned.
pub fn check_alignment(records: &[Record], errors: &[ErrorEntry]) -> Vec<String> {
    let mut violations = Vec::new();
    if records.len() != errors.len() {
        violations.push(format!(
            "error list has {} entries but record list has {}",
            errors.len(),
            records.len()
        ));
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{entry, record};

    #[test]
    fn aligned_lists_have_no_violations() {
        assert!(check_alignment(&[record("a", "1")], &[entry("", "")]).is_empty());
        assert!(check_alignment(&[], &[]).is_empty());
    }

    #[test]
    fn length_mismatch_is_reported() {
        let violations = check_alignment(&[record("a", "1")], &[]);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].contains("0 entries"));
    }
}
