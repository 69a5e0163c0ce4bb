//! Form state owner: keeps the record list and the error list in lockstep.
//!
//! [`FormState`] is the only place where the two collections are stored.
//! Every mutation computes both next collections from the pure core
//! functions first and commits them together, so an observer never sees a
//! record list and an error list of different lengths, and a failed
//! operation leaves the previous state in place.

use serde::Serialize;
use tracing::debug;

use crate::core::error::FormResult;
use crate::core::invariants::check_alignment;
use crate::core::types::{ErrorEntry, Field, Record};
use crate::core::{error_store, field_list};
use crate::submit::{SubmitOutcome, SubmitState};

/// Immutable copy of the form published to the render surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    /// Increases by one on every committed change.
    pub revision: u64,
    pub records: Vec<Record>,
    pub errors: Vec<ErrorEntry>,
    /// Outcome of the most recent submit, until the next edit.
    pub last_outcome: Option<SubmitOutcome>,
}

#[derive(Debug, Clone)]
pub struct FormState {
    records: Vec<Record>,
    errors: Vec<ErrorEntry>,
    revision: u64,
    state: SubmitState,
    last_outcome: Option<SubmitOutcome>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// A fresh form with one empty record and one empty error entry.
    pub fn new() -> Self {
        Self {
            records: field_list::initialize(),
            errors: error_store::initialize(),
            revision: 0,
            state: SubmitState::Editing,
            last_outcome: None,
        }
    }

    /// Start from existing records with no visible errors.
    pub fn from_records(records: Vec<Record>) -> Self {
        let errors = error_store::cleared(records.len());
        Self {
            records,
            errors,
            ..Self::new()
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn errors(&self) -> &[ErrorEntry] {
        &self.errors
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn submit_state(&self) -> SubmitState {
        self.state
    }

    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            revision: self.revision,
            records: self.records.clone(),
            errors: self.errors.clone(),
            last_outcome: self.last_outcome.clone(),
        }
    }

    /// Edit one field and drop that field's error message.
    ///
    /// The new value is not validated here; validation happens on submit.
    pub fn on_field_change(&mut self, index: usize, field: Field, value: &str) -> FormResult<()> {
        let records = field_list::update_field(&self.records, index, field, value)?;
        let errors = error_store::clear_field(&self.errors, index, field)?;
        debug!(index, %field, "field changed");
        self.commit(records, errors);
        self.last_outcome = None;
        Ok(())
    }

    /// Append an empty record with an empty error entry.
    pub fn on_add_field(&mut self) {
        let records = field_list::append(&self.records, Record::default());
        let errors = error_store::append_empty(&self.errors);
        debug!(len = records.len(), "record added");
        self.commit(records, errors);
        self.last_outcome = None;
    }

    /// Remove the record at `index` together with its error entry.
    ///
    /// Removing the last remaining record is allowed.
    pub fn on_remove_field(&mut self, index: usize) -> FormResult<()> {
        let records = field_list::remove_at(&self.records, index)?;
        let errors = error_store::remove_at(&self.errors, index)?;
        debug!(index, len = records.len(), "record removed");
        self.commit(records, errors);
        self.last_outcome = None;
        Ok(())
    }

    pub(crate) fn publish_errors(&mut self, errors: Vec<ErrorEntry>) {
        let errors = error_store::replace_all(&self.errors, errors);
        let records = self.records.clone();
        self.commit(records, errors);
    }

    pub(crate) fn set_state(&mut self, state: SubmitState) {
        debug!(from = ?self.state, to = ?state, "submit state");
        self.state = state;
    }

    pub(crate) fn set_last_outcome(&mut self, outcome: SubmitOutcome) {
        self.last_outcome = Some(outcome);
    }

    fn commit(&mut self, records: Vec<Record>, errors: Vec<ErrorEntry>) {
        debug_assert!(
            check_alignment(&records, &errors).is_empty(),
            "{}",
            check_alignment(&records, &errors).join("; ")
        );
        self.records = records;
        self.errors = errors;
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FormError;
    use crate::core::validation::AGE_INVALID;
    use crate::test_support::{entry, record, records};

    fn form_with_errors(rows: &[(&str, &str)], errors: Vec<ErrorEntry>) -> FormState {
        let mut form = FormState::from_records(records(rows));
        form.publish_errors(errors);
        form
    }

    fn assert_aligned(form: &FormState) {
        assert!(check_alignment(form.records(), form.errors()).is_empty());
    }

    #[test]
    fn new_form_has_one_empty_slot() {
        let form = FormState::new();
        assert_eq!(form.records(), &[Record::default()]);
        assert_eq!(form.errors(), &[ErrorEntry::default()]);
        assert_eq!(form.revision(), 0);
        assert_eq!(form.submit_state(), SubmitState::Editing);
    }

    /// Lengths stay equal across a mixed sequence of structural edits.
    #[test]
    fn alignment_holds_after_every_operation() {
        let mut form = FormState::new();
        form.on_add_field();
        assert_aligned(&form);
        form.on_add_field();
        assert_aligned(&form);
        form.on_field_change(2, Field::Name, "c").expect("change");
        assert_aligned(&form);
        form.on_remove_field(0).expect("remove");
        assert_aligned(&form);
        form.on_remove_field(1).expect("remove");
        assert_aligned(&form);
        form.on_remove_field(0).expect("remove");
        assert_aligned(&form);
        assert!(form.is_empty());
        form.on_add_field();
        assert_aligned(&form);
        assert_eq!(form.len(), 1);
    }

    #[test]
    fn editing_one_row_never_touches_other_rows_errors() {
        let errors = vec![entry("n0", "a0"), entry("n1", "a1"), entry("n2", "a2")];
        let mut form = form_with_errors(&[("", ""), ("", ""), ("", "")], errors);

        form.on_field_change(1, Field::Name, "Bob").expect("change");

        assert_eq!(form.errors()[0], entry("n0", "a0"));
        assert_eq!(form.errors()[1], entry("", "a1"));
        assert_eq!(form.errors()[2], entry("n2", "a2"));
        assert_eq!(form.records()[1], record("Bob", ""));
    }

    /// The message disappears on edit even though the value is not re-checked.
    #[test]
    fn editing_clears_the_field_error_without_revalidating() {
        let mut form = form_with_errors(&[("Bob", "0")], vec![entry("", AGE_INVALID)]);
        form.on_field_change(0, Field::Age, "5").expect("change");
        assert_eq!(form.errors()[0].age, "");

        let mut form = form_with_errors(&[("Bob", "0")], vec![entry("", AGE_INVALID)]);
        form.on_field_change(0, Field::Age, "still bad").expect("change");
        assert_eq!(form.errors()[0].age, "");
    }

    #[test]
    fn remove_shifts_records_and_errors_identically() {
        let errors = vec![entry("e0", ""), entry("e1", ""), entry("e2", "")];
        let mut form = form_with_errors(&[("r0", "0"), ("r1", "1"), ("r2", "2")], errors);

        form.on_remove_field(1).expect("remove");

        assert_eq!(form.records(), &records(&[("r0", "0"), ("r2", "2")])[..]);
        assert_eq!(form.errors(), &[entry("e0", ""), entry("e2", "")]);
    }

    #[test]
    fn out_of_range_operations_leave_state_untouched() {
        let mut form = FormState::new();
        let before = form.snapshot();

        let err = form
            .on_field_change(1, Field::Name, "x")
            .expect_err("out of range");
        assert_eq!(err, FormError::IndexOutOfRange { index: 1, len: 1 });
        let err = form.on_remove_field(5).expect_err("out of range");
        assert_eq!(err, FormError::IndexOutOfRange { index: 5, len: 1 });

        assert_eq!(form.snapshot(), before);
    }

    #[test]
    fn revision_counts_committed_changes() {
        let mut form = FormState::new();
        form.on_add_field();
        form.on_field_change(0, Field::Name, "a").expect("change");
        let _ = form.on_remove_field(9);
        assert_eq!(form.revision(), 2);
    }

    #[test]
    fn snapshot_is_detached_from_later_edits() {
        let mut form = FormState::new();
        let snapshot = form.snapshot();
        form.on_field_change(0, Field::Name, "Ann").expect("change");
        assert_eq!(snapshot.records, vec![Record::default()]);
        assert_ne!(snapshot.revision, form.revision());
    }
}
