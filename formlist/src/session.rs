//! Event dispatch from the host onto the form.
//!
//! Each event is handled synchronously and to completion before the next one
//! is accepted; the host never sees a half-applied event.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::FormResult;
use crate::core::types::Field;
use crate::form::FormState;
use crate::submit::{SubmissionSink, SubmitOutcome, submit};

/// A user interaction forwarded by the render surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FormEvent {
    FieldChanged {
        index: usize,
        field: Field,
        value: String,
    },
    FieldAdded,
    FieldRemoved {
        index: usize,
    },
    Submitted,
}

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Records/errors changed; re-render.
    Updated,
    /// A submit attempt finished.
    Submit(SubmitOutcome),
}

/// Apply one event to `form`, forwarding to `sink` on a successful submit.
pub fn dispatch<S: SubmissionSink + ?Sized>(
    form: &mut FormState,
    event: &FormEvent,
    sink: &mut S,
) -> FormResult<DispatchOutcome> {
    debug!(?event, revision = form.revision(), "dispatch");
    match event {
        FormEvent::FieldChanged {
            index,
            field,
            value,
        } => {
            form.on_field_change(*index, *field, value)?;
            Ok(DispatchOutcome::Updated)
        }
        FormEvent::FieldAdded => {
            form.on_add_field();
            Ok(DispatchOutcome::Updated)
        }
        FormEvent::FieldRemoved { index } => {
            form.on_remove_field(*index)?;
            Ok(DispatchOutcome::Updated)
        }
        FormEvent::Submitted => submit(form, sink).map(DispatchOutcome::Submit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FormError;
    use crate::core::types::ErrorEntry;
    use crate::core::validation::{AGE_INVALID, NAME_REQUIRED};
    use crate::test_support::{RecordingSink, entry, records};

    fn change(index: usize, field: Field, value: &str) -> FormEvent {
        FormEvent::FieldChanged {
            index,
            field,
            value: value.to_string(),
        }
    }

    /// Typical session: fill two rows, fail once, fix, submit.
    #[test]
    fn session_fills_fixes_and_submits() {
        let mut form = FormState::new();
        let mut sink = RecordingSink::default();
        let events = [
            change(0, Field::Name, "Ann"),
            change(0, Field::Age, "30"),
            FormEvent::FieldAdded,
            change(1, Field::Name, "Bob"),
            FormEvent::Submitted,
        ];
        for event in &events {
            dispatch(&mut form, event, &mut sink).expect("dispatch");
        }
        assert_eq!(form.errors()[1], entry("", AGE_INVALID));
        assert!(sink.submissions.is_empty());

        dispatch(&mut form, &change(1, Field::Age, "41"), &mut sink).expect("dispatch");
        let outcome = dispatch(&mut form, &FormEvent::Submitted, &mut sink).expect("dispatch");

        assert_eq!(
            outcome,
            DispatchOutcome::Submit(SubmitOutcome::Accepted { forwarded: 2 })
        );
        assert_eq!(sink.submissions, vec![records(&[("Ann", "30"), ("Bob", "41")])]);
        assert_eq!(form.errors(), &[ErrorEntry::default(), ErrorEntry::default()]);
    }

    #[test]
    fn blank_form_submit_shows_both_messages() {
        let mut form = FormState::new();
        let mut sink = RecordingSink::default();
        let outcome = dispatch(&mut form, &FormEvent::Submitted, &mut sink).expect("dispatch");
        assert_eq!(
            outcome,
            DispatchOutcome::Submit(SubmitOutcome::Rejected {
                invalid_rows: vec![0]
            })
        );
        assert_eq!(form.errors(), &[entry(NAME_REQUIRED, AGE_INVALID)]);
    }

    #[test]
    fn stale_index_is_reported_to_host() {
        let mut form = FormState::new();
        let mut sink = RecordingSink::default();
        let err = dispatch(&mut form, &FormEvent::FieldRemoved { index: 2 }, &mut sink)
            .expect_err("stale index");
        assert_eq!(err, FormError::IndexOutOfRange { index: 2, len: 1 });
    }

    #[test]
    fn events_deserialize_from_tagged_json() {
        let event: FormEvent =
            serde_json::from_str(r#"{"event":"field_changed","index":0,"field":"age","value":"5"}"#)
                .expect("parse");
        assert_eq!(event, change(0, Field::Age, "5"));
        let event: FormEvent = serde_json::from_str(r#"{"event":"submitted"}"#).expect("parse");
        assert_eq!(event, FormEvent::Submitted);
    }
}
