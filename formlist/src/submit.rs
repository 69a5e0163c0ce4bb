//! Submission gating.
//!
//! A submit re-validates every record. Only a fully valid form is forwarded to
//! the [`SubmissionSink`], as a whole; otherwise the fresh messages are
//! published and nothing leaves the form.

use anyhow::Result;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

use crate::core::error::{FormError, FormResult};
use crate::core::error_store;
use crate::core::types::Record;
use crate::core::validation::{invalid_rows, is_valid, validate_all};
use crate::form::FormState;

/// Receiver of validated record collections.
pub trait SubmissionSink {
    /// Take ownership of a successful submission. Records are passed as-is.
    fn accept(&mut self, records: &[Record]) -> Result<()>;
}

/// Lifecycle of a form with respect to submission.
///
/// `Submitted` only exists while the sink is being called; a form is always
/// back in `Editing` once [`submit`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitState {
    Editing,
    Submitted,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmitOutcome {
    /// All records passed and were forwarded.
    Accepted { forwarded: usize },
    /// At least one record failed; the sink was not called.
    Rejected { invalid_rows: Vec<usize> },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }
}

/// Validate the whole form and forward it to `sink` if every record passes.
///
/// On success the error list is reset to empty entries of the same length.
/// A sink failure is reported as [`FormError::Sink`] after the reset.
#[instrument(skip_all, fields(records = form.len()))]
pub fn submit<S: SubmissionSink + ?Sized>(
    form: &mut FormState,
    sink: &mut S,
) -> FormResult<SubmitOutcome> {
    let errors = validate_all(form.records());
    let valid = is_valid(&errors);
    let rows = invalid_rows(&errors);
    form.publish_errors(errors);

    if !valid {
        warn!(invalid_rows = ?rows, "validation failed");
        let outcome = SubmitOutcome::Rejected { invalid_rows: rows };
        form.set_last_outcome(outcome.clone());
        return Ok(outcome);
    }

    form.set_state(SubmitState::Submitted);
    let forwarded = sink.accept(form.records());
    form.publish_errors(error_store::cleared(form.len()));
    form.set_state(SubmitState::Editing);

    let outcome = SubmitOutcome::Accepted {
        forwarded: form.len(),
    };
    form.set_last_outcome(outcome.clone());

    match forwarded {
        Ok(()) => {
            info!(forwarded = form.len(), "form submitted");
            Ok(outcome)
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "submission sink failed");
            Err(FormError::Sink(format!("{err:#}")))
        }
    }
}
