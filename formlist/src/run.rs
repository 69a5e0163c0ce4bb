//! Host-side orchestration for `formlist run` and `formlist check`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, warn};

use crate::core::error::FormError;
use crate::core::types::{ErrorEntry, Record};
use crate::core::validation::{invalid_rows, validate_all};
use crate::form::{FormSnapshot, FormState};
use crate::io::script::{Command, ScriptLine};
use crate::session::{DispatchOutcome, dispatch};
use crate::submit::{SubmissionSink, SubmitOutcome};

/// Options for [`run_script`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Report and skip events with stale indices instead of aborting.
    pub keep_going: bool,
    /// Call the render callback after every applied event.
    pub render_after_each_event: bool,
}

/// A script line that was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

/// Summary of a scripted session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub events_applied: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub skipped: Vec<SkippedLine>,
    /// Outcome of the final submit in the script, if any.
    pub last_submit: Option<SubmitOutcome>,
}

/// Apply every script line to `form` in order.
///
/// `render` receives a snapshot on `show` and, when enabled, after each
/// applied event. A stale index aborts the run unless `keep_going` is set;
/// a failing sink always aborts.
pub fn run_script<S, F>(
    form: &mut FormState,
    script: &[ScriptLine],
    sink: &mut S,
    options: &RunOptions,
    mut render: F,
) -> Result<RunSummary>
where
    S: SubmissionSink + ?Sized,
    F: FnMut(&FormSnapshot) -> Result<()>,
{
    let mut summary = RunSummary::default();
    for entry in script {
        let event = match &entry.command {
            Command::Show => {
                render(&form.snapshot())?;
                continue;
            }
            Command::Event(event) => event,
        };

        match dispatch(form, event, sink) {
            Ok(outcome) => {
                summary.events_applied += 1;
                if let DispatchOutcome::Submit(submit) = outcome {
                    if submit.is_accepted() {
                        summary.accepted += 1;
                    } else {
                        summary.rejected += 1;
                    }
                    summary.last_submit = Some(submit);
                }
            }
            Err(err @ FormError::IndexOutOfRange { .. }) if options.keep_going => {
                warn!(line = entry.line, error = %err, "skipping event");
                summary.skipped.push(SkippedLine {
                    line: entry.line,
                    reason: err.to_string(),
                });
                continue;
            }
            Err(err) => return Err(anyhow!(err).context(format!("line {}", entry.line))),
        }

        if options.render_after_each_event {
            render(&form.snapshot())?;
        }
    }

    info!(
        events = summary.events_applied,
        accepted = summary.accepted,
        rejected = summary.rejected,
        skipped = summary.skipped.len(),
        "script finished"
    );
    Ok(summary)
}

/// Per-row validation report for a batch of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub errors: Vec<ErrorEntry>,
    pub invalid_rows: Vec<usize>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.invalid_rows.is_empty()
    }
}

/// Validate records in memory without touching any form state.
pub fn check_records(records: &[Record]) -> CheckReport {
    let errors = validate_all(records);
    let invalid_rows = invalid_rows(&errors);
    CheckReport {
        errors,
        invalid_rows,
    }
}

/// Load a JSON array of records from disk and validate it.
pub fn check_file(path: &Path) -> Result<CheckReport> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let records: Vec<Record> =
        serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    debug!(records = records.len(), path = %path.display(), "checking records");
    Ok(check_records(&records))
}
