//! Test-only helpers for building records, error entries and sinks.

use anyhow::{Result, anyhow};

use crate::core::types::{ErrorEntry, Record};
use crate::submit::SubmissionSink;

/// Create a record from string literals.
pub fn record(name: &str, age: &str) -> Record {
    Record::new(name, age)
}

/// Create a record with a valid age and the given name.
pub fn named(name: &str) -> Record {
    Record::new(name, "1")
}

/// Create a list of records from `(name, age)` pairs.
pub fn records(pairs: &[(&str, &str)]) -> Vec<Record> {
    pairs.iter().map(|(name, age)| record(name, age)).collect()
}

/// Create an error entry from string literals.
pub fn entry(name: &str, age: &str) -> ErrorEntry {
    ErrorEntry {
        name: name.to_string(),
        age: age.to_string(),
    }
}

/// Sink that records every submission it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub submissions: Vec<Vec<Record>>,
}

impl SubmissionSink for RecordingSink {
    fn accept(&mut self, records: &[Record]) -> Result<()> {
        self.submissions.push(records.to_vec());
        Ok(())
    }
}

/// Sink that counts calls and always fails.
#[derive(Debug, Default)]
pub struct FailingSink {
    pub calls: usize,
}

impl SubmissionSink for FailingSink {
    fn accept(&mut self, _records: &[Record]) -> Result<()> {
        self.calls += 1;
        Err(anyhow!("sink unavailable"))
    }
}
