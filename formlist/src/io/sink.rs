//! Submission sinks that write accepted forms as JSON Lines.
//!
//! One accepted submission becomes one line holding the JSON array of
//! records, exactly as they were entered.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::core::types::Record;
use crate::submit::SubmissionSink;

/// Sink writing each submission as a JSON line to any writer.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SubmissionSink for WriterSink<W> {
    fn accept(&mut self, records: &[Record]) -> Result<()> {
        write_line(&mut self.writer, records)
    }
}

/// Sink appending submissions to a JSON Lines file.
///
/// The file is opened per submission so concurrent readers see complete lines.
#[derive(Debug, Clone)]
pub struct JsonlFileSink {
    path: PathBuf,
}

impl JsonlFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create directory {}", parent.display()))?;
            }
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {}", self.path.display()))
    }
}

impl SubmissionSink for JsonlFileSink {
    #[instrument(skip_all, fields(path = %self.path.display(), records = records.len()))]
    fn accept(&mut self, records: &[Record]) -> Result<()> {
        let mut file = self.open()?;
        write_line(&mut file, records).with_context(|| format!("append {}", self.path.display()))?;
        debug!("submission appended");
        Ok(())
    }
}

/// Read back every submission from a JSON Lines file.
pub fn read_submissions(path: &Path) -> Result<Vec<Vec<Record>>> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    contents
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("parse {} line {}", path.display(), idx + 1))
        })
        .collect()
}

fn write_line<W: Write>(writer: &mut W, records: &[Record]) -> Result<()> {
    let mut line = serde_json::to_string(records).context("serialize submission")?;
    line.push('\n');
    writer
        .write_all(line.as_bytes())
        .context("write submission")?;
    writer.flush().context("flush submission")?;
    Ok(())
}
