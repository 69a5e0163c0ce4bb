//! Line-oriented command language for driving a form from a terminal or file.
//!
//! ```text
//! # comments and blank lines are ignored
//! set 0 name Ann Lee
//! set 0 age 30
//! add
//! remove 1
//! submit
//! show
//! ```

use std::io::BufRead;

use anyhow::{Context, Result, anyhow, bail};

use crate::core::types::Field;
use crate::session::FormEvent;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward an event to the form.
    Event(FormEvent),
    /// Render the current form without changing it.
    Show,
}

/// A command together with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: Command,
}

/// Parse a single line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(raw: &str) -> Result<Option<Command>> {
    let trimmed = raw.trim_start();
    if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = split_word(trimmed);
    let command = match keyword {
        "set" => {
            let (index, rest) = split_word(rest);
            let (field, value) = split_word(rest);
            let index = parse_index(index)?;
            let field = field.parse::<Field>().map_err(|err| anyhow!(err))?;
            Command::Event(FormEvent::FieldChanged {
                index,
                field,
                value: value.trim_end_matches(['\r', '\n']).to_string(),
            })
        }
        "add" => {
            expect_no_args(keyword, rest)?;
            Command::Event(FormEvent::FieldAdded)
        }
        "remove" => {
            let (index, rest) = split_word(rest);
            expect_no_args(keyword, rest)?;
            Command::Event(FormEvent::FieldRemoved {
                index: parse_index(index)?,
            })
        }
        "submit" => {
            expect_no_args(keyword, rest)?;
            Command::Event(FormEvent::Submitted)
        }
        "show" => {
            expect_no_args(keyword, rest)?;
            Command::Show
        }
        other => bail!("unknown command '{other}'"),
    };
    Ok(Some(command))
}

/// Parse a whole script, reporting the first bad line.
pub fn parse_script<R: BufRead>(reader: R) -> Result<Vec<ScriptLine>> {
    let mut parsed = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("read line {line_no}"))?;
        if let Some(command) = parse_line(&line).with_context(|| format!("line {line_no}"))? {
            parsed.push(ScriptLine {
                line: line_no,
                command,
            });
        }
    }
    Ok(parsed)
}

/// Split off the first whitespace-delimited word. The remainder keeps its
/// inner spacing but loses the single separating run of whitespace.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(pos) => {
            let rest = &input[pos..];
            let rest = rest.strip_prefix([' ', '\t']).unwrap_or(rest);
            (&input[..pos], rest)
        }
        None => (input, ""),
    }
}

fn parse_index(raw: &str) -> Result<usize> {
    if raw.is_empty() {
        bail!("missing record index");
    }
    raw.parse::<usize>()
        .with_context(|| format!("invalid record index '{raw}'"))
}

fn expect_no_args(keyword: &str, rest: &str) -> Result<()> {
    if !rest.trim().is_empty() {
        bail!("'{keyword}' takes no further arguments, got '{}'", rest.trim());
    }
    Ok(())
}
