//! Shared deterministic types for the form core.
//!
//! These types define stable contracts between core components and the host.
//! They should not depend on external state or I/O.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One user-editable entry of the form.
///
/// `age` is kept as the raw text the user typed so invalid input survives for
/// redisplay and re-editing. It is only interpreted during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub age: String,
}

impl Record {
    pub fn new(name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Age => &self.age,
        }
    }

    /// Return a copy of this record with `field` replaced by `value`.
    pub fn with_field(&self, field: Field, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        match field {
            Field::Name => next.name = value.into(),
            Field::Age => next.age = value.into(),
        }
        next
    }
}

/// Per-record validation messages. An empty string means "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub name: String,
    pub age: String,
}

impl ErrorEntry {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Age => &self.age,
        }
    }

    /// True when neither field carries a message.
    pub fn is_clear(&self) -> bool {
        self.name.is_empty() && self.age.is_empty()
    }

    /// Return a copy of this entry with the message for `field` removed.
    pub fn without(&self, field: Field) -> Self {
        let mut next = self.clone();
        match field {
            Field::Name => next.name.clear(),
            Field::Age => next.age.clear(),
        }
        next
    }
}

/// Selector for one attribute of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Age,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Name, Field::Age];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "name" => Ok(Field::Name),
            "age" => Ok(Field::Age),
            other => Err(format!("unknown field '{other}' (expected 'name' or 'age')")),
        }
    }
}
