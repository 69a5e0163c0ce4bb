//! Record validation rules.
//!
//! Validation is pure: the same records always produce the same messages.
//! Messages are user-facing and returned verbatim to the render surface.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::{ErrorEntry, Record};

pub const NAME_REQUIRED: &str = "Name is required.";
pub const AGE_INVALID: &str = "Age must be a valid number > 0";

/// Optionally signed decimal numeral with an optional fractional part.
static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").unwrap());

/// Parse a raw age as a decimal number.
///
/// Surrounding whitespace is ignored. Anything other than a plain decimal
/// numeral (exponents, hex, `inf`, trailing letters) yields `None`.
pub fn parse_age(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if !DECIMAL_RE.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Validate a single record.
pub fn validate_record(record: &Record) -> ErrorEntry {
    let name = if record.name.trim().is_empty() {
        NAME_REQUIRED.to_string()
    } else {
        String::new()
    };

    let age = match parse_age(&record.age) {
        Some(value) if value > 0.0 => String::new(),
        _ => AGE_INVALID.to_string(),
    };

    ErrorEntry { name, age }
}

/// Validate every record, producing one entry per record in the same order.
pub fn validate_all(records: &[Record]) -> Vec<ErrorEntry> {
    records.iter().map(validate_record).collect()
}

/// True iff no entry carries a message. An empty collection is valid.
pub fn is_valid(errors: &[ErrorEntry]) -> bool {
    errors.iter().all(ErrorEntry::is_clear)
}

/// Indices of entries that carry at least one message, ascending.
pub fn invalid_rows(errors: &[ErrorEntry]) -> Vec<usize> {
    errors
        .iter()
        .enumerate()
        .filter(|(_, entry)| !entry.is_clear())
        .map(|(index, _)| index)
        .collect()
}
