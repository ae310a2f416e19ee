// ABOUTME: Syntactic validation rules applied to caller-supplied text before any storage call.
// ABOUTME: Each boolean check has a parsing twin that returns the typed value or a one-line reason.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::model::DateRange;

/// Text format accepted for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Earliest year whose dates are stored. Stored dates compare as text, which
/// only orders correctly for four-digit unsigned years.
pub const MIN_STORED_YEAR: i32 = 0;

/// Latest year whose dates are stored.
pub const MAX_STORED_YEAR: i32 = 9999;

/// Caller input that failed a validation rule. Never reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("'{0}' is not a valid id")]
    InvalidId(String),

    #[error("'{0}' is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("range start {start} is after range end {end}")]
    InvertedRange { start: String, end: String },
}

pub fn is_non_empty_name(name: &str) -> bool {
    !name.trim().is_empty()
}

pub fn is_parseable_id(id: &str) -> bool {
    parse_id(id).is_ok()
}

pub fn is_parseable_date(date: &str) -> bool {
    parse_date(date).is_ok()
}

pub fn is_valid_range(start: &str, end: &str) -> bool {
    parse_range(start, end).is_ok()
}

/// True when `date` falls in a year the store can order correctly.
pub fn is_storable_date(date: NaiveDate) -> bool {
    (MIN_STORED_YEAR..=MAX_STORED_YEAR).contains(&date.year())
}

/// Exactly four digits, dash, two digits, dash, two digits.
fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Trim a staff name, rejecting blank input.
pub fn parse_name(name: &str) -> Result<&str, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed)
}

/// Parse a signed 64-bit id. Overflow is a validation failure, not a wrap.
pub fn parse_id(id: &str) -> Result<i64, ValidationError> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(id.to_string()))
}

/// Parse a `YYYY-MM-DD` calendar date. Impossible dates such as
/// `2023-02-30` are rejected.
pub fn parse_date(date: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = date.trim();
    // chrono accepts unpadded fields and signed years; the fixed format does not
    if !has_date_shape(trimmed) {
        return Err(ValidationError::InvalidDate(date.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

/// Parse both endpoints and require `start <= end`.
pub fn parse_range(start: &str, end: &str) -> Result<DateRange, ValidationError> {
    DateRange::new(parse_date(start)?, parse_date(end)?)
}
