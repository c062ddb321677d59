//! Parsing helpers for form drafts
//!
//! Each helper records a field error on failure and returns `None`, so a
//! draft can collect every problem in one pass.

use std::str::FromStr;

use chrono::NaiveDate;
use hotelier_data::{FieldError, Money, Record, ValidationResult};

pub fn parse_number<T: FromStr>(result: &mut ValidationResult, field: &str, text: &str) -> Option<T> {
    match text.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            result.add_error(FieldError::invalid_format(field, "a whole number"));
            None
        }
    }
}

pub fn parse_money(result: &mut ValidationResult, field: &str, text: &str) -> Option<Money> {
    let parsed = Money::parse(text);
    if parsed.is_none() {
        result.add_error(FieldError::invalid_format(field, "an amount such as 128 or 99.50"));
    }
    parsed
}

pub fn parse_date(result: &mut ValidationResult, field: &str, text: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            result.add_error(FieldError::invalid_format(field, "YYYY-MM-DD"));
            None
        }
    }
}

/// Percentage text such as `6` or `12.5` as basis points.
pub fn parse_percent_bps(result: &mut ValidationResult, field: &str, text: &str) -> Option<u32> {
    let bps = Money::parse(text)
        .map(Money::minor)
        .and_then(|hundredths| u32::try_from(hundredths).ok());
    if bps.is_none() {
        result.add_error(FieldError::invalid_format(field, "a percentage such as 6 or 12.5"));
    }
    bps
}

/// Basis points as editable percentage text: 650 → `6.5`, 1500 → `15`.
pub fn bps_to_percent_text(bps: u32) -> String {
    let whole = bps / 100;
    match bps % 100 {
        0 => whole.to_string(),
        rest if rest % 10 == 0 => format!("{whole}.{}", rest / 10),
        rest => format!("{whole}.{rest:02}"),
    }
}

/// Comma separated list, trimmed, empties dropped.
pub fn split_list(text: &str) -> Vec<String> {
    text.split([',', '，'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Adds the record's own checks to the parse errors collected so far.
pub fn validated<T: Record>(record: T, mut result: ValidationResult) -> Result<T, ValidationResult> {
    result.merge(record.validate());
    result.into_result().map(|()| record)
}

/// Owned message for the `error` prop of a form field.
pub fn error_text(result: &ValidationResult, field: &str) -> Option<String> {
    result.error_for(field).map(str::to_owned)
}

/// Option list for a select backed by a strum enum.
pub fn enum_options<E>(label: impl Fn(&E) -> &'static str) -> Vec<(String, String)>
where
    E: strum::IntoEnumIterator + AsRef<str>,
{
    E::iter()
        .map(|value| (value.as_ref().to_owned(), label(&value).to_owned()))
        .collect()
}
