use chrono::NaiveDate;

use crate::constants::{DATE_FORMAT, MAX_SERIES_DAYS};
use crate::errors::{Result, ValidationError};

/// Parses a canonical `YYYY-MM-DD` date string.
///
/// The input must round-trip exactly through [`DATE_FORMAT`]; short forms
/// such as `2014-9-1` or surrounding whitespace are rejected rather than
/// silently normalized.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))?;
    if format_date(date) != value {
        return Err(ValidationError::InvalidDate(value.to_string()).into());
    }
    Ok(date)
}

/// Formats a date as its canonical key.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Number of calendar days in `[start, end]`, zero when `start > end`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> usize {
    if start > end {
        return 0;
    }
    (end - start).num_days() as usize + 1
}

/// Like [`days_in_range`], but rejects ranges longer than [`MAX_SERIES_DAYS`].
pub fn bounded_days_in_range(start: NaiveDate, end: NaiveDate) -> Result<usize> {
    let days = days_in_range(start, end);
    if days > MAX_SERIES_DAYS {
        return Err(ValidationError::InvalidInput(format!(
            "Range {} to {} spans {} days; at most {} are allowed",
            format_date(start),
            format_date(end),
            days,
            MAX_SERIES_DAYS
        ))
        .into());
    }
    Ok(days)
}
