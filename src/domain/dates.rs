/// Calendar date helpers shared by the content cache, the journal and the
/// streak engine
///
/// Every key in this crate is a `NaiveDate` rendered as ISO `YYYY-MM-DD`.
/// Only `today` reads the clock; everything else takes its date explicitly.

use chrono::{Duration, NaiveDate, Utc};
use crate::domain::DomainError;

/// ISO calendar date format used for storage keys and documents
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().naive_utc().date()
}

/// The calendar day before `date`
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date - Duration::days(1)
}

/// Yesterday relative to an explicitly supplied "today"
pub fn yesterday(today: NaiveDate) -> NaiveDate {
    previous_day(today)
}

/// Parse a `YYYY-MM-DD` string
pub fn parse_iso(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)
        .map_err(|e| DomainError::InvalidDate(format!("'{}': {}", s, e)))
}

/// Render a date as `YYYY-MM-DD`
pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Long display form, e.g. "Sunday, October 18, 2026"
pub fn display(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
