//! Free-text deadline parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use thiserror::Error;

const DATE_TIME_FORMATS: [&str; 2] = ["%d.%m.%Y %H:%M", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", "%Y-%m-%d"];

/// The text is not a recognised deadline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised deadline {0:?}; use DD.MM.YYYY HH:MM")]
pub struct DeadlineParseError(pub String);

/// Parses a deadline typed by a user.
///
/// Accepts `DD.MM.YYYY HH:MM`, `DD.MM.YYYY`, `YYYY-MM-DD HH:MM`, `YYYY-MM-DD`
/// and RFC 3339. Values without an offset are read as UTC; dates without a
/// time mean midnight.
///
/// # Errors
///
/// Returns [`DeadlineParseError`] when no format matches.
pub fn parse_deadline(text: &str) -> Result<DateTime<Utc>, DeadlineParseError> {
    let trimmed = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DeadlineParseError(trimmed.to_owned()))
}
