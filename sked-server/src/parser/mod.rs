//! HTML to lecture parsing.
//!
//! The upstream system exports timetables in two formats: a flat list (one
//! lecture per table row) and a graphical weekly grid (one table per day
//! with lecture blocks as cells). Both parsers are pure functions over the
//! document text; anything that does not look like a lecture is skipped,
//! while a recognized lecture with an unparseable date or time is an error.

mod graphical;
mod html;
mod list;

pub use graphical::parse_graphical;
pub use list::parse_list;

use chrono::{NaiveDate, NaiveTime};

use crate::domain::RawLecture;

/// Which upstream export format to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMode {
    /// Weekly grid export; the faculty hint selects the block field order.
    Graphical { faculty: Option<String> },
    /// Flat list export, one lecture per table row.
    List,
}

/// Errors from lecture parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error("invalid date in lecture row: {0}")]
    InvalidDate(String),

    #[error("invalid time in lecture row: {0}")]
    InvalidTime(String),
}

/// Parses upstream HTML into an ordered sequence of lectures.
///
/// Implementations must be pure: no I/O, no network access.
pub trait LectureParser {
    fn parse(&self, html: &str, mode: &ParseMode) -> Result<Vec<RawLecture>, ParseError>;
}

/// Parser for the two sked export formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkedParser;

impl LectureParser for SkedParser {
    fn parse(&self, html: &str, mode: &ParseMode) -> Result<Vec<RawLecture>, ParseError> {
        match mode {
            ParseMode::List => parse_list(html),
            ParseMode::Graphical { faculty } => parse_graphical(html, faculty.as_deref()),
        }
    }
}

/// Parse an upstream date, `dd.mm.yyyy`.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(s, "%d.%m.%Y").map_err(|_| ParseError::InvalidDate(s.to_string()))
}

/// Parse an upstream time of day, `HH:MM`.
pub(crate) fn parse_time(s: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| ParseError::InvalidTime(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upstream_date_format() {
        let date = parse_date("02.03.2026").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());

        assert!(parse_date("2026-03-02").is_err());
        assert!(parse_date("31.02.2026").is_err());
    }

    #[test]
    fn parses_upstream_time_format() {
        let time = parse_time("09:45").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(9, 45, 0).unwrap());

        assert!(parse_time("9.45").is_err());
        assert!(parse_time("25:00").is_err());
    }
}
