//! Parser output type.

use chrono::NaiveDateTime;

/// One scheduled class occurrence as extracted from the upstream HTML.
///
/// Ordered as encountered in the document. Times are naive local times; the
/// upstream markup carries no timezone information.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLecture {
    /// Lecture title as printed in the timetable.
    pub title: String,

    /// Organiser shortname as printed in the timetable.
    pub organiser: String,

    pub start: NaiveDateTime,
    pub end: NaiveDateTime,

    /// Room designation.
    pub room: String,
}
