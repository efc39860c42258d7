//! Event domain model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::RawLecture;

/// Organiser metadata attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMeta {
    pub organiser_shortname: String,
}

/// One scheduled event in a timetable.
///
/// `start`/`end` are `None` only in the unique-events view, where an event
/// stands for "this id occurs at arbitrary times" rather than for one
/// concrete occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Stable identifier derived from the lecture title.
    pub id: String,

    pub title: String,

    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,

    /// Room designation.
    pub location: String,

    pub meta: EventMeta,
}

impl Event {
    /// Build an event from one parsed lecture.
    pub fn from_lecture(lecture: RawLecture) -> Self {
        Self {
            id: slug(&lecture.title),
            title: lecture.title,
            start: Some(lecture.start),
            end: Some(lecture.end),
            location: lecture.room,
            meta: EventMeta {
                organiser_shortname: lecture.organiser,
            },
        }
    }

    /// Composite identity used for cross-timetable deduplication.
    ///
    /// Two events count as the same entry only when organiser, id, location
    /// and both timestamps agree; equal ids at different times or places
    /// stay distinct.
    pub fn dedup_key(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.meta.organiser_shortname,
            self.id,
            self.location,
            fmt_opt(self.start),
            fmt_opt(self.end),
        )
    }
}

fn fmt_opt(t: Option<NaiveDateTime>) -> String {
    t.map(|t| t.to_string()).unwrap_or_default()
}

/// Derive a stable event id from a lecture title.
///
/// Lowercases, keeps alphanumerics, collapses every other run of characters
/// into a single dash. Titles differing only in case or punctuation map to
/// the same id.
pub(crate) fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}
