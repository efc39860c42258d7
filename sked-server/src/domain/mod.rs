//! Domain types for the timetable service.
//!
//! `TimetableRequest` identifies what to fetch, `RawLecture` is what the
//! parser extracts from the upstream HTML, and `Event` is the domain model
//! served to callers and persisted in the cache.

mod event;
mod lecture;
mod timetable;

pub use event::{Event, EventMeta};
pub use lecture::RawLecture;
pub use timetable::TimetableRequest;
