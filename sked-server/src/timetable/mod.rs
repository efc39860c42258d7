//! Timetable loading and aggregation.
//!
//! The core of the service: fetch + parse + cache per timetable, then
//! ISO-week filtering and composite-key deduplication across timetables.
//! Any failure in a multi-timetable request fails the whole batch; callers
//! wanting partial results issue separate calls per timetable.

mod aggregate;
mod loader;


pub use aggregate::dedup_events;
pub use loader::{LoadError, TimetableService, TimetableSource};
