//! Timetable request identity.

use serde::{Deserialize, Serialize};

/// Identifies one upstream timetable resource to retrieve.
///
/// Supplied by the caller and treated as immutable. `week` is an ISO 8601
/// week number used to filter parsed events after retrieval; it is
/// deliberately not part of the cache identity, since the cached value is
/// the full unfiltered timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRequest {
    /// Opaque timetable identifier. Also the cache identity.
    pub id: String,

    /// Resource path under the upstream base URL.
    pub sked_path: String,

    /// Target ISO week number.
    pub week: u32,

    /// Selects the graphical parser variant instead of the list variant.
    pub graphical: bool,

    /// Faculty hint for the graphical parser.
    pub faculty: Option<String>,
}

impl TimetableRequest {
    /// Cache key for this timetable's parsed events.
    pub fn cache_key(&self) -> String {
        format!("lectures-{}", self.id)
    }
}
