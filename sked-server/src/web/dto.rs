//! Request/response DTOs for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::domain::{Event, TimetableRequest};

/// One timetable to retrieve, as supplied by API callers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableRequestDto {
    pub id: String,
    pub sked_path: String,
    pub week: u32,
    #[serde(default)]
    pub graphical: bool,
    #[serde(default)]
    pub faculty: Option<String>,
}

impl TimetableRequestDto {
    pub fn into_request(self) -> TimetableRequest {
        TimetableRequest {
            id: self.id,
            sked_path: self.sked_path,
            week: self.week,
            graphical: self.graphical,
            faculty: self.faculty,
        }
    }
}

/// Body of `POST /api/events`.
#[derive(Debug, Deserialize)]
pub struct EventsRequest {
    pub timetables: Vec<TimetableRequestDto>,
}

/// Events payload returned by both endpoints.
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
