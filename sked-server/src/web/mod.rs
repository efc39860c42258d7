//! HTTP API layer.
//!
//! Exposes the two public timetable operations (merged events and the
//! per-timetable unique view) plus a health check. The browser front-end
//! consuming this API lives elsewhere.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
