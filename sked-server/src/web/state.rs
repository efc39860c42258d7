//! Application state for the web layer.

use std::sync::Arc;

use crate::parser::SkedParser;
use crate::sked::SkedClient;
use crate::timetable::TimetableService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cache-backed timetable service.
    pub timetables: Arc<TimetableService<SkedClient, SkedParser>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(timetables: TimetableService<SkedClient, SkedParser>) -> Self {
        Self {
            timetables: Arc::new(timetables),
        }
    }
}
