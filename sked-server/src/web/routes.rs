//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::error;

use crate::timetable::LoadError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/events", post(events))
        .route("/api/events/unique", post(unique_events))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Merged, week-filtered, deduplicated events for a set of timetables.
async fn events(
    State(state): State<AppState>,
    Json(req): Json<EventsRequest>,
) -> Result<Json<EventsResponse>, AppError> {
    if req.timetables.is_empty() {
        return Err(AppError::BadRequest {
            message: "no timetables requested".to_string(),
        });
    }

    let timetables: Vec<_> = req
        .timetables
        .into_iter()
        .map(TimetableRequestDto::into_request)
        .collect();

    let events = state.timetables.events(&timetables).await?;
    Ok(Json(EventsResponse { events }))
}

/// One representative event per distinct id for a single timetable.
async fn unique_events(
    State(state): State<AppState>,
    Json(req): Json<TimetableRequestDto>,
) -> Result<Json<EventsResponse>, AppError> {
    let events = state.timetables.unique_events(&req.into_request()).await?;
    Ok(Json(EventsResponse { events }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<LoadError> for AppError {
    fn from(e: LoadError) -> Self {
        match e {
            LoadError::Sked(err) => AppError::Upstream {
                message: err.to_string(),
            },
            other => AppError::Internal {
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, error = %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
