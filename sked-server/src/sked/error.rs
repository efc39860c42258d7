//! Sked client error types.

use reqwest::StatusCode;

/// Errors from the sked HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum SkedError {
    /// HTTP transport failed (connect error, timeout). Not retried.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream kept returning non-success statuses until the attempt limit
    /// was reached. Carries the last observed status.
    #[error("sked error for {timetable}-{week}: {status} ({attempts} attempts)")]
    Upstream {
        timetable: String,
        week: u32,
        status: StatusCode,
        attempts: u32,
    },

    /// Client-side problem: bad credentials encoding, exhausted client,
    /// missing fixture in mock mode.
    #[error("sked client error: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_display_names_timetable_and_week() {
        let err = SkedError::Upstream {
            timetable: "informatik-1".into(),
            week: 10,
            status: StatusCode::SERVICE_UNAVAILABLE,
            attempts: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("informatik-1-10"));
        assert!(msg.contains("503"));
    }
}
