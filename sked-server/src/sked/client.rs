//! Sked HTTP client.
//!
//! Fetches raw timetable HTML from the upstream system, authenticating with
//! HTTP Basic auth and retrying non-success responses a bounded number of
//! times.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::domain::TimetableRequest;

use super::error::SkedError;

/// Default base URL for the upstream timetable system.
const DEFAULT_BASE_URL: &str = "https://stundenplan.ostfalia.de/";

/// Default maximum concurrent upstream requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Retry behavior for non-success upstream responses.
///
/// Every non-2xx status is retried identically up to the cap; the backoff is
/// fixed, with no exponent and no jitter. 4xx and 5xx responses are not
/// distinguished.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,

    /// Pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(100),
        }
    }
}

/// Configuration for the sked client.
#[derive(Debug, Clone)]
pub struct SkedConfig {
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: String,
    /// Base URL for the upstream system.
    pub base_url: String,
    /// Maximum concurrent requests.
    pub max_concurrent: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Retry behavior for non-success responses.
    pub retry: RetryPolicy,
}

impl SkedConfig {
    /// Create a new config with the given credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            retry: RetryPolicy::default(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Sked HTTP client.
///
/// Uses a semaphore to bound concurrent upstream requests; the Basic-auth
/// header is encoded once at construction and installed as a default header.
#[derive(Debug, Clone)]
pub struct SkedClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
    semaphore: Arc<Semaphore>,
}

impl SkedClient {
    /// Create a new sked client with the given configuration.
    pub fn new(config: SkedConfig) -> Result<Self, SkedError> {
        let token = BASE64.encode(format!("{}:{}", config.username, config.password));

        let mut auth = HeaderValue::from_str(&format!("Basic {token}"))
            .map_err(|_| SkedError::Client("invalid credential encoding".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            retry: config.retry,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Fetch the raw HTML page for one timetable.
    ///
    /// Non-success statuses are retried per the configured policy; after the
    /// last failed attempt the call fails with the last observed status,
    /// tagged with the timetable id and requested week. Transport errors
    /// propagate immediately without retry.
    pub async fn fetch_timetable(&self, timetable: &TimetableRequest) -> Result<String, SkedError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| SkedError::Client("semaphore closed".to_string()))?;

        let url = format!("{}{}", self.base_url, timetable.sked_path);
        debug!(timetable = %timetable.id, %url, "requesting sked page");

        let mut last_status = None;
        for attempt in 0..self.retry.max_attempts {
            let response = self.http.get(&url).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.text().await?);
            }

            warn!(
                timetable = %timetable.id,
                week = timetable.week,
                %status,
                attempt,
                "sked request failed"
            );
            last_status = Some(status);
            tokio::time::sleep(self.retry.backoff).await;
        }

        match last_status {
            Some(status) => Err(SkedError::Upstream {
                timetable: timetable.id.clone(),
                week: timetable.week,
                status,
                attempts: self.retry.max_attempts,
            }),
            // Only reachable with a zero-attempt policy.
            None => Err(SkedError::Client("retry policy permits no attempts".to_string())),
        }
    }
}
