//! Cache-backed timetable loading.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use crate::cache::{CacheError, EventCache};
use crate::domain::{Event, TimetableRequest};
use crate::parser::{LectureParser, ParseError, ParseMode};
use crate::sked::{MockSkedClient, SkedClient, SkedError};

/// Source of raw timetable HTML.
///
/// Seam between the loader and the upstream client, so tests can substitute
/// a scripted source.
pub trait TimetableSource {
    /// Retrieve the raw HTML page for one timetable resource.
    fn fetch(
        &self,
        timetable: &TimetableRequest,
    ) -> impl Future<Output = Result<String, SkedError>> + Send;
}

impl TimetableSource for SkedClient {
    async fn fetch(&self, timetable: &TimetableRequest) -> Result<String, SkedError> {
        self.fetch_timetable(timetable).await
    }
}

impl TimetableSource for MockSkedClient {
    async fn fetch(&self, timetable: &TimetableRequest) -> Result<String, SkedError> {
        self.fetch_timetable(timetable).await
    }
}

/// Errors from loading a timetable.
///
/// All variants propagate to the caller unchanged; there is no local
/// recovery and no partial-success mode.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Sked(#[from] SkedError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

type InflightCell = Arc<OnceCell<Arc<Vec<Event>>>>;

/// Cache-backed loader and aggregator for timetable events.
pub struct TimetableService<S, P> {
    source: S,
    parser: P,
    cache: EventCache,

    /// In-flight cold loads by cache key. Coalesces concurrent misses so a
    /// burst of cold requests for one timetable costs a single upstream
    /// round-trip.
    inflight: Mutex<HashMap<String, InflightCell>>,
}

impl<S: TimetableSource, P: LectureParser> TimetableService<S, P> {
    pub fn new(source: S, parser: P, cache: EventCache) -> Self {
        Self {
            source,
            parser,
            cache,
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Load the full (unfiltered) event sequence for one timetable.
    ///
    /// On a cache hit there is no upstream traffic. On a miss the page is
    /// fetched and parsed, each lecture wrapped into an [`Event`], and the
    /// sequence stored under `lectures-<id>` with the configured TTL.
    pub async fn load(&self, timetable: &TimetableRequest) -> Result<Arc<Vec<Event>>, LoadError> {
        let key = timetable.cache_key();
        if let Some(events) = self.cache.get(&key).await {
            debug!(%key, "lectures cache hit");
            return Ok(events);
        }

        let cell = {
            let mut inflight = self.inflight.lock().await;
            inflight.entry(key.clone()).or_default().clone()
        };

        let result = cell
            .get_or_try_init(|| self.load_cold(timetable, &key))
            .await
            .cloned();

        // A completed flight must not pin the key, or the first load after
        // TTL expiry would be served the stale cell instead of refetching.
        self.inflight.lock().await.remove(&key);

        result
    }

    async fn load_cold(
        &self,
        timetable: &TimetableRequest,
        key: &str,
    ) -> Result<Arc<Vec<Event>>, LoadError> {
        // Another flight may have filled the cache while we queued.
        if let Some(events) = self.cache.get(key).await {
            return Ok(events);
        }
        info!(%key, "lectures cache miss");

        let html = self.source.fetch(timetable).await?;
        let mode = if timetable.graphical {
            ParseMode::Graphical {
                faculty: timetable.faculty.clone(),
            }
        } else {
            ParseMode::List
        };
        let lectures = self.parser.parse(&html, &mode)?;
        info!(%key, count = lectures.len(), "storing parsed lectures");

        let events: Arc<Vec<Event>> =
            Arc::new(lectures.into_iter().map(Event::from_lecture).collect());
        self.cache.insert(key.to_string(), events.clone()).await?;
        Ok(events)
    }
}
