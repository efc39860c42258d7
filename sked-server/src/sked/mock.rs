//! Fixture-backed sked client for development and tests.
//!
//! Serves HTML pages from a directory instead of the upstream system, so the
//! rest of the stack can run without sked credentials. Pages are keyed by
//! the file stem of the requested path.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::TimetableRequest;

use super::error::SkedError;

/// Sked client that serves pages from local HTML files.
#[derive(Debug, Clone)]
pub struct MockSkedClient {
    /// Pre-loaded pages, keyed by file stem.
    pages: HashMap<String, String>,
}

impl MockSkedClient {
    /// Create a mock client by loading every `.html` file in a directory.
    ///
    /// A request for `m/enit/b-et-1.html` is served from `b-et-1.html`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, SkedError> {
        let data_dir = data_dir.as_ref();
        let mut pages = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            SkedError::Client(format!("failed to read fixture directory {data_dir:?}: {e}"))
        })?;

        for entry in entries {
            let entry = entry
                .map_err(|e| SkedError::Client(format!("failed to read directory entry: {e}")))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("html") {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let html = std::fs::read_to_string(&path)
                .map_err(|e| SkedError::Client(format!("failed to read {path:?}: {e}")))?;
            pages.insert(stem.to_string(), html);
        }

        if pages.is_empty() {
            return Err(SkedError::Client(format!(
                "no fixture pages found in {data_dir:?}"
            )));
        }

        Ok(Self { pages })
    }

    /// Create a mock client from pre-built pages (for tests).
    pub fn with_pages(pages: HashMap<String, String>) -> Self {
        Self { pages }
    }

    /// Serve the fixture page matching the request's path.
    pub async fn fetch_timetable(&self, timetable: &TimetableRequest) -> Result<String, SkedError> {
        let stem = Path::new(&timetable.sked_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(timetable.sked_path.as_str());

        self.pages.get(stem).cloned().ok_or_else(|| {
            SkedError::Client(format!(
                "no fixture page for {} (available: {:?})",
                timetable.sked_path,
                self.pages.keys().collect::<Vec<_>>()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: &str) -> TimetableRequest {
        TimetableRequest {
            id: "t1".to_string(),
            sked_path: path.to_string(),
            week: 10,
            graphical: false,
            faculty: None,
        }
    }

    #[tokio::test]
    async fn serves_pages_by_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b-et-1.html"), "<table></table>").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let client = MockSkedClient::new(dir.path()).unwrap();
        let html = client
            .fetch_timetable(&request("m/enit/b-et-1.html"))
            .await
            .unwrap();
        assert_eq!(html, "<table></table>");
    }

    #[tokio::test]
    async fn unknown_page_is_an_error() {
        let client = MockSkedClient::with_pages(HashMap::from([(
            "b-et-1".to_string(),
            "<table></table>".to_string(),
        )]));

        let result = client.fetch_timetable(&request("m/enit/missing.html")).await;
        assert!(matches!(result, Err(SkedError::Client(_))));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MockSkedClient::new(dir.path()).is_err());
    }
}
