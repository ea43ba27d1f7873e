//! Where the games list document comes from.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::SyncError;

/// A fetchable copy of the markdown games list.
#[async_trait]
pub trait ListSource: Send + Sync {
    /// URL or path, for log messages.
    fn location(&self) -> &str;

    /// Fetch the full document text.
    async fn fetch(&self) -> Result<String, SyncError>;
}

/// The list served over HTTP, normally the raw readme on GitHub.
pub struct HttpListSource {
    http: reqwest::Client,
    url: String,
}

impl HttpListSource {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ListSource for HttpListSource {
    fn location(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String, SyncError> {
        let unavailable = |reason: String| SyncError::SourceUnavailable {
            location: self.url.clone(),
            reason,
        };

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("HTTP {}", response.status())));
        }

        response.text().await.map_err(|e| unavailable(e.to_string()))
    }
}

/// A local copy of the list, for offline use and testing.
pub struct FileListSource {
    path: PathBuf,
    display: String,
}

impl FileListSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }
}

#[async_trait]
impl ListSource for FileListSource {
    fn location(&self) -> &str {
        &self.display
    }

    async fn fetch(&self) -> Result<String, SyncError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SyncError::SourceUnavailable {
                location: self.display.clone(),
                reason: e.to_string(),
            })
    }
}

/// Pick a source for `location`: `http(s)://` URLs are fetched over the
/// network, anything else is read as a file path.
pub fn list_source_for(http: reqwest::Client, location: &str) -> Box<dyn ListSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpListSource::new(http, location))
    } else {
        Box::new(FileListSource::new(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_source_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readme.md");
        std::fs::write(&path, "- Quake\n").unwrap();

        let source = FileListSource::new(&path);
        assert_eq!(source.fetch().await.unwrap(), "- Quake\n");
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileListSource::new(dir.path().join("missing.md"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SyncError::SourceUnavailable { .. }));
    }

    #[test]
    fn location_picks_source_kind() {
        let http = reqwest::Client::new();
        let remote = list_source_for(http.clone(), "https://example.com/readme.md");
        assert_eq!(remote.location(), "https://example.com/readme.md");
        let local = list_source_for(http, "/tmp/readme.md");
        assert_eq!(local.location(), "/tmp/readme.md");
    }
}
