use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::downloader::GroupKind;

/// Errors that end the whole run.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot create clip directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot write {path}: {source}")]
    WriteMetadata { path: PathBuf, source: io::Error },

    #[error("cannot encode metadata for {path}: {source}")]
    EncodeMetadata {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum FetchErrorKind {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}

/// A single asset that could not be downloaded.
#[derive(Debug, Error)]
#[error("fetching {url} into {path}: {kind}")]
pub struct FetchError {
    pub url: String,
    pub path: PathBuf,
    #[source]
    pub kind: FetchErrorKind,
}

impl FetchError {
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>, kind: FetchErrorKind) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            kind,
        }
    }
}

#[derive(Debug, Error)]
pub enum GroupError {
    #[error("{group} group aborted, {skipped} asset(s) not attempted: {source}")]
    Aborted {
        group: GroupKind,
        skipped: usize,
        #[source]
        source: FetchError,
    },
}

/// Everything that can end an archive run early.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("cannot read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("cannot parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("worker pool closed: {0}")]
    Pool(#[from] tokio::sync::AcquireError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_carries_context() {
        let err = FetchError::new(
            "https://cdn.example/path/seg.mp4",
            "/out/Cat/seg.mp4",
            FetchErrorKind::Status(reqwest::StatusCode::NOT_FOUND),
        );
        let msg = err.to_string();
        assert!(msg.contains("https://cdn.example/path/seg.mp4"));
        assert!(msg.contains("/out/Cat/seg.mp4"));
        assert!(msg.contains("404"));
    }
}
