use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::config::ArchiveConfig;
use crate::error::{FetchError, FetchErrorKind};

/// Downloads one URL into one local file, replacing any previous content.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, destination: &Path, url: &str) -> Result<(), FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &ArchiveConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    async fn download(&self, destination: &Path, url: &str) -> Result<(), FetchErrorKind> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchErrorKind::Status(status));
        }

        let mut file = tokio::fs::File::create(destination).await?;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, destination: &Path, url: &str) -> Result<(), FetchError> {
        self.download(destination, url)
            .await
            .map_err(|kind| FetchError::new(url, destination, kind))
    }
}

/// Last non-empty path segment of `url`, the local name of a fetched asset.
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
