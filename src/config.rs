use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ArchiveError;
use crate::utils::throttle::FixedInterval;

/// What an image or frame group does after one of its fetches fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log the failure and move on to the next asset.
    #[default]
    Continue,
    /// Stop the group and report the failure.
    Abort,
}

/// Tunables of an archive run, optionally read from a TOML file.
///
/// Every key is optional; missing keys keep their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Maximum number of clips downloading at the same time.
    pub concurrency: usize,
    /// Pause between two fetches of the file-rendition group.
    pub file_interval_ms: u64,
    /// Pause between two fetches of an image or frame group.
    pub image_interval_ms: u64,
    /// Pause after handing a clip to the worker pool.
    pub submit_interval_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub image_failure_policy: FailurePolicy,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            file_interval_ms: 100,
            image_interval_ms: 1000,
            submit_interval_ms: 1000,
            request_timeout_secs: 60,
            user_agent: concat!("coubsync/", env!("CARGO_PKG_VERSION")).to_string(),
            image_failure_policy: FailurePolicy::Continue,
        }
    }
}

impl ArchiveConfig {
    pub fn load(path: &Path) -> Result<Self, ArchiveError> {
        let data = std::fs::read_to_string(path).map_err(|source| ArchiveError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data).map_err(|source| ArchiveError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn throttle(&self) -> FixedInterval {
        FixedInterval {
            file: Duration::from_millis(self.file_interval_ms),
            image: Duration::from_millis(self.image_interval_ms),
            submission: Duration::from_millis(self.submit_interval_ms),
        }
    }
}
