mod coordinator;
mod executor;
mod fetcher;
mod group;
mod planer;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub use coordinator::{ClipDownloadCoordinator, ClipReport};
pub use executor::{CatalogProcessor, RunSummary};
pub use fetcher::{AssetFetcher, HttpFetcher, filename_from_url};
pub use group::{GroupDownloader, GroupReport};
pub use planer::{AssetGroup, ClipJob, PlannedAsset, Planer};

use crate::config::ArchiveConfig;
use crate::error::ArchiveError;

/// The asset groups downloaded for every clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    File,
    Image,
    Frame,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GroupKind::File => "file",
            GroupKind::Image => "image",
            GroupKind::Frame => "frame",
        })
    }
}

/// Archives every non-repost clip of `user` below `root`.
pub async fn archive(
    root: &Path,
    user: &str,
    config: &ArchiveConfig,
) -> Result<RunSummary, ArchiveError> {
    let fetcher = HttpFetcher::new(config).map_err(ArchiveError::Client)?;
    let throttle = Arc::new(config.throttle());
    let groups = GroupDownloader::new(Arc::new(fetcher), throttle.clone())
        .with_image_policy(config.image_failure_policy);
    let processor = CatalogProcessor::new(
        root,
        ClipDownloadCoordinator::new(groups),
        throttle,
        config.concurrency,
    );
    processor.run(user).await
}
