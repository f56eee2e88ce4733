use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::FailurePolicy;
use crate::downloader::{AssetFetcher, AssetGroup, GroupKind};
use crate::error::{FetchError, GroupError};
use crate::utils::multierr::MultiError;
use crate::utils::throttle::Throttle;

/// Outcome of a group that ran to its end.
#[derive(Debug)]
pub struct GroupReport {
    pub kind: GroupKind,
    pub fetched: usize,
    pub skipped: usize,
    pub failures: MultiError<FetchError>,
}

impl GroupReport {
    fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            fetched: 0,
            skipped: 0,
            failures: MultiError::new(),
        }
    }
}

/// Fetches the assets of one group strictly in order, pausing between
/// consecutive requests.
pub struct GroupDownloader {
    fetcher: Arc<dyn AssetFetcher>,
    throttle: Arc<dyn Throttle>,
    image_policy: FailurePolicy,
}

impl GroupDownloader {
    pub fn new(fetcher: Arc<dyn AssetFetcher>, throttle: Arc<dyn Throttle>) -> Self {
        Self {
            fetcher,
            throttle,
            image_policy: FailurePolicy::Continue,
        }
    }

    /// Failure policy of the image and frame groups. The file group always
    /// continues.
    pub fn with_image_policy(mut self, policy: FailurePolicy) -> Self {
        self.image_policy = policy;
        self
    }

    fn policy(&self, kind: GroupKind) -> FailurePolicy {
        match kind {
            GroupKind::File => FailurePolicy::Continue,
            GroupKind::Image | GroupKind::Frame => self.image_policy,
        }
    }

    pub async fn download(&self, dir: &Path, group: &AssetGroup) -> Result<GroupReport, GroupError> {
        let policy = self.policy(group.kind);
        let mut report = GroupReport::new(group.kind);
        let mut attempted = 0;

        for (index, asset) in group.assets.iter().enumerate() {
            let Some(file_name) = asset.file_name.as_deref() else {
                warn!(rendition = %asset.label, url = %asset.url, "no usable URL, skipping");
                report.skipped += 1;
                continue;
            };

            if attempted > 0 {
                self.throttle.pause(group.kind).await;
            }
            attempted += 1;

            let path = dir.join(file_name);
            debug!(rendition = %asset.label, url = %asset.url, path = %path.display(), "fetching");
            match self.fetcher.fetch(&path, &asset.url).await {
                Ok(()) => report.fetched += 1,
                Err(err) => {
                    warn!(rendition = %asset.label, error = %err, "download failed");
                    if policy == FailurePolicy::Abort {
                        return Err(GroupError::Aborted {
                            group: group.kind,
                            skipped: group.assets.len() - index - 1,
                            source: err,
                        });
                    }
                    report.failures.push(err);
                }
            }
        }

        Ok(report)
    }
}
