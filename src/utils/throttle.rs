//! Request pacing for asset downloads.

use std::time::Duration;

use async_trait::async_trait;

use crate::downloader::GroupKind;

/// Paces consecutive requests. Group downloaders call `pause` between two
/// fetches of the same group, the catalog loop calls `pause_submission`
/// after handing a clip to the worker pool.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self, group: GroupKind);

    async fn pause_submission(&self);
}

/// Sleeps a fixed interval per call.
#[derive(Debug, Clone)]
pub struct FixedInterval {
    pub file: Duration,
    pub image: Duration,
    pub submission: Duration,
}

impl FixedInterval {
    pub fn interval(&self, group: GroupKind) -> Duration {
        match group {
            GroupKind::File => self.file,
            GroupKind::Image | GroupKind::Frame => self.image,
        }
    }
}

impl Default for FixedInterval {
    fn default() -> Self {
        Self {
            file: Duration::from_millis(100),
            image: Duration::from_secs(1),
            submission: Duration::from_secs(1),
        }
    }
}

#[async_trait]
impl Throttle for FixedInterval {
    async fn pause(&self, group: GroupKind) {
        let interval = self.interval(group);
        if !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }

    async fn pause_submission(&self) {
        if !self.submission.is_zero() {
            tokio::time::sleep(self.submission).await;
        }
    }
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThrottle;

#[async_trait]
impl Throttle for NoThrottle {
    async fn pause(&self, _group: GroupKind) {}

    async fn pause_submission(&self) {}
}
