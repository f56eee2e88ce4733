use futures::future::join_all;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::downloader::{ClipJob, GroupDownloader, GroupReport};
use crate::error::GroupError;

/// Per-group results of one clip, one slot per group in plan order.
#[derive(Debug)]
pub struct ClipReport {
    pub id: u64,
    pub groups: Vec<Result<GroupReport, GroupError>>,
}

impl ClipReport {
    pub fn fetched(&self) -> usize {
        self.reports().map(|r| r.fetched).sum()
    }

    pub fn failed(&self) -> usize {
        self.reports().map(|r| r.failures.len()).sum::<usize>() + self.aborted()
    }

    pub fn skipped(&self) -> usize {
        self.reports().map(|r| r.skipped).sum()
    }

    pub fn aborted(&self) -> usize {
        self.groups.iter().filter(|g| g.is_err()).count()
    }

    fn reports(&self) -> impl Iterator<Item = &GroupReport> {
        self.groups.iter().filter_map(|g| g.as_ref().ok())
    }
}

/// Runs all asset groups of a clip concurrently and waits for every one of
/// them. Group failures end up in the report, never in an error.
pub struct ClipDownloadCoordinator {
    groups: GroupDownloader,
}

impl ClipDownloadCoordinator {
    pub fn new(groups: GroupDownloader) -> Self {
        Self { groups }
    }

    pub async fn download(&self, job: &ClipJob) -> ClipReport {
        info!(dir = %job.dir.display(), "downloading clip");

        let branches = job.groups.iter().map(|group| {
            self.groups
                .download(&job.dir, group)
                .instrument(info_span!("group", kind = %group.kind))
        });
        let results = join_all(branches).await;

        for (group, result) in job.groups.iter().zip(&results) {
            match result {
                Ok(report) => match report.failures.first() {
                    None => debug!(group = %group.kind, fetched = report.fetched, "group done"),
                    Some(first) => warn!(
                        group = %group.kind,
                        failed = report.failures.len(),
                        error = %first,
                        "group finished with failures"
                    ),
                },
                Err(err) => warn!(group = %group.kind, error = %err, "group aborted"),
            }
        }

        let report = ClipReport {
            id: job.id,
            groups: results,
        };
        info!(
            fetched = report.fetched(),
            failed = report.failed(),
            skipped = report.skipped(),
            "finished clip"
        );
        report
    }
}
