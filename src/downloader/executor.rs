use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span};

use crate::catalog::{catalog_path, load_catalog, prepare_clip_dir};
use crate::downloader::{ClipDownloadCoordinator, ClipReport, Planer};
use crate::error::ArchiveError;
use crate::utils::limited_spawner::LimitedSpawner;
use crate::utils::throttle::Throttle;

/// Totals of a finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub clips: usize,
    pub clips_failed: usize,
    pub assets_fetched: usize,
    pub assets_failed: usize,
    pub assets_skipped: usize,
    pub groups_aborted: usize,
}

impl RunSummary {
    fn add(&mut self, report: &ClipReport) {
        self.assets_fetched += report.fetched();
        self.assets_failed += report.failed();
        self.assets_skipped += report.skipped();
        self.groups_aborted += report.aborted();
    }
}

/// Drives a whole catalog: prepares each clip's directory in catalog order,
/// then hands its downloads to a bounded pool.
pub struct CatalogProcessor {
    root: PathBuf,
    coordinator: Arc<ClipDownloadCoordinator>,
    throttle: Arc<dyn Throttle>,
    concurrency: usize,
}

impl CatalogProcessor {
    pub fn new(
        root: impl Into<PathBuf>,
        coordinator: ClipDownloadCoordinator,
        throttle: Arc<dyn Throttle>,
        concurrency: usize,
    ) -> Self {
        Self {
            root: root.into(),
            coordinator: Arc::new(coordinator),
            throttle,
            concurrency: concurrency.clamp(1, Semaphore::MAX_PERMITS),
        }
    }

    /// Catalog and directory errors end the run; download errors never do.
    pub async fn run(&self, user: &str) -> Result<RunSummary, ArchiveError> {
        let clips = load_catalog(&catalog_path(&self.root, user)).await?;
        info!(user, count = clips.len(), "clips to process");

        let jobs = Planer::new(&self.root).plan(&clips);
        let spawner = LimitedSpawner::new(self.concurrency);
        let mut handles: Vec<(u64, JoinHandle<ClipReport>)> = Vec::with_capacity(jobs.len());

        for (clip, job) in clips.iter().zip(jobs) {
            info!(id = clip.id, title = %clip.title, "processing clip");
            if let Err(err) = prepare_clip_dir(&job.dir, clip).await {
                error!(id = clip.id, error = %err, "cannot prepare clip, stopping run");
                spawner.close();
                for (_, handle) in &handles {
                    handle.abort();
                }
                return Err(err.into());
            }

            let id = job.id;
            let span = info_span!("clip", id, title = %job.title);
            let coordinator = Arc::clone(&self.coordinator);
            let handle = spawner
                .spawn(async move { coordinator.download(&job).await }.instrument(span))
                .await?;
            handles.push((id, handle));

            self.throttle.pause_submission().await;
        }

        let mut summary = RunSummary {
            clips: handles.len(),
            ..RunSummary::default()
        };
        for (id, handle) in handles {
            match handle.await {
                Ok(report) => summary.add(&report),
                Err(err) => {
                    error!(id, error = %err, "clip task failed");
                    summary.clips_failed += 1;
                }
            }
        }

        info!(
            clips = summary.clips,
            fetched = summary.assets_fetched,
            failed = summary.assets_failed,
            skipped = summary.assets_skipped,
            "all clips processed"
        );
        Ok(summary)
    }
}
