use std::future::Future;
use std::sync::Arc;
use tokio::sync::{AcquireError, Semaphore};
use tokio::task::JoinHandle;

/// Bounded worker pool for clip downloads.
///
/// Every spawned task holds one semaphore permit until it finishes (or
/// panics), so at most `max_concurrent` tasks are ever in flight. `spawn`
/// waits for a free permit, which is what gives the catalog loop its
/// backpressure.
pub struct LimitedSpawner {
    semaphore: Arc<Semaphore>,
}

impl LimitedSpawner {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    pub async fn spawn<F>(&self, f: F) -> Result<JoinHandle<F::Output>, AcquireError>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let permit = Arc::clone(&self.semaphore).acquire_owned().await?;
        Ok(tokio::spawn(async move {
            let _permit = permit;
            f.await
        }))
    }

    /// Closes the pool; pending and future `spawn` calls fail instead of waiting.
    pub fn close(&self) {
        self.semaphore.close();
    }
}
