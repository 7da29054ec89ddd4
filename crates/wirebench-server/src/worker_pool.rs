use std::sync::Arc;
use tokio::sync::Semaphore;
use wirebench_common::protocol::Status;

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 10;

/// Configuration for the worker pool
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    pub workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

impl PoolConfig {
    /// A pool with `workers` workers; zero is raised to one.
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

/// Fixed-size pool that runs RPC calls on blocking worker threads.
///
/// At most `workers` calls execute at once; further calls wait for a permit
/// in the semaphore's FIFO backlog.
#[derive(Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    config: PoolConfig,
}

impl WorkerPool {
    pub fn new(config: PoolConfig) -> Self {
        let config = PoolConfig::with_workers(config.workers);
        Self {
            semaphore: Arc::new(Semaphore::new(config.workers)),
            config,
        }
    }

    /// Runs `job` on a worker once one is free.
    ///
    /// A panicking job is reported as [`Status::internal`]; a closed pool as
    /// [`Status::unavailable`].
    pub async fn execute<F, T>(&self, job: F) -> Result<T, Status>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| Status::unavailable(format!("worker pool closed: {}", e)))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| {
            tracing::error!("Worker failed: {}", e);
            Status::internal(format!("worker failed: {}", e))
        })
    }

    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Workers currently free to take a call.
    pub fn idle_workers(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Stops accepting new jobs; waiting and future calls get `Unavailable`.
    pub fn close(&self) {
        self.semaphore.close();
    }
}
