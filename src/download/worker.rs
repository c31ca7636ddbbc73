//! Single-consumer job worker
//!
//! Drains the [`JobQueue`] one job at a time:
//!
//! `IDLE -> DEQUEUE -> DISPATCH -> FETCH -> VALIDATE_SIZE -> DELIVER -> CLEANUP -> ACK -> IDLE`
//!
//! Every dequeued job is acknowledged exactly once. Failures are turned into
//! one user-facing text and the loop moves on; only an internal failure
//! (a panic or another unclassified defect) pauses the loop for the error
//! backoff. Cancellation is checked while waiting for work; a job already in
//! flight gets the shutdown grace period and is then abandoned.

use futures_util::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use strum::Display;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::config;
use crate::core::error::AppError;
use crate::download::dispatcher::PlatformDispatcher;
use crate::download::error::{user_message, DownloadError, JobError};
use crate::download::guard::sweep_partials;
use crate::download::job::Job;
use crate::download::queue::JobQueue;
use crate::download::sink::{Artifact, ResultSink};
use crate::download::source::enforce_size_limit;

/// Stage of the job currently being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkerState {
    Idle,
    Dequeue,
    Dispatch,
    Fetch,
    ValidateSize,
    Deliver,
    Cleanup,
    Ack,
}

/// Tunables of the worker loop.
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    /// Largest artifact handed to the sink, in bytes
    pub size_limit: u64,
    /// Pause after an internal failure
    pub error_backoff: Duration,
    /// Time an in-flight job gets after shutdown is requested
    pub shutdown_grace: Duration,
    /// Directory the fetchers write into, swept after an abandoned job
    pub temp_dir: PathBuf,
}

impl WorkerSettings {
    pub fn from_config() -> Self {
        Self {
            size_limit: *config::MAX_FILE_SIZE_BYTES,
            error_backoff: config::worker::error_backoff(),
            shutdown_grace: config::worker::shutdown_grace(),
            temp_dir: PathBuf::from(config::TEMP_FILES_DIR.as_str()),
        }
    }
}

/// How one dequeued job ended.
enum Outcome {
    Finished(Result<(), JobError>),
    Abandoned,
}

pub struct Worker {
    queue: Arc<JobQueue>,
    dispatcher: Arc<PlatformDispatcher>,
    sink: Arc<dyn ResultSink>,
    settings: WorkerSettings,
}

impl Worker {
    pub fn new(
        queue: Arc<JobQueue>,
        dispatcher: Arc<PlatformDispatcher>,
        sink: Arc<dyn ResultSink>,
        settings: WorkerSettings,
    ) -> Self {
        Self {
            queue,
            dispatcher,
            sink,
            settings,
        }
    }

    /// Runs the worker on its own task.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }

    /// Processes jobs until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        log::info!(
            "Worker started (size limit {} bytes, grace {:?})",
            self.settings.size_limit,
            self.settings.shutdown_grace
        );

        loop {
            log::debug!("Worker state: {}", WorkerState::Dequeue);
            let job = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    log::info!("Worker cancelled while waiting for jobs");
                    break;
                }
                job = self.queue.dequeue() => job,
            };

            let rid = job.request_id().to_string();
            log::info!(
                "[{}] Processing {} job for chat {} ({}, waited {}s): {}",
                rid,
                job.kind(),
                job.chat_id(),
                job.platform(),
                job.age_secs(),
                job.url()
            );

            let outcome = self.run_with_grace(&job, &cancel).await;

            trace_state(&rid, WorkerState::Ack);
            self.queue.acknowledge();

            match outcome {
                Outcome::Finished(Ok(())) => {
                    log::info!("[{}] Job finished", rid);
                }
                Outcome::Finished(Err(err)) if err.needs_backoff() => {
                    log::error!(
                        "CRITICAL: [{}] Worker failure: {}. Pausing for {:?}",
                        rid,
                        err,
                        self.settings.error_backoff
                    );
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(self.settings.error_backoff) => {}
                    }
                }
                Outcome::Finished(Err(err)) => {
                    log::info!("[{}] Job ended with {}", rid, err);
                }
                Outcome::Abandoned => {
                    let removed = sweep_partials(&self.settings.temp_dir, &rid).await;
                    log::warn!(
                        "[{}] Job abandoned after {:?} grace period, removed {} partial file(s)",
                        rid,
                        self.settings.shutdown_grace,
                        removed
                    );
                    break;
                }
            }
            trace_state(&rid, WorkerState::Idle);
        }

        log::info!("Worker stopped, {} job(s) left in queue", self.queue.len());
    }

    /// Drives one job, giving it the grace period once shutdown is requested.
    ///
    /// Dropping the job future on timeout drops its temp file guard and kills
    /// a running extractor.
    async fn run_with_grace(&self, job: &Job, cancel: &CancellationToken) -> Outcome {
        let handled = self.handle(job);
        tokio::pin!(handled);

        tokio::select! {
            biased;
            result = &mut handled => return Outcome::Finished(result),
            _ = cancel.cancelled() => {}
        }

        log::warn!(
            "[{}] Shutdown requested, waiting up to {:?} for the current job",
            job.request_id(),
            self.settings.shutdown_grace
        );
        match tokio::time::timeout(self.settings.shutdown_grace, &mut handled).await {
            Ok(result) => Outcome::Finished(result),
            Err(_) => Outcome::Abandoned,
        }
    }

    /// Processes a job and notifies the user if it failed.
    async fn handle(&self, job: &Job) -> Result<(), JobError> {
        let result = match catch_panic(self.process(job)).await {
            Ok(result) => result,
            Err(e) => Err(JobError::Internal(e)),
        };
        if let Err(err) = &result {
            self.notify_failure(job, err).await;
        }
        result
    }

    async fn process(&self, job: &Job) -> Result<(), JobError> {
        let rid = job.request_id();

        trace_state(rid, WorkerState::Dispatch);
        let source = self
            .dispatcher
            .resolve(job.platform())
            .ok_or_else(|| JobError::UnsupportedPlatform(job.platform().to_string()))?;
        let platform = source.platform();

        trace_state(rid, WorkerState::Fetch);
        let fetched = source
            .fetch(job.kind(), job.url(), rid)
            .await
            .map_err(|error| JobError::Download { platform, error })?;

        trace_state(rid, WorkerState::ValidateSize);
        let fetched = enforce_size_limit(fetched, self.settings.size_limit)
            .await
            .map_err(|error| JobError::Download { platform, error })?;

        trace_state(rid, WorkerState::Deliver);
        let artifact = Artifact {
            kind: job.kind(),
            path: fetched.file.path().to_path_buf(),
            title: fetched.title.clone(),
            platform,
        };
        log::info!("[{}] Sending {} \"{}\" to chat {}", rid, artifact.kind, artifact.title, job.chat_id());
        let delivered = self.sink.send_artifact(job.chat_id(), &artifact, rid).await;

        trace_state(rid, WorkerState::Cleanup);
        fetched.file.release().await;

        delivered.map_err(JobError::Delivery)
    }

    /// Logs the failure and sends its user text, best effort.
    async fn notify_failure(&self, job: &Job, err: &JobError) {
        let rid = job.request_id();
        match err {
            JobError::Download {
                error: DownloadError::FileNotFound(path),
                ..
            } => log::error!("[{}] Downloaded file missing: {} ({})", rid, path.display(), job.url()),
            JobError::Download { error, .. } => log::warn!(
                "[{}] Download failed ({}) for {} in chat {}: {}",
                rid,
                error.subcategory(),
                job.url(),
                job.chat_id(),
                err
            ),
            JobError::UnsupportedPlatform(tag) => {
                log::warn!("[{}] No strategy for platform {:?}", rid, tag)
            }
            JobError::Delivery(e) => log::error!("[{}] Failed to deliver to chat {}: {}", rid, job.chat_id(), e),
            JobError::Internal(e) => log::error!("[{}] Internal error: {}", rid, e),
        }

        let text = user_message(err);
        match catch_panic(self.sink.send_text(job.chat_id(), &text, rid)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log::error!("[{}] Failed to send error message to chat {}: {}", rid, job.chat_id(), e),
            Err(e) => log::error!("[{}] Error message delivery panicked: {}", rid, e),
        }
    }
}

fn trace_state(request_id: &str, state: WorkerState) {
    log::debug!("[{}] Worker state: {}", request_id, state);
}

/// Runs a future, turning a panic into [`AppError::Internal`].
async fn catch_panic<T>(fut: impl Future<Output = T>) -> Result<T, AppError> {
    AssertUnwindSafe(fut)
        .catch_unwind()
        .await
        .map_err(|payload| AppError::Internal(format!("panic: {}", panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
