//! Job queue, fetch strategies and the worker that ties them together

pub mod dispatcher;
pub mod error;
pub mod fetcher;
pub mod guard;
pub mod job;
pub mod probe;
pub mod queue;
pub mod sink;
pub mod source;
pub mod worker;
pub mod ytdlp_errors;

// Re-exports for convenience
pub use dispatcher::PlatformDispatcher;
pub use error::{user_message, DownloadError, JobError};
pub use fetcher::{MediaFetcher, YtDlpFetcher};
pub use guard::TempFileGuard;
pub use job::{Job, MediaKind, Platform};
pub use queue::JobQueue;
pub use sink::{Artifact, DeliveryError, ResultSink};
pub use source::{DownloadResult, MediaSource};
pub use worker::{Worker, WorkerSettings};
