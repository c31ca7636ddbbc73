use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{mpsc, Mutex, Notify};

use crate::download::job::Job;

/// Unbounded FIFO queue of jobs with a single consumer.
///
/// Producers call [`JobQueue::enqueue`] from any task; it never blocks and
/// never fails. The worker pulls with [`JobQueue::dequeue`] and reports
/// completion with [`JobQueue::acknowledge`]. Acknowledgement is bookkeeping
/// only: it lets [`JobQueue::join`] wait until everything enqueued so far has
/// been processed. Nothing is persisted or redelivered.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use teloxide::types::ChatId;
/// use fetchbot::download::job::{Job, MediaKind, Platform};
/// use fetchbot::download::queue::JobQueue;
///
/// # async fn demo() {
/// let queue = Arc::new(JobQueue::new());
/// queue.enqueue(Job::new(ChatId(1), "https://youtu.be/abc", MediaKind::Video, Platform::YouTube));
///
/// let job = queue.dequeue().await;
/// // ... process ...
/// queue.acknowledge();
/// queue.join().await;
/// # }
/// ```
pub struct JobQueue {
    tx: mpsc::UnboundedSender<Job>,
    rx: Mutex<mpsc::UnboundedReceiver<Job>>,
    queued: AtomicUsize,
    unfinished: AtomicUsize,
    drained: Notify,
}

impl JobQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
            queued: AtomicUsize::new(0),
            unfinished: AtomicUsize::new(0),
            drained: Notify::new(),
        }
    }

    /// Appends a job to the tail of the queue.
    pub fn enqueue(&self, job: Job) {
        self.unfinished.fetch_add(1, Ordering::SeqCst);
        self.queued.fetch_add(1, Ordering::SeqCst);
        log::info!(
            "[{}] Queued {} job for chat {} ({}), queue length: {}",
            job.request_id(),
            job.kind(),
            job.chat_id(),
            job.platform(),
            self.len()
        );
        // The receiver lives as long as `self`, so the send cannot fail.
        let _ = self.tx.send(job);
    }

    /// Waits for the next job in FIFO order.
    pub async fn dequeue(&self) -> Job {
        let mut rx = self.rx.lock().await;
        loop {
            if let Some(job) = rx.recv().await {
                self.queued.fetch_sub(1, Ordering::SeqCst);
                return job;
            }
            // Unreachable while `tx` is held by `self`; park instead of spinning.
            std::future::pending::<()>().await;
        }
    }

    /// Marks the most recently dequeued job as finished.
    pub fn acknowledge(&self) {
        let previous = self
            .unfinished
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        match previous {
            Ok(1) => self.drained.notify_waiters(),
            Ok(_) => {}
            Err(_) => log::warn!("acknowledge() called with no outstanding jobs, ignoring"),
        }
    }

    /// Number of jobs waiting to be dequeued.
    pub fn len(&self) -> usize {
        self.queued.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Jobs enqueued but not yet acknowledged (waiting plus in flight).
    pub fn unfinished(&self) -> usize {
        self.unfinished.load(Ordering::SeqCst)
    }

    /// Waits until every enqueued job has been acknowledged.
    pub async fn join(&self) {
        loop {
            let notified = self.drained.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.unfinished() == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}
