//! Scheduler for bounded-parallel recursive crawling
//!
//! This module handles:
//! - The work queue tasks use to launch children
//! - Global concurrency limiting via a semaphore
//! - The pending-task counter that decides when a run is finished
//!
//! Tasks never spawn each other directly. A task launches a child by bumping
//! the pending counter and sending a [`CrawlTask`] on the queue; the dispatcher
//! loop spawns each queued task into a `JoinSet`. The run ends when the
//! pending counter returns to zero.

use crate::output::CrawlStatistics;
use crate::state::TaskOutcome;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Notify, Semaphore};
use tokio::task::{JoinError, JoinSet};

/// Count of launched-but-not-finished crawl tasks
#[derive(Debug, Default)]
pub struct PendingTasks {
    count: AtomicUsize,
    drained: Notify,
}

impl PendingTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current number of pending tasks
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    fn increment(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }

    fn complete(&self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.drained.notify_one();
        }
    }

    /// Resolves once the pending count is zero
    pub async fn wait_drained(&self) {
        loop {
            let notified = self.drained.notified();
            if self.count() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Holds one unit of the pending count; releases it on drop
///
/// Dropping covers every way a task can end, panics included.
#[derive(Debug)]
pub struct PendingGuard {
    pending: Arc<PendingTasks>,
}

impl PendingGuard {
    fn new(pending: Arc<PendingTasks>) -> Self {
        pending.increment();
        Self { pending }
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.pending.complete();
    }
}

/// A queued unit of work: a raw, not yet normalized URL
#[derive(Debug)]
pub struct CrawlTask {
    /// URL exactly as discovered
    pub url: String,

    /// Pending-count share owned by this task until it is done
    pending: PendingGuard,
}

/// Handle tasks use to launch children
#[derive(Debug, Clone)]
pub struct TaskLauncher {
    queue: mpsc::UnboundedSender<CrawlTask>,
    pending: Arc<PendingTasks>,
}

impl TaskLauncher {
    /// Queues a crawl task for `url`
    ///
    /// The pending count is incremented before the task is queued. Returns
    /// false if the dispatcher is gone; the count is released again in that case.
    pub fn launch(&self, url: String) -> bool {
        let task = CrawlTask {
            url,
            pending: PendingGuard::new(Arc::clone(&self.pending)),
        };

        self.queue.send(task).is_ok()
    }
}

/// Dispatcher owning the work queue, the concurrency slots, and the pending counter
pub struct Scheduler {
    /// Concurrency slots; one is held for the whole life of a running task
    slots: Arc<Semaphore>,

    pending: Arc<PendingTasks>,

    launcher: TaskLauncher,

    queue: mpsc::UnboundedReceiver<CrawlTask>,
}

impl Scheduler {
    /// Creates a scheduler with `max_concurrency` slots
    pub fn new(max_concurrency: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let pending = Arc::new(PendingTasks::new());

        Self {
            slots: Arc::new(Semaphore::new(max_concurrency)),
            launcher: TaskLauncher {
                queue: tx,
                pending: Arc::clone(&pending),
            },
            pending,
            queue: rx,
        }
    }

    /// Returns a handle for launching tasks into this scheduler
    pub fn launcher(&self) -> TaskLauncher {
        self.launcher.clone()
    }

    /// Runs the crawl from `seed` until every launched task is done
    ///
    /// `work` builds the body of one task for a raw URL. Each body runs only
    /// after its task has acquired a concurrency slot, and the slot is held
    /// until the body returns. Queued tasks waiting for a slot are not bounded.
    pub async fn run<F, Fut>(self, seed: String, work: F, statistics: &mut CrawlStatistics)
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = TaskOutcome> + Send + 'static,
    {
        let Scheduler {
            slots,
            pending,
            launcher,
            mut queue,
        } = self;

        // The root task seeds the pending counter at 1
        launcher.launch(seed);
        drop(launcher);

        let mut running = JoinSet::new();

        loop {
            tokio::select! {
                Some(task) = queue.recv() => {
                    running.spawn(admit(Arc::clone(&slots), task, &work));
                }
                Some(joined) = running.join_next() => {
                    record_joined(statistics, joined);
                }
                _ = pending.wait_drained() => break,
            }
        }

        while let Some(joined) = running.join_next().await {
            record_joined(statistics, joined);
        }

        tracing::debug!(
            "dispatcher finished, {} tasks completed",
            statistics.tasks_completed
        );
    }
}

/// Wraps a task body with slot admission and pending-count release
fn admit<F, Fut>(
    slots: Arc<Semaphore>,
    task: CrawlTask,
    work: &F,
) -> impl Future<Output = TaskOutcome> + Send + 'static
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = TaskOutcome> + Send + 'static,
{
    let CrawlTask { url, pending } = task;
    let body = work(url);

    async move {
        // Dropped last: the slot is released before the task stops counting as pending
        let _pending = pending;

        let _slot = match slots.acquire_owned().await {
            Ok(permit) => permit,
            Err(e) => {
                tracing::error!("concurrency slot unavailable: {}", e);
                return TaskOutcome::NotAdmitted;
            }
        };

        body.await
    }
}

fn record_joined(statistics: &mut CrawlStatistics, joined: Result<TaskOutcome, JoinError>) {
    match joined {
        Ok(outcome) => statistics.record(outcome),
        Err(e) => {
            tracing::error!("crawl task panicked: {}", e);
            statistics.record_panic();
        }
    }
}
