//! Bounded worker pool shared by the whole crawl
//!
//! This module handles:
//! - Global concurrency limiting via a semaphore
//! - Tracking of outstanding (submitted but unfinished) tasks
//! - Waiting for transitively submitted work to drain
//! - Crawl-fatal aborts
//!
//! One pool serves every discovery level, so the number of tasks doing work
//! at the same time never exceeds `size`, whatever the shape of the graph.

use crate::CrawlError;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, Semaphore};

/// Handle to the crawl's worker pool
///
/// Cloning is cheap and every clone refers to the same pool, which is how
/// running tasks submit follow-up work.
#[derive(Clone)]
pub struct WorkerPool {
    inner: Arc<PoolInner>,
}

struct PoolInner {
    /// Maximum number of tasks running at once
    size: usize,

    /// One permit per running task
    permits: Arc<Semaphore>,

    /// Tasks submitted but not yet completed
    outstanding: AtomicUsize,

    /// Woken when `outstanding` drops to zero
    idle: Notify,

    /// Set once the pool refuses new submissions
    closed: AtomicBool,

    /// First crawl-fatal error recorded by any task
    fatal: Mutex<Option<CrawlError>>,
}

/// Decrements the outstanding counter when a task ends, however it ends
struct CompletionGuard {
    pool: WorkerPool,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.pool.complete();
    }
}

impl WorkerPool {
    /// Creates a pool that runs at most `size` tasks concurrently
    ///
    /// A `size` of zero is raised to one so the pool can always make progress,
    /// and sizes beyond the semaphore's permit limit are capped to it.
    pub fn new(size: usize) -> Self {
        let size = size.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            inner: Arc::new(PoolInner {
                size,
                permits: Arc::new(Semaphore::new(size)),
                outstanding: AtomicUsize::new(0),
                idle: Notify::new(),
                closed: AtomicBool::new(false),
                fatal: Mutex::new(None),
            }),
        }
    }

    /// Submits a task for execution
    ///
    /// The outstanding counter is incremented before this returns, so a task
    /// that submits children keeps the pool busy until those children are
    /// accounted for. Never waits for the task to run; the queue is unbounded.
    /// Must be called from within a tokio runtime.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The task is queued and will run once a worker slot frees up
    /// * `Err(CrawlError::PoolClosed)` - The pool was closed; the task was not queued
    pub fn submit<F>(&self, task: F) -> Result<(), CrawlError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.is_closed() {
            return Err(CrawlError::PoolClosed);
        }

        self.inner.outstanding.fetch_add(1, Ordering::AcqRel);
        let guard = CompletionGuard { pool: self.clone() };
        let permits = Arc::clone(&self.inner.permits);

        tokio::spawn(async move {
            let guard = guard;
            // Acquisition only fails once `abort` has closed the semaphore
            let Ok(_permit) = permits.acquire_owned().await else {
                return;
            };
            // A panicking task loses the links it would have submitted
            if let Err(err) = tokio::spawn(task).await {
                if err.is_panic() {
                    guard.pool.abort(CrawlError::TaskPanicked(err.to_string()));
                }
            }
        });

        Ok(())
    }

    /// Waits until every submitted task has completed
    ///
    /// Tasks submitted while waiting, including those submitted by running
    /// tasks, are waited for too.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The pool drained with no fatal error
    /// * `Err(CrawlError)` - The first fatal error recorded by `abort`
    pub async fn join(&self) -> Result<(), CrawlError> {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            // Register interest before reading the counter so a zero-crossing
            // between the load and the await is not missed
            notified.as_mut().enable();

            if self.inner.outstanding.load(Ordering::Acquire) == 0 {
                break;
            }
            notified.await;
        }

        match self.take_fatal() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Stops accepting new tasks
    ///
    /// Tasks already queued still run, which lets them observe cancellation
    /// and finish as abandoned.
    pub fn close(&self) {
        self.inner.closed.store(true, Ordering::Release);
    }

    /// Records a crawl-fatal error and shuts the pool down
    ///
    /// Only the first error is kept. Queued tasks are released without
    /// running; tasks already running finish but can no longer submit.
    pub fn abort(&self, err: CrawlError) {
        tracing::error!("Aborting crawl: {}", err);
        if let Ok(mut slot) = self.inner.fatal.lock() {
            if slot.is_none() {
                *slot = Some(err);
            }
        }
        self.close();
        self.inner.permits.close();
    }

    /// Returns whether the pool refuses new submissions
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Number of tasks submitted but not yet completed
    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::Acquire)
    }

    /// Maximum number of concurrently running tasks
    pub fn size(&self) -> usize {
        self.inner.size
    }

    fn complete(&self) {
        let previous =
            self.inner
                .outstanding
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                    n.checked_sub(1)
                });

        match previous {
            Ok(1) => self.inner.idle.notify_waiters(),
            Ok(_) => {}
            Err(_) => {
                self.abort(CrawlError::CounterUnderflow);
                self.inner.idle.notify_waiters();
            }
        }
    }

    fn take_fatal(&self) -> Option<CrawlError> {
        self.inner.fatal.lock().ok().and_then(|mut slot| slot.take())
    }
}
