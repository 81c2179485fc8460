// ABOUTME: Rate-limited sequencer that runs submitted async work one item at a
// ABOUTME: time, in submission order, with a minimum gap between starts.

use std::collections::VecDeque;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

use super::handle::Settlement;
use super::{OutcomeHandle, SequencerError};

/// Hands a finished item's outcome to its submitter.
type Delivery = Box<dyn FnOnce() + Send>;

/// A type-erased work item: runs the work, yielding its delivery.
type Job = Box<dyn FnOnce() -> BoxFuture<'static, Delivery> + Send>;

struct WorkItem {
    id: u64,
    job: Job,
}

/// Counters describing what the sequencer has done so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequencerStats {
    /// Items accepted by `submit`.
    pub submitted: u64,
    /// Items whose work has been invoked.
    pub started: u64,
    /// Items whose outcome has been delivered.
    pub settled: u64,
}

/// Queue and timing state, protected by a single mutex.
struct SequencerState {
    queue: VecDeque<WorkItem>,
    draining: bool,
    last_start: Option<Instant>,
    next_id: u64,
    stats: SequencerStats,
}

struct Inner {
    state: Mutex<SequencerState>,
    min_interval: Duration,
    runtime: Handle,
}

/// Runs asynchronous work strictly one item at a time.
///
/// Items start in submission order. Item N+1 starts only after item N has
/// settled and at least `min_interval` has passed since item N started.
/// The drain loop is spawned lazily when work arrives and exits once the
/// queue is empty; the last start time survives across idle periods.
///
/// Cloning is cheap; clones share the same queue.
#[derive(Clone)]
pub struct Sequencer {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("min_interval", &self.inner.min_interval)
            .field("pending", &self.pending())
            .field("draining", &self.is_draining())
            .finish()
    }
}

impl Sequencer {
    /// Create a sequencer allowing at most `max_rate` starts per second.
    ///
    /// Must be called from within a Tokio runtime; the drain loop is
    /// spawned on the current runtime.
    pub fn new(max_rate: f64) -> Result<Self, SequencerError> {
        let runtime = Handle::try_current().map_err(|_| SequencerError::NoRuntime)?;
        Self::with_handle(max_rate, runtime)
    }

    /// Create a sequencer whose drain loop runs on the given runtime.
    pub fn with_handle(max_rate: f64, runtime: Handle) -> Result<Self, SequencerError> {
        if !max_rate.is_finite() || max_rate <= 0.0 {
            return Err(SequencerError::InvalidRate(max_rate));
        }
        let min_interval = Duration::try_from_secs_f64(1.0 / max_rate)
            .map_err(|_| SequencerError::InvalidRate(max_rate))?;
        debug!(max_rate, ?min_interval, "sequencer created");

        Ok(Self {
            inner: Arc::new(Inner {
                state: Mutex::new(SequencerState {
                    queue: VecDeque::new(),
                    draining: false,
                    last_start: None,
                    next_id: 1,
                    stats: SequencerStats::default(),
                }),
                min_interval,
                runtime,
            }),
        })
    }

    /// Minimum time between the starts of two consecutive items.
    pub fn min_interval(&self) -> Duration {
        self.inner.min_interval
    }

    /// Number of items queued and not yet started.
    pub fn pending(&self) -> usize {
        self.inner.state.lock().queue.len()
    }

    /// Whether a drain loop is currently active.
    pub fn is_draining(&self) -> bool {
        self.inner.state.lock().draining
    }

    /// Snapshot of the sequencer's counters.
    pub fn stats(&self) -> SequencerStats {
        self.inner.state.lock().stats
    }

    /// Queue `work` and return a handle to its outcome.
    ///
    /// Never blocks. The work is not invoked until its turn comes.
    pub fn submit<F, Fut, T, E>(&self, work: F) -> OutcomeHandle<T, E>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let (tx, rx) = oneshot::channel::<Settlement<T, E>>();
        let job: Job = Box::new(move || {
            async move {
                let settled = AssertUnwindSafe(async move { work().await })
                    .catch_unwind()
                    .await
                    .map_err(|payload| panic_message(payload.as_ref()));
                Box::new(move || {
                    // The submitter may have dropped its handle.
                    let _ = tx.send(settled);
                }) as Delivery
            }
            .boxed()
        });

        let (id, start_drain) = {
            let mut state = self.inner.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.stats.submitted += 1;
            state.queue.push_back(WorkItem { id, job });
            let start_drain = !state.draining;
            state.draining = true;
            (id, start_drain)
        };

        trace!(id, "work submitted");
        if start_drain {
            debug!("drain started");
            let guard = DrainGuard {
                inner: self.inner.clone(),
                armed: true,
            };
            self.inner.runtime.spawn(drain(guard));
        }

        OutcomeHandle::new(id, rx)
    }
}

/// Owned by a drain task. If the task is dropped before it finishes (its
/// runtime shut down), marks the sequencer idle and drops every queued
/// item so their handles settle as abandoned.
struct DrainGuard {
    inner: Arc<Inner>,
    armed: bool,
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let abandoned = {
            let mut state = self.inner.state.lock();
            state.draining = false;
            std::mem::take(&mut state.queue)
        };
        if !abandoned.is_empty() {
            warn!(count = abandoned.len(), "drain dropped, abandoning queued work");
        }
    }
}

/// Executes queued items until the queue is empty, then marks the
/// sequencer idle. Only one drain runs at a time.
///
/// The guard is an argument so it is owned by the future even if the
/// task is dropped before its first poll.
async fn drain(mut guard: DrainGuard) {
    let inner = guard.inner.clone();
    loop {
        let wait = {
            let mut state = inner.state.lock();
            if state.queue.is_empty() {
                state.draining = false;
                guard.armed = false;
                debug!("drain finished, sequencer idle");
                return;
            }
            state
                .last_start
                .map(|last| inner.min_interval.saturating_sub(last.elapsed()))
                .unwrap_or(Duration::ZERO)
        };

        if !wait.is_zero() {
            trace!(?wait, "waiting for rate slot");
            tokio::time::sleep(wait).await;
        }

        let item = {
            let mut state = inner.state.lock();
            let Some(item) = state.queue.pop_front() else {
                state.draining = false;
                guard.armed = false;
                return;
            };
            state.last_start = Some(Instant::now());
            state.stats.started += 1;
            item
        };

        trace!(id = item.id, "work started");
        let deliver = (item.job)().await;
        inner.state.lock().stats.settled += 1;
        deliver();
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
