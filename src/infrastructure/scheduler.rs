//! Scheduler adapters for deferred execution.
//!
//! - `ManualScheduler` keeps its own virtual time and runs due tasks when
//!   the host advances it (a frame loop, a test, a simulation step).
//! - `TokioScheduler` (feature `async`) spawns a sleeping task per timer
//!   on a tokio runtime.

use crate::application::ports::{Scheduler, Task, TimerHandle};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

/// Error returned when a scheduler cannot be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// No tokio runtime is running on the current thread
    NoRuntime,
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::NoRuntime => {
                write!(f, "no tokio runtime is available on this thread")
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

/// Timers ordered by due time, then by scheduling order.
type TimerKey = (Duration, u64);

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    queue: BTreeMap<TimerKey, Task>,
}

impl fmt::Debug for ManualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualState")
            .field("now", &self.now)
            .field("pending", &self.queue.len())
            .finish()
    }
}

/// Scheduler driven by explicit calls to [`ManualScheduler::advance`].
///
/// Tasks due at the same instant run in the order they were scheduled.
/// Clones share the same timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ManualState>>,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ManualState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Move virtual time forward by `duration`, running every task that
    /// falls due, including tasks scheduled by tasks run along the way.
    ///
    /// Returns the number of tasks run.
    pub fn advance(&self, duration: Duration) -> usize {
        let target = self.state().now.saturating_add(duration);
        let mut ran = 0;

        loop {
            let due = {
                let mut state = self.state();
                match state.queue.keys().next().copied() {
                    Some(key) if key.0 <= target => {
                        state.now = state.now.max(key.0);
                        state.queue.remove(&key)
                    }
                    _ => None,
                }
            };
            // Run outside the lock so the task may schedule or cancel.
            match due {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }

        self.state().now = target;
        ran
    }

    /// Virtual time elapsed since creation.
    pub fn elapsed(&self) -> Duration {
        self.state().now
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.state().queue.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let key = {
            let mut state = self.state();
            let key = (state.now.saturating_add(delay), state.next_id);
            state.next_id += 1;
            state.queue.insert(key, task);
            key
        };

        let state: Weak<Mutex<ManualState>> = Arc::downgrade(&self.state);
        TimerHandle::new(move || {
            if let Some(state) = state.upgrade() {
                state
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .queue
                    .remove(&key);
            }
        })
    }
}

/// Scheduler backed by a tokio runtime.
///
/// Each timer is a spawned task that sleeps for the delay and then runs
/// the work; cancelling aborts the spawned task.
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "async")]
impl TokioScheduler {
    /// Use the runtime the caller is running on.
    ///
    /// # Errors
    /// Returns `SchedulerError::NoRuntime` outside a tokio runtime.
    pub fn current() -> Result<Self, SchedulerError> {
        tokio::runtime::Handle::try_current()
            .map(Self::from_handle)
            .map_err(|_| SchedulerError::NoRuntime)
    }

    /// Use a specific runtime.
    pub fn from_handle(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

#[cfg(feature = "async")]
impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        TimerHandle::new(move || join.abort())
    }
}
