//! Ports (interfaces) for the application layer.
//!
//! Ambient state (wall-clock time, deferred execution, the host page's
//! user agent and address) is reached only through these traits.
//! Infrastructure adapters implement them.

use chrono::{DateTime, Utc};
use std::fmt::{self, Debug};
use std::time::Duration;

/// Port for obtaining the current wall-clock time.
///
/// Infrastructure provides `SystemClock` and `FixedClock`.
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Work deferred by a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Port for deferred execution.
///
/// A scheduler runs a task once after a delay. It must never run the task
/// synchronously inside `schedule`: callers may hold locks while scheduling.
pub trait Scheduler: Send + Sync + Debug {
    /// Run `task` once, no earlier than `delay` from now.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

/// Handle to a scheduled task.
///
/// Dropping the handle does not cancel the task; call [`TimerHandle::cancel`].
pub struct TimerHandle {
    canceller: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TimerHandle {
    /// Create a handle that runs `cancel` when the timer is cancelled.
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            canceller: Some(Box::new(cancel)),
        }
    }

    /// A handle for a timer that cannot be cancelled.
    pub fn detached() -> Self {
        Self { canceller: None }
    }

    /// Cancel the timer. Has no effect once the task has started running.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.canceller.take() {
            cancel();
        }
    }
}

impl Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancellable", &self.canceller.is_some())
            .finish()
    }
}

/// Port for the host environment a browser helper would read globally.
pub trait Environment: Send + Sync + Debug {
    /// The user-agent string of the host.
    fn user_agent(&self) -> String;

    /// The full current address, including any query string.
    fn location(&self) -> String;
}
