//! Timer-gated call rate limiting.
//!
//! [`Throttle`] and [`Debounce`] wrap a callback and defer it through a
//! [`Scheduler`]. Both keep their state in a single [`TimerSlot`]: at most
//! one execution is pending per wrapper at any time.
//!
//! - **Throttle** (leading-edge gating): the first call with no pending
//!   timer opens a window and its arguments run after `delay`. Calls made
//!   while the window is open are dropped.
//! - **Debounce** (trailing-edge gating): every call replaces the pending
//!   execution, so only the last call of a burst runs, `wait` after it.

use crate::application::metrics::LimiterMetrics;
use crate::application::ports::{Scheduler, TimerHandle};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::trace;

/// Pending-timer state owned by one wrapper.
///
/// Each scheduled execution carries a ticket. An execution only counts as
/// current while the slot still holds its ticket, which lets a timer that
/// fires after being replaced or cancelled recognise itself as stale.
/// A throttle window stays occupied while its callback runs; once firing
/// has started it can no longer be cancelled.
#[derive(Debug, Default)]
pub struct TimerSlot {
    pending: Option<PendingTimer>,
    issued: u64,
}

#[derive(Debug)]
struct PendingTimer {
    ticket: u64,
    handle: TimerHandle,
    firing: bool,
}

impl TimerSlot {
    /// Whether an execution is pending.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn next_ticket(&mut self) -> u64 {
        self.issued = self.issued.wrapping_add(1);
        self.issued
    }

    fn occupy(&mut self, ticket: u64, handle: TimerHandle) {
        self.pending = Some(PendingTimer {
            ticket,
            handle,
            firing: false,
        });
    }

    /// Claim the execution for `ticket`. Fails if the ticket is stale or
    /// already firing.
    fn start_firing(&mut self, ticket: u64) -> bool {
        match &mut self.pending {
            Some(pending) if pending.ticket == ticket && !pending.firing => {
                pending.firing = true;
                true
            }
            _ => false,
        }
    }

    fn holds(&self, ticket: u64) -> bool {
        matches!(&self.pending, Some(pending) if pending.ticket == ticket)
    }

    /// Clear the slot if it still holds `ticket`.
    fn release(&mut self, ticket: u64) -> bool {
        if self.holds(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    fn vacate(&mut self) -> Option<TimerHandle> {
        self.pending.take().map(|pending| pending.handle)
    }

    /// Vacate the slot unless its execution has already started.
    fn vacate_unfired(&mut self) -> Option<TimerHandle> {
        match &self.pending {
            Some(pending) if !pending.firing => self.vacate(),
            _ => None,
        }
    }
}

type Callback<A> = Box<dyn Fn(A) + Send + Sync + 'static>;

struct Shared<A> {
    callback: Callback<A>,
    period: Duration,
    scheduler: Arc<dyn Scheduler>,
    slot: Mutex<TimerSlot>,
    metrics: LimiterMetrics,
}

impl<A> Shared<A> {
    fn new<F>(callback: F, period: Duration, scheduler: Arc<dyn Scheduler>) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
            period,
            scheduler,
            slot: Mutex::new(TimerSlot::default()),
            metrics: LimiterMetrics::new(),
        }
    }

    fn slot(&self) -> MutexGuard<'_, TimerSlot> {
        // The slot holds no invariants a panicking callback could break.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cancel(&self) -> bool {
        let Some(handle) = self.slot().vacate_unfired() else {
            return false;
        };
        handle.cancel();
        self.metrics.record_cancelled();
        true
    }
}

impl<A> fmt::Debug for Shared<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("period", &self.period)
            .field("scheduler", &self.scheduler)
            .field("slot", &self.slot)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

/// Clears a throttle window when the execution finishes, even by unwinding.
struct WindowGuard<'a, A> {
    shared: &'a Shared<A>,
    ticket: u64,
}

impl<A> Drop for WindowGuard<'_, A> {
    fn drop(&mut self) {
        self.shared.slot().release(self.ticket);
    }
}

/// Leading-edge throttled wrapper around a callback.
///
/// Clones share the same window.
///
/// # Example
/// ```
/// use base_common::{throttle, ManualScheduler};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let throttled = throttle(
///     move |n: u32| sink.lock().unwrap().push(n),
///     Duration::from_millis(100),
///     Arc::new(scheduler.clone()),
/// );
///
/// throttled.call(1);
/// throttled.call(2); // dropped, window already open
/// scheduler.advance(Duration::from_millis(100));
/// assert_eq!(*seen.lock().unwrap(), vec![1]);
/// ```
pub struct Throttle<A> {
    shared: Arc<Shared<A>>,
}

impl<A: Send + 'static> Throttle<A> {
    /// Wrap `callback` so it runs at most once per `delay` window.
    pub fn new<F>(callback: F, delay: Duration, scheduler: Arc<dyn Scheduler>) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared::new(callback, delay, scheduler)),
        }
    }

    /// Invoke the wrapper.
    ///
    /// Opens a window and schedules `args` if none is open; otherwise the
    /// call is dropped. Never blocks on the callback.
    pub fn call(&self, args: A) {
        let shared = &self.shared;
        shared.metrics.record_call();

        let mut slot = shared.slot();
        if slot.is_pending() {
            shared.metrics.record_dropped();
            trace!("throttle window open, dropping call");
            return;
        }

        let ticket = slot.next_ticket();
        let task_shared = Arc::clone(shared);
        let handle = shared.scheduler.schedule(
            shared.period,
            Box::new(move || {
                if !task_shared.slot().start_firing(ticket) {
                    trace!(ticket, "throttle window cancelled before firing");
                    return;
                }
                let _window = WindowGuard {
                    shared: &*task_shared,
                    ticket,
                };
                trace!(ticket, "throttle window firing");
                (task_shared.callback)(args);
                task_shared.metrics.record_execution();
            }),
        );
        slot.occupy(ticket, handle);
    }
}

impl<A> Throttle<A> {
    /// Close the current window without running it.
    ///
    /// Returns `true` if an execution was pending and had not started.
    /// Cancelling from inside the running callback returns `false`.
    pub fn cancel(&self) -> bool {
        self.shared.cancel()
    }

    /// Whether a window is open.
    pub fn is_pending(&self) -> bool {
        self.shared.slot().is_pending()
    }

    /// The window length.
    pub fn delay(&self) -> Duration {
        self.shared.period
    }

    /// Metrics for this wrapper.
    pub fn metrics(&self) -> &LimiterMetrics {
        &self.shared.metrics
    }
}

impl<A> Clone for Throttle<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A> fmt::Debug for Throttle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("shared", &self.shared)
            .finish()
    }
}

/// Trailing-edge debounced wrapper around a callback.
///
/// Clones share the same pending execution.
///
/// # Example
/// ```
/// use base_common::{debounce, ManualScheduler};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// let scheduler = ManualScheduler::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let debounced = debounce(
///     move |query: String| sink.lock().unwrap().push(query),
///     Duration::from_millis(300),
///     Arc::new(scheduler.clone()),
/// );
///
/// debounced.call("r".to_string());
/// debounced.call("ru".to_string());
/// debounced.call("rust".to_string());
/// scheduler.advance(Duration::from_millis(300));
/// assert_eq!(*seen.lock().unwrap(), vec!["rust".to_string()]);
/// ```
pub struct Debounce<A> {
    shared: Arc<Shared<A>>,
}

impl<A: Send + 'static> Debounce<A> {
    /// Wrap `callback` so it runs only after `wait` passes with no new call.
    pub fn new<F>(callback: F, wait: Duration, scheduler: Arc<dyn Scheduler>) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared::new(callback, wait, scheduler)),
        }
    }

    /// Invoke the wrapper.
    ///
    /// Cancels any pending execution and schedules `args` to run after
    /// `wait`. Never blocks on the callback.
    pub fn call(&self, args: A) {
        let shared = &self.shared;
        shared.metrics.record_call();

        let mut slot = shared.slot();
        if let Some(previous) = slot.vacate() {
            previous.cancel();
            shared.metrics.record_superseded();
            trace!("debounce superseding pending call");
        }

        let ticket = slot.next_ticket();
        let task_shared = Arc::clone(shared);
        let handle = shared.scheduler.schedule(
            shared.period,
            Box::new(move || {
                if !task_shared.slot().release(ticket) {
                    trace!(ticket, "stale debounce timer ignored");
                    return;
                }
                trace!(ticket, "debounce firing");
                (task_shared.callback)(args);
                task_shared.metrics.record_execution();
            }),
        );
        slot.occupy(ticket, handle);
    }
}

impl<A> Debounce<A> {
    /// Drop the pending execution, if any.
    ///
    /// Returns `true` if an execution was pending and had not started.
    pub fn cancel(&self) -> bool {
        self.shared.cancel()
    }

    /// Whether an execution is pending.
    pub fn is_pending(&self) -> bool {
        self.shared.slot().is_pending()
    }

    /// The quiet period.
    pub fn wait(&self) -> Duration {
        self.shared.period
    }

    /// Metrics for this wrapper.
    pub fn metrics(&self) -> &LimiterMetrics {
        &self.shared.metrics
    }
}

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<A> fmt::Debug for Debounce<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounce")
            .field("shared", &self.shared)
            .finish()
    }
}

/// Wrap `callback` with leading-edge throttling. See [`Throttle`].
pub fn throttle<A, F>(callback: F, delay: Duration, scheduler: Arc<dyn Scheduler>) -> Throttle<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Throttle::new(callback, delay, scheduler)
}

/// Wrap `callback` with trailing-edge debouncing. See [`Debounce`].
pub fn debounce<A, F>(callback: F, wait: Duration, scheduler: Arc<dyn Scheduler>) -> Debounce<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounce::new(callback, wait, scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scheduler::ManualScheduler;

    fn recorder<A: Send + 'static>() -> (Arc<Mutex<Vec<A>>>, impl Fn(A) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |args: A| sink.lock().unwrap().push(args))
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_throttle_runs_opening_call_after_delay() {
        let scheduler = ManualScheduler::new();
        let (seen, callback) = recorder::<u32>();
        let throttled = Throttle::new(callback, ms(100), Arc::new(scheduler.clone()));

        throttled.call(1);
        assert!(throttled.is_pending());
        scheduler.advance(ms(99));
        assert!(seen.lock().unwrap().is_empty());

        scheduler.advance(ms(1));
        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert!(!throttled.is_pending());
    }

    #[test]
    fn test_throttle_drops_calls_inside_window() {
        let scheduler = ManualScheduler::new();
        let (seen, callback) = recorder::<u32>();
        let throttled = Throttle::new(callback, ms(100), Arc::new(scheduler.clone()));

        for n in 0..10 {
            throttled.call(n);
            scheduler.advance(ms(10));
        }
        // Window 1 opened by call 0 fired at t=100; call 10 would open the next.
        assert_eq!(*seen.lock().unwrap(), vec![0]);

        let snapshot = throttled.metrics().snapshot();
        assert_eq!(snapshot.calls, 10);
        assert_eq!(snapshot.dropped, 9);
        assert_eq!(snapshot.executions, 1);
    }

    #[test]
    fn test_throttle_one_execution_per_window() {
        let scheduler = ManualScheduler::new();
        let (seen, callback) = recorder::<u32>();
        let throttled = Throttle::new(callback, ms(50), Arc::new(scheduler.clone()));

        // Calls every 20ms for 200ms
        for n in 0..10 {
            throttled.call(n);
            scheduler.advance(ms(20));
        }
        scheduler.advance(ms(50));

        // Windows open at t=0, 60, 120, 180
        assert_eq!(*seen.lock().unwrap(), vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_throttle_cancel_closes_window() {
        let scheduler = ManualScheduler::new();
        let (seen, callback) = recorder::<u32>();
        let throttled = Throttle::new(callback, ms(100), Arc::new(scheduler.clone()));

        throttled.call(1);
        assert!(throttled.cancel());
        assert!(!throttled.cancel());
        scheduler.advance(ms(100));
        assert!(seen.lock().unwrap().is_empty());

        throttled.call(2);
        scheduler.advance(ms(100));
        assert_eq!(*seen.lock().unwrap(), vec![2]);
        assert_eq!(throttled.metrics().cancelled(), 1);
    }

    #[test]
    fn test_throttle_clones_share_window() {
        let scheduler = ManualScheduler::new();
        let (seen, callback) = recorder::<&'static str>();
        let throttled = Throttle::new(callback, ms(10), Arc::new(scheduler.clone()));
        let clone = throttled.clone();

        throttled.call("first");
        clone.call("second");
        scheduler.advance(ms(10));
        assert_eq!(*seen.lock().unwrap(), vec!["first"]);
    }

    #[test]
    fn test_debounce_runs_last_call_only() {
        let scheduler = ManualScheduler::new();
        let (seen, callback) = recorder::<u32>();
        let debounced = Debounce::new(callback, ms(100), Arc::new(scheduler.clone()));

        for n in 0..5 {
            debounced.call(n);
            scheduler.advance(ms(30));
        }
        assert!(seen.lock().unwrap().is_empty());

        // Last call at t=120, quiet period ends at t=220
        scheduler.advance(ms(69));
        assert!(seen.lock().unwrap().is_empty());
        scheduler.advance(ms(1));
        assert_eq!(*seen.lock().unwrap(), vec![4]);

        let snapshot = debounced.metrics().snapshot();
        assert_eq!(snapshot.calls, 5);
        assert_eq!(snapshot.superseded, 4);
        assert_eq!(snapshot.executions, 1);
    }

    #[test]
    fn test_debounce_separate_bursts() {
        let scheduler = ManualScheduler::new();
        let (seen, callback) = recorder::<u32>();
        let debounced = Debounce::new(callback, ms(50), Arc::new(scheduler.clone()));

        debounced.call(1);
        debounced.call(2);
        scheduler.advance(ms(60));
        debounced.call(3);
        scheduler.advance(ms(60));

        assert_eq!(*seen.lock().unwrap(), vec![2, 3]);
        assert!(!debounced.is_pending());
    }

    #[test]
    fn test_debounce_cancel() {
        let scheduler = ManualScheduler::new();
        let (seen, callback) = recorder::<u32>();
        let debounced = Debounce::new(callback, ms(50), Arc::new(scheduler.clone()));

        debounced.call(1);
        assert!(debounced.cancel());
        scheduler.advance(ms(100));
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_stale_ticket_is_ignored() {
        let mut slot = TimerSlot::default();
        let first = slot.next_ticket();
        slot.occupy(first, TimerHandle::detached());
        let second = slot.next_ticket();
        slot.occupy(second, TimerHandle::detached());

        assert!(!slot.release(first));
        assert!(slot.is_pending());
        assert!(slot.release(second));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_firing_slot_cannot_be_claimed_or_vacated() {
        let mut slot = TimerSlot::default();
        let ticket = slot.next_ticket();
        slot.occupy(ticket, TimerHandle::detached());

        assert!(slot.start_firing(ticket));
        assert!(!slot.start_firing(ticket));
        assert!(slot.vacate_unfired().is_none());
        assert!(slot.is_pending());
        assert!(slot.release(ticket));
    }

    #[test]
    fn test_cancel_from_running_throttle_callback_is_refused() {
        let scheduler = ManualScheduler::new();
        let me: Arc<Mutex<Option<Throttle<u32>>>> = Arc::new(Mutex::new(None));
        let (seen, record) = recorder::<(u32, bool)>();

        let inner = Arc::clone(&me);
        let throttled = Throttle::new(
            move |n: u32| {
                let cancelled = inner
                    .lock()
                    .unwrap()
                    .as_ref()
                    .map(|throttle| throttle.cancel())
                    .unwrap_or(false);
                record((n, cancelled));
            },
            ms(10),
            Arc::new(scheduler.clone()),
        );
        *me.lock().unwrap() = Some(throttled.clone());

        throttled.call(1);
        scheduler.advance(ms(10));

        assert_eq!(*seen.lock().unwrap(), vec![(1, false)]);
        let snapshot = throttled.metrics().snapshot();
        assert_eq!(snapshot.executions, 1);
        assert_eq!(snapshot.cancelled, 0);
        assert!(!throttled.is_pending());

        // The window closed normally, so the next call opens a new one.
        throttled.call(2);
        assert!(throttled.cancel());
        assert_eq!(throttled.metrics().cancelled(), 1);

        me.lock().unwrap().take();
    }

    #[test]
    fn test_reentrant_call_from_callback_is_dropped() {
        let scheduler = ManualScheduler::new();
        let slot: Arc<Mutex<Option<Throttle<u32>>>> = Arc::new(Mutex::new(None));
        let count = Arc::new(Mutex::new(0));

        let inner_slot = Arc::clone(&slot);
        let inner_count = Arc::clone(&count);
        let throttled = Throttle::new(
            move |n: u32| {
                *inner_count.lock().unwrap() += 1;
                if let Some(me) = inner_slot.lock().unwrap().as_ref() {
                    me.call(n + 1);
                }
            },
            ms(10),
            Arc::new(scheduler.clone()),
        );
        *slot.lock().unwrap() = Some(throttled.clone());

        throttled.call(0);
        scheduler.advance(ms(100));
        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(throttled.metrics().dropped(), 1);

        slot.lock().unwrap().take();
    }
}
