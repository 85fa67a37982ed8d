//! One-shot timers for the refresh loop
//!
//! The scheduler only needs "call this back after N seconds, and let me
//! cancel it before it fires". `TimerHost` is that capability; the runtime
//! hosting the loop supplies it. Everything here is single-threaded.

use log::trace;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Identifies a scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Callback run when a timer fires
pub type TimerCallback = Box<dyn FnOnce()>;

/// Schedules one-shot callbacks on the thread that owns the event loop
pub trait TimerHost {
    /// Run `callback` once after `delay`
    ///
    /// Implementations never invoke the callback from inside this call.
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancel a timer that has not fired yet
    ///
    /// Cancelling a timer that already fired or was already cancelled is a
    /// no-op.
    fn cancel(&self, handle: TimerHandle);
}

/// Timer host backed by tokio tasks on a `LocalSet`
///
/// Must be used from inside a `tokio::task::LocalSet` on a current-thread
/// runtime, since callbacks are spawned with `spawn_local`.
pub struct TokioTimerHost {
    next_id: Cell<u64>,
    tasks: Rc<RefCell<HashMap<TimerHandle, JoinHandle<()>>>>,
}

impl TokioTimerHost {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            tasks: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Number of timers that have neither fired nor been cancelled
    pub fn pending_count(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl Default for TokioTimerHost {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerHost for TokioTimerHost {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle(self.next_id.get());
        self.next_id.set(handle.0 + 1);

        let tasks = Rc::clone(&self.tasks);
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            tasks.borrow_mut().remove(&handle);
            callback();
        });
        self.tasks.borrow_mut().insert(handle, task);
        trace!("Scheduled timer {} in {:?}", handle.0, delay);
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        if let Some(task) = self.tasks.borrow_mut().remove(&handle) {
            task.abort();
            trace!("Cancelled timer {}", handle.0);
        }
    }
}

struct PendingTimer {
    handle: TimerHandle,
    due: Duration,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

/// Timer host driven by an explicit virtual clock
///
/// Nothing fires until `advance` is called; due timers then fire in due
/// order (ties in scheduling order). Useful for deterministic drivers and
/// tests.
#[derive(Default)]
pub struct ManualTimerHost {
    state: RefCell<ManualState>,
}

impl ManualTimerHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// When the earliest pending timer is due
    pub fn next_due(&self) -> Option<Duration> {
        self.state.borrow().pending.iter().map(|t| t.due).min()
    }

    /// Move the clock forward, firing every timer that falls due
    ///
    /// Timers scheduled by a callback fire in the same call if they are
    /// due before the new time. Returns how many callbacks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.borrow().now + by;
        let mut fired = 0;

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let earliest = state
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.handle.0))
                    .map(|(i, _)| i);
                earliest.map(|i| {
                    let timer = state.pending.remove(i);
                    state.now = timer.due;
                    timer.callback
                })
            };

            // The state borrow is released so the callback may schedule again
            match next {
                Some(callback) => {
                    callback();
                    fired += 1;
                }
                None => break,
            }
        }

        self.state.borrow_mut().now = target;
        fired
    }
}

impl TimerHost for ManualTimerHost {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut state = self.state.borrow_mut();
        let handle = TimerHandle(state.next_id);
        state.next_id += 1;
        let due = state.now + delay;
        state.pending.push(PendingTimer {
            handle,
            due,
            callback,
        });
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        self.state.borrow_mut().pending.retain(|t| t.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> TimerCallback) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_for_make = Rc::clone(&log);
        let make = move |label: &'static str| -> TimerCallback {
            let log = Rc::clone(&log_for_make);
            Box::new(move || log.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_manual_fires_in_due_order() {
        let host = ManualTimerHost::new();
        let (log, make) = recorder();
        host.schedule(Duration::from_secs(20), make("late"));
        host.schedule(Duration::from_secs(5), make("early"));
        host.schedule(Duration::from_secs(5), make("early-second"));

        assert_eq!(host.advance(Duration::from_secs(4)), 0);
        assert_eq!(host.advance(Duration::from_secs(1)), 2);
        assert_eq!(*log.borrow(), ["early", "early-second"]);
        assert_eq!(host.next_due(), Some(Duration::from_secs(20)));

        host.advance(Duration::from_secs(30));
        assert_eq!(*log.borrow(), ["early", "early-second", "late"]);
        assert_eq!(host.now(), Duration::from_secs(35));
    }

    #[test]
    fn test_manual_cancel() {
        let host = ManualTimerHost::new();
        let (log, make) = recorder();
        let handle = host.schedule(Duration::from_secs(1), make("cancelled"));
        host.cancel(handle);
        host.cancel(handle);

        assert_eq!(host.pending_count(), 0);
        assert_eq!(host.advance(Duration::from_secs(10)), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_manual_callback_can_reschedule() {
        let host = Rc::new(ManualTimerHost::new());
        let count = Rc::new(Cell::new(0));

        fn tick(host: Rc<ManualTimerHost>, count: Rc<Cell<u32>>) {
            count.set(count.get() + 1);
            let next_host = Rc::clone(&host);
            host.schedule(
                Duration::from_secs(10),
                Box::new(move || tick(next_host, count)),
            );
        }

        tick(Rc::clone(&host), Rc::clone(&count));
        host.advance(Duration::from_secs(35));
        assert_eq!(count.get(), 4);
        assert_eq!(host.pending_count(), 1);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_tokio_host_fires_and_cancels() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let host = TokioTimerHost::new();
                let (log, make) = recorder();
                host.schedule(Duration::from_secs(5), make("fired"));
                let cancelled = host.schedule(Duration::from_secs(5), make("cancelled"));
                host.cancel(cancelled);
                assert_eq!(host.pending_count(), 1);

                tokio::time::sleep(Duration::from_secs(6)).await;
                assert_eq!(*log.borrow(), ["fired"]);
                assert_eq!(host.pending_count(), 0);
            })
            .await;
    }
}
