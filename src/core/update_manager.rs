//! Update scheduler: fetch, render, rearm

use super::display::{DisplaySurface, DisplayUpdate};
use super::source_selection::error_title;
use super::timer::{TimerHandle, TimerHost};
use cost_widget_core::{BoxedCostSource, SourceError};
use log::{debug, error, trace};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Scheduler lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    /// Not started, or stopped
    Idle,
    /// A refresh is running inside a timer callback (or inside `start`)
    Cycling,
    /// Exactly one timer is pending for the next refresh
    Armed(TimerHandle),
}

/// Counters for diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulerStats {
    /// Refresh cycles run, successful or not
    pub cycles: u64,
    /// Cycles whose fetch failed
    pub failures: u64,
    /// Error from the most recent cycle, cleared by a successful one
    pub last_error: Option<SourceError>,
}

struct SchedulerInner {
    source: BoxedCostSource,
    display: Rc<RefCell<dyn DisplaySurface>>,
    timer: Rc<dyn TimerHost>,
    interval: Duration,
    budget: f64,
    state: ScheduleState,
    /// Set while `run_cycle` is on the stack
    in_cycle: bool,
    stats: SchedulerStats,
}

/// Drives periodic refreshes on a single thread
///
/// Each cycle fetches from the cost source and, on success, renders the
/// result. Whatever the outcome, the next cycle is scheduled `interval`
/// later, so a failed fetch never halts updates. At most one timer is
/// outstanding at any time.
///
/// The display may call `stop` from inside `render`; the cycle then ends
/// without rearming. A `start` from inside `render` never nests a second
/// cycle, it only lets the running one rearm.
///
/// Persistent errors (see `SourceError::is_persistent`) are passed to
/// `notify_error` once; repeats of the same error are only logged.
pub struct UpdateScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl UpdateScheduler {
    pub fn new(
        source: BoxedCostSource,
        display: Rc<RefCell<dyn DisplaySurface>>,
        timer: Rc<dyn TimerHost>,
        interval: Duration,
        budget: f64,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                source,
                display,
                timer,
                interval,
                budget,
                state: ScheduleState::Idle,
                in_cycle: false,
                stats: SchedulerStats::default(),
            })),
        }
    }

    /// Refresh now and keep refreshing every interval
    ///
    /// Does nothing if the scheduler is already running.
    pub fn start(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.in_cycle {
                // The running cycle rearms on its way out
                if inner.state == ScheduleState::Idle {
                    inner.state = ScheduleState::Cycling;
                    debug!("Scheduler restarted during a refresh");
                }
                return;
            }
            if inner.state != ScheduleState::Idle {
                debug!("Scheduler already running, ignoring start");
                return;
            }
        }
        Self::run_cycle(&self.inner);
    }

    /// Cancel the pending refresh
    ///
    /// Safe to call at any time, including when already stopped.
    pub fn stop(&self) {
        let mut inner = self.inner.borrow_mut();
        match std::mem::replace(&mut inner.state, ScheduleState::Idle) {
            ScheduleState::Armed(handle) => {
                inner.timer.cancel(handle);
                debug!("Scheduler stopped");
            }
            ScheduleState::Cycling => debug!("Scheduler stopped during a refresh"),
            ScheduleState::Idle => {}
        }
    }

    pub fn state(&self) -> ScheduleState {
        self.inner.borrow().state
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state(), ScheduleState::Armed(_))
    }

    pub fn interval(&self) -> Duration {
        self.inner.borrow().interval
    }

    pub fn stats(&self) -> SchedulerStats {
        self.inner.borrow().stats.clone()
    }

    fn run_cycle(inner: &Rc<RefCell<SchedulerInner>>) {
        let start = Instant::now();

        let (outcome, display, budget) = {
            let mut guard = inner.borrow_mut();
            guard.state = ScheduleState::Cycling;
            guard.in_cycle = true;
            guard.stats.cycles += 1;
            let outcome = guard.source.fetch();
            (outcome, Rc::clone(&guard.display), guard.budget)
        };

        match outcome {
            Ok(data) => {
                let update = DisplayUpdate::from_cost_data(&data, budget);
                // Inner is not borrowed here, so render may call stop()
                display.borrow_mut().render(&update);
                inner.borrow_mut().stats.last_error = None;
            }
            Err(e) => Self::report_failure(inner, &display, e),
        }

        trace!("Refresh cycle took {:?}", start.elapsed());
        inner.borrow_mut().in_cycle = false;
        Self::rearm(inner);
    }

    fn report_failure(
        inner: &Rc<RefCell<SchedulerInner>>,
        display: &Rc<RefCell<dyn DisplaySurface>>,
        err: SourceError,
    ) {
        let repeated = {
            let mut guard = inner.borrow_mut();
            guard.stats.failures += 1;
            let repeated = err.is_persistent() && guard.stats.last_error.as_ref() == Some(&err);
            guard.stats.last_error = Some(err.clone());
            repeated
        };

        if repeated {
            debug!("Cost source still failing: {}", err);
            return;
        }
        error!("Error fetching cost data: {}", err);
        if err.is_persistent() {
            display
                .borrow_mut()
                .notify_error(error_title(&err), &err.to_string());
        }
    }

    /// Schedule the next cycle, replacing any pending timer
    fn rearm(inner: &Rc<RefCell<SchedulerInner>>) {
        let mut guard = inner.borrow_mut();
        let previous = match guard.state {
            // Stopped while the cycle ran
            ScheduleState::Idle => return,
            ScheduleState::Cycling => None,
            ScheduleState::Armed(handle) => Some(handle),
        };
        if let Some(handle) = previous {
            guard.timer.cancel(handle);
        }

        let weak: Weak<RefCell<SchedulerInner>> = Rc::downgrade(inner);
        let handle = guard.timer.schedule(
            guard.interval,
            Box::new(move || {
                // The scheduler may have been dropped since
                if let Some(inner) = weak.upgrade() {
                    UpdateScheduler::run_cycle(&inner);
                }
            }),
        );
        guard.state = ScheduleState::Armed(handle);
        trace!("Next refresh in {:?}", guard.interval);
    }
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            if let ScheduleState::Armed(handle) = inner.state {
                inner.timer.cancel(handle);
                inner.state = ScheduleState::Idle;
            }
        }
    }
}
