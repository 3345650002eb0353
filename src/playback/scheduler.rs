use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Identity of one scheduled tick.
///
/// A tick is live only while both fields match the controller's pending tick;
/// anything else is stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickToken {
    pub generation: u64,
    pub sequence: u64,
}

/// Scheduler-side handle used to cancel a pending tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickHandle(pub u64);

/// Timer capability injected into the chart.
///
/// When a scheduled delay elapses the host calls `RaceChart::on_tick` with
/// the token it was handed. Real timers, frame callbacks and the
/// deterministic [`ManualScheduler`] all fit behind this trait.
pub trait Scheduler {
    fn schedule(&mut self, token: TickToken, delay_ms: u64) -> TickHandle;
    fn cancel(&mut self, handle: TickHandle);
}

/// Monotonic millisecond clock driving playback progress.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTick {
    due_ms: u64,
    handle: TickHandle,
    token: TickToken,
}

#[derive(Debug, Default)]
struct ManualSchedulerState {
    now_ms: u64,
    next_handle: u64,
    pending: Vec<PendingTick>,
    cancelled_count: u64,
}

/// Deterministic scheduler and clock sharing one virtual timeline.
///
/// Clones share state, so a test keeps one clone and hands others to the
/// chart. Time only moves through [`ManualScheduler::pop_due`] and
/// [`ManualScheduler::advance_to`].
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualSchedulerState>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now(&self) -> u64 {
        self.state.borrow().now_ms
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    #[must_use]
    pub fn cancelled_count(&self) -> u64 {
        self.state.borrow().cancelled_count
    }

    #[must_use]
    pub fn next_due_ms(&self) -> Option<u64> {
        self.state
            .borrow()
            .pending
            .iter()
            .map(|tick| tick.due_ms)
            .min()
    }

    /// Removes the earliest tick due at or before `until_ms` and moves the
    /// clock to its due time. Ties resolve in scheduling order.
    pub fn pop_due(&self, until_ms: u64) -> Option<TickToken> {
        let mut state = self.state.borrow_mut();
        let position = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, tick)| tick.due_ms <= until_ms)
            .min_by_key(|(_, tick)| (tick.due_ms, tick.handle.0))
            .map(|(position, _)| position)?;
        let tick = state.pending.remove(position);
        state.now_ms = state.now_ms.max(tick.due_ms);
        Some(tick.token)
    }

    /// Moves the clock forward without firing anything.
    pub fn advance_to(&self, now_ms: u64) {
        let mut state = self.state.borrow_mut();
        state.now_ms = state.now_ms.max(now_ms);
    }

    /// Every pending token, earliest first, without removing them.
    #[must_use]
    pub fn pending_tokens(&self) -> Vec<TickToken> {
        let state = self.state.borrow();
        let mut pending = state.pending.clone();
        pending.sort_by_key(|tick| (tick.due_ms, tick.handle.0));
        pending.into_iter().map(|tick| tick.token).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, token: TickToken, delay_ms: u64) -> TickHandle {
        let mut state = self.state.borrow_mut();
        state.next_handle += 1;
        let handle = TickHandle(state.next_handle);
        let due_ms = state.now_ms.saturating_add(delay_ms);
        state.pending.push(PendingTick {
            due_ms,
            handle,
            token,
        });
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        let mut state = self.state.borrow_mut();
        let before = state.pending.len();
        state.pending.retain(|tick| tick.handle != handle);
        if state.pending.len() != before {
            state.cancelled_count += 1;
        }
    }
}

impl Clock for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms as f64
    }
}
