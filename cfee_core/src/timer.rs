//! # Deferred Callbacks
//!
//! The reset controller needs two kinds of single-shot, cancellable
//! timers. It talks to them through the [`Scheduler`] trait so the host
//! decides where time comes from.
//!
//! [`TimerQueue`] is the implementation every host uses: a clock that only
//! moves when the host calls [`TimerQueue::advance_to`]. A terminal host
//! feeds it wall-clock time before each command, a GUI feeds it on a
//! periodic tick, and tests step it by hand.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use cfee_core::timer::{Scheduler, TimerKind, TimerQueue};
//!
//! let mut timers = TimerQueue::new();
//! let handle = timers.schedule(TimerKind::Arming, Duration::from_secs(5));
//!
//! assert!(timers.advance_to(Duration::from_secs(4)).is_empty());
//! assert_eq!(timers.advance_to(Duration::from_secs(5)), vec![handle]);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// The two timers owned by the reset controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Window in which a second reset request confirms the first
    Arming,
    /// How long the acknowledgement message stays up
    Announcement,
}

/// Identifies one scheduled timer. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
    kind: TimerKind,
}

impl TimerHandle {
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A source of single-shot, cancellable deferred callbacks.
///
/// Firing is reported back to whoever drives the scheduler, which hands
/// the handle to the owner of the timer.
pub trait Scheduler {
    /// Schedule a timer of `kind` to fire after `delay`.
    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle;

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled; cancelling is total, a cancelled timer never fires.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    deadline: Duration,
}

/// Timer queue driven by an externally advanced clock.
///
/// Times are offsets from the start of the session.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward and return every timer that came due, in
    /// deadline order. Moving backwards is ignored.
    pub fn advance_to(&mut self, now: Duration) -> Vec<TimerHandle> {
        if now > self.now {
            self.now = now;
        }

        let current = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|timer| timer.deadline <= current);
        self.pending = pending;

        due.sort_by_key(|timer| (timer.deadline, timer.handle.id));
        due.into_iter().map(|timer| timer.handle).collect()
    }

    /// Move the clock forward by `elapsed`.
    pub fn advance_by(&mut self, elapsed: Duration) -> Vec<TimerHandle> {
        let now = self.now + elapsed;
        self.advance_to(now)
    }

    /// Number of pending timers of `kind`
    pub fn live_count(&self, kind: TimerKind) -> usize {
        self.pending.iter().filter(|t| t.handle.kind == kind).count()
    }

    /// True when nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|t| t.deadline).min()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, kind: TimerKind, delay: Duration) -> TimerHandle {
        let handle = TimerHandle {
            id: self.next_id,
            kind,
        };
        self.next_id += 1;

        let deadline = self.now + delay;
        debug!(id = handle.id, ?kind, ?deadline, "timer scheduled");
        self.pending.push(PendingTimer { handle, deadline });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        let cancelled = self.pending.len() != before;
        if cancelled {
            debug!(id = handle.id, kind = ?handle.kind, "timer cancelled");
        }
        cancelled
    }
}
