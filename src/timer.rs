// SPDX-License-Identifier: MPL-2.0
//! Scheduled-callback service behind the queue's auto-dismiss and grace
//! timers.
//!
//! The queue never touches a host timer primitive directly; it goes through
//! the [`TimerService`] trait so a deterministic implementation can stand in
//! during tests. [`TickTimer`] is that implementation, and doubles as the
//! production driver for hosts that already have a frame or tick
//! subscription: map each tick to [`TickTimer::advance`] and the queue's
//! timers fire at the right virtual instants.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Opaque handle to a pending timer, returned by [`TimerService::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Schedules and cancels delayed callbacks.
///
/// A zero delay means "never auto-fire": callers check for it and skip
/// `schedule` entirely, so implementations may treat a zero delay as a
/// caller bug. A fired callback runs exactly once; there is no retry.
pub trait TimerService {
    /// Schedules `callback` to run once `delay` has elapsed.
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle;

    /// Cancels a pending timer.
    ///
    /// Idempotent: canceling an already-fired or already-canceled handle is
    /// a no-op, never an error.
    fn cancel(&self, handle: TimerHandle);
}

struct Entry {
    handle: TimerHandle,
    deadline: Duration,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TickInner {
    now: Duration,
    next_handle: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

/// Deterministic [`TimerService`] driven by an explicit virtual clock.
///
/// Entries fire in deadline order (ties resolved by schedule order) as the
/// clock is advanced. No callback runs while the service's internal state is
/// borrowed, so callbacks are free to re-enter `schedule` and `cancel` —
/// including canceling another entry that is due in the same advance, which
/// then never fires.
///
/// Clones share the same clock and pending set.
#[derive(Clone, Default)]
pub struct TickTimer {
    inner: Rc<RefCell<TickInner>>,
}

impl TickTimer {
    /// Creates a timer with the clock at zero and nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Returns the number of timers that have been scheduled but neither
    /// fired nor canceled. Leak checks assert this reaches zero.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Moves the virtual clock forward by `delta`, firing every due callback
    /// in deadline order.
    ///
    /// A callback that schedules a new timer whose deadline still falls
    /// within this advance will see that timer fire before `advance`
    /// returns. The clock reads as each entry's own deadline while its
    /// callback runs.
    pub fn advance(&self, delta: Duration) {
        let target = self.inner.borrow().now + delta;
        loop {
            let due = {
                let mut inner = self.inner.borrow_mut();
                let next = inner
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.deadline <= target)
                    .min_by_key(|(_, entry)| (entry.deadline, entry.seq))
                    .map(|(index, _)| index);
                match next {
                    Some(index) => {
                        let entry = inner.entries.swap_remove(index);
                        if entry.deadline > inner.now {
                            inner.now = entry.deadline;
                        }
                        Some(entry.callback)
                    }
                    None => {
                        inner.now = target;
                        None
                    }
                }
            };
            match due {
                Some(callback) => callback(),
                None => break,
            }
        }
    }
}

impl TimerService for TickTimer {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerHandle {
        debug_assert!(
            !delay.is_zero(),
            "a zero delay means \"never auto-fire\"; callers must not schedule it"
        );
        let mut inner = self.inner.borrow_mut();
        let handle = TimerHandle(inner.next_handle);
        inner.next_handle += 1;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let deadline = inner.now + delay;
        inner.entries.push(Entry {
            handle,
            deadline,
            seq,
            callback,
        });
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        self.inner
            .borrow_mut()
            .entries
            .retain(|entry| entry.handle != handle);
    }
}
