// SPDX-License-Identifier: MPL-2.0
//! Toast queue: the ordered collection, the visible bound, and the
//! effectful side of the lifecycle state machine.
//!
//! The queue owns every live [`ToastRecord`], drives phase transitions
//! through the guards in [`crate::lifecycle`], and talks to the outside
//! world only through the presenter and timer ports. It is a cheaply
//! cloneable handle over shared state; timer callbacks capture a clone and
//! re-enter it when they fire.
//!
//! Insertion order of the collection is the single source of truth for
//! "oldest" and "most recent". Eviction and keyboard dismissal both resolve
//! against it, never against remaining duration or kind.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::facade::Completion;
use crate::lifecycle::Phase;
use crate::notification::{ToastId, ToastKind, ToastRecord};
use crate::policy::{HIDE_GRACE, MAX_VISIBLE};
use crate::presenter::Presenter;
use crate::timer::TimerService;

struct Entry<S> {
    record: ToastRecord,
    surface: S,
    waiters: Vec<Completion>,
}

struct Inner<S> {
    entries: Vec<Entry<S>>,
    next_id: u64,
    keyboard_generation: u64,
}

impl<S> Inner<S> {
    fn position(&self, id: ToastId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.record.id() == id)
    }

    fn entry_mut(&mut self, id: ToastId) -> Option<&mut Entry<S>> {
        self.entries
            .iter_mut()
            .find(|entry| entry.record.id() == id)
    }
}

/// Ordered, bounded collection of live toasts.
///
/// Constructed from a presenter and a timer service; there is no ambient
/// global state, so independent queues (one per test, one per application)
/// are fully isolated.
pub struct ToastQueue<P: Presenter, T: TimerService> {
    inner: Rc<RefCell<Inner<P::Surface>>>,
    presenter: Rc<P>,
    timer: Rc<T>,
    // Identity token for telling this queue's handles apart from another
    // queue's; ids alone collide across instances.
    identity: Rc<()>,
}

impl<P: Presenter, T: TimerService> Clone for ToastQueue<P, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            presenter: Rc::clone(&self.presenter),
            timer: Rc::clone(&self.timer),
            identity: Rc::clone(&self.identity),
        }
    }
}

impl<P, T> ToastQueue<P, T>
where
    P: Presenter + 'static,
    T: TimerService + 'static,
{
    /// Creates an empty queue over the given ports.
    pub fn new(presenter: P, timer: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                entries: Vec::new(),
                next_id: 0,
                keyboard_generation: 0,
            })),
            presenter: Rc::new(presenter),
            timer: Rc::new(timer),
            identity: Rc::new(()),
        }
    }

    pub(crate) fn identity(&self) -> Rc<()> {
        Rc::clone(&self.identity)
    }

    /// Creates a toast, mounts it, and enforces the visible bound.
    ///
    /// Fails with [`Error::InvalidMessage`] for an empty message and
    /// propagates mount failures; in both cases the queue is left exactly
    /// as it was. A nonzero `duration` schedules the auto-dismiss timer; a
    /// zero duration means the toast stays until dismissed by hand.
    ///
    /// If the queue already holds `MAX_VISIBLE` visible toasts, the oldest
    /// visible one is removed immediately — the newest request always wins
    /// a slot, so by the time `add` returns the bound holds again.
    pub fn add(&self, message: &str, kind: ToastKind, duration: Duration) -> Result<ToastId> {
        self.insert(message, kind, duration).map(|(id, _)| id)
    }

    /// `add`, but also returns the mounted surface for the facade to hand
    /// out.
    pub(crate) fn insert(
        &self,
        message: &str,
        kind: ToastKind,
        duration: Duration,
    ) -> Result<(ToastId, P::Surface)> {
        if message.is_empty() {
            return Err(Error::InvalidMessage);
        }

        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = ToastId(inner.next_id);
            inner.next_id += 1;
            id
        };

        let record = ToastRecord::new(id, message.to_owned(), kind);
        let surface = match self.presenter.mount(&record) {
            Ok(surface) => surface,
            Err(err) => {
                log::warn!("toast {id}: mount failed: {err}");
                return Err(err);
            }
        };

        self.inner.borrow_mut().entries.push(Entry {
            record,
            surface: surface.clone(),
            waiters: Vec::new(),
        });
        log::debug!("toast {id}: shown ({})", kind.as_str());

        if !duration.is_zero() {
            let queue = self.clone();
            let handle = self
                .timer
                .schedule(duration, Box::new(move || queue.hide(id, false)));
            let mut stale = Some(handle);
            {
                let mut inner = self.inner.borrow_mut();
                if let Some(entry) = inner.entry_mut(id) {
                    entry.record.timer = Some(handle);
                    stale = None;
                }
            }
            // The presenter re-entered and removed the toast during mount
            // wiring; the timer must not outlive the record.
            if let Some(handle) = stale {
                self.timer.cancel(handle);
            }
        }

        self.enforce_bound();
        Ok((id, surface))
    }

    /// Hides a toast.
    ///
    /// No-op for unknown ids and for toasts that are no longer visible, so
    /// every dismiss source can call this without coordinating with the
    /// others. With `immediate` set, the grace window is skipped and the
    /// toast is unmounted before the call returns.
    pub fn hide(&self, id: ToastId, immediate: bool) {
        let (handle, surface) = {
            let mut inner = self.inner.borrow_mut();
            let Some(entry) = inner.entry_mut(id) else {
                return;
            };
            let Some(next) = entry.record.phase().begin_hide() else {
                return;
            };
            entry.record.phase = next;
            (entry.record.timer.take(), entry.surface.clone())
        };

        if let Some(handle) = handle {
            self.timer.cancel(handle);
        }
        self.presenter.mark_hiding(&surface);
        log::debug!("toast {id}: hiding");

        if immediate {
            self.finish(id);
        } else {
            let queue = self.clone();
            let grace = self
                .timer
                .schedule(HIDE_GRACE, Box::new(move || queue.finish(id)));
            let mut stale = Some(grace);
            {
                let mut inner = self.inner.borrow_mut();
                if let Some(entry) = inner.entry_mut(id) {
                    if entry.record.phase() == Phase::Hiding {
                        entry.record.timer = Some(grace);
                        stale = None;
                    }
                }
            }
            // The presenter re-entered during mark_hiding and the toast is
            // already gone; drop the orphaned grace timer.
            if let Some(grace) = stale {
                self.timer.cancel(grace);
            }
        }
    }

    /// Hides the most recently added visible toast, or no-ops if none exist.
    pub fn hide_most_recent(&self) {
        let newest = {
            let inner = self.inner.borrow();
            inner
                .entries
                .iter()
                .rev()
                .find(|entry| entry.record.phase().is_visible())
                .map(|entry| entry.record.id())
        };
        if let Some(id) = newest {
            self.hide(id, false);
        }
    }

    /// Removes every tracked toast, whatever its phase, before returning.
    /// All pending timers are canceled.
    pub fn clear_all(&self) {
        loop {
            let front = {
                let inner = self.inner.borrow();
                inner
                    .entries
                    .first()
                    .map(|entry| (entry.record.id(), entry.record.phase()))
            };
            let Some((id, phase)) = front else {
                break;
            };
            match phase {
                Phase::Visible => self.hide(id, true),
                Phase::Hiding => self.finish(id),
                // Entries leave the collection the moment they are removed,
                // so a Removed phase can only mean corruption; drop it.
                Phase::Removed => {
                    let mut inner = self.inner.borrow_mut();
                    if let Some(index) = inner.position(id) {
                        inner.entries.remove(index);
                    }
                }
            }
        }
        log::debug!("toast queue cleared");
    }

    /// Number of visible toasts. Toasts in the hiding phase awaiting
    /// unmount are not counted.
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.record.phase().is_visible())
            .count()
    }

    /// Ids of the visible toasts, oldest first.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<ToastId> {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.record.phase().is_visible())
            .map(|entry| entry.record.id())
            .collect()
    }

    /// Messages of the visible toasts, oldest first.
    #[must_use]
    pub fn visible_messages(&self) -> Vec<String> {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.record.phase().is_visible())
            .map(|entry| entry.record.message().to_owned())
            .collect()
    }

    /// Returns a completion that resolves when the toast reaches removal.
    /// Already-removed and unknown ids yield an already-resolved completion.
    #[must_use]
    pub fn watch_removal(&self, id: ToastId) -> Completion {
        let mut inner = self.inner.borrow_mut();
        match inner.entry_mut(id) {
            Some(entry) => {
                let completion = Completion::pending();
                entry.waiters.push(completion.clone());
                completion
            }
            None => Completion::resolved(),
        }
    }

    pub(crate) fn next_keyboard_generation(&self) -> u64 {
        let mut inner = self.inner.borrow_mut();
        inner.keyboard_generation += 1;
        inner.keyboard_generation
    }

    pub(crate) fn keyboard_generation(&self) -> u64 {
        self.inner.borrow().keyboard_generation
    }

    /// Drives `Hiding → Removed`: drops the entry, unmounts its surface,
    /// and resolves its waiters. No-op unless the toast is mid-hide.
    fn finish(&self, id: ToastId) {
        let removed = {
            let mut inner = self.inner.borrow_mut();
            let Some(index) = inner.position(id) else {
                return;
            };
            let Some(next) = inner.entries[index].record.phase().finish() else {
                return;
            };
            inner.entries[index].record.phase = next;
            inner.entries.remove(index)
        };

        // The grace timer may still be pending when removal is forced by
        // clear_all; canceling a handle that just fired is a no-op.
        if let Some(handle) = removed.record.timer {
            self.timer.cancel(handle);
        }
        self.presenter.unmount(&removed.surface);
        for waiter in removed.waiters {
            waiter.resolve();
        }
        log::debug!("toast {id}: removed");
    }

    /// Evicts oldest visible toasts until the bound holds. `add` is the
    /// only growth operation, so this can only ever be off by one, but the
    /// loop does not rely on that.
    fn enforce_bound(&self) {
        loop {
            let oldest_over = {
                let inner = self.inner.borrow();
                let visible: Vec<ToastId> = inner
                    .entries
                    .iter()
                    .filter(|entry| entry.record.phase().is_visible())
                    .map(|entry| entry.record.id())
                    .collect();
                if visible.len() > MAX_VISIBLE {
                    Some(visible[0])
                } else {
                    None
                }
            };
            match oldest_over {
                Some(id) => {
                    log::debug!("toast {id}: evicted to stay within the visible bound");
                    self.hide(id, true);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{PortEvent, RecordingPresenter};
    use crate::timer::TickTimer;

    fn queue() -> (ToastQueue<RecordingPresenter, TickTimer>, RecordingPresenter, TickTimer) {
        let presenter = RecordingPresenter::new();
        let timer = TickTimer::new();
        let queue = ToastQueue::new(presenter.clone(), timer.clone());
        (queue, presenter, timer)
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn add_within_bound_keeps_all_visible() {
        let (queue, _, _) = queue();
        for message in ["a", "b", "c"] {
            queue.add(message, ToastKind::Info, Duration::ZERO).unwrap();
        }
        assert_eq!(queue.count(), 3);
    }

    #[test]
    fn count_never_exceeds_the_bound() {
        let (queue, _, _) = queue();
        for i in 0..10 {
            queue
                .add(&format!("toast {i}"), ToastKind::Info, secs(3))
                .unwrap();
            assert!(queue.count() <= MAX_VISIBLE);
        }
    }

    #[test]
    fn fourth_add_evicts_the_first_in_insertion_order() {
        let (queue, presenter, _) = queue();
        let first = queue.add("a", ToastKind::Info, Duration::ZERO).unwrap();
        queue.add("b", ToastKind::Info, Duration::ZERO).unwrap();
        queue.add("c", ToastKind::Info, Duration::ZERO).unwrap();
        queue.add("d", ToastKind::Info, Duration::ZERO).unwrap();

        assert_eq!(queue.visible_messages(), vec!["b", "c", "d"]);
        assert!(presenter.events().contains(&PortEvent::Unmounted(first)));
    }

    #[test]
    fn eviction_prefers_insertion_order_over_remaining_duration() {
        let (queue, _, timer) = queue();
        // The first toast has the longest remaining duration; it still goes.
        let first = queue.add("long", ToastKind::Info, secs(60)).unwrap();
        queue.add("b", ToastKind::Info, secs(1)).unwrap();
        queue.add("c", ToastKind::Info, secs(1)).unwrap();
        queue.add("d", ToastKind::Info, secs(1)).unwrap();

        assert!(!queue.visible_ids().contains(&first));
        // The evicted toast's auto-dismiss timer must not survive it.
        timer.advance(secs(120));
        assert_eq!(timer.pending_count(), 0);
    }

    #[test]
    fn empty_message_is_rejected_without_side_effects() {
        let (queue, presenter, _) = queue();
        let err = queue.add("", ToastKind::Error, secs(3)).unwrap_err();
        assert!(matches!(err, Error::InvalidMessage));
        assert_eq!(queue.count(), 0);
        assert!(presenter.events().is_empty());
    }

    #[test]
    fn mount_failure_propagates_and_leaves_queue_unchanged() {
        let (queue, presenter, timer) = queue();
        presenter.fail_next_mount();

        let err = queue.add("doomed", ToastKind::Info, secs(3)).unwrap_err();
        assert!(matches!(err, Error::Mount(_)));
        assert_eq!(queue.count(), 0);
        assert_eq!(timer.pending_count(), 0);

        // The queue keeps working afterwards.
        queue.add("fine", ToastKind::Info, secs(3)).unwrap();
        assert_eq!(queue.count(), 1);
    }

    #[test]
    fn hide_is_idempotent() {
        let (queue, presenter, timer) = queue();
        let id = queue.add("x", ToastKind::Info, Duration::ZERO).unwrap();

        queue.hide(id, false);
        queue.hide(id, false);
        timer.advance(HIDE_GRACE);
        queue.hide(id, false);

        let unmounts = presenter
            .events()
            .iter()
            .filter(|event| matches!(event, PortEvent::Unmounted(_)))
            .count();
        assert_eq!(unmounts, 1);
        assert_eq!(queue.count(), 0);
    }

    #[test]
    fn hide_of_unknown_id_is_a_no_op() {
        let (queue, _, _) = queue();
        queue.add("x", ToastKind::Info, Duration::ZERO).unwrap();
        queue.hide(ToastId(999), false);
        assert_eq!(queue.count(), 1);
    }

    #[test]
    fn zero_duration_never_auto_dismisses() {
        let (queue, _, timer) = queue();
        queue.add("sticky", ToastKind::Error, Duration::ZERO).unwrap();

        timer.advance(secs(3600));
        assert_eq!(queue.count(), 1);
        assert_eq!(timer.pending_count(), 0);
    }

    #[test]
    fn auto_dismiss_fires_after_the_duration() {
        let (queue, presenter, timer) = queue();
        let id = queue.add("saved", ToastKind::Success, secs(3)).unwrap();

        timer.advance(Duration::from_millis(2999));
        assert_eq!(queue.count(), 1);

        // Duration elapses, then the grace window.
        timer.advance(Duration::from_millis(1));
        assert_eq!(queue.count(), 0);
        timer.advance(HIDE_GRACE);
        assert!(presenter.events().contains(&PortEvent::Unmounted(id)));
    }

    #[test]
    fn manual_hide_beats_a_timer_due_at_the_same_instant() {
        let (queue, presenter, timer) = queue();
        let id = queue.add("race", ToastKind::Info, secs(3)).unwrap();

        queue.hide(id, false);
        // The auto-dismiss deadline passes while the toast is already hiding.
        timer.advance(secs(3));

        let unmounts = presenter
            .events()
            .iter()
            .filter(|event| matches!(event, PortEvent::Unmounted(_)))
            .count();
        assert_eq!(unmounts, 1);
        assert_eq!(timer.pending_count(), 0);
    }

    #[test]
    fn hide_most_recent_targets_the_newest_visible() {
        let (queue, _, _) = queue();
        let a = queue.add("a", ToastKind::Info, Duration::ZERO).unwrap();
        let b = queue.add("b", ToastKind::Info, Duration::ZERO).unwrap();

        queue.hide_most_recent();
        assert!(queue.visible_ids().contains(&a));
        assert!(!queue.visible_ids().contains(&b));
    }

    #[test]
    fn hide_most_recent_on_empty_queue_is_a_no_op() {
        let (queue, presenter, _) = queue();
        queue.hide_most_recent();
        assert!(presenter.events().is_empty());
    }

    #[test]
    fn clear_all_empties_and_cancels_every_timer() {
        let (queue, presenter, timer) = queue();
        for i in 0..3 {
            queue
                .add(&format!("toast {i}"), ToastKind::Info, secs(5))
                .unwrap();
        }
        // One toast mid-hide with its grace timer pending.
        let hiding = queue.visible_ids()[0];
        queue.hide(hiding, false);

        queue.clear_all();
        assert_eq!(queue.count(), 0);
        assert_eq!(timer.pending_count(), 0);

        let before = presenter.events().len();
        timer.advance(secs(60));
        assert_eq!(presenter.events().len(), before);
    }

    #[test]
    fn eviction_skips_the_grace_window() {
        let (queue, presenter, _) = queue();
        for message in ["a", "b", "c", "d"] {
            queue.add(message, ToastKind::Info, Duration::ZERO).unwrap();
        }
        // The evicted toast was marked hiding and unmounted back to back,
        // with no grace timer in between.
        let events = presenter.events();
        let first = ToastId(0);
        assert!(events.contains(&PortEvent::MarkedHiding(first)));
        assert!(events.contains(&PortEvent::Unmounted(first)));
    }

    #[test]
    fn watch_removal_resolves_after_the_grace_window() {
        let (queue, _, timer) = queue();
        let id = queue.add("x", ToastKind::Info, Duration::ZERO).unwrap();

        queue.hide(id, false);
        let completion = queue.watch_removal(id);
        assert!(!completion.is_done());

        timer.advance(HIDE_GRACE);
        assert!(completion.is_done());
    }

    #[test]
    fn watch_removal_of_unknown_id_is_already_resolved() {
        let (queue, _, _) = queue();
        assert!(queue.watch_removal(ToastId(42)).is_done());
    }

    #[test]
    fn ids_are_never_reused() {
        let (queue, _, _) = queue();
        let a = queue.add("a", ToastKind::Info, Duration::ZERO).unwrap();
        queue.hide(a, true);
        let b = queue.add("b", ToastKind::Info, Duration::ZERO).unwrap();
        assert_ne!(a, b);
        assert!(a < b);
    }
}
