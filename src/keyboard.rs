// SPDX-License-Identifier: MPL-2.0
//! Keyboard interrupt handling: Escape dismisses the newest toast.
//!
//! The handler recognizes exactly one key. Hosts feed it their keyboard
//! events and consult the returned [`Status`] to decide whether to run
//! their own default handling, the same way an event subscription reports
//! captured vs. ignored events.

use crate::presenter::Presenter;
use crate::queue::ToastQueue;
use crate::timer::TimerService;

/// A pressed key, as delivered by the host.
///
/// Only the variants the host can actually route matter here; anything the
/// handler does not recognize falls through as [`Status::Ignored`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Backspace,
    Space,
    Character(char),
}

/// Whether the handler consumed the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The event was handled; the host should suppress its default behavior.
    Captured,
    /// The event was not for us.
    Ignored,
}

/// Dismisses the most recently added visible toast on Escape.
///
/// At most one handler is live per queue: attaching bumps a generation
/// counter, and a handler whose generation is stale ignores every event.
/// Re-initialization therefore replaces the previous handler rather than
/// stacking on top of it — feeding one keypress through both an old and a
/// new handler dismisses exactly once.
pub struct KeyboardInterrupt<P: Presenter, T: TimerService> {
    queue: ToastQueue<P, T>,
    generation: u64,
}

impl<P, T> KeyboardInterrupt<P, T>
where
    P: Presenter + 'static,
    T: TimerService + 'static,
{
    /// Attaches a new handler to the queue, detaching any previous one.
    #[must_use]
    pub fn attach(queue: &ToastQueue<P, T>) -> Self {
        Self {
            queue: queue.clone(),
            generation: queue.next_keyboard_generation(),
        }
    }

    /// Returns whether this handler is still the queue's live one.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.generation == self.queue.keyboard_generation()
    }

    /// Processes one key event.
    ///
    /// Escape with at least one visible toast hides the newest and captures
    /// the event. Every other key — and every key seen by a detached
    /// handler — is ignored.
    pub fn on_key(&self, key: Key) -> Status {
        if !self.is_attached() {
            return Status::Ignored;
        }
        match key {
            Key::Escape if self.queue.count() > 0 => {
                self.queue.hide_most_recent();
                Status::Captured
            }
            _ => Status::Ignored,
        }
    }
}
