// SPDX-License-Identifier: MPL-2.0
//! Public entry point for the toast system.
//!
//! [`Toasts`] composes the queue, the timer service, and the presentation
//! port behind the four operations callers actually use: show, hide,
//! clear-all, count. Hide and clear-all hand back a [`Completion`] so a
//! caller can wait out the exit-animation window before asserting the
//! surface is gone.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};
use std::time::Duration;

use crate::error::Result;
use crate::keyboard::KeyboardInterrupt;
use crate::notification::{ToastId, ToastKind};
use crate::policy::DEFAULT_DURATION;
use crate::presenter::Presenter;
use crate::queue::ToastQueue;
use crate::timer::TimerService;

#[derive(Default)]
struct CompletionState {
    done: bool,
    wakers: Vec<Waker>,
}

/// Deferred completion signal for a hide or clear operation.
///
/// Resolves when the toast (or every toast, for clear-all) reaches removal.
/// This is not concurrency: everything runs on one thread, and the signal
/// flips inside whichever discrete call performs the removal — a timer
/// firing, an immediate hide, a clear. Poll it synchronously with
/// [`Completion::is_done`], or `.await` it from a host's single-threaded
/// executor; it implements [`Future`] without tying the crate to a runtime.
#[derive(Clone, Default)]
pub struct Completion {
    state: Rc<RefCell<CompletionState>>,
}

impl Completion {
    pub(crate) fn pending() -> Self {
        Self::default()
    }

    pub(crate) fn resolved() -> Self {
        let completion = Self::default();
        completion.state.borrow_mut().done = true;
        completion
    }

    pub(crate) fn resolve(&self) {
        let wakers = {
            let mut state = self.state.borrow_mut();
            state.done = true;
            std::mem::take(&mut state.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
    }

    /// Returns whether the watched removal has happened.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state.borrow().done
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.state.borrow_mut();
        if state.done {
            Poll::Ready(())
        } else {
            if !state.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
                state.wakers.push(cx.waker().clone());
            }
            Poll::Pending
        }
    }
}

/// Handle to a shown toast: its id plus a clone of the mounted surface.
///
/// The surface clone lets callers interact with the representation directly
/// (tests assert against it, hosts may focus or reposition it). Hiding goes
/// through the facade, not the surface.
///
/// A handle also remembers which facade issued it, so passing it to a
/// different facade resolves without effect instead of dismissing whichever
/// unrelated toast happens to share the id.
#[derive(Debug, Clone)]
pub struct ToastHandle<S> {
    id: ToastId,
    surface: S,
    issuer: Rc<()>,
}

impl<S> ToastHandle<S> {
    /// Returns the toast's id.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Returns the mounted surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// The toast facade.
///
/// Owns one queue; construct one per application (or per test) and pass it
/// around explicitly — there is no global instance.
pub struct Toasts<P: Presenter, T: TimerService> {
    queue: ToastQueue<P, T>,
}

impl<P, T> Toasts<P, T>
where
    P: Presenter + 'static,
    T: TimerService + 'static,
{
    /// Creates a facade over fresh queue state.
    pub fn new(presenter: P, timer: T) -> Self {
        Self {
            queue: ToastQueue::new(presenter, timer),
        }
    }

    /// Returns the underlying queue, for hosts that wire collaborators
    /// (presenter close affordances, keyboard routing) to it directly.
    #[must_use]
    pub fn queue(&self) -> &ToastQueue<P, T> {
        &self.queue
    }

    /// Shows a toast.
    ///
    /// A zero `duration` disables auto-dismiss. Fails for an empty message
    /// or a failed mount; see [`ToastQueue::add`] for the full contract.
    pub fn show(
        &self,
        message: &str,
        kind: ToastKind,
        duration: Duration,
    ) -> Result<ToastHandle<P::Surface>> {
        let (id, surface) = self.queue.insert(message, kind, duration)?;
        Ok(ToastHandle {
            id,
            surface,
            issuer: self.queue.identity(),
        })
    }

    /// Shows a success toast with the default duration.
    pub fn success(&self, message: &str) -> Result<ToastHandle<P::Surface>> {
        self.show(message, ToastKind::Success, DEFAULT_DURATION)
    }

    /// Shows an error toast with the default duration.
    pub fn error(&self, message: &str) -> Result<ToastHandle<P::Surface>> {
        self.show(message, ToastKind::Error, DEFAULT_DURATION)
    }

    /// Shows an info toast with the default duration.
    pub fn info(&self, message: &str) -> Result<ToastHandle<P::Surface>> {
        self.show(message, ToastKind::Info, DEFAULT_DURATION)
    }

    /// Hides a toast through the grace window.
    ///
    /// The completion resolves once the toast is removed. Handles to
    /// already-removed toasts, and handles issued by a different facade,
    /// resolve immediately without effect.
    pub fn hide(&self, handle: &ToastHandle<P::Surface>) -> Completion {
        self.dismiss(handle, false)
    }

    /// Hides a toast immediately, skipping the grace window. The completion
    /// is resolved by the time this returns.
    pub fn hide_now(&self, handle: &ToastHandle<P::Surface>) -> Completion {
        self.dismiss(handle, true)
    }

    /// Removes every tracked toast. The completion is resolved by the time
    /// this returns; it exists so call sites can treat hide and clear
    /// uniformly.
    pub fn clear_all(&self) -> Completion {
        self.queue.clear_all();
        Completion::resolved()
    }

    /// Number of visible toasts.
    #[must_use]
    pub fn count(&self) -> usize {
        self.queue.count()
    }

    /// Returns whether any toast is visible.
    #[must_use]
    pub fn has_visible(&self) -> bool {
        self.queue.count() > 0
    }

    /// Attaches a fresh keyboard interrupt handler, detaching any previous
    /// one. See [`KeyboardInterrupt`] for the replace-not-stack guarantee.
    #[must_use]
    pub fn attach_keyboard(&self) -> KeyboardInterrupt<P, T> {
        KeyboardInterrupt::attach(&self.queue)
    }

    fn dismiss(&self, handle: &ToastHandle<P::Surface>, immediate: bool) -> Completion {
        if !Rc::ptr_eq(&handle.issuer, &self.queue.identity()) {
            return Completion::resolved();
        }
        self.queue.hide(handle.id(), immediate);
        self.queue.watch_removal(handle.id())
    }
}
