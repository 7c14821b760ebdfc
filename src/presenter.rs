// SPDX-License-Identifier: MPL-2.0
//! The presentation port: the seam between queue policy and rendering.
//!
//! The queue never builds visual elements itself; it drives a [`Presenter`]
//! through exactly three operations. This is what keeps the core testable
//! without any rendering surface at all — tests plug in
//! [`crate::test_support::RecordingPresenter`], GUI hosts plug in whatever
//! builds their actual toast cards.

use crate::error::Result;
use crate::notification::ToastRecord;

/// Mounts, marks, and unmounts the visual representation of a toast.
///
/// `Surface` should be a cheap handle (an `Rc`, a widget id, a DOM node
/// reference): the queue keeps one clone for the toast's lifetime and the
/// facade hands one to the caller of `show`.
///
/// Implementations are expected to:
/// - wire the surface's own close affordance back to
///   [`crate::queue::ToastQueue::hide`] with the record's id, and
/// - escape the record's message for display; the queue stores it verbatim.
///
/// The queue holds no internal borrow across any of these calls, so an
/// implementation may re-enter the queue synchronously (a close affordance
/// firing during `mark_hiding`, for instance) without deadlocking.
pub trait Presenter {
    /// Handle to one mounted representation.
    type Surface: Clone;

    /// Creates and inserts a visible representation for `record`.
    ///
    /// This is the only fallible port operation: if the mount target is
    /// missing, the error propagates to the caller of `show`/`add` and the
    /// queue rolls the toast back entirely.
    fn mount(&self, record: &ToastRecord) -> Result<Self::Surface>;

    /// Applies an "about to disappear" treatment. Must not remove the
    /// surface; the queue unmounts it after the grace window.
    fn mark_hiding(&self, surface: &Self::Surface);

    /// Removes the representation entirely.
    fn unmount(&self, surface: &Self::Surface);
}
