// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle phases and their legal transitions.
//!
//! A toast moves `Visible → Hiding → Removed`, never backwards and never
//! skipping the hiding phase. The transition guards return `Option` so that
//! an illegal request is a silent no-op: when a timer fires in the same
//! instant as a manual dismissal, the second request observes a phase that
//! no longer accepts the transition and does nothing.

/// The phase of a toast's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Mounted and counting toward the visible bound.
    #[default]
    Visible,
    /// Exit cue applied, waiting out the grace window before unmount.
    Hiding,
    /// Terminal. The record is dropped from the queue on entry.
    Removed,
}

impl Phase {
    /// Attempts the `Visible → Hiding` transition.
    ///
    /// Returns `None` if the toast is not visible, which makes duplicate
    /// hide requests (timer vs. click vs. keyboard vs. eviction) collapse
    /// to a single hide path.
    #[must_use]
    pub fn begin_hide(self) -> Option<Phase> {
        match self {
            Phase::Visible => Some(Phase::Hiding),
            Phase::Hiding | Phase::Removed => None,
        }
    }

    /// Attempts the `Hiding → Removed` transition.
    ///
    /// Returns `None` unless the toast is mid-hide; a toast is never removed
    /// without passing through the hiding phase first.
    #[must_use]
    pub fn finish(self) -> Option<Phase> {
        match self {
            Phase::Hiding => Some(Phase::Removed),
            Phase::Visible | Phase::Removed => None,
        }
    }

    /// Returns whether this phase counts toward the visible bound.
    #[must_use]
    pub fn is_visible(self) -> bool {
        self == Phase::Visible
    }
}
