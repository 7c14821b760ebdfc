// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `ToastRecord` struct and `ToastKind` enum used
//! throughout the queue. Records are created by the queue itself; everything
//! but the lifecycle phase and the pending timer is immutable afterwards.

use crate::lifecycle::Phase;
use crate::timer::TimerHandle;

/// Unique identifier for a toast.
///
/// Ids are assigned from a single per-queue counter, monotonically
/// increasing and never reused, so comparing two ids also answers which
/// toast was created first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(pub(crate) u64);

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind determines the visual treatment a presenter applies.
///
/// It has no effect on queue behavior: ordering and eviction are strictly
/// by insertion order, never by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Something went wrong.
    Error,
    /// Neutral informational message.
    Info,
}

impl ToastKind {
    /// Returns the stable identifier presenters use to pick styling
    /// (CSS class, theme token, icon).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

/// One live toast.
///
/// The message is stored verbatim; escaping it for display is the
/// presenter's job. The `timer` slot holds whichever transition timer is
/// pending: the auto-dismiss timer while the toast is visible (only if it
/// was created with a nonzero duration), the grace timer while it is hiding.
#[derive(Debug)]
pub struct ToastRecord {
    id: ToastId,
    message: String,
    kind: ToastKind,
    pub(crate) phase: Phase,
    pub(crate) timer: Option<TimerHandle>,
}

impl ToastRecord {
    pub(crate) fn new(id: ToastId, message: String, kind: ToastKind) -> Self {
        Self {
            id,
            message,
            kind,
            phase: Phase::Visible,
            timer: None,
        }
    }

    /// Returns the toast's unique id.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Returns the message text, unescaped.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the kind.
    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_identifiers_are_distinct() {
        assert_ne!(ToastKind::Success.as_str(), ToastKind::Error.as_str());
        assert_ne!(ToastKind::Success.as_str(), ToastKind::Info.as_str());
        assert_ne!(ToastKind::Error.as_str(), ToastKind::Info.as_str());
    }

    #[test]
    fn new_record_starts_visible_with_no_timer() {
        let record = ToastRecord::new(ToastId(1), "saved".to_string(), ToastKind::Success);
        assert_eq!(record.phase(), Phase::Visible);
        assert!(record.timer.is_none());
    }

    #[test]
    fn record_stores_message_verbatim() {
        let record = ToastRecord::new(
            ToastId(2),
            "<b>bold</b> & raw".to_string(),
            ToastKind::Info,
        );
        assert_eq!(record.message(), "<b>bold</b> & raw");
    }

    #[test]
    fn ids_order_by_creation() {
        assert!(ToastId(1) < ToastId(2));
    }
}
