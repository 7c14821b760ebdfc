// SPDX-License-Identifier: MPL-2.0
//! Fixed policy values for the toast queue.
//!
//! These are deliberate product decisions, not tunables: every host gets the
//! same bound, default duration, and exit-animation window. Changing one of
//! them changes observable queue behavior, so the lifecycle tests pin them.

use std::time::Duration;

/// Maximum number of toasts visible at once. Adding a fourth evicts the
/// oldest visible toast.
pub const MAX_VISIBLE: usize = 3;

/// Auto-dismiss duration used by the per-kind convenience constructors.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

/// Time a toast spends in the hiding phase before it is unmounted. Reserved
/// for the presenter's exit animation; skipped entirely on eviction and
/// clear-all.
pub const HIDE_GRACE: Duration = Duration::from_millis(300);
