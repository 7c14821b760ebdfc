// SPDX-License-Identifier: MPL-2.0
//! `toastline` manages the lifecycle of transient UI notifications: an
//! ordered, bounded collection of toasts, each with its own timer-driven
//! auto-dismiss, subject to eviction pressure, manual dismissal, and a
//! keyboard interrupt.
//!
//! The crate renders nothing. Rendering happens behind the
//! [`Presenter`] port, and time behind the [`TimerService`] port, so the
//! whole lifecycle is deterministic under test: plug in the
//! [`test_support::RecordingPresenter`] and a [`TickTimer`], advance
//! virtual time, and assert on the recorded mount/unmount calls.
//!
//! ```
//! use std::time::Duration;
//! use toastline::test_support::RecordingPresenter;
//! use toastline::{TickTimer, ToastKind, Toasts};
//!
//! let timer = TickTimer::new();
//! let toasts = Toasts::new(RecordingPresenter::new(), timer.clone());
//!
//! toasts.show("Saved", ToastKind::Success, Duration::from_secs(3))?;
//! assert_eq!(toasts.count(), 1);
//!
//! // The auto-dismiss fires, then the exit animation window elapses.
//! timer.advance(Duration::from_secs(4));
//! assert_eq!(toasts.count(), 0);
//! # Ok::<(), toastline::Error>(())
//! ```
//!
//! At most [`policy::MAX_VISIBLE`] toasts are visible at once; adding one
//! more evicts the oldest. Dismissal from any source — timer, close button,
//! Escape, eviction, clear-all — funnels through one guarded hide path, so
//! racing sources collapse to a single removal and no timer outlives its
//! toast.

#![doc(html_root_url = "https://docs.rs/toastline/0.1.0")]

pub mod error;
pub mod facade;
pub mod keyboard;
pub mod lifecycle;
pub mod notification;
pub mod policy;
pub mod presenter;
pub mod queue;
pub mod test_support;
pub mod timer;

pub use error::{Error, Result};
pub use facade::{Completion, ToastHandle, Toasts};
pub use keyboard::{Key, KeyboardInterrupt, Status};
pub use lifecycle::Phase;
pub use notification::{ToastId, ToastKind, ToastRecord};
pub use presenter::Presenter;
pub use queue::ToastQueue;
pub use timer::{TickTimer, TimerHandle, TimerService};
