// SPDX-License-Identifier: MPL-2.0
//! Shared test doubles for exercising the queue without a rendering
//! surface.
//!
//! [`RecordingPresenter`] implements the presentation port by logging every
//! call; unit tests and the integration suite both assert against its event
//! log instead of inspecting pixels.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::notification::{ToastId, ToastRecord};
use crate::presenter::Presenter;

/// One recorded port call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortEvent {
    Mounted(ToastId),
    MarkedHiding(ToastId),
    Unmounted(ToastId),
}

/// Surface handed out by [`RecordingPresenter`]: just the toast's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedSurface {
    id: ToastId,
}

impl RecordedSurface {
    /// Returns the id of the toast this surface represents.
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }
}

#[derive(Default)]
struct RecordingInner {
    events: Vec<PortEvent>,
    fail_next_mount: bool,
}

/// Presenter that records every port call. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    inner: Rc<RefCell<RecordingInner>>,
}

impl RecordingPresenter {
    /// Creates a presenter with an empty event log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `mount` call fail, as if the mount target were
    /// missing. Subsequent mounts succeed again.
    pub fn fail_next_mount(&self) {
        self.inner.borrow_mut().fail_next_mount = true;
    }

    /// Returns a copy of the event log, in call order.
    #[must_use]
    pub fn events(&self) -> Vec<PortEvent> {
        self.inner.borrow().events.clone()
    }

    /// Drains and returns the event log.
    pub fn take_events(&self) -> Vec<PortEvent> {
        std::mem::take(&mut self.inner.borrow_mut().events)
    }
}

impl Presenter for RecordingPresenter {
    type Surface = RecordedSurface;

    fn mount(&self, record: &ToastRecord) -> Result<RecordedSurface> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_next_mount {
            inner.fail_next_mount = false;
            return Err(Error::Mount("mount target missing".to_string()));
        }
        inner.events.push(PortEvent::Mounted(record.id()));
        Ok(RecordedSurface { id: record.id() })
    }

    fn mark_hiding(&self, surface: &RecordedSurface) {
        self.inner
            .borrow_mut()
            .events
            .push(PortEvent::MarkedHiding(surface.id));
    }

    fn unmount(&self, surface: &RecordedSurface) {
        self.inner
            .borrow_mut()
            .events
            .push(PortEvent::Unmounted(surface.id));
    }
}
