use std::io::{self, Write};

use log::debug;

use super::types::{KeyEvent, LifecycleState, OverlayId};
use crate::base::Dumpable;
use crate::display::{DisplaySize, Orientation};

/// Snapshot of display metrics handed to an overlay when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayContext {
    pub display_size: DisplaySize,
    pub orientation: Orientation,
}

/// Hooks implemented by a floating window shown on the overlay back stack.
///
/// The manager drives all lifecycle transitions; implementations only react to
/// them (inflate the window on create, attach it on start, remove it on stop).
/// Teardown is asynchronous: after `on_destroy` the host window system is
/// expected to confirm the removal through
/// [`OverlayManager::confirm_dismissed`](super::manager::OverlayManager::confirm_dismissed).
pub trait Overlay {
    /// Short label used in logs and dump reports.
    fn name(&self) -> &str;

    fn on_create(&mut self, ctx: &OverlayContext);
    fn on_start(&mut self);
    fn on_resume(&mut self);
    fn on_pause(&mut self);
    fn on_stop(&mut self);
    fn on_destroy(&mut self);

    /// Handle a key event. Return true to consume it.
    fn on_key_event(&mut self, _event: &KeyEvent) -> bool {
        false
    }

    fn on_orientation_changed(&mut self, _orientation: Orientation) {}
}

/// A stacked overlay together with the lifecycle bookkeeping the manager needs.
///
/// Transition methods enforce the lifecycle state machine: redundant
/// transitions are no-ops, and a destroy is only a request until the host
/// confirms the window teardown (`Active -> PendingDestroy -> Destroyed`).
pub struct OverlayEntry {
    id: OverlayId,
    overlay: Box<dyn Overlay>,
    state: LifecycleState,
    pending_dismiss: bool,
}

impl OverlayEntry {
    pub(crate) fn create(
        id: OverlayId,
        mut overlay: Box<dyn Overlay>,
        ctx: &OverlayContext,
    ) -> Self {
        debug!("Creating overlay {id} ({})", overlay.name());
        overlay.on_create(ctx);
        Self {
            id,
            overlay,
            state: LifecycleState::Created,
            pending_dismiss: false,
        }
    }

    pub fn id(&self) -> OverlayId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.overlay.name()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_pending_dismiss(&self) -> bool {
        self.pending_dismiss
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible()
    }

    pub(crate) fn start(&mut self) {
        if matches!(self.state, LifecycleState::Created | LifecycleState::Stopped) {
            debug!("Starting overlay {}", self.id);
            self.overlay.on_start();
            self.state = LifecycleState::Started;
        }
    }

    pub(crate) fn resume(&mut self) {
        if matches!(self.state, LifecycleState::Created | LifecycleState::Stopped) {
            self.overlay.on_start();
            self.state = LifecycleState::Started;
        }
        if matches!(self.state, LifecycleState::Started | LifecycleState::Paused) {
            debug!("Resuming overlay {}", self.id);
            self.overlay.on_resume();
            self.state = LifecycleState::Resumed;
        }
    }

    pub(crate) fn pause(&mut self) {
        if self.state == LifecycleState::Resumed {
            debug!("Pausing overlay {}", self.id);
            self.overlay.on_pause();
            self.state = LifecycleState::Paused;
        }
    }

    pub(crate) fn stop(&mut self) {
        if self.state == LifecycleState::Resumed {
            self.overlay.on_pause();
            self.state = LifecycleState::Paused;
        }
        if matches!(self.state, LifecycleState::Started | LifecycleState::Paused) {
            debug!("Stopping overlay {}", self.id);
            self.overlay.on_stop();
            self.state = LifecycleState::Stopped;
        }
    }

    /// Remove the overlay from the screen without destroying it. Its previous
    /// state is expected to have been saved in the lifecycle registry.
    pub(crate) fn hide(&mut self) {
        debug!("Hiding overlay {}", self.id);
        self.stop();
    }

    /// Begin the asynchronous teardown of the overlay window.
    pub(crate) fn request_destroy(&mut self) {
        if self.pending_dismiss || self.state == LifecycleState::Destroyed {
            return;
        }
        self.stop();
        debug!("Requesting destroy of overlay {}", self.id);
        self.overlay.on_destroy();
        self.pending_dismiss = true;
    }

    /// The host confirmed the window teardown.
    pub(crate) fn mark_destroyed(&mut self) {
        self.state = LifecycleState::Destroyed;
        self.pending_dismiss = false;
    }

    pub(crate) fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        self.overlay.on_key_event(event)
    }

    pub(crate) fn change_orientation(&mut self, orientation: Orientation) {
        self.overlay.on_orientation_changed(orientation);
    }
}

impl Dumpable for OverlayEntry {
    fn dump(&self, writer: &mut dyn Write, prefix: &str) -> io::Result<()> {
        writeln!(
            writer,
            "{prefix}{} {}: {:?}{}",
            self.id,
            self.overlay.name(),
            self.state,
            if self.pending_dismiss {
                " (pending dismiss)"
            } else {
                ""
            },
        )
    }
}
