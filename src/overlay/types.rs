// Core navigation types
use std::fmt;

use super::base::Overlay;

/// Identity of an overlay, assigned by the manager when it is first created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub(crate) u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle states an overlay moves through.
///
/// While navigation is idle, only the top of the back stack may be in
/// `Started` or `Resumed`; everything below it is `Paused` or `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
}

impl LifecycleState {
    /// True for states where the overlay window is present on screen.
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Started | Self::Resumed | Self::Paused)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

/// Key event forwarded by the host window system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: u32,
    pub action: KeyAction,
}

impl KeyEvent {
    pub fn down(code: u32) -> Self {
        Self {
            code,
            action: KeyAction::Down,
        }
    }

    pub fn up(code: u32) -> Self {
        Self {
            code,
            action: KeyAction::Up,
        }
    }
}

/// A pending navigation intent, queued while a transition is in flight.
///
/// Requests drain in the exact order they were enqueued once the in-flight
/// transition completes.
pub enum NavigationRequest {
    NavigateTo {
        overlay: Box<dyn Overlay>,
        hide_current: bool,
    },
    NavigateUp,
}

impl fmt::Debug for NavigationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NavigateTo {
                overlay,
                hide_current,
            } => write!(
                f,
                "NavigateTo({}, hide_current={hide_current})",
                overlay.name()
            ),
            Self::NavigateUp => write!(f, "NavigateUp"),
        }
    }
}
