use super::types::{DisplaySize, Orientation};

/// Access to the host display geometry plus orientation monitoring registration.
///
/// The navigation manager calls [`start_monitoring`](DisplayMonitor::start_monitoring)
/// when the first overlay is pushed and [`stop_monitoring`](DisplayMonitor::stop_monitoring)
/// once the back stack empties again. While monitoring is active, the host is
/// expected to forward rotation events to
/// [`OverlayManager::notify_orientation_changed`](crate::OverlayManager::notify_orientation_changed).
pub trait DisplayMonitor {
    fn size(&self) -> DisplaySize;
    fn orientation(&self) -> Orientation;
    fn start_monitoring(&mut self);
    fn stop_monitoring(&mut self);
    fn is_monitoring(&self) -> bool;
}

/// Fixed-geometry display for tests and the demo binary.
#[derive(Debug, Clone)]
pub struct StaticDisplay {
    size: DisplaySize,
    orientation: Orientation,
    monitoring: bool,
}

impl StaticDisplay {
    pub fn new(size: DisplaySize, orientation: Orientation) -> Self {
        Self {
            size,
            orientation,
            monitoring: false,
        }
    }
}

impl DisplayMonitor for StaticDisplay {
    fn size(&self) -> DisplaySize {
        self.size
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn start_monitoring(&mut self) {
        log::debug!("Display orientation monitoring started");
        self.monitoring = true;
    }

    fn stop_monitoring(&mut self) {
        log::debug!("Display orientation monitoring stopped");
        self.monitoring = false;
    }

    fn is_monitoring(&self) -> bool {
        self.monitoring
    }
}
