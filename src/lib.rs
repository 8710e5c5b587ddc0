// Overlay navigation stack coordinator for floating auto-clicker UIs.
// The platform window system is abstracted behind the `Overlay` and
// `DisplayMonitor` traits, so the whole navigation logic runs (and tests)
// without a host windowing environment.

pub mod base;
pub mod display;
pub mod menu;
pub mod overlay;

pub use display::{DisplayMonitor, DisplaySize, Orientation, Point, StaticDisplay};
pub use menu::MenuPositionDataSource;
pub use overlay::{KeyEvent, LifecycleState, Overlay, OverlayContext, OverlayId, OverlayManager};
