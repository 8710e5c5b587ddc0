// Display abstraction module
// Overlays live on a platform managed display; the coordinator only needs its
// geometry and a way to register for orientation change monitoring. Hosts
// provide a real implementation, tests and the demo use the in-memory one.

pub mod monitor;
pub mod types;

// Re-export the main types and functions for easy access
pub use monitor::{DisplayMonitor, StaticDisplay};
pub use types::{DisplaySize, Orientation, Point};
