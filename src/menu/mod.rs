// Floating menu position module
// The main floating menu remembers where the user dragged it, one slot per
// display orientation, and can be temporarily locked to a fixed point while a
// scenario is running. Positions are persisted as a small JSON document.

pub mod error;
pub mod position;

// Re-export the main types and functions for easy access
pub use error::{PositionError, PositionResult};
pub use position::{MenuPositionDataSource, SavedPositions};
