// Overlay navigation module
// This module provides the navigation stack coordinator for floating overlay
// windows: a serialized request pipeline, a lifecycle-managed back stack, and
// bulk hide/restore with a lifecycle state registry.

pub mod base;
pub mod manager;
pub mod registry;
pub mod stack;
pub mod types;


// Re-export the main types and functions for easy access
pub use base::{Overlay, OverlayContext, OverlayEntry};
pub use manager::OverlayManager;
pub use registry::LifecycleStatesRegistry;
pub use stack::LifoStack;
pub use types::{KeyAction, KeyEvent, LifecycleState, NavigationRequest, OverlayId};
