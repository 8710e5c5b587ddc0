use std::collections::HashMap;

use super::base::OverlayEntry;
use super::types::{LifecycleState, OverlayId};

/// Tracks the lifecycle state of every back stack overlay while they are
/// hidden, so a later restore can bring each one back to where it was.
///
/// The registry holding any state is itself the "stack is hidden" flag.
#[derive(Debug, Default)]
pub struct LifecycleStatesRegistry {
    states: HashMap<OverlayId, LifecycleState>,
}

impl LifecycleStatesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current lifecycle state of every given overlay.
    pub fn save_states<'a>(&mut self, entries: impl Iterator<Item = &'a OverlayEntry>) {
        self.states = entries.map(|entry| (entry.id(), entry.state())).collect();
    }

    /// Return the saved states and clear the registry.
    pub fn restore_states(&mut self) -> HashMap<OverlayId, LifecycleState> {
        std::mem::take(&mut self.states)
    }

    pub fn have_states(&self) -> bool {
        !self.states.is_empty()
    }
}
