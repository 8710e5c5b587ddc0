use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{PositionError, PositionResult};
use crate::display::{Orientation, Point};

/// Last saved floating menu positions, one slot per orientation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPositions {
    pub portrait: Option<Point>,
    pub landscape: Option<Point>,
}

/// Data source for the floating menu position.
///
/// While a lock is held, the menu is pinned to the locked point and position
/// updates are ignored, so a running scenario can't have its menu drift away.
#[derive(Debug, Default)]
pub struct MenuPositionDataSource {
    saved: SavedPositions,
    locked: Option<Point>,
}

impl MenuPositionDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the menu to `position` until [`unlock_position`](Self::unlock_position) is called.
    pub fn lock_position(&mut self, position: Point) {
        log::debug!("Locking menu position to {position:?}");
        self.locked = Some(position);
    }

    pub fn unlock_position(&mut self) {
        log::debug!("Unlocking menu position");
        self.locked = None;
    }

    pub fn locked_position(&self) -> Option<Point> {
        self.locked
    }

    /// Record the user moving the menu. Ignored while the position is locked.
    pub fn save_position(&mut self, orientation: Orientation, position: Point) {
        if self.locked.is_some() {
            log::debug!("Menu position locked, ignoring move to {position:?}");
            return;
        }
        match orientation {
            Orientation::Portrait => self.saved.portrait = Some(position),
            Orientation::Landscape => self.saved.landscape = Some(position),
        }
    }

    /// The position the menu should be shown at for `orientation`.
    /// A locked position takes precedence over the saved one.
    pub fn position_for(&self, orientation: Orientation) -> Option<Point> {
        if let Some(locked) = self.locked {
            return Some(locked);
        }
        match orientation {
            Orientation::Portrait => self.saved.portrait,
            Orientation::Landscape => self.saved.landscape,
        }
    }

    /// Load previously persisted positions. The lock state is never persisted.
    pub fn load_from(path: &Path) -> PositionResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| PositionError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let saved: SavedPositions =
            serde_json::from_str(&raw).map_err(|source| PositionError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            saved,
            locked: None,
        })
    }

    /// Persist the saved positions to `path` as JSON.
    pub fn save_to(&self, path: &Path) -> PositionResult<()> {
        let raw = serde_json::to_string_pretty(&self.saved).map_err(|source| {
            PositionError::InvalidFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, raw).map_err(|source| PositionError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_query_per_orientation() {
        let mut positions = MenuPositionDataSource::new();
        positions.save_position(Orientation::Portrait, Point::new(10, 20));
        positions.save_position(Orientation::Landscape, Point::new(30, 40));

        assert_eq!(
            positions.position_for(Orientation::Portrait),
            Some(Point::new(10, 20))
        );
        assert_eq!(
            positions.position_for(Orientation::Landscape),
            Some(Point::new(30, 40))
        );
    }

    #[test]
    fn test_locked_position_takes_precedence() {
        let mut positions = MenuPositionDataSource::new();
        positions.save_position(Orientation::Portrait, Point::new(10, 20));
        positions.lock_position(Point::new(0, 0));

        assert_eq!(
            positions.position_for(Orientation::Portrait),
            Some(Point::new(0, 0))
        );

        positions.unlock_position();
        assert_eq!(
            positions.position_for(Orientation::Portrait),
            Some(Point::new(10, 20))
        );
    }

    #[test]
    fn test_moves_ignored_while_locked() {
        let mut positions = MenuPositionDataSource::new();
        positions.lock_position(Point::new(5, 5));
        positions.save_position(Orientation::Portrait, Point::new(100, 100));
        positions.unlock_position();

        assert_eq!(
            positions.position_for(Orientation::Portrait),
            None,
            "Move during lock should not be recorded"
        );
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("menu-positions.json");

        let mut positions = MenuPositionDataSource::new();
        positions.save_position(Orientation::Portrait, Point::new(42, 84));
        positions.lock_position(Point::new(1, 1));
        positions.save_to(&path).expect("save should succeed");

        let loaded = MenuPositionDataSource::load_from(&path).expect("load should succeed");
        assert_eq!(
            loaded.position_for(Orientation::Portrait),
            Some(Point::new(42, 84))
        );
        assert_eq!(loaded.locked_position(), None, "Lock is not persisted");
        assert_eq!(loaded.position_for(Orientation::Landscape), None);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("menu-positions.json");
        std::fs::write(&path, "not json").expect("write");

        match MenuPositionDataSource::load_from(&path) {
            Err(PositionError::InvalidFormat { .. }) => {}
            other => panic!("Expected InvalidFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("does-not-exist.json");

        assert!(matches!(
            MenuPositionDataSource::load_from(&path),
            Err(PositionError::ReadFailed { .. })
        ));
    }
}
