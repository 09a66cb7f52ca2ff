// core/state.rs

// Holds the most recent pose, global path and obstacle list. Each input is replaced
// wholesale by its producer; the planning tick takes one consistent snapshot of all
// three before doing any work.

use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{Obstacle, VehiclePose, Waypoint};

/// Inputs for a single planning tick
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Latest vehicle pose, if one has been received
    pub pose: Option<VehiclePose>,
    /// Latest global path
    pub global_path: Arc<Vec<Waypoint>>,
    /// Latest detected obstacles
    pub obstacles: Arc<Vec<Obstacle>>,
}

impl InputSnapshot {
    /// Snapshot built directly from values
    pub fn new(pose: Option<VehiclePose>, global_path: Vec<Waypoint>, obstacles: Vec<Obstacle>) -> Self {
        InputSnapshot {
            pose,
            global_path: Arc::new(global_path),
            obstacles: Arc::new(obstacles),
        }
    }
}

/// Last-write-wins store shared between input callbacks and the planning tick
#[derive(Debug, Default)]
pub struct LatestInputs {
    latest: Mutex<InputSnapshot>,
}

impl LatestInputs {
    /// Empty store: no pose, empty path, no obstacles
    pub fn new() -> Self {
        LatestInputs::default()
    }

    /// Replaces the vehicle pose
    pub fn set_pose(&self, pose: VehiclePose) {
        self.lock().pose = Some(pose);
    }

    /// Replaces the global path
    pub fn set_global_path(&self, path: Vec<Waypoint>) {
        debug!("Global path replaced: {} waypoints", path.len());
        self.lock().global_path = Arc::new(path);
    }

    /// Replaces the obstacle list
    pub fn set_obstacles(&self, obstacles: Vec<Obstacle>) {
        self.lock().obstacles = Arc::new(obstacles);
    }

    /// Copies all three inputs under a single lock acquisition.
    /// Path and obstacles are shared, so this never copies waypoint data.
    pub fn snapshot(&self) -> InputSnapshot {
        self.lock().clone()
    }

    // Setters only ever assign whole values, so a poisoned guard still holds consistent data.
    fn lock(&self) -> MutexGuard<'_, InputSnapshot> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
