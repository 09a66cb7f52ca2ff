//! Core data model for the velocity planner
//!
//! Waypoints, poses, obstacles and local plans, plus the quaternion helpers,
//! the latest-value input store and the CSV path loader built on them.

pub mod geometry;
pub mod state;
pub mod waypoints;

pub use state::{InputSnapshot, LatestInputs};

use nalgebra::{Point2, Quaternion};

/// A point on a path with heading and target speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// Planar position
    pub position: Point2<f64>,
    /// Heading as a quaternion (w, x, y, z), not necessarily normalized
    pub orientation: Quaternion<f64>,
    /// Target longitudinal speed
    pub speed: f64,
}

impl Waypoint {
    /// Waypoint at (x, y) facing +x
    pub fn new(x: f64, y: f64, speed: f64) -> Self {
        Waypoint {
            position: Point2::new(x, y),
            orientation: Quaternion::identity(),
            speed,
        }
    }

    /// Replace the orientation
    pub fn with_orientation(mut self, orientation: Quaternion<f64>) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Vehicle position in the path frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehiclePose {
    /// Planar position
    pub position: Point2<f64>,
}

impl VehiclePose {
    /// Pose at (x, y)
    pub fn new(x: f64, y: f64) -> Self {
        VehiclePose {
            position: Point2::new(x, y),
        }
    }
}

/// Detected object in the path frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Planar position
    pub position: Point2<f64>,
}

impl Obstacle {
    /// Obstacle at (x, y)
    pub fn new(x: f64, y: f64) -> Self {
        Obstacle {
            position: Point2::new(x, y),
        }
    }
}

/// Forward slice of the global path with adjusted speeds
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPlan {
    /// Index in the global path of the first waypoint
    pub start: usize,
    /// Waypoints `start..start + len` of the global path
    pub waypoints: Vec<Waypoint>,
    /// Stop index within the plan imposed by a blocking obstacle
    pub obstacle_stop: Option<usize>,
}

impl LocalPlan {
    /// Number of waypoints in the plan
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the plan has no waypoints
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Target speeds in plan order
    pub fn speeds(&self) -> Vec<f64> {
        self.waypoints.iter().map(|wp| wp.speed).collect()
    }
}
