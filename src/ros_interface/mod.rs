//! ROS 2 interface for the velocity planner
//!
//! This module handles all communication with ROS 2, including:
//! - Converting pose, path and detected-object messages into core types
//! - Feeding subscriptions into the shared latest-input store
//! - Publishing local plans as waypoint arrays

mod publisher;
mod subscriber;

use r2r::geometry_msgs::msg::{Point, Pose, PoseWithCovarianceStamped, Quaternion as QuaternionMsg, Twist, Vector3};
use r2r::mcav_interfaces::msg::{DetectedObjectArray, Waypoint as WaypointMsg, WaypointArray};

use nalgebra::{Point2, Quaternion};

pub use publisher::*;
pub use subscriber::*;

use crate::core::{LocalPlan, Obstacle, VehiclePose, Waypoint};
use crate::navigation::PlanSink;
use crate::{PlannerError, PlannerResult};

impl From<r2r::Error> for PlannerError {
    fn from(e: r2r::Error) -> Self {
        PlannerError::RosError(e.to_string())
    }
}

impl From<futures::task::SpawnError> for PlannerError {
    fn from(e: futures::task::SpawnError) -> Self {
        PlannerError::RosError(format!("failed to spawn task: {}", e))
    }
}

/// Vehicle pose from a localization message
pub fn pose_from_msg(msg: &PoseWithCovarianceStamped) -> VehiclePose {
    VehiclePose::new(msg.pose.pose.position.x, msg.pose.pose.position.y)
}

/// Obstacle positions from a detected-object message
pub fn obstacles_from_msg(msg: &DetectedObjectArray) -> Vec<Obstacle> {
    msg.detected_objects
        .iter()
        .map(|obj| Obstacle::new(obj.pose.position.x, obj.pose.position.y))
        .collect()
}

/// Core waypoint from a waypoint message
pub fn waypoint_from_msg(msg: &WaypointMsg) -> Waypoint {
    let q = &msg.pose.orientation;
    Waypoint {
        position: Point2::new(msg.pose.position.x, msg.pose.position.y),
        orientation: Quaternion::new(q.w, q.x, q.y, q.z),
        speed: msg.velocity.linear.x,
    }
}

/// Global path from a waypoint array message.
/// A waypoint with a non-finite position rejects the whole path.
pub fn path_from_msg(msg: &WaypointArray) -> PlannerResult<Vec<Waypoint>> {
    msg.waypoints
        .iter()
        .enumerate()
        .map(|(i, wp_msg)| {
            let waypoint = waypoint_from_msg(wp_msg);
            if waypoint.position.x.is_finite() && waypoint.position.y.is_finite() {
                Ok(waypoint)
            } else {
                Err(PlannerError::ParseError(format!(
                    "waypoint {}: position must be finite",
                    i
                )))
            }
        })
        .collect()
}

/// Waypoint message stamped with `frame_id`
pub fn waypoint_to_msg(waypoint: &Waypoint, frame_id: &str) -> WaypointMsg {
    let q = &waypoint.orientation;
    WaypointMsg {
        frame_id: frame_id.to_string(),
        pose: Pose {
            position: Point {
                x: waypoint.position.x,
                y: waypoint.position.y,
                z: 0.0,
            },
            orientation: QuaternionMsg {
                x: q.i,
                y: q.j,
                z: q.k,
                w: q.w,
            },
        },
        velocity: Twist {
            linear: Vector3 {
                x: waypoint.speed,
                y: 0.0,
                z: 0.0,
            },
            angular: Vector3::default(),
        },
        ..Default::default()
    }
}

/// Waypoint array message for any sequence of waypoints
pub fn waypoints_to_msg(waypoints: &[Waypoint], frame_id: &str) -> WaypointArray {
    WaypointArray {
        waypoints: waypoints
            .iter()
            .map(|wp| waypoint_to_msg(wp, frame_id))
            .collect(),
        ..Default::default()
    }
}

/// Publishes local plans on a `WaypointArray` topic
pub struct RosPlanSink {
    publisher: Publisher<WaypointArray>,
    frame_id: String,
}

impl RosPlanSink {
    /// Wraps a publisher; outgoing waypoints are stamped with `frame_id`
    pub fn new(publisher: Publisher<WaypointArray>, frame_id: &str) -> Self {
        RosPlanSink {
            publisher,
            frame_id: frame_id.to_string(),
        }
    }
}

impl PlanSink for RosPlanSink {
    fn publish(&mut self, plan: &LocalPlan) -> PlannerResult<()> {
        let msg = waypoints_to_msg(&plan.waypoints, &self.frame_id);
        self.publisher.publish(&msg)
    }
}
