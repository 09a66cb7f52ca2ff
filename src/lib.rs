//! Velocity Planner - local plan extraction with bounded-deceleration stops
//!
//! This library turns the latest global path, vehicle pose and detected obstacles
//! into a short local plan whose target speeds bring the vehicle smoothly to a stop
//! at the end of the path and in front of anything blocking it.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod core;
pub mod navigation;
#[cfg(feature = "ros")]
pub mod ros_interface;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// Re-export commonly used items for easier access
pub use crate::core::{InputSnapshot, LatestInputs, LocalPlan, Obstacle, VehiclePose, Waypoint};
pub use navigation::{PlanSink, PlannerNode, VelocityPlanner};

/// Planning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Number of waypoints to plan ahead
    pub local_plan_max_length: usize,
    /// Deceleration limit in speed units per waypoint step
    pub max_acceleration: f64,
    /// Obstacles closer than this to their nearest waypoint block the path
    pub obj_waypoint_distance_threshold: f64,
    /// Number of waypoints before a blocking obstacle to stop at
    pub obj_stopping_waypoint_count: usize,
    /// Planning period in milliseconds
    pub tick_period_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            local_plan_max_length: 25,
            max_acceleration: 0.5,
            obj_waypoint_distance_threshold: 0.4,
            obj_stopping_waypoint_count: 3,
            tick_period_ms: 10,
        }
    }
}

impl PlannerConfig {
    /// Parse and validate a planner configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> PlannerResult<Self> {
        let config: PlannerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a planner configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let config_file = std::fs::File::open(path)?;
        let config: PlannerConfig = serde_yaml::from_reader(config_file)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the planner cannot work with. Nothing is clamped.
    pub fn validate(&self) -> PlannerResult<()> {
        if self.local_plan_max_length == 0 {
            return Err(PlannerError::ConfigError(
                "local_plan_max_length must be at least 1".to_string(),
            ));
        }
        if !(self.max_acceleration.is_finite() && self.max_acceleration > 0.0) {
            return Err(PlannerError::ConfigError(format!(
                "max_acceleration must be positive, got {}",
                self.max_acceleration
            )));
        }
        if !(self.obj_waypoint_distance_threshold.is_finite()
            && self.obj_waypoint_distance_threshold > 0.0)
        {
            return Err(PlannerError::ConfigError(format!(
                "obj_waypoint_distance_threshold must be positive, got {}",
                self.obj_waypoint_distance_threshold
            )));
        }
        if self.tick_period_ms == 0 {
            return Err(PlannerError::ConfigError(
                "tick_period_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration for the ROS 2 binaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// ROS 2 configuration
    pub ros_config: RosConfig,
    /// Planning parameters
    pub planner_config: PlannerConfig,
    /// Global path source used by the waypoint reader
    pub reader_config: ReaderConfig,
}

/// ROS 2 specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosConfig {
    /// Node name
    pub node_name: String,
    /// QoS history depth
    pub qos_depth: usize,
    /// Vehicle pose topic
    pub pose_topic: String,
    /// Global path topic
    pub global_waypoints_topic: String,
    /// Detected objects topic
    pub detected_objects_topic: String,
    /// Local plan output topic
    pub local_waypoints_topic: String,
    /// Frame id stamped on outgoing waypoints
    pub frame_id: String,
}

impl Default for RosConfig {
    fn default() -> Self {
        RosConfig {
            node_name: "velocity_planner".to_string(),
            qos_depth: 10,
            pose_topic: "/current_pose".to_string(),
            global_waypoints_topic: "/global_waypoints".to_string(),
            detected_objects_topic: "detected_objects".to_string(),
            local_waypoints_topic: "~/local_waypoints".to_string(),
            frame_id: "map".to_string(),
        }
    }
}

/// Waypoint reader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// CSV file holding the global path (`x`, `y`, `velocity`, optional `yaw`)
    pub waypoint_file: PathBuf,
    /// Republish period in milliseconds
    pub publish_period_ms: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            waypoint_file: PathBuf::from("paths/straight_path.csv"),
            publish_period_ms: 500,
        }
    }
}

impl NodeConfig {
    /// Load a node configuration from a YAML file, validating the planner section
    pub fn from_file<P: AsRef<Path>>(path: P) -> PlannerResult<Self> {
        let config_file = std::fs::File::open(path)?;
        let config: NodeConfig = serde_yaml::from_reader(config_file)?;
        config.planner_config.validate()?;
        if config.reader_config.publish_period_ms == 0 {
            return Err(PlannerError::ConfigError(
                "publish_period_ms must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            ros_config: RosConfig::default(),
            planner_config: PlannerConfig::default(),
            reader_config: ReaderConfig::default(),
        }
    }
}

/// Velocity planner error types
#[derive(Debug)]
pub enum PlannerError {
    /// Invalid configuration value
    ConfigError(String),
    /// File access failed
    IoError(std::io::Error),
    /// YAML or CSV content could not be parsed
    ParseError(String),
    /// Waypoint orientation has no usable heading
    DegenerateOrientation {
        /// Index of the offending waypoint within the planning window
        index: usize,
    },
    /// Plan could not be delivered
    PublishError(String),
    /// ROS 2 transport error
    RosError(String),
}

impl std::fmt::Display for PlannerError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PlannerError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            PlannerError::IoError(e) => write!(f, "I/O error: {}", e),
            PlannerError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            PlannerError::DegenerateOrientation { index } => {
                write!(f, "Waypoint {} has a zero-norm orientation", index)
            }
            PlannerError::PublishError(msg) => write!(f, "Publish error: {}", msg),
            PlannerError::RosError(msg) => write!(f, "ROS error: {}", msg),
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlannerError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(e: std::io::Error) -> Self {
        PlannerError::IoError(e)
    }
}

impl From<serde_yaml::Error> for PlannerError {
    fn from(e: serde_yaml::Error) -> Self {
        PlannerError::ParseError(e.to_string())
    }
}

impl From<csv::Error> for PlannerError {
    fn from(e: csv::Error) -> Self {
        PlannerError::ParseError(e.to_string())
    }
}

/// Result type alias for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
