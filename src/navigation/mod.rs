//! Planning engine for the velocity planner
//!
//! This module locates the vehicle on the global path, detects obstacles blocking
//! the path ahead and shapes target speeds into bounded-deceleration stops.

pub mod locator;
pub mod node;
pub mod obstacles;
pub mod planner;
pub mod profile;

pub use locator::nearest_index;
pub use node::{NodeStatus, PlanSink, PlannerNode};
pub use obstacles::find_blocking_indices;
pub use planner::VelocityPlanner;
pub use profile::slow_to_stop;
