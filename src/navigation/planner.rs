// src/navigation/planner.rs
// Builds one local plan per tick from a snapshot of the latest inputs.

use log::debug;

use super::obstacles::find_blocking_indices;
use super::profile::slow_to_stop;
use super::locator::nearest_index;
use crate::core::{InputSnapshot, LocalPlan};
use crate::{PlannerConfig, PlannerResult};

/// Planner that slices the global path ahead of the vehicle and shapes its speeds.
#[derive(Debug, Clone)]
pub struct VelocityPlanner {
    config: PlannerConfig,
}

impl VelocityPlanner {
    /// Creates a planner, rejecting invalid configuration.
    pub fn new(config: PlannerConfig) -> PlannerResult<Self> {
        config.validate()?;
        Ok(VelocityPlanner { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans from `inputs`.
    /// - Returns `Ok(None)` until a pose has arrived and the global path is non-empty.
    /// - The whole global path is first slowed to stop at its last waypoint, then the
    ///   window starting at the waypoint nearest the vehicle is cut out and slowed again
    ///   in front of the closest blocking obstacle, if any.
    pub fn plan(&self, inputs: &InputSnapshot) -> PlannerResult<Option<LocalPlan>> {
        let Some(pose) = inputs.pose else {
            debug!("No pose received yet, skipping tick");
            return Ok(None);
        };
        let global_path = inputs.global_path.as_slice();
        let Some(nearest) = nearest_index(global_path.iter().map(|wp| wp.position), &pose.position)
        else {
            debug!("Global path is empty, skipping tick");
            return Ok(None);
        };

        // Stop at the end of the global path
        let slowed_global = slow_to_stop(global_path, global_path.len() - 1, self.config.max_acceleration);

        let end = nearest
            .saturating_add(self.config.local_plan_max_length)
            .min(slowed_global.len());
        let mut waypoints = slowed_global[nearest..end].to_vec();

        // Stop for the closest blocking obstacle
        let stopping_indices = find_blocking_indices(
            &waypoints,
            &inputs.obstacles,
            self.config.obj_waypoint_distance_threshold,
            self.config.obj_stopping_waypoint_count,
        )?;
        let obstacle_stop = stopping_indices.into_iter().min();
        if let Some(stop_index) = obstacle_stop {
            waypoints = slow_to_stop(&waypoints, stop_index, self.config.max_acceleration);
        }

        Ok(Some(LocalPlan {
            start: nearest,
            waypoints,
            obstacle_stop,
        }))
    }
}
