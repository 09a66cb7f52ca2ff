// src/navigation/node.rs
// Drives the planner once per tick and hands each plan to a sink.

use log::debug;
use std::sync::Arc;

use super::planner::VelocityPlanner;
use crate::PlannerResult;
use crate::core::{LatestInputs, LocalPlan};

/// Destination for emitted local plans (a ROS publisher in production).
pub trait PlanSink {
    /// Delivers one plan
    fn publish(&mut self, plan: &LocalPlan) -> PlannerResult<()>;
}

/// Planning loop state: shared inputs, planner and output sink.
pub struct PlannerNode<S> {
    planner: VelocityPlanner,
    inputs: Arc<LatestInputs>,
    sink: S,
    status: NodeStatus,
}

/// Tick counters
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeStatus {
    /// Ticks run so far
    pub ticks: u64,
    /// Plans handed to the sink
    pub plans_published: u64,
    /// Length of the last published plan
    pub last_plan_len: Option<usize>,
}

impl<S: PlanSink> PlannerNode<S> {
    /// Creates a node with an empty input store.
    pub fn new(planner: VelocityPlanner, sink: S) -> Self {
        PlannerNode {
            planner,
            inputs: Arc::new(LatestInputs::new()),
            sink,
            status: NodeStatus::default(),
        }
    }

    /// Handle for input producers to update pose, path and obstacles.
    pub fn inputs(&self) -> Arc<LatestInputs> {
        Arc::clone(&self.inputs)
    }

    /// Runs one planning cycle on a consistent snapshot of the inputs.
    /// Returns whether a plan was published. Nothing is published when the inputs are
    /// not ready yet or when planning fails.
    pub fn tick(&mut self) -> PlannerResult<bool> {
        self.status.ticks += 1;
        let snapshot = self.inputs.snapshot();
        let Some(plan) = self.planner.plan(&snapshot)? else {
            return Ok(false);
        };

        self.sink.publish(&plan)?;
        debug!(
            "Published local plan: start={}, len={}, obstacle_stop={:?}",
            plan.start,
            plan.len(),
            plan.obstacle_stop
        );
        self.status.plans_published += 1;
        self.status.last_plan_len = Some(plan.len());
        Ok(true)
    }

    /// Current counters
    pub fn get_status(&self) -> NodeStatus {
        self.status
    }
}
