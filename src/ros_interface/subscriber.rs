// src/ros_interface/subscriber.rs
// Turns ROS 2 subscriptions into last-write-wins updates of the planner inputs.

use futures::future;
use futures::stream::StreamExt;
use futures::task::LocalSpawnExt;
use futures::executor::LocalSpawner;
use log::info;
use r2r::{Node, QosProfile};
use std::sync::Arc;

use crate::core::LatestInputs;
use crate::PlannerResult;

/// Subscribes to `topic` and applies every message to the shared inputs.
/// - `node`: ROS 2 node owning the subscription.
/// - `spawner`: executor the message loop runs on; it must be driven alongside `spin_once`.
/// - `apply`: stores the converted message, replacing the previous value.
pub fn subscribe_latest<T, F>(
    node: &mut Node,
    spawner: &LocalSpawner,
    topic: &str,
    qos: QosProfile,
    inputs: Arc<LatestInputs>,
    apply: F,
) -> PlannerResult<()>
where
    T: r2r::WrappedTypesupport + 'static,
    F: Fn(&LatestInputs, T) + 'static,
{
    let stream = node.subscribe::<T>(topic, qos)?;
    spawner.spawn_local(async move {
        stream
            .for_each(|msg| {
                apply(&inputs, msg);
                future::ready(())
            })
            .await
    })?;
    info!("Subscribed to {}", topic);
    Ok(())
}
