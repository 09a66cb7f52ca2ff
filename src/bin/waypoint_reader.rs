// src/bin/waypoint_reader.rs
// Reads the global path from CSV and republishes it periodically for the planner.

use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use log::{error, info};
use r2r::mcav_interfaces::msg::WaypointArray;
use r2r::{Context, Node, QosProfile};
use std::error::Error;
use std::time::Duration;
use velocity_planner::core::waypoints::load_csv;
use velocity_planner::ros_interface::{waypoints_to_msg, Publisher};
use velocity_planner::NodeConfig;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => NodeConfig::from_file(path)?,
        None => NodeConfig::default(),
    };
    let ros = &config.ros_config;
    let reader = &config.reader_config;

    let waypoints = load_csv(&reader.waypoint_file)?;
    let msg = waypoints_to_msg(&waypoints, &ros.frame_id);

    let ctx = Context::create()?;
    let mut node = Node::create(ctx, "waypoint_reader", "")?;
    let qos = QosProfile::default().keep_last(ros.qos_depth);
    let publisher = Publisher::<WaypointArray>::new(&mut node, &ros.global_waypoints_topic, qos)?;
    info!("Publishing {} waypoints on {}", waypoints.len(), ros.global_waypoints_topic);

    let mut pool = LocalPool::new();
    let mut timer = node.create_wall_timer(Duration::from_millis(reader.publish_period_ms))?;
    pool.spawner().spawn_local(async move {
        while timer.tick().await.is_ok() {
            if let Err(e) = publisher.publish(&msg) {
                error!("Failed to publish waypoints: {}", e);
            }
        }
        error!("Publish timer stopped");
    })?;

    loop {
        node.spin_once(Duration::from_millis(100));
        pool.run_until_stalled();
    }
}
