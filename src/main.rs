// src/main.rs
// Entry point for the velocity planner node: subscribes to pose, global path and
// detected objects, and publishes a speed-shaped local plan every tick.

// Imports dependencies and planner modules.
// - r2r: ROS 2 bindings for node and topic management.
// - futures: local executor driving subscriptions and the planning timer.
// - env_logger: Logging for debugging.
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use log::{error, info, warn};
use r2r::geometry_msgs::msg::PoseWithCovarianceStamped;
use r2r::mcav_interfaces::msg::{DetectedObjectArray, WaypointArray};
use r2r::{Context, Node, QosProfile};
use std::error::Error;
use std::time::Duration;
use velocity_planner::ros_interface::{
    obstacles_from_msg, path_from_msg, pose_from_msg, subscribe_latest, Publisher, RosPlanSink,
};
use velocity_planner::{NodeConfig, PlannerNode, VelocityPlanner};

/// Loads configuration from the first argument if given, otherwise uses defaults.
fn load_config() -> Result<NodeConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            Ok(NodeConfig::from_file(path)?)
        }
        None => Ok(NodeConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging for debugging
    env_logger::init();
    info!("Starting velocity planner...");

    let config = load_config()?;
    let ros = &config.ros_config;
    let planner = VelocityPlanner::new(config.planner_config.clone())?;
    info!("Planner configuration: {:?}", planner.config());

    // Create ROS 2 context and node
    let ctx = Context::create()?;
    let mut node = Node::create(ctx, &ros.node_name, "")?;
    let qos = QosProfile::default().keep_last(ros.qos_depth);
    info!("ROS 2 node initialized");

    let publisher = Publisher::<WaypointArray>::new(&mut node, &ros.local_waypoints_topic, qos.clone())?;
    info!("Publishing to {}", ros.local_waypoints_topic);
    let mut planner_node = PlannerNode::new(planner, RosPlanSink::new(publisher, &ros.frame_id));

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();

    subscribe_latest::<PoseWithCovarianceStamped, _>(
        &mut node,
        &spawner,
        &ros.pose_topic,
        qos.clone(),
        planner_node.inputs(),
        |inputs, msg| inputs.set_pose(pose_from_msg(&msg)),
    )?;
    subscribe_latest::<WaypointArray, _>(
        &mut node,
        &spawner,
        &ros.global_waypoints_topic,
        qos.clone(),
        planner_node.inputs(),
        |inputs, msg| match path_from_msg(&msg) {
            Ok(path) => inputs.set_global_path(path),
            Err(e) => warn!("Ignoring global path: {}", e),
        },
    )?;
    subscribe_latest::<DetectedObjectArray, _>(
        &mut node,
        &spawner,
        &ros.detected_objects_topic,
        qos,
        planner_node.inputs(),
        |inputs, msg| inputs.set_obstacles(obstacles_from_msg(&msg)),
    )?;

    // Planning tick
    let tick_period = Duration::from_millis(config.planner_config.tick_period_ms);
    let mut timer = node.create_wall_timer(tick_period)?;
    spawner.spawn_local(async move {
        loop {
            if let Err(e) = timer.tick().await {
                error!("Planning timer failed: {}", e);
                break;
            }
            if let Err(e) = planner_node.tick() {
                error!("Planning tick failed: {}", e);
            }
        }
    })?;
    info!("Planning every {:?}", tick_period);

    // Main loop: spin the node and run whatever became ready
    loop {
        node.spin_once(Duration::from_millis(10));
        pool.run_until_stalled();
    }
}
