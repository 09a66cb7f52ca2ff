use mockall::{mock, predicate::always, Sequence};
use velocity_planner::{
    LocalPlan, Obstacle, PlanSink, PlannerConfig, PlannerNode, VehiclePose, VelocityPlanner, Waypoint,
};
use velocity_planner::PlannerError;
use velocity_planner::PlannerResult;

mock! {
    pub Sink {}
    impl PlanSink for Sink {
        fn publish(&mut self, plan: &LocalPlan) -> PlannerResult<()>;
    }
}

fn straight_path(n: usize, speed: f64) -> Vec<Waypoint> {
    (0..n).map(|i| Waypoint::new(i as f64, 0.0, speed)).collect()
}

fn node(sink: MockSink) -> PlannerNode<MockSink> {
    let _ = env_logger::builder().is_test(true).try_init();
    PlannerNode::new(VelocityPlanner::new(PlannerConfig::default()).unwrap(), sink)
}

#[test]
fn test_nothing_is_published_before_a_pose_arrives() {
    let mut sink = MockSink::new();
    sink.expect_publish().never();
    let mut node = node(sink);

    node.inputs().set_global_path(straight_path(10, 5.0));
    assert!(!node.tick().unwrap());
    assert_eq!(node.get_status().ticks, 1);
    assert_eq!(node.get_status().plans_published, 0);
}

#[test]
fn test_nothing_is_published_without_a_path() {
    let mut sink = MockSink::new();
    sink.expect_publish().never();
    let mut node = node(sink);

    node.inputs().set_pose(VehiclePose::new(0.0, 0.0));
    assert!(!node.tick().unwrap());
}

#[test]
fn test_publishes_one_plan_per_ready_tick() {
    let mut sink = MockSink::new();
    sink.expect_publish()
        .withf(|plan: &LocalPlan| plan.len() == 10 && plan.waypoints[9].speed == 0.0)
        .times(2)
        .returning(|_| Ok(()));
    let mut node = node(sink);

    let inputs = node.inputs();
    inputs.set_pose(VehiclePose::new(0.0, 0.0));
    inputs.set_global_path(straight_path(10, 5.0));

    assert!(node.tick().unwrap());
    assert!(node.tick().unwrap());
    let status = node.get_status();
    assert_eq!(status.plans_published, 2);
    assert_eq!(status.last_plan_len, Some(10));
}

#[test]
fn test_latest_inputs_are_used_on_each_tick() {
    let mut seq = Sequence::new();
    let mut sink = MockSink::new();
    sink.expect_publish()
        .withf(|plan: &LocalPlan| plan.obstacle_stop.is_none())
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    sink.expect_publish()
        .withf(|plan: &LocalPlan| plan.obstacle_stop == Some(2) && plan.speeds()[2..].iter().all(|&s| s == 0.0))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    sink.expect_publish()
        .withf(|plan: &LocalPlan| plan.start == 3 && plan.obstacle_stop.is_none())
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    let mut node = node(sink);

    let inputs = node.inputs();
    inputs.set_pose(VehiclePose::new(0.0, 0.0));
    inputs.set_global_path(straight_path(10, 5.0));
    node.tick().unwrap();

    inputs.set_obstacles(vec![Obstacle::new(5.1, 0.0)]);
    node.tick().unwrap();

    // obstacle now sits behind the window start
    inputs.set_pose(VehiclePose::new(3.0, 0.0));
    inputs.set_obstacles(vec![Obstacle::new(1.0, 0.0)]);
    node.tick().unwrap();
}

#[test]
fn test_sink_failure_is_reported() {
    let mut sink = MockSink::new();
    sink.expect_publish()
        .with(always())
        .times(1)
        .returning(|_| Err(PlannerError::PublishError("topic closed".to_string())));
    let mut node = node(sink);

    let inputs = node.inputs();
    inputs.set_pose(VehiclePose::new(0.0, 0.0));
    inputs.set_global_path(straight_path(10, 5.0));

    assert!(matches!(node.tick(), Err(PlannerError::PublishError(_))));
    assert_eq!(node.get_status().plans_published, 0);
}

#[test]
fn test_planning_error_skips_publishing() {
    let mut sink = MockSink::new();
    sink.expect_publish().never();
    let mut node = node(sink);

    let mut path = straight_path(10, 5.0);
    path[5].orientation = nalgebra::Quaternion::new(0.0, 0.0, 0.0, 0.0);
    let inputs = node.inputs();
    inputs.set_pose(VehiclePose::new(0.0, 0.0));
    inputs.set_global_path(path);
    inputs.set_obstacles(vec![Obstacle::new(5.1, 0.0)]);

    assert!(matches!(node.tick(), Err(PlannerError::DegenerateOrientation { index: 5 })));
}
