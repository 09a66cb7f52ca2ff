use rstest::rstest;
use velocity_planner::core::geometry::yaw_to_quaternion;
use velocity_planner::{InputSnapshot, LocalPlan, Obstacle, PlannerConfig, VehiclePose, VelocityPlanner, Waypoint};

const EPS: f64 = 1e-9;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// Waypoints one unit apart along +x, all facing +x
fn straight_path(n: usize, speed: f64) -> Vec<Waypoint> {
    (0..n).map(|i| Waypoint::new(i as f64, 0.0, speed)).collect()
}

fn planner(config: PlannerConfig) -> VelocityPlanner {
    VelocityPlanner::new(config).unwrap()
}

fn plan(config: PlannerConfig, pose: VehiclePose, path: Vec<Waypoint>, obstacles: Vec<Obstacle>) -> LocalPlan {
    init_logging();
    planner(config)
        .plan(&InputSnapshot::new(Some(pose), path, obstacles))
        .unwrap()
        .expect("inputs are complete, a plan is expected")
}

#[test]
fn test_stops_at_end_of_path() {
    let plan = plan(PlannerConfig::default(), VehiclePose::new(0.0, 0.0), straight_path(10, 5.0), vec![]);

    assert_eq!(plan.len(), 10);
    assert_eq!(plan.start, 0);
    assert_eq!(plan.obstacle_stop, None);
    let speeds = plan.speeds();
    assert_eq!(speeds[9], 0.0);
    for (i, speed) in speeds.iter().enumerate() {
        let ramp = (9 - i) as f64 * 0.5;
        assert!(*speed <= ramp + EPS, "waypoint {i}: {speed} > {ramp}");
        assert!((speed - ramp.min(5.0)).abs() < EPS);
    }
}

#[test]
fn test_far_from_end_keeps_cruise_speed() {
    let plan = plan(PlannerConfig::default(), VehiclePose::new(0.0, 0.0), straight_path(40, 5.0), vec![]);

    // only the last ceil(5.0 / 0.5) = 10 global waypoints are slowed, none of them in the window
    assert_eq!(plan.len(), 25);
    assert!(plan.speeds().iter().all(|&s| s == 5.0));
}

#[test]
fn test_stops_before_obstacle_ahead() {
    let plan = plan(
        PlannerConfig::default(),
        VehiclePose::new(0.0, 0.0),
        straight_path(10, 5.0),
        vec![Obstacle::new(5.1, 0.0)],
    );

    assert_eq!(plan.obstacle_stop, Some(2));
    let speeds = plan.speeds();
    assert!(speeds[2..].iter().all(|&s| s == 0.0));
    // end-of-path ramp gives 4.5 and 4.0; the obstacle ramp limits them to 1.0 and 0.5
    assert!((speeds[0] - 1.0).abs() < EPS);
    assert!((speeds[1] - 0.5).abs() < EPS);
}

#[test]
fn test_obstacle_behind_waypoint_is_ignored() {
    let plan = plan(
        PlannerConfig::default(),
        VehiclePose::new(0.0, 0.0),
        straight_path(40, 5.0),
        vec![Obstacle::new(4.9, 0.0)],
    );

    assert_eq!(plan.obstacle_stop, None);
    assert!(plan.speeds().iter().all(|&s| s == 5.0));
}

#[test]
fn test_closest_blocking_obstacle_wins() {
    let plan = plan(
        PlannerConfig::default(),
        VehiclePose::new(0.0, 0.0),
        straight_path(30, 2.0),
        vec![Obstacle::new(12.0, 0.1), Obstacle::new(8.0, -0.1), Obstacle::new(20.0, 0.0)],
    );

    assert_eq!(plan.obstacle_stop, Some(5));
    let speeds = plan.speeds();
    assert!(speeds[5..].iter().all(|&s| s == 0.0));
    assert!((speeds[4] - 0.5).abs() < EPS);
    assert_eq!(speeds[0], 2.0);
}

#[test]
fn test_obstacle_indices_are_relative_to_the_window() {
    let plan = plan(
        PlannerConfig::default(),
        VehiclePose::new(10.2, 0.0),
        straight_path(60, 2.0),
        vec![Obstacle::new(18.1, 0.0)],
    );

    assert_eq!(plan.start, 10);
    // global waypoint 18 is window index 8
    assert_eq!(plan.obstacle_stop, Some(5));
    assert_eq!(plan.waypoints[5].position.x, 15.0);
}

#[test]
fn test_obstacle_near_path_end_keeps_both_ramps() {
    // Obstacle at the second-to-last waypoint: the two stops overlap and the
    // lower of the two ramps must govern every waypoint.
    let plan = plan(
        PlannerConfig {
            obj_stopping_waypoint_count: 1,
            ..PlannerConfig::default()
        },
        VehiclePose::new(0.0, 0.0),
        straight_path(12, 1.0),
        vec![Obstacle::new(10.1, 0.0)],
    );

    assert_eq!(plan.obstacle_stop, Some(9));
    let speeds = plan.speeds();
    for (i, speed) in speeds.iter().enumerate() {
        let end_ramp = (11 - i) as f64 * 0.5;
        let obstacle_ramp = if i >= 9 { 0.0 } else { (9 - i) as f64 * 0.5 };
        assert!(*speed <= end_ramp.min(obstacle_ramp).min(1.0) + EPS, "waypoint {i}");
    }
    assert!((speeds[8] - 0.5).abs() < EPS);
    assert!((speeds[7] - 1.0).abs() < EPS);
    assert!(speeds[9..].iter().all(|&s| s == 0.0));
}

#[test]
fn test_blocking_respects_waypoint_heading() {
    // Path runs along +y; an obstacle displaced along +y is ahead, along -y behind
    let path: Vec<Waypoint> = (0..30)
        .map(|i| Waypoint::new(0.0, i as f64, 3.0).with_orientation(yaw_to_quaternion(std::f64::consts::FRAC_PI_2)))
        .collect();

    let ahead = plan(PlannerConfig::default(), VehiclePose::new(0.0, 0.0), path.clone(), vec![Obstacle::new(0.0, 10.2)]);
    assert_eq!(ahead.obstacle_stop, Some(7));

    let behind = plan(PlannerConfig::default(), VehiclePose::new(0.0, 0.0), path, vec![Obstacle::new(0.0, 9.8)]);
    assert_eq!(behind.obstacle_stop, None);
}

#[test]
fn test_missing_pose_yields_no_plan() {
    init_logging();
    let inputs = InputSnapshot::new(None, straight_path(10, 5.0), vec![Obstacle::new(5.1, 0.0)]);
    assert_eq!(planner(PlannerConfig::default()).plan(&inputs).unwrap(), None);
}

#[rstest]
#[case(1, 0.0)]
#[case(5, 3.0)]
#[case(25, 0.0)]
#[case(25, 47.0)]
#[case(100, 12.0)]
#[case(7, 49.0)]
fn test_plan_length_is_bounded(#[case] max_length: usize, #[case] pose_x: f64) {
    let config = PlannerConfig {
        local_plan_max_length: max_length,
        ..PlannerConfig::default()
    };
    let path = straight_path(50, 4.0);
    let plan = plan(config, VehiclePose::new(pose_x, 0.0), path.clone(), vec![]);

    assert!(plan.len() <= max_length);
    assert!(plan.start + plan.len() <= path.len());
    assert_eq!(plan.len(), max_length.min(path.len() - plan.start));
    for (offset, wp) in plan.waypoints.iter().enumerate() {
        assert_eq!(wp.position, path[plan.start + offset].position);
    }
}
