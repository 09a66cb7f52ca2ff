// navigation/profile.rs

// Deceleration profile: rewrites target speeds so the vehicle slows at a constant
// rate per waypoint and is stationary from the stop index onward.

use crate::core::Waypoint;

/// Returns a copy of `window` slowed to a stop at `stop_index`.
///
/// The ramp ceiling is the highest speed in the window. Walking back from the stop
/// index, each waypoint is limited to `(stop_index - i) * max_acceleration` over at most
/// `ceil(cruise / max_acceleration)` waypoints, and every waypoint from the stop index
/// onward is set to zero. Speeds are only ever lowered, so repeated passes compose by
/// taking the minimum.
///
/// An empty window is returned unchanged. A stop index at or past the end is valid;
/// only in-bounds waypoints are touched. `max_acceleration` must be positive, which
/// [`PlannerConfig::validate`](crate::PlannerConfig::validate) guarantees.
pub fn slow_to_stop(window: &[Waypoint], stop_index: usize, max_acceleration: f64) -> Vec<Waypoint> {
    let mut slowed = window.to_vec();
    let Some(cruise_speed) = window.iter().map(|wp| wp.speed).reduce(f64::max) else {
        return slowed;
    };

    let slowing_count = ((cruise_speed / max_acceleration).ceil() as usize).min(slowed.len());
    let first_slowed = stop_index.saturating_add(1).saturating_sub(slowing_count);

    for (i, wp) in slowed
        .iter_mut()
        .enumerate()
        .take(stop_index.saturating_add(1))
        .skip(first_slowed)
    {
        let ramp_speed = (stop_index - i) as f64 * max_acceleration;
        wp.speed = wp.speed.min(cruise_speed).min(ramp_speed);
    }

    for wp in slowed.iter_mut().skip(stop_index) {
        wp.speed = 0.0;
    }

    slowed
}
