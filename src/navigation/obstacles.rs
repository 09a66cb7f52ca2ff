// navigation/obstacles.rs

// Decides which obstacles block the path. An obstacle blocks when its nearest
// waypoint is within the distance threshold and the obstacle lies on the side of
// that waypoint the vehicle reaches next (ahead along the waypoint heading).

use log::debug;

use super::locator::nearest_index;
use crate::core::geometry::forward_direction;
use crate::core::{Obstacle, Waypoint};
use crate::{PlannerError, PlannerResult};

/// Stop indices contributed by blocking obstacles, one per blocking obstacle.
///
/// Each blocking obstacle contributes the index `stopping_offset` waypoints before its
/// nearest waypoint, clamped at 0. Obstacles at or beyond `distance_threshold` from the
/// path, or behind their nearest waypoint, contribute nothing.
///
/// Fails with [`PlannerError::DegenerateOrientation`] when a waypoint that has to be
/// classified carries a zero-norm orientation.
pub fn find_blocking_indices(
    window: &[Waypoint],
    obstacles: &[Obstacle],
    distance_threshold: f64,
    stopping_offset: usize,
) -> PlannerResult<Vec<usize>> {
    let mut stopping_indices = Vec::new();

    for obstacle in obstacles {
        let Some(nearest) = nearest_index(window.iter().map(|wp| wp.position), &obstacle.position)
        else {
            break;
        };
        let waypoint = &window[nearest];
        let wp_obj_vec = obstacle.position - waypoint.position;
        let distance_to_path = wp_obj_vec.norm();
        if distance_to_path >= distance_threshold {
            continue;
        }

        let forward = forward_direction(&waypoint.orientation)
            .ok_or(PlannerError::DegenerateOrientation { index: nearest })?;
        if forward.dot(&wp_obj_vec) >= 0.0 {
            let stopping_index = nearest.saturating_sub(stopping_offset);
            debug!(
                "Obstacle at ({:.2}, {:.2}) blocks waypoint {} ({:.2} away), stopping at {}",
                obstacle.position.x, obstacle.position.y, nearest, distance_to_path, stopping_index
            );
            stopping_indices.push(stopping_index);
        }
    }

    Ok(stopping_indices)
}
