// navigation/locator.rs

// Nearest-point lookup over path coordinates.

use nalgebra::Point2;

/// Index of the point closest to `query` by squared Euclidean distance.
/// Ties resolve to the first index. Points at a NaN distance are never selected, so an
/// empty input (or one with no comparable point) yields `None`.
pub fn nearest_index<I>(points: I, query: &Point2<f64>) -> Option<usize>
where
    I: IntoIterator<Item = Point2<f64>>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in points.into_iter().enumerate() {
        let dist_2 = (point - *query).norm_squared();
        if dist_2.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, best_dist_2)| dist_2 < best_dist_2) {
            best = Some((i, dist_2));
        }
    }
    best.map(|(i, _)| i)
}
