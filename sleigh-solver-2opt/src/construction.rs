//! Greedy nearest-neighbour tour construction.

use sleigh_core::{Point, Tour, distance};

/// Build a closed tour by always walking to the closest unvisited point.
///
/// Candidates are scanned in input order and the first one at the minimum
/// distance wins, so exact ties resolve to the earlier point. Duplicate
/// coordinates are ordinary candidates. Runs in `O(n^2)`.
///
/// # Examples
/// ```
/// use sleigh_core::Point;
/// use sleigh_solver_2opt::nearest_neighbour;
///
/// let start = Point::new(0, 0.0, 0.0);
/// let points = [Point::new(1, 5.0, 0.0), Point::new(2, 1.0, 0.0)];
/// let tour = nearest_neighbour(&start, &points);
/// assert_eq!(tour.ids(), vec![0, 2, 1, 0]);
/// ```
#[must_use]
pub fn nearest_neighbour(start: &Point, points: &[Point]) -> Tour {
    let mut remaining = points.to_vec();
    let mut order = Vec::with_capacity(points.len());
    let mut current = *start;
    while let Some(index) = nearest_index(&current, &remaining) {
        let next = remaining.remove(index);
        order.push(next);
        current = next;
    }
    log::debug!(
        "nearest-neighbour tour from point {} visits {} points",
        start.id(),
        order.len()
    );
    Tour::closed(*start, order)
}

/// Index of the first candidate closest to `from`, or `None` when empty.
fn nearest_index(from: &Point, candidates: &[Point]) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }
    let mut nearest = 0;
    let mut nearest_distance = f64::MAX;
    for (index, candidate) in candidates.iter().enumerate() {
        let candidate_distance = distance(from, candidate);
        // Strict comparison keeps the earliest of equally distant points.
        if candidate_distance < nearest_distance {
            nearest_distance = candidate_distance;
            nearest = index;
        }
    }
    Some(nearest)
}
