//! Fixtures and assertions shared by solver tests.
//!
//! Available to this crate's unit tests and, through the `test-support`
//! feature, to dependent crates.

use std::collections::HashMap;

use crate::{Point, SolveRequest, Tour};

/// Start point at the origin with id `0`.
#[must_use]
pub const fn origin() -> Point {
    Point::new(0, 0.0, 0.0)
}

/// The other three corners of the unit square with ids `1..=3`.
///
/// From the origin, `(1,0)` and `(0,1)` are tied nearest; `(1,0)` is listed
/// first so the greedy builder walks the perimeter counter-clockwise. For a
/// self-crossing starting tour use [`crossed_square_tour`].
#[must_use]
pub fn unit_square_corners() -> Vec<Point> {
    vec![
        Point::new(1, 1.0, 0.0),
        Point::new(2, 1.0, 1.0),
        Point::new(3, 0.0, 1.0),
    ]
}

/// A square tour that crosses itself: `(0,0) (1,0) (0,1) (1,1) (0,0)`.
///
/// Its length is `2 + 2 * sqrt(2)`; the perimeter is `4`.
#[must_use]
pub fn crossed_square_tour() -> Tour {
    Tour::closed(
        origin(),
        vec![
            Point::new(1, 1.0, 0.0),
            Point::new(3, 0.0, 1.0),
            Point::new(2, 1.0, 1.0),
        ],
    )
}

/// Request visiting the unit square corners from the origin.
#[must_use]
pub fn unit_square_request() -> SolveRequest {
    SolveRequest {
        start: origin(),
        points: unit_square_corners(),
    }
}

/// Points spread along a line, with ids `1..=count` and unit spacing.
#[must_use]
pub fn points_on_line(count: u32) -> Vec<Point> {
    (1..=count)
        .map(|i| Point::new(u64::from(i), f64::from(i), 0.0))
        .collect()
}

/// Describe why `tour` is not a valid closed tour of `start` and `points`.
///
/// Returns `None` when the tour has length `points.len() + 2`, opens and
/// closes with `start`, and visits every point exactly once in between.
#[must_use]
pub fn tour_violation(tour: &Tour, start: &Point, points: &[Point]) -> Option<String> {
    let expected_len = points.len().saturating_add(2);
    if tour.len() != expected_len {
        return Some(format!(
            "expected {expected_len} entries, found {}",
            tour.len()
        ));
    }
    if tour.points().first() != Some(start) || tour.points().last() != Some(start) {
        return Some(format!("tour {:?} is not anchored at {}", tour.ids(), start.id()));
    }
    let mut remaining: HashMap<u64, usize> = HashMap::new();
    for point in points {
        *remaining.entry(point.id()).or_default() += 1;
    }
    for point in tour.interior() {
        match remaining.get_mut(&point.id()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return Some(format!("unexpected or repeated point {}", point.id())),
        }
    }
    None
}
