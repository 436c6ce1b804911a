//! Planar points and the Euclidean distance between them.

use geo::Coord;

/// An immutable location in the plane tagged with an identifier.
///
/// The identifier is carried for reporting only. Distances, and therefore
/// every ordering decision a solver makes, depend on the coordinates alone.
///
/// # Examples
/// ```
/// use sleigh_core::Point;
///
/// let house = Point::new(7, 3.4350, 6.4450);
/// assert_eq!(house.id(), 7);
/// assert_eq!(house.x(), 3.4350);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    id: u64,
    #[cfg_attr(feature = "serde", serde(flatten))]
    location: Coord<f64>,
}

impl Point {
    /// Construct a point from an identifier and raw coordinates.
    #[must_use]
    pub const fn new(id: u64, x: f64, y: f64) -> Self {
        Self::at(id, Coord { x, y })
    }

    /// Construct a point at an existing coordinate.
    #[must_use]
    pub const fn at(id: u64, location: Coord<f64>) -> Self {
        Self { id, location }
    }

    /// Identifier supplied by the caller.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.location.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.location.y
    }

    /// Position as a `geo` coordinate.
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.location.x.is_finite() && self.location.y.is_finite()
    }

    /// Euclidean distance to `other`. See [`distance`].
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance(self, other)
    }
}

/// Euclidean distance between two points.
///
/// Symmetric, non-negative and zero exactly when the coordinates coincide,
/// whatever the identifiers.
///
/// # Examples
/// ```
/// use sleigh_core::{Point, distance};
///
/// let origin = Point::new(0, 0.0, 0.0);
/// let corner = Point::new(1, 3.0, 4.0);
/// assert_eq!(distance(&origin, &corner), 5.0);
/// assert_eq!(distance(&corner, &origin), 5.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "Euclidean distance is floating-point by definition"
)]
pub fn distance(p: &Point, q: &Point) -> f64 {
    let dx = p.x() - q.x();
    let dy = p.y() - q.y();
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::float_arithmetic,
        reason = "tests compare distances within a tolerance"
    )]

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Point::new(0, 0.0, 0.0), Point::new(1, 3.0, 4.0), 5.0)]
    #[case(Point::new(0, -1.0, -1.0), Point::new(1, 2.0, 3.0), 5.0)]
    #[case(Point::new(0, 1.5, 2.5), Point::new(1, 1.5, 2.5), 0.0)]
    fn distance_matches_pythagoras(#[case] p: Point, #[case] q: Point, #[case] expected: f64) {
        assert!((distance(&p, &q) - expected).abs() < 1e-12);
    }

    #[rstest]
    fn distance_is_symmetric() {
        let p = Point::new(1, 3.4350, 6.4450);
        let q = Point::new(2, 3.4370, 6.4470);
        assert_eq!(distance(&p, &q).to_bits(), distance(&q, &p).to_bits());
    }

    #[rstest]
    fn distinct_ids_do_not_affect_distance() {
        let p = Point::new(1, 2.0, 2.0);
        let q = Point::new(99, 2.0, 2.0);
        assert_eq!(distance(&p, &q), 0.0);
        assert_ne!(p, q);
    }

    #[rstest]
    fn triangle_inequality_holds() {
        let a = Point::new(0, 0.0, 0.0);
        let b = Point::new(1, 1.0, 5.0);
        let c = Point::new(2, 4.0, -2.0);
        assert!(distance(&a, &c) <= distance(&a, &b) + distance(&b, &c));
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    #[case(f64::NEG_INFINITY, 1.0)]
    fn non_finite_points_are_flagged(#[case] x: f64, #[case] y: f64) {
        assert!(!Point::new(0, x, y).is_finite());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_flat_record() {
        let point = Point::new(4, 1.0, 2.0);
        let json = serde_json::to_value(point).expect("serialise point");
        assert_eq!(json, serde_json::json!({ "id": 4, "x": 1.0, "y": 2.0 }));
        let back: Point = serde_json::from_value(json).expect("deserialise point");
        assert_eq!(back, point);
    }
}
