//! Request/response boundary shared by tour solvers.

use std::collections::HashSet;
use std::time::Duration;

use thiserror::Error;

use crate::{Point, Tour};

/// Parameters for a solve request.
///
/// The request names the start point the tour opens and closes with and the
/// points to visit in between. The start must not be repeated in `points`.
///
/// # Examples
/// ```rust
/// use sleigh_core::{Point, SolveRequest};
///
/// let request = SolveRequest {
///     start: Point::new(0, 0.0, 0.0),
///     points: vec![Point::new(1, 1.0, 0.0), Point::new(2, 0.0, 1.0)],
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Origin of the tour.
    pub start: Point,
    /// Points to visit exactly once.
    #[cfg_attr(feature = "serde", serde(default))]
    pub points: Vec<Point>,
}

/// Reasons a [`SolveRequest`] is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveRequestValidationError {
    /// A coordinate was NaN or infinite.
    #[error("point {id} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Identifier of the offending point.
        id: u64,
    },
    /// The start point's identifier also appears among the points to visit.
    #[error("start point {id} must not be listed among the points to visit")]
    StartInPoints {
        /// Identifier shared by the start and a visited point.
        id: u64,
    },
    /// Two points to visit share an identifier.
    #[error("point id {id} appears more than once")]
    DuplicateId {
        /// The repeated identifier.
        id: u64,
    },
}

impl SolveRequest {
    /// Validate the request, collapsing failures into [`SolveError`].
    ///
    /// # Errors
    /// Returns [`SolveError::InvalidRequest`] describing the first problem.
    pub fn validate(&self) -> Result<(), SolveError> {
        self.validate_detailed().map_err(SolveError::InvalidRequest)
    }

    /// Validate the request and report exactly what is wrong with it.
    ///
    /// Solvers never check their input themselves; callers run this first.
    ///
    /// # Errors
    /// Returns the first [`SolveRequestValidationError`] found, checking the
    /// start point before the points in input order.
    pub fn validate_detailed(&self) -> Result<(), SolveRequestValidationError> {
        if !self.start.is_finite() {
            return Err(SolveRequestValidationError::NonFiniteCoordinate {
                id: self.start.id(),
            });
        }
        let mut seen = HashSet::with_capacity(self.points.len());
        for point in &self.points {
            let id = point.id();
            if !point.is_finite() {
                return Err(SolveRequestValidationError::NonFiniteCoordinate { id });
            }
            if id == self.start.id() {
                return Err(SolveRequestValidationError::StartInPoints { id });
            }
            if !seen.insert(id) {
                return Err(SolveRequestValidationError::DuplicateId { id });
            }
        }
        Ok(())
    }
}

/// Search statistics reported alongside a solution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Length of the greedy tour before refinement.
    pub initial_distance: f64,
    /// Full refinement passes performed, including the final quiet one.
    pub passes: usize,
    /// Improving swaps applied.
    pub swaps: usize,
    /// Whether refinement stopped because no improving swap remained.
    pub converged: bool,
    /// Wall-clock time spent solving.
    pub solve_time: Duration,
}

/// Response from a successful solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResponse {
    /// The closed tour in visiting order.
    pub tour: Tour,
    /// Length of `tour`.
    pub total_distance: f64,
    /// How the search went.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Request parameters were invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] SolveRequestValidationError),
}

/// Find a short closed tour through the requested points.
///
/// Implementations return [`SolveError::InvalidRequest`] for malformed
/// requests rather than panicking. Solvers must be `Send + Sync` so separate
/// threads can share one instance; each call owns its working tour.
pub trait Solver: Send + Sync {
    /// Solve a request, producing a tour or an error.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError>;
}

#[cfg(test)]
mod tests {
    #![expect(
        clippy::float_arithmetic,
        reason = "tests compare distances within a tolerance"
    )]

    use super::*;
    use rstest::rstest;

    struct StraightLineSolver;

    impl Solver for StraightLineSolver {
        fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
            request.validate()?;
            let tour = Tour::closed(request.start, request.points.clone());
            let total_distance = tour.total_distance();
            Ok(SolveResponse {
                tour,
                total_distance,
                diagnostics: Diagnostics {
                    initial_distance: total_distance,
                    passes: 0,
                    swaps: 0,
                    converged: true,
                    solve_time: Duration::ZERO,
                },
            })
        }
    }

    fn request(points: Vec<Point>) -> SolveRequest {
        SolveRequest {
            start: Point::new(0, 0.0, 0.0),
            points,
        }
    }

    #[rstest]
    fn returns_response_on_valid_request() {
        let response = StraightLineSolver
            .solve(&request(vec![Point::new(1, 3.0, 4.0)]))
            .expect("valid request");
        assert_eq!(response.tour.ids(), vec![0, 1, 0]);
        assert!((response.total_distance - 10.0).abs() < 1e-12);
    }

    #[rstest]
    fn empty_point_set_is_valid() {
        assert_eq!(request(Vec::new()).validate_detailed(), Ok(()));
    }

    #[rstest]
    #[case::nan_x(Point::new(3, f64::NAN, 0.0))]
    #[case::infinite_y(Point::new(3, 0.0, f64::INFINITY))]
    fn rejects_non_finite_points(#[case] bad: Point) {
        let err = request(vec![Point::new(1, 1.0, 1.0), bad])
            .validate_detailed()
            .expect_err("non-finite point");
        assert_eq!(err, SolveRequestValidationError::NonFiniteCoordinate { id: 3 });
    }

    #[rstest]
    fn rejects_non_finite_start() {
        let request = SolveRequest {
            start: Point::new(0, f64::NAN, 0.0),
            points: Vec::new(),
        };
        let err = request.validate().expect_err("non-finite start");
        assert_eq!(
            err,
            SolveError::InvalidRequest(SolveRequestValidationError::NonFiniteCoordinate { id: 0 })
        );
    }

    #[rstest]
    fn rejects_start_repeated_among_points() {
        let err = request(vec![Point::new(0, 0.0, 0.0)])
            .validate_detailed()
            .expect_err("start listed twice");
        assert_eq!(err, SolveRequestValidationError::StartInPoints { id: 0 });
    }

    #[rstest]
    fn rejects_duplicate_ids() {
        let err = request(vec![Point::new(5, 1.0, 0.0), Point::new(5, 2.0, 0.0)])
            .validate_detailed()
            .expect_err("duplicate id");
        assert_eq!(err, SolveRequestValidationError::DuplicateId { id: 5 });
    }

    #[rstest]
    fn duplicate_coordinates_are_allowed() {
        let points = vec![Point::new(1, 1.0, 1.0), Point::new(2, 1.0, 1.0)];
        assert!(request(points).validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn request_points_default_to_empty() {
        let json = r#"{ "start": { "id": 0, "x": 1.0, "y": 2.0 } }"#;
        let decoded: SolveRequest = serde_json::from_str(json).expect("decode request");
        assert!(decoded.points.is_empty());
        assert_eq!(decoded.start, Point::new(0, 1.0, 2.0));
    }
}
