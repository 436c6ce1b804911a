//! Solve orchestration: construction, refinement and measurement.

use std::time::Instant;

use sleigh_core::{Diagnostics, Point, SolveError, SolveRequest, SolveResponse, Solver, Tour};

use crate::construction::nearest_neighbour;
use crate::refine::{RefineConfig, two_opt};

/// A fixed point set and start point, solved on demand.
///
/// The solver keeps its inputs for its whole lifetime and nothing else:
/// every call to [`TourSolver::solve`] starts afresh and returns the same
/// tour for the same inputs.
///
/// # Examples
/// ```
/// use sleigh_core::Point;
/// use sleigh_solver_2opt::TourSolver;
///
/// let start = Point::new(0, 0.0, 0.0);
/// let houses = vec![
///     Point::new(1, 1.0, 0.0),
///     Point::new(2, 1.0, 1.0),
///     Point::new(3, 0.0, 1.0),
/// ];
/// let (tour, distance) = TourSolver::new(start, houses).solve();
/// assert_eq!(tour.len(), 5);
/// assert!((distance - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct TourSolver {
    start: Point,
    points: Vec<Point>,
    config: RefineConfig,
}

impl TourSolver {
    /// Construct a solver with the default refinement configuration.
    #[must_use]
    pub fn new(start: Point, points: Vec<Point>) -> Self {
        Self::with_config(start, points, RefineConfig::default())
    }

    /// Construct a solver with explicit refinement configuration.
    #[must_use]
    pub const fn with_config(start: Point, points: Vec<Point>, config: RefineConfig) -> Self {
        Self {
            start,
            points,
            config,
        }
    }

    /// The point every tour opens and closes with.
    #[must_use]
    pub const fn start(&self) -> &Point {
        &self.start
    }

    /// The points to visit, in input order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Build, refine and measure a tour.
    #[must_use]
    pub fn solve(&self) -> (Tour, f64) {
        let response = self.solve_detailed();
        (response.tour, response.total_distance)
    }

    /// Like [`TourSolver::solve`], also reporting search statistics.
    #[must_use]
    pub fn solve_detailed(&self) -> SolveResponse {
        let started_at = Instant::now();
        let mut tour = nearest_neighbour(&self.start, &self.points);
        let initial_distance = tour.total_distance();
        let outcome = two_opt(&mut tour, &self.config);
        let total_distance = tour.total_distance();
        log::debug!(
            "solved {} points: {initial_distance} -> {total_distance} in {} swaps",
            self.points.len(),
            outcome.swaps
        );
        SolveResponse {
            tour,
            total_distance,
            diagnostics: Diagnostics {
                initial_distance,
                passes: outcome.passes,
                swaps: outcome.swaps,
                converged: outcome.converged,
                solve_time: started_at.elapsed(),
            },
        }
    }
}

/// Configuration for [`TwoOptSolver`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TwoOptSolverConfig {
    /// Settings passed to every refinement run.
    pub refine: RefineConfig,
}

/// Request-level solver: validates a [`SolveRequest`] and runs a
/// [`TourSolver`] over it.
#[derive(Debug, Clone, Default)]
pub struct TwoOptSolver {
    config: TwoOptSolverConfig,
}

impl TwoOptSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: TwoOptSolverConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TwoOptSolverConfig {
        &self.config
    }
}

impl Solver for TwoOptSolver {
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        request.validate()?;
        let solver = TourSolver::with_config(
            request.start,
            request.points.clone(),
            self.config.refine.clone(),
        );
        Ok(solver.solve_detailed())
    }
}

#[cfg(test)]
mod tests;
