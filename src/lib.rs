//! Facade crate for the Sleigh tour engine.
//!
//! This crate re-exports the core domain types and exposes the nearest-neighbour
//! and 2-opt solver behind the default `solver-2opt` feature.
//!
//! ```
//! # #[cfg(feature = "solver-2opt")]
//! # {
//! use sleigh::{Point, SolveRequest, Solver, TwoOptSolver};
//!
//! let request = SolveRequest {
//!     start: Point::new(0, 0.0, 0.0),
//!     points: vec![Point::new(1, 3.0, 4.0)],
//! };
//! let response = TwoOptSolver::new().solve(&request).expect("valid request");
//! assert_eq!(response.tour.ids(), vec![0, 1, 0]);
//! # }
//! ```

#![forbid(unsafe_code)]

pub use sleigh_core::{
    Diagnostics, Point, SolveError, SolveRequest, SolveRequestValidationError, SolveResponse,
    Solver, Tour, TourError, distance, total_distance,
};

#[cfg(feature = "solver-2opt")]
pub use sleigh_solver_2opt::{
    RefineConfig, RefineOutcome, TourSolver, TwoOptSolver, TwoOptSolverConfig, nearest_neighbour,
    two_opt,
};
