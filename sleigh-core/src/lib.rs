//! Core domain types for the Sleigh tour engine.
//!
//! The crate defines the [`Point`] primitive with its Euclidean [`distance`],
//! the closed [`Tour`] produced by solvers, and the request/response boundary
//! shared by every [`Solver`] implementation. Algorithms live in solver crates;
//! nothing here performs a search.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod point;
pub mod solver;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
pub mod tour;

pub use point::{Point, distance};
pub use solver::{
    Diagnostics, SolveError, SolveRequest, SolveRequestValidationError, SolveResponse, Solver,
};
pub use tour::{Tour, TourError, total_distance};
