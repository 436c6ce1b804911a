//! Nearest-neighbour and 2-opt tour solver for Sleigh.
//!
//! This crate provides [`TwoOptSolver`], the default implementation of the
//! [`Solver`](sleigh_core::Solver) trait, and [`TourSolver`], the algorithm
//! object it drives. A solve builds a greedy tour from the start point with
//! [`nearest_neighbour`], then shortens it with [`two_opt`] until no segment
//! reversal improves it by more than the configured tolerance.
//!
//! Everything runs synchronously on the calling thread. The heuristic is
//! approximate: the result is a 2-opt local optimum, not a proven minimum.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod construction;
mod refine;
mod solver;

pub use construction::nearest_neighbour;
pub use refine::{DEFAULT_EPSILON, RefineConfig, RefineOutcome, swap_delta, two_opt};
pub use solver::{TourSolver, TwoOptSolver, TwoOptSolverConfig};
