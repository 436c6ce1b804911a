//! Property-based tests for the tour solver.
//!
//! These tests use `proptest` to assert invariants that must hold for every
//! valid point set, complementing the golden tours and behavioural tests.
//!
//! # Invariants tested
//!
//! - **Tour validity:** `n + 2` entries, anchored at the start, interior is a
//!   permutation of the input points.
//! - **Non-increase:** refinement never lengthens the greedy tour.
//! - **Idempotence:** refining a refined tour changes nothing.
//! - **Determinism:** identical inputs give identical tours and distances.
//! - **Consistency:** the reported distance is the tour's length.
#![expect(
    clippy::float_arithmetic,
    reason = "distances are compared within a tolerance"
)]


use proptest::prelude::*;
use sleigh_core::test_support::tour_violation;
use sleigh_core::{SolveRequest, Solver};
use sleigh_solver_2opt::{RefineConfig, TourSolver, TwoOptSolver, nearest_neighbour, two_opt};

use proptest_support::{point_set_strategy, sorted_ids, start_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every solve returns a closed tour visiting each point once.
    #[test]
    fn solved_tour_is_valid(
        start in start_strategy(),
        points in point_set_strategy(0, 25),
    ) {
        let (tour, _) = TourSolver::new(start, points.clone()).solve();

        let violation = tour_violation(&tour, &start, &points);
        prop_assert!(violation.is_none(), "invalid tour: {:?}", violation);
        prop_assert_eq!(sorted_ids(tour.interior()), sorted_ids(&points));
    }

    /// Property: the greedy tour is also valid before any refinement.
    #[test]
    fn greedy_tour_is_valid(
        start in start_strategy(),
        points in point_set_strategy(0, 25),
    ) {
        let tour = nearest_neighbour(&start, &points);
        let violation = tour_violation(&tour, &start, &points);
        prop_assert!(violation.is_none(), "invalid greedy tour: {:?}", violation);
    }

    /// Property: 2-opt never makes the greedy tour longer.
    #[test]
    fn refinement_never_increases_distance(
        start in start_strategy(),
        points in point_set_strategy(0, 25),
    ) {
        let mut tour = nearest_neighbour(&start, &points);
        let initial = tour.total_distance();

        let outcome = two_opt(&mut tour, &RefineConfig::default());

        let refined = tour.total_distance();
        prop_assert!(
            refined <= initial + 1e-9,
            "refined {} exceeds initial {}",
            refined,
            initial
        );
        if outcome.swaps > 0 {
            prop_assert!(refined < initial, "swaps applied but no improvement");
        }
    }

    /// Property: a refined tour is a fixed point of refinement.
    #[test]
    fn refinement_is_idempotent(
        start in start_strategy(),
        points in point_set_strategy(0, 25),
    ) {
        let config = RefineConfig::default();
        let mut tour = nearest_neighbour(&start, &points);
        two_opt(&mut tour, &config);
        let refined = tour.clone();

        let again = two_opt(&mut tour, &config);

        prop_assert_eq!(again.swaps, 0);
        prop_assert_eq!(tour.total_distance().to_bits(), refined.total_distance().to_bits());
        prop_assert_eq!(tour, refined);
    }

    /// Property: two solves over the same input agree exactly.
    #[test]
    fn solving_is_deterministic(
        start in start_strategy(),
        points in point_set_strategy(0, 25),
    ) {
        let first = TourSolver::new(start, points.clone()).solve();
        let second = TourSolver::new(start, points).solve();

        prop_assert_eq!(first.1.to_bits(), second.1.to_bits());
        prop_assert_eq!(first.0, second.0);
    }

    /// Property: the request-level solver reports its tour's own length.
    #[test]
    fn reported_distance_matches_tour(
        start in start_strategy(),
        points in point_set_strategy(1, 25),
    ) {
        let request = SolveRequest { start, points };
        let response = TwoOptSolver::new().solve(&request).expect("valid request");

        prop_assert!((response.tour.total_distance() - response.total_distance).abs() < 1e-12);
        prop_assert!(response.total_distance <= response.diagnostics.initial_distance + 1e-9);
        prop_assert!(response.diagnostics.converged);
    }
}
