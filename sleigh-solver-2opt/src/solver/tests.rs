//! Tests for `TourSolver` and `TwoOptSolver`.
#![expect(
    clippy::float_arithmetic,
    reason = "tests compare tour lengths within a tolerance"
)]

use super::*;
use rstest::rstest;
use sleigh_core::SolveRequestValidationError;
use sleigh_core::test_support::{
    origin, points_on_line, tour_violation, unit_square_corners, unit_square_request,
};

#[rstest]
fn solves_unit_square_to_its_perimeter() {
    let (tour, distance) = TourSolver::new(origin(), unit_square_corners()).solve();
    assert!((distance - 4.0).abs() < 1e-9);
    assert_eq!(tour_violation(&tour, &origin(), &unit_square_corners()), None);
}

#[rstest]
#[case::listed(vec![1, 2, 3])]
#[case::diagonal_first(vec![2, 1, 3])]
#[case::reversed(vec![3, 2, 1])]
#[case::diagonal_last(vec![3, 1, 2])]
fn unit_square_converges_from_any_listing(#[case] order: Vec<u64>) {
    let corners = unit_square_corners();
    let points: Vec<Point> = order
        .iter()
        .filter_map(|id| corners.iter().find(|corner| corner.id() == *id).copied())
        .collect();

    let (_, distance) = TourSolver::new(origin(), points).solve();

    assert!((distance - 4.0).abs() < 1e-9, "distance was {distance}");
}

#[rstest]
fn empty_input_yields_degenerate_tour() {
    let (tour, distance) = TourSolver::new(origin(), Vec::new()).solve();
    assert_eq!(tour.ids(), vec![0, 0]);
    assert_eq!(distance, 0.0);
}

#[rstest]
fn single_point_is_an_out_and_back() {
    let house = Point::new(9, -3.0, 4.0);
    let (tour, distance) = TourSolver::new(origin(), vec![house]).solve();
    assert_eq!(tour.ids(), vec![0, 9, 0]);
    assert!((distance - 2.0 * origin().distance_to(&house)).abs() < 1e-12);
}

#[rstest]
fn repeated_solves_are_identical() {
    let mut points = points_on_line(7);
    points.extend([Point::new(20, 2.5, 3.0), Point::new(21, 5.5, -1.0)]);
    let solver = TourSolver::new(Point::new(0, 3.0, 1.0), points);

    let (first_tour, first_distance) = solver.solve();
    let (second_tour, second_distance) = solver.solve();

    assert_eq!(first_tour, second_tour);
    assert_eq!(first_distance.to_bits(), second_distance.to_bits());
}

#[rstest]
fn diagnostics_record_the_greedy_baseline() {
    let points = vec![
        Point::new(1, 2.0, 0.0),
        Point::new(2, 2.0, 2.0),
        Point::new(3, 0.0, 2.0),
        Point::new(4, 1.0, 1.1),
    ];
    let response = TourSolver::new(origin(), points).solve_detailed();

    assert!(response.total_distance <= response.diagnostics.initial_distance);
    assert!(response.diagnostics.converged);
    assert!(response.diagnostics.passes >= 1);
    assert!((response.tour.total_distance() - response.total_distance).abs() < f64::EPSILON);
}

#[rstest]
fn accessors_expose_inputs() {
    let solver = TourSolver::new(origin(), unit_square_corners());
    assert_eq!(solver.start(), &origin());
    assert_eq!(solver.points(), unit_square_corners().as_slice());
}

#[rstest]
fn request_solver_returns_square_perimeter() {
    let response = TwoOptSolver::new()
        .solve(&unit_square_request())
        .expect("solve should succeed");
    assert!((response.total_distance - 4.0).abs() < 1e-9);
    assert_eq!(response.tour.len(), 5);
}

#[rstest]
fn request_solver_rejects_invalid_requests() {
    let request = SolveRequest {
        start: origin(),
        points: vec![Point::new(1, f64::NAN, 0.0)],
    };
    let err = TwoOptSolver::new()
        .solve(&request)
        .expect_err("expected invalid request error");
    assert_eq!(
        err,
        SolveError::InvalidRequest(SolveRequestValidationError::NonFiniteCoordinate { id: 1 })
    );
}

#[rstest]
fn request_solver_honours_pass_budget() {
    let config = TwoOptSolverConfig {
        refine: RefineConfig {
            max_passes: Some(0),
            ..RefineConfig::default()
        },
    };
    let solver = TwoOptSolver::with_config(config);
    let request = SolveRequest {
        start: origin(),
        points: vec![
            Point::new(1, 1.0, 0.0),
            Point::new(2, 2.0, 0.0),
            Point::new(3, 0.5, 0.0),
        ],
    };

    let response = solver.solve(&request).expect("solve should succeed");

    assert_eq!(response.diagnostics.passes, 0);
    assert!(!response.diagnostics.converged);
    assert!(
        (response.total_distance - response.diagnostics.initial_distance).abs() < f64::EPSILON
    );
}

#[rstest]
#[case::negative(-1.0)]
#[case::nan(f64::NAN)]
fn unbounded_search_terminates_with_unusable_epsilon(#[case] epsilon: f64) {
    let config = RefineConfig {
        epsilon,
        max_passes: None,
    };
    let points = vec![Point::new(1, 2.0, 3.0), Point::new(2, -4.0, 1.0)];

    let response = TourSolver::with_config(origin(), points, config).solve_detailed();

    assert!(response.diagnostics.converged);
    assert_eq!(response.diagnostics.swaps, 0);
    assert_eq!(response.diagnostics.passes, 1);
}

#[rstest]
fn solvers_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TourSolver>();
    assert_send_sync::<TwoOptSolver>();
}
