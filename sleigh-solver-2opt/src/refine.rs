//! 2-opt local search over a closed tour.
//!
//! A 2-opt move drops the edges `(a, b)` and `(c, d)` and reconnects the tour
//! as `(a, c)` and `(b, d)` by reversing the segment `b..=c`. Moves are
//! applied as soon as they are found and the scan carries on over the
//! modified tour. Passes repeat until one completes without a move.

use sleigh_core::{Point, Tour, distance};

/// Default improvement margin a swap must beat.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Configuration for [`two_opt`].
#[derive(Debug, Clone, PartialEq)]
pub struct RefineConfig {
    /// A swap is applied only when it shortens the tour by more than this.
    ///
    /// Larger values stop the search on coarser improvements and guard
    /// against looping on floating-point noise; zero accepts any strictly
    /// negative delta. Negative and NaN values are treated as zero.
    pub epsilon: f64,
    /// Upper bound on full passes, or `None` to run until convergence.
    pub max_passes: Option<usize>,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_passes: None,
        }
    }
}

impl RefineConfig {
    /// The improvement margin actually applied: `epsilon` clamped to be
    /// non-negative, with NaN read as zero.
    ///
    /// A negative margin would accept swaps that lengthen the tour, and the
    /// search could then cycle forever.
    #[must_use]
    pub const fn margin(&self) -> f64 {
        if self.epsilon.is_nan() || self.epsilon < 0.0 {
            0.0
        } else {
            self.epsilon
        }
    }
}

/// Summary of a refinement run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefineOutcome {
    /// Full passes performed, including the final pass that found nothing.
    pub passes: usize,
    /// Swaps applied across all passes.
    pub swaps: usize,
    /// `true` once a pass completed without an improving swap.
    pub converged: bool,
}

/// Change in tour length from reversing `points[i..=j]`.
///
/// With `a = points[i-1]`, `b = points[i]`, `c = points[j]` and
/// `d = points[j+1]` this is `(|ac| + |bd|) - (|ab| + |cd|)`; negative values
/// shorten the tour. Returns `None` when any of the four indices is missing.
///
/// # Examples
/// ```
/// use sleigh_core::Point;
/// use sleigh_solver_2opt::swap_delta;
///
/// // (0,0) -> (1,0) -> (0,1) -> (1,1) -> (0,0) crosses itself.
/// let points = [
///     Point::new(0, 0.0, 0.0),
///     Point::new(1, 1.0, 0.0),
///     Point::new(2, 0.0, 1.0),
///     Point::new(3, 1.0, 1.0),
///     Point::new(0, 0.0, 0.0),
/// ];
/// let delta = swap_delta(&points, 2, 3).expect("indices in range");
/// assert!(delta < 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "2-opt deltas combine edge lengths"
)]
pub fn swap_delta(points: &[Point], i: usize, j: usize) -> Option<f64> {
    let a = points.get(i.checked_sub(1)?)?;
    let b = points.get(i)?;
    let c = points.get(j)?;
    let d = points.get(j.checked_add(1)?)?;
    Some((distance(a, c) + distance(b, d)) - (distance(a, b) + distance(c, d)))
}

/// Shorten `tour` in place with 2-opt moves until no move improves it.
///
/// Only interior positions take part: the start point at index `0` and its
/// repeat at the last index never move. Tours with at most two interior
/// points cannot improve, since every candidate delta is exactly zero.
///
/// Each applied swap shortens the tour by more than [`RefineConfig::margin`],
/// which is never negative, so the loop terminates. When `config.max_passes` is reached first the outcome
/// reports `converged == false`.
///
/// # Examples
/// ```
/// use sleigh_core::{Point, Tour};
/// use sleigh_solver_2opt::{RefineConfig, two_opt};
///
/// let start = Point::new(0, 0.0, 0.0);
/// let mut tour = Tour::closed(
///     start,
///     vec![
///         Point::new(1, 1.0, 0.0),
///         Point::new(3, 0.0, 1.0),
///         Point::new(2, 1.0, 1.0),
///     ],
/// );
/// let outcome = two_opt(&mut tour, &RefineConfig::default());
/// assert!(outcome.converged);
/// assert_eq!(tour.ids(), vec![0, 1, 2, 3, 0]);
/// ```
pub fn two_opt(tour: &mut Tour, config: &RefineConfig) -> RefineOutcome {
    let margin = config.margin();
    if margin.to_bits() != config.epsilon.to_bits() {
        log::warn!(
            "2-opt epsilon {} is not a non-negative number; using {margin}",
            config.epsilon
        );
    }
    let mut outcome = RefineOutcome::default();
    loop {
        if let Some(max_passes) = config.max_passes
            && outcome.passes >= max_passes
        {
            log::warn!(
                "2-opt stopped after {max_passes} passes without converging ({} swaps applied)",
                outcome.swaps
            );
            return outcome;
        }
        outcome.passes = outcome.passes.saturating_add(1);
        let swaps = run_pass(tour, margin);
        outcome.swaps = outcome.swaps.saturating_add(swaps);
        log::debug!(
            "2-opt pass {} applied {swaps} swaps; tour length {}",
            outcome.passes,
            tour.total_distance()
        );
        if swaps == 0 {
            outcome.converged = true;
            return outcome;
        }
    }
}

/// One full scan over interior index pairs. Returns the number of swaps.
fn run_pass(tour: &mut Tour, margin: f64) -> usize {
    let len = tour.len();
    let mut swaps = 0_usize;
    for i in 1..len.saturating_sub(2) {
        for j in (i + 1)..len.saturating_sub(1) {
            if !improves(tour.points(), i, j, margin) {
                continue;
            }
            if let Err(err) = tour.reverse_segment(i, j) {
                log::warn!("skipping 2-opt swap ({i}, {j}): {err}");
                debug_assert!(false, "2-opt produced an invalid segment: {err}");
                continue;
            }
            swaps = swaps.saturating_add(1);
        }
    }
    swaps
}

#[expect(
    clippy::float_arithmetic,
    reason = "a swap must beat the margin by a strict amount"
)]
fn improves(points: &[Point], i: usize, j: usize, margin: f64) -> bool {
    swap_delta(points, i, j).is_some_and(|delta| delta + margin < 0.0)
}
