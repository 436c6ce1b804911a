//! Closed tours anchored at a start point.
//!
//! A [`Tour`] lists the start point first and last with every other point
//! exactly once in between. Solvers build tours with [`Tour::closed`] and
//! reorder the interior with [`Tour::reverse_segment`]; the anchors never move.

use std::collections::HashSet;

use thiserror::Error;

use crate::point::{Point, distance};

/// Errors returned when a tour cannot be built or edited.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    /// The sequence cannot hold both anchors.
    #[error("tour must contain at least two points, found {len}")]
    TooShort {
        /// Number of points supplied.
        len: usize,
    },
    /// The first and last points differ.
    #[error("tour must start and end at the same point (start id {first}, end id {last})")]
    NotClosed {
        /// Identifier of the first point.
        first: u64,
        /// Identifier of the last point.
        last: u64,
    },
    /// A point identifier appears more than once between the anchors, or the
    /// start reappears there.
    #[error("point id {id} is visited more than once")]
    RepeatedPoint {
        /// The repeated identifier.
        id: u64,
    },
    /// A reversal would touch an anchor or run past the end of the tour.
    #[error("segment {start}..={end} lies outside the interior of a tour of length {len}")]
    SegmentOutOfBounds {
        /// First index of the segment.
        start: usize,
        /// Last index of the segment, inclusive.
        end: usize,
        /// Tour length.
        len: usize,
    },
}

/// An ordered closed sequence of points beginning and ending at the start.
///
/// For `n` non-start points the tour holds `n + 2` entries.
///
/// # Examples
/// ```
/// use sleigh_core::{Point, Tour};
///
/// let start = Point::new(0, 0.0, 0.0);
/// let tour = Tour::closed(start, vec![Point::new(1, 3.0, 4.0)]);
///
/// assert_eq!(tour.len(), 3);
/// assert_eq!(tour.ids(), vec![0, 1, 0]);
/// assert_eq!(tour.total_distance(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Point>", into = "Vec<Point>")
)]
pub struct Tour {
    points: Vec<Point>,
}

impl Tour {
    /// Close a visiting order into a tour: `[start, interior.., start]`.
    ///
    /// The caller vouches for `interior`: it must not contain `start` or
    /// repeat an identifier. Use [`Tour::try_from_points`] for sequences that
    /// have not been checked.
    #[must_use]
    pub fn closed(start: Point, interior: Vec<Point>) -> Self {
        let mut points = Vec::with_capacity(interior.len().saturating_add(2));
        points.push(start);
        points.extend(interior);
        points.push(start);
        Self { points }
    }

    /// Rebuild a tour from a full closed sequence, such as one read from disk.
    ///
    /// # Errors
    /// Returns [`TourError::TooShort`] for fewer than two points,
    /// [`TourError::NotClosed`] when the first and last points differ and
    /// [`TourError::RepeatedPoint`] when an interior identifier repeats or
    /// matches the start.
    pub fn try_from_points(points: Vec<Point>) -> Result<Self, TourError> {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(TourError::TooShort { len: points.len() });
        };
        if points.len() < 2 {
            return Err(TourError::TooShort { len: points.len() });
        }
        if first != last {
            return Err(TourError::NotClosed {
                first: first.id(),
                last: last.id(),
            });
        }
        let interior = points.get(1..points.len().saturating_sub(1)).unwrap_or_default();
        let mut seen = HashSet::with_capacity(points.len());
        seen.insert(first.id());
        if let Some(repeated) = interior.iter().find(|point| !seen.insert(point.id())) {
            return Err(TourError::RepeatedPoint { id: repeated.id() });
        }
        Ok(Self { points })
    }

    /// Every point in visiting order, start included at both ends.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The anchor the tour opens and closes with.
    #[must_use]
    pub fn start(&self) -> Option<&Point> {
        self.points.first()
    }

    /// Points strictly between the two anchors.
    #[must_use]
    pub fn interior(&self) -> &[Point] {
        let end = self.points.len().saturating_sub(1);
        self.points.get(1..end).unwrap_or_default()
    }

    /// Number of entries, counting the start twice.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a tour holds at least its two anchors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Identifiers in visiting order.
    #[must_use]
    pub fn ids(&self) -> Vec<u64> {
        self.points.iter().map(Point::id).collect()
    }

    /// Length of the closed loop. See [`total_distance`].
    #[must_use]
    pub fn total_distance(&self) -> f64 {
        total_distance(&self.points)
    }

    /// Reverse the inclusive segment `start..=end` in place.
    ///
    /// Only interior indices are accepted, so the anchors at index `0` and
    /// `len - 1` stay fixed.
    ///
    /// # Errors
    /// Returns [`TourError::SegmentOutOfBounds`] when `start` is zero, `end`
    /// reaches the closing anchor, or `start > end`.
    pub fn reverse_segment(&mut self, start: usize, end: usize) -> Result<(), TourError> {
        let len = self.points.len();
        let out_of_bounds = TourError::SegmentOutOfBounds { start, end, len };
        if start == 0 || start > end || end.saturating_add(1) >= len {
            return Err(out_of_bounds);
        }
        let segment = self.points.get_mut(start..=end).ok_or(out_of_bounds)?;
        segment.reverse();
        Ok(())
    }
}

impl TryFrom<Vec<Point>> for Tour {
    type Error = TourError;

    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        Self::try_from_points(points)
    }
}

impl From<Tour> for Vec<Point> {
    fn from(tour: Tour) -> Self {
        tour.points
    }
}

/// Sum of the distances between consecutive points.
///
/// Sequences with fewer than two points have length zero.
///
/// # Examples
/// ```
/// use sleigh_core::{Point, total_distance};
///
/// let path = [
///     Point::new(0, 0.0, 0.0),
///     Point::new(1, 1.0, 0.0),
///     Point::new(2, 1.0, 1.0),
/// ];
/// assert_eq!(total_distance(&path), 2.0);
/// ```
#[must_use]
pub fn total_distance(points: &[Point]) -> f64 {
    points
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(distance(from, to)),
            _ => None,
        })
        .sum()
}
