//! The point collaborator consumed by regions.
//!
//! A [`Point`] is an owned sequence of coordinates. Regions read it for
//! containment and distance tests and produce one as their center.

use smallvec::SmallVec;
use std::fmt::{self, Display};

use crate::errors::{SpatialError, SpatialResult};

/// Coordinate storage shared by points and regions. Two and three dimensional
/// data stays inline.
pub(crate) type Coords = SmallVec<[f64; 3]>;

/// A point in D-dimensional space.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    coords: Coords,
}

impl Point {
    /// Creates a point from its coordinates, one per dimension.
    pub fn new(coords: &[f64]) -> Self {
        Self {
            coords: Coords::from_slice(coords),
        }
    }

    /// Creates a point of the given dimension with every coordinate at the origin.
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            coords: smallvec::smallvec![0.0; dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Gets the coordinate along `index`.
    pub fn coordinate(&self, index: usize) -> SpatialResult<f64> {
        self.coords
            .get(index)
            .copied()
            .ok_or(SpatialError::IndexOutOfBounds {
                index,
                dimension: self.dimension(),
            })
    }

    /// Gets all coordinates in dimension order.
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub(crate) fn coords_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_sq(&self, other: &Point) -> SpatialResult<f64> {
        if self.dimension() != other.dimension() {
            return Err(SpatialError::InvalidArgument(
                "Point::distance_sq: Points have different number of dimensions.".into(),
            ));
        }
        Ok(self
            .coords
            .iter()
            .zip(other.coords.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum())
    }
}

impl From<[f64; 2]> for Point {
    fn from(coords: [f64; 2]) -> Self {
        Point::new(&coords)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.coords {
            write!(f, "{} ", c)?;
        }
        Ok(())
    }
}
