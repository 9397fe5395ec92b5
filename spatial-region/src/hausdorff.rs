//! Hausdorff distance bounds between 2-D regions.
//!
//! Exact Hausdorff distances between polygons are expensive. When shapes are
//! only known through their bounding regions, cheap lower and upper bounds can
//! still be derived from the four boundary edges of each region. Every
//! operation here is defined for two dimensions only and returns
//! [`SpatialError::NotSupported`] otherwise.
//!
//! Edges are derived from the current coordinates on every call, so they
//! always reflect the latest state of the region.

use log::trace;

use crate::errors::{SpatialError, SpatialResult};
use crate::point::{Coords, Point};
use crate::region::Region;
use crate::shape::{Shape, ShapeKind};

/// One side of a 2-D region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Low y, from south-west to south-east.
    South = 0,
    /// High x, from south-east to north-east.
    East = 1,
    /// High y, from north-west to north-east.
    North = 2,
    /// Low x, from south-west to north-west.
    West = 3,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::South, Edge::East, Edge::North, Edge::West];
}

impl TryFrom<usize> for Edge {
    type Error = SpatialError;

    fn try_from(id: usize) -> SpatialResult<Self> {
        match id {
            0 => Ok(Edge::South),
            1 => Ok(Edge::East),
            2 => Ok(Edge::North),
            3 => Ok(Edge::West),
            _ => Err(SpatialError::IndexOutOfBounds {
                index: id,
                dimension: Edge::ALL.len(),
            }),
        }
    }
}

impl Region {
    fn require_planar(&self, operation: &str) -> SpatialResult<()> {
        if self.dimension() != 2 {
            return Err(SpatialError::dimensions_not_supported(operation));
        }
        Ok(())
    }

    /// Returns one side of this region as a degenerate region.
    pub fn edge(&self, edge: Edge) -> SpatialResult<Region> {
        self.require_planar("edge")?;
        Ok(self.edge_unchecked(edge))
    }

    /// Returns the South, East, North and West sides, in that order.
    pub fn edges(&self) -> SpatialResult<[Region; 4]> {
        self.require_planar("edges")?;
        Ok(self.edges_unchecked())
    }

    fn edges_unchecked(&self) -> [Region; 4] {
        Edge::ALL.map(|e| self.edge_unchecked(e))
    }

    fn edge_unchecked(&self, edge: Edge) -> Region {
        let (west, south) = (self.low[0], self.low[1]);
        let (east, north) = (self.high[0], self.high[1]);

        let (low, high) = match edge {
            Edge::South => ([west, south], [east, south]),
            Edge::East => ([east, south], [east, north]),
            Edge::North => ([west, north], [east, north]),
            Edge::West => ([west, south], [west, north]),
        };
        Region {
            low: Coords::from_slice(&low),
            high: Coords::from_slice(&high),
        }
    }

    // ========================================================================
    // Lower bounds
    // ========================================================================

    /// Lower bound on the Hausdorff distance from the shape bounded by this
    /// region to the shape bounded by `target`.
    ///
    /// Every edge of this region touches the bounded shape, so the farthest
    /// edge from `target` bounds the distance from below.
    pub fn haus_dist_lb(&self, target: &Region) -> SpatialResult<f64> {
        self.require_planar("haus_dist_lb")?;

        let mut max = 0.0f64;
        for edge in self.edges_unchecked() {
            max = max.max(edge.min_distance_sq_region(target)?);
        }
        Ok(max.sqrt())
    }

    /// Lower bound against a shape covered by several candidate regions.
    ///
    /// For each edge the nearest candidate is searched; the scan for an edge
    /// stops as soon as a candidate closer than the running bound is found,
    /// since that edge can no longer raise the bound. `current_max` seeds the
    /// running bound and `counter` is increased by one per edge/candidate
    /// comparison. An empty candidate set yields `sqrt(f64::MAX)`.
    pub fn haus_dist_lb_batch(
        &self,
        candidates: &[&Region],
        current_max: f64,
        counter: &mut usize,
    ) -> SpatialResult<f64> {
        self.require_planar("haus_dist_lb_batch")?;

        let mut max = current_max * current_max;
        let start = *counter;
        for edge in self.edges_unchecked() {
            let mut min = f64::MAX;
            for candidate in candidates {
                min = min.min(edge.min_distance_sq_region(candidate)?);
                *counter += 1;
                if min < max {
                    break;
                }
            }
            max = max.max(min);
        }

        trace!(
            "haus_dist_lb_batch: {} comparisons over {} candidates",
            *counter - start,
            candidates.len()
        );
        Ok(max.sqrt())
    }

    /// Lower bound taken directly as the minimum distance to `shape`.
    pub fn mhaus_dist_lb(&self, shape: &dyn Shape) -> SpatialResult<f64> {
        self.require_planar("mhaus_dist_lb")?;
        Ok(self.min_distance_sq(shape)?.sqrt())
    }

    /// Minimum distance to the closest of the candidate regions.
    pub fn mhaus_dist_lb_batch(&self, candidates: &[&Region]) -> SpatialResult<f64> {
        self.require_planar("mhaus_dist_lb_batch")?;

        let mut min = f64::MAX;
        for candidate in candidates {
            min = min.min(self.min_distance_sq_region(candidate)?);
        }
        Ok(min.sqrt())
    }

    // ========================================================================
    // Upper bounds
    // ========================================================================

    pub fn haus_dist_ub(&self, shape: &dyn Shape) -> SpatialResult<f64> {
        match shape.kind() {
            ShapeKind::Region(r) => self.haus_dist_ub_region(r),
            ShapeKind::Point(p) => self.haus_dist_ub_point(p),
            ShapeKind::Other(_) => Err(SpatialError::not_implemented("haus_dist_ub")),
        }
    }

    /// Upper bound on the Hausdorff distance between the shapes bounded by
    /// this region and `other`.
    pub fn haus_dist_ub_region(&self, other: &Region) -> SpatialResult<f64> {
        self.require_planar("haus_dist_ub_region")?;
        other.require_planar("haus_dist_ub_region")?;

        let theirs = other.edges_unchecked();
        Ok(max_of_min_max_distance_sq(&self.edges_unchecked(), &theirs)?.sqrt())
    }

    /// Upper bound given by the farthest corner of this region from `point`.
    pub fn haus_dist_ub_point(&self, point: &Point) -> SpatialResult<f64> {
        self.require_planar("haus_dist_ub_point")?;

        let (west, south) = (self.low[0], self.low[1]);
        let (east, north) = (self.high[0], self.high[1]);
        let corners = [
            Point::new(&[west, south]),
            Point::new(&[east, north]),
            Point::new(&[east, south]),
            Point::new(&[west, north]),
        ];

        let mut d_sq = 0.0f64;
        for corner in &corners {
            d_sq = d_sq.max(point.distance_sq(corner)?);
        }
        Ok(d_sq.sqrt())
    }

    /// Upper bound against a shape made of several parts, each known through
    /// its bounding region.
    pub fn haus_dist_ub_batch(&self, shapes: &[&dyn Shape]) -> SpatialResult<f64> {
        self.require_planar("haus_dist_ub_batch")?;

        let mut theirs = Vec::with_capacity(shapes.len() * 4);
        for shape in shapes {
            theirs.extend(shape.mbr().edges()?);
        }
        trace!(
            "haus_dist_ub_batch: {} candidate edges from {} shapes",
            theirs.len(),
            shapes.len()
        );
        Ok(max_of_min_max_distance_sq(&self.edges_unchecked(), &theirs)?.sqrt())
    }
}

/// For each edge in `ours`, the smallest maximum distance to any edge in
/// `theirs`; returns the largest of those. An empty `theirs` yields
/// `f64::MAX`.
fn max_of_min_max_distance_sq(ours: &[Region], theirs: &[Region]) -> SpatialResult<f64> {
    let mut max = 0.0f64;
    for mine in ours {
        let mut min = f64::MAX;
        for other in theirs {
            min = min.min(mine.max_distance_sq(other)?);
        }
        max = max.max(min);
    }
    Ok(max)
}
