use log::debug;
use std::fmt;

use crate::errors::{SpatialError, SpatialResult};
use crate::point::{Coords, Point};
use crate::shape::{Shape, ShapeKind};

/// Tolerance used by the approximate comparisons (`touches_*`, `==`).
pub const EPSILON: f64 = f64::EPSILON;

/// An axis-aligned hyper-rectangle (minimum bounding region) in D dimensions.
///
/// `Region` stores one minimum and one maximum coordinate per dimension. It is
/// used by spatial indexes to bound the entries below a node and to prune
/// subtrees during search, so most operations here sit on hot paths.
///
/// A region may be *infinite*: every low coordinate is `f64::MAX` and every
/// high coordinate is `-f64::MAX`. It stands for "nothing yet", so combining
/// anything into it yields that thing. Its area is meaningless; check
/// [`Region::is_infinite`] first.
///
/// # Examples
///
/// ```rust
/// use spatial_region::{Point, Region};
///
/// let a = Region::new(&[0.0, 0.0], &[10.0, 10.0])?;
/// let b = Region::new(&[5.0, 5.0], &[15.0, 15.0])?;
///
/// assert!(a.intersects_region(&b)?);
/// assert_eq!(a.intersecting_area(&b)?, 25.0);
/// assert!(a.contains_point(&Point::new(&[2.0, 3.0]))?);
/// # Ok::<(), spatial_region::SpatialError>(())
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RegionRepr", into = "RegionRepr")
)]
pub struct Region {
    pub(crate) low: Coords,
    pub(crate) high: Coords,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RegionRepr {
    low: Coords,
    high: Coords,
}

#[cfg(feature = "serde")]
impl TryFrom<RegionRepr> for Region {
    type Error = SpatialError;

    fn try_from(repr: RegionRepr) -> SpatialResult<Self> {
        Region::new(&repr.low, &repr.high)
    }
}

#[cfg(feature = "serde")]
impl From<Region> for RegionRepr {
    fn from(region: Region) -> Self {
        RegionRepr {
            low: region.low,
            high: region.high,
        }
    }
}

impl Region {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Creates a region from its low and high corners.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidArgument`] if the slices have different
    /// lengths, or (when bound validation is enabled) if a low coordinate
    /// exceeds its high coordinate and neither is the infinite sentinel.
    pub fn new(low: &[f64], high: &[f64]) -> SpatialResult<Region> {
        if low.len() != high.len() {
            return Err(SpatialError::dimension_mismatch(
                "new",
                "low and high points have",
            ));
        }
        validate_bounds(low, high)?;

        Ok(Region {
            low: Coords::from_slice(low),
            high: Coords::from_slice(high),
        })
    }

    /// Creates a region of the given dimension with all coordinates at zero.
    pub fn with_dimension(dimension: usize) -> Region {
        Region {
            low: smallvec::smallvec![0.0; dimension],
            high: smallvec::smallvec![0.0; dimension],
        }
    }

    /// Creates an infinite region of the given dimension.
    pub fn infinite(dimension: usize) -> Region {
        let mut region = Region::default();
        region.make_infinite(dimension);
        region
    }

    /// Creates a region spanning two corner points.
    pub fn from_points(low: &Point, high: &Point) -> SpatialResult<Region> {
        if low.dimension() != high.dimension() {
            return Err(SpatialError::dimension_mismatch(
                "from_points",
                "arguments have",
            ));
        }
        Region::new(low.coords(), high.coords())
    }

    /// Creates the degenerate region covering a single point.
    pub fn from_point(point: &Point) -> Region {
        Region {
            low: Coords::from_slice(point.coords()),
            high: Coords::from_slice(point.coords()),
        }
    }

    // ========================================================================
    // Dimension management and accessors
    // ========================================================================

    pub fn dimension(&self) -> usize {
        self.low.len()
    }

    /// Reallocates the coordinate buffers if `dimension` differs from the
    /// current one. The new coordinates are zero. Keeps the coordinates when
    /// the dimension is unchanged.
    pub fn make_dimension(&mut self, dimension: usize) {
        if self.dimension() != dimension {
            self.low = smallvec::smallvec![0.0; dimension];
            self.high = smallvec::smallvec![0.0; dimension];
        }
    }

    /// Resets this region to the infinite sentinel of the given dimension.
    pub fn make_infinite(&mut self, dimension: usize) {
        self.make_dimension(dimension);
        self.low.fill(f64::MAX);
        self.high.fill(-f64::MAX);
    }

    /// Checks whether this region is the infinite sentinel.
    pub fn is_infinite(&self) -> bool {
        self.dimension() > 0
            && self.low.iter().all(|&l| l == f64::MAX)
            && self.high.iter().all(|&h| h == -f64::MAX)
    }

    /// Gets the low coordinate along `index`.
    pub fn low(&self, index: usize) -> SpatialResult<f64> {
        self.check_index(index)?;
        Ok(self.low[index])
    }

    /// Gets the high coordinate along `index`.
    pub fn high(&self, index: usize) -> SpatialResult<f64> {
        self.check_index(index)?;
        Ok(self.high[index])
    }

    pub fn lows(&self) -> &[f64] {
        &self.low
    }

    pub fn highs(&self) -> &[f64] {
        &self.high
    }

    /// Sets the low coordinate along `index`.
    pub fn set_low(&mut self, index: usize, value: f64) -> SpatialResult<()> {
        self.check_index(index)?;
        self.low[index] = value;
        Ok(())
    }

    /// Sets the high coordinate along `index`.
    pub fn set_high(&mut self, index: usize, value: f64) -> SpatialResult<()> {
        self.check_index(index)?;
        self.high[index] = value;
        Ok(())
    }

    fn check_index(&self, index: usize) -> SpatialResult<()> {
        if index >= self.dimension() {
            return Err(SpatialError::IndexOutOfBounds {
                index,
                dimension: self.dimension(),
            });
        }
        Ok(())
    }

    fn check_region(&self, other: &Region, operation: &str) -> SpatialResult<()> {
        if self.dimension() != other.dimension() {
            return Err(SpatialError::dimension_mismatch(operation, "Regions have"));
        }
        Ok(())
    }

    fn check_point(&self, point: &Point, operation: &str) -> SpatialResult<()> {
        if self.dimension() != point.dimension() {
            return Err(SpatialError::dimension_mismatch(operation, "Point has"));
        }
        Ok(())
    }

    // ========================================================================
    // Measures
    // ========================================================================

    /// Returns the product of the extents along every dimension.
    pub fn area(&self) -> f64 {
        self.low
            .iter()
            .zip(self.high.iter())
            .map(|(l, h)| h - l)
            .product()
    }

    /// Returns the sum of all edge lengths, i.e. `2^(D-1)` times the extent
    /// along each dimension.
    pub fn margin(&self) -> f64 {
        let mul = 2f64.powf(self.dimension() as f64 - 1.0);
        self.low
            .iter()
            .zip(self.high.iter())
            .map(|(l, h)| (h - l) * mul)
            .sum()
    }

    /// Returns the midpoint of this region.
    pub fn center(&self) -> Point {
        let mut center = Point::with_dimension(self.dimension());
        for (c, (l, h)) in center
            .coords_mut()
            .iter_mut()
            .zip(self.low.iter().zip(self.high.iter()))
        {
            *c = (l + h) / 2.0;
        }
        center
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    /// Checks whether this region intersects a shape. A point intersects a
    /// region when the region contains it.
    pub fn intersects_shape(&self, shape: &dyn Shape) -> SpatialResult<bool> {
        match shape.kind() {
            ShapeKind::Region(r) => self.intersects_region(r),
            ShapeKind::Point(p) => self.contains_point(p),
            ShapeKind::Other(_) => Err(SpatialError::not_implemented("intersects_shape")),
        }
    }

    pub fn contains_shape(&self, shape: &dyn Shape) -> SpatialResult<bool> {
        match shape.kind() {
            ShapeKind::Region(r) => self.contains_region(r),
            ShapeKind::Point(p) => self.contains_point(p),
            ShapeKind::Other(_) => Err(SpatialError::not_implemented("contains_shape")),
        }
    }

    pub fn touches_shape(&self, shape: &dyn Shape) -> SpatialResult<bool> {
        match shape.kind() {
            ShapeKind::Region(r) => self.touches_region(r),
            ShapeKind::Point(p) => self.touches_point(p),
            ShapeKind::Other(_) => Err(SpatialError::not_implemented("touches_shape")),
        }
    }

    /// Checks whether the two regions overlap on every axis. Touching
    /// boundaries count as intersection.
    pub fn intersects_region(&self, other: &Region) -> SpatialResult<bool> {
        self.check_region(other, "intersects_region")?;
        Ok(self.overlaps(other))
    }

    fn overlaps(&self, other: &Region) -> bool {
        (0..self.dimension())
            .all(|i| self.low[i] <= other.high[i] && self.high[i] >= other.low[i])
    }

    pub fn contains_region(&self, other: &Region) -> SpatialResult<bool> {
        self.check_region(other, "contains_region")?;
        Ok((0..self.dimension())
            .all(|i| self.low[i] <= other.low[i] && self.high[i] >= other.high[i]))
    }

    /// Checks whether a low or high boundary of `other` coincides, within
    /// [`EPSILON`], with the matching boundary of this region on some axis.
    pub fn touches_region(&self, other: &Region) -> SpatialResult<bool> {
        self.check_region(other, "touches_region")?;
        Ok((0..self.dimension()).any(|i| {
            near(self.low[i], other.low[i]) || near(self.high[i], other.high[i])
        }))
    }

    pub fn contains_point(&self, point: &Point) -> SpatialResult<bool> {
        self.check_point(point, "contains_point")?;
        Ok(self
            .low
            .iter()
            .zip(self.high.iter())
            .zip(point.coords())
            .all(|((l, h), c)| l <= c && c <= h))
    }

    /// Checks whether the point lies, within [`EPSILON`], on the low or high
    /// boundary of some axis.
    pub fn touches_point(&self, point: &Point) -> SpatialResult<bool> {
        self.check_point(point, "touches_point")?;
        Ok(self
            .low
            .iter()
            .zip(self.high.iter())
            .zip(point.coords())
            .any(|((&l, &h), &c)| near(l, c) || near(h, c)))
    }

    // ========================================================================
    // Distances
    // ========================================================================

    pub fn min_distance(&self, shape: &dyn Shape) -> SpatialResult<f64> {
        match shape.kind() {
            ShapeKind::Region(r) => self.min_distance_region(r),
            ShapeKind::Point(p) => self.min_distance_point(p),
            ShapeKind::Other(_) => Err(SpatialError::not_implemented("min_distance")),
        }
    }

    pub fn min_distance_sq(&self, shape: &dyn Shape) -> SpatialResult<f64> {
        match shape.kind() {
            ShapeKind::Region(r) => self.min_distance_sq_region(r),
            ShapeKind::Point(p) => self.min_distance_sq_point(p),
            ShapeKind::Other(_) => Err(SpatialError::not_implemented("min_distance_sq")),
        }
    }

    /// Euclidean distance between the closest points of two regions; zero
    /// when they intersect.
    pub fn min_distance_region(&self, other: &Region) -> SpatialResult<f64> {
        Ok(self.min_distance_sq_region(other)?.sqrt())
    }

    /// Squared form of [`Region::min_distance_region`], for callers that only
    /// compare distances.
    pub fn min_distance_sq_region(&self, other: &Region) -> SpatialResult<f64> {
        self.check_region(other, "min_distance_sq_region")?;

        let mut ret = 0.0;
        for i in 0..self.dimension() {
            let x = if other.high[i] < self.low[i] {
                self.low[i] - other.high[i]
            } else if self.high[i] < other.low[i] {
                other.low[i] - self.high[i]
            } else {
                0.0
            };
            ret += x * x;
        }
        Ok(ret)
    }

    pub fn min_distance_point(&self, point: &Point) -> SpatialResult<f64> {
        Ok(self.min_distance_sq_point(point)?.sqrt())
    }

    pub fn min_distance_sq_point(&self, point: &Point) -> SpatialResult<f64> {
        self.check_point(point, "min_distance_sq_point")?;

        let mut ret = 0.0;
        for (i, &c) in point.coords().iter().enumerate() {
            if c < self.low[i] {
                ret += (self.low[i] - c) * (self.low[i] - c);
            } else if c > self.high[i] {
                ret += (c - self.high[i]) * (c - self.high[i]);
            }
        }
        Ok(ret)
    }

    /// Squared distance between the two farthest points of the regions.
    pub fn max_distance_sq(&self, other: &Region) -> SpatialResult<f64> {
        self.check_region(other, "max_distance_sq")?;

        let mut ret = 0.0;
        for i in 0..self.dimension() {
            let diff = (self.low[i] - other.high[i])
                .abs()
                .max((self.high[i] - other.low[i]).abs());
            ret += diff * diff;
        }
        Ok(ret)
    }

    // ========================================================================
    // Combination
    // ========================================================================

    /// Grows this region to also cover `other`.
    pub fn combine_region(&mut self, other: &Region) -> SpatialResult<()> {
        self.check_region(other, "combine_region")?;
        for i in 0..self.dimension() {
            self.low[i] = self.low[i].min(other.low[i]);
            self.high[i] = self.high[i].max(other.high[i]);
        }
        Ok(())
    }

    /// Grows this region to also cover `point`.
    pub fn combine_point(&mut self, point: &Point) -> SpatialResult<()> {
        self.check_point(point, "combine_point")?;
        for (i, &c) in point.coords().iter().enumerate() {
            self.low[i] = self.low[i].min(c);
            self.high[i] = self.high[i].max(c);
        }
        Ok(())
    }

    /// Returns the union of this region and `other`, leaving both untouched.
    pub fn combined_region(&self, other: &Region) -> SpatialResult<Region> {
        self.check_region(other, "combined_region")?;
        let mut out = self.clone();
        out.combine_region(other)?;
        Ok(out)
    }

    /// Returns the overlap of the two regions, or an infinite region when
    /// they are disjoint along some axis.
    pub fn intersecting_region(&self, other: &Region) -> SpatialResult<Region> {
        self.check_region(other, "intersecting_region")?;

        let mut ret = Region::infinite(self.dimension());
        if !self.overlaps(other) {
            return Ok(ret);
        }
        for i in 0..self.dimension() {
            ret.low[i] = self.low[i].max(other.low[i]);
            ret.high[i] = self.high[i].min(other.high[i]);
        }
        Ok(ret)
    }

    /// Returns the area of the overlap of the two regions, zero when they
    /// are disjoint.
    pub fn intersecting_area(&self, other: &Region) -> SpatialResult<f64> {
        self.check_region(other, "intersecting_area")?;

        let mut ret = 1.0;
        for i in 0..self.dimension() {
            if self.low[i] > other.high[i] || self.high[i] < other.low[i] {
                return Ok(0.0);
            }
            let f1 = self.low[i].max(other.low[i]);
            let f2 = self.high[i].min(other.high[i]);
            ret *= f2 - f1;
        }
        Ok(ret)
    }

    // ========================================================================
    // Binary encoding
    // ========================================================================

    /// Size of the binary encoding: a `u32` dimension followed by the low
    /// and high coordinates as `f64`.
    pub fn byte_size(&self) -> usize {
        DIMENSION_BYTES + 2 * self.dimension() * COORD_BYTES
    }

    /// Encodes this region in host byte order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_size());
        bytes.extend_from_slice(&(self.dimension() as u32).to_ne_bytes());
        for c in self.low.iter().chain(self.high.iter()) {
            bytes.extend_from_slice(&c.to_ne_bytes());
        }
        bytes
    }

    /// Decodes a region previously produced by [`Region::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> SpatialResult<Region> {
        let mut region = Region::default();
        region.load_from_bytes(bytes)?;
        Ok(region)
    }

    /// Overwrites this region with a decoded one, reallocating if the encoded
    /// dimension differs. Nothing is written if the buffer is malformed.
    pub fn load_from_bytes(&mut self, bytes: &[u8]) -> SpatialResult<()> {
        let header = bytes.get(..DIMENSION_BYTES).ok_or_else(|| {
            SpatialError::Serialization(format!(
                "Region buffer too short for header: {} bytes",
                bytes.len()
            ))
        })?;
        let mut dim_buf = [0u8; DIMENSION_BYTES];
        dim_buf.copy_from_slice(header);
        let dimension = u32::from_ne_bytes(dim_buf) as usize;

        let payload_len = dimension
            .checked_mul(2 * COORD_BYTES)
            .ok_or_else(|| {
                SpatialError::Serialization(format!("Region dimension too large: {}", dimension))
            })?;
        let payload = bytes
            .get(DIMENSION_BYTES..)
            .and_then(|rest| rest.get(..payload_len))
            .ok_or_else(|| {
                SpatialError::Serialization(format!(
                    "Region buffer too short: expected {} bytes, got {}",
                    DIMENSION_BYTES + payload_len,
                    bytes.len()
                ))
            })?;

        if self.dimension() != dimension {
            debug!(
                "Reallocating region from dimension {} to {}",
                self.dimension(),
                dimension
            );
        }
        self.make_dimension(dimension);

        let (low_bytes, high_bytes) = payload.split_at(dimension * COORD_BYTES);
        for (dst, chunk) in self.low.iter_mut().zip(low_bytes.chunks_exact(COORD_BYTES)) {
            *dst = read_f64(chunk);
        }
        for (dst, chunk) in self.high.iter_mut().zip(high_bytes.chunks_exact(COORD_BYTES)) {
            *dst = read_f64(chunk);
        }
        Ok(())
    }
}

const DIMENSION_BYTES: usize = std::mem::size_of::<u32>();
const COORD_BYTES: usize = std::mem::size_of::<f64>();

fn read_f64(chunk: &[u8]) -> f64 {
    let mut buf = [0u8; COORD_BYTES];
    buf.copy_from_slice(chunk);
    f64::from_ne_bytes(buf)
}

fn near(a: f64, b: f64) -> bool {
    a >= b - EPSILON && a <= b + EPSILON
}

fn validate_bounds(low: &[f64], high: &[f64]) -> SpatialResult<()> {
    if !(cfg!(debug_assertions) || cfg!(feature = "validate-bounds")) {
        return Ok(());
    }
    for (i, (&l, &h)) in low.iter().zip(high.iter()).enumerate() {
        // an infinite region legitimately has low > high
        if l > h && !(l == f64::MAX || h == -f64::MAX) {
            debug!("Rejecting region bounds {} > {} along axis {}", l, h, i);
            return Err(SpatialError::InvalidArgument(
                "Region::new: Low point has larger coordinates than High point. \
                 Neither point is infinity."
                    .into(),
            ));
        }
    }
    Ok(())
}

impl PartialEq for Region {
    /// Regions are equal when they have the same dimension and every
    /// coordinate agrees within [`EPSILON`].
    fn eq(&self, other: &Self) -> bool {
        self.dimension() == other.dimension()
            && (0..self.dimension())
                .all(|i| near(self.low[i], other.low[i]) && near(self.high[i], other.high[i]))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Low: ")?;
        for l in &self.low {
            write!(f, "{} ", l)?;
        }
        write!(f, ", High: ")?;
        for h in &self.high {
            write!(f, "{} ", h)?;
        }
        Ok(())
    }
}

impl Shape for Region {
    fn kind(&self) -> ShapeKind<'_> {
        ShapeKind::Region(self)
    }

    fn dimension(&self) -> usize {
        Region::dimension(self)
    }

    fn mbr(&self) -> Region {
        self.clone()
    }

    fn center(&self) -> Point {
        Region::center(self)
    }

    fn area(&self) -> f64 {
        Region::area(self)
    }
}
