//! # Spatial Region - Minimum Bounding Regions for Spatial Indexes
//!
//! This crate provides the axis-aligned bounding region (hyper-rectangle,
//! "MBR") that spatial indexes such as R-trees use to bound their entries
//! and prune subtrees during search.
//!
//! ## Features
//!
//! - **Any Dimension**: Regions and points of arbitrary dimensionality
//! - **Predicates**: Intersects, contains and touches against regions and points
//! - **Distances**: Minimum and maximum distances, squared forms for hot paths
//! - **Combination**: In-place and pure unions, intersections and overlap areas
//! - **Infinite Regions**: A sentinel "empty" region to accumulate unions from
//! - **Hausdorff Bounds**: Lower and upper bounds for 2-D shapes via edge decomposition
//! - **Binary Encoding**: Compact `[dimension][low..][high..]` byte layout
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_region::{Point, Region, SpatialResult};
//!
//! # fn main() -> SpatialResult<()> {
//! // Accumulate the bounds of a few points
//! let mut bounds = Region::infinite(2);
//! bounds.combine_point(&Point::new(&[1.0, 4.0]))?;
//! bounds.combine_point(&Point::new(&[3.0, 2.0]))?;
//! assert_eq!(bounds, Region::new(&[1.0, 2.0], &[3.0, 4.0])?);
//!
//! // Measure the gap to another region
//! let other = Region::new(&[6.0, 2.0], &[7.0, 4.0])?;
//! assert_eq!(bounds.min_distance_region(&other)?, 3.0);
//!
//! // Bound the Hausdorff distance between the shapes they enclose
//! let lb = bounds.haus_dist_lb(&other)?;
//! let ub = bounds.haus_dist_ub_region(&other)?;
//! assert!(lb <= ub);
//! # Ok(())
//! # }
//! ```
//!
//! ## Cargo Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for [`Region`] and [`Point`]
//! - `validate-bounds`: check `low <= high` on construction in release builds
//!   too (always checked when debug assertions are on)

pub mod errors;
pub mod hausdorff;
pub mod point;
pub mod region;
pub mod shape;

pub use errors::{SpatialError, SpatialResult};
pub use hausdorff::Edge;
pub use point::Point;
pub use region::{Region, EPSILON};
pub use shape::{Shape, ShapeKind};
