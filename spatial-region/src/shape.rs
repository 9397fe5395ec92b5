//! Shape capabilities shared by regions, points and foreign shapes.
//!
//! Region predicates only understand two concrete shapes. Rather than probing
//! the runtime type, every shape reports what it is through [`Shape::kind`],
//! and the region matches on the closed [`ShapeKind`] set. Shapes that are
//! neither a region nor a point answer [`ShapeKind::Other`]; they can still
//! take part in operations that only need their bounding region.

use crate::point::Point;
use crate::region::Region;

/// The concrete kind of a shape, as seen by region operations.
#[derive(Debug, Clone, Copy)]
pub enum ShapeKind<'a> {
    Region(&'a Region),
    Point(&'a Point),
    /// Any other shape; carries a name for diagnostics.
    Other(&'a str),
}

/// A shape that can be bounded by a region.
pub trait Shape {
    /// Reports the concrete kind of this shape.
    fn kind(&self) -> ShapeKind<'_>;

    fn dimension(&self) -> usize;

    /// Returns the minimum bounding region of this shape.
    fn mbr(&self) -> Region;

    /// Returns the center of this shape.
    fn center(&self) -> Point;

    fn area(&self) -> f64;
}

impl Shape for Point {
    fn kind(&self) -> ShapeKind<'_> {
        ShapeKind::Point(self)
    }

    fn dimension(&self) -> usize {
        Point::dimension(self)
    }

    fn mbr(&self) -> Region {
        Region::from_point(self)
    }

    fn center(&self) -> Point {
        self.clone()
    }

    fn area(&self) -> f64 {
        0.0
    }
}
