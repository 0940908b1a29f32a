//! This module holds the [`Segment`] definition and the box and triangle intersectors.
mod intersect_aabb;
mod intersect_triangle;
mod segment;

pub use self::intersect_aabb::*;
pub use self::intersect_triangle::*;
pub use self::segment::*;
