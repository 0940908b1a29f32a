//! This module defines the numeric model and the traits through which the tracing core
//! reads a scene: [`BHValue`], [`ShapeKind`], [`RayTrace`] and [`TraceNode`].

use std::fmt::{Display, Formatter};

use nalgebra::{Point, RealField, Scalar};
use num_traits::{Float, FromPrimitive, ToPrimitive};

use crate::aabb::Bounded;
use crate::error::TraceResult;

/// The scalar type of a scene.
///
/// [`RealField`] is required for the partial-pivot LU solve in triangle intersection,
/// [`Float`] for infinities and machine epsilon.
pub trait BHValue:
    Scalar + Copy + RealField + Float + FromPrimitive + ToPrimitive + Display
{
    /// Displacements whose magnitude is at most this value are treated as parallel
    /// to a slab boundary by the box intersector. Equals five machine epsilons.
    const PARALLEL_TOLERANCE: Self;
}

impl BHValue for f32 {
    const PARALLEL_TOLERANCE: f32 = 5.0 * f32::EPSILON;
}

impl BHValue for f64 {
    const PARALLEL_TOLERANCE: f64 = 5.0 * f64::EPSILON;
}

/// The closed set of entity kinds a traversal can encounter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// An inner hierarchy node holding primitives and children.
    Node,
    /// An axis aligned bounding box.
    Box,
    /// A terminal triangle primitive.
    Triangle,
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                ShapeKind::Node => "node",
                ShapeKind::Box => "box",
                ShapeKind::Triangle => "triangle",
            }
        )
    }
}

/// Something a segment from `start` to `end` can be traced against.
///
/// The segment is parametrized as `start + l * (end - start)`, so `l = 1` is `end`.
/// Implementations return the smallest hit parameter in `[0, l_max]`, or positive
/// infinity if there is none.
pub trait RayTrace<T: BHValue, const D: usize> {
    /// The kind tag of this entity.
    const KIND: ShapeKind;

    /// Traces the segment `start`..`end` against `self`, ignoring hits beyond `l_max`.
    fn ray_trace(&self, start: &Point<T, D>, end: &Point<T, D>, l_max: T) -> TraceResult<T>;
}

/// Read-only view of a hierarchy node, as consumed by [`trace_node`].
///
/// A node stores zero or more primitives directly and has zero or more children.
/// Each child exposes a bounding box which must contain everything beneath it;
/// the traversal relies on that containment to prune.
///
/// [`trace_node`]: ../bvh/fn.trace_node.html
pub trait TraceNode<T: BHValue, const D: usize> {
    /// Primitive type stored directly in the node.
    type Data: RayTrace<T, D>;

    /// Child type. Either another node or a terminal primitive.
    type Child: RayTrace<T, D> + Bounded<T, D>;

    /// Number of primitives stored directly in this node.
    fn n_data(&self) -> usize;

    /// Returns the primitive at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.n_data()`.
    fn data(&self, index: usize) -> &Self::Data;

    /// Number of children of this node.
    fn n_children(&self) -> usize;

    /// Returns the child at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.n_children()`.
    fn child(&self, index: usize) -> &Self::Child;
}

#[cfg(test)]
mod tests {
    use super::{BHValue, ShapeKind};

    #[test]
    fn test_parallel_tolerance_is_five_epsilon() {
        assert_eq!(f32::PARALLEL_TOLERANCE, 5.0 * f32::EPSILON);
        assert_eq!(f64::PARALLEL_TOLERANCE, 5.0 * f64::EPSILON);
    }

    #[test]
    fn test_shape_kind_display() {
        assert_eq!(ShapeKind::Node.to_string(), "node");
        assert_eq!(ShapeKind::Box.to_string(), "box");
        assert_eq!(ShapeKind::Triangle.to_string(), "triangle");
    }
}
