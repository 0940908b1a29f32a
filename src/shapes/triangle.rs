//! This module defines a Triangle and its intersection algorithms

use nalgebra::Point;

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::{BHValue, RayTrace, ShapeKind};
use crate::error::TraceResult;
use crate::ray::trace_triangle;

/// A triangle struct. Instance of a more complex [`Bounded`] primitive.
///
/// The vertices may be collinear; such a triangle is never hit.
///
/// [`Bounded`]: ../aabb/trait.Bounded.html
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle<T: BHValue, const D: usize> {
    /// First point on the triangle
    pub a: Point<T, D>,
    /// Second point on the triangle
    pub b: Point<T, D>,
    /// Third point on the triangle
    pub c: Point<T, D>,
}

impl<T: BHValue, const D: usize> Triangle<T, D> {
    /// Creates a new triangle from three points.
    pub fn new(a: Point<T, D>, b: Point<T, D>, c: Point<T, D>) -> Triangle<T, D> {
        Triangle { a, b, c }
    }

    /// Returns vertex `k`.
    ///
    /// # Panics
    ///
    /// Panics if `k > 2`.
    pub fn vertex(&self, k: usize) -> &Point<T, D> {
        match k {
            0 => &self.a,
            1 => &self.b,
            2 => &self.c,
            _ => panic!("Tried to get vertex {k} of a triangle."),
        }
    }
}

impl<T: BHValue, const D: usize> Bounded<T, D> for Triangle<T, D> {
    fn aabb(&self) -> Aabb<T, D> {
        Aabb::empty().grow(&self.a).grow(&self.b).grow(&self.c)
    }
}

impl<T: BHValue, const D: usize> RayTrace<T, D> for Triangle<T, D> {
    const KIND: ShapeKind = ShapeKind::Triangle;

    fn ray_trace(&self, start: &Point<T, D>, end: &Point<T, D>, l_max: T) -> TraceResult<T> {
        trace_triangle(start, end, self, l_max)
    }
}
