//! This module defines a [`Segment`], the owned form of the `(start, end)` pair every
//! tracing function takes.

use nalgebra::{Point, SVector};
use num_traits::Float;

use crate::bounding_hierarchy::{BHValue, RayTrace};
use crate::error::TraceResult;

/// A segment from `start` to `end`.
///
/// The parameter `l` names the point `start + l * (end - start)`, so `l = 0` is `start`
/// and `l = 1` is `end`. Parameters above `1` continue past `end` along the same line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment<T: BHValue, const D: usize> {
    /// The point at parameter `0`.
    pub start: Point<T, D>,

    /// The point at parameter `1`.
    pub end: Point<T, D>,
}

impl<T: BHValue, const D: usize> Segment<T, D> {
    /// Creates a new [`Segment`] from `start` to `end`.
    ///
    /// # Examples
    /// ```
    /// use segtrace::ray::Segment;
    /// use nalgebra::Point3;
    ///
    /// let start = Point3::new(0.0, 0.0, 0.0);
    /// let end = Point3::new(2.0, 0.0, 0.0);
    /// let segment = Segment::new(start, end);
    ///
    /// assert_eq!(segment.point_at(0.5), Point3::new(1.0, 0.0, 0.0));
    /// ```
    pub fn new(start: Point<T, D>, end: Point<T, D>) -> Segment<T, D> {
        Segment { start, end }
    }

    /// Returns `end - start`, the displacement covered between parameters `0` and `1`.
    pub fn direction(&self) -> SVector<T, D> {
        self.end - self.start
    }

    /// Returns the point at parameter `l`.
    pub fn point_at(&self, l: T) -> Point<T, D> {
        self.start + self.direction() * l
    }

    /// Traces this segment against `shape`, ignoring hits beyond `l_max`.
    ///
    /// # Examples
    /// ```
    /// use segtrace::aabb::Aabb;
    /// use segtrace::ray::Segment;
    /// use nalgebra::Point3;
    ///
    /// let aabb = Aabb::with_bounds(Point3::new(1.0, -1.0, -1.0), Point3::new(2.0, 1.0, 1.0));
    /// let segment = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0));
    ///
    /// assert_eq!(segment.trace(&aabb, 1.0), Ok(0.25));
    /// ```
    pub fn trace<S: RayTrace<T, D>>(&self, shape: &S, l_max: T) -> TraceResult<T> {
        shape.ray_trace(&self.start, &self.end, l_max)
    }

    /// Returns the point where this segment first hits `shape` within `l_max`, if any.
    pub fn hit_point<S: RayTrace<T, D>>(
        &self,
        shape: &S,
        l_max: T,
    ) -> TraceResult<Option<Point<T, D>>> {
        let l = self.trace(shape, l_max)?;
        Ok(<T as Float>::is_finite(l).then(|| self.point_at(l)))
    }
}

#[cfg(test)]
mod tests {
    use crate::ray::Segment;
    use crate::testbase::{TPoint3, TTriangle3};

    #[test]
    fn test_point_at_endpoints() {
        let start = TPoint3::new(1.0, 2.0, 3.0);
        let end = TPoint3::new(-1.0, 0.0, 7.0);
        let segment = Segment::new(start, end);

        assert_eq!(segment.point_at(0.0), start);
        assert_eq!(segment.point_at(1.0), end);
        assert_eq!(segment.point_at(2.0), TPoint3::new(-3.0, -2.0, 11.0));
    }

    #[test]
    fn test_hit_point() {
        let triangle = TTriangle3::new(
            TPoint3::new(0.0, 0.0, 0.0),
            TPoint3::new(1.0, 0.0, 0.0),
            TPoint3::new(0.0, 1.0, 0.0),
        );

        let hitting = Segment::new(TPoint3::new(0.2, 0.2, 1.0), TPoint3::new(0.2, 0.2, -1.0));
        let hit = hitting.hit_point(&triangle, 1.0).unwrap().unwrap();
        assert!((hit - TPoint3::new(0.2, 0.2, 0.0)).norm() < 1e-12);

        let missing = Segment::new(TPoint3::new(0.8, 0.8, 1.0), TPoint3::new(0.8, 0.8, -1.0));
        assert_eq!(missing.hit_point(&triangle, 1.0), Ok(None));
    }
}
