//! Segment/[`Aabb`] intersection using the slab method.

use nalgebra::Point;
use num_traits::Float;

use crate::aabb::Aabb;
use crate::bounding_hierarchy::{BHValue, RayTrace, ShapeKind};
use crate::error::TraceResult;
use crate::utils::{fast_max, fast_min};

/// Returns the parameter at which the segment `start`..`end` enters `aabb`, or positive
/// infinity if it misses the box, the box is empty or the entry lies beyond `l_max`.
///
/// The result is a lower bound for the hit parameter of anything inside the box, which is
/// what makes it usable for pruning a hierarchy. A segment starting inside the box (or on
/// one of its faces) enters at `0`.
///
/// # Examples
/// ```
/// use segtrace::aabb::Aabb;
/// use segtrace::trace_aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::with_bounds(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
/// let start = Point3::new(-1.0, 0.5, 0.5);
/// let end = Point3::new(2.0, 0.5, 0.5);
///
/// let l = trace_aabb(&start, &end, &aabb, f64::INFINITY);
/// assert!((l - 1.0 / 3.0).abs() < 1e-12);
/// assert_eq!(trace_aabb(&start, &end, &aabb, 0.25), f64::INFINITY);
/// ```
pub fn trace_aabb<T: BHValue, const D: usize>(
    start: &Point<T, D>,
    end: &Point<T, D>,
    aabb: &Aabb<T, D>,
    l_max: T,
) -> T {
    let inf = <T as Float>::infinity();

    if aabb.is_empty() {
        return inf;
    }

    let mut lower_bound = T::zero();
    let mut upper_bound = inf;

    for i in 0..D {
        let delta = end[i] - start[i];

        let (i_low, i_high) = if <T as Float>::abs(delta) <= T::PARALLEL_TOLERANCE {
            // Parallel to the slab: inside it for every parameter, or for none.
            // The inverted interval forces a miss through the reduction below.
            if (aabb.min[i] - start[i]) * (aabb.max[i] - start[i]) <= T::zero() {
                (-inf, inf)
            } else {
                (inf, -inf)
            }
        } else {
            let l1 = (aabb.min[i] - start[i]) / delta;
            let l2 = (aabb.max[i] - start[i]) / delta;

            if l1 < l2 {
                (l1, l2)
            } else {
                (l2, l1)
            }
        };

        lower_bound = fast_max(i_low, lower_bound);
        upper_bound = fast_min(i_high, upper_bound);
    }

    if lower_bound > upper_bound || lower_bound > l_max {
        return inf;
    }

    lower_bound
}

impl<T: BHValue, const D: usize> RayTrace<T, D> for Aabb<T, D> {
    const KIND: ShapeKind = ShapeKind::Box;

    fn ray_trace(&self, start: &Point<T, D>, end: &Point<T, D>, l_max: T) -> TraceResult<T> {
        Ok(trace_aabb(start, end, self, l_max))
    }
}
