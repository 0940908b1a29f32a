//! Segment/triangle intersection through a general 3x3 linear solve.

use nalgebra::{Matrix3, Point, Vector3};
use num_traits::Float;

use crate::bounding_hierarchy::BHValue;
use crate::error::{TraceError, TraceResult};
use crate::shapes::Triangle;

/// Returns the parameter at which the segment `start`..`end` hits `triangle`, or positive
/// infinity if there is no hit in `[0, l_max]`.
///
/// Solves `start + l * (end - start) = a + u * (b - a) + v * (c - a)` with a partially
/// pivoted LU decomposition and accepts the hit if `u >= 0`, `v >= 0` and `u + v <= 1`.
/// Both faces of the triangle are hit. Degenerate triangles and segments parallel to the
/// triangle's plane produce no hit.
///
/// # Errors
///
/// Returns [`TraceError::UnsupportedDimension`] unless `D == 3`.
///
/// # Examples
/// ```
/// use segtrace::shapes::Triangle;
/// use segtrace::trace_triangle;
/// use nalgebra::Point3;
///
/// let triangle = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let start = Point3::new(0.2, 0.2, 1.0);
/// let end = Point3::new(0.2, 0.2, -1.0);
///
/// let l: f64 = trace_triangle(&start, &end, &triangle, 1.0).unwrap();
/// assert!((l - 0.5).abs() < 1e-12);
/// ```
///
/// [`TraceError::UnsupportedDimension`]: ../error/enum.TraceError.html
pub fn trace_triangle<T: BHValue, const D: usize>(
    start: &Point<T, D>,
    end: &Point<T, D>,
    triangle: &Triangle<T, D>,
    l_max: T,
) -> TraceResult<T> {
    if D != 3 {
        return Err(TraceError::UnsupportedDimension { dimension: D });
    }

    let inf = <T as Float>::infinity();
    let (a, b, c) = (&triangle.a, &triangle.b, &triangle.c);

    let m = Matrix3::from_fn(|row, col| match col {
        0 => end[row] - start[row],
        1 => b[row] - a[row],
        _ => c[row] - a[row],
    });
    let rhs = Vector3::from_fn(|row, _| start[row] - a[row]);

    let Some(solution) = m.lu().solve(&rhs) else {
        return Ok(inf);
    };

    // Nearly singular systems may still blow up to infinities or NaNs.
    if !solution.iter().all(|x| <T as Float>::is_finite(*x)) {
        return Ok(inf);
    }

    let l = -solution[0];
    let (u, v) = (solution[1], solution[2]);

    if l > l_max || l < T::zero() {
        return Ok(inf);
    }

    if u < T::zero() || v < T::zero() || u + v > T::one() {
        return Ok(inf);
    }

    Ok(l)
}
