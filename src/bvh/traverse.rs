//! Branch-and-bound traversal of a hierarchy, plus the brute-force and batched entry points
//! built around it.

use std::cmp::Ordering;

use log::{debug, trace};
use nalgebra::Point;
use num_traits::Float;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::aabb::Bounded;
use crate::bounding_hierarchy::{BHValue, RayTrace, TraceNode};
use crate::bvh::BvhNode;
use crate::error::TraceResult;
use crate::ray::{trace_aabb, Segment};
use crate::utils::fast_min;

/// Returns the smallest parameter at which the segment `start`..`end` hits anything reachable
/// under `node`, or positive infinity if nothing is hit within `l_max`.
///
/// The primitives stored directly in `node` are traced first. The children are then sorted
/// by the parameter at which the segment enters their bounding boxes and visited in that
/// order. As soon as a child's entry parameter is not strictly less than both the best hit
/// found so far and `l_max`, the remaining children are skipped: nothing inside their boxes
/// can be hit earlier. The result is identical to tracing every primitive one by one, see
/// [`trace_brute_force`].
///
/// Recursion depth equals the depth of the hierarchy.
///
/// # Errors
///
/// Propagates the first error of any primitive actually traced, e.g. a triangle in a
/// dimension other than 3. Pruned subtrees are never traced and so never fail.
///
/// # Examples
/// ```
/// use segtrace::bvh::BvhNode;
/// use segtrace::shapes::Triangle;
/// use segtrace::trace_node;
/// use nalgebra::Point3;
///
/// let near = Triangle::new(
///     Point3::new(1.0, -1.0, -1.0),
///     Point3::new(1.0, 2.0, -1.0),
///     Point3::new(1.0, -1.0, 2.0),
/// );
/// let far = Triangle::new(
///     Point3::new(3.0, -1.0, -1.0),
///     Point3::new(3.0, 2.0, -1.0),
///     Point3::new(3.0, -1.0, 2.0),
/// );
/// let mut root = BvhNode::new();
/// root.push_child(BvhNode::from_data(vec![far]));
/// root.push_child(BvhNode::from_data(vec![near]));
///
/// let start = Point3::new(0.0, 0.0, 0.0);
/// let end = Point3::new(4.0, 0.0, 0.0);
/// let l: f64 = trace_node(&start, &end, &root, 1.0).unwrap();
/// assert!((l - 0.25).abs() < 1e-12);
/// ```
///
/// [`trace_brute_force`]: fn.trace_brute_force.html
pub fn trace_node<T: BHValue, const D: usize, N: TraceNode<T, D>>(
    start: &Point<T, D>,
    end: &Point<T, D>,
    node: &N,
    l_max: T,
) -> TraceResult<T> {
    let mut result = <T as Float>::infinity();

    for i in 0..node.n_data() {
        result = fast_min(node.data(i).ray_trace(start, end, l_max)?, result);
    }

    let mut lower_bounds = (0..node.n_children())
        .map(|i| (trace_aabb(start, end, &node.child(i).aabb(), l_max), i))
        .collect::<Vec<_>>();
    lower_bounds.sort_unstable_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    for (visited, &(lower_bound, index)) in lower_bounds.iter().enumerate() {
        if !(lower_bound < fast_min(result, l_max)) {
            trace!(
                "pruned {} of {} children ({}) at lower bound {}",
                lower_bounds.len() - visited,
                lower_bounds.len(),
                <N::Child as RayTrace<T, D>>::KIND,
                lower_bound
            );
            break;
        }
        result = fast_min(node.child(index).ray_trace(start, end, l_max)?, result);
    }

    Ok(result)
}

/// Traces the segment `start`..`end` against every primitive under `node`, without using any
/// bounding box. Slow, but a reference for [`trace_node`].
///
/// [`trace_node`]: fn.trace_node.html
pub fn trace_brute_force<T: BHValue, const D: usize, S>(
    start: &Point<T, D>,
    end: &Point<T, D>,
    node: &BvhNode<T, D, S>,
    l_max: T,
) -> TraceResult<T>
where
    S: RayTrace<T, D> + Bounded<T, D>,
{
    node.primitives()
        .try_fold(<T as Float>::infinity(), |best, shape| {
            Ok(fast_min(shape.ray_trace(start, end, l_max)?, best))
        })
}

/// Traces every segment of `segments` against `node`, in parallel.
///
/// The results are in the order of `segments`. Fails with the first error encountered.
#[cfg(feature = "rayon")]
pub fn trace_segments<T: BHValue, const D: usize, N>(
    node: &N,
    segments: &[Segment<T, D>],
    l_max: T,
) -> TraceResult<Vec<T>>
where
    N: TraceNode<T, D> + Sync,
{
    debug!("tracing {} segments in parallel", segments.len());
    segments
        .par_iter()
        .map(|segment| trace_node(&segment.start, &segment.end, node, l_max))
        .collect()
}

/// Traces every segment of `segments` against `node`.
///
/// The results are in the order of `segments`. Fails with the first error encountered.
#[cfg(not(feature = "rayon"))]
pub fn trace_segments<T: BHValue, const D: usize, N>(
    node: &N,
    segments: &[Segment<T, D>],
    l_max: T,
) -> TraceResult<Vec<T>>
where
    N: TraceNode<T, D> + Sync,
{
    debug!("tracing {} segments", segments.len());
    segments
        .iter()
        .map(|segment| trace_node(&segment.start, &segment.end, node, l_max))
        .collect()
}


#[cfg(all(feature = "bench", test))]
mod bench {
    use super::{trace_brute_force, trace_node, trace_segments};
    use crate::testbase::{
        aimed_segment, build_sorted_scene, create_n_cubes, default_bounds, TSegment3,
    };

    fn bench_segments(n: usize) -> Vec<TSegment3> {
        let bounds = default_bounds();
        let triangles = create_n_cubes(100, &bounds);
        (0..n as u64)
            .map(|seed| aimed_segment(seed, &bounds, &triangles[seed as usize % triangles.len()]))
            .collect()
    }

    #[bench]
    /// Benchmark tracing through a hierarchy of 12,000 triangles.
    fn bench_trace_node_12k_triangles(b: &mut ::test::Bencher) {
        let triangles = create_n_cubes(1_000, &default_bounds());
        let scene = build_sorted_scene(&triangles);
        let segments = bench_segments(64);
        b.iter(|| {
            for segment in &segments {
                trace_node(&segment.start, &segment.end, &scene, 1.0).unwrap();
            }
        });
    }

    #[bench]
    /// Benchmark testing every one of 12,000 triangles.
    fn bench_trace_brute_force_12k_triangles(b: &mut ::test::Bencher) {
        let triangles = create_n_cubes(1_000, &default_bounds());
        let scene = build_sorted_scene(&triangles);
        let segments = bench_segments(64);
        b.iter(|| {
            for segment in &segments {
                trace_brute_force(&segment.start, &segment.end, &scene, 1.0).unwrap();
            }
        });
    }

    #[bench]
    /// Benchmark a batch of 1,024 segments through a hierarchy of 12,000 triangles.
    fn bench_trace_segments_12k_triangles(b: &mut ::test::Bencher) {
        let triangles = create_n_cubes(1_000, &default_bounds());
        let scene = build_sorted_scene(&triangles);
        let segments = bench_segments(1_024);
        b.iter(|| trace_segments(&scene, &segments, 1.0).unwrap());
    }
}
