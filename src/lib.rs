//! A crate which traces line segments through bounding volume hierarchies of triangles
//! and axis-aligned boxes, returning the parameter of the nearest hit.
//!
//! ## About
//!
//! A segment from `start` to `end` is parametrized as `start + l * (end - start)`, so the end
//! point sits at `l = 1`. Every tracing function returns the smallest `l` in `[0, l_max]` at
//! which something is hit, or positive infinity if nothing is.
//!
//! Tracing a hierarchy is a branch-and-bound search: the parameter at which a segment enters
//! a child's bounding box is a lower bound for any hit inside it, so children are visited in
//! order of that bound and skipped as soon as it cannot beat the best hit found so far.
//! The hierarchy itself is built by the caller, either as a [`BvhNode`] tree or as any type
//! implementing [`TraceNode`].
//!
//! ## Example
//!
//! ```
//! use segtrace::bvh::BvhNode;
//! use segtrace::shapes::Triangle;
//! use segtrace::trace_node;
//! use nalgebra::Point3;
//!
//! // Two walls across the x axis, at x = 2 and x = 5.
//! let wall = |x: f64| {
//!     Triangle::new(
//!         Point3::new(x, -10.0, -10.0),
//!         Point3::new(x, 10.0, -10.0),
//!         Point3::new(x, -10.0, 10.0),
//!     )
//! };
//!
//! let mut root = BvhNode::new();
//! root.push_child(BvhNode::from_data(vec![wall(5.0)]));
//! root.push_child(BvhNode::from_data(vec![wall(2.0)]));
//!
//! let start = Point3::new(0.0, -2.0, -2.0);
//! let end = Point3::new(10.0, -2.0, -2.0);
//!
//! let l = trace_node(&start, &end, &root, 1.0).unwrap();
//! assert!((l - 0.2).abs() < 1e-12);
//!
//! // Nothing is hit before l = 0.1.
//! assert_eq!(trace_node(&start, &end, &root, 0.1), Ok(f64::INFINITY));
//! ```
//!
//! ## Features
//!
//! - `rayon` (default **enabled**) - traces batches of segments in parallel in [`trace_segments`]
//! - `serde` (default **disabled**) - adds `Serialize` and `Deserialize` implementations for some types
//! - `bench` (default **disabled**) - internal benchmarking, requires a nightly compiler
//!
//! [`BvhNode`]: bvh/struct.BvhNode.html
//! [`TraceNode`]: bounding_hierarchy/trait.TraceNode.html
//! [`trace_segments`]: bvh/fn.trace_segments.html
//!

#![cfg_attr(feature = "bench", feature(test))]

#[cfg(all(feature = "bench", test))]
extern crate test;

pub mod aabb;
pub mod bounding_hierarchy;
pub mod bvh;
pub mod error;
pub mod ray;
pub mod shapes;
mod utils;

#[cfg(test)]
mod testbase;

pub use crate::bvh::{trace_brute_force, trace_node, trace_segments};
pub use crate::error::{TraceError, TraceResult};
pub use crate::ray::{trace_aabb, trace_triangle};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
