//! Common utilities shared by unit tests.
#![cfg(test)]

use nalgebra::{Point, SVector};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::aabb::Aabb;
use crate::bvh::BvhNode;
use crate::ray::Segment;
use crate::shapes::Triangle;

/// A vector represented as a tuple
pub type TupleVec = (f64, f64, f64);

pub type TPoint3 = Point<f64, 3>;
pub type TVector3 = SVector<f64, 3>;
pub type TAabb3 = Aabb<f64, 3>;
pub type TTriangle3 = Triangle<f64, 3>;
pub type TSegment3 = Segment<f64, 3>;
pub type TNode3 = BvhNode<f64, 3, TTriangle3>;

/// Generate a `TupleVec` for [`proptest::strategy::Strategy`] from -1000 to 1000.
pub fn tuplevec_small_strategy() -> impl Strategy<Value = TupleVec> {
    (-1e3_f64..1e3_f64, -1e3_f64..1e3_f64, -1e3_f64..1e3_f64)
}

/// Convert a `TupleVec` to a [`TPoint3`].
pub fn tuple_to_point(tpl: &TupleVec) -> TPoint3 {
    TPoint3::new(tpl.0, tpl.1, tpl.2)
}

/// Creates a unit size cube centered at `pos` and pushes the triangles to `shapes`.
fn push_cube(pos: TPoint3, shapes: &mut Vec<TTriangle3>) {
    let top_front_right = pos + TVector3::new(0.5, 0.5, -0.5);
    let top_back_right = pos + TVector3::new(0.5, 0.5, 0.5);
    let top_back_left = pos + TVector3::new(-0.5, 0.5, 0.5);
    let top_front_left = pos + TVector3::new(-0.5, 0.5, -0.5);
    let bottom_front_right = pos + TVector3::new(0.5, -0.5, -0.5);
    let bottom_back_right = pos + TVector3::new(0.5, -0.5, 0.5);
    let bottom_back_left = pos + TVector3::new(-0.5, -0.5, 0.5);
    let bottom_front_left = pos + TVector3::new(-0.5, -0.5, -0.5);

    let faces = [
        (top_back_right, top_front_right, top_front_left),
        (top_front_left, top_back_left, top_back_right),
        (bottom_front_left, bottom_front_right, bottom_back_right),
        (bottom_back_right, bottom_back_left, bottom_front_left),
        (top_back_left, top_front_left, bottom_front_left),
        (bottom_front_left, bottom_back_left, top_back_left),
        (bottom_front_right, top_front_right, top_back_right),
        (top_back_right, bottom_back_right, bottom_front_right),
        (top_front_left, top_front_right, bottom_front_right),
        (bottom_front_right, bottom_front_left, top_front_left),
        (bottom_back_right, top_back_right, top_back_left),
        (top_back_left, bottom_back_left, bottom_back_right),
    ];
    shapes.extend(faces.iter().map(|&(a, b, c)| TTriangle3::new(a, b, c)));
}

/// Implementation of splitmix64.
/// For reference see: http://xoroshiro.di.unimi.it/splitmix64.c
fn splitmix64(x: &mut u64) -> u64 {
    *x = x.wrapping_add(0x9E3779B97F4A7C15u64);
    let mut z = *x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9u64);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EBu64);
    z ^ (z >> 31)
}

/// Generates a new `i32` triple. Mutates the seed.
pub fn next_point3_raw(seed: &mut u64) -> (i32, i32, i32) {
    let u = splitmix64(seed);
    let a = ((u >> 32) & 0xFFFFFFFF) as i64 - 0x80000000;
    let b = (u & 0xFFFFFFFF) as i64 - 0x80000000;
    let c = a ^ b.rotate_left(6);
    (a as i32, b as i32, c as i32)
}

/// Generates a new point, which will lie inside the given `aabb`. Mutates the seed.
pub fn next_point3(seed: &mut u64, aabb: &TAabb3) -> TPoint3 {
    let (a, b, c) = next_point3_raw(seed);
    let unit = |x: i32| (x as f64 - i32::MIN as f64) / u32::MAX as f64;
    let float_vector = TVector3::new(unit(a), unit(b), unit(c));

    assert!(float_vector.x >= 0.0 && float_vector.x <= 1.0);
    assert!(float_vector.y >= 0.0 && float_vector.y <= 1.0);
    assert!(float_vector.z >= 0.0 && float_vector.z <= 1.0);

    aabb.min + aabb.size().component_mul(&float_vector)
}

/// Returns an [`Aabb`] which defines the default testing space bounds.
/// Small enough for unit cubes to occlude each other now and then.
pub fn default_bounds() -> TAabb3 {
    TAabb3::with_bounds(
        TPoint3::new(-25.0, -25.0, -25.0),
        TPoint3::new(25.0, 25.0, 25.0),
    )
}

/// Creates `n` deterministic random cubes. Returns the `Vec` of surface triangles,
/// twelve consecutive triangles per cube.
pub fn create_n_cubes(n: usize, bounds: &TAabb3) -> Vec<TTriangle3> {
    let mut vec = Vec::new();
    let mut seed = 0;
    for _ in 0..n {
        push_cube(next_point3(&mut seed, bounds), &mut vec);
    }
    vec
}

/// Creates a segment from a random point in `bounds` through the centroid of `target`,
/// reaching the centroid at parameter `0.5`.
pub fn aimed_segment(seed: u64, bounds: &TAabb3, target: &TTriangle3) -> TSegment3 {
    let mut seed = seed;
    let start = next_point3(&mut seed, bounds);
    let centroid = TPoint3::from((target.a.coords + target.b.coords + target.c.coords) / 3.0);
    TSegment3::new(start, start + (centroid - start) * 2.0)
}

/// One leaf node per cube, as laid out by [`create_n_cubes`].
fn cube_leaves(triangles: &[TTriangle3]) -> Vec<TNode3> {
    triangles
        .chunks(12)
        .map(|cube| TNode3::from_data(cube.to_vec()))
        .collect()
}

/// Groups `leaves` under nodes with at most four children. With `sort`, each level splits
/// the leaves along the axis in which their centers spread the most.
fn assemble(mut leaves: Vec<TNode3>, sort: bool) -> TNode3 {
    if leaves.len() <= 4 {
        return TNode3::from_children(leaves);
    }

    if sort {
        let centers = leaves
            .iter()
            .fold(TAabb3::empty(), |aabb, leaf| aabb.grow(&leaf.aabb().center()));
        let size = centers.size();
        let axis = (0..3)
            .max_by(|&a, &b| size[a].partial_cmp(&size[b]).unwrap())
            .unwrap();
        leaves.sort_by(|a, b| {
            a.aabb().center()[axis]
                .partial_cmp(&b.aabb().center()[axis])
                .unwrap()
        });
    }

    let chunk = leaves.len().div_ceil(4);
    let mut groups = Vec::new();
    while !leaves.is_empty() {
        let rest = leaves.split_off(chunk.min(leaves.len()));
        groups.push(assemble(leaves, sort));
        leaves = rest;
    }
    TNode3::from_children(groups)
}

/// Stores the first cube's triangles directly in the root and hangs the rest below.
fn build_scene(triangles: &[TTriangle3], shuffle_seed: Option<u64>) -> TNode3 {
    let mut leaves = cube_leaves(triangles);
    if leaves.is_empty() {
        return TNode3::new();
    }
    let first = leaves.remove(0);

    let mut root = match shuffle_seed {
        Some(seed) => {
            leaves.shuffle(&mut StdRng::seed_from_u64(seed));
            assemble(leaves, false)
        }
        None => assemble(leaves, true),
    };
    for triangle in first.data() {
        root.push_data(*triangle);
    }
    root
}

/// Builds a spatially sorted hierarchy over the cubes of [`create_n_cubes`].
pub fn build_sorted_scene(triangles: &[TTriangle3]) -> TNode3 {
    build_scene(triangles, None)
}

/// Builds a hierarchy over the cubes of [`create_n_cubes`] in random order, so sibling
/// boxes overlap freely.
pub fn build_shuffled_scene(triangles: &[TTriangle3], seed: u64) -> TNode3 {
    build_scene(triangles, Some(seed))
}
