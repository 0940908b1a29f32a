#![no_main]
use std::fmt::{self, Debug, Formatter};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nalgebra::Point;
use ordered_float::NotNan;
use segtrace::bvh::BvhNode;
use segtrace::shapes::Triangle;
use segtrace::{trace_brute_force, trace_node, trace_triangle};

type Float = f64;
const LIMIT: Float = 1_000.0;

fuzz_target!(|workload: Workload| {
    workload.fuzz();
});

#[derive(Arbitrary)]
struct ArbitraryPoint {
    coordinates: [NotNan<Float>; 3],
}

impl ArbitraryPoint {
    fn point(&self) -> Point<Float, 3> {
        Point::<_, 3>::from_slice(&self.coordinates).map(|f| f.into_inner().clamp(-LIMIT, LIMIT))
    }
}

#[derive(Arbitrary)]
struct ArbitraryTriangle {
    a: ArbitraryPoint,
    b: ArbitraryPoint,
    c: ArbitraryPoint,
}

impl ArbitraryTriangle {
    fn triangle(&self) -> Triangle<Float, 3> {
        Triangle::new(self.a.point(), self.b.point(), self.c.point())
    }
}

impl Debug for ArbitraryTriangle {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Debug::fmt(&self.triangle(), f)
    }
}

/// A hierarchy of arbitrary shape. Every box is computed, so it always contains its subtree.
#[derive(Debug, Arbitrary)]
struct ArbitraryNode {
    data: Vec<ArbitraryTriangle>,
    children: Vec<ArbitraryNode>,
}

impl ArbitraryNode {
    fn node(&self) -> BvhNode<Float, 3, Triangle<Float, 3>> {
        let mut node = BvhNode::from_data(self.data.iter().map(|t| t.triangle()).collect());
        for child in &self.children {
            node.push_child(child.node());
        }
        node
    }
}

#[derive(Debug, Arbitrary)]
struct Workload {
    root: ArbitraryNode,
    start: ArbitraryPoint,
    end: ArbitraryPoint,
    l_max: NotNan<Float>,
}

impl Workload {
    fn fuzz(self) {
        let root = self.root.node();
        if root.depth() > 64 {
            // Prevent call stack overflow.
            return;
        }
        root.assert_consistent();

        let start = self.start.point();
        let end = self.end.point();
        let l_max = self.l_max.into_inner().abs();

        let pruned = trace_node(&start, &end, &root, l_max).unwrap();
        let brute = trace_brute_force(&start, &end, &root, l_max).unwrap();
        assert!(!pruned.is_nan() && !brute.is_nan());

        // Pruning only ever skips primitives, so the answer is the hit of one of them and
        // never beats the brute force minimum. Exact agreement may fail on rounding at box
        // boundaries.
        assert!(pruned >= brute, "pruned {} < brute force {}", pruned, brute);
        if pruned.is_finite() {
            assert!(pruned <= l_max);
            assert!(root.primitives().any(|triangle| {
                trace_triangle(&start, &end, triangle, l_max) == Ok(pruned)
            }));
        }
    }
}
