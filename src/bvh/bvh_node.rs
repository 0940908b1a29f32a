use log::debug;
use nalgebra::Point;

use crate::aabb::{Aabb, Bounded};
use crate::bounding_hierarchy::{BHValue, RayTrace, ShapeKind, TraceNode};
use crate::bvh::{trace_node, PrimitiveIter};
use crate::error::TraceResult;

/// An owned node of a bounding volume hierarchy.
///
/// A node stores primitives directly (its `data`) and any number of child nodes.
/// It caches the [`Aabb`] of everything beneath it; [`BvhNode::push_data`] and
/// [`BvhNode::push_child`] keep that box up to date. After mutating contents through
/// [`BvhNode::data_mut`] or [`BvhNode::children_mut`], call [`BvhNode::refit`].
///
/// No splitting heuristic is applied: the caller decides the shape of the tree.
///
/// [`Aabb`]: ../aabb/struct.Aabb.html
/// [`BvhNode::push_data`]: struct.BvhNode.html#method.push_data
/// [`BvhNode::push_child`]: struct.BvhNode.html#method.push_child
/// [`BvhNode::data_mut`]: struct.BvhNode.html#method.data_mut
/// [`BvhNode::children_mut`]: struct.BvhNode.html#method.children_mut
/// [`BvhNode::refit`]: struct.BvhNode.html#method.refit
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BvhNode<T: BHValue, const D: usize, S> {
    /// The convex hull of the [`Aabb`]s of everything in this subtree.
    aabb: Aabb<T, D>,

    /// Primitives stored directly in this node.
    data: Vec<S>,

    /// Child nodes.
    children: Vec<BvhNode<T, D, S>>,
}

impl<T: BHValue, const D: usize, S> BvhNode<T, D, S> {
    /// Returns the cached [`Aabb`] of this subtree.
    ///
    /// [`Aabb`]: ../aabb/struct.Aabb.html
    ///
    pub fn aabb(&self) -> Aabb<T, D> {
        self.aabb
    }

    /// Primitives stored directly in this node.
    pub fn data(&self) -> &[S] {
        &self.data
    }

    /// Mutable access to the primitives of this node. Call [`BvhNode::refit`] afterwards.
    ///
    /// [`BvhNode::refit`]: struct.BvhNode.html#method.refit
    ///
    pub fn data_mut(&mut self) -> &mut Vec<S> {
        &mut self.data
    }

    /// The children of this node.
    pub fn children(&self) -> &[BvhNode<T, D, S>] {
        &self.children
    }

    /// Mutable access to the children of this node. Call [`BvhNode::refit`] afterwards.
    ///
    /// [`BvhNode::refit`]: struct.BvhNode.html#method.refit
    ///
    pub fn children_mut(&mut self) -> &mut Vec<BvhNode<T, D, S>> {
        &mut self.children
    }
}

impl<T: BHValue, const D: usize, S: Bounded<T, D>> BvhNode<T, D, S> {
    /// Creates an empty node. Its [`Aabb`] is empty.
    ///
    /// [`Aabb`]: ../aabb/struct.Aabb.html
    ///
    pub fn new() -> Self {
        BvhNode {
            aabb: Aabb::empty(),
            data: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a childless node storing `data`.
    ///
    /// # Examples
    /// ```
    /// use segtrace::bvh::BvhNode;
    /// use segtrace::shapes::Triangle;
    /// use nalgebra::Point3;
    ///
    /// let triangle = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// );
    /// let node = BvhNode::from_data(vec![triangle]);
    ///
    /// assert_eq!(node.primitive_count(), 1);
    /// assert_eq!(node.aabb().max, Point3::new(1.0, 1.0, 0.0));
    /// ```
    pub fn from_data(data: Vec<S>) -> Self {
        let mut node = BvhNode {
            aabb: Aabb::empty(),
            data,
            children: Vec::new(),
        };
        node.refit_local();
        node
    }

    /// Creates a node with `children` and no primitives of its own.
    pub fn from_children(children: Vec<BvhNode<T, D, S>>) -> Self {
        let mut node = BvhNode {
            aabb: Aabb::empty(),
            data: Vec::new(),
            children,
        };
        node.refit_local();
        node
    }

    /// Stores `shape` directly in this node and grows the node's [`Aabb`].
    ///
    /// [`Aabb`]: ../aabb/struct.Aabb.html
    ///
    pub fn push_data(&mut self, shape: S) {
        self.aabb.join_mut(&shape.aabb());
        self.data.push(shape);
    }

    /// Appends `child` and grows this node's [`Aabb`] by the child's.
    ///
    /// [`Aabb`]: ../aabb/struct.Aabb.html
    ///
    pub fn push_child(&mut self, child: BvhNode<T, D, S>) {
        self.aabb.join_mut(&child.aabb);
        self.children.push(child);
    }

    /// Recomputes every cached [`Aabb`] in this subtree, bottom-up.
    /// Returns the number of refitted nodes.
    ///
    /// [`Aabb`]: ../aabb/struct.Aabb.html
    ///
    pub fn refit(&mut self) -> usize {
        let refitted = self.refit_recursive();
        debug!("refitted {} hierarchy nodes", refitted);
        refitted
    }

    fn refit_recursive(&mut self) -> usize {
        let refitted = self
            .children
            .iter_mut()
            .map(BvhNode::refit_recursive)
            .sum::<usize>();
        self.refit_local();
        refitted + 1
    }

    /// Recomputes this node's [`Aabb`] from its primitives and the cached boxes of its
    /// children.
    fn refit_local(&mut self) {
        let mut aabb = Aabb::empty();
        for shape in &self.data {
            aabb.join_mut(&shape.aabb());
        }
        for child in &self.children {
            aabb.join_mut(&child.aabb);
        }
        self.aabb = aabb;
    }

    /// Number of levels in this subtree. A childless node has depth `1`.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(BvhNode::depth).max().unwrap_or(0)
    }

    /// Number of primitives stored anywhere in this subtree.
    pub fn primitive_count(&self) -> usize {
        self.data.len()
            + self
                .children
                .iter()
                .map(BvhNode::primitive_count)
                .sum::<usize>()
    }

    /// Iterates depth-first over every primitive in this subtree.
    pub fn primitives(&self) -> PrimitiveIter<'_, T, D, S> {
        PrimitiveIter::new(self)
    }

    /// Checks that every cached [`Aabb`] contains the boxes of everything beneath it.
    ///
    /// # Panics
    ///
    /// Panics with a description of the first violation found.
    ///
    /// [`Aabb`]: ../aabb/struct.Aabb.html
    ///
    pub fn assert_consistent(&self) {
        for (index, shape) in self.data.iter().enumerate() {
            let shape_aabb = shape.aabb();
            assert!(
                self.aabb.contains_aabb(&shape_aabb),
                "Node box {} does not contain primitive {} with box {}",
                self.aabb,
                index,
                shape_aabb
            );
        }
        for (index, child) in self.children.iter().enumerate() {
            assert!(
                self.aabb.contains_aabb(&child.aabb),
                "Node box {} does not contain child {} with box {}",
                self.aabb,
                index,
                child.aabb
            );
            child.assert_consistent();
        }
    }
}

impl<T: BHValue, const D: usize, S: Bounded<T, D>> Default for BvhNode<T, D, S> {
    fn default() -> Self {
        BvhNode::new()
    }
}

impl<T: BHValue, const D: usize, S> Bounded<T, D> for BvhNode<T, D, S> {
    fn aabb(&self) -> Aabb<T, D> {
        self.aabb
    }
}

impl<T: BHValue, const D: usize, S> TraceNode<T, D> for BvhNode<T, D, S>
where
    S: RayTrace<T, D> + Bounded<T, D>,
{
    type Data = S;
    type Child = BvhNode<T, D, S>;

    fn n_data(&self) -> usize {
        self.data.len()
    }

    fn data(&self, index: usize) -> &S {
        &self.data[index]
    }

    fn n_children(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> &BvhNode<T, D, S> {
        &self.children[index]
    }
}

impl<T: BHValue, const D: usize, S> RayTrace<T, D> for BvhNode<T, D, S>
where
    S: RayTrace<T, D> + Bounded<T, D>,
{
    const KIND: ShapeKind = ShapeKind::Node;

    fn ray_trace(&self, start: &Point<T, D>, end: &Point<T, D>, l_max: T) -> TraceResult<T> {
        trace_node(start, end, self, l_max)
    }
}
