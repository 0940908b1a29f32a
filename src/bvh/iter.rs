use crate::bounding_hierarchy::BHValue;
use crate::bvh::BvhNode;

/// Iterator over every primitive of a [`BvhNode`] subtree, depth-first.
///
/// The primitives stored directly in a node are yielded before those of its children.
///
/// [`BvhNode`]: struct.BvhNode.html
///
pub struct PrimitiveIter<'node, T: BHValue, const D: usize, S> {
    /// Nodes whose primitives have not been visited yet.
    stack: Vec<&'node BvhNode<T, D, S>>,
    /// Remaining primitives of the node being visited.
    current: std::slice::Iter<'node, S>,
}

impl<'node, T: BHValue, const D: usize, S> PrimitiveIter<'node, T, D, S> {
    /// Creates a new [`PrimitiveIter`] starting at `root`.
    pub(crate) fn new(root: &'node BvhNode<T, D, S>) -> Self {
        PrimitiveIter {
            stack: vec![root],
            current: Default::default(),
        }
    }
}

impl<'node, T: BHValue, const D: usize, S> Iterator for PrimitiveIter<'node, T, D, S> {
    type Item = &'node S;

    fn next(&mut self) -> Option<&'node S> {
        loop {
            if let Some(shape) = self.current.next() {
                return Some(shape);
            }
            let node = self.stack.pop()?;
            // Reversed so the first child is visited first.
            self.stack.extend(node.children().iter().rev());
            self.current = node.data().iter();
        }
    }
}
