//! This module defines [`BvhNode`], an owned hierarchy node, and the traversal functions
//! which trace segments through any [`TraceNode`].
//!
//! [`BvhNode`]: struct.BvhNode.html
//! [`TraceNode`]: ../bounding_hierarchy/trait.TraceNode.html
//!

mod bvh_node;
mod iter;
mod traverse;

pub use self::bvh_node::*;
pub use self::iter::*;
pub use self::traverse::*;
