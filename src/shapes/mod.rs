//! Terminal primitives a segment can be traced against.

mod triangle;

pub use self::triangle::*;
