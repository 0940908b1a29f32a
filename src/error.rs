//! Error types for tracing.

use thiserror::Error;

/// Errors that can occur while tracing a segment through a scene.
///
/// Degenerate geometry is not an error: parallel segments, zero-area triangles and
/// empty boxes all resolve to "no hit".
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// Triangle intersection was requested for points that are not three-dimensional.
    #[error("ray/triangle intersection is not implemented for {dimension}-dimensional points")]
    UnsupportedDimension {
        /// Dimension of the offending points.
        dimension: usize,
    },
}

/// Result type for tracing operations.
pub type TraceResult<T> = std::result::Result<T, TraceError>;
