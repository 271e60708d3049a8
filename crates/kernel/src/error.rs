use crate::geometry::Point2d;

/// Broad category of a failure, shared by every crate in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong argument shape handed to a constructor.
    Type,
    /// Degenerate or invalid geometric input.
    Geometry,
    /// Invalid numeric parameter.
    InvalidArgument,
    /// Face index outside the vertex array.
    Index,
    /// Operation called in the wrong lifecycle state.
    Usage,
    /// Filesystem or stream failure.
    Io,
}

/// Errors raised while building curve primitives and boundary loops.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("invalid shape: expected {expected}, found {found}")]
    InvalidShape {
        expected: &'static str,
        found: String,
    },

    #[error("invalid arc: {reason}")]
    InvalidArc { reason: String },

    #[error("primitive {index} starts at ({}, {}) but the loop ends at ({}, {})", .found.x, .found.y, .expected.x, .expected.y)]
    Discontinuous {
        index: usize,
        expected: Point2d,
        found: Point2d,
    },

    #[error("boundary is not closed: first point ({}, {}), last point ({}, {})", .first.x, .first.y, .last.x, .last.y)]
    OpenBoundary { first: Point2d, last: Point2d },

    #[error("degenerate boundary: {count} distinct points, need at least 3")]
    DegenerateBoundary { count: usize },

    #[error("boundary is finalized and can no longer be modified")]
    Finalized,
}

impl ShapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidShape { .. } => ErrorKind::Type,
            Self::InvalidArc { .. }
            | Self::Discontinuous { .. }
            | Self::OpenBoundary { .. }
            | Self::DegenerateBoundary { .. } => ErrorKind::Geometry,
            Self::Finalized => ErrorKind::Usage,
        }
    }
}
