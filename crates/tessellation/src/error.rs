use meshing_kernel::{ErrorKind, ShapeError};

/// Errors raised by triangulation engines and extrusion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TessellationError {
    #[error("geometry error: {reason}")]
    Geometry { reason: String },

    #[error("invalid argument: {parameter} = {value}")]
    InvalidArgument { parameter: &'static str, value: f64 },

    #[error("face {face} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),
}

impl TessellationError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::Geometry {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Geometry { .. } => ErrorKind::Geometry,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::IndexOutOfRange { .. } => ErrorKind::Index,
            Self::Shape(e) => e.kind(),
        }
    }
}
