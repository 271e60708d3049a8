use meshing_kernel::{ErrorKind, ShapeError};
use meshing_tessellation::TessellationError;

/// Errors from the mesh pipeline.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("tessellation error: {0}")]
    Tessellation(#[from] TessellationError),

    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("face {face} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("invalid argument: {parameter} = {value}")]
    InvalidArgument { parameter: &'static str, value: f64 },

    #[error("unsupported export: {0}")]
    Unsupported(String),

    #[error("mesh is empty; extrude a boundary first")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl MeshError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Tessellation(e) => e.kind(),
            Self::Shape(e) => e.kind(),
            Self::IndexOutOfRange { .. } => ErrorKind::Index,
            Self::InvalidArgument { .. } | Self::Unsupported(_) => ErrorKind::InvalidArgument,
            Self::Empty => ErrorKind::Usage,
            Self::Io(_) => ErrorKind::Io,
            Self::Config(_) => ErrorKind::Type,
        }
    }
}

/// Reject non-finite transform amounts.
pub(crate) fn check_finite(parameter: &'static str, value: f64) -> Result<(), MeshError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MeshError::InvalidArgument { parameter, value })
    }
}
