//! 2D boundary primitives and the shared geometry types of the meshing workspace.

pub mod config;
pub mod error;
pub mod geometry;
pub mod shapes;

pub use config::{ShapeConfig, StitchMode, Tolerance};
pub use error::{ErrorKind, ShapeError};
pub use geometry::{BoundingBox, Point2d, Point3d, Transform, Vec3};
pub use shapes::{Arc, ArcOptions, Boundary, CurvePrimitive, Hole, Line, Polygon, Rectangle};
