pub mod boundary;
pub mod curves;

pub use boundary::{stitch, Boundary, Hole, Polygon, Rectangle};
pub use curves::{Arc, ArcOptions, CurvePrimitive, Line};
