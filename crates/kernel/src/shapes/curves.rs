use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::{ShapeConfig, MAX_ARC_PRECISION, MIN_ARC_PRECISION};
use crate::error::ShapeError;
use crate::geometry::{round_to, Point2d};

/// A closed set of curve primitives a boundary loop is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurvePrimitive {
    Line(Line),
    Arc(Arc),
}

impl CurvePrimitive {
    /// Ordered point sequence approximating the curve.
    pub fn points(&self) -> &[Point2d] {
        match self {
            CurvePrimitive::Line(l) => l.points(),
            CurvePrimitive::Arc(a) => a.points(),
        }
    }

    pub fn start(&self) -> Point2d {
        match self {
            CurvePrimitive::Line(l) => l.start,
            CurvePrimitive::Arc(a) => a.start,
        }
    }

    pub fn end(&self) -> Point2d {
        match self {
            CurvePrimitive::Line(l) => l.end,
            CurvePrimitive::Arc(a) => a.end,
        }
    }

    /// Stroke width carried for rendering; geometry ignores it.
    pub fn width(&self) -> f64 {
        match self {
            CurvePrimitive::Line(l) => l.width,
            CurvePrimitive::Arc(a) => a.width,
        }
    }

    /// Classify the primitive for logging/debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            CurvePrimitive::Line(_) => "Line",
            CurvePrimitive::Arc(_) => "Arc",
        }
    }
}

impl From<Line> for CurvePrimitive {
    fn from(line: Line) -> Self {
        CurvePrimitive::Line(line)
    }
}

impl From<Arc> for CurvePrimitive {
    fn from(arc: Arc) -> Self {
        CurvePrimitive::Arc(arc)
    }
}

/// A straight segment. Its point sequence is exactly `[start, end]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2d,
    pub end: Point2d,
    pub width: f64,
    points: [Point2d; 2],
}

impl Line {
    pub fn new(start: impl Into<Point2d>, end: impl Into<Point2d>) -> Self {
        let start = start.into();
        let end = end.into();
        Self {
            start,
            end,
            width: 0.0,
            points: [start, end],
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn points(&self) -> &[Point2d] {
        &self.points
    }
}

/// Options for arc discretization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcOptions {
    /// Explicit radius; `None` or a non-positive value derives it from center and start.
    pub radius: Option<f64>,
    pub clockwise: bool,
    /// Base sample count for sweeps below π.
    pub precision: u32,
    /// Decimal places for the derived radius and interpolated points.
    pub decimals: u32,
    pub width: f64,
}

impl Default for ArcOptions {
    fn default() -> Self {
        Self::from_config(&ShapeConfig::default())
    }
}

impl ArcOptions {
    pub fn from_config(config: &ShapeConfig) -> Self {
        Self {
            radius: None,
            clockwise: true,
            precision: config.arc_precision,
            decimals: config.coordinate_decimals,
            width: 0.0,
        }
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

/// A circular arc sampled into a point sequence at construction.
///
/// The sequence is `start`, `precision - 1` interpolated points, `end`, where
/// `precision` doubles once the sweep reaches π. `start == end` describes a
/// full circle starting and ending at `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub start: Point2d,
    pub end: Point2d,
    pub center: Point2d,
    pub radius: f64,
    pub clockwise: bool,
    /// Base precision requested; the emitted count may be doubled.
    pub precision: u32,
    pub width: f64,
    points: Vec<Point2d>,
}

impl Arc {
    /// Clockwise arc with derived radius and default precision.
    pub fn new(
        start: impl Into<Point2d>,
        end: impl Into<Point2d>,
        center: impl Into<Point2d>,
    ) -> Result<Self, ShapeError> {
        Self::with_options(start, end, center, ArcOptions::default())
    }

    /// Clockwise arc sampled with the precision and rounding from `config`.
    pub fn with_config(
        start: impl Into<Point2d>,
        end: impl Into<Point2d>,
        center: impl Into<Point2d>,
        config: &ShapeConfig,
    ) -> Result<Self, ShapeError> {
        Self::with_options(start, end, center, ArcOptions::from_config(config))
    }

    #[instrument(skip_all)]
    pub fn with_options(
        start: impl Into<Point2d>,
        end: impl Into<Point2d>,
        center: impl Into<Point2d>,
        options: ArcOptions,
    ) -> Result<Self, ShapeError> {
        let start = start.into();
        let end = end.into();
        let center = center.into();

        if !(start.is_finite() && end.is_finite() && center.is_finite()) {
            return Err(ShapeError::InvalidArc {
                reason: "non-finite coordinate".to_string(),
            });
        }

        let radius = match options.radius {
            Some(r) if r > 0.0 => r,
            _ => round_to(center.distance_to(&start), options.decimals),
        };
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(ShapeError::InvalidArc {
                reason: format!("radius must be positive, got {radius}"),
            });
        }

        if options.precision > MAX_ARC_PRECISION {
            return Err(ShapeError::InvalidArc {
                reason: format!(
                    "precision {} exceeds {MAX_ARC_PRECISION}",
                    options.precision
                ),
            });
        }
        let precision = options.precision.max(MIN_ARC_PRECISION);
        let points = sample_arc(start, end, center, radius, options.clockwise, precision, options.decimals);
        debug!(
            radius,
            clockwise = options.clockwise,
            point_count = points.len(),
            "discretized arc"
        );

        Ok(Self {
            start,
            end,
            center,
            radius,
            clockwise: options.clockwise,
            precision,
            width: options.width,
            points,
        })
    }

    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    pub fn is_full_circle(&self) -> bool {
        self.start == self.end
    }

    /// Raw angular difference between end and start, `2π` for a full circle.
    pub fn sweep(&self) -> f64 {
        sweep_angles(self.start, self.end, self.center).1
    }
}

/// Start angle and signed sweep as measured from `atan2`.
fn sweep_angles(start: Point2d, end: Point2d, center: Point2d) -> (f64, f64) {
    let start_angle = start.angle_from(&center);
    let end_angle = if start == end {
        start_angle + TAU
    } else {
        end.angle_from(&center)
    };
    (start_angle, end_angle - start_angle)
}

fn sample_arc(
    start: Point2d,
    end: Point2d,
    center: Point2d,
    radius: f64,
    clockwise: bool,
    base_precision: u32,
    decimals: u32,
) -> Vec<Point2d> {
    let (start_angle, sweep) = sweep_angles(start, end, center);
    let precision = if sweep.abs() < PI {
        base_precision
    } else {
        base_precision * 2
    };
    let direction = if clockwise { -1.0 } else { 1.0 };
    let step_angle = sweep.abs() / precision as f64;

    let mut points = Vec::with_capacity(precision as usize + 1);
    points.push(start);
    for n in 1..precision {
        let angle = start_angle + direction * n as f64 * step_angle;
        points.push(
            Point2d::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
            .rounded(decimals),
        );
    }
    points.push(end);
    points
}
