//! Boundary loops stitched from curve primitives.
//!
//! A [`Polygon`] collects primitives (and [`Hole`]s) in traversal order. The
//! first call to [`Polygon::finalize`] stitches them into an immutable
//! [`Boundary`] snapshot, caches it, and freezes the polygon: later `append`
//! or `add_hole` calls fail with [`ShapeError::Finalized`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::curves::{ArcOptions, CurvePrimitive, Line};
use crate::config::{ShapeConfig, StitchMode};
use crate::error::ShapeError;
use crate::geometry::Point2d;

/// Resolved, immutable boundary: one closed outer ring plus hole rings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boundary {
    outer: Vec<Point2d>,
    holes: Vec<Vec<Point2d>>,
}

impl Boundary {
    /// Build a snapshot from already-resolved rings.
    pub fn from_rings(outer: Vec<Point2d>, holes: Vec<Vec<Point2d>>) -> Self {
        Self { outer, holes }
    }

    pub fn outer(&self) -> &[Point2d] {
        &self.outer
    }

    pub fn holes(&self) -> &[Vec<Point2d>] {
        &self.holes
    }

    /// The outer ring followed by each hole ring, in insertion order.
    pub fn rings(&self) -> impl Iterator<Item = &[Point2d]> {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Whether every ring ends where it starts.
    pub fn is_closed(&self) -> bool {
        self.rings().all(is_closed_ring)
    }
}

fn is_closed_ring(ring: &[Point2d]) -> bool {
    matches!((ring.first(), ring.last()), (Some(a), Some(b)) if ring.len() > 1 && a == b)
}

/// Number of distinct points in a ring, ignoring the closing duplicate.
fn distinct_count(ring: &[Point2d]) -> usize {
    let open = if is_closed_ring(ring) {
        &ring[..ring.len() - 1]
    } else {
        ring
    };
    let mut seen: Vec<Point2d> = Vec::with_capacity(open.len());
    for p in open {
        if !seen.contains(p) {
            seen.push(*p);
        }
    }
    seen.len()
}

/// Concatenate primitive point sequences into one ring.
///
/// A primitive that starts where the ring currently ends contributes its
/// sequence minus the shared first point.
pub fn stitch(shapes: &[CurvePrimitive], mode: StitchMode) -> Result<Vec<Point2d>, ShapeError> {
    let Some(first) = shapes.first() else {
        return Err(ShapeError::DegenerateBoundary { count: 0 });
    };

    let mut points = first.points().to_vec();
    for (index, shape) in shapes.iter().enumerate().skip(1) {
        let seq = shape.points();
        let (Some(&last), Some(&head)) = (points.last(), seq.first()) else {
            continue;
        };
        if head == last {
            points.extend_from_slice(&seq[1..]);
            debug!(index, kind = shape.type_name(), "joined primitive");
        } else {
            match mode {
                StitchMode::Strict => {
                    return Err(ShapeError::Discontinuous {
                        index,
                        expected: last,
                        found: head,
                    });
                }
                StitchMode::Lenient => {
                    warn!(index, gap = last.distance_to(&head), "appending disjoint primitive");
                    points.extend_from_slice(seq);
                }
            }
        }
    }

    points.dedup();

    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if first != last {
            match mode {
                StitchMode::Strict => return Err(ShapeError::OpenBoundary { first, last }),
                StitchMode::Lenient => warn!("boundary left open"),
            }
        }
    }

    let count = distinct_count(&points);
    if count < 3 {
        return Err(ShapeError::DegenerateBoundary { count });
    }
    Ok(points)
}

/// An interior loop subtracted from a polygon. Never contains holes itself.
#[derive(Debug, Clone, Default)]
pub struct Hole {
    shapes: Vec<CurvePrimitive>,
    config: ShapeConfig,
    resolved: Option<Vec<Point2d>>,
}

impl Hole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ShapeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn append(&mut self, shape: impl Into<CurvePrimitive>) -> Result<&mut Self, ShapeError> {
        if self.resolved.is_some() {
            return Err(ShapeError::Finalized);
        }
        self.shapes.push(shape.into());
        Ok(self)
    }

    pub fn shapes(&self) -> &[CurvePrimitive] {
        &self.shapes
    }

    pub fn is_finalized(&self) -> bool {
        self.resolved.is_some()
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    /// Arc options carrying this hole's precision and rounding.
    pub fn arc_options(&self) -> ArcOptions {
        ArcOptions::from_config(&self.config)
    }

    /// Stitch once and cache; subsequent calls return the cached ring.
    pub fn finalize(&mut self) -> Result<&[Point2d], ShapeError> {
        let ring = match self.resolved.take() {
            Some(ring) => ring,
            None => stitch(&self.shapes, self.config.stitch_mode)?,
        };
        Ok(self.resolved.insert(ring).as_slice())
    }

    /// The cached ring, `None` before [`Hole::finalize`].
    pub fn points(&self) -> Option<&[Point2d]> {
        self.resolved.as_deref()
    }
}

/// An outer boundary loop with optional holes.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    shapes: Vec<CurvePrimitive>,
    holes: Vec<Hole>,
    config: ShapeConfig,
    resolved: Option<Boundary>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ShapeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Closed loop of lines through `[x0, y0, x1, y1, ...]`, last point joined to the first.
    pub fn from_flat_coords(coords: &[f64]) -> Result<Self, ShapeError> {
        Self::from_flat_coords_with(coords, ShapeConfig::default())
    }

    pub fn from_flat_coords_with(coords: &[f64], config: ShapeConfig) -> Result<Self, ShapeError> {
        if coords.len() % 2 != 0 {
            return Err(ShapeError::InvalidShape {
                expected: "even number of coordinates",
                found: format!("{} coordinates", coords.len()),
            });
        }
        let points: Vec<Point2d> = coords
            .chunks_exact(2)
            .map(Point2d::try_from)
            .collect::<Result<_, _>>()?;
        let mut polygon = Self::with_config(config);
        for (i, start) in points.iter().enumerate() {
            let end = points[(i + 1) % points.len()];
            polygon.append(Line::new(*start, end))?;
        }
        Ok(polygon)
    }

    /// Axis-aligned rectangle from two opposite corners.
    pub fn rectangle(start: impl Into<Point2d>, end: impl Into<Point2d>) -> Self {
        Rectangle::new(start, end).into()
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    /// Arc options carrying this polygon's precision and rounding.
    pub fn arc_options(&self) -> ArcOptions {
        ArcOptions::from_config(&self.config)
    }

    /// Empty hole sharing this polygon's configuration.
    pub fn new_hole(&self) -> Hole {
        Hole::with_config(self.config)
    }

    pub fn append(&mut self, shape: impl Into<CurvePrimitive>) -> Result<&mut Self, ShapeError> {
        if self.resolved.is_some() {
            return Err(ShapeError::Finalized);
        }
        self.shapes.push(shape.into());
        Ok(self)
    }

    pub fn add_hole(&mut self, hole: Hole) -> Result<&mut Self, ShapeError> {
        if self.resolved.is_some() {
            return Err(ShapeError::Finalized);
        }
        self.holes.push(hole);
        Ok(self)
    }

    pub fn shapes(&self) -> &[CurvePrimitive] {
        &self.shapes
    }

    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn is_finalized(&self) -> bool {
        self.resolved.is_some()
    }

    /// Stitch the outer ring and every hole, cache the snapshot and freeze.
    #[instrument(skip(self), fields(shapes = self.shapes.len(), holes = self.holes.len()))]
    pub fn finalize(&mut self) -> Result<&Boundary, ShapeError> {
        let boundary = match self.resolved.take() {
            Some(boundary) => boundary,
            None => self.stitch_all()?,
        };
        Ok(self.resolved.insert(boundary))
    }

    fn stitch_all(&mut self) -> Result<Boundary, ShapeError> {
        let outer = stitch(&self.shapes, self.config.stitch_mode)?;
        let mut holes = Vec::with_capacity(self.holes.len());
        for hole in &mut self.holes {
            holes.push(hole.finalize()?.to_vec());
        }
        info!(
            point_count = outer.len(),
            hole_count = holes.len(),
            "boundary finalized"
        );
        Ok(Boundary::from_rings(outer, holes))
    }

    /// The cached snapshot, `None` before [`Polygon::finalize`].
    pub fn points(&self) -> Option<&Boundary> {
        self.resolved.as_ref()
    }
}

/// Rectangle from two opposite corners, as four lines starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub start: Point2d,
    pub end: Point2d,
}

impl Rectangle {
    pub fn new(start: impl Into<Point2d>, end: impl Into<Point2d>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Corner order: start, (start.x, end.y), end, (end.x, start.y).
    pub fn lines(&self) -> [Line; 4] {
        let (s, e) = (self.start, self.end);
        let corners = [
            Point2d::new(s.x, s.y),
            Point2d::new(s.x, e.y),
            Point2d::new(e.x, e.y),
            Point2d::new(e.x, s.y),
        ];
        [
            Line::new(corners[0], corners[1]),
            Line::new(corners[1], corners[2]),
            Line::new(corners[2], corners[3]),
            Line::new(corners[3], corners[0]),
        ]
    }

    pub fn to_hole(&self) -> Hole {
        Hole {
            shapes: self.lines().into_iter().map(CurvePrimitive::from).collect(),
            ..Hole::default()
        }
    }
}

impl From<Rectangle> for Polygon {
    fn from(rect: Rectangle) -> Self {
        Polygon {
            shapes: rect.lines().into_iter().map(CurvePrimitive::from).collect(),
            ..Polygon::default()
        }
    }
}
