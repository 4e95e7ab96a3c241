//! Shape assembly on top of the primitive renderer.
//!
//! Triangles and polygons, outlined and filled. Outlines reuse the
//! Bresenham line; fills come in two flavors:
//!
//! - triangles use an edge sweep: each edge walks the Bresenham stepping
//!   and emits a horizontal span toward the far endpoint at every step —
//!   an approximation, not an exact scanline fill (steep narrow triangles
//!   can be left with interior gaps);
//! - polygons use a bounding-box scanline fill with an edge-crossing
//!   parity test and sorted intersection pairs.

use crate::basics::{Point, RectI};
use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::renderer_primitives::RendererPrimitives;
use crate::sample::Sample;

// ============================================================================
// RasterizerShapes
// ============================================================================

/// Shape rasterizer borrowing a canvas for the duration of drawing calls.
///
/// Stateless between calls; vertex-count preconditions are checked before
/// the first write, so a rejected call leaves the canvas unchanged.
pub struct RasterizerShapes<'a, S: Sample> {
    canvas: &'a mut Canvas<S>,
}

impl<'a, S: Sample> RasterizerShapes<'a, S> {
    pub fn new(canvas: &'a mut Canvas<S>) -> Self {
        Self { canvas }
    }

    /// Outline triangle: three Bresenham edges `p1→p2`, `p2→p3`, `p3→p1`.
    pub fn triangle(&mut self, p1: Point, p2: Point, p3: Point, color: S) {
        let mut ren = RendererPrimitives::new(&mut *self.canvas);
        ren.line(p1, p2, color);
        ren.line(p2, p3, color);
        ren.line(p3, p1, color);
    }

    /// Filled triangle via edge sweeping.
    ///
    /// Each of the three edges is walked with the Bresenham stepping, and
    /// every step emits a horizontal span from the walking position to the
    /// far endpoint's x at the current row.
    pub fn solid_triangle(&mut self, p1: Point, p2: Point, p3: Point, color: S) {
        self.sweep_edge(p1, p2, color);
        self.sweep_edge(p2, p3, color);
        self.sweep_edge(p3, p1, color);
    }

    /// Closed polygon outline. Needs at least three vertices.
    ///
    /// Consecutive vertices are connected in order; the loop closes from
    /// the last vertex back to the first.
    pub fn polygon(&mut self, points: &[Point], color: S) -> Result<()> {
        if points.len() < 3 {
            return Err(Error::InvalidGeometry(
                "a polygon needs at least three vertices",
            ));
        }
        let mut ren = RendererPrimitives::new(&mut *self.canvas);
        for i in 0..points.len() {
            let j = (i + 1) % points.len();
            ren.line(points[i], points[j], color);
        }
        Ok(())
    }

    /// Scanline polygon fill. Needs at least three vertices.
    ///
    /// For every scanline of the vertex bounding box, each edge with
    /// exactly one endpoint strictly below the line contributes an
    /// interpolated crossing x (truncated toward zero). Crossings are
    /// sorted ascending and consumed in pairs, each pair clamped to the
    /// bounding box and filled as a horizontal span. The closing outline
    /// is drawn afterwards: scanlines touching only horizontal edges
    /// produce no crossings, and the outline pass covers them.
    pub fn solid_polygon(&mut self, points: &[Point], color: S) -> Result<()> {
        if points.len() < 3 {
            return Err(Error::InvalidGeometry(
                "a polygon needs at least three vertices",
            ));
        }
        let bounds = RectI::bounding(points)
            .ok_or(Error::InvalidGeometry("a polygon needs at least three vertices"))?;

        for y in bounds.y1..=bounds.y2 {
            let mut xs = edge_crossings(points, y);
            xs.sort_unstable();
            for pair in xs.chunks_exact(2) {
                let start = pair[0].max(bounds.x1);
                let end = pair[1].min(bounds.x2);
                self.canvas.hline(y, start, end, color);
            }
        }
        self.polygon(points, color)
    }

    fn sweep_edge(&mut self, start: Point, end: Point, color: S) {
        let (mut x0, mut y0) = (start.x, start.y);
        let (x1, y1) = (end.x, end.y);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.canvas.hline(y0, x0, x1, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// X positions where the horizontal line at `y` crosses the polygon edges.
///
/// An edge contributes iff exactly one of its endpoints is strictly greater
/// than `y` while the other is less-or-equal, which counts a vertex lying
/// exactly on the scanline once instead of twice.
fn edge_crossings(points: &[Point], y: i32) -> Vec<i32> {
    let mut xs = Vec::new();
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        if (a.y > y && b.y <= y) || (b.y > y && a.y <= y) {
            let t = (y - a.y) as f64 / (b.y - a.y) as f64;
            xs.push((a.x as f64 + t * (b.x - a.x) as f64) as i32);
        }
    }
    xs
}

// ============================================================================
// Tests
// ============================================================================
