//! Marching squares extraction of the zero-level set of a [`ScalarGrid`].
//!
//! Every 2×2 block of adjacent samples forms a cell. The signs of the four corners (a corner is
//! "inside" when its value is `>= 0`) select which cell edges the curve crosses, and the crossing
//! on each edge is placed by linear interpolation. The two saddle configurations, where diagonally
//! opposite corners share a sign, are resolved with the average of the four corners.

use log::debug;
use super::{point::GraphPoint, sample::ScalarGrid};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A line segment of a contour, in grid coordinates (`x` along columns, `y` along rows) unless
/// stated otherwise.
///
/// Segments are not connected to each other; adjacent segments merely share endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub start: GraphPoint<f64>,
    pub end: GraphPoint<f64>,
}

impl Segment {
    /// Converts a segment in grid coordinates to graph coordinates.
    pub fn to_graph(self, grid: &ScalarGrid) -> Segment {
        Segment {
            start: grid.to_graph(self.start),
            end: grid.to_graph(self.end),
        }
    }
}

/// An edge of a cell.
#[derive(Clone, Copy, Debug)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Returns the fraction of the way from `a` to `b` at which the linear interpolation between them
/// is zero.
///
/// Falls back to the midpoint when the interpolation is undefined or numerically unstable.
fn crossing(a: f64, b: f64) -> f64 {
    let d = b - a;
    if !a.is_finite() || !b.is_finite() || d.abs() < 1e-12 {
        0.5
    } else {
        -a / d
    }
}

/// One cell of the grid, with the values at its corners.
struct Cell {
    /// Column of the top-left corner.
    x: f64,

    /// Row of the top-left corner.
    y: f64,

    /// `[top-left, top-right, bottom-right, bottom-left]`.
    corners: [f64; 4],
}

impl Cell {
    /// Returns the point where the contour crosses the given edge.
    fn point(&self, edge: Edge) -> GraphPoint<f64> {
        let [tl, tr, br, bl] = self.corners;
        let (x, y) = (self.x, self.y);
        match edge {
            Edge::Top => GraphPoint(x + crossing(tl, tr), y),
            Edge::Right => GraphPoint(x + 1.0, y + crossing(tr, br)),
            Edge::Bottom => GraphPoint(x + crossing(bl, br), y + 1.0),
            Edge::Left => GraphPoint(x, y + crossing(tl, bl)),
        }
    }

    /// Returns the 4-bit sign pattern of the cell, with the top-left corner as the high bit.
    fn pattern(&self) -> u8 {
        self.corners.iter().fold(0, |bits, &v| bits << 1 | u8::from(v >= 0.0))
    }

    /// Returns the pairs of edges the contour connects in this cell.
    fn edges(&self) -> Vec<(Edge, Edge)> {
        use Edge::*;

        let center = self.corners.iter().sum::<f64>() / 4.0;
        match self.pattern() {
            0b0000 | 0b1111 => vec![],
            0b0001 | 0b1110 => vec![(Left, Bottom)],
            0b0010 | 0b1101 => vec![(Bottom, Right)],
            0b0011 | 0b1100 => vec![(Left, Right)],
            0b0100 | 0b1011 => vec![(Top, Right)],
            0b0110 | 0b1001 => vec![(Top, Bottom)],
            0b0111 | 0b1000 => vec![(Top, Left)],

            // top-right and bottom-left inside: if the center is inside too, they are joined
            // through the center and the contour cuts off the other two corners
            0b0101 if center >= 0.0 => vec![(Top, Left), (Right, Bottom)],
            0b0101 => vec![(Top, Right), (Left, Bottom)],

            // top-left and bottom-right inside
            0b1010 if center >= 0.0 => vec![(Top, Right), (Left, Bottom)],
            0b1010 => vec![(Top, Left), (Right, Bottom)],

            _ => unreachable!("sign pattern is 4 bits"),
        }
    }
}

/// Extracts line segments approximating the curve where `grid` is zero.
///
/// Cells with an undefined corner are skipped. The segments are returned in grid coordinates; use
/// [`Segment::to_graph`] to place them in the viewport.
pub fn march_squares(grid: &ScalarGrid) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut skipped = 0usize;

    for row in 0..grid.height.saturating_sub(1) {
        for col in 0..grid.width.saturating_sub(1) {
            let corners = [
                grid.get(col, row),
                grid.get(col + 1, row),
                grid.get(col + 1, row + 1),
                grid.get(col, row + 1),
            ].map(f64::from);
            if corners.iter().any(|v| !v.is_finite()) {
                skipped += 1;
                continue;
            }

            let cell = Cell { x: col as f64, y: row as f64, corners };
            segments.extend(cell.edges().into_iter().map(|(a, b)| Segment {
                start: cell.point(a),
                end: cell.point(b),
            }));
        }
    }

    debug!(
        "marched {}×{} grid: {} segment(s), {} undefined cell(s)",
        grid.width, grid.height, segments.len(), skipped,
    );
    segments
}
