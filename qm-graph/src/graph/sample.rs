//! Sampling functions over the viewport.
//!
//! [`sample_line`] evaluates a function of `x` at evenly spaced points, and [`sample_field`]
//! evaluates a function of `x` and `y` on a rectangular grid. Evaluation failures are recorded as
//! `NaN` in place; one bad sample never aborts the rest.

use log::debug;
use qm_compute::numerical::Evaluator;
use rayon::prelude::*;
use super::{color::field_color, error::PlotError, point::GraphPoint, viewport::Viewport};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of samples of a function of `x`.
///
/// The `y` of every sample is either finite or exactly `NaN`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleSeries {
    pub points: Vec<GraphPoint<f64>>,
}

impl SampleSeries {
    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns true if at least one sample is finite.
    pub fn has_finite(&self) -> bool {
        self.points.iter().any(|point| point.1.is_finite())
    }
}

/// Samples `func` at `count` evenly spaced x-values from `domain.0` to `domain.1`, both ends
/// included.
///
/// A single sample is placed at `domain.0`.
pub fn sample_line(func: &Evaluator, domain: (f64, f64), count: usize) -> SampleSeries {
    let (x_min, x_max) = domain;
    let span = x_max - x_min;
    let last = count.saturating_sub(1).max(1) as f64;

    let points = (0..count)
        .map(|i| {
            let x = x_min + span * i as f64 / last;
            GraphPoint(x, func.eval_x(x))
        })
        .collect();
    SampleSeries { points }
}

/// Where the samples of a [`ScalarGrid`] are placed relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GridLayout {
    /// One sample at the center of each of `width × height` cells tiling the viewport. Used for
    /// color fields, where each sample is drawn as one cell.
    CellCenter,

    /// `width × height` samples on the lattice whose outermost nodes lie on the viewport's
    /// edges. Used for contouring, where the curve must reach the edges.
    Nodes,
}

impl GridLayout {
    /// Returns the fraction of the span at grid coordinate `i` (which may be fractional) along an
    /// axis with `n` samples.
    pub fn fraction(self, i: f64, n: usize) -> f64 {
        match self {
            GridLayout::CellCenter => (i + 0.5) / n as f64,
            GridLayout::Nodes => i / (n - 1) as f64,
        }
    }

    /// Panics if a `width × height` grid is too small for this layout.
    fn check_size(self, width: usize, height: usize) {
        let min = match self {
            GridLayout::CellCenter => 1,
            GridLayout::Nodes => 2,
        };
        assert!(
            width >= min && height >= min,
            "a {:?} grid needs at least {} sample(s) per axis, got {}×{}",
            self, min, width, height,
        );
    }
}

/// A grid of samples of a function of `x` and `y`, stored row-major with row `0` at the top
/// (`y_max`) of the viewport.
///
/// Values are stored as `f32`; a value that is undefined, or too large for `f32`, is `NaN`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarGrid {
    /// The number of columns.
    pub width: usize,

    /// The number of rows.
    pub height: usize,

    /// The sampled values, `width * height` of them.
    pub values: Vec<f32>,

    /// The smallest finite value.
    pub min: f64,

    /// The largest finite value.
    pub max: f64,

    /// `max(|min|, |max|, 1e-12)`, used to normalize colors symmetrically around zero.
    pub max_abs: f64,

    /// The viewport the grid was sampled over.
    pub viewport: Viewport,

    /// Where the samples are placed.
    pub layout: GridLayout,
}

impl ScalarGrid {
    /// Builds a grid from sampled values, computing its value range.
    ///
    /// Returns [`PlotError::DomainEmpty`] if none of the values are finite.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not hold exactly `width * height` values, or if the grid is too
    /// small for its layout.
    pub fn new(
        viewport: Viewport,
        layout: GridLayout,
        width: usize,
        height: usize,
        values: Vec<f32>,
    ) -> Result<Self, PlotError> {
        layout.check_size(width, height);
        assert_eq!(values.len(), width * height, "grid buffer does not match its size");

        let (min, max) = values.iter()
            .filter(|v| v.is_finite())
            .fold(None, |range: Option<(f64, f64)>, &v| {
                let v = f64::from(v);
                Some(match range {
                    Some((min, max)) => (min.min(v), max.max(v)),
                    None => (v, v),
                })
            })
            .ok_or(PlotError::DomainEmpty)?;

        Ok(Self {
            width,
            height,
            values,
            min,
            max,
            max_abs: min.abs().max(max.abs()).max(1e-12),
            viewport,
            layout,
        })
    }

    /// Returns the value at the given column and row.
    pub fn get(&self, col: usize, row: usize) -> f32 {
        self.values[row * self.width + col]
    }

    /// Converts a point in grid coordinates (`x` along columns, `y` along rows, possibly
    /// fractional) to graph coordinates.
    pub fn to_graph(&self, point: GraphPoint<f64>) -> GraphPoint<f64> {
        let viewport = &self.viewport;
        GraphPoint(
            viewport.x_min + self.layout.fraction(point.0, self.width) * viewport.x_span(),
            viewport.y_max - self.layout.fraction(point.1, self.height) * viewport.y_span(),
        )
    }

    /// Colors every cell with [`field_color`], producing an RGBA8 raster of `width × height`
    /// pixels. Undefined cells are fully transparent.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.values.iter()
            .flat_map(|&v| field_color(f64::from(v), self.max_abs).unwrap_or([0; 4]))
            .collect()
    }
}

/// Narrows a sample to `f32`, mapping values outside its range to `NaN`.
fn narrow(value: f64) -> f32 {
    let narrowed = value as f32;
    if narrowed.is_finite() {
        narrowed
    } else {
        f32::NAN
    }
}

/// Samples `func` as a function of `x` and `y` on a `width × height` grid over the viewport.
///
/// Rows are sampled in parallel; the result is identical to sampling them in order. Returns
/// [`PlotError::InvalidViewport`] before sampling anything if the viewport is invalid, and
/// [`PlotError::DomainEmpty`] if no sample is finite.
///
/// # Panics
///
/// Panics if the grid is too small for its layout (see [`ScalarGrid::new`]).
pub fn sample_field(
    func: &Evaluator,
    viewport: &Viewport,
    width: usize,
    height: usize,
    layout: GridLayout,
) -> Result<ScalarGrid, PlotError> {
    viewport.validate()?;
    layout.check_size(width, height);

    let values = (0..height)
        .into_par_iter()
        .flat_map_iter(|row| {
            let y = viewport.y_max - layout.fraction(row as f64, height) * viewport.y_span();
            (0..width).map(move |col| {
                let x = viewport.x_min + layout.fraction(col as f64, width) * viewport.x_span();
                narrow(func.eval_xy(x, y))
            })
        })
        .collect::<Vec<_>>();

    let grid = ScalarGrid::new(*viewport, layout, width, height, values);
    match &grid {
        Ok(grid) => debug!(
            "sampled {}×{} {:?} grid over {}: values in [{}, {}]",
            width, height, layout, viewport, grid.min, grid.max,
        ),
        Err(_) => debug!("sampled {}×{} {:?} grid over {}: no finite values", width, height, layout, viewport),
    }
    grid
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn line_sample_count() {
        let func = Evaluator::univariate("x", |x| 1.0 / x);
        for count in [0, 1, 2, 7, 720] {
            let series = sample_line(&func, (-10.0, 10.0), count);
            assert_eq!(series.len(), count);
            assert!(series.points.iter().all(|p| p.1.is_finite() || p.1.is_nan()));
        }
    }

    #[test]
    fn line_sample_positions() {
        let func = Evaluator::univariate("x", |x| x * 2.0);
        let series = sample_line(&func, (-1.0, 1.0), 5);
        assert_eq!(series.points, vec![
            GraphPoint(-1.0, -2.0),
            GraphPoint(-0.5, -1.0),
            GraphPoint(0.0, 0.0),
            GraphPoint(0.5, 1.0),
            GraphPoint(1.0, 2.0),
        ]);

        let single = sample_line(&func, (3.0, 4.0), 1);
        assert_eq!(single.points, vec![GraphPoint(3.0, 6.0)]);
    }

    #[test]
    fn failures_are_nan() {
        let func = Evaluator::univariate("x", f64::ln);
        let series = sample_line(&func, (-1.0, 1.0), 3);
        assert!(series.points[0].1.is_nan());
        assert!(series.points[1].1.is_nan());
        assert_eq!(series.points[2].1, 0.0);
        assert!(series.has_finite());
    }

    #[test]
    fn cell_center_grid() {
        let func = Evaluator::bivariate(|x, y| x + 10.0 * y);
        let viewport = Viewport::new(0.0, 4.0, 0.0, 2.0).unwrap();
        let grid = sample_field(&func, &viewport, 4, 2, GridLayout::CellCenter).unwrap();

        // row 0 is the top of the viewport
        assert_eq!(grid.values, vec![15.5, 16.5, 17.5, 18.5, 5.5, 6.5, 7.5, 8.5]);
        assert_eq!(grid.min, 5.5);
        assert_eq!(grid.max, 18.5);
        assert_eq!(grid.max_abs, 18.5);
        assert_eq!(grid.to_graph(GraphPoint(0.0, 0.0)), GraphPoint(0.5, 1.5));
    }

    #[test]
    fn node_grid() {
        let func = Evaluator::bivariate(|x, y| x * y);
        let viewport = Viewport::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        let grid = sample_field(&func, &viewport, 3, 3, GridLayout::Nodes).unwrap();

        assert_eq!(grid.values, vec![-1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0]);
        assert_eq!(grid.to_graph(GraphPoint(2.0, 2.0)), GraphPoint(1.0, -1.0));
        assert_eq!(grid.to_graph(GraphPoint(0.5, 1.0)), GraphPoint(-0.5, 0.0));
    }

    #[test]
    fn domain_empty() {
        let func = Evaluator::bivariate(|x, y| (x * y - 1e9).sqrt());
        let result = sample_field(&func, &Viewport::default(), 8, 8, GridLayout::CellCenter);
        assert_eq!(result, Err(PlotError::DomainEmpty));
    }

    #[test]
    fn invalid_viewport_is_rejected() {
        let func = Evaluator::bivariate(|_, _| panic!("sampled an invalid viewport"));
        let viewport = Viewport { x_min: 1.0, x_max: 0.0, y_min: 0.0, y_max: 1.0 };
        assert!(matches!(
            sample_field(&func, &viewport, 8, 8, GridLayout::Nodes),
            Err(PlotError::InvalidViewport(_)),
        ));
    }

    #[test]
    fn overflow_is_nan() {
        let func = Evaluator::bivariate(|x, _| if x < 0.0 { 1e300 } else { 1.0 });
        let viewport = Viewport::new(-1.0, 1.0, 0.0, 1.0).unwrap();
        let grid = sample_field(&func, &viewport, 2, 1, GridLayout::CellCenter).unwrap();
        assert!(grid.values[0].is_nan());
        assert_eq!(grid.values[1], 1.0);
        assert_eq!(grid.max_abs, 1.0);
    }

    #[test]
    fn raster() {
        let func = Evaluator::bivariate(|x, _| if x > 0.0 { x } else { f64::NAN });
        let viewport = Viewport::new(-1.0, 1.0, 0.0, 1.0).unwrap();
        let grid = sample_field(&func, &viewport, 2, 1, GridLayout::CellCenter).unwrap();
        assert_eq!(grid.to_rgba(), vec![0, 0, 0, 0, 255, 0, 0, 255]);
    }

    #[test]
    #[should_panic]
    fn node_grid_needs_two_samples() {
        let func = Evaluator::bivariate(|x, y| x + y);
        let _ = sample_field(&func, &Viewport::default(), 1, 5, GridLayout::Nodes);
    }

    #[test]
    fn deterministic() {
        let func = Evaluator::bivariate(|x, y| (x * y).sin() / x);
        let a = sample_field(&func, &Viewport::default(), 140, 62, GridLayout::CellCenter).unwrap();
        let b = sample_field(&func, &Viewport::default(), 140, 62, GridLayout::CellCenter).unwrap();

        // compare bit patterns, since `NaN != NaN`
        let bits = |grid: &ScalarGrid| grid.values.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }
}
