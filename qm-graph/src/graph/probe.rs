//! Reading values off a plot at a point.
//!
//! These functions are pure; the snapping and smoothing that make the hover readout pleasant to
//! look at live in [`hover`](super::hover).

use qm_compute::numerical::Evaluator;
use super::{point::{CanvasPoint, GraphPoint}, viewport::Viewport, Series};

/// The value of a series at a probed x-value.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesProbe {
    /// The index of the series in the plot.
    pub index: usize,

    /// The label of the series.
    pub label: String,

    /// The probed point on the series.
    pub point: GraphPoint<f64>,
}

/// Evaluates a field at a point. Returns [`None`] where the field is undefined.
pub fn probe_field(func: &Evaluator, point: GraphPoint<f64>) -> Option<f64> {
    let value = func.eval_xy(point.0, point.1);
    value.is_finite().then_some(value)
}

/// Evaluates every series at `x`, and returns the series whose point is closest to the pointer,
/// measured vertically in canvas space.
///
/// Series that are undefined at `x` are ignored. If several series are equally close, the first
/// one wins. Returns [`None`] if every series is undefined at `x`.
pub fn probe_series(
    series: &[Series],
    x: f64,
    pointer_y: f64,
    viewport: &Viewport,
    size: CanvasPoint<u16>,
) -> Option<SeriesProbe> {
    let height = size.to_f64().1;
    series.iter()
        .enumerate()
        .filter_map(|(index, series)| {
            let y = series.func.eval_x(x);
            if !y.is_finite() {
                return None;
            }
            let distance = (viewport.y_to_canvas(y, height) - pointer_y).abs();
            Some((distance, index, series, y))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, index, series, y)| SeriesProbe {
            index,
            label: series.label.clone(),
            point: GraphPoint(x, y),
        })
}
