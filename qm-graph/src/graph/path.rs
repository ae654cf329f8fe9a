//! Splitting sampled lines into continuous runs.
//!
//! Connecting every pair of adjacent samples draws vertical lines through asymptotes (`1/x` at
//! `0`) and across jumps (`floor(x)`). A fixed pixel threshold for "too steep to connect" breaks
//! steep but continuous curves instead, so [`build_paths`] combines a jump cap that scales with the
//! local magnitude of the function with probes of the function between the two samples.

use qm_compute::numerical::Evaluator;
use super::{opts::PlotOptions, point::GraphPoint, sample::SampleSeries};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A run of samples that should be drawn connected.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polyline {
    pub points: Vec<GraphPoint<f64>>,
}

/// Returns true if `f` blows up, or is undefined, at any of the given fractions of the way from
/// `a` to `b`.
fn probe_exceeds(func: &Evaluator, a: f64, b: f64, fractions: &[f64], bound: f64) -> bool {
    fractions.iter().any(|t| {
        let y = func.eval_x(a + (b - a) * t);
        !y.is_finite() || y.abs() > bound
    })
}

/// Returns true if the two adjacent finite samples should not be connected.
fn is_discontinuous(
    func: &Evaluator,
    prev: GraphPoint<f64>,
    curr: GraphPoint<f64>,
    y_span: f64,
    options: &PlotOptions,
) -> bool {
    let magnitude = prev.1.abs().max(curr.1.abs()).max(1.0);
    let jump_cap = (y_span.max(1e-9) * options.jump_fraction)
        .min(magnitude * options.jump_magnitude);
    if (curr.1 - prev.1).abs() > jump_cap {
        return true;
    }

    let bound = magnitude * options.probe_magnitude;
    probe_exceeds(func, prev.0, curr.0, &[0.5], bound)
        || probe_exceeds(func, prev.0, curr.0, &[0.25, 0.75], bound)
}

/// Splits `series` into runs that can each be drawn as one connected polyline.
///
/// A run ends at an undefined sample, and between two defined samples that are judged
/// discontinuous: when their difference exceeds the jump cap
/// `min(jump_fraction * y_span, jump_magnitude * max(|y0|, |y1|, 1))`, or when `func` is undefined
/// or exceeds `probe_magnitude * max(|y0|, |y1|, 1)` at the midpoint or the quarter points
/// between them. `y_span` is the height of the visible y-range.
///
/// A defined sample with undefined neighbors on both sides becomes a run of one point.
pub fn build_paths(
    series: &SampleSeries,
    func: &Evaluator,
    y_span: f64,
    options: &PlotOptions,
) -> Vec<Polyline> {
    let mut paths = Vec::new();
    let mut current: Vec<GraphPoint<f64>> = Vec::new();

    for &point in &series.points {
        if !point.1.is_finite() {
            if !current.is_empty() {
                paths.push(Polyline { points: std::mem::take(&mut current) });
            }
            continue;
        }

        if let Some(&prev) = current.last() {
            if is_discontinuous(func, prev, point, y_span, options) {
                paths.push(Polyline { points: std::mem::take(&mut current) });
            }
        }
        current.push(point);
    }

    if !current.is_empty() {
        paths.push(Polyline { points: current });
    }
    paths
}
