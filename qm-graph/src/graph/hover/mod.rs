//! The hover readout of an interactive plot.
//!
//! [`Hover`] owns the presentation state (integer snapping and position smoothing) that sits on
//! top of the pure [`probe`](super::probe) functions. It should be reset whenever the pointer
//! leaves the plot.

mod smooth;
mod snap;

pub use smooth::Smoother;
pub use snap::Snap;

use super::{
    opts::PlotOptions,
    point::{CanvasPoint, GraphPoint},
    probe::{probe_field, probe_series, SeriesProbe},
    viewport::Viewport,
    PlotSpec,
};

/// What the pointer is over.
#[derive(Clone, Debug, PartialEq)]
pub enum HoverReading {
    /// A line or multi-line plot, probed at `x`.
    Series {
        /// The probed x-value, possibly snapped to an integer.
        x: f64,

        /// Whether `x` is snapped.
        snapped: bool,

        /// The series closest to the pointer, if any series is defined at `x`.
        probe: Option<SeriesProbe>,
    },

    /// A 2D plot, probed directly under the pointer. For an implicit plot `lhs = rhs`, the value
    /// is `lhs - rhs`.
    Field {
        point: GraphPoint<f64>,
        value: Option<f64>,
    },
}

/// A hover readout.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverState {
    /// Where to draw the readout marker, smoothed over time.
    pub display: CanvasPoint<f64>,

    /// The probed values.
    pub reading: HoverReading,
}

/// The hover state of a plot.
#[derive(Clone, Debug)]
pub struct Hover {
    snap: Snap,
    smoother: Smoother,
    size: CanvasPoint<u16>,
}

impl Hover {
    /// Creates a hover state using the snapping, smoothing, and canvas size of the options.
    pub fn new(options: &PlotOptions) -> Self {
        Self {
            snap: Snap::new(options.snap_in, options.snap_out),
            smoother: Smoother::new(options.smoothing),
            size: options.canvas_size,
        }
    }

    /// Forgets the snapped and displayed positions, such as when the pointer leaves the plot.
    pub fn reset(&mut self) {
        self.snap.release();
        self.smoother.reset();
    }

    /// Updates the readout for the pointer at the given canvas position.
    ///
    /// Returns [`None`] without changing any state if the viewport is invalid.
    pub fn update(
        &mut self,
        spec: &PlotSpec,
        viewport: &Viewport,
        pointer: CanvasPoint<f64>,
    ) -> Option<HoverState> {
        viewport.validate().ok()?;
        let size = self.size.to_f64();
        let point = viewport.to_graph(pointer, self.size);

        let (target, reading) = match spec {
            PlotSpec::Line(_) | PlotSpec::MultiLine(_) => {
                let x = self.snap.update(point.0, viewport, size.0);
                let snapped = self.snap.snapped().is_some();
                let probe = probe_series(spec.series(), x, pointer.1, viewport, self.size);

                let target = CanvasPoint(
                    if snapped { viewport.x_to_canvas(x, size.0) } else { pointer.0 },
                    probe.as_ref()
                        .map(|probe| viewport.y_to_canvas(probe.point.1, size.1))
                        .unwrap_or(pointer.1),
                );
                (target, HoverReading::Series { x, snapped, probe })
            },
            PlotSpec::Field(func) => {
                self.snap.release();
                (pointer, HoverReading::Field { point, value: probe_field(func, point) })
            },
            PlotSpec::Implicit { lhs, rhs } => {
                self.snap.release();
                let value = probe_field(lhs, point)
                    .zip(probe_field(rhs, point))
                    .map(|(lhs, rhs)| lhs - rhs)
                    .filter(|value| value.is_finite());
                (pointer, HoverReading::Field { point, value })
            },
        };

        Some(HoverState {
            display: self.smoother.update(target),
            reading,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use qm_compute::numerical::Evaluator;
    use super::super::Series;
    use super::*;

    #[test]
    fn line_snaps_and_follows_curve() {
        let spec = PlotSpec::Line(Series::new("y", Evaluator::univariate("x", |x| x * x)));
        let viewport = Viewport::default();
        let mut hover = Hover::new(&PlotOptions::default());

        // 6 px right of x = 2
        let state = hover.update(&spec, &viewport, CanvasPoint(366.0, 20.0)).unwrap();
        let HoverReading::Series { x, snapped, probe } = state.reading else {
            panic!("expected a series reading");
        };
        assert_eq!((x, snapped), (2.0, true));
        assert_eq!(probe.map(|probe| probe.point), Some(GraphPoint(2.0, 4.0)));

        // the marker sits on the curve at the snapped x-value
        assert_eq!(state.display, CanvasPoint(360.0, 78.0));
    }

    #[test]
    fn display_is_smoothed() {
        let spec = PlotSpec::Line(Series::new("y", Evaluator::univariate("x", |_| 0.0)));
        let viewport = Viewport::default();
        let mut hover = Hover::new(&PlotOptions::default().snap(0.0, 0.0));

        hover.update(&spec, &viewport, CanvasPoint(100.0, 0.0));
        let state = hover.update(&spec, &viewport, CanvasPoint(200.0, 0.0)).unwrap();
        assert_eq!(state.display, CanvasPoint(135.0, 130.0));

        hover.reset();
        let state = hover.update(&spec, &viewport, CanvasPoint(200.0, 0.0)).unwrap();
        assert_eq!(state.display, CanvasPoint(200.0, 130.0));
    }

    #[test]
    fn field_is_not_snapped() {
        let spec = PlotSpec::Field(Evaluator::bivariate(|x, y| x + y));
        let viewport = Viewport::default();
        let mut hover = Hover::new(&PlotOptions::default());

        let state = hover.update(&spec, &viewport, CanvasPoint(303.0, 13.0)).unwrap();
        assert_eq!(state.display, CanvasPoint(303.0, 13.0));

        let HoverReading::Field { point, value } = state.reading else {
            panic!("expected a field reading");
        };
        assert_float_absolute_eq!(point.0, 0.1, 1e-12);
        assert_float_absolute_eq!(point.1, 9.0, 1e-12);
        assert_float_absolute_eq!(value.unwrap(), 9.1, 1e-12);
    }

    #[test]
    fn implicit_reads_difference() {
        let spec = PlotSpec::Implicit {
            lhs: Evaluator::bivariate(|x, _| x),
            rhs: Evaluator::bivariate(|_, y| y),
        };
        let mut hover = Hover::new(&PlotOptions::default());
        let state = hover.update(&spec, &Viewport::default(), CanvasPoint(450.0, 130.0)).unwrap();
        assert_eq!(state.reading, HoverReading::Field {
            point: GraphPoint(5.0, 0.0),
            value: Some(5.0),
        });
    }

    #[test]
    fn invalid_viewport() {
        let spec = PlotSpec::Field(Evaluator::bivariate(|x, y| x + y));
        let viewport = Viewport { x_min: 1.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        let mut hover = Hover::new(&PlotOptions::default());
        assert_eq!(hover.update(&spec, &viewport, CanvasPoint(0.0, 0.0)), None);
    }
}
