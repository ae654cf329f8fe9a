#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::point::CanvasPoint;

/// Options to use when sampling and interacting with a plot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotOptions {
    /// The width and height of the canvas the plot is rendered to, in pixels.
    ///
    /// The canvas size determines the aspect ratio that 2D plots are locked to, and the pixel
    /// distances used by the hover snapping.
    ///
    /// The default value is `(600, 260)`.
    pub canvas_size: CanvasPoint<u16>,

    /// The number of samples taken across the visible x-range for each line plot.
    ///
    /// The default value is `720`.
    pub line_samples: usize,

    /// The `(width, height)` of the grid sampled for color fields.
    ///
    /// This grid is recomputed on every pan and zoom, so it is kept coarse.
    ///
    /// The default value is `(140, 62)`.
    pub field_grid: (usize, usize),

    /// The `(width, height)` of the grid sampled for implicit-curve contours.
    ///
    /// The default value is `(160, 72)`.
    pub contour_grid: (usize, usize),

    /// The relative difference between the current and the locked y-span below which aspect
    /// locking leaves the viewport unchanged.
    ///
    /// The default value is `1e-6`.
    pub aspect_tolerance: f64,

    /// The fraction of the visible y-span that two adjacent samples may differ by before the
    /// path is broken between them.
    ///
    /// The default value is `0.35`.
    pub jump_fraction: f64,

    /// The multiple of the local magnitude (`max(|y0|, |y1|, 1)`) that two adjacent samples may
    /// differ by before the path is broken between them.
    ///
    /// The default value is `5.0`.
    pub jump_magnitude: f64,

    /// The multiple of the local magnitude that the function may reach between two adjacent
    /// samples before the path is broken between them.
    ///
    /// The default value is `10.0`.
    pub probe_magnitude: f64,

    /// The distance, in pixels, from an integer x-value at which the hover probe snaps to it.
    ///
    /// The default value is `10.0`.
    pub snap_in: f64,

    /// The distance, in pixels, from the snapped x-value beyond which the hover probe is
    /// released.
    ///
    /// The default value is `16.0`.
    pub snap_out: f64,

    /// The smoothing factor applied to the displayed hover position on every update, in the range
    /// `0.0` (never moves) to `1.0` (no smoothing).
    ///
    /// The default value is `0.35`.
    pub smoothing: f64,

    /// The factor both spans are scaled by when zooming in.
    ///
    /// The default value is `0.9`.
    pub zoom_in: f64,

    /// The factor both spans are scaled by when zooming out.
    ///
    /// The default value is `1.12`.
    pub zoom_out: f64,

    /// The approximate number of `(x, y)` axis ticks to generate.
    ///
    /// The default value is `(6, 5)`.
    pub tick_targets: (usize, usize),
}

/// The default options for a plot. Returns a [`PlotOptions`] with the following values:
///
/// - [`canvas_size`](PlotOptions::canvas_size): `(600, 260)`
/// - [`line_samples`](PlotOptions::line_samples): `720`
/// - [`field_grid`](PlotOptions::field_grid): `(140, 62)`
/// - [`contour_grid`](PlotOptions::contour_grid): `(160, 72)`
/// - [`aspect_tolerance`](PlotOptions::aspect_tolerance): `1e-6`
/// - [`jump_fraction`](PlotOptions::jump_fraction): `0.35`
/// - [`jump_magnitude`](PlotOptions::jump_magnitude): `5.0`
/// - [`probe_magnitude`](PlotOptions::probe_magnitude): `10.0`
/// - [`snap_in`](PlotOptions::snap_in): `10.0`
/// - [`snap_out`](PlotOptions::snap_out): `16.0`
/// - [`smoothing`](PlotOptions::smoothing): `0.35`
/// - [`zoom_in`](PlotOptions::zoom_in): `0.9`
/// - [`zoom_out`](PlotOptions::zoom_out): `1.12`
/// - [`tick_targets`](PlotOptions::tick_targets): `(6, 5)`
impl Default for PlotOptions {
    fn default() -> PlotOptions {
        PlotOptions {
            canvas_size: CanvasPoint(600, 260),
            line_samples: 720,
            field_grid: (140, 62),
            contour_grid: (160, 72),
            aspect_tolerance: 1e-6,
            jump_fraction: 0.35,
            jump_magnitude: 5.0,
            probe_magnitude: 10.0,
            snap_in: 10.0,
            snap_out: 16.0,
            smoothing: 0.35,
            zoom_in: 0.9,
            zoom_out: 1.12,
            tick_targets: (6, 5),
        }
    }
}

impl PlotOptions {
    /// Set the canvas size. Returns an updated [`PlotOptions`] for chaining.
    pub fn canvas_size(mut self, width: u16, height: u16) -> Self {
        self.canvas_size = CanvasPoint(width, height);
        self
    }

    /// Set the number of samples per line plot. Returns an updated [`PlotOptions`] for chaining.
    pub fn line_samples(mut self, line_samples: usize) -> Self {
        self.line_samples = line_samples;
        self
    }

    /// Set the size of the color field grid. Returns an updated [`PlotOptions`] for chaining.
    pub fn field_grid(mut self, width: usize, height: usize) -> Self {
        self.field_grid = (width, height);
        self
    }

    /// Set the size of the contour grid. Returns an updated [`PlotOptions`] for chaining.
    pub fn contour_grid(mut self, width: usize, height: usize) -> Self {
        self.contour_grid = (width, height);
        self
    }

    /// Set the aspect locking tolerance. Returns an updated [`PlotOptions`] for chaining.
    pub fn aspect_tolerance(mut self, aspect_tolerance: f64) -> Self {
        self.aspect_tolerance = aspect_tolerance;
        self
    }

    /// Set the jump thresholds of the path builder. Returns an updated [`PlotOptions`] for
    /// chaining.
    pub fn jump(mut self, fraction: f64, magnitude: f64) -> Self {
        self.jump_fraction = fraction;
        self.jump_magnitude = magnitude;
        self
    }

    /// Set the probe threshold of the path builder. Returns an updated [`PlotOptions`] for
    /// chaining.
    pub fn probe_magnitude(mut self, probe_magnitude: f64) -> Self {
        self.probe_magnitude = probe_magnitude;
        self
    }

    /// Set the hover snapping distances. Returns an updated [`PlotOptions`] for chaining.
    pub fn snap(mut self, snap_in: f64, snap_out: f64) -> Self {
        self.snap_in = snap_in;
        self.snap_out = snap_out;
        self
    }

    /// Set the hover smoothing factor. Returns an updated [`PlotOptions`] for chaining.
    pub fn smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the zoom factors. Returns an updated [`PlotOptions`] for chaining.
    pub fn zoom(mut self, zoom_in: f64, zoom_out: f64) -> Self {
        self.zoom_in = zoom_in;
        self.zoom_out = zoom_out;
        self
    }

    /// Set the approximate number of axis ticks. Returns an updated [`PlotOptions`] for
    /// chaining.
    pub fn tick_targets(mut self, x: usize, y: usize) -> Self {
        self.tick_targets = (x, y);
        self
    }

    /// Returns the ratio of the canvas height to its width, which 2D plots lock their y-span to.
    pub fn aspect_ratio(&self) -> f64 {
        let size = self.canvas_size.to_f64();
        size.1 / size.0
    }
}
