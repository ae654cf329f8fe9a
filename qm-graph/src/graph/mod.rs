//! Plot assembly.
//!
//! The host classifies an input and compiles its functions, then describes what to draw with a
//! [`PlotSpec`]. [`plot`] samples the spec over a [`Viewport`] and returns renderable geometry:
//!
//! - [`PlotSpec::Line`] and [`PlotSpec::MultiLine`]: functions of `x`, sampled at
//!   [`PlotOptions::line_samples`] points and split into [`Polyline`]s at discontinuities.
//! - [`PlotSpec::Field`]: a function of `x` and `y`, sampled at the centers of a
//!   [`PlotOptions::field_grid`] grid and colored with [`field_color`](color::field_color).
//! - [`PlotSpec::Implicit`]: the curve where `lhs = rhs`, found by contouring `lhs - rhs` on a
//!   [`PlotOptions::contour_grid`] grid.
//!
//! # Example
//!
//! ```
//! use qm_compute::numerical::Evaluator;
//! use qm_graph::graph::{plot, PlotData, PlotOptions, PlotSpec, Series, Viewport};
//!
//! let spec = PlotSpec::Line(Series::new("y", Evaluator::univariate("x", |x| 1.0 / x)));
//! let data = plot(&spec, &Viewport::default(), &PlotOptions::default()).unwrap();
//!
//! let PlotData::Line(line) = data else { unreachable!() };
//! assert_eq!(line.samples.len(), 720);
//! assert!(line.paths.len() >= 2); // broken at the asymptote
//! ```

pub mod color;
pub mod contour;
pub mod error;
pub mod hover;
pub mod opts;
pub mod path;
pub mod point;
pub mod probe;
pub mod sample;
pub mod ticks;
pub mod view;
pub mod viewport;

use log::debug;
use qm_compute::numerical::Evaluator;
use rayon::prelude::*;

pub use contour::{march_squares, Segment};
pub use error::{PlotError, SeriesError, ViewportError};
pub use opts::PlotOptions;
pub use path::{build_paths, Polyline};
pub use point::{CanvasPoint, GraphPoint};
pub use sample::{sample_field, sample_line, GridLayout, SampleSeries, ScalarGrid};
pub use view::View;
pub use viewport::{Drag, Viewport};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A labeled function of `x`.
#[derive(Clone, Debug)]
pub struct Series {
    /// The name shown for the series, such as `f` for `f(x) = ...`.
    pub label: String,

    /// The compiled function.
    pub func: Evaluator,
}

impl Series {
    /// Creates a series.
    pub fn new(label: impl Into<String>, func: Evaluator) -> Self {
        Self { label: label.into(), func }
    }
}

/// What to plot, as classified by the host.
#[derive(Clone, Debug)]
pub enum PlotSpec {
    /// A single function of `x`.
    Line(Series),

    /// Several named functions of `x`, drawn on the same axes.
    MultiLine(Vec<Series>),

    /// A function of `x` and `y`, drawn as a color field.
    Field(Evaluator),

    /// The curve where `lhs = rhs`, both functions of `x` and `y`.
    Implicit {
        lhs: Evaluator,
        rhs: Evaluator,
    },
}

/// The kind of a plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlotKind {
    #[default]
    Line,
    MultiLine,
    Field,
    Implicit,
}

impl PlotKind {
    /// Returns true if the plot is a function of both `x` and `y`. These plots keep the x- and
    /// y-axes at the same scale.
    pub fn is_2d(self) -> bool {
        matches!(self, PlotKind::Field | PlotKind::Implicit)
    }
}

impl PlotSpec {
    /// Returns the kind of the plot.
    pub fn kind(&self) -> PlotKind {
        match self {
            PlotSpec::Line(_) => PlotKind::Line,
            PlotSpec::MultiLine(_) => PlotKind::MultiLine,
            PlotSpec::Field(_) => PlotKind::Field,
            PlotSpec::Implicit { .. } => PlotKind::Implicit,
        }
    }

    /// Returns the series of a line or multi-line plot.
    pub fn series(&self) -> &[Series] {
        match self {
            PlotSpec::Line(series) => std::slice::from_ref(series),
            PlotSpec::MultiLine(series) => series,
            PlotSpec::Field(_) | PlotSpec::Implicit { .. } => &[],
        }
    }
}

/// A sampled function of `x`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinePlot {
    /// The label of the series.
    pub label: String,

    /// The raw samples.
    pub samples: SampleSeries,

    /// The samples split into continuous runs.
    pub paths: Vec<Polyline>,
}

/// The zero-level set of `lhs - rhs`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImplicitPlot {
    /// `lhs - rhs`, sampled on the contour grid.
    pub grid: ScalarGrid,

    /// The contour, in grid coordinates.
    pub segments: Vec<Segment>,
}

impl ImplicitPlot {
    /// Returns the contour in graph coordinates.
    pub fn graph_segments(&self) -> Vec<Segment> {
        self.segments.iter()
            .map(|segment| segment.to_graph(&self.grid))
            .collect()
    }
}

/// The geometry produced by [`plot`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlotData {
    Line(LinePlot),

    /// One entry per series, in order. A series that cannot be plotted is reported in place
    /// without affecting the others.
    MultiLine(Vec<Result<LinePlot, SeriesError>>),

    Field(ScalarGrid),

    Implicit(ImplicitPlot),
}

impl PlotData {
    /// Returns the kind of the plot.
    pub fn kind(&self) -> PlotKind {
        match self {
            PlotData::Line(_) => PlotKind::Line,
            PlotData::MultiLine(_) => PlotKind::MultiLine,
            PlotData::Field(_) => PlotKind::Field,
            PlotData::Implicit(_) => PlotKind::Implicit,
        }
    }
}

/// Samples a function of `x` over the viewport.
fn plot_series(
    series: &Series,
    viewport: &Viewport,
    options: &PlotOptions,
) -> Result<LinePlot, SeriesError> {
    let variables = series.func.unsupported_vars(&["x"]);
    if !variables.is_empty() {
        return Err(SeriesError::UnsupportedVariables { label: series.label.clone(), variables });
    }

    let samples = sample_line(&series.func, (viewport.x_min, viewport.x_max), options.line_samples);
    let paths = build_paths(&samples, &series.func, viewport.y_span(), options);
    Ok(LinePlot { label: series.label.clone(), samples, paths })
}

/// Checks that `func` only reads `x` and `y`.
fn check_2d(func: &Evaluator) -> Result<(), PlotError> {
    let variables = func.unsupported_vars(&["x", "y"]);
    if variables.is_empty() {
        Ok(())
    } else {
        Err(PlotError::UnsupportedVariables { label: None, variables })
    }
}

/// Samples a [`PlotSpec`] over the viewport.
///
/// The viewport is validated before anything is sampled. Returns [`PlotError::DomainEmpty`] if
/// not a single finite value is found anywhere in the viewport, so that the host can explain why
/// nothing is drawn.
pub fn plot(
    spec: &PlotSpec,
    viewport: &Viewport,
    options: &PlotOptions,
) -> Result<PlotData, PlotError> {
    viewport.validate()?;
    debug!("plotting {:?} over {}", spec.kind(), viewport);

    match spec {
        PlotSpec::Line(series) => {
            let line = plot_series(series, viewport, options)?;
            if !line.samples.has_finite() {
                debug!("`{}` is undefined everywhere in view", series.label);
                return Err(PlotError::DomainEmpty);
            }
            Ok(PlotData::Line(line))
        },
        PlotSpec::MultiLine(series) => {
            let lines = series.par_iter()
                .map(|series| plot_series(series, viewport, options))
                .collect::<Vec<_>>();
            for line in &lines {
                if let Err(err) = line {
                    debug!("skipping series: {}", err);
                }
            }

            // when no series could be sampled at all, its error explains the failure better
            if !lines.iter().any(Result::is_ok) {
                if let Some(Err(err)) = lines.into_iter().next() {
                    return Err(err.into());
                }
                return Err(PlotError::DomainEmpty);
            }

            let any_finite = lines.iter()
                .any(|line| line.as_ref().is_ok_and(|line| line.samples.has_finite()));
            if !any_finite {
                return Err(PlotError::DomainEmpty);
            }
            Ok(PlotData::MultiLine(lines))
        },
        PlotSpec::Field(func) => {
            check_2d(func)?;
            let (width, height) = options.field_grid;
            sample_field(func, viewport, width, height, GridLayout::CellCenter).map(PlotData::Field)
        },
        PlotSpec::Implicit { lhs, rhs } => {
            let func = Evaluator::difference(lhs.clone(), rhs.clone());
            check_2d(&func)?;
            let (width, height) = options.contour_grid;
            let grid = sample_field(&func, viewport, width, height, GridLayout::Nodes)?;
            let segments = march_squares(&grid);
            Ok(PlotData::Implicit(ImplicitPlot { grid, segments }))
        },
    }
}
