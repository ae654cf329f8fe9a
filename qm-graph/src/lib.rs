//! Geometry for the quickmath graphing calculator.
//!
//! This crate turns compiled functions ([`Evaluator`](qm_compute::numerical::Evaluator)s) into
//! renderable geometry: sampled line paths that break at discontinuities, scalar-field rasters,
//! and implicit-curve contours. It also provides the viewport math behind panning and zooming, and
//! the probe used to show values under the pointer.
//!
//! Rendering itself is left to the host; every type here is plain numeric data.
//!
//! # Features
//!
//! - `serde`: Derives [`serde`] traits for the viewport, the option types, and the geometry types
//!   provided by this crate.
//!
//! [`serde`]: https://crates.io/crates/serde

pub mod graph;

pub use graph::{plot, PlotData, PlotSpec, Viewport};
