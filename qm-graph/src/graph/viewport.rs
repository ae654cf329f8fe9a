//! The logical window shown by a plot, and the transforms between it and the canvas.
//!
//! Every operation that moves a [`Viewport`] returns a new viewport instead of mutating it. An
//! operation that cannot be applied to the current bounds (for example, zooming a viewport with a
//! zero span) returns the viewport unchanged.

use std::fmt;
use qm_compute::numerical::fmt::format_number;
use super::{error::ViewportError, point::{CanvasPoint, GraphPoint}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular window of the plane, in graph units.
///
/// A valid viewport has finite bounds with `x_min < x_max` and `y_min < y_max`. Only valid
/// viewports can be sampled; see [`Viewport::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// The default viewport, `[-10, 10] × [-10, 10]`.
impl Default for Viewport {
    fn default() -> Viewport {
        Viewport {
            x_min: -10.0,
            x_max: 10.0,
            y_min: -10.0,
            y_max: 10.0,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "x ∈ [{}, {}] · y ∈ [{}, {}]",
            format_number(self.x_min),
            format_number(self.x_max),
            format_number(self.y_min),
            format_number(self.y_max),
        )
    }
}

/// Returns true if `span` can be scaled and divided by.
fn usable_span(span: f64) -> bool {
    span.is_finite() && span > 0.0
}

impl Viewport {
    /// Creates a viewport, rejecting non-finite or inverted bounds.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, ViewportError> {
        let viewport = Self { x_min, x_max, y_min, y_max };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Checks that the bounds are finite and increasing.
    pub fn validate(&self) -> Result<(), ViewportError> {
        let valid = |min: f64, max: f64| min.is_finite() && max.is_finite() && min < max;
        if !valid(self.x_min, self.x_max) {
            return Err(ViewportError::InvalidXRange { min: self.x_min, max: self.x_max });
        }
        if !valid(self.y_min, self.y_max) {
            return Err(ViewportError::InvalidYRange { min: self.y_min, max: self.y_max });
        }
        Ok(())
    }

    /// Returns the width of the viewport.
    pub fn x_span(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Returns the height of the viewport.
    pub fn y_span(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Returns the center of the viewport.
    pub fn center(&self) -> GraphPoint<f64> {
        GraphPoint((self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0)
    }

    /// Returns true if the point lies inside the viewport, bounds included.
    pub fn contains(&self, point: GraphPoint<f64>) -> bool {
        (self.x_min..=self.x_max).contains(&point.0) && (self.y_min..=self.y_max).contains(&point.1)
    }

    /// Converts an x-value in **graph** space to an x-value in **canvas** space.
    pub fn x_to_canvas(&self, x: f64, width: f64) -> f64 {
        (x - self.x_min) / self.x_span() * width
    }

    /// Converts a y-value in **graph** space to a y-value in **canvas** space.
    pub fn y_to_canvas(&self, y: f64, height: f64) -> f64 {
        // the y-axis is flipped: `y_max` is the top row of the canvas
        (self.y_max - y) / self.y_span() * height
    }

    /// Converts a point in **graph** space to **canvas** space.
    pub fn to_canvas(&self, point: GraphPoint<f64>, size: CanvasPoint<u16>) -> CanvasPoint<f64> {
        let size = size.to_f64();
        CanvasPoint(self.x_to_canvas(point.0, size.0), self.y_to_canvas(point.1, size.1))
    }

    /// Converts a point in **canvas** space to **graph** space.
    pub fn to_graph(&self, point: CanvasPoint<f64>, size: CanvasPoint<u16>) -> GraphPoint<f64> {
        let size = size.to_f64();
        GraphPoint(
            self.x_min + point.0 / size.0 * self.x_span(),
            self.y_max - point.1 / size.1 * self.y_span(),
        )
    }

    /// Scales both spans by `scale` while keeping `anchor` at the same position on the canvas.
    ///
    /// A scale below `1.0` zooms in. If the scale or either span is non-finite or not positive,
    /// or the anchor is non-finite, the viewport is returned unchanged.
    pub fn zoom_at(&self, scale: f64, anchor: GraphPoint<f64>) -> Viewport {
        let (x_span, y_span) = (self.x_span(), self.y_span());
        if !usable_span(scale) || !usable_span(x_span) || !usable_span(y_span)
            || !anchor.is_finite()
        {
            return *self;
        }

        let (new_x_span, new_y_span) = (x_span * scale, y_span * scale);
        let x_min = anchor.0 - (anchor.0 - self.x_min) / x_span * new_x_span;
        let y_min = anchor.1 - (anchor.1 - self.y_min) / y_span * new_y_span;
        Viewport {
            x_min,
            x_max: x_min + new_x_span,
            y_min,
            y_max: y_min + new_y_span,
        }
    }

    /// Zooms about a point given in canvas space, such as the pointer position of a wheel event.
    pub fn zoom_at_canvas(
        &self,
        scale: f64,
        anchor: CanvasPoint<f64>,
        size: CanvasPoint<u16>,
    ) -> Viewport {
        self.zoom_at(scale, self.to_graph(anchor, size))
    }

    /// Translates the viewport so that the content follows a pointer that moved by `delta`
    /// pixels.
    pub fn pan_by(&self, delta: CanvasPoint<f64>, size: CanvasPoint<u16>) -> Viewport {
        let size = size.to_f64();
        let (x_span, y_span) = (self.x_span(), self.y_span());
        if !usable_span(x_span) || !usable_span(y_span) {
            return *self;
        }

        // dragging right reveals smaller x-values, dragging down reveals larger y-values
        let shift_x = -delta.0 / size.0 * x_span;
        let shift_y = delta.1 / size.1 * y_span;
        if !shift_x.is_finite() || !shift_y.is_finite() {
            return *self;
        }

        Viewport {
            x_min: self.x_min + shift_x,
            x_max: self.x_max + shift_x,
            y_min: self.y_min + shift_y,
            y_max: self.y_max + shift_y,
        }
    }

    /// Adjusts the y-span to `x_span * ratio`, keeping the vertical center fixed.
    ///
    /// If the y-span is already within `tolerance` (relative) of the target, the viewport is
    /// returned unchanged, so that repeated locking does not drift from floating-point jitter.
    pub fn lock_aspect(&self, ratio: f64, tolerance: f64) -> Viewport {
        let target = self.x_span() * ratio;
        if !usable_span(target) {
            return *self;
        }

        let y_span = self.y_span();
        let drift = (target - y_span).abs() / y_span.max(1e-12);
        if drift < tolerance {
            return *self;
        }

        let y_mid = (self.y_min + self.y_max) / 2.0;
        Viewport {
            y_min: y_mid - target / 2.0,
            y_max: y_mid + target / 2.0,
            ..*self
        }
    }

    /// Returns the default viewport.
    pub fn reset(&self) -> Viewport {
        Viewport::default()
    }
}

/// A pan gesture in progress.
///
/// Every update pans from the viewport captured when the gesture began, so the accumulated
/// rounding of many small moves never makes the content drift away from the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
    /// The viewport when the gesture began.
    start: Viewport,

    /// The pointer position when the gesture began.
    origin: CanvasPoint<f64>,
}

impl Drag {
    /// Begins a drag at the given pointer position.
    pub fn new(start: Viewport, origin: CanvasPoint<f64>) -> Self {
        Self { start, origin }
    }

    /// Returns the viewport the drag started from.
    pub fn start(&self) -> Viewport {
        self.start
    }

    /// Returns the viewport for the pointer's current position.
    pub fn update(&self, pointer: CanvasPoint<f64>, size: CanvasPoint<u16>) -> Viewport {
        let delta = CanvasPoint(pointer.0 - self.origin.0, pointer.1 - self.origin.1);
        self.start.pan_by(delta, size)
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    const SIZE: CanvasPoint<u16> = CanvasPoint(600, 260);

    fn assert_viewport_eq(a: Viewport, b: Viewport) {
        assert_float_absolute_eq!(a.x_min, b.x_min, 1e-9);
        assert_float_absolute_eq!(a.x_max, b.x_max, 1e-9);
        assert_float_absolute_eq!(a.y_min, b.y_min, 1e-9);
        assert_float_absolute_eq!(a.y_max, b.y_max, 1e-9);
    }

    #[test]
    fn validation() {
        assert!(Viewport::new(-1.0, 1.0, -1.0, 1.0).is_ok());
        assert_eq!(
            Viewport::new(1.0, -1.0, -1.0, 1.0),
            Err(ViewportError::InvalidXRange { min: 1.0, max: -1.0 }),
        );
        assert_eq!(
            Viewport::new(-1.0, 1.0, 0.0, 0.0),
            Err(ViewportError::InvalidYRange { min: 0.0, max: 0.0 }),
        );
        assert!(Viewport::new(f64::NEG_INFINITY, 1.0, -1.0, 1.0).is_err());
        assert!(Viewport::new(-1.0, 1.0, f64::NAN, 1.0).is_err());
    }

    #[test]
    fn canvas_round_trip() {
        let viewport = Viewport::default();
        assert_eq!(viewport.to_canvas(GraphPoint(-10.0, 10.0), SIZE), CanvasPoint(0.0, 0.0));
        assert_eq!(viewport.to_canvas(GraphPoint(10.0, -10.0), SIZE), CanvasPoint(600.0, 260.0));
        assert_eq!(viewport.to_canvas(GraphPoint(0.0, 0.0), SIZE), CanvasPoint(300.0, 130.0));

        let point = GraphPoint(3.25, -7.5);
        let back = viewport.to_graph(viewport.to_canvas(point, SIZE), SIZE);
        assert_float_absolute_eq!(back.0, point.0, 1e-12);
        assert_float_absolute_eq!(back.1, point.1, 1e-12);
    }

    #[test]
    fn zoom_keeps_anchor() {
        let viewport = Viewport::new(-3.0, 5.0, -2.0, 1.0).unwrap();
        let anchor = GraphPoint(1.5, -0.5);
        let zoomed = viewport.zoom_at(0.5, anchor);

        assert_float_absolute_eq!(zoomed.x_span(), 4.0, 1e-12);
        assert_float_absolute_eq!(zoomed.y_span(), 1.5, 1e-12);

        let before = viewport.to_canvas(anchor, SIZE);
        let after = zoomed.to_canvas(anchor, SIZE);
        assert_float_absolute_eq!(before.0, after.0, 1e-9);
        assert_float_absolute_eq!(before.1, after.1, 1e-9);
    }

    #[test]
    fn zoom_inverse() {
        let viewports = [
            Viewport::default(),
            Viewport::new(-0.001, 0.002, 5.0, 5.5).unwrap(),
            Viewport::new(100.0, 900.0, -4000.0, -10.0).unwrap(),
        ];
        let scales = [0.9, 1.12, 0.25, 3.0];

        for viewport in viewports {
            for scale in scales {
                for (fx, fy) in [(0.5, 0.5), (0.0, 1.0), (0.1, 0.9), (1.0, 0.0)] {
                    let anchor = GraphPoint(
                        viewport.x_min + fx * viewport.x_span(),
                        viewport.y_min + fy * viewport.y_span(),
                    );
                    let back = viewport.zoom_at(scale, anchor).zoom_at(1.0 / scale, anchor);
                    assert_viewport_eq(back, viewport);
                }
            }
        }
    }

    #[test]
    fn degenerate_zoom_is_noop() {
        let flat = Viewport { x_min: 1.0, x_max: 1.0, y_min: -1.0, y_max: 1.0 };
        assert_eq!(flat.zoom_at(0.5, GraphPoint(1.0, 0.0)), flat);

        let viewport = Viewport::default();
        assert_eq!(viewport.zoom_at(f64::NAN, GraphPoint(0.0, 0.0)), viewport);
        assert_eq!(viewport.zoom_at(0.0, GraphPoint(0.0, 0.0)), viewport);
        assert_eq!(viewport.zoom_at(0.5, GraphPoint(f64::NAN, 0.0)), viewport);
        assert_eq!(viewport.zoom_at(0.5, GraphPoint(0.0, f64::INFINITY)), viewport);

        // a zero-sized canvas maps every pointer position to a non-finite point
        assert_eq!(viewport.zoom_at_canvas(0.5, CanvasPoint(0.0, 0.0), CanvasPoint(0, 0)), viewport);
    }

    #[test]
    fn zoom_at_pointer() {
        let viewport = Viewport::default();
        let zoomed = viewport.zoom_at_canvas(0.5, CanvasPoint(600.0, 0.0), SIZE);
        assert_eq!(zoomed, Viewport { x_min: 0.0, x_max: 10.0, y_min: 0.0, y_max: 10.0 });
    }

    #[test]
    fn pan() {
        let viewport = Viewport::default();
        let panned = viewport.pan_by(CanvasPoint(60.0, 26.0), SIZE);
        assert_viewport_eq(panned, Viewport { x_min: -12.0, x_max: 8.0, y_min: -8.0, y_max: 12.0 });
    }

    #[test]
    fn drag_pans_from_start() {
        let viewport = Viewport::default();
        let drag = Drag::new(viewport, CanvasPoint(100.0, 100.0));

        let end = drag.update(CanvasPoint(160.0, 100.0), SIZE);
        assert_eq!(end, viewport.pan_by(CanvasPoint(60.0, 0.0), SIZE));
        assert_eq!(drag.update(CanvasPoint(100.0, 100.0), SIZE), viewport);
    }

    #[test]
    fn aspect_lock() {
        let viewport = Viewport::default();
        let locked = viewport.lock_aspect(260.0 / 600.0, 1e-6);
        assert_float_absolute_eq!(locked.y_span(), 20.0 * 260.0 / 600.0, 1e-12);
        assert_eq!(locked.center(), viewport.center());
        assert_eq!(locked.x_min, viewport.x_min);

        // already locked
        assert_eq!(locked.lock_aspect(260.0 / 600.0, 1e-6), locked);

        // within tolerance
        let nudged = Viewport { y_max: locked.y_max + 1e-9, ..locked };
        assert_eq!(nudged.lock_aspect(260.0 / 600.0, 1e-6), nudged);
    }

    #[test]
    fn display() {
        let viewport = Viewport::new(-2.5, 2.5, 0.0, 1e-7).unwrap();
        assert_eq!(viewport.to_string(), "x ∈ [-2.5, 2.5] · y ∈ [0, 1e-7]");
        assert_eq!(Viewport::default().reset(), Viewport::default());
    }
}
