use crate::graph::viewport::Viewport;

/// Snaps the hovered x-value to nearby integers, with hysteresis.
///
/// The probe snaps to an integer once the pointer comes within `snap_in` pixels of it, and stays
/// snapped until the pointer moves more than `snap_out` pixels away. With `snap_out > snap_in`,
/// the probe does not flicker when the pointer rests near the boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Snap {
    snap_in: f64,
    snap_out: f64,

    /// The integer the probe is snapped to.
    snapped: Option<f64>,
}

impl Snap {
    /// Creates an unsnapped state with the given distances, in pixels.
    pub fn new(snap_in: f64, snap_out: f64) -> Self {
        Self { snap_in, snap_out, snapped: None }
    }

    /// Returns the integer the probe is snapped to, if any.
    pub fn snapped(&self) -> Option<f64> {
        self.snapped
    }

    /// Forgets the snapped integer.
    pub fn release(&mut self) {
        self.snapped = None;
    }

    /// Updates the state for a pointer at graph x-value `x`, and returns the x-value to probe.
    ///
    /// A probe that is released by this update does not snap again until the next one.
    pub fn update(&mut self, x: f64, viewport: &Viewport, width: f64) -> f64 {
        let pointer = viewport.x_to_canvas(x, width);

        match self.snapped {
            Some(snapped) => {
                let snapped_px = viewport.x_to_canvas(snapped, width);
                if !snapped_px.is_finite() || (snapped_px - pointer).abs() > self.snap_out {
                    self.snapped = None;
                }
            },
            None => {
                let nearest = x.round();
                let nearest_px = viewport.x_to_canvas(nearest, width);
                if nearest_px.is_finite() && (nearest_px - pointer).abs() <= self.snap_in {
                    self.snapped = Some(nearest);
                }
            },
        }

        self.snapped.unwrap_or(x)
    }
}
