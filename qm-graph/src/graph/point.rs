#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pair of `(x, y)` values in **graph** units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphPoint<T>(pub T, pub T);

impl<T> From<(T, T)> for GraphPoint<T> {
    fn from((x, y): (T, T)) -> GraphPoint<T> {
        GraphPoint(x, y)
    }
}

impl GraphPoint<f64> {
    /// Returns true if both coordinates are finite.
    pub fn is_finite(self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }

    /// Returns the distance between two points.
    pub fn distance(self, other: GraphPoint<f64>) -> f64 {
        (self.0 - other.0).hypot(self.1 - other.1)
    }

    /// Returns the point halfway between two points.
    pub fn midpoint(self, other: GraphPoint<f64>) -> GraphPoint<f64> {
        GraphPoint((self.0 + other.0) / 2.0, (self.1 + other.1) / 2.0)
    }
}

/// A pair of `(x, y)` values in **canvas** units (pixels, with `y` growing downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CanvasPoint<T>(pub T, pub T);

impl<T> From<(T, T)> for CanvasPoint<T> {
    fn from((x, y): (T, T)) -> CanvasPoint<T> {
        CanvasPoint(x, y)
    }
}

impl CanvasPoint<u16> {
    /// Converts a canvas size to floating point.
    pub fn to_f64(self) -> CanvasPoint<f64> {
        CanvasPoint(f64::from(self.0), f64::from(self.1))
    }
}

impl CanvasPoint<f64> {
    /// Returns the distance between two points, in pixels.
    pub fn distance(self, other: CanvasPoint<f64>) -> f64 {
        (self.0 - other.0).hypot(self.1 - other.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        assert_eq!(GraphPoint(0.0, 0.0).distance(GraphPoint(3.0, 4.0)), 5.0);
        assert_eq!(CanvasPoint(1.0, 1.0).distance(CanvasPoint(4.0, 5.0)), 5.0);
        assert_eq!(GraphPoint(-1.0, 2.0).midpoint(GraphPoint(3.0, 4.0)), GraphPoint(1.0, 3.0));
    }

    #[test]
    fn finiteness() {
        assert!(GraphPoint(1.0, -1.0).is_finite());
        assert!(!GraphPoint(1.0, f64::NAN).is_finite());
    }
}
