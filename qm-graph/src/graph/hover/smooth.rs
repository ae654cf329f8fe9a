use crate::graph::point::CanvasPoint;

/// Exponential smoothing of the displayed hover position.
///
/// Each update moves the displayed position `alpha` of the way toward the target. The first
/// update after a reset jumps straight to the target.
#[derive(Clone, Debug, PartialEq)]
pub struct Smoother {
    alpha: f64,
    current: Option<CanvasPoint<f64>>,
}

impl Smoother {
    /// Creates a smoother with the given factor.
    pub fn new(alpha: f64) -> Self {
        Self { alpha, current: None }
    }

    /// Returns the displayed position, if there is one.
    pub fn current(&self) -> Option<CanvasPoint<f64>> {
        self.current
    }

    /// Forgets the displayed position.
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Moves toward `target` and returns the new displayed position.
    pub fn update(&mut self, target: CanvasPoint<f64>) -> CanvasPoint<f64> {
        let next = match self.current {
            Some(current) => CanvasPoint(
                current.0 + (target.0 - current.0) * self.alpha,
                current.1 + (target.1 - current.1) * self.alpha,
            ),
            None => target,
        };
        self.current = Some(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use super::*;

    #[test]
    fn converges() {
        let mut smoother = Smoother::new(0.35);
        assert_eq!(smoother.update(CanvasPoint(100.0, 50.0)), CanvasPoint(100.0, 50.0));

        let next = smoother.update(CanvasPoint(200.0, 50.0));
        assert_float_absolute_eq!(next.0, 135.0, 1e-12);
        assert_eq!(next.1, 50.0);

        let mut last = next;
        for _ in 0..100 {
            last = smoother.update(CanvasPoint(200.0, 50.0));
        }
        assert_float_absolute_eq!(last.0, 200.0, 1e-9);

        smoother.reset();
        assert_eq!(smoother.current(), None);
        assert_eq!(smoother.update(CanvasPoint(0.0, 0.0)), CanvasPoint(0.0, 0.0));
    }
}
