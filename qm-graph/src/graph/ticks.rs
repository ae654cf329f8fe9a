use super::{opts::PlotOptions, viewport::Viewport};

/// Rounds a step size up to the nearest `1`, `2`, or `5` times a power of ten.
///
/// Returns `1.0` for a step that is non-finite or not positive.
pub fn nice_step(rough: f64) -> f64 {
    if !rough.is_finite() || rough <= 0.0 {
        return 1.0;
    }

    let base = 10f64.powf(rough.log10().floor());
    let fraction = rough / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Returns evenly spaced tick values at multiples of a [`nice_step`], covering `[min, max]` with
/// roughly `target` ticks.
///
/// Returns no ticks if the span is non-finite or not positive.
pub fn build_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }

    let step = nice_step(span / target.max(2) as f64);

    // tick values are computed as `k * step` rather than accumulated, so that they are as close
    // as possible to the round numbers they represent
    let first = (min / step).ceil() as i64;
    let slop = step * 1e-9;
    (first..)
        .map(|k| k as f64 * step)
        .take_while(|&v| v <= max + slop)
        .collect()
}

/// Returns the `(x, y)` axis ticks for a viewport.
pub fn axis_ticks(viewport: &Viewport, options: &PlotOptions) -> (Vec<f64>, Vec<f64>) {
    (
        build_ticks(viewport.x_min, viewport.x_max, options.tick_targets.0),
        build_ticks(viewport.y_min, viewport.y_max, options.tick_targets.1),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(3.3), 5.0);
        assert_eq!(nice_step(0.15), 0.2);
        assert_eq!(nice_step(700.0), 1000.0);
        assert_eq!(nice_step(0.0), 1.0);
        assert_eq!(nice_step(f64::NAN), 1.0);
    }

    #[test]
    fn default_view() {
        assert_eq!(build_ticks(-10.0, 10.0, 6), vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
        assert_eq!(build_ticks(-10.0, 10.0, 5), vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
    }

    #[test]
    fn ticks_stay_in_range() {
        let ticks = build_ticks(0.05, 0.95, 6);
        assert_eq!(ticks.len(), 4);
        for (tick, expected) in ticks.iter().zip([0.2, 0.4, 0.6, 0.8]) {
            assert!((tick - expected).abs() < 1e-12, "{} != {}", tick, expected);
        }
        assert_eq!(build_ticks(-3.0, 1.0, 4), vec![-3.0, -2.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn invalid_spans() {
        assert!(build_ticks(1.0, 1.0, 6).is_empty());
        assert!(build_ticks(2.0, 1.0, 6).is_empty());
        assert!(build_ticks(f64::NEG_INFINITY, 1.0, 6).is_empty());
    }

    #[test]
    fn viewport_ticks() {
        let (x, y) = axis_ticks(&Viewport::default(), &PlotOptions::default());
        assert_eq!(x, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
        assert_eq!(y, x);
    }
}
