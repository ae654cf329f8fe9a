use super::{scan::opposite_signs, SolveOptions, DERIVATIVE_STEP, FLAT_DERIVATIVE, X_TOLERANCE};

/// Returns true if `x` looks like a root of `f`.
///
/// The value at `x` must be below the acceptance tolerance, and the function must either change
/// sign across `x`, or grow in magnitude on every defined side of `x` (a root where the function
/// only touches zero). A touching root must also be below [`SolveOptions::near_zero`], so the
/// minimum of a function that stays just above zero, like `x^2 + 1e-6`, is rejected. A point on
/// a flat tail that merely approaches zero, like the far left of `e^x`, is rejected too.
pub fn is_root_like(f: &impl Fn(f64) -> f64, x: f64, options: &SolveOptions) -> bool {
    let fx = f(x);
    if !fx.is_finite() || fx.abs() >= options.accept_tolerance {
        return false;
    }

    let h = DERIVATIVE_STEP * (1.0 + x.abs());
    let (left, right) = (f(x - h), f(x + h));
    if opposite_signs(left, right) {
        return true;
    }
    if fx.abs() >= options.near_zero {
        return false;
    }

    let neighbors = [left, right].into_iter()
        .filter(|v| v.is_finite())
        .collect::<Vec<_>>();
    !neighbors.is_empty() && neighbors.iter().all(|v| v.abs() > fx.abs())
}

/// Refines a seed with Newton's method, safeguarded by a backtracking line search.
///
/// The derivative is estimated with a central difference. A Newton step is only taken in full if
/// it reduces `|f|`; otherwise it is halved up to [`SolveOptions::line_search_halvings`] times,
/// and if no fraction of the step helps, the raw step is taken anyway.
///
/// Iteration stops when the step becomes negligible, when the function is exactly zero, or at the
/// iteration cap. The final point is then returned only if [`is_root_like`] accepts it. An
/// undefined value or derivative, or a flat derivative, aborts with [`None`].
pub fn newton(f: &impl Fn(f64) -> f64, seed: f64, options: &SolveOptions) -> Option<f64> {
    let mut x = seed;
    let mut y = f(x);

    for _ in 0..options.newton_max_iter {
        if !y.is_finite() {
            return None;
        }
        if y == 0.0 {
            break;
        }

        let h = DERIVATIVE_STEP * (1.0 + x.abs());
        let (yp, ym) = (f(x + h), f(x - h));
        if !yp.is_finite() || !ym.is_finite() {
            return None;
        }
        let dy = (yp - ym) / (2.0 * h);
        if !dy.is_finite() {
            return None;
        }
        if dy.abs() < FLAT_DERIVATIVE {
            return None;
        }

        let dx = y / dy;
        let mut step = None;
        let mut t = 1.0;
        for _ in 0..options.line_search_halvings {
            let candidate = x - t * dx;
            let yc = f(candidate);
            if yc.is_finite() && yc.abs() < y.abs() {
                step = Some((candidate, yc));
                break;
            }
            t *= 0.5;
        }

        let (next_x, next_y) = match step {
            Some(step) => step,
            None => (x - dx, f(x - dx)),
        };
        if !next_x.is_finite() || !next_y.is_finite() {
            return None;
        }

        let converged = (next_x - x).abs() < X_TOLERANCE * (1.0 + x.abs());
        x = next_x;
        y = next_y;
        if converged {
            break;
        }
    }

    is_root_like(f, x, options).then_some(x)
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_is_absolute_eq,
        assert_float_absolute_eq,
    };
    use super::*;

    #[test]
    fn square_root_of_two() {
        let f = |x: f64| x * x - 2.0;
        let root = newton(&f, 1.0, &SolveOptions::default()).unwrap();
        assert_float_absolute_eq!(root, std::f64::consts::SQRT_2, 1e-10);
    }

    #[test]
    fn tangential_root() {
        let f = |x: f64| (x - 3.0).powi(2);
        let root = newton(&f, 3.01, &SolveOptions::default()).unwrap();
        assert_float_absolute_eq!(root, 3.0, 1e-4);
    }

    #[test]
    fn exact_seed() {
        let f = |x: f64| x * x;
        assert_eq!(newton(&f, 0.0, &SolveOptions::default()), Some(0.0));
    }

    #[test]
    fn vanishing_tail_is_not_a_root() {
        let f = f64::exp;
        assert_eq!(newton(&f, -50.0, &SolveOptions::default()), None);
        assert_eq!(newton(&f, -1000.0, &SolveOptions::default()), None);
        assert_eq!(newton(&f, -17.0, &SolveOptions::default()), None);
    }

    #[test]
    fn no_nearby_root() {
        let f = |x: f64| x * x + 1.0;
        assert_eq!(newton(&f, 0.3, &SolveOptions::default()), None);
    }

    #[test]
    fn flat_minimum_above_zero() {
        let f = |x: f64| x * x + 1e-6;
        assert_eq!(newton(&f, 0.0, &SolveOptions::default()), None);
        assert_eq!(newton(&f, 0.125, &SolveOptions::default()), None);
    }

    #[test]
    fn root_like() {
        let options = SolveOptions::default();
        assert!(is_root_like(&|x: f64| x - 1.0, 1.0, &options));
        assert!(is_root_like(&|x: f64| x * x, 0.0, &options));
        assert!(is_root_like(&f64::sqrt, 0.0, &options));
        assert!(!is_root_like(&f64::exp, -40.0, &options));
        assert!(!is_root_like(&|_: f64| 0.0, 5.0, &options));
        assert!(!is_root_like(&|x: f64| x * x + 1e-6, 0.0, &options));
    }
}
