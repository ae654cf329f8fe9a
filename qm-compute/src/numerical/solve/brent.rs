use super::{scan::{opposite_signs, Bracket}, SolveOptions, X_TOLERANCE};

/// Refines a root inside a sign-change bracket using Brent's method.
///
/// Each iteration tries inverse quadratic interpolation (or the secant method when only two
/// distinct points are known), and falls back to bisection whenever the interpolated step would
/// leave the bracket or shrink it too slowly.
///
/// An iterate with `|f|` below [`SolveOptions::near_zero`] ends the search early, but a bracket
/// endpoint never does: on a very flat function, an endpoint can be that small without being
/// anywhere near the root, so it is refined like any other bracket. An endpoint that is exactly
/// zero is returned as is.
///
/// Returns [`None`] if either endpoint is undefined, if the endpoints do not bracket a root, if an
/// iterate lands outside the function's domain, if the iteration cap is reached, or if the bracket
/// collapsed onto a pole rather than a root.
pub fn brent(f: &impl Fn(f64) -> f64, bracket: Bracket, options: &SolveOptions) -> Option<f64> {
    let near_zero = options.near_zero;

    let (mut a, mut b) = (bracket.left, bracket.right);
    let (mut fa, mut fb) = (f(a), f(b));
    if !fa.is_finite() || !fb.is_finite() {
        return None;
    }
    if fa == 0.0 {
        return Some(a);
    }
    if fb == 0.0 {
        return Some(b);
    }
    if !opposite_signs(fa, fb) {
        return None;
    }

    // a root has a smaller `|f|` than the endpoints; a pole has a larger one
    let endpoint_scale = fa.abs().min(fb.abs());
    let is_endpoint = |x: f64| x == bracket.left || x == bracket.right;

    // `b` is the best estimate so far, `a` the previous estimate, and `c` the contrapoint: `f(b)`
    // and `f(c)` always have opposite signs, so the root stays inside `[b, c]`
    let (mut c, mut fc) = (a, fa);
    let mut d = b - a;
    let mut e = d;

    for _ in 0..options.brent_max_iter {
        if !opposite_signs(fb, fc) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }

        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = X_TOLERANCE * (1.0 + b.abs());
        let m = 0.5 * (c - b);
        if fb.abs() < near_zero && !is_endpoint(b) {
            return Some(b);
        }
        if m.abs() <= tol {
            let settled = fb.abs() < options.accept_tolerance || fb.abs() < endpoint_scale;
            return settled.then_some(b);
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                // secant
                (2.0 * m * s, 1.0 - s)
            } else {
                // inverse quadratic interpolation
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * m * q - (tol * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = d;
            }
        } else {
            d = m;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(m) };
        fb = f(b);
        if !fb.is_finite() {
            return None;
        }
    }

    None
}
