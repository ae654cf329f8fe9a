use log::trace;
use super::SolveOptions;

/// An interval `[left, right]` where the function has opposite signs at the endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub left: f64,
    pub right: f64,
}

/// Returns true if `a` and `b` are both non-zero and have opposite signs.
///
/// Unlike `a * b < 0.0`, this cannot be fooled by the product underflowing to zero.
pub(super) fn opposite_signs(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

/// The candidates collected by scanning one or more ranges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scan {
    /// Adjacent sample pairs with a sign change.
    pub brackets: Vec<Bracket>,

    /// Points suspected to lie near a root without a sign change around them.
    pub seeds: Vec<f64>,
}

impl Scan {
    /// Samples `f` at `samples + 1` evenly spaced points across `[-half_width, half_width]` and
    /// records the brackets and seeds found.
    ///
    /// `f` must return `NaN` where it is undefined. A `NaN` sample clears the window of previous
    /// samples, so no bracket or seed is ever formed across a gap in the domain.
    pub fn extend(&mut self, f: &impl Fn(f64) -> f64, half_width: f64, options: &SolveOptions) {
        let samples = options.samples_per_range.max(1);
        let (min_x, max_x) = (-half_width, half_width);
        let step = (max_x - min_x) / samples as f64;

        // the two most recent finite samples, oldest first
        let mut window: [Option<(f64, f64)>; 2] = [None, None];

        for i in 0..=samples {
            let x2 = min_x + i as f64 * step;
            let y2 = f(x2);
            if !y2.is_finite() {
                window = [None, None];
                continue;
            }

            if y2.abs() < options.near_zero {
                self.seeds.push(x2);
            }

            if let Some((x1, y1)) = window[1] {
                if opposite_signs(y1, y2) {
                    self.brackets.push(Bracket { left: x1, right: x2 });
                }

                // a local minimum of |f| that is small, but doesn't cross zero, can indicate a
                // root where the function only touches the axis
                if let Some((_, y0)) = window[0] {
                    let (a0, a1, a2) = (y0.abs(), y1.abs(), y2.abs());
                    if a1 <= a0 && a1 <= a2 && a1 < options.seed_threshold {
                        self.seeds.push(x1);
                    }
                }
            }

            window = [window[1], Some((x2, y2))];
        }

        trace!(
            "scanned [{}, {}]: {} bracket(s), {} seed(s) so far",
            min_x, max_x, self.brackets.len(), self.seeds.len(),
        );
    }

    /// Removes exact duplicates, which appear because the scanned ranges are nested.
    pub fn dedup(&mut self) {
        self.brackets.sort_by(|a, b| a.left.total_cmp(&b.left).then(a.right.total_cmp(&b.right)));
        self.brackets.dedup();
        self.seeds.sort_by(|a, b| a.total_cmp(b));
        self.seeds.dedup();
    }
}
