//! Heuristic global root finding for real functions of one variable.
//!
//! [`find_roots`] is the fallback used when an equation has no closed-form solution. It cannot
//! prove that it found every root, but it is designed to find the roots a user would expect to
//! see, and to never report a point that is not actually a root.
//!
//! The search has three stages:
//!
//! 1. **Scan**: the function is sampled across a list of symmetric ranges around the origin (by
//!    default `[-50, 50]`, `[-200, 200]`, and `[-1000, 1000]`). Adjacent samples with opposite
//!    signs become brackets. Samples that are nearly zero, or that are a small local minimum of
//!    `|f|`, become seeds. Undefined samples break the scan, so nothing is ever bracketed across a
//!    pole or a gap in the domain.
//! 2. **Refine**: each bracket is refined with Brent's method, and each seed with a safeguarded
//!    Newton iteration. Newton results are kept only if the function actually crosses or touches
//!    zero there, and Brent results only if the bracket closed in on a small value rather than on
//!    a pole.
//! 3. **Deduplicate**: the results are sorted, and results closer than
//!    [`SolveOptions::dedup_tolerance`] are merged.
//!
//! ```
//! use qm_compute::numerical::solve::{find_roots, SolveOptions};
//!
//! let roots = find_roots(|x| x * x - 4.0, &SolveOptions::default());
//! let rounded = roots.iter().map(|x| x.round()).collect::<Vec<_>>();
//! assert_eq!(rounded, vec![-2.0, 2.0]);
//! ```

mod brent;
mod newton;
mod root_set;
mod scan;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::{debug, trace};
use super::func::Evaluator;

pub use root_set::RootSet;
pub use scan::{Bracket, Scan};

/// Relative step used for central-difference derivatives and the root-likeness probe.
const DERIVATIVE_STEP: f64 = 1e-6;

/// Below this magnitude, a derivative is considered flat and Newton's method stops.
const FLAT_DERIVATIVE: f64 = 1e-12;

/// Relative tolerance on `x` for Brent's method and Newton's method.
const X_TOLERANCE: f64 = 1e-12;

/// Options for the numeric root finder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolveOptions {
    /// A sample or iterate whose magnitude is below this value is treated as a root.
    ///
    /// The default value is `1e-7`.
    pub near_zero: f64,

    /// A sample that is a local minimum of `|f|` and below this value becomes a Newton seed.
    ///
    /// The default value is `5e-4`.
    pub seed_threshold: f64,

    /// The half-widths of the ranges to scan. Each range `r` is scanned over `[-r, r]`.
    ///
    /// The default value is `[50.0, 200.0, 1000.0]`.
    pub ranges: Vec<f64>,

    /// The number of intervals each range is divided into when scanning.
    ///
    /// The default value is `800`.
    pub samples_per_range: usize,

    /// The maximum number of iterations of Brent's method per bracket.
    ///
    /// The default value is `120`.
    pub brent_max_iter: usize,

    /// The maximum number of iterations of Newton's method per seed.
    ///
    /// The default value is `40`.
    pub newton_max_iter: usize,

    /// The maximum number of times a Newton step is halved while searching for a step that
    /// reduces `|f|`.
    ///
    /// The default value is `12`.
    pub line_search_halvings: usize,

    /// The largest `|f|` at which a Newton result may still be accepted as a root.
    ///
    /// The default value is `1e-5`.
    pub accept_tolerance: f64,

    /// Roots closer than this are considered the same root.
    ///
    /// The default value is `1e-7`.
    pub dedup_tolerance: f64,
}

/// The default options for the root finder. Returns a [`SolveOptions`] with the following values:
///
/// - [`near_zero`](SolveOptions::near_zero): `1e-7`
/// - [`seed_threshold`](SolveOptions::seed_threshold): `5e-4`
/// - [`ranges`](SolveOptions::ranges): `[50.0, 200.0, 1000.0]`
/// - [`samples_per_range`](SolveOptions::samples_per_range): `800`
/// - [`brent_max_iter`](SolveOptions::brent_max_iter): `120`
/// - [`newton_max_iter`](SolveOptions::newton_max_iter): `40`
/// - [`line_search_halvings`](SolveOptions::line_search_halvings): `12`
/// - [`accept_tolerance`](SolveOptions::accept_tolerance): `1e-5`
/// - [`dedup_tolerance`](SolveOptions::dedup_tolerance): `1e-7`
impl Default for SolveOptions {
    fn default() -> SolveOptions {
        SolveOptions {
            near_zero: 1e-7,
            seed_threshold: 5e-4,
            ranges: vec![50.0, 200.0, 1000.0],
            samples_per_range: 800,
            brent_max_iter: 120,
            newton_max_iter: 40,
            line_search_halvings: 12,
            accept_tolerance: 1e-5,
            dedup_tolerance: 1e-7,
        }
    }
}

impl SolveOptions {
    /// Set the near-zero threshold. Returns an updated [`SolveOptions`] for chaining.
    pub fn near_zero(mut self, near_zero: f64) -> Self {
        self.near_zero = near_zero;
        self
    }

    /// Set the seed threshold. Returns an updated [`SolveOptions`] for chaining.
    pub fn seed_threshold(mut self, seed_threshold: f64) -> Self {
        self.seed_threshold = seed_threshold;
        self
    }

    /// Set the half-widths of the ranges to scan. Returns an updated [`SolveOptions`] for chaining.
    pub fn ranges(mut self, ranges: Vec<f64>) -> Self {
        self.ranges = ranges;
        self
    }

    /// Set the number of intervals per scanned range. Returns an updated [`SolveOptions`] for
    /// chaining.
    pub fn samples_per_range(mut self, samples_per_range: usize) -> Self {
        self.samples_per_range = samples_per_range;
        self
    }

    /// Set the iteration cap for Brent's method. Returns an updated [`SolveOptions`] for chaining.
    pub fn brent_max_iter(mut self, brent_max_iter: usize) -> Self {
        self.brent_max_iter = brent_max_iter;
        self
    }

    /// Set the iteration cap for Newton's method. Returns an updated [`SolveOptions`] for
    /// chaining.
    pub fn newton_max_iter(mut self, newton_max_iter: usize) -> Self {
        self.newton_max_iter = newton_max_iter;
        self
    }

    /// Set the number of line search halvings. Returns an updated [`SolveOptions`] for chaining.
    pub fn line_search_halvings(mut self, line_search_halvings: usize) -> Self {
        self.line_search_halvings = line_search_halvings;
        self
    }

    /// Set the acceptance tolerance for Newton results. Returns an updated [`SolveOptions`] for
    /// chaining.
    pub fn accept_tolerance(mut self, accept_tolerance: f64) -> Self {
        self.accept_tolerance = accept_tolerance;
        self
    }

    /// Set the deduplication tolerance. Returns an updated [`SolveOptions`] for chaining.
    pub fn dedup_tolerance(mut self, dedup_tolerance: f64) -> Self {
        self.dedup_tolerance = dedup_tolerance;
        self
    }
}

/// Finds the real roots of `func`.
///
/// `func` may return any value, including `NaN` and infinities, which are treated as "undefined
/// here". The result is deterministic for a given function and set of options.
pub fn find_roots(func: impl Fn(f64) -> f64, options: &SolveOptions) -> RootSet {
    let f = |x: f64| {
        let y = func(x);
        if y.is_finite() { y } else { f64::NAN }
    };

    let mut scan = Scan::default();
    for &half_width in &options.ranges {
        scan.extend(&f, half_width, options);
    }
    scan.dedup();

    let mut candidates = Vec::with_capacity(scan.brackets.len() + scan.seeds.len());
    for &bracket in &scan.brackets {
        match brent::brent(&f, bracket, options) {
            Some(root) => candidates.push(root),
            None => trace!("no root refined in [{}, {}]", bracket.left, bracket.right),
        }
    }
    for &seed in &scan.seeds {
        match newton::newton(&f, seed, options) {
            Some(root) => candidates.push(root),
            None => trace!("seed {} rejected", seed),
        }
    }

    let roots = RootSet::from_candidates(candidates, options.dedup_tolerance);
    debug!(
        "{} bracket(s) and {} seed(s) refined to {} root(s)",
        scan.brackets.len(), scan.seeds.len(), roots.len(),
    );
    roots
}

/// Finds the real roots of a compiled function with respect to `variable`.
///
/// Only `variable` is bound during evaluation. If the function reads any other free variable,
/// every evaluation is undefined and no roots are found.
pub fn solve_univariate(func: &Evaluator, variable: &str, options: &SolveOptions) -> RootSet {
    find_roots(|value| func.eval_var(variable, value), options)
}
