//! The evaluation adapter between compiled functions and the numeric algorithms.
//!
//! Everything downstream of this module (samplers, the root finder, probes) works with plain
//! `f64` values in which `NaN` is the single marker for "no value here". An [`Evaluator`] is the
//! only place where the richer failure modes of a compiled function ([`EvalError`], infinities,
//! `NaN` results) are collapsed into that marker, one evaluation at a time.

use std::{fmt, sync::Arc};
use super::{ctxt::Ctxt, error::EvalError};

/// A compiled, real-valued function that reads its free variables from a [`Ctxt`].
///
/// Implementations must be pure: evaluating the same context twice gives the same result, and
/// evaluation has no side effects. They may be arbitrarily expensive.
pub trait Func: Send + Sync {
    /// Evaluates the function with the variables bound in `ctxt`.
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError>;

    /// Returns the names of the free variables the function reads.
    fn free_vars(&self) -> Vec<String>;
}

/// Adapts a closure reading a [`Ctxt`] into a [`Func`] with a declared set of free variables.
pub struct FnCtxt<F> {
    /// The declared free variables.
    vars: Vec<String>,

    /// The closure to evaluate.
    f: F,
}

impl<F> FnCtxt<F>
where
    F: Fn(&Ctxt) -> Result<f64, EvalError> + Send + Sync,
{
    /// Wraps the closure, declaring the variables it reads.
    pub fn new<S: Into<String>>(vars: impl IntoIterator<Item = S>, f: F) -> Self {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
            f,
        }
    }
}

impl<F> Func for FnCtxt<F>
where
    F: Fn(&Ctxt) -> Result<f64, EvalError> + Send + Sync,
{
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError> {
        (self.f)(ctxt)
    }

    fn free_vars(&self) -> Vec<String> {
        self.vars.clone()
    }
}

/// `lhs - rhs`, used to turn an equation `lhs = rhs` into a function whose zeros are its
/// solutions.
struct Difference {
    lhs: Evaluator,
    rhs: Evaluator,
}

impl Func for Difference {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError> {
        let value = self.lhs.eval(ctxt) - self.rhs.eval(ctxt);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }

    fn free_vars(&self) -> Vec<String> {
        let mut vars = self.lhs.free_vars().to_vec();
        for var in self.rhs.free_vars() {
            if !vars.contains(var) {
                vars.push(var.clone());
            }
        }
        vars
    }
}

/// How an [`Evaluator`] calls the function it wraps.
///
/// This is decided once, when the evaluator is built, rather than by trying one calling
/// convention and falling back to another on every sample.
#[derive(Clone)]
enum Convention {
    /// A closure of one named variable.
    Univariate {
        var: String,
        f: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
    },

    /// A closure of `x` and `y`, in that order.
    Bivariate(Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>),

    /// A [`Func`] that reads its variables from a context.
    Named(Arc<dyn Func>),
}

/// Maps failures and non-finite results to `NaN`.
fn finite_or_nan(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::NAN
    }
}

/// A cheaply clonable handle to a compiled function that never fails.
///
/// Every evaluation method returns a finite `f64` or exactly `NaN`. A failure is absorbed at the
/// single evaluation where it happens, so one bad sample never aborts the batch around it.
#[derive(Clone)]
pub struct Evaluator {
    /// The calling convention chosen at construction.
    convention: Convention,

    /// The free variables of the function.
    free_vars: Vec<String>,
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let convention = match &self.convention {
            Convention::Univariate { .. } => "univariate",
            Convention::Bivariate(_) => "bivariate",
            Convention::Named(_) => "named",
        };
        f.debug_struct("Evaluator")
            .field("convention", &convention)
            .field("free_vars", &self.free_vars)
            .finish()
    }
}

impl Evaluator {
    /// Wraps a [`Func`] that reads its variables from a context.
    pub fn new(func: impl Func + 'static) -> Self {
        let free_vars = func.free_vars();
        Self {
            convention: Convention::Named(Arc::new(func)),
            free_vars,
        }
    }

    /// Wraps a closure of the single variable `var`.
    pub fn univariate(var: &str, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            convention: Convention::Univariate {
                var: var.to_string(),
                f: Arc::new(f),
            },
            free_vars: vec![var.to_string()],
        }
    }

    /// Wraps a closure of `x` and `y`.
    pub fn bivariate(f: impl Fn(f64, f64) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            convention: Convention::Bivariate(Arc::new(f)),
            free_vars: vec!["x".to_string(), "y".to_string()],
        }
    }

    /// Builds `lhs - rhs`. The free variables are the union of both sides.
    pub fn difference(lhs: Evaluator, rhs: Evaluator) -> Self {
        Self::new(Difference { lhs, rhs })
    }

    /// Returns the free variables of the function.
    pub fn free_vars(&self) -> &[String] {
        &self.free_vars
    }

    /// Returns the free variables that are not in `allowed`.
    pub fn unsupported_vars(&self, allowed: &[&str]) -> Vec<String> {
        self.free_vars.iter()
            .filter(|var| !allowed.contains(&var.as_str()))
            .cloned()
            .collect()
    }

    /// Evaluates the function with the variables bound in `ctxt`.
    pub fn eval(&self, ctxt: &Ctxt) -> f64 {
        match &self.convention {
            Convention::Univariate { var, f } => ctxt.get_var(var)
                .map(|value| finite_or_nan(f(value)))
                .unwrap_or(f64::NAN),
            Convention::Bivariate(f) => match (ctxt.get_var("x"), ctxt.get_var("y")) {
                (Some(x), Some(y)) => finite_or_nan(f(x, y)),
                _ => f64::NAN,
            },
            Convention::Named(func) => func.eval(ctxt)
                .map(finite_or_nan)
                .unwrap_or(f64::NAN),
        }
    }

    /// Evaluates the function with only `name` bound to `value`.
    pub fn eval_var(&self, name: &str, value: f64) -> f64 {
        match &self.convention {
            Convention::Univariate { var, f } if var == name => finite_or_nan(f(value)),
            Convention::Univariate { .. } | Convention::Bivariate(_) => f64::NAN,
            Convention::Named(_) => self.eval(&Ctxt::with_var(name, value)),
        }
    }

    /// Evaluates the function at `x`.
    pub fn eval_x(&self, x: f64) -> f64 {
        self.eval_var("x", x)
    }

    /// Evaluates the function at `(x, y)`.
    pub fn eval_xy(&self, x: f64, y: f64) -> f64 {
        match &self.convention {
            Convention::Bivariate(f) => finite_or_nan(f(x, y)),
            Convention::Univariate { var, f } => match var.as_str() {
                "x" => finite_or_nan(f(x)),
                "y" => finite_or_nan(f(y)),
                _ => f64::NAN,
            },
            Convention::Named(_) => {
                let mut ctxt = Ctxt::with_var("x", x);
                ctxt.add_var("y", y);
                self.eval(&ctxt)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn failures_become_nan() {
        let log = Evaluator::univariate("x", f64::ln);
        assert!(log.eval_x(-1.0).is_nan());
        assert_eq!(log.eval_x(1.0), 0.0);

        let recip = Evaluator::univariate("x", |x| 1.0 / x);
        assert!(recip.eval_x(0.0).is_nan());
    }

    #[test]
    fn named_errors_become_nan() {
        let func = FnCtxt::new(["x"], |ctxt: &Ctxt| {
            let x = ctxt.get_var("x").ok_or_else(|| EvalError::UndefinedVariable("x".into()))?;
            if x < 0.0 {
                Err(EvalError::Domain("sqrt of a negative number".into()))
            } else {
                Ok(x.sqrt())
            }
        });
        let eval = Evaluator::new(func);

        assert_eq!(eval.eval_x(4.0), 2.0);
        assert!(eval.eval_x(-4.0).is_nan());
        assert!(eval.eval_var("t", 4.0).is_nan());
    }

    #[test]
    fn unbound_variable() {
        let eval = Evaluator::univariate("t", |t| t * 2.0);
        assert!(eval.eval_x(1.0).is_nan());
        assert_eq!(eval.eval_var("t", 1.0), 2.0);
        assert_eq!(eval.unsupported_vars(&["x"]), vec!["t".to_string()]);
    }

    #[test]
    fn bivariate_calls() {
        let eval = Evaluator::bivariate(|x, y| x * 10.0 + y);
        assert_eq!(eval.eval_xy(1.0, 2.0), 12.0);

        let mut ctxt = Ctxt::with_var("y", 2.0);
        ctxt.add_var("x", 1.0);
        assert_eq!(eval.eval(&ctxt), 12.0);
        assert!(eval.eval_x(1.0).is_nan());
    }

    #[test]
    fn difference_of_sides() {
        let lhs = Evaluator::bivariate(|x, y| x * x + y * y);
        let rhs = Evaluator::univariate("x", |_| 1.0);
        let diff = Evaluator::difference(lhs, rhs);

        assert_eq!(diff.free_vars(), &["x".to_string(), "y".to_string()]);
        assert_eq!(diff.eval_xy(1.0, 0.0), 0.0);
        assert_eq!(diff.eval_xy(2.0, 0.0), 3.0);
    }
}
