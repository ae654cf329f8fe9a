//! Numerical evaluation of compiled functions.

pub mod ctxt;
pub mod error;
pub mod fmt;
pub mod func;
pub mod solve;

pub use ctxt::Ctxt;
pub use error::EvalError;
pub use func::{Evaluator, Func};
pub use solve::{find_roots, solve_univariate, RootSet, SolveOptions};
