use thiserror::Error;

/// The ways a single evaluation of a compiled function can fail.
///
/// These errors never escape a sampling or solving loop: the
/// [`Evaluator`](super::func::Evaluator) turns each of them into `NaN` at the point of failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvalError {
    /// The function reads a variable that is not bound in the context.
    #[error("`{0}` is not defined")]
    UndefinedVariable(String),

    /// The input is outside the domain of the function (for example, `ln(-1)` over the reals).
    #[error("domain error: {0}")]
    Domain(String),

    /// The function produced `NaN` or an infinity.
    #[error("result is not a finite number")]
    NonFinite,
}
