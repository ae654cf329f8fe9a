use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A viewport with bounds that cannot be sampled.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum ViewportError {
    /// The x-range is non-finite or not increasing.
    #[error("invalid x-range [{min}, {max}]")]
    InvalidXRange { min: f64, max: f64 },

    /// The y-range is non-finite or not increasing.
    #[error("invalid y-range [{min}, {max}]")]
    InvalidYRange { min: f64, max: f64 },
}

/// The reasons a plot cannot be produced.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlotError {
    /// The viewport was rejected before sampling.
    #[error(transparent)]
    InvalidViewport(#[from] ViewportError),

    /// Not a single finite value was found anywhere in the viewport.
    #[error("No finite values in the current view.")]
    DomainEmpty,

    /// The function reads variables that this kind of plot cannot bind.
    #[error("cannot plot{}: unsupported variable(s) {}", label_suffix(.label), .variables.join(", "))]
    UnsupportedVariables {
        label: Option<String>,
        variables: Vec<String>,
    },
}

/// The failure of a single series in a multi-line plot.
///
/// A failed series does not fail the plot; the other series are still drawn.
#[derive(Debug, Clone, Error, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeriesError {
    /// The series reads variables other than `x`.
    #[error("cannot plot `{label}`: unsupported variable(s) {}", .variables.join(", "))]
    UnsupportedVariables {
        label: String,
        variables: Vec<String>,
    },
}

fn label_suffix(label: &Option<String>) -> String {
    label.as_ref()
        .map(|label| format!(" `{}`", label))
        .unwrap_or_default()
}

impl From<SeriesError> for PlotError {
    fn from(err: SeriesError) -> Self {
        match err {
            SeriesError::UnsupportedVariables { label, variables } => {
                PlotError::UnsupportedVariables { label: Some(label), variables }
            },
        }
    }
}
