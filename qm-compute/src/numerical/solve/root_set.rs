#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of real roots, sorted in ascending order, in which no two roots are within the
/// deduplication tolerance of each other.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RootSet(Vec<f64>);

impl RootSet {
    /// Builds a root set from unordered candidate roots.
    ///
    /// Non-finite candidates are dropped. The remaining candidates are sorted, and each run of
    /// candidates within `tolerance` of the previously kept root collapses into that root.
    pub fn from_candidates(mut candidates: Vec<f64>, tolerance: f64) -> Self {
        candidates.retain(|x| x.is_finite());
        candidates.sort_by(|a, b| a.total_cmp(b));

        let mut roots: Vec<f64> = Vec::with_capacity(candidates.len());
        for x in candidates {
            match roots.last() {
                Some(prev) if (x - prev).abs() <= tolerance => (),
                _ => roots.push(x),
            }
        }

        Self(roots)
    }

    /// Returns the number of roots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no roots were found.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the roots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Returns the roots as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consumes the set, returning the roots.
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}
