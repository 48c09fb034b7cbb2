use std::fmt;

use serde::{Deserialize, Serialize};

/// The verdict of one comparison.
///
/// Ordering: `Identical < Differ < Error`. Results of sibling comparisons are
/// combined with [`Outcome::combine`], so any error dominates any difference,
/// which dominates identical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Identical,
    Differ,
    Error,
}

impl Outcome {
    /// Pairwise maximum of two outcomes.
    pub fn combine(self, other: Outcome) -> Outcome {
        self.max(other)
    }

    /// `Differ` when `equal` is false, `Identical` otherwise.
    pub fn from_equal(equal: bool) -> Outcome {
        if equal {
            Outcome::Identical
        } else {
            Outcome::Differ
        }
    }

    /// Process exit code for an aggregated outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Identical => 0,
            Outcome::Differ => 1,
            Outcome::Error => 2,
        }
    }
}

impl FromIterator<Outcome> for Outcome {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        iter.into_iter().fold(Outcome::Identical, Outcome::combine)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Identical => write!(f, "identical"),
            Outcome::Differ => write!(f, "differ"),
            Outcome::Error => write!(f, "error"),
        }
    }
}
