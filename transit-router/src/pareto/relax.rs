//! Relax function for near-optimal cost dominance.
//!
//! Widens the acceptance bound of the generalized-cost criterion so the
//! Pareto set keeps "almost as cheap" alternatives instead of strict
//! optima only: a candidate survives against a reference cost `r` as
//! long as its own cost is at most `ratio * r + slack`.

use std::fmt;

use crate::domain::{Cost, DomainError};

/// Maps a reference cost to an upper acceptance bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxFunction {
    ratio: f64,
    slack: Cost,
}

impl RelaxFunction {
    /// Construct a relax function.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ratio < 1.0` (the bound would tighten rather
    /// than widen) or `slack < 0`.
    pub fn new(ratio: f64, slack: Cost) -> Result<Self, DomainError> {
        if !(1.0..=4.0).contains(&ratio) {
            return Err(DomainError::InvalidRelax("ratio must be in 1.0..=4.0"));
        }
        if slack < 0 {
            return Err(DomainError::InvalidRelax("slack must be non-negative"));
        }
        Ok(Self { ratio, slack })
    }

    /// The widened upper bound for a reference cost.
    pub fn relax(&self, cost: Cost) -> Cost {
        (self.ratio * cost as f64).floor() as Cost + self.slack
    }
}

impl fmt::Display for RelaxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} * cost + {}", self.ratio, self.slack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widens_the_bound() {
        let relax = RelaxFunction::new(1.25, 300).unwrap();
        assert_eq!(relax.relax(1_000), 1_550);
        assert_eq!(relax.relax(0), 300);
    }

    #[test]
    fn identity_when_ratio_one_no_slack() {
        let relax = RelaxFunction::new(1.0, 0).unwrap();
        assert_eq!(relax.relax(1_234), 1_234);
    }

    #[test]
    fn rejects_tightening_parameters() {
        assert!(RelaxFunction::new(0.9, 0).is_err());
        assert!(RelaxFunction::new(5.0, 0).is_err());
        assert!(RelaxFunction::new(1.1, -1).is_err());
    }

    #[test]
    fn display() {
        let relax = RelaxFunction::new(1.25, 300).unwrap();
        assert_eq!(relax.to_string(), "1.25 * cost + 300");
    }
}
