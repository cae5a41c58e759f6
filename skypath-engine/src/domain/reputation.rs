//! Airline reputation scores.

use std::fmt;

/// Error returned for an out-of-range reputation score.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid reputation score {value}: must be within 0.0 to 5.0")]
pub struct InvalidReputation {
    /// The offending value.
    pub value: f64,
}

/// A validated airline reputation score in `[0.0, 5.0]`.
///
/// Guaranteed finite and in-range by construction, so scores can be
/// compared and averaged without NaN handling downstream.
///
/// # Examples
///
/// ```
/// use skypath_engine::domain::Reputation;
///
/// let good = Reputation::new(4.2).unwrap();
/// let poor = Reputation::new(1.5).unwrap();
/// assert!(good > poor);
///
/// assert!(Reputation::new(-0.1).is_err());
/// assert!(Reputation::new(5.1).is_err());
/// assert!(Reputation::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reputation(f64);

impl Reputation {
    /// Create a reputation score, rejecting values outside `[0.0, 5.0]`
    /// and non-finite values.
    pub fn new(value: f64) -> Result<Self, InvalidReputation> {
        if !value.is_finite() || !(0.0..=5.0).contains(&value) {
            return Err(InvalidReputation { value });
        }
        Ok(Reputation(value))
    }

    /// Returns the raw score.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Eq for Reputation {}

impl PartialOrd for Reputation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Reputation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Values are always finite, so total_cmp agrees with the usual order
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Reputation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any finite value in range is accepted and round-trips
        #[test]
        fn in_range_accepted(v in 0.0f64..=5.0) {
            let rep = Reputation::new(v).unwrap();
            prop_assert_eq!(rep.value(), v);
        }

        /// Values above the range are rejected
        #[test]
        fn above_range_rejected(v in 5.0000001f64..1e12) {
            prop_assert!(Reputation::new(v).is_err());
        }

        /// Values below the range are rejected
        #[test]
        fn below_range_rejected(v in -1e12f64..-0.0000001) {
            prop_assert!(Reputation::new(v).is_err());
        }
    }
}
