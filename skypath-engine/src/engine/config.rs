//! Search criteria configuration.

use std::collections::HashSet;

use chrono::Duration;

use crate::domain::{AirlineCode, Reputation};

/// Error from criteria validation.
///
/// Raised eagerly, before any graph traversal begins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid search criteria: {reason}")]
pub struct InvalidConfiguration {
    reason: &'static str,
}

impl InvalidConfiguration {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// User-supplied weighting and filtering of search criteria.
///
/// Hard constraints (`max_*` caps, `excluded_airlines`,
/// `min_airline_reputation`) prune candidates during the search; the
/// weights and `preferred_airlines` only affect the final ranking and
/// never remove itineraries from the Pareto set.
///
/// Passed through unmodified from the caller; validated once at search
/// entry via [`validate`](Self::validate).
#[derive(Debug, Clone)]
pub struct CriteriaWeights {
    /// Cap on accumulated in-air travel time, if any.
    pub max_travel_time: Option<Duration>,

    /// Cap on accumulated layover time, if any.
    pub max_layover_time: Option<Duration>,

    /// Hard floor on every segment's airline reputation, if any.
    pub min_airline_reputation: Option<Reputation>,

    /// Airlines to softly prefer in ranking (fixed score decrement).
    pub preferred_airlines: HashSet<AirlineCode>,

    /// Airlines whose flights are excluded outright.
    pub excluded_airlines: HashSet<AirlineCode>,

    /// Weight of travel time in the ranking score.
    pub weight_time: f64,

    /// Weight of layover time in the ranking score.
    pub weight_layover: f64,

    /// Weight of airline reputation in the ranking score.
    pub weight_reputation: f64,

    /// Whether transit through a visa-required country is allowed.
    /// Conservative default: disallowed.
    pub allow_visa_required_transit: bool,

    /// Fixed score decrement applied to itineraries carrying at least
    /// one preferred-airline segment.
    pub preferred_boost: f64,
}

impl CriteriaWeights {
    /// Validate the criteria.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any weight is negative or non-finite, all
    /// weights are zero, a cap is negative, or the preferred boost is
    /// negative or non-finite.
    pub fn validate(&self) -> Result<(), InvalidConfiguration> {
        for weight in [self.weight_time, self.weight_layover, self.weight_reputation] {
            if !weight.is_finite() {
                return Err(InvalidConfiguration::new("weights must be finite"));
            }
            if weight < 0.0 {
                return Err(InvalidConfiguration::new("weights must be non-negative"));
            }
        }
        if self.weight_time + self.weight_layover + self.weight_reputation == 0.0 {
            return Err(InvalidConfiguration::new(
                "at least one weight must be positive",
            ));
        }
        if let Some(cap) = self.max_travel_time {
            if cap < Duration::zero() {
                return Err(InvalidConfiguration::new(
                    "max travel time must not be negative",
                ));
            }
        }
        if let Some(cap) = self.max_layover_time {
            if cap < Duration::zero() {
                return Err(InvalidConfiguration::new(
                    "max layover time must not be negative",
                ));
            }
        }
        if !self.preferred_boost.is_finite() || self.preferred_boost < 0.0 {
            return Err(InvalidConfiguration::new(
                "preferred boost must be non-negative and finite",
            ));
        }
        Ok(())
    }
}

impl Default for CriteriaWeights {
    /// Equal weights, no caps, no airline filters, visa-required
    /// transit disallowed.
    fn default() -> Self {
        Self {
            max_travel_time: None,
            max_layover_time: None,
            min_airline_reputation: None,
            preferred_airlines: HashSet::new(),
            excluded_airlines: HashSet::new(),
            weight_time: 1.0,
            weight_layover: 1.0,
            weight_reputation: 1.0,
            allow_visa_required_transit: false,
            preferred_boost: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(CriteriaWeights::default().validate().is_ok());
    }

    #[test]
    fn reject_negative_weight() {
        let weights = CriteriaWeights {
            weight_layover: -0.5,
            ..CriteriaWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn reject_non_finite_weight() {
        let weights = CriteriaWeights {
            weight_time: f64::NAN,
            ..CriteriaWeights::default()
        };
        assert!(weights.validate().is_err());

        let weights = CriteriaWeights {
            weight_reputation: f64::INFINITY,
            ..CriteriaWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn reject_all_zero_weights() {
        let weights = CriteriaWeights {
            weight_time: 0.0,
            weight_layover: 0.0,
            weight_reputation: 0.0,
            ..CriteriaWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn zero_weights_allowed_when_one_positive() {
        let weights = CriteriaWeights {
            weight_time: 1.0,
            weight_layover: 0.0,
            weight_reputation: 0.0,
            ..CriteriaWeights::default()
        };
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn reject_negative_caps() {
        let weights = CriteriaWeights {
            max_travel_time: Some(Duration::minutes(-1)),
            ..CriteriaWeights::default()
        };
        assert!(weights.validate().is_err());

        let weights = CriteriaWeights {
            max_layover_time: Some(Duration::minutes(-1)),
            ..CriteriaWeights::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn reject_negative_boost() {
        let weights = CriteriaWeights {
            preferred_boost: -0.1,
            ..CriteriaWeights::default()
        };
        assert!(weights.validate().is_err());
    }
}
