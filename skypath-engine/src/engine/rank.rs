//! Itinerary dominance filtering and preference ranking.
//!
//! `remove_dominated` applies the itinerary-level dominance relation
//! (earlier arrival, less air time, less layover, higher mean
//! reputation) over complete itineraries. `rank_itineraries` then
//! orders the surviving Pareto frontier by the user's weighted score;
//! it never discards anything, so the true Pareto set always reaches
//! the caller even if the scoring heuristic is imperfect.

use crate::domain::Itinerary;

use super::config::CriteriaWeights;

/// An itinerary with its ranking score. Lower scores rank earlier.
#[derive(Debug, Clone)]
pub struct RankedItinerary {
    /// The itinerary.
    pub itinerary: Itinerary,
    /// Weighted, normalized score; lower is better.
    pub score: f64,
}

/// Remove dominated itineraries.
///
/// An itinerary is dominated if another one arrives no later, spends no
/// more time in the air, no more time on the ground, and carries a
/// reputation mean at least as high, with at least one strict
/// improvement. Criterion-identical ties are all kept; deduplication is
/// the caller's concern.
pub fn remove_dominated(itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    if itineraries.len() <= 1 {
        return itineraries;
    }

    let mut result: Vec<Itinerary> = Vec::with_capacity(itineraries.len());

    for itinerary in itineraries {
        let dominated = result
            .iter()
            .any(|existing| dominates(existing, &itinerary));

        if !dominated {
            // Also evict anything the newcomer dominates
            result.retain(|existing| !dominates(&itinerary, existing));
            result.push(itinerary);
        }
    }

    result
}

fn dominates(a: &Itinerary, b: &Itinerary) -> bool {
    let no_worse = a.arrival_time() <= b.arrival_time()
        && a.total_air_time() <= b.total_air_time()
        && a.total_layover() <= b.total_layover()
        && a.reputation_aggregate() >= b.reputation_aggregate();

    let strictly_better = a.arrival_time() < b.arrival_time()
        || a.total_air_time() < b.total_air_time()
        || a.total_layover() < b.total_layover()
        || a.reputation_aggregate() > b.reputation_aggregate();

    no_worse && strictly_better
}

/// Rank a Pareto frontier by the user's criteria weights.
///
/// Each criterion is normalized over its range across the frontier so
/// the weights are commensurable, then combined as
/// `weight_time * time + weight_layover * layover - weight_reputation *
/// reputation` (reputation subtracted: higher is better, lower score
/// wins). Itineraries carrying at least one preferred-airline segment
/// receive a fixed score decrement. Sorting is stable, so
/// criterion-identical ties keep their input order.
pub fn rank_itineraries(
    itineraries: Vec<Itinerary>,
    weights: &CriteriaWeights,
) -> Vec<RankedItinerary> {
    if itineraries.is_empty() {
        return Vec::new();
    }

    let elapsed: Vec<f64> = itineraries
        .iter()
        .map(|i| i.total_elapsed().num_seconds() as f64)
        .collect();
    let layover: Vec<f64> = itineraries
        .iter()
        .map(|i| i.total_layover().num_seconds() as f64)
        .collect();
    let reputation: Vec<f64> = itineraries.iter().map(|i| i.reputation_aggregate()).collect();

    let norm_elapsed = Normalizer::over(&elapsed);
    let norm_layover = Normalizer::over(&layover);
    let norm_reputation = Normalizer::over(&reputation);

    let mut ranked: Vec<RankedItinerary> = itineraries
        .into_iter()
        .enumerate()
        .map(|(i, itinerary)| {
            let mut score = weights.weight_time * norm_elapsed.apply(elapsed[i])
                + weights.weight_layover * norm_layover.apply(layover[i])
                - weights.weight_reputation * norm_reputation.apply(reputation[i]);

            let preferred = itinerary
                .flights()
                .iter()
                .any(|f| weights.preferred_airlines.contains(&f.airline()));
            if preferred {
                score -= weights.preferred_boost;
            }

            RankedItinerary { itinerary, score }
        })
        .collect();

    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
    ranked
}

/// Maps a criterion's observed range across the frontier onto [0, 1].
struct Normalizer {
    min: f64,
    span: f64,
}

impl Normalizer {
    fn over(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            min,
            span: max - min,
        }
    }

    fn apply(&self, value: f64) -> f64 {
        if self.span <= 0.0 {
            // Degenerate range: the criterion can't differentiate
            0.0
        } else {
            (value - self.min) / self.span
        }
    }
}
