//! Search labels and per-airport Pareto frontiers.
//!
//! A label is a partial-path state: where the traveler is, when they
//! got there, and the criteria accumulated along the way. No single
//! scalar objective exists, so each airport keeps a small set of
//! non-dominated labels instead of one best-known distance.
//!
//! In-search dominance is a refinement of the itinerary-level relation
//! that stays sound under extension, i.e. no extension of a pruned
//! label can ever beat the matching extension of its dominator:
//!
//! - reputation is compared as *sum over no more segments* rather than
//!   as the per-segment mean, which keeps the mean ordering when both
//!   labels board the same onward flight;
//! - layover is compared shifted by arrival (`layover - arrival`),
//!   because boarding the same onward flight charges the earlier
//!   arriver more waiting time; the shifted quantity is what both
//!   labels' layovers become relative to any common departure.
//!
//! Together with `arrival <=` these imply plain `layover <=` as well.
//! The mean-based dominance over finished itineraries is applied once
//! at the end, where no extension remains (see
//! `rank::remove_dominated`).

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{AirportCode, Flight};

/// The criteria vector tracked per label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Criteria {
    /// Arrival time at the label's airport.
    pub arrival: DateTime<Utc>,
    /// Accumulated in-air travel time.
    pub air_time: Duration,
    /// Accumulated layover time.
    pub layover: Duration,
    /// Sum of per-segment reputation scores.
    pub reputation_sum: f64,
    /// Number of flight segments taken.
    pub segments: u32,
}

impl Criteria {
    /// True if `self` dominates `other`: at least as good on every axis
    /// and strictly better on at least one.
    ///
    /// The layover axis is compared shifted by arrival: waiting for any
    /// common onward departure adds `departure - arrival` to each
    /// label's layover, so `layover - arrival` is what stays ordered.
    /// The comparison is written as a cross-sum to stay in
    /// `DateTime + Duration` arithmetic.
    pub fn dominates(&self, other: &Criteria) -> bool {
        let self_shifted = other.arrival + self.layover;
        let other_shifted = self.arrival + other.layover;

        let no_worse = self.arrival <= other.arrival
            && self.air_time <= other.air_time
            && self_shifted <= other_shifted
            && self.reputation_sum >= other.reputation_sum
            && self.segments <= other.segments;

        let strictly_better = self.arrival < other.arrival
            || self.air_time < other.air_time
            || self_shifted < other_shifted
            || self.reputation_sum > other.reputation_sum
            || self.segments < other.segments;

        no_worse && strictly_better
    }
}

/// A partial path attached to an airport during the search.
#[derive(Debug, Clone)]
pub(crate) struct Label {
    /// Unique id, used to detect labels evicted from their frontier
    /// while still queued.
    pub id: u64,
    /// Airport this label sits at.
    pub airport: AirportCode,
    /// Arrival time at `airport` (for the origin label: the earliest
    /// departure time).
    pub arrival: DateTime<Utc>,
    /// Sum of flight durations so far.
    pub air_time: Duration,
    /// Sum of ground gaps between consecutive flights so far.
    pub layover: Duration,
    /// Sum of per-segment reputation scores so far.
    pub reputation_sum: f64,
    /// Flights taken so far, in order. Empty for the origin label.
    pub flights: Vec<Arc<Flight>>,
}

impl Label {
    /// Number of flight segments taken.
    pub fn segments(&self) -> usize {
        self.flights.len()
    }

    /// The label's criteria vector.
    pub fn criteria(&self) -> Criteria {
        Criteria {
            arrival: self.arrival,
            air_time: self.air_time,
            layover: self.layover,
            reputation_sum: self.reputation_sum,
            segments: self.flights.len() as u32,
        }
    }
}

/// The non-dominated labels known at one airport.
///
/// Small by construction: inserting evicts everything the newcomer
/// dominates, and dominated newcomers are rejected outright.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    entries: Vec<(u64, Criteria)>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to insert a label's criteria.
    ///
    /// Returns `false` (and leaves the frontier unchanged) if an
    /// existing entry dominates the candidate. Otherwise removes every
    /// entry the candidate dominates, inserts it, and returns `true`.
    /// Criterion-identical ties are kept side by side.
    pub fn try_insert(&mut self, id: u64, criteria: Criteria) -> bool {
        if self
            .entries
            .iter()
            .any(|(_, existing)| existing.dominates(&criteria))
        {
            return false;
        }
        self.entries
            .retain(|(_, existing)| !criteria.dominates(existing));
        self.entries.push((id, criteria));
        true
    }

    /// True if the label with this id is still on the frontier.
    pub fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Ids of all labels currently on the frontier.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// Number of labels on the frontier.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
