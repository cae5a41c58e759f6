//! Multi-criteria time-dependent route search.
//!
//! A multi-label Dijkstra-style expansion over the flight network.
//! Labels are popped in increasing order of arrival time, which is what
//! makes the search correct for time-dependent edges: a later-arriving
//! label can never beat an earlier one on the time axis, and flights
//! are only traversable forward in time. Each airport keeps a Pareto
//! frontier of non-dominated labels; dominated labels are discarded the
//! moment a dominator appears and are never expanded.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::domain::{AirportCode, CountryCode, Itinerary};
use crate::network::FlightNetwork;
use crate::visa::{UnknownVisaRule, VisaTable};

use super::config::{CriteriaWeights, InvalidConfiguration};
use super::label::{Frontier, Label};
use super::rank::remove_dominated;

/// Error from route search.
///
/// A search that finds nothing is *not* an error; it yields an empty
/// [`SearchOutcome`]. These errors mean the request itself was
/// unusable.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Origin or destination airport isn't in the network
    #[error("unknown airport {0}")]
    UnknownAirport(AirportCode),

    /// Origin and destination are the same airport
    #[error("origin and destination are the same airport")]
    SameAirport,

    /// Maximum segment count of zero can never produce an itinerary
    #[error("maximum segment count must be at least 1")]
    ZeroSegments,

    /// Malformed criteria weights
    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfiguration),
}

/// Request for a route search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Departure airport.
    pub origin: AirportCode,

    /// Arrival airport.
    pub destination: AirportCode,

    /// Earliest acceptable departure time (UTC).
    pub earliest_departure: DateTime<Utc>,

    /// Maximum number of flight segments per itinerary.
    pub max_segments: usize,

    /// Passport nationality, for admission checks.
    pub nationality: CountryCode,
}

/// Cooperative cancellation signal, checked at each label pop.
///
/// Cloning shares the signal: cancel any clone and the search observes
/// it. On cancellation the search returns the partial frontier built so
/// far, tagged as cancelled rather than failed.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// True once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Result of a route search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The Pareto frontier of complete itineraries. Empty when no
    /// feasible route exists under the constraints; that is a valid
    /// terminal state, not an error.
    pub itineraries: Vec<Itinerary>,

    /// Visa-table gaps encountered along candidate paths, deduplicated
    /// and sorted. Affected connections were treated as infeasible
    /// rather than guessed; callers can surface these as
    /// data-completeness warnings.
    pub warnings: Vec<UnknownVisaRule>,

    /// True if the search was cancelled and the frontier is partial.
    pub cancelled: bool,

    /// Number of labels expanded, for diagnostics.
    pub labels_expanded: usize,
}

/// The route search engine.
///
/// Borrows the network and visa table, both read-only, so any number of
/// searches can run concurrently over the same data. All mutable state
/// (queue, frontiers) is owned per invocation.
pub struct RouteSearch<'a> {
    network: &'a FlightNetwork,
    visa: &'a VisaTable,
}

impl<'a> RouteSearch<'a> {
    /// Create a search engine over a network and visa table.
    pub fn new(network: &'a FlightNetwork, visa: &'a VisaTable) -> Self {
        Self { network, visa }
    }

    /// Run a search and return the Pareto frontier of itineraries.
    ///
    /// The request and criteria are validated eagerly, before any
    /// traversal.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] for an unusable request (unknown
    /// airport, zero segment budget, malformed criteria). Zero results
    /// and cancellation are reported through [`SearchOutcome`].
    pub fn search(
        &self,
        request: &SearchRequest,
        weights: &CriteriaWeights,
        cancel: &CancelToken,
    ) -> Result<SearchOutcome, SearchError> {
        weights.validate()?;
        self.validate_request(request)?;

        let mut state = SearchState::new();
        state.push_origin_label(request);

        while let Some(Reverse((arrival, id))) = state.queue.pop() {
            if cancel.is_cancelled() {
                debug!(labels = state.labels_expanded, "search cancelled");
                state.cancelled = true;
                break;
            }

            // Superseded by a dominator after being queued
            if !state.frontier_contains(id) {
                continue;
            }

            let label = state.labels[id as usize].clone();
            state.labels_expanded += 1;
            trace!(
                airport = %label.airport,
                arrival = %arrival,
                segments = label.segments(),
                "expanding label"
            );

            // Complete itineraries are never extended past the destination
            if label.airport == request.destination && label.segments() > 0 {
                continue;
            }
            if label.segments() >= request.max_segments {
                continue;
            }

            self.expand(&label, request, weights, &mut state);
        }

        let itineraries = self.collect_itineraries(&state, request);
        let mut warnings: Vec<UnknownVisaRule> = state.visa_gaps.into_iter().collect();
        warnings.sort_by_key(|gap| (gap.nationality, gap.country));

        debug!(
            itineraries = itineraries.len(),
            warnings = warnings.len(),
            labels = state.labels_expanded,
            cancelled = state.cancelled,
            "search complete"
        );

        Ok(SearchOutcome {
            itineraries,
            warnings,
            cancelled: state.cancelled,
            labels_expanded: state.labels_expanded,
        })
    }

    fn validate_request(&self, request: &SearchRequest) -> Result<(), SearchError> {
        for airport in [request.origin, request.destination] {
            if !self.network.contains_airport(airport) {
                return Err(SearchError::UnknownAirport(airport));
            }
        }
        if request.origin == request.destination {
            return Err(SearchError::SameAirport);
        }
        if request.max_segments == 0 {
            return Err(SearchError::ZeroSegments);
        }
        Ok(())
    }

    /// Enumerate candidate flights out of a label and push the
    /// surviving extensions.
    fn expand(
        &self,
        label: &Label,
        request: &SearchRequest,
        weights: &CriteriaWeights,
        state: &mut SearchState,
    ) {
        // Min connection time applies between flights, not before the first
        let not_before = if label.segments() == 0 {
            label.arrival
        } else {
            label.arrival + self.network.min_connection().at(label.airport)
        };

        for flight in self.network.outbound_from(label.airport, not_before) {
            if weights.excluded_airlines.contains(&flight.airline()) {
                continue;
            }

            let reputation = self.network.reputation_of_flight(flight);
            if let Some(floor) = weights.min_airline_reputation {
                if reputation < floor {
                    continue;
                }
            }

            // Country admission for where this flight lands. The flight
            // endpoints are network-validated, so the country exists.
            let Some(entry_country) = self.network.country_of(flight.destination()) else {
                continue;
            };
            let is_final = flight.destination() == request.destination;
            match self.visa.classify(request.nationality, entry_country) {
                Ok(category) => {
                    let admissible = if is_final {
                        category.permits_final_entry()
                    } else {
                        category.permits_transit(weights.allow_visa_required_transit)
                    };
                    if !admissible {
                        continue;
                    }
                }
                Err(gap) => {
                    // Never guess feasibility: skip and report the gap
                    state.visa_gaps.insert(gap);
                    continue;
                }
            }

            let air_time = label.air_time + flight.duration();
            let layover = if label.segments() == 0 {
                Duration::zero()
            } else {
                label.layover + (flight.departure() - label.arrival)
            };

            if let Some(cap) = weights.max_travel_time {
                if air_time > cap {
                    continue;
                }
            }
            if let Some(cap) = weights.max_layover_time {
                if layover > cap {
                    continue;
                }
            }

            let mut flights = label.flights.clone();
            flights.push(flight.clone());

            let candidate = Label {
                id: state.labels.len() as u64,
                airport: flight.destination(),
                arrival: flight.arrival(),
                air_time,
                layover,
                reputation_sum: label.reputation_sum + reputation.value(),
                flights,
            };

            state.push_if_non_dominated(candidate);
        }
    }

    /// Turn the destination frontier into itineraries and apply the
    /// final mean-reputation dominance filter.
    fn collect_itineraries(&self, state: &SearchState, request: &SearchRequest) -> Vec<Itinerary> {
        let Some(frontier) = state.frontiers.get(&request.destination) else {
            return Vec::new();
        };

        let mut itineraries = Vec::with_capacity(frontier.len());
        for id in frontier.ids() {
            let label = &state.labels[id as usize];
            if label.flights.is_empty() {
                continue;
            }
            // The search honours connectivity and min connection times,
            // so assembly only fails on internal inconsistency
            if let Ok(itinerary) = self.network.itinerary(label.flights.clone()) {
                itineraries.push(itinerary);
            }
        }

        remove_dominated(itineraries)
    }
}

/// Per-invocation mutable state: the priority queue, the per-airport
/// frontiers and the label arena. Nothing here is shared between
/// invocations.
struct SearchState {
    labels: Vec<Label>,
    frontiers: HashMap<AirportCode, Frontier>,
    queue: BinaryHeap<Reverse<(DateTime<Utc>, u64)>>,
    visa_gaps: HashSet<UnknownVisaRule>,
    labels_expanded: usize,
    cancelled: bool,
}

impl SearchState {
    fn new() -> Self {
        Self {
            labels: Vec::new(),
            frontiers: HashMap::new(),
            queue: BinaryHeap::new(),
            visa_gaps: HashSet::new(),
            labels_expanded: 0,
            cancelled: false,
        }
    }

    /// Seed the search with the empty path waiting at the origin.
    fn push_origin_label(&mut self, request: &SearchRequest) {
        let origin = Label {
            id: 0,
            airport: request.origin,
            arrival: request.earliest_departure,
            air_time: Duration::zero(),
            layover: Duration::zero(),
            reputation_sum: 0.0,
            flights: Vec::new(),
        };
        self.push_if_non_dominated(origin);
    }

    fn frontier_contains(&self, id: u64) -> bool {
        let airport = self.labels[id as usize].airport;
        self.frontiers
            .get(&airport)
            .is_some_and(|frontier| frontier.contains(id))
    }

    /// Insert a label into its airport's frontier; if it survives
    /// dominance, store it and queue it for expansion.
    fn push_if_non_dominated(&mut self, label: Label) {
        let frontier = self.frontiers.entry(label.airport).or_insert_with(Frontier::new);
        if !frontier.try_insert(label.id, label.criteria()) {
            return;
        }
        self.queue.push(Reverse((label.arrival, label.id)));
        self.labels.push(label);
    }
}
