//! Flight network model.
//!
//! An in-memory directed multigraph: airports are nodes, scheduled
//! flights are time-stamped edges. Flights are kept in flat per-origin
//! vectors sorted by departure time and reference airports by code, so
//! the graph has no ownership cycles. The network is built once,
//! validated wholesale, and read-only afterwards; it can be shared
//! across concurrent searches without locking.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{
    Airport, AirportCode, AirlineCode, CountryCode, DomainError, Flight, FlightId, Itinerary,
    MinConnectionTimes, Reputation,
};

/// Error from flight network construction.
///
/// Construction is all-or-nothing: any defect aborts the build and no
/// partial network is produced.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidGraphError {
    /// Two airports share a code
    #[error("duplicate airport code {0}")]
    DuplicateAirport(AirportCode),

    /// Two flights share an identifier
    #[error("duplicate flight id {0}")]
    DuplicateFlight(FlightId),

    /// A flight references an airport that isn't in the network
    #[error("flight {flight} references unknown airport {airport}")]
    UnknownAirport {
        flight: FlightId,
        airport: AirportCode,
    },

    /// A flight's airline has no reputation entry
    #[error("flight {flight} is operated by {airline}, which has no reputation entry")]
    MissingReputation {
        flight: FlightId,
        airline: AirlineCode,
    },
}

/// The flight network: airports, flights, airline reputations and
/// minimum connection times, assembled once per session.
#[derive(Debug, Clone)]
pub struct FlightNetwork {
    airports: HashMap<AirportCode, Airport>,
    /// Outbound flights per origin, ascending by departure time.
    outbound: HashMap<AirportCode, Vec<Arc<Flight>>>,
    reputations: HashMap<AirlineCode, Reputation>,
    min_connection: MinConnectionTimes,
    flight_count: usize,
}

impl FlightNetwork {
    /// Build a network from validated airports and flights.
    ///
    /// Every flight's endpoints must reference a supplied airport and
    /// every flight's airline must have a reputation entry; duplicates
    /// of either airport codes or flight ids are rejected. (Flight-level
    /// invariants such as positive duration are already enforced by
    /// [`Flight::new`].)
    ///
    /// # Errors
    ///
    /// Returns `InvalidGraphError` on the first defect found. Nothing
    /// is recoverable: callers rebuild wholesale when data changes.
    pub fn build(
        airports: Vec<Airport>,
        flights: Vec<Flight>,
        reputations: HashMap<AirlineCode, Reputation>,
        min_connection: MinConnectionTimes,
    ) -> Result<Self, InvalidGraphError> {
        let mut airport_map = HashMap::with_capacity(airports.len());
        for airport in airports {
            let code = airport.code;
            if airport_map.insert(code, airport).is_some() {
                return Err(InvalidGraphError::DuplicateAirport(code));
            }
        }

        let flight_count = flights.len();
        let mut seen_ids: HashSet<FlightId> = HashSet::with_capacity(flight_count);
        let mut outbound: HashMap<AirportCode, Vec<Arc<Flight>>> = HashMap::new();

        for flight in flights {
            for endpoint in [flight.origin(), flight.destination()] {
                if !airport_map.contains_key(&endpoint) {
                    return Err(InvalidGraphError::UnknownAirport {
                        flight: flight.id().clone(),
                        airport: endpoint,
                    });
                }
            }
            if !reputations.contains_key(&flight.airline()) {
                return Err(InvalidGraphError::MissingReputation {
                    flight: flight.id().clone(),
                    airline: flight.airline(),
                });
            }
            if !seen_ids.insert(flight.id().clone()) {
                return Err(InvalidGraphError::DuplicateFlight(flight.id().clone()));
            }

            outbound
                .entry(flight.origin())
                .or_default()
                .push(Arc::new(flight));
        }

        for flights in outbound.values_mut() {
            flights.sort_by(|a, b| {
                a.departure()
                    .cmp(&b.departure())
                    .then_with(|| a.id().cmp(b.id()))
            });
        }

        debug!(
            airports = airport_map.len(),
            flights = flight_count,
            "flight network built"
        );

        Ok(FlightNetwork {
            airports: airport_map,
            outbound,
            reputations,
            min_connection,
            flight_count,
        })
    }

    /// Returns the airport for a code, if present.
    pub fn airport(&self, code: AirportCode) -> Option<&Airport> {
        self.airports.get(&code)
    }

    /// True if the airport exists in the network.
    pub fn contains_airport(&self, code: AirportCode) -> bool {
        self.airports.contains_key(&code)
    }

    /// Returns the country an airport sits in, if the airport exists.
    pub fn country_of(&self, code: AirportCode) -> Option<CountryCode> {
        self.airports.get(&code).map(|a| a.country)
    }

    /// Outbound flights from `airport` departing at or after
    /// `not_before`, ascending by departure time.
    ///
    /// Re-queryable with no side effects; returns an empty slice for an
    /// unknown airport or when nothing departs late enough.
    pub fn outbound_from(&self, airport: AirportCode, not_before: DateTime<Utc>) -> &[Arc<Flight>] {
        match self.outbound.get(&airport) {
            Some(flights) => {
                let start = flights.partition_point(|f| f.departure() < not_before);
                &flights[start..]
            }
            None => &[],
        }
    }

    /// Reputation of an airline, if it has an entry.
    ///
    /// Guaranteed `Some` for the airline of any flight in the network;
    /// the build rejects flights whose airline has no entry.
    pub fn reputation_of(&self, airline: AirlineCode) -> Option<Reputation> {
        self.reputations.get(&airline).copied()
    }

    /// Reputation of a flight's airline, for flights belonging to this
    /// network. The build guarantees an entry exists.
    pub(crate) fn reputation_of_flight(&self, flight: &Flight) -> Reputation {
        self.reputations[&flight.airline()]
    }

    /// Returns the minimum connection time table.
    pub fn min_connection(&self) -> &MinConnectionTimes {
        &self.min_connection
    }

    /// Number of airports in the network.
    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    /// Number of flights in the network.
    pub fn flight_count(&self) -> usize {
        self.flight_count
    }

    /// Assemble an [`Itinerary`] from flights of this network, looking
    /// up each segment's airline reputation.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the flights don't form a valid itinerary (see
    /// [`Itinerary::new`]).
    pub fn itinerary(&self, flights: Vec<Arc<Flight>>) -> Result<Itinerary, DomainError> {
        let reputations = flights
            .iter()
            .map(|f| {
                // Present for every flight in the network
                self.reputations[&f.airline()]
            })
            .collect();
        Itinerary::new(flights, reputations, &self.min_connection)
    }
}
