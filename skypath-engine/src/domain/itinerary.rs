//! Itinerary type.
//!
//! An `Itinerary` is an ordered sequence of flights from origin to
//! destination. It is a value produced by the search: validated at
//! construction, immutable afterwards, and safe to pass across
//! concurrent searches (it owns no shared mutable state).

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::{
    AirlineCode, AirportCode, CountryCode, DomainError, Flight, MinConnectionTimes, Reputation,
};

/// A complete itinerary: one or more connecting flights.
///
/// Uses `Arc<Flight>` so itineraries share flight records with the
/// network without copying.
///
/// # Invariants
///
/// - At least one flight
/// - Consecutive flights connect: `flights[i].destination == flights[i+1].origin`
/// - Each connection honours the airport's minimum connection time
///   (inclusive bound)
/// - Exactly one reputation score per flight
#[derive(Debug, Clone)]
pub struct Itinerary {
    flights: Vec<Arc<Flight>>,
    reputations: Vec<Reputation>,
}

impl Itinerary {
    /// Construct an itinerary from connecting flights and their
    /// per-segment airline reputations.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the flight list is empty, consecutive flights
    /// don't connect, a connection is tighter than the minimum
    /// connection time, or the reputation list length doesn't match.
    pub fn new(
        flights: Vec<Arc<Flight>>,
        reputations: Vec<Reputation>,
        min_connection: &MinConnectionTimes,
    ) -> Result<Self, DomainError> {
        if flights.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        if reputations.len() != flights.len() {
            return Err(DomainError::ReputationMismatch);
        }

        for (i, pair) in flights.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.destination() != next.origin() {
                return Err(DomainError::DisconnectedItinerary { position: i + 1 });
            }
            let airport = prev.destination();
            if next.departure() < prev.arrival() + min_connection.at(airport) {
                return Err(DomainError::ConnectionTooTight { airport });
            }
        }

        Ok(Itinerary {
            flights,
            reputations,
        })
    }

    /// Returns the flights in travel order.
    pub fn flights(&self) -> &[Arc<Flight>] {
        &self.flights
    }

    /// Returns the number of flight segments.
    pub fn segment_count(&self) -> usize {
        self.flights.len()
    }

    /// Returns the origin airport.
    pub fn origin(&self) -> AirportCode {
        self.flights[0].origin()
    }

    /// Returns the final destination airport.
    pub fn destination(&self) -> AirportCode {
        self.flights[self.flights.len() - 1].destination()
    }

    /// Returns the departure time of the first flight.
    pub fn departure_time(&self) -> DateTime<Utc> {
        self.flights[0].departure()
    }

    /// Returns the arrival time of the last flight.
    pub fn arrival_time(&self) -> DateTime<Utc> {
        self.flights[self.flights.len() - 1].arrival()
    }

    /// Total elapsed time from first departure to last arrival.
    pub fn total_elapsed(&self) -> Duration {
        self.arrival_time() - self.departure_time()
    }

    /// Sum of airborne durations across all segments.
    pub fn total_air_time(&self) -> Duration {
        self.flights
            .iter()
            .fold(Duration::zero(), |acc, f| acc + f.duration())
    }

    /// Sum of ground gaps between consecutive flights.
    pub fn total_layover(&self) -> Duration {
        self.flights
            .windows(2)
            .fold(Duration::zero(), |acc, pair| {
                acc + (pair[1].departure() - pair[0].arrival())
            })
    }

    /// Arithmetic mean of per-segment airline reputations.
    ///
    /// The mean (rather than a sum) keeps longer itineraries from being
    /// penalized purely for having more segments.
    pub fn reputation_aggregate(&self) -> f64 {
        let sum: f64 = self.reputations.iter().map(|r| r.value()).sum();
        sum / self.reputations.len() as f64
    }

    /// Returns the per-segment reputation scores, aligned with
    /// [`flights`](Self::flights).
    pub fn reputations(&self) -> &[Reputation] {
        &self.reputations
    }

    /// Countries entered along the way, in travel order: every flight's
    /// destination country, resolved by the caller-supplied lookup.
    ///
    /// The origin country is not included; the traveler is already
    /// admitted there.
    pub fn countries_entered(
        &self,
        country_of: impl Fn(AirportCode) -> CountryCode,
    ) -> Vec<CountryCode> {
        self.flights
            .iter()
            .map(|f| country_of(f.destination()))
            .collect()
    }

    /// True if any segment is operated by one of the given airlines.
    pub fn uses_any_airline(&self, airlines: &[AirlineCode]) -> bool {
        self.flights
            .iter()
            .any(|f| airlines.contains(&f.airline()))
    }
}
