//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! Network construction wraps the flight-level ones into
//! `InvalidGraphError`.

use super::{AirportCode, FlightId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Airport coordinate outside its valid range
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(&'static str),

    /// Flight arrives at or before it departs
    #[error("flight {id} has non-positive duration")]
    NonPositiveDuration { id: FlightId },

    /// Flight departs and arrives at the same airport
    #[error("flight {id} has identical origin and destination")]
    SelfLoop { id: FlightId },

    /// Itinerary has no flights
    #[error("itinerary must have at least one flight")]
    EmptyItinerary,

    /// Consecutive flights don't connect at the same airport
    #[error("flight at position {position} does not depart where the previous flight arrived")]
    DisconnectedItinerary { position: usize },

    /// Connection gap shorter than the airport's minimum connection time
    #[error("connection at {airport} is tighter than the minimum connection time")]
    ConnectionTooTight { airport: AirportCode },

    /// Per-segment reputation list doesn't match the flight list
    #[error("expected one reputation score per flight")]
    ReputationMismatch,
}
