//! Domain types for the flight route planner.
//!
//! This module contains the core domain model types that represent
//! validated flight data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod code;
mod connection;
mod error;
mod flight;
mod itinerary;
mod reputation;

pub use code::{
    AirlineCode, AirportCode, CountryCode, InvalidAirlineCode, InvalidAirportCode,
    InvalidCountryCode,
};
pub use connection::{DEFAULT_MIN_CONNECTION_MINS, MinConnectionTimes};
pub use error::DomainError;
pub use flight::{Airport, Flight, FlightId, InvalidFlightId};
pub use itinerary::Itinerary;
pub use reputation::{InvalidReputation, Reputation};
