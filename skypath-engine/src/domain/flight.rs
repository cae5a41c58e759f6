//! Airport and flight types.
//!
//! An `Airport` is a node in the flight network; a `Flight` is a
//! directed, time-stamped edge between two airports. Both are validated
//! at construction and immutable afterwards.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::{AirlineCode, AirportCode, CountryCode, DomainError};

/// Error returned when parsing an invalid flight identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flight id: {reason}")]
pub struct InvalidFlightId {
    reason: &'static str,
}

/// A unique flight identifier (e.g. a flight number like "AC7").
///
/// Non-empty, printable ASCII. Two `Flight`s with the same schedule but
/// different identifiers are distinct edges in the network.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightId(String);

impl FlightId {
    /// Parse a flight identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidFlightId> {
        if s.is_empty() {
            return Err(InvalidFlightId {
                reason: "must not be empty",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(InvalidFlightId {
                reason: "must be printable ASCII without spaces",
            });
        }
        Ok(FlightId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightId({})", self.0)
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An airport: a node in the flight network.
///
/// Coordinates are carried for a presentation layer to render; the
/// search never reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    /// Unique airport code.
    pub code: AirportCode,
    /// Country the airport sits in, used for admission checks.
    pub country: CountryCode,
    /// Latitude in degrees, for display only.
    pub latitude: f64,
    /// Longitude in degrees, for display only.
    pub longitude: f64,
}

impl Airport {
    /// Create an airport, validating the coordinate ranges.
    pub fn new(
        code: AirportCode,
        country: CountryCode,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !latitude.is_finite() {
            return Err(DomainError::InvalidCoordinate("latitude out of range"));
        }
        if !(-180.0..=180.0).contains(&longitude) || !longitude.is_finite() {
            return Err(DomainError::InvalidCoordinate("longitude out of range"));
        }
        Ok(Airport {
            code,
            country,
            latitude,
            longitude,
        })
    }
}

/// A scheduled flight: a directed, time-stamped edge.
///
/// # Invariants
///
/// - `departure < arrival` (strictly positive duration)
/// - `origin != destination`
///
/// Both timestamps are UTC. The same airport pair may have many flights
/// at different times; each is its own edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    id: FlightId,
    origin: AirportCode,
    destination: AirportCode,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
    airline: AirlineCode,
}

impl Flight {
    /// Construct a flight, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the flight arrives at or before it departs, or
    /// if origin and destination are the same airport.
    pub fn new(
        id: FlightId,
        origin: AirportCode,
        destination: AirportCode,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
        airline: AirlineCode,
    ) -> Result<Self, DomainError> {
        if arrival <= departure {
            return Err(DomainError::NonPositiveDuration { id });
        }
        if origin == destination {
            return Err(DomainError::SelfLoop { id });
        }
        Ok(Flight {
            id,
            origin,
            destination,
            departure,
            arrival,
            airline,
        })
    }

    /// Returns the flight identifier.
    pub fn id(&self) -> &FlightId {
        &self.id
    }

    /// Returns the origin airport code.
    pub fn origin(&self) -> AirportCode {
        self.origin
    }

    /// Returns the destination airport code.
    pub fn destination(&self) -> AirportCode {
        self.destination
    }

    /// Returns the scheduled departure time (UTC).
    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    /// Returns the scheduled arrival time (UTC).
    pub fn arrival(&self) -> DateTime<Utc> {
        self.arrival
    }

    /// Returns the operating airline code.
    pub fn airline(&self) -> AirlineCode {
        self.airline
    }

    /// Returns the airborne duration. Always positive.
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
            .unwrap()
            .and_utc()
    }

    fn airport(code: &str) -> AirportCode {
        AirportCode::parse(code).unwrap()
    }

    #[test]
    fn flight_id_parse() {
        assert!(FlightId::parse("AC7").is_ok());
        assert!(FlightId::parse("SQ-318").is_ok());
        assert!(FlightId::parse("").is_err());
        assert!(FlightId::parse("AC 7").is_err());
    }

    #[test]
    fn flight_duration() {
        let flight = Flight::new(
            FlightId::parse("AC7").unwrap(),
            airport("YYZ"),
            airport("HKG"),
            ts("2024-06-01 10:00"),
            ts("2024-06-01 18:00"),
            AirlineCode::parse("ACA").unwrap(),
        )
        .unwrap();

        assert_eq!(flight.duration(), Duration::hours(8));
    }

    #[test]
    fn reject_non_positive_duration() {
        let zero = Flight::new(
            FlightId::parse("X1").unwrap(),
            airport("YYZ"),
            airport("HKG"),
            ts("2024-06-01 10:00"),
            ts("2024-06-01 10:00"),
            AirlineCode::parse("ACA").unwrap(),
        );
        assert!(matches!(
            zero,
            Err(DomainError::NonPositiveDuration { .. })
        ));

        let negative = Flight::new(
            FlightId::parse("X2").unwrap(),
            airport("YYZ"),
            airport("HKG"),
            ts("2024-06-01 10:00"),
            ts("2024-06-01 09:00"),
            AirlineCode::parse("ACA").unwrap(),
        );
        assert!(matches!(
            negative,
            Err(DomainError::NonPositiveDuration { .. })
        ));
    }

    #[test]
    fn reject_self_loop() {
        let result = Flight::new(
            FlightId::parse("X3").unwrap(),
            airport("YYZ"),
            airport("YYZ"),
            ts("2024-06-01 10:00"),
            ts("2024-06-01 11:00"),
            AirlineCode::parse("ACA").unwrap(),
        );
        assert!(matches!(result, Err(DomainError::SelfLoop { .. })));
    }

    #[test]
    fn airport_coordinate_validation() {
        let code = airport("YYZ");
        let country = CountryCode::parse("CA").unwrap();

        assert!(Airport::new(code, country, 43.68, -79.63).is_ok());
        assert!(Airport::new(code, country, 91.0, 0.0).is_err());
        assert!(Airport::new(code, country, 0.0, -181.0).is_err());
        assert!(Airport::new(code, country, f64::NAN, 0.0).is_err());
    }
}
