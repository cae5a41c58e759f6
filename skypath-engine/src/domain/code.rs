//! Validated code types for airports, countries and airlines.

use std::fmt;

/// Error returned when parsing an invalid airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirportCode {
    reason: &'static str,
}

/// A valid airport code: 3 uppercase letters (IATA) or 4 uppercase
/// letters (ICAO).
///
/// This type guarantees that any `AirportCode` value is valid by
/// construction, so the rest of the crate never re-validates codes.
///
/// # Examples
///
/// ```
/// use skypath_engine::domain::AirportCode;
///
/// let yyz = AirportCode::parse("YYZ").unwrap();
/// assert_eq!(yyz.as_str(), "YYZ");
///
/// // ICAO-style codes are accepted too
/// assert!(AirportCode::parse("CYYZ").is_ok());
///
/// // Lowercase and wrong lengths are rejected
/// assert!(AirportCode::parse("yyz").is_err());
/// assert!(AirportCode::parse("YY").is_err());
/// assert!(AirportCode::parse("TOOLONG").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirportCode {
    bytes: [u8; 4],
    len: u8,
}

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be 3 or 4 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let raw = s.as_bytes();

        if raw.len() != 3 && raw.len() != 4 {
            return Err(InvalidAirportCode {
                reason: "must be 3 (IATA) or 4 (ICAO) characters",
            });
        }

        for &b in raw {
            if !b.is_ascii_uppercase() {
                return Err(InvalidAirportCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        let mut bytes = [0u8; 4];
        bytes[..raw.len()].copy_from_slice(raw);

        Ok(AirportCode {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: we only store valid ASCII uppercase letters
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap()
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid country code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid country code: {reason}")]
pub struct InvalidCountryCode {
    reason: &'static str,
}

/// A valid ISO 3166-1 alpha-2 country code (2 uppercase letters).
///
/// Used both for the country an airport sits in and for passport
/// nationality in visa lookups.
///
/// # Examples
///
/// ```
/// use skypath_engine::domain::CountryCode;
///
/// let ca = CountryCode::parse("CA").unwrap();
/// assert_eq!(ca.as_str(), "CA");
///
/// assert!(CountryCode::parse("ca").is_err());
/// assert!(CountryCode::parse("CAN").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Parse a country code from a string.
    ///
    /// The input must be exactly 2 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCountryCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidCountryCode {
                reason: "must be exactly 2 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCountryCode {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(CountryCode([bytes[0], bytes[1]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: we only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid airline code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airline code: {reason}")]
pub struct InvalidAirlineCode {
    reason: &'static str,
}

/// A valid airline designator: 2 characters (IATA, may contain digits)
/// or 3 uppercase letters (ICAO).
///
/// # Examples
///
/// ```
/// use skypath_engine::domain::AirlineCode;
///
/// // ICAO codes
/// assert!(AirlineCode::parse("ACA").is_ok());
/// // IATA codes may carry a digit
/// assert!(AirlineCode::parse("U2").is_ok());
///
/// assert!(AirlineCode::parse("aca").is_err());
/// assert!(AirlineCode::parse("A").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AirlineCode {
    bytes: [u8; 3],
    len: u8,
}

impl AirlineCode {
    /// Parse an airline code from a string.
    ///
    /// The input must be 2 or 3 uppercase ASCII letters or digits, with
    /// at least one letter.
    pub fn parse(s: &str) -> Result<Self, InvalidAirlineCode> {
        let raw = s.as_bytes();

        if raw.len() != 2 && raw.len() != 3 {
            return Err(InvalidAirlineCode {
                reason: "must be 2 (IATA) or 3 (ICAO) characters",
            });
        }

        let mut has_letter = false;
        for &b in raw {
            if b.is_ascii_uppercase() {
                has_letter = true;
            } else if !b.is_ascii_digit() {
                return Err(InvalidAirlineCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }
        if !has_letter {
            return Err(InvalidAirlineCode {
                reason: "must contain at least one letter",
            });
        }

        let mut bytes = [0u8; 3];
        bytes[..raw.len()].copy_from_slice(raw);

        Ok(AirlineCode {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: we only store valid ASCII
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap()
    }
}

impl fmt::Debug for AirlineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirlineCode({})", self.as_str())
    }
}

impl fmt::Display for AirlineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
