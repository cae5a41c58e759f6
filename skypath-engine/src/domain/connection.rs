//! Minimum connection times.

use std::collections::HashMap;

use chrono::Duration;

use super::AirportCode;

/// Default minimum connection time applied when an airport has no
/// specific entry (45 minutes).
pub const DEFAULT_MIN_CONNECTION_MINS: i64 = 45;

/// Per-airport minimum connection times with a global fallback.
///
/// A connection at an airport is only valid if the next departure is at
/// least this long after the previous arrival. The bound is inclusive:
/// a gap exactly equal to the minimum is accepted.
///
/// # Examples
///
/// ```
/// use skypath_engine::domain::{AirportCode, MinConnectionTimes};
/// use chrono::Duration;
///
/// let hkg = AirportCode::parse("HKG").unwrap();
/// let yyz = AirportCode::parse("YYZ").unwrap();
///
/// let mut times = MinConnectionTimes::with_default(Duration::minutes(45));
/// times.set(hkg, Duration::minutes(120));
///
/// assert_eq!(times.at(hkg), Duration::minutes(120));
/// assert_eq!(times.at(yyz), Duration::minutes(45));
/// ```
#[derive(Debug, Clone)]
pub struct MinConnectionTimes {
    per_airport: HashMap<AirportCode, Duration>,
    default: Duration,
}

impl MinConnectionTimes {
    /// Create a table with the given global fallback and no per-airport
    /// entries.
    pub fn with_default(default: Duration) -> Self {
        Self {
            per_airport: HashMap::new(),
            default,
        }
    }

    /// Set the minimum connection time for a specific airport.
    pub fn set(&mut self, airport: AirportCode, duration: Duration) {
        self.per_airport.insert(airport, duration);
    }

    /// Returns the minimum connection time at an airport, falling back
    /// to the global default.
    pub fn at(&self, airport: AirportCode) -> Duration {
        self.per_airport
            .get(&airport)
            .copied()
            .unwrap_or(self.default)
    }
}

impl Default for MinConnectionTimes {
    fn default() -> Self {
        Self::with_default(Duration::minutes(DEFAULT_MIN_CONNECTION_MINS))
    }
}
