//! Loading of network datasets from JSON files on disk.
//!
//! A dataset directory holds a fixed set of files:
//!
//! - `airports.json` — `{"data": [...]}`, one record per airport
//! - `flights.json` — `{"data": [...]}`, one record per scheduled flight
//! - `airline_reputations.json` — flat map of airline code to score
//! - `visa_rules.json` — `{"data": [...]}`, one record per rule
//! - `min_connection_times.json` — optional; default and per-airport
//!   minimum connection minutes
//!
//! Airports are loaded strictly: a malformed airport record fails the
//! load, since everything else references them. Flight, reputation and
//! visa records are staged tolerantly instead, so one malformed record
//! in a large feed is logged and skipped rather than failing the whole
//! dataset.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{
    AirlineCode, Airport, AirportCode, CountryCode, Flight, FlightId, MinConnectionTimes,
    Reputation,
};
use crate::network::{FlightNetwork, InvalidGraphError};
use crate::visa::{AdmissionCategory, VisaTable};

/// Errors that abort a dataset load outright.
///
/// Record-level defects in flights, reputations and visa rules are not
/// errors: they are skipped and counted in [`StagingReport`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid airport record {code:?}: {reason}")]
    InvalidAirport { code: String, reason: String },
    #[error(transparent)]
    Graph(#[from] InvalidGraphError),
}

/// Wrapper matching feed files that carry their records under `data`.
#[derive(Debug, Deserialize)]
struct Records<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct AirportRecord {
    pub code: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct FlightRecord {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub airline: String,
}

#[derive(Debug, Deserialize)]
pub struct VisaRuleRecord {
    pub nationality: String,
    pub country: String,
    pub category: CategoryRecord,
}

/// Wire form of an admission category.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryRecord {
    VisaFree,
    VisaOnArrival,
    EVisa,
    VisaRequired,
    NoAdmission,
}

impl From<CategoryRecord> for AdmissionCategory {
    fn from(record: CategoryRecord) -> Self {
        match record {
            CategoryRecord::VisaFree => AdmissionCategory::VisaFree,
            CategoryRecord::VisaOnArrival => AdmissionCategory::VisaOnArrival,
            CategoryRecord::EVisa => AdmissionCategory::EVisa,
            CategoryRecord::VisaRequired => AdmissionCategory::VisaRequired,
            CategoryRecord::NoAdmission => AdmissionCategory::NoAdmission,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ConnectionTimesRecord {
    pub default_minutes: Option<i64>,
    #[serde(default)]
    pub airports: HashMap<String, i64>,
}

/// A parsed but not yet validated dataset.
#[derive(Debug)]
pub struct Dataset {
    pub airports: Vec<AirportRecord>,
    pub flights: Vec<FlightRecord>,
    pub reputations: HashMap<String, f64>,
    pub visa_rules: Vec<VisaRuleRecord>,
    pub connection_times: ConnectionTimesRecord,
}

/// Counts of records dropped during staging.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StagingReport {
    pub flights_skipped: usize,
    pub reputations_skipped: usize,
    pub visa_rules_skipped: usize,
    pub connections_skipped: usize,
}

/// A staged dataset, ready to search over.
#[derive(Debug)]
pub struct LoadedDataset {
    pub network: FlightNetwork,
    pub visa: VisaTable,
    pub report: StagingReport,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Dataset {
    /// Read all dataset files from a directory.
    ///
    /// `min_connection_times.json` is optional; the other four files
    /// must exist and parse.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        let dir = dir.as_ref();

        let airports: Records<AirportRecord> = read_json(&dir.join("airports.json"))?;
        let flights: Records<FlightRecord> = read_json(&dir.join("flights.json"))?;
        let reputations: HashMap<String, f64> =
            read_json(&dir.join("airline_reputations.json"))?;
        let visa_rules: Records<VisaRuleRecord> = read_json(&dir.join("visa_rules.json"))?;

        let connections_path = dir.join("min_connection_times.json");
        let connection_times = if connections_path.is_file() {
            read_json(&connections_path)?
        } else {
            ConnectionTimesRecord::default()
        };

        Ok(Self {
            airports: airports.data,
            flights: flights.data,
            reputations,
            visa_rules: visa_rules.data,
            connection_times,
        })
    }

    /// Validate the records and build the network and visa table.
    ///
    /// # Errors
    ///
    /// Fails on a malformed airport record or a graph-level defect
    /// (duplicate ids, duplicate airport codes). Malformed flight,
    /// reputation, visa and connection records are skipped with a
    /// warning and tallied in the report.
    pub fn stage(self) -> Result<LoadedDataset, LoadError> {
        let mut report = StagingReport::default();

        let mut airports = Vec::with_capacity(self.airports.len());
        for record in self.airports {
            let airport = stage_airport(&record).map_err(|reason| LoadError::InvalidAirport {
                code: record.code.clone(),
                reason,
            })?;
            airports.push(airport);
        }
        let known: std::collections::HashSet<AirportCode> =
            airports.iter().map(|a| a.code).collect();

        let mut reputations = HashMap::with_capacity(self.reputations.len());
        for (code, score) in &self.reputations {
            match stage_reputation(code, *score) {
                Ok((airline, reputation)) => {
                    reputations.insert(airline, reputation);
                }
                Err(reason) => {
                    warn!(airline = %code, %reason, "skipping reputation record");
                    report.reputations_skipped += 1;
                }
            }
        }

        let mut flights = Vec::with_capacity(self.flights.len());
        for record in self.flights {
            match stage_flight(&record, &known, &reputations) {
                Ok(flight) => flights.push(flight),
                Err(reason) => {
                    warn!(id = %record.id, %reason, "skipping flight record");
                    report.flights_skipped += 1;
                }
            }
        }

        let mut visa = VisaTable::new();
        for record in &self.visa_rules {
            match stage_visa_rule(record) {
                Ok((nationality, country, category)) => {
                    visa.insert(nationality, country, category);
                }
                Err(reason) => {
                    warn!(
                        nationality = %record.nationality,
                        country = %record.country,
                        %reason,
                        "skipping visa rule"
                    );
                    report.visa_rules_skipped += 1;
                }
            }
        }

        let default = self
            .connection_times
            .default_minutes
            .filter(|minutes| *minutes >= 0)
            .map(Duration::minutes);
        let mut min_connection = match default {
            Some(duration) => MinConnectionTimes::with_default(duration),
            None => MinConnectionTimes::default(),
        };
        for (code, minutes) in &self.connection_times.airports {
            match stage_connection(code, *minutes) {
                Ok((airport, duration)) => min_connection.set(airport, duration),
                Err(reason) => {
                    warn!(airport = %code, %reason, "skipping connection time");
                    report.connections_skipped += 1;
                }
            }
        }

        debug!(
            airports = airports.len(),
            flights = flights.len(),
            rules = visa.len(),
            skipped_flights = report.flights_skipped,
            "dataset staged"
        );

        let network = FlightNetwork::build(airports, flights, reputations, min_connection)?;
        Ok(LoadedDataset {
            network,
            visa,
            report,
        })
    }
}

/// Read and stage a dataset directory in one step.
pub fn load_dataset(dir: impl AsRef<Path>) -> Result<LoadedDataset, LoadError> {
    Dataset::from_dir(dir)?.stage()
}

fn stage_airport(record: &AirportRecord) -> Result<Airport, String> {
    let code = AirportCode::parse(&record.code).map_err(|e| e.to_string())?;
    let country = CountryCode::parse(&record.country).map_err(|e| e.to_string())?;
    Airport::new(code, country, record.latitude, record.longitude).map_err(|e| e.to_string())
}

fn stage_reputation(code: &str, score: f64) -> Result<(AirlineCode, Reputation), String> {
    let airline = AirlineCode::parse(code).map_err(|e| e.to_string())?;
    let reputation = Reputation::new(score).map_err(|e| e.to_string())?;
    Ok((airline, reputation))
}

fn stage_flight(
    record: &FlightRecord,
    known: &std::collections::HashSet<AirportCode>,
    reputations: &HashMap<AirlineCode, Reputation>,
) -> Result<Flight, String> {
    let id = FlightId::parse(&record.id).map_err(|e| e.to_string())?;
    let origin = AirportCode::parse(&record.origin).map_err(|e| e.to_string())?;
    let destination = AirportCode::parse(&record.destination).map_err(|e| e.to_string())?;
    let airline = AirlineCode::parse(&record.airline).map_err(|e| e.to_string())?;

    // Referential defects are record-level here, not dataset-level:
    // feeds routinely carry flights to airports outside the dataset.
    for endpoint in [origin, destination] {
        if !known.contains(&endpoint) {
            return Err(format!("unknown airport {endpoint}"));
        }
    }
    if !reputations.contains_key(&airline) {
        return Err(format!("no reputation entry for airline {airline}"));
    }

    Flight::new(
        id,
        origin,
        destination,
        record.departure,
        record.arrival,
        airline,
    )
    .map_err(|e| e.to_string())
}

fn stage_visa_rule(
    record: &VisaRuleRecord,
) -> Result<(CountryCode, CountryCode, AdmissionCategory), String> {
    let nationality = CountryCode::parse(&record.nationality).map_err(|e| e.to_string())?;
    let country = CountryCode::parse(&record.country).map_err(|e| e.to_string())?;
    Ok((nationality, country, record.category.into()))
}

fn stage_connection(code: &str, minutes: i64) -> Result<(AirportCode, Duration), String> {
    let airport = AirportCode::parse(code).map_err(|e| e.to_string())?;
    if minutes < 0 {
        return Err(format!("negative connection time {minutes}"));
    }
    Ok((airport, Duration::minutes(minutes)))
}
