//! Route search engine.
//!
//! This module implements the core algorithm: a multi-criteria,
//! time-dependent search over the flight network that produces the
//! Pareto frontier of itineraries, plus the preference aggregator that
//! orders the frontier by the user's criteria weights.
//!
//! Feasibility and dominance (what the frontier contains) are kept
//! strictly separate from scoring (how the frontier is ordered), so the
//! optimality guarantee never depends on the scoring heuristic.

mod config;
mod label;
mod rank;
mod search;


pub use config::{CriteriaWeights, InvalidConfiguration};
pub use rank::{RankedItinerary, rank_itineraries, remove_dominated};
pub use search::{CancelToken, RouteSearch, SearchError, SearchOutcome, SearchRequest};
