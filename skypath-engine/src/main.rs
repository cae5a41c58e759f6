use std::process::ExitCode;

use chrono::{DateTime, Duration, Utc};
use tracing_subscriber::EnvFilter;

use skypath_engine::domain::{AirportCode, CountryCode};
use skypath_engine::engine::{CancelToken, CriteriaWeights, RouteSearch, rank_itineraries};
use skypath_engine::loader::load_dataset;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 6 {
        eprintln!(
            "Usage: {} <dataset-dir> <origin> <destination> <nationality> <departure>",
            args.first().map(String::as_str).unwrap_or("skypath-engine")
        );
        eprintln!("Example: skypath-engine data/ YYZ SIN CA 2024-06-01T00:00:00Z");
        return ExitCode::FAILURE;
    }

    let origin = match AirportCode::parse(&args[2]) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Invalid origin {:?}: {e}", args[2]);
            return ExitCode::FAILURE;
        }
    };
    let destination = match AirportCode::parse(&args[3]) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Invalid destination {:?}: {e}", args[3]);
            return ExitCode::FAILURE;
        }
    };
    let nationality = match CountryCode::parse(&args[4]) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Invalid nationality {:?}: {e}", args[4]);
            return ExitCode::FAILURE;
        }
    };
    let earliest_departure: DateTime<Utc> = match args[5].parse() {
        Ok(ts) => ts,
        Err(e) => {
            eprintln!("Invalid departure time {:?}: {e}", args[5]);
            return ExitCode::FAILURE;
        }
    };

    let loaded = match load_dataset(&args[1]) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load dataset from {}: {e}", args[1]);
            return ExitCode::FAILURE;
        }
    };
    println!(
        "Loaded {} airports, {} flights, {} visa rules",
        loaded.network.airport_count(),
        loaded.network.flight_count(),
        loaded.visa.len()
    );
    let skipped = loaded.report.flights_skipped
        + loaded.report.reputations_skipped
        + loaded.report.visa_rules_skipped
        + loaded.report.connections_skipped;
    if skipped > 0 {
        println!("Skipped {skipped} malformed records");
    }

    let request = skypath_engine::engine::SearchRequest {
        origin,
        destination,
        earliest_departure,
        max_segments: 3,
        nationality,
    };
    let weights = CriteriaWeights::default();

    let search = RouteSearch::new(&loaded.network, &loaded.visa);
    let outcome = match search.search(&request, &weights, &CancelToken::new()) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Search failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    for warning in &outcome.warnings {
        println!("Note: {warning}");
    }

    if outcome.itineraries.is_empty() {
        println!(
            "No routes from {origin} to {destination} departing {earliest_departure} or later."
        );
        return ExitCode::SUCCESS;
    }

    let ranked = rank_itineraries(outcome.itineraries, &weights);
    println!("\n{} route(s), best first:", ranked.len());
    for (position, entry) in ranked.iter().enumerate() {
        let itinerary = &entry.itinerary;
        println!(
            "\n#{} — {} to {}, {} total ({} in the air, {} on the ground), reputation {:.1}",
            position + 1,
            itinerary.origin(),
            itinerary.destination(),
            human_duration(itinerary.total_elapsed()),
            human_duration(itinerary.total_air_time()),
            human_duration(itinerary.total_layover()),
            itinerary.reputation_aggregate(),
        );
        for flight in itinerary.flights() {
            println!(
                "    {} {} {} -> {} ({} -> {})",
                flight.id(),
                flight.airline(),
                flight.origin(),
                flight.destination(),
                flight.departure().format("%Y-%m-%d %H:%M"),
                flight.arrival().format("%Y-%m-%d %H:%M"),
            );
        }
    }

    ExitCode::SUCCESS
}

fn human_duration(duration: Duration) -> String {
    format!("{}h{:02}m", duration.num_hours(), duration.num_minutes() % 60)
}
