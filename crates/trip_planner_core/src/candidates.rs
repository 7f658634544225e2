//! crates/trip_planner_core/src/candidates.rs
//!
//! Calls into the `CandidateSource` port. Every failure is caught here and turned
//! into an empty result, so the rest of the core never sees a backend error.

use crate::annotate::annotate_batch;
use crate::domain::{Activity, Interest};
use crate::ports::CandidateSource;
use crate::suggest::MIN_QUERY_CHARS;
use tracing::{error, info};

/// Fetches and annotates a candidate batch. Failures resolve to an empty batch.
pub async fn fetch_candidates(
    source: &dyn CandidateSource,
    destination: &str,
    interests: &[Interest],
) -> Vec<Activity> {
    match source.get_activities(destination, interests).await {
        Ok(batch) => {
            info!("Received {} candidate activities for {}.", batch.len(), destination);
            annotate_batch(batch)
        }
        Err(e) => {
            error!("Failed to fetch candidate activities for {}: {}", destination, e);
            Vec::new()
        }
    }
}

/// Fetches city completions. Short inputs and failures resolve to an empty list.
pub async fn fetch_city_completions(source: &dyn CandidateSource, partial_input: &str) -> Vec<String> {
    if partial_input.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    source
        .get_city_completions(partial_input)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to fetch city suggestions for '{}': {}", partial_input, e);
            Vec::new()
        })
}
