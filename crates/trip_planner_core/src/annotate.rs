//! crates/trip_planner_core/src/annotate.rs
//!
//! Attaches the derived display fields to a freshly received candidate batch.

use crate::domain::{Activity, CandidateActivity, MatchType};

const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/seed";

/// Builds the placeholder image URL for an activity. Same name, same image.
pub fn placeholder_image_url(name: &str) -> String {
    format!("{}/{}/800/600", PLACEHOLDER_IMAGE_BASE, urlencoding::encode(name))
}

/// Every third item, starting with the first, is a wildcard pick.
pub fn match_type_for(index: usize) -> MatchType {
    if index % 3 == 0 {
        MatchType::Wildcard
    } else {
        MatchType::Match
    }
}

/// Annotates a raw batch in place order: image URL, match type and a fallback id.
pub fn annotate_batch(batch: Vec<CandidateActivity>) -> Vec<Activity> {
    batch
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            let id = candidate
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| format!("act-{}", index));
            Activity {
                id,
                image_url: placeholder_image_url(&candidate.name),
                match_type: match_type_for(index),
                name: candidate.name,
                description: candidate.description,
                kind: candidate.kind,
                tags: candidate.tags,
                map_query: candidate.map_query,
            }
        })
        .collect()
}
