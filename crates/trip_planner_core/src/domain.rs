//! crates/trip_planner_core/src/domain.rs
//!
//! Defines the pure, core data structures for the trip planner.
//! These structs carry no behaviour beyond small conversions; the state machine,
//! decision engine and itinerary builder live in their own modules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Interest Catalog
//=========================================================================================

/// A tag from the fixed catalog of traveller interests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interest {
    Food,
    Art,
    Nature,
    Nightlife,
    History,
    Shopping,
    Coffee,
    Photography,
    Romantic,
    Tech,
}

impl Interest {
    /// The whole catalog, in display order.
    pub const ALL: [Interest; 10] = [
        Interest::Food,
        Interest::Art,
        Interest::Nature,
        Interest::Nightlife,
        Interest::History,
        Interest::Shopping,
        Interest::Coffee,
        Interest::Photography,
        Interest::Romantic,
        Interest::Tech,
    ];

    /// The wire value of the tag (also what the candidate source sees).
    pub fn value(self) -> &'static str {
        match self {
            Interest::Food => "food",
            Interest::Art => "art",
            Interest::Nature => "nature",
            Interest::Nightlife => "nightlife",
            Interest::History => "history",
            Interest::Shopping => "shopping",
            Interest::Coffee => "coffee",
            Interest::Photography => "photography",
            Interest::Romantic => "romantic",
            Interest::Tech => "tech",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Interest::Food => "Food & Gastronomy",
            Interest::Art => "Art & Museums",
            Interest::Nature => "Nature & Outdoors",
            Interest::Nightlife => "Nightlife & Bars",
            Interest::History => "History & Culture",
            Interest::Shopping => "Shopping",
            Interest::Coffee => "Coffee Shops",
            Interest::Photography => "Photography",
            Interest::Romantic => "Romantic Spots",
            Interest::Tech => "Tech & Modernity",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Interest::Food => "🍕",
            Interest::Art => "🎨",
            Interest::Nature => "🌿",
            Interest::Nightlife => "🌙",
            Interest::History => "🏛️",
            Interest::Shopping => "🛍️",
            Interest::Coffee => "☕",
            Interest::Photography => "📸",
            Interest::Romantic => "💕",
            Interest::Tech => "💻",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Returned when a tag is not part of the interest catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown interest tag: {0}")]
pub struct UnknownInterest(pub String);

impl FromStr for Interest {
    type Err = UnknownInterest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interest::ALL
            .into_iter()
            .find(|interest| interest.value() == s)
            .ok_or_else(|| UnknownInterest(s.to_string()))
    }
}

//=========================================================================================
// Activities
//=========================================================================================

/// Display hint attached to each candidate based on its position in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Match,
    Wildcard,
}

/// One activity exactly as the candidate source returns it, before annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateActivity {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<String>,
    pub map_query: String,
}

/// A candidate or accepted place/experience, with its derived display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: Vec<String>,
    pub map_query: String,
    pub image_url: String,
    pub match_type: MatchType,
}

//=========================================================================================
// Trip Context and Day Plans
//=========================================================================================

/// The mutable record describing the trip in progress. One per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripContext {
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub interests: BTreeSet<Interest>,
    /// Insertion order is the order in which the user accepted them.
    pub approved_activities: Vec<Activity>,
}

/// The fields submitted from the Setup stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupForm {
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub interests: BTreeSet<Interest>,
}

/// One calendar day of the trip with the activities assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    /// Human-readable label, e.g. "Saturday, Jun 1".
    pub label: String,
    pub activities: Vec<Activity>,
}

/// The three stages of the planning wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    Setup,
    Discovery,
    Itinerary,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Setup => "SETUP",
            Stage::Discovery => "DISCOVERY",
            Stage::Itinerary => "ITINERARY",
        };
        f.write_str(name)
    }
}
