//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser client and the API server
//! for the trip planning wizard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use trip_planner_core::itinerary::{day_count, MAX_TRIP_DAYS};
use trip_planner_core::{Activity, Interest, Itinerary, SetupForm, Stage, TripContext};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

/// The Setup form as the browser submits it. Dates are `YYYY-MM-DD`; an empty
/// string means the field was left blank.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SetupPayload {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub interests: BTreeSet<Interest>,
}

impl SetupPayload {
    /// Converts the raw payload into a form. Fails only on a date that is present but unparsable.
    pub fn into_form(self) -> Result<SetupForm, String> {
        let start_date = parse_form_date("start_date", &self.start_date)?;
        let end_date = parse_form_date("end_date", &self.end_date)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            check_trip_length(start, end)?;
        }
        Ok(SetupForm {
            start_date,
            end_date,
            destination: self.destination,
            interests: self.interests,
        })
    }
}

pub fn parse_form_date(field: &str, value: &str) -> Result<Option<NaiveDate>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("'{}' is not a valid date for {} (expected YYYY-MM-DD)", value, field))
}

/// Rejects ranges longer than [`MAX_TRIP_DAYS`]. A reversed range passes and plans no days.
pub fn check_trip_length(start: NaiveDate, end: NaiveDate) -> Result<(), String> {
    let days = day_count(start, end);
    if days > MAX_TRIP_DAYS {
        return Err(format!(
            "Trips are limited to {} days ({} to {} is {} days)",
            MAX_TRIP_DAYS, start, end, days
        ));
    }
    Ok(())
}

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The destination field changed. Drives the debounced city suggestions.
    DestinationInput { text: String },

    /// Submits the Setup form, moving to Discovery when it validates.
    SubmitSetup(SetupPayload),

    /// Accepts (`true`) or rejects (`false`) the candidate on top of the deck.
    Decide { accept: bool },

    /// Goes back one stage.
    Back,

    /// Starts over with an empty trip.
    Restart,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

/// One entry of the interest catalog, as shown on the Setup form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct InterestOption {
    pub value: String,
    pub label: String,
    pub icon: String,
}

impl From<Interest> for InterestOption {
    fn from(interest: Interest) -> Self {
        Self {
            value: interest.value().to_string(),
            label: interest.label().to_string(),
            icon: interest.icon().to_string(),
        }
    }
}

pub fn interest_catalog() -> Vec<InterestOption> {
    Interest::ALL.into_iter().map(InterestOption::from).collect()
}

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Confirms the connection's session and hands over the interest catalog.
    SessionInitialized {
        session_id: Uuid,
        stage: Stage,
        interests: Vec<InterestOption>,
    },

    /// A debounced suggestion lookup is now in flight.
    SearchingSuggestions { query: String },

    /// Replaces the visible city suggestions.
    Suggestions { query: String, suggestions: Vec<String> },

    /// The Setup submission was blocked.
    ValidationError { message: String },

    /// The wizard moved to another stage. Carries the trip so the client can re-render.
    StageChanged { stage: Stage, trip: TripContext },

    /// The candidate batch is being generated. The deck is inert until it arrives.
    CandidatesLoading { destination: String },

    /// The candidate now awaiting a decision. `position` is 1-based.
    Candidate {
        activity: Activity,
        position: usize,
        total: usize,
    },

    /// The itinerary, both structured and as printable text.
    Itinerary { itinerary: Itinerary, printable: String },

    /// Reports an error to the client, which should display an error message.
    Error { message: String },
}

impl ServerMessage {
    pub fn itinerary(itinerary: Itinerary) -> Self {
        let printable = itinerary.to_string();
        ServerMessage::Itinerary {
            itinerary,
            printable,
        }
    }
}
