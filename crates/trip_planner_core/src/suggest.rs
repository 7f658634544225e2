//! crates/trip_planner_core/src/suggest.rs
//!
//! Staleness tracking for city-name suggestions. Every input change is issued a
//! monotonically increasing sequence number; only the response carrying the latest
//! number may replace the visible suggestions.

/// Inputs shorter than this never reach the candidate source.
pub const MIN_QUERY_CHARS: usize = 3;

/// Identifies one suggestion lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionTicket {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionRequest {
    /// Input too short; suggestions were cleared and nothing should be fetched.
    Skip,
    Fetch(SuggestionTicket),
}

#[derive(Debug, Default)]
pub struct SuggestionTracker {
    latest_seq: u64,
    suggestions: Vec<String>,
}

impl SuggestionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new input. Any ticket issued earlier becomes stale.
    pub fn begin(&mut self, input: &str) -> SuggestionRequest {
        self.latest_seq += 1;
        if input.chars().count() < MIN_QUERY_CHARS {
            self.suggestions.clear();
            return SuggestionRequest::Skip;
        }
        SuggestionRequest::Fetch(SuggestionTicket {
            seq: self.latest_seq,
            query: input.to_string(),
        })
    }

    /// Clears the suggestions and invalidates every outstanding ticket.
    pub fn reset(&mut self) {
        self.latest_seq += 1;
        self.suggestions.clear();
    }

    pub fn is_current(&self, ticket: &SuggestionTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Stores `results` if `ticket` is still the latest. Returns whether they were applied.
    pub fn apply(&mut self, ticket: &SuggestionTicket, results: Vec<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.suggestions = results;
        true
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}
