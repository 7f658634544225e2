pub mod annotate;
pub mod candidates;
pub mod decision;
pub mod domain;
pub mod itinerary;
pub mod ports;
pub mod session;
pub mod suggest;

pub use decision::{DecisionEngine, DecisionOutcome};
pub use domain::{Activity, CandidateActivity, DayPlan, Interest, MatchType, SetupForm, Stage, TripContext};
pub use itinerary::{build_day_plans, map_search_url, Itinerary};
pub use ports::{CandidateSource, PortError, PortResult};
pub use session::{DiscoveryTicket, LoadOutcome, SessionController, SessionError, ValidationError};
pub use suggest::{SuggestionRequest, SuggestionTicket, SuggestionTracker};
