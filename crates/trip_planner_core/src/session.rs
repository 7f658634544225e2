//! crates/trip_planner_core/src/session.rs
//!
//! The session controller: owns the Trip Context and the three-stage wizard flow
//! (Setup -> Discovery -> Itinerary). All mutation of the trip goes through the
//! transition methods below.

use crate::decision::{DecisionEngine, DecisionOutcome};
use crate::domain::{Activity, Interest, SetupForm, Stage, TripContext};
use crate::itinerary::Itinerary;
use tracing::{info, warn};

//=========================================================================================
// Errors
//=========================================================================================

/// Why a Setup submission was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("A destination is required")]
    MissingDestination,
    #[error("A start date is required")]
    MissingStartDate,
    #[error("An end date is required")]
    MissingEndDate,
    #[error("At least one interest must be selected")]
    NoInterests,
}

impl ValidationError {
    /// The message shown to the user on a blocked submission.
    pub fn user_message(&self) -> &'static str {
        "Please fill in all fields and select at least one interest."
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Operation requires stage {expected}, but the session is in {actual}")]
    WrongStage { expected: Stage, actual: Stage },
    #[error("Candidate activities are still loading")]
    CandidatesPending,
    #[error("There is no stage before {0}")]
    NoPreviousStage(Stage),
}

//=========================================================================================
// Discovery bookkeeping
//=========================================================================================

/// Issued on every entry into Discovery. The host fetches a candidate batch for it
/// and hands the batch back through [`SessionController::load_candidates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryTicket {
    pub epoch: u64,
    pub destination: String,
    pub interests: Vec<Interest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The deck is ready with `total` candidates.
    Ready { total: usize },
    /// The batch was empty; the session went straight to Itinerary.
    Completed,
    /// The ticket belonged to an earlier Discovery entry; the batch was dropped.
    Stale,
}

//=========================================================================================
// SessionController
//=========================================================================================

#[derive(Debug, Default)]
pub struct SessionController {
    stage: Stage,
    trip: TripContext,
    discovery_epoch: u64,
    engine: Option<DecisionEngine>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn trip(&self) -> &TripContext {
        &self.trip
    }

    /// The active decision engine, present only once a candidate batch has loaded.
    pub fn engine(&self) -> Option<&DecisionEngine> {
        self.engine.as_ref()
    }

    /// True while Discovery waits for its candidate batch.
    pub fn is_loading(&self) -> bool {
        self.stage == Stage::Discovery && self.engine.is_none()
    }

    /// SETUP -> DISCOVERY. Merges the form into the trip when the guard holds.
    pub fn submit_setup(&mut self, form: SetupForm) -> Result<DiscoveryTicket, SessionError> {
        self.expect_stage(Stage::Setup)?;
        validate(&form)?;

        if let (Some(start), Some(end)) = (form.start_date, form.end_date) {
            if end < start {
                warn!(
                    "Trip to '{}' ends ({}) before it starts ({}); the itinerary will have no days.",
                    form.destination, end, start
                );
            }
        }

        self.trip.destination = form.destination.trim().to_string();
        self.trip.start_date = form.start_date;
        self.trip.end_date = form.end_date;
        self.trip.interests = form.interests;
        info!("Setup submitted for '{}'.", self.trip.destination);

        Ok(self.enter_discovery())
    }

    /// Installs the candidate batch fetched for `ticket`.
    pub fn load_candidates(
        &mut self,
        ticket: &DiscoveryTicket,
        candidates: Vec<Activity>,
    ) -> LoadOutcome {
        if self.stage != Stage::Discovery || ticket.epoch != self.discovery_epoch {
            info!("Dropping candidate batch for superseded discovery epoch {}.", ticket.epoch);
            return LoadOutcome::Stale;
        }
        if self.engine.is_some() {
            warn!("Candidate batch for epoch {} already loaded; ignoring duplicate.", ticket.epoch);
            return LoadOutcome::Stale;
        }

        let mut engine = DecisionEngine::new(candidates);
        if let Some(liked) = engine.take_finished() {
            info!("Candidate batch is empty; skipping straight to the itinerary.");
            self.complete_discovery(liked);
            return LoadOutcome::Completed;
        }

        let total = engine.len();
        self.engine = Some(engine);
        LoadOutcome::Ready { total }
    }

    /// Records an accept/reject on the current candidate. DISCOVERY -> ITINERARY on the last one.
    pub fn decide(&mut self, accept: bool) -> Result<DecisionOutcome, SessionError> {
        self.expect_stage(Stage::Discovery)?;
        let engine = self.engine.as_mut().ok_or(SessionError::CandidatesPending)?;

        let outcome = engine.decide(accept);
        if let DecisionOutcome::Finished(liked) = &outcome {
            self.complete_discovery(liked.clone());
        }
        Ok(outcome)
    }

    /// DISCOVERY -> SETUP, or ITINERARY -> DISCOVERY (which needs a fresh batch).
    pub fn back(&mut self) -> Result<Option<DiscoveryTicket>, SessionError> {
        match self.stage {
            Stage::Setup => Err(SessionError::NoPreviousStage(Stage::Setup)),
            Stage::Discovery => {
                self.discovery_epoch += 1;
                self.engine = None;
                self.stage = Stage::Setup;
                info!("Back to setup.");
                Ok(None)
            }
            Stage::Itinerary => {
                info!("Back to discovery.");
                Ok(Some(self.enter_discovery()))
            }
        }
    }

    /// Any stage -> SETUP with a freshly initialized trip.
    pub fn restart(&mut self) {
        self.discovery_epoch += 1;
        self.engine = None;
        self.trip = TripContext::default();
        self.stage = Stage::Setup;
        info!("Session restarted.");
    }

    /// Recomputes the itinerary from the trip. Only available in ITINERARY.
    pub fn itinerary(&self) -> Result<Itinerary, SessionError> {
        self.expect_stage(Stage::Itinerary)?;
        let start = self.trip.start_date.ok_or(ValidationError::MissingStartDate)?;
        let end = self.trip.end_date.ok_or(ValidationError::MissingEndDate)?;
        Ok(Itinerary::build(
            &self.trip.destination,
            start,
            end,
            &self.trip.approved_activities,
        ))
    }

    fn enter_discovery(&mut self) -> DiscoveryTicket {
        self.discovery_epoch += 1;
        self.engine = None;
        self.stage = Stage::Discovery;
        DiscoveryTicket {
            epoch: self.discovery_epoch,
            destination: self.trip.destination.clone(),
            interests: self.trip.interests.iter().copied().collect(),
        }
    }

    fn complete_discovery(&mut self, liked: Vec<Activity>) {
        info!("Discovery finished with {} approved activities.", liked.len());
        self.trip.approved_activities = liked;
        self.engine = None;
        self.stage = Stage::Itinerary;
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), SessionError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(SessionError::WrongStage {
                expected,
                actual: self.stage,
            })
        }
    }
}

fn validate(form: &SetupForm) -> Result<(), ValidationError> {
    if form.destination.trim().is_empty() {
        return Err(ValidationError::MissingDestination);
    }
    if form.start_date.is_none() {
        return Err(ValidationError::MissingStartDate);
    }
    if form.end_date.is_none() {
        return Err(ValidationError::MissingEndDate);
    }
    if form.interests.is_empty() {
        return Err(ValidationError::NoInterests);
    }
    Ok(())
}
