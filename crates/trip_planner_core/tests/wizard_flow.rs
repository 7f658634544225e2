//! End-to-end tests for the planning wizard: setup, discovery against an in-memory
//! candidate source, and the resulting itinerary.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use trip_planner_core::candidates::{fetch_candidates, fetch_city_completions};
use trip_planner_core::{
    CandidateActivity, CandidateSource, DecisionOutcome, Interest, LoadOutcome, MatchType,
    PortError, PortResult, SessionController, SessionError, SetupForm, Stage, TripContext,
    ValidationError,
};

// =============================================================================
// Fakes
// =============================================================================

struct FixedSource {
    names: Vec<&'static str>,
    completion_calls: AtomicUsize,
}

impl FixedSource {
    fn new(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
            completion_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CandidateSource for FixedSource {
    async fn get_activities(
        &self,
        destination: &str,
        _interests: &[Interest],
    ) -> PortResult<Vec<CandidateActivity>> {
        Ok(self
            .names
            .iter()
            .map(|name| CandidateActivity {
                id: None,
                name: name.to_string(),
                description: format!("{} in {}", name, destination),
                kind: "landmark".to_string(),
                tags: vec!["must-see".to_string()],
                map_query: name.to_string(),
            })
            .collect())
    }

    async fn get_city_completions(&self, partial_input: &str) -> PortResult<Vec<String>> {
        self.completion_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![format!("{}is, France", partial_input)])
    }
}

struct FailingSource;

#[async_trait]
impl CandidateSource for FailingSource {
    async fn get_activities(&self, _: &str, _: &[Interest]) -> PortResult<Vec<CandidateActivity>> {
        Err(PortError::Unexpected("connection reset".to_string()))
    }

    async fn get_city_completions(&self, _: &str) -> PortResult<Vec<String>> {
        Err(PortError::Malformed("not json".to_string()))
    }
}

fn date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn form(destination: &str, start: &str, end: &str, interests: &[Interest]) -> SetupForm {
    SetupForm {
        destination: destination.to_string(),
        start_date: date(start),
        end_date: date(end),
        interests: interests.iter().copied().collect(),
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn paris_three_days_five_approved() {
    let source = FixedSource::new(&["Louvre", "Eiffel Tower", "Orsay", "Montmartre", "Seine Cruise", "Catacombs"]);
    let mut session = SessionController::new();

    let ticket = session
        .submit_setup(form("Paris", "2024-06-01", "2024-06-03", &[Interest::Art, Interest::Food]))
        .unwrap();
    assert_eq!(session.stage(), Stage::Discovery);
    assert_eq!(ticket.interests, vec![Interest::Food, Interest::Art]);

    let batch = fetch_candidates(&source, &ticket.destination, &ticket.interests).await;
    assert_eq!(batch[0].match_type, MatchType::Wildcard);
    assert_eq!(batch[1].match_type, MatchType::Match);
    assert_eq!(batch[3].match_type, MatchType::Wildcard);
    assert_eq!(batch[2].id, "act-2");

    assert_eq!(
        session.load_candidates(&ticket, batch),
        LoadOutcome::Ready { total: 6 }
    );

    let pattern = [true, true, false, true, true, true];
    let mut finished = None;
    for accept in pattern {
        if let DecisionOutcome::Finished(liked) = session.decide(accept).unwrap() {
            finished = Some(liked);
        }
    }
    let liked = finished.expect("six decisions finish a six-item batch");
    let names: Vec<_> = liked.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Louvre", "Eiffel Tower", "Montmartre", "Seine Cruise", "Catacombs"]);
    assert_eq!(session.stage(), Stage::Itinerary);
    assert_eq!(session.trip().approved_activities, liked);

    let itinerary = session.itinerary().unwrap();
    let counts: Vec<_> = itinerary.days.iter().map(|d| d.entries.len()).collect();
    assert_eq!(counts, vec![2, 2, 1]);
    let per_day: Vec<Vec<&str>> = itinerary
        .days
        .iter()
        .map(|d| d.entries.iter().map(|e| e.activity.name.as_str()).collect())
        .collect();
    assert_eq!(
        per_day,
        vec![
            vec!["Louvre", "Seine Cruise"],
            vec!["Eiffel Tower", "Catacombs"],
            vec!["Montmartre"],
        ]
    );

    assert!(matches!(
        session.decide(true),
        Err(SessionError::WrongStage { expected: Stage::Discovery, actual: Stage::Itinerary })
    ));
}

#[tokio::test]
async fn failed_candidate_fetch_completes_discovery_empty() {
    let mut session = SessionController::new();
    let ticket = session
        .submit_setup(form("Oslo", "2024-06-01", "2024-06-02", &[Interest::Nature]))
        .unwrap();

    let batch = fetch_candidates(&FailingSource, &ticket.destination, &ticket.interests).await;
    assert!(batch.is_empty());

    assert_eq!(session.load_candidates(&ticket, batch), LoadOutcome::Completed);
    assert_eq!(session.stage(), Stage::Itinerary);
    assert!(session.trip().approved_activities.is_empty());

    let itinerary = session.itinerary().unwrap();
    assert_eq!(itinerary.days.len(), 2);
    assert!(itinerary.days.iter().all(|d| d.entries.is_empty()));
}

#[test]
fn tokyo_without_interests_is_blocked() {
    let mut session = SessionController::new();
    let err = session
        .submit_setup(form("Tokyo", "2024-06-01", "2024-06-03", &[]))
        .unwrap_err();
    assert_eq!(err, SessionError::Validation(ValidationError::NoInterests));
    assert_eq!(session.stage(), Stage::Setup);
    assert_eq!(session.trip(), &TripContext::default());
}

#[tokio::test]
async fn reversed_dates_produce_no_days() {
    let source = FixedSource::new(&["Castle", "Harbour"]);
    let mut session = SessionController::new();
    let ticket = session
        .submit_setup(form("Edinburgh", "2024-06-05", "2024-06-01", &[Interest::History]))
        .unwrap();
    let batch = fetch_candidates(&source, &ticket.destination, &ticket.interests).await;
    session.load_candidates(&ticket, batch);
    session.decide(true).unwrap();
    session.decide(true).unwrap();

    assert_eq!(session.trip().approved_activities.len(), 2);
    let itinerary = session.itinerary().unwrap();
    assert!(itinerary.days.is_empty());
    assert_eq!(itinerary.activity_count, 2);
}

#[tokio::test]
async fn restart_from_any_stage_resets_the_trip() {
    let source = FixedSource::new(&["Alfama"]);

    let mut session = SessionController::new();
    session.restart();
    assert_eq!(session.trip(), &TripContext::default());

    let ticket = session
        .submit_setup(form("Lisbon", "2024-06-01", "2024-06-02", &[Interest::Coffee]))
        .unwrap();
    session.restart();
    assert_eq!(session.stage(), Stage::Setup);
    assert_eq!(session.trip(), &TripContext::default());
    let batch = fetch_candidates(&source, &ticket.destination, &ticket.interests).await;
    assert_eq!(session.load_candidates(&ticket, batch), LoadOutcome::Stale);

    let ticket = session
        .submit_setup(form("Lisbon", "2024-06-01", "2024-06-02", &[Interest::Coffee]))
        .unwrap();
    let batch = fetch_candidates(&source, &ticket.destination, &ticket.interests).await;
    session.load_candidates(&ticket, batch);
    session.decide(true).unwrap();
    assert_eq!(session.stage(), Stage::Itinerary);
    session.restart();
    assert_eq!(session.stage(), Stage::Setup);
    assert_eq!(session.trip(), &TripContext::default());
}

#[tokio::test]
async fn rediscovery_replaces_the_approved_set() {
    let source = FixedSource::new(&["Gion", "Kinkaku-ji"]);
    let mut session = SessionController::new();
    let ticket = session
        .submit_setup(form("Kyoto", "2024-06-01", "2024-06-01", &[Interest::History]))
        .unwrap();
    let batch = fetch_candidates(&source, &ticket.destination, &ticket.interests).await;
    session.load_candidates(&ticket, batch);
    session.decide(true).unwrap();
    session.decide(true).unwrap();
    assert_eq!(session.trip().approved_activities.len(), 2);

    let ticket = session.back().unwrap().unwrap();
    let batch = fetch_candidates(&source, &ticket.destination, &ticket.interests).await;
    session.load_candidates(&ticket, batch);
    session.decide(false).unwrap();
    session.decide(true).unwrap();
    let names: Vec<_> = session
        .trip()
        .approved_activities
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["Kinkaku-ji"]);
}

#[tokio::test]
async fn second_submission_merges_but_keeps_approved() {
    let source = FixedSource::new(&["Sagrada Familia"]);
    let mut session = SessionController::new();
    let ticket = session
        .submit_setup(form("Barcelona", "2024-06-01", "2024-06-02", &[Interest::Art]))
        .unwrap();
    let batch = fetch_candidates(&source, &ticket.destination, &ticket.interests).await;
    session.load_candidates(&ticket, batch);
    session.decide(true).unwrap();

    session.back().unwrap();
    session.back().unwrap();
    assert_eq!(session.stage(), Stage::Setup);

    session
        .submit_setup(form("Madrid", "2024-07-01", "2024-07-04", &[Interest::Nightlife]))
        .unwrap();
    let trip = session.trip();
    assert_eq!(trip.destination, "Madrid");
    assert_eq!(trip.end_date, date("2024-07-04"));
    assert_eq!(trip.approved_activities.len(), 1);
}

#[tokio::test]
async fn city_completions_need_three_characters() {
    let source = FixedSource::new(&[]);
    assert!(fetch_city_completions(&source, "Pa").await.is_empty());
    assert_eq!(source.completion_calls.load(Ordering::SeqCst), 0);

    assert_eq!(fetch_city_completions(&source, "Par").await, vec!["Paris, France".to_string()]);
    assert_eq!(source.completion_calls.load(Ordering::SeqCst), 1);

    assert!(fetch_city_completions(&FailingSource, "Paris").await.is_empty());
}
