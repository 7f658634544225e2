//! services/api/src/web/discovery_task.rs
//!
//! This module contains the asynchronous "worker" function that fetches the
//! candidate batch for one entry into the Discovery stage.

use crate::web::{
    protocol::ServerMessage,
    state::{send, AppState, Outbox, SessionState, SharedSession},
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use trip_planner_core::{candidates::fetch_candidates, DiscoveryTicket, LoadOutcome, Stage};

/// Spawns the discovery worker for `ticket`.
pub fn spawn_discovery(
    app_state: Arc<AppState>,
    session: SharedSession,
    outbox: Outbox,
    ticket: DiscoveryTicket,
) -> JoinHandle<()> {
    tokio::spawn(discovery_process(app_state, session, outbox, ticket))
}

/// Fetches the batch, then installs it in the session unless the ticket went stale
/// while the lookup was suspended.
pub async fn discovery_process(
    app_state: Arc<AppState>,
    session: SharedSession,
    outbox: Outbox,
    ticket: DiscoveryTicket,
) {
    info!(
        "Discovery process started for '{}' (epoch {}).",
        ticket.destination, ticket.epoch
    );
    send(
        &outbox,
        ServerMessage::CandidatesLoading {
            destination: ticket.destination.clone(),
        },
    );

    // The session lock is not held while the backend is working.
    let batch = fetch_candidates(
        app_state.candidate_source.as_ref(),
        &ticket.destination,
        &ticket.interests,
    )
    .await;

    let mut state = session.lock().await;
    match state.controller.load_candidates(&ticket, batch) {
        LoadOutcome::Ready { total } => {
            info!("Deck ready with {} candidates.", total);
            send_current_candidate(&state, &outbox);
        }
        LoadOutcome::Completed => send_itinerary(&state, &outbox),
        LoadOutcome::Stale => {}
    }
}

/// Sends the candidate on top of the deck, if there is one.
pub fn send_current_candidate(state: &SessionState, outbox: &Outbox) {
    let Some(engine) = state.controller.engine() else {
        return;
    };
    if let (Some(activity), Some((position, total))) = (engine.current(), engine.position()) {
        send(
            outbox,
            ServerMessage::Candidate {
                activity: activity.clone(),
                position,
                total,
            },
        );
    }
}

/// Announces the Itinerary stage and sends the freshly computed itinerary.
pub fn send_itinerary(state: &SessionState, outbox: &Outbox) {
    send(
        outbox,
        ServerMessage::StageChanged {
            stage: Stage::Itinerary,
            trip: state.controller.trip().clone(),
        },
    );
    match state.controller.itinerary() {
        Ok(itinerary) => send(outbox, ServerMessage::itinerary(itinerary)),
        Err(e) => {
            error!("Failed to build itinerary: {}", e);
            send(outbox, ServerMessage::Error { message: e.to_string() });
        }
    }
}
