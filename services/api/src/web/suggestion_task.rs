//! services/api/src/web/suggestion_task.rs
//!
//! Debounced city-name suggestions. Each destination keystroke cancels the pending
//! lookup and starts a new delay window; a lookup that does fire is still applied only
//! if no newer input arrived while it was in flight.

use crate::web::{
    protocol::ServerMessage,
    state::{send, AppState, Outbox, SharedSession},
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use trip_planner_core::{candidates::fetch_city_completions, SuggestionRequest, SuggestionTicket};

/// Registers a destination input. Returns the handle of the delayed lookup, if one was scheduled.
pub async fn schedule_suggestions(
    app_state: Arc<AppState>,
    session: SharedSession,
    outbox: Outbox,
    text: String,
) -> Option<JoinHandle<()>> {
    let (request, token) = {
        let mut state = session.lock().await;
        state.suggestion_cancel.cancel();
        state.suggestion_cancel = CancellationToken::new();
        (state.suggestions.begin(&text), state.suggestion_cancel.clone())
    };

    match request {
        SuggestionRequest::Skip => {
            send(
                &outbox,
                ServerMessage::Suggestions {
                    query: text,
                    suggestions: Vec::new(),
                },
            );
            None
        }
        SuggestionRequest::Fetch(ticket) => Some(tokio::spawn(suggestion_process(
            app_state, session, outbox, ticket, token,
        ))),
    }
}

/// Waits out the debounce window, then fetches and applies the suggestions.
pub async fn suggestion_process(
    app_state: Arc<AppState>,
    session: SharedSession,
    outbox: Outbox,
    ticket: SuggestionTicket,
    cancellation_token: CancellationToken,
) {
    tokio::select! {
        _ = cancellation_token.cancelled() => {
            debug!("Suggestion lookup for '{}' superseded before firing.", ticket.query);
            return;
        }
        _ = tokio::time::sleep(app_state.config.suggestion_debounce) => {}
    }

    send(
        &outbox,
        ServerMessage::SearchingSuggestions {
            query: ticket.query.clone(),
        },
    );
    let results = fetch_city_completions(app_state.candidate_source.as_ref(), &ticket.query).await;

    let mut state = session.lock().await;
    if state.suggestions.apply(&ticket, results) {
        send(
            &outbox,
            ServerMessage::Suggestions {
                query: ticket.query,
                suggestions: state.suggestions.suggestions().to_vec(),
            },
        );
    } else {
        debug!("Dropping stale suggestions for '{}'.", ticket.query);
    }
}
