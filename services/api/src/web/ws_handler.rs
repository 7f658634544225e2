//! services/api/src/web/ws_handler.rs
//!
//! This is the main entry point and control loop for a WebSocket connection.
//! Each connection is one planning session: it owns a `SessionController` and
//! delegates the suspending lookups to worker tasks.

use crate::web::{
    discovery_task::{send_current_candidate, send_itinerary, spawn_discovery},
    protocol::{interest_catalog, ClientMessage, ServerMessage},
    state::{send, AppState, Outbox, SessionState, SharedSession},
    suggestion_task::schedule_suggestions,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use trip_planner_core::{DecisionOutcome, SessionError, Stage};

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (outbox, mut outbox_rx) = mpsc::unbounded_channel::<ServerMessage>();

    // --- 1. Writer task: serializes queued messages onto the socket ---
    let writer = tokio::spawn(async move {
        while let Some(message) = outbox_rx.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize server message: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                error!("Failed to send message to client. Ending writer task.");
                break;
            }
        }
    });

    // --- 2. Initialization ---
    let session = SessionState::shared();
    {
        let state = session.lock().await;
        info!("New planning session {} established.", state.session_id);
        send(
            &outbox,
            ServerMessage::SessionInitialized {
                session_id: state.session_id,
                stage: state.controller.stage(),
                interests: interest_catalog(),
            },
        );
    }

    // --- 3. Main Message Loop ---
    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(text.as_str()) {
                Ok(client_msg) => {
                    handle_client_message(&app_state, &session, &outbox, client_msg).await;
                }
                Err(e) => {
                    warn!("Failed to deserialize client message: {}", e);
                    send(
                        &outbox,
                        ServerMessage::Error {
                            message: format!("Unrecognized message: {}", e),
                        },
                    );
                }
            },
            Message::Close(_) => {
                info!("Client sent close message.");
                break;
            }
            _ => {}
        }
    }

    // --- 4. Cleanup ---
    session.lock().await.suggestion_cancel.cancel();
    drop(outbox);
    writer.abort();
    info!("WebSocket connection closed.");
}

/// Applies one client message to the session. Messages from a connection are handled
/// one at a time, so decisions can never race on the same candidate.
pub async fn handle_client_message(
    app_state: &Arc<AppState>,
    session: &SharedSession,
    outbox: &Outbox,
    client_msg: ClientMessage,
) {
    match client_msg {
        ClientMessage::DestinationInput { text } => {
            schedule_suggestions(app_state.clone(), session.clone(), outbox.clone(), text).await;
        }
        ClientMessage::SubmitSetup(payload) => {
            let form = match payload.into_form() {
                Ok(form) => form,
                Err(message) => {
                    send(outbox, ServerMessage::ValidationError { message });
                    return;
                }
            };

            let mut state = session.lock().await;
            match state.controller.submit_setup(form) {
                Ok(ticket) => {
                    state.suggestion_cancel.cancel();
                    state.suggestions.reset();
                    send_stage(&state, outbox);
                    spawn_discovery(app_state.clone(), session.clone(), outbox.clone(), ticket);
                }
                Err(SessionError::Validation(e)) => {
                    info!("Setup submission blocked: {}", e);
                    send(
                        outbox,
                        ServerMessage::ValidationError {
                            message: e.user_message().to_string(),
                        },
                    );
                }
                Err(e) => send_session_error(outbox, e),
            }
        }
        ClientMessage::Decide { accept } => {
            let mut state = session.lock().await;
            match state.controller.decide(accept) {
                Ok(DecisionOutcome::Advanced { .. }) => send_current_candidate(&state, outbox),
                Ok(DecisionOutcome::Finished(_)) => send_itinerary(&state, outbox),
                Ok(DecisionOutcome::Ignored) => warn!("Decision ignored: deck already finished."),
                Err(e) => send_session_error(outbox, e),
            }
        }
        ClientMessage::Back => {
            let mut state = session.lock().await;
            match state.controller.back() {
                Ok(ticket) => {
                    send_stage(&state, outbox);
                    if let Some(ticket) = ticket {
                        spawn_discovery(app_state.clone(), session.clone(), outbox.clone(), ticket);
                    }
                }
                Err(e) => send_session_error(outbox, e),
            }
        }
        ClientMessage::Restart => {
            let mut state = session.lock().await;
            state.suggestion_cancel.cancel();
            state.suggestions.reset();
            state.controller.restart();
            send_stage(&state, outbox);
        }
    }
}

fn send_stage(state: &SessionState, outbox: &Outbox) {
    let stage = state.controller.stage();
    if stage == Stage::Itinerary {
        send_itinerary(state, outbox);
        return;
    }
    send(
        outbox,
        ServerMessage::StageChanged {
            stage,
            trip: state.controller.trip().clone(),
        },
    );
}

fn send_session_error(outbox: &Outbox, e: SessionError) {
    warn!("Rejected client action: {}", e);
    send(outbox, ServerMessage::Error { message: e.to_string() });
}
