//! services/api/src/web/state.rs
//!
//! Defines the application's shared and session-specific states.

use crate::config::Config;
use crate::web::protocol::ServerMessage;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use trip_planner_core::{ports::CandidateSource, SessionController, SuggestionTracker};
use uuid::Uuid;

/// Outgoing messages for one connection. A writer task drains it into the socket.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

/// One connection's session, shared between the message loop and its worker tasks.
pub type SharedSession = Arc<Mutex<SessionState>>;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub candidate_source: Arc<dyn CandidateSource>,
}

//=========================================================================================
// SessionState (Specific to One WebSocket Connection)
//=========================================================================================

/// The state for a single planning session, alive as long as its WebSocket connection.
pub struct SessionState {
    pub session_id: Uuid,
    pub controller: SessionController,
    pub suggestions: SuggestionTracker,
    /// A token to cancel the pending (debounced) suggestion lookup.
    pub suggestion_cancel: CancellationToken,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            controller: SessionController::new(),
            suggestions: SuggestionTracker::new(),
            suggestion_cancel: CancellationToken::new(),
        }
    }

    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Queues a message for the client. A closed outbox only means the client is gone.
pub fn send(outbox: &Outbox, message: ServerMessage) {
    if outbox.send(message).is_err() {
        tracing::debug!("Outbox closed; dropping message for disconnected client.");
    }
}
