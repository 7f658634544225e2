pub mod discovery_task;
pub mod protocol;
pub mod rest;
pub mod state;
pub mod suggestion_task;
pub mod ws_handler;

// Re-export the main handlers to make them easily accessible
// to the binary that builds the web server router.
pub use rest::{build_itinerary_handler, health_handler, list_interests_handler};
pub use ws_handler::ws_handler;

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;

/// All API routes, with the shared state applied.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/interests", get(list_interests_handler))
        .route("/itinerary", post(build_itinerary_handler))
        .route("/ws", get(ws_handler))
        .with_state(app_state)
}
