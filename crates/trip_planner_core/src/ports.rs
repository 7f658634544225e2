//! crates/trip_planner_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the planner's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to stay independent of the generative backend that supplies candidates.

use async_trait::async_trait;
use crate::domain::{CandidateActivity, Interest};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, parsing).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("The backend returned a malformed response: {0}")]
    Malformed(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Generates an ordered batch of candidate activities for a destination.
    async fn get_activities(
        &self,
        destination: &str,
        interests: &[Interest],
    ) -> PortResult<Vec<CandidateActivity>>;

    /// Suggests city names completing a partial input.
    async fn get_city_completions(&self, partial_input: &str) -> PortResult<Vec<String>>;
}
