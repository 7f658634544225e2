//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::ApiError;
use crate::web::protocol::{check_trip_length, interest_catalog, parse_form_date, InterestOption};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use trip_planner_core::{Activity, Itinerary};
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        list_interests_handler,
        build_itinerary_handler,
    ),
    components(
        schemas(HealthResponse, InterestOption, BuildItineraryRequest, ItineraryResponse)
    ),
    tags(
        (name = "Trip Planner API", description = "API endpoints for the trip planning wizard. The wizard itself runs over the /ws WebSocket.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// The request payload for building an itinerary outside of a live session.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct BuildItineraryRequest {
    pub destination: String,
    /// `YYYY-MM-DD`
    pub start_date: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
    /// Approved activities, in acceptance order.
    #[schema(value_type = Vec<Object>)]
    pub activities: Vec<Activity>,
}

#[derive(Serialize, ToSchema)]
pub struct ItineraryResponse {
    #[schema(value_type = Object)]
    pub itinerary: Itinerary,
    pub printable: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// List the interest catalog shown on the Setup form.
#[utoipa::path(
    get,
    path = "/interests",
    responses((status = 200, description = "The interest catalog", body = [InterestOption]))
)]
pub async fn list_interests_handler() -> Json<Vec<InterestOption>> {
    Json(interest_catalog())
}

/// Distribute approved activities across the days of a trip.
///
/// Stateless: the same request always yields the same itinerary.
#[utoipa::path(
    post,
    path = "/itinerary",
    request_body = BuildItineraryRequest,
    responses(
        (status = 200, description = "Itinerary built", body = ItineraryResponse),
        (status = 400, description = "Missing or unparsable dates, or a trip longer than the maximum length"),
    )
)]
pub async fn build_itinerary_handler(
    Json(req): Json<BuildItineraryRequest>,
) -> Result<Json<ItineraryResponse>, ApiError> {
    let start = required_date("start_date", &req.start_date)?;
    let end = required_date("end_date", &req.end_date)?;
    check_trip_length(start, end).map_err(ApiError::BadRequest)?;

    let itinerary = Itinerary::build(&req.destination, start, end, &req.activities);
    info!(
        "Built itinerary for '{}': {} days, {} activities.",
        req.destination,
        itinerary.days.len(),
        itinerary.activity_count
    );
    let printable = itinerary.to_string();
    Ok(Json(ItineraryResponse {
        itinerary,
        printable,
    }))
}

fn required_date(field: &str, value: &str) -> Result<chrono::NaiveDate, ApiError> {
    parse_form_date(field, value)
        .map_err(ApiError::BadRequest)?
        .ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))
}
