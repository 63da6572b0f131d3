use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppError,
    middleware::auth::{AuthUser, Requester},
    models::{ApiResponse, CreateTripPayload, ErrorResponse, TripRequest},
    state::AppState,
};

use super::JsonBody;

/// Creates a return trip for the authenticated requester.
///
/// Date ordering is checked before the duplicate departure rule, so a
/// clashing request with inverted dates reports the ordering problem.
#[utoipa::path(
    post,
    path = "/api/v1/trips/return",
    request_body = CreateTripPayload,
    responses(
        (status = 201, description = "Request created successfully", body = TripRequest),
        (status = 400, description = "Invalid payload or conflicting request", body = ErrorResponse),
        (status = 401, description = "Not signed up or no manager assigned", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "trips"
)]
#[tracing::instrument(skip_all, fields(requester_id = %requester.user.id))]
pub async fn create_return_trip(
    State(state): State<AppState>,
    requester: Requester,
    JsonBody(payload): JsonBody<CreateTripPayload>,
) -> Result<(StatusCode, Json<ApiResponse<TripRequest>>), AppError> {
    let trip = payload.into_new_trip(requester.user.id, requester.manager_id)?;

    if state
        .trips
        .find_by_departure(trip.requester_id, trip.departure_date)
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateDepartureDate);
    }

    let created = state.trips.insert(trip).await?;
    tracing::info!(trip_id = %created.id, "trip request created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new("Request created successfully", created)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/trips",
    responses(
        (status = 200, description = "Trip requests of the caller", body = [TripRequest]),
        (status = 401, description = "Not signed up", body = ErrorResponse)
    ),
    security(("token" = [])),
    tag = "trips"
)]
#[tracing::instrument(skip_all, fields(requester_id = %auth.0.id))]
pub async fn list_trips(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<TripRequest>>>, AppError> {
    let trips = state.trips.list_by_requester(auth.0.id).await?;

    Ok(Json(ApiResponse::new(
        "Trip requests retrieved successfully",
        trips,
    )))
}
