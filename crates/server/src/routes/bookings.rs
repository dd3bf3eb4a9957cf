use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use models::CreateBookingRequest;
use serde::Deserialize;
use tracing::info;

use crate::errors::ApiError;
use crate::response::Envelope;
use crate::routes::{decode, AppState, ListQuery};

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingQuery {
    /// Booking identifier.
    pub id: Option<String>,
}

#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = crate::openapi::CreateBookingDoc,
    responses(
        (status = 201, description = "Booking created"),
        (status = 400, description = "Invalid booking"),
        (status = 409, description = "Booking already exists"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope>), ApiError> {
    let req = decode(payload)?;
    let booking = state.service.create_booking(req).await?;
    info!(booking.id = %booking.id, "booking created");
    Ok((StatusCode::CREATED, Json(Envelope::ok(&booking)?)))
}

#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(ListQuery),
    responses((status = 200, description = "Bookings in creation order"))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Envelope>, ApiError> {
    let bookings = state.service.list_bookings(q.to_request()).await?;
    Ok(Json(Envelope::ok(&bookings)?))
}

#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = String, Path, description = "Booking identifier")),
    responses(
        (status = 200, description = "Booking with its class and user"),
        (status = 404, description = "Unknown booking, class or user"),
    )
)]
pub async fn get_by_path(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope>, ApiError> {
    full_info(&state, &id).await
}

#[utoipa::path(
    get,
    path = "/booking",
    tag = "bookings",
    params(BookingQuery),
    responses(
        (status = 200, description = "Booking with its class and user"),
        (status = 404, description = "Unknown booking, class or user"),
    )
)]
pub async fn get_by_query(
    State(state): State<AppState>,
    Query(q): Query<BookingQuery>,
) -> Result<Json<Envelope>, ApiError> {
    // an absent id is looked up as "" and reported as not found
    full_info(&state, q.id.as_deref().unwrap_or_default()).await
}

async fn full_info(state: &AppState, id: &str) -> Result<Json<Envelope>, ApiError> {
    let info = state.service.get_booking(id).await?;
    Ok(Json(Envelope::ok(&info)?))
}
