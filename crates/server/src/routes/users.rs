use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use models::CreateUserRequest;
use tracing::info;

use crate::errors::ApiError;
use crate::response::Envelope;
use crate::routes::{decode, AppState, ListQuery};

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = crate::openapi::CreateUserDoc,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Invalid user"),
        (status = 409, description = "User already exists"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope>), ApiError> {
    let req = decode(payload)?;
    let user = state.service.create_user(req).await?;
    info!(user.id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(Envelope::ok(&user)?)))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(ListQuery),
    responses((status = 200, description = "Users in creation order"))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Envelope>, ApiError> {
    let users = state.service.list_users(q.to_request()).await?;
    Ok(Json(Envelope::ok(&users)?))
}
