use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use models::CreateClassRequest;
use tracing::info;

use crate::errors::ApiError;
use crate::response::Envelope;
use crate::routes::{decode, AppState, ListQuery};

#[utoipa::path(
    post,
    path = "/classes",
    tag = "classes",
    request_body = crate::openapi::CreateClassDoc,
    responses(
        (status = 201, description = "Class created"),
        (status = 400, description = "Invalid class"),
        (status = 409, description = "Class already exists"),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateClassRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope>), ApiError> {
    let req = decode(payload)?;
    let class = state.service.create_class(req).await?;
    info!(class.id = %class.id, class.studio = %class.studio, "class created");
    Ok((StatusCode::CREATED, Json(Envelope::ok(&class)?)))
}

#[utoipa::path(
    get,
    path = "/classes",
    tag = "classes",
    params(ListQuery),
    responses((status = 200, description = "Classes in creation order"))
)]
pub async fn list(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Envelope>, ApiError> {
    let classes = state.service.list_classes(q.to_request()).await?;
    Ok(Json(Envelope::ok(&classes)?))
}
