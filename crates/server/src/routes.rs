use std::sync::Arc;

use axum::{
    body::Body,
    extract::rejection::JsonRejection,
    http::{header, Request, StatusCode},
    routing::get,
    Json, Router,
};
use models::ListRequest;
use serde::Deserialize;
use service::BookingService;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, Level};
use utoipa::OpenApi;
use uuid::Uuid;

use common::types::Health;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;

pub mod bookings;
pub mod classes;
pub mod users;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BookingService>,
}

impl AppState {
    pub fn new(service: BookingService) -> Self { Self { service: Arc::new(service) } }
}

/// `offset`/`count` query parameters. Values that are not non-negative
/// integers are ignored rather than rejected.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    pub offset: Option<String>,
    pub count: Option<String>,
}

impl ListQuery {
    pub fn to_request(&self) -> ListRequest {
        ListRequest { offset: parse_window("offset", &self.offset), count: parse_window("count", &self.count) }
    }
}

fn parse_window(name: &str, raw: &Option<String>) -> Option<usize> {
    let raw = raw.as_deref()?;
    match raw.trim().parse::<usize>() {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(param = name, value = raw, err = %e, "ignoring list parameter");
            None
        }
    }
}

/// Unwrap a JSON body, turning any decoding failure into a 400 envelope.
pub(crate) fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(v)| v).map_err(|e| {
        debug!(err = %e, "error decoding request");
        ApiError::BadRequest(e.body_text())
    })
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (StatusCode, String) {
    common::metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn request_span(req: &Request<Body>) -> tracing::Span {
    let remote = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    tracing::info_span!(
        "api",
        api.method = %req.method(),
        api.url = %req.uri(),
        api.remote = %remote,
        api.api_uuid = %Uuid::new_v4(),
    )
}

/// Build the full application router: entity endpoints plus health, metrics and API docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/users", get(users::list).post(users::create))
        .route("/classes", get(classes::list).post(classes::create))
        .route("/bookings", get(bookings::list).post(bookings::create))
        .route("/bookings/:id", get(bookings::get_by_path))
        .route("/booking", get(bookings::get_by_query));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json));

    api.merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_ignores_garbage() {
        let q = ListQuery { offset: Some("2".into()), count: Some("ten".into()) };
        assert_eq!(q.to_request(), ListRequest { offset: Some(2), count: None });

        let q = ListQuery { offset: Some("-1".into()), count: None };
        assert_eq!(q.to_request(), ListRequest::all());
    }
}
