//! HTTP API for tally.
//!
//! `POST /api` takes a multipart form with a `question` and an optional
//! `file` (CSV or ZIP) and answers with `{ "answer": ... }`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod telemetry;
pub mod uploads;

use axum::extract::{DefaultBodyLimit, Request};
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use uuid::Uuid;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tally API",
        description = "Answers data assignment questions, optionally from an attached CSV or ZIP"
    ),
    paths(handlers::ask::ask, handlers::health::health),
    components(schemas(
        handlers::AnswerResponse,
        handlers::HealthResponse,
        ErrorResponse
    )),
    tags(
        (name = "Answers", description = "Question answering"),
        (name = "System", description = "Service status")
    )
)]
pub struct ApiDoc;

/// Build the application router with all middleware applied.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(match &config.allowed_origins {
            Some(origins) => AllowOrigin::list(origins.clone()),
            None => AllowOrigin::any(),
        })
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/api", post(handlers::ask))
        .route("/health", get(handlers::health))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        // Multipart uploads are bounded by the configured limit, not axum's 2 MB default
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}
