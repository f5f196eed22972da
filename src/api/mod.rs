use crate::adapters::NoticeRepository;
use crate::config::Config;
use crate::services::NoticeService;
use axum::body::Body;
use axum::http::Request;
use axum::{Router, routing::get};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub mod health;
pub mod notices;
pub mod outcome;
pub mod schemas;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Config,
    pub notice_service: NoticeService,
    /// Parent of every per-request cancellation token; cancelled on shutdown.
    pub shutdown: CancellationToken,
}

#[derive(Clone, Debug)]
pub struct MgmtState {
    pub repository: Arc<dyn NoticeRepository>,
}

/// Configures and returns the primary application router.
pub fn app_router(config: Config, notice_service: NoticeService, shutdown: CancellationToken) -> Router {
    let state = AppState { config, notice_service, shutdown };

    let notice_routes = Router::new()
        .route("/notices", get(notices::list_notices).post(notices::create_notice))
        .route(
            "/notices/{id}",
            get(notices::get_notice).put(notices::update_notice).delete(notices::delete_notice),
        );

    Router::new()
        .nest("/api/v1", notice_routes)
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id")))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(move |request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .map(|id| id.header_value().to_str().unwrap_or_default())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "otel.kind" = "server",
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &tracing::Span| {
                        let status = response.status();
                        tracing::Span::current().record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id"), MakeRequestUuid))
        .with_state(state)
}

pub fn mgmt_router(state: MgmtState) -> Router {
    Router::new().route("/livez", get(health::livez)).route("/readyz", get(health::readyz)).with_state(state)
}
