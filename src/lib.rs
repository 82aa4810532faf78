//! BouwMeesters Amsterdam site server: JSON API, page shells and admin back office.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod csrf;
pub mod errors;
pub mod jobs;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod store;

use auth::SessionKeys;
use config::Config;
use csrf::{CsrfTokens, CSRF_HEADER};
use middleware::rate_limit::RateLimiter;
use store::ContentStore;

/// Request bodies above this are rejected before reaching a handler.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state passed to handlers and middleware.
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub csrf: CsrfTokens,
    pub sessions: SessionKeys,
    pub limiter: RateLimiter,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn ContentStore>, config: Config) -> Self {
        Self {
            store,
            csrf: CsrfTokens::new(&config.csrf_secret, config.csrf_max_age_secs),
            sessions: SessionKeys::new(
                &config.session_secret,
                config.session_ttl_hours,
                config.secure_cookies(),
            ),
            limiter: RateLimiter::new(),
            config,
        }
    }
}

/// The full application: operational endpoints, `/api`, and page routes.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        // Health endpoints
        .route("/healthz", get(|| async { "ok" }))
        .route("/readyz", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api", api::api_router(state.clone()))
        .merge(pages::page_router(state.clone()))
        .with_state(state.clone())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(middleware::metrics::track_requests))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .layer(axum::middleware::from_fn(middleware::headers::request_id))
        .layer(axum::middleware::from_fn(middleware::headers::security_headers))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let site_origin = config.site_origin.clone();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            let origin_str = origin.to_str().unwrap_or("");
            origin_str == site_origin
                || origin_str.starts_with("http://localhost:")
                || origin_str.starts_with("http://127.0.0.1:")
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // Cannot use AllowHeaders::any() with allow_credentials(true)
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(CSRF_HEADER),
            HeaderName::from_static(middleware::headers::REQUEST_ID_HEADER),
        ])
        .allow_credentials(true)
}

async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!("readiness check failed: {:#}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}

async fn metrics_handler() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4"),
        )],
        middleware::metrics::encode_metrics(),
    )
}
