//! StudyShare application composition root
//!
//! Composes all domain routers into a single application and provides the
//! shared middleware stack used by both binaries.

use std::time::Duration;

use axum::{
    body::{Bytes, HttpBody},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    BoxError, Router,
};
use sqlx::PgPool;
use studyshare_accounts::AccountsState;
use studyshare_common::{config::Config, Error};
use studyshare_links::LinksState;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Maximum accepted request body size (1 MiB)
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Path prefix for the read-only static directory
pub const STATIC_PREFIX: &str = "/uploads";

/// Create the main application router with all domain routes
pub fn create_app(pool: PgPool) -> Router {
    let accounts_state = AccountsState::new(pool.clone());
    let links_state = LinksState::new(pool);

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "StudyShare API v0.0.1-SNAPSHOT" }),
        )
        .merge(studyshare_accounts::routes().with_state(accounts_state))
        .merge(studyshare_links::routes().with_state(links_state))
}

/// Router plus static files and the full middleware stack
pub fn create_service(config: &Config, pool: PgPool) -> Router {
    let router = create_app(pool).nest_service(STATIC_PREFIX, ServeDir::new(&config.static_dir));
    with_middleware(router, config)
}

/// Wrap any router in the production middleware stack.
///
/// Innermost first: body limit, timeout, error envelope, CORS, tracing.
pub fn with_middleware(router: Router, config: &Config) -> Router {
    router
        .layer(body_limit_layer())
        .layer(timeout_layer(config.request_timeout()))
        .layer(middleware::map_response(error_envelope))
        .layer(build_cors_layer(config.cors_allowed_origins.as_deref()))
        .layer(TraceLayer::new_for_http())
}

/// Rewrite error responses produced outside the handlers (body limit,
/// timeout, router fallback, static files) into the JSON error envelope.
async fn error_envelope<B>(response: Response<B>) -> Response
where
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    if is_json(response.headers()) {
        return response.into_response();
    }

    let error = match response.status() {
        StatusCode::PAYLOAD_TOO_LARGE => Error::PayloadTooLarge,
        StatusCode::REQUEST_TIMEOUT => Error::RequestTimeout,
        StatusCode::METHOD_NOT_ALLOWED => Error::MethodNotAllowed,
        StatusCode::NOT_FOUND => Error::NotFound("Resource not found".to_string()),
        status if status.is_server_error() => {
            Error::Internal(format!("Unhandled {} response", status))
        }
        _ => return response.into_response(),
    };

    let mut enveloped = error.into_response();
    if let Some(allow) = response.headers().get(header::ALLOW) {
        enveloped.headers_mut().insert(header::ALLOW, allow.clone());
    }
    enveloped
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// CORS policy: permissive unless a comma-separated origin list is configured
pub fn build_cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let Some(origins) = allowed_origins else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = o, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_SIZE)
}

/// Per-request timeout; expired requests get 408
pub fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
