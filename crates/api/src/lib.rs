//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET     /api/jobs         paginated, filterable job postings
//!   GET     /api/statistics   aggregate counts
//!   OPTIONS on both           empty 200 for cross-origin pre-flight
//!
//! Any other method on those paths, HEAD included, answers 405. Every
//! response carries the allow-origin, allow-methods and allow-headers
//! CORS headers.

pub mod error;
pub mod handlers;
pub mod params;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use db::JobPostingStore;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

pub use error::ApiError;
pub use handlers::AppState;

const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Build the application router over `state`.
///
/// `CorsLayer` answers every OPTIONS request itself with an empty 200, so
/// the method routers only need GET, the HEAD override and the 405 fallback.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route(
            "/api/jobs",
            get(handlers::jobs::list)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/statistics",
            get(handlers::statistics::get)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, store: Arc<dyn JobPostingStore>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl+c: {e}");
        std::future::pending::<()>().await;
    }
    info!("received ctrl+c interrupt, closing server");
}

#[cfg(test)]
mod router_tests;
