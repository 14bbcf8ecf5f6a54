use crate::config::ServiceConfig;
use crate::handlers::fingerprint_handler::{ja4_handler, ja4s_handler};
use crate::handlers::inspect_handler::{health_handler, parse_handler};
use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

pub fn router(config: &ServiceConfig) -> Router {
    Router::new()
        .route("/ja4", post(ja4_handler))
        .route("/ja4s", post(ja4s_handler))
        .route("/parse", post(parse_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(CorsLayer::permissive())
        .with_state(())
}
