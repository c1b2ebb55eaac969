//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: record stores and token issuer
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: query/request DTOs and pagination helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{
    Extension, Router,
    http::{StatusCode, Uri},
    routing::{get, post},
};
use tower::ServiceBuilder;

use mpsystem_core::DomainResult;

use crate::config::ApiConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> DomainResult<Router> {
    let services = Arc::new(services::build_services(config)?);
    Ok(router_with(services))
}

/// Router over already-built services.
pub fn router_with(services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        jwt: services.jwt.clone(),
    };

    // Protected routes: require a valid bearer token.
    let protected = routes::router().route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    let api = Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/register", post(routes::auth::register))
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(axum::middleware::from_fn(middleware::request_log_middleware)),
        )
}

async fn not_found(uri: Uri) -> axum::response::Response {
    errors::json_error(
        StatusCode::NOT_FOUND,
        "not_found",
        format!("route {} not found", uri.path()),
    )
}
