//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the product service handle
//! - `routes/`: HTTP routes + handlers
//! - `views.rs`: JSON view models, flash messages and redirects
//! - `dto.rs`: product <-> JSON/form mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;
pub mod views;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(&config.store).await?;
    tracing::info!(backend = services.backend(), "product store ready");

    let jwt = Arc::new(stockroom_auth::Hs256JwtValidator::new(
        config.jwt_secret.clone().into_bytes(),
    ));
    let auth_state = middleware::AuthState {
        jwt,
        login_url: config.login_url.as_deref().map(Arc::from),
    };

    Ok(router(Arc::new(services), auth_state))
}

/// Assemble the router around already-built services.
pub fn router(services: Arc<services::AppServices>, auth_state: middleware::AuthState) -> Router {
    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new())
}
