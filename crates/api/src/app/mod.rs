//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: store and service wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and their mapping onto domain values
//! - `errors.rs`: consistent error responses

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::SharedServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: SharedServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(Extension(services)),
        )
}
