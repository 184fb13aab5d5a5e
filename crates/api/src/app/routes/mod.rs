use axum::Router;

pub mod common;
pub mod movements;
pub mod products;
pub mod stock;
pub mod system;

/// Router for every inventory endpoint.
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/movements", movements::router())
        .nest("/stock", stock::router())
}
