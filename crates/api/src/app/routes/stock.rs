use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::routes::common::run_blocking;
use crate::app::services::SharedServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(stock_table))
        .route("/:sku", get(stock_for))
}

/// One row per catalog product, in catalog order.
pub async fn stock_table(
    Extension(services): Extension<SharedServices>,
) -> axum::response::Response {
    match run_blocking(services, |svc| svc.stock_table()).await {
        Ok(items) => Json(serde_json::json!({ "items": items })).into_response(),
        Err(resp) => resp,
    }
}

/// The stock-table row of one product; the SKU is echoed as stored.
pub async fn stock_for(
    Extension(services): Extension<SharedServices>,
    Path(sku): Path<String>,
) -> axum::response::Response {
    match run_blocking(services, move |svc| svc.stock_for(&sku)).await {
        Ok(row) => Json(row).into_response(),
        Err(resp) => resp,
    }
}
