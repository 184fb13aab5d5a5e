use axum::{
    extract::{rejection::JsonRejection, Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::routes::common::run_blocking;
use crate::app::services::SharedServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(record_movement).get(list_movements))
}

pub async fn record_movement(
    Extension(services): Extension<SharedServices>,
    body: Result<Json<dto::RecordMovementRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let kind = match body.kind() {
        Ok(k) => k,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let quantity = match body.quantity() {
        Ok(q) => q,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let result = run_blocking(services, move |svc| {
        svc.record_movement(kind, &body.sku, quantity, &body.notes)
    })
    .await;

    match result {
        Ok(message) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "message": message })),
        )
            .into_response(),
        Err(resp) => resp,
    }
}

/// `GET /movements?sku=A1` limits the listing to one product.
pub async fn list_movements(
    Extension(services): Extension<SharedServices>,
    Query(query): Query<dto::MovementsQuery>,
) -> axum::response::Response {
    let result = run_blocking(services, move |svc| svc.movements(query.sku.as_deref())).await;

    match result {
        Ok(items) => Json(serde_json::json!({ "items": items })).into_response(),
        Err(resp) => resp,
    }
}
