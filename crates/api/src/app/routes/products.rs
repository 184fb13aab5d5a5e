use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::routes::common::run_blocking;
use crate::app::services::SharedServices;

pub fn router() -> Router {
    Router::new().route("/", post(add_product).get(list_products))
}

pub async fn add_product(
    Extension(services): Extension<SharedServices>,
    body: Result<Json<dto::AddProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let result = run_blocking(services, move |svc| {
        svc.add_product(&body.sku, &body.name, &body.category, &body.unit)
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

pub async fn list_products(
    Extension(services): Extension<SharedServices>,
) -> axum::response::Response {
    match run_blocking(services, |svc| svc.products()).await {
        Ok(items) => Json(serde_json::json!({ "items": items })).into_response(),
        Err(resp) => resp,
    }
}
