use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pharmastock_core::DomainError;
use pharmastock_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Rejected(e) => domain_error_to_response(e),
        ServiceError::Store(e) => {
            tracing::error!(collection = %e.collection(), error = %e, "storage failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let (status, code) = match &err {
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        DomainError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
    };
    json_error(status, code, err.reason())
}

/// A body that is not valid JSON, or lacks a required field, is a validation
/// failure like any other.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
